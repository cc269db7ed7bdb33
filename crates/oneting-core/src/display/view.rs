use std::time::Duration;

use super::DisplayMessage;

/// How long the mini timer lingers after `done`.
pub const CLOSE_DELAY: Duration = Duration::from_millis(1200);

/// What the host should do after applying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Render,
    /// Render, then close after the delay.
    CloseAfter(Duration),
}

/// Receiver-side state of the mini timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniTimerView {
    app_name: String,
    pub time: String,
    pub task: String,
    pub dark: bool,
    pub title: String,
}

impl MiniTimerView {
    pub fn new(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            time: "00:00".into(),
            task: String::new(),
            dark: false,
            title: app_name.clone(),
            app_name,
        }
    }

    pub fn apply(&mut self, message: &DisplayMessage) -> ViewAction {
        match message {
            DisplayMessage::TimerUpdate {
                remaining,
                task,
                dark,
            } => {
                self.time = remaining.clone();
                self.task = task.clone();
                self.dark = *dark;
                let label = if task.is_empty() { &self.app_name } else { task };
                self.title = format!("{remaining} • {label}");
                ViewAction::Render
            }
            DisplayMessage::Done => {
                self.task = "Done".into();
                ViewAction::CloseAfter(CLOSE_DELAY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_then_done() {
        let mut view = MiniTimerView::new("One Ting");
        let action = view.apply(&DisplayMessage::TimerUpdate {
            remaining: "12:34".into(),
            task: "Read".into(),
            dark: true,
        });
        assert_eq!(action, ViewAction::Render);
        assert_eq!(view.time, "12:34");
        assert_eq!(view.title, "12:34 • Read");
        assert!(view.dark);

        assert_eq!(view.apply(&DisplayMessage::Done), ViewAction::CloseAfter(CLOSE_DELAY));
        assert_eq!(view.task, "Done");
        assert_eq!(view.time, "12:34");
    }

    #[test]
    fn blank_task_titles_with_app_name() {
        let mut view = MiniTimerView::new("One Ting");
        view.apply(&DisplayMessage::TimerUpdate {
            remaining: "00:10".into(),
            task: String::new(),
            dark: false,
        });
        assert_eq!(view.title, "00:10 • One Ting");
    }
}
