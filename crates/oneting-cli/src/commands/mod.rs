pub mod config;
pub mod history;
pub mod mini;
pub mod start;
pub mod stats;

/// Single-threaded runtime; the session loop never needs more.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
