//! Persistence for One Ting.
//!
//! The history log lives behind the [`KvStore`] trait: a single string key
//! holding a JSON-encoded array. [`Database`] backs it with SQLite on disk,
//! [`MemoryStore`] keeps it in memory. User preferences are a separate TOML
//! file handled by [`Config`].

mod config;
pub mod database;
mod memory;

pub use config::Config;
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::Result;

/// String-keyed persistence capability.
///
/// Implementations are local and synchronous; a returned `Ok` means the
/// value is durable as far as the backend is concerned.
pub trait KvStore {
    /// Raw value for `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// Returns `~/.config/oneting[-dev]/` based on ONETING_ENV.
///
/// Set ONETING_ENV=dev to use the development data directory, or
/// ONETING_HOME to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("ONETING_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ONETING_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("oneting-dev")
            } else {
                base_dir.join("oneting")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
