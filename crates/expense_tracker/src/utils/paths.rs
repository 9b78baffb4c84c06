use std::path::PathBuf;

use expense_config::Config;

/// Environment variable overriding the application home directory.
pub const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";

/// Resolves where the tracker keeps its config and ledger files.
pub struct PathResolver;

impl PathResolver {
    /// `$EXPENSE_TRACKER_HOME` when set and non-empty, otherwise `~/.expense_tracker`.
    pub fn base_dir() -> PathBuf {
        match std::env::var_os(HOME_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => Config::default_app_home(),
        }
    }
}
