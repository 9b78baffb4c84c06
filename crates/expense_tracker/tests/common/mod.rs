#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use expense_core::FixedClock;
use expense_tracker::cli::core::{CliMode, ShellContext};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application home.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Opens a script-mode shell under `home` whose clock is pinned to `today`.
pub fn open_context(home: PathBuf, today: NaiveDate) -> ShellContext {
    ShellContext::open(CliMode::Script, home, Box::new(FixedClock(today)))
        .expect("open shell context")
}

pub fn run(context: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        if let Err(err) = context.process_line(line) {
            context.report_error(err).expect("report error");
        }
    }
}
