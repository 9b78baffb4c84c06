#![doc(test(attr(deny(warnings))))]

//! Expense Tracker wires the ledger, view and persistence crates into a
//! command shell for recording daily spending against a monthly budget.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Tracker tracing initialized.");
    });
}
