//! expense-core
//!
//! Business logic for the expense tracker: the ledger store, view derivation,
//! currency conversion and CSV export.
//! Depends on expense-domain. No CLI, no terminal I/O, no concrete storage format.

pub mod currency;
pub mod error;
pub mod export;
pub mod ledger_store;
pub mod storage;
pub mod time;
pub mod view_service;

pub use currency::*;
pub use error::CoreError;
pub use export::*;
pub use ledger_store::*;
pub use storage::{LedgerStorage, MemoryLedgerStorage};
pub use time::{Clock, FixedClock};
pub use view_service::*;
