//! expense-domain
//!
//! Pure domain models (ExpenseRecord, Category, FilterCriteria, currency table, budget tiers).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod currency;
pub mod expense;
pub mod filter;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use currency::*;
pub use expense::*;
pub use filter::*;
