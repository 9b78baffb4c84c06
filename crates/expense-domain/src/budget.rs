//! Budget progress signals handed to the presenter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending limit used when none is configured, in base currency.
pub const DEFAULT_BUDGET_LIMIT: f64 = 20_000.0;

/// Percent at which the progress tier turns to [`BudgetTier::Warning`].
pub const WARNING_THRESHOLD: f64 = 70.0;

/// Percent at which the progress tier turns to [`BudgetTier::Critical`].
pub const CRITICAL_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Coarse severity of budget consumption.
pub enum BudgetTier {
    Normal,
    Warning,
    Critical,
}

impl BudgetTier {
    pub fn for_percent(percent: f64) -> Self {
        if percent < WARNING_THRESHOLD {
            BudgetTier::Normal
        } else if percent < CRITICAL_THRESHOLD {
            BudgetTier::Warning
        } else {
            BudgetTier::Critical
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetTier::Normal => "normal",
            BudgetTier::Warning => "warning",
            BudgetTier::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Budget consumption for a total against a limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    /// Share of the limit consumed, capped at 100.
    pub percent: f64,
    pub tier: BudgetTier,
    /// `true` when the total is strictly above the limit.
    pub exceeded: bool,
}
