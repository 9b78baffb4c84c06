//! Domain models for recorded expenses.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::Category, common::*};

/// A single dated, categorized expense stored in the base currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recurring: bool,
}

impl ExpenseRecord {
    pub fn new(amount: f64, category: Category, date: NaiveDate) -> Self {
        Self {
            amount,
            category,
            date,
            description: String::new(),
            recurring: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Returns `true` when the record carries a non-empty description.
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Copy of this record re-dated to `date`, used for monthly rollover.
    pub fn rolled_over_to(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }

    /// Produces the record that results from applying `patch` on top of this one.
    pub fn merged_with(&self, patch: &ExpensePatch) -> Self {
        Self {
            amount: patch.amount.unwrap_or(self.amount),
            category: patch
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            date: patch.date.unwrap_or(self.date),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            recurring: patch.recurring.unwrap_or(self.recurring),
        }
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        let description = if self.has_description() {
            self.description.as_str()
        } else {
            "-"
        };
        format!(
            "{} {} {} ({})",
            self.date.format(ISO_DATE_FORMAT),
            self.category,
            self.amount,
            description
        )
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

/// Replacement fields for an edit. `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub recurring: Option<bool>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.recurring.is_none()
    }
}
