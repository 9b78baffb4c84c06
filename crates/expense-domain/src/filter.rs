//! Filter criteria applied to the ledger before aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;

/// Active view predicates. Every `None` (or empty string) means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Returns `true` when no predicate restricts the view.
    pub fn is_unrestricted(&self) -> bool {
        self.active_category().is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.active_search().is_none()
    }

    fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|value| !value.is_empty())
    }

    fn active_search(&self) -> Option<&str> {
        self.search.as_deref().filter(|value| !value.is_empty())
    }

    /// Evaluates all active predicates (logical AND) against `record`.
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some(category) = self.active_category() {
            if record.category.as_str() != category {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        if let Some(term) = self.active_search() {
            let haystack = record.description.to_lowercase();
            if !haystack.contains(&term.to_lowercase()) {
                return false;
            }
        }
        true
    }
}
