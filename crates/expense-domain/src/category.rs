//! Domain types representing expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest label accepted from user input.
pub const MAX_CATEGORY_LEN: usize = 40;

/// Labels offered to users when picking a category. Never enforced.
pub const DEFAULT_CATEGORY_SUGGESTIONS: [&str; 7] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

/// Free-form category label.
///
/// The set of categories is open: any non-empty label up to [`MAX_CATEGORY_LEN`]
/// characters is accepted through [`Category::parse`]. Deserialization is lenient so
/// that whatever was persisted earlier is loaded back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Validates user input and produces a category label.
    pub fn parse(raw: &str) -> Result<Self, CategoryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::Empty);
        }
        let len = trimmed.chars().count();
        if len > MAX_CATEGORY_LEN {
            return Err(CategoryError::TooLong(len));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the label still satisfies input validation.
    pub fn is_valid(&self) -> bool {
        Self::parse(&self.0).map(|parsed| parsed == *self).unwrap_or(false)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reasons a category label is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    Empty,
    TooLong(usize),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryError::Empty => f.write_str("category must not be empty"),
            CategoryError::TooLong(len) => write!(
                f,
                "category is {len} characters long (max {MAX_CATEGORY_LEN})"
            ),
        }
    }
}

impl std::error::Error for CategoryError {}
