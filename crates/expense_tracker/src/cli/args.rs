//! Argument parsing shared by the shell commands.

use chrono::NaiveDate;

use expense_core::CoreError;
use expense_domain::{parse_iso_date, Category, ExpensePatch, FilterCriteria};

use crate::cli::core::CommandError;

pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))
}

/// Accepts `YYYY-MM-DD` or the keyword `today`.
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    parse_iso_date(trimmed).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date (expected YYYY-MM-DD)"))
    })
}

/// Category labels failing validation are reported like any other rejected input.
pub fn parse_category(raw: &str) -> Result<Category, CommandError> {
    Category::parse(raw).map_err(|err| CoreError::Validation(err.to_string()).into())
}

pub fn parse_bool(raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a boolean (use true or false)"
        ))),
    }
}

/// Converts a 1-based position shown to the user into a ledger index.
pub fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid position (positions start at 1)"
        ))),
    }
}

/// Splits `key=value`, lowercasing the key.
pub fn split_assignment(raw: &str) -> Result<(String, &str), CommandError> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value))
        .ok_or_else(|| CommandError::InvalidArguments(format!("expected key=value, got `{raw}`")))
}

/// Builds an edit patch from `field=value` arguments.
pub fn parse_patch(args: &[&str], today: NaiveDate) -> Result<ExpensePatch, CommandError> {
    let mut patch = ExpensePatch::default();
    for arg in args {
        let (key, value) = split_assignment(arg)?;
        match key.as_str() {
            "amount" => patch.amount = Some(parse_amount(value)?),
            "category" => patch.category = Some(parse_category(value)?),
            "date" => patch.date = Some(parse_date(value, today)?),
            "description" => patch.description = Some(value.to_string()),
            "recurring" => patch.recurring = Some(parse_bool(value)?),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{other}` (expected amount, category, date, description or recurring)"
                )))
            }
        }
    }
    Ok(patch)
}

/// Applies `field=value` arguments on top of `criteria`. An empty value clears that field.
pub fn apply_filter_args(
    mut criteria: FilterCriteria,
    args: &[&str],
) -> Result<FilterCriteria, CommandError> {
    for arg in args {
        let (key, value) = split_assignment(arg)?;
        let value = value.trim();
        match key.as_str() {
            "category" => criteria.category = non_empty(value),
            "search" => criteria.search = non_empty(value),
            "from" => criteria.date_from = optional_date(value)?,
            "to" => criteria.date_to = optional_date(value)?,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown filter `{other}` (expected category, from, to or search)"
                )))
            }
        }
    }
    Ok(criteria)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_date(value: &str) -> Result<Option<NaiveDate>, CommandError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_iso_date(value).map(Some).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{value}` is not a date (expected YYYY-MM-DD)"))
    })
}
