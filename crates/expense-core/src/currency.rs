//! Display-currency conversion. Stored amounts are never modified.

use expense_domain::{CurrencyRate, CurrencyTable};

use crate::CoreError;

/// Converts a base-currency amount with `rate`, rounded to 2 decimal places.
pub fn convert(amount: f64, rate: f64) -> f64 {
    (amount * rate * 100.0).round() / 100.0
}

/// Renders `amount` in the rate's currency, e.g. `USD 1.20`.
pub fn format_amount(amount: f64, rate: &CurrencyRate) -> String {
    format!("{} {:.2}", rate.code, convert(amount, rate.rate))
}

/// Looks up `code` in `table`, rejecting currencies without a rate.
pub fn rate_for(table: &CurrencyTable, code: &str) -> Result<CurrencyRate, CoreError> {
    table.get(code).cloned().ok_or_else(|| {
        let known: Vec<&str> = table.codes().map(|code| code.as_str()).collect();
        CoreError::Validation(format!(
            "unknown currency `{}` (expected one of {})",
            code.trim(),
            known.join(", ")
        ))
    })
}
