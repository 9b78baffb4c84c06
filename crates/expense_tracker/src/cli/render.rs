//! Text rendering for ledger views.

use colored::Colorize;

use expense_core::{format_amount, LedgerView};
use expense_domain::{BudgetProgress, CurrencyRate, FilterCriteria, ISO_DATE_FORMAT};

use crate::cli::output;

const BAR_WIDTH: usize = 20;
const DESCRIPTION_WIDTH: usize = 32;

/// Fixed-width progress bar, e.g. `[#####---------------]`.
pub fn progress_bar(percent: f64) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn format_progress(progress: &BudgetProgress) -> String {
    format!(
        "{} {:.1}% ({})",
        progress_bar(progress.percent),
        progress.percent,
        progress.tier
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Prints the filtered rows, numbered by ledger position.
pub fn print_table(view: &LedgerView, rate: &CurrencyRate) {
    if view.records.is_empty() {
        output::info("No expenses to show.");
        return;
    }
    let header = format!(
        "{:>4}  {:<10}  {:<16}  {:>14}  {:<3}  {}",
        "#", "Date", "Category", "Amount", "Rec", "Description"
    );
    output::info(header.bold());
    for (position, record) in view.rows() {
        output::info(format!(
            "{:>4}  {:<10}  {:<16}  {:>14}  {:<3}  {}",
            position + 1,
            record.date.format(ISO_DATE_FORMAT),
            truncate(record.category.as_str(), 16),
            format_amount(record.amount, rate),
            if record.recurring { "yes" } else { "" },
            truncate(&record.description, DESCRIPTION_WIDTH),
        ));
    }
}

/// One-line totals plus the over-budget alert when the limit is passed.
pub fn print_status(view: &LedgerView, rate: &CurrencyRate, budget_limit: f64) {
    let budget = output::tier_styled(view.progress.tier, &format_progress(&view.progress));
    output::info(format!(
        "Total: {} | Transactions: {} | Budget {} {}",
        format_amount(view.total, rate),
        view.count,
        format_amount(budget_limit, rate),
        budget
    ));
    if view.progress.exceeded {
        output::warning(format!(
            "Budget exceeded: {} spent against a limit of {}",
            format_amount(view.total, rate),
            format_amount(budget_limit, rate)
        ));
    }
}

pub fn print_breakdowns(view: &LedgerView, rate: &CurrencyRate) {
    output::section("By category");
    if view.by_category.is_empty() {
        output::info("  (none)");
    }
    for (category, amount) in &view.by_category {
        output::info(format!(
            "  {:<16} {:>14}",
            category.as_str(),
            format_amount(*amount, rate)
        ));
    }

    output::section("By date");
    if view.by_date.is_empty() {
        output::info("  (none)");
    }
    for (date, amount) in &view.by_date {
        output::info(format!(
            "  {:<16} {:>14}",
            date.format(ISO_DATE_FORMAT).to_string(),
            format_amount(*amount, rate)
        ));
    }
}

/// Human-readable list of the active filter fields.
pub fn describe_filters(criteria: &FilterCriteria) -> String {
    if criteria.is_unrestricted() {
        return "none".into();
    }
    let mut parts = Vec::new();
    if let Some(category) = criteria.category.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("category={category}"));
    }
    if let Some(from) = criteria.date_from {
        parts.push(format!("from={}", from.format(ISO_DATE_FORMAT)));
    }
    if let Some(to) = criteria.date_to {
        parts.push(format!("to={}", to.format(ISO_DATE_FORMAT)));
    }
    if let Some(search) = criteria.search.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("search={search}"));
    }
    parts.join(" ")
}
