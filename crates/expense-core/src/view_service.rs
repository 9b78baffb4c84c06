//! Derives filtered views and aggregates from ledger snapshots.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use expense_domain::{
    Amounted, BudgetProgress, BudgetTier, Category, ExpenseRecord, FilterCriteria,
};

/// Everything the presenter needs for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    /// Ledger positions of the matching records, parallel to `records`.
    pub positions: Vec<usize>,
    pub records: Vec<ExpenseRecord>,
    pub total: f64,
    pub count: usize,
    pub progress: BudgetProgress,
    pub by_category: BTreeMap<Category, f64>,
    pub by_date: BTreeMap<NaiveDate, f64>,
}

impl LedgerView {
    /// Iterates `(ledger position, record)` pairs in display order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &ExpenseRecord)> + '_ {
        self.positions.iter().copied().zip(self.records.iter())
    }
}

/// Stateless view utilities that operate over ledger snapshots.
pub struct ViewService;

impl ViewService {
    /// Ordered subsequence of `records` matching every active predicate.
    pub fn filter(records: &[ExpenseRecord], criteria: &FilterCriteria) -> Vec<ExpenseRecord> {
        records
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect()
    }

    /// Ledger positions of the records [`ViewService::filter`] would return.
    pub fn matching_positions(records: &[ExpenseRecord], criteria: &FilterCriteria) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| criteria.matches(record))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn aggregate_total<T: Amounted>(items: &[T]) -> f64 {
        items.iter().map(Amounted::amount).sum()
    }

    pub fn transaction_count<T>(items: &[T]) -> usize {
        items.len()
    }

    pub fn aggregate_by_category(records: &[ExpenseRecord]) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();
        for record in records {
            *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
        }
        totals
    }

    pub fn aggregate_by_date(records: &[ExpenseRecord]) -> BTreeMap<NaiveDate, f64> {
        let mut totals = BTreeMap::new();
        for record in records {
            *totals.entry(record.date).or_insert(0.0) += record.amount;
        }
        totals
    }

    /// Consumption of `budget_limit`, capped at 100 percent.
    pub fn budget_progress(total: f64, budget_limit: f64) -> BudgetProgress {
        let percent = if budget_limit > 0.0 {
            (total / budget_limit * 100.0).min(100.0)
        } else if total > 0.0 {
            100.0
        } else {
            0.0
        };
        BudgetProgress {
            percent,
            tier: BudgetTier::for_percent(percent),
            exceeded: total > budget_limit,
        }
    }

    /// Filters the ledger and computes every aggregate the presenter renders.
    pub fn derive_view(
        records: &[ExpenseRecord],
        criteria: &FilterCriteria,
        budget_limit: f64,
    ) -> LedgerView {
        let positions = Self::matching_positions(records, criteria);
        let filtered: Vec<ExpenseRecord> = positions
            .iter()
            .map(|&index| records[index].clone())
            .collect();
        let total = Self::aggregate_total(&filtered);
        LedgerView {
            count: Self::transaction_count(&filtered),
            progress: Self::budget_progress(total, budget_limit),
            by_category: Self::aggregate_by_category(&filtered),
            by_date: Self::aggregate_by_date(&filtered),
            total,
            positions,
            records: filtered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, category: &str, day: NaiveDate, description: &str) -> ExpenseRecord {
        ExpenseRecord::new(amount, Category::parse(category).unwrap(), day)
            .with_description(description)
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            expense(100.0, "Food", date(2024, 1, 1), "Lunch"),
            expense(40.0, "Transport", date(2024, 1, 1), "Metro card"),
            expense(60.0, "Food", date(2024, 1, 3), "Dinner with team"),
            expense(25.0, "Bills", date(2024, 2, 1), ""),
        ]
    }

    #[test]
    fn filter_preserves_order_and_combines_predicates() {
        let criteria = FilterCriteria::any()
            .with_category("Food")
            .with_date_to(date(2024, 1, 31));
        let filtered = ViewService::filter(&sample(), &criteria);
        let amounts: Vec<f64> = filtered.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![100.0, 60.0]);
        assert_eq!(
            ViewService::matching_positions(&sample(), &criteria),
            vec![0, 2]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let criteria = FilterCriteria::any().with_search("n");
        let once = ViewService::filter(&sample(), &criteria);
        let twice = ViewService::filter(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn aggregates_only_include_present_keys() {
        let records = sample();
        assert_eq!(ViewService::aggregate_total(&records), 225.0);
        let by_category = ViewService::aggregate_by_category(&records);
        assert_eq!(by_category.len(), 3);
        assert_eq!(by_category[&Category::parse("Food").unwrap()], 160.0);
        let by_date = ViewService::aggregate_by_date(&records);
        assert_eq!(by_date[&date(2024, 1, 1)], 140.0);
        assert_eq!(by_date.len(), 3);
    }

    #[test]
    fn empty_input_totals_zero() {
        let empty: Vec<ExpenseRecord> = Vec::new();
        assert_eq!(ViewService::aggregate_total(&empty), 0.0);
        assert!(ViewService::aggregate_by_category(&empty).is_empty());
        assert_eq!(ViewService::transaction_count(&empty), 0);
    }

    #[test]
    fn budget_progress_caps_and_flags_overspend() {
        let over = ViewService::budget_progress(25_000.0, 20_000.0);
        assert_eq!(over.percent, 100.0);
        assert_eq!(over.tier, BudgetTier::Critical);
        assert!(over.exceeded);

        let mid = ViewService::budget_progress(15_000.0, 20_000.0);
        assert_eq!(mid.percent, 75.0);
        assert_eq!(mid.tier, BudgetTier::Warning);
        assert!(!mid.exceeded);

        let at_limit = ViewService::budget_progress(20_000.0, 20_000.0);
        assert_eq!(at_limit.percent, 100.0);
        assert!(!at_limit.exceeded);
    }

    #[test]
    fn budget_progress_with_zero_limit() {
        let spent = ViewService::budget_progress(1.0, 0.0);
        assert_eq!(spent.percent, 100.0);
        assert!(spent.exceeded);
        let idle = ViewService::budget_progress(0.0, 0.0);
        assert_eq!(idle.percent, 0.0);
        assert_eq!(idle.tier, BudgetTier::Normal);
    }

    #[test]
    fn derive_view_bundles_filtered_aggregates() {
        let criteria = FilterCriteria::any().with_date_from(date(2024, 1, 2));
        let view = ViewService::derive_view(&sample(), &criteria, 1_000.0);
        assert_eq!(view.count, 2);
        assert_eq!(view.total, 85.0);
        assert_eq!(view.positions, vec![2, 3]);
        assert_eq!(view.by_date.len(), 2);
        assert_eq!(view.progress.tier, BudgetTier::Normal);
        let rows: Vec<usize> = view.rows().map(|(index, _)| index).collect();
        assert_eq!(rows, vec![2, 3]);
    }
}
