use chrono::{Datelike, NaiveDate};
use log::warn;
use rust_decimal::Decimal;

use crate::models::analytics::{
    CategoryBreakdown, CategoryDetail, CategoryRow, CategoryTotal, MonthlyTotals, PeriodTotals,
};
use crate::models::transaction::{PeriodFilter, PeriodKey, Transaction, TransactionType};

/// Share of income assumed to be saved by the savings projection.
pub const DEFAULT_PROJECTION_RATE: Decimal = rust_decimal_macros::dec!(0.2);

/// Derives totals, category breakdowns and monthly series from a
/// transaction list.
///
/// Pure business logic that never mutates its input. Records with a
/// negative amount, or whose amount would overflow a running total, are
/// skipped with a warning so a partially dirty list still aggregates.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Income, expense and balance for the calendar month containing `now`.
    pub fn totals_for_current_period(&self, transactions: &[Transaction], now: NaiveDate) -> PeriodTotals {
        let period = PeriodKey::of(now);
        let mut month = MonthlyTotals::default();
        for t in usable(transactions).filter(|t| period.contains(t.date)) {
            if !month.add(t.transaction_type, t.amount) {
                skip_overflow(t);
            }
        }
        PeriodTotals::new(month.income, month.expense)
    }

    /// Sum of `transaction_type` amounts dated in `year`.
    pub fn totals_for_year(
        &self,
        transactions: &[Transaction],
        year: i32,
        transaction_type: TransactionType,
    ) -> Decimal {
        usable(transactions)
            .filter(|t| t.transaction_type == transaction_type && t.date.year() == year)
            .fold(Decimal::ZERO, |total, t| checked_total(total, t, t.amount))
    }

    /// Per-category sums for one type, restricted by `filter`.
    /// Categories appear in order of first occurrence.
    pub fn category_breakdown(
        &self,
        transactions: &[Transaction],
        transaction_type: TransactionType,
        filter: &PeriodFilter,
    ) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::default();
        for t in usable(transactions)
            .filter(|t| t.transaction_type == transaction_type && filter.matches(t.date))
        {
            if !breakdown.add(&t.category, t.amount) {
                skip_overflow(t);
            }
        }
        breakdown
    }

    /// The `n` largest all-time categories for one type, largest first.
    /// Equal totals keep first-occurrence order.
    pub fn top_categories(
        &self,
        transactions: &[Transaction],
        transaction_type: TransactionType,
        n: usize,
    ) -> Vec<CategoryTotal> {
        let mut entries = self
            .category_breakdown(transactions, transaction_type, &PeriodFilter::AllTime)
            .into_entries();
        // sort_by is stable
        entries.sort_by(|a, b| b.total.cmp(&a.total));
        entries.truncate(n);
        entries
    }

    /// Income and expense for each month of `year`, January at index 0.
    pub fn monthly_series(&self, transactions: &[Transaction], year: i32) -> [MonthlyTotals; 12] {
        let mut series = [MonthlyTotals::default(); 12];
        for t in usable(transactions).filter(|t| t.date.year() == year) {
            if !series[t.date.month0() as usize].add(t.transaction_type, t.amount) {
                skip_overflow(t);
            }
        }
        series
    }

    /// income - expense for each month of `year`.
    pub fn monthly_net(&self, transactions: &[Transaction], year: i32) -> [Decimal; 12] {
        self.monthly_series(transactions, year).map(|m| m.net())
    }

    /// Running total of `year`'s income through each month, times `rate`.
    ///
    /// This is a projection of what *could* have been saved; the money
    /// actually held in savings goals is reported separately. A month whose
    /// running total or projection overflows repeats the previous value.
    pub fn cumulative_projected_savings(
        &self,
        transactions: &[Transaction],
        year: i32,
        rate: Decimal,
    ) -> [Decimal; 12] {
        let series = self.monthly_series(transactions, year);
        let mut running = Decimal::ZERO;
        let mut projected = [Decimal::ZERO; 12];
        let mut previous = Decimal::ZERO;
        for (idx, (slot, month)) in projected.iter_mut().zip(series.iter()).enumerate() {
            match running
                .checked_add(month.income)
                .and_then(|sum| sum.checked_mul(rate).map(|p| (sum, p)))
            {
                Some((sum, projection)) => {
                    running = sum;
                    previous = projection;
                }
                None => warn!("Projected savings for {year} overflowed in month {}", idx + 1),
            }
            *slot = previous;
        }
        projected
    }

    /// One row per distinct category, in order of first occurrence.
    pub fn category_table(&self, transactions: &[Transaction]) -> Vec<CategoryRow> {
        let mut rows: Vec<CategoryRow> = Vec::new();
        for t in usable(transactions) {
            match rows.iter_mut().find(|r| r.category == t.category) {
                Some(row) => match row.net_amount.checked_add(t.signed_amount()) {
                    Some(net) => {
                        row.net_amount = net;
                        row.transaction_count += 1;
                    }
                    None => skip_overflow(t),
                },
                None => rows.push(CategoryRow {
                    category: t.category.clone(),
                    net_amount: t.signed_amount(),
                    transaction_count: 1,
                    average_per_transaction: Decimal::ZERO,
                }),
            }
        }
        for row in &mut rows {
            row.average_per_transaction = row
                .net_amount
                .checked_div(Decimal::from(row.transaction_count))
                .unwrap_or(Decimal::ZERO);
        }
        rows
    }

    /// Net total and every transaction recorded under `category`.
    pub fn category_detail(&self, transactions: &[Transaction], category: &str) -> CategoryDetail {
        let mut net_amount = Decimal::ZERO;
        let mut matching: Vec<Transaction> = Vec::new();
        for t in usable(transactions).filter(|t| t.category == category) {
            match net_amount.checked_add(t.signed_amount()) {
                Some(net) => {
                    net_amount = net;
                    matching.push(t.clone());
                }
                None => skip_overflow(t),
            }
        }
        CategoryDetail {
            category: category.to_string(),
            net_amount,
            transaction_count: matching.len(),
            transactions: matching,
        }
    }

    /// The `n` most recent transactions, newest first.
    pub fn recent_transactions<'a>(&self, transactions: &'a [Transaction], n: usize) -> Vec<&'a Transaction> {
        let mut recent: Vec<&Transaction> = usable(transactions).collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(n);
        recent
    }

    /// Transactions of one type, newest first.
    pub fn transactions_by_type<'a>(
        &self,
        transactions: &'a [Transaction],
        transaction_type: TransactionType,
    ) -> Vec<&'a Transaction> {
        let mut filtered: Vec<&Transaction> = usable(transactions)
            .filter(|t| t.transaction_type == transaction_type)
            .collect();
        filtered.sort_by(|a, b| b.date.cmp(&a.date));
        filtered
    }

    pub fn count_by_type(&self, transactions: &[Transaction], transaction_type: TransactionType) -> usize {
        usable(transactions)
            .filter(|t| t.transaction_type == transaction_type)
            .count()
    }

    /// `starting_balance` plus every income minus every expense dated on or before `as_of`.
    pub fn cumulative_balance(
        &self,
        transactions: &[Transaction],
        starting_balance: Decimal,
        as_of: NaiveDate,
    ) -> Decimal {
        usable(transactions)
            .filter(|t| t.date <= as_of)
            .fold(starting_balance, |total, t| checked_total(total, t, t.signed_amount()))
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

/// `total + amount`, or `total` unchanged (with a warning) when the sum
/// would overflow.
fn checked_total(total: Decimal, t: &Transaction, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        skip_overflow(t);
        total
    })
}

fn skip_overflow(t: &Transaction) {
    warn!(
        "Skipping transaction {} with amount {}: running total would overflow",
        t.id, t.amount
    );
}

/// Transactions fit for aggregation.
fn usable(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|t| {
        if t.amount < Decimal::ZERO {
            warn!(
                "Skipping transaction {} with negative amount {}",
                t.id, t.amount
            );
            false
        } else {
            true
        }
    })
}
