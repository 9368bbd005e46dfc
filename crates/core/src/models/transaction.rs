use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryLabel;

/// Largest amount accepted for a transaction or savings goal.
pub const MAX_AMOUNT: Decimal = rust_decimal_macros::dec!(1000000000000);

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

/// A single income or expense record.
///
/// Field names and the lowercase `type` tag match the records kept in the
/// record store, so stored lists deserialize directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: String,

    /// Income or Expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub description: String,

    /// Always non-negative; direction comes from `transaction_type`
    pub amount: Decimal,

    /// Category key; need not be in the catalog
    pub category: String,

    /// Date of the transaction (daily granularity)
    pub date: NaiveDate,
}

impl Transaction {
    /// Build a transaction with a fresh id.
    pub fn new(
        transaction_type: TransactionType,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            transaction_type,
            description,
            amount,
            category,
            date,
        )
    }

    /// Build a transaction with a caller-supplied id.
    pub fn with_id(
        id: impl Into<String>,
        transaction_type: TransactionType,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            transaction_type,
            description: description.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    pub fn income(
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Income, description, amount, category, date)
    }

    pub fn expense(
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Expense, description, amount, category, date)
    }

    /// Amount with sign applied: positive for income, negative for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn period(&self) -> PeriodKey {
        PeriodKey::of(self.date)
    }

    pub fn category_label(&self) -> CategoryLabel {
        CategoryLabel::lookup(&self.category)
    }
}

/// Input for creating or fully replacing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub(crate) fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            transaction_type: self.transaction_type,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// Calendar month bucket used for monthly aggregation. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: i32,
    /// 1 = January … 12 = December
    pub month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Date predicate used to restrict aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodFilter {
    AllTime,
    Month(PeriodKey),
    Year(i32),
    /// Inclusive on both ends
    Range { from: NaiveDate, to: NaiveDate },
}

impl PeriodFilter {
    /// The calendar month containing `now`.
    pub fn current_month(now: NaiveDate) -> Self {
        PeriodFilter::Month(PeriodKey::of(now))
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            PeriodFilter::AllTime => true,
            PeriodFilter::Month(period) => period.contains(date),
            PeriodFilter::Year(year) => date.year() == *year,
            PeriodFilter::Range { from, to } => date >= *from && date <= *to,
        }
    }
}
