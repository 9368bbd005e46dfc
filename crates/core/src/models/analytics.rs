use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionType};

/// Income, expense and their difference over one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense
    pub balance: Decimal,
}

impl PeriodTotals {
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Income and expense for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl MonthlyTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// Add `amount` to the matching side. Returns `false`, leaving the
    /// totals unchanged, when the sum would overflow.
    pub(crate) fn add(&mut self, transaction_type: TransactionType, amount: Decimal) -> bool {
        let side = match transaction_type {
            TransactionType::Income => &mut self.income,
            TransactionType::Expense => &mut self.expense,
        };
        match side.checked_add(amount) {
            Some(sum) => {
                *side = sum;
                true
            }
            None => false,
        }
    }
}

/// Sum for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Per-category sums in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    /// Returns `false`, leaving the breakdown unchanged, when the
    /// category total would overflow.
    pub(crate) fn add(&mut self, category: &str, amount: Decimal) -> bool {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => match entry.total.checked_add(amount) {
                Some(sum) => {
                    entry.total = sum;
                    true
                }
                None => false,
            },
            None => {
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    total: amount,
                });
                true
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CategoryTotal> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over every category, or `None` if it overflows.
    pub fn total(&self) -> Option<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.total))
    }
}

/// Whether a category has brought in more than it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryLeaning {
    /// net_amount >= 0
    IncomeLeaning,
    ExpenseLeaning,
}

impl std::fmt::Display for CategoryLeaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryLeaning::IncomeLeaning => write!(f, "Income"),
            CategoryLeaning::ExpenseLeaning => write!(f, "Expense"),
        }
    }
}

/// One row of the category analysis table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    /// sum(income) - sum(expense) within the category
    pub net_amount: Decimal,
    /// Always >= 1
    pub transaction_count: usize,
    pub average_per_transaction: Decimal,
}

impl CategoryRow {
    pub fn leaning(&self) -> CategoryLeaning {
        if self.net_amount >= Decimal::ZERO {
            CategoryLeaning::IncomeLeaning
        } else {
            CategoryLeaning::ExpenseLeaning
        }
    }
}

/// Everything recorded under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: String,
    pub net_amount: Decimal,
    pub transaction_count: usize,
    /// In list order
    pub transactions: Vec<Transaction>,
}
