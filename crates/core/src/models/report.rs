use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::analytics::CategoryRow;
use super::savings_goal::{GoalProgress, SavingsGoal, SavingsSummary};
use super::settings::Profile;
use super::transaction::Transaction;

/// Point-in-time snapshot handed to external exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub title: String,

    /// Date the snapshot was assembled for
    pub generated_on: NaiveDate,

    /// Currency symbol used for all monetary values
    pub currency: String,

    pub profile: Profile,

    pub monthly_summary: MonthlySummary,

    pub yearly_summary: YearlySummary,

    /// Category analysis rows, in first-occurrence order
    pub categories: Vec<CategoryRow>,

    /// Goals in creation order, each with its display progress
    pub savings_goals: Vec<GoalReport>,

    pub savings_summary: SavingsSummary,

    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

/// Current-month totals plus the monthly budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub budget: Decimal,
    /// budget - expense; negative when over budget
    pub remaining_budget: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

/// Calendar-year totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: i32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// total_income × projection rate. Not the amount actually held in goals.
    pub projected_savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalReport {
    pub goal: SavingsGoal,
    pub progress: GoalProgress,
}
