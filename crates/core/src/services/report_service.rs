use chrono::{Datelike, NaiveDate};
use log::warn;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::report::{GoalReport, MonthlySummary, ReportSnapshot, YearlySummary};
use crate::models::transaction::TransactionType;
use crate::services::aggregation_service::{AggregationService, DEFAULT_PROJECTION_RATE};
use crate::services::savings_service::SavingsService;

/// Number of transactions included in a report by default.
pub const DEFAULT_RECENT_TRANSACTIONS: usize = 10;

/// Knobs for report assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Date the report is generated for; selects the current month and year
    pub as_of: NaiveDate,
    pub projection_rate: Decimal,
    pub recent_transactions: usize,
}

impl ReportOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            projection_rate: DEFAULT_PROJECTION_RATE,
            recent_transactions: DEFAULT_RECENT_TRANSACTIONS,
        }
    }
}

/// Composes aggregation and savings results into one snapshot.
pub struct ReportService {
    aggregation_service: AggregationService,
    savings_service: SavingsService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
            savings_service: SavingsService::new(),
        }
    }

    pub fn assemble(&self, ledger: &Ledger, options: &ReportOptions) -> ReportSnapshot {
        let transactions = &ledger.transactions;
        let goals = &ledger.settings.savings_goals;
        let year = options.as_of.year();

        let month = self
            .aggregation_service
            .totals_for_current_period(transactions, options.as_of);
        let monthly_summary = MonthlySummary {
            income: month.income,
            expense: month.expense,
            balance: month.balance,
            budget: ledger.monthly_budget,
            remaining_budget: ledger.monthly_budget.saturating_sub(month.expense),
            income_count: self
                .aggregation_service
                .count_by_type(transactions, TransactionType::Income),
            expense_count: self
                .aggregation_service
                .count_by_type(transactions, TransactionType::Expense),
        };

        let total_income = self
            .aggregation_service
            .totals_for_year(transactions, year, TransactionType::Income);
        let yearly_summary = YearlySummary {
            year,
            total_income,
            total_expense: self
                .aggregation_service
                .totals_for_year(transactions, year, TransactionType::Expense),
            projected_savings: total_income
                .checked_mul(options.projection_rate)
                .unwrap_or_else(|| {
                    warn!("Projected savings for {year} overflowed; reporting zero");
                    Decimal::ZERO
                }),
        };

        let savings_goals = goals
            .iter()
            .map(|goal| GoalReport {
                goal: goal.clone(),
                progress: self.savings_service.goal_progress(goal),
            })
            .collect();

        ReportSnapshot {
            title: "Financial Report".to_string(),
            generated_on: options.as_of,
            currency: ledger.settings.currency.clone(),
            profile: ledger.settings.profile.clone(),
            monthly_summary,
            yearly_summary,
            categories: self.aggregation_service.category_table(transactions),
            savings_goals,
            savings_summary: self.savings_service.summary(goals),
            recent_transactions: self
                .aggregation_service
                .recent_transactions(transactions, options.recent_transactions)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSnapshot {
    /// Pretty JSON for exporters.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize report: {e}")))
    }
}
