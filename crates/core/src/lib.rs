pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use errors::CoreError;
use models::{
    analytics::{CategoryBreakdown, CategoryDetail, CategoryRow, CategoryTotal, MonthlyTotals, PeriodTotals},
    ledger::Ledger,
    report::ReportSnapshot,
    savings_goal::{GoalPatch, GoalProgress, NewGoal, SavingsGoal, SavingsSummary},
    settings::{AllocationPolicy, Profile, Settings},
    transaction::{NewTransaction, PeriodFilter, Transaction, TransactionSortOrder, TransactionType},
};
use services::{
    aggregation_service::AggregationService,
    report_service::{ReportOptions, ReportService},
    savings_service::SavingsService,
    transaction_service::TransactionService,
};
use storage::{manager::StorageManager, record_store::RecordStore};

/// Main entry point for the Finance Tracker core library.
///
/// Holds one user's ledger, the record store it came from, and the
/// services that operate on it. This is the whole session context: nothing
/// is read from global state. Every mutation is written straight back to
/// the store as a full snapshot of the affected key.
#[must_use]
pub struct FinanceTracker<S: RecordStore> {
    user_id: String,
    ledger: Ledger,
    store: S,
    aggregation_service: AggregationService,
    savings_service: SavingsService,
    transaction_service: TransactionService,
    report_service: ReportService,
}

impl<S: RecordStore> std::fmt::Debug for FinanceTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("user_id", &self.user_id)
            .field("transactions", &self.ledger.transactions.len())
            .field("savings_goals", &self.ledger.settings.savings_goals.len())
            .field("monthly_budget", &self.ledger.monthly_budget)
            .finish()
    }
}

impl<S: RecordStore> FinanceTracker<S> {
    /// Open the session for `user_id`, loading whatever the store holds.
    /// Missing keys fall back to defaults.
    pub fn open(store: S, user_id: impl Into<String>) -> Result<Self, CoreError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(CoreError::Validation("User id must not be empty".into()));
        }
        let ledger = StorageManager::load_ledger(&store, &user_id)?;
        Ok(Self {
            user_id,
            ledger,
            store,
            aggregation_service: AggregationService::new(),
            savings_service: SavingsService::new(),
            transaction_service: TransactionService::new(),
            report_service: ReportService::new(),
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the session and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a new transaction. Returns its id.
    pub fn add_transaction(&mut self, new_transaction: NewTransaction) -> Result<String, CoreError> {
        let (updated, transaction) = self
            .transaction_service
            .add(&self.ledger.transactions, new_transaction)?;
        self.commit_transactions(updated)?;
        Ok(transaction.id)
    }

    /// Replace the transaction `id` entirely.
    pub fn edit_transaction(&mut self, id: &str, replacement: NewTransaction) -> Result<(), CoreError> {
        let updated = self
            .transaction_service
            .edit(&self.ledger.transactions, id, replacement)?;
        self.commit_transactions(updated)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<(), CoreError> {
        let updated = self.transaction_service.delete(&self.ledger.transactions, id)?;
        self.commit_transactions(updated)
    }

    /// Import already-validated transactions (all-or-nothing).
    /// Returns the number imported.
    pub fn import_transactions(&mut self, candidates: Vec<Transaction>) -> Result<usize, CoreError> {
        let count = candidates.len();
        let updated = self
            .transaction_service
            .import(&self.ledger.transactions, candidates)?;
        self.commit_transactions(updated)?;
        Ok(count)
    }

    /// Delete every transaction in `category`. Returns the number removed.
    pub fn delete_category(&mut self, category: &str) -> Result<usize, CoreError> {
        let (updated, removed) = self
            .transaction_service
            .delete_category(&self.ledger.transactions, category);
        if removed > 0 {
            self.commit_transactions(updated)?;
        }
        Ok(removed)
    }

    #[must_use]
    pub fn get_transaction(&self, id: &str) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|t| t.id == id)
    }

    /// All transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    #[must_use]
    pub fn transactions_sorted(&self, order: TransactionSortOrder) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.ledger.transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => transactions.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSortOrder::DateAsc => transactions.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSortOrder::AmountDesc => transactions.sort_by(|a, b| b.amount.cmp(&a.amount)),
            TransactionSortOrder::AmountAsc => transactions.sort_by(|a, b| a.amount.cmp(&b.amount)),
        }
        transactions
    }

    /// Transactions of one type, newest first.
    #[must_use]
    pub fn transactions_by_type(&self, transaction_type: TransactionType) -> Vec<&Transaction> {
        self.aggregation_service
            .transactions_by_type(&self.ledger.transactions, transaction_type)
    }

    #[must_use]
    pub fn recent_transactions(&self, n: usize) -> Vec<&Transaction> {
        self.aggregation_service
            .recent_transactions(&self.ledger.transactions, n)
    }

    // ── Analytics ───────────────────────────────────────────────────

    #[must_use]
    pub fn totals_for_current_period(&self, now: NaiveDate) -> PeriodTotals {
        self.aggregation_service
            .totals_for_current_period(&self.ledger.transactions, now)
    }

    #[must_use]
    pub fn totals_for_year(&self, year: i32, transaction_type: TransactionType) -> Decimal {
        self.aggregation_service
            .totals_for_year(&self.ledger.transactions, year, transaction_type)
    }

    #[must_use]
    pub fn category_breakdown(&self, transaction_type: TransactionType, filter: &PeriodFilter) -> CategoryBreakdown {
        self.aggregation_service
            .category_breakdown(&self.ledger.transactions, transaction_type, filter)
    }

    #[must_use]
    pub fn top_categories(&self, transaction_type: TransactionType, n: usize) -> Vec<CategoryTotal> {
        self.aggregation_service
            .top_categories(&self.ledger.transactions, transaction_type, n)
    }

    #[must_use]
    pub fn monthly_series(&self, year: i32) -> [MonthlyTotals; 12] {
        self.aggregation_service
            .monthly_series(&self.ledger.transactions, year)
    }

    #[must_use]
    pub fn monthly_net(&self, year: i32) -> [Decimal; 12] {
        self.aggregation_service
            .monthly_net(&self.ledger.transactions, year)
    }

    #[must_use]
    pub fn cumulative_projected_savings(&self, year: i32, rate: Decimal) -> [Decimal; 12] {
        self.aggregation_service
            .cumulative_projected_savings(&self.ledger.transactions, year, rate)
    }

    #[must_use]
    pub fn category_table(&self) -> Vec<CategoryRow> {
        self.aggregation_service
            .category_table(&self.ledger.transactions)
    }

    #[must_use]
    pub fn category_detail(&self, category: &str) -> CategoryDetail {
        self.aggregation_service
            .category_detail(&self.ledger.transactions, category)
    }

    /// Balance an allocation made on `today` may draw from, according to
    /// the user's allocation policy.
    #[must_use]
    pub fn available_balance(&self, today: NaiveDate) -> Decimal {
        match self.ledger.settings.allocation_policy {
            AllocationPolicy::CurrentMonth => self.totals_for_current_period(today).balance,
            AllocationPolicy::Cumulative => self.aggregation_service.cumulative_balance(
                &self.ledger.transactions,
                self.ledger.settings.starting_balance,
                today,
            ),
        }
    }

    // ── Savings Goals ───────────────────────────────────────────────

    /// Goals in creation order.
    #[must_use]
    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.ledger.settings.savings_goals
    }

    #[must_use]
    pub fn get_goal(&self, goal_id: &str) -> Option<&SavingsGoal> {
        self.ledger.settings.savings_goals.iter().find(|g| g.id == goal_id)
    }

    /// Create a goal. Returns its id.
    pub fn add_goal(&mut self, new_goal: NewGoal) -> Result<String, CoreError> {
        let (updated, goal) = self
            .savings_service
            .add_goal(&self.ledger.settings.savings_goals, new_goal)?;
        self.commit_goals(updated)?;
        Ok(goal.id)
    }

    pub fn edit_goal(&mut self, goal_id: &str, patch: &GoalPatch) -> Result<(), CoreError> {
        let updated = self
            .savings_service
            .edit_goal(&self.ledger.settings.savings_goals, goal_id, patch)?;
        self.commit_goals(updated)
    }

    pub fn delete_goal(&mut self, goal_id: &str) -> Result<(), CoreError> {
        let updated = self
            .savings_service
            .delete_goal(&self.ledger.settings.savings_goals, goal_id)?;
        self.commit_goals(updated)
    }

    /// Allocate `amount` to a goal on `today`, checked against
    /// [`available_balance`](Self::available_balance). Both the goal and
    /// its paired expense transaction are committed, or neither is.
    pub fn allocate_to_goal(&mut self, goal_id: &str, amount: Decimal, today: NaiveDate) -> Result<(), CoreError> {
        let available = self.available_balance(today);
        let (goals, transactions) = self.savings_service.allocate(
            &self.ledger.settings.savings_goals,
            &self.ledger.transactions,
            goal_id,
            amount,
            available,
            today,
        )?;

        let mut settings = self.ledger.settings.clone();
        settings.savings_goals = goals;
        StorageManager::save_transactions(&mut self.store, &self.user_id, &transactions)?;
        if let Err(e) = StorageManager::save_settings(&mut self.store, &self.user_id, &settings) {
            warn!("Saving settings for allocation to goal {goal_id} failed: {e}");
            // Put the stored transaction list back so both keys stay paired.
            if let Err(rollback) =
                StorageManager::save_transactions(&mut self.store, &self.user_id, &self.ledger.transactions)
            {
                warn!(
                    "Restoring transactions for user {} failed, stored allocation has no goal update: {rollback}",
                    self.user_id
                );
            }
            return Err(e);
        }
        self.ledger.transactions = transactions;
        self.ledger.settings = settings;
        Ok(())
    }

    #[must_use]
    pub fn goal_progress(&self, goal_id: &str) -> Option<GoalProgress> {
        self.get_goal(goal_id)
            .map(|goal| self.savings_service.goal_progress(goal))
    }

    #[must_use]
    pub fn savings_summary(&self) -> SavingsSummary {
        self.savings_service.summary(&self.ledger.settings.savings_goals)
    }

    // ── Reports ─────────────────────────────────────────────────────

    #[must_use]
    pub fn report(&self, options: &ReportOptions) -> ReportSnapshot {
        self.report_service.assemble(&self.ledger, options)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.ledger.settings
    }

    #[must_use]
    pub fn monthly_budget(&self) -> Decimal {
        self.ledger.monthly_budget
    }

    /// Set the display currency symbol (e.g., "$", "€", "zł").
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("Currency symbol must not be empty".into()));
        }
        self.update_settings(|s| s.currency = trimmed.to_string())
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), CoreError> {
        self.update_settings(|s| s.dark_mode = enabled)
    }

    pub fn update_profile(&mut self, profile: Profile) -> Result<(), CoreError> {
        self.update_settings(|s| s.profile = profile)
    }

    pub fn set_starting_balance(&mut self, balance: Decimal) -> Result<(), CoreError> {
        if balance < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Starting balance must not be negative, got {balance}"
            )));
        }
        self.update_settings(|s| s.starting_balance = balance)
    }

    pub fn set_allocation_policy(&mut self, policy: AllocationPolicy) -> Result<(), CoreError> {
        self.update_settings(|s| s.allocation_policy = policy)
    }

    pub fn set_monthly_budget(&mut self, budget: Decimal) -> Result<(), CoreError> {
        if budget < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Monthly budget must not be negative, got {budget}"
            )));
        }
        StorageManager::save_budget(&mut self.store, &self.user_id, budget)?;
        self.ledger.monthly_budget = budget;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Persist first, then swap in, so a failed write leaves memory unchanged.
    fn commit_transactions(&mut self, transactions: Vec<Transaction>) -> Result<(), CoreError> {
        StorageManager::save_transactions(&mut self.store, &self.user_id, &transactions)?;
        self.ledger.transactions = transactions;
        Ok(())
    }

    fn commit_goals(&mut self, goals: Vec<SavingsGoal>) -> Result<(), CoreError> {
        self.update_settings(|s| s.savings_goals = goals)
    }

    fn update_settings(&mut self, apply: impl FnOnce(&mut Settings)) -> Result<(), CoreError> {
        let mut settings = self.ledger.settings.clone();
        apply(&mut settings);
        StorageManager::save_settings(&mut self.store, &self.user_id, &settings)?;
        self.ledger.settings = settings;
        Ok(())
    }
}
