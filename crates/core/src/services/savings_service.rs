use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::category::SAVINGS_CATEGORY;
use crate::models::savings_goal::{GoalPatch, GoalProgress, NewGoal, SavingsGoal, SavingsSummary};
use crate::models::transaction::{Transaction, TransactionType, MAX_AMOUNT};

const HUNDRED: Decimal = rust_decimal_macros::dec!(100);

/// CRUD over savings goals plus the allocation protocol.
///
/// Every operation takes the current lists by reference and returns new
/// ones, so a failed call leaves the caller's state exactly as it was.
pub struct SavingsService;

impl SavingsService {
    pub fn new() -> Self {
        Self
    }

    /// Append a new goal. Returns the updated list and the created goal.
    pub fn add_goal(
        &self,
        goals: &[SavingsGoal],
        new_goal: NewGoal,
    ) -> Result<(Vec<SavingsGoal>, SavingsGoal), CoreError> {
        let goal = SavingsGoal::from_new(new_goal);
        Self::validate_goal(&goal)?;

        let mut updated = goals.to_vec();
        updated.push(goal.clone());
        debug!("Added savings goal {} ({})", goal.id, goal.name);
        Ok((updated, goal))
    }

    /// Replace the fields present in `patch` on goal `goal_id`.
    pub fn edit_goal(
        &self,
        goals: &[SavingsGoal],
        goal_id: &str,
        patch: &GoalPatch,
    ) -> Result<Vec<SavingsGoal>, CoreError> {
        let idx = Self::position(goals, goal_id)?;
        let patched = goals[idx].patched(patch);
        Self::validate_goal(&patched)?;

        let mut updated = goals.to_vec();
        updated[idx] = patched;
        Ok(updated)
    }

    /// Remove a goal. Allocation transactions already recorded for it stay.
    pub fn delete_goal(&self, goals: &[SavingsGoal], goal_id: &str) -> Result<Vec<SavingsGoal>, CoreError> {
        let idx = Self::position(goals, goal_id)?;
        let mut updated = goals.to_vec();
        let removed = updated.remove(idx);
        debug!("Deleted savings goal {} ({})", removed.id, removed.name);
        Ok(updated)
    }

    /// Move `amount` of available balance into a goal.
    ///
    /// On success the goal's `current` grows by `amount` and exactly one
    /// expense transaction in the "savings" category, dated `today`, is
    /// appended to the transaction list.
    pub fn allocate(
        &self,
        goals: &[SavingsGoal],
        transactions: &[Transaction],
        goal_id: &str,
        amount: Decimal,
        available_balance: Decimal,
        today: NaiveDate,
    ) -> Result<(Vec<SavingsGoal>, Vec<Transaction>), CoreError> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Allocation amount must be positive, got {amount}"
            )));
        }
        if amount > MAX_AMOUNT {
            return Err(CoreError::Validation(format!(
                "Allocation amount must not exceed {MAX_AMOUNT}, got {amount}"
            )));
        }
        let idx = Self::position(goals, goal_id)?;
        if amount > available_balance {
            return Err(CoreError::InsufficientFunds {
                requested: amount,
                available: available_balance,
            });
        }

        let mut updated_goals = goals.to_vec();
        let goal = &mut updated_goals[idx];
        goal.current = goal
            .current
            .checked_add(amount)
            .filter(|current| *current <= MAX_AMOUNT)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Goal {} would exceed {MAX_AMOUNT} after allocating {amount}",
                    goal_id
                ))
            })?;

        let allocation = Transaction::new(
            TransactionType::Expense,
            format!("Savings: {}", goal.name),
            amount,
            SAVINGS_CATEGORY,
            today,
        );
        debug!(
            "Allocated {} to savings goal {} via transaction {}",
            amount, goal.id, allocation.id
        );

        let mut updated_transactions = transactions.to_vec();
        updated_transactions.push(allocation);
        Ok((updated_goals, updated_transactions))
    }

    /// Display progress for one goal, clamped to 100 %.
    pub fn goal_progress(&self, goal: &SavingsGoal) -> GoalProgress {
        let percent = percent_of(goal.current, goal.target)
            .clamp(Decimal::ZERO, HUNDRED);
        let remaining = goal
            .target
            .checked_sub(goal.current)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        GoalProgress {
            goal_id: goal.id.clone(),
            percent,
            remaining,
            achieved: goal.current >= goal.target,
        }
    }

    /// Totals across all goals.
    pub fn summary(&self, goals: &[SavingsGoal]) -> SavingsSummary {
        let total_saved = checked_sum(goals.iter().map(|g| g.current));
        let total_target = checked_sum(goals.iter().map(|g| g.target));
        SavingsSummary {
            total_saved,
            total_target,
            overall_percent: percent_of(total_saved, total_target),
        }
    }

    /// Rules:
    /// - Name must not be blank
    /// - Target must be positive and at most `MAX_AMOUNT`
    /// - Current must be between zero and `MAX_AMOUNT`
    fn validate_goal(goal: &SavingsGoal) -> Result<(), CoreError> {
        if goal.name.trim().is_empty() {
            return Err(CoreError::Validation("Goal name must not be empty".into()));
        }
        if goal.target <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Goal target must be positive, got {}",
                goal.target
            )));
        }
        if goal.target > MAX_AMOUNT {
            return Err(CoreError::Validation(format!(
                "Goal target must not exceed {MAX_AMOUNT}, got {}",
                goal.target
            )));
        }
        if goal.current > MAX_AMOUNT {
            return Err(CoreError::Validation(format!(
                "Goal current amount must not exceed {MAX_AMOUNT}, got {}",
                goal.current
            )));
        }
        if goal.current < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Goal current amount must not be negative, got {}",
                goal.current
            )));
        }
        Ok(())
    }

    fn position(goals: &[SavingsGoal], goal_id: &str) -> Result<usize, CoreError> {
        goals
            .iter()
            .position(|g| g.id == goal_id)
            .ok_or_else(|| CoreError::goal_not_found(goal_id))
    }
}

impl Default for SavingsService {
    fn default() -> Self {
        Self::new()
    }
}

/// part / whole × 100, rounded to two places; 0 when `whole` is zero or
/// the ratio overflows.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(|percent| percent.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

/// Sum of stored goal amounts. Values that would overflow are left out.
fn checked_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).unwrap_or_else(|| {
            warn!("Skipping goal amount {amount}: total would overflow");
            total
        })
    })
}
