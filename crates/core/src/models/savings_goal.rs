use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target with progress so far.
///
/// `current` may exceed `target`; over-funding is stored as-is and only
/// clamped when progress is computed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    /// Display accent, opaque to the engine (e.g. "#28a745")
    pub color: String,
}

impl SavingsGoal {
    pub(crate) fn from_new(goal: NewGoal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: goal.name.trim().to_string(),
            target: goal.target,
            current: goal.current,
            color: goal.color,
        }
    }

    /// Apply the provided fields of `patch`, leaving the rest untouched.
    pub(crate) fn patched(&self, patch: &GoalPatch) -> Self {
        Self {
            id: self.id.clone(),
            name: patch
                .name
                .as_deref()
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| self.name.clone()),
            target: patch.target.unwrap_or(self.target),
            current: patch.current.unwrap_or(self.current),
            color: patch.color.clone().unwrap_or_else(|| self.color.clone()),
        }
    }
}

/// Input for creating a savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target: Decimal,
    #[serde(default)]
    pub current: Decimal,
    pub color: String,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target: Decimal, current: Decimal, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target,
            current,
            color: color.into(),
        }
    }
}

/// Partial update for a savings goal. `None` fields keep their old value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target: Option<Decimal>,
    pub current: Option<Decimal>,
    pub color: Option<String>,
}

/// Display-time view of a single goal's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    /// Completion in percent, clamped to 0..=100
    pub percent: Decimal,
    /// Amount still needed; zero once the goal is reached
    pub remaining: Decimal,
    pub achieved: bool,
}

/// Totals across every goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub total_saved: Decimal,
    pub total_target: Decimal,
    /// total_saved / total_target × 100, or 0 when there is no target. Not clamped.
    pub overall_percent: Decimal,
}
