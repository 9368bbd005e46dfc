use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::savings_goal::SavingsGoal;

/// Default monthly spending budget for a new user.
pub const DEFAULT_MONTHLY_BUDGET: Decimal = rust_decimal_macros::dec!(2000);

/// Which balance an allocation is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationPolicy {
    /// Income minus expense of the current calendar month only
    #[default]
    CurrentMonth,
    /// Starting balance plus all income minus all expense up to today
    Cumulative,
}

/// Per-user settings, stored under the user's settings key.
///
/// Every field has a default so older or partial records still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Currency symbol shown next to amounts (e.g., "$", "€").
    pub currency: String,

    pub dark_mode: bool,

    pub profile: Profile,

    /// Goals in creation order.
    pub savings_goals: Vec<SavingsGoal>,

    pub starting_balance: Decimal,

    pub allocation_policy: AllocationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            dark_mode: false,
            profile: Profile::default(),
            savings_goals: Vec::new(),
            starting_balance: Decimal::ZERO,
            allocation_policy: AllocationPolicy::default(),
        }
    }
}

/// User profile details carried into reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub theme_color: String,
}

impl Profile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        Self {
            name: format!("{first_name} {last_name}").trim().to_string(),
            first_name,
            last_name,
            email: email.into(),
            ..Self::default()
        }
    }

    /// Upper-case initials, e.g. "JD" for "Jane Doe".
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            bio: String::new(),
            theme_color: "blue".to_string(),
        }
    }
}
