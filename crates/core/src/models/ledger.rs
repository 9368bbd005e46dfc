use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::settings::{Settings, DEFAULT_MONTHLY_BUDGET};
use super::transaction::Transaction;

/// Everything one user owns. Each part is persisted under its own
/// record-store key and overwritten whole on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// All transactions, in insertion order
    pub transactions: Vec<Transaction>,

    /// User settings, including savings goals
    pub settings: Settings,

    /// Monthly spending budget
    pub monthly_budget: Decimal,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            settings: Settings::default(),
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
        }
    }
}
