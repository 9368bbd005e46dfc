use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::settings::{Settings, DEFAULT_MONTHLY_BUDGET};
use crate::models::transaction::Transaction;

use super::record_store::RecordStore;

/// Maps a user's ledger onto record-store keys and back.
///
/// Keys, one per data kind:
/// ```text
/// finance_transactions_<user>   JSON array of transactions
/// finance_settings_<user>       settings object (goals included)
/// finance_budget_<user>         monthly budget number
/// ```
pub struct StorageManager;

impl StorageManager {
    pub fn transactions_key(user_id: &str) -> String {
        format!("finance_transactions_{user_id}")
    }

    pub fn settings_key(user_id: &str) -> String {
        format!("finance_settings_{user_id}")
    }

    pub fn budget_key(user_id: &str) -> String {
        format!("finance_budget_{user_id}")
    }

    /// Load everything stored for `user_id`, filling in defaults for
    /// anything never saved.
    pub fn load_ledger(store: &impl RecordStore, user_id: &str) -> Result<Ledger, CoreError> {
        Ok(Ledger {
            transactions: Self::load_transactions(store, user_id)?,
            settings: Self::load_settings(store, user_id)?,
            monthly_budget: Self::load_budget(store, user_id)?,
        })
    }

    /// Load the transaction list. Individual records that cannot be decoded
    /// (bad date, non-numeric amount, unknown type) are skipped with a
    /// warning; a value that is not a list at all is an error.
    pub fn load_transactions(store: &impl RecordStore, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        let key = Self::transactions_key(user_id);
        let items = match store.load(&key)? {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(CoreError::Deserialization(format!(
                    "Expected a list of transactions under '{key}', found {}",
                    json_kind(&other)
                )))
            }
        };

        let total = items.len();
        let transactions: Vec<Transaction> = items
            .into_iter()
            .enumerate()
            .filter_map(|(idx, item)| match serde_json::from_value::<Transaction>(item) {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("Skipping malformed transaction #{idx} under '{key}': {e}");
                    None
                }
            })
            .collect();

        if transactions.len() < total {
            warn!(
                "Loaded {} of {} stored transactions for user {}",
                transactions.len(),
                total,
                user_id
            );
        }
        Ok(transactions)
    }

    pub fn load_settings(store: &impl RecordStore, user_id: &str) -> Result<Settings, CoreError> {
        let key = Self::settings_key(user_id);
        match store.load(&key)? {
            None => Ok(Settings::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Load the monthly budget, falling back to the default when it is
    /// missing or unreadable.
    pub fn load_budget(store: &impl RecordStore, user_id: &str) -> Result<Decimal, CoreError> {
        let key = Self::budget_key(user_id);
        let Some(value) = store.load(&key)? else {
            return Ok(DEFAULT_MONTHLY_BUDGET);
        };
        match serde_json::from_value::<Decimal>(value) {
            Ok(budget) if budget >= Decimal::ZERO => Ok(budget),
            Ok(budget) => {
                warn!("Ignoring negative monthly budget {budget} under '{key}'");
                Ok(DEFAULT_MONTHLY_BUDGET)
            }
            Err(e) => {
                warn!("Ignoring unreadable monthly budget under '{key}': {e}");
                Ok(DEFAULT_MONTHLY_BUDGET)
            }
        }
    }

    pub fn save_ledger(store: &mut impl RecordStore, user_id: &str, ledger: &Ledger) -> Result<(), CoreError> {
        Self::save_transactions(store, user_id, &ledger.transactions)?;
        Self::save_settings(store, user_id, &ledger.settings)?;
        Self::save_budget(store, user_id, ledger.monthly_budget)
    }

    pub fn save_transactions(
        store: &mut impl RecordStore,
        user_id: &str,
        transactions: &[Transaction],
    ) -> Result<(), CoreError> {
        store.save(&Self::transactions_key(user_id), to_value(&transactions)?)
    }

    pub fn save_settings(store: &mut impl RecordStore, user_id: &str, settings: &Settings) -> Result<(), CoreError> {
        store.save(&Self::settings_key(user_id), to_value(settings)?)
    }

    pub fn save_budget(store: &mut impl RecordStore, user_id: &str, budget: Decimal) -> Result<(), CoreError> {
        store.save(&Self::budget_key(user_id), to_value(&budget)?)
    }
}

fn to_value(value: &impl Serialize) -> Result<Value, CoreError> {
    serde_json::to_value(value).map_err(|e| CoreError::Serialization(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
