use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the entire finance-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    // ── Record Store ────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    pub(crate) fn transaction_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind: "Transaction",
            id: id.into(),
        }
    }

    pub(crate) fn goal_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind: "Savings goal",
            id: id.into(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

/// Decoding failures. Encoders map their errors to `Serialization` explicitly.
impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
