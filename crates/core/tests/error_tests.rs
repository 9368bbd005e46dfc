// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use rust_decimal_macros::dec;

use finance_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation() {
        let err = CoreError::Validation("amount must be positive".into());
        assert_eq!(err.to_string(), "Validation failed: amount must be positive");
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound {
            kind: "Savings goal",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "Savings goal not found: 42");
    }

    #[test]
    fn insufficient_funds() {
        let err = CoreError::InsufficientFunds {
            requested: dec!(5000),
            available: dec!(3800.50),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 5000, available 3800.50"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("quota exceeded".into());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn parse(text: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(text)?)
        }
        assert!(parse("[1]").is_ok());
        assert!(matches!(parse("]"), Err(CoreError::Deserialization(_))));
    }
}

// ── Trait bounds ────────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::Validation(String::new()));
    }

    #[test]
    fn equality() {
        assert_eq!(
            CoreError::Validation("x".into()),
            CoreError::Validation("x".into())
        );
        assert_ne!(
            CoreError::Validation("x".into()),
            CoreError::Storage("x".into())
        );
    }
}
