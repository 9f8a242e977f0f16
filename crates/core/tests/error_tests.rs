// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use coin_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn malformed_payload() {
        let err = CoreError::MalformedPayload {
            series: "bitcoin".into(),
            reason: "expected an array of points, got an object".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed payload for series 'bitcoin': expected an array of points, got an object"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("oops".into());
        assert_eq!(err.to_string(), "Serialization error: oops");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("bad json".into());
        assert_eq!(err.to_string(), "Deserialization error: bad json");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "CoinGecko".into(),
            message: "market listing request failed with status 429 Too Many Requests".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (CoinGecko): market listing request failed with status 429 Too Many Requests"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("Amount must be greater than 0".into());
        assert_eq!(err.to_string(), "Validation failed: Amount must be greater than 0");
    }

    #[test]
    fn unsupported_currency() {
        let err = CoreError::UnsupportedCurrency("'chf'".into());
        assert_eq!(err.to_string(), "Unsupported currency: 'chf'");
    }

    #[test]
    fn coin_not_found() {
        let err = CoreError::CoinNotFound("From currency not found: XYZ".into());
        assert_eq!(err.to_string(), "Coin not found: From currency not found: XYZ");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_serde_errors() {
        fn parse(s: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(s)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(matches!(parse("[1,"), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn errors_are_debug() {
        let err = CoreError::Network("x".into());
        assert!(format!("{err:?}").contains("Network"));
    }
}
