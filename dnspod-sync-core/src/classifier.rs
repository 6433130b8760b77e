//! Sorting remote outcomes into success, drift and real failures

use dnspod_sync_provider::ProviderError;

/// Status codes meaning the object no longer exists remotely.
///
/// - `6`: 域名ID错误
/// - `8`: 记录ID错误
pub const DRIFT_CODES: &[&str] = &["6", "8"];

/// Result of a remote call, as the reconciler sees it.
#[derive(Debug)]
pub enum Classified<T> {
    Ok(T),
    /// The object is gone; local state should be dropped.
    Drifted,
    Fatal(ProviderError),
}

/// Whether `err` says the targeted object does not exist (any more).
pub fn is_drift(err: &ProviderError) -> bool {
    matches!(err, ProviderError::Api { code, .. } if DRIFT_CODES.contains(&code.as_str()))
}

pub fn classify<T>(result: Result<T, ProviderError>) -> Classified<T> {
    match result {
        Ok(value) => Classified::Ok(value),
        Err(e) if is_drift(&e) => Classified::Drifted,
        Err(e) => Classified::Fatal(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: &str) -> ProviderError {
        ProviderError::Api {
            action: "Record.Info".to_string(),
            code: code.to_string(),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn drift_codes() {
        assert!(matches!(classify::<()>(Err(api("6"))), Classified::Drifted));
        assert!(matches!(classify::<()>(Err(api("8"))), Classified::Drifted));
    }

    #[test]
    fn other_codes_are_fatal_and_untouched() {
        let Classified::Fatal(err) = classify::<()>(Err(api("7"))) else {
            panic!("expected Fatal");
        };
        assert_eq!(err, api("7"));
    }

    #[test]
    fn transport_errors_are_fatal() {
        let err = ProviderError::Timeout {
            detail: "30s".to_string(),
        };
        assert!(!is_drift(&err));
        assert!(matches!(classify::<()>(Err(err)), Classified::Fatal(_)));
    }

    #[test]
    fn credential_error_with_drift_like_code_is_fatal() {
        let err = ProviderError::InvalidCredentials {
            code: "8".to_string(),
            message: "x".to_string(),
        };
        assert!(!is_drift(&err));
    }

    #[test]
    fn success_passes_payload() {
        assert!(matches!(classify(Ok(5)), Classified::Ok(5)));
    }
}
