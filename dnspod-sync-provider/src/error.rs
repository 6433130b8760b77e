use serde::{Deserialize, Serialize};

/// Provider name used in error messages and logs.
pub const PROVIDER_NAME: &str = "dnspod";

/// Error type for every DNSPod API call.
///
/// Remote failures keep the API's own status `code` and `message` untouched so
/// callers can classify them (e.g. "6"/"8" meaning the object is gone) and
/// surface them verbatim.
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient. The HTTP client retries
/// them with exponential backoff; nothing else is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// HTTP 429 or an API frequency-limit status.
    RateLimited {
        /// Suggested wait time in seconds, if the server sent one.
        retry_after: Option<u64>,
        /// Original message, if available.
        raw_message: Option<String>,
    },

    /// The login token was rejected.
    InvalidCredentials {
        /// Status code returned by the API.
        code: String,
        /// Original error message from the API.
        message: String,
    },

    /// The API answered with a non-success status.
    Api {
        /// Action that failed, e.g. `Record.Modify`.
        action: String,
        /// Status code as returned by the API.
        code: String,
        /// Status message as returned by the API.
        message: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },
}

impl ProviderError {
    /// Remote status code, if the API produced one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } | Self::InvalidCredentials { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Transient failures worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. } | Self::Api { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => {
                write!(f, "[{PROVIDER_NAME}] Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "[{PROVIDER_NAME}] Request timeout: {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{PROVIDER_NAME}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{PROVIDER_NAME}] Rate limited")
                }
            }
            Self::InvalidCredentials { code, message } => {
                write!(f, "[{PROVIDER_NAME}] Invalid credentials ({code}): {message}")
            }
            Self::Api {
                action,
                code,
                message,
            } => {
                write!(f, "[{PROVIDER_NAME}] {action} failed with code {code}: {message}")
            }
            Self::ParseError { detail } => {
                write!(f, "[{PROVIDER_NAME}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
