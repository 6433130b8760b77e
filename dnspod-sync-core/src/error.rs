//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dnspod_sync_provider::ProviderError;

/// Core layer error type
///
/// A record that vanished remotely is not an error: the reconciler reports it
/// as an outcome and clears the identity instead.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Identity is not `<domain_id>:<record_id>`
    #[error("Invalid resource identity: {0}")]
    InvalidFormat(String),

    /// Desired record spec rejected before any remote call
    #[error("{0}")]
    Validation(String),

    /// Remote value that cannot be mapped back onto a record spec
    #[error("unexpect {field} field, got {value}")]
    UnexpectedField { field: String, value: String },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// State file or declarative output could not be encoded
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed identity; a caller bug, never retried.
    InvalidFormat,
    /// Bad desired spec; never retried.
    Validation,
    /// Anything else; propagated to the operator.
    Fatal,
}

impl CoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::Validation(_) => ErrorKind::Validation,
            Self::UnexpectedField { .. } | Self::Provider(_) | Self::SerializationError(_) => {
                ErrorKind::Fatal
            }
        }
    }

    /// 是否为预期行为（用户输入错误等），用于日志分级。
    ///
    /// `true` 时使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidFormat(_) | Self::Validation(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::UnexpectedField { .. } | Self::SerializationError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
