use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Domain, Record, RecordPayload};

/// 原始 API 状态（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Action that produced the status.
    pub action: String,
    /// 状态码，成功为 "1"
    pub code: String,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(
        action: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Maps a non-success API status onto [`ProviderError`] (internal).
pub(crate) trait ProviderErrorMapper {
    /// 将原始 API 状态映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            detail: detail.to_string(),
        }
    }
}

/// The remote operations the reconciler and exporter depend on.
///
/// Implementations must be safe to share across tasks: the reconciler may
/// drive several record identities concurrently through one instance.
/// Retry of transient transport failures is the implementation's concern;
/// remote status errors are returned as-is so callers can classify them.
#[async_trait]
pub trait DnspodApi: Send + Sync {
    /// All domains visible to the account, in API order.
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// All records of one domain, in API order.
    async fn list_records(&self, domain_id: &str) -> Result<Vec<Record>>;

    /// Create a record and return its new id.
    async fn create_record(&self, payload: &RecordPayload) -> Result<String>;

    /// Fetch one record.
    async fn read_record(&self, domain_id: &str, record_id: &str) -> Result<Record>;

    /// Replace a record's fields. The target ids come from the arguments,
    /// `payload.domain_id` is ignored.
    async fn update_record(
        &self,
        domain_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<()>;

    /// Remove a record.
    async fn delete_record(&self, domain_id: &str, record_id: &str) -> Result<()>;

    /// Set the free-text remark (`Record.Remark`); empty clears it.
    async fn set_remark(&self, domain_id: &str, record_id: &str, remark: &str) -> Result<()>;
}
