//! `DNSPod` legacy API wire types

use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::types::{Domain, Record, RecordType};
use crate::utils::serde_helpers::{
    opt_string_or_number, opt_u32_lenient, string_or_number, u32_lenient,
};

// ============ Status envelope ============

/// `status` object present in every response.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Every response, before the action-specific part is looked at.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    pub status: ApiStatus,
}

// ============ Domain.List ============

#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    #[serde(default)]
    pub info: Option<DomainListInfo>,
    #[serde(default)]
    pub domains: Vec<DnspodDomain>,
}

#[derive(Debug, Deserialize)]
pub struct DomainListInfo {
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub domain_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DnspodDomain {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl From<DnspodDomain> for Domain {
    fn from(d: DnspodDomain) -> Self {
        Self {
            id: d.id,
            name: d.name,
        }
    }
}

// ============ Record.List ============

#[derive(Debug, Deserialize)]
pub struct RecordListResponse {
    #[serde(default)]
    pub info: Option<RecordListInfo>,
    #[serde(default)]
    pub records: Vec<DnspodListedRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RecordListInfo {
    /// Total matching records (not the page size).
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub records_num: Option<u32>,
}

/// Record item of `Record.List`; field names differ from `Record.Info`.
#[derive(Debug, Deserialize)]
pub struct DnspodListedRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub line: String,
    pub value: String,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub mx: Option<u32>,
    #[serde(deserialize_with = "u32_lenient")]
    pub ttl: u32,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub weight: Option<u32>,
    #[serde(deserialize_with = "string_or_number")]
    pub enabled: String,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
}

impl DnspodListedRecord {
    pub fn into_record(self, domain_id: &str) -> Result<Record> {
        Ok(Record {
            mx: mx_for(&self.record_type, self.mx, &self.id)?,
            weight: narrow("weight", self.weight, &self.id)?,
            domain_id: domain_id.to_string(),
            id: self.id,
            sub_domain: self.name,
            record_type: self.record_type,
            record_line: self.line,
            value: self.value,
            ttl: self.ttl,
            enabled: self.enabled,
            remark: self.remark.unwrap_or_default(),
            updated_on: self.updated_on,
        })
    }
}

// ============ Record.Info ============

#[derive(Debug, Deserialize)]
pub struct RecordInfoResponse {
    pub record: DnspodRecordInfo,
}

#[derive(Debug, Deserialize)]
pub struct DnspodRecordInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub domain_id: Option<String>,
    pub sub_domain: String,
    pub record_type: RecordType,
    #[serde(default)]
    pub record_line: String,
    pub value: String,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub mx: Option<u32>,
    #[serde(deserialize_with = "u32_lenient")]
    pub ttl: u32,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub weight: Option<u32>,
    #[serde(deserialize_with = "string_or_number")]
    pub enabled: String,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
}

impl DnspodRecordInfo {
    pub fn into_record(self, domain_id: &str) -> Result<Record> {
        Ok(Record {
            mx: mx_for(&self.record_type, self.mx, &self.id)?,
            weight: narrow("weight", self.weight, &self.id)?,
            domain_id: self.domain_id.unwrap_or_else(|| domain_id.to_string()),
            id: self.id,
            sub_domain: self.sub_domain,
            record_type: self.record_type,
            record_line: self.record_line,
            value: self.value,
            ttl: self.ttl,
            enabled: self.enabled,
            remark: self.remark.unwrap_or_default(),
            updated_on: self.updated_on,
        })
    }
}

// ============ Record.Create ============

#[derive(Debug, Deserialize)]
pub struct RecordCreateResponse {
    pub record: CreatedRecord,
}

#[derive(Debug, Deserialize)]
pub struct CreatedRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// DNSPod reports `mx = "0"` on every non-MX record.
fn mx_for(record_type: &RecordType, mx: Option<u32>, record_id: &str) -> Result<Option<u16>> {
    if record_type.is_mx() {
        narrow("mx", mx, record_id)
    } else {
        Ok(None)
    }
}

/// 超出范围的值视为解析错误，不能当作未设置
fn narrow<T: TryFrom<u32>>(
    field: &str,
    value: Option<u32>,
    record_id: &str,
) -> Result<Option<T>> {
    value
        .map(|v| {
            T::try_from(v).map_err(|_| ProviderError::ParseError {
                detail: format!("record {record_id}: {field} {v} is out of range"),
            })
        })
        .transpose()
}
