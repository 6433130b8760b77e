//! Desired record description and the handle the reconciler works on

use std::fmt;
use std::ops::RangeInclusive;

use dnspod_sync_provider::{
    DEFAULT_RECORD_LINE, DISABLED_FLAG, ENABLED_FLAG, Record, RecordPayload, RecordType,
};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub const DEFAULT_TTL: u32 = 600;

const MX_RANGE: RangeInclusive<u8> = 1..=20;
// 不同等级域名最小值不同，这里只做上下界检查
const TTL_RANGE: RangeInclusive<u32> = 1..=604_800;
const WEIGHT_RANGE: RangeInclusive<u8> = 0..=100;

/// Whether the record resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Enable,
    Disable,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    /// Map the API's `enabled` flag (`"1"` / `"0"`).
    pub fn from_enabled_flag(flag: &str) -> CoreResult<Self> {
        match flag {
            ENABLED_FLAG => Ok(Self::Enable),
            DISABLED_FLAG => Ok(Self::Disable),
            other => Err(CoreError::UnexpectedField {
                field: "Enable".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_record_line() -> String {
    DEFAULT_RECORD_LINE.to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_ttl() -> Option<u32> {
    Some(DEFAULT_TTL)
}

/// Desired state of one record.
///
/// Omitted JSON fields take their defaults; an explicit `"ttl": null` is kept
/// as `None` and rejected on create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    pub domain_id: String,
    pub sub_domain: String,
    pub record_type: RecordType,
    #[serde(default = "default_record_line")]
    pub record_line: String,
    pub value: String,
    /// MX priority, required for and only for MX records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mx: Option<u8>,
    #[serde(default = "default_ttl")]
    pub ttl: Option<u32>,
    /// `Some(0)` and `None` are different states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub remark: String,
}

impl RecordSpec {
    /// A spec with every optional field at its default.
    pub fn new(
        domain_id: impl Into<String>,
        sub_domain: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            domain_id: domain_id.into(),
            sub_domain: sub_domain.into(),
            record_type,
            record_line: default_record_line(),
            value: value.into(),
            mx: None,
            ttl: default_ttl(),
            weight: None,
            status: RecordStatus::default(),
            remark: String::new(),
        }
    }

    /// Empty `record_line` means the default line.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.record_line.is_empty() {
            self.record_line = default_record_line();
        }
        self
    }

    /// Check the spec and build the create/modify form for `domain_id`.
    ///
    /// `domain_id` is passed separately because an update targets the
    /// domain in the resource identity, not the one in the spec.
    pub fn to_payload(&self, domain_id: &str) -> CoreResult<RecordPayload> {
        for (field, value) in [
            ("domain_id", domain_id),
            ("sub_domain", self.sub_domain.as_str()),
            ("value", self.value.as_str()),
        ] {
            if value.is_empty() {
                return Err(CoreError::Validation(format!("{field} is required")));
            }
        }

        match (self.mx, self.record_type.is_mx()) {
            (Some(_), false) => {
                return Err(CoreError::Validation(format!(
                    "mx is not expected when the record type is not MX (type: {})",
                    self.record_type
                )));
            }
            (None, true) => {
                return Err(CoreError::Validation(
                    "mx is required when the record type is MX".to_string(),
                ));
            }
            (Some(mx), true) if !MX_RANGE.contains(&mx) => {
                return Err(CoreError::Validation(format!(
                    "expected mx to be in the range (1 - 20), got {mx}"
                )));
            }
            _ => {}
        }

        let Some(ttl) = self.ttl else {
            return Err(CoreError::Validation("ttl is missing".to_string()));
        };
        if !TTL_RANGE.contains(&ttl) {
            return Err(CoreError::Validation(format!(
                "expected ttl to be in the range (1 - 604800), got {ttl}"
            )));
        }

        if let Some(weight) = self.weight
            && !WEIGHT_RANGE.contains(&weight)
        {
            return Err(CoreError::Validation(format!(
                "expected weight to be in the range (0 - 100), got {weight}"
            )));
        }

        let record_line = if self.record_line.is_empty() {
            default_record_line()
        } else {
            self.record_line.clone()
        };

        Ok(RecordPayload {
            domain_id: domain_id.to_string(),
            sub_domain: self.sub_domain.clone(),
            record_type: self.record_type.clone(),
            record_line,
            value: self.value.clone(),
            mx: self.mx,
            ttl,
            weight: self.weight,
            status: self.status.as_str().to_string(),
        })
    }

    /// Rebuild a spec from what the API reports.
    pub fn from_remote(domain_id: &str, record: Record) -> CoreResult<Self> {
        let status = RecordStatus::from_enabled_flag(&record.enabled)?;

        let mx = if record.record_type.is_mx() {
            let raw = record.mx.ok_or_else(|| CoreError::UnexpectedField {
                field: "mx".to_string(),
                value: "<missing>".to_string(),
            })?;
            Some(u8::try_from(raw).map_err(|_| CoreError::UnexpectedField {
                field: "mx".to_string(),
                value: raw.to_string(),
            })?)
        } else {
            None
        };

        Ok(Self {
            domain_id: domain_id.to_string(),
            sub_domain: record.sub_domain,
            record_type: record.record_type,
            record_line: record.record_line,
            value: record.value,
            mx,
            ttl: Some(record.ttl),
            weight: record.weight,
            status,
            remark: record.remark,
        })
    }
}

/// A record as a host keeps it between runs.
///
/// `id` is the encoded identity; `None` means the record is not tracked
/// (never created, or found gone remotely).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResource {
    pub id: Option<String>,
    pub spec: RecordSpec,
}

impl RecordResource {
    pub fn untracked(spec: RecordSpec) -> Self {
        Self { id: None, spec }
    }

    pub fn is_tracked(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `spec` now mirrors the remote record.
    Present,
    /// Not tracked, or gone remotely; the identity is cleared.
    Untracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// The record vanished before it could be modified; the identity is cleared.
    NoLongerPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Already removed remotely.
    AlreadyGone,
    /// Nothing was tracked; no remote call was made.
    Untracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Unchanged,
    Updated,
    /// Update found the record gone, so it was created again.
    Recreated,
    /// `domain_id` changed: deleted from the old domain, created in the new one.
    Replaced,
}
