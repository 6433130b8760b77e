//! Public data types exchanged with the DNSPod API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// DNSPod 默认线路
pub const DEFAULT_RECORD_LINE: &str = "默认";

/// `Record.Info` / `Record.List` flag for an active record.
pub const ENABLED_FLAG: &str = "1";
/// `Record.Info` / `Record.List` flag for a paused record.
pub const DISABLED_FLAG: &str = "0";

/// A hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Numeric id, kept as text.
    pub id: String,
    /// Zone apex, e.g. `example.com`.
    pub name: String,
}

/// DNS record types accepted by DNSPod.
///
/// Unknown types are kept in [`RecordType::Other`], upper-cased like the
/// API reports them, so `"https"` and `"HTTPS"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
    Spf,
    Url,
    /// 显性URL
    ExplicitUrl,
    /// 隐性URL
    ImplicitUrl,
    Other(String),
}

impl RecordType {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Spf => "SPF",
            Self::Url => "URL",
            Self::ExplicitUrl => "显性URL",
            Self::ImplicitUrl => "隐性URL",
            Self::Other(s) => s,
        }
    }

    pub fn is_mx(&self) -> bool {
        matches!(self, Self::Mx)
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            "SPF" => Self::Spf,
            "URL" => Self::Url,
            "显性URL" => Self::ExplicitUrl,
            "隐性URL" => Self::ImplicitUrl,
            _ => Self::Other(s.to_uppercase()),
        })
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let Ok(record_type) = s.parse::<Self>();
        Ok(record_type)
    }
}

/// A record as reported by `Record.Info` or `Record.List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub domain_id: String,
    /// Host part, `@` for the apex.
    pub sub_domain: String,
    pub record_type: RecordType,
    pub record_line: String,
    pub value: String,
    /// MX priority; DNSPod reports `"0"` for non-MX records, mapped to `None`.
    pub mx: Option<u16>,
    pub ttl: u32,
    /// `None` when the record is not part of a weighted set.
    pub weight: Option<u8>,
    /// Raw `enabled` flag, `"1"` or `"0"` in practice.
    pub enabled: String,
    pub remark: String,
    pub updated_on: Option<String>,
}

/// Create/modify payload.
///
/// Field-for-field the form DNSPod expects; validation is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub domain_id: String,
    pub sub_domain: String,
    pub record_type: RecordType,
    pub record_line: String,
    pub value: String,
    pub mx: Option<u8>,
    pub ttl: u32,
    pub weight: Option<u8>,
    /// `enable` or `disable`.
    pub status: String,
}

impl RecordPayload {
    /// Form fields shared by `Record.Create` and `Record.Modify`.
    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("domain_id".to_string(), self.domain_id.clone()),
            ("sub_domain".to_string(), self.sub_domain.clone()),
            ("record_type".to_string(), self.record_type.to_string()),
            ("record_line".to_string(), self.record_line.clone()),
            ("value".to_string(), self.value.clone()),
        ];
        if let Some(mx) = self.mx {
            fields.push(("mx".to_string(), mx.to_string()));
        }
        fields.push(("ttl".to_string(), self.ttl.to_string()));
        if let Some(weight) = self.weight {
            fields.push(("weight".to_string(), weight.to_string()));
        }
        fields.push(("status".to_string(), self.status.clone()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parses_case_insensitively() {
        assert_eq!("mx".parse::<RecordType>().unwrap(), RecordType::Mx);
        assert_eq!("AAAA".parse::<RecordType>().unwrap(), RecordType::Aaaa);
        assert_eq!("显性URL".parse::<RecordType>().unwrap(), RecordType::ExplicitUrl);
    }

    #[test]
    fn unknown_record_type_round_trips() {
        let t: RecordType = serde_json::from_str("\"HTTPS\"").unwrap();
        assert_eq!(t, RecordType::Other("HTTPS".to_string()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"HTTPS\"");
    }

    #[test]
    fn unknown_record_type_ignores_case() {
        let desired: RecordType = serde_json::from_str("\"https\"").unwrap();
        let remote: RecordType = "HTTPS".parse().unwrap();
        assert_eq!(desired, remote);
        assert_eq!(desired.as_str(), "HTTPS");
    }

    #[test]
    fn payload_omits_absent_optionals() {
        let payload = RecordPayload {
            domain_id: "100".into(),
            sub_domain: "www".into(),
            record_type: RecordType::A,
            record_line: DEFAULT_RECORD_LINE.into(),
            value: "1.2.3.4".into(),
            mx: None,
            ttl: 600,
            weight: None,
            status: "enable".into(),
        };
        let keys: Vec<_> = payload
            .form_fields()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            [
                "domain_id",
                "sub_domain",
                "record_type",
                "record_line",
                "value",
                "ttl",
                "status"
            ]
        );
    }

    #[test]
    fn payload_keeps_zero_weight() {
        let payload = RecordPayload {
            domain_id: "100".into(),
            sub_domain: "mail".into(),
            record_type: RecordType::Mx,
            record_line: DEFAULT_RECORD_LINE.into(),
            value: "mx.example.com".into(),
            mx: Some(10),
            ttl: 600,
            weight: Some(0),
            status: "disable".into(),
        };
        let fields = payload.form_fields();
        assert!(fields.contains(&("mx".to_string(), "10".to_string())));
        assert!(fields.contains(&("weight".to_string(), "0".to_string())));
    }
}
