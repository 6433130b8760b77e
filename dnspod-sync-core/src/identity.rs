//! Composite record identity `<domain_id>:<record_id>`

use std::fmt;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// 仅匹配 ASCII 数字
const IDENTITY_PATTERN: &str = r"^[0-9]+:[0-9]+$";

/// Remote identity of one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordIdentity {
    pub domain_id: String,
    pub record_id: String,
}

impl fmt::Display for RecordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain_id, self.record_id)
    }
}

/// Encodes and validates record identities.
///
/// Compile once and hand it to whoever needs it.
#[derive(Debug, Clone)]
pub struct IdentityCodec {
    pattern: Regex,
}

impl IdentityCodec {
    pub fn new() -> Self {
        // 常量表达式，不会失败
        #[allow(clippy::unwrap_used)]
        let pattern = Regex::new(IDENTITY_PATTERN).unwrap();
        Self { pattern }
    }

    /// `domain_id + ":" + record_id`, with no validation.
    pub fn encode(&self, domain_id: &str, record_id: &str) -> String {
        format!("{domain_id}:{record_id}")
    }

    pub fn decode(&self, token: &str) -> CoreResult<RecordIdentity> {
        if !self.pattern.is_match(token) {
            return Err(CoreError::InvalidFormat(format!(
                "expects state id to be in the format <domain_id>:<record_id>, got {token:?}"
            )));
        }
        let (domain_id, record_id) = token
            .split_once(':')
            .ok_or_else(|| CoreError::InvalidFormat(token.to_string()))?;
        Ok(RecordIdentity {
            domain_id: domain_id.to_string(),
            record_id: record_id.to_string(),
        })
    }
}

impl Default for IdentityCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn encode_then_decode() {
        let codec = IdentityCodec::new();
        let pairs = [
            ("100", "55"),
            ("1", "2"),
            ("0", "0"),
            ("007", "0010"),
            ("2238269", "16894439"),
            ("18446744073709551616", "99999999999999999999999"),
        ];
        for (domain_id, record_id) in pairs {
            let token = codec.encode(domain_id, record_id);
            assert_eq!(token, format!("{domain_id}:{record_id}"));
            let identity = codec.decode(&token).unwrap();
            assert_eq!(identity.domain_id, domain_id);
            assert_eq!(identity.record_id, record_id);
            assert_eq!(identity.to_string(), token);
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        let codec = IdentityCodec::new();
        let tokens = [
            "abc", "1:2:3", "1-2", "", ":", "1:", ":2", " 1:2", "1:2\n", "a:1",
            // 全角、阿拉伯-印度、天城文数字
            "１００:５５", "١٠٠:٥٥", "१:२", "100:５",
        ];
        for token in tokens {
            let err = codec.decode(token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "token {token:?}");
        }
    }
}
