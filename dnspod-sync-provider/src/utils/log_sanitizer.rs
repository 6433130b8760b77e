//! Log sanitization utilities
//!
//! DNSPod requests carry the account's `login_token` in the form body and TXT
//! records can hold DKIM keys, so neither may reach debug logs verbatim.

/// Longest response body printed in full.
const TRUNCATE_LIMIT: usize = 256;

/// Form fields whose values are never logged.
const SECRET_FIELDS: &[&str] = &["login_token"];

/// Largest char boundary not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Truncate a response body for logging, keeping the total length visible.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Render form fields as `k=v&k=v` with secrets masked.
pub fn redact_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            if SECRET_FIELDS.contains(&key.as_str()) {
                format!("{key}=***")
            } else {
                format!("{key}={}", truncate_for_log(value))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        let s = r#"{"status":{"code":"1"}}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn body_at_limit_unchanged() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn long_body_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 44);
        let result = truncate_for_log(&s);
        assert!(result.ends_with(&format!("[truncated, total {} bytes]", TRUNCATE_LIMIT + 44)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn truncation_respects_multibyte_lines() {
        // 线路名 "默认" is 6 bytes; a cut in the middle must not panic
        let s = "默认".repeat(100);
        assert!(truncate_for_log(&s).contains("[truncated"));
    }

    #[test]
    fn login_token_masked() {
        let fields = vec![
            ("login_token".to_string(), "12345,abcdef".to_string()),
            ("domain_id".to_string(), "100".to_string()),
        ];
        let rendered = redact_form(&fields);
        assert_eq!(rendered, "login_token=***&domain_id=100");
        assert!(!rendered.contains("abcdef"));
    }
}
