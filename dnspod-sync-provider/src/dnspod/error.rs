//! `DNSPod` status code mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::DnspodProvider;

/// Reference: <https://docs.dnspod.cn/api/api-public-request/>
impl ProviderErrorMapper for DnspodProvider {
    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_str() {
            // ============ 登录失败 / 账号受限 ============
            // -1 登录失败, -7 企业账号需要登录验证, -8 代理账号需要验证,
            // 85 异地登录被拒绝
            "-1" | "-7" | "-8" | "85" => ProviderError::InvalidCredentials {
                code: raw.code,
                message: raw.message,
            },

            // ============ API 调用次数超限 ============
            "-2" => ProviderError::RateLimited {
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // Everything else, drift codes included, keeps its raw status.
            _ => ProviderError::Api {
                action: raw.action,
                code: raw.code,
                message: raw.message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DnspodProvider {
        DnspodProvider::new("1,token").unwrap()
    }

    #[test]
    fn login_failures_are_credential_errors() {
        let p = provider();
        for code in ["-1", "-7", "-8", "85"] {
            let err = p.map_error(RawApiError::new("Domain.List", code, "Login fail"));
            assert!(
                matches!(err, ProviderError::InvalidCredentials { code: ref c, .. } if c == code),
                "expected InvalidCredentials for {code}, got {err:?}"
            );
        }
    }

    #[test]
    fn api_limit_is_rate_limited() {
        let err = provider().map_error(RawApiError::new("Record.List", "-2", "API usage is limited"));
        assert!(
            matches!(err, ProviderError::RateLimited { retry_after: None, .. }),
            "expected RateLimited, got {err:?}"
        );
    }

    #[test]
    fn record_id_error_keeps_raw_status() {
        let err = provider().map_error(RawApiError::new("Record.Info", "8", "Record id invalid"));
        assert_eq!(
            err,
            ProviderError::Api {
                action: "Record.Info".to_string(),
                code: "8".to_string(),
                message: "Record id invalid".to_string(),
            }
        );
        assert_eq!(err.code(), Some("8"));
    }

    #[test]
    fn unknown_code_falls_back_to_api() {
        let err = provider().map_error(RawApiError::new("Record.Create", "104", "Record already exists"));
        assert!(
            matches!(err, ProviderError::Api { ref code, .. } if code == "104"),
            "expected Api with raw code, got {err:?}"
        );
    }
}
