//! Shared HTTP plumbing
//!
//! Sends a prepared request, classifies transport failures, and retries the
//! transient ones. Parsing the DNSPod status envelope is left to the caller.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{PROVIDER_NAME, ProviderError};
use crate::utils::log_sanitizer::truncate_for_log;

/// 默认连接超时（秒）
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// DNSPod rejects requests without a descriptive User-Agent.
const USER_AGENT: &str = concat!("dnspod-sync/", env!("CARGO_PKG_VERSION"));

/// 创建带超时配置的 HTTP Client
pub(crate) fn create_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, ProviderError> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send one request and return `(status_code, body)`.
    ///
    /// HTTP 429 becomes `RateLimited`, 502-504 become `NetworkError`; any
    /// other status is handed back with its body, since DNSPod reports its
    /// own failures inside a 200 response.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{PROVIDER_NAME}] POST {action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{PROVIDER_NAME}] {action} response status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{PROVIDER_NAME}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{PROVIDER_NAME}] Server error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{PROVIDER_NAME}] {action} response body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON body, logging a truncated copy on failure.
    pub fn parse_json<T>(response_text: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{PROVIDER_NAME}] JSON parse failed: {e}");
            log::error!(
                "[{PROVIDER_NAME}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) with retries.
    ///
    /// Only transient errors are retried (see [`ProviderError::is_retryable`]),
    /// with backoff 100ms, 200ms, 400ms, ... capped at 10s, or the server's
    /// `Retry-After` capped at 30s.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        action: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, action).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{PROVIDER_NAME}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, action).await;
            };

            match Self::execute_request(req, action).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        PROVIDER_NAME,
                        action,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
