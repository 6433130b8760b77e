//! `DNSPod` 表单请求

use serde::de::DeserializeOwned;

use crate::error::{PROVIDER_NAME, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::redact_form;

use super::{DnspodProvider, SUCCESS_CODE, StatusEnvelope};

impl DnspodProvider {
    /// POST `fields` to `{endpoint}/{action}` and decode the body as `T`.
    ///
    /// Authentication and the common parameters are appended here. A status
    /// other than `"1"` is mapped through [`ProviderErrorMapper`] before `T`
    /// is looked at, so `T` only needs to describe the success shape.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        action: &str,
        fields: Vec<(String, String)>,
    ) -> Result<T> {
        let mut form = fields;
        form.extend([
            ("login_token".to_string(), self.login_token.clone()),
            ("format".to_string(), "json".to_string()),
            ("lang".to_string(), "en".to_string()),
            ("error_on_empty".to_string(), "no".to_string()),
        ]);

        log::debug!("[{PROVIDER_NAME}] {action} form: {}", redact_form(&form));

        let url = format!("{}/{action}", self.endpoint);
        let request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .form(&form);

        let (_status, response_text) =
            HttpUtils::execute_request_with_retry(request, action, self.max_retries).await?;

        let envelope: StatusEnvelope = HttpUtils::parse_json(&response_text)?;
        if envelope.status.code != SUCCESS_CODE {
            log::error!(
                "[{PROVIDER_NAME}] {action} returned status {}: {}",
                envelope.status.code,
                envelope.status.message
            );
            return Err(self.map_error(RawApiError::new(
                action,
                envelope.status.code,
                envelope.status.message,
            )));
        }

        HttpUtils::parse_json(&response_text)
    }
}
