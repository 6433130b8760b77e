//! `DNSPod` legacy API client (`https://dnsapi.cn`)

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};

pub(crate) use types::{
    DomainListResponse, RecordCreateResponse, RecordInfoResponse, RecordListResponse,
    StatusEnvelope,
};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dnsapi.cn";
/// Status code of a successful call.
pub(crate) const SUCCESS_CODE: &str = "1";
/// `DNSPod` API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 3000;

/// `DNSPod` client authenticated with a `login_token` (`"<id>,<token>"`).
pub struct DnspodProvider {
    pub(crate) client: Client,
    pub(crate) login_token: String,
    pub(crate) endpoint: String,
    pub(crate) max_retries: u32,
    pub(crate) page_size: u32,
}

/// `DNSPod` Provider Builder
pub struct DnspodProviderBuilder {
    login_token: String,
    endpoint: String,
    max_retries: u32,
    page_size: u32,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl DnspodProviderBuilder {
    fn new(login_token: String) -> Self {
        Self {
            login_token,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_retries: 2,
            page_size: MAX_PAGE_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the API base URL; an empty string keeps the default.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        if !endpoint.is_empty() {
            self.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Listing page size, clamped to `1..=3000`.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<DnspodProvider> {
        Ok(DnspodProvider {
            client: create_http_client(self.connect_timeout, self.request_timeout)?,
            login_token: self.login_token,
            endpoint: self.endpoint,
            max_retries: self.max_retries,
            page_size: self.page_size,
        })
    }
}

impl DnspodProvider {
    pub fn new(login_token: impl Into<String>) -> Result<Self> {
        Self::builder(login_token).build()
    }

    pub fn builder(login_token: impl Into<String>) -> DnspodProviderBuilder {
        DnspodProviderBuilder::new(login_token.into())
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
