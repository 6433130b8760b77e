//! # dnspod-sync-provider
//!
//! Async client for the legacy `DNSPod` API (`https://dnsapi.cn`), covering
//! what `dnspod-sync` needs: listing domains and records, record CRUD and
//! record remarks.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnspod_sync_provider::{DnspodApi, DnspodProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DnspodProvider::new("12345,abcdef0123456789")?;
//!
//!     for domain in provider.list_domains().await? {
//!         for record in provider.list_records(&domain.id).await? {
//!             println!("{} {} {} -> {}", domain.name, record.sub_domain, record.record_type, record.value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, ProviderError>`](ProviderError). A
//! non-success API status keeps its raw code in [`ProviderError::Api`], so
//! callers decide what e.g. code `"8"` (unknown record id) means for them.
//!
//! Transient errors (`NetworkError`, `Timeout`, HTTP 429) are retried with
//! exponential backoff, up to [`DnspodProviderBuilder::max_retries`] times.

mod dnspod;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use error::{PROVIDER_NAME, ProviderError, Result};

pub use traits::DnspodApi;

pub use types::{
    DEFAULT_RECORD_LINE, DISABLED_FLAG, Domain, ENABLED_FLAG, Record, RecordPayload, RecordType,
};

pub use dnspod::{DEFAULT_ENDPOINT, DnspodProvider, DnspodProviderBuilder};
