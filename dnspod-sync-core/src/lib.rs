//! dnspod-sync core library
//!
//! Reconciles declared DNSPod records against the live API and snapshots
//! existing zones into declarative configuration:
//! - [`RecordReconciler`]: create / read / update / delete / adopt / apply of one record
//! - [`Exporter`]: declarative blocks plus import script per domain
//!
//! Remote access goes through the [`DnspodApi`] trait, so any implementation
//! (the HTTP client, or an in-memory fake in tests) can be plugged in.

pub mod classifier;
pub mod error;
pub mod identity;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use classifier::{Classified, classify, is_drift};
pub use dnspod_sync_provider::DnspodApi;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use identity::{IdentityCodec, RecordIdentity};
pub use services::{Exporter, RecordReconciler};
