//! Type definitions

mod export;
mod record;

pub use export::{AdoptInstruction, DomainExport, ResourceKind};
pub use record::{
    ApplyOutcome, DEFAULT_TTL, DeleteOutcome, ReadOutcome, RecordResource, RecordSpec,
    RecordStatus, UpdateOutcome,
};

// Re-export provider types used in the public API
pub use dnspod_sync_provider::{DEFAULT_RECORD_LINE, Domain, Record, RecordType};
