//! 业务逻辑服务层

mod exporter;
mod record_reconciler;

pub use exporter::{DEFAULT_EXPORT_CONCURRENCY, Exporter, render_domain};
pub use record_reconciler::RecordReconciler;
