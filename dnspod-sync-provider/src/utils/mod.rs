//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Lenient decoders for DNSPod's loosely typed JSON fields.
pub mod serde_helpers;
