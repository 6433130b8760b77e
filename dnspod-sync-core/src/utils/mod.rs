//! Utility modules.

pub mod naming;
