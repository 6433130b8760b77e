//! Subcommand implementations

pub mod export;
pub mod record;
