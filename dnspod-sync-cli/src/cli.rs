//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dnspod_sync_core::services::DEFAULT_EXPORT_CONCURRENCY;
use dnspod_sync_provider::DEFAULT_ENDPOINT;

#[derive(Debug, Parser)]
#[command(name = "dnspod-sync")]
#[command(about = "Export DNSPod zones and reconcile DNSPod records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach the DNSPod API.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// DNSPod login token, `<id>,<token>`
    #[arg(long, env = "DNSPOD_LOGIN_TOKEN", hide_env_values = true)]
    pub login_token: String,

    /// API base URL
    #[arg(long, env = "DNSPOD_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Retries for transient network failures
    #[arg(long, default_value_t = 2)]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write declarative config and an import script for existing domains
    Export {
        /// Only export this domain (e.g. example.com)
        #[arg(long)]
        domain: Option<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Domains whose records are listed at the same time
        #[arg(long, default_value_t = DEFAULT_EXPORT_CONCURRENCY)]
        concurrency: usize,
    },

    /// Start tracking an existing record in a state file
    Import {
        /// Record identity, `<domain_id>:<record_id>`
        identity: String,

        /// State file to write
        #[arg(long)]
        state: PathBuf,
    },

    /// Create or update a record so it matches a desired spec
    Apply {
        /// JSON record spec
        #[arg(long)]
        desired: PathBuf,

        /// State file (created when missing)
        #[arg(long)]
        state: PathBuf,
    },

    /// Delete the tracked record
    Destroy {
        /// State file
        #[arg(long)]
        state: PathBuf,
    },
}
