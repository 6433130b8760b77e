//! dnspod-sync command line
//!
//! Exports DNSPod zones to declarative config plus import scripts, and keeps
//! single records in sync with JSON spec and state files.

mod cli;
mod commands;
mod state;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use dnspod_sync_core::{DnspodApi, IdentityCodec, RecordReconciler};
use dnspod_sync_provider::DnspodProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, ConnectionArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 日志输出到 stderr，stdout 留给命令结果
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let api = connect(&cli.connection)?;

    match cli.command {
        Commands::Export {
            domain,
            output,
            concurrency,
        } => commands::export::run(api, domain.as_deref(), &output, concurrency).await,
        Commands::Import { identity, state } => {
            let reconciler = RecordReconciler::new(api, IdentityCodec::new());
            commands::record::import(&reconciler, &identity, &state).await
        }
        Commands::Apply { desired, state } => {
            let reconciler = RecordReconciler::new(api, IdentityCodec::new());
            commands::record::apply(&reconciler, &desired, &state).await
        }
        Commands::Destroy { state } => {
            let reconciler = RecordReconciler::new(api, IdentityCodec::new());
            commands::record::destroy(&reconciler, &state).await
        }
    }
}

fn connect(args: &ConnectionArgs) -> Result<Arc<dyn DnspodApi>> {
    let provider = DnspodProvider::builder(args.login_token.clone())
        .endpoint(args.endpoint.clone())
        .max_retries(args.max_retries)
        .request_timeout(Duration::from_secs(args.timeout))
        .build()?;
    tracing::debug!("Using DNSPod endpoint {}", provider.endpoint());
    Ok(Arc::new(provider))
}
