//! entra-tfexport - Entra ID entitlement management to Terraform
//!
//! Exports the access packages, assignment policies and assignments of one
//! catalog as Terraform variables plus an import script.

#![deny(clippy::all)]

mod auth;
mod cli;
mod config;
mod context;
mod emit;
mod error;
mod export;
mod graph;
mod import;

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use auth::OAuth2Client;
use cli::CliArgs;
use config::Config;
use context::ExportContext;
use error::AppError;
use graph::GraphClient;

fn main() {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let args = CliArgs::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", AppError::Config(format!("{:#}", e)));
            process::exit(1);
        }
    };

    init_logging(&config, args.verbose);

    info!("Starting entra-tfexport v{}", env!("CARGO_PKG_VERSION"));

    let ctx = args.into_context();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(&config, &ctx)) {
        error!("Export failed: {:#}", e);
        match e.downcast_ref::<AppError>() {
            Some(app_error) => eprintln!("Error: {}\n  {:#}", app_error.user_message(), e),
            None => eprintln!("Error: {:#}", e),
        }
        process::exit(1);
    }

    info!("entra-tfexport completed successfully");
}

/// Initialize tracing/logging.
fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Fetch, flatten, write and optionally import.
async fn run(config: &Config, ctx: &ExportContext) -> Result<()> {
    let oauth_client = OAuth2Client::new(config, ctx.credentials.clone())?;
    let access_token = oauth_client
        .acquire_token()
        .await
        .map_err(AppError::from)
        .context("Failed to acquire access token")?;

    let graph_client = GraphClient::new(config, access_token).map_err(AppError::from)?;

    println!("Fetching access packages...");
    let bundle = export::run_export(&graph_client, &ctx.catalog_id, &ctx.options)
        .await
        .map_err(AppError::from)
        .with_context(|| format!("Failed to export catalog {}", ctx.catalog_id))?;

    let report = emit::write_all(ctx, &bundle)
        .map_err(AppError::from)
        .context("Failed to write Terraform files")?;

    for path in &report.written {
        println!("✅ {} written", path.display());
    }
    for path in &report.skipped {
        println!("Skipped {} (already exists)", path.display());
    }

    if ctx.options.run_imports {
        let status = import::run_imports(ctx.out_dir(), &config.terraform)
            .map_err(AppError::from)
            .context("Failed to run Terraform imports")?;

        if status.success() {
            println!("✅ terraform import executed");
        } else {
            println!("⚠️ terraform import finished with {}", status);
        }
    }

    Ok(())
}
