//! Record Gateway
//!
//! Serves CRUD over a single Airtable table to a frontend.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                RECORD GATEWAY                 │
//!   GET    /record   │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   POST   /record ──┼─▶│  http    │──▶│ handlers │──▶│  remote  │──┼──▶ Airtable
//!   PUT    /record/id│  │middleware│   │          │   │  client  │  │    REST API
//!   DELETE /record/id│  └──────────┘   └────┬─────┘   └──────────┘  │
//!                    │                      │ flatten {id, ...fields}│
//!   JSON  ◀──────────┼──────────────────────┘                       │
//!                    │   config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use record_gateway::config::load_config;
use record_gateway::observability::init_logging;
use record_gateway::{AirtableClient, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "record-gateway")]
#[command(about = "REST gateway for a single Airtable table", version)]
struct Cli {
    /// Optional TOML config file. Environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding config and environment.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            tracing::error!(error = %e, "Missing Airtable API key or base id, or invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_level);
    tracing::info!("record-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        airtable = ?config.airtable,
        "Configuration loaded"
    );

    let table = match AirtableClient::new(&config.airtable) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Airtable client");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, table);
    if let Err(e) = server.run(listener, shutdown.subscribe()).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
