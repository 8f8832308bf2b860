use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use msgwall_kernel::config::WallConfig;
use msgwall_kernel::handler::{Method, Request, WallHandler};
use msgwall_kernel::wall::shared_fs::SharedFsStore;

/// Message Wall CLI
#[derive(Parser, Debug)]
#[command(name = "msgwall")]
#[command(about = "Shared message wall over a filesystem mount", long_about = None)]
struct Cli {
    /// Path to config JSON (defaults to environment + built-ins)
    #[arg(long)]
    config: Option<String>,

    /// Override the shared mount root
    #[arg(long)]
    mount: Option<PathBuf>,

    /// Version identifier reported in response envelopes
    #[arg(long, default_value = "cli")]
    version: String,

    #[command(subcommand)]
    request: RequestCommand,
}

#[derive(Subcommand, Debug)]
enum RequestCommand {
    /// Read the full message history
    Get,
    /// Append a message, then read back the history
    Post {
        /// Message text
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete all messages
    Delete,
    /// Dispatch an arbitrary method name
    Send { method: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ----------------------------
    // Load configuration
    // ----------------------------
    let mut config = if let Some(path) = cli.config {
        let data = fs::read_to_string(path)?;
        serde_json::from_str::<WallConfig>(&data)?
    } else {
        WallConfig::from_env()
    };

    if let Some(mount) = cli.mount {
        config.wall_path = mount.join("message-wall");
        config.mount_root = mount;
    }

    // ----------------------------
    // Logging
    // ----------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    if config.external_stop {
        tracing::warn!("external stop flag is set; it has no effect on dispatch");
    }

    // ----------------------------
    // Build the request
    // ----------------------------
    let request = match cli.request {
        RequestCommand::Get => Request {
            method: Method::Get,
            body: None,
        },
        RequestCommand::Post { body } => Request {
            method: Method::Post,
            body,
        },
        RequestCommand::Delete => Request {
            method: Method::Delete,
            body: None,
        },
        RequestCommand::Send { method } => Request {
            method: Method::parse(&method),
            body: None,
        },
    };

    // ----------------------------
    // Run one invocation
    // ----------------------------
    let store = SharedFsStore::new(config.wall_path.clone());
    let handler = WallHandler::new(store, config, cli.version);

    let response = handler.handle(&request);

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
