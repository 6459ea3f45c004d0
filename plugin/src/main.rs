//! `AdminMode` Console - Main Entry Point
//!
//! Hosts the plugin behind a line-oriented console on stdin.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use adminmode::config::DataPaths;
use adminmode::console::{self, ConsoleHost};
use adminmode::AdminModePlugin;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adminmode=debug".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let paths = DataPaths::from_env();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %paths.data_dir.display(),
        "Starting AdminMode console"
    );

    let mut plugin = AdminModePlugin::load(ConsoleHost::new(), &paths)?;
    plugin.on_enable();

    // Every line is handled on this task, one at a time.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Console input closed");
                        break;
                    }
                    Err(e) => {
                        error!(error = %e, "Console read failed, shutting down");
                        break;
                    }
                };
                let flow = console::dispatch(&mut plugin, &line);
                for out in plugin.host_mut().drain_output() {
                    println!("{out}");
                }
                if flow.is_break() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, cleaning up...");
                break;
            }
        }
    }

    let result = plugin.on_disable();
    for out in plugin.host_mut().drain_output() {
        println!("{out}");
    }
    result?;

    info!("Console shutdown complete");
    Ok(())
}
