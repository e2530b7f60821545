// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textburst - bulk SMS dispatch service.
//!
//! This is the binary entry point. The HTTP layer of the wider platform
//! calls the same crates this CLI does; the CLI exists for operations and
//! local testing.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use clap::{Parser, Subcommand};
use textburst_config::TextburstConfig;
use tracing_subscriber::EnvFilter;

/// Textburst - bulk SMS dispatch service.
#[derive(Parser, Debug)]
#[command(name = "textburst", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch a message to one or more destinations.
    Send {
        /// Destination phone number in E.164 form; repeatable.
        #[arg(long = "to", required = true)]
        to: Vec<String>,

        /// Message body (one SMS segment, at most 160 characters).
        #[arg(long)]
        body: String,

        /// Owning user id. Omit for a dry run that persists nothing.
        #[arg(long)]
        user: Option<i64>,
    },
    /// Resend a message to its previously-failed recipients.
    Resend {
        /// Id of the original message.
        message_id: i64,

        /// Owning user id.
        #[arg(long)]
        user: i64,
    },
    /// Show the active carrier and its health.
    Status,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match textburst_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            textburst_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let result = match cli.command {
        Commands::Send { to, body, user } => commands::send(&config, to, body, user).await,
        Commands::Resend { message_id, user } => commands::resend(&config, message_id, user).await,
        Commands::Status => commands::status(&config).await,
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        eprintln!("textburst: {e}");
        std::process::exit(1);
    }
}

/// Install the global tracing subscriber, honoring `RUST_LOG` over the
/// configured level.
fn init_tracing(config: &TextburstConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.app.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn default_config_is_usable() {
        // Defaults alone must give a runnable configuration (mock carrier).
        let config = textburst_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.carrier.provider, "mock");
    }
}
