// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! StudyMatch - study partner matching and recommendation engine.
//!
//! This is the binary entry point. Results print as JSON on stdout;
//! diagnostics go to stderr.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use studymatch_core::types::UserId;

/// StudyMatch - study partner matching and recommendation engine.
#[derive(Parser, Debug)]
#[command(name = "studymatch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SwipeDecision {
    Like,
    Pass,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank candidate study partners for a user.
    Recommend { user: UserId },
    /// Record a like or pass on another user.
    Swipe {
        user: UserId,
        target: UserId,
        decision: SwipeDecision,
    },
    /// List all match records involving a user.
    Matches { user: UserId },
    /// Distance between two users.
    Distance { user: UserId, other: UserId },
    /// Students near a user, nearest first.
    Nearby {
        user: UserId,
        /// Search radius in km (default 5).
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Free 2-hour study slots for a user within a date range.
    Slots {
        user: UserId,
        /// Range start, e.g. 2026-01-15T08:00.
        start: String,
        /// Range end, e.g. 2026-01-22T22:00.
        end: String,
    },
    /// Slots free for both users within a date range.
    CommonSlots {
        user: UserId,
        other: UserId,
        start: String,
        end: String,
    },
    /// Free slots at preferred session hours.
    SuggestTimes {
        user: UserId,
        start: String,
        end: String,
    },
    /// AI-generated study recommendations for the user's open slots.
    StudyPlan {
        user: UserId,
        start: String,
        end: String,
    },
    /// Load profiles from a JSON file into the local store.
    ImportProfiles { file: std::path::PathBuf },
    /// Load calendar events from a JSON file into the local store.
    ImportEvents { file: std::path::PathBuf },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match studymatch_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            studymatch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.engine.log_level);

    let Some(command) = cli.command else {
        println!("studymatch: use --help for available commands");
        return;
    };

    if let Err(e) = commands::run(command, &config).await {
        eprintln!("studymatch: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("studymatch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
