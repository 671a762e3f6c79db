//! Iris CLI — run, simulate, and inspect the animated eye.
//!
//! Usage:
//!   iris run [OPTIONS]         Draw the eye in the terminal, fed by the synthetic camera
//!   iris simulate [OPTIONS]    Headless deterministic run, printing a summary
//!   iris check                 Validate and print the effective configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "iris",
    about = "An animated eye that follows motion and blinks on its own",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the eye live in the terminal
    Run {
        /// Terminal columns used for the preview
        #[arg(long, default_value = "80")]
        cols: u32,

        /// Stop after roughly this many ticks (default: run until killed)
        #[arg(long)]
        ticks: Option<u64>,

        /// Drop every Nth camera frame (0 = never)
        #[arg(long, default_value = "0")]
        dropout_every: u64,

        /// Use a real camera device (not shipped; fails at startup)
        #[arg(long)]
        camera: bool,
    },

    /// Run headless for a fixed number of ticks and print a summary
    Simulate {
        /// Number of ticks to run
        #[arg(long, default_value = "600")]
        ticks: u64,

        /// Blink timing script: comma-separated ms values consumed as
        /// interval, then duration/interval pairs
        #[arg(long, default_value = "1000,200,2000")]
        blink_script: String,

        /// Drop every Nth camera frame (0 = never)
        #[arg(long, default_value = "0")]
        dropout_every: u64,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate and print the effective configuration
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    iris_common::logging::init_logging(&iris_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Run {
            cols,
            ticks,
            dropout_every,
            camera,
        } => commands::run::run(cols, ticks, dropout_every, camera),
        Commands::Simulate {
            ticks,
            blink_script,
            dropout_every,
            json,
        } => commands::simulate::run(ticks, &blink_script, dropout_every, json),
        Commands::Check => commands::check::run(),
    }
}
