// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "filter-camera")]
#[command(about = "Apply live image filters and keep a small gallery of captures")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available filters
    Filters,

    /// Filter an image file
    Apply {
        /// Filter id (from 'filter-camera filters')
        #[arg(short, long, default_value = "none")]
        filter: String,

        /// Image to read
        input: PathBuf,

        /// Where to write the result (format from extension)
        output: PathBuf,
    },

    /// Capture an image file into the gallery
    Capture {
        /// Filter id (default: configured default filter)
        #[arg(short, long)]
        filter: Option<String>,

        /// Image standing in for the camera frame
        input: PathBuf,
    },

    /// List captured photos, most recent first
    Gallery,

    /// Write the most recent capture to disk
    Download {
        /// Output directory (default: ~/Pictures)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove all captured photos
    Clear,

    /// Run the live filter loop over a synthetic test pattern
    Preview {
        /// Filter id
        #[arg(short, long, default_value = "none")]
        filter: String,

        /// Stop after this many frames (default: run until Ctrl+C)
        #[arg(short = 'n', long)]
        frames: Option<u64>,

        #[arg(long, default_value = "640")]
        width: u32,

        #[arg(long, default_value = "480")]
        height: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=filter_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Filters => cli::list_filters(),
        Commands::Apply {
            filter,
            input,
            output,
        } => cli::apply(&filter, &input, &output),
        Commands::Capture { filter, input } => cli::capture(&config, filter.as_deref(), &input),
        Commands::Gallery => cli::list_gallery(&config),
        Commands::Download { output } => cli::download(&config, output),
        Commands::Clear => cli::clear(&config),
        Commands::Preview {
            filter,
            frames,
            width,
            height,
        } => cli::preview(&filter, frames, width, height),
    }
}
