//! imageslicer CLI - Command-line interface
//!
//! This binary provides a command-line interface to the imageslicer library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::common::{BackendType, Overrides};
use commands::config::ConfigCommands;
use commands::slice::SliceArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "imageslicer")]
#[command(version = imageslicer::VERSION)]
#[command(about = "Cut an image into a grid of JPEG tiles and publish them", long_about = None)]
struct Cli {
    /// Enable debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    /// Also print log output to stdout
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice an image into tiles and upload them
    Slice {
        /// URL of the source image
        #[arg(long)]
        image_url: String,

        /// Tiles per side (default from config, normally 4)
        #[arg(long)]
        grid_size: Option<u32>,

        /// Pixels trimmed from every side of each tile
        #[arg(long)]
        border_inset: Option<u32>,

        /// Storage backend (default from config)
        #[arg(long, value_enum)]
        backend: Option<BackendType>,

        /// GCS bucket for the gcs backend
        #[arg(long)]
        bucket: Option<String>,

        /// Output directory; selects the directory backend unless --backend is given
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Base URL for returned tile URLs
        #[arg(long)]
        public_base_url: Option<String>,

        /// Uploads in flight at once (1 = strictly in order)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Slice {
            image_url,
            grid_size,
            border_inset,
            backend,
            bucket,
            output_dir,
            public_base_url,
            concurrency,
            json,
        } => commands::slice::run(SliceArgs {
            image_url,
            grid_size,
            border_inset,
            overrides: Overrides {
                backend,
                bucket,
                output_dir,
                public_base_url,
                concurrency,
            },
            json,
            debug: cli.debug,
            verbose: cli.verbose,
        }),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
