//! pixpress CLI - batch image compression for whole directory trees.
//!
//! pixpress re-encodes every supported image under an input directory into a
//! single target format, optionally fitting each one into a bounding box, and
//! reports per-file failures alongside the overall size savings.
//!
//! # Usage
//!
//! ```bash
//! # Convert a photo library to WebP at quality 80
//! pixpress compress ./photos ./photos-web --format webp --quality 80
//!
//! # Shrink everything to fit 1920x1080 JPEGs, printing the result as JSON
//! pixpress compress ./photos ./out -f jpeg --max-width 1920 --max-height 1080 --json
//!
//! # List output formats
//! pixpress formats
//!
//! # View configuration
//! pixpress config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// pixpress - Batch image compression for whole directory trees.
#[derive(Parser, Debug)]
#[command(name = "pixpress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress every supported image in a directory tree
    Compress(cli::compress::CompressArgs),

    /// List the supported output formats
    Formats,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match pixpress_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `pixpress config path`."
            );
            pixpress_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("pixpress v{}", pixpress_core::VERSION);

    match cli.command {
        Commands::Compress(args) => cli::compress::execute(args, config).await,
        Commands::Formats => {
            for format in pixpress_core::Compressor::supported_formats() {
                println!("{}", format);
            }
            Ok(())
        }
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
