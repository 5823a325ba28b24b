//! The `pixpress compress` command for batch compression.

mod report;
mod setup;

use clap::Args;
use pixpress_core::{Compressor, Config};
use std::path::PathBuf;
use std::time::Instant;

use report::{create_progress_bar, print_summary, update_progress};
use setup::build_request;

/// Arguments for the `compress` command.
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Directory tree containing the source images
    #[arg(required = true)]
    pub input: PathBuf,

    /// Directory receiving the compressed images (created if missing)
    #[arg(required = true)]
    pub output: PathBuf,

    /// Output format: webp, jpeg, jpg or png [config: defaults.format]
    #[arg(short, long, value_parser = setup::parse_format)]
    pub format: Option<String>,

    /// Encoder quality, 0-100; ignored for png [config: defaults.quality]
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: Option<u8>,

    /// Shrink images wider than this (0 = no limit)
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Shrink images taller than this (0 = no limit)
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Number of parallel workers (defaults to one per CPU)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print the result as JSON on stdout instead of a summary table
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the compress command.
pub async fn execute(args: CompressArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(workers) = args.workers {
        config.processing.parallel_workers = workers;
    }
    let request = build_request(&args, &config.defaults);
    tracing::info!(
        "Compressing {:?} -> {:?} as {} (quality {}, {} worker(s))",
        request.input_dir,
        request.output_dir,
        request.format,
        request.quality,
        config.processing.worker_count()
    );

    let compressor = Compressor::new(config);
    let progress = create_progress_bar(!args.no_progress);
    let start = Instant::now();

    let result = compressor
        .compress_with_progress(request, |p| update_progress(&progress, &p, start))
        .await;

    progress.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, start.elapsed());
    }

    if !result.success {
        anyhow::bail!("{}", result.message);
    }
    Ok(())
}
