//! Progress display and the post-run summary table.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use pixpress_core::{BatchProgress, CompressResult};

/// Create a progress bar for batch compression. The length is set from the
/// first progress event, once discovery has counted the files.
pub fn create_progress_bar(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Advance the bar for one finished file.
pub fn update_progress(pb: &ProgressBar, progress: &BatchProgress<'_>, start: Instant) {
    if pb.length() != Some(progress.total as u64) {
        pb.set_length(progress.total as u64);
    }
    pb.set_position(progress.completed as u64);

    let elapsed = start.elapsed().as_secs_f64();
    if elapsed > 0.0 {
        pb.set_message(format!("{:.1} img/sec", progress.completed as f64 / elapsed));
    }
    if let Some(message) = progress.outcome.error_message() {
        pb.suspend(|| tracing::debug!("{}", message));
    }
}

/// Print a formatted summary table after the batch.
pub fn print_summary(result: &CompressResult, elapsed: Duration) {
    for line in summary_lines(result, elapsed) {
        eprintln!("{}", line);
    }
}

fn summary_lines(result: &CompressResult, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "  ====================================".to_string(),
        "               Summary".to_string(),
        "  ====================================".to_string(),
    ];

    if result.total_count == 0 {
        lines.push(format!("    {}", result.message));
        lines.push("  ====================================".to_string());
        return lines;
    }

    let failed = result.errors.len();
    lines.push(format!("    Compressed:   {:>8}", result.processed_count));
    if failed > 0 {
        lines.push(format!("    Failed:       {:>8}", failed));
    }
    lines.push("  ------------------------------------".to_string());
    lines.push(format!("    Total:        {:>8}", result.total_count));
    lines.push(format!(
        "    Original:     {:>7.1} MB",
        result.original_size as f64 / 1_000_000.0
    ));
    lines.push(format!(
        "    Compressed:   {:>7.1} MB",
        result.compressed_size as f64 / 1_000_000.0
    ));
    lines.push(format!("    Ratio:        {:>7.1}%", result.compression_ratio()));
    lines.push(format!(
        "    Saved:        {:>7.1} MB",
        result.bytes_saved() as f64 / 1_000_000.0
    ));
    lines.push(format!("    Duration:     {:>7.1}s", elapsed.as_secs_f64()));
    lines.push("  ====================================".to_string());

    if failed > 0 {
        lines.push(String::new());
        lines.push("  Failures:".to_string());
        lines.extend(result.errors.iter().map(|e| format!("    - {}", e)));
    }
    lines
}
