//! Reduces per-job outcomes into the batch-level [`CompressResult`].

use tokio::sync::mpsc;

use crate::types::{CompressResult, JobOutcome};

/// Progress snapshot handed to observers after each outcome.
pub struct BatchProgress<'a> {
    /// The outcome just recorded
    pub outcome: &'a JobOutcome,
    /// Outcomes recorded so far, including this one
    pub completed: usize,
    /// Jobs in the batch
    pub total: usize,
}

/// Accumulates counts, sizes and error messages.
pub struct Aggregator {
    result: CompressResult,
    received: usize,
}

impl Aggregator {
    /// Create an aggregator for a batch of `total` jobs.
    pub fn new(total: usize) -> Self {
        Self {
            result: CompressResult {
                total_count: total,
                ..Default::default()
            },
            received: 0,
        }
    }

    /// Record a single outcome.
    pub fn record(&mut self, outcome: &JobOutcome) {
        self.received += 1;
        match outcome {
            JobOutcome::Compressed {
                original_size,
                compressed_size,
                ..
            } => {
                self.result.processed_count += 1;
                self.result.original_size += original_size;
                self.result.compressed_size += compressed_size;
            }
            JobOutcome::Failed { error, .. } => {
                self.result.errors.push(error.to_string());
            }
        }
    }

    /// Drain `outcomes` until every sender is gone and the buffer is empty,
    /// then produce the summary.
    pub async fn drain<F>(
        mut self,
        outcomes: &mut mpsc::Receiver<JobOutcome>,
        mut on_progress: F,
    ) -> CompressResult
    where
        F: FnMut(BatchProgress<'_>),
    {
        while let Some(outcome) = outcomes.recv().await {
            self.record(&outcome);
            on_progress(BatchProgress {
                outcome: &outcome,
                completed: self.received,
                total: self.result.total_count,
            });
        }
        self.finish()
    }

    /// Produce the final summary.
    pub fn finish(mut self) -> CompressResult {
        if self.received != self.result.total_count {
            tracing::error!(
                "Received {} outcome(s) for {} job(s)",
                self.received,
                self.result.total_count
            );
        }
        debug_assert_eq!(self.received, self.result.total_count);

        let result = &mut self.result;
        if result.processed_count > 0 {
            result.success = true;
            result.message = format!(
                "Compressed {}/{} images, compression ratio: {:.1}%",
                result.processed_count,
                result.total_count,
                result.compression_ratio()
            );
        } else {
            result.success = false;
            result.message = "No images were compressed".to_string();
        }
        self.result
    }
}
