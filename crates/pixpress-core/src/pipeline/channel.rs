//! Bounded channels connecting the pipeline stages.
//!
//! Jobs flow through a multi-consumer queue (one producer, many workers);
//! outcomes flow back through a multi-producer channel (many workers, one
//! aggregator). Both are bounded by `pipeline.buffer_size`, so a slow stage
//! applies backpressure instead of buffering the whole batch.

use tokio::sync::mpsc;

use crate::config::PipelineConfig;
use crate::types::{Job, JobOutcome};

/// Create the job queue shared by all workers.
pub fn job_queue(
    config: &PipelineConfig,
) -> (async_channel::Sender<Job>, async_channel::Receiver<Job>) {
    async_channel::bounded(config.buffer_size)
}

/// Create the outcome channel drained by the aggregator.
pub fn outcome_channel(
    config: &PipelineConfig,
) -> (mpsc::Sender<JobOutcome>, mpsc::Receiver<JobOutcome>) {
    mpsc::channel(config.buffer_size)
}

/// Producer side of the job queue.
///
/// Enqueues every job and closes the queue only after the last one is in,
/// so workers observe closure exactly when the batch is exhausted.
pub async fn feed_jobs<I>(sender: async_channel::Sender<Job>, jobs: I) -> usize
where
    I: IntoIterator<Item = Job>,
{
    let mut sent = 0;
    for job in jobs {
        if sender.send(job).await.is_err() {
            // All workers are gone; nothing left to feed
            tracing::error!("Job queue closed after {} job(s)", sent);
            break;
        }
        sent += 1;
    }
    sender.close();
    sent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompressRequest;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn jobs(n: usize) -> Vec<Job> {
        let request = Arc::new(CompressRequest {
            input_dir: PathBuf::from("/in"),
            output_dir: PathBuf::from("/out"),
            format: "png".to_string(),
            quality: 80,
            max_width: 0,
            max_height: 0,
        });
        (0..n)
            .map(|i| Job {
                source: PathBuf::from(format!("/in/{}.png", i)),
                request: Arc::clone(&request),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_feed_jobs_closes_queue_after_last_job() {
        let config = PipelineConfig { buffer_size: 2 };
        let (tx, rx) = job_queue(&config);

        let producer = tokio::spawn(feed_jobs(tx, jobs(5)));

        let mut received = Vec::new();
        while let Ok(job) = rx.recv().await {
            received.push(job.source);
        }
        assert_eq!(producer.await.unwrap(), 5);
        assert_eq!(received.len(), 5);
        assert!(rx.is_closed());
    }

    #[tokio::test]
    async fn test_feed_jobs_stops_when_consumers_are_gone() {
        let config = PipelineConfig { buffer_size: 1 };
        let (tx, rx) = job_queue(&config);
        drop(rx);

        assert_eq!(feed_jobs(tx, jobs(3)).await, 0);
    }

    #[tokio::test]
    async fn test_outcome_channel_is_bounded() {
        let config = PipelineConfig { buffer_size: 3 };
        let (tx, _rx) = outcome_channel(&config);
        assert_eq!(tx.max_capacity(), 3);
    }
}
