//! Fixed-size worker pool: fan jobs out, fan outcomes back in.
//!
//! ```text
//! producer ──► job queue ──► worker × W ──► outcome channel ──► aggregator
//!                              │
//!                              └── barrier: awaits every worker, then
//!                                  drops the last outcome sender
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::config::PipelineConfig;
use crate::error::JobError;
use crate::types::{CompressResult, Job, JobOutcome};

use super::aggregate::{Aggregator, BatchProgress};
use super::channel::{feed_jobs, job_queue, outcome_channel};

/// A pool of `workers` tasks, each running one job at a time.
pub struct WorkerPool {
    workers: usize,
    config: PipelineConfig,
}

impl WorkerPool {
    /// Create a pool. A worker count of 0 is treated as 1.
    pub fn new(workers: usize, config: PipelineConfig) -> Self {
        Self {
            workers: workers.max(1),
            config,
        }
    }

    /// Number of workers the pool will start.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every job through `transform` and aggregate the outcomes.
    ///
    /// Resolves once each job has produced exactly one outcome and the
    /// outcome channel has been closed by the barrier.
    pub async fn run<F, P>(
        &self,
        jobs: Vec<Job>,
        transform: Arc<F>,
        on_progress: P,
    ) -> CompressResult
    where
        F: Fn(&Job) -> JobOutcome + Send + Sync + 'static,
        P: FnMut(BatchProgress<'_>),
    {
        let total = jobs.len();
        let (job_tx, job_rx) = job_queue(&self.config);
        let (outcome_tx, mut outcome_rx) = outcome_channel(&self.config);

        tracing::debug!("Starting {} worker(s) for {} job(s)", self.workers, total);
        let barrier = self.spawn_workers(job_rx, outcome_tx, transform);
        let producer = tokio::spawn(feed_jobs(job_tx, jobs));

        let result = Aggregator::new(total).drain(&mut outcome_rx, on_progress).await;

        match producer.await {
            Ok(sent) if sent < total => {
                tracing::error!("Only {}/{} job(s) were enqueued", sent, total)
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Job producer failed: {}", e),
        }
        if let Err(e) = barrier.await {
            tracing::error!("Worker barrier failed: {}", e);
        }
        result
    }

    /// Start the workers behind a completion barrier.
    ///
    /// The barrier task owns the original outcome sender and releases it only
    /// after every worker has exited, so the aggregator cannot observe a
    /// closed channel while an outcome is still in flight.
    fn spawn_workers<F>(
        &self,
        jobs: async_channel::Receiver<Job>,
        outcomes: mpsc::Sender<JobOutcome>,
        transform: Arc<F>,
    ) -> JoinHandle<usize>
    where
        F: Fn(&Job) -> JobOutcome + Send + Sync + 'static,
    {
        let mut set = JoinSet::new();
        for id in 0..self.workers {
            set.spawn(worker_loop(
                id,
                jobs.clone(),
                outcomes.clone(),
                Arc::clone(&transform),
            ));
        }
        drop(jobs);

        tokio::spawn(async move {
            let mut handled = 0;
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(n) => handled += n,
                    Err(e) => tracing::error!("Worker task failed: {}", e),
                }
            }
            drop(outcomes);
            tracing::debug!("All workers finished ({} job(s) handled)", handled);
            handled
        })
    }
}

/// Take jobs until the queue is closed and empty.
async fn worker_loop<F>(
    id: usize,
    jobs: async_channel::Receiver<Job>,
    outcomes: mpsc::Sender<JobOutcome>,
    transform: Arc<F>,
) -> usize
where
    F: Fn(&Job) -> JobOutcome + Send + Sync + 'static,
{
    let mut handled = 0;
    while let Ok(job) = jobs.recv().await {
        let source = job.source.clone();
        let transform = Arc::clone(&transform);

        // CPU-bound decode/encode runs on the blocking pool
        let outcome = match tokio::task::spawn_blocking(move || (*transform)(&job)).await {
            Ok(outcome) => outcome,
            Err(e) => JobOutcome::Failed {
                source: source.clone(),
                error: JobError::WorkerPanicked {
                    path: source,
                    message: e.to_string(),
                },
            },
        };

        if let JobOutcome::Failed { error, .. } = &outcome {
            tracing::warn!("Failed: {}", error);
        }

        handled += 1;
        if outcomes.send(outcome).await.is_err() {
            tracing::error!("Worker {}: outcome channel closed, stopping", id);
            break;
        }
    }
    tracing::trace!("Worker {} exiting after {} job(s)", id, handled);
    handled
}
