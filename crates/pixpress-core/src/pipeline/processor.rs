//! Batch orchestration - wires discovery, the worker pool and aggregation.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::BatchError;
use crate::types::{CompressRequest, CompressResult, Job};

use super::aggregate::BatchProgress;
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::encode::SUPPORTED_FORMATS;
use super::pool::WorkerPool;
use super::transform::run_job;

/// Runs compression batches with a fixed configuration.
pub struct Compressor {
    config: Config,
    discovery: FileDiscovery,
}

impl Compressor {
    /// Create a new compressor with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            discovery: FileDiscovery::new(config.processing.clone()),
            config,
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output formats accepted in [`CompressRequest::format`].
    pub fn supported_formats() -> &'static [&'static str] {
        SUPPORTED_FORMATS
    }

    /// Compress every supported image under `request.input_dir`.
    ///
    /// Resolves only after the whole batch has finished. Fatal problems
    /// (missing input, uncreatable output, unreadable tree) come back as an
    /// unsuccessful result with no files processed.
    pub async fn compress(&self, request: CompressRequest) -> CompressResult {
        self.compress_with_progress(request, |_| {}).await
    }

    /// Like [`compress`](Self::compress), calling `on_progress` after each
    /// file finishes.
    pub async fn compress_with_progress<P>(
        &self,
        request: CompressRequest,
        on_progress: P,
    ) -> CompressResult
    where
        P: FnMut(BatchProgress<'_>),
    {
        let start = Instant::now();
        match self.run(request, on_progress).await {
            Ok(result) => {
                tracing::info!("{} in {:.1?}", result.message, start.elapsed());
                result
            }
            Err(e) => {
                tracing::error!("{}", e);
                CompressResult::aborted(e.to_string())
            }
        }
    }

    /// Check preconditions and list the batch's source files.
    ///
    /// Creates `request.output_dir` if it does not exist.
    pub fn prepare(&self, request: &CompressRequest) -> Result<Vec<DiscoveredFile>, BatchError> {
        prepare_batch(&self.discovery, request)
    }

    /// [`prepare`](Self::prepare) on the blocking pool, so a large tree walk
    /// does not stall the runtime.
    pub async fn prepare_blocking(
        &self,
        request: &CompressRequest,
    ) -> Result<Vec<DiscoveredFile>, BatchError> {
        let discovery = self.discovery.clone();
        let scan_request = request.clone();
        tokio::task::spawn_blocking(move || prepare_batch(&discovery, &scan_request))
            .await
            .map_err(|e| BatchError::DirectoryUnreadable {
                path: request.input_dir.clone(),
                message: format!("Scan task failed: {}", e),
            })?
    }

    async fn run<P>(
        &self,
        request: CompressRequest,
        on_progress: P,
    ) -> Result<CompressResult, BatchError>
    where
        P: FnMut(BatchProgress<'_>),
    {
        let files = self.prepare_blocking(&request).await?;
        if files.is_empty() {
            tracing::warn!("No supported image files found at {:?}", request.input_dir);
            return Ok(CompressResult::aborted("No supported image files found"));
        }

        let total_bytes = FileDiscovery::total_size(&files);
        tracing::info!(
            "Found {} image(s) ({:.1} MB) to compress into {:?} as {}",
            files.len(),
            total_bytes as f64 / 1_000_000.0,
            request.output_dir,
            request.format
        );

        let jobs = make_jobs(files, request);
        let pool = WorkerPool::new(
            self.config.processing.worker_count(),
            self.config.pipeline.clone(),
        );
        Ok(pool.run(jobs, Arc::new(run_job), on_progress).await)
    }
}

fn prepare_batch(
    discovery: &FileDiscovery,
    request: &CompressRequest,
) -> Result<Vec<DiscoveredFile>, BatchError> {
    if !request.input_dir.is_dir() {
        return Err(BatchError::InputNotFound(request.input_dir.clone()));
    }

    std::fs::create_dir_all(&request.output_dir).map_err(|source| {
        BatchError::OutputDirCreateFailed {
            path: request.output_dir.clone(),
            source,
        }
    })?;

    discovery.discover(&request.input_dir)
}

/// Wrap each discovered file in a job sharing one read-only request.
fn make_jobs(files: Vec<DiscoveredFile>, request: CompressRequest) -> Vec<Job> {
    let request = Arc::new(request);
    files
        .into_iter()
        .map(|file| Job {
            source: file.path,
            request: Arc::clone(&request),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn request(input: &Path, output: &Path) -> CompressRequest {
        CompressRequest {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            format: "png".to_string(),
            quality: 80,
            max_width: 0,
            max_height: 0,
        }
    }

    #[test]
    fn test_supported_formats() {
        assert_eq!(
            Compressor::supported_formats(),
            &["webp", "jpeg", "jpg", "png"]
        );
    }

    #[test]
    fn test_make_jobs_shares_request() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.png"),
                size: 1,
            },
            DiscoveredFile {
                path: PathBuf::from("b.png"),
                size: 2,
            },
        ];
        let jobs = make_jobs(files, request(Path::new("/in"), Path::new("/out")));
        assert_eq!(jobs.len(), 2);
        assert!(Arc::ptr_eq(&jobs[0].request, &jobs[1].request));
    }

    #[test]
    fn test_prepare_rejects_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = Compressor::new(Config::default());
        let err = compressor
            .prepare(&request(&dir.path().join("missing"), &dir.path().join("out")))
            .unwrap_err();
        assert!(matches!(err, BatchError::InputNotFound(_)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_prepare_rejects_file_as_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.png");
        std::fs::write(&file, b"x").unwrap();

        let compressor = Compressor::new(Config::default());
        let err = compressor
            .prepare(&request(&file, &dir.path().join("out")))
            .unwrap_err();
        assert!(matches!(err, BatchError::InputNotFound(_)));
    }

    #[test]
    fn test_prepare_creates_output_dir_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a/b/c");
        let compressor = Compressor::new(Config::default());
        let files = compressor.prepare(&request(dir.path(), &out)).unwrap();
        assert!(files.is_empty());
        assert!(out.is_dir());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_prepare_blocking_lists_files() {
        let input = tempfile::tempdir().unwrap();
        let out = input.path().join("out");
        std::fs::write(input.path().join("a.png"), b"x").unwrap();
        std::fs::write(input.path().join("b.txt"), b"x").unwrap();

        let compressor = Compressor::new(Config::default());
        let files = compressor
            .prepare_blocking(&request(input.path(), &out))
            .await
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("a.png"));
        assert!(out.is_dir());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_prepare_blocking_keeps_fatal_errors() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = Compressor::new(Config::default());
        let err = compressor
            .prepare_blocking(&request(&dir.path().join("missing"), dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::InputNotFound(_)));
    }

    #[test]
    fn test_prepare_output_dir_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let compressor = Compressor::new(Config::default());
        let err = compressor
            .prepare(&request(dir.path(), &blocker.join("sub")))
            .unwrap_err();
        assert!(matches!(err, BatchError::OutputDirCreateFailed { .. }));
    }
}
