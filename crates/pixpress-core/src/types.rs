//! Core data types for the pixpress compression pipeline.
//!
//! [`CompressRequest`] and [`CompressResult`] cross the library boundary and
//! serialize in camelCase. [`Job`] and [`JobOutcome`] live only for the
//! duration of one run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::JobError;

/// A batch compression request.
///
/// Shared read-only across workers once dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressRequest {
    /// Root of the directory tree to compress
    pub input_dir: PathBuf,

    /// Directory receiving the re-encoded files (created if absent)
    pub output_dir: PathBuf,

    /// Target format ("webp", "jpeg", "jpg" or "png")
    pub format: String,

    /// Encoder quality from 0 to 100 (ignored for png)
    pub quality: u8,

    /// Maximum output width in pixels (0 = unconstrained)
    #[serde(default)]
    pub max_width: u32,

    /// Maximum output height in pixels (0 = unconstrained)
    #[serde(default)]
    pub max_height: u32,
}

/// One file's unit of work.
#[derive(Debug, Clone)]
pub struct Job {
    /// The discovered source image
    pub source: PathBuf,

    /// The request this job belongs to
    pub request: Arc<CompressRequest>,
}

/// The terminal record for one [`Job`].
#[derive(Debug)]
pub enum JobOutcome {
    /// The file was decoded, optionally resized, and written to `output`
    Compressed {
        source: PathBuf,
        output: PathBuf,
        original_size: u64,
        compressed_size: u64,
    },

    /// The file could not be compressed
    Failed { source: PathBuf, error: JobError },
}

impl JobOutcome {
    /// Whether the job produced an output file.
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Compressed { .. })
    }

    /// Path of the source image.
    pub fn source(&self) -> &PathBuf {
        match self {
            JobOutcome::Compressed { source, .. } | JobOutcome::Failed { source, .. } => source,
        }
    }

    /// Error message for failed jobs, `None` on success.
    pub fn error_message(&self) -> Option<String> {
        match self {
            JobOutcome::Compressed { .. } => None,
            JobOutcome::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

/// The aggregate result of a batch, the only artifact returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressResult {
    /// True when at least one file was compressed
    pub success: bool,

    /// Human-readable summary or fatal error
    pub message: String,

    /// Number of successfully compressed files
    pub processed_count: usize,

    /// Number of files discovered
    pub total_count: usize,

    /// One message per failed file
    pub errors: Vec<String>,

    /// Summed source size of compressed files, in bytes
    pub original_size: u64,

    /// Summed output size of compressed files, in bytes
    pub compressed_size: u64,
}

impl CompressResult {
    /// Result for a batch that was aborted before any file was processed.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Output size as a percentage of the original size.
    ///
    /// Returns 0.0 when nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size as f64 / self.original_size as f64 * 100.0
    }

    /// Bytes saved across all compressed files (negative if outputs grew).
    pub fn bytes_saved(&self) -> i64 {
        self.original_size as i64 - self.compressed_size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_json_uses_camel_case() {
        let json = r#"{
            "inputDir": "/in",
            "outputDir": "/out",
            "format": "webp",
            "quality": 80,
            "maxWidth": 1920
        }"#;
        let req: CompressRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.input_dir, PathBuf::from("/in"));
        assert_eq!(req.max_width, 1920);
        assert_eq!(req.max_height, 0);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = CompressResult {
            success: true,
            message: "ok".to_string(),
            processed_count: 2,
            total_count: 3,
            errors: vec!["bad".to_string()],
            original_size: 300,
            compressed_size: 100,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"processedCount\":2"));
        assert!(json.contains("\"totalCount\":3"));
        assert!(json.contains("\"compressedSize\":100"));
    }

    #[test]
    fn test_compression_ratio() {
        let result = CompressResult {
            original_size: 600_000,
            compressed_size: 150_000,
            ..Default::default()
        };
        assert!((result.compression_ratio() - 25.0).abs() < f64::EPSILON);
        assert_eq!(result.bytes_saved(), 450_000);
        assert_eq!(CompressResult::default().compression_ratio(), 0.0);
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = JobOutcome::Compressed {
            source: PathBuf::from("a.jpg"),
            output: PathBuf::from("out/a.webp"),
            original_size: 10,
            compressed_size: 5,
        };
        assert!(ok.is_success());
        assert!(ok.error_message().is_none());

        let failed = JobOutcome::Failed {
            source: PathBuf::from("b.png"),
            error: JobError::DecodeFailed {
                path: PathBuf::from("b.png"),
                message: "corrupt".to_string(),
            },
        };
        assert!(!failed.is_success());
        assert_eq!(failed.source(), &PathBuf::from("b.png"));
        assert!(failed.error_message().unwrap().contains("corrupt"));
    }
}
