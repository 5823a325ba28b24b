//! Error types for the pixpress compression pipeline.
//!
//! Errors come in two tiers. [`BatchError`] aborts a whole run before any image
//! is touched; [`JobError`] belongs to a single file and is recorded in the
//! batch result without affecting the other jobs.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Fatal errors that stop a batch before or during discovery.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The input directory is missing or is not a directory
    #[error("Input directory does not exist: {0}")]
    InputNotFound(PathBuf),

    /// The output directory could not be created
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the input tree failed
    #[error("Failed to scan image files in {path}: {message}")]
    DirectoryUnreadable { path: PathBuf, message: String },
}

/// Per-file errors, organized by transform stage.
#[derive(Error, Debug)]
pub enum JobError {
    /// Reading the source file's metadata failed
    #[error("Failed to stat {path}: {message}")]
    StatFailed { path: PathBuf, message: String },

    /// The source could not be decoded as an image
    #[error("Failed to decode {path}: {message}")]
    DecodeFailed { path: PathBuf, message: String },

    /// The requested output format has no encoder
    #[error("Unsupported output format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Encoding the (possibly resized) image failed
    #[error("Failed to encode {path}: {message}")]
    EncodeFailed { path: PathBuf, message: String },

    /// Writing the encoded bytes to the output directory failed
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// The blocking task running the transform panicked or was aborted
    #[error("Worker failed while processing {path}: {message}")]
    WorkerPanicked { path: PathBuf, message: String },
}

impl JobError {
    /// Path of the file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            JobError::StatFailed { path, .. }
            | JobError::DecodeFailed { path, .. }
            | JobError::UnsupportedFormat { path, .. }
            | JobError::EncodeFailed { path, .. }
            | JobError::WriteFailed { path, .. }
            | JobError::WorkerPanicked { path, .. } => path,
        }
    }
}

/// Convenience type alias for per-job results.
pub type JobResult<T> = std::result::Result<T, JobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_messages_name_the_path() {
        let err = BatchError::InputNotFound(PathBuf::from("/missing/photos"));
        assert!(err.to_string().contains("/missing/photos"));

        let err = BatchError::OutputDirCreateFailed {
            path: PathBuf::from("/ro/out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/ro/out"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_job_error_path() {
        let err = JobError::UnsupportedFormat {
            path: PathBuf::from("a.png"),
            format: "gif".to_string(),
        };
        assert_eq!(err.path(), &PathBuf::from("a.png"));
        assert!(err.to_string().contains("gif"));
    }
}
