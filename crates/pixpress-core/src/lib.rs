//! pixpress Core - Embeddable batch image compression library.
//!
//! pixpress walks a directory tree, re-encodes every supported image into a
//! target format, optionally fitting it into a bounding box, and reports what
//! happened to each file.
//!
//! # Architecture
//!
//! ```text
//! Discover → Job queue → Workers (Decode → Resize → Encode → Write) → Aggregate
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pixpress_core::{CompressRequest, Compressor, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let compressor = Compressor::new(Config::load().unwrap_or_default());
//!     let result = compressor
//!         .compress(CompressRequest {
//!             input_dir: "./photos".into(),
//!             output_dir: "./photos-web".into(),
//!             format: "webp".to_string(),
//!             quality: 80,
//!             max_width: 1920,
//!             max_height: 0,
//!         })
//!         .await;
//!     println!("{}", result.message);
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BatchError, ConfigError, JobError, JobResult};
pub use pipeline::{BatchProgress, Codec, Compressor, DiscoveredFile, FitBox, SUPPORTED_FORMATS};
pub use types::{CompressRequest, CompressResult, Job, JobOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
