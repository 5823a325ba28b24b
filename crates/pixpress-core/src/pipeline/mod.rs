//! Batch compression pipeline components.
//!
//! This module contains all the stages of a compression run:
//! - **discovery**: Find image files in a directory tree
//! - **decode**: Load and decode source images
//! - **resize**: Fit images into a bounding box
//! - **encode**: Per-format output codecs
//! - **transform**: The per-file decode → resize → encode → write job
//! - **channel**: Bounded job queue and outcome channel
//! - **pool**: Fixed-size worker pool with a completion barrier
//! - **aggregate**: Reduce outcomes into the batch summary
//! - **processor**: Orchestrates a full batch

pub mod aggregate;
pub mod channel;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod pool;
pub mod processor;
pub mod resize;
pub mod transform;

// Re-exports for convenient access
pub use aggregate::{Aggregator, BatchProgress};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use encode::{Codec, SUPPORTED_FORMATS};
pub use pool::WorkerPool;
pub use processor::Compressor;
pub use resize::FitBox;
