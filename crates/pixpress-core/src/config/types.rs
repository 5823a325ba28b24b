//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers (0 = one per available CPU)
    pub parallel_workers: usize,

    /// Input file extensions picked up by discovery
    pub supported_extensions: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 0,
            supported_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
                "bmp".to_string(),
                "tiff".to_string(),
                "gif".to_string(),
            ],
        }
    }
}

impl ProcessingConfig {
    /// Resolve the worker count for a run.
    ///
    /// Falls back to the hardware parallelism when `parallel_workers` is 0.
    pub fn worker_count(&self) -> usize {
        if self.parallel_workers > 0 {
            return self.parallel_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Pipeline settings for backpressure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Capacity of the job queue and of the result channel
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { buffer_size: 100 }
    }
}

/// Request defaults applied by the CLI when a flag is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Output format ("webp", "jpeg", "jpg" or "png")
    pub format: String,

    /// Encoder quality from 0 to 100 (ignored for png)
    pub quality: u8,

    /// Maximum output width in pixels (0 = unconstrained)
    pub max_width: u32,

    /// Maximum output height in pixels (0 = unconstrained)
    pub max_height: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: "webp".to_string(),
            quality: 80,
            max_width: 0,
            max_height: 0,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
