//! Request assembly: CLI flags layered over the config defaults.

use std::path::{Path, PathBuf};

use pixpress_core::config::DefaultsConfig;
use pixpress_core::{Codec, CompressRequest, SUPPORTED_FORMATS};

use super::CompressArgs;

/// Clap value parser for `--format`.
pub fn parse_format(value: &str) -> Result<String, String> {
    let format = value.trim().to_ascii_lowercase();
    if SUPPORTED_FORMATS.contains(&format.as_str()) {
        Ok(format)
    } else {
        Err(format!(
            "unsupported format {:?} (expected one of: {})",
            value,
            SUPPORTED_FORMATS.join(", ")
        ))
    }
}

/// Build the request, falling back to `defaults` for omitted flags.
pub fn build_request(args: &CompressArgs, defaults: &DefaultsConfig) -> CompressRequest {
    let input_dir = expand(&args.input);
    let output_dir = expand(&args.output);

    if output_dir.starts_with(&input_dir) && output_dir != input_dir {
        tracing::warn!(
            "Output directory {:?} is inside the input tree; its files will be picked up by later runs",
            output_dir
        );
    }

    let request = CompressRequest {
        input_dir,
        output_dir,
        format: args
            .format
            .clone()
            .unwrap_or_else(|| defaults.format.clone()),
        quality: args.quality.unwrap_or(defaults.quality),
        max_width: args.max_width.unwrap_or(defaults.max_width),
        max_height: args.max_height.unwrap_or(defaults.max_height),
    };

    if args.quality.is_some() && !quality_applies(&request) {
        tracing::warn!("--quality has no effect on lossless {} output", request.format);
    }
    request
}

/// Whether the request's quality setting changes the encoder output.
fn quality_applies(request: &CompressRequest) -> bool {
    Codec::resolve(&request.format, request.quality).is_some_and(|codec| codec.is_lossy())
}

/// Expand a leading `~` in a path argument.
fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
