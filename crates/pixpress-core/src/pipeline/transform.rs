//! Per-job transform: stat, decode, fit-resize, encode, write.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{JobError, JobResult};
use crate::types::{Job, JobOutcome};

use super::decode::ImageDecoder;
use super::encode::Codec;
use super::resize::FitBox;

/// Run one job to completion. Never panics on bad input; every failure is
/// returned as a [`JobOutcome::Failed`].
pub fn run_job(job: &Job) -> JobOutcome {
    match compress_file(job) {
        Ok((output, original_size, compressed_size)) => JobOutcome::Compressed {
            source: job.source.clone(),
            output,
            original_size,
            compressed_size,
        },
        Err(error) => JobOutcome::Failed {
            source: job.source.clone(),
            error,
        },
    }
}

/// Output path for `source`: same stem, new extension, in `output_dir`.
pub fn output_path(source: &Path, output_dir: &Path, format: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{}.{}", stem, format.trim().to_ascii_lowercase()))
}

fn compress_file(job: &Job) -> JobResult<(PathBuf, u64, u64)> {
    let start = Instant::now();
    let path = job.source.as_path();
    let request = &job.request;
    tracing::debug!("Compressing: {:?}", path);

    // Stat
    let original_size = std::fs::metadata(path)
        .map_err(|e| JobError::StatFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .len();

    // Decode
    let decode_start = Instant::now();
    let decoded = ImageDecoder::decode(path)?;
    tracing::trace!("  Decode: {:?}", decode_start.elapsed());

    // Resize
    let fit = FitBox::new(request.max_width, request.max_height);
    let image = fit.apply(decoded.image);

    // Resolve the codec before anything touches the output directory
    let output = output_path(path, &request.output_dir, &request.format);
    let codec = Codec::resolve(&request.format, request.quality).ok_or_else(|| {
        JobError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: request.format.clone(),
        }
    })?;

    // Encode
    let encode_start = Instant::now();
    let bytes = codec.encode(&image).map_err(|message| JobError::EncodeFailed {
        path: output.clone(),
        message,
    })?;
    tracing::trace!("  Encode ({:?}): {:?}", codec, encode_start.elapsed());

    write_atomic(&output, &request.output_dir, &bytes)?;

    let compressed_size = std::fs::metadata(&output)
        .map(|m| m.len())
        .unwrap_or(bytes.len() as u64);

    tracing::debug!(
        "Compressed {:?} in {:?} ({:?} {}x{} -> {:?} {}x{}, {} -> {} bytes)",
        path.file_name().unwrap_or_default(),
        start.elapsed(),
        decoded.format,
        decoded.width,
        decoded.height,
        codec,
        image.width(),
        image.height(),
        original_size,
        compressed_size
    );

    Ok((output, original_size, compressed_size))
}

/// Write `bytes` to a temp file in `dir`, then rename it over `target`.
///
/// An existing file at `target` is replaced. Readers never observe a
/// half-written output, even when two sources map to the same name.
fn write_atomic(target: &Path, dir: &Path, bytes: &[u8]) -> JobResult<()> {
    let write_err = |e: std::io::Error| JobError::WriteFailed {
        path: target.to_path_buf(),
        message: e.to_string(),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}
