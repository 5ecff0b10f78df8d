//! 16-bit PCM WAV amplitude scaling.
//!
//! The canonical 44-byte header is copied to the output verbatim and the
//! rest of the file is treated as a flat run of little-endian i16
//! samples. Multi-channel layouts and other sample widths are out of
//! scope; channels simply scale interleaved, which is correct for the
//! mono files this handles.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, FormatError, ValidationError};

/// Canonical PCM WAV header length.
pub const HEADER_SIZE: usize = 44;
/// Bytes per 16-bit sample.
pub const SAMPLE_SIZE: usize = 2;

/// Outcome of one volume run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeReport {
    pub samples: usize,
    /// Samples that hit the 16-bit limits after scaling.
    pub clipped: usize,
}

/// Scale every sample in an in-memory WAV file by `factor`.
///
/// The scaled value truncates toward zero and clamps to
/// `[-32768, 32767]`. A file shorter than the header, an odd trailing
/// byte, or a file with no samples at all is rejected.
pub fn scale_samples(data: &[u8], factor: f32) -> Result<(Vec<u8>, VolumeReport), Error> {
    let (header, body) = data
        .split_at_checked(HEADER_SIZE)
        .ok_or(FormatError::TruncatedHeader)?;
    if body.is_empty() {
        return Err(ValidationError::EmptyAudio.into());
    }
    if body.len() % SAMPLE_SIZE != 0 {
        return Err(FormatError::UnexpectedEof.into());
    }

    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(header);

    let mut clipped = 0usize;
    for chunk in body.chunks_exact(SAMPLE_SIZE) {
        let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
        let scaled = (f32::from(sample) * factor).trunc();
        let clamped = scaled.clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16;
        if f32::from(clamped) != scaled {
            clipped += 1;
        }
        out.extend_from_slice(&clamped.to_le_bytes());
    }

    let report = VolumeReport {
        samples: body.len() / SAMPLE_SIZE,
        clipped,
    };
    Ok((out, report))
}

/// Read `input`, scale its samples, and write `output`.
pub fn change_volume(input: &Path, output: &Path, factor: f32) -> Result<VolumeReport, Error> {
    debug!(input = %input.display(), factor, "scaling WAV volume");
    let data = fs::read(input)?;
    let (scaled, report) = scale_samples(&data, factor)?;
    fs::write(output, &scaled)?;
    info!(
        output = %output.display(),
        samples = report.samples,
        clipped = report.clipped,
        "volume updated"
    );
    Ok(report)
}
