//! BMP encoding: a [`PixelGrid`] plus the original header back to file bytes.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::bmp::header::{BYTES_PER_PIXEL, padding_for_width};
use crate::error::{Error, ValidationError};
use crate::image::PixelGrid;

/// Serialize a grid against the header captured at decode time.
///
/// `width` must equal the grid's row length; a mismatch is a caller
/// contract violation, not silently tolerated. The header is written
/// back verbatim, so an unmodified grid round-trips byte-identically.
pub fn encode(pixels: &PixelGrid, width: i32, header: &[u8]) -> Result<Vec<u8>, Error> {
    let expected = width.max(0) as usize;
    if expected != pixels.width() {
        return Err(ValidationError::WidthMismatch {
            expected,
            actual: pixels.width(),
        }
        .into());
    }

    let padding = padding_for_width(width);
    let stride = pixels.width() * BYTES_PER_PIXEL + padding;
    let mut out = Vec::with_capacity(header.len() + stride * pixels.height());
    out.extend_from_slice(header);
    for row in pixels.rows() {
        for px in row {
            out.push(px.b);
            out.push(px.g);
            out.push(px.r);
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }
    Ok(out)
}

/// Encode and write a BMP file.
///
/// The file is assembled fully in memory first: if the output cannot be
/// created, nothing is written. A transient I/O failure mid-write can
/// still leave a partial file behind; there is no rollback.
pub fn write(path: &Path, pixels: &PixelGrid, width: i32, header: &[u8]) -> Result<(), Error> {
    let bytes = encode(pixels, width, header)?;
    debug!(path = %path.display(), len = bytes.len(), "writing BMP file");
    fs::write(path, &bytes)?;
    info!(path = %path.display(), "BMP file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::decode::decode;
    use crate::bmp::test_support::build_bmp;

    #[test]
    fn encode_round_trips_byte_identically() {
        let data = build_bmp(3, 2, |x, y| [x as u8, y as u8, 7]);
        let decoded = decode(&data).unwrap();
        let encoded = encode(&decoded.pixels, decoded.width, &decoded.header).unwrap();
        assert_eq!(encoded, data);
    }

    #[test]
    fn encode_rejects_width_mismatch() {
        let data = build_bmp(2, 2, |_, _| [0, 0, 0]);
        let decoded = decode(&data).unwrap();
        let err = encode(&decoded.pixels, 3, &decoded.header).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::WidthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
