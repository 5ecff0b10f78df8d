//! BMP decoding: file bytes into a [`PixelGrid`] plus the captured header.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::bmp::header::{BYTES_PER_PIXEL, BmpHeader};
use crate::error::{Error, FormatError};
use crate::image::{Pixel, PixelGrid};

/// Result of decoding one BMP file.
///
/// `height` keeps its on-disk sign (negative means top-down row storage);
/// row accounting always uses the absolute value. `header` holds the
/// exact file-header + DIB-header bytes so an unmodified grid re-encodes
/// to a byte-identical file.
#[derive(Debug, Clone)]
pub struct DecodedBmp {
    pub width: i32,
    pub height: i32,
    pub pixels: PixelGrid,
    pub header: Vec<u8>,
}

/// Decode an in-memory 24-bit BMP file.
///
/// Rows are kept in storage order. A short read anywhere in the pixel
/// data (including the row padding) aborts the decode; there is no
/// partial-image mode.
pub fn decode(data: &[u8]) -> Result<DecodedBmp, Error> {
    let header = BmpHeader::parse(data)?;
    debug!(
        width = header.width,
        height = header.height,
        padding = header.padding(),
        "parsed BMP header"
    );

    let width = header.width.max(0) as usize;
    let stride = width * BYTES_PER_PIXEL + header.padding();

    let mut rows = Vec::with_capacity(header.row_count());
    let mut pos = header.pixel_offset as usize;
    for _ in 0..header.row_count() {
        let row_bytes = data
            .get(pos..pos + width * BYTES_PER_PIXEL)
            .ok_or(FormatError::UnexpectedEof)?;
        // padding bytes are discarded but must be present on disk
        if pos + stride > data.len() {
            return Err(FormatError::UnexpectedEof.into());
        }
        rows.push(
            row_bytes
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|px| Pixel::new(px[0], px[1], px[2]))
                .collect(),
        );
        pos += stride;
    }

    let pixels = PixelGrid::from_rows(rows)?;
    Ok(DecodedBmp {
        width: header.width,
        height: header.height,
        pixels,
        header: header.raw().to_vec(),
    })
}

/// Read and decode a BMP file from disk.
pub fn read(path: &Path) -> Result<DecodedBmp, Error> {
    debug!(path = %path.display(), "reading BMP file");
    let data = fs::read(path)?;
    let decoded = decode(&data)?;
    info!(
        path = %path.display(),
        width = decoded.width,
        height = decoded.height,
        "decoded BMP file"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::test_support::build_bmp;

    #[test]
    fn decode_reads_rows_in_storage_order() {
        let data = build_bmp(2, 2, |x, y| [(10 * y + x) as u8, 0, 0]);
        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.width, 2);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.pixels.pixel_at(0, 0), Some(Pixel::new(0, 0, 0)));
        assert_eq!(decoded.pixels.pixel_at(0, 1), Some(Pixel::new(1, 0, 0)));
        assert_eq!(decoded.pixels.pixel_at(1, 0), Some(Pixel::new(10, 0, 0)));
        assert_eq!(decoded.pixels.pixel_at(1, 1), Some(Pixel::new(11, 0, 0)));
    }

    #[test]
    fn decode_captures_header_verbatim() {
        let data = build_bmp(3, 1, |_, _| [1, 2, 3]);
        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.header, &data[..54]);
    }

    #[test]
    fn truncated_pixel_data_is_fatal() {
        let data = build_bmp(3, 2, |_, _| [9, 9, 9]);
        let err = decode(&data[..data.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::UnexpectedEof)
        ));
    }

    #[test]
    fn missing_row_padding_is_fatal() {
        // width 3 needs 3 padding bytes per row; drop the last row's worth
        let data = build_bmp(3, 1, |_, _| [9, 9, 9]);
        let err = decode(&data[..data.len() - 3]).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::UnexpectedEof)));
    }
}
