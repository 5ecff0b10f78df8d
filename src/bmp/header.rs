//! BMP file-header and DIB-header parsing.
//!
//! Layout handled here (all multi-byte fields little-endian):
//!
//! | Offset  | Field             | Type   |
//! |---------|-------------------|--------|
//! | 0-1     | signature `"BM"`  | bytes  |
//! | 10-13   | pixel data offset | u32    |
//! | 14+4    | width             | i32    |
//! | 14+8    | height            | i32    |
//! | 14+14   | bits per pixel    | u16    |
//!
//! The raw header bytes (file header + DIB header) are retained verbatim
//! so an unmodified image re-encodes byte-identically.

use crate::error::FormatError;

/// Fixed size of the BMP file header preceding the DIB header.
pub const FILE_HEADER_SIZE: usize = 14;
/// Magic bytes at the start of every BMP file.
pub const SIGNATURE: &[u8; 2] = b"BM";
/// Bytes per pixel on disk (B, G, R).
pub const BYTES_PER_PIXEL: usize = 3;
/// The only color depth this codec handles.
pub const SUPPORTED_BPP: u16 = 24;

/// Filler bytes appended after each pixel row so the row occupies a
/// multiple of 4 bytes on disk. A BMP format requirement.
pub fn padding_for_width(width: i32) -> usize {
    ((4 - (i64::from(width) * 3) % 4) % 4) as usize
}

/// Parsed view of the file header + DIB header of a 24-bit BMP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpHeader {
    /// Distance from the file start to the pixel data.
    pub pixel_offset: u32,
    pub width: i32,
    /// Negative height means rows are stored top-down.
    pub height: i32,
    pub bits_per_pixel: u16,
    raw: Vec<u8>,
}

impl BmpHeader {
    /// Parse and validate the headers at the front of `data`.
    ///
    /// Fails before any pixel data is touched: a bad signature, a pixel
    /// offset that truncates the DIB header, or a color depth other than
    /// 24 bpp all abort the decode.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        let file_header = data
            .get(..FILE_HEADER_SIZE)
            .ok_or(FormatError::TruncatedHeader)?;
        if &file_header[..2] != SIGNATURE {
            return Err(FormatError::BadSignature);
        }
        let pixel_offset = read_u32_le(file_header, 10)?;

        let dib_len = (pixel_offset as usize)
            .checked_sub(FILE_HEADER_SIZE)
            .ok_or(FormatError::TruncatedHeader)?;
        let dib = data
            .get(FILE_HEADER_SIZE..FILE_HEADER_SIZE + dib_len)
            .ok_or(FormatError::TruncatedHeader)?;

        let width = read_i32_le(dib, 4)?;
        let height = read_i32_le(dib, 8)?;
        let bits_per_pixel = read_u16_le(dib, 14)?;
        if bits_per_pixel != SUPPORTED_BPP {
            return Err(FormatError::UnsupportedBitsPerPixel(bits_per_pixel));
        }

        Ok(Self {
            pixel_offset,
            width,
            height,
            bits_per_pixel,
            raw: data[..FILE_HEADER_SIZE + dib_len].to_vec(),
        })
    }

    /// The exact file-header + DIB-header bytes, for re-encoding.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn padding(&self) -> usize {
        padding_for_width(self.width)
    }

    /// Number of pixel rows, regardless of storage direction.
    pub fn row_count(&self) -> usize {
        self.height.unsigned_abs() as usize
    }
}

fn read_u16_le(data: &[u8], offset: usize) -> Result<u16, FormatError> {
    let bytes = data
        .get(offset..offset + 2)
        .ok_or(FormatError::TruncatedHeader)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, FormatError> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or(FormatError::TruncatedHeader)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_i32_le(data: &[u8], offset: usize) -> Result<i32, FormatError> {
    read_u32_le(data, offset).map(|v| v as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::test_support::build_bmp;

    #[test]
    fn padding_spot_values() {
        assert_eq!(padding_for_width(4), 0); // 12 bytes, already aligned
        assert_eq!(padding_for_width(1), 1); // 3 bytes -> 4
        assert_eq!(padding_for_width(5), 1); // 15 bytes -> 16
        assert_eq!(padding_for_width(2), 2);
        assert_eq!(padding_for_width(3), 3);
        assert_eq!(padding_for_width(0), 0);
    }

    #[test]
    fn padding_always_completes_a_word() {
        for width in 0..=10_000 {
            let pad = padding_for_width(width);
            assert!(pad < 4);
            assert_eq!((width as usize * 3 + pad) % 4, 0, "width {width}");
        }
    }

    #[test]
    fn parse_extracts_dimensions() {
        let data = build_bmp(3, 2, |_, _| [0, 0, 0]);
        let header = BmpHeader::parse(&data).unwrap();
        assert_eq!(header.width, 3);
        assert_eq!(header.height, 2);
        assert_eq!(header.bits_per_pixel, 24);
        assert_eq!(header.pixel_offset, 54);
        assert_eq!(header.raw().len(), 54);
        assert_eq!(header.padding(), 3);
        assert_eq!(header.row_count(), 2);
    }

    #[test]
    fn parse_rejects_bad_signature() {
        let mut data = build_bmp(1, 1, |_, _| [0, 0, 0]);
        data[0] = b'P';
        assert_eq!(BmpHeader::parse(&data), Err(FormatError::BadSignature));
    }

    #[test]
    fn parse_rejects_unsupported_bpp() {
        let mut data = build_bmp(1, 1, |_, _| [0, 0, 0]);
        data[14 + 14] = 32;
        assert_eq!(
            BmpHeader::parse(&data),
            Err(FormatError::UnsupportedBitsPerPixel(32))
        );
    }

    #[test]
    fn parse_rejects_truncated_file_header() {
        assert_eq!(
            BmpHeader::parse(b"BM"),
            Err(FormatError::TruncatedHeader)
        );
    }

    #[test]
    fn parse_rejects_pixel_offset_inside_file_header() {
        let mut data = build_bmp(1, 1, |_, _| [0, 0, 0]);
        data[10..14].copy_from_slice(&4u32.to_le_bytes());
        assert_eq!(BmpHeader::parse(&data), Err(FormatError::TruncatedHeader));
    }

    #[test]
    fn negative_height_keeps_sign_but_counts_rows() {
        let mut data = build_bmp(1, 2, |_, _| [0, 0, 0]);
        data[14 + 8..14 + 12].copy_from_slice(&(-2i32).to_le_bytes());
        let header = BmpHeader::parse(&data).unwrap();
        assert_eq!(header.height, -2);
        assert_eq!(header.row_count(), 2);
    }
}
