//! 24-bit uncompressed BMP codec.
//!
//! Only the classic layout is handled: `"BM"` signature, little-endian
//! header fields, 3-byte (B,G,R) pixels, rows padded to 4-byte
//! boundaries. RLE, bitfields, palettes, and other color depths are out
//! of scope and rejected at header parse time.

mod decode;
mod encode;
pub mod header;

pub use decode::{DecodedBmp, decode, read};
pub use encode::{encode, write};
