//! 24-bit BMP filter pipeline and 16-bit WAV volume utilities.
//!
//! The crate decodes uncompressed 24-bit BMP files into an in-memory
//! [`PixelGrid`], applies pure filters over it (grayscale, reflect, box
//! blur, Sobel edges), and re-encodes the result using the header bytes
//! captured at decode time — an unfiltered round-trip is byte-identical
//! to the input file.
//!
//! ## Modules
//!
//! - [`bmp`] — header parsing, decoding, encoding
//! - [`filters`] — the four pure `PixelGrid -> PixelGrid` transforms
//! - [`image`] — pixel and grid types
//! - [`paths`] — input/output path resolution for the CLI
//! - [`wav`] — 16-bit PCM amplitude scaling
//! - [`error`] — the format / validation / I/O error taxonomy
//!
//! Everything is single-threaded and synchronous: one decode, zero or
//! more filter applications, one encode per requested filter. Errors
//! are never recovered locally; the first failure aborts the run.

use num_enum::IntoPrimitive;

pub mod bmp;
pub mod error;
pub mod filters;
pub mod image;
pub mod paths;
pub mod wav;

pub use bmp::DecodedBmp;
pub use error::{Error, FormatError, Result, ValidationError};
pub use filters::FilterKind;
pub use image::{Pixel, PixelGrid};

/// Process exit codes (Unix convention; 130 = terminated by SIGINT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    Interrupt = 130,
}
