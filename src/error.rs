use std::path::PathBuf;

use thiserror::Error;

/// Binary layout violations found while parsing BMP or WAV structures.
///
/// All of these are fatal: once the signature or a fixed-size field is
/// wrong, the rest of the byte layout cannot be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("not a BMP file: missing 'BM' signature")]
    BadSignature,
    #[error("unsupported bits per pixel: expected 24, got {0}")]
    UnsupportedBitsPerPixel(u16),
    #[error("truncated header")]
    TruncatedHeader,
    #[error("unexpected end of file in sample data")]
    UnexpectedEof,
}

/// Caller-contract violations raised before any partial work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pixel grid cannot be empty")]
    EmptyImage,
    #[error("rows have unequal lengths: expected {expected}, got {actual}")]
    RaggedRows { expected: usize, actual: usize },
    #[error("'{0}' is not a recognized filter")]
    UnknownFilter(String),
    #[error("filter '{0}' was requested more than once")]
    DuplicateFilter(String),
    #[error("width mismatch: header says {expected}, grid has {actual}")]
    WidthMismatch { expected: usize, actual: usize },
    #[error("'{0}' does not have the expected extension")]
    WrongExtension(PathBuf),
    #[error("file name cannot be empty")]
    EmptyFileName,
    #[error("audio file contains no samples")]
    EmptyAudio,
}

/// Any failure surfaced to the orchestration layer.
///
/// Nothing is recovered locally; every error propagates with `?` to the
/// CLI, which logs it and maps it to a non-zero exit code.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
