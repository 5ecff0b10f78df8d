//! Input and output path resolution for the CLI pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, ValidationError};

/// Expected extension for image inputs.
pub const BMP_EXT: &str = "bmp";
/// Expected extension for audio inputs.
pub const WAV_EXT: &str = "wav";

/// Locate an existing input file.
///
/// With an explicit `dir` the name is looked up inside it; otherwise the
/// name is used as given, relative to the current directory. The file
/// must exist and carry `extension`, compared case-insensitively
/// (`.BMP` and `.Bmp` are accepted for `bmp`).
pub fn resolve_input(name: &str, dir: Option<&Path>, extension: &str) -> Result<PathBuf, Error> {
    if name.is_empty() {
        return Err(ValidationError::EmptyFileName.into());
    }
    let path = match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    };
    debug!(path = %path.display(), "resolving input file");

    if !path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )
        .into());
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => Ok(path),
        _ => Err(ValidationError::WrongExtension(path).into()),
    }
}

/// Build a `<stem>_<label>.<extension>` path next to `input`, or inside
/// `out_dir`, creating it (with parents) when absent.
pub fn output_path(
    input: &Path,
    label: &str,
    out_dir: Option<&Path>,
    extension: &str,
) -> Result<PathBuf, Error> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or(ValidationError::EmptyFileName)?;
    let file_name = format!("{stem}_{label}.{extension}");

    let dir = match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.to_path_buf()
        }
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let out = dir.join(file_name);
    debug!(path = %out.display(), "output path resolved");
    Ok(out)
}

/// Normalize an explicitly named output file, forcing `extension` when
/// the name carries a different one, and creating `out_dir` when given.
pub fn explicit_output(
    name: &str,
    out_dir: Option<&Path>,
    extension: &str,
) -> Result<PathBuf, Error> {
    if name.is_empty() {
        return Err(ValidationError::EmptyFileName.into());
    }
    let mut path = match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.join(name)
        }
        None => PathBuf::from(name),
    };
    if path.extension().and_then(|e| e.to_str()) != Some(extension) {
        path.set_extension(extension);
    }
    Ok(path)
}
