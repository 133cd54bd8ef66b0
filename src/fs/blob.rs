//! Whole-file blob load and save

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::ToolError;

/// Read the entire file at `path`
///
/// # Errors
/// * `ToolError::FileNotFound` - nothing exists at `path`
/// * `ToolError::FileOpen` - the file exists but cannot be opened
/// * `ToolError::Io` - reading failed after opening
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, ToolError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ToolError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut file = File::open(path).map_err(|e| ToolError::FileOpen {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    let len = file
        .metadata()
        .map(|m| usize::try_from(m.len()).unwrap_or(0))
        .unwrap_or(0);
    let mut data = Vec::with_capacity(len);
    file.read_to_end(&mut data)?;

    tracing::debug!(bytes = data.len(), "Loaded {}", path.display());
    Ok(data)
}

/// Write `data` to `path`, creating the file or truncating an existing one
///
/// # Errors
/// * `ToolError::FileOpen` - the file cannot be created or opened for writing
/// * `ToolError::FileWrite` - writing the contents failed
pub fn write_file(path: impl AsRef<Path>, data: &[u8]) -> Result<(), ToolError> {
    let path = path.as_ref();

    let mut file = File::create(path).map_err(|e| ToolError::FileOpen {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    file.write_all(data)
        .and_then(|_| file.flush())
        .map_err(|e| ToolError::FileWrite {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

    tracing::debug!(bytes = data.len(), "Wrote {}", path.display());
    Ok(())
}
