//! JSON and text file operations
//!
//! Reads deserialize with serde; writes are atomic.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, WalkthroughError};

/// Read and deserialize a JSON file.
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Returns
/// The deserialized value
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            WalkthroughError::FileNotFound(path.display().to_string())
        } else {
            WalkthroughError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        WalkthroughError::InvalidJson(format!("{}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// # Errors
/// * `InvalidJson` - If the value cannot be serialized
/// * `Io` - If there's an error writing the file
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(data)
        .map_err(|e| WalkthroughError::InvalidJson(e.to_string()))?;
    content.push('\n');
    write_text(path, &content)
}

/// Write text to a file atomically: temp file first, then rename.
///
/// Creates the parent directory if needed.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");

    Ok(())
}
