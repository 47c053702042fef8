//! Writing transformed bytes back to disk.

use crate::errors::SourceError;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Options for saving bytes.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Whether to fsync after writing (default: false).
    pub sync: bool,
    /// Whether to create missing parent directories (default: true).
    pub create_dirs: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create_dirs: true,
        }
    }
}

/// Writes `bytes` to `dest`, creating or truncating the file.
///
/// The whole buffer is written in one pass and flushed; with
/// [`SaveOptions::sync`] the file is also synced to disk. There is no retry.
///
/// # Errors
///
/// Returns [`SourceError::Write`] if the parent directory cannot be created
/// or the file cannot be opened, written or synced.
pub fn save_bytes<P: AsRef<Path>>(
    bytes: &[u8],
    dest: P,
    options: &SaveOptions,
) -> Result<(), SourceError> {
    let dest = dest.as_ref();
    write_all(bytes, dest, options).map_err(|source| {
        tracing::error!(path = %dest.display(), error = %source, "save failed");
        SourceError::Write {
            path: dest.to_path_buf(),
            source,
        }
    })?;
    tracing::info!(path = %dest.display(), bytes = bytes.len(), "saved");
    Ok(())
}

fn write_all(bytes: &[u8], dest: &Path, options: &SaveOptions) -> io::Result<()> {
    if options.create_dirs {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dest)?;
    file.write_all(bytes)?;
    file.flush()?;
    if options.sync {
        file.sync_all()?;
    }
    Ok(())
}
