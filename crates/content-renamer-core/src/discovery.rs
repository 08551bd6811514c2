use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::FileRecord;

/// Enumerate every regular file under `root`.
///
/// Entries are sorted by file name within each directory so the order is
/// stable for a given tree. Symlinks are not followed. A permission failure
/// anywhere in the tree aborts the whole enumeration.
pub fn enumerate(root: &Path, config: &Config) -> Result<Vec<FileRecord>> {
    // Check if directory exists
    if !root.exists() {
        return Err(Error::FileNotFound(root.to_path_buf()));
    }

    // Determine max depth for directory traversal
    let max_depth = config.max_depth.unwrap_or(usize::MAX);

    let mut records = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(walk_error)?;

        if !entry.file_type().is_file() {
            continue;
        }

        records.push(FileRecord::from_path(entry.path()));
    }

    log::debug!("Enumerated {} files under {}", records.len(), root.display());
    Ok(records)
}

/// Map a traversal failure onto the crate's error taxonomy
fn walk_error(err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(PathBuf::new);

    match err.into_io_error() {
        Some(io_err) if io_err.kind() == io::ErrorKind::PermissionDenied => Error::Access {
            path,
            source: io_err,
        },
        Some(io_err) if io_err.kind() == io::ErrorKind::NotFound => Error::FileNotFound(path),
        Some(io_err) => Error::Io(io_err),
        None => Error::Unknown(format!("Filesystem loop detected at {}", path.display())),
    }
}

/// Original stems of every enumerated file, in enumeration order
pub fn original_stems(records: &[FileRecord]) -> impl Iterator<Item = &str> {
    records.iter().map(|record| record.stem.as_str())
}

// -- Tests --
