use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::logging::log_fs_modification;
use crate::types::FileRecord;

/// Give `record` the stem `final_stem`, keeping its directory and extension.
///
/// Returns the new path. Renaming a file onto itself is a no-op. An existing
/// file at the target is never overwritten. With `dry_run` nothing on disk
/// changes and the would-be path is returned.
pub fn apply(record: &FileRecord, final_stem: &str, dry_run: bool) -> Result<PathBuf> {
    let new_path = record.path_with_stem(final_stem);

    // The stem must name a file directly inside the original directory
    if new_path.parent() != Some(record.directory.as_path()) {
        return Err(Error::Rename {
            from: record.path.clone(),
            to: new_path,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "new name would leave the original directory",
            ),
        });
    }

    if new_path == record.path {
        return Ok(new_path);
    }

    // Ensure we don't overwrite existing files
    if new_path.symlink_metadata().is_ok() {
        return Err(Error::Rename {
            from: record.path.clone(),
            to: new_path,
            source: io::Error::new(io::ErrorKind::AlreadyExists, "target file already exists"),
        });
    }

    if dry_run {
        log::info!(
            "Would rename {} -> {}",
            record.path.display(),
            new_path.display()
        );
        return Ok(new_path);
    }

    fs::rename(&record.path, &new_path).map_err(|source| Error::Rename {
        from: record.path.clone(),
        to: new_path.clone(),
        source,
    })?;

    log_fs_modification(
        "rename",
        &record.path,
        Some(&format!("-> {}", new_path.display())),
    );

    Ok(new_path)
}
