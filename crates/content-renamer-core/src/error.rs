use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the content-renamer library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Root directory (or another required path) does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Permission failure while walking the directory tree
    #[error("Access denied while scanning {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A description collaborator failed for one file
    #[error("Could not describe {path}: {message}")]
    Description { path: PathBuf, message: String },

    /// The sanitized candidate name came out empty
    #[error("Generated name for {0} is empty after sanitizing")]
    EmptyName(PathBuf),

    /// Filesystem rename failed
    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

