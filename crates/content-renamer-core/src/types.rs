use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Image extensions, matched case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".heic"];

/// Document extensions, matched case-sensitively
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".docx", ".doc", ".odt", ".pptx", ".ppt", ".xlsx", ".csv", ".tsv", ".eml", ".msg", ".rtf",
    ".epub", ".html", ".xml", ".pdf", ".txt", ".md",
];

/// Kind of content a file holds, as far as naming is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    Document,
    Unsupported,
}

impl FileKind {
    /// Classify a file by its extension (with leading dot).
    ///
    /// Image extensions are compared case-insensitively while document
    /// extensions must match exactly, so `.PNG` is an image but `.PDF` is
    /// unsupported.
    pub fn classify(extension: &str) -> Self {
        let lowered = extension.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&lowered.as_str()) {
            Self::Image
        } else if DOCUMENT_EXTENSIONS.contains(&extension) {
            Self::Document
        } else {
            Self::Unsupported
        }
    }

    /// Check if files of this kind can be renamed
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Image | Self::Document => true,
            Self::Unsupported => false,
        }
    }
}

/// A file discovered under the root directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path to the file
    pub path: PathBuf,

    /// Directory containing the file
    pub directory: PathBuf,

    /// File name without its extension
    pub stem: String,

    /// Extension including the leading dot, or empty
    pub extension: String,

    /// Classification of the file
    pub kind: FileKind,
}

impl FileRecord {
    /// Build a record from a path, classifying it by extension
    pub fn from_path(path: &Path) -> Self {
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let kind = FileKind::classify(&extension);

        Self {
            path: path.to_path_buf(),
            directory,
            stem,
            extension,
            kind,
        }
    }

    /// Path the file would have with the given stem
    pub fn path_with_stem(&self, stem: &str) -> PathBuf {
        self.directory.join(format!("{}{}", stem, self.extension))
    }
}

/// Status of a single file after the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenameStatus {
    /// File now carries its generated name
    Renamed,

    /// File type is not handled, left untouched
    SkippedUnsupported,

    /// Naming or renaming failed, left untouched
    Failed,
}

/// Per-file result of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOutcome {
    /// Original path of the file
    pub path: PathBuf,

    /// What happened to the file
    pub status: RenameStatus,

    /// Final file name (stem plus extension) when renamed
    pub final_name: Option<String>,

    /// Error message when the file failed
    pub error: Option<String>,
}

impl RenameOutcome {
    pub fn renamed(path: &Path, final_name: String) -> Self {
        Self {
            path: path.to_path_buf(),
            status: RenameStatus::Renamed,
            final_name: Some(final_name),
            error: None,
        }
    }

    pub fn skipped(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            status: RenameStatus::SkippedUnsupported,
            final_name: None,
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &crate::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            status: RenameStatus::Failed,
            final_name: None,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregate counts over a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[RenameOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.status {
                    RenameStatus::Renamed => summary.renamed += 1,
                    RenameStatus::SkippedUnsupported => summary.skipped += 1,
                    RenameStatus::Failed => summary.failed += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.renamed + self.skipped + self.failed
    }
}
