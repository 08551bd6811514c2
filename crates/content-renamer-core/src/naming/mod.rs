// Naming steps
pub mod sanitize;
pub mod truncation;

// Re-export naming functions for external use
pub use sanitize::sanitize;
pub use truncation::{truncate_to_budget, TruncationPolicy};

use log::debug;

use crate::collaborators::{CollaboratorError, Collaborators};
use crate::error::{Error, Result};
use crate::types::{FileKind, FileRecord};

/// Produces raw candidate names by routing each file to the collaborator
/// matching its kind
pub struct ContentNamer<'a> {
    collaborators: &'a Collaborators,
    truncation: TruncationPolicy,
}

impl<'a> ContentNamer<'a> {
    pub fn new(collaborators: &'a Collaborators, truncation: TruncationPolicy) -> Self {
        Self {
            collaborators,
            truncation,
        }
    }

    /// Raw, unsanitized candidate name for a file
    pub fn candidate_name(&self, record: &FileRecord) -> Result<String> {
        let to_error = |e: CollaboratorError| Error::Description {
            path: record.path.clone(),
            message: e.to_string(),
        };

        match record.kind {
            FileKind::Image => self
                .collaborators
                .image_describer
                .describe_image(&record.path)
                .map_err(to_error),
            FileKind::Document => {
                let text = self
                    .collaborators
                    .text_extractor
                    .extract_text(&record.path)
                    .map_err(to_error)?;
                let truncated = self
                    .truncation
                    .truncate(&text, self.collaborators.token_estimator.as_ref());
                debug!(
                    "Describing {} chars of text from {}",
                    truncated.chars().count(),
                    record.path.display()
                );
                self.collaborators
                    .text_describer
                    .describe_text(&truncated)
                    .map_err(to_error)
            }
            FileKind::Unsupported => Err(Error::UnsupportedFormat(record.extension.clone())),
        }
    }
}
