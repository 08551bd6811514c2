//! Capabilities the renamer depends on but does not implement itself.
//!
//! The batch engine only talks to these traits. Concrete adapters live in the
//! submodules:
//! - [`extraction`]: plain text out of documents
//! - [`tokens`]: token estimation for the truncation budget
//! - [`chat`]: image and text description through a chat-completions service

use std::path::Path;
use thiserror::Error;

pub mod chat;
pub mod extraction;
pub mod tokens;

// Re-export adapters for external use
pub use chat::{ChatDescriber, ChatSettings};
pub use extraction::DocumentTextExtractor;
pub use tokens::{TikTokenEstimator, WhitespaceTokenEstimator};

/// Error raised by a collaborator
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not parse {0}")]
    Parse(String),

    #[error("No text extractor for {0} documents")]
    UnsupportedDocument(String),

    #[error("Description service returned no content")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

/// Produces a short caption for an image file
pub trait ImageDescriber {
    fn describe_image(&self, path: &Path) -> Result<String, CollaboratorError>;
}

/// Produces the plain-text content of a document file
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, CollaboratorError>;
}

/// Produces a short descriptive phrase for a piece of text
pub trait TextDescriber {
    fn describe_text(&self, text: &str) -> Result<String, CollaboratorError>;
}

/// Estimates how many model tokens a text occupies
pub trait TokenEstimator {
    fn estimate_tokens(&self, text: &str) -> usize;
}

/// The full set of collaborators a [`crate::ContentRenamer`] runs with
pub struct Collaborators {
    pub image_describer: Box<dyn ImageDescriber>,
    pub text_extractor: Box<dyn TextExtractor>,
    pub text_describer: Box<dyn TextDescriber>,
    pub token_estimator: Box<dyn TokenEstimator>,
}

impl Collaborators {
    pub fn new(
        image_describer: impl ImageDescriber + 'static,
        text_extractor: impl TextExtractor + 'static,
        text_describer: impl TextDescriber + 'static,
        token_estimator: impl TokenEstimator + 'static,
    ) -> Self {
        Self {
            image_describer: Box::new(image_describer),
            text_extractor: Box::new(text_extractor),
            text_describer: Box::new(text_describer),
            token_estimator: Box::new(token_estimator),
        }
    }
}
