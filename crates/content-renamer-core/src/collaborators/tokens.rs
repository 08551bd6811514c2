use log::error;
use tiktoken_rs::{cl100k_base, CoreBPE};

use super::TokenEstimator;

/// Token estimator backed by the `cl100k_base` BPE.
///
/// The BPE is loaded once. If loading fails the estimator degrades to a
/// whitespace word count rather than failing every document.
pub struct TikTokenEstimator {
    bpe: Option<CoreBPE>,
}

impl TikTokenEstimator {
    pub fn new() -> Self {
        let bpe = match cl100k_base() {
            Ok(bpe) => Some(bpe),
            Err(e) => {
                error!(
                    "Failed to initialize cl100k_base BPE: {:?}. Falling back to whitespace token count.",
                    e
                );
                None
            }
        };
        Self { bpe }
    }
}

impl Default for TikTokenEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEstimator for TikTokenEstimator {
    fn estimate_tokens(&self, text: &str) -> usize {
        match &self.bpe {
            Some(bpe) => bpe.encode_with_special_tokens(text).len(),
            None => WhitespaceTokenEstimator.estimate_tokens(text),
        }
    }
}

/// Counts whitespace-separated words. Cheap and dependency free.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenEstimator;

impl TokenEstimator for WhitespaceTokenEstimator {
    fn estimate_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}
