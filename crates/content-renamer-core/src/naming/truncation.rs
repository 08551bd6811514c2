use log::debug;

use crate::collaborators::TokenEstimator;
use crate::config::Config;

/// Shrinks document text until it fits a token budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncationPolicy {
    pub max_tokens: usize,
    pub shrink_ratio: f64,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            max_tokens: 5000,
            shrink_ratio: 0.90,
        }
    }
}

impl TruncationPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tokens: config.max_tokens,
            shrink_ratio: config.shrink_ratio,
        }
    }

    /// Keep cutting the text to `floor(chars * shrink_ratio)` characters until
    /// the estimator reports at most `max_tokens`. The cut counts characters,
    /// not tokens. An empty text is always accepted.
    pub fn truncate(&self, text: &str, estimator: &dyn TokenEstimator) -> String {
        let mut current = text.to_string();
        let mut char_len = current.chars().count();
        let mut rounds = 0usize;

        while char_len > 0 && estimator.estimate_tokens(&current) > self.max_tokens {
            let mut new_len = (char_len as f64 * self.shrink_ratio).floor() as usize;
            // Always make progress, whatever the ratio
            if new_len >= char_len {
                new_len = char_len - 1;
            }

            let byte_end = current
                .char_indices()
                .nth(new_len)
                .map(|(index, _)| index)
                .unwrap_or(current.len());
            current.truncate(byte_end);
            char_len = new_len;
            rounds += 1;
        }

        if rounds > 0 {
            debug!(
                "Truncated text from {} to {} chars in {} rounds",
                text.chars().count(),
                char_len,
                rounds
            );
        }
        current
    }
}

/// Truncate `text` to `max_tokens` using the given shrink ratio
pub fn truncate_to_budget(
    text: &str,
    estimator: &dyn TokenEstimator,
    max_tokens: usize,
    shrink_ratio: f64,
) -> String {
    TruncationPolicy {
        max_tokens,
        shrink_ratio,
    }
    .truncate(text, estimator)
}
