//! Core functionality for renaming files after their content.
//!
//! This library provides the foundational components for content-based renaming:
//! - File discovery and classification
//! - Candidate names from pluggable description collaborators
//! - Deterministic, collision-free name resolution
//! - Safe rename operations

// -- External Dependencies --
use log::{debug, info};
use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use collaborators::Collaborators;
pub use config::*;
pub use error::{Error, Result};
pub use resolution::ClaimedNames;
pub use types::*;

// -- Public Modules --
pub mod collaborators;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod naming;
pub mod rename;
pub mod resolution;
pub mod types;

use naming::{ContentNamer, TruncationPolicy};

/// Main entry point for a renaming batch
pub struct ContentRenamer {
    config: Config,
    collaborators: Collaborators,
}

impl ContentRenamer {
    /// Create a new ContentRenamer with the provided configuration and collaborators
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rename every supported file under `root`
    pub fn run(&self, root: impl AsRef<Path>) -> Result<Vec<RenameOutcome>> {
        self.run_with(root, |_| {}).map(|(outcomes, _)| outcomes)
    }

    /// Rename every supported file under `root`, reporting each outcome as
    /// soon as it is known. Also returns the final claimed names.
    ///
    /// Only enumeration errors are returned; a file that cannot be named or
    /// renamed becomes a `Failed` outcome and the batch moves on.
    pub fn run_with<F>(
        &self,
        root: impl AsRef<Path>,
        mut on_outcome: F,
    ) -> Result<(Vec<RenameOutcome>, ClaimedNames)>
    where
        F: FnMut(&RenameOutcome),
    {
        let root = root.as_ref();

        info!("Discovering files under {}...", root.display());
        let records = discovery::enumerate(root, &self.config)?;
        info!("Found {} files", records.len());

        let mut claimed = ClaimedNames::seeded(discovery::original_stems(&records));
        let namer = ContentNamer::new(
            &self.collaborators,
            TruncationPolicy::from_config(&self.config),
        );

        let mut outcomes = Vec::with_capacity(records.len());
        for record in &records {
            let outcome = if record.kind.is_supported() {
                match self.process_file(record, &namer, &mut claimed) {
                    Ok(final_name) => RenameOutcome::renamed(&record.path, final_name),
                    Err(e) => {
                        logging::log_file_error(&record.path, "rename", &e);
                        RenameOutcome::failed(&record.path, &e)
                    }
                }
            } else {
                debug!("Skipping unsupported file {}", record.path.display());
                RenameOutcome::skipped(&record.path)
            };

            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            "Batch complete: {} renamed, {} skipped, {} failed",
            summary.renamed, summary.skipped, summary.failed
        );

        Ok((outcomes, claimed))
    }

    /// Name, resolve and rename one supported file. Returns the new file name.
    fn process_file(
        &self,
        record: &FileRecord,
        namer: &ContentNamer<'_>,
        claimed: &mut ClaimedNames,
    ) -> Result<String> {
        let raw = namer.candidate_name(record)?;
        let candidate = self.checked_stem(record, &raw)?;

        let final_stem = resolution::resolve(&candidate, claimed, &record.stem);
        debug!(
            "{}: {:?} -> {:?}",
            record.path.display(),
            raw,
            final_stem
        );

        rename::apply(record, &final_stem, self.config.dry_run)?;
        Ok(format!("{}{}", final_stem, record.extension))
    }

    /// Sanitize a raw name, applying the empty-name policy
    fn checked_stem(&self, record: &FileRecord, raw: &str) -> Result<String> {
        let stem = naming::sanitize(raw);
        if !stem.is_empty() {
            return Ok(stem);
        }

        let fallback = match &self.config.empty_name_policy {
            EmptyNamePolicy::Fail => None,
            EmptyNamePolicy::Fallback(name) => Some(naming::sanitize(name)),
        };
        fallback
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::EmptyName(record.path.clone()))
    }
}
