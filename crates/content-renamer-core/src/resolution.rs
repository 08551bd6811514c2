//! Deterministic collision resolution for generated stems.

use std::collections::HashSet;

/// Ordered set of stems already taken in the current batch.
///
/// Seeded with the original stem of every enumerated file, then grows by one
/// entry per resolved file. Each stem appears at most once.
#[derive(Debug, Clone, Default)]
pub struct ClaimedNames {
    order: Vec<String>,
    lookup: HashSet<String>,
}

impl ClaimedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set from the original stems of a batch
    pub fn seeded<'a>(stems: impl IntoIterator<Item = &'a str>) -> Self {
        let mut claimed = Self::new();
        for stem in stems {
            claimed.insert(stem);
        }
        claimed
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.lookup.contains(stem)
    }

    /// Claim a stem. Returns false if it was already claimed, in which case
    /// its original position is kept.
    pub fn insert(&mut self, stem: &str) -> bool {
        if self.lookup.insert(stem.to_string()) {
            self.order.push(stem.to_string());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Claimed stems in claim order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Pick the final stem for a file and claim it.
///
/// The first of `candidate`, `candidate_1`, `candidate_2`, ... that is either
/// unclaimed or equal to the file's own stem wins, so a file that already
/// carries its resolved name keeps it. Suffixes are always built from the
/// bare candidate.
pub fn resolve(candidate: &str, claimed: &mut ClaimedNames, original_stem: &str) -> String {
    let mut output = candidate.to_string();
    let mut counter = 1usize;
    while claimed.contains(&output) && output != original_stem {
        output = format!("{}_{}", candidate, counter);
        counter += 1;
    }

    claimed.insert(&output);
    output
}
