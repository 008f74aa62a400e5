//! Variation generator - expands one hostname into its candidate set

use std::collections::{BTreeSet, HashSet};

use super::substitute::substitute;
use crate::pattern::{PatternMatch, PatternMatches, Vocabulary};
use crate::types::{PatternCategory, DEFAULT_MAX_VARIATIONS};

/// Candidate set produced for one hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Rejoined candidate hostnames, sorted
    pub candidates: BTreeSet<String>,
    /// Categories whose substitutions were applied, in order
    pub applied: Vec<PatternCategory>,
    /// Set when the ceiling cut the set short
    pub truncated: bool,
}

impl Expansion {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Generator for hostname variations under a per-hostname ceiling
#[derive(Debug, Clone, Copy)]
pub struct VariationGenerator {
    max_variations: usize,
    vocabulary: &'static Vocabulary,
}

impl VariationGenerator {
    /// Create a generator keeping at most `max_variations` candidates per hostname
    pub fn new(max_variations: usize) -> Self {
        Self {
            max_variations,
            vocabulary: Vocabulary::builtin(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: &'static Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn max_variations(&self) -> usize {
        self.max_variations
    }

    /// Expand `hostname` using the matches recognized in it.
    ///
    /// Categories are applied one at a time in the order of `matches`; each
    /// substitutes over every tuple accumulated so far. Once the set grows
    /// past the ceiling it is cut to the lexicographically smallest
    /// candidates and the remaining categories are skipped.
    pub fn expand(&self, hostname: &str, matches: &PatternMatches) -> Expansion {
        let original: Vec<String> = hostname.split('.').map(str::to_string).collect();
        let mut variations: HashSet<Vec<String>> = HashSet::from([original]);
        let mut applied = Vec::new();
        let mut truncated = false;

        for (category, group) in matches.iter() {
            let delta = self.category_delta(&variations, group);
            applied.push(category);

            if delta.is_empty() {
                continue;
            }
            variations.extend(delta);

            if variations.len() > self.max_variations {
                tracing::warn!(
                    hostname = %hostname,
                    category = %category,
                    produced = variations.len(),
                    max_variations = self.max_variations,
                    "Reached maximum variations limit"
                );
                variations = truncate_sorted(variations, self.max_variations);
                truncated = true;
                break;
            }
        }

        Expansion {
            candidates: variations.iter().map(|parts| parts.join(".")).collect(),
            applied,
            truncated,
        }
    }

    /// New tuples from substituting every match of one category into every
    /// current tuple, one match at a time
    fn category_delta(
        &self,
        variations: &HashSet<Vec<String>>,
        group: &[PatternMatch],
    ) -> HashSet<Vec<String>> {
        let mut delta = HashSet::new();

        for parts in variations {
            for m in group {
                let Some(label) = parts.get(m.label_index) else {
                    continue;
                };

                for replacement in substitute(m, label, self.vocabulary) {
                    let mut next = parts.clone();
                    next[m.label_index] = replacement;
                    delta.insert(next);
                }
            }
        }

        delta
    }
}

impl Default for VariationGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VARIATIONS)
    }
}

/// Keep the `limit` tuples whose rejoined hostnames sort first
fn truncate_sorted(variations: HashSet<Vec<String>>, limit: usize) -> HashSet<Vec<String>> {
    let mut keyed: Vec<(String, Vec<String>)> = variations
        .into_iter()
        .map(|parts| (parts.join("."), parts))
        .collect();
    keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    keyed.truncate(limit);
    keyed.into_iter().map(|(_, parts)| parts).collect()
}
