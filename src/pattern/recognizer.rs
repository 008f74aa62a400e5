//! Pattern recognizer - finds substitutable tokens inside hostname labels

use std::sync::OnceLock;

use regex::Regex;

use super::matches::{MatchKind, PatternMatch, PatternMatches, RegionCode, Span};
use super::vocabulary::Vocabulary;

/// `<prefix>-<region>-<number>`, applied to the ASCII-lowercased label
fn region_pattern() -> &'static Regex {
    static REGION_REGEX: OnceLock<Regex> = OnceLock::new();
    REGION_REGEX.get_or_init(|| {
        Regex::new(r"([a-z]{2})-([a-z]+)-([0-9]+)").expect("Invalid cloud region regex")
    })
}

/// Stateless recognizer over a read-only vocabulary
#[derive(Debug, Clone, Copy)]
pub struct PatternRecognizer {
    vocabulary: &'static Vocabulary,
}

impl PatternRecognizer {
    /// Create a recognizer backed by the built-in vocabulary
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::builtin())
    }

    pub fn with_vocabulary(vocabulary: &'static Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Recognize every pattern in every label of `hostname`
    pub fn recognize(&self, hostname: &str) -> PatternMatches {
        let mut found = PatternMatches::new();

        for (index, label) in hostname.split('.').enumerate() {
            let regions = self.find_regions(label, index);
            if !regions.is_empty() {
                for m in regions {
                    tracing::debug!(
                        hostname = %hostname,
                        label = index,
                        region = %m.text,
                        "Found cloud region"
                    );
                    found.push(m);
                }
                // region labels are never re-read as digits or words
                continue;
            }

            for m in find_digit_runs(label, index) {
                found.push(m);
            }

            if let Some(m) = self.find_environment_word(label, index) {
                found.push(m);
            }
        }

        found
    }

    fn find_regions(&self, label: &str, label_index: usize) -> Vec<PatternMatch> {
        let lowered = label.to_ascii_lowercase();

        region_pattern()
            .captures_iter(&lowered)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let prefix = caps.get(1)?.as_str();
                let region = caps.get(2)?.as_str();
                let number = caps.get(3)?.as_str();

                if !self.vocabulary.is_provider_prefix(prefix)
                    || !self.vocabulary.is_direction_region(region)
                {
                    tracing::trace!(label = %label, candidate = whole.as_str(), "Rejected region-like token");
                    return None;
                }

                // ASCII lowercasing keeps byte offsets identical
                Some(PatternMatch {
                    text: label[whole.start()..whole.end()].to_string(),
                    label_index,
                    kind: MatchKind::CloudRegion {
                        span: Span::new(whole.start(), whole.end()),
                        code: RegionCode::new(prefix, region, number),
                    },
                })
            })
            .collect()
    }

    fn find_environment_word(&self, label: &str, label_index: usize) -> Option<PatternMatch> {
        if !self.vocabulary.is_environment_word(&label.to_ascii_lowercase()) {
            return None;
        }

        Some(PatternMatch {
            text: label.to_string(),
            label_index,
            kind: MatchKind::EnvironmentWord,
        })
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maximal ASCII digit runs of length one or two.
///
/// All single-digit runs of the label come before its double-digit runs.
fn find_digit_runs(label: &str, label_index: usize) -> Vec<PatternMatch> {
    let bytes = label.as_bytes();
    let mut singles = Vec::new();
    let mut doubles = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let span = Span::new(start, i);

        let text = label[start..i].to_string();
        match span.len() {
            1 => singles.push(PatternMatch {
                text,
                label_index,
                kind: MatchKind::SingleDigit { span },
            }),
            2 => doubles.push(PatternMatch {
                text,
                label_index,
                kind: MatchKind::DoubleDigit { span },
            }),
            _ => {}
        }
    }

    singles.extend(doubles);
    singles
}
