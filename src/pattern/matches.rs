//! Pattern match records and the ordered per-category collection

use serde::{Deserialize, Serialize};

use crate::types::PatternCategory;

/// Byte offsets of a match within its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A decomposed cloud region code such as `us-east-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCode {
    pub prefix: String,
    pub region: String,
    pub number: String,
}

impl RegionCode {
    pub fn new(prefix: impl Into<String>, region: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            region: region.into(),
            number: number.into(),
        }
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.prefix, self.region, self.number)
    }
}

/// Category-specific payload of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum MatchKind {
    /// An isolated single digit
    SingleDigit { span: Span },
    /// An isolated run of exactly two digits
    DoubleDigit { span: Span },
    /// The whole label is an environment word
    EnvironmentWord,
    /// A vocabulary-validated region code
    CloudRegion { span: Span, code: RegionCode },
}

/// One recognized token inside a hostname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Matched text with its original case
    pub text: String,
    /// Index of the label the match was found in
    pub label_index: usize,
    #[serde(flatten)]
    pub kind: MatchKind,
}

impl PatternMatch {
    pub fn category(&self) -> PatternCategory {
        match self.kind {
            MatchKind::SingleDigit { .. } => PatternCategory::SingleDigit,
            MatchKind::DoubleDigit { .. } => PatternCategory::DoubleDigit,
            MatchKind::EnvironmentWord => PatternCategory::EnvironmentWord,
            MatchKind::CloudRegion { .. } => PatternCategory::CloudRegion,
        }
    }

    /// Offsets within the label; an environment word spans the whole label
    pub fn span(&self) -> Span {
        match &self.kind {
            MatchKind::SingleDigit { span }
            | MatchKind::DoubleDigit { span }
            | MatchKind::CloudRegion { span, .. } => *span,
            MatchKind::EnvironmentWord => Span::new(0, self.text.len()),
        }
    }

    pub fn region_code(&self) -> Option<&RegionCode> {
        match &self.kind {
            MatchKind::CloudRegion { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Matches grouped by category, in order of first discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatches {
    groups: Vec<(PatternCategory, Vec<PatternMatch>)>,
}

impl PatternMatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a match to its category group, opening the group if needed
    pub fn push(&mut self, m: PatternMatch) {
        let category = m.category();
        match self.groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, group)) => group.push(m),
            None => self.groups.push((category, vec![m])),
        }
    }

    pub fn get(&self, category: PatternCategory) -> &[PatternMatch] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, group)| group.as_slice())
            .unwrap_or(&[])
    }

    /// Categories in discovery order
    pub fn categories(&self) -> impl Iterator<Item = PatternCategory> + '_ {
        self.groups.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternCategory, &[PatternMatch])> {
        self.groups.iter().map(|(c, group)| (*c, group.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of categories with at least one match
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn total_matches(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.len()).sum()
    }
}

impl FromIterator<PatternMatch> for PatternMatches {
    fn from_iter<I: IntoIterator<Item = PatternMatch>>(iter: I) -> Self {
        let mut matches = Self::new();
        for m in iter {
            matches.push(m);
        }
        matches
    }
}
