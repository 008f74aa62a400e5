//! Per-category replacement rules
//!
//! Each rule is a pure function from a match and the current label text to
//! the replacement labels it yields. The current label may already differ
//! from the recognized one (an earlier category rewrote another token of the
//! same label), so offsets are re-checked against it.

use crate::pattern::{MatchKind, PatternMatch, RegionCode, Span, Vocabulary};

/// Allowed growth of an environment word over the token it replaces
const ENVIRONMENT_LENGTH_SLACK: usize = 2;

/// All replacement labels for `m` applied to `label`
pub fn substitute(m: &PatternMatch, label: &str, vocabulary: &Vocabulary) -> Vec<String> {
    match &m.kind {
        MatchKind::SingleDigit { span } => {
            splice_each(label, *span, (0..10).map(|d| d.to_string()))
        }
        MatchKind::DoubleDigit { span } => {
            splice_each(label, *span, (10..100).map(|d| d.to_string()))
        }
        MatchKind::EnvironmentWord => environment_words(&m.text, vocabulary),
        MatchKind::CloudRegion { span, code } => {
            splice_each(label, *span, region_codes(code, vocabulary))
        }
    }
}

/// Vocabulary words no longer than the matched token plus the slack
fn environment_words(token: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let limit = token.len() + ENVIRONMENT_LENGTH_SLACK;
    vocabulary
        .environment_words()
        .iter()
        .filter(|word| word.len() <= limit)
        .map(|word| word.to_string())
        .collect()
}

/// Every prefix × region pairing around `code`, keeping its number.
///
/// The matched pair itself is left out: the label already carries it,
/// possibly in another case.
fn region_codes(code: &RegionCode, vocabulary: &Vocabulary) -> Vec<String> {
    let prefixes = with_siblings(&code.prefix, vocabulary.prefix_siblings(&code.prefix));
    let regions = with_siblings(&code.region, vocabulary.region_siblings(&code.region));

    let mut out = Vec::with_capacity(prefixes.len() * regions.len() - 1);
    for prefix in &prefixes {
        for region in &regions {
            if *prefix == code.prefix && *region == code.region {
                continue;
            }
            out.push(format!("{}-{}-{}", prefix, region, code.number));
        }
    }
    out
}

fn with_siblings<'a>(own: &'a str, siblings: Option<&'static [&'static str]>) -> Vec<&'a str> {
    let mut all = vec![own];
    all.extend(siblings.unwrap_or(&[]).iter().copied());
    all
}

fn splice_each<I>(label: &str, span: Span, replacements: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    if span.start > span.end {
        return Vec::new();
    }
    let (Some(head), Some(tail)) = (label.get(..span.start), label.get(span.end..)) else {
        return Vec::new();
    };

    replacements
        .into_iter()
        .map(|r| format!("{}{}{}", head, r, tail))
        .collect()
}
