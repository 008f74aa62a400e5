//! Pattern recognition module
//!
//! Splits a hostname into labels and reports every token that can be
//! substituted: isolated one- and two-digit runs, whole-label environment
//! words, and cloud region codes such as `us-east-1`.

mod matches;
mod recognizer;
mod vocabulary;

pub use matches::{MatchKind, PatternMatch, PatternMatches, RegionCode, Span};
pub use recognizer::PatternRecognizer;
pub use vocabulary::{Vocabulary, DIRECTION_REGIONS, ENVIRONMENT_WORDS, PROVIDER_PREFIXES};
