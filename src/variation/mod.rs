//! Variation generation module
//!
//! Turns the matches found by [`crate::pattern::PatternRecognizer`] into a
//! capped set of candidate hostnames with the same label structure.

mod generator;
mod substitute;

pub use generator::{Expansion, VariationGenerator};
pub use substitute::substitute;
