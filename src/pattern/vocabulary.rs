//! Built-in vocabularies used to validate and expand recognized tokens
//!
//! All tables are `'static` and never mutated, so a single [`Vocabulary`]
//! is shared by every worker without synchronization.

/// Environment stage names matched against whole labels
pub const ENVIRONMENT_WORDS: &[&str] = &[
    "prod", "production", "dev", "development",
    "test", "testing", "stage", "staging",
    "acc", "acceptance", "uat", "qa",
    "int", "integration", "demo", "beta",
    "sandbox", "sbox", "experimental", "exp",
];

/// Cloud provider region prefixes and their siblings
pub const PROVIDER_PREFIXES: &[(&str, &[&str])] = &[
    ("us", &["eu", "ap", "sa", "af", "ca"]),
    ("eu", &["us", "ap", "sa", "af", "ca"]),
    ("ap", &["us", "eu", "sa", "af", "ca"]),
    ("sa", &["us", "eu", "ap", "af", "ca"]),
    ("af", &["us", "eu", "ap", "sa", "ca"]),
    ("ca", &["us", "eu", "ap", "sa", "af"]),
];

/// Direction regions and their siblings
pub const DIRECTION_REGIONS: &[(&str, &[&str])] = &[
    ("east", &["west", "central", "north", "south"]),
    ("west", &["east", "central", "north", "south"]),
    ("central", &["east", "west", "north", "south"]),
    ("north", &["east", "west", "central", "south"]),
    ("south", &["east", "west", "central", "north"]),
    ("northeast", &["northwest", "southeast", "southwest", "central"]),
    ("northwest", &["northeast", "southeast", "southwest", "central"]),
    ("southeast", &["northeast", "northwest", "southwest", "central"]),
    ("southwest", &["northeast", "northwest", "southeast", "central"]),
];

static BUILTIN: Vocabulary = Vocabulary::new(ENVIRONMENT_WORDS, PROVIDER_PREFIXES, DIRECTION_REGIONS);

/// Read-only token tables shared by the recognizer and the generator
#[derive(Debug)]
pub struct Vocabulary {
    environment_words: &'static [&'static str],
    provider_prefixes: &'static [(&'static str, &'static [&'static str])],
    direction_regions: &'static [(&'static str, &'static [&'static str])],
}

impl Vocabulary {
    /// Build a vocabulary from custom tables.
    ///
    /// Environment words and table keys must be lowercase.
    pub const fn new(
        environment_words: &'static [&'static str],
        provider_prefixes: &'static [(&'static str, &'static [&'static str])],
        direction_regions: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self {
            environment_words,
            provider_prefixes,
            direction_regions,
        }
    }

    /// The process-wide built-in vocabulary
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    pub fn environment_words(&self) -> &'static [&'static str] {
        self.environment_words
    }

    /// `token` is expected to be lowercase already
    pub fn is_environment_word(&self, token: &str) -> bool {
        self.environment_words.contains(&token)
    }

    /// Siblings of a provider prefix, `None` if the prefix is unknown
    pub fn prefix_siblings(&self, prefix: &str) -> Option<&'static [&'static str]> {
        lookup(self.provider_prefixes, prefix)
    }

    /// Siblings of a direction region, `None` if the region is unknown
    pub fn region_siblings(&self, region: &str) -> Option<&'static [&'static str]> {
        lookup(self.direction_regions, region)
    }

    pub fn is_provider_prefix(&self, prefix: &str) -> bool {
        self.prefix_siblings(prefix).is_some()
    }

    pub fn is_direction_region(&self, region: &str) -> bool {
        self.region_siblings(region).is_some()
    }
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, siblings)| *siblings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_words_are_lowercase() {
        for word in ENVIRONMENT_WORDS {
            assert_eq!(*word, word.to_lowercase());
        }
        assert_eq!(ENVIRONMENT_WORDS.len(), 20);
    }

    #[test]
    fn test_siblings_never_include_self() {
        for (prefix, siblings) in PROVIDER_PREFIXES {
            assert!(!siblings.contains(prefix));
            // every sibling is itself a known prefix
            for s in *siblings {
                assert!(Vocabulary::builtin().is_provider_prefix(s));
            }
        }
        for (region, siblings) in DIRECTION_REGIONS {
            assert!(!siblings.contains(region));
            for s in *siblings {
                assert!(Vocabulary::builtin().is_direction_region(s));
            }
        }
    }

    #[test]
    fn test_custom_tables() {
        static CUSTOM: Vocabulary = Vocabulary::new(
            &["live", "canary"],
            &[("us", &["eu"]), ("eu", &["us"])],
            &[("east", &["west"]), ("west", &["east"])],
        );
        assert!(CUSTOM.is_environment_word("canary"));
        assert!(!CUSTOM.is_environment_word("prod"));
        assert!(!CUSTOM.is_provider_prefix("ap"));
        assert_eq!(CUSTOM.region_siblings("east"), Some(&["west"][..]));
    }

    #[test]
    fn test_lookup() {
        let vocab = Vocabulary::builtin();
        assert_eq!(vocab.prefix_siblings("us"), Some(&["eu", "ap", "sa", "af", "ca"][..]));
        assert!(vocab.prefix_siblings("xx").is_none());
        assert!(vocab.region_siblings("northeast").unwrap().contains(&"central"));
        assert!(vocab.is_environment_word("staging"));
        assert!(!vocab.is_environment_word("Staging"));
    }
}
