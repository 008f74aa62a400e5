//! Hostname validation utilities

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, SubmutatorError};

/// Longest hostname accepted, in bytes
pub const MAX_HOSTNAME_LEN: usize = 253;

/// Longest single label accepted, in bytes
pub const MAX_LABEL_LEN: usize = 63;

fn label_chars() -> &'static Regex {
    static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();
    LABEL_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid label regex"))
}

/// Hostname validator
#[derive(Debug, Clone, Default)]
pub struct HostnameValidator;

impl HostnameValidator {
    /// Create a new hostname validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a hostname, returning it normalized with the case of its labels kept
    pub fn validate(&self, hostname: &str) -> Result<String> {
        let normalized = self.normalize(hostname);

        self.validate_format(&normalized)?;
        self.validate_length(&normalized)?;

        for label in normalized.split('.') {
            self.validate_label(label)?;
        }

        Ok(normalized)
    }

    /// Check hostname format
    fn validate_format(&self, hostname: &str) -> Result<()> {
        if hostname.is_empty() {
            return Err(SubmutatorError::validation("Hostname cannot be empty"));
        }

        if hostname.starts_with('.') {
            return Err(SubmutatorError::validation("Hostname cannot start with a dot"));
        }

        if hostname.contains("..") {
            return Err(SubmutatorError::validation("Hostname cannot contain consecutive dots"));
        }

        Ok(())
    }

    /// Check hostname length
    fn validate_length(&self, hostname: &str) -> Result<()> {
        if hostname.len() > MAX_HOSTNAME_LEN {
            return Err(crate::validation_error!(
                "Hostname too long (max {} characters)",
                MAX_HOSTNAME_LEN
            ));
        }

        Ok(())
    }

    /// Check a single label
    fn validate_label(&self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(SubmutatorError::validation("Hostname label cannot be empty"));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(crate::validation_error!(
                "Hostname label too long (max {} characters)",
                MAX_LABEL_LEN
            ));
        }

        if !label_chars().is_match(label) {
            return Err(SubmutatorError::validation(format!(
                "Hostname label '{}' contains invalid characters",
                label
            )));
        }

        Ok(())
    }

    /// Trim whitespace and drop one trailing root dot
    pub fn normalize(&self, hostname: &str) -> String {
        let trimmed = hostname.trim();
        trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
    }
}

/// Utility functions for hostname input
pub mod utils {
    /// Hostnames from a list file: one per line, blank lines and `#` comments skipped
    pub fn parse_hostname_list(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}
