//! Full-match filename patterns.

use crate::error::ConfigError;
use regex::Regex;
use std::fmt;

/// An ordered set of regular expressions that must match a whole filename.
///
/// `app-.*` matches `app-linux.tar.gz` but `linux` does not, since a pattern
/// never matches a substring.
#[derive(Clone, Default)]
pub struct PatternSet {
    /// Source expressions, as configured.
    sources: Vec<String>,
    /// Anchored compiled expressions, same order as `sources`.
    compiled: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every expression, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PatternSet::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            // Errors are reported against the expression as written.
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            let anchored = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?;
            set.sources.push(pattern.to_string());
            set.compiled.push(anchored);
        }
        Ok(set)
    }

    /// Returns `true` if no pattern is configured.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Returns `true` if any pattern matches the whole `name`.
    ///
    /// An empty set matches nothing.
    pub fn full_match(&self, name: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(name))
    }

    /// Asset selection rule: an empty set selects everything.
    pub fn selects(&self, name: &str) -> bool {
        self.is_empty() || self.full_match(name)
    }
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.sources).finish()
    }
}
