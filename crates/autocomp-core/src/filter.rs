//! Include/exclude filtering of component and consumer paths.

use regex::Regex;

use crate::{Error, Result};

pub const DEFAULT_INCLUDE: &[&str] = &[r"\.svelte$"];

pub const DEFAULT_EXCLUDE: &[&str] = &[
    r"[\\/]node_modules[\\/]",
    r"[\\/]\.git[\\/]",
    r"[\\/]\.svelte-kit[\\/]",
];

/// A path passes when it matches any include pattern (or there are none)
/// and no exclude pattern.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(path))
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE
                .iter()
                .map(|p| Regex::new(p).expect("Invalid default include regex"))
                .collect(),
            exclude: DEFAULT_EXCLUDE
                .iter()
                .map(|p| Regex::new(p).expect("Invalid default exclude regex"))
                .collect(),
        }
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p.as_ref();
            Regex::new(pattern).map_err(|source| Error::InvalidFilter {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}
