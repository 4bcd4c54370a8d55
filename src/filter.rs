//! Entry classification.
//!
//! [`ExtensionFilter`] decides which files are eligible for conversion;
//! [`PathFilter`] applies user-supplied glob exclusions to files and directories.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

/// Case-insensitive extension matcher.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    /// Creates a filter for the given extensions (without leading dot).
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Returns true if the file name carries one of the recognized extensions.
    ///
    /// Names without an extension (including dot-files such as `.h`) are
    /// never eligible.
    #[must_use]
    pub fn is_eligible(&self, file_name: impl AsRef<Path>) -> bool {
        file_name
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXTENSIONS)
    }
}

/// Glob-based exclusion of files and directories, matched against paths
/// relative to the input root.
#[derive(Debug, Clone)]
pub(crate) struct PathFilter {
    exclude: Option<GlobSet>,
}

impl PathFilter {
    /// Compiles the exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any pattern is not a valid glob.
    pub(crate) fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self { exclude: None });
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::config(format!("Invalid glob pattern '{pattern}': {e}"))
            })?;
            builder.add(glob);
        }

        Ok(Self {
            exclude: Some(builder.build()?),
        })
    }

    /// Returns true if the relative path matches an exclusion pattern.
    pub(crate) fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|set| set.is_match(relative))
    }
}
