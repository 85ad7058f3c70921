//! Utilities for iterating over a subset of archive entries chosen
//! by a UNIX glob pattern.
//!
//! Entry paths use backslashes as separators, so escaping through
//! backslashes is disabled in patterns.

pub use globset::Error as GlobError;

use std::slice::Iter;

use globset::{GlobBuilder, GlobMatcher};

use crate::ArchiveEntry;

/// A glob matcher for checking entry paths.
pub struct Matcher {
    inner: GlobMatcher,
}

impl Matcher {
    /// Creates a new glob matcher over the given pattern.
    pub fn new(pattern: &str) -> Result<Self, GlobError> {
        let inner = GlobBuilder::new(pattern)
            .backslash_escape(false)
            .build()?
            .compile_matcher();
        Ok(Self { inner })
    }

    /// Checks if a given path is a match to the glob pattern.
    #[inline]
    pub fn is_match(&self, path: &str) -> bool {
        self.inner.is_match(path)
    }
}

/// An iterator that only yields entries which match a specified
/// UNIX glob pattern.
pub struct GlobIter<'a> {
    entries: Iter<'a, ArchiveEntry>,
    matcher: Matcher,
}

impl<'a> GlobIter<'a> {
    /// Creates a new glob iterator that yields `entries` matching
    /// the given pattern.
    ///
    /// Errors on failure to compile the provided glob pattern.
    pub fn new(entries: &'a [ArchiveEntry], pattern: &str) -> Result<Self, GlobError> {
        Matcher::new(pattern).map(move |matcher| Self {
            entries: entries.iter(),
            matcher,
        })
    }
}

impl<'a> Iterator for GlobIter<'a> {
    type Item = &'a ArchiveEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = &self.matcher;
        self.entries.find(|e| matcher.is_match(&e.path))
    }
}
