use std::path::Path;

use mtquest_utils::hash::type_hash;

use crate::{glob, ArchiveConfig, ArchiveEntry, ArchiveError, EntryData};

/// Capabilities shared by all archive-backed containers.
///
/// Implementors own an ordered list of [`ArchiveEntry`] values and
/// know how to persist it. Entry lookups hand out either references
/// or indices into that list. Any insertion, removal or reordering
/// invalidates indices obtained before it.
pub trait Container {
    /// Opens and fully loads the container at `path`.
    fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError>
    where
        Self: Sized;

    /// The layout configuration of the underlying archive.
    fn config(&self) -> &ArchiveConfig;

    /// All entries in their current order.
    fn entries(&self) -> &[ArchiveEntry];

    /// Mutable access to the entry list.
    fn entries_mut(&mut self) -> &mut Vec<ArchiveEntry>;

    /// Writes the container to disk, optionally to a new `path`.
    fn save(&mut self, path: Option<&Path>) -> Result<(), ArchiveError>;

    /// Finds the index of the entry at exactly `path`.
    ///
    /// Matching is a literal, case-sensitive string comparison.
    fn find_entry_index(&self, path: &str) -> Option<usize> {
        self.entries().iter().position(|e| e.path == path)
    }

    /// Finds the entry at exactly `path`.
    fn find_entry(&self, path: &str) -> Option<&ArchiveEntry> {
        self.entries().iter().find(|e| e.path == path)
    }

    /// Finds the entry at exactly `path` for modification.
    fn find_entry_mut(&mut self, path: &str) -> Option<&mut ArchiveEntry> {
        self.entries_mut().iter_mut().find(|e| e.path == path)
    }

    /// Gets the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[track_caller]
    fn entry(&self, index: usize) -> &ArchiveEntry {
        &self.entries()[index]
    }

    /// Gets the entry at `index` for modification.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[track_caller]
    fn entry_mut(&mut self, index: usize) -> &mut ArchiveEntry {
        &mut self.entries_mut()[index]
    }

    /// Appends a new entry of the resource type `type_name`.
    ///
    /// The type hash is computed from the name and the extension is
    /// derived through the configured resolver. No check for an
    /// existing entry at `path` is made.
    fn add_entry(
        &mut self,
        path: &str,
        type_name: &str,
        data: EntryData<'_>,
    ) -> Result<&mut ArchiveEntry, ArchiveError> {
        let mut entry = ArchiveEntry::new(path, type_hash(type_name), self.config().resolver);
        entry.store(data)?;

        let entries = self.entries_mut();
        let index = entries.len();
        entries.push(entry);
        Ok(&mut entries[index])
    }

    /// Builds an iterator over entries whose path satisfies the given
    /// glob pattern.
    ///
    /// Backslashes in the pattern match literally.
    fn iter_glob(&self, pattern: &str) -> Result<glob::GlobIter<'_>, glob::GlobError> {
        glob::GlobIter::new(self.entries(), pattern)
    }
}
