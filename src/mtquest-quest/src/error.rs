use std::io;

use mtquest_arc::ArchiveError;
use thiserror::Error;

use crate::link::ResourceKind;

/// Errors that may occur when working with quest archives.
#[derive(Debug, Error)]
pub enum QuestError {
    /// The underlying archive operation failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Reading a resource payload failed.
    #[error("failed to read resource: {0}")]
    Io(#[from] io::Error),

    /// An entry already exists at the path a new entry would take.
    #[error("entry '{0}' already exists")]
    Duplicate(String),

    /// The archive lacks one of its well-known entries.
    #[error("quest archive has no {0} entry")]
    Missing(&'static str),

    /// A resource payload does not start with the expected magic.
    #[error("invalid {what} magic {found:#010X}")]
    Magic { what: &'static str, found: u32 },

    /// A resource payload uses an unsupported version.
    #[error("unsupported {what} version {found:#010X}")]
    Version { what: &'static str, found: u32 },

    /// A resource payload holds more records than supported.
    #[error("{what} holds {count} records, only one is supported")]
    Count { what: &'static str, count: i32 },

    /// No unused id could be found for a new resource.
    #[error("no unused {0} id found after {1} attempts")]
    AllocationExhausted(ResourceKind, usize),
}
