//! Quest archives and the quest link table.
//!
//! A quest archive is an ARC container holding one quest payload,
//! one link table and the resources the link table points at. This
//! crate finds and creates those entries by their naming conventions,
//! resolves link slots to entries and keeps the entry order the game
//! expects when saving.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;

mod error;
pub use error::*;

mod header;
pub use header::*;

mod language;
pub use language::*;

pub mod link;

pub mod paths;

mod quest_arc;
pub use quest_arc::*;
