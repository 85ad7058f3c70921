//! Shared utility code throughout the mtquest project.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

#[cfg(feature = "libdeflater")]
pub use libdeflater;
pub use thiserror;

pub mod align;
pub mod binary;
pub mod hash;
