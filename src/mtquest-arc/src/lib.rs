//! Library for interacting with MT Framework ARC containers.
//!
//! Support for both reading and writing archive files is provided,
//! along with the zlib codec used for entry payloads and the table
//! that classifies entries by their type hash.

#![deny(
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    unsafe_op_in_unsafe_fn
)]

mod archive;
pub use archive::*;

mod container;
pub use container::*;

mod deflater;
pub use deflater::*;

mod entry;
pub use entry::*;

pub mod ext;

pub mod glob;

mod inflater;
pub use inflater::*;

pub mod types;
