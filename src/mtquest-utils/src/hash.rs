//! Hashing of resource type names.
//!
//! Archives never store file extensions. Instead, every entry
//! carries a 31-bit checksum of the name of the resource class
//! that loads it, such as `rQuestData` or `rGUIMessage`.

/// The bits of a CRC that survive into a type hash.
pub const TYPE_HASH_MASK: u32 = u32::MAX >> 1;

/// Computes the raw CRC-32 of `input` without the final inversion
/// step of the standard algorithm.
#[inline]
pub fn crc32_uninverted(input: &[u8]) -> u32 {
    !crc32fast::hash(input)
}

/// Computes the type hash for the given resource type name.
#[inline]
pub fn type_hash(name: &str) -> u32 {
    crc32_uninverted(name.as_bytes()) & TYPE_HASH_MASK
}
