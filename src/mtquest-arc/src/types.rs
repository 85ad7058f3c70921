//! On-disk structures of the ARC format.
//!
//! All values are little-endian. An archive starts with a
//! [`Header`], followed by one [`Descriptor`] per entry and then
//! the entry data region, which begins on an aligned offset.

use std::io;

use mtquest_utils::binary;

/// The magic value at the start of every archive, `"ARC\0"`.
pub const MAGIC: u32 = 0x0043_5241;

/// The only supported format version.
pub const VERSION: i16 = 0x0011;

/// The byte size of the archive [`Header`].
pub const HEADER_SIZE: u64 = 12;

/// The byte size of the fixed path field in a [`Descriptor`].
pub const PATH_LEN: usize = 64;

/// The byte size of one [`Descriptor`].
pub const DESCRIPTOR_SIZE: u64 = PATH_LEN as u64 + 16;

/// Data alignment of the current format revision.
pub const DATA_ALIGNMENT: u64 = 0x10;

/// Data alignment of the previous format revision.
///
/// Archives written with this constant are laid out differently
/// and cannot be mixed with [`DATA_ALIGNMENT`].
pub const LEGACY_DATA_ALIGNMENT: u64 = 0x8000;

/// The number of bits in the packed word holding the real size.
pub const REAL_SIZE_BITS: u32 = 29;

/// The number of bits in the packed word holding the quality.
pub const QUALITY_BITS: u32 = 3;

/// The largest representable decompressed entry size.
pub const MAX_REAL_SIZE: u32 = (1 << REAL_SIZE_BITS) - 1;

/// The largest representable quality tier.
pub const MAX_QUALITY: u8 = (1 << QUALITY_BITS) - 1;

/// Computes where the data region starts for an archive with
/// `count` entries.
#[inline]
pub const fn data_start(count: usize, alignment: u64) -> u64 {
    let table_end = HEADER_SIZE + count as u64 * DESCRIPTOR_SIZE;
    mtquest_utils::align::align_up(table_end, alignment)
}

/// The header of an archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// The format version in use.
    pub version: i16,
    /// The total number of entries in the archive.
    pub file_count: i16,
}

impl Header {
    /// Parses the header, including magic and padding.
    ///
    /// A magic mismatch is reported with the value that was found.
    pub fn parse<R: io::Read>(reader: &mut R) -> io::Result<Result<Self, u32>> {
        if let Err(found) = binary::magic(reader, MAGIC)? {
            return Ok(Err(found));
        }

        let header = Self {
            version: binary::int16(reader)?,
            file_count: binary::int16(reader)?,
        };
        // Reserved padding.
        binary::uint32(reader)?;

        Ok(Ok(header))
    }

    /// Writes the header, including magic and padding.
    pub fn write<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        binary::write_uint32(writer, MAGIC)?;
        binary::write_int16(writer, self.version)?;
        binary::write_int16(writer, self.file_count)?;
        binary::write_uint32(writer, 0)
    }
}

/// The decompressed size and quality tier of an entry, stored
/// together in one 32-bit word.
///
/// The low 29 bits hold the size, the high 3 bits the quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackedSize {
    /// The decompressed size, at most [`MAX_REAL_SIZE`].
    pub real_size: u32,
    /// The quality tier, at most [`MAX_QUALITY`].
    pub quality: u8,
}

impl PackedSize {
    const SIZE_MASK: u32 = MAX_REAL_SIZE;
    const QUALITY_MASK: u32 = MAX_QUALITY as u32;

    /// Splits a packed word into its fields.
    #[inline]
    pub const fn unpack(raw: u32) -> Self {
        Self {
            real_size: raw & Self::SIZE_MASK,
            quality: ((raw >> REAL_SIZE_BITS) & Self::QUALITY_MASK) as u8,
        }
    }

    /// Joins the fields into a packed word.
    ///
    /// Out of range values are masked to their field width.
    #[inline]
    pub const fn pack(self) -> u32 {
        (self.real_size & Self::SIZE_MASK)
            | ((self.quality as u32 & Self::QUALITY_MASK) << REAL_SIZE_BITS)
    }
}

/// Metadata for an entry as stored in the descriptor table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// The virtual path of the entry, backslash-delimited.
    pub path: String,
    /// The type hash of the entry.
    pub type_hash: u32,
    /// The number of bytes stored in the data region.
    pub compressed_size: u32,
    /// The decompressed size and quality tier.
    pub size: PackedSize,
    /// The absolute offset of the entry data.
    pub offset: u32,
}

impl Descriptor {
    /// Parses a descriptor off the given [`Read`](io::Read)er.
    pub fn parse<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            path: binary::fixed_str::<_, PATH_LEN>(reader)?,
            type_hash: binary::uint32(reader)?,
            compressed_size: binary::uint32(reader)?,
            size: PackedSize::unpack(binary::uint32(reader)?),
            offset: binary::uint32(reader)?,
        })
    }

    /// Writes the descriptor to the given [`Write`](io::Write)r.
    ///
    /// Paths longer than 63 bytes are truncated on a character
    /// boundary.
    pub fn write<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        binary::write_fixed_str::<_, PATH_LEN>(writer, &self.path)?;
        binary::write_uint32(writer, self.type_hash)?;
        binary::write_uint32(writer, self.compressed_size)?;
        binary::write_uint32(writer, self.size.pack())?;
        binary::write_uint32(writer, self.offset)
    }
}
