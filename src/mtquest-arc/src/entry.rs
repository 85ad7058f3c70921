use std::borrow::Cow;

use crate::{
    ext::ExtensionResolver,
    types::{Descriptor, PackedSize, MAX_QUALITY, MAX_REAL_SIZE},
    ArchiveError,
};

/// The quality tier assigned to entries created by this library.
pub const DEFAULT_QUALITY: u8 = 2;

/// Payload handed to the entry creation helpers.
#[derive(Clone, Copy, Debug)]
pub enum EntryData<'a> {
    /// Raw bytes which will be compressed before storing.
    Raw(&'a [u8]),
    /// Bytes which are already a zlib stream and are stored as-is.
    ///
    /// A `real_size` of zero keeps the stored length as the real
    /// size, which is what uncompressed entries record.
    Compressed { data: &'a [u8], real_size: u32 },
}

/// One named, typed payload inside an archive.
///
/// The data buffer holds whatever was last stored: the raw bytes
/// read from disk, a freshly compressed stream, or uncompressed
/// bytes stored verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// The virtual path of the entry, backslash-delimited.
    pub path: String,
    type_hash: u32,
    extension: &'static str,
    compressed_size: u32,
    real_size: u32,
    quality: u8,
    data: Vec<u8>,
}

impl ArchiveEntry {
    /// Creates an empty entry of the given type.
    pub fn new(path: impl Into<String>, type_hash: u32, resolver: ExtensionResolver) -> Self {
        Self {
            path: path.into(),
            type_hash,
            extension: resolver.resolve(type_hash),
            compressed_size: 0,
            real_size: 0,
            quality: DEFAULT_QUALITY,
            data: Vec::new(),
        }
    }

    pub(crate) fn from_descriptor(
        desc: Descriptor,
        data: Vec<u8>,
        resolver: ExtensionResolver,
    ) -> Self {
        Self {
            extension: resolver.resolve(desc.type_hash),
            path: desc.path,
            type_hash: desc.type_hash,
            compressed_size: desc.compressed_size,
            real_size: desc.size.real_size,
            quality: desc.size.quality,
            data,
        }
    }

    pub(crate) fn descriptor(&self, offset: u32) -> Descriptor {
        Descriptor {
            path: self.path.clone(),
            type_hash: self.type_hash,
            compressed_size: self.compressed_size,
            size: PackedSize {
                real_size: self.real_size,
                quality: self.quality,
            },
            offset,
        }
    }

    /// The type hash of the entry.
    #[inline]
    pub fn type_hash(&self) -> u32 {
        self.type_hash
    }

    /// Changes the type hash and re-derives the extension.
    pub fn set_type_hash(&mut self, type_hash: u32, resolver: ExtensionResolver) {
        self.type_hash = type_hash;
        self.extension = resolver.resolve(type_hash);
    }

    /// The extension derived from the type hash, e.g. `".rem"`.
    ///
    /// Empty for types unknown to the resolver.
    #[inline]
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// The number of bytes stored for this entry.
    #[inline]
    pub fn compressed_size(&self) -> u32 {
        self.compressed_size
    }

    /// The decompressed size of this entry.
    #[inline]
    pub fn real_size(&self) -> u32 {
        self.real_size
    }

    /// Overrides the recorded decompressed size.
    pub fn set_real_size(&mut self, real_size: u32) -> Result<(), ArchiveError> {
        if real_size > MAX_REAL_SIZE {
            return Err(ArchiveError::EntryTooLarge(real_size as usize));
        }

        self.real_size = real_size;
        Ok(())
    }

    /// The compression quality tier of this entry.
    #[inline]
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Sets the compression quality tier, in range `0..=7`.
    pub fn set_quality(&mut self, quality: u8) -> Result<(), ArchiveError> {
        if quality > MAX_QUALITY {
            return Err(ArchiveError::InvalidQuality(quality));
        }

        self.quality = quality;
        Ok(())
    }

    /// The stored bytes, exactly as they will be written to disk.
    #[inline]
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Gets the entry contents.
    ///
    /// With `decompress` set, the stored bytes are inflated and must
    /// produce exactly [`ArchiveEntry::real_size`] bytes. Otherwise the
    /// stored bytes are borrowed unchanged.
    pub fn data(&self, decompress: bool) -> Result<Cow<'_, [u8]>, ArchiveError> {
        if !decompress {
            return Ok(Cow::Borrowed(&self.data));
        }

        match crate::decompress(&self.data, self.real_size as usize) {
            Ok(data) => Ok(Cow::Owned(data)),
            Err(e) => {
                log::error!("Failed to decompress '{}': {e}", self.path);
                Err(ArchiveError::Zlib(e))
            }
        }
    }

    /// Replaces the entry contents.
    ///
    /// With `compress` set, `data` is deflated first and both sizes
    /// are updated accordingly. Otherwise `data` is stored verbatim
    /// and both sizes equal its length.
    ///
    /// On failure, the entry is left unchanged.
    pub fn set_data(&mut self, data: &[u8], compress: bool) -> Result<(), ArchiveError> {
        let real_size = checked_real_size(data.len())?;

        if !compress {
            self.data = data.to_vec();
            self.compressed_size = real_size;
            self.real_size = real_size;
            return Ok(());
        }

        let compressed = match crate::compress(data) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to compress '{}': {e}", self.path);
                return Err(ArchiveError::Deflate(e));
            }
        };

        self.compressed_size = u32::try_from(compressed.len())
            .map_err(|_| ArchiveError::EntryTooLarge(compressed.len()))?;
        self.real_size = real_size;
        self.data = compressed;

        Ok(())
    }

    /// Stores an [`EntryData`] payload.
    pub fn store(&mut self, data: EntryData<'_>) -> Result<(), ArchiveError> {
        match data {
            EntryData::Raw(raw) => self.set_data(raw, true),
            EntryData::Compressed { data, real_size } => {
                if real_size > MAX_REAL_SIZE {
                    return Err(ArchiveError::EntryTooLarge(real_size as usize));
                }

                self.set_data(data, false)?;
                if real_size != 0 {
                    self.real_size = real_size;
                }
                Ok(())
            }
        }
    }
}

fn checked_real_size(len: usize) -> Result<u32, ArchiveError> {
    u32::try_from(len)
        .ok()
        .filter(|&size| size <= MAX_REAL_SIZE)
        .ok_or(ArchiveError::EntryTooLarge(len))
}
