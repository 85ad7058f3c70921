use std::{
    fs,
    io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use mtquest_utils::{
    binary,
    libdeflater::{CompressionError, DecompressionError},
    thiserror::Error,
};
use tempfile::NamedTempFile;

use crate::{
    ext::ExtensionResolver,
    types::{self, Descriptor, Header},
    ArchiveEntry, Container,
};

/// The file extension archives are expected to carry.
pub const EXTENSION: &str = "arc";

/// Errors that may occur when working with ARC containers.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// An I/O operation when reading or writing a file failed.
    #[error("archive I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file to open does not carry the `.arc` extension.
    #[error("invalid file extension for archive '{}'", .0.display())]
    Extension(PathBuf),

    /// The archive does not start with the expected magic.
    #[error("invalid archive magic {0:#010X}")]
    Magic(u32),

    /// The archive uses an unsupported format version.
    #[error("unsupported archive version {0:#06X}")]
    Version(i16),

    /// The header declares a negative number of entries.
    #[error("invalid entry count {0}")]
    FileCount(i16),

    /// The configured data alignment is not a power of two.
    #[error("data alignment {0:#X} is not a power of two")]
    Alignment(u64),

    /// More entries were added than the header can represent.
    #[error("too many entries to represent: {0}")]
    TooManyEntries(usize),

    /// An entry exceeds the size limits of the format.
    #[error("entry of {0} bytes is too large to represent")]
    EntryTooLarge(usize),

    /// Entry data would extend past the 32-bit offsets of the format.
    #[error("archive data would end at offset {0:#X}, past the 32-bit limit")]
    ArchiveTooLarge(u64),

    /// A quality tier outside of `0..=7` was requested.
    #[error("invalid quality tier {0}")]
    InvalidQuality(u8),

    /// Decompression of an entry failed or produced the wrong size.
    #[error("failed to decompress archive entry: {0}")]
    Zlib(#[from] DecompressionError),

    /// Compression of an entry failed.
    #[error("failed to compress archive entry: {0}")]
    Deflate(#[from] CompressionError),
}

/// Layout configuration of an archive.
#[derive(Clone, Copy, Debug)]
pub struct ArchiveConfig {
    /// Alignment of the entry data region.
    ///
    /// Must be a power of two. This is fixed per format revision,
    /// see [`types::DATA_ALIGNMENT`] and [`types::LEGACY_DATA_ALIGNMENT`].
    pub alignment: u64,
    /// The table used to derive entry extensions.
    pub resolver: ExtensionResolver,
}

impl ArchiveConfig {
    /// Configuration for archives of the previous format revision.
    pub fn legacy() -> Self {
        Self {
            alignment: types::LEGACY_DATA_ALIGNMENT,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), ArchiveError> {
        if self.alignment.is_power_of_two() {
            Ok(())
        } else {
            Err(ArchiveError::Alignment(self.alignment))
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            alignment: types::DATA_ALIGNMENT,
            resolver: ExtensionResolver::default(),
        }
    }
}

/// Representation of an ARC container loaded into memory.
///
/// Entries own their data buffers, so the backing file is closed
/// as soon as loading has finished. The in-memory entry order is
/// the order in which entries will be written on save.
#[derive(Clone, Debug)]
pub struct Archive {
    path: PathBuf,
    config: ArchiveConfig,
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Creates an empty archive which will be saved to `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_config(path, ArchiveConfig::default())
    }

    /// Creates an empty archive with a custom configuration.
    pub fn with_config<P: Into<PathBuf>>(path: P, config: ArchiveConfig) -> Self {
        Self {
            path: path.into(),
            config,
            entries: Vec::new(),
        }
    }

    /// Opens and fully loads the archive at `path`.
    ///
    /// The file must carry the `.arc` extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        Self::open_with(path, ArchiveConfig::default())
    }

    /// Opens and fully loads the archive at `path` using a custom
    /// configuration.
    pub fn open_with<P: AsRef<Path>>(path: P, config: ArchiveConfig) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        if path.extension().map_or(true, |ext| ext != EXTENSION) {
            log::error!("Invalid file extension {}", path.display());
            return Err(ArchiveError::Extension(path.to_path_buf()));
        }

        let file = fs::File::open(path).map_err(|e| {
            log::error!("Failed to open file {}: {e}", path.display());
            e
        })?;

        let mut this = Self::parse(&mut BufReader::new(file), config).map_err(|e| {
            log::error!("Failed to load {}: {e}", path.display());
            e
        })?;
        this.path = path.to_path_buf();

        Ok(this)
    }

    /// Parses an archive from an arbitrary seekable source.
    ///
    /// Offsets in the descriptor table are interpreted relative to
    /// the position of the reader when this is called. The path of
    /// the resulting archive is empty.
    pub fn parse<R: Read + Seek>(
        reader: &mut R,
        config: ArchiveConfig,
    ) -> Result<Self, ArchiveError> {
        config.validate()?;

        let base = reader.stream_position()?;
        let header = Header::parse(reader)?.map_err(ArchiveError::Magic)?;
        if header.version != types::VERSION {
            return Err(ArchiveError::Version(header.version));
        }
        let count = usize::try_from(header.file_count)
            .map_err(|_| ArchiveError::FileCount(header.file_count))?;

        log::debug!("Reading {count} archive entries");

        let entries = binary::seq(reader, count, |r| {
            let desc = Descriptor::parse(r)?;

            // Descriptors are read sequentially while data is scattered
            // through the file, so we come back here after each entry.
            let pos = r.stream_position()?;
            r.seek(SeekFrom::Start(base + u64::from(desc.offset)))?;
            let mut data = vec![0; desc.compressed_size as usize];
            r.read_exact(&mut data)?;
            r.seek(SeekFrom::Start(pos))?;

            log::trace!("Loaded '{}' ({} bytes)", desc.path, data.len());
            Ok(ArchiveEntry::from_descriptor(desc, data, config.resolver))
        })?;

        Ok(Self {
            path: PathBuf::new(),
            config,
            entries,
        })
    }

    /// Parses an archive from an in-memory buffer.
    pub fn from_slice(buf: &[u8], config: ArchiveConfig) -> Result<Self, ArchiveError> {
        Self::parse(&mut io::Cursor::new(buf), config)
    }

    /// The path this archive was loaded from or will be saved to.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The layout configuration of this archive.
    #[inline]
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Gets the number of entries in the archive.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive does not contain any entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes the data offset of every entry in the current order.
    pub fn data_offsets(&self) -> Result<Vec<u32>, ArchiveError> {
        let mut offset = types::data_start(self.entries.len(), self.config.alignment);
        self.entries
            .iter()
            .map(|entry| {
                let current =
                    u32::try_from(offset).map_err(|_| ArchiveError::ArchiveTooLarge(offset))?;
                offset += u64::from(entry.compressed_size());
                Ok(current)
            })
            .collect()
    }

    /// Serializes the archive to the given [`Write`]r.
    ///
    /// Offsets are written relative to the writer's position when
    /// this is called.
    ///
    /// # Panics
    ///
    /// Panics when the stream position before an entry's data does
    /// not match the offset recorded in its descriptor, which would
    /// produce an archive the game cannot load.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<(), ArchiveError> {
        self.config.validate()?;

        let file_count = i16::try_from(self.entries.len())
            .map_err(|_| ArchiveError::TooManyEntries(self.entries.len()))?;
        let offsets = self.data_offsets()?;

        let base = writer.stream_position()?;
        Header {
            version: types::VERSION,
            file_count,
        }
        .write(writer)?;

        for (entry, &offset) in self.entries.iter().zip(&offsets) {
            entry.descriptor(offset).write(writer)?;
        }

        let table_end = writer.stream_position()? - base;
        binary::write_zeroes(
            writer,
            mtquest_utils::align::padding_for(table_end, self.config.alignment),
        )?;

        for (entry, &offset) in self.entries.iter().zip(&offsets) {
            let pos = writer.stream_position()? - base;
            assert_eq!(
                pos,
                u64::from(offset),
                "data of '{}' would land at the wrong offset",
                entry.path
            );

            writer.write_all(entry.raw_data())?;
        }

        log::debug!("Wrote {} archive entries", self.entries.len());
        Ok(())
    }

    /// Serializes the archive into a newly allocated buffer.
    pub fn to_vec(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut cursor = io::Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Writes the archive to disk.
    ///
    /// When `path` is given, it becomes the new path of the archive.
    /// The data is written to a temporary file next to the target
    /// first and then moved over it, so a failed save leaves any
    /// previous file intact.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), ArchiveError> {
        if let Some(path) = path {
            self.path = path.to_path_buf();
        }

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            self.write(&mut writer)?;
            writer.flush()?;
        }

        // Keep the permissions of the file we are replacing.
        if let Ok(meta) = fs::metadata(&self.path) {
            temp.as_file().set_permissions(meta.permissions())?;
        }

        temp.persist(&self.path).map_err(|e| {
            log::error!("Failed to save {}: {}", self.path.display(), e.error);
            e.error
        })?;

        Ok(())
    }
}

impl Container for Archive {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        Archive::open(path)
    }

    #[inline]
    fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    #[inline]
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    #[inline]
    fn entries_mut(&mut self) -> &mut Vec<ArchiveEntry> {
        &mut self.entries
    }

    fn save(&mut self, path: Option<&Path>) -> Result<(), ArchiveError> {
        Archive::save(self, path)
    }
}
