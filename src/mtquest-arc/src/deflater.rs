use libdeflater::{CompressionError, CompressionLvl, Compressor};

/// A zlib deflater for compressing archive entries.
///
/// This maintains an internal scratch buffer whose memory will be
/// reused for subsequent compressions with the same [`Deflater`]
/// instance.
///
/// This however comes at the caveat that only one compressed entry
/// can be borrowed from the deflater at a time.
pub struct Deflater {
    compressor: Compressor,
    scratch: Vec<u8>,
}

impl Deflater {
    /// Creates an empty deflater at the default zlib compression
    /// level, which is what the game's own tooling produces.
    pub fn new() -> Self {
        Self {
            compressor: Compressor::new(CompressionLvl::default()),
            scratch: Vec::new(),
        }
    }

    /// Compresses a raw buffer into the inner scratch buffer and
    /// returns the subset of the slice occupied by it.
    pub fn compress(&mut self, data: &[u8]) -> Result<&[u8], CompressionError> {
        let max_size = self.compressor.zlib_compress_bound(data.len());
        self.scratch.resize(max_size, 0);

        let compressed_size = self.compressor.zlib_compress(data, &mut self.scratch)?;
        debug_assert!(compressed_size <= max_size);

        Ok(&self.scratch[..compressed_size])
    }
}

impl Default for Deflater {
    fn default() -> Self {
        Self::new()
    }
}

/// Compresses `data` into a newly allocated zlib stream.
///
/// The compressed size is the length of the returned buffer.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    Deflater::new().compress(data).map(<[u8]>::to_vec)
}
