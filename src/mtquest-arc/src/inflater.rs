use libdeflater::{DecompressionError, Decompressor};

/// A zlib inflater for decompressing archive entries.
///
/// This maintains an internal scratch buffer whose allocation
/// will be re-used for subsequent decompression on the same
/// [`Inflater`] object.
///
/// This however comes at the caveat that only one decompressed
/// entry can be borrowed from the inflater at a time.
pub struct Inflater {
    raw: Decompressor,
    scratch: Vec<u8>,
}

impl Inflater {
    /// Creates a new inflater for zlib decompression.
    pub fn new() -> Self {
        Self {
            raw: Decompressor::new(),
            scratch: Vec::new(),
        }
    }

    /// Decompresses the given `data` into a provided external
    /// buffer and returns a reference to it back.
    ///
    /// The length of `out` is the exact size the inflated data
    /// must have, otherwise this method will error.
    pub fn decompress_into<'a>(
        &mut self,
        out: &'a mut [u8],
        data: &[u8],
    ) -> Result<&'a [u8], DecompressionError> {
        let written = self.raw.zlib_decompress(data, out)?;
        if written != out.len() {
            return Err(DecompressionError::BadData);
        }

        Ok(out)
    }

    /// Decompresses the given `data` into the internal scratch
    /// buffer and returns a reference to it.
    ///
    /// `real_size` must be the size of inflated output, otherwise
    /// this method will error.
    pub fn decompress(
        &mut self,
        data: &[u8],
        real_size: usize,
    ) -> Result<&[u8], DecompressionError> {
        self.scratch.resize(real_size, 0);

        let written = self.raw.zlib_decompress(data, &mut self.scratch)?;
        if written != real_size {
            return Err(DecompressionError::BadData);
        }

        Ok(&self.scratch)
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

/// Inflates `data` into a newly allocated buffer of exactly
/// `real_size` bytes.
///
/// Fails when the codec rejects the stream or when the inflated
/// length differs from `real_size`.
pub fn decompress(data: &[u8], real_size: usize) -> Result<Vec<u8>, DecompressionError> {
    let mut out = vec![0; real_size];
    Inflater::new().decompress_into(&mut out, data)?;
    Ok(out)
}
