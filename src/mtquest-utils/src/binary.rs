//! Utilities for reading and writing structured little-endian
//! binary data.

use std::{
    io::{self, Read, Write},
    mem,
};

/// Reads a 32-bit magic value from the stream and compares it
/// against `expected`.
///
/// On mismatch, the value that was actually found is returned
/// in the error.
#[inline]
pub fn magic<R: Read>(data: &mut R, expected: u32) -> io::Result<Result<(), u32>> {
    let found = uint32(data)?;
    Ok(if found == expected { Ok(()) } else { Err(found) })
}

macro_rules! int_read_impl {
    ($($fn:ident() -> $ty:ty),* $(,)*) => {
        $(
            #[doc = concat!("Parses a [`", stringify!($ty), "`] value off the data stream.")]
            #[inline]
            pub fn $fn<R: Read>(data: &mut R) -> io::Result<$ty> {
                let mut v = [0; mem::size_of::<$ty>()];
                data.read_exact(&mut v)?;
                Ok(<$ty>::from_le_bytes(v))
            }
        )*
    };
}

macro_rules! int_write_impl {
    ($($fn:ident($ty:ty)),* $(,)*) => {
        $(
            #[doc = concat!("Writes a [`", stringify!($ty), "`] value to the data stream.")]
            #[inline]
            pub fn $fn<W: Write>(out: &mut W, v: $ty) -> io::Result<()> {
                out.write_all(&v.to_le_bytes())
            }
        )*
    };
}

int_read_impl! {
    int16() -> i16,
    uint32() -> u32,
    int32() -> i32,
}

int_write_impl! {
    write_int16(i16),
    write_uint32(u32),
    write_int32(i32),
}

/// Shortens `s` to at most `max` bytes without splitting a
/// multi-byte UTF-8 sequence.
pub fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Decodes a NUL-padded string out of a fixed-width byte field.
///
/// Everything from the first NUL byte onwards is discarded. When
/// no terminator is present, the whole field makes up the string.
/// Invalid UTF-8 is replaced rather than rejected since names are
/// only ever compared and displayed.
pub fn fixed_str_from_bytes(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Encodes `s` into a NUL-padded field of `N` bytes.
///
/// The string is truncated on a character boundary so that at
/// least one terminating NUL byte always remains.
pub fn fixed_str_to_bytes<const N: usize>(s: &str) -> [u8; N] {
    let mut field = [0; N];
    let s = truncate_utf8(s, N.saturating_sub(1));
    field[..s.len()].copy_from_slice(s.as_bytes());
    field
}

/// Reads a NUL-padded string out of a fixed-width field of `N`
/// bytes in the data stream.
#[inline]
pub fn fixed_str<R: Read, const N: usize>(data: &mut R) -> io::Result<String> {
    let mut field = [0; N];
    data.read_exact(&mut field)?;
    Ok(fixed_str_from_bytes(&field))
}

/// Writes `s` as a NUL-padded field of `N` bytes to the stream.
#[inline]
pub fn write_fixed_str<W: Write, const N: usize>(out: &mut W, s: &str) -> io::Result<()> {
    out.write_all(&fixed_str_to_bytes::<N>(s))
}

/// Writes `count` zero bytes to the stream.
#[inline]
pub fn write_zeroes<W: Write>(out: &mut W, count: u64) -> io::Result<()> {
    io::copy(&mut io::repeat(0).take(count), out).map(|_| ())
}

/// Parses a sequence of `count` elements using the given parser.
///
/// The parser function freely defines how to parse one element
/// of the sequence.
#[inline]
pub fn seq<F, R, T>(data: &mut R, count: usize, mut f: F) -> io::Result<Vec<T>>
where
    F: FnMut(&mut R) -> io::Result<T>,
    R: Read,
{
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(f(data)?);
    }
    Ok(out)
}
