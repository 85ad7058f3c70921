//! Utilities for aligning file offsets.

/// Aligns `value` down to a multiple of `align`.
///
/// # Panics
///
/// Panics in debug mode when `align` is not a power of two.
#[inline(always)]
pub const fn align_down(value: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    value & !(align - 1)
}

/// Aligns `value` up to the next multiple of `align`.
///
/// Values which are already aligned are returned unchanged.
///
/// # Panics
///
/// Panics in debug mode when `align` is not a power of two.
#[inline(always)]
pub const fn align_up(value: u64, align: u64) -> u64 {
    align_down(value + align - 1, align)
}

/// Computes how many padding bytes are needed to bring `value`
/// up to the next multiple of `align`.
#[inline(always)]
pub const fn padding_for(value: u64, align: u64) -> u64 {
    align_up(value, align) - value
}
