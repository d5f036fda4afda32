//! Signed/unsigned reinterpretation at the 32-bit boundary.
//!
//! Delta arithmetic throughout this crate is carried out in signed space so
//! that negative deltas collapse into the narrow one- and two-byte payload
//! widths instead of always taking the four-byte path. Index sequences
//! handed to the codec are frequently `u32`, so every `u32` value must first
//! be reinterpreted as the `i32` with the same bit pattern.

/// Reinterprets `u` as the `i32` with the same bit pattern.
///
/// Equivalent to the reference's `u <= INT32_MAX ? (int32)u : (int32)(u -
/// 2^31) + INT32_MIN`: both branches describe the same two's-complement
/// reinterpretation, which is exactly what `as i32` performs on every target
/// Rust supports.
#[inline]
pub(crate) fn signed32(u: u32) -> i32 {
    u as i32
}

/// Reinterprets `i` as the `u32` with the same bit pattern.
///
/// This is the decoder's half of the bridge: a plain bit-pattern
/// reinterpretation, well-defined on every target.
#[inline]
pub(crate) fn unsigned32(i: i32) -> u32 {
    i as u32
}
