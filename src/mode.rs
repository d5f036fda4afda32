//! The 2-bit per-element mode tag (spec §3 "Mode code") and the code-byte
//! packing scheme that stores four of them per byte.
//!
//! This plays the role the teacher's `tag_utils`/`coding_descriptor` modules
//! play for its byte-length tags: a small set of `const` tables plus a
//! classifier, kept separate from the encoder/decoder loops that use them.

/// This delta equals the sequence's common value; no payload bytes.
pub(crate) const MODE_COMMON: u8 = 0b00;
/// Delta fits in a signed 8-bit payload.
pub(crate) const MODE_ONE: u8 = 0b01;
/// Delta fits in a signed 16-bit payload (but not 8).
pub(crate) const MODE_TWO: u8 = 0b10;
/// Delta requires the full signed 32-bit payload.
pub(crate) const MODE_FOUR: u8 = 0b11;

/// Payload byte length for each of the four mode codes, indexed by the
/// 2-bit code value.
pub(crate) const MODE_PAYLOAD_LEN: [usize; 4] = [0, 1, 2, 4];

/// Classifies `delta` against the chosen common value `common`, returning
/// the tightest mode code.
///
/// A `Common` code is returned whenever `delta == common`, even when a
/// narrower width code would also fit: the decoder has no other way to know
/// a `Common`-eligible delta wasn't spelled out explicitly.
#[inline]
pub(crate) fn classify(delta: i32, common: i32) -> u8 {
    if delta == common {
        MODE_COMMON
    } else if delta == delta as i8 as i32 {
        MODE_ONE
    } else if delta == delta as i16 as i32 {
        MODE_TWO
    } else {
        MODE_FOUR
    }
}

/// Number of code bytes needed to hold `n` 2-bit mode codes, 4 per byte.
#[inline]
pub(crate) const fn code_bytes_len(n: usize) -> usize {
    (n * 2 + 7) / 8
}

/// Packs `mode` for element `i` into its slot within `codes`.
#[inline]
pub(crate) fn pack_mode(codes: &mut [u8], i: usize, mode: u8) {
    let byte = i / 4;
    let shift = 2 * (i % 4);
    codes[byte] |= mode << shift;
}

/// Reads the mode for element `i` out of `codes`, ignoring the other three
/// slots that happen to share its byte.
#[inline]
pub(crate) fn unpack_mode(codes: &[u8], i: usize) -> u8 {
    let byte = i / 4;
    let shift = 2 * (i % 4);
    (codes[byte] >> shift) & 0b11
}
