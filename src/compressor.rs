//! The pluggable byte-stream compressor stage (spec §4.4) and its default
//! LZ4-backed implementation.
//!
//! This is the one piece of the crate with no direct ancestor in the
//! teacher: stream-vbyte ships no second compression stage of its own. The
//! adapter is built directly against `lz4_flex`'s block API:
//! `get_maximum_output_size` sizes a destination buffer up front, then
//! `compress_into`/`decompress_into` write into that buffer rather than the
//! convenience `Vec`-returning wrappers.

/// A general-purpose byte-stream compressor satisfying the three-function
/// interface spec §4.4 requires of stage 2.
pub trait ByteStreamCompressor {
    /// Upper bound on the compressed size of a `src_size`-byte input.
    fn bound_for(src_size: usize) -> usize;

    /// Compresses `src` into `dst`, returning the number of bytes written.
    ///
    /// `dst` must be at least [`Self::bound_for`]`(src.len())` bytes; this
    /// is a caller contract; compressing a buffer within its own bound
    /// cannot fail, so implementations may panic rather than return an
    /// error here.
    fn compress_to_buffer(src: &[u8], dst: &mut [u8]) -> usize;

    /// Decompresses `src` into `dst`, returning the number of bytes
    /// written, or `0` if `src` is corrupt or truncated.
    fn decompress_from_buffer(src: &[u8], dst: &mut [u8]) -> usize;
}

/// The reference byte-stream compressor: LZ4 block format via `lz4_flex`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lz4BlockCompressor;

impl ByteStreamCompressor for Lz4BlockCompressor {
    #[inline]
    fn bound_for(src_size: usize) -> usize {
        lz4_flex::block::get_maximum_output_size(src_size)
    }

    fn compress_to_buffer(src: &[u8], dst: &mut [u8]) -> usize {
        if src.is_empty() {
            return 0;
        }
        lz4_flex::block::compress_into(src, dst)
            .expect("dst sized via Lz4BlockCompressor::bound_for cannot be too small")
    }

    fn decompress_from_buffer(src: &[u8], dst: &mut [u8]) -> usize {
        if src.is_empty() {
            return 0;
        }
        lz4_flex::block::decompress_into(src, dst).unwrap_or(0)
    }
}

/// A no-op compressor used in tests to exercise the delta codec (stage 1)
/// in isolation from LZ4 (stage 2).
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PassthroughCompressor;

#[cfg(test)]
impl ByteStreamCompressor for PassthroughCompressor {
    fn bound_for(src_size: usize) -> usize {
        src_size
    }

    fn compress_to_buffer(src: &[u8], dst: &mut [u8]) -> usize {
        dst[..src.len()].copy_from_slice(src);
        src.len()
    }

    fn decompress_from_buffer(src: &[u8], dst: &mut [u8]) -> usize {
        dst[..src.len()].copy_from_slice(src);
        src.len()
    }
}
