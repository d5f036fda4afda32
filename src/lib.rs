/*! # Delta-coded index-list compression

A lossless, length-preserving codec for the structural sections of a
binary scene-description container: lists of 32-bit indices into parallel
tables (parent pointers, child spans, field indices, path references).
These lists are typically monotonic, piecewise-constant, or dominated by a
small set of step sizes, and are compressed in two stages:

1. A variable-width delta encoder ([`codec`]) that reduces the sequence to
   a 4-byte "most common delta" header, a packed array of 2-bit per-element
   mode tags, and a variable-width payload of the non-common deltas.
2. A general-purpose byte-stream compressor ([`ByteStreamCompressor`],
   defaulting to [`Lz4BlockCompressor`]) applied to that intermediate
   buffer (repeated common-delta tags all encode as zero bits, so runs of
   identical elements compress very well once LZ4 sees the intermediate
   bytes).

The element count `N` is not self-described anywhere in the format: callers
must track it out of band and supply it back at decode time.

## Example

```
use scene_index_compression::{
    compressed_buffer_size, compress_to_buffer_u32, decompress_from_buffer_u32,
};

let indices: Vec<u32> = vec![10, 11, 12, 12, 12, 40, 41];
let mut compressed = vec![0u8; compressed_buffer_size(indices.len())];
let compressed_len = compress_to_buffer_u32(&indices, &mut compressed);
compressed.truncate(compressed_len);

let mut decoded = vec![0u32; indices.len()];
let n = decompress_from_buffer_u32(&compressed, indices.len(), &mut decoded, None);
assert_eq!(n, indices.len());
assert_eq!(decoded, indices);
```
*/

mod bridge;
mod codec;
mod compressor;
mod mode;
mod word;

pub use compressor::{ByteStreamCompressor, Lz4BlockCompressor};
use word::Word;

/// Number of intermediate (pre-compression) bytes the delta encoder writes
/// for a sequence of `n` elements. `0` for `n == 0`.
#[inline]
pub fn encoded_buffer_size(n: usize) -> usize {
    codec::encoded_buffer_size(n)
}

/// Scratch space a decode call needs to hold the decompressed intermediate
/// buffer before the delta decoder runs. Always equal to
/// [`encoded_buffer_size`].
#[inline]
pub fn decompression_working_space_size(n: usize) -> usize {
    encoded_buffer_size(n)
}

/// Upper bound on the compressed size of a sequence of `n` elements, using
/// the default compressor ([`Lz4BlockCompressor`]).
#[inline]
pub fn compressed_buffer_size(n: usize) -> usize {
    compressed_buffer_size_with::<Lz4BlockCompressor>(n)
}

/// As [`compressed_buffer_size`], parameterized over a pluggable
/// [`ByteStreamCompressor`].
///
/// `N == 0` is special-cased to `0` rather than deferring to the
/// compressor's bound, since stage 1 never emits bytes for an empty
/// sequence and there is nothing for stage 2 to be bounded against (spec
/// §8 "Empty input").
#[inline]
pub fn compressed_buffer_size_with<C: ByteStreamCompressor>(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        C::bound_for(encoded_buffer_size(n))
    }
}

fn compress_to_buffer<C: ByteStreamCompressor, W: Word>(values: &[W], out: &mut [u8]) -> usize {
    let mut scratch = vec![0u8; encoded_buffer_size(values.len())];
    let scratch_len = codec::encode(values, &mut scratch);
    C::compress_to_buffer(&scratch[..scratch_len], out)
}

fn decompress_from_buffer<C: ByteStreamCompressor, W: Word>(
    compressed: &[u8],
    n: usize,
    out: &mut [W],
    working_space: Option<&mut [u8]>,
) -> usize {
    if n == 0 {
        return 0;
    }

    let mut owned_scratch;
    let scratch: &mut [u8] = match working_space {
        Some(ws) => ws,
        None => {
            owned_scratch = vec![0u8; decompression_working_space_size(n)];
            &mut owned_scratch
        }
    };

    let decompressed_len = C::decompress_from_buffer(compressed, scratch);
    if decompressed_len == 0 {
        return 0;
    }
    codec::decode(&scratch[..decompressed_len], n, out)
}

/// Compresses a sequence of signed 32-bit values into `out`, using the
/// default compressor. Returns the compressed size.
///
/// `out` must be at least [`compressed_buffer_size`]`(values.len())` bytes.
#[inline]
pub fn compress_to_buffer_i32(values: &[i32], out: &mut [u8]) -> usize {
    compress_to_buffer::<Lz4BlockCompressor, i32>(values, out)
}

/// As [`compress_to_buffer_i32`], for unsigned 32-bit values (reinterpreted
/// through the signed/unsigned bridge internally).
#[inline]
pub fn compress_to_buffer_u32(values: &[u32], out: &mut [u8]) -> usize {
    compress_to_buffer::<Lz4BlockCompressor, u32>(values, out)
}

/// As [`compress_to_buffer_i32`]/[`compress_to_buffer_u32`], parameterized
/// over a pluggable [`ByteStreamCompressor`].
#[inline]
pub fn compress_to_buffer_i32_with<C: ByteStreamCompressor>(values: &[i32], out: &mut [u8]) -> usize {
    compress_to_buffer::<C, i32>(values, out)
}

/// As [`compress_to_buffer_i32_with`], for unsigned 32-bit values.
#[inline]
pub fn compress_to_buffer_u32_with<C: ByteStreamCompressor>(values: &[u32], out: &mut [u8]) -> usize {
    compress_to_buffer::<C, u32>(values, out)
}

/// Decompresses `compressed` (the output of [`compress_to_buffer_i32`]) into
/// `out`, which must hold exactly `n` elements. Returns `n` on success, or
/// `0` if `compressed` is corrupt or truncated.
///
/// `working_space`, if supplied, must be at least
/// [`decompression_working_space_size`]`(n)` bytes and must not be shared
/// with a concurrent call; if absent, scratch space is allocated
/// internally.
#[inline]
pub fn decompress_from_buffer_i32(
    compressed: &[u8],
    n: usize,
    out: &mut [i32],
    working_space: Option<&mut [u8]>,
) -> usize {
    decompress_from_buffer::<Lz4BlockCompressor, i32>(compressed, n, out, working_space)
}

/// As [`decompress_from_buffer_i32`], for unsigned 32-bit values.
#[inline]
pub fn decompress_from_buffer_u32(
    compressed: &[u8],
    n: usize,
    out: &mut [u32],
    working_space: Option<&mut [u8]>,
) -> usize {
    decompress_from_buffer::<Lz4BlockCompressor, u32>(compressed, n, out, working_space)
}

/// As [`decompress_from_buffer_i32`]/[`decompress_from_buffer_u32`],
/// parameterized over a pluggable [`ByteStreamCompressor`].
#[inline]
pub fn decompress_from_buffer_i32_with<C: ByteStreamCompressor>(
    compressed: &[u8],
    n: usize,
    out: &mut [i32],
    working_space: Option<&mut [u8]>,
) -> usize {
    decompress_from_buffer::<C, i32>(compressed, n, out, working_space)
}

/// As [`decompress_from_buffer_i32_with`], for unsigned 32-bit values.
#[inline]
pub fn decompress_from_buffer_u32_with<C: ByteStreamCompressor>(
    compressed: &[u8],
    n: usize,
    out: &mut [u32],
    working_space: Option<&mut [u8]>,
) -> usize {
    decompress_from_buffer::<C, u32>(compressed, n, out, working_space)
}
