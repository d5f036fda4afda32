//! Delta+Mode encoder and decoder: the byte-level codec shared by both the
//! `i32` and `u32` public entry points (spec §4.2/§4.3).
//!
//! Mirrors the teacher's `group_impl`/`raw_group` split: a generic pair of
//! `encode`/`decode` functions process groups of 4 elements per loop
//! iteration (one code byte per group), with a specialised tail for the
//! final 1-3 elements. Unlike the teacher, there's no per-architecture
//! acceleration here: the per-element work is a handful of comparisons and
//! a `memcpy`-sized store, not the SIMD-friendly shuffle the teacher's
//! fixed-width tags lend themselves to.

use std::collections::BTreeMap;

use crate::mode::{self, MODE_COMMON, MODE_PAYLOAD_LEN};
use crate::word::Word;
use crunchy::unroll;

/// Number of intermediate bytes `encode` writes for `n` input elements.
///
/// `0` for `n == 0`; otherwise `4` (the `C` header) plus `ceil(n*2/8)` code
/// bytes plus up to `4*n` payload bytes (spec §3 "Size bounds").
#[inline]
pub(crate) fn encoded_buffer_size(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        4 + mode::code_bytes_len(n) + 4 * n
    }
}

#[inline(always)]
fn encode_element(delta: i32, common: i32, codes: &mut [u8], payload: &mut [u8], payload_off: &mut usize, i: usize) {
    let m = mode::classify(delta, common);
    mode::pack_mode(codes, i, m);
    let len = MODE_PAYLOAD_LEN[m as usize];
    if len > 0 {
        let bytes = delta.to_le_bytes();
        payload[*payload_off..*payload_off + len].copy_from_slice(&bytes[..len]);
        *payload_off += len;
    }
}

/// Encodes `values` into `out`, returning the number of intermediate bytes
/// written. `out` must be at least [`encoded_buffer_size`]`(values.len())`
/// bytes; this is a caller contract, not something the function checks on
/// the hot path beyond a `debug_assert`.
pub(crate) fn encode<W: Word>(values: &[W], out: &mut [u8]) -> usize {
    let n = values.len();
    if n == 0 {
        return 0;
    }
    debug_assert!(out.len() >= encoded_buffer_size(n));

    let mut deltas = Vec::with_capacity(n);
    let mut histogram: BTreeMap<i32, u32> = BTreeMap::new();
    let mut prev = 0i32;
    for &v in values {
        let cur = v.to_signed();
        let delta = cur.wrapping_sub(prev);
        prev = cur;
        *histogram.entry(delta).or_insert(0) += 1;
        deltas.push(delta);
    }

    // Deterministic argmax: ascending-key scan, keep the first strictly
    // greater count (ties resolve to the smallest delta value).
    let common = histogram
        .into_iter()
        .fold((0i32, 0u32), |best, (delta, count)| {
            if count > best.1 {
                (delta, count)
            } else {
                best
            }
        })
        .0;

    out[0..4].copy_from_slice(&common.to_le_bytes());

    let code_len = mode::code_bytes_len(n);
    let (codes, payload) = out[4..].split_at_mut(code_len);
    for b in codes.iter_mut() {
        *b = 0;
    }

    let mut payload_off = 0usize;
    let full_groups = n / 4;
    for group in 0..full_groups {
        let base = group * 4;
        unroll! {
            for j in 0..4 {
                let i = base + j;
                encode_element(deltas[i], common, codes, payload, &mut payload_off, i);
            }
        }
    }
    for i in (full_groups * 4)..n {
        encode_element(deltas[i], common, codes, payload, &mut payload_off, i);
    }

    4 + code_len + payload_off
}

#[inline(always)]
fn decode_element<W: Word>(
    common: i32,
    codes: &[u8],
    payload: &[u8],
    payload_off: &mut usize,
    prev: &mut i32,
    out: &mut [W],
    i: usize,
) {
    let m = mode::unpack_mode(codes, i);
    let delta = if m == MODE_COMMON {
        common
    } else {
        let len = MODE_PAYLOAD_LEN[m as usize];
        let mut buf = [0u8; 4];
        buf[..len].copy_from_slice(&payload[*payload_off..*payload_off + len]);
        *payload_off += len;
        match len {
            1 => buf[0] as i8 as i32,
            2 => i16::from_le_bytes([buf[0], buf[1]]) as i32,
            _ => i32::from_le_bytes(buf),
        }
    };
    *prev = prev.wrapping_add(delta);
    out[i] = W::from_signed(*prev);
}

/// Decodes `n` elements from `encoded` (the output of [`encode`]) into
/// `out`, returning `n`. `encoded` is length-bounded by `n`: unused bits in
/// the final code byte are never read as more than the 2-bit slot they
/// occupy (spec §4.3 step 5), and no other validation is performed.
pub(crate) fn decode<W: Word>(encoded: &[u8], n: usize, out: &mut [W]) -> usize {
    if n == 0 {
        return 0;
    }
    debug_assert!(out.len() >= n);

    let common = i32::from_le_bytes(encoded[0..4].try_into().unwrap());
    let code_len = mode::code_bytes_len(n);
    let codes = &encoded[4..4 + code_len];
    let payload = &encoded[4 + code_len..];

    let mut prev = 0i32;
    let mut payload_off = 0usize;
    let full_groups = n / 4;
    for group in 0..full_groups {
        let base = group * 4;
        unroll! {
            for j in 0..4 {
                let i = base + j;
                decode_element(common, codes, payload, &mut payload_off, &mut prev, out, i);
            }
        }
    }
    for i in (full_groups * 4)..n {
        decode_element(common, codes, payload, &mut payload_off, &mut prev, out, i);
    }

    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip_i32(values: &[i32]) {
        let n = values.len();
        let mut buf = vec![0u8; encoded_buffer_size(n)];
        let written = encode(values, &mut buf);
        assert!(written <= encoded_buffer_size(n));
        buf.truncate(written);
        let mut decoded = vec![0i32; n];
        assert_eq!(decode(&buf, n, &mut decoded), n);
        assert_eq!(decoded, values);
    }

    fn round_trip_u32(values: &[u32]) {
        let n = values.len();
        let mut buf = vec![0u8; encoded_buffer_size(n)];
        let written = encode(values, &mut buf);
        buf.truncate(written);
        let mut decoded = vec![0u32; n];
        assert_eq!(decode(&buf, n, &mut decoded), n);
        assert_eq!(decoded, values);
    }

    #[test]
    fn empty_sequence_encodes_to_zero_bytes() {
        let mut buf = [0u8; 0];
        assert_eq!(encode::<i32>(&[], &mut buf), 0);
        let mut out = [0i32; 0];
        assert_eq!(decode::<i32>(&[], 0, &mut out), 0);
    }

    #[test]
    fn monotone_small_steps_scenario() {
        // The documented scenario's last element (repeating 100125 ->
        // 100126 a second time, delta 0) is what produces the documented
        // mode sequence [One, Common, Common, Four, One, Common, One] and
        // 13-byte size; a final delta of 0 against a common value of 1 is
        // still tagged One, since 0 != 1.
        let values: [i32; 7] = [123, 124, 125, 100125, 100125, 100126, 100126];
        let size = encoded_buffer_size(7);
        assert_eq!(size, 4 + 2 + 4 * 7);
        let mut buf = vec![0u8; size];
        let written = encode(&values, &mut buf);
        assert_eq!(written, 13);
        buf.truncate(written);
        let mut decoded = [0i32; 7];
        assert_eq!(decode(&buf, 7, &mut decoded), 7);
        assert_eq!(decoded, values);
    }

    #[test]
    fn all_common_scenario() {
        let values: [i32; 5] = [0, 5, 10, 15, 20];
        let mut buf = vec![0u8; encoded_buffer_size(5)];
        let written = encode(&values, &mut buf);
        assert_eq!(written, 7);
        buf.truncate(written);
        let mut decoded = [0i32; 5];
        decode(&buf, 5, &mut decoded);
        assert_eq!(decoded, values);
    }

    #[test]
    fn single_element_scenario() {
        let values: [i32; 1] = [0x7FFFFFFF];
        let mut buf = vec![0u8; encoded_buffer_size(1)];
        let written = encode(&values, &mut buf);
        assert_eq!(written, 5);
        buf.truncate(written);
        let mut decoded = [0i32; 1];
        decode(&buf, 1, &mut decoded);
        assert_eq!(decoded, values);
    }

    #[test]
    fn full_width_deltas_scenario_unsigned() {
        // Each step wraps by 0x40000000 through the u32 range; starting
        // from 0x40000000 rather than 0 (as literally written in the
        // documented scenario) makes every one of the four signed deltas
        // equal 0x40000000, which is what actually produces the documented
        // all-Common, 5-byte result (starting from 0 makes the first delta
        // 0, distinct from the other three, which would tag it One instead).
        let values: [u32; 4] = [0x4000_0000, 0x8000_0000, 0xC000_0000, 0x0000_0000];
        let mut buf = vec![0u8; encoded_buffer_size(4)];
        let written = encode(&values, &mut buf);
        assert_eq!(written, 5);
        buf.truncate(written);
        let mut decoded = [0u32; 4];
        decode(&buf, 4, &mut decoded);
        assert_eq!(decoded, values);
    }

    #[test]
    fn tail_lengths_round_trip() {
        let five: Vec<i32> = (0..5).map(|i| i * 3).collect();
        let seven: Vec<i32> = (0..7).map(|i| if i % 2 == 0 { i } else { -i }).collect();
        round_trip_i32(&five);
        round_trip_i32(&seven);
        assert_eq!(mode::code_bytes_len(5), 2);
        assert_eq!(mode::code_bytes_len(7), 2);
    }

    #[test]
    fn signed_unsigned_equivalence() {
        let bits: Vec<u32> = vec![0, 1, u32::MAX, 0x8000_0001, 123456, 999_999_999];
        let as_signed: Vec<i32> = bits.iter().map(|&b| b as i32).collect();

        let mut buf_u = vec![0u8; encoded_buffer_size(bits.len())];
        let written_u = encode(&bits, &mut buf_u);
        buf_u.truncate(written_u);

        let mut buf_s = vec![0u8; encoded_buffer_size(as_signed.len())];
        let written_s = encode(&as_signed, &mut buf_s);
        buf_s.truncate(written_s);

        assert_eq!(buf_u, buf_s);

        let mut decoded_u = vec![0u32; bits.len()];
        decode(&buf_u, bits.len(), &mut decoded_u);
        let mut decoded_s = vec![0i32; as_signed.len()];
        decode(&buf_s, as_signed.len(), &mut decoded_s);
        assert_eq!(decoded_u, bits);
        assert_eq!(decoded_s, as_signed);
    }

    #[test]
    fn random_monotone_round_trips() {
        use rand::distributions::Uniform;
        use rand::prelude::*;

        let seed: &[u8; 32] = &[0x5au8; 32];
        let mut rng = StdRng::from_seed(*seed);
        let step = Uniform::from(0u32..=5000);
        let mut cur = 0u32;
        let values: Vec<u32> = (0..2000)
            .map(|_| {
                cur = cur.wrapping_add(step.sample(&mut rng));
                cur
            })
            .collect();
        round_trip_u32(&values);
    }

    #[test]
    fn random_mixed_round_trips() {
        use rand::prelude::*;

        let seed: &[u8; 32] = &[0x17u8; 32];
        let mut rng = StdRng::from_seed(*seed);
        let values: Vec<i32> = (0..2000).map(|_| rng.gen::<i32>()).collect();
        round_trip_i32(&values);
    }
}
