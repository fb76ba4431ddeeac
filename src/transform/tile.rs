//! Sprite (C-ROM) transforms.
//!
//! A sprite pair goes through three steps, always in this order:
//! 1. [`pair_interleave`] merges the two bus images into one stream.
//! 2. [`word_byte_swap`] fixes up byte order within each 32-bit word.
//! 3. [`burst_reorder`] shuffles each 32-byte block so that a 4-word burst
//!    returns bitplanes 0 through 3 in sequence.
//!
//! [`graphics_pipeline`] runs all three over a list of pairs.
//!
//! [`pair_interleave`]: fn.pair_interleave.html
//! [`word_byte_swap`]: fn.word_byte_swap.html
//! [`burst_reorder`]: fn.burst_reorder.html
//! [`graphics_pipeline`]: fn.graphics_pipeline.html

use rayon::prelude::*;

use crate::rom::CromPair;

/// Computes the source index for output byte `i` of [`burst_reorder`].
///
/// The result always lies in the same 32-byte block as `i`.
///
/// [`burst_reorder`]: fn.burst_reorder.html
#[inline]
pub fn burst_source(i: usize) -> usize {
  (i & !0x1f) | ((i >> 2) & 0x07) | ((i & 1) << 3) | (((i & 2) << 3) ^ 0x10)
}

/// Reorders sprite data within 32-byte blocks for SDRAM burst reads.
///
/// Output byte `i` is input byte `burst_source(i)`. For a buffer whose length
/// is a multiple of 32 this is a permutation of every block. In a trailing
/// partial block, output bytes whose source lies past the end are zero.
pub fn burst_reorder(buf: &[u8]) -> Vec<u8> {
  (0..buf.len())
    .map(|i| buf.get(burst_source(i)).copied().unwrap_or(0))
    .collect()
}

/// Swaps the two middle bytes of every 32-bit word.
///
/// `[b0, b1, b2, b3]` becomes `[b0, b2, b1, b3]`. Up to three trailing bytes
/// that don't make up a full word are copied as-is.
pub fn word_byte_swap(buf: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(buf.len());
  let words = buf.chunks_exact(4);
  let rest = words.remainder();
  for w in words {
    out.extend_from_slice(&[w[0], w[2], w[1], w[3]]);
  }
  out.extend_from_slice(rest);
  out
}

/// Interleaves an odd/even sprite ROM pair into a single stream.
///
/// Output alternates two bytes of `even` with two bytes of `odd`, starting
/// with `even`. If the images differ in length, the shorter is treated as if
/// zero-padded up to the longer one, so the output is always twice as long
/// as the longer input.
///
/// For odd-length images, the final half chunk is emitted as one byte of
/// `even` followed by one byte of `odd`.
pub fn pair_interleave(odd: &[u8], even: &[u8]) -> Vec<u8> {
  let len = odd.len().max(even.len());
  let mut out = Vec::with_capacity(len * 2);

  let mut start = 0;
  while start < len {
    let end = (start + 2).min(len);
    for src in [even, odd].iter() {
      for i in start..end {
        out.push(src.get(i).copied().unwrap_or(0));
      }
    }
    start = end;
  }

  out
}

/// Runs the full sprite pipeline over a single pair.
pub fn transform_pair(pair: &CromPair) -> Vec<u8> {
  burst_reorder(&word_byte_swap(&pair_interleave(&pair.odd, &pair.even)))
}

/// Runs the full sprite pipeline over every pair, concatenating the results.
///
/// Pairs are independent of each other and are transformed in parallel, but
/// the output always follows the order of `pairs`.
pub fn graphics_pipeline(pairs: &[CromPair]) -> Vec<u8> {
  let total = pairs.len();
  let chunks = pairs
    .par_iter()
    .enumerate()
    .map(|(idx, pair)| {
      log::info!(
        "processing C-ROM pair {}/{} ({} bytes)",
        idx + 1,
        total,
        pair.len()
      );
      transform_pair(pair)
    })
    .collect::<Vec<_>>();

  chunks.concat()
}
