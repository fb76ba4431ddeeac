//! The fix-layer (S-ROM) remap.

use crate::transform::BLOCK_LEN;

/// Source offsets for each byte of a remapped fix-layer tile.
///
/// The S-ROM stores each 8x8 tile column-major: columns 2, 3, 0, 1, eight lines
/// each. Picking bytes in this order yields line-major tiles, with each pair
/// of bytes forming one 16-bit SDRAM word.
pub const FIX_REMAP: [usize; BLOCK_LEN] = [
  0x10, 0x18, 0x00, 0x08, 0x11, 0x19, 0x01, 0x09, //
  0x12, 0x1a, 0x02, 0x0a, 0x13, 0x1b, 0x03, 0x0b, //
  0x14, 0x1c, 0x04, 0x0c, 0x15, 0x1d, 0x05, 0x0d, //
  0x16, 0x1e, 0x06, 0x0e, 0x17, 0x1f, 0x07, 0x0f, //
];

/// Remaps fix-layer tiles for line-major access.
///
/// Within each 32-byte tile, output byte `i` is taken from input byte
/// `FIX_REMAP[i]`. In a trailing partial tile, any output byte whose source
/// lies past the end of `buf` is left as zero.
pub fn fix_layer_remap(buf: &[u8]) -> Vec<u8> {
  let len = buf.len();
  let mut out = vec![0; len];

  for base in (0..len).step_by(BLOCK_LEN) {
    for (i, &offset) in FIX_REMAP.iter().enumerate() {
      let dst = base + i;
      let src = base + offset;
      if src < len && dst < len {
        out[dst] = buf[src];
      }
    }
  }

  out
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn sequential_tile() {
    let input = (0..32).collect::<Vec<u8>>();
    let expected = FIX_REMAP.iter().map(|&i| input[i]).collect::<Vec<_>>();
    assert_eq!(fix_layer_remap(&input), expected);
  }

  #[test]
  fn each_tile_is_independent() {
    let input = (0..96).map(|i| i as u8).collect::<Vec<_>>();
    let out = fix_layer_remap(&input);
    assert_eq!(out.len(), 96);

    for (tile, chunk) in out.chunks(32).enumerate() {
      let base = (tile * 32) as u8;
      assert_eq!(chunk[0], base + 0x10);
      assert_eq!(chunk[2], base);
      assert_eq!(chunk[31], base + 0x0f);

      let mut sorted = chunk.to_vec();
      sorted.sort();
      assert_eq!(sorted, input[tile * 32..(tile + 1) * 32].to_vec());
    }
  }

  #[test]
  fn partial_tile_zero_fills() {
    // Offsets 0x10 and up fall past the end of a 20-byte buffer.
    let input = (0..20).map(|i| 0x80 + i as u8).collect::<Vec<_>>();
    let out = fix_layer_remap(&input);
    assert_eq!(out.len(), 20);
    assert_eq!(
      out,
      vec![
        0x90, 0x00, 0x80, 0x88, 0x91, 0x00, 0x81, 0x89, //
        0x92, 0x00, 0x82, 0x8a, 0x93, 0x00, 0x83, 0x8b, //
        0x00, 0x00, 0x84, 0x8c,
      ]
    );
  }

  #[test]
  fn empty() {
    assert!(fix_layer_remap(&[]).is_empty());
  }
}
