//! Building containers out of ROM sets.

use std::convert::TryFrom;

use crate::container::fingerprint;
use crate::container::Container;
use crate::container::ConvertError;
use crate::header::Flags;
use crate::header::Header;
use crate::header::VERSION;
use crate::rom::Region;
use crate::rom::RomSet;
use crate::transform;

/// Converts `roms` into a container with the given NGH number and flags.
///
/// P, M and V are carried over untouched. S goes through the fix-layer remap,
/// and every C pair goes through the sprite pipeline, in order.
pub fn convert(
  roms: RomSet,
  ngh_number: u32,
  flags: Flags,
) -> Result<Container, ConvertError> {
  if roms.p.is_empty() {
    log::warn!("no P-ROM data found");
  }
  if roms.c.is_empty() {
    log::warn!("no C-ROM data found");
  }

  let c_original = roms.c_len();

  log::info!("transforming S-ROM ({} bytes)", roms.s.len());
  let s = transform::fix_layer_remap(&roms.s);

  log::info!("transforming C-ROM ({} pairs)", roms.c.len());
  let c = transform::graphics_pipeline(&roms.c);

  let RomSet { p, m, v, .. } = roms;

  let header = Header {
    version: VERSION,
    flags,
    ngh_number,
    p_size: size_field(Region::P, p.len())?,
    s_size: size_field(Region::S, s.len())?,
    m_size: size_field(Region::M, m.len())?,
    v_size: size_field(Region::V, v.len())?,
    c_size: size_field(Region::C, c.len())?,
    c_size_original: size_field(Region::C, c_original)?,
    checksum: fingerprint(vec![&p[..], &s[..], &m[..], &v[..], &c[..]]),
  };
  log::debug!("header: {:?}", header);

  Ok(Container {
    header,
    p,
    s,
    m,
    v,
    c,
  })
}

fn size_field(region: Region, len: usize) -> Result<u32, ConvertError> {
  u32::try_from(len).map_err(|_| ConvertError::RegionTooLarge { region, len })
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::header::HEADER_LEN;
  use crate::rom::CromPair;

  fn small_set() -> RomSet {
    RomSet {
      p: vec![0xaa, 0xbb],
      s: (0..32).collect(),
      m: vec![],
      v: vec![],
      c: vec![CromPair::new(
        [0x11u8, 0x11, 0x33, 0x33],
        [0x22u8, 0x22, 0x44, 0x44],
      )],
    }
  }

  #[test]
  fn sizes_and_layout() {
    let container = convert(small_set(), 201, Flags(0x0011)).unwrap();
    let header = container.header();
    assert_eq!(header.version, 1);
    assert_eq!(header.flags, Flags(0x0011));
    assert_eq!(header.ngh_number, 201);
    assert_eq!(header.p_size, 2);
    assert_eq!(header.s_size, 32);
    assert_eq!(header.m_size, 0);
    assert_eq!(header.v_size, 0);
    assert_eq!(header.c_size, 8);
    assert_eq!(header.c_size_original, 8);
    assert_eq!(container.len(), 64 + 2 + 32 + 8);

    let mut bytes = Vec::new();
    container.write_to(&mut bytes).unwrap();
    assert_eq!(bytes.len(), container.len());
    assert_eq!(Header::decode(&bytes).unwrap(), *header);
    assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 2], &[0xaa, 0xbb]);
    assert_eq!(
      &bytes[HEADER_LEN + 2..HEADER_LEN + 34],
      &transform::fix_layer_remap(&(0..32).collect::<Vec<u8>>())[..]
    );
    assert_eq!(&bytes[HEADER_LEN + 34..], container.region(Region::C));
  }

  #[test]
  fn regions_are_transformed() {
    let roms = small_set();
    let expected_s = transform::fix_layer_remap(&roms.s);
    let expected_c = transform::graphics_pipeline(&roms.c);
    let container = convert(roms, 0, Flags::empty()).unwrap();

    assert_eq!(container.region(Region::P), &[0xaa, 0xbb]);
    assert_eq!(container.region(Region::S), &expected_s[..]);
    assert_eq!(container.region(Region::C), &expected_c[..]);
  }

  #[test]
  fn checksum_is_fingerprint() {
    let container = convert(small_set(), 0, Flags::empty()).unwrap();
    let expected = fingerprint(
      Region::ALL
        .iter()
        .map(|&r| container.region(r))
        .collect::<Vec<_>>(),
    );
    assert_eq!(container.header().checksum, expected);
    assert_ne!(expected, 0);
  }

  #[test]
  fn original_size_counts_padding_separately() {
    let roms = RomSet {
      c: vec![CromPair::new(vec![1u8; 32], vec![2u8; 16])],
      ..RomSet::new()
    };
    let container = convert(roms, 0, Flags::empty()).unwrap();
    assert_eq!(container.header().c_size_original, 48);
    assert_eq!(container.header().c_size, 64);
  }

  #[test]
  fn empty_set() {
    let container = convert(RomSet::new(), 0, Flags::empty()).unwrap();
    assert!(container.is_empty());
    assert_eq!(container.header().checksum, 0);
    assert_eq!(container.len(), HEADER_LEN);
  }
}
