//! Types describing a Neo Geo ROM set.
//!
//! A Neo Geo cartridge is made up of several discrete ROM chips, each wired to
//! a different part of the system: the 68000 program, the fix (text) layer,
//! the Z80 sound program, the ADPCM samples, and the sprite tiles. A `RomSet`
//! holds one in-memory image per region, exactly as it was dumped.
//!
//! The sprite ROMs are special: the original hardware reads them over two
//! separate buses, so they are dumped in odd/even pairs (`c1`+`c2`, `c3`+`c4`,
//! and so on). These pairs are kept apart, in discovery order, until the
//! graphics transform interleaves them.

use std::fmt;

/// One of the five logical memory regions of a ROM set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Region {
  /// The 68000 program ROM.
  P,
  /// The fix-layer tile ROM.
  S,
  /// The Z80 sound program ROM.
  M,
  /// The ADPCM sample ROM.
  V,
  /// The sprite tile ROMs.
  C,
}

impl Region {
  /// Every region, in container order.
  pub const ALL: [Region; 5] =
    [Region::P, Region::S, Region::M, Region::V, Region::C];

  /// Returns the lowercase letter used for this region in ROM file names.
  pub fn letter(self) -> char {
    match self {
      Self::P => 'p',
      Self::S => 's',
      Self::M => 'm',
      Self::V => 'v',
      Self::C => 'c',
    }
  }

  /// Looks up a region by its file name letter, ignoring case.
  pub fn from_letter(c: char) -> Option<Self> {
    match c.to_ascii_lowercase() {
      'p' => Some(Self::P),
      's' => Some(Self::S),
      'm' => Some(Self::M),
      'v' => Some(Self::V),
      'c' => Some(Self::C),
      _ => None,
    }
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}-ROM", self.letter().to_ascii_uppercase())
  }
}

/// A pair of sprite ROM images, one per graphics bus.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct CromPair {
  /// The odd-numbered image (`c1`, `c3`, ...), holding bitplanes 0 and 1.
  pub odd: Vec<u8>,
  /// The even-numbered image (`c2`, `c4`, ...), holding bitplanes 2 and 3.
  pub even: Vec<u8>,
}

impl CromPair {
  /// Creates a new pair from its two bus images.
  pub fn new(odd: impl Into<Vec<u8>>, even: impl Into<Vec<u8>>) -> Self {
    Self {
      odd: odd.into(),
      even: even.into(),
    }
  }

  /// Returns the combined length of both images, before any transformation.
  pub fn len(&self) -> usize {
    self.odd.len() + self.even.len()
  }

  /// Returns true if both images are empty.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// A complete, fully-loaded ROM set.
///
/// A `RomSet` is built once by a loader and consumed once by
/// [`convert`](../container/fn.convert.html).
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct RomSet {
  /// The program ROM.
  pub p: Vec<u8>,
  /// The fix-layer ROM, untransformed.
  pub s: Vec<u8>,
  /// The sound program ROM.
  pub m: Vec<u8>,
  /// The ADPCM sample ROM.
  pub v: Vec<u8>,
  /// The sprite ROM pairs, in discovery order.
  pub c: Vec<CromPair>,
}

impl RomSet {
  /// Creates an empty `RomSet`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns true if no region holds any data at all.
  pub fn is_empty(&self) -> bool {
    self.p.is_empty()
      && self.s.is_empty()
      && self.m.is_empty()
      && self.v.is_empty()
      && self.c.iter().all(CromPair::is_empty)
  }

  /// Returns the flat buffer backing `region`, if it has one.
  ///
  /// The sprite region is split into pairs, so it has no single buffer.
  pub fn region_mut(&mut self, region: Region) -> Option<&mut Vec<u8>> {
    match region {
      Region::P => Some(&mut self.p),
      Region::S => Some(&mut self.s),
      Region::M => Some(&mut self.m),
      Region::V => Some(&mut self.v),
      Region::C => None,
    }
  }

  /// Returns the total size of the sprite data, summed over every pair.
  pub fn c_len(&self) -> usize {
    self.c.iter().map(CromPair::len).sum()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn region_letters() {
    for &region in Region::ALL.iter() {
      assert_eq!(Region::from_letter(region.letter()), Some(region));
      assert_eq!(
        Region::from_letter(region.letter().to_ascii_uppercase()),
        Some(region)
      );
    }
    assert_eq!(Region::from_letter('x'), None);
    assert_eq!(Region::C.to_string(), "C-ROM");
  }

  #[test]
  fn empty_set() {
    let mut roms = RomSet::new();
    assert!(roms.is_empty());

    roms.c.push(CromPair::new(vec![], vec![]));
    assert!(roms.is_empty());

    roms.c.push(CromPair::new(vec![1, 2], vec![3]));
    assert!(!roms.is_empty());
    assert_eq!(roms.c_len(), 3);
    assert!(roms.region_mut(Region::C).is_none());
  }
}
