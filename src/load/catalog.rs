//! Sorting ROM file names into regions.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Errors;
use crate::load::LoadError;
use crate::rom::CromPair;
use crate::rom::Region;
use crate::rom::RomSet;

lazy_static! {
  /// Matches the region tag in a ROM file name, e.g. the `-c3.` in
  /// `201-c3.c3` or the `_p1.` in `mslug_p1.rom`.
  static ref REGION_TAG: Regex =
    Regex::new(r"(?i)[-_]([psmvc])(\d*)\.").unwrap();
}

/// The parity of a sprite ROM, decided by its number.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Bus {
  Odd,
  Even,
}

/// A plan for assembling a `RomSet` out of a list of file names.
///
/// Building a `Catalog` never touches the file system; it only decides which
/// names go where, and in which order. [`Catalog::fetch()`] then reads them.
///
/// [`Catalog::fetch()`]: struct.Catalog.html#method.fetch
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Catalog {
  p: Vec<String>,
  s: Vec<String>,
  m: Vec<String>,
  v: Vec<String>,
  pairs: Vec<(String, String)>,
  unpaired: Vec<String>,
}

impl Catalog {
  /// Sorts `names` into regions.
  ///
  /// A name belongs to a region if it contains that region's tag anywhere;
  /// a name with several tags is placed in each of those regions. Every
  /// region's names are sorted. Odd and even sprite ROMs are sorted by their
  /// number, then paired up in order.
  pub fn build<I>(names: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    let mut catalog = Self::default();
    let mut odd = Vec::new();
    let mut even = Vec::new();

    for name in names {
      let name = name.into();
      let mut seen = Vec::new();
      for caps in REGION_TAG.captures_iter(&name) {
        let region = match caps[1].chars().next().and_then(Region::from_letter)
        {
          Some(region) => region,
          None => continue,
        };
        if seen.contains(&region) {
          continue;
        }
        seen.push(region);

        match region {
          Region::C => match sprite_bus(&caps[2]) {
            Some((Bus::Odd, n)) => odd.push((n, name.clone())),
            Some((Bus::Even, n)) => even.push((n, name.clone())),
            None => catalog.unpaired.push(name.clone()),
          },
          _ => catalog.files_mut(region).push(name.clone()),
        }
      }
    }

    for &region in [Region::P, Region::S, Region::M, Region::V].iter() {
      catalog.files_mut(region).sort();
    }
    // Sprite ROMs go by number, so that `c10` comes after `c9`.
    odd.sort();
    even.sort();

    let paired = odd.len().min(even.len());
    let surplus = odd.drain(paired..).chain(even.drain(paired..));
    catalog.unpaired.extend(surplus.map(|(_, name)| name));
    catalog.pairs = odd
      .into_iter()
      .zip(even)
      .map(|((_, odd), (_, even))| (odd, even))
      .collect();

    catalog
  }

  /// Returns the names assigned to `region`, in load order.
  ///
  /// For `Region::C`, this is every paired name, odd before even.
  pub fn files(&self, region: Region) -> Vec<&str> {
    match region {
      Region::P => self.p.iter().map(String::as_str).collect(),
      Region::S => self.s.iter().map(String::as_str).collect(),
      Region::M => self.m.iter().map(String::as_str).collect(),
      Region::V => self.v.iter().map(String::as_str).collect(),
      Region::C => self
        .pairs
        .iter()
        .flat_map(|(odd, even)| vec![odd.as_str(), even.as_str()])
        .collect(),
    }
  }

  /// Returns the sprite ROM pairs, as `(odd, even)` names.
  pub fn pairs(&self) -> &[(String, String)] {
    &self.pairs
  }

  /// Returns sprite ROM names that could not be paired up.
  pub fn unpaired(&self) -> &[String] {
    &self.unpaired
  }

  /// Returns true if no name was recognized at all.
  pub fn is_empty(&self) -> bool {
    self.p.is_empty()
      && self.s.is_empty()
      && self.m.is_empty()
      && self.v.is_empty()
      && self.pairs.is_empty()
  }

  fn files_mut(&mut self, region: Region) -> &mut Vec<String> {
    match region {
      Region::P => &mut self.p,
      Region::S => &mut self.s,
      Region::M => &mut self.m,
      Region::V => &mut self.v,
      Region::C => &mut self.unpaired,
    }
  }

  /// Reads every cataloged file with `fetch`, assembling a `RomSet`.
  ///
  /// A failed read doesn't stop the others; every failure is returned.
  pub fn fetch<F>(&self, mut fetch: F) -> Result<RomSet, Errors<LoadError>>
  where
    F: FnMut(&str) -> Result<Vec<u8>, LoadError>,
  {
    let mut roms = RomSet::new();
    let mut errors = Errors::new();

    for &region in [Region::P, Region::S, Region::M, Region::V].iter() {
      for name in self.files(region) {
        log::info!("loading {}: {}", region, name);
        match fetch(name) {
          Ok(bytes) => {
            if let Some(buf) = roms.region_mut(region) {
              buf.extend_from_slice(&bytes);
            }
          }
          Err(e) => errors.push(e),
        }
      }
    }

    for (odd, even) in &self.pairs {
      log::info!("loading C-ROM pair: {} + {}", odd, even);
      match (fetch(odd), fetch(even)) {
        (Ok(odd), Ok(even)) => roms.c.push(CromPair::new(odd, even)),
        (odd, even) => {
          for e in odd.err().into_iter().chain(even.err()) {
            errors.push(e);
          }
        }
      }
    }

    for name in &self.unpaired {
      log::warn!("skipping unpaired C-ROM: {}", name);
    }

    if errors.is_ok() {
      Ok(roms)
    } else {
      Err(errors)
    }
  }
}

fn sprite_bus(digits: &str) -> Option<(Bus, u32)> {
  match digits.parse::<u32>() {
    Ok(n) if n % 2 == 1 => Some((Bus::Odd, n)),
    Ok(n) if n != 0 => Some((Bus::Even, n)),
    _ => None,
  }
}

#[cfg(test)]
mod test {
  use std::path::PathBuf;

  use super::*;

  const KOF98: &[&str] = &[
    "242-c8.c8",
    "242-c1.c1",
    "242-p2.sp2",
    "242-v1.v1",
    "242-m1.m1",
    "242-c2.c2",
    "242-s1.s1",
    "242-c7.c7",
    "242-p1.p1",
    "242-v2.v2",
    "readme.txt",
  ];

  #[test]
  fn mame_names() {
    let catalog = Catalog::build(KOF98.iter().copied());
    assert_eq!(catalog.files(Region::P), vec!["242-p1.p1", "242-p2.sp2"]);
    assert_eq!(catalog.files(Region::S), vec!["242-s1.s1"]);
    assert_eq!(catalog.files(Region::M), vec!["242-m1.m1"]);
    assert_eq!(catalog.files(Region::V), vec!["242-v1.v1", "242-v2.v2"]);
    assert_eq!(
      catalog.pairs(),
      &[
        ("242-c1.c1".to_string(), "242-c2.c2".to_string()),
        ("242-c7.c7".to_string(), "242-c8.c8".to_string()),
      ]
    );
    assert!(catalog.unpaired().is_empty());
    assert!(!catalog.is_empty());
  }

  #[test]
  fn underscores_and_case() {
    let catalog = Catalog::build(vec![
      "roms/MSLUG_P1.BIN",
      "roms/mslug_C1.bin",
      "mslug-C2.Bin",
    ]);
    assert_eq!(catalog.files(Region::P), vec!["roms/MSLUG_P1.BIN"]);
    assert_eq!(
      catalog.files(Region::C),
      vec!["roms/mslug_C1.bin", "mslug-C2.Bin"]
    );
  }

  #[test]
  fn multi_digit_sprites() {
    let catalog =
      Catalog::build(vec!["x-c9.c9", "x-c10.c10", "x-c11.c11", "x-c12.c12"]);
    assert_eq!(
      catalog.files(Region::C),
      vec!["x-c9.c9", "x-c10.c10", "x-c11.c11", "x-c12.c12"]
    );
  }

  #[test]
  fn twelve_sprites() {
    let names = (1..=12).map(|n| format!("x-c{}.c{}", n, n));
    let catalog = Catalog::build(names);
    let expected = (1..=6)
      .map(|i| {
        let (odd, even) = (2 * i - 1, 2 * i);
        (format!("x-c{}.c{}", odd, odd), format!("x-c{}.c{}", even, even))
      })
      .collect::<Vec<_>>();
    assert_eq!(catalog.pairs(), &expected[..]);
    assert!(catalog.unpaired().is_empty());
  }

  #[test]
  fn unpaired_sprites() {
    let catalog = Catalog::build(vec![
      "x-c1.c1", "x-c2.c2", "x-c3.c3", "x-c.bin", "x-c0.c0",
    ]);
    assert_eq!(catalog.pairs().len(), 1);
    assert_eq!(catalog.unpaired(), &["x-c.bin", "x-c0.c0", "x-c3.c3"]);
  }

  #[test]
  fn unrecognized() {
    let catalog = Catalog::build(vec!["notes.txt", "p1.bin", "x-q1.q1"]);
    assert!(catalog.is_empty());
  }

  #[test]
  fn several_tags() {
    let catalog = Catalog::build(vec!["x-m1.v_v1.bin"]);
    assert_eq!(catalog.files(Region::M), vec!["x-m1.v_v1.bin"]);
    assert_eq!(catalog.files(Region::V), vec!["x-m1.v_v1.bin"]);
  }

  #[test]
  fn fetch_concatenates_in_order() {
    let catalog = Catalog::build(vec![
      "a-p2.p2", "a-p1.p1", "a-c2.c2", "a-c1.c1", "a-c4.c4", "a-c3.c3",
    ]);
    let roms = catalog
      .fetch(|name| Ok(name.as_bytes()[2..4].to_vec()))
      .unwrap();
    assert_eq!(roms.p, b"p1p2".to_vec());
    assert!(roms.s.is_empty());
    assert_eq!(
      roms.c,
      vec![
        CromPair::new(&b"c1"[..], &b"c2"[..]),
        CromPair::new(&b"c3"[..], &b"c4"[..]),
      ]
    );
  }

  #[test]
  fn fetch_reports_every_failure() {
    let catalog =
      Catalog::build(vec!["a-p1.p1", "a-s1.s1", "a-c1.c1", "a-c2.c2"]);
    let errors = catalog
      .fetch(|name| {
        if name.contains("-s") {
          return Ok(vec![0; 32]);
        }
        Err(LoadError::NotARomSet {
          path: PathBuf::from(name),
        })
      })
      .unwrap_err();
    assert_eq!(errors.len(), 3);
  }
}
