//! Loading MAME-style ROM sets out of a directory.

use std::fs;
use std::path::Path;

use crate::error::Errors;
use crate::load::Catalog;
use crate::load::LoadError;
use crate::rom::RomSet;

/// Loads every recognized ROM file directly inside `root`.
///
/// Subdirectories are not searched.
pub fn load(root: &Path) -> Result<RomSet, Errors<LoadError>> {
  let io_error = |path: &Path, source| LoadError::Io {
    path: path.to_path_buf(),
    source,
  };

  let entries =
    fs::read_dir(root).map_err(|e| Errors::one(io_error(root, e)))?;

  let mut errors = Errors::new();
  let mut names = Vec::new();
  for entry in entries {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        errors.push(io_error(root, e));
        continue;
      }
    };

    let path = entry.path();
    if !path.is_file() {
      continue;
    }
    match entry.file_name().into_string() {
      Ok(name) => names.push(name),
      Err(name) => log::warn!("skipping non-UTF-8 file name: {:?}", name),
    }
  }

  let catalog = Catalog::build(names);
  if catalog.is_empty() {
    log::warn!("no ROM files found in {}", root.display());
  }

  match catalog.fetch(|name| {
    let path = root.join(name);
    fs::read(&path).map_err(|e| io_error(&path, e))
  }) {
    Ok(roms) if errors.is_ok() => Ok(roms),
    Ok(_) => Err(errors),
    Err(more) => {
      errors.extend(more);
      Err(errors)
    }
  }
}

#[cfg(test)]
mod test {
  use std::fs;

  use super::*;
  use crate::rom::CromPair;

  #[test]
  fn load_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("201-p1.p1"), [0x01u8, 0x02]).unwrap();
    fs::write(root.join("201-s1.s1"), [0x03u8; 32]).unwrap();
    fs::write(root.join("201-m1.m1"), [0x04u8; 4]).unwrap();
    fs::write(root.join("201-v2.v2"), [0x06u8; 2]).unwrap();
    fs::write(root.join("201-v1.v1"), [0x05u8; 2]).unwrap();
    fs::write(root.join("201-c1.c1"), [0x11u8; 4]).unwrap();
    fs::write(root.join("201-c2.c2"), [0x22u8; 4]).unwrap();
    fs::write(root.join("readme.txt"), b"hello").unwrap();
    fs::create_dir(root.join("extra-p9.d")).unwrap();

    let roms = load(root).unwrap();
    assert_eq!(roms.p, vec![0x01, 0x02]);
    assert_eq!(roms.s, vec![0x03u8; 32]);
    assert_eq!(roms.m, vec![0x04u8; 4]);
    assert_eq!(roms.v, vec![0x05, 0x05, 0x06, 0x06]);
    assert_eq!(roms.c, vec![CromPair::new([0x11u8; 4], [0x22u8; 4])]);
  }

  #[test]
  fn missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load(&dir.path().join("gone")).unwrap_err();
    assert_eq!(errors.len(), 1);
  }

  #[test]
  fn empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load(dir.path()).unwrap().is_empty());
  }
}
