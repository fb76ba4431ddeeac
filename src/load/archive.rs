//! Loading MAME-style ROM sets out of a `.zip` archive.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::error::Errors;
use crate::load::Catalog;
use crate::load::LoadError;
use crate::rom::RomSet;

/// Loads every recognized ROM file inside the archive at `path`.
///
/// Entries are matched and sorted by their full name within the archive,
/// including any directory components.
pub fn load(path: &Path) -> Result<RomSet, Errors<LoadError>> {
  let file = File::open(path).map_err(|source| {
    Errors::one(LoadError::Io {
      path: path.to_path_buf(),
      source,
    })
  })?;
  let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|source| {
    Errors::one(LoadError::Archive {
      path: path.to_path_buf(),
      source,
    })
  })?;

  let names = archive
    .file_names()
    .filter(|name| !name.ends_with('/'))
    .map(String::from)
    .collect::<Vec<_>>();

  let catalog = Catalog::build(names);
  if catalog.is_empty() {
    log::warn!("no ROM files found in {}", path.display());
  }

  catalog.fetch(|name| {
    let entry_path = path.join(name);
    let mut entry = archive.by_name(name).map_err(|source| LoadError::Archive {
      path: entry_path.clone(),
      source,
    })?;

    let mut data = Vec::with_capacity(entry.size() as usize);
    entry
      .read_to_end(&mut data)
      .map_err(|source| LoadError::Io {
        path: entry_path,
        source,
      })?;
    Ok(data)
  })
}
