//! TerraOnion `.neo` files.
//!
//! A `.neo` file is a single-file cartridge image: a header describing region
//! sizes, followed by the P, S, M, V and C regions back to back. The header
//! layout isn't pinned down well enough to parse reliably, so this loader is a
//! placeholder.

use std::path::Path;

use crate::rom::RomSet;

/// Loads a `.neo` file.
///
/// This always produces an empty `RomSet`, and logs a warning saying so.
pub fn load(path: &Path) -> RomSet {
  log::warn!(
    "{}: .neo files are not supported yet; use a MAME ROM set instead",
    path.display()
  );
  RomSet::new()
}
