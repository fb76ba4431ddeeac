//! Loaders, which build a `RomSet` out of files on disk.
//!
//! ROM sets come in a few shapes. MAME-style sets are a directory or a `.zip`
//! archive full of per-chip dumps, named after the chip they came out of
//! (`201-p1.p1`, `201-c1.c1`, ...). TerraOnion `.neo` files pack a whole
//! cartridge into one file; these are recognized, but not yet read.
//!
//! Each shape is a [`Source`]; all of them produce the same `RomSet`.
//!
//! [`Source`]: enum.Source.html

use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::error;
use crate::error::Errors;
use crate::rom::RomSet;

mod archive;
mod catalog;
mod dir;
mod neo;

pub use catalog::Catalog;

/// An error produced while loading a ROM set.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  /// Indicates that a file could not be read.
  #[error("could not read file: {source}")]
  Io {
    /// The file that failed.
    path: PathBuf,
    /// The underlying error.
    source: io::Error,
  },
  /// Indicates that a zip archive could not be opened or read.
  #[error("could not read archive: {source}")]
  Archive {
    /// The archive, or the entry within it, that failed.
    path: PathBuf,
    /// The underlying error.
    source: zip::result::ZipError,
  },
  /// Indicates that the input is not something a ROM set can be loaded from.
  #[error("expected a directory, a .zip archive, or a .neo file")]
  NotARomSet {
    /// The offending input.
    path: PathBuf,
  },
}

impl LoadError {
  /// Returns the path this error refers to.
  pub fn path(&self) -> &Path {
    match self {
      Self::Io { path, .. }
      | Self::Archive { path, .. }
      | Self::NotARomSet { path } => path,
    }
  }
}

impl error::Error for LoadError {
  fn cause(&self) -> error::Cause<'_> {
    error::Cause::File(self.path())
  }

  fn action(&self) -> Option<error::Action> {
    Some(error::Action::Loading)
  }
}

/// A place a ROM set can be loaded from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Source {
  /// A directory of MAME-style ROM files.
  Directory(PathBuf),
  /// A `.zip` archive of MAME-style ROM files.
  Archive(PathBuf),
  /// A TerraOnion `.neo` file.
  ///
  /// This format is not supported yet; loading one produces an empty set.
  Neo(PathBuf),
}

impl Source {
  /// Works out what kind of source `path` is.
  ///
  /// `.neo` and `.zip` files are recognized by extension, regardless of case;
  /// anything else must be a directory.
  pub fn detect(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    let path = path.as_ref();
    let ext = path
      .extension()
      .and_then(|e| e.to_str())
      .map(str::to_ascii_lowercase);

    match ext.as_deref() {
      Some("neo") => Ok(Self::Neo(path.to_path_buf())),
      Some("zip") => Ok(Self::Archive(path.to_path_buf())),
      _ if path.is_dir() => Ok(Self::Directory(path.to_path_buf())),
      _ => Err(LoadError::NotARomSet {
        path: path.to_path_buf(),
      }),
    }
  }

  /// Returns the path this source points to.
  pub fn path(&self) -> &Path {
    match self {
      Self::Directory(path) | Self::Archive(path) | Self::Neo(path) => path,
    }
  }

  /// Loads a complete `RomSet` out of this source.
  pub fn load(&self) -> Result<RomSet, Errors<LoadError>> {
    log::debug!("loading ROM set from {:?}", self);
    match self {
      Self::Directory(path) => dir::load(path),
      Self::Archive(path) => archive::load(path),
      Self::Neo(path) => Ok(neo::load(path)),
    }
  }
}

/// Detects the kind of source at `path` and loads it.
pub fn load(path: impl AsRef<Path>) -> Result<RomSet, Errors<LoadError>> {
  Source::detect(path).map_err(Errors::one)?.load()
}
