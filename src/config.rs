//! Conversion profiles.
//!
//! A profile is a small JSON5 file carrying the per-game settings that end up
//! in the container header, so they don't need to be repeated on the command
//! line:
//! ```text
//! {
//!   // Metal Slug
//!   ngh: 201,
//!   region: "jp",
//!   encrypted: false,
//! }
//! ```
//! Every key is optional. Command-line options take precedence over the
//! profile.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error;
use crate::header::Flags;
use crate::header::RegionCode;

/// An error produced while reading a profile.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// Indicates that the profile could not be read.
  #[error("could not read profile: {source}")]
  Io {
    /// The profile's path.
    path: PathBuf,
    /// The underlying error.
    source: io::Error,
  },
  /// Indicates that the profile is not valid JSON5, or has unknown keys.
  #[error("could not parse profile: {source}")]
  Parse {
    /// The profile's path.
    path: PathBuf,
    /// The underlying error.
    source: json5::Error,
  },
}

impl error::Error for ConfigError {
  fn cause(&self) -> error::Cause<'_> {
    match self {
      Self::Io { path, .. } | Self::Parse { path, .. } => {
        error::Cause::File(path)
      }
    }
  }

  fn action(&self) -> Option<error::Action> {
    Some(error::Action::Configuring)
  }
}

/// Settings for a single conversion.
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
  /// The NGH number to record in the header.
  pub ngh: Option<u32>,
  /// The hardware region to record in the header.
  pub region: Option<RegionCode>,
  /// Whether the source ROMs were encrypted.
  pub encrypted: bool,
}

impl Profile {
  /// Parses a profile out of JSON5 text.
  pub fn parse(text: &str) -> Result<Self, json5::Error> {
    json5::from_str(text)
  }

  /// Reads and parses the profile at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&text).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Overlays `other` on top of this profile; anything `other` sets wins.
  pub fn merge(self, other: Profile) -> Self {
    Self {
      ngh: other.ngh.or(self.ngh),
      region: other.region.or(self.region),
      encrypted: self.encrypted || other.encrypted,
    }
  }

  /// Returns the NGH number, defaulting to zero.
  pub fn ngh_number(&self) -> u32 {
    self.ngh.unwrap_or(0)
  }

  /// Builds the header flags this profile describes.
  pub fn flags(&self) -> Flags {
    let flags = Flags::empty().with_encrypted(self.encrypted);
    match self.region {
      Some(region) => flags.with_region(region),
      None => flags,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn parse() {
    let profile = Profile::parse(
      r#"{
        // Metal Slug
        ngh: 201,
        region: "jp",
        encrypted: true,
      }"#,
    )
    .unwrap();
    assert_eq!(
      profile,
      Profile {
        ngh: Some(201),
        region: Some(RegionCode::Japan),
        encrypted: true,
      }
    );
    assert_eq!(profile.flags(), Flags(0x0011));
    assert_eq!(profile.ngh_number(), 201);
  }

  #[test]
  fn defaults() {
    let profile = Profile::parse("{}").unwrap();
    assert_eq!(profile, Profile::default());
    assert_eq!(profile.flags(), Flags(0));
    assert_eq!(profile.ngh_number(), 0);
  }

  #[test]
  fn long_region_names() {
    let profile = Profile::parse(r#"{ region: "europe" }"#).unwrap();
    assert_eq!(profile.region, Some(RegionCode::Europe));
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(Profile::parse("{ nhg: 201 }").is_err());
    assert!(Profile::parse(r#"{ region: "br" }"#).is_err());
  }

  #[test]
  fn merge() {
    let file = Profile {
      ngh: Some(201),
      region: Some(RegionCode::Usa),
      encrypted: true,
    };
    let cli = Profile {
      ngh: Some(242),
      region: None,
      encrypted: false,
    };
    assert_eq!(
      file.merge(cli),
      Profile {
        ngh: Some(242),
        region: Some(RegionCode::Usa),
        encrypted: true,
      }
    );
  }

  #[test]
  fn load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mslug.json5");
    fs::write(&path, "{ ngh: 201 }").unwrap();
    assert_eq!(Profile::load(&path).unwrap().ngh, Some(201));

    match Profile::load(dir.path().join("missing.json5")) {
      Err(ConfigError::Io { .. }) => {}
      other => panic!("unexpected: {:?}", other),
    }
  }
}
