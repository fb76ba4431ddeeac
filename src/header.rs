//! The NGFC container header.
//!
//! Every NGFC file starts with a fixed 64-byte, little-endian header:
//! ```text
//! offset  size  field
//! 0x00    4     magic, "NGFC"
//! 0x04    2     version
//! 0x06    2     flags
//! 0x08    4     NGH number
//! 0x0c    4     P-ROM size
//! 0x10    4     S-ROM size
//! 0x14    4     M-ROM size
//! 0x18    4     V-ROM size
//! 0x1c    4     C-ROM size, after transformation
//! 0x20    4     C-ROM size, before transformation
//! 0x24    4     checksum
//! 0x28    24    reserved, zero
//! ```
//! The regions follow the header immediately, in the order P, S, M, V, C.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The magic number at the start of every NGFC file.
pub const MAGIC: [u8; 4] = *b"NGFC";

/// The current format version.
pub const VERSION: u16 = 1;

/// The size of an encoded header, in bytes.
pub const HEADER_LEN: usize = 64;

/// An error produced while decoding a header.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum FormatError {
  /// Indicates that fewer than `HEADER_LEN` bytes were available.
  #[error("header too short: {0} bytes")]
  Truncated(usize),
  /// Indicates that the file does not start with `MAGIC`.
  #[error("invalid magic: {0:02x?}")]
  BadMagic([u8; 4]),
}

/// A hardware region, as recorded in the header flags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionCode {
  /// Japan.
  #[serde(alias = "jp")]
  Japan,
  /// North America.
  #[serde(alias = "us")]
  Usa,
  /// Europe.
  #[serde(alias = "eu")]
  Europe,
}

impl RegionCode {
  /// Returns the flag bit for this region.
  pub fn bit(self) -> u16 {
    match self {
      Self::Japan => Flags::REGION_JP,
      Self::Usa => Flags::REGION_US,
      Self::Europe => Flags::REGION_EU,
    }
  }
}

impl FromStr for RegionCode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, String> {
    match s.to_ascii_lowercase().as_str() {
      "jp" | "japan" => Ok(Self::Japan),
      "us" | "usa" => Ok(Self::Usa),
      "eu" | "europe" => Ok(Self::Europe),
      _ => Err(format!("unknown region: {} (expected jp, us or eu)", s)),
    }
  }
}

/// The header flags bitmask.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Flags(pub u16);

impl Flags {
  /// Set when the source ROMs were encrypted (and have since been decrypted).
  pub const ENCRYPTED: u16 = 0x0001;
  /// Japanese hardware.
  pub const REGION_JP: u16 = 0x0010;
  /// North American hardware.
  pub const REGION_US: u16 = 0x0020;
  /// European hardware.
  pub const REGION_EU: u16 = 0x0040;
  /// All region bits.
  pub const REGION_MASK: u16 = 0x0070;

  /// Creates an empty set of flags.
  pub fn empty() -> Self {
    Self(0)
  }

  /// Returns these flags with the encrypted bit set to `yes`.
  pub fn with_encrypted(self, yes: bool) -> Self {
    if yes {
      Self(self.0 | Self::ENCRYPTED)
    } else {
      Self(self.0 & !Self::ENCRYPTED)
    }
  }

  /// Returns these flags with the region bits replaced by `region`.
  pub fn with_region(self, region: RegionCode) -> Self {
    Self((self.0 & !Self::REGION_MASK) | region.bit())
  }

  /// Returns whether the encrypted bit is set.
  pub fn is_encrypted(self) -> bool {
    self.0 & Self::ENCRYPTED != 0
  }

  /// Returns the lowest region recorded in these flags, if any.
  pub fn region(self) -> Option<RegionCode> {
    [RegionCode::Japan, RegionCode::Usa, RegionCode::Europe]
      .iter()
      .copied()
      .find(|r| self.0 & r.bit() != 0)
  }
}

impl fmt::Debug for Flags {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Flags(0x{:04X})", self.0)
  }
}

impl fmt::Display for Flags {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "0x{:04X}", self.0)
  }
}

/// A decoded NGFC header.
///
/// The magic number and reserved bytes are implied, and not stored.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Header {
  /// The format version; `VERSION` for files written by this crate.
  pub version: u16,
  /// The header flags.
  pub flags: Flags,
  /// The NGH number, which identifies the game.
  pub ngh_number: u32,
  /// The P-ROM size.
  pub p_size: u32,
  /// The S-ROM size.
  pub s_size: u32,
  /// The M-ROM size.
  pub m_size: u32,
  /// The V-ROM size.
  pub v_size: u32,
  /// The C-ROM size, after transformation.
  pub c_size: u32,
  /// The C-ROM size, before transformation.
  pub c_size_original: u32,
  /// The content fingerprint; see
  /// [`fingerprint`](../container/fn.fingerprint.html).
  ///
  /// Despite the name this has always carried, it is not a CRC.
  pub checksum: u32,
}

impl Default for Header {
  fn default() -> Self {
    Self {
      version: VERSION,
      flags: Flags::empty(),
      ngh_number: 0,
      p_size: 0,
      s_size: 0,
      m_size: 0,
      v_size: 0,
      c_size: 0,
      c_size_original: 0,
      checksum: 0,
    }
  }
}

impl Header {
  /// Encodes this header into its 64-byte form.
  pub fn encode(&self) -> [u8; HEADER_LEN] {
    let mut out = [0; HEADER_LEN];
    out[0x00..0x04].copy_from_slice(&MAGIC);
    out[0x04..0x06].copy_from_slice(&self.version.to_le_bytes());
    out[0x06..0x08].copy_from_slice(&self.flags.0.to_le_bytes());

    let words = [
      self.ngh_number,
      self.p_size,
      self.s_size,
      self.m_size,
      self.v_size,
      self.c_size,
      self.c_size_original,
      self.checksum,
    ];
    for (i, word) in words.iter().enumerate() {
      let start = 0x08 + i * 4;
      out[start..start + 4].copy_from_slice(&word.to_le_bytes());
    }

    out
  }

  /// Decodes a header from the start of `bytes`.
  ///
  /// Only the magic number is validated; every other field is taken as-is.
  pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
    if bytes.len() < HEADER_LEN {
      return Err(FormatError::Truncated(bytes.len()));
    }

    let mut magic = [0; 4];
    magic.copy_from_slice(&bytes[0x00..0x04]);
    if magic != MAGIC {
      return Err(FormatError::BadMagic(magic));
    }

    let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
    let u32_at = |i: usize| {
      u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
    };

    Ok(Self {
      version: u16_at(0x04),
      flags: Flags(u16_at(0x06)),
      ngh_number: u32_at(0x08),
      p_size: u32_at(0x0c),
      s_size: u32_at(0x10),
      m_size: u32_at(0x14),
      v_size: u32_at(0x18),
      c_size: u32_at(0x1c),
      c_size_original: u32_at(0x20),
      checksum: u32_at(0x24),
    })
  }

  /// Returns the length a file with this header should have, header included.
  pub fn expected_file_len(&self) -> u64 {
    HEADER_LEN as u64
      + self.p_size as u64
      + self.s_size as u64
      + self.m_size as u64
      + self.v_size as u64
      + self.c_size as u64
  }
}
