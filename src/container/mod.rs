//! NGFC containers.
//!
//! A container is an NGFC header followed by every region of a ROM set, laid
//! out for a flash cartridge: P, M and V as dumped, S and C transformed for
//! SDRAM burst access. [`convert()`] builds one out of a `RomSet`; [`verify()`]
//! reads one back.
//!
//! [`convert()`]: fn.convert.html
//! [`verify()`]: fn.verify.html

use std::fmt;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error;
use crate::header::Header;
use crate::header::HEADER_LEN;
use crate::rom::Region;

mod assemble;
mod verify;

pub use assemble::*;
pub use verify::*;

/// An error produced while converting a ROM set.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
  /// Indicates that a region is too large to be described by the header.
  #[error("region is {len} bytes, which does not fit in a 32-bit size field")]
  RegionTooLarge {
    /// The offending region.
    region: Region,
    /// The region's size, in bytes.
    len: usize,
  },
  /// Indicates that the output file could not be written.
  #[error("could not write output: {source}")]
  Write {
    /// The output path.
    path: PathBuf,
    /// The underlying error.
    source: io::Error,
  },
}

impl error::Error for ConvertError {
  fn cause(&self) -> error::Cause<'_> {
    match self {
      Self::RegionTooLarge { region, .. } => error::Cause::Region(*region),
      Self::Write { path, .. } => error::Cause::File(path),
    }
  }

  fn action(&self) -> Option<error::Action> {
    Some(error::Action::Converting)
  }
}

/// A fully-assembled NGFC container, held in memory.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Container {
  header: Header,
  p: Vec<u8>,
  s: Vec<u8>,
  m: Vec<u8>,
  v: Vec<u8>,
  c: Vec<u8>,
}

impl Container {
  /// Returns this container's header.
  pub fn header(&self) -> &Header {
    &self.header
  }

  /// Returns the bytes stored for `region`, as they appear in the file.
  pub fn region(&self, region: Region) -> &[u8] {
    match region {
      Region::P => &self.p,
      Region::S => &self.s,
      Region::M => &self.m,
      Region::V => &self.v,
      Region::C => &self.c,
    }
  }

  /// Returns the total size of the encoded container, header included.
  pub fn len(&self) -> usize {
    HEADER_LEN
      + Region::ALL
        .iter()
        .map(|&r| self.region(r).len())
        .sum::<usize>()
  }

  /// Returns true if every region is empty; the header is still written.
  pub fn is_empty(&self) -> bool {
    self.len() == HEADER_LEN
  }

  /// Writes the encoded container to `w`.
  pub fn write_to(&self, mut w: impl Write) -> io::Result<()> {
    w.write_all(&self.header.encode())?;
    for &region in Region::ALL.iter() {
      w.write_all(self.region(region))?;
    }
    w.flush()
  }

  /// Writes the encoded container to a new file at `path`.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
    let path = path.as_ref();
    let write_error = |source| ConvertError::Write {
      path: path.to_path_buf(),
      source,
    };
    let file = File::create(path).map_err(write_error)?;
    self.write_to(BufWriter::new(file)).map_err(write_error)
  }

  /// Returns a summary of this container, for display.
  pub fn summary(&self) -> Summary {
    Summary {
      header: self.header.clone(),
      total: self.len() as u64,
    }
  }
}

/// The content fingerprint stored in the header's checksum field.
///
/// For every non-empty region, the first four bytes of its MD5 digest are
/// read as a little-endian `u32`; the fingerprint is the wrapping sum of
/// these. Empty regions contribute nothing.
///
/// This is *not* a CRC, and nothing ever checks it against file contents.
/// It's kept exactly as is so that existing files keep the same value.
pub fn fingerprint<'a>(regions: impl IntoIterator<Item = &'a [u8]>) -> u32 {
  regions
    .into_iter()
    .filter(|data| !data.is_empty())
    .map(|data| {
      let digest = md5::compute(data).0;
      u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
    })
    .fold(0u32, u32::wrapping_add)
}

/// What a conversion produced, in human-readable form.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Summary {
  /// The header that was written.
  pub header: Header,
  /// The total file size, header included.
  pub total: u64,
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let h = &self.header;
    writeln!(f, "Conversion complete!")?;
    writeln!(f, "  P-ROM: {} bytes", h.p_size)?;
    writeln!(f, "  S-ROM: {} bytes (transformed)", h.s_size)?;
    writeln!(f, "  M-ROM: {} bytes", h.m_size)?;
    writeln!(f, "  V-ROM: {} bytes", h.v_size)?;
    writeln!(
      f,
      "  C-ROM: {} bytes (from {} original)",
      h.c_size, h.c_size_original
    )?;
    write!(
      f,
      "  Total: {} bytes ({:.1} MB)",
      self.total,
      self.total as f64 / 1024.0 / 1024.0
    )
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn fingerprint_skips_empty_regions() {
    let p = [0x01u8, 0x02];
    let c = [0xffu8; 8];
    let with_empty: [&[u8]; 5] = [&p, &[], &[], &[], &c];
    let without: [&[u8]; 2] = [&p, &c];
    assert_eq!(
      fingerprint(with_empty.iter().copied()),
      fingerprint(without.iter().copied())
    );
    assert_eq!(fingerprint(std::iter::empty()), 0);
  }

  #[test]
  fn fingerprint_of_known_digest() {
    // md5("") = d41d8cd98f00b204e9800998ecf8427e, but empty input is
    // skipped; md5("abc") = 900150983cd24fb0d6963f7d28e17f72.
    let abc: &[u8] = b"abc";
    assert_eq!(fingerprint(vec![abc]), 0x9850_0190);
    assert_eq!(
      fingerprint(vec![abc, abc]),
      0x9850_0190u32.wrapping_add(0x9850_0190)
    );
  }
}
