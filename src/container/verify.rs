//! Reading back containers.
//!
//! Verification is structural only: the header is decoded, and the file's
//! length is compared with the length the header implies. The stored
//! checksum is reported, but never recomputed.

use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;

use crate::error;
use crate::header::FormatError;
use crate::header::Header;
use crate::header::HEADER_LEN;

/// An error produced while verifying a container.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
  /// Indicates that the container could not be read.
  #[error("could not read container: {source}")]
  Io {
    /// The container's path.
    path: PathBuf,
    /// The underlying error.
    source: io::Error,
  },
  /// Indicates that the container's header is malformed.
  #[error("{source}")]
  Format {
    /// The container's path.
    path: PathBuf,
    /// The underlying error.
    source: FormatError,
  },
}

impl error::Error for VerifyError {
  fn cause(&self) -> error::Cause<'_> {
    match self {
      Self::Io { path, .. } | Self::Format { path, .. } => {
        error::Cause::File(path)
      }
    }
  }

  fn action(&self) -> Option<error::Action> {
    Some(error::Action::Verifying)
  }
}

/// The result of verifying a container.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Report {
  /// The decoded header.
  pub header: Header,
  /// The actual length of the file, in bytes.
  pub file_len: u64,
}

impl Report {
  /// Reads a report out of a seekable container stream.
  ///
  /// On success, `r` is left positioned at its end.
  pub fn read<R: Read + Seek>(mut r: R) -> Result<Self, ReadError> {
    let mut bytes = Vec::with_capacity(HEADER_LEN);
    r.by_ref().take(HEADER_LEN as u64).read_to_end(&mut bytes)?;
    let header = Header::decode(&bytes)?;
    let file_len = r.seek(SeekFrom::End(0))?;
    Ok(Self { header, file_len })
  }

  /// Returns the file length the header implies.
  pub fn expected_len(&self) -> u64 {
    self.header.expected_file_len()
  }

  /// Returns true if the file is exactly as long as the header says.
  pub fn size_matches(&self) -> bool {
    self.file_len == self.expected_len()
  }

  /// Returns the file length minus the expected length.
  pub fn size_difference(&self) -> i64 {
    self.file_len as i64 - self.expected_len() as i64
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let h = &self.header;
    writeln!(f, "NGFC Header:")?;
    writeln!(f, "  Version: {}", h.version)?;
    writeln!(f, "  Flags: {}", h.flags)?;
    writeln!(f, "  NGH Number: {}", h.ngh_number)?;
    writeln!(f, "  P-ROM size: {} bytes", h.p_size)?;
    writeln!(f, "  S-ROM size: {} bytes", h.s_size)?;
    writeln!(f, "  M-ROM size: {} bytes", h.m_size)?;
    writeln!(f, "  V-ROM size: {} bytes", h.v_size)?;
    writeln!(
      f,
      "  C-ROM size: {} bytes (original: {})",
      h.c_size, h.c_size_original
    )?;
    writeln!(f, "  Checksum: 0x{:08X}", h.checksum)?;
    writeln!(f)?;
    writeln!(f, "  File size: {} bytes", self.file_len)?;
    writeln!(f, "  Expected:  {} bytes", self.expected_len())?;
    if self.size_matches() {
      write!(f, "  File size matches header")
    } else {
      write!(
        f,
        "  Size mismatch! Difference: {} bytes",
        self.size_difference()
      )
    }
  }
}

/// An error from `Report::read()`, before it's tied to a path.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
  /// An I/O error.
  #[error("could not read container: {0}")]
  Io(#[from] io::Error),
  /// A malformed header.
  #[error("{0}")]
  Format(#[from] FormatError),
}

/// Verifies the container at `path`.
///
/// A length mismatch is not an error: it is logged, and reported through
/// `Report::size_matches()`.
pub fn verify(path: impl AsRef<Path>) -> Result<Report, VerifyError> {
  let path = path.as_ref();
  log::info!("verifying: {}", path.display());

  let report = File::open(path)
    .map_err(ReadError::Io)
    .and_then(Report::read)
    .map_err(|e| match e {
      ReadError::Io(source) => VerifyError::Io {
        path: path.to_path_buf(),
        source,
      },
      ReadError::Format(source) => VerifyError::Format {
        path: path.to_path_buf(),
        source,
      },
    })?;

  if !report.size_matches() {
    log::warn!(
      "{}: file is {} bytes, but the header describes {} bytes",
      path.display(),
      report.file_len,
      report.expected_len()
    );
  }
  Ok(report)
}
