//! Error printing facilities.
//!
//! These functions are used to simplify the display of various NGFC errors to
//! the user. The [`Error`] trait describes how a Rust error type can be
//! converted into a simple diagnostic.
//!
//! [`Error`]: trait.Error.html

use std::fmt;
use std::io;
use std::path::Path;

use crate::rom::Region;

/// An error which can be described as a diagnostic.
///
/// Types that implement `Error` must also implement [`std::fmt::Display`]. For
/// the user-displayed error to look right, this implementation should only be
/// one line long.
///
/// [`std::fmt::Display`]: https://doc.rust-lang.org/std/fmt/trait.Display.html
pub trait Error: fmt::Debug + fmt::Display {
  /// Returns a `Cause` describing the input that resulted in the error.
  fn cause(&self) -> Cause<'_>;
  /// Returns an action this error is associated with, if any at all.
  fn action(&self) -> Option<Action>;
}

/// A collection of errors that may built up over the course of an action.
///
/// The type parameter `E` should be a type implementing [`Error`].
///
/// [`Error`]: trait.Error.html
#[derive(Debug)]
pub struct Errors<E>(Vec<E>);

impl<E> Errors<E> {
  /// Creates an empty `Errors`.
  pub fn new() -> Self {
    Errors(Vec::new())
  }

  /// Creates an `Errors` holding exactly one error.
  pub fn one(error: E) -> Self {
    Errors(vec![error])
  }

  /// Returns true if this `Errors` hasn't had any errors added yet.
  pub fn is_ok(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns the number of errors collected so far.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Adds a new error to this `Errors`.
  pub fn push(&mut self, error: E) {
    self.0.push(error);
  }

  /// Extends this `Errors` by consuming another `Errors`.
  pub fn extend(&mut self, mut errors: Errors<E>) {
    self.0.reserve(errors.0.len());
    for e in errors.0.drain(..) {
      self.push(e);
    }
  }

  /// Returns an iterator over the collected errors.
  pub fn iter(&self) -> impl Iterator<Item = &E> {
    self.0.iter()
  }
}

impl<E> Default for Errors<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Error> Errors<E> {
  /// Dumps this collection of errors as user-displayable text into `sink`.
  ///
  /// Returns `Ok(true)` if anything was written.
  pub fn dump_to(&self, mut sink: impl io::Write) -> io::Result<bool> {
    if self.0.is_empty() {
      return Ok(false);
    }

    for (i, error) in self.0.iter().enumerate() {
      writeln!(sink, "error: {}", error)?;
      let at = error.cause().location();
      match error.action() {
        Some(action) => writeln!(sink, "  while {} {}", action.describe(), at)?,
        None => writeln!(sink, "  at {}", at)?,
      }

      if i != self.0.len() - 1 {
        writeln!(sink)?;
      }
    }

    Ok(true)
  }

  /// Calls `dump_to()` on `stderr`, then exits the process with the given
  /// exit `code`.
  pub fn dump_and_die(self, code: i32) -> ! {
    // Writing to stderr is fairly unlikely to fail, so ignoring a failure
    // here is a fine response.
    if let Ok(true) = self.dump_to(io::stderr()) {
      if self.0.len() > 1 {
        eprintln!();
        eprintln!("error: there were {} errors", self.0.len());
      }
    }
    std::process::exit(code)
  }
}

/// The place where an error occured, to varrying degrees of specificity.
pub enum Cause<'a> {
  /// A file on disk, or an entry within an archive.
  File(&'a Path),
  /// One of the regions of a ROM set.
  Region(Region),
}

/// An action that NGFC performs, which an error may be associated with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
  /// Reading a conversion profile.
  Configuring,
  /// Loading a ROM set from disk.
  Loading,
  /// Converting a ROM set into a container.
  Converting,
  /// Reading back a container.
  Verifying,
}

impl Cause<'_> {
  fn location(&self) -> String {
    match self {
      Self::File(path) => path.display().to_string(),
      Self::Region(region) => region.to_string(),
    }
  }
}

impl Action {
  fn describe(self) -> &'static str {
    match self {
      Self::Configuring => "configuring from",
      Self::Loading => "loading",
      Self::Converting => "converting",
      Self::Verifying => "verifying",
    }
  }
}
