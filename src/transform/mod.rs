//! Byte permutations that prepare ROM data for SDRAM burst access.
//!
//! The original hardware fetches sprite and fix-layer tiles over narrow,
//! dedicated buses. A flash cartridge instead keeps everything in SDRAM and
//! reads it with 4-word bursts, so the data has to be laid out such that one
//! burst returns the bytes in the order the tile decoder wants them.
//!
//! Every function in this module is pure: it borrows its input and returns a
//! freshly allocated buffer of the same length (or, for interleaving, the
//! combined length). None of them fail. Data that doesn't fill a whole block
//! is handled by the zero-fill rules documented on each function; those rules
//! are part of the output format and must not be "fixed".

mod fix;
mod tile;

pub use fix::*;
pub use tile::*;

/// The size of a tile block, in bytes, for both sprite and fix-layer data.
pub const BLOCK_LEN: usize = 32;
