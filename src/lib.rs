//! NGFC, a Neo Geo ROM set converter for SDRAM-based flash cartridges.

#![deny(missing_docs)]
#![deny(unused)]
#![deny(warnings)]
#![deny(unsafe_code)]

pub mod config;
pub mod container;
pub mod error;
pub mod header;
pub mod load;
pub mod rom;
pub mod transform;
