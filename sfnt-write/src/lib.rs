//! Writing sfnt font files
//!
//! This crate serializes font tables into big-endian bytes and assembles
//! them into a complete font file with a valid table directory and
//! checksums.

#![forbid(unsafe_code)]

mod font_builder;
pub mod tables;
mod util;
mod write;

pub use font_builder::FontBuilder;
pub use util::SearchRange;
pub use write::{dump_table, FontWrite, TableWriter};

/// Public re-export of the sfnt-read crate.
pub extern crate sfnt_read as read;

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;
