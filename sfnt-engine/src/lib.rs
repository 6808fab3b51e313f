//! Queryable TrueType fonts.
//!
//! This crate sits above the zero-copy parsing of [`sfnt-read`](sfnt_read)
//! and answers the questions a document renderer asks of a font: the
//! outline and advance of a glyph, the glyph for a character or glyph
//! name, the PostScript name and the font matrix.
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use sfnt_engine::{CmapLookup, Font};
//!
//! let data = std::fs::read(path_to_my_font_file).unwrap();
//! let font = Font::new(&data).unwrap();
//! let gid = font.cmap_lookup().glyph_id('A' as u32);
//! let path = font.glyph_path(gid).unwrap();
//! println!("{} advances {} units", font.postscript_name().unwrap_or_default(), font.advance_width(gid));
//! println!("{}", path.to_svg());
//! ```

#![forbid(unsafe_code)]

/// Expose our "raw" underlying parser crate.
pub extern crate sfnt_read as raw;

pub mod charmap;
pub mod collection;
mod error;
pub mod font;
pub mod glyph;
pub mod gsub;
pub mod outline;
pub mod script;
pub mod table;

pub use charmap::{Charmap, CmapLookup, CmapTableLookup, SubstitutingCmapLookup};
pub use collection::{load_font, FontCollection};
pub use error::{FontError, DIRECTORY_TAG};
pub use font::{Font, FontOptions, ParseMode};
pub use glyph::{GlyphData, ResolvedComponent};
pub use outline::BezPathPen;

/// Type for a glyph identifier.
pub type GlyphId = sfnt_types::GlyphId;

/// Type for a 4-byte tag used to identify font tables and other resources.
pub type Tag = sfnt_types::Tag;
