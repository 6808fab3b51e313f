//! Errors produced while querying a font.

use sfnt_read::ReadError;
use sfnt_types::{GlyphId, Tag, TTC_HEADER_TAG};

/// Stands in for a table tag in errors about the table directory.
pub const DIRECTORY_TAG: Tag = Tag::new(b"sfnt");

/// An error that occurs when loading or querying a [`Font`](crate::Font).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FontError {
    /// A mandatory table is missing, or a table could not be parsed.
    #[error("malformed '{tag}' table: {reason}")]
    MalformedFont { tag: Tag, reason: String },
    /// A read ran past the end of a table.
    #[error("unexpected end of data in '{tag}'{}", glyph_suffix(.gid))]
    UnexpectedEndOfData { tag: Tag, gid: Option<GlyphId> },
    /// The request needs something this font (or this crate) does not do.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    /// A composite glyph refers back to itself.
    #[error("circular reference in composite glyph {0}")]
    CircularReference(GlyphId),
}

impl FontError {
    pub(crate) fn missing_table(tag: Tag) -> Self {
        FontError::MalformedFont {
            tag,
            reason: "table is mandatory".into(),
        }
    }

    /// An error in the table directory or collection header.
    pub(crate) fn directory(error: ReadError) -> Self {
        let tag = match error {
            ReadError::InvalidTtc(_) | ReadError::InvalidCollectionIndex(_) => TTC_HEADER_TAG,
            _ => DIRECTORY_TAG,
        };
        FontError::from_read(tag, None, error)
    }

    /// Attach a table (and optionally a glyph) to a low level read error.
    pub fn from_read(tag: Tag, gid: Option<GlyphId>, error: ReadError) -> Self {
        match error {
            ReadError::OutOfBounds => FontError::UnexpectedEndOfData { tag, gid },
            ReadError::TableIsMissing(tag) => FontError::missing_table(tag),
            other => FontError::MalformedFont {
                tag,
                reason: other.to_string(),
            },
        }
    }
}

fn glyph_suffix(gid: &Option<GlyphId>) -> String {
    gid.map(|gid| format!(" (glyph {gid})")).unwrap_or_default()
}

/// Extension for converting `ReadError` results at table boundaries.
pub(crate) trait ReadResultExt<T> {
    fn in_table(self, tag: Tag) -> Result<T, FontError>;

    fn in_glyph(self, tag: Tag, gid: GlyphId) -> Result<T, FontError>;
}

impl<T> ReadResultExt<T> for Result<T, ReadError> {
    fn in_table(self, tag: Tag) -> Result<T, FontError> {
        self.map_err(|e| FontError::from_read(tag, None, e))
    }

    fn in_glyph(self, tag: Tag, gid: GlyphId) -> Result<T, FontError> {
        self.map_err(|e| FontError::from_read(tag, Some(gid), e))
    }
}
