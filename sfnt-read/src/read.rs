//! Parsing entry points and the low level error type

use types::Tag;

use crate::font_data::FontData;

/// Parsing for tables and records whose layout is fully described by their
/// own bytes.
///
/// Implementations check up front that every fixed field and array they
/// expose lies inside `data`, so accessors on the result do not fail.
pub trait FontRead<'a>: Sized {
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// The extra state a [`FontReadWithArgs`] type needs to parse itself.
pub trait ReadArgs {
    type Args: Copy;
}

/// Parsing for tables sized by values stored elsewhere in the font.
///
/// `hmtx` takes the long metric count from `hhea` and the glyph count from
/// `maxp`; `loca` takes the offset format from `head`.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

/// Failure to interpret raw font bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A field or array extends past the end of its data.
    OutOfBounds,
    /// A format or version field holds a value with no known layout.
    InvalidFormat(i64),
    InvalidSfnt(u32),
    InvalidTtc(Tag),
    InvalidCollectionIndex(u32),
    /// A byte length that is not a whole number of records.
    InvalidArrayLen,
    TableIsMissing(Tag),
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => f.write_str("read past the end of the data"),
            ReadError::InvalidFormat(format) => write!(f, "unknown format {format}"),
            ReadError::InvalidSfnt(version) => {
                write!(f, "unrecognized sfnt version 0x{version:08X}")
            }
            ReadError::InvalidTtc(tag) => write!(f, "expected a 'ttcf' header, found '{tag}'"),
            ReadError::InvalidCollectionIndex(index) => {
                write!(f, "collection has no font at index {index}")
            }
            ReadError::InvalidArrayLen => f.write_str("array length is not a multiple of its record size"),
            ReadError::TableIsMissing(tag) => write!(f, "no '{tag}' table"),
            ReadError::MalformedData(what) => write!(f, "malformed data: {what}"),
        }
    }
}

impl std::error::Error for ReadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            ReadError::InvalidSfnt(0x4F54544F).to_string(),
            "unrecognized sfnt version 0x4F54544F"
        );
        assert_eq!(
            ReadError::TableIsMissing(Tag::new(b"glyf")).to_string(),
            "no 'glyf' table"
        );
    }
}
