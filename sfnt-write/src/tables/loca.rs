//! The [loca](https://docs.microsoft.com/en-us/typography/opentype/spec/loca) table

use read::TopLevelTable;
use types::Tag;

use crate::{FontWrite, TableWriter};

/// A loca table in the long (32-bit) format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loca {
    offsets: Vec<u32>,
}

impl Loca {
    /// Create a table from the start offset of each glyph plus the end of
    /// the last one.
    pub fn new(offsets: Vec<u32>) -> Self {
        Loca { offsets }
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

impl TopLevelTable for Loca {
    const TAG: Tag = Tag::new(b"loca");
}

impl FontWrite for Loca {
    fn write_into(&self, writer: &mut TableWriter) {
        self.offsets.write_into(writer)
    }
}
