//!  A builder for top-level font objects

use std::borrow::Cow;
use std::collections::BTreeMap;

use read::{
    tables::{compute_checksum, head::Head},
    TopLevelTable,
};
use types::{Tag, TT_SFNT_VERSION};

use crate::{util::SearchRange, FontWrite, TableWriter};

const TABLE_RECORD_LEN: usize = 16;
const HEADER_LEN: usize = 12;

/// Build a font from some set of tables.
///
/// Tables are written in tag order. If a `head` table is present its
/// `checksumAdjustment` is computed for the final file.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder<'a> {
    tables: BTreeMap<Tag, Cow<'a, [u8]>>,
}

impl<'a> FontBuilder<'a> {
    /// Create a new builder to compile a binary font
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a table and add it to the builder.
    pub fn add_table<T>(&mut self, table: &T) -> &mut Self
    where
        T: FontWrite + TopLevelTable,
    {
        self.add_raw(T::TAG, crate::dump_table(table))
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Cow<'a, [u8]>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Returns `true` if the builder contains a table with this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tables.keys().copied()
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&mut self) -> Vec<u8> {
        // the adjustment is computed over a head with a zeroed field
        let has_head = match self.tables.get_mut(&Head::TAG) {
            Some(head) if head.len() >= Head::LEN => {
                let range = Head::CHECKSUM_ADJUSTMENT_OFFSET..Head::CHECKSUM_ADJUSTMENT_OFFSET + 4;
                head.to_mut()[range].fill(0);
                true
            }
            _ => false,
        };

        let header_len = HEADER_LEN + self.tables.len() * TABLE_RECORD_LEN;
        let computed = SearchRange::compute(self.tables.len(), TABLE_RECORD_LEN);

        let mut writer = TableWriter::default();
        TT_SFNT_VERSION.write_into(&mut writer);
        (self.tables.len() as u16).write_into(&mut writer);
        computed.search_range.write_into(&mut writer);
        computed.entry_selector.write_into(&mut writer);
        computed.range_shift.write_into(&mut writer);

        let mut position = header_len as u32;
        let mut head_offset = None;
        for (tag, data) in &self.tables {
            if *tag == Head::TAG {
                head_offset = Some(position as usize);
            }
            tag.write_into(&mut writer);
            compute_checksum(data).write_into(&mut writer);
            position.write_into(&mut writer);
            (data.len() as u32).write_into(&mut writer);
            position += crate::util::round4(data.len()) as u32;
        }

        for table in self.tables.values() {
            writer.write_slice(table);
            writer.pad_to_4();
        }
        let mut data = writer.into_data();

        if let (true, Some(offset)) = (has_head, head_offset) {
            let adjustment = Head::CHECKSUM_MAGIC.wrapping_sub(compute_checksum(&data));
            let pos = offset + Head::CHECKSUM_ADJUSTMENT_OFFSET;
            data[pos..pos + 4].copy_from_slice(&adjustment.to_be_bytes());
        }
        data
    }
}
