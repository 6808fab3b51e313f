//! The [name](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use read::{
    tables::{
        cmap::{encoding, platform},
        name::WINDOWS_ENGLISH_US,
    },
    TopLevelTable,
};
use types::Tag;

use crate::{FontWrite, TableWriter};

const HEADER_LEN: usize = 6;
const NAME_RECORD_LEN: usize = 12;

/// A version 0 name table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name {
    pub name_records: Vec<NameRecord>,
}

/// A name record along with its already-encoded string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub string: Vec<u8>,
}

impl NameRecord {
    /// A Windows Unicode BMP, US English record, encoded as UTF-16BE.
    pub fn windows_english(name_id: u16, string: &str) -> Self {
        NameRecord {
            platform_id: platform::WINDOWS,
            encoding_id: encoding::WINDOWS_UNICODE_BMP,
            language_id: WINDOWS_ENGLISH_US,
            name_id,
            string: string.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }
}

impl Name {
    pub fn new(name_records: Vec<NameRecord>) -> Self {
        Name { name_records }
    }

    fn compute_storage_offset(&self) -> u16 {
        (HEADER_LEN + self.name_records.len() * NAME_RECORD_LEN) as u16
    }
}

impl TopLevelTable for Name {
    const TAG: Tag = Tag::new(b"name");
}

impl FontWrite for Name {
    fn write_into(&self, writer: &mut TableWriter) {
        0u16.write_into(writer); // format
        (self.name_records.len() as u16).write_into(writer);
        self.compute_storage_offset().write_into(writer);
        let mut string_offset = 0u16;
        for record in &self.name_records {
            record.platform_id.write_into(writer);
            record.encoding_id.write_into(writer);
            record.language_id.write_into(writer);
            record.name_id.write_into(writer);
            let len = record.string.len() as u16;
            len.write_into(writer);
            string_offset.write_into(writer);
            string_offset = string_offset.wrapping_add(len);
        }
        for record in &self.name_records {
            writer.write_slice(&record.string);
        }
    }
}
