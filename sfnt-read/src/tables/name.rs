//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use types::{Scalar, Tag};

use crate::{array::ScalarArray, text::Encoding, FontData, FontRead, ReadError, TopLevelTable};

/// 'name'
pub const TAG: Tag = Tag::new(b"name");

/// Predefined name ids.
pub mod name_id {
    pub const COPYRIGHT_NOTICE: u16 = 0;
    pub const FAMILY_NAME: u16 = 1;
    pub const SUBFAMILY_NAME: u16 = 2;
    pub const UNIQUE_ID: u16 = 3;
    pub const FULL_NAME: u16 = 4;
    pub const VERSION_STRING: u16 = 5;
    pub const POSTSCRIPT_NAME: u16 = 6;
}

/// The windows english (US) language id.
pub const WINDOWS_ENGLISH_US: u16 = 0x409;

/// A single entry in the name table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    /// String length, in bytes.
    pub length: u16,
    /// String offset from start of storage area, in bytes.
    pub string_offset: u16,
}

impl Scalar for NameRecord {
    type Raw = [u8; 12];

    fn from_raw(raw: [u8; 12]) -> Self {
        let field = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
        NameRecord {
            platform_id: field(0),
            encoding_id: field(2),
            language_id: field(4),
            name_id: field(6),
            length: field(8),
            string_offset: field(10),
        }
    }

    fn to_raw(self) -> [u8; 12] {
        let fields = [
            self.platform_id,
            self.encoding_id,
            self.language_id,
            self.name_id,
            self.length,
            self.string_offset,
        ];
        let mut raw = [0u8; 12];
        for (chunk, field) in raw.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        raw
    }
}

impl NameRecord {
    pub fn matches(&self, name_id: u16, platform_id: u16, encoding_id: u16, language_id: u16) -> bool {
        self.name_id == name_id
            && self.platform_id == platform_id
            && self.encoding_id == encoding_id
            && self.language_id == language_id
    }

    pub fn encoding(&self) -> Encoding {
        Encoding::for_platform(self.platform_id, self.encoding_id)
    }
}

/// The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table
#[derive(Clone, Debug)]
pub struct Name<'a> {
    data: FontData<'a>,
    version: u16,
    storage_offset: u16,
    name_records: ScalarArray<'a, NameRecord>,
}

impl TopLevelTable for Name<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Name<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let count: u16 = cursor.read()?;
        let storage_offset = cursor.read()?;
        let name_records = cursor.read_array(count as usize)?;
        Ok(Name {
            data,
            version,
            storage_offset,
            name_records,
        })
    }
}

impl<'a> Name<'a> {
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn storage_offset(&self) -> u16 {
        self.storage_offset
    }

    pub fn name_records(&self) -> ScalarArray<'a, NameRecord> {
        self.name_records
    }

    /// The FontData containing the encoded name strings.
    pub fn string_data(&self) -> FontData<'a> {
        self.data
            .split_off(self.storage_offset as usize)
            .unwrap_or_default()
    }

    /// The undecoded bytes of the record's string.
    pub fn string_bytes(&self, record: &NameRecord) -> Result<&'a [u8], ReadError> {
        let start = record.string_offset as usize;
        let end = start + record.length as usize;
        self.string_data()
            .as_bytes()
            .get(start..end)
            .ok_or(ReadError::OutOfBounds)
    }

    /// The decoded string for a record.
    pub fn string(&self, record: &NameRecord) -> Result<String, ReadError> {
        self.string_bytes(record)
            .map(|bytes| record.encoding().decode(bytes))
    }

    /// Returns the string for the first record matching all four ids.
    pub fn find(
        &self,
        name_id: u16,
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
    ) -> Option<String> {
        self.name_records
            .iter()
            .find(|rec| rec.matches(name_id, platform_id, encoding_id, language_id))
            .and_then(|rec| self.string(&rec).ok())
    }

    /// The PostScript name, preferring the Macintosh record.
    pub fn postscript_name(&self) -> Option<String> {
        self.find(name_id::POSTSCRIPT_NAME, 1, 0, 0)
            .or_else(|| self.find(name_id::POSTSCRIPT_NAME, 3, 1, WINDOWS_ENGLISH_US))
            .map(|name| name.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::name as test_data;

    #[test]
    fn decode_records() {
        let data = test_data::names();
        let name = Name::read(FontData::new(&data)).unwrap();
        assert_eq!(name.name_records().len(), 3);
        assert_eq!(name.find(1, 3, 1, WINDOWS_ENGLISH_US).as_deref(), Some("Test"));
        assert_eq!(name.find(1, 1, 0, 0).as_deref(), Some("Tést"));
        assert_eq!(name.find(2, 3, 1, WINDOWS_ENGLISH_US), None);
    }

    #[test]
    fn postscript_name_prefers_mac() {
        let data = test_data::names();
        let name = Name::read(FontData::new(&data)).unwrap();
        assert_eq!(name.postscript_name().as_deref(), Some("Test-Regular"));
    }

    #[test]
    fn out_of_bounds_string() {
        let data = test_data::names();
        let name = Name::read(FontData::new(&data)).unwrap();
        let record = NameRecord {
            length: 200,
            ..name.name_records().get(0).unwrap()
        };
        assert!(name.string(&record).is_err());
    }
}
