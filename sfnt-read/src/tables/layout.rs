//! OpenType Layout common table formats
//!
//! Only the parts of the common layout tables needed to resolve
//! script → language system → feature → lookup chains are modeled here.

use types::{GlyphId, Scalar, Tag};

use crate::{array::ScalarArray, FontData, FontRead, ReadError};

/// A tag paired with an offset, as used by script, language system and
/// feature records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub tag: Tag,
    pub offset: u16,
}

impl Scalar for TagRecord {
    type Raw = [u8; 6];

    fn from_raw(raw: [u8; 6]) -> Self {
        TagRecord {
            tag: Tag::new(&[raw[0], raw[1], raw[2], raw[3]]),
            offset: u16::from_be_bytes([raw[4], raw[5]]),
        }
    }

    fn to_raw(self) -> [u8; 6] {
        let mut raw = [0u8; 6];
        raw[..4].copy_from_slice(&self.tag.to_be_bytes());
        raw[4..].copy_from_slice(&self.offset.to_be_bytes());
        raw
    }
}

fn resolve<'a, T: FontRead<'a>>(data: FontData<'a>, offset: u16) -> Result<T, ReadError> {
    let data = data
        .split_off(offset as usize)
        .ok_or(ReadError::OutOfBounds)?;
    T::read(data)
}

/// [Script List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-list-table-and-script-record)
#[derive(Clone, Debug)]
pub struct ScriptList<'a> {
    data: FontData<'a>,
    script_records: ScalarArray<'a, TagRecord>,
}

impl<'a> FontRead<'a> for ScriptList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let script_records = cursor.read_array(count as usize)?;
        Ok(ScriptList {
            data,
            script_records,
        })
    }
}

impl<'a> ScriptList<'a> {
    pub fn script_records(&self) -> ScalarArray<'a, TagRecord> {
        self.script_records
    }

    pub fn script(&self, record: &TagRecord) -> Result<Script<'a>, ReadError> {
        resolve(self.data, record.offset)
    }

    /// Returns the script with the given tag, if present.
    pub fn find(&self, tag: Tag) -> Option<Result<Script<'a>, ReadError>> {
        self.script_records
            .iter()
            .find(|rec| rec.tag == tag)
            .map(|rec| self.script(&rec))
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.script_records.iter().any(|rec| rec.tag == tag)
    }
}

/// [Script Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record)
#[derive(Clone, Debug)]
pub struct Script<'a> {
    data: FontData<'a>,
    default_lang_sys_offset: u16,
    lang_sys_records: ScalarArray<'a, TagRecord>,
}

impl<'a> FontRead<'a> for Script<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let default_lang_sys_offset = cursor.read()?;
        let count: u16 = cursor.read()?;
        let lang_sys_records = cursor.read_array(count as usize)?;
        Ok(Script {
            data,
            default_lang_sys_offset,
            lang_sys_records,
        })
    }
}

impl<'a> Script<'a> {
    /// The default language system, if the script has one.
    pub fn default_lang_sys(&self) -> Option<Result<LangSys<'a>, ReadError>> {
        (self.default_lang_sys_offset != 0).then(|| resolve(self.data, self.default_lang_sys_offset))
    }

    pub fn lang_sys_records(&self) -> ScalarArray<'a, TagRecord> {
        self.lang_sys_records
    }

    pub fn lang_sys(&self, record: &TagRecord) -> Result<LangSys<'a>, ReadError> {
        resolve(self.data, record.offset)
    }
}

/// [Language System Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#language-system-table)
#[derive(Clone, Debug)]
pub struct LangSys<'a> {
    required_feature_index: u16,
    feature_indices: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for LangSys<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // lookupOrderOffset, reserved
        cursor.advance::<u16>();
        let required_feature_index = cursor.read()?;
        let count: u16 = cursor.read()?;
        let feature_indices = cursor.read_array(count as usize)?;
        Ok(LangSys {
            required_feature_index,
            feature_indices,
        })
    }
}

impl<'a> LangSys<'a> {
    /// Index of a feature required for this language system, if any.
    pub fn required_feature_index(&self) -> Option<u16> {
        (self.required_feature_index != 0xFFFF).then_some(self.required_feature_index)
    }

    pub fn feature_indices(&self) -> ScalarArray<'a, u16> {
        self.feature_indices
    }
}

/// [Feature List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-list-table)
#[derive(Clone, Debug)]
pub struct FeatureList<'a> {
    data: FontData<'a>,
    feature_records: ScalarArray<'a, TagRecord>,
}

impl<'a> FontRead<'a> for FeatureList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let feature_records = cursor.read_array(count as usize)?;
        Ok(FeatureList {
            data,
            feature_records,
        })
    }
}

impl<'a> FeatureList<'a> {
    pub fn feature_records(&self) -> ScalarArray<'a, TagRecord> {
        self.feature_records
    }

    /// Returns the tag and table of the feature at `index`.
    pub fn get(&self, index: u16) -> Result<(Tag, Feature<'a>), ReadError> {
        let record = self
            .feature_records
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?;
        resolve(self.data, record.offset).map(|feature| (record.tag, feature))
    }
}

/// [Feature Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-table)
#[derive(Clone, Debug)]
pub struct Feature<'a> {
    lookup_list_indices: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for Feature<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // featureParamsOffset
        cursor.advance::<u16>();
        let count: u16 = cursor.read()?;
        let lookup_list_indices = cursor.read_array(count as usize)?;
        Ok(Feature {
            lookup_list_indices,
        })
    }
}

impl<'a> Feature<'a> {
    pub fn lookup_list_indices(&self) -> ScalarArray<'a, u16> {
        self.lookup_list_indices
    }
}

/// [Lookup List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-list-table)
#[derive(Clone, Debug)]
pub struct LookupList<'a> {
    data: FontData<'a>,
    lookup_offsets: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for LookupList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let lookup_offsets = cursor.read_array(count as usize)?;
        Ok(LookupList {
            data,
            lookup_offsets,
        })
    }
}

impl<'a> LookupList<'a> {
    pub fn len(&self) -> usize {
        self.lookup_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup_offsets.is_empty()
    }

    pub fn get(&self, index: u16) -> Result<Lookup<'a>, ReadError> {
        let offset = self
            .lookup_offsets
            .get(index as usize)
            .ok_or(ReadError::OutOfBounds)?;
        resolve(self.data, offset)
    }
}

/// [Lookup Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-table)
#[derive(Clone, Debug)]
pub struct Lookup<'a> {
    data: FontData<'a>,
    lookup_type: u16,
    lookup_flag: u16,
    subtable_offsets: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for Lookup<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let lookup_type = cursor.read()?;
        let lookup_flag = cursor.read()?;
        let count: u16 = cursor.read()?;
        let subtable_offsets = cursor.read_array(count as usize)?;
        Ok(Lookup {
            data,
            lookup_type,
            lookup_flag,
            subtable_offsets,
        })
    }
}

impl<'a> Lookup<'a> {
    pub fn lookup_type(&self) -> u16 {
        self.lookup_type
    }

    pub fn lookup_flag(&self) -> u16 {
        self.lookup_flag
    }

    /// The data for each subtable, in order.
    pub fn subtables(&self) -> impl Iterator<Item = Result<FontData<'a>, ReadError>> + '_ {
        self.subtable_offsets.iter().map(|offset| {
            self.data
                .split_off(offset as usize)
                .ok_or(ReadError::OutOfBounds)
        })
    }
}

/// Part of [CoverageFormat2]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeRecord {
    pub start_glyph_id: GlyphId,
    pub end_glyph_id: GlyphId,
    pub start_coverage_index: u16,
}

impl Scalar for RangeRecord {
    type Raw = [u8; 6];

    fn from_raw(raw: [u8; 6]) -> Self {
        let field = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
        RangeRecord {
            start_glyph_id: GlyphId::new(field(0)),
            end_glyph_id: GlyphId::new(field(2)),
            start_coverage_index: field(4),
        }
    }

    fn to_raw(self) -> [u8; 6] {
        let mut raw = [0u8; 6];
        raw[..2].copy_from_slice(&self.start_glyph_id.to_be_bytes());
        raw[2..4].copy_from_slice(&self.end_glyph_id.to_be_bytes());
        raw[4..].copy_from_slice(&self.start_coverage_index.to_be_bytes());
        raw
    }
}

impl RangeRecord {
    fn iter(self) -> impl Iterator<Item = GlyphId> {
        (self.start_glyph_id.to_u16()..=self.end_glyph_id.to_u16()).map(GlyphId::new)
    }
}

/// [Coverage Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table)
#[derive(Clone, Debug)]
pub enum CoverageTable<'a> {
    Format1(ScalarArray<'a, GlyphId>),
    Format2(ScalarArray<'a, RangeRecord>),
}

impl<'a> FontRead<'a> for CoverageTable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        match format {
            1 => cursor.read_array(count as usize).map(Self::Format1),
            2 => cursor.read_array(count as usize).map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other.into())),
        }
    }
}

impl CoverageTable<'_> {
    /// The coverage index of `gid`, if it is covered.
    pub fn get(&self, gid: GlyphId) -> Option<u16> {
        match self {
            CoverageTable::Format1(glyphs) => glyphs
                .binary_search_by(|probe| probe.cmp(&gid))
                .ok()
                .map(|ix| ix as u16),
            CoverageTable::Format2(ranges) => {
                let ix = ranges
                    .binary_search_by(|rec| {
                        if rec.end_glyph_id < gid {
                            std::cmp::Ordering::Less
                        } else if rec.start_glyph_id > gid {
                            std::cmp::Ordering::Greater
                        } else {
                            std::cmp::Ordering::Equal
                        }
                    })
                    .ok()?;
                let rec = ranges.get(ix)?;
                Some(rec.start_coverage_index + (gid.to_u16() - rec.start_glyph_id.to_u16()))
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + '_ {
        // all one expression so that we have a single return type
        let (iter1, iter2) = match self {
            CoverageTable::Format1(glyphs) => (Some(glyphs.iter()), None),
            CoverageTable::Format2(ranges) => {
                (None, Some(ranges.iter().flat_map(|rec| rec.iter())))
            }
        };
        iter1
            .into_iter()
            .flatten()
            .chain(iter2.into_iter().flatten())
    }
}
