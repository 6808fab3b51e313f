//! the [GSUB] table
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub

use types::{GlyphId, Tag};

pub use super::layout::{
    CoverageTable, Feature, FeatureList, LangSys, Lookup, LookupList, Script, ScriptList,
    TagRecord,
};

use crate::{array::ScalarArray, FontData, FontRead, ReadError, TopLevelTable};

/// 'GSUB'
pub const TAG: Tag = Tag::new(b"GSUB");

/// The lookup type of single substitution subtables.
pub const SINGLE_SUBSTITUTION: u16 = 1;
/// The lookup type of extension subtables.
pub const EXTENSION_SUBSTITUTION: u16 = 7;

/// [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#gsub-header)
#[derive(Clone, Debug)]
pub struct Gsub<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Gsub<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Gsub<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let major: u16 = data.read_at(0)?;
        if major != 1 {
            return Err(ReadError::InvalidFormat(major.into()));
        }
        data.check_len(Gsub::HEADER_LEN)?;
        Ok(Gsub { data })
    }
}

impl<'a> Gsub<'a> {
    const HEADER_LEN: usize = 10;

    field!(major_version: u16 = 0);
    field!(minor_version: u16 = 2);
    field!(script_list_offset: u16 = 4);
    field!(feature_list_offset: u16 = 6);
    field!(lookup_list_offset: u16 = 8);

    pub fn script_list(&self) -> Result<ScriptList<'a>, ReadError> {
        self.resolve(self.script_list_offset())
    }

    pub fn feature_list(&self) -> Result<FeatureList<'a>, ReadError> {
        self.resolve(self.feature_list_offset())
    }

    pub fn lookup_list(&self) -> Result<LookupList<'a>, ReadError> {
        self.resolve(self.lookup_list_offset())
    }

    /// The single substitution subtables of the lookup at `index`.
    ///
    /// Extension lookups are followed; subtables of any other type are
    /// skipped.
    pub fn single_substitutions(&self, index: u16) -> Result<Vec<SingleSubst<'a>>, ReadError> {
        let lookup = self.lookup_list()?.get(index)?;
        let mut result = Vec::new();
        for subtable in lookup.subtables() {
            let subtable = subtable?;
            match lookup.lookup_type() {
                SINGLE_SUBSTITUTION => result.push(SingleSubst::read(subtable)?),
                EXTENSION_SUBSTITUTION => {
                    let ext = ExtensionSubst::read(subtable)?;
                    if ext.extension_lookup_type == SINGLE_SUBSTITUTION {
                        result.push(SingleSubst::read(ext.extension_data()?)?);
                    }
                }
                _ => (),
            }
        }
        Ok(result)
    }

    fn resolve<T: FontRead<'a>>(&self, offset: u16) -> Result<T, ReadError> {
        self.data
            .split_off(offset as usize)
            .ok_or(ReadError::OutOfBounds)
            .and_then(T::read)
    }
}

/// [Extension Substitution](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#lookuptype-7-extension-substitution)
#[derive(Clone, Debug)]
struct ExtensionSubst<'a> {
    data: FontData<'a>,
    extension_lookup_type: u16,
    extension_offset: u32,
}

impl<'a> FontRead<'a> for ExtensionSubst<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != 1 {
            return Err(ReadError::InvalidFormat(format.into()));
        }
        Ok(ExtensionSubst {
            data,
            extension_lookup_type: cursor.read()?,
            extension_offset: cursor.read()?,
        })
    }
}

impl<'a> ExtensionSubst<'a> {
    fn extension_data(&self) -> Result<FontData<'a>, ReadError> {
        self.data
            .split_off(self.extension_offset as usize)
            .ok_or(ReadError::OutOfBounds)
    }
}

/// LookupType 1: [Single Substitution](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#lookuptype-1-single-substitution-subtable) Subtable
#[derive(Clone, Debug)]
pub enum SingleSubst<'a> {
    Format1 {
        coverage: CoverageTable<'a>,
        delta_glyph_id: i16,
    },
    Format2 {
        coverage: CoverageTable<'a>,
        substitute_glyph_ids: ScalarArray<'a, GlyphId>,
    },
}

impl<'a> FontRead<'a> for SingleSubst<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let coverage_offset: u16 = cursor.read()?;
        let coverage = data
            .split_off(coverage_offset as usize)
            .ok_or(ReadError::OutOfBounds)
            .and_then(CoverageTable::read)?;
        match format {
            1 => Ok(SingleSubst::Format1 {
                coverage,
                delta_glyph_id: cursor.read()?,
            }),
            2 => {
                let count: u16 = cursor.read()?;
                Ok(SingleSubst::Format2 {
                    coverage,
                    substitute_glyph_ids: cursor.read_array(count as usize)?,
                })
            }
            other => Err(ReadError::InvalidFormat(other.into())),
        }
    }
}

impl SingleSubst<'_> {
    pub fn coverage(&self) -> &CoverageTable<'_> {
        match self {
            SingleSubst::Format1 { coverage, .. } | SingleSubst::Format2 { coverage, .. } => {
                coverage
            }
        }
    }

    /// Returns the replacement for `gid`, if this subtable covers it.
    pub fn substitute(&self, gid: GlyphId) -> Option<GlyphId> {
        let index = self.coverage().get(gid)?;
        match self {
            // addition is modulo 65536
            SingleSubst::Format1 { delta_glyph_id, .. } => Some(GlyphId::new(
                (gid.to_u16() as i32 + *delta_glyph_id as i32) as u16,
            )),
            SingleSubst::Format2 {
                substitute_glyph_ids,
                ..
            } => substitute_glyph_ids.get(index as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::gsub as test_data;

    #[test]
    fn script_and_feature_lists() {
        let data = test_data::vertical_gsub();
        let gsub = Gsub::read(FontData::new(&data)).unwrap();
        let scripts = gsub.script_list().unwrap();
        assert!(scripts.contains(Tag::new(b"latn")));
        let latn = scripts.find(Tag::new(b"latn")).unwrap().unwrap();
        let lang_sys = latn.default_lang_sys().unwrap().unwrap();
        assert_eq!(lang_sys.feature_indices().iter().collect::<Vec<_>>(), [0, 1]);

        let features = gsub.feature_list().unwrap();
        let (tag, feature) = features.get(0).unwrap();
        assert_eq!(tag, Tag::new(b"vert"));
        assert_eq!(feature.lookup_list_indices().iter().collect::<Vec<_>>(), [0]);
        let (tag, _) = features.get(1).unwrap();
        assert_eq!(tag, Tag::new(b"vrt2"));
    }

    #[test]
    fn single_substitution_formats() {
        let data = test_data::vertical_gsub();
        let gsub = Gsub::read(FontData::new(&data)).unwrap();
        // lookup 0: format 1, delta 10, covers gids 1 and 2
        let subtables = gsub.single_substitutions(0).unwrap();
        assert_eq!(subtables.len(), 1);
        assert_eq!(subtables[0].substitute(GlyphId::new(2)), Some(GlyphId::new(12)));
        assert_eq!(subtables[0].substitute(GlyphId::new(3)), None);

        // lookup 1: extension wrapping format 2, gid 1 -> 20
        let subtables = gsub.single_substitutions(1).unwrap();
        assert_eq!(subtables.len(), 1);
        assert_eq!(subtables[0].substitute(GlyphId::new(1)), Some(GlyphId::new(20)));
        assert_eq!(subtables[0].substitute(GlyphId::new(2)), None);
    }

    #[test]
    fn bad_version() {
        let mut data = test_data::vertical_gsub();
        data[1] = 2;
        assert!(Gsub::read(FontData::new(&data)).is_err());
    }
}
