//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use types::{GlyphId, Tag};

use crate::{
    array::ScalarArray,
    read::{FontReadWithArgs, ReadArgs, ReadError},
    tables::glyf::{Glyf, Glyph},
    FontData, FontRead, TopLevelTable,
};

/// 'loca'
pub const TAG: Tag = Tag::new(b"loca");

/// The [loca] table.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug)]
pub enum Loca<'a> {
    Short(ScalarArray<'a, u16>),
    Long(ScalarArray<'a, u32>),
}

impl TopLevelTable for Loca<'_> {
    const TAG: Tag = TAG;
}

impl<'a> Loca<'a> {
    pub fn read(data: FontData<'a>, is_long: bool, num_glyphs: u16) -> Result<Self, ReadError> {
        Self::read_with_args(data, &(is_long, num_glyphs))
    }

    /// The number of glyphs covered by the table.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Loca::Long(_))
    }

    /// Attempt to return the offset for a given glyph id.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x as u32 * 2),
            Loca::Long(data) => data.get(idx),
        }
    }

    /// The byte range of the glyph in the `glyf` table.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Range<usize>, ReadError> {
        let idx = gid.to_u16() as usize;
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)?;
        if end < start {
            return Err(ReadError::MalformedData("loca offsets are not ascending"));
        }
        Ok(start as usize..end as usize)
    }

    /// Returns the glyph, or `None` if it has no outline data.
    pub fn get_glyf(&self, gid: GlyphId, glyf: &Glyf<'a>) -> Result<Option<Glyph<'a>>, ReadError> {
        let range = self.glyph_range(gid)?;
        if range.is_empty() {
            return Ok(None);
        }
        let data = glyf
            .offset_data()
            .slice(range)
            .ok_or(ReadError::OutOfBounds)?;
        Glyph::read(data).map(Some)
    }
}

impl ReadArgs for Loca<'_> {
    /// The declared offset format and the number of glyphs.
    type Args = (bool, u16);
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let (declared_long, num_glyphs) = *args;
        let num_offsets = num_glyphs as usize + 1;
        // some fonts declare the wrong format; trust the length when it
        // matches exactly one of them.
        let is_long = if data.len() == num_offsets * 4 {
            true
        } else if data.len() == num_offsets * 2 {
            false
        } else {
            declared_long
        };
        if is_long {
            let len = (data.len() / 4).min(num_offsets);
            data.read_array(0..len * 4).map(Loca::Long)
        } else {
            let len = (data.len() / 2).min(num_offsets);
            data.read_array(0..len * 2).map(Loca::Short)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::bebuffer::BeBuffer;

    #[test]
    fn short_offsets_are_doubled() {
        let buf = BeBuffer::new().extend([0u16, 6, 6, 20]);
        let loca = Loca::read(FontData::new(&buf), false, 3).unwrap();
        assert_eq!(loca.len(), 3);
        assert_eq!(loca.get_raw(1), Some(12));
        assert_eq!(loca.glyph_range(GlyphId::new(1)).unwrap(), 12..12);
        assert_eq!(loca.glyph_range(GlyphId::new(2)).unwrap(), 12..40);
        assert!(loca.glyph_range(GlyphId::new(3)).is_err());
    }

    #[test]
    fn length_overrides_declared_format() {
        let buf = BeBuffer::new().extend([0u32, 12, 40]);
        let loca = Loca::read(FontData::new(&buf), false, 2).unwrap();
        assert!(loca.is_long());
        assert_eq!(loca.get_raw(2), Some(40));
    }

    #[test]
    fn descending_offsets() {
        let buf = BeBuffer::new().extend([0u32, 12, 8]);
        let loca = Loca::read(FontData::new(&buf), true, 2).unwrap();
        assert!(matches!(
            loca.glyph_range(GlyphId::new(1)),
            Err(ReadError::MalformedData(_))
        ));
    }
}
