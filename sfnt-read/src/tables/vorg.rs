//! The [VORG (Vertical Origin)](https://docs.microsoft.com/en-us/typography/opentype/spec/vorg) table.

use types::{GlyphId, Scalar, Tag};

use crate::{array::ScalarArray, FontData, FontRead, ReadError, TopLevelTable};

/// 'VORG'
pub const TAG: Tag = Tag::new(b"VORG");

/// The vertical origin of one glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertOriginYMetrics {
    pub glyph_index: u16,
    pub vert_origin_y: i16,
}

impl Scalar for VertOriginYMetrics {
    type Raw = [u8; 4];

    fn from_raw(raw: [u8; 4]) -> Self {
        VertOriginYMetrics {
            glyph_index: u16::from_be_bytes([raw[0], raw[1]]),
            vert_origin_y: i16::from_be_bytes([raw[2], raw[3]]),
        }
    }

    fn to_raw(self) -> [u8; 4] {
        let [a, b] = self.glyph_index.to_be_bytes();
        let [c, d] = self.vert_origin_y.to_be_bytes();
        [a, b, c, d]
    }
}

/// The [VORG](https://docs.microsoft.com/en-us/typography/opentype/spec/vorg) table
#[derive(Clone, Debug)]
pub struct Vorg<'a> {
    data: FontData<'a>,
    metrics: ScalarArray<'a, VertOriginYMetrics>,
}

impl TopLevelTable for Vorg<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Vorg<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let major_version: u16 = cursor.read()?;
        if major_version != 1 {
            return Err(ReadError::InvalidFormat(major_version as i64));
        }
        cursor.advance_by(4);
        let num_metrics: u16 = cursor.read()?;
        let metrics = cursor.read_array(num_metrics as usize)?;
        Ok(Vorg { data, metrics })
    }
}

impl<'a> Vorg<'a> {
    field!(major_version: u16 = 0);
    field!(minor_version: u16 = 2);
    field!(
        /// The origin of glyphs without their own record.
        default_vert_origin_y: i16 = 4
    );

    /// Records sorted by glyph index.
    pub fn vert_origin_y_metrics(&self) -> ScalarArray<'a, VertOriginYMetrics> {
        self.metrics
    }

    /// Returns the y coordinate of the glyph's vertical origin.
    pub fn vertical_origin_y(&self, glyph_id: GlyphId) -> i16 {
        let gid = glyph_id.to_u16();
        self.metrics
            .binary_search_by(|rec| rec.glyph_index.cmp(&gid))
            .ok()
            .and_then(|ix| self.metrics.get(ix))
            .map(|rec| rec.vert_origin_y)
            .unwrap_or_else(|| self.default_vert_origin_y())
    }
}
