//! The Horizontal/Vertical Metrics tables.
//!
//! The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx)
//! and [vmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/vmtx)
//! tables have the same structure and so we define them in the same module.

use types::{GlyphId, Scalar};

use crate::{array::ScalarArray, FontData, FontReadWithArgs, ReadArgs, ReadError};

/// An advance paired with a side bearing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LongMetric {
    pub advance: u16,
    pub side_bearing: i16,
}

impl Scalar for LongMetric {
    type Raw = [u8; 4];

    fn from_raw(raw: [u8; 4]) -> Self {
        LongMetric {
            advance: u16::from_be_bytes([raw[0], raw[1]]),
            side_bearing: i16::from_be_bytes([raw[2], raw[3]]),
        }
    }

    fn to_raw(self) -> [u8; 4] {
        let [a, b] = self.advance.to_be_bytes();
        let [c, d] = self.side_bearing.to_be_bytes();
        [a, b, c, d]
    }
}

/// The hmtx or vmtx table.
#[derive(Clone, Debug)]
pub struct HVmtx<'a> {
    data: FontData<'a>,
    long_metrics: ScalarArray<'a, LongMetric>,
    bearings: ScalarArray<'a, i16>,
}

impl ReadArgs for HVmtx<'_> {
    /// The number of long metrics and the number of glyphs.
    type Args = (u16, u16);
}

impl<'a> FontReadWithArgs<'a> for HVmtx<'a> {
    fn read_with_args(data: FontData<'a>, args: &(u16, u16)) -> Result<Self, ReadError> {
        let (number_of_long_metrics, num_glyphs) = *args;
        let mut cursor = data.cursor();
        let long_metrics = cursor.read_array(number_of_long_metrics as usize)?;
        // fonts in the wild are frequently missing some of the trailing
        // bearings; take whatever is there.
        let num_bearings = (num_glyphs.saturating_sub(number_of_long_metrics) as usize)
            .min(cursor.remaining() / 2);
        let bearings = cursor.read_array(num_bearings)?;
        Ok(HVmtx {
            data,
            long_metrics,
            bearings,
        })
    }
}

impl<'a> HVmtx<'a> {
    pub fn long_metrics(&self) -> ScalarArray<'a, LongMetric> {
        self.long_metrics
    }

    /// Side bearings for glyphs beyond the long metrics.
    pub fn bearings(&self) -> ScalarArray<'a, i16> {
        self.bearings
    }

    /// Returns the advance for the given glyph.
    ///
    /// Glyphs past the end of the long metrics share the last advance.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        let ix = glyph_id.to_u16() as usize;
        self.long_metrics
            .get(ix)
            .or_else(|| self.long_metrics.last())
            .map(|metric| metric.advance)
    }

    /// Returns the left (or top) side bearing for the given glyph.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        let ix = glyph_id.to_u16() as usize;
        match self.long_metrics.get(ix) {
            Some(metric) => Some(metric.side_bearing),
            None => self.bearings.get(ix.checked_sub(self.long_metrics.len())?),
        }
    }

    /// The raw bytes of the table.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}
