//! The Horizontal/Vertical Header tables.
//!
//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
//! and [vhea](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea)
//! tables have the same structure and so we define them in the same module.

use types::Fixed;

use crate::{FontData, FontRead, ReadError};

/// The hhea or vhea table.
#[derive(Clone, Copy, Debug)]
pub struct HVhea<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for HVhea<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_len(HVhea::LEN)?;
        Ok(HVhea { data })
    }
}

impl<'a> HVhea<'a> {
    pub const LEN: usize = 36;

    /// Byte offset of the `numberOf{H,V}Metrics` field.
    pub const NUMBER_OF_LONG_METRICS_OFFSET: usize = 34;

    field!(version: Fixed = 0);
    field!(
        /// Typographic ascent (hhea) or vertical typographic ascender (vhea).
        ascender: i16 = 4
    );
    field!(descender: i16 = 6);
    field!(line_gap: i16 = 8);
    field!(
        /// Maximum advance width or height value in the metrics table.
        advance_max: u16 = 10
    );
    field!(min_leading_bearing: i16 = 12);
    field!(min_trailing_bearing: i16 = 14);
    field!(max_extent: i16 = 16);
    field!(caret_slope_rise: i16 = 18);
    field!(caret_slope_run: i16 = 20);
    field!(caret_offset: i16 = 22);
    field!(metric_data_format: i16 = 32);
    field!(
        /// Number of long metric entries in the hmtx/vmtx table.
        number_of_long_metrics: u16 = 34
    );

    /// The raw bytes of the table.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}
