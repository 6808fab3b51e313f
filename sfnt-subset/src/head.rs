//! impl subset() for head
use sfnt_engine::Font;
use sfnt_read::tables::head::{Head, TAG};
use sfnt_write::FontBuilder;

use crate::{Plan, Subset, SubsetError};

/// The `indexToLocFormat` value for 32-bit `loca` offsets.
const LONG_LOCA_FORMAT: i16 = 1;

impl Subset for Head<'_> {
    fn subset<'a>(
        &self,
        _plan: &Plan,
        _font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        builder.add_raw(TAG, subset_head(self));
        Ok(())
    }
}

/// Copies the table, zeroing `checksumAdjustment` and switching to long
/// `loca` offsets.
pub(crate) fn subset_head(head: &Head) -> Vec<u8> {
    let mut out = head.offset_data().as_bytes()[..Head::LEN].to_vec();
    let adjustment = Head::CHECKSUM_ADJUSTMENT_OFFSET;
    out[adjustment..adjustment + 4].fill(0);
    let loca_format = Head::INDEX_TO_LOC_FORMAT_OFFSET;
    out[loca_format..loca_format + 2].copy_from_slice(&LONG_LOCA_FORMAT.to_be_bytes());
    out
}
