//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{Fixed, LongDateTime, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Copy, Debug)]
pub struct Head<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Head<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Head<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_len(Head::LEN)?;
        Ok(Head { data })
    }
}

impl<'a> Head<'a> {
    /// The size of the table, in bytes.
    pub const LEN: usize = 54;

    /// Byte offset of the `checksumAdjustment` field.
    pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

    /// Byte offset of the `indexToLocFormat` field.
    pub const INDEX_TO_LOC_FORMAT_OFFSET: usize = 50;

    /// The value `checksumAdjustment` is computed against.
    pub const CHECKSUM_MAGIC: u32 = 0xB1B0AFBA;

    field!(version: Fixed = 0);
    field!(font_revision: Fixed = 4);
    field!(
        /// To compute: set it to 0, sum the entire font as uint32, then store
        /// 0xB1B0AFBA - sum.
        checksum_adjustment: u32 = 8
    );
    field!(
        /// Set to 0x5F0F3CF5.
        magic_number: u32 = 12
    );
    field!(flags: u16 = 16);
    field!(
        /// Valid range is from 16 to 16384.
        units_per_em: u16 = 18
    );
    field!(created: LongDateTime = 20);
    field!(modified: LongDateTime = 28);
    field!(x_min: i16 = 36);
    field!(y_min: i16 = 38);
    field!(x_max: i16 = 40);
    field!(y_max: i16 = 42);
    field!(mac_style: u16 = 44);
    field!(
        /// Smallest readable size in pixels.
        lowest_rec_ppem: u16 = 46
    );
    field!(font_direction_hint: i16 = 48);
    field!(
        /// 0 for short offsets (Offset16), 1 for long (Offset32).
        index_to_loc_format: i16 = 50
    );
    field!(glyph_data_format: i16 = 52);

    /// The raw bytes of the table.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::bebuffer::BeBuffer;

    #[test]
    fn smoke_text() {
        let buf = BeBuffer::new()
            .extend([1u16, 0u16])
            .push(Fixed::from_f64(2.8))
            .extend([42u32, 0x5f0f3cf5])
            .extend([16u16, 4096]) // flags, upm
            .extend([LongDateTime::new(-500), LongDateTime::new(101)])
            .extend([-100i16, -50, 400, 711])
            .extend([0u16, 12]) // mac_style / ppem
            .extend([2i16, 1, 0]);

        let head = Head::read(FontData::new(&buf)).unwrap();
        assert_eq!(head.version(), Fixed::ONE);
        assert_eq!(head.font_revision(), Fixed::from_f64(2.8));
        assert_eq!(head.checksum_adjustment(), 42);
        assert_eq!(head.units_per_em(), 4096);
        assert_eq!(head.created().as_secs(), -500);
        assert_eq!(head.y_min(), -50);
        assert_eq!(head.x_max(), 400);
        assert_eq!(head.index_to_loc_format(), 1);
        assert_eq!(head.glyph_data_format(), 0);
    }

    #[test]
    fn truncated() {
        assert!(matches!(
            Head::read(FontData::new(&[0u8; 53])),
            Err(ReadError::OutOfBounds)
        ));
    }
}
