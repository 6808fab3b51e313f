//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::{Fixed, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// 'maxp'
pub const TAG: Tag = Tag::new(b"maxp");

/// The version used by fonts with CFF outlines.
pub const VERSION_0_5: Fixed = Fixed::from_bits(0x0000_5000);

/// The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp)
/// (maximum profile) table.
///
/// All fields past `num_glyphs` only exist in version 1.0.
#[derive(Clone, Copy, Debug)]
pub struct Maxp<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Maxp<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Maxp<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: Fixed = data.read_at(0)?;
        let len = if version == VERSION_0_5 {
            Maxp::V0_5_LEN
        } else if version == Fixed::ONE {
            Maxp::V1_LEN
        } else {
            return Err(ReadError::InvalidFormat(version.to_bits() as i64));
        };
        data.check_len(len)?;
        Ok(Maxp { data })
    }
}

impl<'a> Maxp<'a> {
    pub const V0_5_LEN: usize = 6;
    pub const V1_LEN: usize = 32;

    field!(version: Fixed = 0);
    field!(
        /// The number of glyphs in the font.
        num_glyphs: u16 = 4
    );
    optional_field!(
        /// Maximum points in a non-composite glyph.
        max_points: u16 = 6
    );
    optional_field!(max_contours: u16 = 8);
    optional_field!(max_composite_points: u16 = 10);
    optional_field!(max_composite_contours: u16 = 12);
    optional_field!(
        /// 1 if instructions do not use the twilight zone, 2 otherwise.
        max_zones: u16 = 14
    );
    optional_field!(max_twilight_points: u16 = 16);
    optional_field!(max_storage: u16 = 18);
    optional_field!(max_function_defs: u16 = 20);
    optional_field!(max_instruction_defs: u16 = 22);
    optional_field!(max_stack_elements: u16 = 24);
    optional_field!(max_size_of_instructions: u16 = 26);
    optional_field!(max_component_elements: u16 = 28);
    optional_field!(max_component_depth: u16 = 30);

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
    fn version_0_5() {
        let buf = BeBuffer::new().push(VERSION_0_5).push(12u16);
        let maxp = Maxp::read(FontData::new(&buf)).unwrap();
        assert_eq!(maxp.num_glyphs(), 12);
        assert_eq!(maxp.max_points(), None);
    }

    #[test]
    fn version_1_0() {
        let buf = BeBuffer::new()
            .push(Fixed::ONE)
            .push(4u16)
            .extend([40u16, 2, 80, 4, 2, 0, 0, 0, 0, 64, 0, 2, 1]);
        let maxp = Maxp::read(FontData::new(&buf)).unwrap();
        assert_eq!(maxp.num_glyphs(), 4);
        assert_eq!(maxp.max_points(), Some(40));
        assert_eq!(maxp.max_component_depth(), Some(1));
    }

    #[test]
    fn bad_version() {
        let buf = BeBuffer::new().push(Fixed::from_i32(2)).push(4u16);
        assert!(matches!(
            Maxp::read(FontData::new(&buf)),
            Err(ReadError::InvalidFormat(0x20000))
        ));
    }
}
