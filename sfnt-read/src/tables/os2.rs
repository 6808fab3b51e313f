//! The [os2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::Tag;

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// 'OS/2'
pub const TAG: Tag = Tag::new(b"OS/2");

/// [`OS/2`](https://docs.microsoft.com/en-us/typography/opentype/spec/os2)
/// (OS/2 and Windows Metrics) table.
///
/// Fields added by later versions of the table are optional.
#[derive(Clone, Copy, Debug)]
pub struct Os2<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Os2<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Os2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: u16 = data.read_at(0)?;
        let min_len = match version {
            0 => Os2::V0_LEN,
            1 => Os2::V1_LEN,
            2..=4 => Os2::V2_LEN,
            _ => Os2::V5_LEN,
        };
        data.check_len(min_len)?;
        Ok(Os2 { data })
    }
}

impl<'a> Os2<'a> {
    pub const V0_LEN: usize = 78;
    pub const V1_LEN: usize = 86;
    pub const V2_LEN: usize = 96;
    pub const V5_LEN: usize = 100;

    /// Byte range of the four `ulUnicodeRange` fields.
    pub const UNICODE_RANGE_BYTES: std::ops::Range<usize> = 42..58;
    pub const FIRST_CHAR_INDEX_OFFSET: usize = 64;
    pub const LAST_CHAR_INDEX_OFFSET: usize = 66;

    field!(version: u16 = 0);
    field!(
        /// Average weighted escapement of the non-zero width glyphs.
        x_avg_char_width: i16 = 2
    );
    field!(us_weight_class: u16 = 4);
    field!(us_width_class: u16 = 6);
    field!(
        /// Font embedding licensing rights.
        fs_type: u16 = 8
    );
    field!(y_subscript_x_size: i16 = 10);
    field!(y_subscript_y_size: i16 = 12);
    field!(y_subscript_x_offset: i16 = 14);
    field!(y_subscript_y_offset: i16 = 16);
    field!(y_superscript_x_size: i16 = 18);
    field!(y_superscript_y_size: i16 = 20);
    field!(y_superscript_x_offset: i16 = 22);
    field!(y_superscript_y_offset: i16 = 24);
    field!(y_strikeout_size: i16 = 26);
    field!(y_strikeout_position: i16 = 28);
    field!(s_family_class: i16 = 30);
    field!(ul_unicode_range_1: u32 = 42);
    field!(ul_unicode_range_2: u32 = 46);
    field!(ul_unicode_range_3: u32 = 50);
    field!(ul_unicode_range_4: u32 = 54);
    field!(
        /// Font vendor identification.
        ach_vend_id: Tag = 58
    );
    field!(fs_selection: u16 = 62);
    field!(
        /// The minimum Unicode index (character code) in this font.
        us_first_char_index: u16 = 64
    );
    field!(
        /// The maximum Unicode index (character code) in this font.
        us_last_char_index: u16 = 66
    );
    field!(s_typo_ascender: i16 = 68);
    field!(s_typo_descender: i16 = 70);
    field!(s_typo_line_gap: i16 = 72);
    field!(us_win_ascent: u16 = 74);
    field!(us_win_descent: u16 = 76);
    optional_field!(ul_code_page_range_1: u32 = 78);
    optional_field!(ul_code_page_range_2: u32 = 82);
    optional_field!(sx_height: i16 = 86);
    optional_field!(s_cap_height: i16 = 88);
    optional_field!(us_default_char: u16 = 90);
    optional_field!(us_break_char: u16 = 92);
    optional_field!(us_max_context: u16 = 94);
    optional_field!(us_lower_optical_point_size: u16 = 96);
    optional_field!(us_upper_optical_point_size: u16 = 98);

    /// The 10-byte PANOSE classification.
    pub fn panose_10(&self) -> &'a [u8] {
        self.data.as_bytes().get(32..42).unwrap_or_default()
    }

    /// The raw bytes of the table.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}
