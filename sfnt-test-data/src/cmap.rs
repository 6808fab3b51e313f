//! cmap test data for scenarios not readily produced with ttx

use std::sync::LazyLock;

use crate::{be_buffer, bebuffer::BeBuffer};

/// Format 0, mapping only 'A' to glyph 3.
pub static FORMAT_0: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut glyphs = [0u8; 256];
    glyphs[b'A' as usize] = 3;
    be_buffer! { 0u16, 262u16, 0u16 }.extend(glyphs).into_vec()
});

/// Format 2 with one single byte code (0x41 -> 5) and one lead byte (0x81)
/// covering trail bytes 0x40 and 0x41 (-> 8, 9).
pub static FORMAT_2: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut keys = [0u16; 256];
    keys[0x81] = 8;
    let header = be_buffer! {
        2u16,                   // format
        540u16,                 // length
        0u16                    // language
    };
    let sub_headers = be_buffer! {
        // subHeader 0: single byte codes
        0x41u16, 1u16, 0i16,
        10u16,                  // idRangeOffset -> glyphIdArray[0]
        // subHeader 1: lead byte 0x81
        0x40u16, 2u16, 0i16,
        4u16,                   // idRangeOffset -> glyphIdArray[1]
        [5u16, 8, 9]            // glyphIdArray
    };
    let mut buf = header.extend(keys).into_vec();
    buf.extend_from_slice(&sub_headers);
    buf
});

/// Format 4 with a delta segment ('a'..='c' -> 1..=3) and a glyph array
/// segment (0x100..=0x101 -> 7, 9).
#[rustfmt::skip]
pub static FORMAT_4: &[u8] = &[
    0x00, 0x04,             // format
    0x00, 0x2C,             // length
    0x00, 0x00,             // language
    0x00, 0x06,             // segCountX2
    0x00, 0x04,             // searchRange
    0x00, 0x01,             // entrySelector
    0x00, 0x02,             // rangeShift
    0x00, 0x63, 0x01, 0x01, 0xFF, 0xFF, // endCode
    0x00, 0x00,             // reservedPad
    0x00, 0x61, 0x01, 0x00, 0xFF, 0xFF, // startCode
    0xFF, 0xA0, 0x00, 0x00, 0x00, 0x01, // idDelta: -0x60, 0, 1
    0x00, 0x00, 0x00, 0x04, 0x00, 0x00, // idRangeOffset
    0x00, 0x07, 0x00, 0x09, // glyphIdArray
];

/// Format 6 starting at 0x20, mapping to glyphs 4 and 5.
#[rustfmt::skip]
pub static FORMAT_6: &[u8] = &[
    0x00, 0x06,             // format
    0x00, 0x0E,             // length
    0x00, 0x00,             // language
    0x00, 0x20,             // firstCode
    0x00, 0x02,             // entryCount
    0x00, 0x04, 0x00, 0x05, // glyphIdArray
];

/// Format 12: U+1F600..=U+1F602 -> 10..=12.
#[rustfmt::skip]
pub static FORMAT_12: &[u8] = &[
    0x00, 0x0C, 0x00, 0x00, // format, reserved
    0x00, 0x00, 0x00, 0x1C, // length
    0x00, 0x00, 0x00, 0x00, // language
    0x00, 0x00, 0x00, 0x01, // numGroups
    0x00, 0x01, 0xF6, 0x00, // startCharCode
    0x00, 0x01, 0xF6, 0x02, // endCharCode
    0x00, 0x00, 0x00, 0x0A, // startGlyphID
];

/// Format 13: 0x10..=0x1F all map to glyph 2.
#[rustfmt::skip]
pub static FORMAT_13: &[u8] = &[
    0x00, 0x0D, 0x00, 0x00, // format, reserved
    0x00, 0x00, 0x00, 0x1C, // length
    0x00, 0x00, 0x00, 0x00, // language
    0x00, 0x00, 0x00, 0x01, // numGroups
    0x00, 0x00, 0x00, 0x10, // startCharCode
    0x00, 0x00, 0x00, 0x1F, // endCharCode
    0x00, 0x00, 0x00, 0x02, // glyphID
];

/// Format 14 header with no variation selector records.
#[rustfmt::skip]
pub static FORMAT_14: &[u8] = &[
    0x00, 0x0E,             // format
    0x00, 0x00, 0x00, 0x0A, // length
    0x00, 0x00, 0x00, 0x00, // numVarSelectorRecords
];

/// A cmap with a (3, 1) format 4 subtable mapping 'a' -> 1, and a (1, 0)
/// format 0 subtable.
pub fn multi_format_cmap() -> Vec<u8> {
    let format_4 = be_buffer! {
        4u16, 32u16, 0u16,
        4u16,                   // segCountX2
        4u16, 1u16, 0u16,
        [0x61u16, 0xFFFF],      // endCode
        0u16,
        [0x61u16, 0xFFFF],      // startCode
        [-0x60i16, 1],          // idDelta
        [0u16, 0]               // idRangeOffset
    };
    let format_0_offset = 4 + 2 * 8 + format_4.len() as u32;
    let mut buf = be_buffer! {
        0u16, 2u16,
        3u16, 1u16, 20u32,
        1u16, 0u16, (format_0_offset)
    }
    .into_vec();
    buf.extend_from_slice(&format_4);
    buf.extend_from_slice(&FORMAT_0);
    buf
}
