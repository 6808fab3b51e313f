//! test data shared between the sfnt crates.
//!
//! Everything here is exposed as plain bytes so that crates lower in the
//! stack can use it without depending on each other's types.

use std::sync::LazyLock;

use sfnt_types::Tag;

pub mod bebuffer;
pub mod cmap;
pub mod glyf;
pub mod gsub;
pub mod name;
pub mod test_font;

use test_font::{TestFont, TestGlyph};

/// Three glyphs: `.notdef`, `A` (a square) and `B` (alternating on and off
/// curve points), mapped from 'A' and 'B'.
///
/// Only the first two glyphs have long horizontal metrics.
pub static SIMPLE_FONT: LazyLock<Vec<u8>> = LazyLock::new(|| {
    TestFont::new()
        .glyph(TestGlyph::empty(".notdef", 500))
        .glyph(TestGlyph::new("A", glyf::SQUARE, 600))
        .glyph(TestGlyph::new("B", glyf::ALTERNATING, 700))
        .map(0x41, 1)
        .map(0x42, 2)
        .number_of_h_metrics(2)
        .build()
});

/// Four glyphs: gid 3 (`Aring`) is a composite of gid 1 (`a`, a square)
/// and gid 2 (`b.alt`, alternating), mapped from 'a', 'b' and U+00C5.
pub static COMPOSITE_FONT: LazyLock<Vec<u8>> = LazyLock::new(|| {
    TestFont::new()
        .postscript_name("Composite-Regular")
        .glyph(TestGlyph::empty(".notdef", 500))
        .glyph(TestGlyph::new("a", glyf::SQUARE, 510))
        .glyph(TestGlyph::new("b.alt", glyf::ALTERNATING, 520))
        .glyph(TestGlyph::new("Aring", glyf::COMPOSITE, 530))
        .map(0x61, 1)
        .map(0x62, 2)
        .map(0xC5, 3)
        .vertical_advances(vec![1000, 900, 800, 700])
        .build()
});

/// gid 2 is a composite referencing itself; gids 3 and 4 reference each
/// other. gid 5 is a composite of the square at gid 1 and the cycle at 3.
pub static CYCLIC_FONT: LazyLock<Vec<u8>> = LazyLock::new(|| {
    TestFont::new()
        .glyph(TestGlyph::empty(".notdef", 500))
        .glyph(TestGlyph::new("square", glyf::SQUARE, 500))
        .glyph(TestGlyph::new("self", &glyf::composite(&[2]), 500))
        .glyph(TestGlyph::new("ping", &glyf::composite(&[4]), 500))
        .glyph(TestGlyph::new("pong", &glyf::composite(&[3]), 500))
        .glyph(TestGlyph::new("outer", &glyf::composite(&[1, 3]), 500))
        .map(0x20, 1)
        .build()
});

/// A font with the vertical substitutions of [`gsub::vertical_gsub`] and
/// enough glyphs for their results.
pub static VERTICAL_FONT: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut font = TestFont::new()
        .glyph(TestGlyph::empty(".notdef", 500))
        .glyph(TestGlyph::new("A", glyf::SQUARE, 500))
        .glyph(TestGlyph::new("B", glyf::ALTERNATING, 500));
    for gid in 3..24 {
        font = font.glyph(TestGlyph::empty(&format!("g{gid}"), 500));
    }
    font.map(0x41, 1)
        .map(0x42, 2)
        .table(Tag::new(b"GSUB"), gsub::vertical_gsub())
        .build()
});

/// A collection of [`SIMPLE_FONT`] and [`COMPOSITE_FONT`].
pub static TTC: LazyLock<Vec<u8>> =
    LazyLock::new(|| test_font::collection(&[SIMPLE_FONT.as_slice(), COMPOSITE_FONT.as_slice()]));

/// A font whose `head` claims long `loca` offsets while the table holds
/// short ones.
pub fn loca_swapped_format_font() -> Vec<u8> {
    let maxp = be_buffer! { 0x0000_5000u32, 1u16 };
    let loca = be_buffer! { [0u16, 6] };
    let mut builder = sfnt_write::FontBuilder::new();
    builder
        .add_raw(
            Tag::new(b"head"),
            test_font::head_table(1000, 1).into_vec(),
        )
        .add_raw(Tag::new(b"maxp"), maxp.into_vec())
        .add_raw(Tag::new(b"loca"), loca.into_vec())
        .add_raw(Tag::new(b"glyf"), vec![0u8; 12]);
    builder.build()
}

pub mod post {

    #[rustfmt::skip]
    pub static SIMPLE: &[u8] = &[
        0x00, 0x02, 0x00, 0x00, // version 2.0
        0x00, 0x00, 0x00, 0x00, // italic angle
        0xFF, 0xb5,             // underlinePosition -75
        0x00, 0x32,             // underlineThickness 50
        0x00, 0x00, 0x00, 0x00, // fixedpitch
        0x00, 0x00, 0x00, 0x00, // min/max mem:
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x0A,             // numGlyphs 10
                                // glyph name index:
        0x00, 0x00,              // glyph 0 -> name 0
        0x00, 0x00,             // glyph 1 -> name 0
        0x00, 0x03,              // glyph 2 -> name 3 ('space')
        0x00, 0x04,              // glyph 3 -> name 4 ('exclam')
        0x00, 0x06,
        0x00, 0x07,
        0x00, 0x08,
        0x01, 0x02,             // glyph 7 -> name 258 first custom
        0x01, 0x03,             // glyph 8 -> name 258 first custom
        0x01, 0x04,             // glyph 9 -> name 258 first custom
        0x05, 0x68, 0x65, 0x6c, 0x6c, 0x6f, // 5, h e l l o
        0x02, 0x68, 0x69, // 2, h i
        0x4, 0x68, 0x6f, 0x6c, 0x61, // 4, h o l a
    ];
}
