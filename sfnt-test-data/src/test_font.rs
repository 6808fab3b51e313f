//! Assembling complete synthetic fonts

use sfnt_types::Tag;
use sfnt_write::{
    read::tables::hvmtx::LongMetric,
    tables::{
        cmap::{Cmap, Cmap4},
        hmtx::Hmtx,
        loca::Loca,
        maxp::Maxp,
        name::{Name, NameRecord},
        post::Post,
    },
    FontBuilder,
};

use crate::{be_buffer, bebuffer::BeBuffer};

/// One glyph of a [`TestFont`].
#[derive(Clone, Debug)]
pub struct TestGlyph {
    pub name: String,
    pub data: Vec<u8>,
    pub advance: u16,
    pub lsb: i16,
}

impl TestGlyph {
    pub fn new(name: &str, data: &[u8], advance: u16) -> Self {
        TestGlyph {
            name: name.to_string(),
            data: data.to_vec(),
            advance,
            lsb: 0,
        }
    }

    /// A glyph with no outline.
    pub fn empty(name: &str, advance: u16) -> Self {
        Self::new(name, &[], advance)
    }
}

/// A builder for small but complete TrueType fonts.
///
/// The font always has `head`, `hhea`, `maxp`, `hmtx`, `loca` (long),
/// `glyf`, `cmap`, `name`, `post` and `OS/2` tables.
#[derive(Clone, Debug)]
pub struct TestFont {
    glyphs: Vec<TestGlyph>,
    mappings: Vec<(u16, u16)>,
    family_name: String,
    postscript_name: String,
    units_per_em: u16,
    number_of_h_metrics: Option<u16>,
    vertical_advances: Option<Vec<u16>>,
    extra_tables: Vec<(Tag, Vec<u8>)>,
}

impl Default for TestFont {
    fn default() -> Self {
        TestFont {
            glyphs: Vec::new(),
            mappings: Vec::new(),
            family_name: "Test".to_string(),
            postscript_name: "Test-Regular".to_string(),
            units_per_em: 1000,
            number_of_h_metrics: None,
            vertical_advances: None,
            extra_tables: Vec::new(),
        }
    }
}

impl TestFont {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(mut self, glyph: TestGlyph) -> Self {
        self.glyphs.push(glyph);
        self
    }

    /// Map a code point to a glyph in the format 4 `cmap`.
    pub fn map(mut self, codepoint: u16, gid: u16) -> Self {
        self.mappings.push((codepoint, gid));
        self
    }

    pub fn postscript_name(mut self, name: &str) -> Self {
        self.postscript_name = name.to_string();
        self
    }

    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    /// Only write long metrics for the first `count` glyphs.
    pub fn number_of_h_metrics(mut self, count: u16) -> Self {
        self.number_of_h_metrics = Some(count);
        self
    }

    /// Add `vhea` and `vmtx` tables with these advance heights.
    pub fn vertical_advances(mut self, advances: Vec<u16>) -> Self {
        self.vertical_advances = Some(advances);
        self
    }

    /// Add a table, verbatim.
    pub fn table(mut self, tag: Tag, data: Vec<u8>) -> Self {
        self.extra_tables.push((tag, data));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16;
        let num_h_metrics = self
            .number_of_h_metrics
            .unwrap_or(num_glyphs)
            .min(num_glyphs);

        let mut glyf = Vec::new();
        let mut offsets = vec![0u32];
        for glyph in &self.glyphs {
            glyf.extend_from_slice(&glyph.data);
            glyf.resize((glyf.len() + 3) & !3, 0);
            offsets.push(glyf.len() as u32);
        }

        let (long, short) = self.glyphs.split_at(num_h_metrics as usize);
        let hmtx = Hmtx::new(
            long.iter()
                .map(|glyph| LongMetric {
                    advance: glyph.advance,
                    side_bearing: glyph.lsb,
                })
                .collect(),
            short.iter().map(|glyph| glyph.lsb).collect(),
        );

        let mut mappings = self.mappings.clone();
        mappings.sort();
        let first_char = mappings.first().map(|(cp, _)| *cp).unwrap_or_default();
        let last_char = mappings.last().map(|(cp, _)| *cp).unwrap_or_default();
        let cmap = Cmap::windows_bmp(Cmap4::from_mappings(
            mappings
                .iter()
                .map(|(cp, gid)| (*cp, sfnt_types::GlyphId::new(*gid))),
        ));

        let name = Name::new(vec![
            NameRecord::windows_english(1, &self.family_name),
            NameRecord::windows_english(2, "Regular"),
            NameRecord::windows_english(6, &self.postscript_name),
        ]);

        let mut post = Post::default();
        post.underline_position = -75;
        post.underline_thickness = 50;
        post.set_glyph_names(self.glyphs.iter().map(|glyph| glyph.name.as_str()));

        let maxp = Maxp {
            num_glyphs,
            max_zones: 2,
            ..Default::default()
        };

        let advance_max = self.glyphs.iter().map(|g| g.advance).max();
        let mut builder = FontBuilder::new();
        builder
            .add_raw(
                Tag::new(b"head"),
                head_table(self.units_per_em, 1).into_vec(),
            )
            .add_raw(
                Tag::new(b"hhea"),
                hhea_table(advance_max.unwrap_or_default(), num_h_metrics).into_vec(),
            )
            .add_raw(
                Tag::new(b"OS/2"),
                os2_table(first_char, last_char).into_vec(),
            )
            .add_table(&maxp)
            .add_table(&hmtx)
            .add_table(&Loca::new(offsets))
            .add_raw(Tag::new(b"glyf"), glyf)
            .add_table(&cmap)
            .add_table(&name)
            .add_table(&post);

        if let Some(advances) = &self.vertical_advances {
            let vmtx = advances
                .iter()
                .flat_map(|advance| [*advance as i16, 0])
                .fold(BeBuffer::new(), |buf, value| buf.push(value));
            builder
                .add_raw(
                    Tag::new(b"vhea"),
                    hhea_table(0, advances.len() as u16).into_vec(),
                )
                .add_raw(Tag::new(b"vmtx"), vmtx.into_vec());
        }
        for (tag, data) in &self.extra_tables {
            builder.add_raw(*tag, data.clone());
        }
        builder.build()
    }
}

/// A 54 byte `head` table.
pub fn head_table(units_per_em: u16, index_to_loc_format: i16) -> BeBuffer {
    be_buffer! {
        0x0001_0000u32,         // version
        0x0001_0000u32,         // fontRevision
        0u32,                   // checksumAdjustment
        0x5F0F_3CF5u32,         // magicNumber
        0u16,                   // flags
        (units_per_em),
        0i64, 0i64,             // created, modified
        [0i16, 0, 1000, 1000],  // bbox
        0u16,                   // macStyle
        8u16,                   // lowestRecPPEM
        2i16,                   // fontDirectionHint
        (index_to_loc_format),
        0i16                    // glyphDataFormat
    }
}

/// A 36 byte `hhea` (or `vhea`) table.
pub fn hhea_table(advance_max: u16, number_of_long_metrics: u16) -> BeBuffer {
    be_buffer! {
        0x0001_0000u32,         // version
        800i16,                 // ascender
        (-200i16),              // descender
        0i16,                   // lineGap
        (advance_max),
        [0i16, 0, 0],           // minLeftSideBearing, minRightSideBearing, xMaxExtent
        [1i16, 0, 0],           // caretSlopeRise, caretSlopeRun, caretOffset
        [0i16, 0, 0, 0],        // reserved
        0i16,                   // metricDataFormat
        (number_of_long_metrics)
    }
}

/// A 96 byte version 4 `OS/2` table.
pub fn os2_table(first_char: u16, last_char: u16) -> BeBuffer {
    be_buffer! {
        4u16,                   // version
        500i16,                 // xAvgCharWidth
        400u16,                 // usWeightClass
        5u16,                   // usWidthClass
        0u16,                   // fsType
        [650i16, 600, 0, 75, 650, 600, 0, 350], // sub/superscript metrics
        [50i16, 250],           // strikeout size and position
        0i16,                   // sFamilyClass
        [2u8, 0, 5, 3, 0, 0, 0, 0, 0, 0], // panose
        [1u32, 0, 0, 0],        // ulUnicodeRange1..4
        (Tag::new(b"TEST")),    // achVendID
        0x40u16,                // fsSelection
        (first_char),
        (last_char),
        [800i16, (-200), 0],    // typo ascender, descender, line gap
        [1000u16, 200],         // win ascent, descent
        [1u32, 0],              // ulCodePageRange1..2
        [500i16, 700],          // sxHeight, sCapHeight
        [0u16, 32, 1]           // default char, break char, max context
    }
}

/// Combine complete fonts into a version 1.0 TrueType collection.
///
/// Table offsets of each member are rebased onto the collection.
pub fn collection(fonts: &[&[u8]]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let mut data = be_buffer! {
        (Tag::new(b"ttcf")),
        1u16, 0u16,
        (fonts.len() as u32)
    }
    .into_vec();
    let mut members = Vec::new();
    let mut offset = header_len;
    for font in fonts {
        data.extend_from_slice(&(offset as u32).to_be_bytes());
        let mut font = font.to_vec();
        let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
        for i in 0..num_tables {
            let pos = 12 + 16 * i + 8;
            let old = u32::from_be_bytes([font[pos], font[pos + 1], font[pos + 2], font[pos + 3]]);
            font[pos..pos + 4].copy_from_slice(&(old + offset as u32).to_be_bytes());
        }
        offset += font.len();
        members.push(font);
    }
    members.iter().for_each(|font| data.extend_from_slice(font));
    data
}

#[cfg(test)]
mod tests {
    use sfnt_write::read::{FontRef, TableProvider};

    use crate::{COMPOSITE_FONT, SIMPLE_FONT, TTC};

    #[test]
    fn fonts_are_readable() {
        let font = FontRef::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.maxp().unwrap().num_glyphs(), 3);
        assert_eq!(font.hhea().unwrap().number_of_long_metrics(), 2);
        assert_eq!(font.loca(None).unwrap().len(), 3);
        assert_eq!(
            font.cmap().unwrap().map_codepoint(0x42u32),
            Some(sfnt_types::GlyphId::new(2))
        );
    }

    #[test]
    fn collection_members_are_rebased() {
        let simple = FontRef::from_index(&TTC, 0).unwrap();
        let composite = FontRef::from_index(&TTC, 1).unwrap();
        assert_eq!(simple.maxp().unwrap().num_glyphs(), 3);
        assert_eq!(composite.maxp().unwrap().num_glyphs(), 4);
        assert_eq!(
            composite.table_data(sfnt_types::Tag::new(b"glyf")).unwrap().as_bytes(),
            FontRef::new(&COMPOSITE_FONT)
                .unwrap()
                .table_data(sfnt_types::Tag::new(b"glyf"))
                .unwrap()
                .as_bytes()
        );
    }
}
