//! impl subset() for cmap
use sfnt_engine::Font;
use sfnt_read::tables::cmap::{Cmap, TAG};
use sfnt_types::GlyphId;
use sfnt_write::{
    tables::cmap::{Cmap as WriteCmap, Cmap4},
    FontBuilder,
};

use crate::{Plan, Subset, SubsetError};

// A subset cmap has a single Windows Unicode BMP subtable, so characters
// outside the BMP cannot be kept, and the selection must fit in the
// segment limit of format 4.
impl Subset for Cmap<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        _font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        if !plan.has_unicodes() {
            log::debug!("no characters mapped, dropping cmap");
            return Ok(());
        }
        let subtable = Cmap4::from_mappings(bmp_mappings(plan)?);
        if !subtable.fits() {
            log::error!(
                "{} cmap segments exceed the format 4 limit",
                subtable.seg_count()
            );
            return Err(SubsetError::SubsetTableError(TAG));
        }
        builder.add_table(&WriteCmap::windows_bmp(subtable));
        Ok(())
    }
}

fn bmp_mappings(plan: &Plan) -> Result<Vec<(u16, GlyphId)>, SubsetError> {
    plan.unicode_to_new_gid()
        .map(|(unicode, gid)| {
            u16::try_from(unicode)
                .map(|unicode| (unicode, gid))
                .map_err(|_| SubsetError::NotSupportedSubsetRange(unicode))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use pretty_assertions::assert_eq;
    use sfnt_engine::CmapLookup;
    use sfnt_read::{FontRef, TableProvider};
    use sfnt_test_data::{
        glyf,
        test_font::{TestFont, TestGlyph},
    };
    use sfnt_write::tables::cmap::Cmap4Segment;

    use super::*;

    fn run_font() -> Vec<u8> {
        let mut font = TestFont::new().glyph(TestGlyph::empty(".notdef", 500));
        for gid in 1..=6 {
            font = font.glyph(TestGlyph::new(&format!("g{gid}"), glyf::SQUARE, 500));
        }
        // 'a'..='d' map to consecutive glyphs, 'x' breaks the run
        font.map(0x61, 1)
            .map(0x62, 2)
            .map(0x63, 3)
            .map(0x64, 4)
            .map(0x78, 6)
            .build()
    }

    fn plan(font: &Font, unicodes: &[u32]) -> Plan {
        let lookup = font.cmap_lookup();
        let unicode_to_gid: BTreeMap<_, _> = unicodes
            .iter()
            .map(|cp| (*cp, lookup.glyph_id(*cp)))
            .collect();
        Plan::new(font, &BTreeSet::new(), &unicode_to_gid, None, None).unwrap()
    }

    #[test]
    fn runs_become_segments() {
        let data = run_font();
        let font = Font::new(&data).unwrap();
        // dropping 'c' splits the run
        let plan = plan(&font, &[0x61, 0x62, 0x64, 0x78]);
        let cmap = Cmap4::from_mappings(bmp_mappings(&plan).unwrap());
        assert_eq!(
            cmap.segments(),
            [
                Cmap4Segment {
                    start_code: 0x61,
                    end_code: 0x62,
                    id_delta: 1 - 0x61,
                },
                Cmap4Segment {
                    start_code: 0x64,
                    end_code: 0x64,
                    id_delta: 3 - 0x64,
                },
                Cmap4Segment {
                    start_code: 0x78,
                    end_code: 0x78,
                    id_delta: 4 - 0x78,
                },
            ]
        );
    }

    #[test]
    fn written_cmap_maps_new_gids() {
        let data = run_font();
        let font = Font::new(&data).unwrap();
        let plan = plan(&font, &[0x62, 0x78]);
        let mut builder = FontBuilder::new();
        font.cmap()
            .unwrap()
            .subset(&plan, &font, &mut builder)
            .unwrap();
        let bytes = builder.build();
        let cmap = FontRef::new(&bytes).unwrap().cmap().unwrap();
        let subtable = cmap.subtable_for(3, 1).unwrap();
        assert_eq!(subtable.format(), 4);
        assert_eq!(subtable.map_codepoint(0x62), Some(GlyphId::new(1)));
        assert_eq!(subtable.map_codepoint(0x78), Some(GlyphId::new(2)));
        assert_eq!(subtable.map_codepoint(0x61), None);
    }

    #[test]
    fn too_many_segments_is_an_error() {
        let mut font = TestFont::new().glyph(TestGlyph::empty(".notdef", 500));
        for gid in 1..=9000 {
            font = font.glyph(TestGlyph::empty(&format!("g{gid}"), 500));
        }
        let data = font.build();
        let font = Font::new(&data).unwrap();
        // every other character, so each one needs its own segment
        let unicode_to_gid: BTreeMap<_, _> = (1..=9000u16)
            .map(|gid| (0x4E00 + gid as u32 * 2, GlyphId::new(gid)))
            .collect();
        let plan = Plan::new(&font, &BTreeSet::new(), &unicode_to_gid, None, None).unwrap();
        let mut builder = FontBuilder::new();
        let result = font.cmap().unwrap().subset(&plan, &font, &mut builder);
        assert!(matches!(result, Err(SubsetError::SubsetTableError(TAG))));
        assert!(!builder.contains(TAG));
    }

    #[test]
    fn unmapped_subset_has_no_cmap() {
        let data = run_font();
        let font = Font::new(&data).unwrap();
        let plan = plan(&font, &[]);
        let mut builder = FontBuilder::new();
        font.cmap()
            .unwrap()
            .subset(&plan, &font, &mut builder)
            .unwrap();
        assert!(builder.tags().next().is_none());
    }
}
