//! impl subset() for glyf and loca
use std::collections::BTreeSet;

use sfnt_engine::Font;
use sfnt_read::tables::{
    glyf::{Glyf, Glyph, TAG},
    loca::Loca,
};
use sfnt_types::GlyphId;
use sfnt_write::{tables::loca::Loca as WriteLoca, FontBuilder};

use crate::{Plan, Subset, SubsetError};

impl Subset for Glyf<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        let loca = font.loca()?;
        let (glyf, offsets) = subset_glyf(self, &loca, plan)?;
        builder
            .add_raw(TAG, glyf)
            .add_table(&WriteLoca::new(offsets));
        Ok(())
    }
}

/// Adds every glyph referenced by a composite in `gids`, transitively.
///
/// Each glyph is read once, so reference cycles cannot keep this from
/// terminating.
pub(crate) fn glyf_closure_glyphs(
    font: &Font,
    gids: &mut BTreeSet<GlyphId>,
) -> Result<(), SubsetError> {
    let loca = font.loca()?;
    let glyf = font.glyf()?;
    let num_glyphs = font.num_glyphs();
    let mut pending: Vec<GlyphId> = gids.iter().copied().collect();
    while let Some(gid) = pending.pop() {
        let Some(Glyph::Composite(composite)) =
            loca.get_glyf(gid, &glyf).map_err(SubsetError::glyph(gid))?
        else {
            continue;
        };
        let components = composite
            .try_components()
            .map_err(SubsetError::glyph(gid))?;
        for component in components {
            if component.glyph.to_u16() >= num_glyphs {
                log::warn!("{gid} references missing glyph {}", component.glyph);
                continue;
            }
            if gids.insert(component.glyph) {
                pending.push(component.glyph);
            }
        }
    }
    Ok(())
}

/// Copies the outline of each retained glyph, renumbering component
/// references of composites.
///
/// Returns the new `glyf` data and its long offsets. Every glyph starts at
/// a 4-byte boundary.
fn subset_glyf(glyf: &Glyf, loca: &Loca, plan: &Plan) -> Result<(Vec<u8>, Vec<u32>), SubsetError> {
    let mut out = Vec::new();
    let mut offsets = Vec::with_capacity(plan.num_output_glyphs() + 1);
    for gid in plan.old_gids() {
        offsets.push(out.len() as u32);
        let Some(glyph) = loca.get_glyf(gid, glyf).map_err(SubsetError::glyph(gid))? else {
            continue;
        };
        let bytes = glyph.offset_data().as_bytes();
        match glyph {
            Glyph::Simple(_) => out.extend_from_slice(bytes),
            Glyph::Composite(composite) => {
                // trailing padding from the source is dropped
                let len = composite.data_len().map_err(SubsetError::glyph(gid))?;
                let mut bytes = bytes[..len].to_vec();
                for component in composite.components() {
                    let new_gid = plan.new_gid(component.glyph).unwrap_or_else(|| {
                        log::warn!("{gid} references missing glyph {}", component.glyph);
                        GlyphId::NOTDEF
                    });
                    let pos = component.glyph_offset;
                    bytes[pos..pos + 2].copy_from_slice(&new_gid.to_be_bytes());
                }
                out.extend_from_slice(&bytes);
            }
        }
        out.resize(out.len().next_multiple_of(4), 0);
    }
    offsets.push(out.len() as u32);
    Ok((out, offsets))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use sfnt_read::{FontData, FontRead};
    use sfnt_test_data::{
        glyf as test_glyf,
        test_font::{TestFont, TestGlyph},
        COMPOSITE_FONT,
    };

    use super::*;

    /// gid 4 is a composite of gids 2 and 3; gid 1 has no outline.
    fn sparse_composite_font() -> Vec<u8> {
        TestFont::new()
            .glyph(TestGlyph::empty(".notdef", 500))
            .glyph(TestGlyph::empty("space", 250))
            .glyph(TestGlyph::new("a", test_glyf::SQUARE, 500))
            .glyph(TestGlyph::new("b", test_glyf::ALTERNATING, 500))
            .glyph(TestGlyph::new("ab", &test_glyf::composite(&[2, 3]), 500))
            .map(0x61, 2)
            .map(0x62, 3)
            .build()
    }

    fn plan_for(font: &Font, gids: &[u16]) -> Plan {
        let gids = gids.iter().copied().map(GlyphId::new).collect();
        Plan::new(font, &gids, &BTreeMap::new(), None, None).unwrap()
    }

    #[test]
    fn closure_follows_components() {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        let mut gids = BTreeSet::from([GlyphId::new(3)]);
        glyf_closure_glyphs(&font, &mut gids).unwrap();
        assert_eq!(gids, BTreeSet::from([1, 2, 3].map(GlyphId::new)));
    }

    #[test]
    fn component_references_are_renumbered() {
        let data = sparse_composite_font();
        let font = Font::new(&data).unwrap();
        let plan = plan_for(&font, &[4]);
        assert_eq!(
            plan.old_gids().collect::<Vec<_>>(),
            [0, 2, 3, 4].map(GlyphId::new)
        );
        let (glyf, offsets) =
            subset_glyf(&font.glyf().unwrap(), &font.loca().unwrap(), &plan).unwrap();

        assert_eq!(offsets.len(), 5);
        assert!(offsets.iter().all(|offset| offset % 4 == 0));
        assert_eq!(*offsets.last().unwrap() as usize, glyf.len());

        let composite = &glyf[offsets[3] as usize..offsets[4] as usize];
        let Glyph::Composite(composite) = Glyph::read(FontData::new(composite)).unwrap() else {
            panic!("expected a composite glyph");
        };
        let children = composite
            .components()
            .map(|component| component.glyph)
            .collect::<Vec<_>>();
        assert_eq!(children, [1, 2].map(GlyphId::new));
    }

    #[test]
    fn simple_glyphs_are_copied_verbatim() {
        let data = sparse_composite_font();
        let font = Font::new(&data).unwrap();
        let plan = plan_for(&font, &[3]);
        let (glyf, offsets) =
            subset_glyf(&font.glyf().unwrap(), &font.loca().unwrap(), &plan).unwrap();
        // .notdef is empty
        assert_eq!(offsets[0], offsets[1]);
        let alternating = &glyf[offsets[1] as usize..offsets[2] as usize];
        assert_eq!(&alternating[..test_glyf::ALTERNATING.len()], test_glyf::ALTERNATING);
    }
}
