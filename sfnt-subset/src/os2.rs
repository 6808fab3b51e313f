//! impl subset() for OS/2
use sfnt_engine::Font;
use sfnt_read::tables::os2::{Os2, TAG};
use sfnt_write::FontBuilder;

use crate::{Plan, Subset, SubsetError};

// The unicode ranges are cleared rather than recomputed.
impl Subset for Os2<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        _font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        let (Some((first, _)), Some((last, _))) = (
            plan.unicode_to_old_gid.first_key_value(),
            plan.unicode_to_old_gid.last_key_value(),
        ) else {
            log::debug!("no characters mapped, dropping OS/2");
            return Ok(());
        };
        let mut out = self.offset_data().as_bytes().to_vec();
        if out.len() < Os2::V0_LEN {
            return Err(SubsetError::SubsetTableError(TAG));
        }
        out[Os2::UNICODE_RANGE_BYTES].fill(0);
        for (offset, unicode) in [
            (Os2::FIRST_CHAR_INDEX_OFFSET, *first),
            (Os2::LAST_CHAR_INDEX_OFFSET, *last),
        ] {
            let unicode = unicode.min(0xFFFF) as u16;
            out[offset..offset + 2].copy_from_slice(&unicode.to_be_bytes());
        }
        builder.add_raw(TAG, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use pretty_assertions::assert_eq;
    use sfnt_read::{FontRef, TableProvider};
    use sfnt_test_data::COMPOSITE_FONT;
    use sfnt_types::GlyphId;

    use super::*;

    fn subset_os2(unicodes: &[(u32, u16)]) -> Vec<u8> {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        let unicode_to_gid = unicodes
            .iter()
            .map(|(cp, gid)| (*cp, GlyphId::new(*gid)))
            .collect();
        let plan = Plan::new(&font, &BTreeSet::new(), &unicode_to_gid, None, None).unwrap();
        let mut builder = FontBuilder::new();
        font.os2()
            .unwrap()
            .subset(&plan, &font, &mut builder)
            .unwrap();
        builder.build()
    }

    #[test]
    fn char_range_follows_the_subset() {
        let bytes = subset_os2(&[(0x62, 2), (0xC5, 3)]);
        let os2 = FontRef::new(&bytes).unwrap().os2().unwrap();
        assert_eq!(os2.us_first_char_index(), 0x62);
        assert_eq!(os2.us_last_char_index(), 0xC5);
        assert_eq!(os2.ul_unicode_range_1(), 0);
        // everything else is copied
        assert_eq!(os2.version(), 4);
        assert_eq!(os2.us_weight_class(), 400);
        assert_eq!(os2.sx_height(), Some(500));
    }

    #[test]
    fn supplementary_last_char_is_capped() {
        let bytes = subset_os2(&[(0x61, 1), (0x1F600, 2)]);
        let os2 = FontRef::new(&bytes).unwrap().os2().unwrap();
        assert_eq!(os2.us_first_char_index(), 0x61);
        assert_eq!(os2.us_last_char_index(), 0xFFFF);
    }

    #[test]
    fn dropped_without_characters() {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        let plan = Plan::new(&font, &BTreeSet::new(), &BTreeMap::new(), None, None).unwrap();
        let mut builder = FontBuilder::new();
        font.os2()
            .unwrap()
            .subset(&plan, &font, &mut builder)
            .unwrap();
        assert!(builder.tags().next().is_none());
    }
}
