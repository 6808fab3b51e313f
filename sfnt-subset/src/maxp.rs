//! impl subset() for maxp
use sfnt_engine::Font;
use sfnt_read::tables::maxp::Maxp;
use sfnt_write::{tables::maxp::Maxp as WriteMaxp, FontBuilder};

use crate::{Plan, Subset, SubsetError};

// The limits are copied as is; a subset never exceeds them.
impl Subset for Maxp<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        _font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        let num_glyphs = plan.num_output_glyphs().min(u16::MAX as usize) as u16;
        builder.add_table(&WriteMaxp::from_existing(self, num_glyphs));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use sfnt_read::{FontRef, TableProvider};
    use sfnt_test_data::COMPOSITE_FONT;
    use sfnt_types::GlyphId;

    use super::*;

    #[test]
    fn glyph_count_is_replaced() {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        let selection = BTreeSet::from([GlyphId::new(2)]);
        let plan = Plan::new(&font, &selection, &BTreeMap::new(), None, None).unwrap();
        let mut builder = FontBuilder::new();
        font.maxp()
            .unwrap()
            .subset(&plan, &font, &mut builder)
            .unwrap();
        let bytes = builder.build();
        let maxp = FontRef::new(&bytes).unwrap().maxp().unwrap();
        assert_eq!(maxp.num_glyphs(), 2);
        assert_eq!(maxp.max_zones(), Some(2));
    }
}
