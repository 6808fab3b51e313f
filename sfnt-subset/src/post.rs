//! impl subset() for post
use sfnt_engine::Font;
use sfnt_read::tables::post::Post;
use sfnt_write::{tables::post::Post as WritePost, FontBuilder};

use crate::{Plan, Subset, SubsetError};

/// The name written for glyphs the source table has no name for.
const NOTDEF: &str = ".notdef";

// The subset table is always version 2.0, whatever the source version.
impl Subset for Post<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        _font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        let mut post = WritePost::from_existing(self);
        post.set_glyph_names(
            plan.old_gids()
                .map(|gid| self.glyph_name(gid).unwrap_or(NOTDEF)),
        );
        builder.add_table(&post);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use pretty_assertions::assert_eq;
    use sfnt_read::{tables::post::VERSION_2_0, FontRef, TableProvider};
    use sfnt_test_data::COMPOSITE_FONT;
    use sfnt_types::GlyphId;

    use super::*;

    #[test]
    fn names_follow_the_new_order() {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        let selection = BTreeSet::from([GlyphId::new(2), GlyphId::new(3)]);
        let plan = Plan::new(&font, &selection, &BTreeMap::new(), None, None).unwrap();
        let mut builder = FontBuilder::new();
        font.post()
            .unwrap()
            .subset(&plan, &font, &mut builder)
            .unwrap();
        let bytes = builder.build();
        let post = FontRef::new(&bytes).unwrap().post().unwrap();
        assert_eq!(post.version(), VERSION_2_0);
        assert_eq!(post.underline_position(), -75);
        let names = post
            .glyph_names()
            .map(|(gid, name)| (gid.to_u16(), name))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [(0, ".notdef"), (1, "a"), (2, "b.alt"), (3, "Aring")]
        );
    }
}
