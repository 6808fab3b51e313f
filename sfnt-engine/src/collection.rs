//! TrueType collections.

use sfnt_read::{CollectionRef, FileRef};

use crate::{
    error::FontError,
    font::{Font, FontOptions},
};

/// The fonts of a `.ttc` file.
///
/// Every member borrows the same buffer, and table offsets are relative
/// to its start.
#[derive(Clone)]
pub struct FontCollection<'a> {
    collection: CollectionRef<'a>,
    options: FontOptions,
}

impl<'a> FontCollection<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, FontError> {
        Self::with_options(data, FontOptions::default())
    }

    /// Creates a collection whose members are loaded with `options`.
    pub fn with_options(data: &'a [u8], options: FontOptions) -> Result<Self, FontError> {
        let collection = CollectionRef::new(data).map_err(FontError::directory)?;
        let header = collection.header();
        log::debug!(
            "collection version {}.{} with {} fonts",
            header.major_version(),
            header.minor_version(),
            collection.len()
        );
        Ok(FontCollection {
            collection,
            options,
        })
    }

    pub fn len(&self) -> u32 {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// The `DSIG` table location of a version 2.0 header, as (tag, length,
    /// offset).
    pub fn dsig(&self) -> Option<(sfnt_types::Tag, u32, u32)> {
        let header = self.collection.header();
        Some((header.dsig_tag()?, header.dsig_length()?, header.dsig_offset()?))
    }

    pub fn get(&self, index: u32) -> Result<Font<'a>, FontError> {
        let font = self.collection.get(index).map_err(FontError::directory)?;
        Font::from_font_ref(&font, self.options)
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<Font<'a>, FontError>> + '_ {
        (0..self.len()).map(|index| self.get(index))
    }

    /// Returns the first member with the given PostScript name.
    ///
    /// Members that fail to load are skipped.
    pub fn font_by_name(&self, postscript_name: &str) -> Option<Font<'a>> {
        self.iter()
            .filter_map(|font| {
                font.inspect_err(|e| log::warn!("skipping collection member: {e}"))
                    .ok()
            })
            .find(|font| font.postscript_name().as_deref() == Some(postscript_name))
    }

    /// Calls `f` with every member, stopping at the first error.
    pub fn for_each_font(
        &self,
        mut f: impl FnMut(u32, &Font<'a>) -> Result<(), FontError>,
    ) -> Result<(), FontError> {
        for index in 0..self.len() {
            f(index, &self.get(index)?)?;
        }
        Ok(())
    }
}

/// Loads the font at `index` of either a single font or a collection.
///
/// A single font only has index 0.
pub fn load_font(data: &[u8], index: u32, options: FontOptions) -> Result<Font<'_>, FontError> {
    match FileRef::new(data).map_err(FontError::directory)? {
        FileRef::Font(font) if index == 0 => Font::from_font_ref(&font, options),
        FileRef::Font(_) => Err(FontError::directory(
            sfnt_read::ReadError::InvalidCollectionIndex(index),
        )),
        FileRef::Collection(collection) => {
            let font = collection.get(index).map_err(FontError::directory)?;
            Font::from_font_ref(&font, options)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sfnt_test_data::{COMPOSITE_FONT, SIMPLE_FONT, TTC};

    use super::*;

    #[test]
    fn members() {
        let collection = FontCollection::new(&TTC).unwrap();
        assert_eq!(collection.len(), 2);
        assert!(!collection.is_empty());
        assert_eq!(collection.dsig(), None);
        let names = collection
            .iter()
            .map(|font| font.unwrap().postscript_name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                Some("Test-Regular".to_string()),
                Some("Composite-Regular".to_string())
            ]
        );
        assert!(collection.get(2).is_err());
    }

    #[test]
    fn members_share_the_buffer() {
        let collection = FontCollection::new(&TTC).unwrap();
        let font = collection.get(1).unwrap();
        assert_eq!(font.ttc_index(), Some(1));
        let glyph = font.glyph(3.into()).unwrap().unwrap();
        let standalone = crate::Font::new(&COMPOSITE_FONT).unwrap();
        assert_eq!(
            glyph.points(),
            standalone.glyph(3.into()).unwrap().unwrap().points()
        );
    }

    #[test]
    fn find_by_name() {
        let collection = FontCollection::new(&TTC).unwrap();
        let font = collection.font_by_name("Composite-Regular").unwrap();
        assert_eq!(font.num_glyphs(), 4);
        assert!(collection.font_by_name("Nope").is_none());
    }

    #[test]
    fn for_each_stops_on_error() {
        let collection = FontCollection::new(&TTC).unwrap();
        let mut seen = Vec::new();
        collection
            .for_each_font(|index, font| {
                seen.push((index, font.num_glyphs()));
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, [(0, 3), (1, 4)]);
        let err = collection.for_each_font(|_, _| Err(FontError::UnsupportedFeature("stop".into())));
        assert!(err.is_err());
    }

    #[test]
    fn single_fonts_are_not_collections() {
        assert!(matches!(
            FontCollection::new(&SIMPLE_FONT),
            Err(FontError::MalformedFont { .. })
        ));
        assert!(load_font(&SIMPLE_FONT, 0, FontOptions::default()).is_ok());
        assert!(load_font(&SIMPLE_FONT, 1, FontOptions::default()).is_err());
        let font = load_font(&TTC, 1, FontOptions::default()).unwrap();
        assert_eq!(font.ttc_index(), Some(1));
    }
}
