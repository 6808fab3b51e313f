//! Mapping of characters (codepoints, not graphemes) to nominal glyph identifiers.
//!
//! If you have never run into character to glyph mapping before
//! [Glyph IDs and the 'cmap' table](https://rsheeter.github.io/font101/#glyph-ids-and-the-cmap-table)
//! might be informative.
//!
//! Every supported subtable of a font's `cmap` is decoded into a [`Charmap`],
//! which answers both directions of the mapping. A [`CmapTableLookup`]
//! queries the charmaps of a font in a fixed priority order, optionally
//! through a [`SubstitutingCmapLookup`] that applies single glyph
//! substitutions from `GSUB`.

use std::{collections::BTreeMap, sync::Arc};

use sfnt_read::tables::cmap::{encoding, platform, Cmap, CmapSubtable, EncodingRecord};
use sfnt_types::{GlyphId, Tag};

use crate::{error::FontError, gsub::GlyphSubstitution, script};

/// The (platform, encoding) pairs queried first, in order.
///
/// Any other subtable is queried after these, in the order it appears in
/// the font.
pub const LOOKUP_PRIORITY: [(u16, u16); 6] = [
    (platform::UNICODE, encoding::UNICODE_FULL),
    (platform::WINDOWS, encoding::WINDOWS_UNICODE_UCS4),
    (platform::UNICODE, encoding::UNICODE_BMP),
    (platform::WINDOWS, encoding::WINDOWS_UNICODE_BMP),
    (platform::MACINTOSH, encoding::MAC_ROMAN),
    (platform::WINDOWS, encoding::WINDOWS_SYMBOL),
];

/// The (platform, encoding) pairs that address glyphs by Unicode code
/// point, best first.
pub const UNICODE_PRIORITY: [(u16, u16); 5] = [
    (platform::UNICODE, encoding::UNICODE_FULL),
    (platform::WINDOWS, encoding::WINDOWS_UNICODE_UCS4),
    (platform::UNICODE, encoding::UNICODE_BMP),
    (platform::WINDOWS, encoding::WINDOWS_UNICODE_BMP),
    (platform::WINDOWS, encoding::WINDOWS_SYMBOL),
];

/// Character to glyph mapping, in both directions.
pub trait CmapLookup {
    /// Returns the glyph for a character code, or `.notdef` if unmapped.
    fn glyph_id(&self, codepoint: u32) -> GlyphId;

    /// Returns every character code that maps to `gid`, in ascending
    /// order, or `None` if there are none.
    fn char_codes(&self, gid: GlyphId) -> Option<Vec<u32>>;
}

impl<T: CmapLookup + ?Sized> CmapLookup for Arc<T> {
    fn glyph_id(&self, codepoint: u32) -> GlyphId {
        self.as_ref().glyph_id(codepoint)
    }

    fn char_codes(&self, gid: GlyphId) -> Option<Vec<u32>> {
        self.as_ref().char_codes(gid)
    }
}

/// One decoded `cmap` subtable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Charmap {
    platform_id: u16,
    encoding_id: u16,
    format: u16,
    glyphs: BTreeMap<u32, GlyphId>,
    codes: BTreeMap<GlyphId, Vec<u32>>,
}

impl Charmap {
    /// Decodes a subtable.
    ///
    /// Mappings to `.notdef`, or to glyphs beyond `num_glyphs`, are dropped.
    pub fn new(record: &EncodingRecord, subtable: &CmapSubtable, num_glyphs: u16) -> Self {
        let mut charmap = Charmap {
            platform_id: record.platform_id,
            encoding_id: record.encoding_id,
            format: subtable.format(),
            ..Default::default()
        };
        for (codepoint, gid) in subtable.mappings(num_glyphs) {
            charmap.glyphs.insert(codepoint, gid);
            charmap.codes.entry(gid).or_default().push(codepoint);
        }
        charmap
    }

    pub fn platform_id(&self) -> u16 {
        self.platform_id
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id
    }

    pub fn format(&self) -> u16 {
        self.format
    }

    /// Maps a character code to a glyph, `None` when unmapped.
    pub fn map(&self, codepoint: u32) -> Option<GlyphId> {
        self.glyphs.get(&codepoint).copied()
    }

    /// The character codes mapped to `gid`, in ascending order.
    pub fn codes_for(&self, gid: GlyphId) -> &[u32] {
        self.codes.get(&gid).map(Vec::as_slice).unwrap_or_default()
    }

    /// All mappings, in character code order.
    pub fn mappings(&self) -> impl Iterator<Item = (u32, GlyphId)> + '_ {
        self.glyphs.iter().map(|(code, gid)| (*code, *gid))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    fn is(&self, (platform_id, encoding_id): (u16, u16)) -> bool {
        self.platform_id == platform_id && self.encoding_id == encoding_id
    }
}

impl CmapLookup for Charmap {
    fn glyph_id(&self, codepoint: u32) -> GlyphId {
        self.map(codepoint).unwrap_or_default()
    }

    fn char_codes(&self, gid: GlyphId) -> Option<Vec<u32>> {
        let codes = self.codes_for(gid);
        (!codes.is_empty()).then(|| codes.to_vec())
    }
}

/// Decodes every subtable of `cmap`, in the order of its encoding records.
///
/// Subtables that fail to parse, and format 14 variation sequences, are
/// skipped with a warning.
pub fn decode_subtables(cmap: &Cmap, num_glyphs: u16) -> Vec<Arc<Charmap>> {
    cmap.encoding_records()
        .iter()
        .filter_map(|record| match cmap.subtable(&record) {
            Ok(CmapSubtable::Format14(_)) => {
                log::warn!(
                    "skipping format 14 cmap subtable ({}, {})",
                    record.platform_id,
                    record.encoding_id
                );
                None
            }
            Ok(subtable) => Some(Arc::new(Charmap::new(&record, &subtable, num_glyphs))),
            Err(e) => {
                log::warn!(
                    "skipping cmap subtable ({}, {}): {e}",
                    record.platform_id,
                    record.encoding_id
                );
                None
            }
        })
        .collect()
}

/// Selects the best Unicode subtable.
///
/// Without a Unicode subtable, `strict` selection fails while lenient
/// selection settles for the first subtable, if any.
pub fn select_unicode(
    charmaps: &[Arc<Charmap>],
    strict: bool,
) -> Result<Option<Arc<Charmap>>, FontError> {
    let best = UNICODE_PRIORITY
        .iter()
        .find_map(|ids| charmaps.iter().find(|charmap| charmap.is(*ids)));
    match best {
        Some(charmap) => Ok(Some(charmap.clone())),
        None if strict => Err(FontError::MalformedFont {
            tag: Tag::new(b"cmap"),
            reason: "the font does not have a Unicode subtable".into(),
        }),
        None => Ok(charmaps.first().cloned()),
    }
}

/// Orders charmaps by [`LOOKUP_PRIORITY`], then the rest in font order.
pub fn prioritize(charmaps: &[Arc<Charmap>]) -> Vec<Arc<Charmap>> {
    let mut ordered: Vec<Arc<Charmap>> = LOOKUP_PRIORITY
        .iter()
        .filter_map(|ids| charmaps.iter().find(|charmap| charmap.is(*ids)).cloned())
        .collect();
    for charmap in charmaps {
        if !ordered.iter().any(|seen| Arc::ptr_eq(seen, charmap)) {
            ordered.push(charmap.clone());
        }
    }
    ordered
}

/// Looks up characters across all subtables of a font.
///
/// The first subtable with a mapping wins. When substitution features are
/// enabled, the substituting lookup over the highest priority subtable is
/// queried before anything else.
pub struct CmapTableLookup<'a> {
    substituting: Option<SubstitutingCmapLookup<'a>>,
    subtables: Vec<Arc<Charmap>>,
}

impl<'a> CmapTableLookup<'a> {
    /// Creates a lookup over `charmaps`, which may be in any order.
    ///
    /// The substitution decorator is installed only if `features` is not
    /// empty and `gsub` is present.
    pub fn new(
        charmaps: &[Arc<Charmap>],
        gsub: Option<&'a GlyphSubstitution<'a>>,
        features: &[Tag],
    ) -> Self {
        let subtables = prioritize(charmaps);
        let substituting = match (gsub, subtables.first()) {
            (Some(gsub), Some(first)) if !features.is_empty() => Some(SubstitutingCmapLookup {
                base: first.clone(),
                gsub,
                features: features.to_vec(),
            }),
            _ => None,
        };
        CmapTableLookup {
            substituting,
            subtables,
        }
    }

    /// `true` if glyph substitution is applied.
    pub fn is_substituting(&self) -> bool {
        self.substituting.is_some()
    }

    /// The subtables in the order they are queried.
    pub fn subtables(&self) -> &[Arc<Charmap>] {
        &self.subtables
    }

    fn lookups(&self) -> impl Iterator<Item = &dyn CmapLookup> + '_ {
        self.substituting
            .iter()
            .map(|lookup| lookup as &dyn CmapLookup)
            .chain(self.subtables.iter().map(|charmap| charmap.as_ref() as &dyn CmapLookup))
    }
}

impl CmapLookup for CmapTableLookup<'_> {
    fn glyph_id(&self, codepoint: u32) -> GlyphId {
        self.lookups()
            .map(|lookup| lookup.glyph_id(codepoint))
            .find(|gid| !gid.is_notdef())
            .unwrap_or_default()
    }

    fn char_codes(&self, gid: GlyphId) -> Option<Vec<u32>> {
        self.lookups().find_map(|lookup| lookup.char_codes(gid))
    }
}

/// A lookup that applies `GSUB` single substitutions to the glyphs of
/// another.
///
/// The script used for substitution is derived from each code point.
pub struct SubstitutingCmapLookup<'a> {
    base: Arc<Charmap>,
    gsub: &'a GlyphSubstitution<'a>,
    features: Vec<Tag>,
}

impl<'a> SubstitutingCmapLookup<'a> {
    pub fn new(base: Arc<Charmap>, gsub: &'a GlyphSubstitution<'a>, features: Vec<Tag>) -> Self {
        SubstitutingCmapLookup {
            base,
            gsub,
            features,
        }
    }
}

impl CmapLookup for SubstitutingCmapLookup<'_> {
    fn glyph_id(&self, codepoint: u32) -> GlyphId {
        let gid = self.base.glyph_id(codepoint);
        let scripts = script::script_tags(codepoint);
        self.gsub.substitute(gid, scripts, &self.features)
    }

    fn char_codes(&self, gid: GlyphId) -> Option<Vec<u32>> {
        self.base.char_codes(self.gsub.unsubstitute(gid))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sfnt_read::{tables::cmap::Cmap as ReadCmap, FontData, FontRead, FontRef, TableProvider};
    use sfnt_test_data::{cmap as test_data, SIMPLE_FONT};

    use super::*;

    fn multi_format() -> Vec<Arc<Charmap>> {
        let data = test_data::multi_format_cmap();
        let cmap = ReadCmap::read(FontData::new(&data)).unwrap();
        decode_subtables(&cmap, 10)
    }

    #[test]
    fn decodes_both_directions() {
        let font = FontRef::new(&SIMPLE_FONT).unwrap();
        let charmaps = decode_subtables(&font.cmap().unwrap(), 3);
        assert_eq!(charmaps.len(), 1);
        let charmap = &charmaps[0];
        assert_eq!(
            (charmap.platform_id(), charmap.encoding_id(), charmap.format()),
            (3, 1, 4)
        );
        assert_eq!(charmap.map(0x41), Some(GlyphId::new(1)));
        assert_eq!(charmap.codes_for(GlyphId::new(2)), &[0x42]);
        assert_eq!(charmap.char_codes(GlyphId::new(0)), None);
        assert_eq!(charmap.glyph_id(0x43), GlyphId::NOTDEF);
    }

    #[test]
    fn out_of_range_glyphs_are_dropped() {
        let charmaps = multi_format();
        // the format 0 subtable maps 'A' to glyph 3
        let mac = charmaps.iter().find(|c| c.format() == 0).unwrap();
        assert_eq!(mac.map(0x41), Some(GlyphId::new(3)));
        let data = test_data::multi_format_cmap();
        let cmap = ReadCmap::read(FontData::new(&data)).unwrap();
        let few_glyphs = decode_subtables(&cmap, 3);
        let mac = few_glyphs.iter().find(|c| c.format() == 0).unwrap();
        assert!(mac.is_empty());
    }

    #[test]
    fn priority_order() {
        let charmaps = multi_format();
        let ordered = prioritize(&charmaps);
        let ids = ordered
            .iter()
            .map(|c| (c.platform_id(), c.encoding_id()))
            .collect::<Vec<_>>();
        assert_eq!(ids, [(3, 1), (1, 0)]);
    }

    #[test]
    fn table_lookup_falls_through() {
        let charmaps = multi_format();
        let lookup = CmapTableLookup::new(&charmaps, None, &[]);
        assert!(!lookup.is_substituting());
        // 'a' is only in (3, 1), 'A' only in (1, 0)
        assert_eq!(lookup.glyph_id(0x61), GlyphId::new(1));
        assert_eq!(lookup.glyph_id(0x41), GlyphId::new(3));
        assert_eq!(lookup.glyph_id(0x42), GlyphId::NOTDEF);
        assert_eq!(lookup.char_codes(GlyphId::new(3)), Some(vec![0x41]));
        assert_eq!(lookup.char_codes(GlyphId::new(9)), None);
    }

    #[rstest]
    #[case::strict(true, Some((3, 1)))]
    #[case::lenient(false, Some((3, 1)))]
    fn unicode_selection(#[case] strict: bool, #[case] expected: Option<(u16, u16)>) {
        let charmaps = multi_format();
        let selected = select_unicode(&charmaps, strict).unwrap();
        assert_eq!(
            selected.map(|c| (c.platform_id(), c.encoding_id())),
            expected
        );
    }

    #[test]
    fn unicode_selection_without_unicode_subtable() {
        let mac = multi_format()
            .into_iter()
            .filter(|c| c.platform_id() == 1)
            .collect::<Vec<_>>();
        assert!(matches!(
            select_unicode(&mac, true),
            Err(FontError::MalformedFont { .. })
        ));
        let fallback = select_unicode(&mac, false).unwrap().unwrap();
        assert_eq!(fallback.platform_id(), 1);
        assert_eq!(select_unicode(&[], false), Ok(None));
    }
}
