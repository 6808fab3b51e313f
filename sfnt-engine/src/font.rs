//! A queryable TrueType font.
//!
//! [`Font`] wraps the bytes of one sfnt and answers outline, metric and
//! character mapping queries. Tables are parsed on first use and kept in a
//! per-font cache, so concurrent readers never parse the same table twice.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use kurbo::BezPath;
use sfnt_read::{
    tables::{
        cmap::{self, Cmap},
        glyf::{self, Glyf},
        gsub,
        head::{self, Head},
        hhea::{self, Hhea},
        hmtx::{self, Hmtx},
        kern::{self, Kern},
        loca::{self, Loca},
        maxp::{self, Maxp},
        name::{self, Name},
        os2::{self, Os2},
        post::{self, Post},
        vhea,
        vmtx::{self, Vmtx},
        vorg::{self, Vorg},
    },
    FontData, FontRef, TableProvider, TableRecord,
};
use sfnt_types::{BoundingBox, GlyphId, Pen, Tag, CFF_SFNT_VERSION};

use crate::{
    charmap::{self, Charmap, CmapLookup, CmapTableLookup, SubstitutingCmapLookup},
    error::{FontError, ReadResultExt},
    glyph::{GlyphData, GlyphLoader},
    gsub::{GlyphSubstitution, VERT, VRT2},
    outline,
    table::Table,
};

/// The advance reported for glyphs of fonts without metrics.
pub const DEFAULT_ADVANCE: u16 = 250;

const CFF: Tag = Tag::new(b"CFF ");

/// When tables are parsed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Parse each table when it is first needed.
    #[default]
    OnDemand,
    /// Parse every table when the font is created.
    ///
    /// Failures of optional tables are logged and those tables treated as
    /// absent.
    Eager,
}

/// Options for [`Font::with_options`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FontOptions {
    /// The font is embedded in a document, and may omit `cmap`, `name` and
    /// `post`.
    pub embedded: bool,
    pub parse_mode: ParseMode,
}

/// The table records of a font, minus the ones we can't use.
#[derive(Clone)]
struct Tables<'a> {
    data: FontData<'a>,
    sfnt_version: u32,
    records: Vec<TableRecord>,
}

impl<'a> Tables<'a> {
    fn new(font: &FontRef<'a>) -> Self {
        let data = font.data();
        let records = font
            .table_directory()
            .table_records()
            .iter()
            .filter(|record| {
                if record.length == 0 && record.tag != glyf::TAG {
                    log::warn!("dropping empty '{}' table", record.tag);
                    return false;
                }
                if !record.is_in_bounds(data.len()) {
                    log::warn!(
                        "dropping '{}' table at {} with length {}: the font is only {} bytes",
                        record.tag,
                        record.offset,
                        record.length,
                        data.len()
                    );
                    return false;
                }
                true
            })
            .collect();
        if !font.table_directory().has_valid_search_params() {
            log::debug!("table directory has incorrect binary search parameters");
        }
        Tables {
            data,
            sfnt_version: font.table_directory().sfnt_version(),
            records,
        }
    }

    fn record(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.iter().find(|record| record.tag == tag)
    }

    fn contains(&self, tag: Tag) -> bool {
        self.record(tag).is_some()
    }
}

impl<'a> TableProvider<'a> for Tables<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        let record = self.record(tag)?;
        let start = record.offset as usize;
        self.data.slice(start..start + record.length as usize)
    }
}

/// Generates a cached accessor for a mandatory table.
macro_rules! table_accessor {
    ($(#[$meta:meta])* $name:ident: $variant:ident<$ty:ident> = $tag:expr) => {
        $(#[$meta])*
        pub fn $name(&self) -> Result<$ty<'a>, FontError> {
            match self.table($tag)? {
                Table::$variant(table) => Ok(table),
                other => Err(FontError::MalformedFont {
                    tag: $tag,
                    reason: format!("parsed as '{}'", other.tag()),
                }),
            }
        }
    };
}

/// A TrueType font.
pub struct Font<'a> {
    tables: Tables<'a>,
    ttc_index: Option<u32>,
    options: FontOptions,
    num_glyphs: u16,
    units_per_em: u16,
    enabled_features: Vec<Tag>,
    parsed: Mutex<HashMap<Tag, Result<Table<'a>, FontError>>>,
    post_names: OnceLock<HashMap<&'a str, GlyphId>>,
    charmaps: OnceLock<Vec<Arc<Charmap>>>,
    substitution: OnceLock<Option<GlyphSubstitution<'a>>>,
    glyphs: Mutex<HashMap<GlyphId, Option<Arc<GlyphData>>>>,
    paths: Mutex<HashMap<GlyphId, Arc<BezPath>>>,
}

impl<'a> Font<'a> {
    /// Creates a font from the bytes of a single sfnt.
    pub fn new(data: &'a [u8]) -> Result<Self, FontError> {
        Self::with_options(data, FontOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: FontOptions) -> Result<Self, FontError> {
        let font = FontRef::new(data).map_err(FontError::directory)?;
        Self::from_font_ref(&font, options)
    }

    /// Creates a font from a parsed table directory, which may belong to a
    /// collection.
    pub fn from_font_ref(font: &FontRef<'a>, options: FontOptions) -> Result<Self, FontError> {
        let tables = Tables::new(font);
        let head = tables.head().in_table(head::TAG)?;
        let maxp = tables.maxp().in_table(maxp::TAG)?;
        let font = Font {
            ttc_index: font.ttc_index(),
            options,
            num_glyphs: maxp.num_glyphs(),
            units_per_em: head.units_per_em(),
            enabled_features: Vec::new(),
            parsed: Default::default(),
            post_names: OnceLock::new(),
            charmaps: OnceLock::new(),
            substitution: OnceLock::new(),
            glyphs: Default::default(),
            paths: Default::default(),
            tables,
        };
        if options.parse_mode == ParseMode::Eager {
            for tag in font.table_tags() {
                if let Err(e) = font.table(tag) {
                    if !font.mandatory_tables().contains(&tag) {
                        log::warn!("ignoring unreadable '{tag}' table: {e}");
                    }
                }
            }
        }
        font.validate()?;
        Ok(font)
    }

    /// The tables every font of this flavor must have.
    fn mandatory_tables(&self) -> Vec<Tag> {
        let mut tags = vec![head::TAG, hhea::TAG, maxp::TAG, hmtx::TAG];
        if !self.options.embedded {
            tags.extend([post::TAG, name::TAG, cmap::TAG]);
        }
        if !self.is_cff() {
            tags.extend([loca::TAG, glyf::TAG]);
        }
        tags
    }

    fn validate(&self) -> Result<(), FontError> {
        for tag in self.mandatory_tables() {
            match self.options.parse_mode {
                ParseMode::Eager => self.table(tag).map(|_| ())?,
                ParseMode::OnDemand if !self.tables.contains(tag) => {
                    return Err(FontError::missing_table(tag))
                }
                ParseMode::OnDemand => (),
            }
        }
        Ok(())
    }

    /// Returns the parsed table for `tag`, parsing it on first request.
    pub fn table(&self, tag: Tag) -> Result<Table<'a>, FontError> {
        let mut parsed = self.parsed.lock().unwrap_or_else(PoisonError::into_inner);
        parsed
            .entry(tag)
            .or_insert_with(|| {
                log::debug!("parsing '{tag}'");
                Table::parse(&self.tables, tag).in_table(tag)
            })
            .clone()
    }

    /// Returns `None` for absent tables, and for broken ones after logging.
    fn optional<T>(&self, tag: Tag, f: impl FnOnce(&Self) -> Result<T, FontError>) -> Option<T> {
        if !self.tables.contains(tag) {
            return None;
        }
        f(self)
            .inspect_err(|e| log::warn!("ignoring unreadable '{tag}' table: {e}"))
            .ok()
    }

    table_accessor!(head: Head<Head> = head::TAG);
    table_accessor!(hhea: Hhea<Hhea> = hhea::TAG);
    table_accessor!(maxp: Maxp<Maxp> = maxp::TAG);
    table_accessor!(hmtx: Hmtx<Hmtx> = hmtx::TAG);
    table_accessor!(
        /// The `loca` table, in the format its length implies.
        loca: Loca<Loca> = loca::TAG
    );
    table_accessor!(glyf: Glyf<Glyf> = glyf::TAG);
    table_accessor!(cmap: Cmap<Cmap> = cmap::TAG);
    table_accessor!(name: Name<Name> = name::TAG);
    table_accessor!(os2: Os2<Os2> = os2::TAG);
    table_accessor!(post: Post<Post> = post::TAG);
    table_accessor!(vmtx: Vmtx<Vmtx> = vmtx::TAG);
    table_accessor!(kern: Kern<Kern> = kern::TAG);
    table_accessor!(vorg: Vorg<Vorg> = vorg::TAG);

    /// The original bytes of a table.
    pub fn table_bytes(&self, tag: Tag) -> Option<&'a [u8]> {
        self.tables.data_for_tag(tag).map(|data| data.as_bytes())
    }

    /// The tags of the usable tables, in directory order.
    pub fn table_tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tables.records.iter().map(|record| record.tag)
    }

    pub fn has_table(&self, tag: Tag) -> bool {
        self.tables.contains(tag)
    }

    /// The index of the font in its collection, if any.
    pub fn ttc_index(&self) -> Option<u32> {
        self.ttc_index
    }

    pub fn options(&self) -> FontOptions {
        self.options
    }

    /// `true` if outlines are stored as CFF rather than in `glyf`.
    pub fn is_cff(&self) -> bool {
        self.tables.sfnt_version == CFF_SFNT_VERSION || self.tables.contains(CFF)
    }

    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Returns the advance width of a glyph, in font units.
    ///
    /// Glyphs past the last long metric share its advance.
    pub fn advance_width(&self, gid: GlyphId) -> u16 {
        self.optional(hmtx::TAG, Self::hmtx)
            .and_then(|hmtx| hmtx.advance(gid))
            .unwrap_or(DEFAULT_ADVANCE)
    }

    /// Returns the advance height of a glyph, in font units.
    pub fn advance_height(&self, gid: GlyphId) -> u16 {
        if !self.tables.contains(vhea::TAG) {
            return DEFAULT_ADVANCE;
        }
        self.optional(vmtx::TAG, Self::vmtx)
            .and_then(|vmtx| vmtx.advance(gid))
            .unwrap_or(DEFAULT_ADVANCE)
    }

    /// Returns the `kern` adjustment between two glyphs, in font units.
    ///
    /// Only the first horizontal subtable is consulted.
    pub fn kerning(&self, left: GlyphId, right: GlyphId) -> i16 {
        self.optional(kern::TAG, Self::kern)
            .map(|kern| kern.pair_value(left, right))
            .unwrap_or_default()
    }

    /// The y coordinate of a glyph's vertical origin, for fonts with `VORG`.
    pub fn vertical_origin_y(&self, gid: GlyphId) -> Option<i16> {
        self.optional(vorg::TAG, Self::vorg)
            .map(|vorg| vorg.vertical_origin_y(gid))
    }

    pub fn postscript_name(&self) -> Option<String> {
        self.optional(name::TAG, Self::name)?.postscript_name()
    }

    /// The bounding box of all glyphs, scaled to a 1000 unit em.
    pub fn font_bbox(&self) -> Result<BoundingBox<f32>, FontError> {
        let head = self.head()?;
        let bbox = BoundingBox {
            x_min: head.x_min(),
            y_min: head.y_min(),
            x_max: head.x_max(),
            y_max: head.y_max(),
        };
        Ok(bbox.map(f32::from).scale(self.em_scale()))
    }

    /// The matrix mapping font units to text space.
    pub fn font_matrix(&self) -> [f32; 6] {
        let scale = 0.001 * self.em_scale();
        [scale, 0.0, 0.0, scale, 0.0, 0.0]
    }

    fn em_scale(&self) -> f32 {
        match self.units_per_em {
            0 => 1.0,
            upem => 1000.0 / upem as f32,
        }
    }

    /// Resolves a glyph name to a glyph.
    ///
    /// Names in `post` are tried first, then `uniXXXX` names through the
    /// Unicode `cmap`. Unknown names map to `.notdef`.
    pub fn name_to_gid(&self, name: &str) -> GlyphId {
        if let Some(gid) = self.post_names().get(name) {
            if !gid.is_notdef() && gid.to_u16() < self.num_glyphs {
                return *gid;
            }
        }
        let Some(codepoint) = parse_uni_name(name) else {
            return GlyphId::NOTDEF;
        };
        match self.unicode_cmap_lookup(false) {
            Ok(Some(lookup)) => lookup.glyph_id(codepoint),
            Ok(None) => GlyphId::NOTDEF,
            Err(e) => {
                log::warn!("no cmap to resolve '{name}': {e}");
                GlyphId::NOTDEF
            }
        }
    }

    fn post_names(&self) -> &HashMap<&'a str, GlyphId> {
        self.post_names.get_or_init(|| {
            // later glyphs win
            self.optional(post::TAG, Self::post)
                .map(|post| {
                    post.glyph_names()
                        .map(|(gid, name)| (name, gid))
                        .collect::<HashMap<_, _>>()
                })
                .unwrap_or_default()
        })
    }

    /// `true` if `name` resolves to a glyph other than `.notdef`.
    pub fn has_glyph(&self, name: &str) -> bool {
        !self.name_to_gid(name).is_notdef()
    }

    pub fn width(&self, name: &str) -> u16 {
        self.advance_width(self.name_to_gid(name))
    }

    pub fn path(&self, name: &str) -> Result<Arc<BezPath>, FontError> {
        self.glyph_path(self.name_to_gid(name))
    }

    /// Returns the resolved outline of a glyph.
    ///
    /// This is `None` for glyph ids past the end of the font.
    pub fn glyph(&self, gid: GlyphId) -> Result<Option<Arc<GlyphData>>, FontError> {
        if self.is_cff() {
            return Err(FontError::UnsupportedFeature(
                "CFF outlines are not supported".into(),
            ));
        }
        let mut glyphs = self.glyphs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(glyph) = glyphs.get(&gid) {
            return Ok(glyph.clone());
        }
        let glyph = if gid.to_u16() >= self.num_glyphs {
            None
        } else {
            let loca = self.loca()?;
            let glyf = self.glyf()?;
            let hmtx = self.optional(hmtx::TAG, Self::hmtx);
            let loader = GlyphLoader {
                loca: &loca,
                glyf: &glyf,
                hmtx: hmtx.as_ref(),
            };
            Some(Arc::new(loader.load(gid)?))
        };
        glyphs.insert(gid, glyph.clone());
        Ok(glyph)
    }

    /// Returns the outline of a glyph as a path, in font units.
    pub fn glyph_path(&self, gid: GlyphId) -> Result<Arc<BezPath>, FontError> {
        if let Some(path) = self
            .paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&gid)
        {
            return Ok(path.clone());
        }
        let path = Arc::new(
            self.glyph(gid)?
                .map(|glyph| outline::to_bez_path(&glyph))
                .unwrap_or_default(),
        );
        let path = self
            .paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(gid)
            .or_insert(path)
            .clone();
        Ok(path)
    }

    /// Emits the outline of a glyph to `pen`.
    pub fn draw(&self, gid: GlyphId, pen: &mut impl Pen) -> Result<(), FontError> {
        if let Some(glyph) = self.glyph(gid)? {
            outline::draw(&glyph, pen);
        }
        Ok(())
    }

    /// Every decodable `cmap` subtable, in font order.
    pub fn charmaps(&self) -> &[Arc<Charmap>] {
        self.charmaps.get_or_init(|| {
            self.optional(cmap::TAG, Self::cmap)
                .map(|cmap| charmap::decode_subtables(&cmap, self.num_glyphs))
                .unwrap_or_default()
        })
    }

    /// Selects the best Unicode subtable.
    ///
    /// If the font has none, `strict` selection fails and lenient selection
    /// returns the first subtable.
    pub fn unicode_cmap(&self, strict: bool) -> Result<Option<Arc<Charmap>>, FontError> {
        charmap::select_unicode(self.charmaps(), strict)
    }

    /// The Unicode lookup, substituting glyphs when features are enabled.
    pub fn unicode_cmap_lookup(
        &self,
        strict: bool,
    ) -> Result<Option<Box<dyn CmapLookup + '_>>, FontError> {
        let Some(base) = self.unicode_cmap(strict)? else {
            return Ok(None);
        };
        Ok(Some(match self.substitution() {
            Some(gsub) if !self.enabled_features.is_empty() => Box::new(
                SubstitutingCmapLookup::new(base, gsub, self.enabled_features.clone()),
            ),
            _ => Box::new(base),
        }))
    }

    /// A lookup across all subtables, in priority order.
    pub fn cmap_lookup(&self) -> CmapTableLookup<'_> {
        CmapTableLookup::new(self.charmaps(), self.substitution(), &self.enabled_features)
    }

    /// The `GSUB` single substitutions of the font, if it has any.
    pub fn substitution(&self) -> Option<&GlyphSubstitution<'a>> {
        self.substitution
            .get_or_init(|| {
                let table = self.optional(gsub::TAG, |font| match font.table(gsub::TAG)? {
                    Table::Gsub(gsub) => Ok(gsub),
                    other => Err(FontError::MalformedFont {
                        tag: gsub::TAG,
                        reason: format!("parsed as '{}'", other.tag()),
                    }),
                })?;
                GlyphSubstitution::new(table)
                    .inspect_err(|e| log::warn!("ignoring unusable GSUB: {e}"))
                    .ok()
            })
            .as_ref()
    }

    /// The features applied by substituting lookups, in order.
    pub fn enabled_features(&self) -> &[Tag] {
        &self.enabled_features
    }

    pub fn enable_gsub_feature(&mut self, feature: Tag) {
        if !self.enabled_features.contains(&feature) {
            self.enabled_features.push(feature);
        }
    }

    pub fn disable_gsub_feature(&mut self, feature: Tag) {
        self.enabled_features.retain(|tag| *tag != feature);
    }

    /// Enables vertical alternates, `vrt2` first.
    pub fn enable_vertical_substitutions(&mut self) {
        self.enable_gsub_feature(VRT2);
        self.enable_gsub_feature(VERT);
    }
}

impl std::fmt::Debug for Font<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("tables", &self.tables.records.len())
            .field("ttc_index", &self.ttc_index)
            .field("num_glyphs", &self.num_glyphs)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Parse a `uniXXXX` glyph name, rejecting surrogates.
fn parse_uni_name(name: &str) -> Option<u32> {
    let hex = name.strip_prefix("uni").filter(|hex| hex.len() == 4)?;
    let codepoint = u32::from_str_radix(hex, 16).ok()?;
    (!(0xD800..=0xDFFF).contains(&codepoint)).then_some(codepoint)
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sfnt_test_data::{
        be_buffer, cmap::multi_format_cmap, test_font::{TestFont, TestGlyph}, COMPOSITE_FONT,
        CYCLIC_FONT, SIMPLE_FONT, TTC, VERTICAL_FONT,
    };
    use sfnt_write::FontBuilder;

    use super::*;

    fn eager() -> FontOptions {
        FontOptions {
            parse_mode: ParseMode::Eager,
            ..Default::default()
        }
    }

    /// Copies `data` without the given tables.
    fn without(data: &[u8], drop: &[Tag]) -> Vec<u8> {
        let font = FontRef::new(data).unwrap();
        let mut builder = FontBuilder::new();
        for record in font.table_directory().table_records().iter() {
            if !drop.contains(&record.tag) {
                builder.add_raw(record.tag, font.table_data(record.tag).unwrap().as_bytes());
            }
        }
        builder.build()
    }

    /// Copies `data`, replacing or adding one table.
    fn with_table(data: &[u8], tag: Tag, table: &[u8]) -> Vec<u8> {
        let font = FontRef::new(data).unwrap();
        let mut builder = FontBuilder::new();
        for record in font.table_directory().table_records().iter() {
            builder.add_raw(record.tag, font.table_data(record.tag).unwrap().as_bytes());
        }
        builder.add_raw(tag, table);
        builder.build()
    }

    #[test]
    fn basic_queries() {
        let font = Font::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.num_glyphs(), 3);
        assert_eq!(font.units_per_em(), 1000);
        assert!(!font.is_cff());
        assert_eq!(font.postscript_name().as_deref(), Some("Test-Regular"));
        assert_eq!(font.font_matrix(), [0.001, 0.0, 0.0, 0.001, 0.0, 0.0]);
        assert_eq!(
            font.font_bbox().unwrap(),
            BoundingBox {
                x_min: 0.0,
                y_min: 0.0,
                x_max: 1000.0,
                y_max: 1000.0
            }
        );
    }

    #[test]
    fn bbox_is_normalized_to_1000_units() {
        let data = TestFont::new()
            .glyph(TestGlyph::empty(".notdef", 500))
            .units_per_em(2000)
            .build();
        let font = Font::new(&data).unwrap();
        assert_eq!(font.font_bbox().unwrap().x_max, 500.0);
        assert_eq!(font.font_matrix()[0], 0.0005);
    }

    #[rstest]
    #[case::notdef(0, 500)]
    #[case::long_metric(1, 600)]
    // only two long metrics: the last advance repeats
    #[case::trailing(2, 600)]
    fn advance_widths(#[case] gid: u16, #[case] expected: u16) {
        let font = Font::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.advance_width(GlyphId::new(gid)), expected);
    }

    #[test]
    fn advance_heights() {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        assert_eq!(font.advance_height(GlyphId::new(2)), 800);
        let font = Font::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.advance_height(GlyphId::new(1)), DEFAULT_ADVANCE);
    }

    #[rstest]
    #[case::post_name("A", 1)]
    #[case::second("B", 2)]
    // .notdef is never returned from post
    #[case::notdef(".notdef", 0)]
    #[case::unicode_name("uni0042", 2)]
    #[case::unmapped("uni0043", 0)]
    #[case::surrogate("uniD842", 0)]
    #[case::bad_hex("uniZZZZ", 0)]
    #[case::too_long("uni00410", 0)]
    #[case::unknown("missing", 0)]
    fn names(#[case] name: &str, #[case] expected: u16) {
        let font = Font::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.name_to_gid(name), GlyphId::new(expected));
        assert_eq!(font.has_glyph(name), expected != 0);
    }

    #[test]
    fn width_and_path_by_name() {
        let font = Font::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.width("A"), 600);
        assert_eq!(font.width("missing"), 500);
        let path = font.path("A").unwrap();
        assert_eq!(
            path.elements()
                .iter()
                .filter(|el| matches!(el, PathEl::LineTo(_)))
                .count(),
            4
        );
        assert!(font.path("missing").unwrap().elements().is_empty());
    }

    #[test]
    fn glyphs_are_memoized() {
        let font = Font::new(&COMPOSITE_FONT).unwrap();
        let first = font.glyph(GlyphId::new(3)).unwrap().unwrap();
        let second = font.glyph(GlyphId::new(3)).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_composite());
        assert_eq!(first.point_count(), 8);
        let path = font.glyph_path(GlyphId::new(3)).unwrap();
        assert!(Arc::ptr_eq(&path, &font.glyph_path(GlyphId::new(3)).unwrap()));
        // past the end
        assert!(font.glyph(GlyphId::new(4)).unwrap().is_none());
        assert!(font.glyph_path(GlyphId::new(4)).unwrap().elements().is_empty());
    }

    #[test]
    fn cycles_are_errors() {
        let font = Font::new(&CYCLIC_FONT).unwrap();
        assert_eq!(
            font.glyph(GlyphId::new(4)).err(),
            Some(FontError::CircularReference(GlyphId::new(4)))
        );
        assert!(font.glyph(GlyphId::new(1)).unwrap().is_some());
    }

    #[test]
    fn draw_to_pen() {
        let font = Font::new(&SIMPLE_FONT).unwrap();
        let mut pen = outline::BezPathPen::default();
        font.draw(GlyphId::new(2), &mut pen).unwrap();
        let quads = pen
            .into_inner()
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::QuadTo(..)))
            .count();
        assert_eq!(quads, 2);
    }

    #[rstest]
    #[case::head(head::TAG)]
    #[case::hhea(hhea::TAG)]
    #[case::maxp(maxp::TAG)]
    #[case::hmtx(hmtx::TAG)]
    #[case::loca(loca::TAG)]
    #[case::glyf(glyf::TAG)]
    #[case::cmap(cmap::TAG)]
    #[case::name(name::TAG)]
    #[case::post(post::TAG)]
    fn mandatory_tables(#[case] tag: Tag) {
        let data = without(&SIMPLE_FONT, &[tag]);
        for options in [FontOptions::default(), eager()] {
            let err = Font::with_options(&data, options).unwrap_err();
            assert!(
                matches!(err, FontError::MalformedFont { tag: t, .. } if t == tag),
                "{tag}: {err}"
            );
        }
    }

    #[test]
    fn embedded_fonts_may_omit_tables() {
        let data = without(&SIMPLE_FONT, &[cmap::TAG, name::TAG, post::TAG]);
        let options = FontOptions {
            embedded: true,
            parse_mode: ParseMode::Eager,
        };
        let font = Font::with_options(&data, options).unwrap();
        assert!(font.charmaps().is_empty());
        assert_eq!(font.postscript_name(), None);
        assert_eq!(font.name_to_gid("A"), GlyphId::NOTDEF);
        assert!(font.unicode_cmap(true).is_err());
        assert!(matches!(font.unicode_cmap(false), Ok(None)));
    }

    #[test]
    fn cff_fonts_skip_glyf() {
        let data = without(&SIMPLE_FONT, &[loca::TAG, glyf::TAG]);
        let mut data = data;
        data[..4].copy_from_slice(&CFF_SFNT_VERSION.to_be_bytes());
        let font = Font::new(&data).unwrap();
        assert!(font.is_cff());
        assert!(matches!(
            font.glyph(GlyphId::new(1)),
            Err(FontError::UnsupportedFeature(_))
        ));
        assert_eq!(font.advance_width(GlyphId::new(1)), 600);
    }

    #[test]
    fn broken_optional_tables_are_isolated() {
        let data = TestFont::new()
            .glyph(TestGlyph::empty(".notdef", 500))
            .table(gsub::TAG, vec![0, 1])
            .build();
        let font = Font::with_options(&data, eager()).unwrap();
        assert!(font.substitution().is_none());
        assert!(font.table(gsub::TAG).is_err());
    }

    #[test]
    fn kerning_and_vertical_origins() {
        let kern_table = be_buffer! {
            [0u16, 1],
            [0u16, 26, 1],
            [2u16, 12, 1, 0],
            [1u16, 1], (-20i16),
            [1u16, 2], (15i16)
        };
        let vorg_table = be_buffer! { [1u16, 0], (880i16), [1u16, 2], (867i16) };
        let data = TestFont::new()
            .glyph(TestGlyph::empty(".notdef", 500))
            .glyph(TestGlyph::empty("A", 600))
            .glyph(TestGlyph::empty("B", 600))
            .table(kern::TAG, kern_table.into_vec())
            .table(vorg::TAG, vorg_table.into_vec())
            .build();
        let font = Font::with_options(&data, eager()).unwrap();
        assert_eq!(font.kerning(GlyphId::new(1), GlyphId::new(1)), -20);
        assert_eq!(font.kerning(GlyphId::new(1), GlyphId::new(2)), 15);
        assert_eq!(font.kerning(GlyphId::new(2), GlyphId::new(1)), 0);
        assert_eq!(font.vertical_origin_y(GlyphId::new(1)), Some(880));
        assert_eq!(font.vertical_origin_y(GlyphId::new(2)), Some(867));
        let font = Font::new(&SIMPLE_FONT).unwrap();
        assert_eq!(font.kerning(GlyphId::new(1), GlyphId::new(2)), 0);
        assert_eq!(font.vertical_origin_y(GlyphId::new(1)), None);
    }

    #[test]
    fn broken_kern_and_vorg_are_isolated() {
        // the subtable header is cut short
        let kern_table = vec![0, 0, 0, 1, 0, 0];
        // claims five records and has none
        let vorg_table = vec![0, 1, 0, 0, 3, 0x70, 0, 5];
        let data = TestFont::new()
            .glyph(TestGlyph::empty(".notdef", 500))
            .glyph(TestGlyph::empty("A", 600))
            .table(kern::TAG, kern_table)
            .table(vorg::TAG, vorg_table)
            .build();
        for options in [FontOptions::default(), eager()] {
            let font = Font::with_options(&data, options).unwrap();
            assert_eq!(font.kerning(GlyphId::new(1), GlyphId::new(1)), 0);
            assert_eq!(font.vertical_origin_y(GlyphId::new(1)), None);
            assert!(matches!(
                font.table(kern::TAG),
                Err(FontError::UnexpectedEndOfData { tag, .. }) if tag == kern::TAG
            ));
            assert!(font.table(vorg::TAG).is_err());
            assert_eq!(font.advance_width(GlyphId::new(1)), 600);
            assert_eq!(font.name_to_gid("A"), GlyphId::new(1));
        }
    }

    #[test]
    fn empty_and_oversized_tables_are_dropped() {
        let data = with_table(&SIMPLE_FONT, Tag::new(b"kern"), &[]);
        let mut data = with_table(&data, Tag::new(b"zzzz"), &[1, 2, 3, 4]);
        // stretch the last table past the end of the data
        let num_tables = u16::from_be_bytes([data[4], data[5]]) as usize;
        let length_pos = 12 + 16 * (num_tables - 1) + 12;
        data[length_pos..length_pos + 4].copy_from_slice(&0xFFFFu32.to_be_bytes());
        let font = Font::new(&data).unwrap();
        assert!(!font.has_table(Tag::new(b"kern")));
        assert!(!font.has_table(Tag::new(b"zzzz")));
        assert!(font.has_table(glyf::TAG));
    }

    #[test]
    fn table_bytes_are_exact() {
        let font = Font::new(&SIMPLE_FONT).unwrap();
        let raw = FontRef::new(&SIMPLE_FONT).unwrap();
        for tag in font.table_tags() {
            assert_eq!(
                font.table_bytes(tag),
                raw.table_data(tag).map(|data| data.as_bytes())
            );
        }
        assert_eq!(font.table_bytes(Tag::new(b"kern")), None);
    }

    #[test]
    fn cmap_priority() {
        let data = TestFont::new()
            .glyph(TestGlyph::empty(".notdef", 500))
            .glyph(TestGlyph::empty("a", 500))
            .glyph(TestGlyph::empty("b", 500))
            .glyph(TestGlyph::empty("A", 500))
            .build();
        let data = with_table(&data, cmap::TAG, &multi_format_cmap());
        let font = Font::new(&data).unwrap();
        assert_eq!(font.charmaps().len(), 2);
        let lookup = font.cmap_lookup();
        assert!(!lookup.is_substituting());
        // (3, 1) comes before (1, 0)
        assert_eq!(lookup.glyph_id('a' as u32), GlyphId::new(1));
        assert_eq!(lookup.glyph_id('A' as u32), GlyphId::new(3));
        assert_eq!(lookup.char_codes(GlyphId::new(3)), Some(vec!['A' as u32]));
        let unicode = font.unicode_cmap(true).unwrap().unwrap();
        assert_eq!((unicode.platform_id(), unicode.encoding_id()), (3, 1));
    }

    #[test]
    fn vertical_substitution() {
        let mut font = Font::new(&VERTICAL_FONT).unwrap();
        assert!(!font.cmap_lookup().is_substituting());
        font.enable_vertical_substitutions();
        assert_eq!(font.enabled_features(), &[VRT2, VERT]);
        let lookup = font.cmap_lookup();
        assert!(lookup.is_substituting());
        assert_eq!(lookup.glyph_id('A' as u32), GlyphId::new(20));
        assert_eq!(lookup.glyph_id('B' as u32), GlyphId::new(2));
        assert_eq!(lookup.char_codes(GlyphId::new(20)), Some(vec!['A' as u32]));
        // name resolution goes through the same substitution
        assert_eq!(font.name_to_gid("uni0041"), GlyphId::new(20));
    }

    #[test]
    fn disabling_features_removes_the_decorator() {
        let mut font = Font::new(&VERTICAL_FONT).unwrap();
        font.enable_gsub_feature(VERT);
        font.enable_gsub_feature(VERT);
        assert_eq!(font.enabled_features(), &[VERT]);
        font.disable_gsub_feature(VERT);
        assert!(!font.cmap_lookup().is_substituting());
    }

    #[test]
    fn collection_members() {
        let raw = FontRef::from_index(&TTC, 1).unwrap();
        let font = Font::from_font_ref(&raw, FontOptions::default()).unwrap();
        assert_eq!(font.ttc_index(), Some(1));
        assert_eq!(font.postscript_name().as_deref(), Some("Composite-Regular"));
        assert_eq!(font.num_glyphs(), 4);
    }

    #[test]
    fn bad_directory() {
        let data = be_buffer! { 0x12345678u32, 0u16, 0u16, 0u16, 0u16 };
        let err = Font::new(&data).unwrap_err();
        assert!(matches!(err, FontError::MalformedFont { .. }), "{err}");
        assert!(matches!(
            Font::new(&[0, 1, 0]),
            Err(FontError::UnexpectedEndOfData { .. })
        ));
    }
}
