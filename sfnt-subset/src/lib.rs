//! Subsetting TrueType fonts.
//!
//! A [`Subsetter`] collects the characters and glyphs a document uses,
//! closes the selection over composite glyph references and writes a new,
//! self contained font holding only those glyphs. Glyph ids are renumbered
//! densely, preserving their relative order; `.notdef` stays at 0.
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use sfnt_engine::Font;
//! use sfnt_subset::Subsetter;
//!
//! let data = std::fs::read(path_to_my_font_file).unwrap();
//! let font = Font::new(&data).unwrap();
//! let mut subsetter = Subsetter::new(&font).unwrap();
//! subsetter.add_all("Hello".chars().map(u32::from));
//! subsetter.set_prefix("ABCDEF+");
//! let bytes = subsetter.write().unwrap();
//! ```

#![forbid(unsafe_code)]

mod cmap;
mod glyf_loca;
mod head;
mod hmtx;
mod maxp;
mod name;
mod os2;
mod parsing_util;
mod post;

use std::collections::{BTreeMap, BTreeSet, HashMap};

pub use parsing_util::{parse_tag_list, parse_unicodes, populate_gids};

use sfnt_engine::{CmapLookup, Font, FontError};
use sfnt_read::{
    tables::{cmap as cmap_table, glyf, head as head_table, hhea, hmtx as hmtx_table, loca},
    tables::{maxp as maxp_table, name as name_table, os2 as os2_table, post as post_table},
};
use sfnt_types::{GlyphId, Tag};
use sfnt_write::FontBuilder;
use thiserror::Error;

/// Tables the subsetter writes itself instead of copying.
const REBUILT_TABLES: [Tag; 10] = [
    head_table::TAG,
    hhea::TAG,
    maxp_table::TAG,
    hmtx_table::TAG,
    loca::TAG,
    glyf::TAG,
    cmap_table::TAG,
    post_table::TAG,
    os2_table::TAG,
    name_table::TAG,
];

#[derive(Debug, Error)]
pub enum SubsetError {
    #[error("Invalid input gid {0}")]
    InvalidGid(String),

    #[error("Invalid gid range {start}-{end}")]
    InvalidGidRange { start: u32, end: u32 },

    #[error("Invalid input unicode {0}")]
    InvalidUnicode(String),

    #[error("Invalid unicode range {start}-{end}")]
    InvalidUnicodeRange { start: u32, end: u32 },

    #[error("Invalid tag {0}")]
    InvalidTag(String),

    #[error("Non-BMP character U+{0:04X} cannot be stored in a format 4 cmap")]
    NotSupportedSubsetRange(u32),

    #[error("Subsetting table '{0}' failed")]
    SubsetTableError(Tag),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Error writing font data: {0}")]
    Io(#[from] std::io::Error),
}

impl SubsetError {
    /// Wraps a low level read error from the glyph data of `gid`.
    pub(crate) fn glyph(gid: GlyphId) -> impl Fn(sfnt_read::ReadError) -> Self {
        move |e| FontError::from_read(glyf::TAG, Some(gid), e).into()
    }
}

/// Rebuild one table for the subset font.
pub trait Subset {
    /// Subset this table; if successful, the subset version of this table
    /// (and of any table written along with it) is added to `builder`.
    fn subset<'a>(
        &self,
        plan: &Plan,
        font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError>;
}

/// The glyphs and mappings of a subset, after closure.
#[derive(Clone, Debug, Default)]
pub struct Plan {
    /// (new gid, old gid), in ascending order of both.
    new_to_old_gid_list: Vec<(GlyphId, GlyphId)>,
    glyph_map: HashMap<GlyphId, GlyphId>,
    /// Selected code points and the old gid each one maps to.
    unicode_to_old_gid: BTreeMap<u32, GlyphId>,
    prefix: Option<String>,
    keep_tables: Option<BTreeSet<Tag>>,
}

impl Plan {
    /// Close `glyph_ids` over composite references and assign new gids.
    ///
    /// `.notdef` is always retained. Gids the font does not have are
    /// dropped.
    pub fn new(
        font: &Font,
        glyph_ids: &BTreeSet<GlyphId>,
        unicode_to_gid: &BTreeMap<u32, GlyphId>,
        prefix: Option<String>,
        keep_tables: Option<BTreeSet<Tag>>,
    ) -> Result<Self, SubsetError> {
        let num_glyphs = font.num_glyphs();
        let mut glyphs = BTreeSet::from([GlyphId::NOTDEF]);
        for gid in glyph_ids.iter().chain(unicode_to_gid.values()) {
            if gid.to_u16() < num_glyphs {
                glyphs.insert(*gid);
            } else {
                log::warn!("ignoring {gid}, the font has {num_glyphs} glyphs");
            }
        }
        glyf_loca::glyf_closure_glyphs(font, &mut glyphs)?;

        let new_to_old_gid_list: Vec<_> = glyphs
            .iter()
            .enumerate()
            .map(|(new_gid, old_gid)| (GlyphId::new(new_gid as u16), *old_gid))
            .collect();
        let glyph_map = new_to_old_gid_list
            .iter()
            .map(|(new_gid, old_gid)| (*old_gid, *new_gid))
            .collect();
        Ok(Plan {
            new_to_old_gid_list,
            glyph_map,
            unicode_to_old_gid: unicode_to_gid.clone(),
            prefix,
            keep_tables,
        })
    }

    pub fn num_output_glyphs(&self) -> usize {
        self.new_to_old_gid_list.len()
    }

    /// The retained glyphs, as (new gid, old gid) pairs.
    pub fn new_to_old_gid_list(&self) -> &[(GlyphId, GlyphId)] {
        &self.new_to_old_gid_list
    }

    /// The old gids retained in the subset, ascending.
    pub fn old_gids(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.new_to_old_gid_list.iter().map(|(_, old_gid)| *old_gid)
    }

    /// The gid `old_gid` is renumbered to, if it is retained.
    pub fn new_gid(&self, old_gid: GlyphId) -> Option<GlyphId> {
        self.glyph_map.get(&old_gid).copied()
    }

    /// The selected code points mapped to their new gids, ascending.
    pub fn unicode_to_new_gid(&self) -> impl Iterator<Item = (u32, GlyphId)> + '_ {
        self.unicode_to_old_gid
            .iter()
            .filter_map(|(cp, old_gid)| Some((*cp, self.new_gid(*old_gid)?)))
    }

    pub fn has_unicodes(&self) -> bool {
        !self.unicode_to_old_gid.is_empty()
    }

    /// `true` if an optional table may be written to the subset.
    fn keeps(&self, tag: Tag) -> bool {
        self.keep_tables
            .as_ref()
            .is_none_or(|tables| tables.contains(&tag))
    }
}

/// Builds a subset of a TrueType font.
///
/// Code points are resolved through the font's best Unicode `cmap`
/// subtable, substituting glyphs if the font has `GSUB` features enabled.
pub struct Subsetter<'f, 'a> {
    font: &'f Font<'a>,
    unicode_cmap: Option<Box<dyn CmapLookup + 'f>>,
    keep_tables: Option<BTreeSet<Tag>>,
    prefix: Option<String>,
    unicode_to_gid: BTreeMap<u32, GlyphId>,
    glyph_ids: BTreeSet<GlyphId>,
}

impl<'f, 'a> Subsetter<'f, 'a> {
    /// Creates a subsetter that copies every table it does not rebuild.
    pub fn new(font: &'f Font<'a>) -> Result<Self, SubsetError> {
        if font.is_cff() {
            return Err(FontError::UnsupportedFeature("subsetting CFF outlines".into()).into());
        }
        Ok(Subsetter {
            font,
            unicode_cmap: font.unicode_cmap_lookup(false)?,
            keep_tables: None,
            prefix: None,
            unicode_to_gid: BTreeMap::new(),
            glyph_ids: BTreeSet::new(),
        })
    }

    /// Creates a subsetter that writes only the required tables plus the
    /// listed ones, where present.
    pub fn with_keep_tables(
        font: &'f Font<'a>,
        tables: impl IntoIterator<Item = Tag>,
    ) -> Result<Self, SubsetError> {
        let mut subsetter = Self::new(font)?;
        subsetter.keep_tables = Some(tables.into_iter().collect());
        Ok(subsetter)
    }

    /// Sets the prefix to add to the font's PostScript name.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = Some(prefix.into());
    }

    /// Adds a character to the subset.
    ///
    /// Characters the font does not map are ignored.
    pub fn add(&mut self, unicode: u32) {
        let Some(cmap) = &self.unicode_cmap else {
            log::warn!("no unicode cmap; ignoring U+{unicode:04X}");
            return;
        };
        let gid = cmap.glyph_id(unicode);
        if !gid.is_notdef() {
            self.unicode_to_gid.insert(unicode, gid);
            self.glyph_ids.insert(gid);
        }
    }

    pub fn add_all(&mut self, unicodes: impl IntoIterator<Item = u32>) {
        unicodes.into_iter().for_each(|unicode| self.add(unicode));
    }

    /// Adds glyphs by id, whether or not a character maps to them.
    pub fn add_glyph_ids(&mut self, gids: impl IntoIterator<Item = GlyphId>) {
        self.glyph_ids.extend(gids);
    }

    pub fn plan(&self) -> Result<Plan, SubsetError> {
        Plan::new(
            self.font,
            &self.glyph_ids,
            &self.unicode_to_gid,
            self.prefix.clone(),
            self.keep_tables.clone(),
        )
    }

    /// The map from new gids to old gids, including composite closure.
    pub fn gid_map(&self) -> Result<BTreeMap<GlyphId, GlyphId>, SubsetError> {
        Ok(self
            .plan()?
            .new_to_old_gid_list()
            .iter()
            .copied()
            .collect())
    }

    /// Serializes the subset font.
    pub fn write(&self) -> Result<Vec<u8>, SubsetError> {
        if self.glyph_ids.is_empty() && self.unicode_to_gid.is_empty() {
            log::info!("font subset is empty");
        }
        subset_font(self.font, &self.plan()?)
    }

    /// Serializes the subset font into `out`.
    ///
    /// Nothing is written if subsetting fails.
    pub fn write_to(&self, mut out: impl std::io::Write) -> Result<(), SubsetError> {
        let bytes = self.write()?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }
}

/// Writes the subset of `font` described by `plan`.
pub fn subset_font(font: &Font, plan: &Plan) -> Result<Vec<u8>, SubsetError> {
    let mut builder = FontBuilder::new();
    log::info!("Subsetting to {} glyphs", plan.num_output_glyphs());

    font.head()?.subset(plan, font, &mut builder)?;
    font.hmtx()?.subset(plan, font, &mut builder)?;
    font.maxp()?.subset(plan, font, &mut builder)?;
    font.glyf()?.subset(plan, font, &mut builder)?;

    if font.has_table(name_table::TAG) && plan.keeps(name_table::TAG) {
        font.name()?.subset(plan, font, &mut builder)?;
    }
    if font.has_table(os2_table::TAG) && plan.keeps(os2_table::TAG) {
        font.os2()?.subset(plan, font, &mut builder)?;
    }
    if font.has_table(cmap_table::TAG) && plan.keeps(cmap_table::TAG) {
        font.cmap()?.subset(plan, font, &mut builder)?;
    }
    if font.has_table(post_table::TAG) && plan.keeps(post_table::TAG) {
        font.post()?.subset(plan, font, &mut builder)?;
    }

    for tag in font.table_tags() {
        if REBUILT_TABLES.contains(&tag) || !plan.keeps(tag) {
            continue;
        }
        if let Some(data) = font.table_bytes(tag) {
            log::debug!("Copying table {tag}");
            builder.add_raw(tag, data);
        }
    }
    Ok(builder.build())
}
