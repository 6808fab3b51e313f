//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use std::cmp::Ordering;

use types::{GlyphId, Scalar, Tag};

use crate::{array::ScalarArray, FontData, FontRead, ReadError, TopLevelTable};

/// 'cmap'
pub const TAG: Tag = Tag::new(b"cmap");

/// The largest Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

const SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDFFF;

/// Format 8 fonts may not declare more groups than there are 16-bit codes.
const MAX_FORMAT_8_GROUPS: u32 = 0x10000;

/// Well known platform identifiers.
pub mod platform {
    pub const UNICODE: u16 = 0;
    pub const MACINTOSH: u16 = 1;
    pub const WINDOWS: u16 = 3;
}

/// Well known encoding identifiers.
pub mod encoding {
    pub const UNICODE_BMP: u16 = 3;
    pub const UNICODE_FULL: u16 = 4;
    pub const MAC_ROMAN: u16 = 0;
    pub const WINDOWS_SYMBOL: u16 = 0;
    pub const WINDOWS_UNICODE_BMP: u16 = 1;
    pub const WINDOWS_UNICODE_UCS4: u16 = 10;
}

/// An entry in the list of subtables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Byte offset from the beginning of the table to the subtable.
    pub subtable_offset: u32,
}

impl Scalar for EncodingRecord {
    type Raw = [u8; 8];

    fn from_raw(raw: [u8; 8]) -> Self {
        EncodingRecord {
            platform_id: u16::from_be_bytes([raw[0], raw[1]]),
            encoding_id: u16::from_be_bytes([raw[2], raw[3]]),
            subtable_offset: u32::from_be_bytes([raw[4], raw[5], raw[6], raw[7]]),
        }
    }

    fn to_raw(self) -> [u8; 8] {
        let mut raw = [0u8; 8];
        raw[..2].copy_from_slice(&self.platform_id.to_be_bytes());
        raw[2..4].copy_from_slice(&self.encoding_id.to_be_bytes());
        raw[4..].copy_from_slice(&self.subtable_offset.to_be_bytes());
        raw
    }
}

/// The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap)
/// (character to glyph index mapping) table.
#[derive(Clone, Debug)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    version: u16,
    encoding_records: ScalarArray<'a, EncodingRecord>,
}

impl TopLevelTable for Cmap<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let encoding_records = cursor.read_array(num_tables as usize)?;
        Ok(Cmap {
            data,
            version,
            encoding_records,
        })
    }
}

impl<'a> Cmap<'a> {
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn encoding_records(&self) -> ScalarArray<'a, EncodingRecord> {
        self.encoding_records
    }

    /// Reads the subtable referenced by `record`.
    pub fn subtable(&self, record: &EncodingRecord) -> Result<CmapSubtable<'a>, ReadError> {
        let data = self
            .data
            .split_off(record.subtable_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        CmapSubtable::read(data)
    }

    /// Returns the first subtable for the given platform and encoding.
    pub fn subtable_for(&self, platform_id: u16, encoding_id: u16) -> Option<CmapSubtable<'a>> {
        self.encoding_records
            .iter()
            .find(|rec| rec.platform_id == platform_id && rec.encoding_id == encoding_id)
            .and_then(|rec| self.subtable(&rec).ok())
    }

    /// Map a codepoint to a nominal glyph identifier
    ///
    /// This uses the first available subtable that provides a valid mapping.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        self.encoding_records
            .iter()
            .filter_map(|rec| self.subtable(&rec).ok())
            .find_map(|subtable| subtable.map_codepoint(codepoint))
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// A single character mapping, in any of the supported formats.
#[derive(Clone, Debug)]
pub enum CmapSubtable<'a> {
    Format0(Cmap0<'a>),
    Format2(Cmap2<'a>),
    Format4(Cmap4<'a>),
    Format6(Cmap6<'a>),
    Format8(Cmap8<'a>),
    Format10(Cmap10<'a>),
    Format12(Cmap12<'a>),
    Format13(Cmap13<'a>),
    /// Unicode variation sequences; not a plain code point mapping.
    Format14(FontData<'a>),
}

impl<'a> FontRead<'a> for CmapSubtable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            0 => Cmap0::read(data).map(Self::Format0),
            2 => Cmap2::read(data).map(Self::Format2),
            4 => Cmap4::read(data).map(Self::Format4),
            6 => Cmap6::read(data).map(Self::Format6),
            8 => Cmap8::read(data).map(Self::Format8),
            10 => Cmap10::read(data).map(Self::Format10),
            12 => Cmap12::read(data).map(|table| Self::Format12(Cmap12(table))),
            13 => Cmap8::read_groups(data, 12).map(|table| Self::Format13(Cmap13(table))),
            14 => Ok(Self::Format14(data)),
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }
}

impl<'a> CmapSubtable<'a> {
    pub fn format(&self) -> u16 {
        match self {
            Self::Format0(_) => 0,
            Self::Format2(_) => 2,
            Self::Format4(_) => 4,
            Self::Format6(_) => 6,
            Self::Format8(_) => 8,
            Self::Format10(_) => 10,
            Self::Format12(_) => 12,
            Self::Format13(_) => 13,
            Self::Format14(_) => 14,
        }
    }

    /// Maps a codepoint to a glyph, returning `None` for unmapped codepoints
    /// and codepoints mapped to glyph 0.
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let gid = match self {
            Self::Format0(table) => table.map_codepoint(codepoint),
            Self::Format2(table) => table.map_codepoint(codepoint),
            Self::Format4(table) => table.map_codepoint(codepoint),
            Self::Format6(table) => table.map_codepoint(codepoint),
            Self::Format8(table) => table.map_codepoint(codepoint),
            Self::Format10(table) => table.map_codepoint(codepoint),
            Self::Format12(table) => table.map_codepoint(codepoint),
            Self::Format13(table) => table.map_codepoint(codepoint),
            Self::Format14(_) => None,
        }?;
        (!gid.is_notdef()).then_some(gid)
    }

    /// Returns every (codepoint, glyph) pair of the subtable with a glyph
    /// below `num_glyphs`, in table order.
    ///
    /// Codepoints mapped to glyph 0 are omitted. Group based formats stop at
    /// U+10FFFF, skip surrogates, and ignore groups that overlap an earlier
    /// one, so no codepoint is produced twice.
    pub fn mappings(&self, num_glyphs: u16) -> Vec<(u32, GlyphId)> {
        let pairs: Box<dyn Iterator<Item = (u32, GlyphId)> + '_> = match self {
            Self::Format8(table) | Self::Format12(Cmap12(table)) => {
                Box::new(table.sequential_mappings(num_glyphs))
            }
            Self::Format13(Cmap13(table)) => Box::new(table.constant_mappings(num_glyphs)),
            Self::Format14(_) => Box::new(std::iter::empty()),
            _ => {
                let codepoints: Box<dyn Iterator<Item = u32> + '_> = match self {
                    Self::Format2(table) => Box::new(table.codepoints()),
                    Self::Format4(table) => Box::new(table.codepoints()),
                    Self::Format6(table) => Box::new(table.codepoints()),
                    Self::Format10(table) => Box::new(table.codepoints()),
                    _ => Box::new(0..256),
                };
                Box::new(codepoints.filter_map(|cp| Some((cp, self.map_codepoint(cp)?))))
            }
        };
        pairs
            .filter(|(_, gid)| !gid.is_notdef() && gid.to_u16() < num_glyphs)
            .collect()
    }
}

/// Format 0: byte encoding table.
#[derive(Clone, Debug)]
pub struct Cmap0<'a> {
    glyph_id_array: &'a [u8],
}

impl<'a> FontRead<'a> for Cmap0<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(6);
        Ok(Cmap0 {
            glyph_id_array: cursor.read_bytes(256)?,
        })
    }
}

impl Cmap0<'_> {
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        self.glyph_id_array
            .get(usize::try_from(codepoint).ok()?)
            .map(|gid| GlyphId::new(*gid as u16))
    }
}

/// Format 2: high-byte mapping through table, for mixed 8/16-bit encodings.
#[derive(Clone, Debug)]
pub struct Cmap2<'a> {
    data: FontData<'a>,
    sub_header_keys: ScalarArray<'a, u16>,
}

/// One of the format 2 subheaders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubHeader {
    pub first_code: u16,
    pub entry_count: u16,
    pub id_delta: i16,
    pub id_range_offset: u16,
    /// Offset of `id_range_offset` itself, from the start of the subtable.
    pub position: usize,
}

impl<'a> FontRead<'a> for Cmap2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(6);
        Ok(Cmap2 {
            data,
            sub_header_keys: cursor.read_array(256)?,
        })
    }
}

impl<'a> Cmap2<'a> {
    const SUB_HEADERS_START: usize = 6 + 512;

    fn sub_header(&self, index: usize) -> Option<SubHeader> {
        let start = Self::SUB_HEADERS_START + index * 8;
        Some(SubHeader {
            first_code: self.data.read_at(start).ok()?,
            entry_count: self.data.read_at(start + 2).ok()?,
            id_delta: self.data.read_at(start + 4).ok()?,
            id_range_offset: self.data.read_at(start + 6).ok()?,
            position: start + 6,
        })
    }

    // the subheader and the byte used to index into it.
    fn resolve(&self, codepoint: u32) -> Option<(SubHeader, u16)> {
        if codepoint > 0xFFFF {
            return None;
        }
        let high = (codepoint >> 8) as usize;
        let low = (codepoint & 0xFF) as u16;
        if high == 0 {
            // single byte codes only use subheader 0
            let key = self.sub_header_keys.get(low as usize)? / 8;
            if key != 0 {
                return None;
            }
            Some((self.sub_header(0)?, low))
        } else {
            let key = self.sub_header_keys.get(high)? / 8;
            if key == 0 {
                return None;
            }
            Some((self.sub_header(key as usize)?, low))
        }
    }

    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let (header, low) = self.resolve(codepoint)?;
        let index = low.checked_sub(header.first_code)?;
        if index >= header.entry_count {
            return None;
        }
        let addr = header.position + header.id_range_offset as usize + index as usize * 2;
        let gid: u16 = self.data.read_at(addr).ok()?;
        if gid == 0 {
            return None;
        }
        Some(GlyphId::new(gid.wrapping_add_signed(header.id_delta)))
    }

    fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        (0u32..256).flat_map(move |high| {
            let key = match high {
                0 => Some(0),
                _ => self
                    .sub_header_keys
                    .get(high as usize)
                    .map(|key| key / 8)
                    .filter(|key| *key != 0),
            };
            let range = key
                .and_then(|key| self.sub_header(key as usize))
                .map(|h| h.first_code as u32..h.first_code as u32 + h.entry_count as u32)
                .unwrap_or(0..0);
            range.map(move |low| (high << 8) | low)
        })
    }
}

/// Format 4: segment mapping to delta values.
#[derive(Clone, Debug)]
pub struct Cmap4<'a> {
    data: FontData<'a>,
    end_code: ScalarArray<'a, u16>,
    start_code: ScalarArray<'a, u16>,
    id_delta: ScalarArray<'a, i16>,
    id_range_offsets: ScalarArray<'a, u16>,
    id_range_offsets_start: usize,
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(6);
        let seg_count_x2: u16 = cursor.read()?;
        let seg_count = seg_count_x2 as usize / 2;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let end_code = cursor.read_array(seg_count)?;
        // reservedPad
        cursor.advance::<u16>();
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets_start = cursor.position()?;
        let id_range_offsets = cursor.read_array(seg_count)?;
        Ok(Cmap4 {
            data,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            id_range_offsets_start,
        })
    }
}

impl<'a> Cmap4<'a> {
    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    pub fn end_code(&self) -> ScalarArray<'a, u16> {
        self.end_code
    }

    pub fn start_code(&self) -> ScalarArray<'a, u16> {
        self.start_code
    }

    pub fn id_delta(&self) -> ScalarArray<'a, i16> {
        self.id_delta
    }

    pub fn id_range_offsets(&self) -> ScalarArray<'a, u16> {
        self.id_range_offsets
    }

    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let codepoint = u16::try_from(codepoint).ok()?;
        // end codes are sorted; find the first segment ending at or after
        // the codepoint.
        let ix = match self.end_code.binary_search_by(|end| end.cmp(&codepoint)) {
            Ok(ix) | Err(ix) => ix,
        };
        let start = self.start_code.get(ix)?;
        if codepoint < start {
            return None;
        }
        let delta = self.id_delta.get(ix)?;
        let range_offset = self.id_range_offsets.get(ix)?;
        if range_offset == 0 {
            return Some(GlyphId::new(codepoint.wrapping_add_signed(delta)));
        }
        let addr = self.id_range_offsets_start
            + ix * 2
            + range_offset as usize
            + (codepoint - start) as usize * 2;
        let gid: u16 = self.data.read_at(addr).ok()?;
        (gid != 0).then(|| GlyphId::new(gid.wrapping_add_signed(delta)))
    }

    fn codepoints(&self) -> impl Iterator<Item = u32> + 'a {
        self.start_code
            .iter()
            .zip(self.end_code.iter())
            .flat_map(|(start, end)| start as u32..=end as u32)
            // the sentinel segment maps nothing
            .filter(|cp| *cp != 0xFFFF)
    }
}

/// Format 6: trimmed table mapping.
#[derive(Clone, Debug)]
pub struct Cmap6<'a> {
    first_code: u16,
    glyph_id_array: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for Cmap6<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(6);
        let first_code = cursor.read()?;
        let entry_count: u16 = cursor.read()?;
        Ok(Cmap6 {
            first_code,
            glyph_id_array: cursor.read_array(entry_count as usize)?,
        })
    }
}

impl Cmap6<'_> {
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let index = codepoint.checked_sub(self.first_code as u32)?;
        self.glyph_id_array.get(index as usize).map(GlyphId::new)
    }

    fn codepoints(&self) -> impl Iterator<Item = u32> {
        let start = self.first_code as u32;
        start..start + self.glyph_id_array.len() as u32
    }
}

/// A sequential (or constant) map group, used by formats 8, 12 and 13.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapGroup {
    pub start_char_code: u32,
    pub end_char_code: u32,
    pub start_glyph_id: u32,
}

impl Scalar for MapGroup {
    type Raw = [u8; 12];

    fn from_raw(raw: [u8; 12]) -> Self {
        let word = |i: usize| u32::from_be_bytes([raw[i], raw[i + 1], raw[i + 2], raw[i + 3]]);
        MapGroup {
            start_char_code: word(0),
            end_char_code: word(4),
            start_glyph_id: word(8),
        }
    }

    fn to_raw(self) -> [u8; 12] {
        let mut raw = [0u8; 12];
        raw[..4].copy_from_slice(&self.start_char_code.to_be_bytes());
        raw[4..8].copy_from_slice(&self.end_char_code.to_be_bytes());
        raw[8..].copy_from_slice(&self.start_glyph_id.to_be_bytes());
        raw
    }
}

/// Format 8: mixed 16-bit and 32-bit coverage.
///
/// The `is32` bitmap is not needed to map full codepoints and is skipped.
#[derive(Clone, Debug)]
pub struct Cmap8<'a> {
    groups: ScalarArray<'a, MapGroup>,
}

impl<'a> FontRead<'a> for Cmap8<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let table = Cmap8::read_groups(data, 12 + 8192)?;
        if table.groups.len() as u32 > MAX_FORMAT_8_GROUPS {
            return Err(ReadError::MalformedData("too many format 8 groups"));
        }
        Ok(table)
    }
}

impl<'a> Cmap8<'a> {
    // formats 8, 12 and 13 only differ in what precedes numGroups
    fn read_groups(data: FontData<'a>, num_groups_pos: usize) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.seek(num_groups_pos);
        let num_groups: u32 = cursor.read()?;
        Ok(Cmap8 {
            groups: cursor.read_array(num_groups as usize)?,
        })
    }

    pub fn groups(&self) -> ScalarArray<'a, MapGroup> {
        self.groups
    }

    fn find_group(&self, codepoint: u32) -> Option<MapGroup> {
        let ix = self
            .groups
            .binary_search_by(|group| {
                if group.end_char_code < codepoint {
                    Ordering::Less
                } else if group.start_char_code > codepoint {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .ok()?;
        self.groups.get(ix)
    }

    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let group = self.find_group(codepoint)?;
        let gid = group
            .start_glyph_id
            .checked_add(codepoint - group.start_char_code)?;
        u16::try_from(gid).ok().map(GlyphId::new)
    }

    /// Groups in order, clamped to U+10FFFF, without empty groups or
    /// groups that start at or before the end of the previous one.
    fn ordered_groups(&self) -> impl Iterator<Item = (u32, u32, u32)> + 'a {
        let mut prev_end: Option<u32> = None;
        self.groups.iter().filter_map(move |group| {
            let start = group.start_char_code;
            let end = group.end_char_code.min(MAX_CODEPOINT);
            if start > end || prev_end.is_some_and(|prev| start <= prev) {
                return None;
            }
            prev_end = Some(end);
            Some((start, end, group.start_glyph_id))
        })
    }

    /// Each group maps its codes to consecutive glyphs, up to `num_glyphs`.
    fn sequential_mappings(&self, num_glyphs: u16) -> impl Iterator<Item = (u32, GlyphId)> + 'a {
        self.ordered_groups()
            .flat_map(move |(start, end, start_glyph)| {
                let available = u32::from(num_glyphs).saturating_sub(start_glyph);
                let len = (end - start + 1).min(available);
                // start_glyph + i < num_glyphs, so the cast is lossless
                (0..len).map(move |i| (start + i, GlyphId::new((start_glyph + i) as u16)))
            })
            .filter(|(cp, _)| !SURROGATES.contains(cp))
    }

    /// Each group maps all of its codes to one glyph.
    fn constant_mappings(&self, num_glyphs: u16) -> impl Iterator<Item = (u32, GlyphId)> + 'a {
        self.ordered_groups()
            .filter(move |(_, _, glyph)| *glyph < u32::from(num_glyphs))
            .flat_map(|(start, end, glyph)| {
                (start..=end).map(move |cp| (cp, GlyphId::new(glyph as u16)))
            })
            .filter(|(cp, _)| !SURROGATES.contains(cp))
    }
}

/// Format 10: trimmed array.
#[derive(Clone, Debug)]
pub struct Cmap10<'a> {
    start_char_code: u32,
    glyphs: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for Cmap10<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.seek(12);
        let start_char_code = cursor.read()?;
        let num_chars: u32 = cursor.read()?;
        Ok(Cmap10 {
            start_char_code,
            glyphs: cursor.read_array(num_chars as usize)?,
        })
    }
}

impl Cmap10<'_> {
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let index = codepoint.checked_sub(self.start_char_code)?;
        self.glyphs.get(index as usize).map(GlyphId::new)
    }

    fn codepoints(&self) -> impl Iterator<Item = u32> {
        let start = self.start_char_code.min(MAX_CODEPOINT + 1);
        let end = start
            .saturating_add(self.glyphs.len() as u32)
            .min(MAX_CODEPOINT + 1);
        (start..end).filter(|cp| !SURROGATES.contains(cp))
    }
}

/// Format 12: segmented coverage.
#[derive(Clone, Debug)]
pub struct Cmap12<'a>(Cmap8<'a>);

impl<'a> Cmap12<'a> {
    fn read(data: FontData<'a>) -> Result<Cmap8<'a>, ReadError> {
        Cmap8::read_groups(data, 12)
    }

    pub fn groups(&self) -> ScalarArray<'a, MapGroup> {
        self.0.groups
    }

    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        self.0.map_codepoint(codepoint)
    }
}

/// Format 13: many-to-one range mappings.
#[derive(Clone, Debug)]
pub struct Cmap13<'a>(Cmap8<'a>);

impl<'a> Cmap13<'a> {
    pub fn groups(&self) -> ScalarArray<'a, MapGroup> {
        self.0.groups
    }

    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let group = self.0.find_group(codepoint)?;
        u16::try_from(group.start_glyph_id).ok().map(GlyphId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sfnt_test_data::{bebuffer::BeBuffer, cmap as test_data};

    fn subtable(bytes: &[u8]) -> CmapSubtable<'_> {
        CmapSubtable::read(FontData::new(bytes)).unwrap()
    }

    #[test]
    fn format_0() {
        let table = subtable(&test_data::FORMAT_0);
        assert_eq!(table.format(), 0);
        assert_eq!(table.map_codepoint(b'A' as u32), Some(GlyphId::new(3)));
        assert_eq!(table.map_codepoint(b'B' as u32), None);
        assert_eq!(table.map_codepoint(0x100), None);
        assert_eq!(table.mappings(u16::MAX), [(b'A' as u32, GlyphId::new(3))]);
    }

    #[test]
    fn format_4_delta_and_range_offset() {
        let table = subtable(test_data::FORMAT_4);
        assert_eq!(table.format(), 4);
        // delta segment 'a'..='c' -> 1..=3
        assert_eq!(table.map_codepoint(0x61), Some(GlyphId::new(1)));
        assert_eq!(table.map_codepoint(0x63), Some(GlyphId::new(3)));
        assert_eq!(table.map_codepoint(0x64), None);
        // glyph array segment 0x100..=0x101 -> 7, 9
        assert_eq!(table.map_codepoint(0x100), Some(GlyphId::new(7)));
        assert_eq!(table.map_codepoint(0x101), Some(GlyphId::new(9)));
        assert_eq!(table.map_codepoint(0xFFFF), None);
        assert_eq!(table.map_codepoint(0x10000), None);
        assert_eq!(
            table.mappings(u16::MAX),
            [
                (0x61, GlyphId::new(1)),
                (0x62, GlyphId::new(2)),
                (0x63, GlyphId::new(3)),
                (0x100, GlyphId::new(7)),
                (0x101, GlyphId::new(9)),
            ]
        );
    }

    #[test]
    fn format_6() {
        let table = subtable(test_data::FORMAT_6);
        assert_eq!(table.map_codepoint(0x20), Some(GlyphId::new(4)));
        assert_eq!(table.map_codepoint(0x21), Some(GlyphId::new(5)));
        assert_eq!(table.map_codepoint(0x22), None);
        assert_eq!(table.map_codepoint(0x1F), None);
    }

    #[test]
    fn format_12_and_13() {
        let table = subtable(test_data::FORMAT_12);
        assert_eq!(table.map_codepoint(0x1F600), Some(GlyphId::new(10)));
        assert_eq!(table.map_codepoint(0x1F602), Some(GlyphId::new(12)));
        assert_eq!(table.map_codepoint(0x1F603), None);
        assert_eq!(table.mappings(u16::MAX).len(), 3);

        let table = subtable(test_data::FORMAT_13);
        assert_eq!(table.map_codepoint(0x0), None);
        assert_eq!(table.map_codepoint(0x10), Some(GlyphId::new(2)));
        assert_eq!(table.map_codepoint(0x1F), Some(GlyphId::new(2)));
        assert_eq!(table.map_codepoint(0x20), None);
    }

    fn group_subtable(format: u16, groups: &[(u32, u32, u32)]) -> Vec<u8> {
        BeBuffer::new()
            .push(format)
            .push(0u16)
            .push(16 + 12 * groups.len() as u32)
            .push(0u32)
            .push(groups.len() as u32)
            .extend(groups.iter().map(|&(start, end, glyph)| MapGroup {
                start_char_code: start,
                end_char_code: end,
                start_glyph_id: glyph,
            }))
            .into_vec()
    }

    #[test]
    fn group_glyph_overflow_is_unmapped() {
        let bytes = group_subtable(12, &[(0x41, 0x42, u32::MAX)]);
        let table = subtable(&bytes);
        assert_eq!(table.map_codepoint(0x41), None);
        assert_eq!(table.map_codepoint(0x42), None);
        assert!(table.mappings(100).is_empty());
    }

    #[test]
    fn sequential_groups_stop_at_glyph_count() {
        // an inverted group, then one covering all of u32, then an overlap
        let bytes = group_subtable(12, &[(0x60, 0x50, 1), (0, 0x7FFF_FFFF, 0), (0x20, 0x30, 5)]);
        let table = subtable(&bytes);
        let expected = (1u32..10).map(|i| (i, GlyphId::new(i as u16))).collect::<Vec<_>>();
        assert_eq!(table.mappings(10), expected);
        assert_eq!(table.map_codepoint(0x7FFF_0000), None);
    }

    #[test]
    fn constant_groups_are_clamped() {
        let bytes = group_subtable(
            13,
            &[(0x41, 0x41, 9), (0xD7FE, 0xE001, 2), (0x10FFF0, u32::MAX, 3)],
        );
        let table = subtable(&bytes);
        let mappings = table.mappings(4);
        assert_eq!(mappings.len(), 4 + 16);
        assert_eq!(
            mappings[..4],
            [
                (0xD7FE, GlyphId::new(2)),
                (0xD7FF, GlyphId::new(2)),
                (0xE000, GlyphId::new(2)),
                (0xE001, GlyphId::new(2)),
            ]
        );
        assert_eq!(mappings.last(), Some(&(MAX_CODEPOINT, GlyphId::new(3))));
    }

    #[test]
    fn trimmed_array_stops_at_last_codepoint() {
        let bytes = BeBuffer::new()
            .extend([10u16, 0])
            .extend([0u32, 0, 0x10FFFE, 4])
            .extend([1u16, 2, 3, 4])
            .into_vec();
        let table = subtable(&bytes);
        assert_eq!(
            table.mappings(10),
            [(0x10FFFE, GlyphId::new(1)), (0x10FFFF, GlyphId::new(2))]
        );
    }

    #[test]
    fn format_2_mixed_bytes() {
        let table = subtable(&test_data::FORMAT_2);
        // single byte
        assert_eq!(table.map_codepoint(0x41), Some(GlyphId::new(5)));
        // lead byte 0x81, trail 0x40 and 0x41
        assert_eq!(table.map_codepoint(0x8140), Some(GlyphId::new(8)));
        assert_eq!(table.map_codepoint(0x8141), Some(GlyphId::new(9)));
        assert_eq!(table.map_codepoint(0x8142), None);
        // 0x81 is a lead byte, not a single byte code
        assert_eq!(table.map_codepoint(0x81), None);
        assert_eq!(
            table.mappings(u16::MAX),
            [
                (0x41, GlyphId::new(5)),
                (0x8140, GlyphId::new(8)),
                (0x8141, GlyphId::new(9)),
            ]
        );
    }

    #[test]
    fn format_14_is_not_a_mapping() {
        let table = subtable(test_data::FORMAT_14);
        assert_eq!(table.format(), 14);
        assert_eq!(table.map_codepoint(0x41), None);
        assert!(table.mappings(u16::MAX).is_empty());
    }

    #[test]
    fn unknown_format() {
        assert!(matches!(
            CmapSubtable::read(FontData::new(&[0, 7, 0, 0])),
            Err(ReadError::InvalidFormat(7))
        ));
    }

    #[test]
    fn table_lookup() {
        let data = test_data::multi_format_cmap();
        let cmap = Cmap::read(FontData::new(&data)).unwrap();
        assert_eq!(cmap.encoding_records().len(), 2);
        assert!(cmap.subtable_for(3, 1).is_some());
        assert!(cmap.subtable_for(0, 4).is_none());
        assert_eq!(cmap.map_codepoint(0x61u32), Some(GlyphId::new(1)));
    }
}
