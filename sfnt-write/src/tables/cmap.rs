//! the [cmap] table
//!
//! [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap

use read::{
    tables::cmap::{encoding, platform},
    TopLevelTable,
};
use types::{GlyphId, Scalar, Tag};

use crate::{util::SearchRange, FontWrite, TableWriter};

const CMAP_HEADER_LEN: u32 = 4;
const ENCODING_RECORD_LEN: u32 = 8;

/// A cmap table with a single format 4 subtable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cmap {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub subtable: Cmap4,
}

impl Cmap {
    /// A cmap with one Windows Unicode BMP (3, 1) subtable.
    pub fn windows_bmp(subtable: Cmap4) -> Self {
        Cmap {
            platform_id: platform::WINDOWS,
            encoding_id: encoding::WINDOWS_UNICODE_BMP,
            subtable,
        }
    }
}

impl TopLevelTable for Cmap {
    const TAG: Tag = Tag::new(b"cmap");
}

impl FontWrite for Cmap {
    fn write_into(&self, writer: &mut TableWriter) {
        0u16.write_into(writer); // version
        1u16.write_into(writer); // numTables
        self.platform_id.write_into(writer);
        self.encoding_id.write_into(writer);
        (CMAP_HEADER_LEN + ENCODING_RECORD_LEN).write_into(writer);
        self.subtable.write_into(writer);
    }
}

/// One run of consecutive code points mapped to consecutive glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cmap4Segment {
    pub start_code: u16,
    pub end_code: u16,
    /// Added modulo 65536 to each code point in the segment.
    pub id_delta: i16,
}

impl Cmap4Segment {
    /// The mandatory final segment.
    pub const SENTINEL: Cmap4Segment = Cmap4Segment {
        start_code: 0xFFFF,
        end_code: 0xFFFF,
        id_delta: 1,
    };

    fn new(code: u16, gid: u16) -> Self {
        Cmap4Segment {
            start_code: code,
            end_code: code,
            id_delta: gid.wrapping_sub(code) as i16,
        }
    }
}

/// A [format 4](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values)
/// subtable using only deltas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmap4 {
    segments: Vec<Cmap4Segment>,
}

impl Cmap4 {
    /// Build segments from mappings sorted by code point.
    ///
    /// A new segment starts whenever the code point is not consecutive with
    /// the previous one or the delta changes. Mappings to `.notdef` are
    /// dropped.
    pub fn from_mappings(mappings: impl IntoIterator<Item = (u16, GlyphId)>) -> Self {
        let mut segments: Vec<Cmap4Segment> = Vec::new();
        for (code, gid) in mappings {
            if gid.is_notdef() || code == 0xFFFF {
                continue;
            }
            let next = Cmap4Segment::new(code, gid.to_u16());
            match segments.last_mut() {
                Some(last)
                    if last.end_code.checked_add(1) == Some(code)
                        && last.id_delta == next.id_delta =>
                {
                    last.end_code = code;
                }
                _ => segments.push(next),
            }
        }
        Cmap4 { segments }
    }

    /// The segments, not including the sentinel.
    pub fn segments(&self) -> &[Cmap4Segment] {
        &self.segments
    }

    /// The number of segments written, including the sentinel.
    pub fn seg_count(&self) -> usize {
        self.segments.len() + 1
    }

    /// The subtable length in bytes. A subtable is only valid if this
    /// fits the 16-bit `length` field, see [`Cmap4::fits`].
    pub fn compute_length(&self) -> u32 {
        16 + 8 * self.seg_count() as u32
    }

    /// Returns `false` when there are too many segments for a format 4
    /// subtable, which holds at most 8189 including the sentinel.
    pub fn fits(&self) -> bool {
        self.compute_length() <= u16::MAX as u32
    }
}

impl FontWrite for Cmap4 {
    fn write_into(&self, writer: &mut TableWriter) {
        // the header fields saturate for subtables that do not fit
        let seg_count = self.seg_count();
        let computed = SearchRange::compute(seg_count, u16::RAW_BYTE_LEN);
        let field = |value: usize| u16::try_from(value).unwrap_or(u16::MAX);
        let segments = self
            .segments
            .iter()
            .chain(std::iter::once(&Cmap4Segment::SENTINEL));

        4u16.write_into(writer); // format
        field(self.compute_length() as usize).write_into(writer);
        0u16.write_into(writer); // language
        field(seg_count * 2).write_into(writer);
        computed.search_range.write_into(writer);
        computed.entry_selector.write_into(writer);
        computed.range_shift.write_into(writer);
        segments.clone().for_each(|seg| seg.end_code.write_into(writer));
        0u16.write_into(writer); // reservedPad
        segments.clone().for_each(|seg| seg.start_code.write_into(writer));
        segments.for_each(|seg| seg.id_delta.write_into(writer));
        // idRangeOffsets are unused
        (0..seg_count).for_each(|_| 0u16.write_into(writer));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use read::{tables::cmap::Cmap as ReadCmap, FontData, FontRead};

    use super::*;

    fn mappings(pairs: &[(u16, u16)]) -> Vec<(u16, GlyphId)> {
        pairs
            .iter()
            .map(|(cp, gid)| (*cp, GlyphId::new(*gid)))
            .collect()
    }

    #[test]
    fn segments_split_on_gaps_and_delta_changes() {
        let cmap4 = Cmap4::from_mappings(mappings(&[
            (0x20, 1),
            (0x21, 2),
            (0x22, 3),
            // delta changes
            (0x23, 7),
            // code point gap
            (0x30, 8),
            (0x31, 0),
        ]));
        assert_eq!(
            cmap4.segments(),
            &[
                Cmap4Segment {
                    start_code: 0x20,
                    end_code: 0x22,
                    id_delta: -0x1f
                },
                Cmap4Segment {
                    start_code: 0x23,
                    end_code: 0x23,
                    id_delta: 7 - 0x23
                },
                Cmap4Segment {
                    start_code: 0x30,
                    end_code: 0x30,
                    id_delta: 8 - 0x30
                },
            ]
        );
    }

    #[test]
    fn header_fields() {
        let cmap4 = Cmap4::from_mappings(mappings(&[(0x41, 1), (0x43, 2), (0x45, 3), (0x47, 4)]));
        let bytes = crate::dump_table(&cmap4);
        // 4 segments + sentinel
        assert_eq!(u16::read(&bytes[2..]), Some(16 + 8 * 5));
        assert_eq!(u16::read(&bytes[6..]), Some(10)); // segCountX2
        assert_eq!(u16::read(&bytes[8..]), Some(8)); // searchRange
        assert_eq!(u16::read(&bytes[10..]), Some(2)); // entrySelector
        assert_eq!(u16::read(&bytes[12..]), Some(2)); // rangeShift
        assert_eq!(bytes.len(), 16 + 8 * 5);
    }

    #[test]
    fn segment_limit() {
        // every other code point, so no two mappings share a segment
        let alternating = |count: u16| {
            Cmap4::from_mappings((0..count).map(|i| (i * 2 + 1, GlyphId::new(i + 1))))
        };
        let largest = alternating(8188);
        assert_eq!(largest.seg_count(), 8189);
        assert!(largest.fits());
        assert_eq!(crate::dump_table(&largest).len(), 65528);

        let too_many = alternating(9000);
        assert_eq!(too_many.compute_length(), 16 + 8 * 9001);
        assert!(!too_many.fits());
    }

    #[test]
    fn readable_by_sfnt_read() {
        let cmap = Cmap::windows_bmp(Cmap4::from_mappings(mappings(&[
            (0x61, 1),
            (0x62, 2),
            (0x100, 3),
        ])));
        let bytes = crate::dump_table(&cmap);
        let read = ReadCmap::read(FontData::new(&bytes)).unwrap();
        let subtable = read.subtable_for(3, 1).unwrap();
        assert_eq!(subtable.format(), 4);
        assert_eq!(
            subtable.mappings(u16::MAX),
            vec![
                (0x61, GlyphId::new(1)),
                (0x62, GlyphId::new(2)),
                (0x100, GlyphId::new(3))
            ]
        );
        assert_eq!(read.map_codepoint(0xFFFFu32), None);
    }
}
