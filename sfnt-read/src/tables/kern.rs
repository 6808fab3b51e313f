//! The [kern](https://docs.microsoft.com/en-us/typography/opentype/spec/kern) table
//!
//! Both the OpenType header (version 0) and the Apple header (version 1.0)
//! are supported. Only format 0 subtables carry pair values; subtables of
//! other formats are kept but never match a pair.

use types::{GlyphId, Scalar, Tag};

use crate::{array::ScalarArray, FontData, FontRead, ReadError, TopLevelTable};

/// 'kern'
pub const TAG: Tag = Tag::new(b"kern");

const APPLE_VERSION: u32 = 0x0001_0000;

/// One kerning pair of a format 0 subtable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernPair {
    pub left: u16,
    pub right: u16,
    pub value: i16,
}

impl KernPair {
    fn key(&self) -> u32 {
        ((self.left as u32) << 16) | self.right as u32
    }
}

impl Scalar for KernPair {
    type Raw = [u8; 6];

    fn from_raw(raw: [u8; 6]) -> Self {
        KernPair {
            left: u16::from_be_bytes([raw[0], raw[1]]),
            right: u16::from_be_bytes([raw[2], raw[3]]),
            value: i16::from_be_bytes([raw[4], raw[5]]),
        }
    }

    fn to_raw(self) -> [u8; 6] {
        let [a, b] = self.left.to_be_bytes();
        let [c, d] = self.right.to_be_bytes();
        let [e, f] = self.value.to_be_bytes();
        [a, b, c, d, e, f]
    }
}

/// The coverage bits of a subtable, normalized across both header flavors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernCoverage {
    pub horizontal: bool,
    /// The values are minimums rather than adjustments.
    pub minimum: bool,
    pub cross_stream: bool,
    pub format: u8,
}

impl KernCoverage {
    fn from_opentype(bits: u16) -> Self {
        KernCoverage {
            horizontal: bits & 0x0001 != 0,
            minimum: bits & 0x0002 != 0,
            cross_stream: bits & 0x0004 != 0,
            format: (bits >> 8) as u8,
        }
    }

    fn from_apple(bits: u16) -> Self {
        KernCoverage {
            horizontal: bits & 0x8000 == 0,
            minimum: false,
            cross_stream: bits & 0x4000 != 0,
            format: bits as u8,
        }
    }
}

/// A kerning subtable.
#[derive(Clone, Debug)]
pub struct KernSubtable<'a> {
    coverage: KernCoverage,
    pairs: ScalarArray<'a, KernPair>,
}

impl<'a> KernSubtable<'a> {
    /// Reads the format 0 body, if this is format 0.
    fn read_body(coverage: KernCoverage, body: FontData<'a>) -> Result<Self, ReadError> {
        let pairs = if coverage.format == 0 {
            let num_pairs: u16 = body.read_at(0)?;
            body.read_array(8..8 + num_pairs as usize * KernPair::RAW_BYTE_LEN)?
        } else {
            Default::default()
        };
        Ok(KernSubtable { coverage, pairs })
    }

    pub fn coverage(&self) -> KernCoverage {
        self.coverage
    }

    /// `true` for subtables holding ordinary horizontal adjustments.
    pub fn is_horizontal_kerning(&self) -> bool {
        self.coverage.horizontal && !self.coverage.minimum && !self.coverage.cross_stream
    }

    pub fn pairs(&self) -> ScalarArray<'a, KernPair> {
        self.pairs
    }

    /// Returns the adjustment for the pair, if the subtable lists it.
    pub fn pair_value(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        let key = (left.to_u32() << 16) | right.to_u32();
        let ix = self.pairs.binary_search_by(|pair| pair.key().cmp(&key)).ok()?;
        self.pairs.get(ix).map(|pair| pair.value)
    }
}

/// The [kern](https://docs.microsoft.com/en-us/typography/opentype/spec/kern) table
#[derive(Clone, Debug)]
pub struct Kern<'a> {
    data: FontData<'a>,
    version: u32,
    subtables: Vec<KernSubtable<'a>>,
}

impl TopLevelTable for Kern<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Kern<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let (version, num_tables) = match cursor.read::<u16>()? {
            0 => (0, cursor.read::<u16>()? as u32),
            1 if cursor.read::<u16>()? == 0 => (APPLE_VERSION, cursor.read::<u32>()?),
            other => return Err(ReadError::InvalidFormat(other as i64)),
        };
        let mut subtables = Vec::new();
        for _ in 0..num_tables {
            let start = cursor.position()?;
            let (coverage, header_len, length) = if version == APPLE_VERSION {
                let length = cursor.read::<u32>()? as usize;
                let coverage = KernCoverage::from_apple(cursor.read()?);
                cursor.advance::<u16>();
                (coverage, 8, length)
            } else {
                cursor.advance::<u16>();
                let length = cursor.read::<u16>()? as usize;
                (KernCoverage::from_opentype(cursor.read()?), 6, length)
            };
            let body = data
                .split_off(start + header_len)
                .ok_or(ReadError::OutOfBounds)?;
            let subtable = KernSubtable::read_body(coverage, body)?;
            // the 16 bit length of large format 0 subtables overflows, so
            // those are sized by their pair count
            let length = if coverage.format == 0 {
                header_len + 8 + subtable.pairs.as_bytes().len()
            } else if length >= header_len {
                length
            } else {
                return Err(ReadError::MalformedData("kern subtable shorter than its header"));
            };
            subtables.push(subtable);
            cursor.seek(start + length);
        }
        Ok(Kern {
            data,
            version,
            subtables,
        })
    }
}

impl<'a> Kern<'a> {
    /// 0 for OpenType tables, 0x00010000 for Apple tables.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn subtables(&self) -> &[KernSubtable<'a>] {
        &self.subtables
    }

    /// The first subtable with horizontal adjustments.
    pub fn horizontal_subtable(&self) -> Option<&KernSubtable<'a>> {
        self.subtables
            .iter()
            .find(|subtable| subtable.is_horizontal_kerning())
    }

    /// Returns the horizontal adjustment between two glyphs, in font units.
    ///
    /// Pairs the font does not list have no adjustment.
    pub fn pair_value(&self, left: GlyphId, right: GlyphId) -> i16 {
        self.horizontal_subtable()
            .and_then(|subtable| subtable.pair_value(left, right))
            .unwrap_or_default()
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sfnt_test_data::bebuffer::BeBuffer;

    use super::*;

    fn format_0_body(pairs: &[(u16, u16, i16)]) -> BeBuffer {
        let buf = BeBuffer::new().extend([pairs.len() as u16, 12, 1, 6]);
        pairs.iter().fold(buf, |buf, (left, right, value)| {
            buf.extend([*left, *right]).push(*value)
        })
    }

    fn opentype(coverage: u16, pairs: &[(u16, u16, i16)]) -> Vec<u8> {
        let body = format_0_body(pairs);
        BeBuffer::new()
            .extend([0u16, 1, 0, 6 + body.len() as u16, coverage])
            .extend(body.into_vec())
            .into_vec()
    }

    #[test]
    fn opentype_pairs() {
        let data = opentype(1, &[(4, 12, -40), (4, 28, 40), (5, 40, -50)]);
        let kern = Kern::read(FontData::new(&data)).unwrap();
        assert_eq!(kern.version(), 0);
        assert_eq!(kern.subtables().len(), 1);
        let subtable = &kern.subtables()[0];
        assert_eq!(
            subtable.coverage(),
            KernCoverage {
                horizontal: true,
                ..Default::default()
            }
        );
        assert_eq!(
            subtable.pairs().get(1),
            Some(KernPair {
                left: 4,
                right: 28,
                value: 40
            })
        );
        assert_eq!(kern.pair_value(GlyphId::new(4), GlyphId::new(12)), -40);
        assert_eq!(kern.pair_value(GlyphId::new(5), GlyphId::new(40)), -50);
        assert_eq!(kern.pair_value(GlyphId::new(12), GlyphId::new(4)), 0);
    }

    #[test]
    fn apple_header() {
        let body = format_0_body(&[(1, 2, 30)]);
        let data = BeBuffer::new()
            .extend([0x0001_0000u32, 1, 8 + body.len() as u32])
            .extend([0u16, 0])
            .extend(body.into_vec());
        let kern = Kern::read(FontData::new(&data)).unwrap();
        assert_eq!(kern.version(), APPLE_VERSION);
        assert!(kern.subtables()[0].is_horizontal_kerning());
        assert_eq!(kern.pair_value(GlyphId::new(1), GlyphId::new(2)), 30);
    }

    #[test]
    fn minimum_and_cross_stream_subtables_are_skipped() {
        let mut data = opentype(0x0003, &[(1, 2, 10)]);
        let second = opentype(0x0001, &[(1, 2, 20)]);
        // append the second subtable and bump the count
        data.extend_from_slice(&second[4..]);
        data[3] = 2;
        let kern = Kern::read(FontData::new(&data)).unwrap();
        assert_eq!(kern.subtables().len(), 2);
        assert!(!kern.subtables()[0].is_horizontal_kerning());
        assert_eq!(
            kern.subtables()[0].pair_value(GlyphId::new(1), GlyphId::new(2)),
            Some(10)
        );
        assert_eq!(kern.pair_value(GlyphId::new(1), GlyphId::new(2)), 20);
    }

    #[test]
    fn other_formats_have_no_pairs() {
        let data = BeBuffer::new().extend([0u16, 1, 0, 10, 0x0201, 0, 0]);
        let kern = Kern::read(FontData::new(&data)).unwrap();
        assert_eq!(kern.subtables()[0].coverage().format, 2);
        assert!(kern.subtables()[0].pairs().is_empty());
        assert_eq!(kern.pair_value(GlyphId::new(1), GlyphId::new(2)), 0);
    }

    #[test]
    fn malformed_tables() {
        let bad_version = BeBuffer::new().extend([2u16, 0]);
        assert_eq!(
            Kern::read(FontData::new(&bad_version)).err(),
            Some(ReadError::InvalidFormat(2))
        );
        let mut truncated = opentype(1, &[(1, 2, 3), (4, 5, 6)]);
        truncated.truncate(truncated.len() - 2);
        assert_eq!(
            Kern::read(FontData::new(&truncated)).err(),
            Some(ReadError::OutOfBounds)
        );
        let short = BeBuffer::new().extend([0u16, 1, 0, 2, 0x0201]);
        assert!(matches!(
            Kern::read(FontData::new(&short)),
            Err(ReadError::MalformedData(_))
        ));
    }
}
