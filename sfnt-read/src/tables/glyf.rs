//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use types::{F2Dot14, GlyphId, Scalar, Tag};

use crate::{array::ScalarArray, Cursor, FontData, FontRead, ReadError, TopLevelTable};

/// 'glyf'
pub const TAG: Tag = Tag::new(b"glyf");

/// The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table
#[derive(Clone, Copy, Debug)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Glyf<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

impl<'a> Glyf<'a> {
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

macro_rules! flags {
    ($(#[$meta:meta])* $name:ident($ty:ty) { $($(#[$fmeta:meta])* $flag:ident = $val:expr;)* }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name($ty);

        impl $name {
            $($(#[$fmeta])* pub const $flag: Self = Self($val);)*

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn bits(self) -> $ty {
                self.0
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl Scalar for $name {
            type Raw = <$ty as Scalar>::Raw;

            fn from_raw(raw: Self::Raw) -> Self {
                Self(<$ty>::from_raw(raw))
            }

            fn to_raw(self) -> Self::Raw {
                self.0.to_raw()
            }
        }
    };
}

flags! {
    /// Flags used in [SimpleGlyph]
    SimpleGlyphFlags(u8) {
        /// Bit 0: the point is on the curve.
        ON_CURVE_POINT = 0x01;
        /// Bit 1: the x-coordinate is 1 byte long.
        X_SHORT_VECTOR = 0x02;
        /// Bit 2: the y-coordinate is 1 byte long.
        Y_SHORT_VECTOR = 0x04;
        /// Bit 3: the next byte specifies the number of additional times
        /// this flag byte is to be repeated.
        REPEAT_FLAG = 0x08;
        /// Bit 4: sign of a short x delta, or "same as previous" for a long one.
        X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        /// Bit 5: sign of a short y delta, or "same as previous" for a long one.
        Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
        OVERLAP_SIMPLE = 0x40;
    }
}

flags! {
    /// Flags used in [CompositeGlyph]
    CompositeGlyphFlags(u16) {
        /// Bit 0: the arguments are 16-bit; otherwise 8-bit.
        ARG_1_AND_2_ARE_WORDS = 0x0001;
        /// Bit 1: the arguments are signed xy values; otherwise they are
        /// unsigned point numbers.
        ARGS_ARE_XY_VALUES = 0x0002;
        ROUND_XY_TO_GRID = 0x0004;
        /// Bit 3: there is a simple scale for the component.
        WE_HAVE_A_SCALE = 0x0008;
        /// Bit 5: at least one more glyph follows this one.
        MORE_COMPONENTS = 0x0020;
        /// Bit 6: the x direction uses a different scale from the y direction.
        WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        /// Bit 7: there is a 2 by 2 transformation.
        WE_HAVE_A_TWO_BY_TWO = 0x0080;
        /// Bit 8: instructions follow the last component.
        WE_HAVE_INSTRUCTIONS = 0x0100;
        USE_MY_METRICS = 0x0200;
        OVERLAP_COMPOUND = 0x0400;
        SCALED_COMPONENT_OFFSET = 0x0800;
        UNSCALED_COMPONENT_OFFSET = 0x1000;
    }
}

/// A glyph header plus its outline data.
#[derive(Clone, Copy, Debug)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    Composite(CompositeGlyph<'a>),
}

/// The fields shared by simple and composite glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphHeader {
    /// If the number of contours is greater than or equal to zero, this is
    /// a simple glyph; if negative, this is a composite glyph.
    pub number_of_contours: i16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl GlyphHeader {
    pub const LEN: usize = 10;

    fn read(cursor: &mut Cursor) -> Result<Self, ReadError> {
        Ok(GlyphHeader {
            number_of_contours: cursor.read()?,
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        })
    }
}

impl<'a> FontRead<'a> for Glyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let header = GlyphHeader::read(&mut cursor)?;
        if header.number_of_contours >= 0 {
            let end_pts_of_contours = cursor.read_array(header.number_of_contours as usize)?;
            let instruction_length: u16 = cursor.read()?;
            let instructions = cursor.read_bytes(instruction_length as usize)?;
            let glyph_data = cursor.remaining_bytes();
            Ok(Glyph::Simple(SimpleGlyph {
                data,
                header,
                end_pts_of_contours,
                instructions,
                glyph_data,
            }))
        } else {
            Ok(Glyph::Composite(CompositeGlyph {
                data,
                header,
                component_data: cursor.remaining_bytes(),
            }))
        }
    }
}

impl<'a> Glyph<'a> {
    pub fn header(&self) -> GlyphHeader {
        match self {
            Self::Simple(glyph) => glyph.header,
            Self::Composite(glyph) => glyph.header,
        }
    }

    pub fn number_of_contours(&self) -> i16 {
        self.header().number_of_contours
    }

    /// The raw bytes of the glyph, header included.
    pub fn offset_data(&self) -> FontData<'a> {
        match self {
            Self::Simple(glyph) => glyph.data,
            Self::Composite(glyph) => glyph.data,
        }
    }
}

/// A glyph made of contours.
#[derive(Clone, Copy, Debug)]
pub struct SimpleGlyph<'a> {
    data: FontData<'a>,
    header: GlyphHeader,
    end_pts_of_contours: ScalarArray<'a, u16>,
    instructions: &'a [u8],
    glyph_data: &'a [u8],
}

impl<'a> SimpleGlyph<'a> {
    pub fn header(&self) -> GlyphHeader {
        self.header
    }

    /// Array of point indices for the last point of each contour, in
    /// increasing numeric order.
    pub fn end_pts_of_contours(&self) -> ScalarArray<'a, u16> {
        self.end_pts_of_contours
    }

    pub fn instructions(&self) -> &'a [u8] {
        self.instructions
    }

    /// The packed flags and coordinates.
    pub fn glyph_data(&self) -> &'a [u8] {
        self.glyph_data
    }

    /// `true` for the single contour, end point `0xFFFF` encoding of an
    /// intentionally empty glyph.
    pub fn is_degenerate(&self) -> bool {
        self.end_pts_of_contours.len() == 1 && self.end_pts_of_contours.get(0) == Some(0xFFFF)
    }

    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        self.end_pts_of_contours
            .last()
            .map(|last| last as usize + 1)
            .unwrap_or(0)
    }

    /// Decodes the flags of every point, expanding repeats.
    pub fn flags(&self) -> Result<Vec<SimpleGlyphFlags>, ReadError> {
        let mut cursor = FontData::new(self.glyph_data).cursor();
        self.read_flags(&mut cursor)
    }

    /// Decodes all points, with their flags.
    pub fn points(&self) -> Result<Vec<CurvePoint>, ReadError> {
        let mut cursor = FontData::new(self.glyph_data).cursor();
        let flags = self.read_flags(&mut cursor)?;
        let xs = read_coords(
            &mut cursor,
            &flags,
            SimpleGlyphFlags::X_SHORT_VECTOR,
            SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
        )?;
        let ys = read_coords(
            &mut cursor,
            &flags,
            SimpleGlyphFlags::Y_SHORT_VECTOR,
            SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
        )?;
        Ok(flags
            .iter()
            .zip(xs.into_iter().zip(ys))
            .map(|(flag, (x, y))| {
                CurvePoint::new(x, y, flag.contains(SimpleGlyphFlags::ON_CURVE_POINT))
            })
            .collect())
    }

    fn read_flags(&self, cursor: &mut Cursor) -> Result<Vec<SimpleGlyphFlags>, ReadError> {
        let n_points = self.num_points();
        let mut flags = Vec::with_capacity(n_points);
        while flags.len() < n_points {
            let flag: SimpleGlyphFlags = cursor.read()?;
            let count = if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                cursor.read::<u8>()? as usize + 1
            } else {
                1
            };
            if count > n_points - flags.len() {
                return Err(ReadError::MalformedData("repeat count too large in glyf"));
            }
            flags.extend(std::iter::repeat_n(flag, count));
        }
        Ok(flags)
    }
}

// one pass over the deltas for a single axis
fn read_coords(
    cursor: &mut Cursor,
    flags: &[SimpleGlyphFlags],
    short: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
) -> Result<Vec<i16>, ReadError> {
    let mut value = 0i16;
    let mut coords = Vec::with_capacity(flags.len());
    for flag in flags {
        let delta = match (flag.contains(short), flag.contains(same_or_positive)) {
            (true, true) => cursor.read::<u8>()? as i16,
            (true, false) => -(cursor.read::<u8>()? as i16),
            (false, true) => 0,
            (false, false) => cursor.read::<i16>()?,
        };
        value = value.wrapping_add(delta);
        coords.push(value);
    }
    Ok(coords)
}

/// Point with an associated on-curve flag in a simple glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    /// X cooordinate.
    pub x: i16,
    /// Y cooordinate.
    pub y: i16,
    /// True if this is an on-curve point.
    pub on_curve: bool,
}

impl CurvePoint {
    /// Construct a new `CurvePoint`
    pub fn new(x: i16, y: i16, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Convenience method to construct an on-curve point
    pub fn on_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, true)
    }

    /// Convenience method to construct an off-curve point
    pub fn off_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, false)
    }
}

/// A glyph built from references to other glyphs.
#[derive(Clone, Copy, Debug)]
pub struct CompositeGlyph<'a> {
    data: FontData<'a>,
    header: GlyphHeader,
    component_data: &'a [u8],
}

/// Transform for a composite component.
///
/// Points are mapped as `x' = x * xx + y * xy`, `y' = x * yx + y * yy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    /// X scale factor.
    pub xx: F2Dot14,
    /// YX skew factor.
    pub yx: F2Dot14,
    /// XY skew factor.
    pub xy: F2Dot14,
    /// Y scale factor.
    pub yy: F2Dot14,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            xx: F2Dot14::ONE,
            yx: F2Dot14::default(),
            xy: F2Dot14::default(),
            yy: F2Dot14::ONE,
        }
    }
}

/// A reference to another glyph. Part of [CompositeGlyph].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    /// Component flags.
    pub flags: CompositeGlyphFlags,
    /// Glyph identifier.
    pub glyph: GlyphId,
    /// Anchor for component placement.
    pub anchor: Anchor,
    /// Component transformation matrix.
    pub transform: Transform,
    /// Offset of the glyph id, relative to the start of the glyph.
    pub glyph_offset: usize,
}

/// Anchor position for a composite component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Offset { x: i16, y: i16 },
    Point { base: u16, component: u16 },
}

impl<'a> CompositeGlyph<'a> {
    pub fn header(&self) -> GlyphHeader {
        self.header
    }

    pub fn component_data(&self) -> &'a [u8] {
        self.component_data
    }

    /// Returns an iterator over the components of the composite glyph.
    pub fn components(&self) -> impl Iterator<Item = Component> + 'a + Clone {
        self.iter()
    }

    /// Decodes every component, failing on truncated data.
    pub fn try_components(&self) -> Result<Vec<Component>, ReadError> {
        let mut iter = self.iter();
        let components = iter.by_ref().collect();
        if iter.failed {
            Err(ReadError::OutOfBounds)
        } else {
            Ok(components)
        }
    }

    /// Returns the TrueType interpreter instructions.
    pub fn instructions(&self) -> Option<&'a [u8]> {
        self.iter().instructions()
    }

    /// The length of the glyph's meaningful data: header, components and
    /// instructions. Anything after that is padding.
    pub fn data_len(&self) -> Result<usize, ReadError> {
        let mut iter = self.iter();
        while iter.next().is_some() {}
        if iter.failed {
            return Err(ReadError::OutOfBounds);
        }
        if iter
            .cur_flags
            .contains(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS)
        {
            let len = iter.cursor.read::<u16>()? as usize;
            iter.cursor.read_bytes(len)?;
        }
        Ok(GlyphHeader::LEN + iter.cursor.position()?)
    }

    fn iter(&self) -> ComponentIter<'a> {
        ComponentIter {
            cur_flags: CompositeGlyphFlags::empty(),
            done: false,
            failed: false,
            cursor: FontData::new(self.component_data).cursor(),
        }
    }
}

#[derive(Clone)]
struct ComponentIter<'a> {
    cur_flags: CompositeGlyphFlags,
    done: bool,
    failed: bool,
    cursor: Cursor<'a>,
}

impl<'a> ComponentIter<'a> {
    fn instructions(&mut self) -> Option<&'a [u8]> {
        while self.by_ref().next().is_some() {}
        if self
            .cur_flags
            .contains(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS)
        {
            let len = self.cursor.read::<u16>().ok()? as usize;
            self.cursor.read_bytes(len).ok()
        } else {
            None
        }
    }

    fn read_component(&mut self) -> Result<Component, ReadError> {
        let flags: CompositeGlyphFlags = self.cursor.read()?;
        self.cur_flags = flags;
        let glyph_offset = GlyphHeader::LEN + self.cursor.position()?;
        let glyph = self.cursor.read::<GlyphId>()?;
        let args_are_words = flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS);
        let args_are_xy_values = flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES);
        let anchor = match (args_are_xy_values, args_are_words) {
            (true, true) => Anchor::Offset {
                x: self.cursor.read()?,
                y: self.cursor.read()?,
            },
            (true, false) => Anchor::Offset {
                x: self.cursor.read::<i8>()? as _,
                y: self.cursor.read::<i8>()? as _,
            },
            (false, true) => Anchor::Point {
                base: self.cursor.read()?,
                component: self.cursor.read()?,
            },
            (false, false) => Anchor::Point {
                base: self.cursor.read::<u8>()? as _,
                component: self.cursor.read::<u8>()? as _,
            },
        };
        let mut transform = Transform::default();
        if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            transform.xx = self.cursor.read()?;
            transform.yy = transform.xx;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            transform.xx = self.cursor.read()?;
            transform.yy = self.cursor.read()?;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            transform.xx = self.cursor.read()?;
            transform.yx = self.cursor.read()?;
            transform.xy = self.cursor.read()?;
            transform.yy = self.cursor.read()?;
        }
        Ok(Component {
            flags,
            glyph,
            anchor,
            transform,
            glyph_offset,
        })
    }
}

impl Iterator for ComponentIter<'_> {
    type Item = Component;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_component() {
            Ok(component) => {
                self.done = !component
                    .flags
                    .contains(CompositeGlyphFlags::MORE_COMPONENTS);
                Some(component)
            }
            Err(_) => {
                self.done = true;
                self.failed = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::{bebuffer::BeBuffer, glyf as test_data};

    #[test]
    fn simple_glyph() {
        let glyph = Glyph::read(FontData::new(test_data::SQUARE)).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);
        let Glyph::Simple(simple) = glyph else {
            panic!("expected simple glyph");
        };
        assert_eq!(simple.end_pts_of_contours().iter().collect::<Vec<_>>(), [3]);
        assert_eq!(
            simple
                .points()
                .unwrap()
                .iter()
                .map(|pt| (pt.x, pt.y, pt.on_curve))
                .collect::<Vec<_>>(),
            &[
                (0, 0, true),
                (0, 100, true),
                (100, 100, true),
                (100, 0, true),
            ]
        );
    }

    #[test]
    fn signed_short_deltas() {
        let glyph = Glyph::read(FontData::new(test_data::ALTERNATING)).unwrap();
        let Glyph::Simple(simple) = glyph else {
            panic!("expected simple glyph");
        };
        let points = simple.points().unwrap();
        assert_eq!(
            points,
            [
                CurvePoint::on_curve(0, 0),
                CurvePoint::off_curve(50, 100),
                CurvePoint::on_curve(100, 0),
                CurvePoint::off_curve(50, -100),
            ]
        );
    }

    #[test]
    fn degenerate_single_contour() {
        let buf = BeBuffer::new()
            .extend([1i16, 0, 0, 0, 0])
            .push(0xFFFFu16)
            .push(0u16);
        let Glyph::Simple(simple) = Glyph::read(FontData::new(&buf)).unwrap() else {
            panic!("expected simple glyph");
        };
        assert!(simple.is_degenerate());
        assert_eq!(simple.num_points(), 0);
        assert!(simple.points().unwrap().is_empty());
    }

    #[test]
    fn repeat_overflow_is_an_error() {
        let buf = BeBuffer::new()
            .extend([1i16, 0, 0, 0, 0])
            .push(1u16)
            .push(0u16)
            .extend([0x09u8, 5]);
        let Glyph::Simple(simple) = Glyph::read(FontData::new(&buf)).unwrap() else {
            panic!("expected simple glyph");
        };
        assert!(matches!(simple.points(), Err(ReadError::MalformedData(_))));
    }

    #[test]
    fn composite_components() {
        let glyph = Glyph::read(FontData::new(test_data::COMPOSITE)).unwrap();
        let Glyph::Composite(composite) = glyph else {
            panic!("expected composite glyph");
        };
        let components = composite.try_components().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].glyph, GlyphId::new(1));
        assert_eq!(components[0].glyph_offset, 12);
        assert_eq!(components[0].anchor, Anchor::Offset { x: 0, y: 0 });
        assert_eq!(components[1].glyph, GlyphId::new(2));
        assert_eq!(components[1].anchor, Anchor::Offset { x: 200, y: -10 });
        assert_eq!(components[1].transform.xx, F2Dot14::from_f64(0.5));
        assert_eq!(components[1].transform.yy, F2Dot14::from_f64(0.5));
        assert_eq!(composite.instructions(), None);
        assert_eq!(composite.data_len().unwrap(), test_data::COMPOSITE.len());
    }

    #[test]
    fn composite_point_anchors_and_instructions() {
        let buf = BeBuffer::new()
            .extend([-1i16, 0, 0, 0, 0])
            // flags: WE_HAVE_INSTRUCTIONS | WE_HAVE_A_TWO_BY_TWO, byte args
            .push(0x0180u16)
            .push(5u16)
            .extend([3u8, 7])
            .extend([
                F2Dot14::ONE,
                F2Dot14::from_f64(0.25),
                F2Dot14::from_f64(-0.25),
                F2Dot14::ONE,
            ])
            .push(2u16)
            .extend([0xb0u8, 0x01])
            .extend([0u8, 0]); // padding
        let Glyph::Composite(composite) = Glyph::read(FontData::new(&buf)).unwrap() else {
            panic!("expected composite glyph");
        };
        let components = composite.try_components().unwrap();
        assert_eq!(
            components[0].anchor,
            Anchor::Point {
                base: 3,
                component: 7
            }
        );
        assert_eq!(components[0].transform.yx, F2Dot14::from_f64(0.25));
        assert_eq!(components[0].transform.xy, F2Dot14::from_f64(-0.25));
        assert_eq!(composite.instructions(), Some([0xb0u8, 0x01].as_slice()));
        assert_eq!(composite.data_len().unwrap(), buf.len() - 2);
    }

    #[test]
    fn truncated_composite() {
        let buf = BeBuffer::new()
            .extend([-1i16, 0, 0, 0, 0])
            .push(0x0021u16) // more components, word args
            .push(1u16)
            .push(0i16);
        let Glyph::Composite(composite) = Glyph::read(FontData::new(&buf)).unwrap() else {
            panic!("expected composite glyph");
        };
        assert!(composite.try_components().is_err());
        assert!(composite.data_len().is_err());
    }
}
