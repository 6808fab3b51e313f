//! Decoded TrueType glyph outlines.
//!
//! A [`GlyphData`] is the flat point representation of a glyph: simple
//! glyphs are decoded as-is, while composite glyphs are resolved by loading
//! every component (recursively), transforming its points and appending
//! them in component order.

use std::ops::{Deref, DerefMut};

use sfnt_read::tables::{
    glyf::{self, Anchor, Glyf, Glyph, SimpleGlyphFlags, Transform},
    hmtx::Hmtx,
    loca::Loca,
};
use sfnt_types::{BoundingBox, GlyphId, Point};

use crate::error::{FontError, ReadResultExt};

/// Composites nested deeper than this are rejected.
pub const COMPOSITE_DEPTH_LIMIT: usize = 64;

/// A component of a composite glyph, after resolution.
///
/// `first_point` and `first_contour` locate the component's points and
/// contours in the owning [`GlyphData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedComponent {
    pub glyph: GlyphId,
    pub first_point: usize,
    pub point_count: usize,
    pub first_contour: usize,
    pub contour_count: usize,
    pub transform: Transform,
    pub anchor: Anchor,
}

impl ResolvedComponent {
    /// The translation applied after the transform.
    ///
    /// Point matching anchors are decoded but do not move the component.
    pub fn offset(&self) -> Point<i16> {
        match self.anchor {
            Anchor::Offset { x, y } => Point::new(x, y),
            Anchor::Point { .. } => Point::default(),
        }
    }
}

/// The points, flags and contours of one glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphData {
    gid: GlyphId,
    bounds: BoundingBox<i16>,
    points: Vec<Point<i16>>,
    flags: Vec<SimpleGlyphFlags>,
    end_points: Vec<u16>,
    components: Vec<ResolvedComponent>,
    is_composite: bool,
}

impl GlyphData {
    /// The glyph this data was loaded for.
    pub fn glyph_id(&self) -> GlyphId {
        self.gid
    }

    /// The bounding box stored in the glyph header.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    pub fn is_composite(&self) -> bool {
        self.is_composite
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn contour_count(&self) -> usize {
        self.end_points.len()
    }

    /// Index of the last point of the contour at `contour`.
    pub fn end_of_contour(&self, contour: usize) -> Option<u16> {
        self.end_points.get(contour).copied()
    }

    pub fn flags(&self, point: usize) -> Option<SimpleGlyphFlags> {
        self.flags.get(point).copied()
    }

    pub fn x(&self, point: usize) -> Option<i16> {
        self.points.get(point).map(|p| p.x)
    }

    pub fn y(&self, point: usize) -> Option<i16> {
        self.points.get(point).map(|p| p.y)
    }

    /// `true` if the point at this index lies on the curve.
    pub fn is_on_curve(&self, point: usize) -> bool {
        self.flags(point)
            .is_some_and(|flags| flags.contains(SimpleGlyphFlags::ON_CURVE_POINT))
    }

    /// `true` if the point is the last of its contour.
    pub fn is_end_of_contour(&self, point: usize) -> bool {
        self.end_points.binary_search(&(point as u16)).is_ok()
    }

    pub fn points(&self) -> &[Point<i16>] {
        &self.points
    }

    pub fn end_points(&self) -> &[u16] {
        &self.end_points
    }

    /// The components of a composite glyph, empty for simple glyphs.
    pub fn components(&self) -> &[ResolvedComponent] {
        &self.components
    }

    /// The component that owns the point at `point`.
    pub fn component_for_point(&self, point: usize) -> Option<&ResolvedComponent> {
        self.components
            .iter()
            .find(|c| (c.first_point..c.first_point + c.point_count).contains(&point))
    }

    /// The component that owns the contour at `contour`.
    pub fn component_for_contour(&self, contour: usize) -> Option<&ResolvedComponent> {
        self.components
            .iter()
            .find(|c| (c.first_contour..c.first_contour + c.contour_count).contains(&contour))
    }

    fn empty(gid: GlyphId) -> Self {
        GlyphData {
            gid,
            ..Default::default()
        }
    }

    /// Appends the points of a resolved component.
    ///
    /// Fails if the contour end points of the result no longer fit in 16
    /// bits.
    fn append(
        &mut self,
        child: &GlyphData,
        transform: &Transform,
        offset: Point<i16>,
    ) -> Result<(), FontError> {
        let too_many_points = || FontError::MalformedFont {
            tag: glyf::TAG,
            reason: format!("composite {} has more than 65536 points", self.gid),
        };
        let base = u16::try_from(self.points.len()).map_err(|_| too_many_points())?;
        let end_points = child
            .end_points
            .iter()
            .map(|end| end.checked_add(base))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(too_many_points)?;
        let [a, b, c, d] = [
            transform.xx.to_f32(),
            transform.yx.to_f32(),
            transform.xy.to_f32(),
            transform.yy.to_f32(),
        ];
        self.points.extend(child.points.iter().map(|p| {
            let (x, y) = (p.x as f32, p.y as f32);
            Point::new(
                ((x * a + y * c).round() as i16).wrapping_add(offset.x),
                ((x * b + y * d).round() as i16).wrapping_add(offset.y),
            )
        }));
        self.flags.extend_from_slice(&child.flags);
        self.end_points.extend(end_points);
        Ok(())
    }
}

/// Loads glyphs from a `loca` and `glyf` pair.
pub(crate) struct GlyphLoader<'a, 'b> {
    pub loca: &'b Loca<'a>,
    pub glyf: &'b Glyf<'a>,
    /// Optional, to shift simple glyphs by their side bearing.
    pub hmtx: Option<&'b Hmtx<'a>>,
}

impl GlyphLoader<'_, '_> {
    pub fn load(&self, gid: GlyphId) -> Result<GlyphData, FontError> {
        self.load_impl(gid, &mut ResolveStack::default())
    }

    fn load_impl(&self, gid: GlyphId, stack: &mut ResolveStack) -> Result<GlyphData, FontError> {
        let mut stack = stack.enter(gid)?;
        let Some(glyph) = self.loca.get_glyf(gid, self.glyf).in_glyph(glyf::TAG, gid)? else {
            return Ok(GlyphData::empty(gid));
        };
        let header = glyph.header();
        let bounds = BoundingBox {
            x_min: header.x_min,
            y_min: header.y_min,
            x_max: header.x_max,
            y_max: header.y_max,
        };
        match glyph {
            Glyph::Simple(simple) => {
                if simple.is_degenerate() {
                    return Ok(GlyphData {
                        bounds,
                        ..GlyphData::empty(gid)
                    });
                }
                let x_shift = self
                    .hmtx
                    .and_then(|hmtx| hmtx.side_bearing(gid))
                    .map(|lsb| lsb.wrapping_sub(header.x_min))
                    .unwrap_or_default();
                let points = simple.points().in_glyph(glyf::TAG, gid)?;
                let end_points = simple.end_pts_of_contours().iter().collect::<Vec<_>>();
                if end_points.windows(2).any(|pair| pair[1] < pair[0]) {
                    return Err(FontError::MalformedFont {
                        tag: glyf::TAG,
                        reason: format!("contour end points of {gid} are not ascending"),
                    });
                }
                Ok(GlyphData {
                    gid,
                    bounds,
                    points: points
                        .iter()
                        .map(|p| Point::new(p.x.wrapping_add(x_shift), p.y))
                        .collect(),
                    flags: simple.flags().in_glyph(glyf::TAG, gid)?,
                    end_points,
                    components: Vec::new(),
                    is_composite: false,
                })
            }
            Glyph::Composite(composite) => {
                let mut data = GlyphData {
                    bounds,
                    is_composite: true,
                    ..GlyphData::empty(gid)
                };
                for component in composite.try_components().in_glyph(glyf::TAG, gid)? {
                    let child = self.load_impl(component.glyph, &mut stack)?;
                    let resolved = ResolvedComponent {
                        glyph: component.glyph,
                        first_point: data.point_count(),
                        point_count: child.point_count(),
                        first_contour: data.contour_count(),
                        contour_count: child.contour_count(),
                        transform: component.transform,
                        anchor: component.anchor,
                    };
                    data.append(&child, &resolved.transform, resolved.offset())?;
                    data.components.push(resolved);
                }
                Ok(data)
            }
        }
    }
}

/// The chain of glyphs being resolved.
///
/// Entering a glyph that is already on the chain is a cycle.
#[derive(Default)]
struct ResolveStack {
    glyphs: Vec<GlyphId>,
}

impl ResolveStack {
    fn enter(&mut self, gid: GlyphId) -> Result<ResolveGuard<'_>, FontError> {
        if self.glyphs.contains(&gid) {
            return Err(FontError::CircularReference(gid));
        }
        if self.glyphs.len() >= COMPOSITE_DEPTH_LIMIT {
            return Err(FontError::MalformedFont {
                tag: glyf::TAG,
                reason: format!("composite {gid} is nested too deeply"),
            });
        }
        self.glyphs.push(gid);
        Ok(ResolveGuard { stack: self })
    }
}

/// Leaves the glyph when dropped.
struct ResolveGuard<'a> {
    stack: &'a mut ResolveStack,
}

impl Deref for ResolveGuard<'_> {
    type Target = ResolveStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for ResolveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for ResolveGuard<'_> {
    fn drop(&mut self) {
        self.stack.glyphs.pop();
    }
}
