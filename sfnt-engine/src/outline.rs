//! Conversion of quadratic TrueType contours to paths.

use kurbo::BezPath;
use sfnt_types::{Pen, Point};

use crate::glyph::GlyphData;

/// Emits the contours of `glyph` to `pen`.
///
/// Each contour starts at its first on-curve point. If the first point is
/// off-curve the contour starts at the last point when that is on-curve,
/// and otherwise at the implied midpoint of the first and last points.
/// Every contour ends with an explicit segment back to its start, followed
/// by `close`.
pub fn draw(glyph: &GlyphData, pen: &mut impl Pen) {
    let mut start = 0;
    for &end in glyph.end_points() {
        let end = end as usize;
        if end < start || end >= glyph.point_count() {
            log::warn!(
                "contour end point {end} out of order in {}",
                glyph.glyph_id()
            );
            return;
        }
        let contour = (start..=end).map(|ix| ContourPoint {
            point: glyph.points()[ix].map(f32::from),
            on_curve: glyph.is_on_curve(ix),
        });
        draw_contour(contour.collect::<Vec<_>>().as_slice(), pen);
        start = end + 1;
    }
}

/// Builds a path for `glyph`.
pub fn to_bez_path(glyph: &GlyphData) -> BezPath {
    let mut pen = BezPathPen::default();
    draw(glyph, &mut pen);
    pen.0
}

#[derive(Copy, Clone, Debug)]
struct ContourPoint {
    point: Point<f32>,
    on_curve: bool,
}

impl ContourPoint {
    fn midpoint(&self, other: ContourPoint) -> ContourPoint {
        ContourPoint {
            point: self.point.midpoint(other.point),
            on_curve: true,
        }
    }
}

fn draw_contour(points: &[ContourPoint], pen: &mut impl Pen) {
    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return;
    };
    // the remaining points, in drawing order
    let (start, rest) = if first.on_curve {
        (first, &points[1..])
    } else if last.on_curve {
        (last, &points[..points.len() - 1])
    } else {
        (last.midpoint(first), points)
    };
    pen.move_to(start.point.x, start.point.y);
    let mut pending = None;
    for point in rest.iter().copied().chain(std::iter::once(start)) {
        pending = emit(pending, point, pen);
    }
    pen.close();
}

/// Emits the segment ending at `point`, if any, and returns the new pending
/// off-curve point.
fn emit(
    pending: Option<ContourPoint>,
    point: ContourPoint,
    pen: &mut impl Pen,
) -> Option<ContourPoint> {
    match (pending, point.on_curve) {
        (None, true) => {
            pen.line_to(point.point.x, point.point.y);
            None
        }
        (None, false) => Some(point),
        (Some(control), true) => {
            pen.quad_to(
                control.point.x,
                control.point.y,
                point.point.x,
                point.point.y,
            );
            None
        }
        (Some(control), false) => {
            let mid = control.midpoint(point);
            pen.quad_to(control.point.x, control.point.y, mid.point.x, mid.point.y);
            Some(point)
        }
    }
}

/// A [`Pen`] that accumulates a kurbo [`BezPath`].
#[derive(Clone, Debug, Default)]
pub struct BezPathPen(pub BezPath);

impl BezPathPen {
    pub fn into_inner(self) -> BezPath {
        self.0
    }
}

impl Pen for BezPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0
            .quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}
