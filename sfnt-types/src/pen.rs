/// Receives the segments of a glyph outline.
///
/// TrueType outlines only produce lines and quadratic curves, but a pen
/// also accepts cubics so it can be shared with other outline sources.
pub trait Pen {
    /// Starts a new contour at (x, y).
    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    /// Quadratic curve through the control point (cx0, cy0) to (x, y).
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32);

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32);

    /// Ends the current contour, returning to its start point.
    fn close(&mut self);
}
