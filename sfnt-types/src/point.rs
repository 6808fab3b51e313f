use std::ops::Add;

/// A point in font units, or in scaled coordinates once mapped to a float.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Converts both coordinates with `f`.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Point<U> {
        Point::new(f(self.x), f(self.y))
    }
}

impl Point<f32> {
    /// The implied on-curve point between two off-curve points.
    pub fn midpoint(self, other: Self) -> Self {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn implied_on_curve_point() {
        let a = Point::new(10i16, 20).map(f32::from);
        let b = Point::new(30.0f32, -20.0);
        assert_eq!(a.midpoint(b), Point::new(20.0, 0.0));
        assert_eq!(a + b, Point::new(40.0, 0.0));
    }
}
