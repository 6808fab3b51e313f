use std::ops::Mul;

/// Glyph or font extents, in a y-up coordinate system.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    pub x_min: T,
    pub y_min: T,
    pub x_max: T,
    pub y_max: T,
}

impl<T> BoundingBox<T> {
    /// Converts each extent with `f`.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> BoundingBox<U> {
        BoundingBox {
            x_min: f(self.x_min),
            y_min: f(self.y_min),
            x_max: f(self.x_max),
            y_max: f(self.y_max),
        }
    }
}

impl<T: Mul<Output = T> + Copy> BoundingBox<T> {
    /// Multiplies every extent by `factor`, as when converting font units
    /// to a 1000 unit em.
    pub fn scale(&self, factor: T) -> Self {
        self.map(|extent| extent * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingBox;

    #[test]
    fn scale_to_thousand_units() {
        let head_bbox = BoundingBox {
            x_min: -512i16,
            y_min: -256,
            x_max: 2048,
            y_max: 1024,
        };
        let scaled = head_bbox.map(f32::from).scale(1000.0 / 2048.0);
        assert_eq!(
            scaled,
            BoundingBox {
                x_min: -250.0,
                y_min: -125.0,
                x_max: 1000.0,
                y_max: 500.0,
            }
        );
    }
}
