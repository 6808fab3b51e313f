//! The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use read::{tables::hvmtx::LongMetric, TopLevelTable};
use types::Tag;

use crate::{FontWrite, TableWriter};

/// Horizontal metrics: one long metric per glyph up to `numberOfHMetrics`,
/// then bare left side bearings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hmtx {
    pub h_metrics: Vec<LongMetric>,
    pub left_side_bearings: Vec<i16>,
}

impl Hmtx {
    pub fn new(h_metrics: Vec<LongMetric>, left_side_bearings: Vec<i16>) -> Self {
        Hmtx {
            h_metrics,
            left_side_bearings,
        }
    }

    /// The value of `numberOfHMetrics` for the corresponding `hhea`.
    pub fn number_of_h_metrics(&self) -> u16 {
        self.h_metrics.len() as u16
    }
}

impl TopLevelTable for Hmtx {
    const TAG: Tag = Tag::new(b"hmtx");
}

impl FontWrite for LongMetric {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_scalar(*self)
    }
}

impl FontWrite for Hmtx {
    fn write_into(&self, writer: &mut TableWriter) {
        self.h_metrics.write_into(writer);
        self.left_side_bearings.write_into(writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_then_bearings() {
        let hmtx = Hmtx::new(
            vec![LongMetric {
                advance: 500,
                side_bearing: -10,
            }],
            vec![20, 30],
        );
        assert_eq!(hmtx.number_of_h_metrics(), 1);
        assert_eq!(
            crate::dump_table(&hmtx),
            [0x01, 0xf4, 0xff, 0xf6, 0, 20, 0, 30]
        );
    }
}
