//! impl subset() for hmtx and hhea

use sfnt_engine::Font;
use sfnt_read::tables::{
    hhea,
    hmtx::{Hmtx, TAG},
    hvhea::HVhea,
    hvmtx::LongMetric,
};
use sfnt_types::GlyphId;
use sfnt_write::{tables::hmtx::Hmtx as WriteHmtx, FontBuilder};

use crate::{Plan, Subset, SubsetError};

impl Subset for Hmtx<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        let hhea = font.hhea()?;
        let hmtx = subset_hmtx(self, plan, hhea.number_of_long_metrics())?;
        builder
            .add_raw(hhea::TAG, subset_hhea(&hhea, hmtx.number_of_h_metrics()))
            .add_table(&hmtx);
        Ok(())
    }
}

/// Copies the metrics of the retained glyphs.
///
/// Glyphs past `numberOfHMetrics` share the last long metric's advance. If
/// the glyph owning that metric is dropped while later glyphs are kept,
/// the first of them is promoted to a long metric carrying that advance.
fn subset_hmtx(hmtx: &Hmtx, plan: &Plan, num_long_metrics: u16) -> Result<WriteHmtx, SubsetError> {
    let last_long = num_long_metrics.checked_sub(1).map(GlyphId::new);
    let needs_last_advance = match (last_long, plan.old_gids().last()) {
        (Some(last_long), Some(last_gid)) => {
            last_gid > last_long && plan.new_gid(last_long).is_none()
        }
        _ => false,
    };
    let last_advance = last_long.and_then(|gid| hmtx.advance(gid));

    let mut h_metrics = Vec::new();
    let mut left_side_bearings = Vec::new();
    let mut promote = needs_last_advance;
    for gid in plan.old_gids() {
        let side_bearing = hmtx
            .side_bearing(gid)
            .ok_or(SubsetError::SubsetTableError(TAG))?;
        if gid.to_u16() < num_long_metrics {
            let advance = hmtx.advance(gid).ok_or(SubsetError::SubsetTableError(TAG))?;
            h_metrics.push(LongMetric {
                advance,
                side_bearing,
            });
        } else if promote {
            promote = false;
            h_metrics.push(LongMetric {
                advance: last_advance.ok_or(SubsetError::SubsetTableError(TAG))?,
                side_bearing,
            });
        } else {
            left_side_bearings.push(side_bearing);
        }
    }
    Ok(WriteHmtx::new(h_metrics, left_side_bearings))
}

/// Copies the table with a new `numberOfHMetrics`.
fn subset_hhea(hhea: &HVhea, number_of_h_metrics: u16) -> Vec<u8> {
    let mut out = hhea.offset_data().as_bytes()[..HVhea::LEN].to_vec();
    let offset = HVhea::NUMBER_OF_LONG_METRICS_OFFSET;
    out[offset..offset + 2].copy_from_slice(&number_of_h_metrics.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sfnt_test_data::{
        glyf,
        test_font::{TestFont, TestGlyph},
    };

    use super::*;

    /// Five glyphs with advances 100..=500, the last two sharing the
    /// advance of gid 2.
    fn mono_tail_font() -> Vec<u8> {
        let mut font = TestFont::new().number_of_h_metrics(3);
        for (gid, advance) in [100, 200, 300, 400, 500].into_iter().enumerate() {
            let mut glyph = TestGlyph::new(&format!("g{gid}"), glyf::SQUARE, advance);
            glyph.lsb = gid as i16 * 10;
            font = font.glyph(glyph);
        }
        font.build()
    }

    #[rstest]
    // the metric of gid 2 is kept, so is its advance
    #[case(&[1, 2, 4], &[(100, 0), (200, 10), (300, 20)], &[40])]
    // gid 4 takes over the advance of gid 2
    #[case(&[1, 3, 4], &[(100, 0), (200, 10), (300, 30)], &[40])]
    #[case(&[1], &[(100, 0), (200, 10)], &[])]
    fn number_of_h_metrics(
        #[case] selection: &[u16],
        #[case] long: &[(u16, i16)],
        #[case] short: &[i16],
    ) {
        let data = mono_tail_font();
        let font = Font::new(&data).unwrap();
        let selection: BTreeSet<_> = selection.iter().copied().map(GlyphId::new).collect();
        let plan = Plan::new(&font, &selection, &BTreeMap::new(), None, None).unwrap();
        let hmtx = subset_hmtx(&font.hmtx().unwrap(), &plan, 3).unwrap();
        let expected = long
            .iter()
            .map(|(advance, side_bearing)| LongMetric {
                advance: *advance,
                side_bearing: *side_bearing,
            })
            .collect::<Vec<_>>();
        assert_eq!(hmtx.h_metrics, expected);
        assert_eq!(hmtx.left_side_bearings, short);
    }

    #[test]
    fn hhea_gets_the_new_count() {
        let data = mono_tail_font();
        let font = Font::new(&data).unwrap();
        let out = subset_hhea(&font.hhea().unwrap(), 7);
        assert_eq!(out.len(), HVhea::LEN);
        assert_eq!(&out[34..], &[0, 7]);
        assert_eq!(&out[..34], &font.table_bytes(hhea::TAG).unwrap()[..34]);
    }
}
