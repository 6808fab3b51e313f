//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use read::{tables::maxp::Maxp as ReadMaxp, TopLevelTable};
use types::{Fixed, Tag};

use crate::{FontWrite, TableWriter};

/// A version 1.0 maxp table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Maxp {
    pub num_glyphs: u16,
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}

impl Maxp {
    /// Copy the limits of an existing table, replacing the glyph count.
    ///
    /// Fields missing from a version 0.5 source are written as zero.
    pub fn from_existing(source: &ReadMaxp, num_glyphs: u16) -> Self {
        Maxp {
            num_glyphs,
            max_points: source.max_points().unwrap_or_default(),
            max_contours: source.max_contours().unwrap_or_default(),
            max_composite_points: source.max_composite_points().unwrap_or_default(),
            max_composite_contours: source.max_composite_contours().unwrap_or_default(),
            max_zones: source.max_zones().unwrap_or_default(),
            max_twilight_points: source.max_twilight_points().unwrap_or_default(),
            max_storage: source.max_storage().unwrap_or_default(),
            max_function_defs: source.max_function_defs().unwrap_or_default(),
            max_instruction_defs: source.max_instruction_defs().unwrap_or_default(),
            max_stack_elements: source.max_stack_elements().unwrap_or_default(),
            max_size_of_instructions: source.max_size_of_instructions().unwrap_or_default(),
            max_component_elements: source.max_component_elements().unwrap_or_default(),
            max_component_depth: source.max_component_depth().unwrap_or_default(),
        }
    }
}

impl TopLevelTable for Maxp {
    const TAG: Tag = Tag::new(b"maxp");
}

impl FontWrite for Maxp {
    fn write_into(&self, writer: &mut TableWriter) {
        Fixed::from_bits(0x0001_0000).write_into(writer);
        [
            self.num_glyphs,
            self.max_points,
            self.max_contours,
            self.max_composite_points,
            self.max_composite_contours,
            self.max_zones,
            self.max_twilight_points,
            self.max_storage,
            self.max_function_defs,
            self.max_instruction_defs,
            self.max_stack_elements,
            self.max_size_of_instructions,
            self.max_component_elements,
            self.max_component_depth,
        ]
        .write_into(writer);
    }
}

#[cfg(test)]
mod tests {
    use read::{FontData, FontRead};

    use super::*;

    #[test]
    fn upgrades_version_0_5() {
        let source = [0u8, 0, 0x50, 0, 0, 9];
        let source = ReadMaxp::read(FontData::new(&source)).unwrap();
        let maxp = Maxp::from_existing(&source, 3);
        let bytes = crate::dump_table(&maxp);
        assert_eq!(bytes.len(), ReadMaxp::V1_LEN);
        let written = ReadMaxp::read(FontData::new(&bytes)).unwrap();
        assert_eq!(written.num_glyphs(), 3);
        assert_eq!(written.max_component_depth(), Some(0));
    }
}
