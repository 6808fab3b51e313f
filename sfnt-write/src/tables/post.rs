//! The [post](https://docs.microsoft.com/en-us/typography/opentype/spec/post) table

use std::collections::HashMap;

use read::{
    tables::post::{standard_name_index, Post as ReadPost, DEFAULT_GLYPH_NAMES, VERSION_2_0},
    TopLevelTable,
};
use types::{Fixed, Tag};

use crate::{FontWrite, TableWriter};

/// A version 2.0 post table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Post {
    pub italic_angle: Fixed,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    glyph_name_index: Vec<u16>,
    string_data: Vec<String>,
}

impl Post {
    /// Copy the header of an existing table.
    pub fn from_existing(source: &ReadPost) -> Self {
        Post {
            italic_angle: source.italic_angle(),
            underline_position: source.underline_position(),
            underline_thickness: source.underline_thickness(),
            is_fixed_pitch: source.is_fixed_pitch(),
            min_mem_type42: source.min_mem_type42(),
            max_mem_type42: source.max_mem_type42(),
            min_mem_type1: source.min_mem_type1(),
            max_mem_type1: source.max_mem_type1(),
            ..Default::default()
        }
    }

    /// Set the glyph names for this table, in glyph order.
    ///
    /// Standard Macintosh names are stored as indices; every other name is
    /// stored once, in the order it is first seen.
    pub fn set_glyph_names<'a>(&mut self, order: impl IntoIterator<Item = &'a str>) {
        let mut custom: HashMap<&str, u16> = HashMap::new();
        self.glyph_name_index.clear();
        self.string_data.clear();
        for name in order {
            let index = match standard_name_index(name) {
                Some(index) => index,
                None => *custom.entry(name).or_insert_with(|| {
                    self.string_data.push(name.to_string());
                    (DEFAULT_GLYPH_NAMES.len() + self.string_data.len() - 1) as u16
                }),
            };
            self.glyph_name_index.push(index);
        }
    }

    pub fn glyph_name_index(&self) -> &[u16] {
        &self.glyph_name_index
    }
}

impl TopLevelTable for Post {
    const TAG: Tag = Tag::new(b"post");
}

impl FontWrite for Post {
    fn write_into(&self, writer: &mut TableWriter) {
        VERSION_2_0.write_into(writer);
        self.italic_angle.write_into(writer);
        self.underline_position.write_into(writer);
        self.underline_thickness.write_into(writer);
        self.is_fixed_pitch.write_into(writer);
        self.min_mem_type42.write_into(writer);
        self.max_mem_type42.write_into(writer);
        self.min_mem_type1.write_into(writer);
        self.max_mem_type1.write_into(writer);
        (self.glyph_name_index.len() as u16).write_into(writer);
        self.glyph_name_index.write_into(writer);
        for name in &self.string_data {
            // names are pascal strings, and so cannot exceed 255 bytes
            let bytes = &name.as_bytes()[..name.len().min(255)];
            (bytes.len() as u8).write_into(writer);
            writer.write_slice(bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use read::{FontData, FontRead};
    use types::GlyphId;

    use super::*;

    #[test]
    fn standard_and_custom_names() {
        let mut post = Post::default();
        post.underline_position = -75;
        post.set_glyph_names([".notdef", "A", "uni0431", "space", "uni0431", "f_f"]);
        assert_eq!(post.glyph_name_index(), &[0, 36, 258, 3, 258, 259]);

        let bytes = crate::dump_table(&post);
        let read = ReadPost::read(FontData::new(&bytes)).unwrap();
        assert_eq!(read.version(), VERSION_2_0);
        assert_eq!(read.underline_position(), -75);
        assert_eq!(read.glyph_name(GlyphId::new(2)), Some("uni0431"));
        assert_eq!(read.glyph_name(GlyphId::new(4)), Some("uni0431"));
        assert_eq!(read.glyph_name(GlyphId::new(5)), Some("f_f"));
    }
}
