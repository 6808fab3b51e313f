//! the [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post#header) table

use types::{Fixed, GlyphId, Tag};

use crate::{array::ScalarArray, FontData, FontRead, ReadError, TopLevelTable};

/// 'post'
pub const TAG: Tag = Tag::new(b"post");

pub const VERSION_1_0: Fixed = Fixed::from_bits(0x0001_0000);
pub const VERSION_2_0: Fixed = Fixed::from_bits(0x0002_0000);
pub const VERSION_2_5: Fixed = Fixed::from_bits(0x0002_5000);
pub const VERSION_3_0: Fixed = Fixed::from_bits(0x0003_0000);

/// The names of a version 2.0 or 2.5 table.
#[derive(Clone, Debug)]
enum GlyphNames<'a> {
    None,
    Standard,
    Indexed {
        glyph_name_index: ScalarArray<'a, u16>,
        names: Vec<PString<'a>>,
    },
    Offsets(&'a [u8]),
}

/// [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post#header) table
#[derive(Clone, Debug)]
pub struct Post<'a> {
    data: FontData<'a>,
    names: GlyphNames<'a>,
}

impl TopLevelTable for Post<'_> {
    const TAG: Tag = TAG;
}

impl<'a> FontRead<'a> for Post<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_len(Post::HEADER_LEN)?;
        let version: Fixed = data.read_at(0)?;
        let mut cursor = data.cursor();
        cursor.seek(Post::HEADER_LEN);
        let names = match version {
            VERSION_1_0 => GlyphNames::Standard,
            VERSION_2_0 => {
                let num_glyphs: u16 = cursor.read()?;
                let glyph_name_index = cursor.read_array(num_glyphs as usize)?;
                let mut names = Vec::new();
                let mut string_data = FontData::new(cursor.remaining_bytes());
                while !string_data.is_empty() {
                    let name = PString::read(string_data)?;
                    string_data = string_data
                        .split_off(name.len() + 1)
                        .unwrap_or_default();
                    names.push(name);
                }
                GlyphNames::Indexed {
                    glyph_name_index,
                    names,
                }
            }
            VERSION_2_5 => {
                let num_glyphs: u16 = cursor.read()?;
                GlyphNames::Offsets(cursor.read_bytes(num_glyphs as usize)?)
            }
            _ => GlyphNames::None,
        };
        Ok(Post { data, names })
    }
}

impl<'a> Post<'a> {
    /// The size of the fields shared by all versions.
    pub const HEADER_LEN: usize = 32;

    field!(version: Fixed = 0);
    field!(
        /// Italic angle in counter-clockwise degrees from the vertical.
        italic_angle: Fixed = 4
    );
    field!(underline_position: i16 = 8);
    field!(underline_thickness: i16 = 10);
    field!(
        /// Set to 0 if the font is proportionally spaced, non-zero if the
        /// font is not proportionally spaced (i.e. monospaced).
        is_fixed_pitch: u32 = 12
    );
    field!(min_mem_type42: u32 = 16);
    field!(max_mem_type42: u32 = 20);
    field!(min_mem_type1: u32 = 24);
    field!(max_mem_type1: u32 = 28);

    /// The number of glyph names covered by this table
    pub fn num_names(&self) -> usize {
        match &self.names {
            GlyphNames::Standard => DEFAULT_GLYPH_NAMES.len(),
            GlyphNames::Indexed {
                glyph_name_index, ..
            } => glyph_name_index.len(),
            GlyphNames::Offsets(offsets) => offsets.len(),
            GlyphNames::None => 0,
        }
    }

    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&'a str> {
        let glyph_id = glyph_id.to_u16() as usize;
        match &self.names {
            GlyphNames::Standard => DEFAULT_GLYPH_NAMES.get(glyph_id).copied(),
            GlyphNames::Indexed {
                glyph_name_index,
                names,
            } => {
                let idx = glyph_name_index.get(glyph_id)? as usize;
                if idx < DEFAULT_GLYPH_NAMES.len() {
                    return DEFAULT_GLYPH_NAMES.get(idx).copied();
                }
                names
                    .get(idx - DEFAULT_GLYPH_NAMES.len())
                    .map(|name| name.as_str())
            }
            GlyphNames::Offsets(offsets) => {
                let offset = *offsets.get(glyph_id)? as i8;
                let idx = (glyph_id as isize).checked_add(offset as isize)?;
                DEFAULT_GLYPH_NAMES.get(usize::try_from(idx).ok()?).copied()
            }
            GlyphNames::None => None,
        }
    }

    /// Names for every glyph, where known.
    pub fn glyph_names(&self) -> impl Iterator<Item = (GlyphId, &'a str)> + '_ {
        (0..self.num_names()).filter_map(|gid| {
            let gid = GlyphId::new(u16::try_from(gid).ok()?);
            Some((gid, self.glyph_name(gid)?))
        })
    }

    /// The raw bytes of the table.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// A string in the post table.
///
/// This is basically just a newtype that knows how to parse from a Pascal-style
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PString<'a>(&'a str);

impl<'a> PString<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl std::ops::Deref for PString<'_> {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl PartialEq<&str> for PString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'a> FontRead<'a> for PString<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let len: u8 = data.read_at(0)?;
        let pstring = data
            .as_bytes()
            .get(1..len as usize + 1)
            .ok_or(ReadError::OutOfBounds)?;
        if pstring.is_ascii() {
            std::str::from_utf8(pstring)
                .map(PString)
                .map_err(|_| ReadError::MalformedData("Must be valid ascii"))
        } else {
            Err(ReadError::MalformedData("Must be valid ascii"))
        }
    }
}

/// The 258 glyph names defined for Macintosh TrueType fonts
#[rustfmt::skip]
pub static DEFAULT_GLYPH_NAMES: [&str; 258] = [
    ".notdef", ".null", "nonmarkingreturn", "space", "exclam", "quotedbl", "numbersign", "dollar",
    "percent", "ampersand", "quotesingle", "parenleft", "parenright", "asterisk", "plus", "comma",
    "hyphen", "period", "slash", "zero", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "colon", "semicolon", "less", "equal", "greater", "question", "at", "A", "B",
    "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U",
    "V", "W", "X", "Y", "Z", "bracketleft", "backslash", "bracketright", "asciicircum",
    "underscore", "grave", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n",
    "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "braceleft", "bar", "braceright",
    "asciitilde", "Adieresis", "Aring", "Ccedilla", "Eacute", "Ntilde", "Odieresis", "Udieresis",
    "aacute", "agrave", "acircumflex", "adieresis", "atilde", "aring", "ccedilla", "eacute",
    "egrave", "ecircumflex", "edieresis", "iacute", "igrave", "icircumflex", "idieresis", "ntilde",
    "oacute", "ograve", "ocircumflex", "odieresis", "otilde", "uacute", "ugrave", "ucircumflex",
    "udieresis", "dagger", "degree", "cent", "sterling", "section", "bullet", "paragraph",
    "germandbls", "registered", "copyright", "trademark", "acute", "dieresis", "notequal", "AE",
    "Oslash", "infinity", "plusminus", "lessequal", "greaterequal", "yen", "mu", "partialdiff",
    "summation", "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega", "ae",
    "oslash", "questiondown", "exclamdown", "logicalnot", "radical", "florin", "approxequal",
    "Delta", "guillemotleft", "guillemotright", "ellipsis", "nonbreakingspace", "Agrave", "Atilde",
    "Otilde", "OE", "oe", "endash", "emdash", "quotedblleft", "quotedblright", "quoteleft",
    "quoteright", "divide", "lozenge", "ydieresis", "Ydieresis", "fraction", "currency",
    "guilsinglleft", "guilsinglright", "fi", "fl", "daggerdbl", "periodcentered", "quotesinglbase",
    "quotedblbase", "perthousand", "Acircumflex", "Ecircumflex", "Aacute", "Edieresis", "Egrave",
    "Iacute", "Icircumflex", "Idieresis", "Igrave", "Oacute", "Ocircumflex", "apple", "Ograve",
    "Uacute", "Ucircumflex", "Ugrave", "dotlessi", "circumflex", "tilde", "macron", "breve",
    "dotaccent", "ring", "cedilla", "hungarumlaut", "ogonek", "caron", "Lslash", "lslash",
    "Scaron", "scaron", "Zcaron", "zcaron", "brokenbar", "Eth", "eth", "Yacute", "yacute", "Thorn",
    "thorn", "minus", "multiply", "onesuperior", "twosuperior", "threesuperior", "onehalf",
    "onequarter", "threequarters", "franc", "Gbreve", "gbreve", "Idotaccent", "Scedilla",
    "scedilla", "Cacute", "cacute", "Ccaron", "ccaron", "dcroat",
];

/// Returns the index of `name` in the standard Macintosh glyph order.
pub fn standard_name_index(name: &str) -> Option<u16> {
    DEFAULT_GLYPH_NAMES
        .iter()
        .position(|standard| *standard == name)
        .map(|ix| ix as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::post as test_data;

    #[test]
    fn test_post() {
        let table = Post::read(test_data::SIMPLE.into()).unwrap();
        assert_eq!(table.version(), VERSION_2_0);
        assert_eq!(table.underline_position(), -75);
        assert_eq!(table.glyph_name(GlyphId::new(1)), Some(".notdef"));
        assert_eq!(table.glyph_name(GlyphId::new(2)), Some("space"));
        assert_eq!(table.glyph_name(GlyphId::new(7)), Some("hello"));
        assert_eq!(table.glyph_name(GlyphId::new(8)), Some("hi"));
        assert_eq!(table.glyph_name(GlyphId::new(9)), Some("hola"));
        assert_eq!(table.glyph_name(GlyphId::new(10)), None);
        assert_eq!(table.num_names(), 10);
    }

    #[test]
    fn version_1_and_3() {
        let mut data = test_data::SIMPLE[..32].to_vec();
        data[..4].copy_from_slice(&[0, 1, 0, 0]);
        let table = Post::read(FontData::new(&data)).unwrap();
        assert_eq!(table.glyph_name(GlyphId::new(36)), Some("A"));
        assert_eq!(table.num_names(), 258);

        data[..4].copy_from_slice(&[0, 3, 0, 0]);
        let table = Post::read(FontData::new(&data)).unwrap();
        assert_eq!(table.glyph_name(GlyphId::new(1)), None);
        assert_eq!(table.num_names(), 0);
    }

    #[test]
    fn version_2_5_offsets() {
        let mut data = test_data::SIMPLE[..32].to_vec();
        data[..4].copy_from_slice(&[0, 2, 0x50, 0]);
        // glyph 0 -> .notdef, glyph 1 -> 'A' (36)
        data.extend([0, 2, 0, 35]);
        let table = Post::read(FontData::new(&data)).unwrap();
        assert_eq!(table.glyph_name(GlyphId::new(0)), Some(".notdef"));
        assert_eq!(table.glyph_name(GlyphId::new(1)), Some("A"));
    }

    #[test]
    fn standard_names() {
        assert_eq!(standard_name_index(".notdef"), Some(0));
        assert_eq!(standard_name_index("dcroat"), Some(257));
        assert_eq!(standard_name_index("hello"), None);
    }
}
