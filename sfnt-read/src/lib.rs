//! Reading sfnt font files
//!
//! This crate provides memory safe, zero-copy parsing of TrueType (sfnt)
//! font files and TrueType collections. It is unopinionated, and provides
//! raw access to the underlying tables as they are laid out on disk.
//!
//! For a queryable font with outlines, metrics and character mapping, see
//! the `sfnt-engine` crate.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use sfnt_read::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! // Single fonts only. for font collections (.ttc) use FontRef::from_index
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let head = font.head().expect("missing 'head' table");
//! let maxp = font.maxp().expect("missing 'maxp' table");
//!
//! println!("font revision {} containing {} glyphs", head.font_revision(), maxp.num_glyphs());
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod array;
mod font_data;
mod read;
mod table_provider;
pub mod tables;
pub mod text;

pub use font_data::{Cursor, FontData};
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table_provider::{TableProvider, TopLevelTable};

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;

use array::ScalarArray;
use types::{
    Scalar, Tag, APPLE_TRUE_SFNT_VERSION, CFF_SFNT_VERSION, TTC_HEADER_TAG, TT_SFNT_VERSION,
};

/// An entry in the [table directory].
///
/// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: Tag,
    /// Checksum for the table.
    pub checksum: u32,
    /// Offset from the beginning of the font data.
    pub offset: u32,
    /// Length of the table.
    pub length: u32,
}

impl TableRecord {
    pub const RAW_BYTE_LEN: usize = 16;

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// `true` if the table lies entirely within `data_len` bytes.
    pub fn is_in_bounds(&self, data_len: usize) -> bool {
        (self.offset as usize)
            .checked_add(self.length as usize)
            .is_some_and(|end| end <= data_len)
    }
}

impl Scalar for TableRecord {
    type Raw = [u8; 16];

    fn from_raw(raw: [u8; 16]) -> Self {
        let word = |i: usize| [raw[i], raw[i + 1], raw[i + 2], raw[i + 3]];
        TableRecord {
            tag: Tag::new(&word(0)),
            checksum: u32::from_be_bytes(word(4)),
            offset: u32::from_be_bytes(word(8)),
            length: u32::from_be_bytes(word(12)),
        }
    }

    fn to_raw(self) -> [u8; 16] {
        let mut raw = [0u8; 16];
        raw[..4].copy_from_slice(&self.tag.to_be_bytes());
        raw[4..8].copy_from_slice(&self.checksum.to_be_bytes());
        raw[8..12].copy_from_slice(&self.offset.to_be_bytes());
        raw[12..].copy_from_slice(&self.length.to_be_bytes());
        raw
    }
}

/// The [table directory] at the start of every sfnt.
///
/// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Clone, Debug)]
pub struct TableDirectory<'a> {
    sfnt_version: u32,
    num_tables: u16,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    table_records: ScalarArray<'a, TableRecord>,
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }
}

impl<'a> TableDirectory<'a> {
    /// The 4-byte version tag: `0x00010000`, `OTTO` or `true`.
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    pub fn table_records(&self) -> ScalarArray<'a, TableRecord> {
        self.table_records
    }

    /// `true` if the binary search parameters agree with the table count.
    ///
    /// Readers don't rely on these values, so a mismatch is only worth a
    /// diagnostic.
    pub fn has_valid_search_params(&self) -> bool {
        let num_tables = self.num_tables as u32;
        if num_tables == 0 {
            return true;
        }
        let entry_selector = num_tables.ilog2();
        let search_range = (1u32 << entry_selector) * 16;
        let range_shift = num_tables * 16 - search_range;
        self.search_range as u32 == search_range
            && self.entry_selector as u32 == entry_selector
            && self.range_shift as u32 == range_shift
    }

    fn is_sorted(&self) -> bool {
        let mut last_tag = Tag::new(&[0u8; 4]);

        for tag in self.table_records.iter().map(|rec| rec.tag()) {
            if tag <= last_tag {
                return false;
            }

            last_tag = tag;
        }

        true
    }
}

/// The [header] of a TrueType collection file.
///
/// [header]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header
#[derive(Clone, Debug)]
pub struct TTCHeader<'a> {
    ttc_tag: Tag,
    major_version: u16,
    minor_version: u16,
    table_directory_offsets: ScalarArray<'a, u32>,
    dsig: Option<(Tag, u32, u32)>,
}

impl<'a> FontRead<'a> for TTCHeader<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let ttc_tag = cursor.read_tag()?;
        let major_version = cursor.read()?;
        let minor_version = cursor.read()?;
        let num_fonts: u32 = cursor.read()?;
        let table_directory_offsets = cursor.read_array(num_fonts as usize)?;
        let dsig = if major_version >= 2 {
            Some((cursor.read_tag()?, cursor.read()?, cursor.read()?))
        } else {
            None
        };
        Ok(TTCHeader {
            ttc_tag,
            major_version,
            minor_version,
            table_directory_offsets,
            dsig,
        })
    }
}

impl<'a> TTCHeader<'a> {
    pub fn ttc_tag(&self) -> Tag {
        self.ttc_tag
    }

    pub fn major_version(&self) -> u16 {
        self.major_version
    }

    pub fn minor_version(&self) -> u16 {
        self.minor_version
    }

    pub fn num_fonts(&self) -> u32 {
        self.table_directory_offsets.len() as u32
    }

    pub fn table_directory_offsets(&self) -> ScalarArray<'a, u32> {
        self.table_directory_offsets
    }

    /// The tag of the `DSIG` table; version 2.0 headers only.
    pub fn dsig_tag(&self) -> Option<Tag> {
        self.dsig.map(|(tag, _, _)| tag)
    }

    pub fn dsig_length(&self) -> Option<u32> {
        self.dsig.map(|(_, len, _)| len)
    }

    pub fn dsig_offset(&self) -> Option<u32> {
        self.dsig.map(|(_, _, offset)| offset)
    }
}

#[derive(Clone)]
/// Reference to the content of a font or font collection file.
pub enum FileRef<'a> {
    /// A single font.
    Font(FontRef<'a>),
    /// A collection of fonts.
    Collection(CollectionRef<'a>),
}

impl<'a> FileRef<'a> {
    /// Creates a new reference to a file representing a font or font collection.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Ok(if let Ok(collection) = CollectionRef::new(data) {
            Self::Collection(collection)
        } else {
            Self::Font(FontRef::new(data)?)
        })
    }

    /// Returns an iterator over the fonts contained in the file.
    pub fn fonts(&self) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let (iter_one, iter_two) = match self {
            Self::Font(font) => (Some(Ok(font.clone())), None),
            Self::Collection(collection) => (None, Some(collection.iter())),
        };
        iter_two.into_iter().flatten().chain(iter_one)
    }
}

/// Reference to the content of a font collection file.
#[derive(Clone)]
pub struct CollectionRef<'a> {
    data: FontData<'a>,
    header: TTCHeader<'a>,
}

impl<'a> CollectionRef<'a> {
    /// Creates a new reference to a font collection.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let tag: Tag = data.read_at(0)?;
        if tag != TTC_HEADER_TAG {
            return Err(ReadError::InvalidTtc(tag));
        }
        let header = TTCHeader::read(data)?;
        Ok(Self { data, header })
    }

    pub fn header(&self) -> &TTCHeader<'a> {
        &self.header
    }

    /// Returns the number of fonts in the collection.
    pub fn len(&self) -> u32 {
        self.header.num_fonts()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the font in the collection at the specified index.
    pub fn get(&self, index: u32) -> Result<FontRef<'a>, ReadError> {
        let offset = self
            .header
            .table_directory_offsets()
            .get(index as usize)
            .ok_or(ReadError::InvalidCollectionIndex(index))? as usize;
        let table_dir_data = self.data.slice(offset..).ok_or(ReadError::OutOfBounds)?;
        FontRef::with_table_directory(
            self.data,
            TableDirectory::read(table_dir_data)?,
            Some(index),
        )
    }

    /// Returns an iterator over the fonts in the collection.
    pub fn iter(&self) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let copy = self.clone();
        (0..self.len()).map(move |ix| copy.get(ix))
    }
}

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data. Fonts from a collection all
/// borrow the collection's full buffer; table offsets are relative to it.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    pub table_directory: TableDirectory<'a>,
    /// The index of this font in a TrueType collection
    ttc_index: u32,
    /// Whether this font is a member of a TrueType collection.
    in_ttc: bool,
    // Fonts are required to have a sorted table directory, but not all do;
    // we only binary search when they are.
    table_directory_sorted: bool,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must be a single font (not a font collection) and must begin
    /// with a table directory to be considered valid.
    ///
    /// To load a font from a font collection, use [`FontRef::from_index`] instead.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        Self::with_table_directory(data, TableDirectory::read(data)?, None)
    }

    /// Creates a new reference to an in-memory font at the specified index
    /// backed by the given data.
    ///
    /// This accepts either font collection (ttc) or single font (ttf) files.
    /// If a single font file is provided, the index parameter must be 0.
    pub fn from_index(data: &'a [u8], index: u32) -> Result<Self, ReadError> {
        let file = FileRef::new(data)?;
        match file {
            FileRef::Font(font) => {
                if index == 0 {
                    Ok(font)
                } else {
                    Err(ReadError::InvalidCollectionIndex(index))
                }
            }
            FileRef::Collection(collection) => collection.get(index),
        }
    }

    /// Returns the underlying font data.
    ///
    /// This is the base from which tables are loaded, meaning that for
    /// TrueType collection files, this will be the entire font file data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// If the font is in a TrueType collection (ttc) file, returns the index
    /// of the font in that collection.
    pub fn ttc_index(&self) -> Option<u32> {
        self.in_ttc.then_some(self.ttc_index)
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// `true` if this font has PostScript (CFF) rather than TrueType outlines.
    pub fn is_cff(&self) -> bool {
        self.table_directory.sfnt_version() == CFF_SFNT_VERSION
    }

    /// Returns the record for the table with the specified tag, if present.
    pub fn table_record(&self, tag: Tag) -> Option<TableRecord> {
        let records = self.table_directory.table_records();
        let entry = if self.table_directory_sorted {
            records.binary_search_by(|rec| rec.tag.cmp(&tag)).ok()
        } else {
            records.iter().position(|rec| rec.tag.eq(&tag))
        };
        entry.and_then(|idx| records.get(idx))
    }

    /// Returns the data for the table with the specified tag, if present.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_record(tag).and_then(|record| {
            let start = record.offset() as usize;
            let len = record.length() as usize;
            self.data.slice(start..start.checked_add(len)?)
        })
    }

    /// Returns an iterator over all of the available fonts in
    /// the given font data.
    pub fn fonts(
        data: &'a [u8],
    ) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let count = match FileRef::new(data) {
            Ok(FileRef::Font(_)) => 1,
            Ok(FileRef::Collection(ttc)) => ttc.len(),
            _ => 0,
        };
        (0..count).map(move |idx| FontRef::from_index(data, idx))
    }

    fn with_table_directory(
        data: FontData<'a>,
        table_directory: TableDirectory<'a>,
        ttc_index: Option<u32>,
    ) -> Result<Self, ReadError> {
        if [TT_SFNT_VERSION, CFF_SFNT_VERSION, APPLE_TRUE_SFNT_VERSION]
            .contains(&table_directory.sfnt_version())
        {
            let table_directory_sorted = table_directory.is_sorted();

            Ok(FontRef {
                data,
                table_directory,
                ttc_index: ttc_index.unwrap_or_default(),
                in_ttc: ttc_index.is_some(),
                table_directory_sorted,
            })
        } else {
            Err(ReadError::InvalidSfnt(table_directory.sfnt_version()))
        }
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }
}

#[cfg(test)]
mod tests {
    use sfnt_test_data::{be_buffer, bebuffer::BeBuffer, SIMPLE_FONT, TTC};
    use types::{Tag, TT_SFNT_VERSION};

    use crate::{FileRef, FontRef, ReadError, TableProvider};

    #[test]
    fn file_ref_non_collection() {
        assert!(matches!(FileRef::new(&SIMPLE_FONT), Ok(FileRef::Font(_))));
    }

    #[test]
    fn file_ref_collection() {
        let Ok(FileRef::Collection(collection)) = FileRef::new(&TTC) else {
            panic!("Expected a collection");
        };
        assert_eq!(2, collection.len());
        assert!(!collection.is_empty());
        assert_eq!(collection.header().major_version(), 1);
        assert!(collection.header().dsig_tag().is_none());
    }

    #[test]
    fn font_ref_fonts_iter() {
        assert_eq!(FontRef::fonts(&SIMPLE_FONT).count(), 1);
        assert_eq!(FontRef::fonts(&TTC).count(), 2);
        assert_eq!(FontRef::fonts(b"NOT_A_FONT").count(), 0);
    }

    #[test]
    fn ttc_index() {
        for (idx, font) in FontRef::fonts(&TTC).map(|font| font.unwrap()).enumerate() {
            assert_eq!(font.ttc_index(), Some(idx as u32));
            // members share the backing buffer
            assert_eq!(font.data().len(), TTC.len());
            assert!(font.head().is_ok());
        }
        assert!(FontRef::new(&SIMPLE_FONT).unwrap().ttc_index().is_none());
        assert!(matches!(
            FontRef::from_index(&TTC, 2),
            Err(ReadError::InvalidCollectionIndex(2))
        ));
    }

    #[test]
    fn search_params() {
        let font = FontRef::new(&SIMPLE_FONT).unwrap();
        assert!(font.table_directory().has_valid_search_params());
    }

    #[test]
    fn bad_sfnt_version() {
        let data = be_buffer! { 0x12345678u32, 0u16, 0u16, 0u16, 0u16 };
        assert!(matches!(
            FontRef::new(&data),
            Err(ReadError::InvalidSfnt(0x12345678))
        ));
    }

    #[test]
    fn unsorted_table_directory() {
        let post_data = [0u8, 3, 0, 0];
        let maxp_data = [0u8, 0, 0x50, 0, 0, 1];

        let font_data = be_buffer! {
            (TT_SFNT_VERSION),
            2u16,    // num tables
            32u16,   // search range
            1u16,    // entry selector
            0u16,    // range shift

            (Tag::new(b"post")),
            0u32,    // checksum
            44u32,   // offset
            (post_data.len() as u32),

            (Tag::new(b"maxp")),
            0u32,    // checksum
            48u32,   // offset
            (maxp_data.len() as u32)
        };

        let mut full_font = font_data.to_vec();
        full_font.extend_from_slice(&post_data);
        full_font.extend_from_slice(&maxp_data);

        let font = FontRef::new(&full_font).unwrap();
        assert!(!font.table_directory_sorted);
        assert!(font.table_directory().has_valid_search_params());
        assert!(font.table_data(Tag::new(b"post")).is_some());
        assert_eq!(font.maxp().unwrap().num_glyphs(), 1);
    }
}
