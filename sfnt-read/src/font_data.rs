//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use types::{F2Dot14, Fixed, LongDateTime, Scalar, Tag};

use crate::array::ScalarArray;
use crate::read::{FontReadWithArgs, ReadError};
use crate::text::Encoding;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice that provides convenience methods
/// for parsing and validating that data. It is `Copy`, and any number of
/// `FontData` (or [`Cursor`]s created from it) may view the same underlying
/// buffer; none of them owns it, so a collection file can fan out to many
/// fonts while the caller keeps the bytes alive.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

/// A cursor for sequential, big-endian reads over [`FontData`].
///
/// Each cursor has its own position; cursors are cheap to create and are not
/// meant to be shared between threads.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of this data relative to the start of the original buffer.
    pub fn total_pos(&self) -> u32 {
        self.total_pos
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..offset.checked_add(T::RAW_BYTE_LEN).ok_or(ReadError::OutOfBounds)?)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn read_with_args<T>(&self, range: Range<usize>, args: &T::Args) -> Result<T, ReadError>
    where
        T: FontReadWithArgs<'a>,
    {
        self.slice(range)
            .ok_or(ReadError::OutOfBounds)
            .and_then(|data| T::read_with_args(data, args))
    }

    /// Interpret the bytes in `range` as an array of big-endian scalars.
    pub fn read_array<T: Scalar>(&self, range: Range<usize>) -> Result<ScalarArray<'a, T>, ReadError> {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        ScalarArray::new(bytes)
    }

    /// Ensure the data holds at least `len` bytes.
    pub fn check_len(&self, len: usize) -> Result<(), ReadError> {
        if self.bytes.len() < len {
            Err(ReadError::OutOfBounds)
        } else {
            Ok(())
        }
    }

    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// Returns the underlying bytes, exactly as they appear in the font.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub fn advance<T: Scalar>(&mut self) {
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
    }

    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    /// Move to an absolute position within the data.
    ///
    /// Seeking past the end is allowed; the next read will fail.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    pub fn read_tag(&mut self) -> Result<Tag, ReadError> {
        self.read()
    }

    /// Read a 16.16 fixed point value.
    pub fn read_fixed(&mut self) -> Result<Fixed, ReadError> {
        self.read()
    }

    pub fn read_f2dot14(&mut self) -> Result<F2Dot14, ReadError> {
        self.read()
    }

    /// Read a date as seconds since 1904-01-01.
    pub fn read_long_datetime(&mut self) -> Result<LongDateTime, ReadError> {
        self.read()
    }

    pub fn read_array<T: Scalar>(&mut self, len: usize) -> Result<ScalarArray<'a, T>, ReadError> {
        let len = len.saturating_mul(T::RAW_BYTE_LEN);
        let end = self.pos.saturating_add(len);
        let temp = self.data.read_array(self.pos..end);
        self.pos = end;
        temp
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let end = self.pos.saturating_add(len);
        let temp = self
            .data
            .as_bytes()
            .get(self.pos..end)
            .ok_or(ReadError::OutOfBounds);
        self.pos = end;
        temp
    }

    /// Read a fixed length string of `len` bytes in the given encoding.
    pub fn read_string(&mut self, len: usize, encoding: Encoding) -> Result<String, ReadError> {
        self.read_bytes(len).map(|bytes| encoding.decode(bytes))
    }

    /// The current position of the cursor.
    pub fn position(&self) -> Result<usize, ReadError> {
        self.data.check_in_bounds(self.pos).map(|_| self.pos)
    }

    /// The number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.data.as_bytes().get(self.pos..).unwrap_or_default()
    }

    /// The complete data this cursor reads from, independent of the position.
    pub fn original_data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the data read so far, or an error if the cursor ran past the end.
    pub fn finish(self) -> Result<FontData<'a>, ReadError> {
        let data = self.data;
        data.check_in_bounds(self.pos)?;
        data.slice(..self.pos).ok_or(ReadError::OutOfBounds)
    }
}

impl FontData<'_> {
    fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_reads() {
        let bytes = [0x00, 0x01, 0x00, 0x00, 0xff, 0xfe, b'g', b'l', b'y', b'f', 7];
        let mut cursor = FontData::new(&bytes).cursor();
        assert_eq!(cursor.read_fixed().unwrap(), Fixed::ONE);
        assert_eq!(cursor.read::<i16>().unwrap(), -2);
        assert_eq!(cursor.read_tag().unwrap(), Tag::new(b"glyf"));
        assert_eq!(cursor.position().unwrap(), 10);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read::<u8>().unwrap(), 7);
        assert!(matches!(cursor.read::<u8>(), Err(ReadError::OutOfBounds)));
    }

    #[test]
    fn fractional_and_date_fields() {
        // 1.5 as 2.14, then 2^32 seconds
        let bytes = [0x60, 0x00, 0, 0, 0, 1, 0, 0, 0, 0];
        let mut cursor = FontData::new(&bytes).cursor();
        assert_eq!(cursor.read_f2dot14().unwrap().to_f32(), 1.5);
        assert_eq!(cursor.read_long_datetime().unwrap().as_secs(), 1 << 32);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn seek_and_original_data() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let data = FontData::new(&bytes);
        let sub = data.slice(2..).unwrap();
        assert_eq!(sub.total_pos(), 2);
        let mut cursor = sub.cursor();
        cursor.seek(2);
        assert_eq!(cursor.read::<u16>().unwrap(), 0x0506);
        assert_eq!(cursor.original_data().as_bytes(), &[3, 4, 5, 6]);
        cursor.seek(10);
        assert!(cursor.read::<u8>().is_err());
        assert!(cursor.finish().is_err());
    }

    #[test]
    fn independent_cursors_share_data() {
        let bytes = [0, 1, 0, 2];
        let data = FontData::new(&bytes);
        let mut one = data.cursor();
        let mut two = data.cursor();
        assert_eq!(one.read::<u16>().unwrap(), 1);
        assert_eq!(two.read::<u16>().unwrap(), 1);
        assert_eq!(one.read::<u16>().unwrap(), 2);
    }

    #[test]
    fn strings() {
        let bytes = [0, b'H', 0, b'i', b'o', b'k'];
        let mut cursor = FontData::new(&bytes).cursor();
        assert_eq!(cursor.read_string(4, Encoding::Utf16Be).unwrap(), "Hi");
        assert_eq!(cursor.read_string(2, Encoding::Ascii).unwrap(), "ok");
        assert!(cursor.read_string(1, Encoding::Latin1).is_err());
    }
}
