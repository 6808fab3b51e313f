use types::Scalar;

/// A type that that can be written out as part of a font file.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A growable buffer of big-endian bytes.
#[derive(Debug, Default, Clone)]
pub struct TableWriter {
    data: Vec<u8>,
}

/// Serialize a table.
pub fn dump_table<T: FontWrite + ?Sized>(table: &T) -> Vec<u8> {
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    writer.into_data()
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// Write any scalar.
    #[inline]
    pub fn write_scalar<T: Scalar>(&mut self, value: T) {
        self.data.extend_from_slice(value.to_raw().as_ref())
    }

    /// Pad with zeros to a multiple of four bytes.
    pub fn pad_to_4(&mut self) {
        let padded = crate::util::round4(self.data.len());
        self.data.resize(padded, 0);
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_scalar(*self)
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(i64);
write_be_bytes!(types::F2Dot14);
write_be_bytes!(types::Fixed);
write_be_bytes!(types::LongDateTime);
write_be_bytes!(types::Tag);
write_be_bytes!(types::GlyphId);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite> FontWrite for Vec<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

impl<T: FontWrite, const N: usize> FontWrite for [T; N] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

impl<T: FontWrite> FontWrite for Option<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        if let Some(item) = self {
            item.write_into(writer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Fixed, Tag};

    #[test]
    fn big_endian_scalars() {
        let mut writer = TableWriter::default();
        0x0102u16.write_into(&mut writer);
        (-2i16).write_into(&mut writer);
        Fixed::from_bits(0x0001_0000).write_into(&mut writer);
        Tag::new(b"glyf").write_into(&mut writer);
        assert_eq!(
            writer.into_data(),
            [1, 2, 0xff, 0xfe, 0, 1, 0, 0, b'g', b'l', b'y', b'f']
        );
    }

    #[test]
    fn padding() {
        let mut writer = TableWriter::default();
        [1u8, 2, 3, 4, 5].write_into(&mut writer);
        writer.pad_to_4();
        assert_eq!(writer.len(), 8);
        writer.pad_to_4();
        assert_eq!(writer.len(), 8);
        assert_eq!(dump_table(&None::<u32>), Vec::<u8>::new());
    }
}
