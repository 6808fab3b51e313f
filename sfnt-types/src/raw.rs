//! types for working with raw big-endian bytes

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes; every
/// value read from or written to a font passes through it.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// The size of the raw type, in bytes.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;

    /// Attempt to read an instance of this type from the start of a slice.
    ///
    /// Returns `None` if the slice is too short.
    fn read(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.get(..Self::RAW_BYTE_LEN)?;
        <Self::Raw as TryFrom<&[u8]>>::try_from(bytes)
            .ok()
            .map(Self::from_raw)
    }
}

/// An internal macro for implementing the `Scalar` trait on newtypes.
#[macro_export]
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl $crate::Scalar for $name {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                $crate::Scalar::to_raw(self.0)
            }

            fn from_raw(raw: $raw) -> Self {
                Self($crate::Scalar::from_raw(raw))
            }
        }
    };
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
int_scalar!(u64, [u8; 8]);
int_scalar!(i64, [u8; 8]);

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn read_big_endian() {
        assert_eq!(u16::read(&[0x12, 0x34, 0xff]), Some(0x1234));
        assert_eq!(i16::read(&[0xff, 0xfe]), Some(-2));
        assert_eq!(u32::read(&[0, 1, 0, 0]), Some(0x10000));
        assert_eq!(u32::read(&[0, 1, 0]), None);
    }

    #[test]
    fn raw_len() {
        assert_eq!(u8::RAW_BYTE_LEN, 1);
        assert_eq!(i16::RAW_BYTE_LEN, 2);
        assert_eq!(i64::RAW_BYTE_LEN, 8);
    }
}
