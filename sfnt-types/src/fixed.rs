//! fixed-point numerical types

// shared between Fixed and F2Dot14
macro_rules! fixed_impl {
    ($name:ident, $bits:literal, $fract_bits:literal, $ty:ty) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[doc = concat!(stringify!($bits), "-bit signed fixed point number with ", stringify!($fract_bits), " bits of fraction." )]
        pub struct $name($ty);

        impl $name {
            /// This type's smallest representable value
            pub const EPSILON: Self = Self(1);

            /// The value `1.0`.
            pub const ONE: Self = Self(1 << $fract_bits);

            const ONE_RAW: $ty = 1 << $fract_bits;

            /// Creates a new value from its raw bit representation.
            pub const fn from_bits(bits: $ty) -> Self {
                Self(bits)
            }

            /// Returns the raw bit representation.
            pub const fn to_bits(self) -> $ty {
                self.0
            }

            /// Creates a value from an `f64`, rounding to the nearest
            /// representable value.
            pub fn from_f64(x: f64) -> Self {
                Self((x * Self::ONE_RAW as f64).round() as $ty)
            }

            /// Returns the value as an `f64`.
            ///
            /// This operation is lossless.
            pub fn to_f64(self) -> f64 {
                self.0 as f64 / Self::ONE_RAW as f64
            }

            /// Returns the value as an `f32`.
            pub fn to_f32(self) -> f32 {
                self.to_f64() as f32
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_f64())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_f64())
            }
        }
    };
}

fixed_impl!(Fixed, 32, 16, i32);
fixed_impl!(F2Dot14, 16, 14, i16);
crate::newtype_scalar!(Fixed, [u8; 4]);
crate::newtype_scalar!(F2Dot14, [u8; 2]);

impl Fixed {
    /// Creates a 16.16 value from an integer.
    pub const fn from_i32(x: i32) -> Self {
        Self(x << 16)
    }

    /// The major (integer) part of a version number stored as 16.16.
    pub const fn major(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// The minor part of a version number stored as 16.16.
    pub const fn minor(self) -> u16 {
        self.0 as u16
    }
}
