use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A table, script, language system or feature tag.
///
/// Tags taken from font data are stored unchanged, whatever their bytes.
/// Tags built from user input go through [`Tag::new_checked`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const fn new(bytes: &[u8; 4]) -> Tag {
        Tag(*bytes)
    }

    /// Validates one to four printable ASCII bytes, padding with spaces.
    ///
    /// Spaces are only allowed as trailing padding.
    pub fn new_checked(src: &[u8]) -> Result<Self, InvalidTag> {
        if !(1..=4).contains(&src.len()) {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        let mut bytes = [b' '; 4];
        let mut padding = false;
        for (pos, &byte) in src.iter().enumerate() {
            match byte {
                b' ' if pos == 0 => return Err(InvalidTag::InvalidByte { pos, byte }),
                b' ' => padding = true,
                0x21..=0x7E if padding => return Err(InvalidTag::ByteAfterSpace { pos }),
                0x21..=0x7E => (),
                _ => return Err(InvalidTag::InvalidByte { pos, byte }),
            }
            bytes[pos] = byte;
        }
        Ok(Tag(bytes))
    }

    pub const fn from_u32(value: u32) -> Self {
        Tag(value.to_be_bytes())
    }

    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Tag(bytes)
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The tag as it is summed into a table checksum.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Returns `None` when the bytes are not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

/// Reasons a string is rejected by [`Tag::new_checked`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    InvalidLength(usize),
    /// A control character, a non-ASCII byte, or a leading space.
    InvalidByte { pos: usize, byte: u8 },
    ByteAfterSpace { pos: usize },
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidLength(len) => write!(f, "tags have 1 to 4 bytes, not {len}"),
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "byte 0x{byte:02X} at {pos} is not allowed in a tag")
            }
            InvalidTag::ByteAfterSpace { pos } => {
                write!(f, "only spaces may follow a space, found a character at {pos}")
            }
        }
    }
}

impl std::error::Error for InvalidTag {}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::new_checked(src.as_bytes())
    }
}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> [u8; 4] {
        self.0
    }

    fn from_raw(raw: [u8; 4]) -> Self {
        Tag(raw)
    }
}

// four spaces, which no font uses as a real tag
impl Default for Tag {
    fn default() -> Self {
        Tag([b' '; 4])
    }
}

/// Unprintable bytes are shown as `{0xNN}`.
impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|&byte| match byte {
            0x20..=0x7E => write!(f, "{}", byte as char),
            _ => write!(f, "{{0x{byte:02X}}}"),
        })
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
