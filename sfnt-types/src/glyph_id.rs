//! Glyph indices

/// Index of a glyph within a font, from 0 to `numGlyphs - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphId(u16);

impl GlyphId {
    /// Glyph 0, drawn for characters the font does not map.
    pub const NOTDEF: GlyphId = GlyphId(0);

    pub const fn new(raw: u16) -> Self {
        GlyphId(raw)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }

    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub const fn is_notdef(self) -> bool {
        self.0 == Self::NOTDEF.0
    }
}

impl From<u16> for GlyphId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

// matches the naming used for unnamed glyphs in log output
impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GID_{}", self.0)
    }
}

crate::newtype_scalar!(GlyphId, [u8; 2]);

#[cfg(test)]
mod tests {
    use super::GlyphId;

    #[test]
    fn default_is_notdef() {
        assert!(GlyphId::default().is_notdef());
        assert_eq!(GlyphId::from(7).to_string(), "GID_7");
    }
}
