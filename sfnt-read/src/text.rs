//! Decoding of the string encodings found in font tables

/// A single byte or two byte string encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// 7-bit ASCII; bytes above 0x7F are replaced.
    Ascii,
    /// ISO-8859-1.
    Latin1,
    /// Big-endian UTF-16, as used by unicode and windows `name` records.
    Utf16Be,
    /// The classic Mac OS Roman character set.
    MacRoman,
}

impl Encoding {
    /// Returns the encoding for a `name` record with the given platform
    /// and encoding identifiers.
    pub fn for_platform(platform_id: u16, encoding_id: u16) -> Encoding {
        match (platform_id, encoding_id) {
            (0, _) | (3, _) => Encoding::Utf16Be,
            (1, 0) => Encoding::MacRoman,
            _ => Encoding::Latin1,
        }
    }

    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Ascii => bytes
                .iter()
                .map(|b| {
                    if b.is_ascii() {
                        *b as char
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Encoding::Latin1 => bytes.iter().map(|b| *b as char).collect(),
            Encoding::MacRoman => bytes
                .iter()
                .map(|b| match b {
                    0..=0x7F => *b as char,
                    0x80.. => MAC_ROMAN[(*b - 0x80) as usize],
                })
                .collect(),
            Encoding::Utf16Be => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        }
    }
}

/// The upper half of Mac OS Roman.
#[rustfmt::skip]
static MAC_ROMAN: [char; 128] = [
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è',
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø',
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø',
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{a0}', 'À', 'Ã', 'Õ', 'Œ', 'œ',
    '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ',
    '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô',
    '\u{f8ff}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ',
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_roman() {
        assert_eq!(Encoding::MacRoman.decode(&[b'A', 0x80, 0xCA, 0xDB]), "AÄ\u{a0}€");
    }

    #[test]
    fn utf16_surrogates() {
        let bytes = [0xD8, 0x3D, 0xDE, 0x00, 0x00, b'!'];
        assert_eq!(Encoding::Utf16Be.decode(&bytes), "😀!");
        // unpaired surrogate
        assert_eq!(Encoding::Utf16Be.decode(&[0xD8, 0x00]), "\u{fffd}");
    }

    #[test]
    fn latin1_and_ascii() {
        assert_eq!(Encoding::Latin1.decode(&[0xE9]), "é");
        assert_eq!(Encoding::Ascii.decode(&[0xE9, b'a']), "\u{fffd}a");
    }

    #[test]
    fn platform_encodings() {
        assert_eq!(Encoding::for_platform(3, 1), Encoding::Utf16Be);
        assert_eq!(Encoding::for_platform(0, 3), Encoding::Utf16Be);
        assert_eq!(Encoding::for_platform(1, 0), Encoding::MacRoman);
        assert_eq!(Encoding::for_platform(1, 1), Encoding::Latin1);
    }
}
