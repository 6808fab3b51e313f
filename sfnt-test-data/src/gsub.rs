//! GSUB test data

use sfnt_types::Tag;

use crate::be_buffer;

/// A GSUB with one script (`latn`) whose default language system enables
/// `vert` and `vrt2`.
///
/// `vert` is a format 1 single substitution adding 10 to glyphs 1 and 2;
/// `vrt2` is a format 2 single substitution mapping glyph 1 to 20, reached
/// through an extension lookup.
pub fn vertical_gsub() -> Vec<u8> {
    be_buffer! {
        // header
        1u16, 0u16,
        10u16,                  // scriptListOffset
        32u16,                  // featureListOffset
        58u16,                  // lookupListOffset

        // ScriptList @ 10
        1u16, (Tag::new(b"latn")), 8u16,
        // Script @ 18
        4u16,                   // defaultLangSysOffset
        0u16,                   // langSysCount
        // LangSys @ 22
        0u16,                   // lookupOrderOffset
        0xFFFFu16,              // requiredFeatureIndex
        2u16, [0u16, 1],

        // FeatureList @ 32
        2u16,
        (Tag::new(b"vert")), 14u16,
        (Tag::new(b"vrt2")), 20u16,
        // Feature @ 46
        0u16, 1u16, 0u16,
        // Feature @ 52
        0u16, 1u16, 1u16,

        // LookupList @ 58
        2u16, [6u16, 28],
        // Lookup @ 64
        1u16, 0u16, 1u16, 8u16,
        // SingleSubstFormat1 @ 72
        1u16, 6u16, 10i16,
        // Coverage @ 78
        1u16, 2u16, [1u16, 2],
        // Lookup @ 86
        7u16, 0u16, 1u16, 8u16,
        // ExtensionSubstFormat1 @ 94
        1u16, 1u16, 8u32,
        // SingleSubstFormat2 @ 102
        2u16, 8u16, 1u16, 20u16,
        // Coverage @ 110
        1u16, 1u16, 1u16
    }
    .into_vec()
}
