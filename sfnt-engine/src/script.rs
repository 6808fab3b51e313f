//! Unicode script resolution for glyph substitution.
//!
//! A code point maps to a Unicode script name through a static range table,
//! and a script name maps to the OpenType script tags a `GSUB` table may
//! use for it. When a script has been revised, the newer tag comes first.

use sfnt_types::Tag;

/// The OpenType default script.
pub const DEFAULT: Tag = Tag::new(b"DFLT");

/// Marks a code point whose script is inherited from its context.
///
/// This is not an OpenType tag; it is the ISO 15924 code for the
/// "Inherited" script and never appears in a script list.
pub const INHERITED: Tag = Tag::new(b"Zinh");

pub const COMMON_SCRIPT: &str = "Common";
pub const INHERITED_SCRIPT: &str = "Inherited";
pub const UNKNOWN_SCRIPT: &str = "Unknown";

/// Returns the Unicode script name of `codepoint`.
///
/// Code points outside the range table are [`UNKNOWN_SCRIPT`].
pub fn script_name(codepoint: u32) -> &'static str {
    let ix = match SCRIPT_RANGES.binary_search_by_key(&codepoint, |(start, _, _)| *start) {
        Ok(ix) => ix,
        Err(0) => return UNKNOWN_SCRIPT,
        Err(ix) => ix - 1,
    };
    let (_, end, name) = SCRIPT_RANGES[ix];
    if codepoint <= end {
        name
    } else {
        UNKNOWN_SCRIPT
    }
}

/// Returns the OpenType script tags for `codepoint`, newest first.
///
/// The result may be [`INHERITED`], meaning the script can only be
/// determined from context. Unknown code points map to [`DEFAULT`].
pub fn script_tags(codepoint: u32) -> &'static [Tag] {
    tags_for_script(script_name(codepoint)).unwrap_or(&[DEFAULT])
}

/// Returns the OpenType script tags for a Unicode script name.
pub fn tags_for_script(name: &str) -> Option<&'static [Tag]> {
    macro_rules! tags {
        ($($tag:literal),+) => {{
            const TAGS: &[Tag] = &[$(Tag::new($tag)),+];
            TAGS
        }};
    }
    let tags: &'static [Tag] = match name {
        COMMON_SCRIPT | UNKNOWN_SCRIPT => &[DEFAULT],
        INHERITED_SCRIPT => &[INHERITED],
        "Adlam" => tags!(b"adlm"),
        "Ahom" => tags!(b"ahom"),
        "Anatolian_Hieroglyphs" => tags!(b"hluw"),
        "Arabic" => tags!(b"arab"),
        "Armenian" => tags!(b"armn"),
        "Avestan" => tags!(b"avst"),
        "Balinese" => tags!(b"bali"),
        "Bamum" => tags!(b"bamu"),
        "Bassa_Vah" => tags!(b"bass"),
        "Batak" => tags!(b"batk"),
        "Bengali" => tags!(b"bng2", b"beng"),
        "Bhaiksuki" => tags!(b"bhks"),
        "Bopomofo" => tags!(b"bopo"),
        "Brahmi" => tags!(b"brah"),
        "Braille" => tags!(b"brai"),
        "Buginese" => tags!(b"bugi"),
        "Buhid" => tags!(b"buhd"),
        "Canadian_Aboriginal" => tags!(b"cans"),
        "Carian" => tags!(b"cari"),
        "Caucasian_Albanian" => tags!(b"aghb"),
        "Chakma" => tags!(b"cakm"),
        "Cham" => tags!(b"cham"),
        "Cherokee" => tags!(b"cher"),
        "Coptic" => tags!(b"copt"),
        // "Sumero-Akkadian Cuneiform" in OpenType
        "Cuneiform" => tags!(b"xsux"),
        "Cypriot" => tags!(b"cprt"),
        "Cyrillic" => tags!(b"cyrl"),
        "Deseret" => tags!(b"dsrt"),
        "Devanagari" => tags!(b"dev2", b"deva"),
        "Duployan" => tags!(b"dupl"),
        "Egyptian_Hieroglyphs" => tags!(b"egyp"),
        "Elbasan" => tags!(b"elba"),
        "Ethiopic" => tags!(b"ethi"),
        "Georgian" => tags!(b"geor"),
        "Glagolitic" => tags!(b"glag"),
        "Gothic" => tags!(b"goth"),
        "Grantha" => tags!(b"gran"),
        "Greek" => tags!(b"grek"),
        "Gujarati" => tags!(b"gjr2", b"gujr"),
        "Gurmukhi" => tags!(b"gur2", b"guru"),
        // "CJK Ideographic" in OpenType
        "Han" => tags!(b"hani"),
        "Hangul" => tags!(b"hang"),
        "Hanunoo" => tags!(b"hano"),
        "Hatran" => tags!(b"hatr"),
        "Hebrew" => tags!(b"hebr"),
        "Hiragana" | "Katakana" => tags!(b"kana"),
        "Imperial_Aramaic" => tags!(b"armi"),
        "Inscriptional_Pahlavi" => tags!(b"phli"),
        "Inscriptional_Parthian" => tags!(b"prti"),
        "Javanese" => tags!(b"java"),
        "Kaithi" => tags!(b"kthi"),
        "Kannada" => tags!(b"knd2", b"knda"),
        "Kayah_Li" => tags!(b"kali"),
        "Kharoshthi" => tags!(b"khar"),
        "Khmer" => tags!(b"khmr"),
        "Khojki" => tags!(b"khoj"),
        "Khudawadi" => tags!(b"sind"),
        "Lao" => tags!(b"lao "),
        "Latin" => tags!(b"latn"),
        "Lepcha" => tags!(b"lepc"),
        "Limbu" => tags!(b"limb"),
        "Linear_A" => tags!(b"lina"),
        "Linear_B" => tags!(b"linb"),
        "Lisu" => tags!(b"lisu"),
        "Lycian" => tags!(b"lyci"),
        "Lydian" => tags!(b"lydi"),
        "Mahajani" => tags!(b"mahj"),
        "Malayalam" => tags!(b"mlm2", b"mlym"),
        "Mandaic" => tags!(b"mand"),
        "Manichaean" => tags!(b"mani"),
        "Marchen" => tags!(b"marc"),
        "Meetei_Mayek" => tags!(b"mtei"),
        "Mende_Kikakui" => tags!(b"mend"),
        "Meroitic_Cursive" => tags!(b"merc"),
        "Meroitic_Hieroglyphs" => tags!(b"mero"),
        "Miao" => tags!(b"plrd"),
        "Modi" => tags!(b"modi"),
        "Mongolian" => tags!(b"mong"),
        "Mro" => tags!(b"mroo"),
        "Multani" => tags!(b"mult"),
        "Myanmar" => tags!(b"mym2", b"mymr"),
        "Nabataean" => tags!(b"nbat"),
        "Newa" => tags!(b"newa"),
        "New_Tai_Lue" => tags!(b"talu"),
        "Nko" => tags!(b"nko "),
        "Ogham" => tags!(b"ogam"),
        "Ol_Chiki" => tags!(b"olck"),
        "Old_Italic" => tags!(b"ital"),
        "Old_Hungarian" => tags!(b"hung"),
        "Old_North_Arabian" => tags!(b"narb"),
        "Old_Permic" => tags!(b"perm"),
        "Old_Persian" => tags!(b"xpeo"),
        "Old_South_Arabian" => tags!(b"sarb"),
        "Old_Turkic" => tags!(b"orkh"),
        // "Odia (formerly Oriya)" in OpenType
        "Oriya" => tags!(b"ory2", b"orya"),
        "Osage" => tags!(b"osge"),
        "Osmanya" => tags!(b"osma"),
        "Pahawh_Hmong" => tags!(b"hmng"),
        "Palmyrene" => tags!(b"palm"),
        "Pau_Cin_Hau" => tags!(b"pauc"),
        "Phags_Pa" => tags!(b"phag"),
        "Phoenician" => tags!(b"phnx"),
        "Psalter_Pahlavi" => tags!(b"phlp"),
        "Rejang" => tags!(b"rjng"),
        "Runic" => tags!(b"runr"),
        "Samaritan" => tags!(b"samr"),
        "Saurashtra" => tags!(b"saur"),
        "Sharada" => tags!(b"shrd"),
        "Shavian" => tags!(b"shaw"),
        "Siddham" => tags!(b"sidd"),
        "SignWriting" => tags!(b"sgnw"),
        "Sinhala" => tags!(b"sinh"),
        "Sora_Sompeng" => tags!(b"sora"),
        "Sundanese" => tags!(b"sund"),
        "Syloti_Nagri" => tags!(b"sylo"),
        "Syriac" => tags!(b"syrc"),
        "Tagalog" => tags!(b"tglg"),
        "Tagbanwa" => tags!(b"tagb"),
        "Tai_Le" => tags!(b"tale"),
        "Tai_Tham" => tags!(b"lana"),
        "Tai_Viet" => tags!(b"tavt"),
        "Takri" => tags!(b"takr"),
        "Tamil" => tags!(b"tml2", b"taml"),
        "Tangut" => tags!(b"tang"),
        "Telugu" => tags!(b"tel2", b"telu"),
        "Thaana" => tags!(b"thaa"),
        "Thai" => tags!(b"thai"),
        "Tibetan" => tags!(b"tibt"),
        "Tifinagh" => tags!(b"tfng"),
        "Tirhuta" => tags!(b"tirh"),
        "Ugaritic" => tags!(b"ugar"),
        "Vai" => tags!(b"vai "),
        "Warang_Citi" => tags!(b"wara"),
        "Yi" => tags!(b"yi  "),
        _ => return None,
    };
    Some(tags)
}

/// Sorted, non-overlapping `(first, last, script)` ranges.
#[rustfmt::skip]
static SCRIPT_RANGES: &[(u32, u32, &str)] = &[
    (0x0000, 0x0040, COMMON_SCRIPT),
    (0x0041, 0x005A, "Latin"),
    (0x005B, 0x0060, COMMON_SCRIPT),
    (0x0061, 0x007A, "Latin"),
    (0x007B, 0x00A9, COMMON_SCRIPT),
    (0x00AA, 0x00AA, "Latin"),
    (0x00AB, 0x00B9, COMMON_SCRIPT),
    (0x00BA, 0x00BA, "Latin"),
    (0x00BB, 0x00BF, COMMON_SCRIPT),
    (0x00C0, 0x00D6, "Latin"),
    (0x00D7, 0x00D7, COMMON_SCRIPT),
    (0x00D8, 0x00F6, "Latin"),
    (0x00F7, 0x00F7, COMMON_SCRIPT),
    (0x00F8, 0x02B8, "Latin"),
    (0x02B9, 0x02DF, COMMON_SCRIPT),
    (0x02E0, 0x02E4, "Latin"),
    (0x02E5, 0x02FF, COMMON_SCRIPT),
    (0x0300, 0x036F, INHERITED_SCRIPT),
    (0x0370, 0x03FF, "Greek"),
    (0x0400, 0x0484, "Cyrillic"),
    (0x0485, 0x0486, INHERITED_SCRIPT),
    (0x0487, 0x052F, "Cyrillic"),
    (0x0531, 0x058F, "Armenian"),
    (0x0591, 0x05FF, "Hebrew"),
    (0x0600, 0x060B, "Arabic"),
    (0x060C, 0x060C, COMMON_SCRIPT),
    (0x060D, 0x061A, "Arabic"),
    (0x061B, 0x061B, COMMON_SCRIPT),
    (0x061C, 0x061E, "Arabic"),
    (0x061F, 0x061F, COMMON_SCRIPT),
    (0x0620, 0x063F, "Arabic"),
    (0x0640, 0x0640, COMMON_SCRIPT),
    (0x0641, 0x064A, "Arabic"),
    (0x064B, 0x0655, INHERITED_SCRIPT),
    (0x0656, 0x066F, "Arabic"),
    (0x0670, 0x0670, INHERITED_SCRIPT),
    (0x0671, 0x06DC, "Arabic"),
    (0x06DD, 0x06DD, COMMON_SCRIPT),
    (0x06DE, 0x06FF, "Arabic"),
    (0x0700, 0x074F, "Syriac"),
    (0x0750, 0x077F, "Arabic"),
    (0x0780, 0x07BF, "Thaana"),
    (0x07C0, 0x07FF, "Nko"),
    (0x0800, 0x083F, "Samaritan"),
    (0x0840, 0x085F, "Mandaic"),
    (0x0860, 0x086F, "Syriac"),
    (0x08A0, 0x08FF, "Arabic"),
    (0x0900, 0x0950, "Devanagari"),
    (0x0951, 0x0954, INHERITED_SCRIPT),
    (0x0955, 0x0963, "Devanagari"),
    (0x0964, 0x0965, COMMON_SCRIPT),
    (0x0966, 0x097F, "Devanagari"),
    (0x0980, 0x09FF, "Bengali"),
    (0x0A00, 0x0A7F, "Gurmukhi"),
    (0x0A80, 0x0AFF, "Gujarati"),
    (0x0B00, 0x0B7F, "Oriya"),
    (0x0B80, 0x0BFF, "Tamil"),
    (0x0C00, 0x0C7F, "Telugu"),
    (0x0C80, 0x0CFF, "Kannada"),
    (0x0D00, 0x0D7F, "Malayalam"),
    (0x0D80, 0x0DFF, "Sinhala"),
    (0x0E01, 0x0E3A, "Thai"),
    (0x0E3F, 0x0E3F, COMMON_SCRIPT),
    (0x0E40, 0x0E5B, "Thai"),
    (0x0E80, 0x0EFF, "Lao"),
    (0x0F00, 0x0FD4, "Tibetan"),
    (0x0FD5, 0x0FD8, COMMON_SCRIPT),
    (0x0FD9, 0x0FFF, "Tibetan"),
    (0x1000, 0x109F, "Myanmar"),
    (0x10A0, 0x10FA, "Georgian"),
    (0x10FB, 0x10FB, COMMON_SCRIPT),
    (0x10FC, 0x10FF, "Georgian"),
    (0x1100, 0x11FF, "Hangul"),
    (0x1200, 0x139F, "Ethiopic"),
    (0x13A0, 0x13FF, "Cherokee"),
    (0x1400, 0x167F, "Canadian_Aboriginal"),
    (0x1680, 0x169F, "Ogham"),
    (0x16A0, 0x16EA, "Runic"),
    (0x16EB, 0x16ED, COMMON_SCRIPT),
    (0x16EE, 0x16FF, "Runic"),
    (0x1700, 0x171F, "Tagalog"),
    (0x1720, 0x1734, "Hanunoo"),
    (0x1735, 0x1736, COMMON_SCRIPT),
    (0x1740, 0x175F, "Buhid"),
    (0x1760, 0x177F, "Tagbanwa"),
    (0x1780, 0x17FF, "Khmer"),
    (0x1800, 0x1801, "Mongolian"),
    (0x1802, 0x1803, COMMON_SCRIPT),
    (0x1804, 0x1804, "Mongolian"),
    (0x1805, 0x1805, COMMON_SCRIPT),
    (0x1806, 0x18AF, "Mongolian"),
    (0x18B0, 0x18FF, "Canadian_Aboriginal"),
    (0x1900, 0x194F, "Limbu"),
    (0x1950, 0x197F, "Tai_Le"),
    (0x1980, 0x19DF, "New_Tai_Lue"),
    (0x19E0, 0x19FF, "Khmer"),
    (0x1A00, 0x1A1F, "Buginese"),
    (0x1A20, 0x1AAF, "Tai_Tham"),
    (0x1AB0, 0x1AFF, INHERITED_SCRIPT),
    (0x1B00, 0x1B7F, "Balinese"),
    (0x1B80, 0x1BBF, "Sundanese"),
    (0x1BC0, 0x1BFF, "Batak"),
    (0x1C00, 0x1C4F, "Lepcha"),
    (0x1C50, 0x1C7F, "Ol_Chiki"),
    (0x1C80, 0x1C8F, "Cyrillic"),
    (0x1C90, 0x1CBF, "Georgian"),
    (0x1CC0, 0x1CCF, "Sundanese"),
    (0x1CD0, 0x1CFF, INHERITED_SCRIPT),
    (0x1D00, 0x1D25, "Latin"),
    (0x1D26, 0x1D2A, "Greek"),
    (0x1D2B, 0x1D2B, "Cyrillic"),
    (0x1D2C, 0x1D5C, "Latin"),
    (0x1D5D, 0x1D61, "Greek"),
    (0x1D62, 0x1D65, "Latin"),
    (0x1D66, 0x1D6A, "Greek"),
    (0x1D6B, 0x1D77, "Latin"),
    (0x1D78, 0x1D78, "Cyrillic"),
    (0x1D79, 0x1DBE, "Latin"),
    (0x1DBF, 0x1DBF, "Greek"),
    (0x1DC0, 0x1DFF, INHERITED_SCRIPT),
    (0x1E00, 0x1EFF, "Latin"),
    (0x1F00, 0x1FFF, "Greek"),
    (0x2000, 0x200B, COMMON_SCRIPT),
    (0x200C, 0x200D, INHERITED_SCRIPT),
    (0x200E, 0x2070, COMMON_SCRIPT),
    (0x2071, 0x2071, "Latin"),
    (0x2072, 0x207E, COMMON_SCRIPT),
    (0x207F, 0x207F, "Latin"),
    (0x2080, 0x208F, COMMON_SCRIPT),
    (0x2090, 0x209C, "Latin"),
    (0x20A0, 0x20CF, COMMON_SCRIPT),
    (0x20D0, 0x20FF, INHERITED_SCRIPT),
    (0x2100, 0x2125, COMMON_SCRIPT),
    (0x2126, 0x2126, "Greek"),
    (0x2127, 0x2129, COMMON_SCRIPT),
    (0x212A, 0x212B, "Latin"),
    (0x212C, 0x2131, COMMON_SCRIPT),
    (0x2132, 0x2132, "Latin"),
    (0x2133, 0x214D, COMMON_SCRIPT),
    (0x214E, 0x214E, "Latin"),
    (0x214F, 0x215F, COMMON_SCRIPT),
    (0x2160, 0x2188, "Latin"),
    (0x2189, 0x27FF, COMMON_SCRIPT),
    (0x2800, 0x28FF, "Braille"),
    (0x2900, 0x2BFF, COMMON_SCRIPT),
    (0x2C00, 0x2C5F, "Glagolitic"),
    (0x2C60, 0x2C7F, "Latin"),
    (0x2C80, 0x2CFF, "Coptic"),
    (0x2D00, 0x2D2F, "Georgian"),
    (0x2D30, 0x2D7F, "Tifinagh"),
    (0x2D80, 0x2DDF, "Ethiopic"),
    (0x2DE0, 0x2DFF, "Cyrillic"),
    (0x2E00, 0x2E7F, COMMON_SCRIPT),
    (0x2E80, 0x2FDF, "Han"),
    (0x2FF0, 0x3004, COMMON_SCRIPT),
    (0x3005, 0x3005, "Han"),
    (0x3006, 0x3006, COMMON_SCRIPT),
    (0x3007, 0x3007, "Han"),
    (0x3008, 0x3020, COMMON_SCRIPT),
    (0x3021, 0x3029, "Han"),
    (0x302A, 0x302D, INHERITED_SCRIPT),
    (0x302E, 0x302F, "Hangul"),
    (0x3030, 0x3037, COMMON_SCRIPT),
    (0x3038, 0x303B, "Han"),
    (0x303C, 0x303F, COMMON_SCRIPT),
    (0x3041, 0x3096, "Hiragana"),
    (0x3099, 0x309A, INHERITED_SCRIPT),
    (0x309B, 0x309C, COMMON_SCRIPT),
    (0x309D, 0x309F, "Hiragana"),
    (0x30A0, 0x30A0, COMMON_SCRIPT),
    (0x30A1, 0x30FA, "Katakana"),
    (0x30FB, 0x30FC, COMMON_SCRIPT),
    (0x30FD, 0x30FF, "Katakana"),
    (0x3105, 0x312F, "Bopomofo"),
    (0x3131, 0x318E, "Hangul"),
    (0x3190, 0x319F, COMMON_SCRIPT),
    (0x31A0, 0x31BF, "Bopomofo"),
    (0x31C0, 0x31EF, COMMON_SCRIPT),
    (0x31F0, 0x31FF, "Katakana"),
    (0x3200, 0x321E, "Hangul"),
    (0x3220, 0x325F, COMMON_SCRIPT),
    (0x3260, 0x327E, "Hangul"),
    (0x327F, 0x32CF, COMMON_SCRIPT),
    (0x32D0, 0x32FE, "Katakana"),
    (0x32FF, 0x32FF, COMMON_SCRIPT),
    (0x3300, 0x3357, "Katakana"),
    (0x3358, 0x33FF, COMMON_SCRIPT),
    (0x3400, 0x4DBF, "Han"),
    (0x4DC0, 0x4DFF, COMMON_SCRIPT),
    (0x4E00, 0x9FFF, "Han"),
    (0xA000, 0xA4CF, "Yi"),
    (0xA4D0, 0xA4FF, "Lisu"),
    (0xA500, 0xA62B, "Vai"),
    (0xA640, 0xA69F, "Cyrillic"),
    (0xA6A0, 0xA6F7, "Bamum"),
    (0xA700, 0xA721, COMMON_SCRIPT),
    (0xA722, 0xA787, "Latin"),
    (0xA788, 0xA78A, COMMON_SCRIPT),
    (0xA78B, 0xA7FF, "Latin"),
    (0xA800, 0xA82F, "Syloti_Nagri"),
    (0xA830, 0xA83F, COMMON_SCRIPT),
    (0xA840, 0xA87F, "Phags_Pa"),
    (0xA880, 0xA8DF, "Saurashtra"),
    (0xA8E0, 0xA8FF, "Devanagari"),
    (0xA900, 0xA92D, "Kayah_Li"),
    (0xA92E, 0xA92E, COMMON_SCRIPT),
    (0xA92F, 0xA92F, "Kayah_Li"),
    (0xA930, 0xA95F, "Rejang"),
    (0xA960, 0xA97F, "Hangul"),
    (0xA980, 0xA9DF, "Javanese"),
    (0xA9E0, 0xA9FF, "Myanmar"),
    (0xAA00, 0xAA5F, "Cham"),
    (0xAA60, 0xAA7F, "Myanmar"),
    (0xAA80, 0xAADF, "Tai_Viet"),
    (0xAAE0, 0xAAFF, "Meetei_Mayek"),
    (0xAB00, 0xAB2F, "Ethiopic"),
    (0xAB30, 0xAB5A, "Latin"),
    (0xAB5B, 0xAB5B, COMMON_SCRIPT),
    (0xAB5C, 0xAB64, "Latin"),
    (0xAB65, 0xAB65, "Greek"),
    (0xAB66, 0xAB6F, "Latin"),
    (0xAB70, 0xABBF, "Cherokee"),
    (0xABC0, 0xABFF, "Meetei_Mayek"),
    (0xAC00, 0xD7A3, "Hangul"),
    (0xD7B0, 0xD7FF, "Hangul"),
    (0xF900, 0xFAFF, "Han"),
    (0xFB00, 0xFB06, "Latin"),
    (0xFB13, 0xFB17, "Armenian"),
    (0xFB1D, 0xFB4F, "Hebrew"),
    (0xFB50, 0xFD3D, "Arabic"),
    (0xFD3E, 0xFD3F, COMMON_SCRIPT),
    (0xFD40, 0xFDFF, "Arabic"),
    (0xFE00, 0xFE0F, INHERITED_SCRIPT),
    (0xFE10, 0xFE1F, COMMON_SCRIPT),
    (0xFE20, 0xFE2D, INHERITED_SCRIPT),
    (0xFE2E, 0xFE2F, "Cyrillic"),
    (0xFE30, 0xFE6F, COMMON_SCRIPT),
    (0xFE70, 0xFEFC, "Arabic"),
    (0xFEFF, 0xFF20, COMMON_SCRIPT),
    (0xFF21, 0xFF3A, "Latin"),
    (0xFF3B, 0xFF40, COMMON_SCRIPT),
    (0xFF41, 0xFF5A, "Latin"),
    (0xFF5B, 0xFF65, COMMON_SCRIPT),
    (0xFF66, 0xFF6F, "Katakana"),
    (0xFF70, 0xFF70, COMMON_SCRIPT),
    (0xFF71, 0xFF9D, "Katakana"),
    (0xFF9E, 0xFF9F, COMMON_SCRIPT),
    (0xFFA0, 0xFFDC, "Hangul"),
    (0xFFE0, 0xFFFD, COMMON_SCRIPT),
    (0x10000, 0x100FA, "Linear_B"),
    (0x10100, 0x1013F, COMMON_SCRIPT),
    (0x10140, 0x1018E, "Greek"),
    (0x10300, 0x1032F, "Old_Italic"),
    (0x10330, 0x1034A, "Gothic"),
    (0x10380, 0x1039F, "Ugaritic"),
    (0x103A0, 0x103D5, "Old_Persian"),
    (0x10400, 0x1044F, "Deseret"),
    (0x10450, 0x1047F, "Shavian"),
    (0x10480, 0x104A9, "Osmanya"),
    (0x10800, 0x1083F, "Cypriot"),
    (0x10900, 0x1091F, "Phoenician"),
    (0x1D400, 0x1D7FF, COMMON_SCRIPT),
    (0x1E900, 0x1E95F, "Adlam"),
    (0x1F000, 0x1FAFF, COMMON_SCRIPT),
    (0x20000, 0x2FA1F, "Han"),
    (0xE0001, 0xE007F, COMMON_SCRIPT),
    (0xE0100, 0xE01EF, INHERITED_SCRIPT),
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn ranges_are_sorted_and_disjoint() {
        for pair in SCRIPT_RANGES.windows(2) {
            let (_, prev_end, _) = pair[0];
            let (start, end, name) = pair[1];
            assert!(start <= end, "{name} at {start:04X}");
            assert!(prev_end < start, "{name} at {start:04X} overlaps");
        }
    }

    #[test]
    fn every_range_has_tags() {
        for (start, _, name) in SCRIPT_RANGES {
            assert!(tags_for_script(name).is_some(), "{name} at {start:04X}");
        }
    }

    #[rstest]
    #[case::latin('A' as u32, "Latin")]
    #[case::space(0x20, COMMON_SCRIPT)]
    #[case::combining_acute(0x0301, INHERITED_SCRIPT)]
    #[case::devanagari_ka(0x0915, "Devanagari")]
    #[case::hiragana_a(0x3042, "Hiragana")]
    #[case::hangul_syllable(0xAC00, "Hangul")]
    #[case::gap(0x0530, UNKNOWN_SCRIPT)]
    #[case::past_table(0x10FFFD, UNKNOWN_SCRIPT)]
    fn names(#[case] codepoint: u32, #[case] expected: &str) {
        assert_eq!(script_name(codepoint), expected);
    }

    #[rstest]
    #[case::latin('A' as u32, &[Tag::new(b"latn")])]
    #[case::common(0x20, &[DEFAULT])]
    #[case::inherited(0x0301, &[INHERITED])]
    #[case::revised_first(0x0915, &[Tag::new(b"dev2"), Tag::new(b"deva")])]
    #[case::kana(0x30A2, &[Tag::new(b"kana")])]
    #[case::padded(0x0E81, &[Tag::new(b"lao ")])]
    #[case::unknown(0x10FFFD, &[DEFAULT])]
    fn tags(#[case] codepoint: u32, #[case] expected: &[Tag]) {
        assert_eq!(script_tags(codepoint), expected);
    }
}
