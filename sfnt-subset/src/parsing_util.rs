//! subsetter input parsing util functions
use std::collections::BTreeSet;

use sfnt_types::{GlyphId, Tag};

use crate::SubsetError;

/// Characters that may separate or prefix code points in a unicode list.
const UNICODE_NOISE: &[char] = &[
    '>', '<', '+', ',', ';', '&', '#', '}', '{', '\\', 'x', 'X', 'u', 'U', 'n', 'N', 'i', 'I',
];

/// parse input gids string, which is a comma-separated list of glyph ids or
/// ranges, e.g. `1,5-7`.
pub fn populate_gids(gid_str: &str) -> Result<BTreeSet<GlyphId>, SubsetError> {
    let mut result = BTreeSet::new();
    for gid in gid_str.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Some((start, end)) = gid.split_once('-') {
            let start = parse_gid(start)?;
            let end = parse_gid(end)?;
            if start > end {
                return Err(SubsetError::InvalidGidRange {
                    start: start.into(),
                    end: end.into(),
                });
            }
            result.extend((start..=end).map(GlyphId::new));
        } else {
            result.insert(GlyphId::new(parse_gid(gid)?));
        }
    }
    Ok(result)
}

fn parse_gid(raw: &str) -> Result<u16, SubsetError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| SubsetError::InvalidGid(raw.to_owned()))
}

/// parse input unicodes string, which is a comma/whitespace-separated list of Unicode codepoints or ranges as hex numbers,
/// optionally prefixed with 'U+', 'u', etc. For example: --unicodes=41-5a,61-7a adds ASCII letters, so does the more verbose --unicodes=U+0041-005A,U+0061-007A.
pub fn parse_unicodes(unicode_str: &str) -> Result<BTreeSet<u32>, SubsetError> {
    let mut result = BTreeSet::new();
    let s = unicode_str.replace(UNICODE_NOISE, " ");
    for cp in s.split_whitespace() {
        if let Some((start, end)) = cp.split_once('-') {
            let start = parse_unicode(start)?;
            let end = parse_unicode(end)?;
            if start > end {
                return Err(SubsetError::InvalidUnicodeRange { start, end });
            }
            result.extend(start..=end);
        } else {
            result.insert(parse_unicode(cp)?);
        }
    }
    Ok(result)
}

fn parse_unicode(raw: &str) -> Result<u32, SubsetError> {
    u32::from_str_radix(raw, 16)
        .ok()
        .filter(|cp| char::from_u32(*cp).is_some())
        .ok_or_else(|| SubsetError::InvalidUnicode(raw.to_owned()))
}

//parse input tag list string, which is a comma/whitespace-separated list of table tags
pub fn parse_tag_list(input_str: &str) -> Result<BTreeSet<Tag>, SubsetError> {
    input_str
        .split(&[',', ' '])
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            Tag::new_checked(raw.as_bytes()).map_err(|_| SubsetError::InvalidTag(raw.to_owned()))
        })
        .collect()
}
