//! name test data

use crate::be_buffer;

/// Three records: Mac Roman family and PostScript names, and a Windows
/// family name.
///
/// The PostScript name has trailing whitespace.
pub fn names() -> Vec<u8> {
    let family_mac = [b'T', 0x8E, b's', b't'];
    let postscript = b"Test-Regular ";
    let family_win: Vec<u16> = "Test".encode_utf16().collect();
    be_buffer! {
        0u16,                   // format
        3u16,                   // count
        42u16,                  // storageOffset
        // platform, encoding, language, name id, length, offset
        [1u16, 0, 0, 1, 4, 0],
        [1u16, 0, 0, 6, 13, 4],
        [3u16, 1, 0x409, 1, 8, 17]
    }
    .extend(family_mac)
    .extend(*postscript)
    .extend(family_win)
    .into_vec()
}
