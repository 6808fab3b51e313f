//! glyf test data

/// One contour of four on-curve points tracing a 100 unit square.
#[rustfmt::skip]
pub static SQUARE: &[u8] = &[
    0x00, 0x01,             // numberOfContours
    0x00, 0x00, 0x00, 0x00, // xMin, yMin
    0x00, 0x64, 0x00, 0x64, // xMax, yMax
    0x00, 0x03,             // endPtsOfContours
    0x00, 0x00,             // instructionLength
    0x09, 0x03,             // flags: on curve, repeated 3 times
    0x00, 0x00, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, // x deltas
    0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0xFF, 0x9C, // y deltas
];

/// One contour alternating on/off/on/off curve points, using short
/// deltas of both signs.
#[rustfmt::skip]
pub static ALTERNATING: &[u8] = &[
    0x00, 0x01,             // numberOfContours
    0x00, 0x00, 0xFF, 0x9C, // xMin, yMin
    0x00, 0x64, 0x00, 0x64, // xMax, yMax
    0x00, 0x03,             // endPtsOfContours
    0x00, 0x00,             // instructionLength
    0x31,                   // on curve, x and y repeat
    0x36,                   // off curve, positive short x and y
    0x17,                   // on curve, positive short x, negative short y
    0x06,                   // off curve, negative short x and y
    0x32, 0x32, 0x32,       // x deltas: 50, 50, -50
    0x64, 0x64, 0x64,       // y deltas: 100, -100, -100
];

/// A composite of glyph 1 (unchanged) and glyph 2 (scaled by half and
/// moved by (200, -10)).
#[rustfmt::skip]
pub static COMPOSITE: &[u8] = &[
    0xFF, 0xFF,             // numberOfContours
    0x00, 0x00, 0xFF, 0xF6, // xMin, yMin
    0x01, 0x2C, 0x00, 0x64, // xMax, yMax
    0x00, 0x22,             // flags: ARGS_ARE_XY_VALUES | MORE_COMPONENTS
    0x00, 0x01,             // glyphIndex
    0x00, 0x00,             // byte arguments
    0x00, 0x0B,             // flags: ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES | WE_HAVE_A_SCALE
    0x00, 0x02,             // glyphIndex
    0x00, 0xC8, 0xFF, 0xF6, // word arguments: 200, -10
    0x20, 0x00,             // scale: 0.5
];

/// A composite glyph with one unscaled component per entry in `components`.
pub fn composite(components: &[u16]) -> Vec<u8> {
    let mut buf = crate::bebuffer::BeBuffer::new().extend([-1i16, 0, 0, 0, 0]);
    for (i, gid) in components.iter().enumerate() {
        let more = if i + 1 < components.len() { 0x0020 } else { 0 };
        buf = buf
            .push(0x0002u16 | more)
            .push(*gid)
            .extend([0u8, 0]);
    }
    buf.into_vec()
}
