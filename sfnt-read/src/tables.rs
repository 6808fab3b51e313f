//! The various font tables

/// Generates an accessor for a fixed-offset field.
///
/// All tables validate their minimum length on read, so these reads cannot
/// fail for fields inside that length.
macro_rules! field {
    ($(#[$meta:meta])* $name:ident: $ty:ty = $offset:expr) => {
        $(#[$meta])*
        pub fn $name(&self) -> $ty {
            self.data.read_at::<$ty>($offset).unwrap_or_default()
        }
    };
}

/// Generates an accessor for a field that only exists in later versions.
macro_rules! optional_field {
    ($(#[$meta:meta])* $name:ident: $ty:ty = $offset:expr) => {
        $(#[$meta])*
        pub fn $name(&self) -> Option<$ty> {
            self.data.read_at::<$ty>($offset).ok()
        }
    };
}

pub mod cmap;
pub mod glyf;
pub mod gsub;
pub mod head;
pub mod hvhea;
pub mod hvmtx;
pub mod kern;
pub mod layout;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;
pub mod vorg;

/// The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table
pub mod hhea {
    use types::Tag;

    /// 'hhea'
    pub const TAG: Tag = Tag::new(b"hhea");

    pub type Hhea<'a> = super::hvhea::HVhea<'a>;
}

/// The [vhea](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea) table
pub mod vhea {
    use types::Tag;

    /// 'vhea'
    pub const TAG: Tag = Tag::new(b"vhea");

    pub type Vhea<'a> = super::hvhea::HVhea<'a>;
}

/// The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table
pub mod hmtx {
    use types::Tag;

    /// 'hmtx'
    pub const TAG: Tag = Tag::new(b"hmtx");

    pub type Hmtx<'a> = super::hvmtx::HVmtx<'a>;
}

/// The [vmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/vmtx) table
pub mod vmtx {
    use types::Tag;

    /// 'vmtx'
    pub const TAG: Tag = Tag::new(b"vmtx");

    pub type Vmtx<'a> = super::hvmtx::HVmtx<'a>;
}

/// Calculate an OpenType checksum of `data`.
///
/// The data is summed as big-endian u32 words, with the final partial word
/// padded with zeros.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut chunks = data.chunks_exact(4);
    let mut sum = 0u32;
    for chunk in chunks.by_ref() {
        sum = sum.wrapping_add(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    let rem = chunks.remainder();
    if !rem.is_empty() {
        let mut last = [0u8; 4];
        last[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::compute_checksum;

    #[test]
    fn checksum_pads_final_word() {
        assert_eq!(compute_checksum(&[]), 0);
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        assert_eq!(compute_checksum(&[1]), 0x0100_0000);
        assert_eq!(compute_checksum(&[0xff; 8]), 0xffff_fffe);
    }
}
