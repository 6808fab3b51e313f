//! Big-endian byte fixtures

use sfnt_types::Scalar;

/// Bytes assembled field by field, each written in its on-disk encoding.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Appends one field.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend_from_slice(item.to_raw().as_ref());
        self
    }

    /// Appends a run of fields of one type.
    pub fn extend<T: Scalar>(self, items: impl IntoIterator<Item = T>) -> Self {
        items.into_iter().fold(self, |buf, item| buf.push(item))
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

/// Builds a [`BeBuffer`] from a list of fields.
///
/// A field is a typed literal (`1u16`), a parenthesized expression
/// (`(Tag::new(b"head"))`, `(-1i16)`) or an array of one type (`[1u8, 2]`).
#[macro_export]
macro_rules! be_buffer {
    ( $( $item:tt ),* $(,)? ) => {{
        let buf = $crate::bebuffer::BeBuffer::new();
        $( let buf = $crate::be_buffer_add!(buf, $item); )*
        buf
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! be_buffer_add {
    ($buf:ident, [$($v:expr),* $(,)?]) => {
        $buf.extend([$($v),*])
    };
    ($buf:ident, ($v:expr)) => {
        $buf.push($v)
    };
    ($buf:ident, $v:literal) => {
        $buf.push($v)
    };
}
