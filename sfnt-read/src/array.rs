//! Arrays of big-endian scalars

use std::marker::PhantomData;

use types::Scalar;

use crate::read::ReadError;

/// A zero-copy view over a run of big-endian values.
#[derive(Clone, Copy)]
pub struct ScalarArray<'a, T> {
    bytes: &'a [u8],
    phantom: PhantomData<T>,
}

impl<'a, T: Scalar> ScalarArray<'a, T> {
    pub(crate) fn new(bytes: &'a [u8]) -> Result<Self, ReadError> {
        if bytes.len() % T::RAW_BYTE_LEN != 0 {
            return Err(ReadError::InvalidArrayLen);
        }
        Ok(Self {
            bytes,
            phantom: PhantomData,
        })
    }

    /// The number of items in the array.
    pub fn len(&self) -> usize {
        self.bytes.len() / T::RAW_BYTE_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the item at `idx`, or `None` if out of bounds.
    pub fn get(&self, idx: usize) -> Option<T> {
        let start = idx.checked_mul(T::RAW_BYTE_LEN)?;
        self.bytes.get(start..).and_then(T::read)
    }

    /// Returns the last item, if the array is non-empty.
    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a + Clone
    where
        T: 'a,
    {
        self.bytes.chunks_exact(T::RAW_BYTE_LEN).filter_map(T::read)
    }

    /// Binary search an array sorted by `f`.
    pub fn binary_search_by(&self, mut f: impl FnMut(T) -> std::cmp::Ordering) -> Result<usize, usize> {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let Some(item) = self.get(mid) else {
                return Err(lo);
            };
            match f(item) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Ok(mid),
            }
        }
        Err(lo)
    }

    /// The raw bytes of the array.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<T: Scalar> Default for ScalarArray<'_, T> {
    fn default() -> Self {
        Self {
            bytes: &[],
            phantom: PhantomData,
        }
    }
}

impl<T: Scalar + std::fmt::Debug> std::fmt::Debug for ScalarArray<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
