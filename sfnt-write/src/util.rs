//! Misc utility functions

/// The binary search parameters stored in table directories and some
/// subtable headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    /// Compute the search parameters for `n_items` entries of `item_size`
    /// bytes each.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>
    pub fn compute(n_items: usize, item_size: usize) -> Self {
        if n_items == 0 {
            return SearchRange {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = n_items.ilog2();
        let search_range = (1usize << entry_selector) * item_size;
        let range_shift = n_items * item_size - search_range;
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// <https://github.com/google/woff2/blob/a0d0ed7da27b708c0a4e96ad7a998bddc933c06e/src/round.h#L19>
pub(crate) fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 16, (16, 0, 0))]
    #[case(9, 16, (128, 3, 16))]
    #[case(0x16, 16, (256, 4, 96))]
    #[case(4, 2, (8, 2, 0))]
    #[case(5, 2, (8, 2, 2))]
    fn search_params(#[case] n: usize, #[case] size: usize, #[case] expected: (u16, u16, u16)) {
        let computed = SearchRange::compute(n, size);
        assert_eq!(
            (
                computed.search_range,
                computed.entry_selector,
                computed.range_shift
            ),
            expected
        );
    }

    #[test]
    fn round_to_four() {
        assert_eq!(round4(0), 0);
        assert_eq!(round4(1), 4);
        assert_eq!(round4(4), 4);
        assert_eq!(round4(13), 16);
    }
}
