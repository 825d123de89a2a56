#![forbid(unsafe_code)]

/// Selected rows of a table, one bit per row.
///
/// Bits are stored little-endian within each `u64` word:
/// - bit 0 is the LSB of word 0
/// - bit 63 is the MSB of word 0
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowMask {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl RowMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            words: Vec::with_capacity(rows.div_ceil(64)),
            len: 0,
            ones: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, selected: bool) {
        let bit = self.len % 64;
        if bit == 0 {
            self.words.push(0);
        }

        if selected {
            let word = self.len / 64;
            self.words[word] |= 1u64 << bit;
            self.ones += 1;
        }

        self.len += 1;
    }

    /// Whether `row` is selected; rows past the end are not.
    pub fn get(&self, row: usize) -> bool {
        if row >= self.len {
            return false;
        }
        let word = self.words[row / 64];
        ((word >> (row % 64)) & 1) == 1
    }

    /// Number of selected rows.
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    /// Selected row positions in increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_idx, &word)| {
                let mut remaining = word;
                std::iter::from_fn(move || {
                    if remaining == 0 {
                        return None;
                    }
                    let bit = remaining.trailing_zeros() as usize;
                    remaining &= remaining - 1;
                    Some(word_idx * 64 + bit)
                })
            })
            .take_while(move |&row| row < self.len)
    }

    pub fn to_rows(&self) -> Vec<usize> {
        self.iter_ones().collect()
    }
}

impl FromIterator<bool> for RowMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut mask = Self::with_capacity(iter.size_hint().0);
        for selected in iter {
            mask.push(selected);
        }
        mask
    }
}
