use smallvec::{SmallVec, smallvec};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-capacity bitset of active clip indices.
///
/// Sized once to a model's clip count. Insertion, removal and membership are
/// O(1); the population count is tracked alongside so it never has to be
/// recomputed, and repeated inserts or removals leave it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    words: SmallVec<[u64; 2]>,
    capacity: usize,
    count: usize,
}

impl ActiveSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: smallvec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
            count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.capacity && self.words[index / WORD_BITS] & bit(index) != 0
    }

    /// Sets the bit; returns `true` if it was previously clear.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.capacity || self.contains(index) {
            return false;
        }
        self.words[index / WORD_BITS] |= bit(index);
        self.count += 1;
        true
    }

    /// Clears the bit; returns `true` if it was previously set.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.contains(index) {
            return false;
        }
        self.words[index / WORD_BITS] &= !bit(index);
        self.count -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.count = 0;
    }

    /// Set indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit_index = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(word_index * WORD_BITS + bit_index)
            })
        })
    }
}

#[inline]
fn bit(index: usize) -> u64 {
    1 << (index % WORD_BITS)
}
