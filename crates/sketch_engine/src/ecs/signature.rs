//! Entity signature bitsets
//!
//! A signature records which component types an entity currently carries,
//! one bit per [`ComponentTypeId`](super::ComponentTypeId). Selectors test
//! set inclusion against it, so membership checks stay a handful of
//! bitwise ANDs per frame.
//!
//! The set grows on demand instead of being capped at the machine word
//! width; the component-type capacity is enforced separately by the
//! registry.

const BLOCK_BITS: usize = u64::BITS as usize;

/// A growable bitset keyed by component-type bit index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    blocks: Vec<u64>,
}

impl Signature {
    /// Create an empty signature
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bit at `index`
    pub fn set(&mut self, index: usize) {
        let block = index / BLOCK_BITS;
        if block >= self.blocks.len() {
            self.blocks.resize(block + 1, 0);
        }
        self.blocks[block] |= 1 << (index % BLOCK_BITS);
    }

    /// Clear the bit at `index`
    pub fn clear(&mut self, index: usize) {
        if let Some(block) = self.blocks.get_mut(index / BLOCK_BITS) {
            *block &= !(1 << (index % BLOCK_BITS));
        }
    }

    /// Test the bit at `index`
    pub fn test(&self, index: usize) -> bool {
        self.blocks
            .get(index / BLOCK_BITS)
            .is_some_and(|block| block >> (index % BLOCK_BITS) & 1 == 1)
    }

    /// Whether every bit set in `required` is also set here
    ///
    /// Short-circuits on the first block with a missing bit.
    pub fn contains_all(&self, required: &Signature) -> bool {
        required.blocks.iter().enumerate().all(|(i, req)| {
            let have = self.blocks.get(i).copied().unwrap_or(0);
            have & req == *req
        })
    }

    /// Whether no bit is set
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|block| *block == 0)
    }

    /// Clear every bit
    pub fn clear_all(&mut self) {
        self.blocks.clear();
    }

    /// Iterate the indices of set bits, ascending
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(i, block)| {
            (0..BLOCK_BITS)
                .filter(move |bit| block >> bit & 1 == 1)
                .map(move |bit| i * BLOCK_BITS + bit)
        })
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }
}
