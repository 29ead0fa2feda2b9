//! Item size tracking with O(log n) offset lookups.

/// Sizes of every item in a virtual list.
///
/// Unmeasured items use the configured estimate. A Fenwick tree over the
/// sizes keeps offset lookups logarithmic so windows can be computed over
/// very long lists.
///
/// Item `i` occupies offsets `[offset_of(i), offset_of(i) + get(i))`.
#[derive(Debug, Clone)]
pub struct ItemSizes {
    /// Individual sizes, indexed by item.
    sizes: Vec<u32>,
    /// 1-based Fenwick tree of partial sums.
    tree: Vec<u64>,
    /// Size assumed for items that were never measured.
    estimate: u32,
}

impl ItemSizes {
    /// Create a tracker for `len` items, all at the estimated size.
    pub fn new(len: usize, estimate: u32) -> Self {
        let mut sizes = Self {
            sizes: vec![estimate; len],
            tree: Vec::new(),
            estimate,
        };
        sizes.rebuild();
        sizes
    }

    /// Number of items tracked.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether no items are tracked.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Size assumed for unmeasured items.
    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Size of the item at `index` (the estimate when out of range).
    pub fn get(&self, index: usize) -> u32 {
        self.sizes.get(index).copied().unwrap_or(self.estimate)
    }

    /// Record the measured size of an item. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, size: u32) {
        let Some(current) = self.sizes.get_mut(index) else {
            return;
        };
        let old = *current;
        if old == size {
            return;
        }
        *current = size;

        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] = self.tree[i] - u64::from(old) + u64::from(size);
            i += i & i.wrapping_neg();
        }
    }

    /// Offset at which the item at `index` starts.
    ///
    /// `offset_of(len())` is the total size.
    pub fn offset_of(&self, index: usize) -> u64 {
        let mut i = index.min(self.sizes.len());
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Total size of all items.
    pub fn total(&self) -> u64 {
        self.offset_of(self.sizes.len())
    }

    /// Index of the item occupying `offset`, clamped to the last item.
    ///
    /// Returns 0 for an empty tracker.
    pub fn index_at(&self, offset: u64) -> usize {
        let len = self.sizes.len();
        if len == 0 {
            return 0;
        }

        // Binary lifting: find how many leading items end at or before `offset`.
        let mut pos = 0;
        let mut remaining = offset;
        let mut step = len.next_power_of_two();
        while step > 0 {
            let next = pos + step;
            if next <= len && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        pos.min(len - 1)
    }

    /// Change the number of tracked items, keeping existing measurements.
    pub fn resize(&mut self, len: usize) {
        if len == self.sizes.len() {
            return;
        }
        self.sizes.resize(len, self.estimate);
        self.rebuild();
    }

    /// Forget all measurements.
    pub fn reset(&mut self) {
        self.sizes.fill(self.estimate);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let len = self.sizes.len();
        self.tree = vec![0; len + 1];
        for (i, &size) in self.sizes.iter().enumerate() {
            self.tree[i + 1] += u64::from(size);
            let parent = (i + 1) + ((i + 1) & (i + 1).wrapping_neg());
            if parent <= len {
                self.tree[parent] += self.tree[i + 1];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_with_uniform_sizes() {
        let sizes = ItemSizes::new(5, 10);
        assert_eq!(sizes.offset_of(0), 0);
        assert_eq!(sizes.offset_of(3), 30);
        assert_eq!(sizes.total(), 50);
    }

    #[test]
    fn test_index_at_boundaries() {
        let sizes = ItemSizes::new(5, 10);
        assert_eq!(sizes.index_at(0), 0);
        assert_eq!(sizes.index_at(9), 0);
        assert_eq!(sizes.index_at(10), 1);
        assert_eq!(sizes.index_at(49), 4);
        assert_eq!(sizes.index_at(500), 4);
    }

    #[test]
    fn test_measured_sizes() {
        let mut sizes = ItemSizes::new(4, 10);
        sizes.set(1, 30);
        assert_eq!(sizes.get(1), 30);
        assert_eq!(sizes.offset_of(2), 40);
        assert_eq!(sizes.total(), 60);
        assert_eq!(sizes.index_at(39), 1);
        assert_eq!(sizes.index_at(40), 2);
    }

    #[test]
    fn test_resize_keeps_measurements() {
        let mut sizes = ItemSizes::new(2, 10);
        sizes.set(0, 5);
        sizes.resize(4);
        assert_eq!(sizes.get(0), 5);
        assert_eq!(sizes.get(3), 10);
        assert_eq!(sizes.total(), 35);

        sizes.reset();
        assert_eq!(sizes.total(), 40);
    }

    #[test]
    fn test_empty() {
        let sizes = ItemSizes::new(0, 10);
        assert!(sizes.is_empty());
        assert_eq!(sizes.total(), 0);
        assert_eq!(sizes.index_at(100), 0);
    }
}
