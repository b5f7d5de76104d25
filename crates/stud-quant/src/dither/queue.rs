//! Indexed binary min-heap
//!
//! Items are the integers `0..n` (pixel indices). Each item carries an
//! `f64` key and the heap tracks every item's position, so keys can be
//! changed in place. Ordering is by `(key, item)`, which makes the pop
//! order fully deterministic even when keys tie.

use std::cmp::Ordering;

const ABSENT: usize = usize::MAX;

#[derive(Debug, Clone)]
pub(crate) struct IndexedMinHeap {
    heap: Vec<usize>,
    positions: Vec<usize>,
    keys: Vec<f64>,
}

impl IndexedMinHeap {
    /// Heap containing every item `0..keys.len()`.
    pub(crate) fn from_keys(keys: Vec<f64>) -> Self {
        let n = keys.len();
        let mut heap = Self {
            heap: (0..n).collect(),
            positions: (0..n).collect(),
            keys,
        };
        heap.heapify();
        heap
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub(crate) fn contains(&self, item: usize) -> bool {
        self.positions.get(item).is_some_and(|&p| p != ABSENT)
    }

    /// Remove and return the item with the smallest key.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let item = self.heap.pop()?;
        self.positions[item] = ABSENT;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// Change the key of a queued item and restore heap order.
    ///
    /// Items no longer in the heap are ignored.
    pub(crate) fn update(&mut self, item: usize, key: f64) {
        if !self.contains(item) {
            return;
        }
        self.keys[item] = key;
        let pos = self.positions[item];
        self.sift_up(pos);
        self.sift_down(self.positions[item]);
    }

    /// Change a key without restoring order; call [`heapify`](Self::heapify)
    /// afterwards.
    pub(crate) fn set_key_unordered(&mut self, item: usize, key: f64) {
        self.keys[item] = key;
    }

    /// Queued items, in heap order.
    pub(crate) fn items(&self) -> &[usize] {
        &self.heap
    }

    /// Restore heap order over every queued item.
    pub(crate) fn heapify(&mut self) {
        for pos in (0..self.heap.len() / 2).rev() {
            self.sift_down(pos);
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (ia, ib) = (self.heap[a], self.heap[b]);
        match self.keys[ia].total_cmp(&self.keys[ib]) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => ia < ib,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = a;
        self.positions[self.heap[b]] = b;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut IndexedMinHeap) -> Vec<usize> {
        std::iter::from_fn(|| heap.pop()).collect()
    }

    #[test]
    fn test_pops_in_key_order() {
        let mut heap = IndexedMinHeap::from_keys(vec![5.0, 1.0, 4.0, 2.0, 3.0]);
        assert_eq!(heap.len(), 5);
        assert_eq!(drain(&mut heap), vec![1, 3, 4, 2, 0]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_ties_break_on_item() {
        let mut heap = IndexedMinHeap::from_keys(vec![1.0; 6]);
        assert_eq!(drain(&mut heap), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_update_moves_both_ways() {
        let mut heap = IndexedMinHeap::from_keys(vec![1.0, 2.0, 3.0, 4.0]);
        heap.update(3, 0.5);
        heap.update(0, 10.0);
        assert_eq!(drain(&mut heap), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_update_after_pop_is_ignored() {
        let mut heap = IndexedMinHeap::from_keys(vec![1.0, 2.0]);
        assert_eq!(heap.pop(), Some(0));
        assert!(!heap.contains(0));
        heap.update(0, -1.0);
        assert_eq!(drain(&mut heap), vec![1]);
    }

    #[test]
    fn test_rebuild_after_bulk_change() {
        let mut heap = IndexedMinHeap::from_keys(vec![1.0, 2.0, 3.0, 4.0]);
        heap.pop();
        let queued: Vec<usize> = heap.items().to_vec();
        for item in queued {
            heap.set_key_unordered(item, 10.0 - item as f64);
        }
        heap.heapify();
        assert_eq!(drain(&mut heap), vec![3, 2, 1]);
    }

    #[test]
    fn test_matches_sorted_order_on_larger_input() {
        let keys: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64).collect();
        let mut expected: Vec<usize> = (0..200).collect();
        expected.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]).then(a.cmp(&b)));
        let mut heap = IndexedMinHeap::from_keys(keys);
        assert_eq!(drain(&mut heap), expected);
    }
}
