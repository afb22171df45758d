//! Binary-heap priority queue keyed by a totally ordered key, carrying an opaque payload.
//!
//! Entries with equal keys are popped in insertion order, which keeps enumeration
//! deterministic for a fixed input.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Which end of the key order is served first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SortOrder {
    /// Smallest key first.
    Less,
    /// Largest key first.
    Greater,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    seq: u64,
    order: SortOrder,
    value: V,
}

impl<K: Ord, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    // `BinaryHeap` is a max-heap: "greater" here means "served earlier".
    fn cmp(&self, other: &Self) -> Ordering {
        let by_key = match self.order {
            SortOrder::Less => other.key.cmp(&self.key),
            SortOrder::Greater => self.key.cmp(&other.key),
        };
        by_key.then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub struct PriorityQueue<K, V> {
    heap: BinaryHeap<Entry<K, V>>,
    order: SortOrder,
    seq: u64,
}

impl<K: Ord, V> PriorityQueue<K, V> {
    pub fn new(order: SortOrder) -> Self {
        Self {
            heap: BinaryHeap::new(),
            order,
            seq: 0,
        }
    }

    pub fn push(&mut self, key: K, value: V) {
        self.heap.push(Entry {
            key,
            seq: self.seq,
            order: self.order,
            value,
        });
        self.seq += 1;
    }

    /// Removes and returns the best entry.
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.heap.pop().map(|e| (e.key, e.value))
    }

    /// Returns the best entry without removing it.
    pub fn top(&self) -> Option<(&K, &V)> {
        self.heap.peek().map(|e| (&e.key, &e.value))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_ascending() {
        let mut pq = PriorityQueue::new(SortOrder::Less);
        for (k, v) in [(5, "e"), (1, "a"), (3, "c"), (2, "b"), (4, "d")] {
            pq.push(k, v);
        }
        assert_eq!(pq.top(), Some((&1, &"a")));
        let popped: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(_, v)| v).collect();
        assert_eq!(popped, vec!["a", "b", "c", "d", "e"]);
        assert!(pq.is_empty());
        assert_eq!(pq.pop(), None);
    }

    #[test]
    fn test_descending() {
        let mut pq = PriorityQueue::new(SortOrder::Greater);
        pq.push(1, ());
        pq.push(9, ());
        pq.push(4, ());
        let keys: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![9, 4, 1]);
    }

    #[test]
    fn test_equal_keys_are_fifo() {
        let mut pq = PriorityQueue::new(SortOrder::Less);
        pq.push(7, 'x');
        pq.push(7, 'y');
        pq.push(3, 'a');
        pq.push(7, 'z');
        let values: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(_, v)| v).collect();
        assert_eq!(values, vec!['a', 'x', 'y', 'z']);
    }

    #[test]
    fn test_clear() {
        let mut pq = PriorityQueue::new(SortOrder::Less);
        pq.push(1, 1);
        pq.push(2, 2);
        assert_eq!(pq.len(), 2);
        pq.clear();
        assert!(pq.is_empty());
    }
}
