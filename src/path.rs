//! Accumulated state of a partial path.

use crate::bitset::BitSet;

/// Selected flat vertices of a partial path and the union of their conflict sets.
///
/// Two partial paths can be joined iff `(a.set ∪ b.set) ∩ (a.conflict ∪ b.conflict) = ∅`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PathState {
    pub set: BitSet,
    pub conflict: BitSet,
}

impl PathState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A path consisting of a single vertex that forbids nothing.
    pub fn start(flat: usize) -> Self {
        Self {
            set: BitSet::singleton(flat),
            conflict: BitSet::empty(),
        }
    }

    /// Adds a flat vertex and its conflicts.
    pub fn insert(&mut self, flat: usize, conflicts: &[BitSet]) {
        self.set.insert(flat);
        self.conflict.union_with(&conflicts[flat]);
    }

    /// Returns true if no selected vertex is forbidden by another selected vertex.
    pub fn is_consistent(&self) -> bool {
        !self.set.intersects(&self.conflict)
    }

    /// Returns true if the two paths cannot be joined.
    pub fn conflicts_with(&self, other: &PathState) -> bool {
        self.set.intersects(&self.conflict)
            || self.set.intersects(&other.conflict)
            || other.set.intersects(&self.conflict)
            || other.set.intersects(&other.conflict)
    }

    /// Selected vertices of both paths.
    pub fn joined_set(&self, other: &PathState) -> BitSet {
        self.set.union(&other.set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflicts() -> Vec<BitSet> {
        // 0 conflicts with 2; 1 and 3 are free.
        vec![BitSet::singleton(2), BitSet::empty(), BitSet::singleton(0), BitSet::empty()]
    }

    #[test]
    fn test_insert_accumulates_conflicts() {
        let c = conflicts();
        let mut p = PathState::start(1);
        p.insert(0, &c);
        assert!(p.set.contains(0) && p.set.contains(1));
        assert!(p.conflict.contains(2));
        assert!(p.is_consistent());

        p.insert(2, &c);
        assert!(!p.is_consistent());
    }

    #[test]
    fn test_conflicts_with() {
        let c = conflicts();
        let mut a = PathState::new();
        a.insert(0, &c);
        let mut b = PathState::new();
        b.insert(2, &c);
        let mut d = PathState::new();
        d.insert(3, &c);

        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
        assert!(!a.conflicts_with(&d));
        assert_eq!(a.joined_set(&d).iter().collect::<Vec<_>>(), vec![0, 3]);
    }
}
