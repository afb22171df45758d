//! Persistent mergeable heap forest.
//!
//! Every vertex owns a *handle* to a randomized meldable min-heap of sidetracks,
//! keyed by sidetrack cost. Handles of different vertices share structure: a
//! vertex's heap is built by copying its parent's root and melding its own
//! sidetracks into that copy. Nodes reachable from more than one handle are never
//! mutated; every mutation goes through a fresh copy.
//!
//! Nodes live in an arena and are addressed by [`NodeId`], so sharing and copying
//! are just index manipulation and every copy allocates a new slot.
//!
//! Melding descends into one of the two children chosen uniformly at random,
//! which keeps the expected depth logarithmic without any explicit balancing.
//! The random source is a seeded [`ChaCha8Rng`], so a fixed seed reproduces the
//! same forest.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::weight::Weight;

/// Index of a node in the heap arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A sidetrack edge `curr -> next` stored in the heap.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HeapNode {
    pub curr: usize,
    pub next: usize,
    pub sidetrack: Weight,
    pub children: [Option<NodeId>; 2],
}

pub struct PersistentHeap {
    nodes: Vec<HeapNode>,
    roots: Vec<Option<NodeId>>,
    rng: ChaCha8Rng,
}

impl PersistentHeap {
    /// Creates a forest of `size` empty handles.
    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            roots: vec![None; size],
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Drops all nodes and resets to `size` empty handles.
    pub fn assign(&mut self, size: usize) {
        self.nodes.clear();
        self.roots.clear();
        self.roots.resize(size, None);
    }

    /// Number of handles.
    pub fn size(&self) -> usize {
        self.roots.len()
    }

    /// Number of allocated nodes, shared ones counted once.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root of the heap owned by `vertex`.
    pub fn root(&self, vertex: usize) -> Option<NodeId> {
        self.roots[vertex]
    }

    pub fn node(&self, id: NodeId) -> &HeapNode {
        &self.nodes[id.0]
    }

    /// Minimum sidetrack of the heap owned by `vertex`.
    pub fn top(&self, vertex: usize) -> Option<&HeapNode> {
        self.root(vertex).map(|id| self.node(id))
    }

    /// Makes `dest` own a shallow copy of the heap of `src`.
    ///
    /// The copy has a private root and shares all children with `src`.
    pub fn copy_to(&mut self, src: usize, dest: usize) {
        let root = self.roots[src];
        self.roots[dest] = root.map(|id| self.copy(id));
    }

    /// Melds a single sidetrack `curr -> next` into the heap owned by `vertex`.
    ///
    /// The root of that heap must be private to `vertex` (a fresh [`copy_to`][Self::copy_to]
    /// or the result of earlier inserts); everything below it may be shared.
    pub fn insert_at(&mut self, vertex: usize, curr: usize, next: usize, sidetrack: Weight) {
        let single = self.alloc(HeapNode {
            curr,
            next,
            sidetrack,
            children: [None, None],
        });
        let root = self.roots[vertex];
        self.roots[vertex] = self.merge(root, Some(single));
    }

    fn alloc(&mut self, node: HeapNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn copy(&mut self, id: NodeId) -> NodeId {
        let node = self.nodes[id.0].clone();
        self.alloc(node)
    }

    /// Melds two heaps whose roots are both private to the caller.
    fn merge(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        let (mut a, mut b) = match (a, b) {
            (None, b) => return b,
            (a, None) => return a,
            (Some(a), Some(b)) => (a, b),
        };
        if self.nodes[a.0].sidetrack > self.nodes[b.0].sidetrack {
            std::mem::swap(&mut a, &mut b);
        }

        let side = self.rng.random_range(0..2usize);
        let child = self.nodes[a.0].children[side];
        let child = child.map(|c| self.copy(c));
        let merged = self.merge(child, Some(b));
        self.nodes[a.0].children[side] = merged;
        Some(a)
    }
}

impl fmt::Debug for PersistentHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentHeap")
            .field("size", &self.roots.len())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn w(x: u32) -> Weight {
        Weight::from(x)
    }

    /// All `(curr, next, sidetrack)` entries of a heap, checking the heap property on the way.
    fn collect(heap: &PersistentHeap, root: Option<NodeId>) -> Vec<(usize, usize, Weight)> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = heap.node(id);
            for child in node.children.iter().flatten() {
                assert!(heap.node(*child).sidetrack >= node.sidetrack, "heap order violated");
                stack.push(*child);
            }
            out.push((node.curr, node.next, node.sidetrack.clone()));
        }
        out.sort();
        out
    }

    #[test]
    fn test_insert_keeps_min_on_top() {
        let mut heap = PersistentHeap::new(1, 42);
        for (i, s) in [9u32, 4, 7, 1, 8, 3].into_iter().enumerate() {
            heap.insert_at(0, 0, i, w(s));
        }
        assert_eq!(heap.top(0).map(|n| n.sidetrack.clone()), Some(w(1)));
        assert_eq!(collect(&heap, heap.root(0)).len(), 6);
    }

    #[test]
    fn test_copy_shares_children() {
        let mut heap = PersistentHeap::new(2, 7);
        heap.insert_at(0, 0, 1, w(2));
        heap.insert_at(0, 0, 2, w(5));
        let before = heap.node_count();

        heap.copy_to(0, 1);
        assert_eq!(heap.node_count(), before + 1);
        assert_ne!(heap.root(0), heap.root(1));
        assert_eq!(heap.node(heap.root(0).unwrap()).children, heap.node(heap.root(1).unwrap()).children);
    }

    #[test]
    fn test_persistence() {
        let mut heap = PersistentHeap::new(3, 1);
        for s in [5u32, 3, 8, 6] {
            heap.insert_at(0, 0, s as usize, w(s));
        }
        let parent = collect(&heap, heap.root(0));

        heap.copy_to(0, 1);
        heap.insert_at(1, 1, 10, w(1));
        heap.insert_at(1, 1, 11, w(7));
        heap.copy_to(0, 2);
        heap.insert_at(2, 2, 12, w(4));

        // The parent heap is untouched by melds into its descendants.
        assert_eq!(collect(&heap, heap.root(0)), parent);

        let child1 = collect(&heap, heap.root(1));
        assert_eq!(child1.len(), parent.len() + 2);
        assert_eq!(heap.top(1).map(|n| (n.curr, n.next)), Some((1, 10)));

        let child2 = collect(&heap, heap.root(2));
        assert_eq!(child2.len(), parent.len() + 1);
        assert!(!child2.iter().any(|&(c, _, _)| c == 1));
    }

    #[test]
    fn test_empty_copy() {
        let mut heap = PersistentHeap::new(2, 0);
        heap.copy_to(0, 1);
        assert_eq!(heap.root(1), None);
        assert!(heap.top(1).is_none());
    }

    #[test]
    fn test_assign() {
        let mut heap = PersistentHeap::new(1, 0);
        heap.insert_at(0, 0, 0, w(1));
        heap.assign(4);
        assert_eq!(heap.size(), 4);
        assert_eq!(heap.node_count(), 0);
        assert!(heap.root(0).is_none());
    }
}
