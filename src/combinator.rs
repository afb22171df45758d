//! Ranked lazy enumeration of conflict-free source-to-sink paths.
//!
//! [`CombinatorWithSidetrack`] is a k-shortest-paths generator in the style of
//! Eppstein's algorithm. Every path is described relative to the shortest-path
//! tree toward the sink by the sequence of *sidetracks* (non-tree edges) it takes.
//! A best-first search over those sequences, driven by the persistent heap forest,
//! yields paths in non-decreasing weight order without ever materializing the
//! whole path space.
//!
//! Paths are additionally filtered by conflict sets: a path is emitted only if no
//! two of its vertices conflict, and a partial path that is already inconsistent is
//! never extended further.
//!
//! # Search state
//!
//! A queue entry `(weight, node, prefix, last)` means: the path follows the fixed
//! prefix up to vertex `last`, then takes the sidetrack stored in heap node `node`
//! (which lies somewhere on the tree path below `last`), then follows the tree to
//! the sink. Popping an entry emits that path and pushes
//!
//! - the two heap children of `node` with the same prefix (replace this sidetrack
//!   by the next-best alternative), and
//! - the top of the heap at the new last vertex with the extended prefix (keep this
//!   sidetrack and take one more further down).
//!
//! Each pushed key is the popped key plus a non-negative delta, hence keys are
//! popped in non-decreasing order and every sidetrack sequence is visited once.

use std::sync::Arc;

use log::debug;

use crate::bitset::BitSet;
use crate::converter::VertexConverter;
use crate::graph::WeightedGraph;
use crate::heap::{NodeId, PersistentHeap};
use crate::path::PathState;
use crate::queue::{PriorityQueue, SortOrder};
use crate::sidetrack::build_sidetrack_heap;
use crate::sssp::dijkstra;
use crate::weight::{Weight, WeightScale};

/// A source of ranked combinations.
pub trait Combinator {
    /// Returns up to `count` further combinations, best first. Returning fewer than
    /// `count` means the space is exhausted; every later call returns nothing.
    fn next_combination(&mut self, count: usize) -> Vec<BitSet>;

    /// Returns true once no further combination can be produced.
    fn is_exhausted(&self) -> bool;
}

/// Lifecycle of the enumerator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum State {
    /// Nothing emitted yet; the shortest path is still pending.
    Begin,
    Continue,
    /// Exhausted, irreversibly.
    End,
}

/// Payload of a search-queue entry.
#[derive(Debug, Clone)]
struct Candidate {
    node: NodeId,
    prefix: Arc<PathState>,
    last: usize,
}

pub struct CombinatorWithSidetrack {
    conflicts: Vec<BitSet>,
    conv: VertexConverter,
    /// Successor of each vertex on its shortest path to the sink.
    next_vertex: Vec<Option<usize>>,
    /// Shortest distance from each vertex to the sink.
    distance: Vec<Weight>,
    /// Tree path from each vertex to the sink.
    suffix: Vec<PathState>,
    heap: PersistentHeap,
    pq: PriorityQueue<Weight, Candidate>,
    infeasible: Weight,
    /// Flat indices of the pseudo-vertices, removed from every emitted set.
    pseudo: BitSet,
    /// Suffix used when a path has already reached the sink.
    empty: PathState,
    state: State,
    emitted: usize,
}

impl CombinatorWithSidetrack {
    /// Precomputes shortest paths and the sidetrack heap forest of `graph`.
    ///
    /// `conflicts[f]` is the set of flat indices conflicting with flat index `f`;
    /// `seed` drives the randomized heap melds.
    pub fn new(graph: &WeightedGraph, conflicts: Vec<BitSet>, conv: VertexConverter, scale: &WeightScale, seed: u64) -> Self {
        assert_eq!(graph.size(), conv.vertex_count(), "Graph size does not match the vertex layout");
        assert!(conflicts.len() >= conv.flat_count(), "Missing conflict sets");

        let (source, sink) = (conv.source(), conv.sink());
        let sp = dijkstra(&graph.reversed(), sink, scale.infinite());
        let suffix = sp.restore_paths(&conflicts, &conv, sink);
        let heap = build_sidetrack_heap(graph, &sp, scale.infeasible(), seed);

        let infeasible = scale.infeasible().clone();
        let state = if sp.distance[source] >= infeasible {
            debug!("CombinatorWithSidetrack: sink is unreachable from source");
            State::End
        } else {
            State::Begin
        };

        let pseudo: BitSet = [source, conv.subsource(), sink].into_iter().map(|v| conv.revert(v)).collect();

        Self {
            conflicts,
            conv,
            next_vertex: sp.prev_vertex,
            distance: sp.distance,
            suffix,
            heap,
            pq: PriorityQueue::new(SortOrder::Less),
            infeasible,
            pseudo,
            empty: PathState::new(),
            state,
            emitted: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of combinations emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Weight of the best path, if any path exists.
    pub fn best_weight(&self) -> Option<&Weight> {
        let d = &self.distance[self.conv.source()];
        (d < &self.infeasible).then_some(d)
    }

    fn suffix_after(&self, vertex: usize) -> &PathState {
        match self.next_vertex[vertex] {
            Some(next) => &self.suffix[next],
            None => &self.empty,
        }
    }

    fn finish(&self, prefix: &PathState, suffix: &PathState) -> BitSet {
        let mut set = prefix.joined_set(suffix);
        set.difference_with(&self.pseudo);
        set
    }

    /// Seeds the search queue and returns the shortest path if it is conflict-free.
    fn initialize(&mut self) -> Option<BitSet> {
        self.state = State::Continue;
        debug!("CombinatorWithSidetrack: BEGIN -> CONTINUE");

        let source = self.conv.source();
        let prefix = PathState::start(self.conv.revert(source));

        if let Some(root) = self.heap.root(source) {
            let key = &self.distance[source] + &self.heap.node(root).sidetrack;
            self.pq.push(
                key,
                Candidate {
                    node: root,
                    prefix: Arc::new(prefix.clone()),
                    last: source,
                },
            );
        }

        let suffix = self.suffix_after(source);
        if prefix.conflicts_with(suffix) {
            None
        } else {
            Some(self.finish(&prefix, suffix))
        }
    }

    /// Follows the tree from `from` up to (excluding) `until`, adding every vertex.
    fn walk_tree(&self, prefix: &mut PathState, from: usize, until: usize) {
        let mut v = self.next_vertex[from];
        while let Some(u) = v {
            if u == until {
                break;
            }
            prefix.insert(self.conv.revert(u), &self.conflicts);
            v = self.next_vertex[u];
        }
    }

    fn expand(&mut self, weight: Weight, cand: Candidate, paths: &mut Vec<BitSet>) {
        let node = self.heap.node(cand.node).clone();

        // Rebuild the path up to and including the sidetrack, on a private copy.
        let mut prefix = (*cand.prefix).clone();
        if cand.last != node.curr {
            self.walk_tree(&mut prefix, cand.last, node.curr);
            prefix.insert(self.conv.revert(node.curr), &self.conflicts);
        }
        prefix.insert(self.conv.revert(node.next), &self.conflicts);
        let last = node.next;

        let suffix = self.suffix_after(last);
        if !prefix.conflicts_with(suffix) {
            paths.push(self.finish(&prefix, suffix));
        }

        // Replace this sidetrack by the next-best alternative.
        for child in node.children.into_iter().flatten() {
            let key = &weight - &node.sidetrack + &self.heap.node(child).sidetrack;
            self.pq.push(
                key,
                Candidate {
                    node: child,
                    prefix: Arc::clone(&cand.prefix),
                    last: cand.last,
                },
            );
        }

        // Keep it and take one more further down.
        if prefix.is_consistent() {
            if let Some(root) = self.heap.root(last) {
                let key = &weight + &self.heap.node(root).sidetrack;
                self.pq.push(
                    key,
                    Candidate {
                        node: root,
                        prefix: Arc::new(prefix),
                        last,
                    },
                );
            }
        }
    }
}

impl Combinator for CombinatorWithSidetrack {
    fn next_combination(&mut self, count: usize) -> Vec<BitSet> {
        let mut paths = Vec::new();

        if self.state == State::End {
            return paths;
        }
        if self.state == State::Begin {
            if let Some(path) = self.initialize() {
                paths.push(path);
            }
        }

        while paths.len() < count {
            let Some((weight, cand)) = self.pq.pop() else {
                break;
            };
            self.expand(weight, cand, &mut paths);
        }

        self.emitted += paths.len();
        if paths.len() < count {
            debug!("CombinatorWithSidetrack: CONTINUE -> END after {} combinations", self.emitted);
            self.state = State::End;
            self.pq.clear();
        }
        paths
    }

    fn is_exhausted(&self) -> bool {
        self.state == State::End
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn w(x: u32) -> Weight {
        Weight::from(x)
    }

    /// Vertices 0..k are "courses", then source, subsource, sink.
    fn conv(courses: usize) -> VertexConverter {
        VertexConverter::identity(courses + 3)
    }

    fn no_conflicts(conv: &VertexConverter) -> Vec<BitSet> {
        vec![BitSet::empty(); conv.flat_count()]
    }

    fn sets(paths: &[BitSet]) -> Vec<Vec<usize>> {
        paths.iter().map(|p| p.iter().collect()).collect()
    }

    /// source -> {0 | 1 | 2} -> sink, with weights 1, 2, 3.
    fn choice_graph() -> (WeightedGraph, VertexConverter) {
        let conv = conv(3);
        let (s, t) = (conv.source(), conv.sink());
        let mut g = WeightedGraph::new(conv.vertex_count());
        for (v, weight) in [(0, 1), (1, 2), (2, 3)] {
            g.add_directed_edge(s, v, w(weight));
            g.add_directed_edge(v, t, w(0));
        }
        (g, conv)
    }

    #[test]
    fn test_ranked_order() {
        let (g, conv) = choice_graph();
        let scale = WeightScale::new(3);
        let mut comb = CombinatorWithSidetrack::new(&g, no_conflicts(&conv), conv, &scale, 0);
        assert_eq!(comb.state(), State::Begin);
        assert_eq!(comb.best_weight(), Some(&w(1)));

        let paths = comb.next_combination(10);
        assert_eq!(sets(&paths), vec![vec![0], vec![1], vec![2]]);
        assert!(comb.is_exhausted());
        assert!(comb.next_combination(10).is_empty());
    }

    #[test]
    fn test_paging_matches_single_call() {
        let (g, conv) = choice_graph();
        let scale = WeightScale::new(3);

        let mut one = CombinatorWithSidetrack::new(&g, no_conflicts(&conv), conv, &scale, 0);
        let all = one.next_combination(3);

        let mut paged = CombinatorWithSidetrack::new(&g, no_conflicts(&conv), conv, &scale, 0);
        let mut got = paged.next_combination(1);
        got.extend(paged.next_combination(1));
        got.extend(paged.next_combination(1));
        assert_eq!(got, all);
        assert!(!paged.is_exhausted());
        assert!(paged.next_combination(1).is_empty());
        assert!(paged.is_exhausted());
        assert_eq!(paged.emitted(), 3);
    }

    #[test]
    fn test_conflicting_paths_are_skipped() {
        // source -> a -> b -> sink (weight 0) or source -> a -> c -> sink (weight 5);
        // a conflicts with b, so only {a, c} survives.
        let conv = conv(3);
        let (s, t) = (conv.source(), conv.sink());
        let mut g = WeightedGraph::new(conv.vertex_count());
        g.add_directed_edge(s, 0, w(0));
        g.add_directed_edge(0, 1, w(0));
        g.add_directed_edge(0, 2, w(5));
        g.add_directed_edge(1, t, w(0));
        g.add_directed_edge(2, t, w(0));

        let mut conflicts = no_conflicts(&conv);
        conflicts[0].insert(1);
        conflicts[1].insert(0);

        let scale = WeightScale::new(3);
        let mut comb = CombinatorWithSidetrack::new(&g, conflicts, conv, &scale, 3);
        let paths = comb.next_combination(5);
        assert_eq!(sets(&paths), vec![vec![0, 2]]);
        assert!(comb.is_exhausted());
    }

    #[test]
    fn test_unreachable_sink() {
        let conv = conv(1);
        let mut g = WeightedGraph::new(conv.vertex_count());
        g.add_directed_edge(conv.source(), 0, w(0));

        let scale = WeightScale::new(1);
        let mut comb = CombinatorWithSidetrack::new(&g, no_conflicts(&conv), conv, &scale, 0);
        assert_eq!(comb.state(), State::End);
        assert_eq!(comb.best_weight(), None);
        assert!(comb.next_combination(1).is_empty());
    }

    #[test]
    fn test_multi_sidetrack_paths() {
        // Layered: source -> {0, 1} -> {2, 3} -> sink, every combination is a path.
        let conv = conv(4);
        let (s, t) = (conv.source(), conv.sink());
        let mut g = WeightedGraph::new(conv.vertex_count());
        g.add_directed_edge(s, 0, w(0));
        g.add_directed_edge(s, 1, w(10));
        for u in [0, 1] {
            g.add_directed_edge(u, 2, w(0));
            g.add_directed_edge(u, 3, w(1));
        }
        g.add_directed_edge(2, t, w(0));
        g.add_directed_edge(3, t, w(0));

        let scale = WeightScale::new(4);
        let mut comb = CombinatorWithSidetrack::new(&g, no_conflicts(&conv), conv, &scale, 11);
        let paths = comb.next_combination(10);
        assert_eq!(sets(&paths), vec![vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3]]);
    }
}
