//! Single-source shortest paths.
//!
//! The enumerator runs Dijkstra on the *reversed* graph rooted at the sink, so
//! `prev_vertex[u]` is the successor of `u` on its shortest path toward the sink in
//! forward terms, and `distance[u]` is the cost of that path.

use log::debug;

use crate::bitset::BitSet;
use crate::converter::VertexConverter;
use crate::graph::{EdgeId, WeightedGraph};
use crate::path::PathState;
use crate::queue::{PriorityQueue, SortOrder};
use crate::weight::Weight;

/// Result of [`dijkstra`].
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Distance from the root; `inf` for unreachable vertices.
    pub distance: Vec<Weight>,
    /// Tree parent (the vertex the edge came from), `None` for the root and unreachable vertices.
    pub prev_vertex: Vec<Option<usize>>,
    /// Identifier of the tree edge leading into each vertex.
    pub prev_edge: Vec<Option<EdgeId>>,
    /// Vertices in the order they were settled; parents always precede children.
    pub visited: Vec<usize>,
}

/// Lazy-deletion Dijkstra from `root`. `inf` marks unreachable vertices and must
/// exceed every finite path weight.
pub fn dijkstra(graph: &WeightedGraph, root: usize, inf: &Weight) -> ShortestPaths {
    let n = graph.size();
    let mut distance = vec![inf.clone(); n];
    let mut prev_vertex = vec![None; n];
    let mut prev_edge = vec![None; n];
    let mut visited = Vec::new();
    let mut pq = PriorityQueue::new(SortOrder::Less);

    distance[root] = Weight::ZERO;
    pq.push(Weight::ZERO, root);

    while let Some((weight, curr)) = pq.pop() {
        if distance[curr] != weight {
            continue; // stale
        }
        visited.push(curr);

        for edge in graph.edges(curr) {
            let candidate = &weight + &edge.weight;
            if candidate < distance[edge.next] {
                distance[edge.next] = candidate.clone();
                prev_vertex[edge.next] = Some(curr);
                prev_edge[edge.next] = Some(edge.id);
                pq.push(candidate, edge.next);
            }
        }
    }

    debug!("dijkstra(root = {}): settled {} of {} vertices", root, visited.len(), n);

    ShortestPaths {
        distance,
        prev_vertex,
        prev_edge,
        visited,
    }
}

impl ShortestPaths {
    /// Builds the `{set, conflict}` state of the tree path from every vertex to `root`.
    ///
    /// Each state is computed once and extended by its children. Vertices that
    /// cannot reach the root get an empty state.
    pub fn restore_paths(&self, conflicts: &[BitSet], conv: &VertexConverter, root: usize) -> Vec<PathState> {
        let n = self.prev_vertex.len();
        let mut paths: Vec<Option<PathState>> = vec![None; n];
        paths[root] = Some(PathState::start(conv.revert(root)));

        let mut chain = Vec::new();
        for v in 0..n {
            if paths[v].is_some() || self.prev_vertex[v].is_none() {
                continue;
            }

            // Climb until a known state, then extend it back down.
            let mut u = v;
            while paths[u].is_none() {
                chain.push(u);
                match self.prev_vertex[u] {
                    Some(p) => u = p,
                    None => break,
                }
            }
            let mut state = paths[u].clone().unwrap_or_default();
            while let Some(w) = chain.pop() {
                state.insert(conv.revert(w), conflicts);
                paths[w] = Some(state.clone());
            }
        }

        paths.into_iter().map(Option::unwrap_or_default).collect()
    }
}
