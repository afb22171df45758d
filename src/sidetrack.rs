//! Sidetrack costs and the persistent heap forest built from them.
//!
//! For a non-tree edge `u -> v` of weight `w`, the sidetrack cost
//! `w + d(v) - d(u)` is the extra weight paid by leaving the shortest-path tree at
//! `u` through that edge. It is non-negative because `d` is a shortest distance.

use log::debug;

use crate::graph::WeightedGraph;
use crate::heap::PersistentHeap;
use crate::sssp::ShortestPaths;
use crate::weight::Weight;

/// `w + d(v) - d(u)`.
///
/// # Panics
///
/// Panics if `d(u) > w + d(v)`, i.e. `distance` is not a shortest-distance labeling.
pub fn sidetrack_cost(distance: &[Weight], u: usize, v: usize, weight: &Weight) -> Weight {
    let through = weight + &distance[v];
    assert!(through >= distance[u], "Distance labeling is not optimal at {} -> {}", u, v);
    through - &distance[u]
}

/// Builds the per-vertex sidetrack heaps.
///
/// Vertices are processed in Dijkstra settle order, so every vertex's tree
/// successor already holds its final heap: `heap[u]` starts as a copy of
/// `heap[next(u)]` and then receives every feasible non-tree edge leaving `u`.
pub fn build_sidetrack_heap(graph: &WeightedGraph, sp: &ShortestPaths, infeasible: &Weight, seed: u64) -> PersistentHeap {
    let mut heap = PersistentHeap::new(graph.size(), seed);

    for &u in &sp.visited {
        if let Some(parent) = sp.prev_vertex[u] {
            heap.copy_to(parent, u);
        }

        for edge in graph.edges(u) {
            if Some(edge.id) == sp.prev_edge[u] {
                continue; // tree edge
            }
            let sidetrack = sidetrack_cost(&sp.distance, u, edge.next, &edge.weight);
            if &sidetrack < infeasible {
                heap.insert_at(u, u, edge.next, sidetrack);
            }
        }
    }

    debug!(
        "build_sidetrack_heap: {} nodes over {} vertices",
        heap.node_count(),
        sp.visited.len()
    );
    heap
}
