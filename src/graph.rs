//! Weighted directed graph stored as adjacency lists.
//!
//! Every edge receives an identifier in insertion order. The shortest-path tree is
//! recorded by edge identifier rather than by endpoints, because parallel edges
//! between the same pair of vertices may carry different weights.

use crate::weight::Weight;

/// Edge identifier, unique within one graph and assigned in insertion order.
pub type EdgeId = usize;

/// An outgoing edge.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Edge {
    pub next: usize,
    pub weight: Weight,
    pub id: EdgeId,
}

#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    adj: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl WeightedGraph {
    /// Creates a graph with `size` vertices and no edges.
    pub fn new(size: usize) -> Self {
        Self {
            adj: vec![Vec::new(); size],
            edge_count: 0,
        }
    }

    /// Resets the graph to `size` isolated vertices.
    pub fn assign(&mut self, size: usize) {
        self.adj.clear();
        self.adj.resize(size, Vec::new());
        self.edge_count = 0;
    }

    /// Grows the graph to `size` vertices, keeping existing edges.
    pub fn expand(&mut self, size: usize) {
        if size > self.adj.len() {
            self.adj.resize(size, Vec::new());
        }
    }

    /// Adds the edge `u -> v` and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_directed_edge(&mut self, u: usize, v: usize, weight: Weight) -> EdgeId {
        for x in [u, v] {
            assert!(x < self.adj.len(), "Vertex {} is out of range (size = {})", x, self.adj.len());
        }
        let id = self.edge_count;
        self.adj[u].push(Edge { next: v, weight, id });
        self.edge_count += 1;
        id
    }

    /// Outgoing edges of `vertex`.
    pub fn edges(&self, vertex: usize) -> &[Edge] {
        &self.adj[vertex]
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges added since the last [`assign`][Self::assign].
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the transposed graph. Each reversed edge keeps the identifier of
    /// its original, so tree edges found on one graph can be recognized on the other.
    pub fn reversed(&self) -> WeightedGraph {
        let mut rev = vec![Vec::new(); self.adj.len()];
        for (u, edges) in self.adj.iter().enumerate() {
            for e in edges {
                rev[e.next].push(Edge {
                    next: u,
                    weight: e.weight.clone(),
                    id: e.id,
                });
            }
        }
        for edges in &mut rev {
            edges.sort_by_key(|e| e.id);
        }
        WeightedGraph {
            adj: rev,
            edge_count: self.edge_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn w(x: u32) -> Weight {
        Weight::from(x)
    }

    #[test]
    fn test_edge_ids_in_insertion_order() {
        let mut g = WeightedGraph::new(3);
        assert_eq!(g.add_directed_edge(0, 1, w(5)), 0);
        assert_eq!(g.add_directed_edge(0, 1, w(7)), 1);
        assert_eq!(g.add_directed_edge(1, 2, w(1)), 2);
        assert_eq!(g.edge_count(), 3);

        // Parallel edges are kept apart by their identifiers.
        let ids: Vec<_> = g.edges(0).iter().map(|e| (e.next, e.id)).collect();
        assert_eq!(ids, vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn test_assign_and_expand() {
        let mut g = WeightedGraph::new(2);
        g.add_directed_edge(0, 1, w(1));

        g.expand(4);
        assert_eq!(g.size(), 4);
        assert_eq!(g.edges(0).len(), 1);
        g.add_directed_edge(1, 3, w(2));

        g.assign(3);
        assert_eq!(g.size(), 3);
        assert_eq!(g.edge_count(), 0);
        assert!(g.edges(0).is_empty());
    }

    #[test]
    fn test_reversed_keeps_ids() {
        let mut g = WeightedGraph::new(3);
        g.add_directed_edge(0, 2, w(3));
        g.add_directed_edge(1, 2, w(4));
        g.add_directed_edge(0, 1, w(1));

        let r = g.reversed();
        assert_eq!(r.size(), 3);
        assert_eq!(r.edges(2), &[Edge { next: 0, weight: w(3), id: 0 }, Edge { next: 1, weight: w(4), id: 1 }]);
        assert_eq!(r.edges(1), &[Edge { next: 0, weight: w(1), id: 2 }]);
        assert!(r.edges(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_edge_out_of_range() {
        let mut g = WeightedGraph::new(2);
        g.add_directed_edge(0, 5, w(1));
    }

    #[test]
    #[should_panic(expected = "Vertex 7 is out of range")]
    fn test_edge_source_out_of_range() {
        let mut g = WeightedGraph::new(2);
        g.add_directed_edge(7, 1, w(1));
    }
}
