//! Mapping between graph vertices and flat course indices.
//!
//! The credit-level graph instantiates every optional ("normal") course once per
//! cumulative-credit level, while conflict sets are indexed by the underlying
//! course. The vertex space is laid out as:
//!
//! ```text
//! [0, E)                 essential course e            -> flat e
//! [E, E + L*N)           normal course i at level l    -> flat E + i
//! E + L*N                source                        -> flat E + N
//! E + L*N + 1            subsource                     -> flat E + N + 1
//! E + L*N + 2            sink                          -> flat E + N + 2
//! ```
//!
//! where `E` is the essential count, `N` the normal count and `L` the number of
//! credit levels (levels are 1-based).

/// Credit level of a normal-course vertex, `1..=levels`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Level(u32);

impl Level {
    /// # Panics
    ///
    /// Panics if `index == 0`. Level 0 is the subsource itself.
    pub fn new(index: u32) -> Self {
        assert_ne!(index, 0, "Credit levels must be >= 1");
        Level(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexConverter {
    essential: usize,
    normal: usize,
    levels: usize,
}

impl VertexConverter {
    pub fn new(essential: usize, normal: usize, levels: usize) -> Self {
        Self {
            essential,
            normal,
            levels,
        }
    }

    /// A converter where every vertex is its own course: the last three vertices of
    /// an `n`-vertex graph are source, subsource and sink.
    ///
    /// # Panics
    ///
    /// Panics if `n < 3`.
    pub fn identity(n: usize) -> Self {
        assert!(n >= 3, "Graph needs at least source, subsource and sink");
        Self::new(n - 3, 0, 0)
    }

    pub fn essential_count(&self) -> usize {
        self.essential
    }

    pub fn normal_count(&self) -> usize {
        self.normal
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn source(&self) -> usize {
        self.essential + self.levels * self.normal
    }

    pub fn subsource(&self) -> usize {
        self.source() + 1
    }

    pub fn sink(&self) -> usize {
        self.source() + 2
    }

    /// Total number of graph vertices.
    pub fn vertex_count(&self) -> usize {
        self.source() + 3
    }

    /// Total number of flat indices (courses plus the three pseudo-vertices).
    pub fn flat_count(&self) -> usize {
        self.essential + self.normal + 3
    }

    /// Vertex of normal course `index` at credit `level`.
    pub fn substitute(&self, index: usize, level: Level) -> usize {
        debug_assert!(index < self.normal);
        debug_assert!(level.index() as usize <= self.levels);
        self.essential + (level.index() as usize - 1) * self.normal + index
    }

    /// Flat index of the course (or pseudo-vertex) behind `vertex`.
    pub fn revert(&self, vertex: usize) -> usize {
        let source = self.source();
        if vertex < self.essential {
            vertex
        } else if vertex < source {
            self.essential + (vertex - self.essential) % self.normal
        } else {
            debug_assert!(vertex < source + 3, "Vertex {} is out of range", vertex);
            self.essential + self.normal + (vertex - source)
        }
    }

    /// Returns true if the flat index denotes a real course.
    pub fn is_course(&self, flat: usize) -> bool {
        flat < self.essential + self.normal
    }
}
