//! Graph modeling of a timetable request.
//!
//! A timetable is a path `source -> e_1 -> ... -> e_g -> subsource -> n_1 -> ... -> sink`
//! through a layered DAG:
//!
//! - The essential chain connects every section of mandatory group `k` to every
//!   section of group `k + 1`, so any path picks exactly one section per group.
//! - Below the subsource, normal course `i` is instantiated at every cumulative
//!   credit level `l` it can end on. An edge `(j, l - c_i) -> (i, l)` exists for
//!   `j < i`, so each course subset is reachable along exactly one index-ordered path.
//! - Sink edges leave every level in `levels - tolerance ..= levels`, where
//!   `tolerance = max_credit - min_credit`.
//!
//! Edges between conflicting courses are never added.

use log::{debug, info, trace};

use crate::bitset::BitSet;
use crate::converter::{Level, VertexConverter};
use crate::course::{Course, Preference};
use crate::error::GeneratorError;
use crate::graph::WeightedGraph;
use crate::weight::WeightScale;

/// Everything the enumerator needs, derived from the course selections.
#[derive(Debug, Clone)]
pub struct TimetableModel {
    pub graph: WeightedGraph,
    /// `conflicts[f]` holds the flat indices conflicting with flat index `f`.
    pub conflicts: Vec<BitSet>,
    pub conv: VertexConverter,
    pub scale: WeightScale,
    /// Contiguous index ranges of the essential list, one per base code.
    pub essential_groups: Vec<std::ops::Range<usize>>,
    pub mandatory_credit: u32,
}

/// Splits essential courses (already sorted by base code) into groups of equal base code.
pub fn group_essentials(essential: &[Course]) -> Vec<std::ops::Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=essential.len() {
        if i == essential.len() || essential[i].base_code() != essential[start].base_code() {
            groups.push(start..i);
            start = i;
        }
    }
    groups
}

/// Pairwise conflict sets over `[essential.., normal.., source, subsource, sink]`.
pub fn conflict_sets(courses: &[&Course]) -> Vec<BitSet> {
    let n = courses.len();
    let mut conflicts = vec![BitSet::new(n + 3); n + 3];
    for i in 0..n {
        for j in (i + 1)..n {
            if courses[i].conflicts_with(courses[j]) {
                conflicts[i].insert(j);
                conflicts[j].insert(i);
            }
        }
    }
    conflicts
}

impl TimetableModel {
    /// Builds the credit-level graph.
    ///
    /// Returns `Ok(None)` when the mandatory groups alone exceed `max_credit`.
    /// `essential` must be sorted by base code.
    pub fn build(essential: &[Course], normal: &[Course], min_credit: u32, max_credit: u32) -> Result<Option<Self>, GeneratorError> {
        if min_credit > max_credit {
            return Err(GeneratorError::InvalidCreditRange {
                min: min_credit,
                max: max_credit,
            });
        }

        let essential_groups = group_essentials(essential);
        let mut mandatory_credit = 0;
        for group in &essential_groups {
            let credit = essential[group.start].credit;
            if essential[group.clone()].iter().any(|c| c.credit != credit) {
                return Err(GeneratorError::InconsistentSectionCredit {
                    base_code: essential[group.start].base_code().to_string(),
                });
            }
            mandatory_credit += credit;
        }
        if mandatory_credit > max_credit {
            info!(
                "TimetableModel: mandatory credit {} exceeds maximum {}, nothing to generate",
                mandatory_credit, max_credit
            );
            return Ok(None);
        }

        let levels = max_credit - mandatory_credit;
        let conv = VertexConverter::new(essential.len(), normal.len(), levels as usize);
        let scale = WeightScale::new(normal.len());
        let courses: Vec<&Course> = essential.iter().chain(normal).collect();
        let conflicts = conflict_sets(&courses);

        let mut model = Self {
            graph: WeightedGraph::new(conv.vertex_count()),
            conflicts,
            conv,
            scale,
            essential_groups,
            mandatory_credit,
        };
        model.add_essential_chain();
        model.add_normal_layers(normal);
        model.add_sink_edges(max_credit - min_credit);

        debug!(
            "TimetableModel: {} groups, {} normal courses, {} levels, {} vertices, {} edges",
            model.essential_groups.len(),
            normal.len(),
            levels,
            model.graph.size(),
            model.graph.edge_count()
        );
        Ok(Some(model))
    }

    fn conflicting(&self, u: usize, v: usize) -> bool {
        self.conflicts[self.conv.revert(u)].contains(self.conv.revert(v))
    }

    fn add_edge(&mut self, u: usize, v: usize, preference: Preference) {
        let weight = self.scale.encode(preference);
        trace!("edge {} -> {}: {}", u, v, weight);
        self.graph.add_directed_edge(u, v, weight);
    }

    /// Chain edges weigh nothing, whatever preference the sections carry.
    fn add_essential_chain(&mut self) {
        let subsource = self.conv.subsource();
        let mut prev = vec![self.conv.source()];
        let layers: Vec<Vec<usize>> = self
            .essential_groups
            .iter()
            .map(|g| g.clone().collect())
            .chain(std::iter::once(vec![subsource]))
            .collect();

        for layer in layers {
            for &u in &prev {
                for &v in &layer {
                    if self.conflicting(u, v) {
                        continue;
                    }
                    self.add_edge(u, v, Preference::Mandatory);
                }
            }
            prev = layer;
        }
    }

    fn add_normal_layers(&mut self, normal: &[Course]) {
        let levels = self.conv.levels() as u32;
        for v_lev in 1..=levels {
            for (v_idx, course) in normal.iter().enumerate() {
                let Some(u_lev) = v_lev.checked_sub(course.credit) else {
                    continue;
                };
                let v = self.conv.substitute(v_idx, Level::new(v_lev));
                if u_lev == 0 {
                    self.add_edge(self.conv.subsource(), v, course.preference);
                    continue;
                }
                for u_idx in 0..v_idx {
                    let u = self.conv.substitute(u_idx, Level::new(u_lev));
                    if !self.conflicting(u, v) {
                        self.add_edge(u, v, course.preference);
                    }
                }
            }
        }
    }

    fn add_sink_edges(&mut self, tolerance: u32) {
        let levels = self.conv.levels() as u32;
        let low = levels - tolerance.min(levels);
        let sink = self.conv.sink();
        if low == 0 {
            self.add_edge(self.conv.subsource(), sink, Preference::Mandatory);
        }
        for lev in low.max(1)..=levels {
            for idx in 0..self.conv.normal_count() {
                let u = self.conv.substitute(idx, Level::new(lev));
                self.add_edge(u, sink, Preference::Mandatory);
            }
        }
    }
}
