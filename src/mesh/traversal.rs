//! One-ring traversal: valence, boundary detection and neighbour rings.
//!
//! Walks rotate around a vertex through twin links. Given an outgoing
//! half-edge `h` of `v`:
//!
//! - `next(twin(h))` is the next outgoing half-edge in one direction
//! - `twin(prev(h))` is the next outgoing half-edge in the other
//!
//! Either step fails at a boundary half-edge. Every walk is capped by
//! [`TraversalOptions::max_ring_steps`] so a malformed graph surfaces as
//! [`MeshError::DegenerateTopology`] instead of a wrong count. A walk that
//! closes or stops before reaching every outgoing half-edge of the vertex
//! fails with [`MeshError::NonManifoldVertex`].

use rayon::prelude::*;

use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Default cap on the number of steps a single one-ring walk may take.
pub const DEFAULT_MAX_RING_STEPS: usize = 10_000;

/// Options for one-ring traversal queries.
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    /// Maximum number of rotation steps per vertex walk.
    pub max_ring_steps: usize,

    /// Whether to compute per-vertex arrays in parallel (default: false).
    pub parallel: bool,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_ring_steps: DEFAULT_MAX_RING_STEPS,
            parallel: false,
        }
    }
}

impl TraversalOptions {
    /// Set the per-walk step cap.
    pub fn with_max_ring_steps(mut self, steps: usize) -> Self {
        self.max_ring_steps = steps;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the options before a query uses them.
    pub fn validate(&self) -> Result<()> {
        if self.max_ring_steps == 0 {
            return Err(MeshError::invalid_param(
                "max_ring_steps",
                self.max_ring_steps,
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Step budget shared by both directions of one walk.
struct StepBudget {
    vertex: usize,
    used: usize,
    max: usize,
}

impl StepBudget {
    fn new(vertex: usize, max: usize) -> Self {
        Self {
            vertex,
            used: 0,
            max,
        }
    }

    fn take(&mut self) -> Result<()> {
        self.used += 1;
        if self.used > self.max {
            log::warn!(
                "one-ring walk around vertex {} exceeded {} steps",
                self.vertex,
                self.max
            );
            return Err(MeshError::DegenerateTopology {
                vertex: self.vertex,
                steps: self.max,
            });
        }
        Ok(())
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Rotate to the next outgoing half-edge across `he`'s twin.
    #[inline]
    fn rotate_forward(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        self.twin(he).map(|twin| self.next(twin))
    }

    /// Rotate to the next outgoing half-edge across the twin of `he`'s predecessor.
    #[inline]
    fn rotate_backward(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        self.twin(self.prev(he))
    }

    /// Fail if a walk reached fewer outgoing half-edges than `v` has.
    fn check_fan(&self, v: VertexId<I>, reached: usize) -> Result<()> {
        let outgoing = self.num_outgoing(v);
        if reached < outgoing {
            log::warn!(
                "vertex {} has {} outgoing half-edges but its fan holds {}",
                v.index(),
                outgoing,
                reached
            );
            return Err(MeshError::NonManifoldVertex {
                vertex: v.index(),
                reached,
                outgoing,
            });
        }
        Ok(())
    }

    /// Compute the valence (number of incident edges) of a vertex.
    ///
    /// Isolated vertices have valence 0.
    pub fn valence(&self, v: VertexId<I>) -> Result<usize> {
        self.valence_with_limit(v, DEFAULT_MAX_RING_STEPS)
    }

    /// Compute the valence of a vertex with an explicit step cap.
    pub fn valence_with_limit(&self, v: VertexId<I>, max_steps: usize) -> Result<usize> {
        let Some(start) = self.outgoing(v) else {
            return Ok(0);
        };
        let mut budget = StepBudget::new(v.index(), max_steps);

        // Forward until the ring closes or a boundary is hit
        let mut forward = 1;
        let mut he = start;
        loop {
            match self.rotate_forward(he) {
                Some(next) if next == start => {
                    self.check_fan(v, forward)?;
                    return Ok(forward);
                }
                Some(next) => {
                    budget.take()?;
                    forward += 1;
                    he = next;
                }
                None => break,
            }
        }

        // Boundary fan: walk the other way from the start as well
        let mut backward = 0;
        let mut he = start;
        while let Some(prev) = self.rotate_backward(he) {
            budget.take()?;
            backward += 1;
            he = prev;
        }
        self.check_fan(v, forward + backward)?;

        // Outgoing half-edges of the fan plus the trailing incoming boundary edge
        Ok(forward + backward + 1)
    }

    /// Compute the valence of every vertex.
    ///
    /// The result has one entry per vertex, in vertex order.
    pub fn valences(&self, options: &TraversalOptions) -> Result<Vec<usize>> {
        options.validate()?;
        let max = options.max_ring_steps;

        if options.parallel {
            (0..self.num_vertices())
                .into_par_iter()
                .map(|i| self.valence_with_limit(VertexId::new(i), max))
                .collect()
        } else {
            self.vertex_ids()
                .map(|v| self.valence_with_limit(v, max))
                .collect()
        }
    }

    /// Check if a vertex lies on the mesh boundary.
    ///
    /// Isolated vertices are not on the boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> Result<bool> {
        let Some(start) = self.outgoing(v) else {
            return Ok(false);
        };
        let mut budget = StepBudget::new(v.index(), DEFAULT_MAX_RING_STEPS);

        let mut he = start;
        loop {
            match self.rotate_forward(he) {
                Some(next) if next == start => return Ok(false),
                Some(next) => {
                    budget.take()?;
                    he = next;
                }
                None => return Ok(true),
            }
        }
    }

    /// Collect the neighbours of a vertex in rotation order.
    ///
    /// For a boundary vertex the ring starts and ends at the two boundary
    /// neighbours.
    pub fn one_ring(&self, v: VertexId<I>) -> Result<Vec<VertexId<I>>> {
        let Some(start) = self.outgoing(v) else {
            return Ok(Vec::new());
        };
        let mut budget = StepBudget::new(v.index(), DEFAULT_MAX_RING_STEPS);

        // Rewind to the first outgoing half-edge of the fan
        let mut first = start;
        let mut closed = false;
        while let Some(prev) = self.rotate_backward(first) {
            if prev == start {
                closed = true;
                break;
            }
            budget.take()?;
            first = prev;
        }

        let mut ring = Vec::new();
        if !closed {
            ring.push(self.tail(self.prev(first)));
        }

        let mut reached = 0;
        let mut he = first;
        loop {
            ring.push(self.head(he));
            reached += 1;
            match self.rotate_forward(he) {
                Some(next) if next == first => break,
                Some(next) => {
                    budget.take()?;
                    he = next;
                }
                None => break,
            }
        }
        self.check_fan(v, reached)?;

        Ok(ring)
    }
}
