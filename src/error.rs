//! Error types for meshedit.
//!
//! This module defines all error types used throughout the library. Edit
//! rejections (flipping a boundary edge, splitting an unknown half-edge) are
//! not errors; they are reported through the return value of the edit.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The triangle index list length is not a multiple of three.
    #[error("triangle index count {len} is not a multiple of 3")]
    InvalidIndexCount {
        /// Length of the index list.
        len: usize,
    },

    /// The flat position array length is not a multiple of three.
    #[error("position component count {len} is not a multiple of 3")]
    InvalidPositionCount {
        /// Length of the position array.
        len: usize,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex} (mesh has {num_vertices} vertices)")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A directed edge is used by more than one face.
    ///
    /// Either more than two faces share the edge or two faces sharing it
    /// disagree on winding.
    #[error("directed edge ({v0}, {v1}) is used by more than one face")]
    NonManifoldEdge {
        /// Tail vertex of the directed edge.
        v0: usize,
        /// Head vertex of the directed edge.
        v1: usize,
    },

    /// The mesh has more elements than the chosen index type can address.
    #[error("{count} elements do not fit an index type with maximum {max}")]
    IndexOverflow {
        /// Number of elements requested.
        count: usize,
        /// Largest index representable.
        max: usize,
    },

    /// A one-ring walk around a vertex did not terminate.
    #[error("walk around vertex {vertex} did not close after {steps} steps")]
    DegenerateTopology {
        /// The vertex being walked.
        vertex: usize,
        /// Number of steps taken before giving up.
        steps: usize,
    },

    /// A vertex is shared by more than one fan of faces.
    ///
    /// A one-ring walk only sees the fan it starts in, so any count it
    /// produced would miss the other fans.
    #[error("vertex {vertex} is non-manifold: walk reached {reached} of {outgoing} outgoing half-edges")]
    NonManifoldVertex {
        /// The vertex being walked.
        vertex: usize,
        /// Outgoing half-edges reached by the walk.
        reached: usize,
        /// Outgoing half-edges the vertex has in total.
        outgoing: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
