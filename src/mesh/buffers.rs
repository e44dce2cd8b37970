//! GPU-ready mesh buffers.

use bytemuck::{Pod, Zeroable};

use crate::error::{MeshError, Result};

/// Interleaved vertex with position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    /// Vertex position.
    pub position: [f32; 3],
    /// Unit vertex normal, or zero for unused vertices.
    pub normal: [f32; 3],
}

/// Vertex and index data ready for upload to a rendering backend.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Interleaved per-vertex data.
    pub vertices: Vec<GpuVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Size in bytes of one interleaved vertex.
    pub const VERTEX_STRIDE: usize = std::mem::size_of::<GpuVertex>();

    /// The vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of indices to draw.
    ///
    /// Fails with [`MeshError::IndexOverflow`] if the count does not fit a
    /// `u32` draw call.
    pub fn num_indices(&self) -> Result<u32> {
        draw_count(self.indices.len())
    }
}

fn draw_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| MeshError::IndexOverflow {
        count: len,
        max: u32::MAX as usize,
    })
}
