//! # Geometry Merging
//!
//! Concatenates tube meshes into one indexed batch so a whole generation
//! renders in a single draw call.

use config::constants::MAX_VERTICES;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{MeshBuffers, RingLayout};
use crate::tube::TubeMesh;

/// Every tube of one generation in a single vertex/index buffer set.
///
/// Tube `k`'s vertices occupy a contiguous range starting at
/// `tube_offsets[k]`; its indices were shifted by the same offset.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMesh {
    layout: RingLayout,
    buffers: MeshBuffers,
    tube_offsets: Vec<u32>,
}

impl MergedMesh {
    /// Returns the ring layout shared by all merged tubes.
    #[inline]
    pub fn layout(&self) -> RingLayout {
        self.layout
    }

    /// Returns the number of merged tubes.
    #[inline]
    pub fn tube_count(&self) -> usize {
        self.tube_offsets.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.buffers.index_count()
    }

    /// Returns the merged buffers.
    #[inline]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Vertex index range of tube `index`, or `None` if out of bounds.
    pub fn tube_vertex_range(&self, index: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.tube_offsets.get(index)? as usize;
        let end = self
            .tube_offsets
            .get(index + 1)
            .map_or(self.vertex_count(), |&next| next as usize);
        Some(start..end)
    }

    /// Flat f32 positions for GPU upload.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.buffers.vertices_f32()
    }

    /// Flat f32 normals for GPU upload.
    pub fn normals_f32(&self) -> Vec<f32> {
        self.buffers.normals_f32()
    }

    /// Flat f32 texture coordinates for GPU upload.
    pub fn uvs_f32(&self) -> Vec<f32> {
        self.buffers.uvs_f32()
    }

    /// Flat u32 triangle indices for GPU upload.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.buffers.indices_u32()
    }
}

/// Merges tubes into one batch, preserving their order.
///
/// # Errors
///
/// - [`MeshError::InvalidBatch`] when `meshes` is empty or the tubes
///   disagree on [`RingLayout`]
/// - [`MeshError::TooManyVertices`] when the merged vertex count exceeds
///   the budget
///
/// # Example
///
/// ```rust
/// use flow_mesh::{build_tube, merge, Curve};
/// use glam::DVec3;
///
/// let a = build_tube(&Curve::through(&[DVec3::ZERO, DVec3::Z], false), 0.1, 4, 2, false).unwrap();
/// let b = build_tube(&Curve::through(&[DVec3::X, DVec3::ONE], false), 0.1, 4, 2, false).unwrap();
///
/// let merged = merge(vec![a, b]).unwrap();
/// assert_eq!(merged.tube_count(), 2);
/// assert_eq!(merged.tube_vertex_range(1), Some(12..24));
/// ```
pub fn merge(meshes: Vec<TubeMesh>) -> MeshResult<MergedMesh> {
    let layout = match meshes.first() {
        Some(first) => first.layout(),
        None => return Err(MeshError::invalid_batch("cannot merge an empty batch")),
    };

    if let Some((index, mesh)) = meshes
        .iter()
        .enumerate()
        .find(|(_, mesh)| mesh.layout() != layout)
    {
        return Err(MeshError::invalid_batch(format!(
            "mesh {} has layout {:?}, expected {:?}",
            index,
            mesh.layout(),
            layout
        )));
    }

    let vertex_count: usize = meshes.iter().map(TubeMesh::vertex_count).sum();
    let triangle_count: usize = meshes.iter().map(|m| m.buffers().triangle_count()).sum();
    let max = MAX_VERTICES.min(u32::MAX as usize);
    if vertex_count > max {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max,
        });
    }

    let tube_count = meshes.len();
    let mut buffers = MeshBuffers::with_capacity(vertex_count, triangle_count);
    let mut tube_offsets = Vec::with_capacity(tube_count);
    for mesh in meshes {
        tube_offsets.push(buffers.vertex_count() as u32);
        buffers.append(mesh.into_buffers());
    }

    debug!(
        tubes = tube_count,
        vertices = vertex_count,
        triangles = triangle_count,
        "merged tube batch"
    );

    Ok(MergedMesh {
        layout,
        buffers,
        tube_offsets,
    })
}
