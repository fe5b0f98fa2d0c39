//! # Mesh Buffers
//!
//! Vertex attributes and triangle indices shared by tube and merged meshes.

use glam::{DVec2, DVec3};

/// Per-ring vertex layout of a tube.
///
/// Every tube in a batch must share one layout; merging relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingLayout {
    /// Vertices per ring.
    pub radial_segments: u32,
    /// Whether the last ring connects back to the first.
    pub closed: bool,
}

/// Indexed triangle buffers with per-vertex position, normal and uv.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the rendering boundary.
///
/// # Example
///
/// ```rust
/// use flow_mesh::MeshBuffers;
/// use glam::{DVec2, DVec3};
///
/// let mut mesh = MeshBuffers::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), DVec3::Z, DVec2::ZERO);
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), DVec3::Z, DVec2::X);
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), DVec3::Z, DVec2::Y);
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    uvs: Vec<DVec2>,
    triangles: Vec<[u32; 3]>,
}

impl MeshBuffers {
    /// Creates empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates buffers with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of indices (three per triangle).
    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Returns true if there are no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3, normal: DVec3, uv: DVec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the vertex normals.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Returns the vertex texture coordinates.
    #[inline]
    pub fn uvs(&self) -> &[DVec2] {
        &self.uvs
    }

    /// Returns the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the axis-aligned bounds, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let (first, rest) = self.positions.split_first()?;
        let bounds = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(bounds)
    }

    /// Appends another buffer set, offsetting its indices by this
    /// buffer's current vertex count. Consumes `other`.
    pub fn append(&mut self, other: MeshBuffers) {
        let offset = self.positions.len() as u32;

        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.uvs.extend(other.uvs);
        self.triangles.extend(
            other
                .triangles
                .into_iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    /// Validates the buffers for correctness.
    ///
    /// Checks:
    /// - Attribute arrays have equal length
    /// - All triangle indices are in range
    /// - No triangle repeats a vertex index
    ///
    /// Zero-area triangles are allowed: a stalled streamline collapses its
    /// rings onto one point.
    pub fn validate(&self) -> bool {
        let vertex_count = self.positions.len();
        if self.normals.len() != vertex_count || self.uvs.len() != vertex_count {
            return false;
        }

        let vertex_count = vertex_count as u32;
        self.triangles.iter().all(|tri| {
            tri.iter().all(|&i| i < vertex_count)
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
        })
    }

    /// Exports positions as a flat f32 array `[x, y, z, ...]` for GPU upload.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten3(&self.positions)
    }

    /// Exports normals as a flat f32 array `[nx, ny, nz, ...]`.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten3(&self.normals)
    }

    /// Exports texture coordinates as a flat f32 array `[u, v, ...]`.
    pub fn uvs_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.uvs.len() * 2);
        for uv in &self.uvs {
            result.push(uv.x as f32);
            result.push(uv.y as f32);
        }
        result
    }

    /// Exports triangle indices as a flat u32 array `[i0, i1, i2, ...]`.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

fn flatten3(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}
