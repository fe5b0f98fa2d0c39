//! # Mesh Handle
//!
//! WASM-friendly copy of a published batch that can be transferred to
//! JavaScript.

use flow_mesh::MergedMesh;
use wasm_bindgen::prelude::*;

/// Flat GPU buffers of one merged flow tube batch.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const tubes = new FlowTubes(1337);
/// tubes.request_regeneration(JSON.stringify({ streamlineCount: 500 }));
/// const mesh = tubes.current_mesh();
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(mesh.vertices(), 3));
/// geometry.setAttribute('normal', new THREE.BufferAttribute(mesh.normals(), 3));
/// geometry.setAttribute('uv', new THREE.BufferAttribute(mesh.uvs(), 2));
/// geometry.setIndex(new THREE.BufferAttribute(mesh.indices(), 1));
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Generation that produced the batch
    generation: u32,
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Vertex normals as [nx, ny, nz, ...]
    normals: Vec<f32>,
    /// Texture coordinates as [u, v, u, v, ...]
    uvs: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, ...]
    indices: Vec<u32>,
    tube_count: u32,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the generation number of this batch.
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        (self.vertices.len() / 3) as u32
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Returns the number of tubes in the batch.
    #[wasm_bindgen(getter)]
    pub fn tube_count(&self) -> u32 {
        self.tube_count
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Length: vertex_count * 3
    pub fn vertices(&self) -> Vec<f32> {
        self.vertices.clone()
    }

    /// Returns the vertex normals as a Float32Array.
    ///
    /// Length: vertex_count * 3
    pub fn normals(&self) -> Vec<f32> {
        self.normals.clone()
    }

    /// Returns the texture coordinates as a Float32Array.
    ///
    /// Length: vertex_count * 2
    pub fn uvs(&self) -> Vec<f32> {
        self.uvs.clone()
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Length: triangle_count * 3
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Returns true if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl MeshHandle {
    /// Exports a merged batch to flat f32/u32 buffers.
    pub fn from_merged(generation: u64, mesh: &MergedMesh) -> Self {
        Self {
            generation: u32::try_from(generation).unwrap_or(u32::MAX),
            vertices: mesh.vertices_f32(),
            normals: mesh.normals_f32(),
            uvs: mesh.uvs_f32(),
            indices: mesh.indices_u32(),
            tube_count: u32::try_from(mesh.tube_count()).unwrap_or(u32::MAX),
        }
    }
}
