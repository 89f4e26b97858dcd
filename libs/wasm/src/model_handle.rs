//! # Model Handle
//!
//! WASM-friendly wrapper for an assembled model that can be transferred to
//! JavaScript for preview and download.

use draw_mesh::{to_stl_binary, MeshResult, Model};
use wasm_bindgen::prelude::*;

/// A handle to the merged model mesh plus its STL serialization.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const model = create_model(imageData.data, imageData.width, imageData.height, options);
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(model.vertices(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(model.indices(), 1));
///
/// const blob = new Blob([model.stl()], { type: 'model/stl' });
/// ```
#[wasm_bindgen]
pub struct ModelHandle {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    /// Binary STL of the same model
    stl: Vec<u8>,
    vertex_count: u32,
    triangle_count: u32,
}

#[wasm_bindgen]
impl ModelHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.vertices[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Length: triangle_count * 3
    #[wasm_bindgen]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.indices[..])
    }

    /// Returns the binary STL bytes as a Uint8Array.
    #[wasm_bindgen]
    pub fn stl(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.stl[..])
    }

    /// Returns true if the model has no geometry.
    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }
}

impl ModelHandle {
    /// Merges the model parts and captures buffers for the viewer.
    pub fn from_model(model: &Model) -> MeshResult<Self> {
        let mesh = model.merged();
        let stl = to_stl_binary(model)?;
        Ok(Self {
            vertex_count: mesh.vertex_count() as u32,
            triangle_count: mesh.triangle_count() as u32,
            vertices: mesh.vertices_f32(),
            indices: mesh.indices_u32(),
            stl,
        })
    }

    /// Vertex buffer for host-side callers.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    /// Index buffer for host-side callers.
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    /// STL bytes for host-side callers.
    pub fn stl_bytes(&self) -> &[u8] {
        &self.stl
    }
}
