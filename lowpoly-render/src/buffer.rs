//! Interleaved vertex buffer for flat shading
//!
//! Faceted output cannot share vertices between triangles, because each
//! corner carries the normal of its own face. The buffer is therefore
//! non-indexed: three [`FacetVertex`] records per facet.

use crate::commands::RenderFragment;
use bytemuck::{Pod, Zeroable};

/// A vertex record ready for GPU upload
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct FacetVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl FacetVertex {
    /// Size of one record in bytes
    pub const STRIDE: usize = std::mem::size_of::<FacetVertex>();
}

impl RenderFragment {
    /// Non-indexed vertex buffer; fragments without a color get white.
    pub fn vertex_buffer(&self) -> Vec<FacetVertex> {
        let color = self.color.map(|c| c.to_array()).unwrap_or([1.0, 1.0, 1.0]);
        self.facets
            .iter()
            .flat_map(|facet| {
                let normal = [
                    facet.normal.x as f32,
                    facet.normal.y as f32,
                    facet.normal.z as f32,
                ];
                facet.vertices.map(|v| FacetVertex {
                    position: [v.x as f32, v.y as f32, v.z as f32],
                    normal,
                    color,
                })
            })
            .collect()
    }
}

/// View a vertex buffer as raw bytes
pub fn as_bytes(vertices: &[FacetVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
