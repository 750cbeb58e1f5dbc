//! Render command stream
//!
//! A fragment is emitted as `Begin(Triangles)`, an optional `Color`, then for
//! every triangle its `Normal` followed by its three `Vertex` commands, and a
//! closing `End`. Hosts that want a flat numeric list can use [`encode_cgo`].

use crate::normals::calculate_normal;
use lowpoly_core::{Point3d, Rgb, TriangleMesh, Vector3d};
use serde::{Deserialize, Serialize};

/// Primitive type opened by a `Begin` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Triangles,
}

/// One entry of the render command stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum RenderCommand {
    Begin(Primitive),
    Color(Rgb),
    Normal(Vector3d),
    Vertex(Point3d),
    End,
}

/// Opcodes of the compiled-graphics-object float stream used by molecular
/// viewers.
pub mod opcode {
    pub const BEGIN: f32 = 2.0;
    pub const END: f32 = 3.0;
    pub const VERTEX: f32 = 4.0;
    pub const NORMAL: f32 = 5.0;
    pub const COLOR: f32 = 6.0;

    /// Primitive argument of `BEGIN`
    pub const TRIANGLES: f32 = 4.0;
}

/// A flat-shaded triangle: its face normal and its three corners in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub normal: Vector3d,
    pub vertices: [Point3d; 3],
}

impl Facet {
    /// Build a facet, computing the normal from the corner order
    pub fn new(v1: Point3d, v2: Point3d, v3: Point3d) -> Self {
        Self {
            normal: calculate_normal(&v1, &v2, &v3),
            vertices: [v1, v2, v3],
        }
    }
}

/// Render-ready geometry of one mesh fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderFragment {
    pub color: Option<Rgb>,
    pub facets: Vec<Facet>,
}

impl RenderFragment {
    /// Build facets for every face of the mesh, normals computed on the
    /// positions as given
    ///
    /// # Panics
    ///
    /// Panics if a face references a vertex outside the mesh; check with
    /// [`TriangleMesh::validate`] first when the mesh is untrusted.
    pub fn from_mesh(mesh: &TriangleMesh, color: Option<Rgb>) -> Self {
        let facets = mesh
            .faces
            .iter()
            .map(|&[a, b, c]| Facet::new(mesh.vertices[a], mesh.vertices[b], mesh.vertices[c]))
            .collect();
        Self { color, facets }
    }

    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// The fragment as an ordered command stream
    pub fn commands(&self) -> Vec<RenderCommand> {
        let mut out = Vec::with_capacity(3 + self.facets.len() * 4);
        out.push(RenderCommand::Begin(Primitive::Triangles));
        if let Some(color) = self.color {
            out.push(RenderCommand::Color(color));
        }
        for facet in &self.facets {
            out.push(RenderCommand::Normal(facet.normal));
            out.extend(facet.vertices.iter().map(|&v| RenderCommand::Vertex(v)));
        }
        out.push(RenderCommand::End);
        out
    }
}

/// Encode commands as a flat opcode/argument float list
pub fn encode_cgo(commands: &[RenderCommand]) -> Vec<f32> {
    let mut out = Vec::with_capacity(commands.len() * 4);
    for command in commands {
        match *command {
            RenderCommand::Begin(Primitive::Triangles) => {
                out.extend([opcode::BEGIN, opcode::TRIANGLES]);
            }
            RenderCommand::Color(c) => {
                out.extend([opcode::COLOR, c.r, c.g, c.b]);
            }
            RenderCommand::Normal(n) => {
                out.extend([opcode::NORMAL, n.x as f32, n.y as f32, n.z as f32]);
            }
            RenderCommand::Vertex(v) => {
                out.extend([opcode::VERTEX, v.x as f32, v.y as f32, v.z as f32]);
            }
            RenderCommand::End => out.push(opcode::END),
        }
    }
    out
}
