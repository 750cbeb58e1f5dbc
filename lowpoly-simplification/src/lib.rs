//! Mesh decimation and smoothing algorithms
//!
//! This crate provides the geometric stages of the low-poly pipeline:
//! - Fan triangulation of polygon faces into a triangle soup
//! - Uniform grid vertex clustering with degenerate triangle removal
//! - Vertex adjacency and iterative Laplacian smoothing

pub mod clustering;
pub mod smoothing;

pub use clustering::*;
pub use smoothing::*;

use lowpoly_core::{PolygonMesh, Result, TriangleMesh};

/// Reduce a (possibly polygonal) mesh to a simplified triangle mesh
pub trait MeshSimplifier {
    fn simplify(&self, mesh: &PolygonMesh) -> Result<TriangleMesh>;
}
