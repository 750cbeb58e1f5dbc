//! Mesh data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A mesh as read from a face/vertex file: faces may have any number of corners
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<Vec<usize>>,
}

/// A triangle mesh with vertices and faces
///
/// Face indices only refer to the vertex list they were produced with. Any
/// stage that rebuilds the vertex list must remap the faces with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

impl PolygonMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and polygon faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// The three corner positions of a face
    ///
    /// # Panics
    ///
    /// Panics if `face` is out of range or the face references a missing vertex.
    pub fn triangle(&self, face: usize) -> [Point3d; 3] {
        let [a, b, c] = self.faces[face];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Check that every face index is in range and no face repeats a vertex
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        for (fi, &[a, b, c]) in self.faces.iter().enumerate() {
            if a >= n || b >= n || c >= n {
                return Err(Error::InvalidData(format!(
                    "face {} references vertex out of range ({}, {}, {}) with {} vertices",
                    fi, a, b, c, n
                )));
            }
            if a == b || b == c || a == c {
                return Err(Error::InvalidData(format!(
                    "face {} is degenerate ({}, {}, {})",
                    fi, a, b, c
                )));
            }
        }
        Ok(())
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
