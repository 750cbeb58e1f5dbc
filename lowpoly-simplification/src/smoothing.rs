//! Laplacian smoothing
//!
//! Each pass moves every vertex a fraction `lambda` of the way towards the
//! mean of its edge neighbours. A pass reads one snapshot of the positions and
//! writes a separate one, so the result does not depend on the order in which
//! vertices are visited. Isolated vertices stay where they are.

use lowpoly_core::{centroid, Error, Point3d, Result, TriangleMesh};
use std::collections::BTreeSet;

/// Default relaxation factor
pub const DEFAULT_LAMBDA: f64 = 0.5;

/// Undirected vertex adjacency derived from triangle edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<BTreeSet<usize>>,
}

impl Adjacency {
    /// Build adjacency for `vertex_count` vertices from a face list.
    ///
    /// Every face `(a, b, c)` contributes the edges a-b, b-c and c-a in both
    /// directions. A face index outside the vertex list is an error.
    pub fn from_faces(vertex_count: usize, faces: &[[usize; 3]]) -> Result<Self> {
        let mut neighbors = vec![BTreeSet::new(); vertex_count];
        for (fi, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&vi| vi >= vertex_count) {
                return Err(Error::InvalidData(format!(
                    "face {} references vertex {} but the mesh has {} vertices",
                    fi, bad, vertex_count
                )));
            }
            for k in 0..3 {
                let a = face[k];
                let b = face[(k + 1) % 3];
                if a != b {
                    neighbors[a].insert(b);
                    neighbors[b].insert(a);
                }
            }
        }
        Ok(Self { neighbors })
    }

    /// Build adjacency for a triangle mesh
    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        Self::from_faces(mesh.vertex_count(), &mesh.faces)
    }

    pub fn neighbors(&self, vertex: usize) -> &BTreeSet<usize> {
        &self.neighbors[vertex]
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// True if every `j` in `neighbors(i)` also has `i` in `neighbors(j)`
    pub fn is_symmetric(&self) -> bool {
        self.neighbors
            .iter()
            .enumerate()
            .all(|(i, ns)| ns.iter().all(|&j| self.neighbors[j].contains(&i)))
    }
}

fn relax_into(adjacency: &Adjacency, previous: &[Point3d], lambda: f64, next: &mut Vec<Point3d>) {
    next.clear();
    next.extend(previous.iter().enumerate().map(|(i, &p)| {
        let ring = adjacency.neighbors(i).iter().map(|&n| &previous[n]);
        match centroid(ring) {
            Some(mean) => p + (mean - p) * lambda,
            None => p,
        }
    }));
}

/// Smooth vertex positions with `iterations` Laplacian passes.
///
/// Returns a new vertex list of the same length and order; the face list is
/// not touched. Zero iterations return a copy of the input.
pub fn laplacian_smooth(
    vertices: &[Point3d],
    faces: &[[usize; 3]],
    iterations: u32,
    lambda: f64,
) -> Result<Vec<Point3d>> {
    if !(lambda > 0.0 && lambda <= 1.0) {
        return Err(Error::InvalidParameter(format!(
            "smoothing factor must lie in (0, 1], got {}",
            lambda
        )));
    }

    let mut current = vertices.to_vec();
    if iterations == 0 {
        return Ok(current);
    }

    // Topology is fixed across passes, so adjacency is built once.
    let adjacency = Adjacency::from_faces(vertices.len(), faces)?;
    let mut next = Vec::with_capacity(current.len());

    for _ in 0..iterations {
        relax_into(&adjacency, &current, lambda, &mut next);
        std::mem::swap(&mut current, &mut next);
    }

    log::debug!(
        "smoothed {} vertices over {} edges ({} passes, lambda {})",
        current.len(),
        adjacency.edge_count(),
        iterations,
        lambda
    );

    Ok(current)
}

/// Laplacian smoother
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaplacianSmoother {
    /// Number of smoothing passes
    pub iterations: u32,
    /// Fraction of the way each vertex moves towards its neighbour mean
    pub lambda: f64,
}

impl Default for LaplacianSmoother {
    fn default() -> Self {
        Self {
            iterations: 1,
            lambda: DEFAULT_LAMBDA,
        }
    }
}

impl LaplacianSmoother {
    pub fn new(iterations: u32, lambda: f64) -> Self {
        Self { iterations, lambda }
    }

    /// Smooth a mesh, returning a mesh with the same faces and moved vertices
    pub fn smooth(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        let vertices = laplacian_smooth(&mesh.vertices, &mesh.faces, self.iterations, self.lambda)?;
        Ok(TriangleMesh::from_vertices_and_faces(vertices, mesh.faces.clone()))
    }
}
