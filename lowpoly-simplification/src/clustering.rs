//! Clustering-based mesh simplification
//!
//! Implements uniform grid vertex clustering (Rossignac & Borrel 1993) over a
//! triangle soup. Every vertex is bucketed into an axis-aligned cell of edge
//! `cell_size`, each occupied cell collapses to the mean of the positions that
//! fell into it, and triangles are rebuilt on the collapsed vertex set. A
//! triangle survives only if its three corners land in three different cells.

use crate::MeshSimplifier;
use itertools::Itertools;
use lowpoly_core::{Error, Point3d, PolygonMesh, Result, TriangleMesh, Vector3d};
use std::collections::HashMap;

// ============================================================
// Grid cell key
// ============================================================

/// Integer coordinates of the grid cell containing a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl CellKey {
    /// Component-wise `floor(coord / cell_size)`
    pub fn of(p: &Point3d, cell_size: f64) -> Self {
        CellKey {
            x: (p.x / cell_size).floor() as i64,
            y: (p.y / cell_size).floor() as i64,
            z: (p.z / cell_size).floor() as i64,
        }
    }
}

// ============================================================
// Triangulation helpers
// ============================================================

/// Fan-triangulate every face of a polygon mesh into a flat triangle soup.
///
/// A face `[a, b, c, d, ..]` yields `(a, b, c), (a, c, d), ..`. Faces with
/// fewer than three corners contribute nothing.
pub fn fan_triangulate(mesh: &PolygonMesh) -> Result<Vec<Point3d>> {
    let n = mesh.vertices.len();
    let mut soup = Vec::with_capacity(mesh.faces.len() * 3);

    for (fi, face) in mesh.faces.iter().enumerate() {
        if let Some(&bad) = face.iter().find(|&&vi| vi >= n) {
            return Err(Error::InvalidData(format!(
                "face {} references vertex {} but the mesh has {} vertices",
                fi, bad, n
            )));
        }
        if face.len() < 3 {
            continue;
        }
        let anchor = mesh.vertices[face[0]];
        for (&b, &c) in face[1..].iter().tuple_windows() {
            soup.push(anchor);
            soup.push(mesh.vertices[b]);
            soup.push(mesh.vertices[c]);
        }
    }

    Ok(soup)
}

/// Expand an indexed triangle mesh back into a triangle soup
///
/// # Panics
///
/// Panics if a face references a vertex outside the mesh; check with
/// [`TriangleMesh::validate`] first when the mesh is untrusted.
pub fn triangle_soup(mesh: &TriangleMesh) -> Vec<Point3d> {
    mesh.faces
        .iter()
        .flat_map(|f| f.iter().map(|&vi| mesh.vertices[vi]))
        .collect()
}

// ============================================================
// Vertex clustering
// ============================================================

/// Cluster a triangle soup on a uniform grid.
///
/// `triangles[3i..3i + 3]` is triangle `i`. Output vertices are cell means in
/// first-encountered cell order, so the output vertex count equals the number
/// of occupied cells. Output faces keep the input triangle order and drop any
/// triangle with two corners in the same cell.
pub fn vertex_clustering(triangles: &[Point3d], cell_size: f64) -> Result<TriangleMesh> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "cell size must be a positive number, got {}",
            cell_size
        )));
    }
    if triangles.len() % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "triangle soup length {} is not a multiple of 3",
            triangles.len()
        )));
    }

    let mut cells: HashMap<CellKey, usize> = HashMap::new();
    let mut sums: Vec<Vector3d> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut assignment: Vec<usize> = Vec::with_capacity(triangles.len());

    for p in triangles {
        let ci = *cells.entry(CellKey::of(p, cell_size)).or_insert_with(|| {
            sums.push(Vector3d::zeros());
            counts.push(0);
            sums.len() - 1
        });
        sums[ci] += p.coords;
        counts[ci] += 1;
        assignment.push(ci);
    }

    let vertices: Vec<Point3d> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| Point3d::from(sum / count as f64))
        .collect();

    let faces: Vec<[usize; 3]> = assignment
        .chunks_exact(3)
        .filter(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2])
        .map(|t| [t[0], t[1], t[2]])
        .collect();

    log::debug!(
        "clustered {} triangles into {} cells, {} faces kept (cell size {})",
        triangles.len() / 3,
        vertices.len(),
        faces.len(),
        cell_size
    );

    Ok(TriangleMesh::from_vertices_and_faces(vertices, faces))
}

// ============================================================
// Clustering Simplifier
// ============================================================

/// Grid clustering simplifier.
///
/// The cell size is used as given; callers clamp it to a sane minimum before
/// constructing the simplifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringSimplifier {
    /// Edge length of a grid cell, in mesh units.
    pub cell_size: f64,
}

impl ClusteringSimplifier {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    /// Cluster an already triangulated soup
    pub fn simplify_soup(&self, triangles: &[Point3d]) -> Result<TriangleMesh> {
        vertex_clustering(triangles, self.cell_size)
    }
}

impl MeshSimplifier for ClusteringSimplifier {
    fn simplify(&self, mesh: &PolygonMesh) -> Result<TriangleMesh> {
        let soup = fan_triangulate(mesh)?;
        self.simplify_soup(&soup)
    }
}
