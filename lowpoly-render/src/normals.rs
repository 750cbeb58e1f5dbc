//! Face normal estimation for flat shading

use lowpoly_core::{Point3d, TriangleMesh, Vector3d};

/// Normal returned for triangles whose edges are collinear: `(0, 0, 1)`.
pub fn fallback_normal() -> Vector3d {
    Vector3d::z()
}

/// Unit normal of the triangle `(v1, v2, v3)`.
///
/// The normal is `(v2 - v1) x (v3 - v1)` normalized, so it follows the
/// right-hand rule for the given vertex order. A degenerate triangle yields
/// [`fallback_normal`].
///
/// The edges are scaled by their largest component before the cross product,
/// so coordinates near `f64::MAX` still give the right direction.
pub fn calculate_normal(v1: &Point3d, v2: &Point3d, v3: &Point3d) -> Vector3d {
    let edge1 = v2 - v1;
    let edge2 = v3 - v1;
    let scale = edge1.amax().max(edge2.amax());
    if !(scale > 0.0 && scale.is_finite()) {
        return fallback_normal();
    }
    let n = (edge1 / scale).cross(&(edge2 / scale));
    let len = n.norm();
    if len > 0.0 && len.is_finite() {
        n / len
    } else {
        fallback_normal()
    }
}

/// One normal per face of the mesh, in face order
///
/// # Panics
///
/// Panics if a face references a vertex outside the mesh; check with
/// [`TriangleMesh::validate`] first when the mesh is untrusted.
pub fn face_normals(mesh: &TriangleMesh) -> Vec<Vector3d> {
    mesh.faces
        .iter()
        .map(|&[a, b, c]| calculate_normal(&mesh.vertices[a], &mesh.vertices[b], &mesh.vertices[c]))
        .collect()
}
