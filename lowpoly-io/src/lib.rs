//! I/O operations for meshes
//!
//! This crate reads and writes the line-oriented face/vertex text format
//! (the `v`/`f` subset of Wavefront OBJ) used to hand surfaces to the
//! low-poly pipeline and to export its faceted result.

pub mod obj;
pub mod error;

pub use error::*;
pub use obj::{ObjReadOptions, ObjReader, ObjWriter};

use lowpoly_core::{PolygonMesh, Result, TriangleMesh};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<PolygonMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<PolygonMesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => obj::ObjReader::read_mesh(path),
        _ => Err(IoError::InvalidFormat {
            format: format!("unsupported mesh format: {:?}", path.extension()),
        }
        .into()),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => obj::ObjWriter::write_mesh(mesh, path),
        _ => Err(IoError::InvalidFormat {
            format: format!("unsupported mesh format: {:?}", path.extension()),
        }
        .into()),
    }
}
