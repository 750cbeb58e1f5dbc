//! OBJ format support
//!
//! Only the `v` and `f` directives are interpreted. Vertex lines contribute
//! the first three coordinates, face lines contribute the first sub-field of
//! every corner converted from 1-based to 0-based. Every other line is
//! ignored without being decoded, so comments may hold any bytes. Polygon
//! faces are kept as read; triangulation is left to the caller.

use crate::error::IoError;
use crate::{MeshReader, MeshWriter};
use lowpoly_core::{Point3d, PolygonMesh, Result, TriangleMesh, Vector3d};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// How malformed `v`/`f` lines are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjReadOptions {
    /// Drop a malformed line with a warning instead of failing the load
    pub skip_malformed_lines: bool,
}

impl ObjReadOptions {
    pub fn strict() -> Self {
        Self {
            skip_malformed_lines: false,
        }
    }

    pub fn lenient() -> Self {
        Self {
            skip_malformed_lines: true,
        }
    }
}

pub struct ObjReader;
pub struct ObjWriter;

enum ObjLine {
    Vertex(Point3d),
    Face(Vec<usize>),
    Ignored,
}

/// True if the first whitespace-separated token is a `v` or `f` marker
fn is_directive(line: &[u8]) -> bool {
    let first = line
        .split(|b| b.is_ascii_whitespace())
        .find(|token| !token.is_empty());
    matches!(first, Some(b"v") | Some(b"f"))
}

fn parse_line(line: &str, line_no: usize) -> std::result::Result<ObjLine, IoError> {
    let mut tokens = line.split_whitespace().peekable();
    let marker = tokens.next();
    // A bare marker is not a directive
    if tokens.peek().is_none() {
        return Ok(ObjLine::Ignored);
    }
    match marker {
        Some("v") => {
            let mut coords = [0.0f64; 3];
            for (axis, coord) in coords.iter_mut().enumerate() {
                let token = tokens.next().ok_or_else(|| {
                    IoError::parse(line_no, format!("vertex has only {} coordinates", axis))
                })?;
                *coord = token.parse::<f64>().map_err(|e| {
                    IoError::parse(line_no, format!("invalid coordinate '{}': {}", token, e))
                })?;
            }
            Ok(ObjLine::Vertex(Point3d::new(coords[0], coords[1], coords[2])))
        }
        Some("f") => {
            let face = tokens
                .map(|token| {
                    let index = token.split('/').next().unwrap_or(token);
                    let one_based = index.parse::<i64>().map_err(|e| {
                        IoError::parse(line_no, format!("invalid face index '{}': {}", token, e))
                    })?;
                    if one_based < 1 {
                        return Err(IoError::parse(
                            line_no,
                            format!("face index {} is not 1-based", one_based),
                        ));
                    }
                    Ok((one_based - 1) as usize)
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(ObjLine::Face(face))
        }
        _ => Ok(ObjLine::Ignored),
    }
}

impl ObjReader {
    /// Parse a mesh from any buffered reader
    pub fn parse_reader<R: BufRead>(reader: R, options: &ObjReadOptions) -> Result<PolygonMesh> {
        let mut mesh = PolygonMesh::new();
        let mut skipped = 0usize;

        for (i, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            if !is_directive(&raw) {
                continue;
            }
            let line_no = i + 1;
            let parsed = std::str::from_utf8(&raw)
                .map_err(|e| IoError::parse(line_no, format!("line is not valid UTF-8: {}", e)))
                .and_then(|line| parse_line(line.trim(), line_no));
            match parsed {
                Ok(ObjLine::Vertex(v)) => mesh.vertices.push(v),
                Ok(ObjLine::Face(f)) => mesh.faces.push(f),
                Ok(ObjLine::Ignored) => {}
                Err(e) if options.skip_malformed_lines => {
                    log::warn!("skipping malformed line: {}", e);
                    skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::debug!(
            "parsed {} vertices, {} faces ({} lines skipped)",
            mesh.vertex_count(),
            mesh.face_count(),
            skipped
        );
        Ok(mesh)
    }

    /// Parse a mesh from text
    pub fn parse_str(text: &str, options: &ObjReadOptions) -> Result<PolygonMesh> {
        Self::parse_reader(text.as_bytes(), options)
    }

    /// Parse a mesh from raw bytes as handed over by a host export
    pub fn parse_bytes(bytes: &[u8], options: &ObjReadOptions) -> Result<PolygonMesh> {
        Self::parse_reader(bytes, options)
    }

    /// Read a mesh file with explicit options
    pub fn read_mesh_with<P: AsRef<Path>>(
        path: P,
        options: &ObjReadOptions,
    ) -> Result<PolygonMesh> {
        let file = File::open(path)?;
        Self::parse_reader(BufReader::new(file), options)
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<PolygonMesh> {
        Self::read_mesh_with(path, &ObjReadOptions::strict())
    }
}

impl ObjWriter {
    /// Write vertices and triangle faces
    pub fn write_to<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> Result<()> {
        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b, c] in &mesh.faces {
            writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        Ok(())
    }

    /// Write a flat-shaded mesh: one `vn` per face, shared by its three corners
    pub fn write_faceted<W: Write>(
        mesh: &TriangleMesh,
        face_normals: &[Vector3d],
        writer: &mut W,
    ) -> Result<()> {
        if face_normals.len() != mesh.face_count() {
            return Err(IoError::WriteError {
                message: format!(
                    "{} normals supplied for {} faces",
                    face_normals.len(),
                    mesh.face_count()
                ),
            }
            .into());
        }

        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for n in face_normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for (fi, [a, b, c]) in mesh.faces.iter().enumerate() {
            let n = fi + 1;
            writeln!(writer, "f {}//{} {}//{} {}//{}", a + 1, n, b + 1, n, c + 1, n)?;
        }
        Ok(())
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
