//! Wavefront-style mesh loading
//!
//! Supports the two record kinds the renderer consumes: `v x y z` vertices
//! (1-indexed in declaration order) and `f i1 i2 ... ik` faces. Face indices
//! may carry `/...` attachments, which are ignored beyond the leading index.

use std::fs;
use std::path::Path;

use log::{info, trace, warn};

use crate::rasterizer::{Color, Point3};
use super::geometry::{Object, Polygon3};

/// Error type for mesh loading
#[derive(Debug)]
pub enum ObjError {
    IoError(std::io::Error),
    /// A `v` or `f` record that could not be parsed
    MalformedRecord { line: usize, text: String },
    /// A face references a vertex that was never declared
    IndexOutOfRange { line: usize, index: usize },
}

impl From<std::io::Error> for ObjError {
    fn from(e: std::io::Error) -> Self {
        ObjError::IoError(e)
    }
}

impl std::fmt::Display for ObjError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjError::IoError(e) => write!(f, "IO error: {}", e),
            ObjError::MalformedRecord { line, text } => {
                write!(f, "malformed record at line {}: {}", line, text)
            }
            ObjError::IndexOutOfRange { line, index } => {
                write!(f, "vertex index {} out of range at line {}", index, line)
            }
        }
    }
}

/// Load a mesh file into an `Object`
pub fn load_obj<P: AsRef<Path>>(path: P, facecolor: Color) -> Result<Object, ObjError> {
    let contents = fs::read_to_string(path)?;
    load_obj_from_str(&contents, facecolor)
}

/// Load a mesh from text (for embedded meshes or testing).
///
/// Each face polygon gets independent copies of the referenced vertex
/// positions, in face-declaration order. The object's center is the origin.
/// Malformed records and out-of-range indices abort the load; faces whose
/// vertices cannot yield a normal are skipped with a warning.
pub fn load_obj_from_str(contents: &str, facecolor: Color) -> Result<Object, ObjError> {
    let mut points: Vec<Point3> = Vec::new();
    let mut polygons: Vec<Polygon3> = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in contents.lines().enumerate() {
        let lineno = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        match fields[0] {
            "v" => {
                if fields.len() < 4 {
                    return Err(ObjError::MalformedRecord { line: lineno, text: line.to_string() });
                }
                let mut coords = [0.0; 3];
                for (coord, field) in coords.iter_mut().zip(&fields[1..4]) {
                    *coord = field.parse().map_err(|_| ObjError::MalformedRecord {
                        line: lineno,
                        text: line.to_string(),
                    })?;
                }
                points.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            "f" => {
                let mut face_vertices = Vec::with_capacity(fields.len() - 1);
                for field in &fields[1..] {
                    // "12/34/56" -> vertex index 12; attachments are ignored
                    let index_text = field.split('/').next().unwrap_or(field);
                    let index: usize = index_text.parse().map_err(|_| ObjError::MalformedRecord {
                        line: lineno,
                        text: line.to_string(),
                    })?;
                    if index == 0 || index > points.len() {
                        return Err(ObjError::IndexOutOfRange { line: lineno, index });
                    }
                    face_vertices.push(points[index - 1]);
                }
                match Polygon3::new(face_vertices, facecolor) {
                    Ok(polygon) => polygons.push(polygon),
                    Err(e) => {
                        warn!("skipping face at line {}: {}", lineno, e);
                        skipped += 1;
                    }
                }
            }
            _ => trace!("ignoring record: {}", line),
        }
    }

    info!("loaded {} polygon faces", polygons.len());
    if skipped > 0 {
        warn!("skipped {} degenerate faces", skipped);
    }
    Ok(Object::new(polygons, Point3::ORIGIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_single_triangle() {
        let obj = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", Color::WHITE).unwrap();
        assert_eq!(obj.polygons.len(), 1);
        assert_eq!(obj.center, Point3::ORIGIN);
        let polygon = &obj.polygons[0];
        assert_eq!(polygon.color, Color::WHITE);
        assert_eq!(polygon.points.len(), 3);
        assert_eq!(polygon.points[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(polygon.points[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(polygon.points[2], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_face_attachments_ignored() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/2/2 3/3/3\n";
        let obj = load_obj_from_str(text, Color::WHITE).unwrap();
        assert_eq!(obj.polygons.len(), 1);
        assert_eq!(obj.polygons[0].points[2], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_vertices_are_independent_copies() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 3 4\n";
        let mut obj = load_obj_from_str(text, Color::WHITE).unwrap();
        obj.polygons[0].translate(5.0, 0.0, 0.0);
        // the shared "v 0 0 0" vertex in the second face is untouched
        assert_eq!(obj.polygons[1].points[0], Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_records_ignored() {
        let text = "# comment\nvn 0 0 1\nv 0 0 0\nv 1 0 0\nv 0 1 0\ns off\nf 1 2 3\n";
        let obj = load_obj_from_str(text, Color::WHITE).unwrap();
        assert_eq!(obj.polygons.len(), 1);
    }

    #[test]
    fn test_malformed_vertex_fails() {
        let result = load_obj_from_str("v 0 zero 0\n", Color::WHITE);
        assert!(matches!(result, Err(ObjError::MalformedRecord { line: 1, .. })));
    }

    #[test]
    fn test_short_vertex_fails() {
        let result = load_obj_from_str("v 0 0\n", Color::WHITE);
        assert!(matches!(result, Err(ObjError::MalformedRecord { .. })));
    }

    #[test]
    fn test_index_out_of_range_fails() {
        let result = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n", Color::WHITE);
        assert!(matches!(result, Err(ObjError::IndexOutOfRange { line: 4, index: 4 })));
    }

    #[test]
    fn test_zero_index_fails() {
        let result = load_obj_from_str("v 0 0 0\nf 0 0 0\n", Color::WHITE);
        assert!(matches!(result, Err(ObjError::IndexOutOfRange { index: 0, .. })));
    }

    #[test]
    fn test_degenerate_face_skipped() {
        let text = "v 0 0 0\nv 1 0 0\nv 2 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 4\n";
        let obj = load_obj_from_str(text, Color::WHITE).unwrap();
        assert_eq!(obj.polygons.len(), 1);
    }
}
