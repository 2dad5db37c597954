//! Reader for the Simple Model Format.
//!
//! Only `v x y z` and `f i j k ...` lines carry geometry; indices are 1-based.
//! Everything after a `#` is a comment. The other SMF keywords are skipped.

use crate::scene::mesh::Mesh;
use log::{debug, info};
use nalgebra::Point3;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum SmfError {
    #[error("failed to read SMF file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: vertex index {index} is out of range (file has {vertex_count} vertices)")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("SMF file contains no vertices")]
    Empty,
}

/// A face as written in the file, resolved once all vertices are known.
struct PendingFace {
    line: usize,
    indices: Vec<i64>,
}

/// Reads and parses an SMF file.
pub fn load_smf<P: AsRef<Path>>(path: P) -> Result<Mesh, SmfError> {
    let path = path.as_ref();
    info!("Loading SMF file: {}", path.display());

    let text = fs::read_to_string(path)?;
    let mesh = parse_smf(&text)?;

    info!(
        "Loaded {} verts, {} tris.",
        mesh.vertices.len(),
        mesh.triangles.len()
    );
    Ok(mesh)
}

/// Parses SMF text into a mesh with face and averaged vertex normals.
///
/// Faces with more than three corners are split into a fan around their first corner.
pub fn parse_smf(text: &str) -> Result<Mesh, SmfError> {
    let mut positions = Vec::new();
    let mut pending = Vec::new();
    let mut ignored: HashSet<&str> = HashSet::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before);
        let mut tokens = content.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => positions.push(parse_vertex(line, tokens)?),
            "f" => {
                let indices = tokens
                    .map(|t| parse_number::<i64>(line, t, "vertex index"))
                    .collect::<Result<Vec<_>, _>>()?;
                if indices.len() < 3 {
                    return Err(SmfError::Parse {
                        line,
                        message: format!("face needs at least 3 indices, found {}", indices.len()),
                    });
                }
                pending.push(PendingFace { line, indices });
            }
            other => {
                if ignored.insert(other) {
                    debug!("Ignoring SMF keyword '{other}' (first seen on line {line})");
                }
            }
        }
    }

    if positions.is_empty() {
        return Err(SmfError::Empty);
    }

    let faces = resolve_faces(&pending, positions.len())?;
    Ok(Mesh::from_faces(positions, &faces))
}

fn parse_vertex<'a>(
    line: usize,
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<Point3<f32>, SmfError> {
    let mut coord = |axis: &str| {
        let token = tokens.next().ok_or_else(|| SmfError::Parse {
            line,
            message: format!("vertex is missing its {axis} coordinate"),
        })?;
        parse_number::<f32>(line, token, "coordinate")
    };
    let x = coord("x")?;
    let y = coord("y")?;
    let z = coord("z")?;
    Ok(Point3::new(x, y, z))
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str, what: &str) -> Result<T, SmfError> {
    token.parse().map_err(|_| SmfError::Parse {
        line,
        message: format!("invalid {what} '{token}'"),
    })
}

/// Converts 1-based indices to 0-based triangles, fanning polygons.
fn resolve_faces(pending: &[PendingFace], vertex_count: usize) -> Result<Vec<[u32; 3]>, SmfError> {
    let mut faces = Vec::with_capacity(pending.len());

    for face in pending {
        let zero_based = face
            .indices
            .iter()
            .map(|&index| {
                if index >= 1 && (index as usize) <= vertex_count {
                    Ok((index - 1) as u32)
                } else {
                    Err(SmfError::IndexOutOfRange {
                        line: face.line,
                        index,
                        vertex_count,
                    })
                }
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let anchor = zero_based[0];
        faces.extend(zero_based[1..].windows(2).map(|w| [anchor, w[0], w[1]]));
    }

    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    const TETRA: &str = "\
# tetrahedron
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

    #[test]
    fn parses_vertices_and_faces() {
        let mesh = parse_smf(TETRA).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles.len(), 4);
        assert_eq!(mesh.triangles[0].indices, [0, 2, 1]);
        assert_relative_eq!(mesh.triangles[0].normal, -Vector3::z());
    }

    #[test]
    fn vertex_normals_point_away_from_tetrahedron_center() {
        let mesh = parse_smf(TETRA).unwrap();
        let center = Vector3::repeat(0.25);
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal.norm(), 1.0, epsilon = 1e-6);
            assert!(v.normal.dot(&(v.position.coords - center)) > 0.0);
        }
    }

    #[test]
    fn skips_comments_blank_lines_and_unknown_keywords() {
        let text = "\n  # header\nbind n vertex\nv 0 0 0\n\nv 1 0 0 # trailing\nv 0 1 0\nn 0 0 1\nf 1 2 3\n";
        let mesh = parse_smf(text).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn trailing_comments_are_allowed_on_face_lines() {
        let text = "v 0 0 0 # c\nv 1 0 0\nv 0 1 0\nf 1 2 3 # tri\nf 1 2 3#tight\n";
        let mesh = parse_smf(text).unwrap();
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.indices(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn faces_may_reference_later_vertices() {
        let mesh = parse_smf("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_relative_eq!(mesh.triangles[0].normal, Vector3::z());
    }

    #[test]
    fn polygons_are_fanned() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_smf(text).unwrap();
        assert_eq!(mesh.indices(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn out_of_range_index_reports_line() {
        let err = parse_smf("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 7\n").unwrap_err();
        match err {
            SmfError::IndexOutOfRange {
                line,
                index,
                vertex_count,
            } => assert_eq!((line, index, vertex_count), (4, 7, 3)),
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_smf("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, SmfError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn malformed_lines_are_parse_errors() {
        let err = parse_smf("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, SmfError::Parse { line: 1, .. }));

        let err = parse_smf("v 0 0\n").unwrap_err();
        assert!(matches!(err, SmfError::Parse { line: 1, .. }));

        let err = parse_smf("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, SmfError::Parse { line: 3, .. }));
    }

    #[test]
    fn file_without_vertices_is_empty() {
        assert!(matches!(parse_smf("# nothing\n"), Err(SmfError::Empty)));
    }

    #[test]
    fn vertices_without_faces_still_load() {
        let mesh = parse_smf("v 1 2 3\n").unwrap();
        assert_eq!(mesh.vertices.len(), 1);
        assert!(mesh.triangles.is_empty());
    }
}
