use std::{fs, path::Path};

use log::info;

use crate::{
    material::Material,
    math::Vector3,
    object::{DrawMode, Mesh},
};

use super::{tokenize::Reader, LoadError};

/// Vertex positions and triangles, as read from a mesh file.
pub type MeshGeometry = (Vec<Vector3>, Vec<[usize; 3]>);

/// Load a mesh file: OBJ if the extension says so, OFF otherwise.
pub fn load_mesh(path: &Path, draw_mode: DrawMode, material: Material) -> Result<Mesh, LoadError> {
    let is_obj = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));

    let (positions, triangles) = if is_obj {
        read_obj(path)?
    } else {
        read_off(path)?
    };

    info!(
        "read {}: {} vertices, {} triangles",
        path.display(),
        positions.len(),
        triangles.len()
    );

    Ok(Mesh::new(positions, triangles, draw_mode, material))
}

/// Read a mesh in OFF format.
pub fn read_off(path: &Path) -> Result<MeshGeometry, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_off(&source, path)
}

/// Parse OFF text: the `OFF` tag, vertex/face/edge counts, the vertex
/// positions and then one `3 i0 i1 i2` record per face.
pub fn parse_off(source: &str, path: &Path) -> Result<MeshGeometry, LoadError> {
    let mut reader = Reader::new(source, path);

    match reader.next_token() {
        Some(token) if token.text == "OFF" => {}
        _ => {
            return Err(LoadError::NotOff {
                path: path.to_path_buf(),
            })
        }
    }

    let vertex_count: usize = reader.value("vertex count")?;
    let face_count: usize = reader.value("face count")?;
    let _edge_count: usize = reader.value("edge count")?;

    let positions = (0..vertex_count)
        .map(|_| reader.vector("vertex position"))
        .collect::<Result<Vec<_>, _>>()?;

    let mut triangles = Vec::with_capacity(face_count);
    for face in 0..face_count {
        let count: usize = reader.value("face vertex count")?;
        if count != 3 {
            return Err(LoadError::NotTriangle {
                path: path.to_path_buf(),
                face,
                count,
            });
        }

        let mut indices = [0; 3];
        for index in indices.iter_mut() {
            *index = reader.value("vertex index")?;
            if *index >= vertex_count {
                return Err(LoadError::IndexOutOfRange {
                    path: path.to_path_buf(),
                    face,
                    index: *index,
                    vertices: vertex_count,
                });
            }
        }
        triangles.push(indices);
    }

    Ok((positions, triangles))
}

/// Read a mesh in OBJ format, triangulating polygons. Every model in the file
/// is merged into one mesh; normals and texture coordinates are ignored.
pub fn read_obj(path: &Path) -> Result<MeshGeometry, LoadError> {
    let (models, _) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            ..Default::default()
        },
    )
    .map_err(|source| LoadError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut geometry = (Vec::new(), Vec::new());
    for model in models.iter() {
        append_model(&mut geometry, &model.mesh.positions, &model.mesh.indices, path)?;
    }

    let (positions, triangles) = geometry;
    if triangles.is_empty() {
        return Err(LoadError::EmptyObj {
            path: path.to_path_buf(),
        });
    }

    Ok((positions, triangles))
}

/// Append one OBJ model to the merged geometry. Its indices are local to the
/// model; faces and vertices in errors are numbered across the whole file.
fn append_model(
    (positions, triangles): &mut MeshGeometry,
    model_positions: &[f32],
    model_indices: &[u32],
    path: &Path,
) -> Result<(), LoadError> {
    let offset = positions.len();

    positions.extend(
        model_positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
    );

    for tri in model_indices.chunks_exact(3) {
        let mut indices = [0; 3];
        for (index, &i) in indices.iter_mut().zip(tri) {
            *index = offset + i as usize;
            if *index >= positions.len() {
                return Err(LoadError::IndexOutOfRange {
                    path: path.to_path_buf(),
                    face: triangles.len(),
                    index: *index,
                    vertices: positions.len(),
                });
            }
        }
        triangles.push(indices);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRAHEDRON: &str = "OFF
# a comment between header and counts
4 4 6
0 0 0
1 0 0
0 1 0
0 0 1
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

    #[test]
    fn parses_tetrahedron() {
        let (positions, triangles) = parse_off(TETRAHEDRON, Path::new("tet.off")).unwrap();
        assert_eq!(positions.len(), 4);
        assert_eq!(positions[3], Vector3::new(0., 0., 1.));
        assert_eq!(triangles, vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]);
    }

    #[test]
    fn rejects_missing_header() {
        let err = parse_off("4 4 6", Path::new("tet.off")).unwrap_err();
        assert!(matches!(err, LoadError::NotOff { .. }));
    }

    #[test]
    fn rejects_quads() {
        let src = "OFF 4 1 0  0 0 0  1 0 0  1 1 0  0 1 0  4 0 1 2 3";
        let err = parse_off(src, Path::new("quad.off")).unwrap_err();
        assert!(matches!(err, LoadError::NotTriangle { face: 0, count: 4, .. }));
    }

    #[test]
    fn rejects_bad_index() {
        let src = "OFF 3 1 0  0 0 0  1 0 0  0 1 0  3 0 1 3";
        let err = parse_off(src, Path::new("tri.off")).unwrap_err();
        assert!(matches!(err, LoadError::IndexOutOfRange { index: 3, vertices: 3, .. }));
    }

    #[test]
    fn rejects_truncated_file() {
        let src = "OFF 3 1 0  0 0 0  1 0 0";
        let err = parse_off(src, Path::new("tri.off")).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));
    }

    fn data(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join(name)
    }

    #[test]
    fn obj_quad_is_triangulated() {
        let (positions, triangles) = read_obj(&data("quad.obj")).unwrap();
        assert_eq!(positions.len(), 4);
        assert_eq!(triangles.len(), 2);
        assert!(triangles.iter().flatten().all(|&i| i < 4));
    }

    #[test]
    fn obj_models_are_merged_with_offset_indices() {
        let (positions, triangles) = read_obj(&data("two_quads.obj")).unwrap();
        assert_eq!(positions.len(), 8);
        assert_eq!(triangles.len(), 4);

        // the second model's triangles point at its own vertices, all at z = 1
        for tri in &triangles[2..] {
            for &i in tri {
                assert!(i >= 4 && i < 8);
                assert_eq!(positions[i].z, 1.);
            }
        }
        for tri in &triangles[..2] {
            assert!(tri.iter().all(|&i| positions[i].z == 0.));
        }
    }

    #[test]
    fn obj_without_faces_is_rejected() {
        let err = read_obj(&data("points.obj")).unwrap_err();
        assert!(matches!(err, LoadError::EmptyObj { .. }));
    }

    #[test]
    fn obj_extension_selects_obj_reader() {
        let mesh = load_mesh(&data("quad.obj"), DrawMode::Phong, Material::default()).unwrap();
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.bounding_box.min, Vector3::zero());
        assert_eq!(mesh.bounding_box.max, Vector3::new(1., 1., 0.));
    }

    #[test]
    fn obj_index_errors_count_faces_across_models() {
        let square = [0., 0., 0., 1., 0., 0., 1., 1., 0., 0., 1., 0.];
        let path = Path::new("two.obj");
        let mut geometry = (Vec::new(), Vec::new());

        append_model(&mut geometry, &square, &[0, 1, 2, 0, 2, 3], path).unwrap();
        let err = append_model(&mut geometry, &square, &[0, 1, 2, 0, 2, 4], path).unwrap_err();

        assert!(matches!(
            err,
            LoadError::IndexOutOfRange { face: 3, index: 8, vertices: 8, .. }
        ));
    }

    #[test]
    fn missing_obj_is_an_error() {
        let err = read_obj(&data("nowhere.obj")).unwrap_err();
        assert!(matches!(err, LoadError::Obj { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_off(Path::new("does/not/exist.off")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
