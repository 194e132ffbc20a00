//! Wavefront OBJ support.
//!
//! Reading goes through [`tobj`] with triangulation on: polygons are
//! fan-triangulated, relative indices are resolved, and points, lines and
//! materials are dropped. Only position indices are kept. All objects and
//! groups in the file are merged into one triangle soup. Within each object,
//! vertices come out in the order faces first use them; unreferenced
//! vertices are dropped.
//!
//! Writing emits positions with per-vertex colors (`v x y z r g b`), the
//! accumulated vertex normals and one `f` record per face.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{build, BuildOptions, HalfEdgeMesh, MeshIndex};

/// Flat geometry read from an OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjData {
    /// `x, y, z` per vertex.
    pub coords: Vec<f64>,
    /// `x, y, z` per `vn` record. Not used to build meshes.
    pub normals: Vec<f64>,
    /// Three 0-based vertex indices per triangle.
    pub triangles: Vec<usize>,
}

impl ObjData {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.coords.len() / 3
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Center the vertices on their centroid and scale them uniformly so the
    /// Y extent equals `target_height`.
    ///
    /// A mesh with no Y extent is only centered.
    pub fn normalize(&mut self, target_height: f64) {
        let n = self.num_vertices();
        if n == 0 {
            return;
        }

        let mut center = [0.0; 3];
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in self.coords.chunks_exact(3) {
            for i in 0..3 {
                center[i] += p[i];
            }
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }
        for c in &mut center {
            *c /= n as f64;
        }

        let height = max_y - min_y;
        let scale = if height > 0.0 { target_height / height } else { 1.0 };

        for p in self.coords.chunks_exact_mut(3) {
            for i in 0..3 {
                p[i] = (p[i] - center[i]) * scale;
            }
        }
    }

    /// Build a half-edge mesh from the parsed geometry.
    pub fn to_mesh<I: MeshIndex>(&self, options: &BuildOptions) -> Result<HalfEdgeMesh<I>> {
        crate::mesh::build_with_options(&self.coords, &self.triangles, options)
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Merge the models tobj returns into one soup, shifting each model's
/// indices past the vertices of the models before it.
fn merge_models(models: Vec<tobj::Model>) -> ObjData {
    let mut data = ObjData::default();

    for model in models {
        let mesh = model.mesh;
        let base = data.num_vertices();
        data.coords.extend(mesh.positions.iter().map(|&x| f64::from(x)));
        data.normals.extend(mesh.normals.iter().map(|&x| f64::from(x)));
        data.triangles
            .extend(mesh.indices.iter().map(|&i| base + i as usize));
    }

    data
}

/// Parse OBJ text.
///
/// # Example
/// ```
/// use hedgemesh::io::obj;
///
/// let data = obj::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n").unwrap();
/// assert_eq!(data.num_vertices(), 3);
/// assert_eq!(data.triangles, vec![0, 1, 2]);
/// ```
pub fn parse(text: &str) -> Result<ObjData> {
    let (models, _materials) =
        tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| {
            Ok(Default::default())
        })?;
    Ok(merge_models(models))
}

/// Read and parse an OBJ file.
///
/// Material libraries the file references are not needed and not required
/// to exist.
pub fn read<P: AsRef<Path>>(path: P) -> Result<ObjData> {
    let path = path.as_ref();
    let (models, _materials) =
        tobj::load_obj(path, &load_options()).map_err(|e| MeshError::LoadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    log::debug!("read {} objects from {}", models.len(), path.display());
    Ok(merge_models(models))
}

/// Load a half-edge mesh from an OBJ file.
///
/// ```no_run
/// use hedgemesh::io::obj;
/// use hedgemesh::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = obj::load("bunny.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let data = read(path)?;
    build(&data.coords, &data.triangles)
}

/// Write a mesh as OBJ text with vertex colors and normals.
pub fn write<I: MeshIndex, W: Write>(mesh: &HalfEdgeMesh<I>, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    )?;

    for (v, vertex) in mesh.vertices() {
        let p = vertex.position;
        let c = mesh.color(v);
        writeln!(
            writer,
            "v {} {} {} {} {} {}",
            p.x,
            p.y,
            p.z,
            c.r(),
            c.g(),
            c.b()
        )?;
    }
    for v in mesh.vertex_ids() {
        let n = mesh.normal(v);
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for f in mesh.face_ids() {
        let [a, b, c] = mesh.face_triangle(f).map(|v| v.index() + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}

/// Save a mesh to an OBJ file.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Color, VertexId};

    const TETRA: &str = "\
# tetrahedron
mtllib missing.mtl
o tetra
v 0 0 0
v 1 0 0
v 0.5 1 0
v 0.5 0.5 1
vn 0 0 -1
s off
f 1//1 3//1 2//1
f 1//1 2//1 4//1
f 2//1 3//1 4//1
f -2//1 -4//1 -1//1
";

    fn tetra_mesh() -> HalfEdgeMesh {
        let coords = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.5, 1.0, 0.0, //
            0.5, 0.5, 1.0,
        ];
        build(&coords, &[0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3]).unwrap()
    }

    fn write_to_string(mesh: &HalfEdgeMesh) -> String {
        let mut out = Vec::new();
        write(mesh, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_tetrahedron() {
        let data = parse(TETRA).unwrap();

        assert_eq!(data.num_vertices(), 4);
        assert_eq!(data.num_triangles(), 4);
        assert!(!data.normals.is_empty());
        assert_eq!(data.normals.len() % 3, 0);

        let mesh: HalfEdgeMesh = data.to_mesh(&BuildOptions::default()).unwrap();
        assert!(mesh.is_closed());
        assert!(mesh.is_valid());
        assert!((mesh.surface_area() - tetra_mesh().surface_area()).abs() < 1e-6);
    }

    #[test]
    fn test_quad_is_fanned() {
        let data = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(data.triangles, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_objects_are_merged() {
        let text = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o b
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";
        let data = parse(text).unwrap();
        assert_eq!(data.num_vertices(), 6);
        assert_eq!(data.triangles, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(&data.coords[9..], &[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unused_vertices_are_dropped() {
        let data = parse("v 0 0 0\nv 9 9 9\nv 1 0 0\nv 0 1 0\nf 1 3 4\n").unwrap();
        assert_eq!(data.num_vertices(), 3);
        assert_eq!(data.coords, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(data.triangles, vec![0, 1, 2]);
    }

    #[test]
    fn test_bad_number() {
        let result = parse("v 0 zero 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(matches!(result, Err(MeshError::Obj(_))));
    }

    #[test]
    fn test_out_of_range_face() {
        let result = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 7\n");
        assert!(matches!(result, Err(MeshError::Obj(_))));
    }

    #[test]
    fn test_normalize() {
        let mut data = parse("v 0 0 0\nv 2 4 0\nv 4 2 6\nf 1 2 3\n").unwrap();
        data.normalize(50.0);

        // Centroid (2, 2, 2), height 4, scale 12.5.
        assert_eq!(
            data.coords,
            vec![-25.0, -25.0, -25.0, 0.0, 25.0, -25.0, 25.0, 0.0, 50.0]
        );
    }

    #[test]
    fn test_normalize_flat() {
        let mut data = ObjData {
            coords: vec![1.0, 0.0, 0.0, 3.0, 0.0, 0.0],
            ..Default::default()
        };
        data.normalize(50.0);
        assert_eq!(data.coords, vec![-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_write_and_read_back() {
        let mut mesh = tetra_mesh();
        mesh.set_color(VertexId::new(3), Color::RED);

        let text = write_to_string(&mesh);
        assert!(text.starts_with("# 4 vertices, 4 faces\n"));
        assert!(text.contains("v 0.5 0.5 1 1 0 0\n"));
        assert!(text.contains("v 0 0 0 1 1 1\n"));
        assert!(text.contains("f 1//1 3//3 2//2\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);

        let back: HalfEdgeMesh = parse(&text)
            .unwrap()
            .to_mesh(&BuildOptions::default())
            .unwrap();
        assert_eq!(back.num_vertices(), 4);
        assert_eq!(back.num_faces(), 4);
        assert!(back.is_closed());
        assert!((back.surface_area() - mesh.surface_area()).abs() < 1e-6);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tetra.obj");

        save(&tetra_mesh(), &path).unwrap();

        let loaded: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(loaded.num_vertices(), 4);
        assert_eq!(loaded.num_faces(), 4);
        assert!(loaded.is_closed());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.obj");
        match read(&path) {
            Err(MeshError::LoadError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected LoadError, got {:?}", other),
        }
    }
}
