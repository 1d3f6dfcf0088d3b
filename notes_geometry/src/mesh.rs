//! Triangle meshes imported from Wavefront OBJ files.

use std::io::BufRead;
use std::path::Path;

use cgmath::{InnerSpace, Vector3, Zero};
use log::{debug, warn};

use crate::error::GeometryError;

/// The first mesh of an OBJ file, triangulated and re-indexed so that positions, normals and
/// texture coordinates share one index.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

impl MeshData {
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let (models, _) = tobj::load_obj(path, &load_options())
            .map_err(|source| GeometryError::Obj { path: name.clone(), source })?;

        Self::from_models(models, &name)
    }

    /// Reads an OBJ document from memory. Material libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R, name: &str) -> Result<Self, GeometryError> {
        let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|source| GeometryError::Obj { path: name.to_string(), source })?;

        Self::from_models(models, name)
    }

    fn from_models(models: Vec<tobj::Model>, name: &str) -> Result<Self, GeometryError> {
        // Objects without faces still come back as (empty) models
        let mut meshes: Vec<tobj::Mesh> = models
            .into_iter()
            .map(|m| m.mesh)
            .filter(|m| !m.positions.is_empty() && !m.indices.is_empty())
            .collect();

        if meshes.len() > 1 {
            warn!("{} holds {} meshes, only the first one is used", name, meshes.len());
        }

        if meshes.is_empty() {
            return Err(GeometryError::NoMesh(name.to_string()));
        }
        let mesh = meshes.swap_remove(0);

        let positions: Vec<[f32; 3]> = mesh.positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();

        let uvs = if mesh.texcoords.len() / 2 == positions.len() {
            mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect()
        } else {
            vec![[0.0; 2]; positions.len()]
        };

        let mut data = Self {
            normals: Vec::new(),
            uvs,
            indices: mesh.indices,
            positions,
        };

        data.normals = if mesh.normals.len() / 3 == data.positions.len() {
            mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
        } else {
            debug!("{} has no normals, generating them from faces", name);
            data.face_normals()
        };

        debug!(
            "loaded {}: {} vertices, {} faces",
            name,
            data.vertex_count(),
            data.face_count()
        );

        Ok(data)
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() }

    pub fn index_count(&self) -> usize { self.indices.len() }

    pub fn face_count(&self) -> usize { self.indices.len() / 3 }

    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|f| [f[0], f[1], f[2]])
    }

    /// One position per face corner, for demos that draw with `glDrawArrays`.
    pub fn unindexed_positions(&self) -> Vec<[f32; 3]> {
        self.indices
            .iter()
            .map(|&i| self.positions[i as usize])
            .collect()
    }

    /// Smooth normals: every vertex gets the normalised sum of its faces' normals.
    fn face_normals(&self) -> Vec<[f32; 3]> {
        let mut sums = vec![Vector3::<f32>::zero(); self.positions.len()];

        for [a, b, c] in self.faces() {
            let pa = Vector3::from(self.positions[a as usize]);
            let pb = Vector3::from(self.positions[b as usize]);
            let pc = Vector3::from(self.positions[c as usize]);
            let normal = (pb - pa).cross(pc - pa);

            for &i in &[a, b, c] {
                sums[i as usize] += normal;
            }
        }

        sums.into_iter()
            .map(|n| if n.magnitude2() > 0.0 { n.normalize().into() } else { [0.0; 3] })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    fn quad() -> MeshData {
        MeshData::from_obj_reader(&mut Cursor::new(QUAD), "quad.obj").unwrap()
    }

    #[test]
    fn quad_is_triangulated_into_two_faces() {
        let mesh = quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.index_count(), 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn texture_coordinates_follow_their_vertices() {
        let mesh = quad();

        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            assert_eq!([p[0], p[1]], *uv);
        }
    }

    #[test]
    fn missing_normals_are_generated_from_winding() {
        let mesh = quad();

        for n in &mesh.normals {
            assert!((n[2] - 1.0).abs() < 1e-6);
            assert!(n[0].abs() < 1e-6 && n[1].abs() < 1e-6);
        }
    }

    #[test]
    fn unindexed_positions_repeat_shared_corners() {
        let mesh = quad();
        let positions = mesh.unindexed_positions();

        assert_eq!(positions.len(), 6);
        for (corner, &index) in positions.iter().zip(&mesh.indices) {
            assert_eq!(*corner, mesh.positions[index as usize]);
        }
    }

    #[test]
    fn empty_document_has_no_mesh() {
        let result = MeshData::from_obj_reader(&mut Cursor::new("# nothing here\n"), "empty.obj");

        assert!(matches!(result, Err(GeometryError::NoMesh(_))));
    }

    #[test]
    fn objects_without_faces_are_not_meshes() {
        let named = MeshData::from_obj_reader(&mut Cursor::new("o teapot\n"), "named.obj");
        let loose = MeshData::from_obj_reader(&mut Cursor::new("o dots\nv 0 0 0\nv 1 0 0\n"), "dots.obj");

        assert!(matches!(named, Err(GeometryError::NoMesh(_))));
        assert!(matches!(loose, Err(GeometryError::NoMesh(_))));
    }

    #[test]
    fn empty_objects_are_skipped_for_the_first_real_mesh() {
        let document = format!("o empty\no quad\n{}", QUAD);
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(document), "two.obj").unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
    }
}
