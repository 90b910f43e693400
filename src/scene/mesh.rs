//! Immutable indexed triangle mesh.

use crystal::prelude::*;
use log::warn;

use crate::{assets::obj::LoadError, shading::geometry};

/// One corner of a triangle: a vertex index and an optional normal index,
/// both 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub normal: Option<usize>,
}

impl Corner {
    pub fn new(vertex: usize, normal: Option<usize>) -> Self {
        Self { vertex, normal }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: [Corner; 3],
}

impl Face {
    pub fn new(corners: [Corner; 3]) -> Self {
        Self { corners }
    }

    /// A face without normal references.
    pub fn from_vertices(indices: [usize; 3]) -> Self {
        Self::new(indices.map(|vertex| Corner::new(vertex, None)))
    }

    pub fn vertex_indices(&self) -> [usize; 3] {
        self.corners.map(|corner| corner.vertex)
    }

    /// The same triangle with opposite winding (v0, v2, v1).
    pub fn reversed(&self) -> Self {
        let [c0, c1, c2] = self.corners;
        Self::new([c0, c2, c1])
    }
}

/// A validated triangle mesh. Every vertex index stored in `faces` resolves
/// within `vertices` and there is at least one vertex and one face.
///
/// Face normals are derived from vertex positions once, at construction,
/// and kept in lockstep with `faces`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3<f32>>,
    normals: Vec<Vec3<f32>>,
    faces: Vec<Face>,
    face_normals: Vec<Vec3<f32>>,
}

impl Mesh {
    /// Builds a mesh, dropping faces whose vertex indices do not resolve and
    /// clearing normal references that do not resolve.
    pub fn new(
        vertices: Vec<Vec3<f32>>,
        normals: Vec<Vec3<f32>>,
        faces: Vec<Face>,
    ) -> Result<Self, LoadError> {
        if vertices.is_empty() {
            return Err(LoadError::EmptyMesh);
        }

        let faces: Vec<Face> = faces
            .into_iter()
            .filter_map(|mut face| {
                if face.corners.iter().any(|c| c.vertex >= vertices.len()) {
                    warn!("Dropping face {:?}: vertex index out of range", face.vertex_indices());
                    return None;
                }
                for corner in face.corners.iter_mut() {
                    if matches!(corner.normal, Some(n) if n >= normals.len()) {
                        corner.normal = None;
                    }
                }
                Some(face)
            })
            .collect();

        if faces.is_empty() {
            return Err(LoadError::NoFaces);
        }

        let mut mesh = Self {
            vertices,
            normals,
            faces,
            face_normals: Vec::new(),
        };
        mesh.face_normals = mesh
            .faces
            .iter()
            .map(|face| geometry::face_normal(&mesh, face).unwrap_or(geometry::FALLBACK_NORMAL))
            .collect();

        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Vec3<f32>] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3<f32>] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3<f32>> {
        self.vertices.get(index).copied()
    }

    /// The file normal referenced by a corner, if any.
    pub fn corner_normal(&self, corner: &Corner) -> Option<Vec3<f32>> {
        corner.normal.and_then(|n| self.normals.get(n).copied())
    }

    /// Positions of the three corners, or `None` if any index does not resolve.
    pub fn positions(&self, face: &Face) -> Option<[Vec3<f32>; 3]> {
        let [c0, c1, c2] = face.corners;
        Some([
            self.vertex(c0.vertex)?,
            self.vertex(c1.vertex)?,
            self.vertex(c2.vertex)?,
        ])
    }

    /// Cached normal of the face at `index`.
    pub fn face_normal(&self, index: usize) -> Option<Vec3<f32>> {
        self.face_normals.get(index).copied()
    }

    pub fn face_normals(&self) -> &[Vec3<f32>] {
        &self.face_normals
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square() -> (Vec<Vec3<f32>>, Vec<Face>) {
        (
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::from_vertices([0, 1, 2]), Face::from_vertices([0, 2, 3])],
        )
    }

    #[test]
    fn test_new_caches_normals() {
        let (vertices, faces) = square();
        let mesh = Mesh::new(vertices, Vec::new(), faces).unwrap();

        assert_eq!(mesh.face_normals().len(), mesh.faces().len());
        assert_eq!(mesh.face_normal(0), Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(mesh.face_normal(2), None);
    }

    #[test]
    fn test_new_drops_unresolved_faces() {
        let (vertices, mut faces) = square();
        faces.push(Face::from_vertices([0, 1, 99]));
        let mesh = Mesh::new(vertices, Vec::new(), faces).unwrap();

        assert_eq!(mesh.faces().len(), 2);
    }

    #[test]
    fn test_new_clears_unresolved_normals() {
        let (vertices, _) = square();
        let face = Face::new([
            Corner::new(0, Some(0)),
            Corner::new(1, Some(7)),
            Corner::new(2, None),
        ]);
        let mesh = Mesh::new(vertices, vec![Vec3::unit_z()], vec![face]).unwrap();

        let corners = mesh.faces()[0].corners;
        assert_eq!(corners[0].normal, Some(0));
        assert_eq!(corners[1].normal, None);
        assert_eq!(mesh.corner_normal(&corners[0]), Some(Vec3::unit_z()));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Mesh::new(Vec::new(), Vec::new(), vec![Face::default()]),
            Err(LoadError::EmptyMesh)
        ));
        assert!(matches!(
            Mesh::new(vec![Vec3::zero()], Vec::new(), Vec::new()),
            Err(LoadError::NoFaces)
        ));
    }

    #[test]
    fn test_reversed_winding() {
        let face = Face::from_vertices([4, 5, 6]);

        assert_eq!(face.reversed().vertex_indices(), [4, 6, 5]);
    }
}
