//! Loads the triangle subset of Wavefront `.obj` files.
//!
//! Only `v`, `vn` and triangular `f` lines are read, every other line is
//! ignored. Malformed lines are logged and skipped so a mostly valid file
//! still loads; only an unreadable file or a result without vertices or
//! faces fails the whole load.

use std::fs;
use std::io::{self, BufRead};
use std::{num, path::Path};

use crystal::prelude::*;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::scene::mesh::{Corner, Face, Mesh};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Mesh contains no vertices.")]
    EmptyMesh,
    #[error("Mesh contains no valid faces.")]
    NoFaces,
    #[error("Failed to read model: {0}")]
    Io(#[from] io::Error),
}

/// What to do with a face corner whose vertex index does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacePolicy {
    /// Drop the whole face.
    #[default]
    Strict,
    /// Keep the face and point the corner at vertex 0.
    Lenient,
}

/// Reasons a single line is skipped.
#[derive(thiserror::Error, Debug, PartialEq)]
enum LineError {
    #[error("expected {expected} values, found {found}")]
    MissingValues { expected: usize, found: usize },
    #[error("failed to parse float: {0}")]
    ParseFloat(#[from] num::ParseFloatError),
    #[error("value is not finite: {0}")]
    NotFinite(f32),
    #[error("failed to parse index: {0}")]
    ParseInt(#[from] num::ParseIntError),
    #[error("missing vertex index in corner \"{0}\"")]
    MissingVertexIndex(String),
    #[error("only triangles are supported, found {0} corners")]
    NotATriangle(usize),
    #[error("vertex index {index} out of range ({count} vertices declared so far)")]
    VertexOutOfRange { index: usize, count: usize },
}

#[derive(Debug, Default)]
struct MeshBuilder {
    policy: FacePolicy,
    vertices: Vec<Vec3<f32>>,
    normals: Vec<Vec3<f32>>,
    faces: Vec<Face>,
    skipped_lines: usize,
}

impl MeshBuilder {
    fn new(policy: FacePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    fn push_vertex(&mut self, vertex: Vec3<f32>) {
        self.vertices.push(vertex);
    }

    fn push_normal(&mut self, normal: Vec3<f32>) {
        self.normals.push(normal);
    }

    fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    fn parse_line(&mut self, line_number: usize, line: &str) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (token, values) = match tokens.split_first() {
            Some(split) => split,
            None => return,
        };

        let result = match *token {
            // vertex
            "v" => parse_vec3(values).map(|v| self.push_vertex(v)),
            // vertex normals
            "vn" => parse_vec3(values).map(|n| self.push_normal(n)),
            "f" => self.parse_face(values).map(|face| {
                if let Some(face) = face {
                    self.push_face(face)
                }
            }),
            _ => {
                debug!("Ignoring line {} with token \"{}\"", line_number, token);
                Ok(())
            }
        };

        if let Err(err) = result {
            warn!("Skipping line {} \"{}\": {}", line_number, line.trim(), err);
            self.skipped_lines += 1;
        }
    }

    // `Ok(None)` means the face was deliberately dropped and already logged
    fn parse_face(&self, values: &[&str]) -> Result<Option<Face>, LineError> {
        if values.len() != 3 {
            return Err(LineError::NotATriangle(values.len()));
        }

        let mut corners = [Corner::default(); 3];
        for (corner, value) in corners.iter_mut().zip(values) {
            let [vert_i, _uv_i, normal_i] = parse_triplet(value)?;
            let vert_i = vert_i.ok_or_else(|| LineError::MissingVertexIndex(value.to_string()))?;

            corner.vertex = match resolve(vert_i, self.vertices.len()) {
                Some(index) => index,
                None => match self.policy {
                    FacePolicy::Strict => {
                        return Err(LineError::VertexOutOfRange {
                            index: vert_i,
                            count: self.vertices.len(),
                        })
                    }
                    FacePolicy::Lenient if self.vertices.is_empty() => {
                        warn!("Dropping face \"{}\": no vertices declared yet", values.join(" "));
                        return Ok(None);
                    }
                    FacePolicy::Lenient => {
                        warn!(
                            "Vertex index {} out of range ({} vertices), using vertex 1",
                            vert_i,
                            self.vertices.len()
                        );
                        0
                    }
                },
            };

            corner.normal = normal_i.and_then(|normal_i| {
                let resolved = resolve(normal_i, self.normals.len());
                if resolved.is_none() {
                    warn!(
                        "Normal index {} out of range ({} normals), ignoring it",
                        normal_i,
                        self.normals.len()
                    );
                }
                resolved
            });
        }

        Ok(Some(Face::new(corners)))
    }

    fn build_mesh(self) -> Result<Mesh, LoadError> {
        if self.skipped_lines > 0 {
            warn!("Skipped {} malformed line(s)", self.skipped_lines);
        }

        Mesh::new(self.vertices, self.normals, self.faces)
    }
}

/// Loads a mesh, dropping faces with unresolvable vertex indices.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    load_with_policy(path, FacePolicy::default())
}

pub fn load_with_policy<P: AsRef<Path>>(path: P, policy: FacePolicy) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    info!("Loading mesh: {}", path.display());

    let file = fs::File::open(path)?;
    let mesh = load_from_reader(io::BufReader::new(file), policy)?;

    info!(
        "Loaded mesh {}: {} vertices, {} normals, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.normals().len(),
        mesh.faces().len()
    );

    Ok(mesh)
}

/// Single pass over `reader`, line by line.
pub fn load_from_reader<R: BufRead>(reader: R, policy: FacePolicy) -> Result<Mesh, LoadError> {
    let mut builder = MeshBuilder::new(policy);

    for (idx, line) in reader.lines().enumerate() {
        builder.parse_line(idx + 1, &line?);
    }

    builder.build_mesh()
}

// converts a 1-based file index into a 0-based index below `count`
fn resolve(index: usize, count: usize) -> Option<usize> {
    index.checked_sub(1).filter(|index| *index < count)
}

fn parse_vec3(values: &[&str]) -> Result<Vec3<f32>, LineError> {
    if values.len() < 3 {
        return Err(LineError::MissingValues {
            expected: 3,
            found: values.len(),
        });
    }

    let numbers = parse_numbers(&values[..3])?;
    Ok(Vec3::new(numbers[0], numbers[1], numbers[2]))
}

fn parse_numbers(values: &[&str]) -> Result<Vec<f32>, LineError> {
    values
        .iter()
        .map(|x| {
            let value: f32 = x.parse()?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(LineError::NotFinite(value))
            }
        })
        .collect()
}

// parse a triplet seperated by slashes, e.g. `1`, `1/2`, `1//3` or `1/2/3`
fn parse_triplet(value: &str) -> Result<[Option<usize>; 3], num::ParseIntError> {
    let mut ret = [None; 3];

    for (a, b) in ret.iter_mut().zip(value.split('/')) {
        *a = if b.is_empty() { None } else { Some(b.parse()?) }
    }

    Ok(ret)
}
