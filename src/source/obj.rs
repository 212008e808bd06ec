//! Wavefront OBJ meshes, loaded with [tobj].

use std::{io::BufRead, path::Path};

use nalgebra::Vector2;

use crate::{
    error::{Error, Result},
    source::MeshSource,
    vertex::{Normal, Position, Tangent, Texcoord, Triangle, TriangleId, Vertex},
};

/// Every model of an OBJ file, triangulated, with one index per corner for all attributes.
///
/// Normals and texture coordinates are required. Tangents are derived from texture coordinate
/// gradients.
#[derive(Debug, Clone)]
pub struct ObjSource {
    models: Vec<tobj::Model>,
}

impl ObjSource {
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        // materials are irrelevant to geometry; a missing .mtl is not an error
        let (models, _) = tobj::load_obj(path.as_ref(), &tobj::GPU_LOAD_OPTIONS)?;
        tracing::debug!(models = models.len(), "loaded OBJ file");
        Ok(Self { models })
    }

    /// Load from an in-memory OBJ document. Material libraries it references are not loaded.
    pub fn from_reader(reader: &mut impl BufRead) -> Result<Self> {
        let (models, _) = tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Ok(Self { models })
    }

    #[inline]
    pub fn models(&self) -> &[tobj::Model] {
        &self.models
    }
}

impl MeshSource for ObjSource {
    fn triangles(&self) -> Result<Vec<Triangle>> {
        let mut res = Vec::new();
        // models index their own vertices from 0
        let mut offset = 0;
        for model in &self.models {
            let vertices = model_vertices(model)?;
            let corner = |index: u32| -> Result<Vertex> {
                let mut v = *vertices.get(index as usize).ok_or(Error::IndexOutOfRange {
                    index: index as usize,
                    len: vertices.len(),
                })?;
                v.index += offset;
                Ok(v)
            };
            for corners in model.mesh.indices.chunks_exact(3) {
                let tri = [corner(corners[0])?, corner(corners[1])?, corner(corners[2])?];
                res.push(Triangle::from_corners(TriangleId::from_index(res.len()), tri));
            }
            offset += vertices.len() as u32;
        }
        Ok(res)
    }
}

fn attribute<const N: usize>(
    model: &tobj::Model,
    data: &[f32],
    name: &'static str,
) -> Result<Vec<[f32; N]>> {
    let count = model.mesh.positions.len() / 3;
    if data.len() < count * N {
        return Err(Error::MissingAttribute {
            model: model.name.clone(),
            attribute: name,
        });
    }
    Ok(data
        .chunks_exact(N)
        .take(count)
        .map(|c| std::array::from_fn(|i| c[i]))
        .collect())
}

/// Every vertex of `model`, with tangents averaged over the faces that use it.
fn model_vertices(model: &tobj::Model) -> Result<Vec<Vertex>> {
    let positions: Vec<Position> = attribute::<3>(model, &model.mesh.positions, "positions")?
        .into_iter()
        .map(Position::from)
        .collect();
    let normals: Vec<Normal> = attribute::<3>(model, &model.mesh.normals, "normals")?
        .into_iter()
        .map(Normal::from)
        .collect();
    let uvs: Vec<Texcoord> = attribute::<2>(model, &model.mesh.texcoords, "texture coordinates")?
        .into_iter()
        .map(Texcoord::from)
        .collect();

    let mut tangents = vec![Tangent::zeros(); positions.len()];
    for corners in model.mesh.indices.chunks_exact(3) {
        let [a, b, c] = [corners[0], corners[1], corners[2]].map(|i| i as usize);
        if a.max(b).max(c) >= positions.len() {
            return Err(Error::IndexOutOfRange {
                index: a.max(b).max(c),
                len: positions.len(),
            });
        }
        let tangent = uv_tangent(
            [&positions[a], &positions[b], &positions[c]],
            [&uvs[a], &uvs[b], &uvs[c]],
        );
        for i in [a, b, c] {
            tangents[i] += tangent;
        }
    }

    Ok((0..positions.len())
        .map(|i| {
            Vertex::new(
                i as u32,
                positions[i],
                normals[i],
                orthonormal_tangent(&normals[i], &tangents[i]),
                uvs[i],
            )
        })
        .collect())
}

/// The direction of increasing `u` across a face, or zero if its texture coordinates are degenerate.
fn uv_tangent(p: [&Position; 3], uv: [&Texcoord; 3]) -> Tangent {
    let e1 = p[1] - p[0];
    let e2 = p[2] - p[0];
    let d1: Vector2<f32> = uv[1] - uv[0];
    let d2: Vector2<f32> = uv[2] - uv[0];
    let det = d1.x * d2.y - d2.x * d1.y;
    if det.abs() <= f32::EPSILON {
        return Tangent::zeros();
    }
    (e1 * d2.y - e2 * d1.y) / det
}

/// `tangent` made orthogonal to `normal` and normalized, or an arbitrary unit vector orthogonal to
/// `normal` if that leaves nothing.
fn orthonormal_tangent(normal: &Normal, tangent: &Tangent) -> Tangent {
    let n = normal.try_normalize(f32::EPSILON).unwrap_or_else(Normal::z);
    (tangent - n * n.dot(tangent))
        .try_normalize(f32::EPSILON)
        .or_else(|| n.cross(&Normal::x()).try_normalize(f32::EPSILON))
        .or_else(|| n.cross(&Normal::y()).try_normalize(f32::EPSILON))
        .unwrap_or_else(Tangent::x)
}
