//! Where triangles come from.

#[cfg(feature = "obj")]
pub mod obj;

use crate::{
    error::{Error, Result},
    vertex::{Normal, Position, Tangent, Texcoord, Triangle, TriangleId, Vertex},
};

/// Anything that can produce the triangle list of a mesh.
///
/// Triangles must be numbered densely from 0, in the order they are returned.
pub trait MeshSource {
    fn triangles(&self) -> Result<Vec<Triangle>>;
}

impl MeshSource for [Triangle] {
    fn triangles(&self) -> Result<Vec<Triangle>> {
        Ok(self.to_vec())
    }
}

impl MeshSource for Vec<Triangle> {
    fn triangles(&self) -> Result<Vec<Triangle>> {
        self.as_slice().triangles()
    }
}

/// An indexed mesh held in memory, with one attribute of each kind per vertex.
///
/// Faces are counter-clockwise when seen from the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    pub positions: Vec<Position>,
    pub normals: Vec<Normal>,
    pub tangents: Vec<Tangent>,
    pub uvs: Vec<Texcoord>,
    pub faces: Vec<[u32; 3]>,
}

impl TriangleSoup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn push_vertex(
        &mut self,
        position: Position,
        normal: Normal,
        tangent: Tangent,
        uv: Texcoord,
    ) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.tangents.push(tangent);
        self.uvs.push(uv);
        index
    }

    pub fn push_face(&mut self, corners: [u32; 3]) -> TriangleId {
        self.faces.push(corners);
        TriangleId::from_index(self.faces.len() - 1)
    }

    /// The number of vertices; the shortest attribute list.
    pub fn vertex_count(&self) -> usize {
        self.positions
            .len()
            .min(self.normals.len())
            .min(self.tangents.len())
            .min(self.uvs.len())
    }

    fn vertex(&self, index: u32) -> Result<Vertex> {
        let i = index as usize;
        let len = self.vertex_count();
        if i >= len {
            return Err(Error::IndexOutOfRange { index: i, len });
        }
        Ok(Vertex::new(
            index,
            self.positions[i],
            self.normals[i],
            self.tangents[i],
            self.uvs[i],
        ))
    }
}

impl MeshSource for TriangleSoup {
    fn triangles(&self) -> Result<Vec<Triangle>> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, &[a, b, c])| {
                let corners = [self.vertex(a)?, self.vertex(b)?, self.vertex(c)?];
                Ok(Triangle::from_corners(TriangleId::from_index(i), corners))
            })
            .collect()
    }
}
