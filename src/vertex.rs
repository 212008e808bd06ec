//! Vertex, triangle and edge values.
//!
//! Every value here is immutable once built and compares by value: two [Vertex] instances are the
//! same vertex iff every field compares equal, which is what lets triangles discover that they
//! share an edge.

use std::fmt;

use nalgebra::{Point2, Point3, Vector3};
use stripbake_common::{float_key, impl_ord_by_key};

pub type Position = Point3<f32>;
pub type Normal = Vector3<f32>;
pub type Tangent = Vector3<f32>;
pub type Texcoord = Point2<f32>;

/// A single triangle corner, with all of the attributes that end up in the baked buffer.
///
/// Ordered lexicographically by `index`, then `position`, `normal`, `tangent` and `uv`, using the
/// [stripbake_common::OrderedFloat]; `-0.0` and `+0.0` are the same value here.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Index of this vertex within the source mesh
    pub index: u32,
    pub position: Position,
    pub normal: Normal,
    pub tangent: Tangent,
    pub uv: Texcoord,
}

impl_ord_by_key!(Vertex, v => (
    v.index,
    float_key([
        v.position.x,
        v.position.y,
        v.position.z,
        v.normal.x,
        v.normal.y,
        v.normal.z,
        v.tangent.x,
        v.tangent.y,
        v.tangent.z,
        v.uv.x,
        v.uv.y,
    ])
));

impl Vertex {
    #[inline]
    pub fn new(
        index: u32,
        position: Position,
        normal: Normal,
        tangent: Tangent,
        uv: Texcoord,
    ) -> Self {
        Self {
            index,
            position,
            normal,
            tangent,
            uv,
        }
    }
}

/// Identifier of a triangle; its position in mesh iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub u32);

impl TriangleId {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An unordered pair of vertices; the key under which two triangles find out they are neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey([Vertex; 2]);

impl EdgeKey {
    pub fn new(a: Vertex, b: Vertex) -> Self {
        if b < a {
            Self([b, a])
        } else {
            Self([a, b])
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex; 2] {
        &self.0
    }

    #[inline]
    pub fn contains(&self, v: &Vertex) -> bool {
        self.0.contains(v)
    }
}

/// Three vertices in canonical (sorted) order, plus the face normal used to tell front from back.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    id: TriangleId,
    vertices: [Vertex; 3],
    normal: Normal,
}

impl Triangle {
    /// Construct a triangle with an explicit face normal. The vertices may be given in any order.
    pub fn new(id: TriangleId, mut vertices: [Vertex; 3], normal: Normal) -> Self {
        vertices.sort();
        Self {
            id,
            vertices,
            normal,
        }
    }

    /// Construct a triangle whose face normal is derived from its corners; the front face is the
    /// one from which `corners` appear counter-clockwise.
    pub fn from_corners(id: TriangleId, corners: [Vertex; 3]) -> Self {
        let [a, b, c] = &corners;
        let normal = (b.position - a.position)
            .cross(&(c.position - a.position))
            .try_normalize(0.0)
            .unwrap_or_else(Normal::zeros);
        Self::new(id, corners, normal)
    }

    #[inline]
    pub fn id(&self) -> TriangleId {
        self.id
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    #[inline]
    pub fn normal(&self) -> &Normal {
        &self.normal
    }

    #[inline]
    pub fn contains(&self, v: &Vertex) -> bool {
        self.vertices.contains(v)
    }

    /// The number of vertices `self` has in common with `other`.
    pub fn shared_with(&self, other: &Triangle) -> usize {
        self.vertices.iter().filter(|v| other.contains(v)).count()
    }

    /// All three edges, in the order (0, 1), (0, 2), (1, 2).
    pub fn edges(&self) -> [EdgeKey; 3] {
        let [a, b, c] = self.vertices;
        [EdgeKey::new(a, b), EdgeKey::new(a, c), EdgeKey::new(b, c)]
    }

    /// The edge across from `v`, if `v` is a corner of this triangle.
    pub fn opposite_edge(&self, v: &Vertex) -> Option<EdgeKey> {
        let [a, b, c] = self.vertices;
        if *v == a {
            Some(EdgeKey::new(b, c))
        } else if *v == b {
            Some(EdgeKey::new(a, c))
        } else if *v == c {
            Some(EdgeKey::new(a, b))
        } else {
            None
        }
    }

    /// Whether this triangle has no area, or no usable face normal.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = &self.vertices;
        let area = (b.position - a.position)
            .cross(&(c.position - a.position))
            .norm_squared();
        let normal = self.normal.norm_squared();
        !(area > 0.0 && area.is_finite() && normal > 0.0 && normal.is_finite())
    }
}
