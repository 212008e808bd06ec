//! Triangle adjacency across shared edges.

use std::collections::{BTreeMap, HashMap};

use stripbake_common::{float_key, impl_ord_by_key};

use crate::{
    error::{Error, Result},
    vertex::{EdgeKey, Normal, Triangle, TriangleId},
};

/// A direction vector (normal or tangent), compared by exact value.
#[derive(Debug, Clone, Copy)]
pub struct Direction(pub Normal);

impl_ord_by_key!(Direction, d => float_key([d.0.x, d.0.y, d.0.z]));

/// How many triangle corners use each distinct direction vector, counting normals and tangents
/// alike.
///
/// Consumers use this to share common direction constants; iteration is in [Direction] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionUsage(BTreeMap<Direction, usize>);

impl DirectionUsage {
    pub fn record(&mut self, direction: Normal) {
        *self.0.entry(Direction(direction)).or_default() += 1;
    }

    /// The number of uses of `direction`.
    pub fn count(&self, direction: &Normal) -> usize {
        self.0.get(&Direction(*direction)).copied().unwrap_or(0)
    }

    /// The number of distinct directions.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of recorded uses, over all directions.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Normal, usize)> {
        self.0.iter().map(|(d, &n)| (&d.0, n))
    }
}

/// Triangles of a mesh, linked to their neighbors across shared edges.
///
/// Built once by [Adjacency::build] and immutable afterwards. Neighbors are stored per edge slot,
/// in [Triangle::edges] order, so iteration never depends on hashing.
#[derive(Debug, Clone)]
pub struct Adjacency {
    triangles: Vec<Triangle>,
    neighbors: Vec<[Option<TriangleId>; 3]>,
    open_edges: usize,
    usage: DirectionUsage,
}

impl Adjacency {
    /// Link every pair of triangles that share an edge.
    ///
    /// Each triangle's id must equal its position in `triangles`.
    ///
    /// # Errors
    ///
    /// * a triangle id does not match its position
    /// * a triangle is [degenerate](Triangle::is_degenerate)
    /// * an edge borders more than two triangles
    #[tracing::instrument(skip_all, fields(triangles = triangles.len()))]
    pub fn build(triangles: Vec<Triangle>) -> Result<Self> {
        let mut neighbors = vec![[None; 3]; triangles.len()];
        let mut usage = DirectionUsage::default();
        // edge -> (triangle, edge slot) for edges seen exactly once so far
        let mut unmatched: HashMap<EdgeKey, (TriangleId, usize)> =
            HashMap::with_capacity(triangles.len() * 3 / 2);
        let mut matched: HashMap<EdgeKey, [TriangleId; 2]> = HashMap::new();

        for (slot, tri) in triangles.iter().enumerate() {
            let id = tri.id();
            if id.index() != slot {
                return Err(Error::NonDenseTriangleId { slot, id });
            }
            if tri.is_degenerate() {
                return Err(Error::DegenerateTriangle(id));
            }

            for v in tri.vertices() {
                usage.record(v.normal);
                usage.record(v.tangent);
            }

            for (edge_slot, edge) in tri.edges().into_iter().enumerate() {
                if let Some((other, other_slot)) = unmatched.remove(&edge) {
                    neighbors[other.index()][other_slot] = Some(id);
                    neighbors[slot][edge_slot] = Some(other);
                    matched.insert(edge, [other, id]);
                } else if let Some(&[a, b]) = matched.get(&edge) {
                    return Err(Error::NonManifoldEdge {
                        edge: Box::new(edge),
                        triangles: [a, b, id],
                    });
                } else {
                    unmatched.insert(edge, (id, edge_slot));
                }
            }
        }

        let isolated = neighbors
            .iter()
            .filter(|n| n.iter().all(Option::is_none))
            .count();
        if isolated > 0 {
            tracing::warn!(isolated, "some triangles share no edge with any other triangle");
        }
        tracing::debug!(
            shared_edges = matched.len(),
            open_edges = unmatched.len(),
            directions = usage.len(),
            "built triangle adjacency"
        );

        Ok(Self {
            triangles,
            neighbors,
            open_edges: unmatched.len(),
            usage,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// # Panics
    ///
    /// * `id` ∉ `self`
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Neighbors of `id`, with the edge each one is shared across.
    pub fn neighbors(&self, id: TriangleId) -> impl Iterator<Item = (EdgeKey, TriangleId)> + '_ {
        self.triangle(id)
            .edges()
            .into_iter()
            .zip(self.neighbors[id.index()])
            .filter_map(|(edge, n)| n.map(|n| (edge, n)))
    }

    /// The triangle on the other side of `edge` from `id`, if any.
    pub fn neighbor_across(&self, id: TriangleId, edge: &EdgeKey) -> Option<TriangleId> {
        self.triangle(id)
            .edges()
            .iter()
            .position(|e| e == edge)
            .and_then(|slot| self.neighbors[id.index()][slot])
    }

    /// The number of edges bordering only one triangle.
    #[inline]
    pub fn open_edges(&self) -> usize {
        self.open_edges
    }

    #[inline]
    pub fn direction_usage(&self) -> &DirectionUsage {
        &self.usage
    }
}
