//! Greedy division of a mesh into triangle strips.

use std::{cmp::Reverse, collections::BTreeMap, fmt};

use bitvec::vec::BitVec;

use crate::{
    adjacency::Adjacency,
    error::{Error, Result},
    vertex::Vertex,
    winding::{Winding, WindingResolver},
    TriangleId,
};

/// A sequence of vertices in which every consecutive triple is a triangle.
///
/// The first triple has the target winding and each following triple has the opposite winding of
/// the one before it, as a rasterizer expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Strip {
    vertices: Vec<Vertex>,
    triangles: Vec<TriangleId>,
}

impl Strip {
    /// # Panics
    ///
    /// * `vertices.len() != triangles.len() + 2`
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<TriangleId>) -> Self {
        assert_eq!(
            vertices.len(),
            triangles.len() + 2,
            "a strip of n triangles has n + 2 vertices"
        );
        Self {
            vertices,
            triangles,
        }
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The triangles this strip covers, in strip order.
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// Each triangle of the strip as the vertex triple a rasterizer would see, paired with its id.
    pub fn windows(&self) -> impl Iterator<Item = (TriangleId, [&Vertex; 3])> + '_ {
        self.triangles
            .iter()
            .zip(self.vertices.windows(3))
            .map(|(&id, w)| (id, [&w[0], &w[1], &w[2]]))
    }
}

/// The number of strips of each length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthDistribution(BTreeMap<usize, usize>);

impl LengthDistribution {
    pub fn of(strips: &[Strip]) -> Self {
        let mut res = Self::default();
        for strip in strips {
            *res.0.entry(strip.len()).or_default() += 1;
        }
        res
    }

    /// The number of strips with exactly `length` vertices.
    pub fn count(&self, length: usize) -> usize {
        self.0.get(&length).copied().unwrap_or(0)
    }

    /// `(length, count)` pairs, shortest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&l, &n)| (l, n))
    }

    pub fn strips(&self) -> usize {
        self.0.values().sum()
    }

    pub fn vertices(&self) -> usize {
        self.iter().map(|(l, n)| l * n).sum()
    }
}

/// Longest strips first, as `{count}x{length}`.
impl fmt::Display for LengthDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (length, count)) in self.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{count}x{length}")?;
        }
        Ok(())
    }
}

/// Partition every triangle of `adjacency` into strips of at most `max_strip_length` vertices.
///
/// # Errors
///
/// * `max_strip_length <= 3`
/// * the mesh is inconsistently wound or otherwise breaks the invariants [WindingResolver] relies on
#[tracing::instrument(skip(adjacency), fields(triangles = adjacency.len()))]
pub fn divide_into_strips(
    adjacency: &Adjacency,
    max_strip_length: usize,
    winding: Winding,
) -> Result<Vec<Strip>> {
    let strips = StripDivider::new(adjacency, max_strip_length, winding)?.divide()?;
    tracing::debug!(
        strips = strips.len(),
        lengths = %LengthDistribution::of(&strips),
        "divided mesh into strips"
    );
    Ok(strips)
}

/// Working state of [divide_into_strips].
///
/// Triangles are taken out of the remaining set as they are added to a chain and are never put back,
/// with one exception: a chain that cannot start with the target winding from either end gives its
/// last triangle back.
#[derive(Debug)]
pub struct StripDivider<'adj> {
    adjacency: &'adj Adjacency,
    resolver: WindingResolver<'adj>,
    remaining: BitVec,
    /// The most triangles a strip may cover
    max_triangles: usize,
}

impl<'adj> StripDivider<'adj> {
    pub fn new(adjacency: &'adj Adjacency, max_strip_length: usize, winding: Winding) -> Result<Self> {
        if max_strip_length <= 3 {
            return Err(Error::StripLengthTooShort(max_strip_length));
        }
        Ok(Self {
            adjacency,
            resolver: WindingResolver::new(adjacency, winding),
            remaining: BitVec::repeat(true, adjacency.len()),
            max_triangles: max_strip_length - 2,
        })
    }

    /// The number of triangles not yet part of any strip.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining.count_ones()
    }

    #[inline]
    fn is_remaining(&self, id: TriangleId) -> bool {
        self.remaining[id.index()]
    }

    #[inline]
    fn take(&mut self, id: TriangleId) {
        self.remaining.set(id.index(), false);
    }

    fn remaining_neighbors(&self, id: TriangleId) -> impl Iterator<Item = TriangleId> + '_ {
        self.adjacency
            .neighbors(id)
            .map(|(_, n)| n)
            .filter(|&n| self.is_remaining(n))
    }

    /// Connectivity priority of `id`, in half units: minus the sum, over its remaining neighbors, of
    /// `2 + ` that neighbor's remaining neighbor count. Sparsely connected triangles rank highest.
    pub fn priority(&self, id: TriangleId) -> i64 {
        -self
            .remaining_neighbors(id)
            .map(|n| 2 + self.remaining_neighbors(n).count() as i64)
            .sum::<i64>()
    }

    /// The highest priority triangle of `candidates`; the lowest id among equals.
    fn best(&self, candidates: impl IntoIterator<Item = TriangleId>) -> Option<TriangleId> {
        candidates
            .into_iter()
            .max_by_key(|&id| (self.priority(id), Reverse(id)))
    }

    /// Consume every remaining triangle.
    pub fn divide(mut self) -> Result<Vec<Strip>> {
        let mut strips = Vec::new();
        while let Some(strip) = self.next_strip()? {
            tracing::trace!(
                length = strip.len(),
                triangles = ?strip.triangles(),
                "emitting strip"
            );
            strips.push(strip);
        }
        Ok(strips)
    }

    /// Grow and emit one strip, or `None` once every triangle is covered.
    pub fn next_strip(&mut self) -> Result<Option<Strip>> {
        let remaining: Vec<TriangleId> = self
            .remaining
            .iter_ones()
            .map(TriangleId::from_index)
            .collect();
        let Some(seed) = self.best(remaining) else {
            return Ok(None);
        };
        self.take(seed);

        let second = self.best(self.remaining_neighbors(seed).collect::<Vec<_>>());
        let Some(second) = second.filter(|_| self.max_triangles >= 2) else {
            return Ok(Some(self.resolver.order_single(seed)));
        };
        self.take(second);

        let third = match self.max_triangles {
            3.. => self.best_extension(seed, second)?,
            _ => None,
        };
        let Some(mut chain) = third else {
            return self.resolver.order_pair(seed, second).map(Some);
        };
        for &id in &chain {
            self.take(id);
        }

        self.extend_right(&mut chain)?;
        chain.reverse();
        self.extend_right(&mut chain)?;

        if chain.len() % 2 == 0 && self.resolver.chain_direction(&chain)?.is_none() {
            if let Some(last) = chain.pop() {
                tracing::trace!(triangle = %last, "giving back end of an unresolvable chain");
                self.remaining.set(last.index(), true);
            }
        }

        self.resolver.order_chain(&chain).map(Some)
    }

    /// The best 3-triangle chain made by adding a remaining neighbor to either end of
    /// `[first, second]`; candidates that do not wind into a strip are skipped. Equal candidates
    /// prefer the lowest id, then prepending.
    ///
    /// # Errors
    ///
    /// Any failure to order a candidate other than a bad start or broken winding alternation.
    fn best_extension(
        &self,
        first: TriangleId,
        second: TriangleId,
    ) -> Result<Option<Vec<TriangleId>>> {
        let left = self
            .remaining_neighbors(first)
            .map(|x| (x, vec![x, first, second], true));
        let right = self
            .remaining_neighbors(second)
            .map(|x| (x, vec![first, second, x], false));

        let mut best: Option<((i64, Reverse<TriangleId>, bool), Vec<TriangleId>)> = None;
        for (x, chain, prepend) in left.chain(right) {
            match self.resolver.order_chain(&chain) {
                Ok(_) => {}
                Err(Error::UnresolvableChainStart(_) | Error::WindingNotAlternating { .. }) => {
                    continue
                }
                Err(e) => return Err(e),
            }
            let key = (self.priority(x), Reverse(x), prepend);
            if best.as_ref().map_or(true, |(best_key, _)| key > *best_key) {
                best = Some((key, chain));
            }
        }
        Ok(best.map(|(_, chain)| chain))
    }

    /// Append triangles to the end of `chain` while they continue its strip.
    ///
    /// The next triangle is the one across the last triangle's edge opposite the vertex the last
    /// three triangles share; it has to be remaining and must not close a fan around the vertex the
    /// last two triangles share.
    fn extend_right(&mut self, chain: &mut Vec<TriangleId>) -> Result<()> {
        let adjacency = self.adjacency;
        while chain.len() < self.max_triangles {
            let Some(&[a, b, c]) = chain.len().checked_sub(3).map(|start| &chain[start..]) else {
                return Err(Error::ChainTooShort(chain.len()));
            };
            let [ta, tb, tc] = [a, b, c].map(|id| adjacency.triangle(id));

            let mut central = tc
                .vertices()
                .iter()
                .filter(|v| ta.contains(v) && tb.contains(v));
            let (Some(central), None) = (central.next(), central.next()) else {
                return Err(Error::NoCentralVertex([a, b, c]));
            };

            let next = tc
                .opposite_edge(central)
                .and_then(|edge| adjacency.neighbor_across(c, &edge))
                .filter(|&n| self.is_remaining(n))
                .filter(|&n| adjacency.triangle(n).shared_with(tb) == 1);
            let Some(next) = next else {
                break;
            };
            self.take(next);
            chain.push(next);
        }
        Ok(())
    }
}
