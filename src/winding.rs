//! Vertex orders that match a target winding convention.

use std::fmt;

use crate::{
    adjacency::Adjacency,
    error::{Error, Result},
    strip::Strip,
    vertex::{Normal, Vertex},
    TriangleId,
};

/// The rotational order of a triangle's vertices, as seen from the side its normal points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Winding {
    /// Front faces are clockwise; the convention of left-handed engines that cull counter-clockwise
    /// faces.
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Winding {
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// The winding of `[a, b, c]` relative to `reference`.
    ///
    /// Counter-clockwise iff `(b - a) × (c - a)` points to the same side as `reference`; anything
    /// else, including a zero dot product, is clockwise.
    pub fn of(vertices: [&Vertex; 3], reference: &Normal) -> Self {
        let [a, b, c] = vertices;
        let face = (b.position - a.position).cross(&(c.position - a.position));
        if face.dot(reference) > 0.0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => f.write_str("clockwise"),
            Self::CounterClockwise => f.write_str("counter-clockwise"),
        }
    }
}

/// Which end of a triangle chain a strip has to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainDirection {
    Forward,
    Reversed,
}

/// Orders the vertices of triangles, pairs and chains into strips whose first triangle has the
/// target winding and whose following triangles alternate.
#[derive(Debug, Clone, Copy)]
pub struct WindingResolver<'adj> {
    adjacency: &'adj Adjacency,
    target: Winding,
}

impl<'adj> WindingResolver<'adj> {
    pub fn new(adjacency: &'adj Adjacency, target: Winding) -> Self {
        Self { adjacency, target }
    }

    #[inline]
    pub fn target(&self) -> Winding {
        self.target
    }

    /// A 3-vertex strip for a single triangle; either its canonical order or that order with the
    /// last two vertices swapped.
    pub fn order_single(&self, id: TriangleId) -> Strip {
        let tri = self.adjacency.triangle(id);
        let [a, b, c] = *tri.vertices();
        let vertices = if Winding::of([&a, &b, &c], tri.normal()) == self.target {
            vec![a, b, c]
        } else {
            vec![a, c, b]
        };
        Strip::new(vertices, vec![id])
    }

    /// A 4-vertex strip `[a, b, c, d]` for two triangles sharing the edge `{b, c}`, where `a`
    /// belongs only to `first` and `d` only to `second`.
    ///
    /// # Errors
    ///
    /// * `first` and `second` do not share exactly two vertices
    /// * `(b, c, d)` does not have the reverse of the target winding
    pub fn order_pair(&self, first: TriangleId, second: TriangleId) -> Result<Strip> {
        let ta = self.adjacency.triangle(first);
        let tb = self.adjacency.triangle(second);

        let shared: Vec<Vertex> = ta
            .vertices()
            .iter()
            .filter(|v| tb.contains(v))
            .copied()
            .collect();
        let &[b, c] = shared.as_slice() else {
            return Err(Error::NotAdjacent(first, second));
        };
        let a = ta.vertices().iter().find(|v| !tb.contains(v));
        let d = tb.vertices().iter().find(|v| !ta.contains(v));
        let (Some(&a), Some(&d)) = (a, d) else {
            return Err(Error::NotAdjacent(first, second));
        };

        let vertices = if Winding::of([&a, &b, &c], ta.normal()) == self.target {
            vec![a, b, c, d]
        } else {
            vec![a, c, b, d]
        };

        let expected = self.target.reversed();
        if Winding::of([&vertices[1], &vertices[2], &vertices[3]], tb.normal()) != expected {
            return Err(Error::WindingNotAlternating {
                triangle: second,
                expected,
            });
        }
        Ok(Strip::new(vertices, vec![first, second]))
    }

    /// The starting vertex order of a strip through `chain`, if it has the target winding.
    ///
    /// In a strip `[a, b, c, …]`, the first triangle's vertices are referenced by 0, 1 and 2 of the
    /// next two triangles respectively, which fixes their order.
    fn chain_start(&self, chain: &[TriangleId]) -> Result<Option<[Vertex; 3]>> {
        let &[first, second, third, ..] = chain else {
            return Err(Error::ChainTooShort(chain.len()));
        };
        let [ta, tb, tc] = [first, second, third].map(|id| self.adjacency.triangle(id));

        let mut counted = ta
            .vertices()
            .map(|v| (usize::from(tb.contains(&v)) + usize::from(tc.contains(&v)), v));
        counted.sort_by_key(|&(n, _)| n);
        if counted.map(|(n, _)| n) != [0, 1, 2] {
            return Err(Error::UnresolvableChainStart(chain.to_vec()));
        }

        let [(_, a), (_, b), (_, c)] = counted;
        Ok((Winding::of([&a, &b, &c], ta.normal()) == self.target).then_some([a, b, c]))
    }

    /// Which end a strip through `chain` must start from to have the target winding, if either.
    ///
    /// A chain with an odd number of triangles always resolves from exactly one end. With an even
    /// number, both ends start with the same winding, so either both resolve or neither does.
    pub fn chain_direction(&self, chain: &[TriangleId]) -> Result<Option<ChainDirection>> {
        if self.chain_start(chain)?.is_some() {
            return Ok(Some(ChainDirection::Forward));
        }
        let reversed: Vec<TriangleId> = chain.iter().rev().copied().collect();
        Ok(self
            .chain_start(&reversed)?
            .map(|_| ChainDirection::Reversed))
    }

    /// A strip through 3 or more triangles, each consecutive pair sharing an edge and each
    /// consecutive triple sharing a vertex. The chain is walked from whichever end yields the
    /// target winding.
    ///
    /// # Errors
    ///
    /// * `chain` has fewer than 3 triangles
    /// * neither end of `chain` starts a strip with the target winding
    /// * some triangle does not add exactly one new vertex to the strip
    /// * some triangle's vertex triple does not alternate winding
    pub fn order_chain(&self, chain: &[TriangleId]) -> Result<Strip> {
        let mut chain = chain.to_vec();
        let start = match self.chain_start(&chain)? {
            Some(start) => start,
            None => {
                chain.reverse();
                self.chain_start(&chain)?
                    .ok_or_else(|| Error::UnresolvableChainStart(chain.clone()))?
            }
        };

        let mut vertices = Vec::with_capacity(chain.len() + 2);
        vertices.extend_from_slice(&start);
        let mut expected = self.target.reversed();
        for &id in &chain[1..] {
            let tri = self.adjacency.triangle(id);
            let tail = &vertices[vertices.len() - 2..];
            let mut fresh = tri.vertices().iter().filter(|v| !tail.contains(v));
            let (Some(&next), None) = (fresh.next(), fresh.next()) else {
                return Err(Error::NoUniqueVertex {
                    triangle: id,
                    chain: chain.clone(),
                });
            };
            if Winding::of([&tail[0], &tail[1], &next], tri.normal()) != expected {
                return Err(Error::WindingNotAlternating {
                    triangle: id,
                    expected,
                });
            }
            expected = expected.reversed();
            vertices.push(next);
        }
        Ok(Strip::new(vertices, chain))
    }
}
