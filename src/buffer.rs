//! Flattening packed instances into one GPU-ready vertex buffer.

use std::ops::Range;

use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::{
    error::{Error, Result},
    instance::Instance,
    vertex::{Normal, Position, Tangent, Texcoord, Vertex},
};

/// The change of coordinates applied to every vertex on its way into a [Buffer].
///
/// Positions go through the full affine matrix; normals and tangents only through its upper-left
/// 3x3 block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceTransform {
    position: Matrix4<f32>,
    direction: Matrix3<f32>,
}

impl Default for SpaceTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl SpaceTransform {
    pub fn new(position: Matrix4<f32>) -> Self {
        Self {
            position,
            direction: position.fixed_view::<3, 3>(0, 0).into_owned(),
        }
    }

    pub fn identity() -> Self {
        Self::new(Matrix4::identity())
    }

    /// Scale about the origin, then translate.
    pub fn from_scale_translation(scale: Vector3<f32>, translation: Vector3<f32>) -> Self {
        Self::new(Matrix4::new_translation(&translation) * Matrix4::new_nonuniform_scaling(&scale))
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.position
    }

    #[inline]
    pub fn apply_position(&self, p: &Position) -> Position {
        self.position.transform_point(p)
    }

    #[inline]
    pub fn apply_direction(&self, d: &Normal) -> Normal {
        self.direction * d
    }

    pub fn apply(&self, v: &Vertex, strip_restart: bool) -> BakedVertex {
        BakedVertex {
            position: self.apply_position(&v.position),
            normal: self.apply_direction(&v.normal),
            tangent: self.apply_direction(&v.tangent),
            uv: v.uv,
            strip_restart,
        }
    }
}

/// One vertex of the baked buffer, in the target coordinate space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakedVertex {
    pub position: Position,
    pub normal: Normal,
    pub tangent: Tangent,
    pub uv: Texcoord,
    /// Whether this vertex starts a new strip. False for the very first vertex of the buffer, which
    /// starts one implicitly.
    pub strip_restart: bool,
}

/// Every instance of one or more levels of detail, laid out back to back.
///
/// `boundaries[i]..boundaries[i + 1]` is the vertex range of instance `i`, counting instances over
/// all levels of detail in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    vertices: Vec<BakedVertex>,
    boundaries: Vec<usize>,
    instance_count: usize,
    lod_count: usize,
}

impl Buffer {
    #[inline]
    pub fn vertices(&self) -> &[BakedVertex] {
        &self.vertices
    }

    /// Instance start offsets, followed by the total vertex count.
    #[inline]
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// The number of instances per level of detail.
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    #[inline]
    pub fn lod_count(&self) -> usize {
        self.lod_count
    }

    /// The number of instances over all levels of detail.
    #[inline]
    pub fn total_instances(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// The vertex count of each instance.
    pub fn instance_lengths(&self) -> Vec<usize> {
        self.boundaries.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// The vertex count of the largest instance; the stride a fixed-size geometry stage needs.
    pub fn max_vertices_per_instance(&self) -> usize {
        self.instance_lengths().into_iter().max().unwrap_or(0)
    }

    /// The vertices of instance `i`, counting over all levels of detail.
    pub fn instance(&self, i: usize) -> Option<&[BakedVertex]> {
        let start = *self.boundaries.get(i)?;
        let end = *self.boundaries.get(i + 1)?;
        Some(&self.vertices[start..end])
    }

    /// The vertex range of level of detail `k`.
    pub fn lod_range(&self, k: usize) -> Option<Range<usize>> {
        if k >= self.lod_count {
            return None;
        }
        let start = *self.boundaries.get(k * self.instance_count)?;
        let end = *self.boundaries.get((k + 1) * self.instance_count)?;
        Some(start..end)
    }
}

/// Lay out the instances of a single mesh.
pub fn layout(instances: &[Instance], transform: &SpaceTransform) -> Buffer {
    let mut builder = Builder::default();
    builder.push_lod(instances, transform);
    builder.finish(instances.len(), 1)
}

/// Lay out several levels of detail of the same mesh into one buffer, in order.
///
/// # Errors
///
/// * the levels do not all pack into the same number of instances
pub fn layout_lods<I: AsRef<[Instance]>>(lods: &[I], transform: &SpaceTransform) -> Result<Buffer> {
    let expected = lods.first().map_or(0, |lod| lod.as_ref().len());
    let mut builder = Builder::default();
    for (lod, instances) in lods.iter().enumerate() {
        let instances = instances.as_ref();
        if instances.len() != expected {
            return Err(Error::LodInstanceCountMismatch {
                lod,
                expected,
                found: instances.len(),
            });
        }
        builder.push_lod(instances, transform);
    }
    Ok(builder.finish(expected, lods.len()))
}

#[derive(Debug)]
struct Builder {
    vertices: Vec<BakedVertex>,
    boundaries: Vec<usize>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            boundaries: vec![0],
        }
    }
}

impl Builder {
    fn push_lod(&mut self, instances: &[Instance], transform: &SpaceTransform) {
        for instance in instances {
            for strip in instance.strips() {
                for (i, v) in strip.vertices().iter().enumerate() {
                    let restart = i == 0 && !self.vertices.is_empty();
                    self.vertices.push(transform.apply(v, restart));
                }
            }
            self.boundaries.push(self.vertices.len());
        }
    }

    fn finish(self, instance_count: usize, lod_count: usize) -> Buffer {
        tracing::debug!(
            vertices = self.vertices.len(),
            instances = self.boundaries.len() - 1,
            lods = lod_count,
            "laid out vertex buffer"
        );
        Buffer {
            vertices: self.vertices,
            boundaries: self.boundaries,
            instance_count,
            lod_count,
        }
    }
}
