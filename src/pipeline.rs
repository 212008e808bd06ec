//! The whole bake, from a [MeshSource] to packed instances.

use crate::{
    adjacency::{Adjacency, DirectionUsage},
    buffer::{layout, Buffer, SpaceTransform},
    error::{Error, Result},
    instance::{pack_instances, Instance},
    source::MeshSource,
    strip::{divide_into_strips, LengthDistribution},
    vertex::Triangle,
    winding::Winding,
};

/// Parameters of a bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// The most vertices a strip may have; greater than 3
    pub max_strip_length: usize,
    /// The most vertices an instance may have; at least the length of the longest strip
    pub max_instance_vertices: usize,
    /// The winding of front faces expected by the renderer
    pub winding: Winding,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(7, 8)
    }
}

impl Config {
    pub fn new(max_strip_length: usize, max_instance_vertices: usize) -> Self {
        Self {
            max_strip_length,
            max_instance_vertices,
            winding: Winding::default(),
        }
    }

    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// # Errors
    ///
    /// * `max_strip_length <= 3`
    /// * `max_instance_vertices < 3`
    pub fn validate(&self) -> Result<()> {
        if self.max_strip_length <= 3 {
            return Err(Error::StripLengthTooShort(self.max_strip_length));
        }
        if self.max_instance_vertices < 3 {
            return Err(Error::InstanceCapacityTooSmall(self.max_instance_vertices));
        }
        Ok(())
    }
}

/// The result of baking one mesh.
#[derive(Debug, Clone)]
pub struct Bake {
    instances: Vec<Instance>,
    lengths: LengthDistribution,
    usage: DirectionUsage,
    triangle_count: usize,
    open_edges: usize,
}

impl Bake {
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    #[inline]
    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }

    /// Lengths of the strips the mesh was divided into.
    #[inline]
    pub fn length_distribution(&self) -> &LengthDistribution {
        &self.lengths
    }

    #[inline]
    pub fn direction_usage(&self) -> &DirectionUsage {
        &self.usage
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// The number of mesh edges bordering a single triangle.
    #[inline]
    pub fn open_edges(&self) -> usize {
        self.open_edges
    }

    /// Lay out this bake's instances alone.
    pub fn layout(&self, transform: &SpaceTransform) -> Buffer {
        layout(&self.instances, transform)
    }
}

impl AsRef<[Instance]> for Bake {
    fn as_ref(&self) -> &[Instance] {
        &self.instances
    }
}

/// Divide the mesh of `source` into strips and pack them into instances.
///
/// # Errors
///
/// * `config` is [invalid](Config::validate)
/// * `source` fails to produce triangles, or produces none
/// * see [Adjacency::build], [divide_into_strips] and [pack_instances]
#[tracing::instrument(skip(source))]
pub fn bake<S: MeshSource + ?Sized>(source: &S, config: &Config) -> Result<Bake> {
    config.validate()?;
    bake_validated(source.triangles()?, config)
}

/// [bake] an already extracted list of triangles.
pub fn bake_triangles(triangles: Vec<Triangle>, config: &Config) -> Result<Bake> {
    config.validate()?;
    bake_validated(triangles, config)
}

fn bake_validated(triangles: Vec<Triangle>, config: &Config) -> Result<Bake> {
    if triangles.is_empty() {
        return Err(Error::EmptyMesh);
    }

    let adjacency = Adjacency::build(triangles)?;
    let strips = divide_into_strips(&adjacency, config.max_strip_length, config.winding)?;
    let lengths = LengthDistribution::of(&strips);
    let instances = pack_instances(strips, config.max_instance_vertices)?;

    tracing::info!(
        triangles = adjacency.len(),
        strips = %lengths,
        instances = instances.len(),
        "baked mesh"
    );
    Ok(Bake {
        instances,
        lengths,
        usage: adjacency.direction_usage().clone(),
        triangle_count: adjacency.len(),
        open_edges: adjacency.open_edges(),
    })
}
