//! Bakes a triangle mesh into triangle strips packed into fixed-capacity geometry instances, for
//! GPU stages that run a fixed number of iterations per instance.
//!
//! The stages run in order: [Adjacency::build] links triangles across shared edges,
//! [divide_into_strips] greedily partitions them into strips of the target [Winding],
//! [pack_instances] bins the strips into instances, and [buffer::layout] flattens those into one
//! vertex [Buffer]. [bake] runs the first three for any [MeshSource].
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod adjacency;
pub mod buffer;
pub mod emit;
pub mod error;
pub mod instance;
mod pipeline;
pub mod source;
pub mod strip;
pub mod vertex;
pub mod winding;

pub use adjacency::{Adjacency, DirectionUsage};
pub use buffer::{layout, layout_lods, BakedVertex, Buffer, SpaceTransform};
pub use emit::{Emit, HlslEmitter};
pub use error::{Error, Result};
pub use instance::{pack_instances, Instance};
pub use pipeline::*;
pub use source::{MeshSource, TriangleSoup};
pub use strip::{divide_into_strips, LengthDistribution, Strip, StripDivider};
pub use vertex::{EdgeKey, Triangle, TriangleId, Vertex};
pub use winding::{ChainDirection, Winding, WindingResolver};
