use crate::{vertex::EdgeKey, winding::Winding, TriangleId};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while baking a mesh.
///
/// None of these are recoverable by retrying: the pipeline is a pure function of its input, so the
/// only remedy is to fix the mesh or the [Config](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // configuration
    #[error("maximum strip length must be greater than 3; found {0}")]
    StripLengthTooShort(usize),
    #[error("maximum vertices per instance must be at least 3; found {0}")]
    InstanceCapacityTooSmall(usize),
    #[error("strip of {strip} vertices does not fit in an instance of {capacity} vertices")]
    StripExceedsInstance { strip: usize, capacity: usize },
    #[error("level of detail {lod} packs into {found} instances, but level 0 packs into {expected}")]
    LodInstanceCountMismatch {
        lod: usize,
        expected: usize,
        found: usize,
    },

    // mesh preconditions
    #[error("mesh has no triangles")]
    EmptyMesh,
    #[error("triangle at position {slot} has identifier {id}; identifiers must follow mesh order")]
    NonDenseTriangleId { slot: usize, id: TriangleId },
    #[error("triangle {0} is degenerate")]
    DegenerateTriangle(TriangleId),
    #[error("edge {edge:?} borders more than two triangles: {triangles:?}")]
    NonManifoldEdge {
        edge: Box<EdgeKey>,
        triangles: [TriangleId; 3],
    },

    // winding resolution
    #[error("triangles {0} and {1} do not share exactly one edge")]
    NotAdjacent(TriangleId, TriangleId),
    #[error("a triangle chain needs at least 3 triangles; found {0}")]
    ChainTooShort(usize),
    #[error("cannot find a starting vertex order for chain {0:?}")]
    UnresolvableChainStart(Vec<TriangleId>),
    #[error("triangle {triangle} has no unique vertex to continue chain {chain:?}")]
    NoUniqueVertex {
        triangle: TriangleId,
        chain: Vec<TriangleId>,
    },
    #[error("triangle {triangle} was expected to wind {expected}")]
    WindingNotAlternating {
        triangle: TriangleId,
        expected: Winding,
    },
    #[error("triangles {0:?} do not share exactly one vertex")]
    NoCentralVertex([TriangleId; 3]),

    // mesh sources
    #[cfg(feature = "obj")]
    #[error(transparent)]
    Obj(#[from] tobj::LoadError),
    #[error("model {model:?} has no {attribute}")]
    MissingAttribute {
        model: String,
        attribute: &'static str,
    },
    #[error("vertex index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}
