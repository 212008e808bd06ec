//! Helpers shared across the stripbake workspace.
//!
//! Mesh data is full of floating-point values that need to act as map keys and sort keys. [float_key]
//! turns them into [OrderedFloat]s, and [impl_ord_by_key] derives `Eq`, `Ord` and `Hash` from such a
//! key.

pub mod macros;
mod key;

pub use key::*;
pub use ordered_float::OrderedFloat;
