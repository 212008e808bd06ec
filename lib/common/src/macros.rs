//! Macros exported at the crate root.

mod ord;
