//! HTTP-facing helpers shared by module REST layers.

pub mod extract;
pub mod problem;
