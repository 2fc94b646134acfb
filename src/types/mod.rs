//! Strongly-typed domain types for safer APIs.
//!
//! - Index newtypes keep element, node and quadrature indices apart
//! - [`BoundingBox`] describes the axis-aligned problem domain

mod bounds;
mod indices;

pub use bounds::{BoundingBox, BoundsError};
pub use indices::{ElementIndex, NodeIndex, QuadIndex};
