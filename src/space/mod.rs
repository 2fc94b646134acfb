//! Discrete function spaces on a mesh.
//!
//! - [`FeSpace`]: mesh + nodal basis + dof numbering
//! - [`GridFunction`]: coefficient vector on a space
//! - [`ScalarCoefficient`], [`VectorCoefficient`]: continuous data u(x, t)
//! - [`VectorMassForm`], [`vector_domain_load`]: assembly used by projections

mod coefficient;
mod fe_space;
mod forms;
mod grid_function;

pub use coefficient::{ScalarCoefficient, VectorCoefficient};
pub use fe_space::{Continuity, FeSpace, Ordering, SpaceError};
pub use forms::{VectorMassForm, vector_domain_load};
pub use grid_function::{GridFunction, LpNorm};
