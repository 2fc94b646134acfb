//! # hypsys
//!
//! A physics-agnostic contract for hyperbolic conservation-law solvers.
//!
//! This crate provides the pieces a generic solver needs to drive any
//! system of the form `∂u/∂t + ∇·f(u) = 0`:
//! - Nodal tensor bases (Gauss-Lobatto, Gauss-Legendre)
//! - Segment and quadrilateral meshes
//! - Continuous and discontinuous finite element spaces
//! - The system contract (flux, wave speed, admissibility, boundary states)
//! - Initial-data projection (L2 via an auxiliary space, lumped, nodal)
//! - Error-norm logging and TOML run configuration
//! - Reference linear advection problems
//!
//! ```
//! use std::sync::Arc;
//! use hypsys::basis::NodalBasis;
//! use hypsys::mesh::{Mesh, Mesh1D};
//! use hypsys::polynomial::NodeFamily;
//! use hypsys::space::{Continuity, FeSpace, Ordering, VectorCoefficient};
//! use hypsys::{Configuration, ProblemRegistry};
//!
//! let mesh = Arc::new(Mesh::from(Mesh1D::uniform(0.0, 1.0, 10)));
//! let basis = Arc::new(NodalBasis::new(3, 1, NodeFamily::GaussLobatto));
//! let space = Arc::new(
//!     FeSpace::new(mesh, basis, Continuity::Discontinuous, 1, Ordering::ByNodes).unwrap(),
//! );
//! let config = Configuration::new(0, 1.0, vec![0.0], vec![1.0]).unwrap();
//!
//! let mut system = ProblemRegistry::with_defaults()
//!     .build(space, config, VectorCoefficient::constant(vec![0.0]))
//!     .unwrap();
//!
//! let mut u = system.new_state();
//! let initial = VectorCoefficient::from_scalar(hypsys::space::ScalarCoefficient::new(|x, _| x[0]));
//! system.l2_projection(&initial, 0.0, &mut u).unwrap();
//! assert_eq!(u.len(), 10 * 4);
//! ```

pub mod basis;
pub mod config;
pub mod mesh;
pub mod models;
pub mod polynomial;
pub mod space;
pub mod system;
pub mod types;

// Re-export main types for convenience
pub use basis::{NodalBasis, QuadratureRule, Vandermonde};
pub use config::{ConfigError, Configuration};
pub use mesh::{Mesh, Mesh1D, Mesh2D};
pub use models::{Advection, VelocityField};
pub use polynomial::NodeFamily;
pub use space::{
    Continuity, FeSpace, GridFunction, Ordering, ScalarCoefficient, SpaceError, VectorCoefficient,
};
pub use system::{
    BoundaryAttribute, ErrorLog, HyperbolicModel, HyperbolicSystem, ModelHooks, NodeLocation,
    ProblemInfo, ProblemRegistry, ProjectionError, ProjectionKind, SystemError, VelocityTensor,
};
pub use types::{BoundingBox, ElementIndex, NodeIndex, QuadIndex};
