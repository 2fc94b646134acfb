//! The hyperbolic system contract and projection engine.
//!
//! A generic solver works against [`HyperbolicSystem`]. Physics plugs in
//! through [`HyperbolicModel`] (flux, wave speed) and [`ModelHooks`]
//! (admissibility, boundary states, diagnostics, discrete upwinding).
//!
//! Initial data reaches the primary space through the projection engine:
//! [`HyperbolicSystem::l2_projection`] (via an auxiliary discontinuous
//! space) or [`HyperbolicSystem::lumped_l2_projection`] (diagonal mass).

mod error;
mod error_log;
mod hyperbolic;
mod projection;
mod registry;
mod traits;
mod velocity;

pub use error::SystemError;
pub use error_log::{DEFAULT_ERROR_LOG, ErrorLog};
pub use hyperbolic::HyperbolicSystem;
pub use projection::{
    AuxiliaryProjection, ProjectionError, ProjectionKind, lumped_projection, nodal_projection,
};
pub use registry::{ModelContext, ModelFactory, ProblemRegistry};
pub use traits::{BoundaryAttribute, HyperbolicModel, ModelHooks, NodeLocation, ProblemInfo};
pub use velocity::VelocityTensor;
