//! Projection of continuous data onto the primary space.
//!
//! Three routes are available:
//! - [`ProjectionKind::L2`]: interpolate onto an auxiliary discontinuous
//!   Gauss-Legendre space of the same order, then transfer to the primary
//!   space. Exact for functions in the primary polynomial space.
//! - [`ProjectionKind::Lumped`]: divide the load vector by the row-sum
//!   lumped mass diagonal. No linear solve.
//! - [`ProjectionKind::Nodal`]: take nodal values as coefficients.

use crate::basis::NodalBasis;
use crate::polynomial::NodeFamily;
use crate::space::{
    Continuity, FeSpace, GridFunction, Ordering, ScalarCoefficient, SpaceError, VectorCoefficient,
    VectorMassForm, vector_domain_load,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the projection engine.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("projection target has {actual} coefficients, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("scalar projection needs a single equation, system has {num_eq}")]
    ScalarOnSystem { num_eq: usize },

    #[error("lumped mass entry {index} is {value}, must be positive")]
    NonPositiveLumpedMass { index: usize, value: f64 },

    #[error("projection target lives on a different mesh than the primary space")]
    ForeignMesh,

    #[error(transparent)]
    Space(#[from] SpaceError),
}

/// How initial and exact data are brought onto the primary space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionKind {
    #[default]
    L2,
    Lumped,
    Nodal,
}

/// Auxiliary discontinuous basis, space and function used by the L2 route.
///
/// Created and dropped as one unit. Fields drop in declaration order, so
/// the function goes first, then the space, then the basis.
#[derive(Debug)]
pub struct AuxiliaryProjection {
    function: GridFunction,
    space: Arc<FeSpace>,
    basis: Arc<NodalBasis>,
}

impl AuxiliaryProjection {
    /// Build the auxiliary artifacts for `primary` with `num_eq` components
    /// ordered by nodes.
    pub fn new(primary: &FeSpace, num_eq: usize) -> Result<Self, ProjectionError> {
        let basis = Arc::new(NodalBasis::new(
            primary.order(),
            primary.dim(),
            NodeFamily::GaussLegendre,
        ));
        let space = Arc::new(FeSpace::new(
            Arc::clone(primary.mesh()),
            Arc::clone(&basis),
            Continuity::Discontinuous,
            num_eq,
            Ordering::ByNodes,
        )?);
        let function = GridFunction::new(Arc::clone(&space));

        tracing::debug!(
            order = primary.order(),
            num_eq,
            vsize = space.vsize(),
            "built auxiliary projection space"
        );

        Ok(Self {
            function,
            space,
            basis,
        })
    }

    pub fn space(&self) -> &Arc<FeSpace> {
        &self.space
    }

    pub fn basis(&self) -> &Arc<NodalBasis> {
        &self.basis
    }

    /// The auxiliary function as left by the last projection.
    pub fn function(&self) -> &GridFunction {
        &self.function
    }

    /// Project a vector function onto `target` through the auxiliary space.
    pub fn project(&mut self, fun: &VectorCoefficient, t: f64, target: &mut GridFunction) -> Result<(), ProjectionError> {
        self.check_target(target)?;
        self.function.project_coefficient(fun, t)?;
        target.project_grid_function(&self.function)?;
        Ok(())
    }

    /// Scalar overload; valid only for single-equation systems.
    pub fn project_scalar(&mut self, fun: &ScalarCoefficient, t: f64, target: &mut GridFunction) -> Result<(), ProjectionError> {
        let num_eq = self.space.vdim();
        if num_eq != 1 {
            return Err(ProjectionError::ScalarOnSystem { num_eq });
        }
        self.check_target(target)?;
        self.function.project_scalar_coefficient(fun, t)?;
        target.project_grid_function(&self.function)?;
        Ok(())
    }

    fn check_target(&self, target: &GridFunction) -> Result<(), ProjectionError> {
        let expected = target.space().n_dofs() * self.space.vdim();
        if target.space().vdim() != self.space.vdim() {
            return Err(ProjectionError::SizeMismatch {
                expected,
                actual: target.len(),
            });
        }
        Ok(())
    }
}

/// Lumped-mass projection of `fun` onto `target`'s space.
///
/// Each coefficient is `load[i] / lumped[i]` with `lumped` the row sums of
/// the unit vector mass matrix. Exact for constants on any mesh.
pub fn lumped_projection(fun: &VectorCoefficient, t: f64, target: &mut GridFunction) -> Result<(), ProjectionError> {
    let space = Arc::clone(target.space());
    if fun.vdim() != space.vdim() {
        return Err(ProjectionError::SizeMismatch {
            expected: space.vsize(),
            actual: space.n_dofs() * fun.vdim(),
        });
    }

    let lumped = VectorMassForm::unit().assemble_lumped(&space);
    let load = vector_domain_load(&space, fun, t)?;

    // Target is left untouched on failure
    if let Some((index, &value)) = lumped.iter().enumerate().find(|&(_, &m)| !(m > 0.0)) {
        return Err(ProjectionError::NonPositiveLumpedMass { index, value });
    }

    for ((out, &b), &m) in target.data_mut().iter_mut().zip(&load).zip(&lumped) {
        *out = b / m;
    }

    tracing::trace!(n = lumped.len(), "lumped projection done");
    Ok(())
}

/// Nodal interpolation of `fun` directly onto `target`.
pub fn nodal_projection(fun: &VectorCoefficient, t: f64, target: &mut GridFunction) -> Result<(), ProjectionError> {
    target.project_coefficient(fun, t)?;
    Ok(())
}
