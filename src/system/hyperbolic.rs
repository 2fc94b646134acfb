//! The model-independent system aggregate.
//!
//! [`HyperbolicSystem`] wraps one physics model together with the primary
//! space, the boundary function, the run configuration and the auxiliary
//! projection artifacts. A driver builds one per run and calls it inside
//! its own update loop.

use super::error::SystemError;
use super::error_log::ErrorLog;
use super::projection::{
    AuxiliaryProjection, ProjectionError, ProjectionKind, lumped_projection, nodal_projection,
};
use super::traits::{BoundaryAttribute, HyperbolicModel, NodeLocation, ProblemInfo};
use super::velocity::VelocityTensor;
use crate::config::Configuration;
use crate::space::{FeSpace, GridFunction, ScalarCoefficient, VectorCoefficient};
use faer::Mat;
use std::sync::Arc;

pub struct HyperbolicSystem {
    model: Box<dyn HyperbolicModel>,
    space: Arc<FeSpace>,
    bdr_cond: VectorCoefficient,
    config: Configuration,
    num_eq: usize,
    ne: usize,
    nd: usize,
    dim: usize,
    projection_kind: ProjectionKind,
    auxiliary: AuxiliaryProjection,
    error_log: ErrorLog,
}

impl HyperbolicSystem {
    /// Wrap `model` for a run on `space`.
    ///
    /// `space` must carry `num_eq` components, the model must report
    /// `num_eq` equations and `bdr_cond` must return `num_eq` values.
    pub fn new(
        space: Arc<FeSpace>,
        num_eq: usize,
        config: Configuration,
        bdr_cond: VectorCoefficient,
        model: Box<dyn HyperbolicModel>,
    ) -> Result<Self, SystemError> {
        if model.num_equations() != num_eq {
            return Err(SystemError::EquationCountMismatch {
                model: model.num_equations(),
                system: num_eq,
            });
        }
        if space.vdim() != num_eq {
            return Err(SystemError::SpaceComponents {
                expected: num_eq,
                actual: space.vdim(),
            });
        }
        if bdr_cond.vdim() != num_eq {
            return Err(SystemError::BoundaryComponents {
                expected: num_eq,
                actual: bdr_cond.vdim(),
            });
        }

        let auxiliary = AuxiliaryProjection::new(&space, num_eq)?;
        let (ne, nd, dim) = (space.ne(), space.nd(), space.dim());

        tracing::debug!(
            problem = %model.info().name,
            config = config.config_num(),
            num_eq,
            ne,
            nd,
            dim,
            "constructed hyperbolic system"
        );

        Ok(Self {
            model,
            space,
            bdr_cond,
            config,
            num_eq,
            ne,
            nd,
            dim,
            projection_kind: ProjectionKind::default(),
            auxiliary,
            error_log: ErrorLog::default(),
        })
    }

    /// Use `kind` in [`project_initial`](Self::project_initial).
    pub fn with_projection_kind(mut self, kind: ProjectionKind) -> Self {
        self.projection_kind = kind;
        self
    }

    /// Append error norms to `log` instead of `errors.txt`.
    pub fn with_error_log(mut self, log: ErrorLog) -> Self {
        self.error_log = log;
        self
    }

    // =========================================================================
    // Bookkeeping
    // =========================================================================

    #[inline]
    pub fn num_equations(&self) -> usize {
        self.num_eq
    }

    /// Element count.
    #[inline]
    pub fn ne(&self) -> usize {
        self.ne
    }

    /// Dofs per element.
    #[inline]
    pub fn nd(&self) -> usize {
        self.nd
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn space(&self) -> &Arc<FeSpace> {
        &self.space
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn info(&self) -> &ProblemInfo {
        self.model.info()
    }

    pub fn model(&self) -> &dyn HyperbolicModel {
        self.model.as_ref()
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        self.projection_kind
    }

    pub fn auxiliary(&self) -> &AuxiliaryProjection {
        &self.auxiliary
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Whether the model supplies per-node velocities.
    pub fn discrete_upwinding(&self) -> bool {
        self.model.velocity_nodes().is_some()
    }

    pub fn velocity_nodes(&self) -> Option<&VelocityTensor> {
        self.model.velocity_nodes()
    }

    /// A zero state on the primary space.
    pub fn new_state(&self) -> GridFunction {
        GridFunction::new(Arc::clone(&self.space))
    }

    // =========================================================================
    // Contract
    // =========================================================================

    /// Fill `flux` (`dim × num_eq`) with the physical flux of `u`.
    pub fn evaluate_flux(&self, u: &[f64], flux: &mut Mat<f64>, at: NodeLocation) {
        debug_assert_eq!(u.len(), self.num_eq);
        debug_assert_eq!((flux.nrows(), flux.ncols()), (self.dim, self.num_eq));
        self.model.evaluate_flux(u, flux, at);
    }

    /// Allocate a flux tensor of the right shape.
    pub fn flux_tensor(&self) -> Mat<f64> {
        Mat::zeros(self.dim, self.num_eq)
    }

    pub fn wave_speed(&self, u: &[f64], normal: &[f64], at: NodeLocation) -> f64 {
        self.model.wave_speed(u, normal, at)
    }

    pub fn gms(&self, u_left: &[f64], u_right: &[f64], normal: &[f64]) -> Result<f64, SystemError> {
        self.model.gms(u_left, u_right, normal)
    }

    pub fn check_admissibility(&self, u: &[f64]) -> Result<(), SystemError> {
        self.model.check_admissibility(u)
    }

    /// Check every nodal state of `u`; report the first violation with its
    /// location.
    pub fn check_state(&self, u: &GridFunction) -> Result<(), SystemError> {
        let mut state = vec![0.0; self.num_eq];
        for e in 0..self.ne {
            for k in 0..self.nd {
                u.node_values(e, k, &mut state);
                if let Err(err) = self.model.check_admissibility(&state) {
                    let at = NodeLocation::at_node(e, k);
                    tracing::warn!(location = %at, "inadmissible state");
                    return Err(match err {
                        SystemError::Inadmissible { reason, .. } => SystemError::Inadmissible {
                            reason,
                            location: Some(at),
                        },
                        other => other,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn set_bdr_cond(&self, interior: &[f64], ghost: &mut [f64], normal: &[f64], attr: BoundaryAttribute) {
        self.model.set_bdr_cond(interior, ghost, normal, attr);
    }

    /// Exterior state of a boundary face at `position` and time `t`.
    ///
    /// Evaluates the boundary function into `ghost`, then lets the model
    /// adjust it.
    pub fn boundary_state(
        &self,
        interior: &[f64],
        normal: &[f64],
        attr: BoundaryAttribute,
        position: &[f64],
        t: f64,
        ghost: &mut [f64],
    ) {
        self.bdr_cond.eval(position, t, ghost);
        self.model.set_bdr_cond(interior, ghost, normal, attr);
    }

    pub fn compute_derived_quantities(&self, u: &GridFunction, d1: &mut GridFunction, d2: &mut GridFunction) {
        self.model.compute_derived_quantities(u, d1, d2);
    }

    /// Error norms of `u` at time `t`, normalized by the configuration's
    /// domain measure where the model does so.
    pub fn compute_errors(&self, u: &GridFunction, t: f64) -> Result<Vec<f64>, SystemError> {
        let mut errors = Vec::new();
        self.model
            .compute_errors(&mut errors, u, self.config.domain_measure(), t)?;
        Ok(errors)
    }

    pub fn write_errors(&self, errors: &[f64]) -> Result<(), SystemError> {
        self.error_log.append(errors)
    }

    // =========================================================================
    // Projection engine
    // =========================================================================

    fn check_target(&self, proj: &GridFunction) -> Result<(), ProjectionError> {
        let expected = self.space.n_dofs() * self.num_eq;
        if proj.len() != expected || proj.space().vdim() != self.num_eq {
            return Err(ProjectionError::SizeMismatch {
                expected,
                actual: proj.len(),
            });
        }
        if !proj.space().shares_mesh(&self.space) {
            return Err(ProjectionError::ForeignMesh);
        }
        Ok(())
    }

    /// Scalar projection through the auxiliary space. Needs `num_eq == 1`.
    pub fn l2_projection_scalar(&mut self, fun: &ScalarCoefficient, t: f64, proj: &mut GridFunction) -> Result<(), ProjectionError> {
        if self.num_eq != 1 {
            return Err(ProjectionError::ScalarOnSystem {
                num_eq: self.num_eq,
            });
        }
        self.check_target(proj)?;
        self.auxiliary.project_scalar(fun, t, proj)
    }

    /// Vector projection through the auxiliary space.
    pub fn l2_projection(&mut self, fun: &VectorCoefficient, t: f64, proj: &mut GridFunction) -> Result<(), ProjectionError> {
        self.check_target(proj)?;
        self.auxiliary.project(fun, t, proj)?;
        tracing::debug!(t, "l2 projection done");
        Ok(())
    }

    /// Lumped-mass projection; no linear solve and no auxiliary buffer.
    pub fn lumped_l2_projection(&self, fun: &VectorCoefficient, t: f64, proj: &mut GridFunction) -> Result<(), ProjectionError> {
        self.check_target(proj)?;
        lumped_projection(fun, t, proj)?;
        tracing::debug!(t, "lumped projection done");
        Ok(())
    }

    /// Project with an explicit route.
    pub fn project(
        &mut self,
        kind: ProjectionKind,
        fun: &VectorCoefficient,
        t: f64,
        proj: &mut GridFunction,
    ) -> Result<(), ProjectionError> {
        match kind {
            ProjectionKind::L2 => self.l2_projection(fun, t, proj),
            ProjectionKind::Lumped => self.lumped_l2_projection(fun, t, proj),
            ProjectionKind::Nodal => {
                self.check_target(proj)?;
                nodal_projection(fun, t, proj)
            }
        }
    }

    /// Project with the configured route.
    pub fn project_initial(&mut self, fun: &VectorCoefficient, t: f64, proj: &mut GridFunction) -> Result<(), ProjectionError> {
        self.project(self.projection_kind, fun, t, proj)
    }
}

impl std::fmt::Debug for HyperbolicSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperbolicSystem")
            .field("problem", &self.model.info().name)
            .field("num_eq", &self.num_eq)
            .field("ne", &self.ne)
            .field("nd", &self.nd)
            .field("dim", &self.dim)
            .field("projection_kind", &self.projection_kind)
            .finish()
    }
}
