//! The physics contract.
//!
//! Every model implements [`HyperbolicModel`] (flux and wave speed) and
//! [`ModelHooks`] (optional capabilities with defaults). A model overrides
//! only the hooks it needs:
//!
//! ```
//! use faer::Mat;
//! use hypsys::system::{HyperbolicModel, ModelHooks, NodeLocation, ProblemInfo};
//!
//! struct Burgers {
//!     info: ProblemInfo,
//! }
//!
//! impl HyperbolicModel for Burgers {
//!     fn num_equations(&self) -> usize {
//!         1
//!     }
//!
//!     fn info(&self) -> &ProblemInfo {
//!         &self.info
//!     }
//!
//!     fn evaluate_flux(&self, u: &[f64], flux: &mut Mat<f64>, _at: NodeLocation) {
//!         flux[(0, 0)] = 0.5 * u[0] * u[0];
//!     }
//!
//!     fn wave_speed(&self, u: &[f64], normal: &[f64], _at: NodeLocation) -> f64 {
//!         (u[0] * normal[0]).abs()
//!     }
//! }
//!
//! impl ModelHooks for Burgers {}
//! ```

use super::error::SystemError;
use super::velocity::VelocityTensor;
use crate::space::GridFunction;
use crate::types::{ElementIndex, NodeIndex, QuadIndex};
use faer::Mat;
use std::fmt;

// =============================================================================
// Locations and descriptors
// =============================================================================

/// Where a state lives: element, local node and optionally a sub-element
/// quadrature point. `quad == None` means the node itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeLocation {
    pub element: ElementIndex,
    pub node: NodeIndex,
    pub quad: Option<QuadIndex>,
}

impl NodeLocation {
    /// Location of node `node` of element `element`.
    #[inline]
    pub fn at_node(element: usize, node: usize) -> Self {
        Self {
            element: ElementIndex::new(element),
            node: NodeIndex::new(node),
            quad: None,
        }
    }

    /// Location of quadrature point `quad` attached to a node.
    #[inline]
    pub fn at_quad(element: usize, node: usize, quad: usize) -> Self {
        Self {
            quad: Some(QuadIndex::new(quad)),
            ..Self::at_node(element, node)
        }
    }
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.element, self.node)?;
        if let Some(q) = self.quad {
            write!(f, "/{}", q)?;
        }
        Ok(())
    }
}

/// Boundary region tag of a mesh face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryAttribute(pub u32);

/// Flags and labels a model sets once at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemInfo {
    /// Display name.
    pub name: String,
    /// Plot scaling hint passed to visualization tools.
    pub glvis_scale: String,
    /// Whether [`ModelHooks::compute_errors`] has an exact solution to use.
    pub solution_known: bool,
    pub steady_state: bool,
    /// Whether boundary data depends on time.
    pub time_dep_bc: bool,
}

impl ProblemInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Required operations
// =============================================================================

/// Operations every physics model must provide.
///
/// Flux and wave speed are undefined for inadmissible states; callers run
/// [`ModelHooks::check_admissibility`] first.
pub trait HyperbolicModel: ModelHooks + Send + Sync {
    /// Number of conserved quantities.
    fn num_equations(&self) -> usize;

    fn info(&self) -> &ProblemInfo;

    /// Fill the `dim × num_equations` flux tensor: column `j` is the flux of
    /// equation `j` along each spatial direction.
    ///
    /// Must be deterministic and must not depend on anything but `u` and
    /// the location.
    fn evaluate_flux(&self, u: &[f64], flux: &mut Mat<f64>, at: NodeLocation);

    /// Upper bound on the signal speed of the system along `normal`.
    ///
    /// Underestimating breaks the stability of the numerical flux.
    fn wave_speed(&self, u: &[f64], normal: &[f64], at: NodeLocation) -> f64;
}

// =============================================================================
// Optional operations
// =============================================================================

/// Optional capabilities. Every method has a default.
pub trait ModelHooks {
    /// Mean-speed bound of the two-state Riemann problem (uL, uR) along
    /// `normal`. Models used with schemes that need it must override this.
    fn gms(&self, u_left: &[f64], u_right: &[f64], normal: &[f64]) -> Result<f64, SystemError> {
        let _ = (u_left, u_right, normal);
        Err(SystemError::NotImplemented {
            operation: "gms",
            problem: std::any::type_name::<Self>().to_string(),
        })
    }

    /// Reject states that violate physical constraints. Accepts all by default.
    fn check_admissibility(&self, u: &[f64]) -> Result<(), SystemError> {
        let _ = u;
        Ok(())
    }

    /// Compute the exterior state of a boundary face.
    ///
    /// On entry `ghost` holds the boundary function value at the face; the
    /// default leaves it untouched.
    fn set_bdr_cond(&self, interior: &[f64], ghost: &mut [f64], normal: &[f64], attr: BoundaryAttribute) {
        let _ = (interior, ghost, normal, attr);
    }

    /// Derive secondary fields from the state. No-op by default.
    fn compute_derived_quantities(&self, u: &GridFunction, d1: &mut GridFunction, d2: &mut GridFunction) {
        let _ = (u, d1, d2);
    }

    /// Push error norms against the exact solution onto `errors`.
    /// Leaves `errors` unchanged by default.
    fn compute_errors(
        &self,
        errors: &mut Vec<f64>,
        u: &GridFunction,
        domain_measure: f64,
        t: f64,
    ) -> Result<(), SystemError> {
        let _ = (errors, u, domain_measure, t);
        Ok(())
    }

    /// Per-node velocity for discrete upwinding. `None` disables it.
    fn velocity_nodes(&self) -> Option<&VelocityTensor> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;
    impl ModelHooks for Bare {}

    #[test]
    fn test_default_hooks() {
        let m = Bare;
        assert!(matches!(
            m.gms(&[1.0], &[2.0], &[1.0]),
            Err(SystemError::NotImplemented { operation: "gms", .. })
        ));
        assert!(m.check_admissibility(&[-1e300]).is_ok());
        assert!(m.velocity_nodes().is_none());

        let mut ghost = [4.0, 5.0];
        m.set_bdr_cond(&[1.0, 2.0], &mut ghost, &[0.0, 1.0], BoundaryAttribute(3));
        assert_eq!(ghost, [4.0, 5.0]);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(NodeLocation::at_node(2, 5).to_string(), "E2/N5");
        assert_eq!(NodeLocation::at_quad(2, 5, 1).to_string(), "E2/N5/Q1");
        assert_eq!(NodeLocation::at_node(0, 0).quad, None);
    }

    #[test]
    fn test_problem_info_defaults() {
        let info = ProblemInfo::new("demo");
        assert_eq!(info.name, "demo");
        assert!(!info.solution_known && !info.steady_state && !info.time_dep_bc);
    }
}
