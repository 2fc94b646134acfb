//! Problem selection by configuration number.
//!
//! ```
//! use std::sync::Arc;
//! use hypsys::basis::NodalBasis;
//! use hypsys::mesh::{Mesh, Mesh2D};
//! use hypsys::polynomial::NodeFamily;
//! use hypsys::space::{Continuity, FeSpace, Ordering, VectorCoefficient};
//! use hypsys::system::ProblemRegistry;
//! use hypsys::Configuration;
//!
//! let mesh = Arc::new(Mesh::from(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 4, 4)));
//! let basis = Arc::new(NodalBasis::new(2, 2, NodeFamily::GaussLobatto));
//! let space = Arc::new(
//!     FeSpace::new(mesh, basis, Continuity::Continuous, 1, Ordering::ByNodes).unwrap(),
//! );
//! let config = Configuration::new(1, 1.0, vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
//!
//! let system = ProblemRegistry::with_defaults()
//!     .build(space, config, VectorCoefficient::constant(vec![0.0]))
//!     .unwrap();
//! assert!(system.discrete_upwinding());
//! ```

use super::error::SystemError;
use super::hyperbolic::HyperbolicSystem;
use super::traits::HyperbolicModel;
use crate::config::Configuration;
use crate::models::{Advection, VelocityField};
use crate::space::{FeSpace, ScalarCoefficient, VectorCoefficient};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;

/// What a factory sees when building a model.
pub struct ModelContext<'a> {
    pub space: &'a Arc<FeSpace>,
    pub config: &'a Configuration,
}

/// Builds a boxed model for a space and configuration.
pub type ModelFactory = fn(&ModelContext<'_>) -> Result<Box<dyn HyperbolicModel>, SystemError>;

/// Map from configuration number to named model factory.
#[derive(Clone, Default)]
pub struct ProblemRegistry {
    entries: BTreeMap<u32, (&'static str, ModelFactory)>,
}

impl ProblemRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the reference advection problems:
    /// - 0: translation with a constant velocity, periodic in the box
    /// - 1: solid-body rotation about the box center (2D)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(0, "advection-translation", advection_translation);
        registry.register(1, "advection-rotation", advection_rotation);
        registry
    }

    /// Register `factory` under `config_num`, returning the name it replaced.
    pub fn register(&mut self, config_num: u32, name: &'static str, factory: ModelFactory) -> Option<&'static str> {
        self.entries
            .insert(config_num, (name, factory))
            .map(|(old, _)| old)
    }

    pub fn contains(&self, config_num: u32) -> bool {
        self.entries.contains_key(&config_num)
    }

    pub fn name(&self, config_num: u32) -> Option<&'static str> {
        self.entries.get(&config_num).map(|(name, _)| *name)
    }

    /// Registered (number, name) pairs in ascending order.
    pub fn problems(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.entries.iter().map(|(&id, (name, _))| (id, *name))
    }

    /// Build the model selected by `config` and wrap it in a system.
    pub fn build(
        &self,
        space: Arc<FeSpace>,
        config: Configuration,
        bdr_cond: VectorCoefficient,
    ) -> Result<HyperbolicSystem, SystemError> {
        let id = config.config_num();
        let (name, factory) = self
            .entries
            .get(&id)
            .ok_or(SystemError::UnknownProblem(id))?;

        tracing::debug!(config = id, problem = *name, "building registered problem");

        let model = factory(&ModelContext {
            space: &space,
            config: &config,
        })?;
        let num_eq = model.num_equations();
        HyperbolicSystem::new(space, num_eq, config, bdr_cond, model)
    }
}

impl std::fmt::Debug for ProblemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, (name, _))| (id, name)))
            .finish()
    }
}

// =============================================================================
// Default problems
// =============================================================================

/// Periodic sine profile moved by one box length per unit time along each axis.
fn advection_translation(ctx: &ModelContext<'_>) -> Result<Box<dyn HyperbolicModel>, SystemError> {
    let bbox = ctx.config.bounding_box().clone();
    let dim = ctx.space.dim();
    if bbox.dim() != dim {
        return Err(SystemError::UnsupportedDimension {
            expected: bbox.dim(),
            actual: dim,
        });
    }
    let velocity: Vec<f64> = (0..dim).map(|a| bbox.extent(a)).collect();

    let initial = ScalarCoefficient::new(move |x, _| {
        (0..bbox.dim())
            .map(|a| (2.0 * PI * (x[a] - bbox.min()[a]) / bbox.extent(a)).sin())
            .product()
    });

    Ok(Box::new(Advection::new(
        ctx.space,
        ctx.config,
        VelocityField::Constant(velocity),
        initial,
    )?))
}

/// One revolution per unit time of a Gaussian hump.
fn advection_rotation(ctx: &ModelContext<'_>) -> Result<Box<dyn HyperbolicModel>, SystemError> {
    let bbox = ctx.config.bounding_box();
    if bbox.dim() != 2 {
        return Err(SystemError::UnsupportedDimension {
            expected: 2,
            actual: bbox.dim(),
        });
    }

    let c = bbox.center();
    let center = [c[0], c[1]];
    let hump = [center[0] + 0.25 * bbox.extent(0), center[1]];
    let width = 0.1 * bbox.extent(0).min(bbox.extent(1));

    let initial = ScalarCoefficient::new(move |x, _| {
        let r2 = (x[0] - hump[0]).powi(2) + (x[1] - hump[1]).powi(2);
        (-r2 / (width * width)).exp()
    });

    Ok(Box::new(Advection::new(
        ctx.space,
        ctx.config,
        VelocityField::SolidBodyRotation {
            center,
            omega: 2.0 * PI,
        },
        initial,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::NodalBasis;
    use crate::mesh::{Mesh, Mesh1D, Mesh2D};
    use crate::polynomial::NodeFamily;
    use crate::space::{Continuity, Ordering};

    fn line_space() -> Arc<FeSpace> {
        let mesh = Arc::new(Mesh::from(Mesh1D::uniform(0.0, 2.0, 8)));
        let basis = Arc::new(NodalBasis::new(2, 1, NodeFamily::GaussLobatto));
        Arc::new(FeSpace::new(mesh, basis, Continuity::Continuous, 1, Ordering::ByNodes).unwrap())
    }

    #[test]
    fn test_defaults_listed() {
        let registry = ProblemRegistry::with_defaults();
        let problems: Vec<_> = registry.problems().collect();
        assert_eq!(
            problems,
            vec![(0, "advection-translation"), (1, "advection-rotation")]
        );
        assert!(registry.contains(1));
        assert_eq!(registry.name(7), None);
    }

    #[test]
    fn test_build_translation_1d() {
        let config = Configuration::new(0, 1.0, vec![0.0], vec![2.0]).unwrap();
        let system = ProblemRegistry::with_defaults()
            .build(line_space(), config, VectorCoefficient::constant(vec![0.0]))
            .unwrap();

        assert_eq!(system.num_equations(), 1);
        assert_eq!(system.info().name, "Advection: translation");
        assert!(system.info().solution_known);
        // Velocity equals the box extent
        assert_eq!(system.velocity_nodes().unwrap().get(0, 0), &[2.0]);
    }

    #[test]
    fn test_unknown_problem() {
        let config = Configuration::new(42, 1.0, vec![0.0], vec![2.0]).unwrap();
        let err = ProblemRegistry::with_defaults()
            .build(line_space(), config, VectorCoefficient::constant(vec![0.0]))
            .unwrap_err();
        assert!(matches!(err, SystemError::UnknownProblem(42)));
    }

    #[test]
    fn test_rotation_rejects_1d() {
        let config = Configuration::new(1, 1.0, vec![0.0], vec![2.0]).unwrap();
        let err = ProblemRegistry::with_defaults()
            .build(line_space(), config, VectorCoefficient::constant(vec![0.0]))
            .unwrap_err();
        assert!(matches!(err, SystemError::UnsupportedDimension { expected: 2, .. }));
    }

    #[test]
    fn test_translation_rejects_box_dimension_mismatch() {
        let mesh = Arc::new(Mesh::from(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 2, 2)));
        let basis = Arc::new(NodalBasis::new(1, 2, NodeFamily::GaussLobatto));
        let space =
            Arc::new(FeSpace::new(mesh, basis, Continuity::Continuous, 1, Ordering::ByNodes).unwrap());
        let config = Configuration::new(0, 1.0, vec![0.0], vec![1.0]).unwrap();

        let err = ProblemRegistry::with_defaults()
            .build(space, config, VectorCoefficient::constant(vec![0.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            SystemError::UnsupportedDimension {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ProblemRegistry::with_defaults();
        let old = registry.register(0, "custom", advection_translation);
        assert_eq!(old, Some("advection-translation"));
        assert_eq!(registry.name(0), Some("custom"));
    }
}
