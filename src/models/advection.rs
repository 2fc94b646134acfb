//! Linear advection with a prescribed velocity field.
//!
//! ∂u/∂t + ∇ · (v(x) u) = 0
//!
//! The velocity is divergence free in both supported fields, so the exact
//! solution is the initial profile carried along the characteristics:
//! - constant v: u(x, t) = u0(x - v t), wrapped periodically into the
//!   configuration's bounding box
//! - solid-body rotation about c with rate ω: u(x, t) = u0(c + R(-ωt)(x - c))
//!
//! Velocities are sampled once at every element node (discrete upwinding)
//! and at every point of the space's integration rule. A [`NodeLocation`]
//! with `quad = Some(q)` refers to point `q` of that rule.

use crate::config::Configuration;
use crate::space::{FeSpace, GridFunction, LpNorm, ScalarCoefficient, VectorCoefficient};
use crate::system::{
    BoundaryAttribute, HyperbolicModel, ModelHooks, NodeLocation, ProblemInfo, SystemError,
    VelocityTensor,
};
use crate::types::BoundingBox;
use faer::Mat;
use std::sync::Arc;

/// Prescribed advection velocity.
#[derive(Clone, Debug, PartialEq)]
pub enum VelocityField {
    /// Uniform velocity vector.
    Constant(Vec<f64>),
    /// Rigid rotation about `center` with angular rate `omega` (2D only).
    SolidBodyRotation { center: [f64; 2], omega: f64 },
}

impl VelocityField {
    /// Velocity at `x`.
    pub fn eval(&self, x: &[f64], out: &mut [f64]) {
        match self {
            VelocityField::Constant(v) => out.copy_from_slice(v),
            VelocityField::SolidBodyRotation { center, omega } => {
                out[0] = -omega * (x[1] - center[1]);
                out[1] = omega * (x[0] - center[0]);
            }
        }
    }

    /// Spatial dimension the field is defined in.
    pub fn dim(&self) -> usize {
        match self {
            VelocityField::Constant(v) => v.len(),
            VelocityField::SolidBodyRotation { .. } => 2,
        }
    }

    /// Foot of the characteristic through `x` at time `t`, written into `x`.
    fn trace_back(&self, bbox: &BoundingBox, x: &mut [f64], t: f64) {
        match self {
            VelocityField::Constant(v) => {
                for (xi, vi) in x.iter_mut().zip(v) {
                    *xi -= vi * t;
                }
                bbox.wrap(x);
            }
            VelocityField::SolidBodyRotation { center, omega } => {
                let (s, c) = (-omega * t).sin_cos();
                let dx = x[0] - center[0];
                let dy = x[1] - center[1];
                x[0] = center[0] + c * dx - s * dy;
                x[1] = center[1] + s * dx + c * dy;
            }
        }
    }
}

/// Scalar linear advection.
pub struct Advection {
    info: ProblemInfo,
    dim: usize,
    velocity: VelocityField,
    initial: Arc<ScalarCoefficient>,
    bbox: BoundingBox,
    vel_node: VelocityTensor,
    vel_quad: VelocityTensor,
}

impl Advection {
    /// Set up advection of `initial` by `velocity` on `space`.
    pub fn new(
        space: &FeSpace,
        config: &Configuration,
        velocity: VelocityField,
        initial: ScalarCoefficient,
    ) -> Result<Self, SystemError> {
        let dim = space.dim();
        if velocity.dim() != dim {
            return Err(SystemError::UnsupportedDimension {
                expected: velocity.dim(),
                actual: dim,
            });
        }
        if config.bounding_box().dim() != dim {
            return Err(SystemError::UnsupportedDimension {
                expected: config.bounding_box().dim(),
                actual: dim,
            });
        }
        if space.vdim() != 1 {
            return Err(SystemError::SpaceComponents {
                expected: 1,
                actual: space.vdim(),
            });
        }

        let name = match velocity {
            VelocityField::Constant(_) => "Advection: translation",
            VelocityField::SolidBodyRotation { .. } => "Advection: solid body rotation",
        };
        let info = ProblemInfo {
            name: name.to_string(),
            glvis_scale: "on".to_string(),
            solution_known: true,
            steady_state: false,
            time_dep_bc: false,
        };

        let (ne, nd) = (space.ne(), space.nd());
        let rule = space.integration_rule();
        let mut vel_node = VelocityTensor::zeros(dim, nd, ne);
        let mut vel_quad = VelocityTensor::zeros(dim, rule.len(), ne);
        let mut x = vec![0.0; dim];

        for e in 0..ne {
            for k in 0..nd {
                space.node_position(e, k, &mut x);
                velocity.eval(&x, vel_node.get_mut(e, k));
            }
            for (q, (r, _)) in rule.iter().enumerate() {
                space.mesh().map(e, r, &mut x);
                velocity.eval(&x, vel_quad.get_mut(e, q));
            }
        }

        tracing::debug!(problem = name, ne, nd, "sampled advection velocity");

        Ok(Self {
            info,
            dim,
            velocity,
            initial: Arc::new(initial),
            bbox: config.bounding_box().clone(),
            vel_node,
            vel_quad,
        })
    }

    pub fn velocity(&self) -> &VelocityField {
        &self.velocity
    }

    /// Sampled velocity at a location.
    #[inline]
    pub fn velocity_at(&self, at: NodeLocation) -> &[f64] {
        match at.quad {
            None => self.vel_node.get(at.element.get(), at.node.get()),
            Some(q) => self.vel_quad.get(at.element.get(), q.get()),
        }
    }

    /// Exact solution u(x, t).
    pub fn exact_solution(&self, x: &[f64], t: f64) -> f64 {
        let mut foot = x.to_vec();
        self.velocity.trace_back(&self.bbox, &mut foot, t);
        self.initial.eval(&foot, 0.0)
    }

    /// The exact solution as a one-component coefficient.
    pub fn exact_coefficient(&self) -> VectorCoefficient {
        let velocity = self.velocity.clone();
        let bbox = self.bbox.clone();
        let initial = Arc::clone(&self.initial);
        VectorCoefficient::new(1, move |x, t, out| {
            let mut foot = x.to_vec();
            velocity.trace_back(&bbox, &mut foot, t);
            out[0] = initial.eval(&foot, 0.0);
        })
    }

    #[inline]
    fn normal_velocity(&self, v: &[f64], normal: &[f64]) -> f64 {
        v.iter().zip(normal).map(|(a, b)| a * b).sum()
    }
}

impl HyperbolicModel for Advection {
    fn num_equations(&self) -> usize {
        1
    }

    fn info(&self) -> &ProblemInfo {
        &self.info
    }

    /// F = v u, one row per direction.
    fn evaluate_flux(&self, u: &[f64], flux: &mut Mat<f64>, at: NodeLocation) {
        let v = self.velocity_at(at);
        for d in 0..self.dim {
            flux[(d, 0)] = v[d] * u[0];
        }
    }

    /// |v · n|, exact for a linear equation.
    fn wave_speed(&self, _u: &[f64], normal: &[f64], at: NodeLocation) -> f64 {
        self.normal_velocity(self.velocity_at(at), normal).abs()
    }
}

impl ModelHooks for Advection {
    /// For a constant field: keep the boundary value on inflow faces, copy
    /// the interior on outflow faces. The rotation field has no position
    /// here, so its ghost keeps the boundary value.
    fn set_bdr_cond(&self, interior: &[f64], ghost: &mut [f64], normal: &[f64], _attr: BoundaryAttribute) {
        if let VelocityField::Constant(v) = &self.velocity {
            if self.normal_velocity(v, normal) >= 0.0 {
                ghost.copy_from_slice(interior);
            }
        }
    }

    /// Pushes [L1 / |Ω|, L2 / |Ω|, L∞]. `errors` is untouched on failure.
    fn compute_errors(
        &self,
        errors: &mut Vec<f64>,
        u: &GridFunction,
        domain_measure: f64,
        t: f64,
    ) -> Result<(), SystemError> {
        let exact = self.exact_coefficient();
        let l1 = u.lp_error(&exact, t, LpNorm::L1)?;
        let l2 = u.lp_error(&exact, t, LpNorm::L2)?;
        let linf = u.lp_error(&exact, t, LpNorm::LInf)?;
        errors.extend([l1 / domain_measure, l2 / domain_measure, linf]);
        Ok(())
    }

    fn velocity_nodes(&self) -> Option<&VelocityTensor> {
        Some(&self.vel_node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::NodalBasis;
    use crate::mesh::{Mesh, Mesh1D, Mesh2D};
    use crate::polynomial::NodeFamily;
    use crate::space::{Continuity, Ordering};
    use std::f64::consts::PI;

    const TOL: f64 = 1e-12;

    fn space_2d(order: usize) -> Arc<FeSpace> {
        let mesh = Arc::new(Mesh::from(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 4, 4)));
        let basis = Arc::new(NodalBasis::new(order, 2, NodeFamily::GaussLobatto));
        Arc::new(FeSpace::new(mesh, basis, Continuity::Continuous, 1, Ordering::ByNodes).unwrap())
    }

    fn unit_config(dim: usize) -> Configuration {
        Configuration::new(0, 1.0, vec![0.0; dim], vec![1.0; dim]).unwrap()
    }

    #[test]
    fn test_constant_flux_and_wave_speed() {
        let space = space_2d(2);
        let adv = Advection::new(
            &space,
            &unit_config(2),
            VelocityField::Constant(vec![2.0, -1.0]),
            ScalarCoefficient::constant(0.0),
        )
        .unwrap();

        let mut flux = Mat::zeros(2, 1);
        adv.evaluate_flux(&[1.5], &mut flux, NodeLocation::at_node(3, 4));
        assert!((flux[(0, 0)] - 3.0).abs() < TOL);
        assert!((flux[(1, 0)] + 1.5).abs() < TOL);

        let speed = adv.wave_speed(&[1.5], &[0.0, 1.0], NodeLocation::at_quad(0, 0, 2));
        assert!((speed - 1.0).abs() < TOL);
    }

    #[test]
    fn test_rotation_velocity_at_nodes() {
        let space = space_2d(1);
        let adv = Advection::new(
            &space,
            &unit_config(2),
            VelocityField::SolidBodyRotation {
                center: [0.5, 0.5],
                omega: 2.0,
            },
            ScalarCoefficient::constant(0.0),
        )
        .unwrap();

        let vel = adv.velocity_nodes().unwrap();
        let mut x = [0.0; 2];
        for e in [0, 7, 15] {
            for k in 0..space.nd() {
                space.node_position(e, k, &mut x);
                let v = vel.get(e, k);
                assert!((v[0] + 2.0 * (x[1] - 0.5)).abs() < TOL);
                assert!((v[1] - 2.0 * (x[0] - 0.5)).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_rotation_needs_2d() {
        let mesh = Arc::new(Mesh::from(Mesh1D::uniform(0.0, 1.0, 4)));
        let basis = Arc::new(NodalBasis::new(1, 1, NodeFamily::GaussLobatto));
        let space = FeSpace::new(mesh, basis, Continuity::Continuous, 1, Ordering::ByNodes).unwrap();
        let res = Advection::new(
            &space,
            &unit_config(1),
            VelocityField::SolidBodyRotation {
                center: [0.0, 0.0],
                omega: 1.0,
            },
            ScalarCoefficient::constant(0.0),
        );
        assert!(matches!(
            res,
            Err(SystemError::UnsupportedDimension { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_exact_solution_translation_wraps() {
        let space = space_2d(1);
        let adv = Advection::new(
            &space,
            &unit_config(2),
            VelocityField::Constant(vec![1.0, 0.0]),
            ScalarCoefficient::new(|x, _| (2.0 * PI * x[0]).sin()),
        )
        .unwrap();

        // One full period returns the initial profile
        let u = adv.exact_solution(&[0.3, 0.7], 1.0);
        assert!((u - (2.0 * PI * 0.3).sin()).abs() < 1e-12);
        let u = adv.exact_solution(&[0.1, 0.7], 0.25);
        assert!((u - (2.0 * PI * 0.85).sin()).abs() < 1e-12);
    }

    #[test]
    fn test_exact_solution_rotation_quarter_turn() {
        let space = space_2d(1);
        let adv = Advection::new(
            &space,
            &unit_config(2),
            VelocityField::SolidBodyRotation {
                center: [0.5, 0.5],
                omega: PI / 2.0,
            },
            ScalarCoefficient::new(|x, _| x[0]),
        )
        .unwrap();

        // After a quarter turn the point (0.5, 0.75) came from (0.75, 0.5)
        assert!((adv.exact_solution(&[0.5, 0.75], 1.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_bdr_cond_inflow_outflow() {
        let space = space_2d(1);
        let adv = Advection::new(
            &space,
            &unit_config(2),
            VelocityField::Constant(vec![1.0, 0.0]),
            ScalarCoefficient::constant(0.0),
        )
        .unwrap();

        let mut ghost = [9.0];
        adv.set_bdr_cond(&[1.0], &mut ghost, &[-1.0, 0.0], BoundaryAttribute(4));
        assert_eq!(ghost, [9.0]);
        adv.set_bdr_cond(&[1.0], &mut ghost, &[1.0, 0.0], BoundaryAttribute(2));
        assert_eq!(ghost, [1.0]);
    }

    #[test]
    fn test_errors_vanish_for_represented_solution() {
        let space = space_2d(2);
        let config = unit_config(2);
        let adv = Advection::new(
            &space,
            &config,
            VelocityField::Constant(vec![0.0, 0.0]),
            ScalarCoefficient::new(|x, _| x[0] * x[1] + 1.0),
        )
        .unwrap();

        let mut u = GridFunction::new(space);
        u.project_coefficient(&adv.exact_coefficient(), 0.0).unwrap();

        let mut errors = Vec::new();
        adv.compute_errors(&mut errors, &u, config.domain_measure(), 0.5)
            .unwrap();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.abs() < 1e-12));
    }

    #[test]
    fn test_errors_reject_multicomponent_state() {
        let space = space_2d(1);
        let config = unit_config(2);
        let adv = Advection::new(
            &space,
            &config,
            VelocityField::Constant(vec![1.0, 0.0]),
            ScalarCoefficient::constant(1.0),
        )
        .unwrap();

        // State on a two-component space cannot be compared to a scalar solution
        let pair = Arc::new(
            FeSpace::new(
                Arc::clone(space.mesh()),
                Arc::clone(space.basis()),
                Continuity::Continuous,
                2,
                Ordering::ByNodes,
            )
            .unwrap(),
        );
        let u = GridFunction::new(pair);

        let mut errors = vec![0.5];
        let err = adv
            .compute_errors(&mut errors, &u, config.domain_measure(), 0.0)
            .unwrap_err();
        assert!(matches!(err, SystemError::Space(_)));
        assert_eq!(errors, vec![0.5]);
    }
}
