//! Element-level bilinear and linear forms for vector-valued spaces.
//!
//! The vector mass form is block diagonal: every component sees the same
//! scalar mass matrix M_ij = ∫ c φ_i φ_j dx. Only its lumped diagonal is
//! assembled globally.

use super::coefficient::VectorCoefficient;
use super::fe_space::{FeSpace, SpaceError};
use faer::Mat;

/// Vector mass form with a constant coefficient.
#[derive(Clone, Copy, Debug)]
pub struct VectorMassForm {
    coefficient: f64,
}

impl VectorMassForm {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }

    /// Unit-coefficient mass form.
    pub fn unit() -> Self {
        Self::new(1.0)
    }

    /// Scalar element mass matrix of element `e` (nd × nd).
    pub fn element_matrix(&self, space: &FeSpace, e: usize) -> Mat<f64> {
        let nd = space.nd();
        let basis = space.basis();
        let mesh = space.mesh();
        let mut m = Mat::zeros(nd, nd);
        let mut phi = vec![0.0; nd];

        for (r, w) in space.integration_rule().iter() {
            basis.shape_values(r, &mut phi);
            let dv = self.coefficient * w * mesh.det_j(e, r);
            for i in 0..nd {
                for j in 0..nd {
                    m[(i, j)] += dv * phi[i] * phi[j];
                }
            }
        }
        m
    }

    /// Row sums of the assembled vector mass matrix, one entry per vdof.
    pub fn assemble_lumped(&self, space: &FeSpace) -> Vec<f64> {
        let nd = space.nd();
        let mut diag = vec![0.0; space.vsize()];

        for e in 0..space.ne() {
            let m = self.element_matrix(space, e);
            for (i, &dof) in space.element_dofs(e).iter().enumerate() {
                let row: f64 = (0..nd).map(|j| m[(i, j)]).sum();
                for c in 0..space.vdim() {
                    diag[space.vdof(dof, c)] += row;
                }
            }
        }
        diag
    }
}

/// Assemble b_i = ∫ f_c φ_i dx for every component c of `f` at time `t`.
pub fn vector_domain_load(space: &FeSpace, f: &VectorCoefficient, t: f64) -> Result<Vec<f64>, SpaceError> {
    let vdim = space.vdim();
    if f.vdim() != vdim {
        return Err(SpaceError::SizeMismatch {
            expected: vdim,
            actual: f.vdim(),
        });
    }

    let nd = space.nd();
    let basis = space.basis();
    let mesh = space.mesh();
    let mut load = vec![0.0; space.vsize()];
    let mut phi = vec![0.0; nd];
    let mut x = vec![0.0; space.dim()];
    let mut value = vec![0.0; vdim];

    for e in 0..space.ne() {
        let dofs = space.element_dofs(e);
        for (r, w) in space.integration_rule().iter() {
            basis.shape_values(r, &mut phi);
            mesh.map(e, r, &mut x);
            f.eval(&x, t, &mut value);
            let dv = w * mesh.det_j(e, r);

            for (&dof, &p) in dofs.iter().zip(&phi) {
                for (c, &v) in value.iter().enumerate() {
                    load[space.vdof(dof, c)] += dv * v * p;
                }
            }
        }
    }
    Ok(load)
}
