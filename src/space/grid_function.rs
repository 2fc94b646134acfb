//! Coefficient vectors attached to a discrete space.

use super::coefficient::{ScalarCoefficient, VectorCoefficient};
use super::fe_space::{Continuity, FeSpace, SpaceError};
use std::sync::Arc;

/// Which Lp norm [`GridFunction::lp_error`] measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpNorm {
    L1,
    L2,
    LInf,
}

/// Discrete function: one coefficient per scalar dof and component.
#[derive(Clone, Debug)]
pub struct GridFunction {
    space: Arc<FeSpace>,
    data: Vec<f64>,
}

impl GridFunction {
    /// Zero function on `space`.
    pub fn new(space: Arc<FeSpace>) -> Self {
        let data = vec![0.0; space.vsize()];
        Self { space, data }
    }

    /// Wrap existing coefficients; `data` must have the space's vector size.
    pub fn from_data(space: Arc<FeSpace>, data: Vec<f64>) -> Result<Self, SpaceError> {
        if data.len() != space.vsize() {
            return Err(SpaceError::SizeMismatch {
                expected: space.vsize(),
                actual: data.len(),
            });
        }
        Ok(Self { space, data })
    }

    pub fn space(&self) -> &Arc<FeSpace> {
        &self.space
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All components at local node `k` of element `e`.
    pub fn node_values(&self, e: usize, k: usize, out: &mut [f64]) {
        let dof = self.space.element_dofs(e)[k];
        for (c, o) in out.iter_mut().enumerate().take(self.space.vdim()) {
            *o = self.data[self.space.vdof(dof, c)];
        }
    }

    /// Interpolate a vector coefficient at every node.
    pub fn project_coefficient(&mut self, coeff: &VectorCoefficient, t: f64) -> Result<(), SpaceError> {
        let space = Arc::clone(&self.space);
        let vdim = space.vdim();
        if coeff.vdim() != vdim {
            return Err(SpaceError::SizeMismatch {
                expected: vdim,
                actual: coeff.vdim(),
            });
        }

        let mut x = vec![0.0; space.dim()];
        let mut value = vec![0.0; vdim];
        for e in 0..space.ne() {
            for (k, &dof) in space.element_dofs(e).iter().enumerate() {
                space.node_position(e, k, &mut x);
                coeff.eval(&x, t, &mut value);
                for (c, &v) in value.iter().enumerate() {
                    self.data[space.vdof(dof, c)] = v;
                }
            }
        }
        Ok(())
    }

    /// Interpolate a scalar coefficient; the space must have one component.
    pub fn project_scalar_coefficient(&mut self, coeff: &ScalarCoefficient, t: f64) -> Result<(), SpaceError> {
        let space = Arc::clone(&self.space);
        if space.vdim() != 1 {
            return Err(SpaceError::SizeMismatch {
                expected: 1,
                actual: space.vdim(),
            });
        }

        let mut x = vec![0.0; space.dim()];
        for e in 0..space.ne() {
            for (k, &dof) in space.element_dofs(e).iter().enumerate() {
                space.node_position(e, k, &mut x);
                self.data[dof] = coeff.eval(&x, t);
            }
        }
        Ok(())
    }

    /// Transfer `src` onto this function's space.
    ///
    /// Both spaces must share the mesh and component count. `src` is
    /// evaluated at the target nodes; values at dofs shared by several
    /// elements are averaged. When `src` lies in the target polynomial space
    /// the transfer is exact.
    pub fn project_grid_function(&mut self, src: &GridFunction) -> Result<(), SpaceError> {
        let space = Arc::clone(&self.space);
        if !space.shares_mesh(src.space()) {
            return Err(SpaceError::IncompatibleSpaces(
                "source and target live on different meshes".into(),
            ));
        }
        if space.vdim() != src.space().vdim() {
            return Err(SpaceError::IncompatibleSpaces(format!(
                "source has {} components, target has {}",
                src.space().vdim(),
                space.vdim()
            )));
        }

        let vdim = space.vdim();
        let basis = Arc::clone(space.basis());
        let mut value = vec![0.0; vdim];
        self.data.iter_mut().for_each(|v| *v = 0.0);

        for e in 0..space.ne() {
            for (k, &dof) in space.element_dofs(e).iter().enumerate() {
                src.eval(e, basis.ref_node(k), &mut value);
                for (c, &v) in value.iter().enumerate() {
                    self.data[space.vdof(dof, c)] += v;
                }
            }
        }

        if space.continuity() == Continuity::Continuous {
            let count = space.dof_multiplicity();
            for (dof, &m) in count.iter().enumerate() {
                for c in 0..vdim {
                    self.data[space.vdof(dof, c)] /= m as f64;
                }
            }
        }
        Ok(())
    }

    /// Evaluate all components at reference point `r` of element `e`.
    pub fn eval(&self, e: usize, r: &[f64], out: &mut [f64]) {
        let basis = self.space.basis();
        let mut phi = vec![0.0; basis.n_dofs()];
        basis.shape_values(r, &mut phi);

        out.iter_mut().for_each(|v| *v = 0.0);
        for (&dof, &p) in self.space.element_dofs(e).iter().zip(&phi) {
            for (c, o) in out.iter_mut().enumerate() {
                *o += p * self.data[self.space.vdof(dof, c)];
            }
        }
    }

    /// Lp distance to `exact` at time `t`, summed over components.
    pub fn lp_error(&self, exact: &VectorCoefficient, t: f64, norm: LpNorm) -> Result<f64, SpaceError> {
        let space = &self.space;
        let vdim = space.vdim();
        if exact.vdim() != vdim {
            return Err(SpaceError::SizeMismatch {
                expected: vdim,
                actual: exact.vdim(),
            });
        }

        let mesh = space.mesh();
        let mut x = vec![0.0; space.dim()];
        let mut uh = vec![0.0; vdim];
        let mut u = vec![0.0; vdim];
        let mut acc = 0.0_f64;

        for e in 0..space.ne() {
            for (r, w) in space.integration_rule().iter() {
                mesh.map(e, r, &mut x);
                self.eval(e, r, &mut uh);
                exact.eval(&x, t, &mut u);
                let dv = w * mesh.det_j(e, r);

                for (a, b) in uh.iter().zip(&u) {
                    let diff = (a - b).abs();
                    match norm {
                        LpNorm::L1 => acc += dv * diff,
                        LpNorm::L2 => acc += dv * diff * diff,
                        LpNorm::LInf => acc = acc.max(diff),
                    }
                }
            }
        }

        Ok(match norm {
            LpNorm::L2 => acc.sqrt(),
            _ => acc,
        })
    }
}
