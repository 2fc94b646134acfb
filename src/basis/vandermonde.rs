//! Vandermonde matrix for nodal-modal transformations.
//!
//! The Vandermonde matrix V connects nodal and modal representations:
//! - V[i,j] = φ_j(r_i) where φ_j is the j-th normalized Legendre polynomial
//!   and r_i is the i-th node
//! - nodal_values = V * modal_coeffs
//! - modal_coeffs = V^{-1} * nodal_values
//!
//! The Lagrange polynomial attached to node j is then
//! ℓ_j(r) = Σ_m φ_m(r) V^{-1}[m, j], which is how nodal bases are evaluated
//! away from their own nodes.

use crate::polynomial::legendre_normalized;
use faer::{Mat, linalg::solvers::Solve};

/// Vandermonde matrix and its inverse.
#[derive(Clone)]
pub struct Vandermonde {
    /// Vandermonde matrix: V[i,j] = φ_j(r_i)
    pub v: Mat<f64>,
    /// Inverse Vandermonde matrix
    pub v_inv: Mat<f64>,
    /// Polynomial order
    pub order: usize,
}

impl Vandermonde {
    /// Create the Vandermonde matrix for `order + 1` distinct nodes.
    pub fn new(order: usize, nodes: &[f64]) -> Self {
        let n = order + 1;
        assert_eq!(nodes.len(), n, "Need order+1 nodes");

        let mut v = Mat::zeros(n, n);
        for (i, &r) in nodes.iter().enumerate() {
            for j in 0..n {
                v[(i, j)] = legendre_normalized(j, r);
            }
        }

        let lu = v.as_ref().full_piv_lu();
        let mut v_inv = Mat::zeros(n, n);

        // Solve V * V_inv = I column by column
        for j in 0..n {
            let mut rhs = Mat::zeros(n, 1);
            rhs[(j, 0)] = 1.0;
            let col = lu.solve(&rhs);
            for i in 0..n {
                v_inv[(i, j)] = col[(i, 0)];
            }
        }

        Self { v, v_inv, order }
    }

    /// Number of nodes (and modes).
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.order + 1
    }

    /// Evaluate every Lagrange polynomial at `r`, writing ℓ_j(r) into `out[j]`.
    pub fn lagrange_at(&self, r: f64, out: &mut [f64]) {
        let n = self.n_nodes();
        debug_assert_eq!(out.len(), n);

        out.iter_mut().for_each(|v| *v = 0.0);
        for m in 0..n {
            let phi = legendre_normalized(m, r);
            for (j, o) in out.iter_mut().enumerate() {
                *o += phi * self.v_inv[(m, j)];
            }
        }
    }
}
