//! Tensor-product nodal Lagrange basis on the reference element.
//!
//! The 1D Lagrange polynomials ℓ_i are attached to a [`NodeFamily`] point set.
//! In 2D the basis is φ_k(r, s) = ℓ_i(r) ℓ_j(s) with k = j * n_1d + i, so the
//! r-index varies fastest.

use super::vandermonde::Vandermonde;
use crate::polynomial::NodeFamily;

/// Nodal basis descriptor: order, reference dimension and node family.
///
/// This plays the role of a finite-element collection: it knows nothing about
/// the mesh, only about the reference element.
#[derive(Clone)]
pub struct NodalBasis {
    order: usize,
    dim: usize,
    family: NodeFamily,
    n_1d: usize,
    n_dofs: usize,
    nodes_1d: Vec<f64>,
    weights_1d: Vec<f64>,
    /// Reference node coordinates, flat with stride `dim`.
    ref_nodes: Vec<f64>,
    vandermonde: Vandermonde,
}

impl NodalBasis {
    /// Create a basis of polynomial `order` in `dim` (1 or 2) dimensions.
    pub fn new(order: usize, dim: usize, family: NodeFamily) -> Self {
        assert!((1..=2).contains(&dim), "Only 1D and 2D bases are supported");

        let n_1d = order + 1;
        let n_dofs = n_1d.pow(dim as u32);
        let (nodes_1d, weights_1d) = family.nodes_and_weights(order);
        let vandermonde = Vandermonde::new(order, &nodes_1d);

        let mut ref_nodes = Vec::with_capacity(n_dofs * dim);
        if dim == 1 {
            ref_nodes.extend_from_slice(&nodes_1d);
        } else {
            for j in 0..n_1d {
                for i in 0..n_1d {
                    ref_nodes.push(nodes_1d[i]);
                    ref_nodes.push(nodes_1d[j]);
                }
            }
        }

        Self {
            order,
            dim,
            family,
            n_1d,
            n_dofs,
            nodes_1d,
            weights_1d,
            ref_nodes,
            vandermonde,
        }
    }

    /// Polynomial order.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Reference dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn family(&self) -> NodeFamily {
        self.family
    }

    /// Nodes per direction (order + 1).
    #[inline]
    pub fn n_1d(&self) -> usize {
        self.n_1d
    }

    /// Degrees of freedom per element.
    #[inline]
    pub fn n_dofs(&self) -> usize {
        self.n_dofs
    }

    /// 1D node coordinates on [-1, 1].
    pub fn nodes_1d(&self) -> &[f64] {
        &self.nodes_1d
    }

    /// Reference coordinates of node `k`.
    #[inline]
    pub fn ref_node(&self, k: usize) -> &[f64] {
        &self.ref_nodes[k * self.dim..(k + 1) * self.dim]
    }

    /// Tensor indices (i, j) of node `k`; `j` is 0 in 1D.
    #[inline]
    pub fn tensor_index(&self, k: usize) -> (usize, usize) {
        (k % self.n_1d, k / self.n_1d)
    }

    /// Collocation weight of node `k` (product of the 1D family weights).
    pub fn node_weight(&self, k: usize) -> f64 {
        let (i, j) = self.tensor_index(k);
        if self.dim == 1 {
            self.weights_1d[i]
        } else {
            self.weights_1d[i] * self.weights_1d[j]
        }
    }

    /// Evaluate all basis functions at reference point `r`.
    ///
    /// `out` must have length [`n_dofs`](Self::n_dofs).
    pub fn shape_values(&self, r: &[f64], out: &mut [f64]) {
        debug_assert_eq!(r.len(), self.dim);
        debug_assert_eq!(out.len(), self.n_dofs);

        let mut lr = vec![0.0; self.n_1d];
        self.vandermonde.lagrange_at(r[0], &mut lr);

        if self.dim == 1 {
            out.copy_from_slice(&lr);
            return;
        }

        let mut ls = vec![0.0; self.n_1d];
        self.vandermonde.lagrange_at(r[1], &mut ls);
        for (j, &lj) in ls.iter().enumerate() {
            for (i, &li) in lr.iter().enumerate() {
                out[j * self.n_1d + i] = li * lj;
            }
        }
    }
}

impl std::fmt::Debug for NodalBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodalBasis")
            .field("order", &self.order)
            .field("dim", &self.dim)
            .field("family", &self.family)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dof_counts() {
        for order in 0..=4 {
            let line = NodalBasis::new(order, 1, NodeFamily::GaussLobatto);
            let quad = NodalBasis::new(order, 2, NodeFamily::GaussLegendre);
            assert_eq!(line.n_dofs(), order + 1);
            assert_eq!(quad.n_dofs(), (order + 1) * (order + 1));
        }
    }

    #[test]
    fn test_shape_functions_are_cardinal() {
        let basis = NodalBasis::new(2, 2, NodeFamily::GaussLobatto);
        let mut phi = vec![0.0; basis.n_dofs()];

        for k in 0..basis.n_dofs() {
            let r = basis.ref_node(k).to_vec();
            basis.shape_values(&r, &mut phi);
            for (m, &v) in phi.iter().enumerate() {
                let expected = if m == k { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-12, "phi_{}(node {}) = {}", m, k, v);
            }
        }
    }

    #[test]
    fn test_node_ordering_r_fastest() {
        let basis = NodalBasis::new(1, 2, NodeFamily::GaussLobatto);
        assert_eq!(basis.ref_node(0), &[-1.0, -1.0]);
        assert_eq!(basis.ref_node(1), &[1.0, -1.0]);
        assert_eq!(basis.ref_node(2), &[-1.0, 1.0]);
        assert_eq!(basis.ref_node(3), &[1.0, 1.0]);
        assert_eq!(basis.tensor_index(3), (1, 1));
    }

    #[test]
    fn test_node_weights_sum_to_reference_area() {
        let basis = NodalBasis::new(3, 2, NodeFamily::GaussLobatto);
        let total: f64 = (0..basis.n_dofs()).map(|k| basis.node_weight(k)).sum();
        assert!((total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_partition_of_unity_off_nodes() {
        let basis = NodalBasis::new(3, 2, NodeFamily::GaussLegendre);
        let mut phi = vec![0.0; basis.n_dofs()];
        basis.shape_values(&[0.37, -0.81], &mut phi);
        assert!((phi.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
