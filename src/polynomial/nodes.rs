//! One-dimensional node sets on [-1, 1].
//!
//! Two families are used:
//! - Gauss-Lobatto-Legendre (GLL): roots of (1-x²)P'_N(x). Includes the
//!   endpoints, so neighboring elements can share nodes. Primary spaces use it.
//! - Gauss-Legendre (GL): roots of P_{N+1}(x). Interior only; exact for
//!   polynomials up to degree 2N+1. Auxiliary discontinuous spaces and
//!   integration rules use it.

use super::legendre::{legendre, legendre_and_derivative};
use std::f64::consts::PI;

const NEWTON_TOL: f64 = 1e-15;
const NEWTON_MAX_ITER: usize = 100;

/// Which 1D point set a nodal basis is built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeFamily {
    /// Gauss-Lobatto-Legendre points (endpoints included).
    GaussLobatto,
    /// Gauss-Legendre points (endpoints excluded).
    GaussLegendre,
}

impl NodeFamily {
    /// Nodes and weights for a polynomial order, i.e. `order + 1` points.
    pub fn nodes_and_weights(self, order: usize) -> (Vec<f64>, Vec<f64>) {
        match self {
            NodeFamily::GaussLobatto => {
                let nodes = gauss_lobatto_nodes(order);
                let weights = gauss_lobatto_weights(order, &nodes);
                (nodes, weights)
            }
            NodeFamily::GaussLegendre => gauss_legendre(order + 1),
        }
    }

    /// Whether the family places nodes on the element boundary.
    pub fn includes_endpoints(self) -> bool {
        matches!(self, NodeFamily::GaussLobatto)
    }
}

/// Gauss-Lobatto-Legendre nodes for polynomial order N (N+1 points).
///
/// Newton iteration from Chebyshev-Lobatto points on L(x) = (1-x²)P'_N(x),
/// using L'(x) = -N(N+1) P_N(x).
pub fn gauss_lobatto_nodes(order: usize) -> Vec<f64> {
    let n = order;
    match n {
        0 => return vec![0.0],
        1 => return vec![-1.0, 1.0],
        _ => {}
    }

    let scale = (n * (n + 1)) as f64;
    let mut nodes: Vec<f64> = (0..=n).map(|j| -(PI * j as f64 / n as f64).cos()).collect();
    nodes[0] = -1.0;
    nodes[n] = 1.0;

    for x in nodes.iter_mut().take(n).skip(1) {
        for _ in 0..NEWTON_MAX_ITER {
            let (p_n, dp_n) = legendre_and_derivative(n, *x);
            let update = (1.0 - *x * *x) * dp_n / (scale * p_n);
            *x += update;
            if update.abs() < NEWTON_TOL {
                break;
            }
        }
    }

    nodes
}

/// Gauss-Lobatto-Legendre weights: w_j = 2 / (N(N+1) [P_N(x_j)]²).
pub fn gauss_lobatto_weights(order: usize, nodes: &[f64]) -> Vec<f64> {
    if order == 0 {
        return vec![2.0];
    }
    let denom = (order * (order + 1)) as f64;
    nodes
        .iter()
        .map(|&x| {
            let p = legendre(order, x);
            2.0 / (denom * p * p)
        })
        .collect()
}

/// Gauss-Legendre nodes and weights with `n_points` points.
///
/// Weights: w_j = 2 / ((1 - x_j²) [P'_n(x_j)]²).
pub fn gauss_legendre(n_points: usize) -> (Vec<f64>, Vec<f64>) {
    assert!(n_points > 0, "Gauss-Legendre rule needs at least one point");

    let n = n_points;
    let mut nodes = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);

    for i in 0..n {
        // Chebyshev-Gauss guess, ascending order.
        let mut x = -(PI * (i as f64 + 0.5) / n as f64).cos();
        for _ in 0..NEWTON_MAX_ITER {
            let (p, dp) = legendre_and_derivative(n, x);
            let update = p / dp;
            x -= update;
            if update.abs() < NEWTON_TOL {
                break;
            }
        }
        let (_, dp) = legendre_and_derivative(n, x);
        nodes.push(x);
        weights.push(2.0 / ((1.0 - x * x) * dp * dp));
    }

    (nodes, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monomial_integral(k: usize) -> f64 {
        if k % 2 == 0 { 2.0 / (k + 1) as f64 } else { 0.0 }
    }

    #[test]
    fn test_lobatto_endpoints_and_symmetry() {
        for order in 1..=6 {
            let nodes = gauss_lobatto_nodes(order);
            assert_eq!(nodes.len(), order + 1);
            assert!((nodes[0] + 1.0).abs() < 1e-14);
            assert!((nodes[order] - 1.0).abs() < 1e-14);
            for i in 0..nodes.len() / 2 {
                assert!((nodes[i] + nodes[order - i]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_lobatto_known_order_two() {
        let nodes = gauss_lobatto_nodes(2);
        let weights = gauss_lobatto_weights(2, &nodes);
        assert!(nodes[1].abs() < 1e-14);
        assert!((weights[0] - 1.0 / 3.0).abs() < 1e-14);
        assert!((weights[1] - 4.0 / 3.0).abs() < 1e-14);
        assert!((weights[2] - 1.0 / 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_lobatto_exactness() {
        for order in 1..=5 {
            let (nodes, weights) = NodeFamily::GaussLobatto.nodes_and_weights(order);
            for k in 0..=(2 * order - 1) {
                let q: f64 = nodes
                    .iter()
                    .zip(&weights)
                    .map(|(&x, &w)| w * x.powi(k as i32))
                    .sum();
                assert!(
                    (q - monomial_integral(k)).abs() < 1e-12,
                    "order {}, degree {}",
                    order,
                    k
                );
            }
        }
    }

    #[test]
    fn test_legendre_points_are_roots() {
        for n in 1..=7 {
            let (nodes, _) = gauss_legendre(n);
            for &x in &nodes {
                assert!(legendre(n, x).abs() < 1e-13);
                assert!(x.abs() < 1.0);
            }
            assert!(nodes.windows(2).all(|w| w[0] < w[1]), "ascending order");
        }
    }

    #[test]
    fn test_legendre_exactness() {
        for n in 1..=6 {
            let (nodes, weights) = gauss_legendre(n);
            let sum: f64 = weights.iter().sum();
            assert!((sum - 2.0).abs() < 1e-13);
            for k in 0..=(2 * n - 1) {
                let q: f64 = nodes
                    .iter()
                    .zip(&weights)
                    .map(|(&x, &w)| w * x.powi(k as i32))
                    .sum();
                assert!((q - monomial_integral(k)).abs() < 1e-12, "n {}, degree {}", n, k);
            }
        }
    }

    #[test]
    fn test_family_point_counts() {
        for order in 0..=4 {
            for family in [NodeFamily::GaussLobatto, NodeFamily::GaussLegendre] {
                let (nodes, weights) = family.nodes_and_weights(order);
                assert_eq!(nodes.len(), order + 1);
                assert_eq!(weights.len(), order + 1);
            }
        }
        assert!(NodeFamily::GaussLobatto.includes_endpoints());
        assert!(!NodeFamily::GaussLegendre.includes_endpoints());
    }
}
