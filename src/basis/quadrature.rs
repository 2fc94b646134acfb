//! Tensor-product Gauss quadrature on the reference element [-1, 1]^dim.

use crate::polynomial::gauss_legendre;

/// Quadrature points and weights on the reference element.
///
/// Points are stored flat with stride `dim`; the first coordinate varies
/// fastest, matching the node ordering of [`NodalBasis`](super::NodalBasis).
#[derive(Clone, Debug)]
pub struct QuadratureRule {
    dim: usize,
    points: Vec<f64>,
    weights: Vec<f64>,
}

impl QuadratureRule {
    /// Tensor-product Gauss-Legendre rule with `n_1d` points per direction.
    ///
    /// Exact for polynomials of degree `2 * n_1d - 1` in each variable.
    pub fn gauss_legendre(n_1d: usize, dim: usize) -> Self {
        assert!((1..=2).contains(&dim), "Only 1D and 2D rules are supported");

        let (x, w) = gauss_legendre(n_1d);
        let n_points = n_1d.pow(dim as u32);
        let mut points = Vec::with_capacity(n_points * dim);
        let mut weights = Vec::with_capacity(n_points);

        if dim == 1 {
            points.extend_from_slice(&x);
            weights.extend_from_slice(&w);
        } else {
            for j in 0..n_1d {
                for i in 0..n_1d {
                    points.push(x[i]);
                    points.push(x[j]);
                    weights.push(w[i] * w[j]);
                }
            }
        }

        Self {
            dim,
            points,
            weights,
        }
    }

    /// Number of quadrature points.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Reference dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Reference coordinates of point `q`.
    #[inline]
    pub fn point(&self, q: usize) -> &[f64] {
        &self.points[q * self.dim..(q + 1) * self.dim]
    }

    /// Weight of point `q`.
    #[inline]
    pub fn weight(&self, q: usize) -> f64 {
        self.weights[q]
    }

    /// Iterate over `(point, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], f64)> + '_ {
        self.points
            .chunks_exact(self.dim)
            .zip(self.weights.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_reference_measure() {
        for n in 1..=5 {
            let line = QuadratureRule::gauss_legendre(n, 1);
            let quad = QuadratureRule::gauss_legendre(n, 2);
            assert_eq!(line.len(), n);
            assert_eq!(quad.len(), n * n);
            assert!((line.iter().map(|(_, w)| w).sum::<f64>() - 2.0).abs() < 1e-13);
            assert!((quad.iter().map(|(_, w)| w).sum::<f64>() - 4.0).abs() < 1e-13);
        }
    }

    #[test]
    fn test_tensor_rule_integrates_bilinear_products() {
        // ∫∫ r² s⁴ dr ds = (2/3)(2/5)
        let rule = QuadratureRule::gauss_legendre(3, 2);
        let q: f64 = rule.iter().map(|(p, w)| w * p[0].powi(2) * p[1].powi(4)).sum();
        assert!((q - 4.0 / 15.0).abs() < 1e-13);
    }

    #[test]
    fn test_first_coordinate_varies_fastest() {
        let rule = QuadratureRule::gauss_legendre(2, 2);
        assert!((rule.point(0)[1] - rule.point(1)[1]).abs() < 1e-15);
        assert!(rule.point(0)[0] < rule.point(1)[0]);
        assert!(rule.point(1)[1] < rule.point(2)[1]);
    }
}
