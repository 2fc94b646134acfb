//! 1D mesh representation.
//!
//! A 1D mesh is a partition of an interval [x_min, x_max] into segments.
//! Element k spans vertices k and k + 1.

use std::f64::consts::PI;

/// 1D mesh of an interval.
#[derive(Clone, Debug)]
pub struct Mesh1D {
    /// Left endpoint of domain
    pub x_min: f64,
    /// Right endpoint of domain
    pub x_max: f64,
    /// Number of elements
    pub n_elements: usize,
    /// Vertex coordinates, strictly increasing, length n_elements + 1
    pub vertices: Vec<f64>,
    /// Element sizes: h[k] = vertices[k+1] - vertices[k]
    pub element_sizes: Vec<f64>,
}

/// Boundary attribute of the left end point.
pub const LEFT_ATTRIBUTE: u32 = 1;
/// Boundary attribute of the right end point.
pub const RIGHT_ATTRIBUTE: u32 = 2;

impl Mesh1D {
    /// Create a uniform mesh of [x_min, x_max] with n_elements elements.
    pub fn uniform(x_min: f64, x_max: f64, n_elements: usize) -> Self {
        assert!(n_elements > 0, "Need at least one element");
        assert!(x_max > x_min, "x_max must be greater than x_min");

        let h = (x_max - x_min) / n_elements as f64;
        let mut vertices: Vec<f64> = (0..=n_elements).map(|i| x_min + i as f64 * h).collect();
        vertices[n_elements] = x_max;

        Self::from_vertices(vertices)
    }

    /// Create a mesh from increasing vertex coordinates.
    pub fn from_vertices(vertices: Vec<f64>) -> Self {
        assert!(vertices.len() >= 2, "Need at least one element");
        assert!(
            vertices.windows(2).all(|w| w[1] > w[0]),
            "Vertices must be strictly increasing"
        );

        let element_sizes: Vec<f64> = vertices.windows(2).map(|w| w[1] - w[0]).collect();

        Self {
            x_min: vertices[0],
            x_max: vertices[vertices.len() - 1],
            n_elements: element_sizes.len(),
            vertices,
            element_sizes,
        }
    }

    /// Smoothly displace interior vertices by up to `amplitude` times the
    /// local element size. End points stay fixed.
    ///
    /// Amplitudes below 0.5 keep every element non-degenerate.
    pub fn perturbed(&self, amplitude: f64) -> Self {
        assert!(
            (0.0..0.5).contains(&amplitude),
            "Perturbation amplitude must lie in [0, 0.5)"
        );

        let length = self.length();
        let mut vertices = self.vertices.clone();
        for i in 1..self.n_elements {
            let h = self.element_sizes[i - 1].min(self.element_sizes[i]);
            let xi = (self.vertices[i] - self.x_min) / length;
            vertices[i] += amplitude * h * (2.0 * PI * xi).sin();
        }

        Self::from_vertices(vertices)
    }

    /// Map reference coordinate r in [-1, 1] to physical coordinate x in element k.
    ///
    /// x = x_k + (1 + r) * h_k / 2
    pub fn reference_to_physical(&self, k: usize, r: f64) -> f64 {
        self.vertices[k] + (1.0 + r) * self.element_sizes[k] / 2.0
    }

    /// Jacobian dx/dr = h_k / 2 of element k.
    pub fn jacobian(&self, k: usize) -> f64 {
        self.element_sizes[k] / 2.0
    }

    /// Vertex ids of element k, left then right.
    #[inline]
    pub fn element_vertex_indices(&self, k: usize) -> [usize; 2] {
        [k, k + 1]
    }

    /// Total domain length.
    pub fn length(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Minimum element size.
    pub fn h_min(&self) -> f64 {
        self.element_sizes
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}
