//! Mesh representation.
//!
//! - [`Mesh1D`]: segments of an interval
//! - [`Mesh2D`]: bilinear quadrilaterals with edge connectivity
//! - [`Mesh`]: dimension-erased view used by the discrete spaces

mod mesh1d;
mod mesh2d;

pub use mesh1d::{LEFT_ATTRIBUTE, Mesh1D, RIGHT_ATTRIBUTE};
pub use mesh2d::{Edge, ElementFace, FACE_VERTICES, Mesh2D, SIDE_ATTRIBUTES};

/// A boundary face with its outward normal and attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFace {
    pub element: usize,
    /// Local face index (0-1 on segments, 0-3 on quads)
    pub face: usize,
    pub attribute: u32,
    /// Outward unit normal
    pub normal: Vec<f64>,
}

/// Mesh of either dimension.
#[derive(Clone, Debug)]
pub enum Mesh {
    Segments(Mesh1D),
    Quads(Mesh2D),
}

impl Mesh {
    /// Spatial dimension.
    pub fn dim(&self) -> usize {
        match self {
            Mesh::Segments(_) => 1,
            Mesh::Quads(_) => 2,
        }
    }

    pub fn n_elements(&self) -> usize {
        match self {
            Mesh::Segments(m) => m.n_elements,
            Mesh::Quads(m) => m.n_elements,
        }
    }

    pub fn n_vertices(&self) -> usize {
        match self {
            Mesh::Segments(m) => m.vertices.len(),
            Mesh::Quads(m) => m.n_vertices,
        }
    }

    /// Map reference point `r` of element `e` to physical coordinates `x`.
    pub fn map(&self, e: usize, r: &[f64], x: &mut [f64]) {
        match self {
            Mesh::Segments(m) => x[0] = m.reference_to_physical(e, r[0]),
            Mesh::Quads(m) => {
                let (px, py) = m.reference_to_physical(e, r[0], r[1]);
                x[0] = px;
                x[1] = py;
            }
        }
    }

    /// Jacobian determinant of element `e` at reference point `r`.
    pub fn det_j(&self, e: usize, r: &[f64]) -> f64 {
        match self {
            Mesh::Segments(m) => m.jacobian(e),
            Mesh::Quads(m) => m.jacobian_det(e, r[0], r[1]),
        }
    }

    /// Length or area of element `e`.
    pub fn element_measure(&self, e: usize) -> f64 {
        match self {
            Mesh::Segments(m) => m.element_sizes[e],
            Mesh::Quads(m) => m.element_area(e),
        }
    }

    /// Length or area of the whole mesh.
    pub fn measure(&self) -> f64 {
        (0..self.n_elements()).map(|e| self.element_measure(e)).sum()
    }

    /// All boundary faces, ordered by element then local face.
    pub fn boundary_faces(&self) -> Vec<BoundaryFace> {
        match self {
            Mesh::Segments(m) => vec![
                BoundaryFace {
                    element: 0,
                    face: 0,
                    attribute: LEFT_ATTRIBUTE,
                    normal: vec![-1.0],
                },
                BoundaryFace {
                    element: m.n_elements - 1,
                    face: 1,
                    attribute: RIGHT_ATTRIBUTE,
                    normal: vec![1.0],
                },
            ],
            Mesh::Quads(m) => {
                let mut faces = Vec::new();
                for k in 0..m.n_elements {
                    for f in 0..4 {
                        if let Some(attribute) = m.boundary_attribute(k, f) {
                            faces.push(BoundaryFace {
                                element: k,
                                face: f,
                                attribute,
                                normal: m.face_normal(k, f).to_vec(),
                            });
                        }
                    }
                }
                faces
            }
        }
    }
}

impl From<Mesh1D> for Mesh {
    fn from(mesh: Mesh1D) -> Self {
        Mesh::Segments(mesh)
    }
}

impl From<Mesh2D> for Mesh {
    fn from(mesh: Mesh2D) -> Self {
        Mesh::Quads(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_view() {
        let mesh = Mesh::from(Mesh1D::uniform(0.0, 2.0, 4));
        assert_eq!(mesh.dim(), 1);
        assert_eq!(mesh.n_elements(), 4);

        let mut x = [0.0];
        mesh.map(2, &[0.0], &mut x);
        assert!((x[0] - 1.25).abs() < 1e-14);
        assert!((mesh.det_j(2, &[0.7]) - 0.25).abs() < 1e-14);
        assert!((mesh.measure() - 2.0).abs() < 1e-14);

        let faces = mesh.boundary_faces();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[1].element, 3);
        assert_eq!(faces[1].normal, vec![1.0]);
    }

    #[test]
    fn test_quad_view() {
        let mesh = Mesh::from(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 2.0, 3, 2));
        assert_eq!(mesh.dim(), 2);
        assert_eq!(mesh.n_vertices(), 12);
        assert!((mesh.measure() - 2.0).abs() < 1e-14);

        let faces = mesh.boundary_faces();
        assert_eq!(faces.len(), 10);
        assert!(faces.iter().all(|f| (1..=4).contains(&f.attribute)));
    }
}
