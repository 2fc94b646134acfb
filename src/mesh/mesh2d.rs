//! 2D mesh representation for quadrilateral elements.
//!
//! The mesh stores:
//! - Vertex coordinates
//! - Element-vertex connectivity (counter-clockwise ordering)
//! - Edge connectivity with boundary attributes
//!
//! Face convention (counter-clockwise around element):
//! - Face 0 (bottom): from vertex 0 to vertex 1
//! - Face 1 (right):  from vertex 1 to vertex 2
//! - Face 2 (top):    from vertex 2 to vertex 3
//! - Face 3 (left):   from vertex 3 to vertex 0

use std::collections::HashMap;
use std::f64::consts::PI;

/// Reference to an element and one of its faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementFace {
    /// Element index
    pub element: usize,
    /// Face index (0-3 for quads)
    pub face: usize,
}

impl ElementFace {
    pub fn new(element: usize, face: usize) -> Self {
        Self { element, face }
    }
}

/// Information about an edge in the mesh.
#[derive(Clone, Debug)]
pub struct Edge {
    /// Vertex indices (v0, v1) with v0 < v1
    pub vertices: (usize, usize),
    /// First element-face that touches the edge
    pub left: ElementFace,
    /// Second element-face (None for boundary edges)
    pub right: Option<ElementFace>,
    /// Boundary attribute (only for boundary edges)
    pub attribute: Option<u32>,
}

impl Edge {
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }
}

/// Local vertex pair of each face.
pub const FACE_VERTICES: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

/// Boundary attributes of the sides of a rectangle: bottom, right, top, left.
pub const SIDE_ATTRIBUTES: [u32; 4] = [1, 2, 3, 4];

/// 2D mesh of quadrilateral elements.
#[derive(Clone, Debug)]
pub struct Mesh2D {
    /// Vertex coordinates: vertices[i] = (x, y)
    pub vertices: Vec<(f64, f64)>,

    /// Element-vertex connectivity: elements[k] = [v0, v1, v2, v3]
    /// Vertices are in counter-clockwise order:
    /// - v0: bottom-left  (r=-1, s=-1)
    /// - v1: bottom-right (r=+1, s=-1)
    /// - v2: top-right    (r=+1, s=+1)
    /// - v3: top-left     (r=-1, s=+1)
    pub elements: Vec<[usize; 4]>,

    /// Edge list with connectivity information
    pub edges: Vec<Edge>,

    /// Element-to-edge mapping: element_edges[k][f] = edge index for face f of element k
    pub element_edges: Vec<[usize; 4]>,

    pub n_elements: usize,
    pub n_vertices: usize,
}

impl Mesh2D {
    /// Create a uniform rectangular mesh of [x0, x1] × [y0, y1].
    ///
    /// Boundary edges carry [`SIDE_ATTRIBUTES`] by side.
    pub fn uniform_rectangle(x0: f64, x1: f64, y0: f64, y1: f64, nx: usize, ny: usize) -> Self {
        assert!(
            nx > 0 && ny > 0,
            "Need at least one element in each direction"
        );
        assert!(x1 > x0 && y1 > y0, "Invalid domain bounds");

        let dx = (x1 - x0) / nx as f64;
        let dy = (y1 - y0) / ny as f64;

        let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push((x0 + i as f64 * dx, y0 + j as f64 * dy));
            }
        }

        let mut elements = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let v0 = j * (nx + 1) + i; // bottom-left
                let v1 = v0 + 1; // bottom-right
                let v2 = v1 + (nx + 1); // top-right
                let v3 = v0 + (nx + 1); // top-left
                elements.push([v0, v1, v2, v3]);
            }
        }

        let row = nx + 1;
        let side_of = |a: usize, b: usize| -> u32 {
            let (ia, ja) = (a % row, a / row);
            let (ib, jb) = (b % row, b / row);
            if ja == 0 && jb == 0 {
                SIDE_ATTRIBUTES[0]
            } else if ia == nx && ib == nx {
                SIDE_ATTRIBUTES[1]
            } else if ja == ny && jb == ny {
                SIDE_ATTRIBUTES[2]
            } else {
                SIDE_ATTRIBUTES[3]
            }
        };

        Self::build(vertices, elements, side_of)
    }

    /// Create a mesh from raw vertices and quads.
    ///
    /// Every boundary edge gets attribute 1. Orientation is not checked: a
    /// clockwise quad has a negative Jacobian and inward face normals.
    pub fn from_parts(vertices: Vec<(f64, f64)>, elements: Vec<[usize; 4]>) -> Self {
        assert!(!elements.is_empty(), "Need at least one element");
        assert!(
            elements.iter().flatten().all(|&v| v < vertices.len()),
            "Element references a missing vertex"
        );
        Self::build(vertices, elements, |_, _| 1)
    }

    /// Smoothly displace vertices inside the bounding box of the mesh by up
    /// to `amplitude` times the local spacing. Boundary vertices stay fixed,
    /// so the domain is unchanged.
    ///
    /// The displacement is sin(2πξ)sin(πη) in x and sin(πξ)sin(2πη) in y,
    /// with (ξ, η) the normalized position in the bounding box.
    pub fn perturbed(&self, amplitude: f64) -> Self {
        assert!(
            (0.0..0.25).contains(&amplitude),
            "Perturbation amplitude must lie in [0, 0.25)"
        );

        let (xmin, xmax, ymin, ymax) = self.bounds();
        let h = self.h_min();

        let vertices = self
            .vertices
            .iter()
            .map(|&(x, y)| {
                let xi = (x - xmin) / (xmax - xmin);
                let eta = (y - ymin) / (ymax - ymin);
                let dx = (2.0 * PI * xi).sin() * (PI * eta).sin();
                let dy = (PI * xi).sin() * (2.0 * PI * eta).sin();
                (x + amplitude * h * dx, y + amplitude * h * dy)
            })
            .collect();

        let mut mesh = self.clone();
        mesh.vertices = vertices;
        mesh
    }

    fn build(
        vertices: Vec<(f64, f64)>,
        elements: Vec<[usize; 4]>,
        attribute: impl Fn(usize, usize) -> u32,
    ) -> Self {
        let n_elements = elements.len();
        let n_vertices = vertices.len();

        let mut edges: Vec<Edge> = Vec::new();
        let mut lookup: HashMap<(usize, usize), usize> = HashMap::new();
        let mut element_edges = vec![[0usize; 4]; n_elements];

        for (k, elem) in elements.iter().enumerate() {
            for (f, pair) in FACE_VERTICES.iter().enumerate() {
                let a = elem[pair[0]];
                let b = elem[pair[1]];
                let key = (a.min(b), a.max(b));
                let here = ElementFace::new(k, f);

                let idx = *lookup.entry(key).or_insert_with(|| {
                    edges.push(Edge {
                        vertices: key,
                        left: here,
                        right: None,
                        attribute: None,
                    });
                    edges.len() - 1
                });
                if edges[idx].left != here {
                    assert!(
                        edges[idx].right.is_none(),
                        "Edge shared by more than two elements"
                    );
                    edges[idx].right = Some(here);
                }
                element_edges[k][f] = idx;
            }
        }

        for edge in edges.iter_mut().filter(|e| e.is_boundary()) {
            edge.attribute = Some(attribute(edge.vertices.0, edge.vertices.1));
        }

        Self {
            vertices,
            elements,
            edges,
            element_edges,
            n_elements,
            n_vertices,
        }
    }

    /// Get the vertex coordinates of element k.
    pub fn element_vertices(&self, k: usize) -> [(f64, f64); 4] {
        let [v0, v1, v2, v3] = self.elements[k];
        [
            self.vertices[v0],
            self.vertices[v1],
            self.vertices[v2],
            self.vertices[v3],
        ]
    }

    /// Vertex ids of element k.
    #[inline]
    pub fn element_vertex_indices(&self, k: usize) -> [usize; 4] {
        self.elements[k]
    }

    /// Map reference coordinates (r, s) ∈ [-1, 1]² to physical coordinates.
    pub fn reference_to_physical(&self, k: usize, r: f64, s: f64) -> (f64, f64) {
        let verts = self.element_vertices(k);
        let n = bilinear_shape(r, s);

        let mut x = 0.0;
        let mut y = 0.0;
        for (ni, (xi, yi)) in n.iter().zip(verts) {
            x += ni * xi;
            y += ni * yi;
        }
        (x, y)
    }

    /// Determinant of the bilinear map Jacobian at (r, s).
    pub fn jacobian_det(&self, k: usize, r: f64, s: f64) -> f64 {
        let verts = self.element_vertices(k);
        let dn_dr = [-(1.0 - s), 1.0 - s, 1.0 + s, -(1.0 + s)];
        let dn_ds = [-(1.0 - r), -(1.0 + r), 1.0 + r, 1.0 - r];

        let (mut xr, mut xs, mut yr, mut ys) = (0.0, 0.0, 0.0, 0.0);
        for (i, (x, y)) in verts.iter().enumerate() {
            xr += 0.25 * dn_dr[i] * x;
            xs += 0.25 * dn_ds[i] * x;
            yr += 0.25 * dn_dr[i] * y;
            ys += 0.25 * dn_ds[i] * y;
        }
        xr * ys - xs * yr
    }

    /// Area of element k (shoelace formula).
    pub fn element_area(&self, k: usize) -> f64 {
        let v = self.element_vertices(k);
        let mut twice = 0.0;
        for i in 0..4 {
            let (x0, y0) = v[i];
            let (x1, y1) = v[(i + 1) % 4];
            twice += x0 * y1 - x1 * y0;
        }
        0.5 * twice
    }

    /// Outward unit normal of face f of element k (counter-clockwise elements).
    pub fn face_normal(&self, k: usize, f: usize) -> [f64; 2] {
        let elem = self.elements[k];
        let (xa, ya) = self.vertices[elem[FACE_VERTICES[f][0]]];
        let (xb, yb) = self.vertices[elem[FACE_VERTICES[f][1]]];
        let (tx, ty) = (xb - xa, yb - ya);
        let len = tx.hypot(ty);
        [ty / len, -tx / len]
    }

    /// Boundary attribute of face f of element k, None for interior faces.
    pub fn boundary_attribute(&self, k: usize, f: usize) -> Option<u32> {
        self.edges[self.element_edges[k][f]].attribute
    }

    /// Bounding box (xmin, xmax, ymin, ymax) of all vertices.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.vertices.iter().fold(
            (
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        )
    }

    /// Shortest edge length.
    pub fn h_min(&self) -> f64 {
        self.edges
            .iter()
            .map(|e| {
                let (xa, ya) = self.vertices[e.vertices.0];
                let (xb, yb) = self.vertices[e.vertices.1];
                (xb - xa).hypot(yb - ya)
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// Bilinear vertex shape functions at (r, s).
#[inline]
fn bilinear_shape(r: f64, s: f64) -> [f64; 4] {
    [
        (1.0 - r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 + s) / 4.0,
        (1.0 - r) * (1.0 + s) / 4.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_rectangle_dimensions() {
        let mesh = Mesh2D::uniform_rectangle(0.0, 2.0, 0.0, 1.0, 4, 2);

        assert_eq!(mesh.n_elements, 8);
        assert_eq!(mesh.n_vertices, 15);
        // Horizontal 4*3 plus vertical 5*2
        assert_eq!(mesh.edges.len(), 22);
        let n_boundary = mesh.edges.iter().filter(|e| e.is_boundary()).count();
        assert_eq!(n_boundary, 12);
    }

    #[test]
    fn test_side_attributes() {
        let mesh = Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 2, 2);

        // Element 0 is bottom-left
        assert_eq!(mesh.boundary_attribute(0, 0), Some(1));
        assert_eq!(mesh.boundary_attribute(0, 3), Some(4));
        assert_eq!(mesh.boundary_attribute(0, 1), None);
        // Element 3 is top-right
        assert_eq!(mesh.boundary_attribute(3, 1), Some(2));
        assert_eq!(mesh.boundary_attribute(3, 2), Some(3));
    }

    #[test]
    fn test_reference_to_physical() {
        let mesh = Mesh2D::uniform_rectangle(0.0, 2.0, 0.0, 2.0, 2, 2);

        let (x, y) = mesh.reference_to_physical(0, -1.0, -1.0);
        assert!(x.abs() < 1e-14 && y.abs() < 1e-14);

        let (x, y) = mesh.reference_to_physical(3, 0.0, 0.0);
        assert!((x - 1.5).abs() < 1e-14);
        assert!((y - 1.5).abs() < 1e-14);

        assert!((mesh.jacobian_det(3, 0.3, -0.2) - 0.25).abs() < 1e-14);
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 1, 1);
        let expected = [[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]];
        for (f, n) in expected.iter().enumerate() {
            let got = mesh.face_normal(0, f);
            assert!((got[0] - n[0]).abs() < 1e-14);
            assert!((got[1] - n[1]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_perturbed_preserves_area() {
        let mesh = Mesh2D::uniform_rectangle(0.0, 3.0, -1.0, 1.0, 6, 4).perturbed(0.2);

        let total: f64 = (0..mesh.n_elements).map(|k| mesh.element_area(k)).sum();
        assert!((total - 6.0).abs() < 1e-12);
        for k in 0..mesh.n_elements {
            for &(r, s) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                assert!(mesh.jacobian_det(k, r, s) > 0.0, "element {} inverted", k);
            }
        }
        // Interior vertex (1, 0) has moved
        let (x, y) = mesh.vertices[2 * 7 + 2];
        assert!((x - 1.0).abs() + y.abs() > 1e-6);
    }

    #[test]
    fn test_from_parts_shares_edges() {
        let vertices = vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 1.0)];
        let mesh = Mesh2D::from_parts(vertices, vec![[0, 1, 4, 3], [1, 2, 5, 4]]);

        assert_eq!(mesh.edges.len(), 7);
        assert_eq!(mesh.element_edges[0][1], mesh.element_edges[1][3]);
        assert_eq!(mesh.boundary_attribute(1, 1), Some(1));
    }

    #[test]
    fn test_from_parts_keeps_clockwise_orientation() {
        let vertices = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let mesh = Mesh2D::from_parts(vertices, vec![[0, 3, 2, 1]]);

        assert!((mesh.jacobian_det(0, 0.0, 0.0) + 0.25).abs() < 1e-14);
        // Face 0 runs up the left side; its normal now points into the element
        let n = mesh.face_normal(0, 0);
        assert!((n[0] - 1.0).abs() < 1e-14 && n[1].abs() < 1e-14);
    }
}
