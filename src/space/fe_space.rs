//! Vector-valued finite element spaces.
//!
//! A space couples a [`Mesh`] with a [`NodalBasis`] and decides how local
//! element nodes map to global scalar dofs. Each scalar dof then carries
//! `vdim` components laid out according to [`Ordering`].
//!
//! Continuous spaces share vertex and edge nodes between neighbors, which
//! needs nodes on the element boundary, i.e. the Gauss-Lobatto family.

use crate::basis::{NodalBasis, QuadratureRule};
use crate::mesh::{FACE_VERTICES, Mesh};
use crate::polynomial::NodeFamily;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised when building or combining discrete spaces.
#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("basis dimension {basis} does not match mesh dimension {mesh}")]
    DimensionMismatch { mesh: usize, basis: usize },

    #[error("continuous spaces need Gauss-Lobatto nodes of order >= 1, got {family:?} of order {order}")]
    UnsupportedContinuous { family: NodeFamily, order: usize },

    #[error("a space needs at least one component")]
    ZeroComponents,

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("incompatible spaces: {0}")]
    IncompatibleSpaces(String),
}

/// Whether neighboring elements share boundary nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuity {
    Discontinuous,
    Continuous,
}

/// Layout of vector components in the global coefficient vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ordering {
    /// All values of component 0, then component 1, ...
    ByNodes,
    /// All components of dof 0, then dof 1, ...
    ByVdim,
}

/// Discrete space on a mesh.
#[derive(Debug)]
pub struct FeSpace {
    mesh: Arc<Mesh>,
    basis: Arc<NodalBasis>,
    continuity: Continuity,
    vdim: usize,
    ordering: Ordering,
    /// Global scalar dof of (element, local node), flat with stride nd.
    element_dofs: Vec<usize>,
    n_dofs: usize,
    integration: QuadratureRule,
}

impl FeSpace {
    pub fn new(
        mesh: Arc<Mesh>,
        basis: Arc<NodalBasis>,
        continuity: Continuity,
        vdim: usize,
        ordering: Ordering,
    ) -> Result<Self, SpaceError> {
        if mesh.dim() != basis.dim() {
            return Err(SpaceError::DimensionMismatch {
                mesh: mesh.dim(),
                basis: basis.dim(),
            });
        }
        if vdim == 0 {
            return Err(SpaceError::ZeroComponents);
        }

        let (element_dofs, n_dofs) = match continuity {
            Continuity::Discontinuous => {
                let total = mesh.n_elements() * basis.n_dofs();
                ((0..total).collect(), total)
            }
            Continuity::Continuous => {
                if basis.family() != NodeFamily::GaussLobatto || basis.order() == 0 {
                    return Err(SpaceError::UnsupportedContinuous {
                        family: basis.family(),
                        order: basis.order(),
                    });
                }
                continuous_numbering(&mesh, &basis)
            }
        };

        let integration = QuadratureRule::gauss_legendre(basis.order() + 2, basis.dim());

        tracing::debug!(
            ne = mesh.n_elements(),
            nd = basis.n_dofs(),
            n_dofs,
            vdim,
            ?continuity,
            "built finite element space"
        );

        Ok(Self {
            mesh,
            basis,
            continuity,
            vdim,
            ordering,
            element_dofs,
            n_dofs,
            integration,
        })
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn basis(&self) -> &Arc<NodalBasis> {
        &self.basis
    }

    pub fn continuity(&self) -> Continuity {
        self.continuity
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Number of components per dof.
    #[inline]
    pub fn vdim(&self) -> usize {
        self.vdim
    }

    /// Element count.
    #[inline]
    pub fn ne(&self) -> usize {
        self.mesh.n_elements()
    }

    /// Dofs per element.
    #[inline]
    pub fn nd(&self) -> usize {
        self.basis.n_dofs()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.mesh.dim()
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.basis.order()
    }

    /// Number of scalar dofs.
    #[inline]
    pub fn n_dofs(&self) -> usize {
        self.n_dofs
    }

    /// Length of a coefficient vector: scalar dofs times components.
    #[inline]
    pub fn vsize(&self) -> usize {
        self.n_dofs * self.vdim
    }

    /// Global scalar dofs of element `e`, in local node order.
    #[inline]
    pub fn element_dofs(&self, e: usize) -> &[usize] {
        let nd = self.nd();
        &self.element_dofs[e * nd..(e + 1) * nd]
    }

    /// Position of component `comp` of scalar dof `dof` in a coefficient vector.
    #[inline]
    pub fn vdof(&self, dof: usize, comp: usize) -> usize {
        debug_assert!(comp < self.vdim);
        match self.ordering {
            Ordering::ByNodes => comp * self.n_dofs + dof,
            Ordering::ByVdim => dof * self.vdim + comp,
        }
    }

    /// Physical position of local node `k` of element `e`.
    pub fn node_position(&self, e: usize, k: usize, x: &mut [f64]) {
        self.mesh.map(e, self.basis.ref_node(k), x);
    }

    /// Element integration rule, exact for the mass form on bilinear elements.
    pub fn integration_rule(&self) -> &QuadratureRule {
        &self.integration
    }

    /// Whether both spaces live on the same mesh object.
    pub fn shares_mesh(&self, other: &FeSpace) -> bool {
        Arc::ptr_eq(&self.mesh, &other.mesh)
    }

    /// Number of element nodes mapped to each scalar dof.
    pub fn dof_multiplicity(&self) -> Vec<usize> {
        let mut count = vec![0usize; self.n_dofs];
        for &d in &self.element_dofs {
            count[d] += 1;
        }
        count
    }
}

/// Number shared vertex, edge and interior nodes in order of first use.
fn continuous_numbering(mesh: &Mesh, basis: &NodalBasis) -> (Vec<usize>, usize) {
    let p = basis.order();
    let nd = basis.n_dofs();
    let mut element_dofs = Vec::with_capacity(mesh.n_elements() * nd);
    let mut vertex_dof: Vec<Option<usize>> = vec![None; mesh.n_vertices()];
    let mut next = 0usize;

    let mut vertex = |v: usize, next: &mut usize| -> usize {
        *vertex_dof[v].get_or_insert_with(|| {
            *next += 1;
            *next - 1
        })
    };

    match mesh {
        Mesh::Segments(m) => {
            for e in 0..m.n_elements {
                let [v0, v1] = m.element_vertex_indices(e);
                for i in 0..=p {
                    let dof = if i == 0 {
                        vertex(v0, &mut next)
                    } else if i == p {
                        vertex(v1, &mut next)
                    } else {
                        next += 1;
                        next - 1
                    };
                    element_dofs.push(dof);
                }
            }
        }
        Mesh::Quads(m) => {
            // First dof of the p - 1 interior nodes of each edge, counted
            // from the lower vertex id to the higher one.
            let mut edge_base: Vec<Option<usize>> = vec![None; m.edges.len()];
            let corners = [(0, 0), (p, 0), (p, p), (0, p)];

            for e in 0..m.n_elements {
                let verts = m.element_vertex_indices(e);
                let mut interior = None;

                for k in 0..nd {
                    let (i, j) = basis.tensor_index(k);

                    if let Some(c) = corners.iter().position(|&ij| ij == (i, j)) {
                        element_dofs.push(vertex(verts[c], &mut next));
                        continue;
                    }

                    // Face and distance from the face's first vertex.
                    let on_face = if j == 0 {
                        Some((0, i - 1))
                    } else if i == p {
                        Some((1, j - 1))
                    } else if j == p {
                        Some((2, p - i - 1))
                    } else if i == 0 {
                        Some((3, p - j - 1))
                    } else {
                        None
                    };

                    let dof = match on_face {
                        Some((f, t)) => {
                            let edge = m.element_edges[e][f];
                            let base = *edge_base[edge].get_or_insert_with(|| {
                                next += p - 1;
                                next - (p - 1)
                            });
                            let first = verts[FACE_VERTICES[f][0]];
                            let forward = first == m.edges[edge].vertices.0;
                            base + if forward { t } else { p - 2 - t }
                        }
                        None => {
                            let base = *interior.get_or_insert_with(|| {
                                next += (p - 1) * (p - 1);
                                next - (p - 1) * (p - 1)
                            });
                            base + (j - 1) * (p - 1) + (i - 1)
                        }
                    };
                    element_dofs.push(dof);
                }
            }
        }
    }

    (element_dofs, next)
}
