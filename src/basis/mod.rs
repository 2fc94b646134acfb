//! Reference-element basis machinery.
//!
//! - [`Vandermonde`]: nodal-modal transformation for 1D node sets
//! - [`NodalBasis`]: tensor-product Lagrange basis in 1D and 2D
//! - [`QuadratureRule`]: tensor-product Gauss integration rules

mod nodal;
mod quadrature;
mod vandermonde;

pub use nodal::NodalBasis;
pub use quadrature::QuadratureRule;
pub use vandermonde::Vandermonde;
