//! Polynomial evaluation and node generation.
//!
//! This module provides:
//! - 1D Legendre polynomials and their derivatives
//! - Gauss-Lobatto-Legendre and Gauss-Legendre nodes and weights

mod legendre;
mod nodes;

pub use legendre::{legendre, legendre_and_derivative, legendre_normalized};
pub use nodes::{NodeFamily, gauss_legendre, gauss_lobatto_nodes, gauss_lobatto_weights};
