//! Errors raised by the system contract.

use super::projection::ProjectionError;
use super::traits::NodeLocation;
use crate::space::SpaceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`HyperbolicSystem`](super::HyperbolicSystem) and
/// by physics models.
///
/// `Inadmissible`, `ErrorLog` and `Projection` are fatal for a run: the
/// driver is expected to stop instead of correcting the state.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("{operation} is not implemented for problem '{problem}'")]
    NotImplemented {
        operation: &'static str,
        problem: String,
    },

    #[error("inadmissible state{}: {reason}", .location.as_ref().map(|l| format!(" at {l}")).unwrap_or_default())]
    Inadmissible {
        reason: String,
        location: Option<NodeLocation>,
    },

    #[error("model has {model} equations, system was built for {system}")]
    EquationCountMismatch { model: usize, system: usize },

    #[error("space has {actual} components, expected {expected}")]
    SpaceComponents { expected: usize, actual: usize },

    #[error("no problem registered for configuration {0}")]
    UnknownProblem(u32),

    #[error("boundary function has {actual} components, expected {expected}")]
    BoundaryComponents { expected: usize, actual: usize },

    #[error("problem needs a {expected}D mesh, got {actual}D")]
    UnsupportedDimension { expected: usize, actual: usize },

    #[error("failed to append to error log {path:?}: {source}")]
    ErrorLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Space(#[from] SpaceError),
}

impl SystemError {
    /// Shorthand for an admissibility violation without a location.
    pub fn inadmissible(reason: impl Into<String>) -> Self {
        SystemError::Inadmissible {
            reason: reason.into(),
            location: None,
        }
    }
}
