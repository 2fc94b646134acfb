//! Axis-aligned bounding boxes.

use std::fmt;
use thiserror::Error;

/// Axis-aligned box in 1, 2 or 3 dimensions.
///
/// # Example
///
/// ```
/// use hypsys::types::BoundingBox;
///
/// let bb = BoundingBox::new(vec![0.0, -1.0], vec![2.0, 1.0]).unwrap();
/// assert_eq!(bb.dim(), 2);
/// assert_eq!(bb.measure(), 4.0);
/// assert_eq!(bb.center(), vec![1.0, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

/// Why a pair of corner points does not describe a box.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BoundsError {
    #[error("corner dimensions differ: min has {min}, max has {max}")]
    DimensionMismatch { min: usize, max: usize },

    #[error("unsupported dimension {0}, expected 1 to 3")]
    UnsupportedDimension(usize),

    #[error("max[{axis}] = {max} must be greater than min[{axis}] = {min}")]
    Inverted { axis: usize, min: f64, max: f64 },
}

impl BoundingBox {
    /// Create a box from its lower and upper corners.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self, BoundsError> {
        if min.len() != max.len() {
            return Err(BoundsError::DimensionMismatch {
                min: min.len(),
                max: max.len(),
            });
        }
        if !(1..=3).contains(&min.len()) {
            return Err(BoundsError::UnsupportedDimension(min.len()));
        }
        for (axis, (&lo, &hi)) in min.iter().zip(&max).enumerate() {
            if !(hi > lo) {
                return Err(BoundsError::Inverted {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// The unit box [0, 1]^dim.
    pub fn unit(dim: usize) -> Self {
        Self {
            min: vec![0.0; dim],
            max: vec![1.0; dim],
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    #[inline]
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    #[inline]
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Edge length along `axis`.
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Length, area or volume of the box.
    pub fn measure(&self) -> f64 {
        (0..self.dim()).map(|a| self.extent(a)).product()
    }

    pub fn center(&self) -> Vec<f64> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| 0.5 * (lo + hi))
            .collect()
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.iter()
            .zip(self.min.iter().zip(&self.max))
            .all(|(&xi, (&lo, &hi))| xi >= lo && xi <= hi)
    }

    /// Map `x` into the box by periodic translation along every axis.
    /// Coordinates already inside, faces included, are left alone.
    pub fn wrap(&self, x: &mut [f64]) {
        for (axis, xi) in x.iter_mut().enumerate().take(self.dim()) {
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if *xi < lo || *xi > hi {
                *xi = lo + (*xi - lo).rem_euclid(hi - lo);
            }
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (axis, (lo, hi)) in self.min.iter().zip(&self.max).enumerate() {
            if axis > 0 {
                write!(f, " × ")?;
            }
            write!(f, "[{:.3}, {:.3}]", lo, hi)?;
        }
        Ok(())
    }
}
