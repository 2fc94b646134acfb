//! Continuous functions of position and time.
//!
//! Time is always an explicit argument. A coefficient never caches it.

use std::fmt;

type ScalarFn = dyn Fn(&[f64], f64) -> f64 + Send + Sync;
type VectorFn = dyn Fn(&[f64], f64, &mut [f64]) + Send + Sync;

/// Scalar function u(x, t).
pub struct ScalarCoefficient {
    f: Box<ScalarFn>,
}

impl ScalarCoefficient {
    pub fn new(f: impl Fn(&[f64], f64) -> f64 + Send + Sync + 'static) -> Self {
        Self { f: Box::new(f) }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(move |_, _| value)
    }

    #[inline]
    pub fn eval(&self, x: &[f64], t: f64) -> f64 {
        (self.f)(x, t)
    }
}

impl fmt::Debug for ScalarCoefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScalarCoefficient")
    }
}

/// Vector-valued function u(x, t) with `vdim` components.
pub struct VectorCoefficient {
    vdim: usize,
    f: Box<VectorFn>,
}

impl VectorCoefficient {
    /// Wrap a closure that writes `vdim` components into its output slice.
    pub fn new(vdim: usize, f: impl Fn(&[f64], f64, &mut [f64]) + Send + Sync + 'static) -> Self {
        assert!(vdim > 0, "Vector coefficient needs at least one component");
        Self {
            vdim,
            f: Box::new(f),
        }
    }

    pub fn constant(values: Vec<f64>) -> Self {
        Self::new(values.len(), move |_, _, out| out.copy_from_slice(&values))
    }

    /// Lift a scalar coefficient to a one-component vector coefficient.
    pub fn from_scalar(scalar: ScalarCoefficient) -> Self {
        Self::new(1, move |x, t, out| out[0] = scalar.eval(x, t))
    }

    #[inline]
    pub fn vdim(&self) -> usize {
        self.vdim
    }

    /// Evaluate at (x, t). `out` must have length [`vdim`](Self::vdim).
    #[inline]
    pub fn eval(&self, x: &[f64], t: f64, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.vdim);
        (self.f)(x, t, out)
    }
}

impl fmt::Debug for VectorCoefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorCoefficient")
            .field("vdim", &self.vdim)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_eval() {
        let c = ScalarCoefficient::new(|x, t| x[0] * x[0] + t);
        assert!((c.eval(&[2.0], 0.5) - 4.5).abs() < 1e-14);
        assert_eq!(ScalarCoefficient::constant(3.0).eval(&[0.0, 1.0], 7.0), 3.0);
    }

    #[test]
    fn test_vector_eval() {
        let c = VectorCoefficient::new(2, |x, t, out| {
            out[0] = x[0] + t;
            out[1] = x[1] - t;
        });
        let mut out = [0.0; 2];
        c.eval(&[1.0, 2.0], 0.25, &mut out);
        assert_eq!(out, [1.25, 1.75]);
    }

    #[test]
    fn test_from_scalar_and_constant() {
        let c = VectorCoefficient::from_scalar(ScalarCoefficient::new(|x, _| 2.0 * x[0]));
        assert_eq!(c.vdim(), 1);
        let mut out = [0.0];
        c.eval(&[1.5], 0.0, &mut out);
        assert_eq!(out[0], 3.0);

        let k = VectorCoefficient::constant(vec![1.0, -1.0, 0.5]);
        let mut out = [0.0; 3];
        k.eval(&[0.0], 0.0, &mut out);
        assert_eq!(out, [1.0, -1.0, 0.5]);
    }
}
