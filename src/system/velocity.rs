//! Per-node velocity storage for discrete upwinding.

/// `ne × nd` block of `dim`-vectors: the advection velocity at every
/// element node.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityTensor {
    dim: usize,
    nd: usize,
    ne: usize,
    data: Vec<f64>,
}

impl VelocityTensor {
    pub fn zeros(dim: usize, nd: usize, ne: usize) -> Self {
        Self {
            dim,
            nd,
            ne,
            data: vec![0.0; dim * nd * ne],
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn nd(&self) -> usize {
        self.nd
    }

    #[inline]
    pub fn ne(&self) -> usize {
        self.ne
    }

    #[inline]
    fn offset(&self, e: usize, k: usize) -> usize {
        debug_assert!(e < self.ne && k < self.nd);
        (e * self.nd + k) * self.dim
    }

    /// Velocity at node `k` of element `e`.
    #[inline]
    pub fn get(&self, e: usize, k: usize) -> &[f64] {
        let o = self.offset(e, k);
        &self.data[o..o + self.dim]
    }

    #[inline]
    pub fn get_mut(&mut self, e: usize, k: usize) -> &mut [f64] {
        let o = self.offset(e, k);
        &mut self.data[o..o + self.dim]
    }
}
