//! Physics models implementing the system contract.
//!
//! Only linear advection is provided. It exercises every part of the
//! contract, including discrete upwinding and exact-solution errors.

mod advection;

pub use advection::{Advection, VelocityField};
