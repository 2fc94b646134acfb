//! Strongly-typed index newtypes.
//!
//! The flux and wave-speed contract addresses a state by element, node and an
//! optional sub-element quadrature point. Distinct types keep those three
//! integers from being swapped at call sites.

use std::fmt;

macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// Iterate over `0..n` as typed indices.
            pub fn iter(n: usize) -> impl Iterator<Item = Self> {
                (0..n).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }
    };
}

define_index!(
    /// Element index in a mesh.
    ///
    /// ```
    /// use hypsys::types::ElementIndex;
    ///
    /// let e = ElementIndex::new(7);
    /// assert_eq!(e.get(), 7);
    /// assert_eq!(e.to_string(), "E7");
    /// ```
    ElementIndex,
    "E"
);

define_index!(
    /// Local node index within an element.
    NodeIndex,
    "N"
);

define_index!(
    /// Quadrature point index within an element.
    QuadIndex,
    "Q"
);
