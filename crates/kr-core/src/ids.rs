//! Identifiers for locations, paths and keys.
//!
//! Every per-query table in the planner (distances, finalized flags,
//! predecessor edges) is a plain `Vec` indexed by location, and paths live in
//! CSR arrays indexed by edge.  The wrappers below keep those three index
//! spaces apart at compile time while still converting to `usize` for free
//! through `.index()`.
//!
//! `u32::MAX` is reserved in each space as `INVALID`, which is also what
//! `Default` yields, so an unfilled predecessor slot reads as "none".

use std::fmt;

/// Declare one or more `u32` index newtypes sharing the same helpers.
macro_rules! index_types {
    ($($(#[$attr:meta])* $name:ident;)+) => {$(
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Reserved "no such entry" value.
            pub const INVALID: $name = $name(u32::MAX);

            /// Slot of this id in a table indexed by it.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            /// Fails when `n` does not fit in `u32`.
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    )+};
}

index_types! {
    /// A location of the graph.  Locations are numbered densely from 0.
    LocationId;
    /// A path's slot in CSR storage, grouped by source location.
    EdgeId;
    /// A key's position in the order keys were supplied.
    KeyId;
}

/// Largest location index accepted from input.
///
/// `MAX_LOCATION_INDEX + 1` stays free for the sink a query appends.
pub const MAX_LOCATION_INDEX: u32 = u32::MAX - 2;
