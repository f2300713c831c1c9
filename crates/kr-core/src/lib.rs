//! `kr-core`: foundational types for the `keyroute` planner.
//!
//! This crate is a dependency of every other `kr-*` crate.  It intentionally
//! has no `kr-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                                  |
//! |----------|-----------------------------------------------------------|
//! | [`ids`]  | `LocationId`, `EdgeId`, `KeyId`, `MAX_LOCATION_INDEX`     |
//! | [`cost`] | `Cost`, `INFINITE_COST`, saturating and checked sums      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cost;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cost::{Cost, INFINITE_COST, add_costs, checked_add_costs, is_finite};
pub use ids::{EdgeId, KeyId, LocationId, MAX_LOCATION_INDEX};
