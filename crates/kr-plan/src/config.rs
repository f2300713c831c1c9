//! Planner configuration.

/// Rule for choosing among keys whose routes cost exactly the same.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyTieBreak {
    /// Lowest key location identity, then the earliest listed key.
    #[default]
    LowestLocation,
    /// The earliest listed key.
    FirstListed,
}

/// Top-level planner configuration.
///
/// Typically built in code or loaded from a TOML/JSON file by the
/// application crate (with the `serde` feature) and handed to
/// [`RoutePlanner::new`](crate::RoutePlanner::new).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// How to pick between equally cheap keys.  Default: lowest location.
    pub tie_break: KeyTieBreak,
}
