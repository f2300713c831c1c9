//! CSV graph loader.
//!
//! # CSV format
//!
//! Two files: one row per directed path, one row per key.
//!
//! ```csv
//! from,to,travel_time
//! 0,1,4
//! 0,3,2
//! 3,0,3
//! ```
//!
//! ```csv
//! location,cost
//! 0,5
//! 3,2
//! ```
//!
//! Identities are dense zero-based integers; costs are non-negative integers.
//! A negative or fractional value is a parse error, as is a missing column.

use std::io::Read;

use serde::Deserialize;

use kr_core::Cost;

use crate::graph::{Graph, GraphBuilder};
use crate::{GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PathRecord {
    from:        usize,
    to:          usize,
    travel_time: Cost,
}

#[derive(Deserialize)]
struct KeyRecord {
    location: usize,
    cost:     Cost,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a forward [`Graph`] from a paths CSV file and a keys CSV file.
pub fn load_graph_csv(
    paths_file: &std::path::Path,
    keys_file:  &std::path::Path,
) -> GraphResult<Graph> {
    let paths = std::fs::File::open(paths_file)?;
    let keys = std::fs::File::open(keys_file)?;
    load_graph_readers(paths, keys)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor` or a byte slice).
#[tracing::instrument(level = "debug", skip_all)]
pub fn load_graph_readers<P: Read, K: Read>(paths: P, keys: K) -> GraphResult<Graph> {
    let mut builder = GraphBuilder::new();

    let mut path_reader = csv::Reader::from_reader(paths);
    for result in path_reader.deserialize::<PathRecord>() {
        let row = result.map_err(|e| GraphError::Parse(format!("paths: {e}")))?;
        builder.add_path(row.from, row.to, row.travel_time);
    }

    let mut key_reader = csv::Reader::from_reader(keys);
    for result in key_reader.deserialize::<KeyRecord>() {
        let row = result.map_err(|e| GraphError::Parse(format!("keys: {e}")))?;
        builder.add_key(row.location, row.cost);
    }

    tracing::debug!(
        paths = builder.path_count(),
        keys = builder.key_count(),
        "parsed graph csv"
    );
    builder.build()
}
