//! Pure graph transformations: reversal and the synthetic exit sink.
//!
//! None of these functions touch their input; each returns a new [`Graph`].
//!
//! # Sink wiring
//!
//! The sink collects every exit into one vertex so a single search can find,
//! for all locations at once, the cost to the nearest exit.  Which way its
//! zero-weight paths point is a [`SinkWiring`].
//!
//! [`attach_sink`] takes the wiring explicitly and ignores the graph's
//! [`Orientation`] tag; query code uses it.  [`augment_with_sink`] derives
//! the wiring from the tag, keeping sink paths exit → sink relative to the
//! forward graph: stored as given on a forward graph, sink → exit on a
//! reversed one.

use kr_core::LocationId;

use crate::graph::{Graph, Orientation, Path, check_path_count};
use crate::{GraphError, GraphResult};

/// Direction of the zero-weight paths joining the exits and the sink.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SinkWiring {
    /// `exit → sink`: a search *to* the sink ends at any exit.
    ExitsToSink,
    /// `sink → exit`: a search *from* the sink starts at every exit at once.
    SinkToExits,
}

impl SinkWiring {
    /// Wiring that reads exit → sink once the graph is viewed forward.
    pub fn for_orientation(orientation: Orientation) -> SinkWiring {
        match orientation {
            Orientation::Forward  => SinkWiring::ExitsToSink,
            Orientation::Reversed => SinkWiring::SinkToExits,
        }
    }
}

/// Flip every path `(u, v, w)` to `(v, u, w)`.  Same locations, same keys,
/// same sink; orientation is toggled.  O(V + E).
pub fn reverse(graph: &Graph) -> Graph {
    let flipped: Vec<Path> = graph
        .paths()
        .map(|p| Path { from: p.to, to: p.from, travel_time: p.travel_time })
        .collect();
    Graph::from_paths(
        graph.location_count(),
        &flipped,
        graph.keys.clone(),
        graph.orientation().flipped(),
        graph.sink(),
    )
}

/// Append a synthetic sink and wire it to each exit according to the
/// graph's orientation.  See [`attach_sink`].
pub fn augment_with_sink(graph: &Graph, exits: &[LocationId]) -> GraphResult<Graph> {
    attach_sink(graph, exits, SinkWiring::for_orientation(graph.orientation()))
}

/// Append a synthetic sink at identity `location_count` and join each exit
/// to it with a zero-weight path pointing the way `wiring` says.  The
/// orientation tag is carried over unchanged.  O(V + E).
///
/// Fails if the graph already has a sink, an exit is not a location of the
/// graph, or the extra paths would not fit in CSR storage.  Duplicate exits
/// produce parallel zero-weight paths, which are harmless.
pub fn attach_sink(graph: &Graph, exits: &[LocationId], wiring: SinkWiring) -> GraphResult<Graph> {
    if let Some(sink) = graph.sink() {
        return Err(GraphError::SinkAlreadyPresent(sink));
    }
    if let Some(&bad) = exits.iter().find(|&&e| !graph.contains(e)) {
        return Err(GraphError::LocationNotFound(bad));
    }

    let sink = LocationId::try_from(graph.location_count())
        .map_err(|_| GraphError::LocationOutOfRange {
            index: graph.location_count(),
            max:   kr_core::MAX_LOCATION_INDEX,
        })?;

    check_path_count(graph.edge_count() + exits.len())?;

    let mut paths: Vec<Path> = Vec::with_capacity(graph.edge_count() + exits.len());
    paths.extend(graph.paths());
    for &exit in exits {
        let (from, to) = match wiring {
            SinkWiring::ExitsToSink => (exit, sink),
            SinkWiring::SinkToExits => (sink, exit),
        };
        paths.push(Path { from, to, travel_time: 0 });
    }

    Ok(Graph::from_paths(
        graph.location_count() + 1,
        &paths,
        graph.keys.clone(),
        graph.orientation(),
        Some(sink),
    ))
}

/// Drop the synthetic sink and every path incident to it, restoring the
/// graph that [`attach_sink`] started from.  O(V + E).
pub fn remove_sink(graph: &Graph) -> GraphResult<Graph> {
    let sink = graph.sink().ok_or(GraphError::NoSink)?;
    debug_assert_eq!(sink.index(), graph.location_count() - 1);

    let kept: Vec<Path> = graph
        .paths()
        .filter(|p| p.from != sink && p.to != sink)
        .collect();
    Ok(Graph::from_paths(
        graph.location_count() - 1,
        &kept,
        graph.keys.clone(),
        graph.orientation(),
        None,
    ))
}
