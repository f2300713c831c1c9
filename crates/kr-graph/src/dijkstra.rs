//! Single-source shortest paths over a [`Graph`].
//!
//! # State table
//!
//! The search keeps nothing on the graph.  Distances, finalized flags and
//! predecessor edges live in a [`ShortestPathTree`] indexed by `LocationId`
//! and passed in by the caller, so one graph can serve any number of queries
//! and a tree can be reused across runs without reallocating.
//!
//! # Tie-breaking
//!
//! The [`Frontier`] extracts equal distances in ascending `LocationId`
//! order, and a predecessor is only replaced on a strict improvement.  The
//! predecessor kept for each location is therefore the first relaxation (in
//! extraction order, then edge storage order) that reached its final
//! distance, and the same input always yields the same tree.
//!
//! # Overflow
//!
//! A relaxation whose sum does not fit below `INFINITE_COST` is dropped and
//! the target is flagged.  A flagged location that no other path reaches is
//! reachable in truth but has no representable distance; callers ask
//! [`ShortestPathTree::overflowed`] rather than mistaking it for unreachable.

use kr_core::{Cost, EdgeId, INFINITE_COST, LocationId, checked_add_costs, is_finite};

use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::{GraphError, GraphResult};

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Per-query search state and the result of one [`run`].
#[derive(Debug, Clone, Default)]
pub struct ShortestPathTree {
    source:    LocationId,
    // dist[v] = best known cost to reach v.
    dist:      Vec<Cost>,
    finalized: Vec<bool>,
    // pred[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes and the source.
    pred:      Vec<EdgeId>,
    // A relaxation into v overflowed.
    overflow:  Vec<bool>,
}

impl ShortestPathTree {
    /// An empty table sized for `location_count` locations.
    pub fn new(location_count: usize) -> Self {
        Self {
            source:    LocationId::INVALID,
            dist:      vec![INFINITE_COST; location_count],
            finalized: vec![false; location_count],
            pred:      vec![EdgeId::INVALID; location_count],
            overflow:  vec![false; location_count],
        }
    }

    /// Clear the distance, flags and predecessor of every location.
    /// O(V); the allocation is kept.
    pub fn reset(&mut self) {
        self.source = LocationId::INVALID;
        self.dist.fill(INFINITE_COST);
        self.finalized.fill(false);
        self.pred.fill(EdgeId::INVALID);
        self.overflow.fill(false);
    }

    /// Reset and resize to `location_count` entries.
    fn reset_for(&mut self, location_count: usize) {
        self.dist.resize(location_count, INFINITE_COST);
        self.finalized.resize(location_count, false);
        self.pred.resize(location_count, EdgeId::INVALID);
        self.overflow.resize(location_count, false);
        self.reset();
    }

    /// Source of the last run, or `LocationId::INVALID` after a reset.
    pub fn source(&self) -> LocationId {
        self.source
    }

    pub fn location_count(&self) -> usize {
        self.dist.len()
    }

    /// Shortest distance from the source; `INFINITE_COST` when unreached or
    /// outside the table.
    pub fn distance(&self, location: LocationId) -> Cost {
        self.dist.get(location.index()).copied().unwrap_or(INFINITE_COST)
    }

    pub fn is_reachable(&self, location: LocationId) -> bool {
        is_finite(self.distance(location))
    }

    /// `true` when `location` is reachable but its shortest distance does not
    /// fit in a [`Cost`].  Such a location reports `INFINITE_COST`.
    pub fn overflowed(&self, location: LocationId) -> bool {
        !self.is_reachable(location)
            && self.overflow.get(location.index()).copied().unwrap_or(false)
    }

    pub fn is_finalized(&self, location: LocationId) -> bool {
        self.finalized.get(location.index()).copied().unwrap_or(false)
    }

    /// The edge over which the search last improved `location`, if any.
    pub fn predecessor(&self, location: LocationId) -> Option<EdgeId> {
        self.pred
            .get(location.index())
            .copied()
            .filter(|e| e.is_valid())
    }

    /// Locations from `target` back to the source, following predecessor
    /// edges: `[target, …, source]`.
    ///
    /// Returns `None` if `target` was not reached.
    pub fn walk_to_source(&self, graph: &Graph, target: LocationId) -> Option<Vec<LocationId>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut walk = vec![target];
        let mut cur = target;
        while let Some(edge) = self.predecessor(cur) {
            cur = graph.edge_from(edge);
            walk.push(cur);
            // Predecessor chains follow finalization order, so they are acyclic.
            debug_assert!(walk.len() <= self.location_count());
        }
        debug_assert_eq!(cur, self.source);
        Some(walk)
    }

    /// Locations from the source to `target`: `[source, …, target]`.
    pub fn path_to(&self, graph: &Graph, target: LocationId) -> Option<Vec<LocationId>> {
        let mut walk = self.walk_to_source(graph, target)?;
        walk.reverse();
        Some(walk)
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Run Dijkstra from `source`, overwriting `tree`.
///
/// `tree` is reset (and resized to the graph) on entry, so callers may pass
/// the same table to consecutive runs.  O((V + E) log V).
#[tracing::instrument(level = "trace", skip_all, fields(source = %source))]
pub fn run(graph: &Graph, source: LocationId, tree: &mut ShortestPathTree) -> GraphResult<()> {
    if !graph.contains(source) {
        return Err(GraphError::LocationNotFound(source));
    }

    tree.reset_for(graph.location_count());
    tree.source = source;
    tree.dist[source.index()] = 0;

    let mut frontier = Frontier::with_capacity(graph.location_count());
    frontier.insert(source, 0);

    let mut settled = 0usize;
    let mut stale   = 0usize;
    let mut dropped = 0usize;

    while let Some((location, cost)) = frontier.extract_min() {
        // Skip stale frontier entries.
        if tree.finalized[location.index()] {
            stale += 1;
            continue;
        }
        tree.finalized[location.index()] = true;
        settled += 1;

        for edge in graph.out_edges(location) {
            let next = graph.edge_to(edge);
            let Some(new_cost) = checked_add_costs(cost, graph.edge_weight(edge)) else {
                tree.overflow[next.index()] = true;
                dropped += 1;
                continue;
            };

            if new_cost < tree.dist[next.index()] {
                tree.dist[next.index()] = new_cost;
                tree.pred[next.index()] = edge;
                frontier.insert(next, new_cost);
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "relaxations overflowed the cost range");
    }
    tracing::trace!(settled, stale, "dijkstra finished");
    Ok(())
}

/// Convenience wrapper: allocate a fresh tree and [`run`] into it.
pub fn shortest_path_tree(graph: &Graph, source: LocationId) -> GraphResult<ShortestPathTree> {
    let mut tree = ShortestPathTree::new(graph.location_count());
    run(graph, source, &mut tree)?;
    Ok(tree)
}

/// Cheapest route between two locations: total travel time and the visited
/// locations `[from, …, to]`.
///
/// `Ok(None)` when `to` is unreachable; `from == to` yields `(0, [from])`.
/// Fails with [`GraphError::CostOverflow`] when `to` is reachable only at a
/// cost that does not fit.
pub fn shortest_path(
    graph: &Graph,
    from:  LocationId,
    to:    LocationId,
) -> GraphResult<Option<(Cost, Vec<LocationId>)>> {
    if !graph.contains(to) {
        return Err(GraphError::LocationNotFound(to));
    }
    let tree = shortest_path_tree(graph, from)?;
    if tree.overflowed(to) {
        return Err(GraphError::CostOverflow(to));
    }
    Ok(tree.path_to(graph, to).map(|route| (tree.distance(to), route)))
}
