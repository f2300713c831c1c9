//! The key-constrained route planner.
//!
//! # Two searches, one sink
//!
//! A route is `start → key location → some exit`.  Its cheapest cost
//! through key `k` splits into three independent parts:
//!
//! ```text
//! forward(k)  = dist(start → loc(k))                 one search from start
//! key_cost(k) = fixed
//! backward(k) = min over exits e of dist(loc(k) → e) one search from a sink
//! ```
//!
//! `backward` for every key comes from a single search: reverse the graph,
//! attach a sink wired to all exits, and search from the sink.  The key with
//! the smallest `forward + key_cost + backward` wins, and its route is the
//! forward predecessor walk followed by the backward predecessor walk.
//!
//! Both searches run on per-call state, so the input graph is never mutated
//! and a route may freely revisit locations, including `start` and the key.
//!
//! The input graph is taken as the map to route on, whatever its
//! [`Orientation`](kr_graph::Orientation) tag says; the sink of the backward
//! view is always wired sink → exit.
//!
//! # Overflow
//!
//! Every sum is checked.  A key whose route cost does not fit in a [`Cost`]
//! is never selected; if it was the only key with a route, the query fails
//! with [`QueryError::CostOverflow`] instead of reporting no route.

use kr_core::{Cost, INFINITE_COST, KeyId, LocationId, checked_add_costs, is_finite};
use kr_graph::{Graph, GraphError, ShortestPathTree, SinkWiring, attach_sink, reverse, run};

use crate::config::{KeyTieBreak, PlannerConfig};
use crate::{QueryError, QueryResult};

// ── Results ───────────────────────────────────────────────────────────────────

/// Cost breakdown for taking one key on the way from start to an exit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCandidate {
    pub key:           KeyId,
    pub location:      LocationId,
    /// Travel time from start to the key location.
    pub forward_cost:  Cost,
    pub key_cost:      Cost,
    /// Travel time from the key location to the nearest exit.
    pub backward_cost: Cost,
    /// Sum of the three; `INFINITE_COST` when infeasible or overflowed.
    pub total:         Cost,
    /// A route through this key exists but its cost does not fit in a
    /// [`Cost`].
    pub overflowed:    bool,
}

impl KeyCandidate {
    /// `true` when the key is reachable from start, can reach an exit, and
    /// the route cost fits.
    pub fn is_feasible(&self) -> bool {
        is_finite(self.total)
    }
}

/// The cheapest start → key → exit route.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimbRoute {
    /// Travel time plus the chosen key's cost.
    pub cost:          Cost,
    /// Visited locations, first = start, last = an exit.  May repeat.
    pub route:         Vec<LocationId>,
    pub key:           KeyId,
    pub key_location:  LocationId,
    pub forward_cost:  Cost,
    pub key_cost:      Cost,
    pub backward_cost: Cost,
}

impl ClimbRoute {
    /// The exit the route ends at.
    pub fn exit(&self) -> LocationId {
        self.route.last().copied().unwrap_or(LocationId::INVALID)
    }

    /// Number of paths walked (route length minus one).
    pub fn hops(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Both search results of one query plus the graph view the backward search
/// ran on.  Dropped at the end of the query.
struct Searches {
    forward:   ShortestPathTree,
    backward:  ShortestPathTree,
    augmented: Graph,
}

/// Answers `climb` queries against any [`Graph`].
///
/// The planner is stateless apart from its configuration; it is `Send +
/// Sync` and can be shared freely.
#[derive(Clone, Debug, Default)]
pub struct RoutePlanner {
    config: PlannerConfig,
}

impl RoutePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn with_tie_break(mut self, tie_break: KeyTieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Cheapest route from `start` to any of `exits` that takes exactly one
    /// key.
    ///
    /// Returns `Ok(None)` when no key is both reachable from `start` and able
    /// to reach an exit.  Fails with [`QueryError`] if `start` or an exit is
    /// not a location of `graph`, `exits` is empty, or the graph has no keys,
    /// and with [`QueryError::CostOverflow`] when every route there is costs
    /// more than a [`Cost`] can hold.
    ///
    /// O((V + E) log V): two Dijkstra runs plus linear transforms.
    #[tracing::instrument(level = "debug", skip_all, fields(start = %start, exits = exits.len()))]
    pub fn climb(
        &self,
        graph: &Graph,
        start: LocationId,
        exits: &[LocationId],
    ) -> QueryResult<Option<ClimbRoute>> {
        let searches = search(graph, start, exits)?;
        let candidates = key_candidates(graph, &searches);

        let Some(best) = self.select(&candidates) else {
            if let Some(c) = candidates.iter().find(|c| c.overflowed) {
                return Err(QueryError::CostOverflow(c.key));
            }
            tracing::debug!(keys = candidates.len(), "no key lies on a start-to-exit route");
            return Ok(None);
        };
        tracing::debug!(
            key = %best.key,
            location = %best.location,
            total = best.total,
            "selected key"
        );

        // Predecessors from the key back to start, reversed: start … key.
        let mut route = searches
            .forward
            .path_to(graph, best.location)
            .ok_or(GraphError::LocationNotFound(best.location))?;

        // Predecessors from the key back to the sink.  The backward search ran
        // on the reversed graph, so this walk already reads key … exit, sink
        // in forward order.
        let mut tail = searches
            .backward
            .walk_to_source(&searches.augmented, best.location)
            .ok_or(GraphError::LocationNotFound(best.location))?;
        let sink = tail.pop();
        debug_assert_eq!(sink, searches.augmented.sink());

        // The key location ends the first half and starts the second.
        route.pop();
        route.extend(tail);

        Ok(Some(ClimbRoute {
            cost:          best.total,
            route,
            key:           best.key,
            key_location:  best.location,
            forward_cost:  best.forward_cost,
            key_cost:      best.key_cost,
            backward_cost: best.backward_cost,
        }))
    }

    /// Cost breakdown for every key of `graph`, in key order, infeasible
    /// keys included.
    ///
    /// Preconditions and errors are those of [`climb`](Self::climb).
    #[tracing::instrument(level = "debug", skip_all, fields(start = %start, exits = exits.len()))]
    pub fn evaluate_keys(
        &self,
        graph: &Graph,
        start: LocationId,
        exits: &[LocationId],
    ) -> QueryResult<Vec<KeyCandidate>> {
        let searches = search(graph, start, exits)?;
        Ok(key_candidates(graph, &searches))
    }

    /// The cheapest feasible candidate under the configured tie-break.
    fn select<'a>(&self, candidates: &'a [KeyCandidate]) -> Option<&'a KeyCandidate> {
        let feasible = candidates.iter().filter(|c| c.is_feasible());
        match self.config.tie_break {
            KeyTieBreak::LowestLocation => feasible.min_by_key(|c| (c.total, c.location, c.key)),
            KeyTieBreak::FirstListed    => feasible.min_by_key(|c| (c.total, c.key)),
        }
    }
}

/// [`RoutePlanner::climb`] with the default configuration.
pub fn climb(graph: &Graph, start: LocationId, exits: &[LocationId]) -> QueryResult<Option<ClimbRoute>> {
    RoutePlanner::default().climb(graph, start, exits)
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn validate(graph: &Graph, start: LocationId, exits: &[LocationId]) -> QueryResult<()> {
    if !graph.contains(start) {
        return Err(QueryError::StartNotFound(start));
    }
    if exits.is_empty() {
        return Err(QueryError::NoExits);
    }
    if let Some(&bad) = exits.iter().find(|&&e| !graph.contains(e)) {
        return Err(QueryError::ExitNotFound(bad));
    }
    if graph.key_count() == 0 {
        return Err(QueryError::NoKeys);
    }
    Ok(())
}

/// Forward search from `start`, backward search from a sink over the
/// reversed graph.
fn search(graph: &Graph, start: LocationId, exits: &[LocationId]) -> QueryResult<Searches> {
    validate(graph, start, exits)?;

    let mut forward = ShortestPathTree::new(graph.location_count());
    run(graph, start, &mut forward)?;

    let augmented = attach_sink(&reverse(graph), exits, SinkWiring::SinkToExits)?;
    let sink = augmented.sink().ok_or(GraphError::NoSink)?;
    let mut backward = ShortestPathTree::new(augmented.location_count());
    run(&augmented, sink, &mut backward)?;

    Ok(Searches { forward, backward, augmented })
}

fn key_candidates(graph: &Graph, searches: &Searches) -> Vec<KeyCandidate> {
    graph
        .keys_indexed()
        .map(|(id, key)| {
            let forward_cost = searches.forward.distance(key.location);
            let backward_cost = searches.backward.distance(key.location);
            let total = checked_add_costs(forward_cost, key.cost)
                .and_then(|sum| checked_add_costs(sum, backward_cost));
            let reaches_key = is_finite(forward_cost) || searches.forward.overflowed(key.location);
            let reaches_exit =
                is_finite(backward_cost) || searches.backward.overflowed(key.location);
            let overflowed = total.is_none() && reaches_key && reaches_exit;
            KeyCandidate {
                key: id,
                location: key.location,
                forward_cost,
                key_cost: key.cost,
                backward_cost,
                total: total.unwrap_or(INFINITE_COST),
                overflowed,
            }
        })
        .collect()
}
