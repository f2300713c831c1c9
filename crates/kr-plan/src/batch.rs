//! Many independent `climb` queries against one graph.
//!
//! A [`Graph`] carries no search state, so every query only needs `&Graph`.
//! With the `parallel` Cargo feature the queries run on Rayon's thread pool;
//! results are returned in query order either way.

use kr_core::LocationId;
use kr_graph::Graph;

use crate::planner::{ClimbRoute, RoutePlanner};
use crate::QueryResult;

/// One `climb` request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimbQuery {
    pub start: LocationId,
    pub exits: Vec<LocationId>,
}

impl ClimbQuery {
    pub fn new(start: LocationId, exits: impl Into<Vec<LocationId>>) -> Self {
        Self { start, exits: exits.into() }
    }
}

impl RoutePlanner {
    /// Answer every query in `queries`; element `i` of the result belongs to
    /// `queries[i]`.
    #[tracing::instrument(level = "debug", skip_all, fields(queries = queries.len()))]
    pub fn climb_batch(
        &self,
        graph:   &Graph,
        queries: &[ClimbQuery],
    ) -> Vec<QueryResult<Option<ClimbRoute>>> {
        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|q| self.climb(graph, q.start, &q.exits))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            queries
                .par_iter()
                .map(|q| self.climb(graph, q.start, &q.exits))
                .collect()
        }
    }
}
