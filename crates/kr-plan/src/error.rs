use kr_core::{KeyId, LocationId};
use kr_graph::GraphError;
use thiserror::Error;

/// Failures of a planner query.
///
/// Argument checks run before any search; only
/// [`CostOverflow`](QueryError::CostOverflow) comes out of the searches.
/// "No route" is not an error; see [`RoutePlanner::climb`](crate::RoutePlanner::climb).
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("start location {0} is not in the graph")]
    StartNotFound(LocationId),

    #[error("at least one exit is required")]
    NoExits,

    #[error("exit location {0} is not in the graph")]
    ExitNotFound(LocationId),

    #[error("graph has no keys")]
    NoKeys,

    #[error("every route through a key costs more than a cost can hold (first: {0})")]
    CostOverflow(KeyId),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type QueryResult<T> = Result<T, QueryError>;
