//! Graph-subsystem error type.
//!
//! Most variants are construction-time failures: malformed or empty input,
//! an identity outside the graph, or a transform applied to the wrong kind of
//! view.  No partially built graph is ever returned alongside an error.
//! [`GraphError::CostOverflow`] is the one search-time failure.

use thiserror::Error;

use kr_core::LocationId;

/// Errors produced by `kr-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph needs at least one path")]
    NoPaths,

    #[error("location index {index} is out of range (max {max})")]
    LocationOutOfRange { index: usize, max: u32 },

    #[error("{count} paths exceed the limit of {max}")]
    TooManyPaths { count: usize, max: usize },

    #[error("location {0} not found in graph")]
    LocationNotFound(LocationId),

    #[error("graph already has a synthetic sink at {0}")]
    SinkAlreadyPresent(LocationId),

    #[error("graph has no synthetic sink to remove")]
    NoSink,

    #[error("shortest distance to {0} does not fit in a cost")]
    CostOverflow(LocationId),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
