//! `kr-plan`: key-constrained route planning.
//!
//! # Query
//!
//! ```text
//! climb(graph, start, exits):
//!   ① forward  : Dijkstra from start over the graph
//!   ② backward : Dijkstra from a sink over reverse(graph) + sink→exits
//!   ③ select   : key minimizing forward + key cost + backward
//!   ④ stitch   : start … key (forward tree) ++ key … exit (backward tree)
//! ```
//!
//! "No route" is `Ok(None)`; invalid arguments are [`QueryError`]s.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`RoutePlanner::climb_batch`] on Rayon's pool.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and results. |
//!
//! # Quick-start
//!
//! ```
//! use kr_core::LocationId;
//! use kr_graph::Graph;
//! use kr_plan::climb;
//!
//! let graph = Graph::build(&[(0, 1, 4)], &[(0, 5)]).unwrap();
//! let found = climb(&graph, LocationId(0), &[LocationId(1)]).unwrap().unwrap();
//! assert_eq!(found.cost, 9);
//! assert_eq!(found.route, vec![LocationId(0), LocationId(1)]);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod planner;


pub use batch::ClimbQuery;
pub use config::{KeyTieBreak, PlannerConfig};
pub use error::{QueryError, QueryResult};
pub use planner::{ClimbRoute, KeyCandidate, RoutePlanner, climb};
