//! `kr-graph`: location graph, shortest paths, and graph transforms.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`graph`]     | `Graph` (CSR + keys), `GraphBuilder`, `Path`, `Key`        |
//! | [`frontier`]  | `Frontier<T>` min-priority queue with lazy decrease-key    |
//! | [`dijkstra`]  | `run`, `ShortestPathTree`, `shortest_path`                 |
//! | [`transform`] | `reverse`, `attach_sink`, `augment_with_sink`, `remove_sink` |
//! | [`loader`]    | `load_graph_csv`, `load_graph_readers`                     |
//! | [`error`]     | `GraphError`, `GraphResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod dijkstra;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod loader;
pub mod transform;

#[cfg(test)]
mod tests;

pub use dijkstra::{ShortestPathTree, run, shortest_path, shortest_path_tree};
pub use error::{GraphError, GraphResult};
pub use frontier::Frontier;
pub use graph::{Graph, GraphBuilder, Key, MAX_PATH_COUNT, Orientation, Path};
pub use loader::{load_graph_csv, load_graph_readers};
pub use transform::{SinkWiring, attach_sink, augment_with_sink, remove_sink, reverse};
