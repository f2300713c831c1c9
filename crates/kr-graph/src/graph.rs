//! Location graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing paths.
//! Given a `LocationId n`, its outgoing paths occupy the `EdgeId` range:
//!
//! ```text
//! out_start[n] .. out_start[n+1]
//! ```
//!
//! Paths of one location keep the order they were supplied in, so the
//! location's edge list reads exactly like the input.  Parallel paths and
//! self-loops are stored as given.
//!
//! # Keys
//!
//! Keys are kept in input order and indexed by [`KeyId`].  Several keys may
//! sit on the same location; each is an independent candidate for a route.
//!
//! # Views
//!
//! Every `Graph` knows its [`Orientation`] and whether it carries a synthetic
//! sink.  Both are set by the functions in [`crate::transform`]; a graph
//! coming out of [`GraphBuilder::build`] is always forward and sink-free.

use kr_core::{Cost, EdgeId, KeyId, LocationId, MAX_LOCATION_INDEX};

use crate::{GraphError, GraphResult};

/// Most paths a graph can hold, sink paths included.
///
/// CSR offsets and [`EdgeId`]s are `u32`, with `u32::MAX` reserved as
/// `EdgeId::INVALID`, so the last path must sit at index `u32::MAX - 1`.
pub const MAX_PATH_COUNT: usize = u32::MAX as usize;

pub(crate) fn check_path_count(count: usize) -> GraphResult<()> {
    if count > MAX_PATH_COUNT {
        return Err(GraphError::TooManyPaths { count, max: MAX_PATH_COUNT });
    }
    Ok(())
}

// ── Path / Key ────────────────────────────────────────────────────────────────

/// A directed path between two locations with its travel time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub from:        LocationId,
    pub to:          LocationId,
    pub travel_time: Cost,
}

/// A location that grants the key, and the fixed cost of taking it there.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    pub location: LocationId,
    pub cost:     Cost,
}

/// Direction of a graph relative to the one that was built from input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Forward,
    Reversed,
}

impl Orientation {
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Forward  => Orientation::Reversed,
            Orientation::Reversed => Orientation::Forward,
        }
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed location graph in CSR format plus its keys.
///
/// A `Graph` holds no search state, so one instance can serve any number of
/// sequential or concurrent queries by shared reference.  Do not construct
/// directly; use [`GraphBuilder`] or [`Graph::build`].
#[derive(Clone, Debug)]
pub struct Graph {
    /// CSR row pointer.  Length = `location_count + 1`.
    pub(crate) out_start:   Vec<u32>,
    /// Source location of each path.  Needed to walk predecessor edges back.
    pub(crate) edge_from:   Vec<LocationId>,
    pub(crate) edge_to:     Vec<LocationId>,
    pub(crate) edge_weight: Vec<Cost>,
    pub(crate) keys:        Vec<Key>,
    pub(crate) orientation: Orientation,
    pub(crate) sink:        Option<LocationId>,
}

impl Graph {
    /// Build a forward graph from `(from, to, travel_time)` triples and
    /// `(location, cost)` pairs.
    ///
    /// The location count is one more than the largest identity referenced by
    /// any path endpoint or key.
    pub fn build(paths: &[(usize, usize, Cost)], keys: &[(usize, Cost)]) -> GraphResult<Graph> {
        let mut b = GraphBuilder::with_capacity(paths.len(), keys.len());
        for &(from, to, travel_time) in paths {
            b.add_path(from, to, travel_time);
        }
        for &(location, cost) in keys {
            b.add_key(location, cost);
        }
        b.build()
    }

    /// Assemble CSR arrays from already-validated paths.
    ///
    /// Placement is a stable counting sort by source, so the per-location
    /// order of `paths` is preserved.  O(V + E).
    pub(crate) fn from_paths(
        location_count: usize,
        paths:          &[Path],
        keys:           Vec<Key>,
        orientation:    Orientation,
        sink:           Option<LocationId>,
    ) -> Graph {
        let mut out_start = vec![0u32; location_count + 1];
        for p in paths {
            out_start[p.from.index() + 1] += 1;
        }
        for i in 1..=location_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[location_count] as usize, paths.len());

        let mut cursor: Vec<u32> = out_start[..location_count].to_vec();
        let mut edge_from   = vec![LocationId::INVALID; paths.len()];
        let mut edge_to     = vec![LocationId::INVALID; paths.len()];
        let mut edge_weight = vec![0; paths.len()];
        for p in paths {
            let slot = cursor[p.from.index()] as usize;
            cursor[p.from.index()] += 1;
            edge_from[slot]   = p.from;
            edge_to[slot]     = p.to;
            edge_weight[slot] = p.travel_time;
        }

        Graph { out_start, edge_from, edge_to, edge_weight, keys, orientation, sink }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Number of locations, including a synthetic sink if present.
    pub fn location_count(&self) -> usize {
        self.out_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn contains(&self, location: LocationId) -> bool {
        location.index() < self.location_count()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The synthetic sink, if this graph was produced by
    /// [`augment_with_sink`](crate::transform::augment_with_sink).
    pub fn sink(&self) -> Option<LocationId> {
        self.sink
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing paths from `location`.
    ///
    /// A contiguous index range, no heap allocation.
    #[inline]
    pub fn out_edges(&self, location: LocationId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.out_start[location.index()];
        let end   = self.out_start[location.index() + 1];
        (start..end).map(EdgeId)
    }

    #[inline]
    pub fn out_degree(&self, location: LocationId) -> usize {
        (self.out_start[location.index() + 1] - self.out_start[location.index()]) as usize
    }

    #[inline]
    pub fn edge_from(&self, edge: EdgeId) -> LocationId {
        self.edge_from[edge.index()]
    }

    #[inline]
    pub fn edge_to(&self, edge: EdgeId) -> LocationId {
        self.edge_to[edge.index()]
    }

    #[inline]
    pub fn edge_weight(&self, edge: EdgeId) -> Cost {
        self.edge_weight[edge.index()]
    }

    pub fn path(&self, edge: EdgeId) -> Path {
        Path {
            from:        self.edge_from(edge),
            to:          self.edge_to(edge),
            travel_time: self.edge_weight(edge),
        }
    }

    /// All paths in storage order (grouped by source location).
    pub fn paths(&self) -> impl Iterator<Item = Path> + '_ {
        // edge_count() <= MAX_PATH_COUNT, checked at construction.
        (0..self.edge_count() as u32).map(move |i| self.path(EdgeId(i)))
    }

    // ── Keys ──────────────────────────────────────────────────────────────

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(id.index())
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// `(KeyId, Key)` pairs in input order.
    pub fn keys_indexed(&self) -> impl Iterator<Item = (KeyId, &Key)> + '_ {
        self.keys.iter().enumerate().map(|(i, k)| (KeyId(i as u32), k))
    }

    /// Keys placed on `location`, in input order.
    pub fn keys_at(&self, location: LocationId) -> impl Iterator<Item = (KeyId, &Key)> + '_ {
        self.keys_indexed().filter(move |(_, k)| k.location == location)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts raw `usize` identities in any order; range checks run
/// once in `build()`.
///
/// # Example
///
/// ```
/// use kr_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// b.add_path(0, 1, 4);
/// b.add_key(0, 5);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.location_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    raw_paths: Vec<(usize, usize, Cost)>,
    raw_keys:  Vec<(usize, Cost)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of paths and keys.
    pub fn with_capacity(paths: usize, keys: usize) -> Self {
        Self {
            raw_paths: Vec::with_capacity(paths),
            raw_keys:  Vec::with_capacity(keys),
        }
    }

    /// Add a **directed** path from `from` to `to`.
    pub fn add_path(&mut self, from: usize, to: usize, travel_time: Cost) -> &mut Self {
        self.raw_paths.push((from, to, travel_time));
        self
    }

    /// Place a key with acquisition `cost` on `location`.
    pub fn add_key(&mut self, location: usize, cost: Cost) -> &mut Self {
        self.raw_keys.push((location, cost));
        self
    }

    pub fn path_count(&self) -> usize { self.raw_paths.len() }
    pub fn key_count(&self) -> usize { self.raw_keys.len() }

    /// Validate identities and produce a forward [`Graph`].
    ///
    /// Fails with [`GraphError::NoPaths`] when no path was added, with
    /// [`GraphError::TooManyPaths`] above [`MAX_PATH_COUNT`] paths, and with
    /// [`GraphError::LocationOutOfRange`] when an identity exceeds
    /// [`MAX_LOCATION_INDEX`].  O(V + E).
    pub fn build(self) -> GraphResult<Graph> {
        if self.raw_paths.is_empty() {
            return Err(GraphError::NoPaths);
        }
        check_path_count(self.raw_paths.len())?;

        let referenced = self
            .raw_paths
            .iter()
            .flat_map(|&(from, to, _)| [from, to])
            .chain(self.raw_keys.iter().map(|&(location, _)| location));
        let mut max_index = 0usize;
        for index in referenced {
            max_index = max_index.max(index);
        }
        let location = |index: usize| -> GraphResult<LocationId> {
            if index > MAX_LOCATION_INDEX as usize {
                return Err(GraphError::LocationOutOfRange { index, max: MAX_LOCATION_INDEX });
            }
            Ok(LocationId(index as u32))
        };
        location(max_index)?;

        let paths = self
            .raw_paths
            .iter()
            .map(|&(from, to, travel_time)| {
                Ok(Path { from: location(from)?, to: location(to)?, travel_time })
            })
            .collect::<GraphResult<Vec<Path>>>()?;
        let keys = self
            .raw_keys
            .iter()
            .map(|&(index, cost)| Ok(Key { location: location(index)?, cost }))
            .collect::<GraphResult<Vec<Key>>>()?;

        Ok(Graph::from_paths(max_index + 1, &paths, keys, Orientation::Forward, None))
    }
}
