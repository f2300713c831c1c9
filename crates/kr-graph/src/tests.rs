//! Unit tests for kr-graph.
//!
//! All tests use hand-crafted graphs so they run without any input file.

#[cfg(test)]
mod helpers {
    use crate::Graph;

    /// Five paths over four locations, three keys.
    ///
    /// ```text
    ///   0 →(4) 1      0 →(2) 3      0 →(3) 2
    ///   2 →(2) 3      3 →(3) 0
    /// ```
    ///
    /// Keys: location 0 costs 5, location 3 costs 2, location 1 costs 3.
    pub fn floor() -> Graph {
        Graph::build(
            &[(0, 1, 4), (0, 3, 2), (0, 2, 3), (2, 3, 2), (3, 0, 3)],
            &[(0, 5), (3, 2), (1, 3)],
        )
        .unwrap()
    }

    /// Diamond with equal-cost branches: 0→1→3 and 0→2→3, all weights 1.
    pub fn diamond() -> Graph {
        Graph::build(&[(0, 2, 1), (0, 1, 1), (1, 3, 1), (2, 3, 1)], &[(3, 0)]).unwrap()
    }

    /// Sorted multiset of `(from, to, travel_time)` triples.
    pub fn edge_multiset(graph: &Graph) -> Vec<(u32, u32, u64)> {
        let mut v: Vec<_> = graph.paths().map(|p| (p.from.0, p.to.0, p.travel_time)).collect();
        v.sort_unstable();
        v
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use kr_core::{KeyId, LocationId, MAX_LOCATION_INDEX};

    use crate::graph::check_path_count;
    use crate::{Graph, GraphBuilder, GraphError, Key, MAX_PATH_COUNT, Orientation};

    #[test]
    fn empty_paths_rejected() {
        let err = GraphBuilder::new().build().unwrap_err();
        assert!(matches!(err, GraphError::NoPaths));
        assert!(matches!(Graph::build(&[], &[(0, 1)]), Err(GraphError::NoPaths)));
    }

    #[test]
    fn location_count_covers_keys() {
        let g = Graph::build(&[(0, 1, 1)], &[(5, 2)]).unwrap();
        assert_eq!(g.location_count(), 6);
        assert_eq!(g.out_degree(LocationId(5)), 0);
        assert!(g.contains(LocationId(5)));
        assert!(!g.contains(LocationId(6)));
    }

    #[test]
    fn out_of_range_identity_rejected() {
        let too_big = MAX_LOCATION_INDEX as usize + 1;
        let err = Graph::build(&[(0, too_big, 1)], &[]).unwrap_err();
        assert!(matches!(err, GraphError::LocationOutOfRange { index, .. } if index == too_big));

        let err = Graph::build(&[(0, 1, 1)], &[(too_big, 0)]).unwrap_err();
        assert!(matches!(err, GraphError::LocationOutOfRange { .. }));
    }

    #[test]
    fn path_count_limited_to_edge_id_range() {
        assert!(check_path_count(MAX_PATH_COUNT).is_ok());
        let err = check_path_count(MAX_PATH_COUNT + 1).unwrap_err();
        assert!(matches!(
            err,
            GraphError::TooManyPaths { count, max } if count == MAX_PATH_COUNT + 1 && max == MAX_PATH_COUNT
        ));
        // The last admissible path still has a valid EdgeId.
        assert!(kr_core::EdgeId((MAX_PATH_COUNT - 1) as u32).is_valid());
    }

    #[test]
    fn per_source_input_order_preserved() {
        let g = super::helpers::floor();
        let from_0: Vec<u32> = g.out_edges(LocationId(0)).map(|e| g.edge_to(e).0).collect();
        assert_eq!(from_0, vec![1, 3, 2]);
        for e in g.out_edges(LocationId(0)) {
            assert_eq!(g.edge_from(e), LocationId(0));
        }
    }

    #[test]
    fn parallel_paths_and_self_loops_kept() {
        let g = Graph::build(&[(0, 1, 3), (0, 1, 3), (1, 1, 0)], &[]).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.out_degree(LocationId(0)), 2);
        assert_eq!(g.out_degree(LocationId(1)), 1);
    }

    #[test]
    fn keys_indexed_in_input_order() {
        let g = super::helpers::floor();
        assert_eq!(g.key_count(), 3);
        assert_eq!(g.key(KeyId(1)), Some(&Key { location: LocationId(3), cost: 2 }));
        assert!(g.key(KeyId(3)).is_none());
        let at_0: Vec<KeyId> = g.keys_at(LocationId(0)).map(|(id, _)| id).collect();
        assert_eq!(at_0, vec![KeyId(0)]);
    }

    #[test]
    fn several_keys_on_one_location() {
        let g = Graph::build(&[(0, 1, 1)], &[(1, 4), (1, 2)]).unwrap();
        let costs: Vec<u64> = g.keys_at(LocationId(1)).map(|(_, k)| k.cost).collect();
        assert_eq!(costs, vec![4, 2]);
    }

    #[test]
    fn built_graph_is_forward_without_sink() {
        let g = super::helpers::floor();
        assert_eq!(g.orientation(), Orientation::Forward);
        assert!(g.sink().is_none());
    }

    #[test]
    fn builder_chaining() {
        let mut b = GraphBuilder::with_capacity(2, 1);
        b.add_path(0, 1, 1).add_path(1, 2, 1).add_key(2, 7);
        assert_eq!(b.path_count(), 2);
        assert_eq!(b.key_count(), 1);
        let g = b.build().unwrap();
        assert_eq!(g.location_count(), 3);
    }
}

// ── Frontier ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frontier {
    use crate::Frontier;

    #[test]
    fn extracts_in_priority_order() {
        let mut f = Frontier::new();
        f.insert("c", 7);
        f.insert("a", 1);
        f.insert("b", 4);
        assert_eq!(f.peek_priority(), Some(1));
        assert_eq!(f.extract_min(), Some(("a", 1)));
        assert_eq!(f.extract_min(), Some(("b", 4)));
        assert_eq!(f.extract_min(), Some(("c", 7)));
        assert_eq!(f.extract_min(), None);
    }

    #[test]
    fn equal_priorities_extract_smaller_item_first() {
        let mut f = Frontier::new();
        f.insert(9u32, 3);
        f.insert(2u32, 3);
        f.insert(5u32, 3);
        let order: Vec<u32> = std::iter::from_fn(|| f.extract_min().map(|(i, _)| i)).collect();
        assert_eq!(order, vec![2, 5, 9]);
    }

    #[test]
    fn duplicate_items_stay_live() {
        let mut f = Frontier::new();
        f.insert(1u32, 10);
        f.insert(1u32, 4);
        assert_eq!(f.len(), 2);
        assert_eq!(f.extract_min(), Some((1, 4)));
        assert_eq!(f.extract_min(), Some((1, 10)));
        assert!(f.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut f: Frontier<u32> = Frontier::default();
        f.insert(1, 1);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.peek_priority(), None);
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use kr_core::{INFINITE_COST, LocationId};

    use crate::{Graph, GraphError, ShortestPathTree, run, shortest_path, shortest_path_tree};

    #[test]
    fn distances_from_start() {
        let g = super::helpers::floor();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert_eq!(t.distance(LocationId(0)), 0);
        assert_eq!(t.distance(LocationId(1)), 4);
        assert_eq!(t.distance(LocationId(2)), 3);
        assert_eq!(t.distance(LocationId(3)), 2);
        assert!(t.predecessor(LocationId(0)).is_none());
        assert!((0..4).all(|i| t.is_finalized(LocationId(i))));
    }

    #[test]
    fn unreachable_stays_infinite() {
        let g = super::helpers::floor();
        let t = shortest_path_tree(&g, LocationId(1)).unwrap();
        assert_eq!(t.distance(LocationId(0)), INFINITE_COST);
        assert!(!t.is_reachable(LocationId(3)));
        assert!(t.predecessor(LocationId(3)).is_none());
        assert!(t.path_to(&g, LocationId(3)).is_none());
    }

    #[test]
    fn path_reconstruction() {
        let g = Graph::build(&[(0, 1, 1), (1, 2, 1), (0, 2, 5)], &[]).unwrap();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        let ids = |v: Vec<LocationId>| v.into_iter().map(|l| l.0).collect::<Vec<_>>();
        assert_eq!(ids(t.path_to(&g, LocationId(2)).unwrap()), vec![0, 1, 2]);
        assert_eq!(ids(t.walk_to_source(&g, LocationId(2)).unwrap()), vec![2, 1, 0]);
        assert_eq!(ids(t.path_to(&g, LocationId(0)).unwrap()), vec![0]);
    }

    #[test]
    fn equal_cost_tie_prefers_lower_location() {
        let g = super::helpers::diamond();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert_eq!(t.distance(LocationId(3)), 2);
        let route = t.path_to(&g, LocationId(3)).unwrap();
        assert_eq!(route, vec![LocationId(0), LocationId(1), LocationId(3)]);
    }

    #[test]
    fn zero_weight_cycle_terminates() {
        let g = Graph::build(&[(0, 1, 0), (1, 0, 0), (1, 2, 0), (2, 2, 0)], &[]).unwrap();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert_eq!(t.distance(LocationId(2)), 0);
        assert_eq!(t.path_to(&g, LocationId(2)).unwrap().len(), 3);
    }

    #[test]
    fn parallel_paths_take_cheaper() {
        let g = Graph::build(&[(0, 1, 9), (0, 1, 2)], &[]).unwrap();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert_eq!(t.distance(LocationId(1)), 2);
        let edge = t.predecessor(LocationId(1)).unwrap();
        assert_eq!(g.edge_weight(edge), 2);
    }

    #[test]
    fn overflowing_distance_is_flagged_not_dropped() {
        let far = INFINITE_COST - 10;
        let g = Graph::build(&[(0, 1, far), (1, 2, 20)], &[]).unwrap();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert_eq!(t.distance(LocationId(1)), far);
        assert!(!t.overflowed(LocationId(1)));
        assert!(!t.is_reachable(LocationId(2)));
        assert!(t.overflowed(LocationId(2)));

        let err = shortest_path(&g, LocationId(0), LocationId(2)).unwrap_err();
        assert!(matches!(err, GraphError::CostOverflow(LocationId(2))));
    }

    #[test]
    fn overflowing_detour_beside_a_cheap_path_is_ignored() {
        let g = Graph::build(&[(0, 1, INFINITE_COST - 10), (1, 2, 20), (0, 2, 5)], &[]).unwrap();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert_eq!(t.distance(LocationId(2)), 5);
        assert!(!t.overflowed(LocationId(2)));
        let (cost, _) = shortest_path(&g, LocationId(0), LocationId(2)).unwrap().unwrap();
        assert_eq!(cost, 5);
    }

    #[test]
    fn infinite_weight_path_cannot_be_walked() {
        let g = Graph::build(&[(0, 1, INFINITE_COST)], &[]).unwrap();
        let t = shortest_path_tree(&g, LocationId(0)).unwrap();
        assert!(t.overflowed(LocationId(1)));
    }

    #[test]
    fn tree_reused_across_runs() {
        let g = super::helpers::floor();
        let mut t = ShortestPathTree::new(0);
        run(&g, LocationId(0), &mut t).unwrap();
        assert_eq!(t.location_count(), 4);
        assert_eq!(t.distance(LocationId(1)), 4);

        run(&g, LocationId(3), &mut t).unwrap();
        assert_eq!(t.source(), LocationId(3));
        assert_eq!(t.distance(LocationId(3)), 0);
        assert_eq!(t.distance(LocationId(1)), 7);

        t.reset();
        assert_eq!(t.source(), LocationId::INVALID);
        assert!(!t.overflowed(LocationId(3)));
        assert!(!t.is_reachable(LocationId(3)));
        assert!(!t.is_finalized(LocationId(3)));
    }

    #[test]
    fn unknown_source_rejected() {
        let g = super::helpers::floor();
        let err = shortest_path_tree(&g, LocationId(4)).unwrap_err();
        assert!(matches!(err, GraphError::LocationNotFound(LocationId(4))));
    }

    #[test]
    fn single_pair_query() {
        let g = super::helpers::floor();
        let (cost, route) = shortest_path(&g, LocationId(2), LocationId(1)).unwrap().unwrap();
        // 2→3→0→1 = 2 + 3 + 4
        assert_eq!(cost, 9);
        assert_eq!(route, vec![LocationId(2), LocationId(3), LocationId(0), LocationId(1)]);

        let (cost, route) = shortest_path(&g, LocationId(1), LocationId(1)).unwrap().unwrap();
        assert_eq!(cost, 0);
        assert_eq!(route, vec![LocationId(1)]);

        assert!(shortest_path(&g, LocationId(1), LocationId(0)).unwrap().is_none());
        assert!(shortest_path(&g, LocationId(0), LocationId(9)).is_err());
    }
}

// ── Transforms ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod transform {
    use kr_core::LocationId;

    use crate::{
        GraphError, Orientation, SinkWiring, attach_sink, augment_with_sink, remove_sink, reverse,
        shortest_path_tree,
    };

    use super::helpers::{edge_multiset, floor};

    #[test]
    fn reverse_flips_every_path() {
        let g = floor();
        let r = reverse(&g);
        assert_eq!(r.location_count(), g.location_count());
        assert_eq!(r.edge_count(), g.edge_count());
        assert_eq!(r.orientation(), Orientation::Reversed);
        assert_eq!(r.keys(), g.keys());

        let mut flipped: Vec<_> =
            g.paths().map(|p| (p.to.0, p.from.0, p.travel_time)).collect();
        flipped.sort_unstable();
        assert_eq!(edge_multiset(&r), flipped);
    }

    #[test]
    fn double_reverse_restores_edges() {
        let g = floor();
        let rr = reverse(&reverse(&g));
        assert_eq!(rr.orientation(), Orientation::Forward);
        assert_eq!(edge_multiset(&rr), edge_multiset(&g));
    }

    #[test]
    fn sink_on_reversed_graph_points_at_exits() {
        let r = reverse(&floor());
        let a = augment_with_sink(&r, &[LocationId(1), LocationId(2)]).unwrap();
        let sink = a.sink().unwrap();
        assert_eq!(sink, LocationId(4));
        assert_eq!(a.location_count(), 5);
        assert_eq!(a.out_degree(sink), 2);
        for e in a.out_edges(sink) {
            assert_eq!(a.edge_weight(e), 0);
        }
        // Input untouched.
        assert_eq!(r.location_count(), 4);
        assert!(r.sink().is_none());
    }

    #[test]
    fn sink_on_forward_graph_collects_exits() {
        let g = floor();
        let a = augment_with_sink(&g, &[LocationId(1)]).unwrap();
        let sink = a.sink().unwrap();
        assert_eq!(a.out_degree(sink), 0);
        let into_sink = a.paths().filter(|p| p.to == sink).count();
        assert_eq!(into_sink, 1);
    }

    #[test]
    fn explicit_wiring_ignores_orientation() {
        let exits = [LocationId(1), LocationId(2)];

        // Sink → exit on a graph tagged forward.
        let g = floor();
        let a = attach_sink(&g, &exits, SinkWiring::SinkToExits).unwrap();
        let sink = a.sink().unwrap();
        assert_eq!(a.orientation(), Orientation::Forward);
        assert_eq!(a.out_degree(sink), 2);

        // Exit → sink on a graph tagged reversed.
        let r = reverse(&g);
        let a = attach_sink(&r, &exits, SinkWiring::ExitsToSink).unwrap();
        let sink = a.sink().unwrap();
        assert_eq!(a.out_degree(sink), 0);
        assert_eq!(a.paths().filter(|p| p.to == sink).count(), 2);
    }

    #[test]
    fn wiring_from_orientation() {
        assert_eq!(SinkWiring::for_orientation(Orientation::Forward), SinkWiring::ExitsToSink);
        assert_eq!(SinkWiring::for_orientation(Orientation::Reversed), SinkWiring::SinkToExits);
    }

    #[test]
    fn distance_from_sink_is_cost_to_nearest_exit() {
        let r = reverse(&floor());
        let a = augment_with_sink(&r, &[LocationId(1), LocationId(2)]).unwrap();
        let t = shortest_path_tree(&a, a.sink().unwrap()).unwrap();
        assert_eq!(t.distance(LocationId(0)), 3);
        assert_eq!(t.distance(LocationId(1)), 0);
        assert_eq!(t.distance(LocationId(2)), 0);
        assert_eq!(t.distance(LocationId(3)), 6);
    }

    #[test]
    fn remove_sink_restores_shape() {
        let r = reverse(&floor());
        let a = augment_with_sink(&r, &[LocationId(1), LocationId(1)]).unwrap();
        assert_eq!(a.edge_count(), r.edge_count() + 2);
        let back = remove_sink(&a).unwrap();
        assert_eq!(back.location_count(), r.location_count());
        assert!(back.sink().is_none());
        assert_eq!(edge_multiset(&back), edge_multiset(&r));
    }

    #[test]
    fn misuse_is_reported() {
        let g = floor();
        assert!(matches!(remove_sink(&g), Err(GraphError::NoSink)));
        let a = augment_with_sink(&g, &[LocationId(0)]).unwrap();
        assert!(matches!(
            augment_with_sink(&a, &[LocationId(0)]),
            Err(GraphError::SinkAlreadyPresent(_))
        ));
        assert!(matches!(
            augment_with_sink(&g, &[LocationId(10)]),
            Err(GraphError::LocationNotFound(LocationId(10)))
        ));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;

    use kr_core::LocationId;

    use crate::{GraphError, load_graph_csv, load_graph_readers};

    const PATHS: &str = "from,to,travel_time\n0,1,4\n0,3,2\n0,2,3\n2,3,2\n3,0,3\n";
    const KEYS: &str = "location,cost\n0,5\n3,2\n1,3\n";

    #[test]
    fn loads_from_readers() {
        let g = load_graph_readers(PATHS.as_bytes(), KEYS.as_bytes()).unwrap();
        assert_eq!(g.location_count(), 4);
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.key_count(), 3);
        assert_eq!(g.out_degree(LocationId(0)), 3);
    }

    #[test]
    fn empty_keys_file_is_fine() {
        let g = load_graph_readers(PATHS.as_bytes(), "location,cost\n".as_bytes()).unwrap();
        assert_eq!(g.key_count(), 0);
    }

    #[test]
    fn header_only_paths_rejected() {
        let err = load_graph_readers("from,to,travel_time\n".as_bytes(), KEYS.as_bytes());
        assert!(matches!(err, Err(GraphError::NoPaths)));
    }

    #[test]
    fn negative_travel_time_rejected() {
        let bad = "from,to,travel_time\n0,1,-4\n";
        let err = load_graph_readers(bad.as_bytes(), KEYS.as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Parse(_)));
    }

    #[test]
    fn malformed_key_row_rejected() {
        let bad = "location,cost\nzero,5\n";
        let err = load_graph_readers(PATHS.as_bytes(), bad.as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Parse(ref msg) if msg.starts_with("keys")));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = dir.path().join("paths.csv");
        let keys = dir.path().join("keys.csv");
        std::fs::File::create(&paths).unwrap().write_all(PATHS.as_bytes()).unwrap();
        std::fs::File::create(&keys).unwrap().write_all(KEYS.as_bytes()).unwrap();

        let g = load_graph_csv(&paths, &keys).unwrap();
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_graph_csv(&dir.path().join("nope.csv"), &dir.path().join("keys.csv"));
        assert!(matches!(err, Err(GraphError::Io(_))));
    }
}
