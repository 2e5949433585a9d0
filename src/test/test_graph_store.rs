
mod test {
    use rstest::rstest;

    use crate::core::*;
    use crate::error::GraphError;
    use crate::test::test_util::{flow_store, path_store};

    #[test]
    fn nodes_keep_insertion_order() {
        let mut store: GraphStore<Weight> = GraphStore::new();
        for label in ["Daisen", "Akita", "Yuzawa"] {
            store.add_node(label).expect("label is new");
        }

        let nodes: Vec<&str> = store.nodes().collect();
        assert_eq!(nodes, vec!["Daisen", "Akita", "Yuzawa"]);
        assert_eq!(store.node_id("Yuzawa"), Some(2));
    }

    #[test]
    fn duplicate_node_is_rejected_without_change() {
        let mut store: GraphStore<Weight> = GraphStore::new();
        store.add_node("A").expect("first add succeeds");

        let err = store.add_node(" A ").expect_err("duplicate must fail");

        assert_eq!(err, GraphError::DuplicateNode { label: "A".into() });
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn blank_label_is_rejected() {
        let mut store: GraphStore<Capacity> = GraphStore::new();
        assert_eq!(store.add_node("   "), Err(GraphError::InvalidLabel));
        assert!(store.is_empty());
    }

    #[test]
    fn twenty_seventh_node_exceeds_capacity() {
        let mut store: GraphStore<Weight> = GraphStore::new();
        for expected in 'A'..='Z' {
            let label = store.add_lettered_node().expect("letters A to Z fit");
            assert_eq!(label, expected.to_string());
        }

        assert_eq!(
            store.add_lettered_node(),
            Err(GraphError::CapacityExceeded { limit: 26 })
        );
        assert_eq!(
            store.add_node("Extra"),
            Err(GraphError::CapacityExceeded { limit: 26 })
        );
        assert_eq!(store.node_count(), 26);
    }

    #[test]
    fn custom_node_limit_is_respected() {
        let mut store: GraphStore<Capacity> = GraphStore::with_node_limit(2);
        store.add_node("S").expect("room for one");
        store.add_node("T").expect("room for two");
        assert_eq!(
            store.add_lettered_node(),
            Err(GraphError::CapacityExceeded { limit: 2 })
        );
    }

    #[test]
    fn lettered_node_clash_does_not_advance_counter() {
        let mut store: GraphStore<Weight> = GraphStore::new();
        store.add_node("A").expect("manual node");

        assert_eq!(
            store.add_lettered_node(),
            Err(GraphError::DuplicateNode { label: "A".into() })
        );
        assert_eq!(
            store.add_lettered_node(),
            Err(GraphError::DuplicateNode { label: "A".into() })
        );
    }

    #[test]
    fn clear_resets_letters() {
        let mut store: GraphStore<Weight> = GraphStore::new();
        store.add_lettered_node().expect("A");
        store.add_lettered_node().expect("B");
        store.add_edge("A", "B", Weight(3.0)).expect("edge");

        store.clear();

        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.add_lettered_node(), Ok("A".to_string()));
    }

    #[test]
    fn edge_to_unknown_node_leaves_edges_unchanged() {
        let mut store = path_store(&["A", "B"], &[("A", "B", 4.0)]);

        let err = store
            .add_edge("A", "Z", Weight(2.0))
            .expect_err("Z does not exist");

        assert_eq!(err, GraphError::UnknownNode { label: "Z".into() });
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.edges()[0].attr, Weight(4.0));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn non_positive_weight_is_rejected(#[case] weight: f64) {
        let mut store = path_store(&["A", "B"], &[]);
        let err = store
            .add_edge("A", "B", Weight(weight))
            .expect_err("weight must be positive");
        assert!(matches!(err, GraphError::InvalidAttribute { .. }));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut store = flow_store(&["S", "T"], &[]);
        assert_eq!(
            store.add_edge("S", "T", Capacity(0)),
            Err(GraphError::InvalidAttribute { value: "0".into() })
        );
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut store = flow_store(&["S"], &[]);
        assert_eq!(
            store.add_edge("S", "S", Capacity(3)),
            Err(GraphError::SelfLoop { label: "S".into() })
        );
    }

    #[test]
    fn undirected_readd_overwrites_either_orientation() {
        let mut store = path_store(&["A", "B"], &[("A", "B", 3.0)]);

        let edge = store.add_edge("B", "A", Weight(7.0)).expect("overwrite");

        assert_eq!(store.edge_count(), 1);
        assert_eq!(edge.attr, Weight(7.0));
        assert_eq!((edge.from.as_str(), edge.to.as_str()), ("A", "B"));
    }

    #[test]
    fn directed_edges_are_distinct_per_direction() {
        let mut store = flow_store(&["A", "B"], &[("A", "B", 3), ("B", "A", 4)]);
        assert_eq!(store.edge_count(), 2);

        store.add_edge("A", "B", Capacity(9)).expect("overwrite");

        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.edge_between("A", "B").map(|e| e.attr), Some(Capacity(9)));
        assert_eq!(store.edge_between("B", "A").map(|e| e.attr), Some(Capacity(4)));
    }

    #[rstest]
    #[case("12", Some(12.0))]
    #[case(" 2.5 ", Some(2.5))]
    #[case("0", None)]
    #[case("-1", None)]
    #[case("far", None)]
    fn weight_parses_from_text(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(raw.parse::<Weight>().ok(), expected.map(Weight));
    }

    #[rstest]
    #[case("8", Some(8))]
    #[case("0", None)]
    #[case("1.5", None)]
    #[case("-2", None)]
    fn capacity_parses_from_text(#[case] raw: &str, #[case] expected: Option<u64>) {
        assert_eq!(raw.parse::<Capacity>().ok(), expected.map(Capacity));
    }

    #[test]
    fn whole_weights_display_without_fraction() {
        assert_eq!(Weight(105.0).to_string(), "105");
        assert_eq!(Weight(2.5).to_string(), "2.5");
    }
}
