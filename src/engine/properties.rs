use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::*;

#[derive(Debug, Clone)]
enum Op {
    AddNode,
    DeleteNode(usize),
    AddEdge(usize, usize, i32),
    DeleteEdge(usize, usize),
    Rebuild(Algorithm),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::AddNode),
        1 => (0..8usize).prop_map(Op::DeleteNode),
        6 => (0..8usize, 0..8usize, -5..20i32).prop_map(|(u, v, w)| Op::AddEdge(u, v, w)),
        2 => (0..8usize, 0..8usize).prop_map(|(u, v)| Op::DeleteEdge(u, v)),
        1 => prop_oneof![Just(Algorithm::Kruskal), Just(Algorithm::Prim)].prop_map(Op::Rebuild),
    ]
}

fn apply(mst: &mut MstEngine, op: &Op) {
    match *op {
        Op::AddNode => {
            mst.add_node();
        }
        Op::DeleteNode(k) => mst.delete_node(NodeId(k)),
        Op::AddEdge(u, v, w) => mst.add_edge(NodeId(u), NodeId(v), f64::from(w)),
        Op::DeleteEdge(u, v) => mst.delete_edge(NodeId(u), NodeId(v)),
        Op::Rebuild(algorithm) => mst.build_initial_mst(algorithm.as_str()),
    }
}

/// Minimum spanning forest by greedy selection with plain component relabelling.
///
/// Returns the forest weight per component label of the final labelling,
/// keyed by node, together with the total weight and edge count.
struct Reference {
    labels: Vec<usize>,
    component_weight: Vec<f64>,
    weight: f64,
    edges: usize,
}

fn reference(node_count: usize, edges: &[Edge]) -> Reference {
    let mut labels: Vec<usize> = (0..node_count).collect();
    let mut component_weight = vec![0.0; node_count];
    let mut order: Vec<&Edge> = edges.iter().collect();
    order.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap());

    let mut weight = 0.0;
    let mut count = 0;
    for e in order {
        let (a, b) = (labels[e.u.0], labels[e.v.0]);
        if a == b {
            continue;
        }
        for l in labels.iter_mut() {
            if *l == b {
                *l = a;
            }
        }
        component_weight[a] += component_weight[b] + e.weight;
        component_weight[b] = 0.0;
        weight += e.weight;
        count += 1;
    }
    Reference {
        labels,
        component_weight,
        weight,
        edges: count,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_mutation(ops in prop::collection::vec(op(), 0..48)) {
        let mut mst = MstEngine::new(4);
        for op in &ops {
            apply(&mut mst, op);
            prop_assert_eq!(mst.check_invariants(), Ok(()), "after {:?}", op);
            prop_assert!(mst.mst_edges().len() <= mst.node_count().saturating_sub(1));
            let exact: f64 = mst.mst_edges().iter().map(|e| e.weight).sum();
            prop_assert_eq!(mst.tree_weight(), exact);
        }
    }

    #[test]
    fn kruskal_maintenance_stays_minimal(ops in prop::collection::vec(op(), 0..48)) {
        let mut mst = MstEngine::new(4);
        for op in ops.iter().filter(|op| !matches!(op, Op::Rebuild(Algorithm::Prim))) {
            apply(&mut mst, op);
            let reference = reference(mst.node_count(), &mst.graph_edges());
            prop_assert_eq!(mst.tree_weight(), reference.weight, "after {:?}", op);
            prop_assert_eq!(mst.mst_edges().len(), reference.edges);
        }
    }

    #[test]
    fn rebuilds_are_minimal(
        node_count in 1..9usize,
        raw in prop::collection::vec((0..8usize, 0..8usize, -5..20i32), 0..24),
    ) {
        let mut mst = MstEngine::new(node_count);
        for (u, v, w) in raw {
            mst.add_edge(NodeId(u % node_count), NodeId(v % node_count), f64::from(w));
        }
        let reference = reference(mst.node_count(), &mst.graph_edges());

        mst.build_initial_mst("Kruskal");
        prop_assert_eq!(mst.tree_weight(), reference.weight);
        prop_assert_eq!(mst.mst_edges().len(), reference.edges);

        mst.build_initial_mst("Prim");
        let root = reference.labels[0];
        let reachable = reference.labels.iter().filter(|l| **l == root).count();
        prop_assert_eq!(mst.tree_weight(), reference.component_weight[root]);
        prop_assert_eq!(mst.mst_edges().len(), reachable - 1);
        prop_assert_eq!(mst.check_invariants(), Ok(()));
    }

    #[test]
    fn cycle_exchange_accounting(
        path in prop::collection::vec(0..20i32, 1..7),
        extra in prop::collection::vec((0..8usize, 0..8usize, 0..20i32), 0..10),
        new_edge in (0..8usize, 0..8usize, -5..25i32),
    ) {
        let node_count = path.len() + 1;
        let mut mst = MstEngine::new(node_count);
        for (i, w) in path.iter().enumerate() {
            mst.add_edge(NodeId(i), NodeId(i + 1), f64::from(*w));
        }
        for (u, v, w) in extra {
            mst.add_edge(NodeId(u % node_count), NodeId(v % node_count), f64::from(w));
        }
        mst.build_initial_mst("Kruskal");

        let (u, v, w) = (NodeId(new_edge.0 % node_count), NodeId(new_edge.1 % node_count), f64::from(new_edge.2));
        prop_assume!(u != v && !mst.has_edge(u, v));
        prop_assert!(mst.tree().is_full(node_count));

        let before = mst.tree_weight();
        let heaviest = mst.tree().heaviest_edge_on_path(u, v).unwrap();
        mst.add_edge(u, v, w);

        if w < heaviest.weight {
            prop_assert!(mst.tree_weight() < before);
            prop_assert_eq!(mst.tree_weight(), before + w - heaviest.weight);
            prop_assert!(mst.is_tree_edge(u, v));
        } else {
            prop_assert_eq!(mst.tree_weight(), before);
            prop_assert!(!mst.is_tree_edge(u, v));
        }
    }

    #[test]
    fn delete_node_renumbers_graph_edges(
        ops in prop::collection::vec(op(), 0..32),
        k in 0..8usize,
    ) {
        let mut mst = MstEngine::new(4);
        for op in &ops {
            apply(&mut mst, op);
        }
        prop_assume!(k < mst.node_count());

        let removed = NodeId(k);
        let expected: Vec<Edge> = mst
            .graph_edges()
            .into_iter()
            .filter(|e| e.u != removed && e.v != removed)
            .map(|e| Edge::new(
                e.u.shifted_after_removal(removed).unwrap(),
                e.v.shifted_after_removal(removed).unwrap(),
                e.weight,
            ))
            .collect();
        let nodes = mst.node_count();

        mst.delete_node(removed);
        prop_assert_eq!(mst.graph_edges(), expected);
        prop_assert_eq!(mst.node_count(), nodes - 1);
        prop_assert_eq!(mst.check_invariants(), Ok(()));
    }
}

#[test]
fn random_graphs_agree_across_algorithms() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let node_count = 60;
    let mut mst = MstEngine::new(node_count);

    for i in 1..node_count {
        let j = rng.gen_range(0..i);
        mst.add_edge(NodeId(i), NodeId(j), rng.gen_range(1.0..100.0));
    }
    for _ in 0..300 {
        let u = rng.gen_range(0..node_count);
        let v = rng.gen_range(0..node_count);
        mst.add_edge(NodeId(u), NodeId(v), rng.gen_range(1.0..100.0));
    }

    let incremental = mst.tree_weight();
    mst.build_initial_mst("Prim");
    let prim = mst.tree_weight();
    mst.build_initial_mst("Kruskal");
    let kruskal = mst.tree_weight();

    assert!((prim - kruskal).abs() < 1e-6);
    assert!((incremental - kruskal).abs() < 1e-6);
    assert_eq!(mst.mst_edges().len(), node_count - 1);

    for _ in 0..100 {
        let edges = mst.graph_edges();
        let pick = edges[rng.gen_range(0..edges.len())];
        mst.delete_edge(pick.u, pick.v);
        assert_eq!(mst.check_invariants(), Ok(()));

        let mut fresh = mst.clone();
        fresh.rebuild();
        assert!((fresh.tree_weight() - mst.tree_weight()).abs() < 1e-6);
    }
}
