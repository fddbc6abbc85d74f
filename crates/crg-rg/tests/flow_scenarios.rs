use crg_core::Network;
use crg_core::rng::RngHandle;
use crg_graph::{barabasi_albert, path_graph, ring_of_cliques, SimpleGraph};
use crg_info::effective_information_with_eps;
use crg_rg::{causal_beta_flow, run_flow, FlowOpts, PartitionStrategy};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn ring_of_cliques_flow_shrinks_every_step() {
    init_tracing();
    let graph = ring_of_cliques(10, 10).unwrap();
    let opts = FlowOpts::with_scale_factors(vec![1.0, 2.0, 4.0]);
    let report = run_flow(&graph, &opts).unwrap();

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.beta.len(), 2);
    assert_eq!(report.ei.len(), 2);
    assert!(report.degenerate_intervals.is_empty());

    let counts = report.node_counts();
    assert_eq!(counts[0], 100);
    assert!(counts[1] < counts[0]);
    assert!(counts[2] < counts[1]);
    assert!(counts[2] >= 1);

    assert_eq!(report.records[0].strategy, PartitionStrategy::Identity);
    assert_eq!(report.records[1].strategy, PartitionStrategy::Primary);
    assert!(report.beta.iter().all(|value| value.is_finite()));
    assert!(report.classification.is_some());

    let fine_ei = effective_information_with_eps(&graph, opts.eps).unwrap();
    assert!((report.ei[0] - fine_ei).abs() < 1e-12);
    for (ei, record) in report.ei.iter().zip(&report.records) {
        assert_eq!(*ei, record.ei);
    }
}

#[test]
fn flow_is_deterministic_for_a_seed() {
    let graph = ring_of_cliques(8, 5).unwrap();
    let opts = FlowOpts::with_scale_factors(vec![1.0, 2.0, 4.0]);
    let first = run_flow(&graph, &opts).unwrap();
    let second = run_flow(&graph, &opts).unwrap();
    assert_eq!(first.node_counts(), second.node_counts());
    assert_eq!(first.run_hash, second.run_hash);
    assert_eq!(first.provenance, second.provenance);
}

#[test]
fn repeated_node_count_leaves_nan_beta() {
    init_tracing();
    let graph = path_graph(6);
    let report = run_flow(&graph, &FlowOpts::with_scale_factors(vec![1.0, 1.0])).unwrap();
    assert_eq!(report.node_counts(), vec![6, 6]);
    assert_eq!(report.degenerate_intervals, vec![0]);
    assert!(report.beta[0].is_nan());
    assert!(report.classification.is_none());
}

#[test]
fn min_nodes_floor_keeps_small_graphs_intact() {
    let graph = path_graph(5);
    let report = run_flow(&graph, &FlowOpts::with_scale_factors(vec![1.0, 16.0])).unwrap();
    assert_eq!(report.records[1].target_nodes, 5);
    assert_eq!(report.records[1].strategy, PartitionStrategy::Identity);
    assert_eq!(report.degenerate_intervals, vec![0]);
}

#[test]
fn single_scale_factor_yields_empty_beta() {
    let report = run_flow(&path_graph(8), &FlowOpts::with_scale_factors(vec![1.0])).unwrap();
    assert_eq!(report.records.len(), 1);
    assert!(report.beta.is_empty());
    assert!(report.ei.is_empty());
    assert!(report.classification.is_none());
}

#[test]
fn edgeless_graph_falls_back_to_greedy() {
    init_tracing();
    let graph = SimpleGraph::with_nodes(10);
    let report = run_flow(&graph, &FlowOpts::with_scale_factors(vec![1.0, 2.0])).unwrap();
    assert_eq!(report.records[1].strategy, PartitionStrategy::Fallback);
    assert_eq!(report.records[1].node_count, 10);
    assert_eq!(report.degenerate_intervals, vec![0]);
    assert!(report.records.iter().all(|record| record.ei.abs() < 1e-9));
}

#[test]
fn causal_beta_flow_matches_report() {
    let graph = ring_of_cliques(6, 5).unwrap();
    let scales = [1.0, 2.0, 4.0];
    let flow = causal_beta_flow(&graph, &scales).unwrap();
    let report = run_flow(&graph, &FlowOpts::with_scale_factors(scales.to_vec())).unwrap();
    assert_eq!(flow.ei, report.ei);
    assert_eq!(flow.degenerate_intervals, report.degenerate_intervals);
    assert_eq!(flow.beta.len(), report.beta.len());
}

#[test]
fn chart_series_tracks_log_node_counts() {
    let graph = ring_of_cliques(10, 10).unwrap();
    let report = run_flow(&graph, &FlowOpts::with_scale_factors(vec![1.0, 2.0])).unwrap();
    let (scales, beta) = report.chart_series();
    assert_eq!(scales.len(), report.records.len());
    assert!((scales[0] - 2.0).abs() < 1e-12);
    assert_eq!(beta.len(), 1);
    assert_eq!(report.provenance.graph_hash, crg_graph::canonical_hash(&graph));
    assert_eq!(graph.node_count(), 100);
}

#[test]
fn scale_free_flow_collapses_and_flags_the_floor() {
    init_tracing();
    let graph = barabasi_albert(200, 3, &mut RngHandle::from_seed(42)).unwrap();
    let opts = FlowOpts::with_scale_factors(vec![1.0, 2.0, 4.0, 8.0]);
    let report = run_flow(&graph, &opts).unwrap();

    let counts = report.node_counts();
    assert_eq!(counts.len(), 4);
    assert_eq!(counts[0], 200);
    assert!(counts[1] < counts[0]);
    assert!(counts.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(report.beta.len(), 3);
    assert_eq!(report.ei.len(), 3);

    // at or below the floor every later step is an identity copy
    let floor = counts
        .iter()
        .position(|&count| count <= opts.min_nodes)
        .expect("a 200 node scale-free graph collapses within three steps");
    for record in &report.records[floor + 1..] {
        assert_eq!(record.strategy, PartitionStrategy::Identity);
        assert_eq!(record.node_count, counts[floor]);
    }

    let expected: Vec<usize> = (0..3).filter(|&i| counts[i] == counts[i + 1]).collect();
    assert_eq!(report.degenerate_intervals, expected);
    assert!(!expected.is_empty());
    for (interval, beta) in report.beta.iter().enumerate() {
        assert_eq!(beta.is_nan(), expected.contains(&interval));
    }
    assert!(report.classification.is_none());
}
