//! Tests for the `Dbscan` orchestration API.

mod common;

use common::{dbscan, two_squares};
use pardbscan_core::{
    BruteForce, ClusterId, ClusterLabel, Dataset, DbscanBuilder, DbscanError, ExecutionStrategy,
    Point,
};
use pardbscan_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing::Level;

#[fixture]
fn squares() -> Dataset {
    two_squares()
}

fn cluster(id: u64) -> ClusterLabel {
    ClusterLabel::Cluster(ClusterId::new(id).expect("test ids are positive"))
}

#[rstest]
fn builder_defaults() {
    let builder = DbscanBuilder::new();
    assert_eq!(builder.epsilon(), 1.0);
    assert_eq!(builder.min_points(), 3);
    assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    assert_eq!(builder.threads(), None);

    let dbscan = builder.build().expect("defaults valid");
    assert_eq!(dbscan.params().epsilon(), 1.0);
    assert_eq!(dbscan.params().min_points().get(), 3);
    assert_eq!(dbscan.threads(), None);
}

#[rstest]
#[case::zero(0.0)]
#[case::negative(-0.5)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn builder_rejects_invalid_epsilon(#[case] epsilon: f64) {
    let err = DbscanBuilder::new()
        .with_epsilon(epsilon)
        .build()
        .expect_err("builder must reject epsilon");
    assert!(matches!(err, DbscanError::InvalidEpsilon { .. }));
}

#[rstest]
fn builder_rejects_zero_min_points() {
    let err = DbscanBuilder::new()
        .with_min_points(0)
        .build()
        .expect_err("builder must reject zero min_points");
    assert_eq!(err, DbscanError::InvalidMinPoints { got: 0 });
}

#[rstest]
fn builder_rejects_zero_threads() {
    let err = DbscanBuilder::new()
        .with_threads(Some(0))
        .build()
        .expect_err("builder must reject an empty pool");
    assert_eq!(err, DbscanError::InvalidThreadCount);
}

fn assert_two_squares(strategy: ExecutionStrategy, mut squares: Dataset) {
    let result = dbscan(0.5, 3, strategy)
        .run(&mut squares)
        .expect("run must succeed");

    let mut expected = vec![cluster(1); 4];
    expected.extend([cluster(2); 4]);
    expected.push(ClusterLabel::Noise);
    assert_eq!(result.labels(), expected.as_slice());
    assert_eq!(squares.labels().collect::<Vec<_>>(), expected);
    assert_eq!(result.cluster_count(), 2);
    assert_eq!(result.noise_count(), 1);
    assert_eq!(result.core_count(), 8);
    assert_eq!(result.noise_points(), vec![8]);
    assert_ne!(result.strategy(), ExecutionStrategy::Auto);
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::auto(ExecutionStrategy::Auto)]
fn run_labels_two_squares(#[case] strategy: ExecutionStrategy, squares: Dataset) {
    assert_two_squares(strategy, squares);
}

#[cfg(feature = "parallel")]
#[rstest]
fn parallel_run_labels_two_squares(squares: Dataset) {
    assert_two_squares(ExecutionStrategy::Parallel, squares);
}

#[rstest]
fn auto_resolves_to_compiled_engine() {
    let resolved = dbscan(1.0, 1, ExecutionStrategy::Auto)
        .resolved_strategy()
        .expect("auto always resolves");
    if cfg!(feature = "parallel") {
        assert_eq!(resolved, ExecutionStrategy::Parallel);
    } else {
        assert_eq!(resolved, ExecutionStrategy::Sequential);
    }
}

#[cfg(not(feature = "parallel"))]
#[rstest]
fn parallel_is_unavailable_without_feature(mut squares: Dataset) {
    let err = dbscan(0.5, 3, ExecutionStrategy::Parallel)
        .run(&mut squares)
        .expect_err("parallel engine is not compiled in");
    assert_eq!(
        err,
        DbscanError::BackendUnavailable {
            requested: ExecutionStrategy::Parallel,
        }
    );
    assert!(squares.labels().all(|label| label == ClusterLabel::Unclassified));
}

#[cfg(feature = "parallel")]
#[rstest]
#[case(1)]
#[case(3)]
fn dedicated_pool_matches_global_pool(#[case] threads: usize, squares: Dataset) {
    let mut on_global = squares.clone();
    let mut on_pool = squares;
    let global = dbscan(0.5, 3, ExecutionStrategy::Parallel)
        .run(&mut on_global)
        .expect("run must succeed");
    let pooled = DbscanBuilder::new()
        .with_epsilon(0.5)
        .with_min_points(3)
        .with_execution_strategy(ExecutionStrategy::Parallel)
        .with_threads(Some(threads))
        .build()
        .expect("configuration must be valid")
        .run(&mut on_pool)
        .expect("run must succeed");
    assert_eq!(global, pooled);
    assert_eq!(on_global, on_pool);
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::auto(ExecutionStrategy::Auto)]
fn empty_dataset_returns_empty_result(#[case] strategy: ExecutionStrategy) {
    let mut empty = Dataset::default();
    let (result, layer) =
        RecordingLayer::capture(|| dbscan(1.0, 1, strategy).run(&mut empty));
    let result = result.expect("empty input is valid");

    assert!(result.is_empty());
    assert_eq!(result.cluster_count(), 0);
    assert_eq!(result.noise_count(), 0);

    let run_span = layer.span_named("dbscan.run").expect("dbscan.run span must exist");
    assert_eq!(run_span.field("points"), Some("0"));
    assert!(layer.events().iter().any(|event| {
        event.level == Level::DEBUG
            && event.message() == Some("dataset is empty, nothing to cluster")
    }));
}

#[rstest]
fn single_point_is_noise() {
    let mut dataset = Dataset::from_coordinates([(3.0, 4.0)]);
    let result = dbscan(1.0, 1, ExecutionStrategy::Auto)
        .run(&mut dataset)
        .expect("run must succeed");
    assert_eq!(result.labels(), &[ClusterLabel::Noise]);
}

#[rstest]
fn cluster_with_leaves_points_untouched() {
    let points = [Point::new(0.0, 0.0), Point::new(0.5, 0.0), Point::new(0.5, 0.5)];
    let result = dbscan(1.0, 2, ExecutionStrategy::Sequential)
        .cluster_with(&BruteForce::new(&points))
        .expect("run must succeed");
    assert_eq!(result.clusters(), vec![vec![0, 1, 2]]);
    assert!(points.iter().all(|point| point.label() == ClusterLabel::Unclassified));
}

#[rstest]
fn run_records_core_tracing(mut squares: Dataset) {
    let engine = dbscan(0.5, 3, ExecutionStrategy::Sequential);
    let (result, layer) = RecordingLayer::capture(|| engine.run(&mut squares));
    result.expect("run must succeed");

    let run_span = layer.span_named("dbscan.run").expect("dbscan.run span must exist");
    assert_eq!(run_span.field("points"), Some("9"));
    assert_eq!(run_span.field("epsilon"), Some("0.5"));
    assert_eq!(run_span.field("min_points"), Some("3"));
    assert_eq!(run_span.field("strategy"), Some("Sequential"));

    let engine_span = layer
        .span_named("dbscan.sequential")
        .expect("dbscan.sequential span must exist");
    assert_eq!(engine_span.field("points"), Some("9"));

    let completed = layer.events_with_message("clustering completed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].level, Level::INFO);
    assert_eq!(completed[0].field("clusters"), Some("2"));
    assert_eq!(completed[0].field("noise"), Some("1"));
}

#[cfg(feature = "parallel")]
#[rstest]
#[case::global_pool(None)]
#[case::dedicated_pool(Some(2))]
fn parallel_run_records_phase_events(#[case] threads: Option<usize>, mut squares: Dataset) {
    let engine = DbscanBuilder::new()
        .with_epsilon(0.5)
        .with_min_points(3)
        .with_execution_strategy(ExecutionStrategy::Parallel)
        .with_threads(threads)
        .build()
        .expect("configuration must be valid");
    let (result, layer) = RecordingLayer::capture(|| engine.run(&mut squares));
    result.expect("run must succeed");

    assert!(layer.span_named("dbscan.parallel").is_some());
    let discovered = layer.events_with_message("neighbourhoods discovered");
    assert_eq!(discovered.len(), 1);
    assert_eq!(discovered[0].field("core_points"), Some("8"));
    let merged = layer.events_with_message("core points merged");
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].field("components"), Some("3"));
    assert!(layer.has_event("clustering completed"));
}
