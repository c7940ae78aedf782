//! End-to-end runs against an in-memory cluster

mod common;

use common::*;
use oadp_must_gather::services::TIMEOUT_TEXT;
use oadp_must_gather::{GatherConfig, GatherError, GatherKind, MustGather};
use std::sync::Arc;

async fn run(
    query: FixtureQuery,
    config: GatherConfig,
) -> Result<oadp_must_gather::GatherOutcome, GatherError> {
    MustGather::new(Arc::new(query), config).run().await
}

#[tokio::test]
async fn test_healthy_run() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run(FixtureQuery::healthy_cluster(), config(dir.path()))
        .await
        .unwrap();

    assert_eq!(outcome.cluster_id, CLUSTER_ID_SHORT);
    assert_eq!(outcome.root, cluster_dir(dir.path()));
    assert!(!outcome.timed_out);
    assert_eq!(
        outcome.summary,
        cluster_dir(dir.path()).join("oadp-must-gather-summary.md")
    );

    let summary = std::fs::read_to_string(&outcome.summary).unwrap();
    assert!(summary.starts_with("# OADP must-gather summary version `test`"));
    assert!(summary.contains("| 0a1b2c3d | 4.16.3 | AWS | linux/amd64 | linux/arm64 |"));
}

#[tokio::test]
async fn test_empty_cluster_version_aborts_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster().without(GatherKind::ClusterVersion);

    let err = run(query, config(dir.path())).await.unwrap_err();
    assert!(matches!(err, GatherError::Missing(GatherKind::ClusterVersion)));
    assert!(!dir.path().join("clusters").exists());
}

#[tokio::test]
async fn test_foundational_error_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster().failing(
        GatherKind::Infrastructure,
        "infrastructures.config.openshift.io is forbidden",
    );

    let err = run(query, config(dir.path())).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to collect Infrastructure: infrastructures.config.openshift.io is forbidden"
    );
    assert!(!dir.path().join("clusters").exists());
}

#[tokio::test]
async fn test_cluster_version_error_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster().failing(
        GatherKind::ClusterVersion,
        "clusterversions.config.openshift.io is forbidden",
    );

    let err = run(query, config(dir.path())).await.unwrap_err();
    match err {
        GatherError::Foundational { kind, ref cause } => {
            assert_eq!(kind, GatherKind::ClusterVersion);
            assert_eq!(cause, "clusterversions.config.openshift.io is forbidden");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!dir.path().join("clusters").exists());
}

#[tokio::test]
async fn test_short_cluster_id_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster()
        .without(GatherKind::ClusterVersion)
        .with(
            GatherKind::ClusterVersion,
            vec![cluster_version("abc", "4.16.3")],
        );

    let err = run(query, config(dir.path())).await.unwrap_err();
    assert!(matches!(err, GatherError::InvalidClusterId(ref id) if id == "abc"));
    assert!(!dir.path().join("clusters").exists());
}

#[tokio::test]
async fn test_empty_nodes_degrade_without_abort() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster().without(GatherKind::Node);

    let outcome = run(query, config(dir.path())).await.unwrap();
    let summary = std::fs::read_to_string(outcome.summary).unwrap();
    assert!(summary.contains("| 0a1b2c3d | 4.16.3 | AWS | ❌ error |"));
    assert!(summary.contains("⚠️ No Node was found in the cluster"));
}

#[tokio::test]
async fn test_degraded_kinds_do_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster()
        .failing(
            GatherKind::DataProtectionApplication,
            "the server could not find the requested resource",
        )
        .failing(GatherKind::StorageClass, "connection reset by peer");

    let outcome = run(query, config(dir.path())).await.unwrap();
    let summary = std::fs::read_to_string(outcome.summary).unwrap();
    assert!(summary.contains(
        "❌ Unable to collect DataProtectionApplication: the server could not find the requested resource"
    ));
    assert!(summary.contains("⚠️ Unable to collect StorageClass: connection reset by peer"));
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    run(FixtureQuery::healthy_cluster(), config(first.path()))
        .await
        .unwrap();
    run(FixtureQuery::healthy_cluster(), config(second.path()))
        .await
        .unwrap();

    let first_tree = read_tree(first.path());
    assert!(!first_tree.is_empty());
    assert_eq!(first_tree, read_tree(second.path()));

    // Re-running into the same directory replaces files in place
    run(FixtureQuery::healthy_cluster(), config(first.path()))
        .await
        .unwrap();
    assert_eq!(first_tree, read_tree(first.path()));
}

#[tokio::test]
async fn test_deadline_still_emits_report() {
    let dir = tempfile::tempdir().unwrap();
    let query = FixtureQuery::healthy_cluster().stalled(GatherKind::DataProtectionApplication);
    let config = GatherConfig {
        timeout_seconds: Some(1),
        ..config(dir.path())
    };

    let outcome = run(query, config).await.unwrap();
    assert!(outcome.timed_out);

    let summary = std::fs::read_to_string(outcome.summary).unwrap();
    assert!(summary.contains(
        "❌ Unable to collect DataProtectionApplication: run deadline exceeded while waiting for the API server"
    ));
    assert!(summary.contains("❌ Run deadline exceeded before every resource was collected"));
    assert!(!summary.contains("<<"));
    // Every section was populated by a snapshot, so nothing needed the filler
    assert!(!summary.contains(TIMEOUT_TEXT));
}
