//! E2E tests for error paths: each failure class maps to its own status
//! and code, and later stages are never reached.

mod helpers;

use axum::http::StatusCode;

use helpers::TestHarness;
use ka_cluster::MockCluster;
use ka_dispatch::MockClassifier;

/// Cluster client failed at startup: 503 and the classifier is never asked.
#[tokio::test]
async fn e2e_cluster_unavailable() {
    let h = TestHarness::new(None, MockClassifier::replying("count the nodes"));

    let (status, json) = h.ask("how many nodes?").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "cluster_unavailable");
    assert_eq!(json["status"], 503);
    assert_eq!(json["error"], "Kubernetes client not initialized");
    assert_eq!(h.classifier.calls(), 0);
}

/// Health stays 200 while reporting the degraded cluster.
#[tokio::test]
async fn e2e_health_while_cluster_unavailable() {
    let h = TestHarness::new(None, MockClassifier::replying("nodes"));
    let (status, json) = h.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cluster"], "unavailable");
}

#[tokio::test]
async fn e2e_classifier_failure() {
    let h = TestHarness::new(
        Some(MockCluster::with_sample_data()),
        MockClassifier::failing("connection reset by peer"),
    );

    let (status, json) = h.ask("how many nodes?").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "classifier_failure");
    assert_eq!(json["error"], "Intent classifier error occurred");
    assert_eq!(h.cluster_calls(), 0);
}

/// Non-not-found cluster errors are terminal and their detail stays in the log.
#[tokio::test]
async fn e2e_cluster_failure_is_internal_error() {
    let mut cluster = MockCluster::with_sample_data();
    cluster.fail_with("etcdserver: request timed out");
    let h = TestHarness::new(Some(cluster), MockClassifier::replying("count the nodes"));

    let (status, json) = h.ask("how many nodes?").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "internal_error");
    assert_eq!(json["error"], "An unexpected error occurred");
    assert!(!json.to_string().contains("etcdserver"));
}

#[tokio::test]
async fn e2e_malformed_body() {
    let h = TestHarness::replying("nodes");

    let (status, json) = h.post_raw(r#"{"query": "#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "bad_request");
    assert_eq!(h.classifier.calls(), 0);
}

#[tokio::test]
async fn e2e_wrong_query_type() {
    let h = TestHarness::replying("nodes");
    let (status, json) = h.post_raw(r#"{"query": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "bad_request");
}

/// A missing `query` field is treated as an empty question.
#[tokio::test]
async fn e2e_missing_query_field() {
    let h = TestHarness::replying("");
    let (status, json) = h.post_raw("{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "");
    assert_eq!(json["answer"], "Query not recognized.");
}

#[tokio::test]
async fn e2e_unknown_route() {
    let h = TestHarness::replying("nodes");
    let (status, _) = h.get("/pods").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
