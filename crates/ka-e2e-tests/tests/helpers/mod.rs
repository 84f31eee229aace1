//! Shared test harness for E2E integration tests.
//!
//! Wires the real router, pipeline, router rules and catalog to mock
//! backends so every request crosses all crate boundaries.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ka_api::routes::build_router;
use ka_api::state::AppState;
use ka_cluster::{ClusterClient, MockCluster};
use ka_dispatch::{IntentClassifier, MockClassifier, QueryPipeline};

pub struct TestHarness {
    pub router: Router,
    /// `None` when the harness simulates a failed cluster client.
    pub cluster: Option<Arc<MockCluster>>,
    pub classifier: Arc<MockClassifier>,
}

impl TestHarness {
    pub fn new(cluster: Option<MockCluster>, classifier: MockClassifier) -> Self {
        let cluster = cluster.map(Arc::new);
        let classifier = Arc::new(classifier);
        let router = router_for(
            cluster.clone().map(|c| c as Arc<dyn ClusterClient>),
            classifier.clone(),
        );
        Self {
            router,
            cluster,
            classifier,
        }
    }

    /// Sample cluster; the classifier always answers `analysis`.
    pub fn replying(analysis: &str) -> Self {
        Self::new(
            Some(MockCluster::with_sample_data()),
            MockClassifier::replying(analysis),
        )
    }

    pub fn cluster_calls(&self) -> usize {
        self.cluster.as_ref().map_or(0, |c| c.calls())
    }

    /// POST /query with `{"query": ...}`.
    pub async fn ask(&self, query: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "query": query }).to_string();
        self.post_raw(&body).await
    }

    /// POST /query with an arbitrary body.
    pub async fn post_raw(&self, body: &str) -> (StatusCode, serde_json::Value) {
        send(
            &self.router,
            Request::post("/query")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        send(&self.router, Request::get(uri).body(Body::empty()).unwrap()).await
    }
}

pub fn router_for(
    cluster: Option<Arc<dyn ClusterClient>>,
    classifier: Arc<dyn IntentClassifier>,
) -> Router {
    build_router(AppState::new(QueryPipeline::new(cluster, classifier)))
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// POST /query against any router.
pub async fn ask(router: &Router, query: &str) -> (StatusCode, serde_json::Value) {
    send(
        router,
        Request::post("/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "query": query }).to_string()))
            .unwrap(),
    )
    .await
}
