//! Shared application state for the Axum server.

use std::sync::Arc;

use ka_cluster::MockCluster;
use ka_dispatch::{EchoClassifier, QueryPipeline};

/// Cheap to clone; every handler shares one pipeline.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
}

impl AppState {
    pub fn new(pipeline: QueryPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// In-memory sample cluster answered by the echo classifier.
    pub fn with_sample_data() -> Self {
        Self::new(QueryPipeline::new(
            Some(Arc::new(MockCluster::with_sample_data())),
            Arc::new(EchoClassifier::new()),
        ))
    }
}
