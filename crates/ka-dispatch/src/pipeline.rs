//! Request orchestration: availability check → classify → route →
//! execute → format.

use std::sync::Arc;

use ka_cluster::{ClusterClient, ClusterError};
use ka_protocol::QueryResponse;
use thiserror::Error;

use crate::catalog;
use crate::classifier::{ClassifyError, IntentClassifier};
use crate::format;
use crate::router;

/// Failures that end a request without an answer.
///
/// Not-found entities, missing names and unrecognized intents are not
/// errors; they come back as ordinary answer text.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cluster client not initialized")]
    ClusterUnavailable,

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifyError),

    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),
}

/// Answers cluster questions. Holds no per-request state, so one instance
/// serves concurrent requests.
pub struct QueryPipeline {
    /// `None` when the cluster client failed to initialize at startup.
    cluster: Option<Arc<dyn ClusterClient>>,
    classifier: Arc<dyn IntentClassifier>,
}

impl QueryPipeline {
    pub fn new(
        cluster: Option<Arc<dyn ClusterClient>>,
        classifier: Arc<dyn IntentClassifier>,
    ) -> Self {
        Self {
            cluster,
            classifier,
        }
    }

    pub fn cluster_available(&self) -> bool {
        self.cluster.is_some()
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Answer one question.
    pub async fn answer(&self, query: &str) -> Result<QueryResponse, PipelineError> {
        let Some(cluster) = self.cluster.as_deref() else {
            tracing::error!("cluster client not initialized");
            return Err(PipelineError::ClusterUnavailable);
        };

        let analysis = self.classifier.classify(query).await.map_err(|e| {
            tracing::error!(
                classifier = self.classifier.name(),
                error = %e,
                "classification failed"
            );
            e
        })?;
        tracing::info!(analysis = %analysis, "classifier analysis");

        let operation = router::route(&analysis);
        tracing::info!(operation = %operation, "operation selected");

        let result = catalog::execute(cluster, operation, query)
            .await
            .map_err(|e| {
                tracing::error!(operation = %operation, error = %e, "cluster query failed");
                e
            })?;

        let answer = format::answer(operation, &result);
        tracing::info!(answer = %answer, "generated answer");

        Ok(QueryResponse {
            query: query.to_string(),
            answer,
        })
    }
}
