//! Query catalog: one read-only cluster call per operation.
//!
//! Not-found answers from the cluster become `QueryResult::NotFound`;
//! every other cluster failure is returned as an error and ends the
//! request.

use std::collections::BTreeMap;

use ka_cluster::{ClusterClient, ClusterError, ClusterResult, DEFAULT_NAMESPACE};
use ka_protocol::{OperationId, ParameterKind};

use crate::extract::extract;

/// Characters of pod log returned in an excerpt.
pub const LOG_EXCERPT_CHARS: usize = 200;

/// Structured outcome of running one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Count(usize),
    /// Count of pods matching a label selector.
    LabeledCount { selector: String, count: usize },
    Names(Vec<String>),
    PodPhase { pod: String, phase: String },
    Deployment {
        name: String,
        replicas: Option<i32>,
        strategy: Option<String>,
    },
    /// Leading characters of a pod's log.
    LogExcerpt { pod: String, excerpt: String },
    /// Hard limits of the first resource quota in the namespace.
    QuotaLimits(BTreeMap<String, String>),
    NoQuota,
    NotFound { name: String },
    MissingParameter(ParameterKind),
    Unrecognized,
}

/// Map a single-object read, turning not-found into a result.
fn found_or<T>(
    result: ClusterResult<T>,
    name: &str,
    on_found: impl FnOnce(T) -> QueryResult,
) -> ClusterResult<QueryResult> {
    match result {
        Ok(value) => Ok(on_found(value)),
        Err(ClusterError::NotFound(_)) => Ok(QueryResult::NotFound {
            name: name.to_string(),
        }),
        Err(e) => Err(e),
    }
}

/// First `LOG_EXCERPT_CHARS` characters, never splitting a character.
fn excerpt(log: &str) -> String {
    log.chars().take(LOG_EXCERPT_CHARS).collect()
}

/// Run `operation` against the cluster.
///
/// Operations that need an entity pull it from `query` first; when that
/// fails the result is `MissingParameter` and the cluster is not called.
pub async fn execute(
    cluster: &dyn ClusterClient,
    operation: OperationId,
    query: &str,
) -> ClusterResult<QueryResult> {
    let param = match operation.parameter() {
        Some(kind) => match extract(query, kind) {
            Ok(value) => {
                tracing::debug!(operation = %operation, parameter = %value, "parameter extracted");
                value
            }
            Err(missing) => {
                tracing::info!(operation = %operation, error = %missing, "parameter missing");
                return Ok(QueryResult::MissingParameter(kind));
            }
        },
        None => String::new(),
    };
    let ns = DEFAULT_NAMESPACE;

    let result = match operation {
        OperationId::ListPodsInNamespace => {
            found_or(cluster.list_pods(ns, None).await, ns, |pods| {
                QueryResult::Count(pods.len())
            })?
        }
        OperationId::ListNodes => found_or(cluster.list_nodes().await, "nodes", |nodes| {
            QueryResult::Count(nodes.len())
        })?,
        OperationId::PodStatus => found_or(cluster.read_pod(ns, &param).await, &param, |pod| {
            QueryResult::PodPhase {
                phase: pod.phase().unwrap_or("Unknown").to_string(),
                pod: param.clone(),
            }
        })?,
        OperationId::ListDeployments => {
            found_or(cluster.list_deployments(ns).await, ns, |deployments| {
                QueryResult::Count(deployments.len())
            })?
        }
        OperationId::ListServices => found_or(cluster.list_services(ns).await, ns, |services| {
            QueryResult::Count(services.len())
        })?,
        OperationId::PodLogs => found_or(cluster.read_pod_log(ns, &param).await, &param, |log| {
            QueryResult::LogExcerpt {
                pod: param.clone(),
                excerpt: excerpt(&log),
            }
        })?,
        OperationId::ListNamespaces => {
            found_or(cluster.list_namespaces().await, "namespaces", |namespaces| {
                QueryResult::Count(namespaces.len())
            })?
        }
        OperationId::DescribeDeployment => found_or(
            cluster.read_deployment(ns, &param).await,
            &param,
            |deployment| QueryResult::Deployment {
                name: param.clone(),
                replicas: deployment.replicas(),
                strategy: deployment.strategy().map(String::from),
            },
        )?,
        OperationId::ListNodeNames => found_or(cluster.list_nodes().await, "nodes", |nodes| {
            QueryResult::Names(nodes.into_iter().map(|node| node.metadata.name).collect())
        })?,
        OperationId::ResourceQuota => {
            found_or(cluster.list_resource_quotas(ns).await, ns, |quotas| {
                match quotas.first() {
                    Some(quota) => QueryResult::QuotaLimits(quota.hard_limits()),
                    None => QueryResult::NoQuota,
                }
            })?
        }
        OperationId::ListRunningPods => {
            found_or(cluster.list_pods(ns, None).await, ns, |pods| {
                QueryResult::Count(pods.iter().filter(|p| p.is_running()).count())
            })?
        }
        OperationId::ListPodsByLabel => found_or(
            cluster.list_pods(ns, Some(&param)).await,
            ns,
            |pods| QueryResult::LabeledCount {
                selector: param.clone(),
                count: pods.len(),
            },
        )?,
        OperationId::Unrecognized => QueryResult::Unrecognized,
    };
    Ok(result)
}
