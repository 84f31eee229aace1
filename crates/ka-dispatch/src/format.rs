//! Answer formatting: one fixed template per operation and outcome.

use std::collections::BTreeMap;

use ka_protocol::{OperationId, ParameterKind};

use crate::catalog::QueryResult;

pub const UNRECOGNIZED: &str = "Query not recognized.";

fn missing(kind: ParameterKind) -> &'static str {
    match kind {
        ParameterKind::PodName => "Pod name not provided in the query.",
        ParameterKind::DeploymentName => "Deployment name not provided in the query.",
        ParameterKind::LabelSelector => "Label selector not provided in the query.",
    }
}

/// Render hard limits as `k=v, k=v`, sorted by resource name.
fn limits(hard: &BTreeMap<String, String>) -> String {
    hard.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Turn an operation's result into the answer text.
pub fn answer(operation: OperationId, result: &QueryResult) -> String {
    use OperationId as Op;
    use QueryResult as R;

    match (operation, result) {
        (Op::Unrecognized, _) | (_, R::Unrecognized) => UNRECOGNIZED.to_string(),
        (_, R::MissingParameter(kind)) => missing(*kind).to_string(),

        (Op::ListPodsInNamespace, R::Count(n)) => {
            format!("There are {n} pods in the default namespace.")
        }
        (Op::ListNodes, R::Count(n)) => format!("There are {n} nodes in the cluster."),
        (Op::ListDeployments, R::Count(n)) => {
            format!("There are {n} deployments in the default namespace.")
        }
        (Op::ListServices, R::Count(n)) => {
            format!("There are {n} services in the default namespace.")
        }
        (Op::ListNamespaces, R::Count(n)) => format!("There are {n} namespaces in the cluster."),
        (Op::ListRunningPods, R::Count(n)) => {
            format!("There are {n} Running pods in the default namespace.")
        }
        (Op::ListPodsByLabel, R::LabeledCount { selector, count }) => {
            format!("There are {count} pods with label '{selector}' in the default namespace.")
        }

        (Op::PodStatus, R::PodPhase { pod, phase }) => {
            format!("The status of the pod '{pod}' is {phase}.")
        }
        (Op::PodStatus, R::NotFound { name }) => {
            format!("Pod '{name}' not found in the default namespace.")
        }

        (Op::PodLogs, R::LogExcerpt { pod, excerpt }) => {
            format!("Logs for pod '{pod}':\n{excerpt}...")
        }
        (Op::PodLogs, R::NotFound { name }) => format!("Could not fetch logs for pod '{name}'."),

        (
            Op::DescribeDeployment,
            R::Deployment {
                name,
                replicas,
                strategy,
            },
        ) => format!(
            "Deployment '{name}':\nReplicas: {}, Strategy: {}",
            or_unknown(*replicas),
            or_unknown(strategy.as_deref())
        ),
        (Op::DescribeDeployment, R::NotFound { name }) => {
            format!("Could not describe deployment '{name}'.")
        }

        (Op::ListNodeNames, R::Names(names)) => {
            format!("Nodes in the cluster: {}", names.join(", "))
        }

        (Op::ResourceQuota, R::QuotaLimits(hard)) => {
            format!("Resource quota for default namespace:\n{}", limits(hard))
        }
        (Op::ResourceQuota, R::NoQuota) => "No resource quota set.".to_string(),

        (Op::ListNodes | Op::ListNodeNames | Op::ListNamespaces, R::NotFound { name }) => {
            format!("Resource '{name}' not found in the cluster.")
        }
        // A namespaced list came back 404: the namespace itself is gone.
        (_, R::NotFound { name }) => format!("Namespace '{name}' not found."),

        (op, other) => {
            tracing::warn!(operation = %op, result = ?other, "no answer template for result");
            UNRECOGNIZED.to_string()
        }
    }
}
