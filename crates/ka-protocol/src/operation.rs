use serde::{Deserialize, Serialize};

/// Identifies one read-only cluster inspection the service knows how to run.
///
/// Declaration order mirrors the router's rule precedence, with
/// `Unrecognized` last as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationId {
    ListPodsInNamespace,
    ListNodes,
    PodStatus,
    ListDeployments,
    ListServices,
    PodLogs,
    ListNamespaces,
    DescribeDeployment,
    ListNodeNames,
    ResourceQuota,
    ListRunningPods,
    ListPodsByLabel,
    Unrecognized,
}

/// The kind of entity an operation needs pulled out of the raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    PodName,
    DeploymentName,
    LabelSelector,
}

impl ParameterKind {
    /// Phrase that precedes the entity in the query text.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::PodName => "pod named ",
            Self::DeploymentName => "deployment named ",
            Self::LabelSelector => "label ",
        }
    }
}

impl OperationId {
    /// Every recognized operation, in router precedence order.
    pub const RECOGNIZED: [OperationId; 12] = [
        Self::ListPodsInNamespace,
        Self::ListNodes,
        Self::PodStatus,
        Self::ListDeployments,
        Self::ListServices,
        Self::PodLogs,
        Self::ListNamespaces,
        Self::DescribeDeployment,
        Self::ListNodeNames,
        Self::ResourceQuota,
        Self::ListRunningPods,
        Self::ListPodsByLabel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListPodsInNamespace => "list_pods_in_namespace",
            Self::ListNodes => "list_nodes",
            Self::PodStatus => "pod_status",
            Self::ListDeployments => "list_deployments",
            Self::ListServices => "list_services",
            Self::PodLogs => "pod_logs",
            Self::ListNamespaces => "list_namespaces",
            Self::DescribeDeployment => "describe_deployment",
            Self::ListNodeNames => "list_node_names",
            Self::ResourceQuota => "resource_quota",
            Self::ListRunningPods => "list_running_pods",
            Self::ListPodsByLabel => "list_pods_by_label",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ListPodsInNamespace => "Count pods in the default namespace",
            Self::ListNodes => "Count nodes in the cluster",
            Self::PodStatus => "Report the phase of a named pod",
            Self::ListDeployments => "Count deployments in the default namespace",
            Self::ListServices => "Count services in the default namespace",
            Self::PodLogs => "Show the first 200 characters of a named pod's log",
            Self::ListNamespaces => "Count namespaces in the cluster",
            Self::DescribeDeployment => "Show replica count and strategy of a named deployment",
            Self::ListNodeNames => "List node names",
            Self::ResourceQuota => "Show hard limits of the default namespace's resource quota",
            Self::ListRunningPods => "Count Running pods in the default namespace",
            Self::ListPodsByLabel => {
                "Count pods matching a label selector in the default namespace"
            }
            Self::Unrecognized => "Fallback when no rule matches",
        }
    }

    /// Entity the operation needs from the raw query, if any.
    pub fn parameter(&self) -> Option<ParameterKind> {
        match self {
            Self::PodStatus | Self::PodLogs => Some(ParameterKind::PodName),
            Self::DescribeDeployment => Some(ParameterKind::DeploymentName),
            Self::ListPodsByLabel => Some(ParameterKind::LabelSelector),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
