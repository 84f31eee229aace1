//! Cluster client abstraction: read-only access to the control plane.

use async_trait::async_trait;

use crate::error::ClusterResult;
use crate::types::{Deployment, Namespace, Node, Pod, ResourceQuota, Service};

/// Namespace assumed by every namespaced query.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Read-only operations kubeask needs from a Kubernetes control plane.
///
/// Implemented by `KubeApiClient` (REST) and `MockCluster` (in-memory).
/// Reads of a single named object return `ClusterError::NotFound` when the
/// object does not exist.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List pods in a namespace, optionally filtered by a label selector.
    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> ClusterResult<Vec<Pod>>;

    async fn list_nodes(&self) -> ClusterResult<Vec<Node>>;

    async fn read_pod(&self, namespace: &str, name: &str) -> ClusterResult<Pod>;

    /// Full log text of the pod's (default) container.
    async fn read_pod_log(&self, namespace: &str, name: &str) -> ClusterResult<String>;

    async fn list_deployments(&self, namespace: &str) -> ClusterResult<Vec<Deployment>>;

    async fn read_deployment(&self, namespace: &str, name: &str) -> ClusterResult<Deployment>;

    async fn list_services(&self, namespace: &str) -> ClusterResult<Vec<Service>>;

    async fn list_namespaces(&self) -> ClusterResult<Vec<Namespace>>;

    async fn list_resource_quotas(&self, namespace: &str) -> ClusterResult<Vec<ResourceQuota>>;
}
