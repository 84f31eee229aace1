//! In-memory cluster for tests and offline development.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::{ClusterClient, DEFAULT_NAMESPACE};
use crate::error::{ClusterError, ClusterResult};
use crate::selector::LabelSelector;
use crate::types::{
    Deployment, DeploymentSpec, DeploymentStrategy, Namespace, Node, ObjectMeta, Pod, PodStatus,
    ResourceQuota, ResourceQuotaStatus, Service,
};

/// A mock cluster that serves pre-loaded objects.
///
/// Every trait call is counted. `fail_with` and `fail_with_status` make
/// every call fail; status 404 surfaces as `NotFound`, anything else as `Api`.
#[derive(Default)]
pub struct MockCluster {
    pods: Vec<Pod>,
    nodes: Vec<Node>,
    deployments: Vec<Deployment>,
    services: Vec<Service>,
    namespaces: Vec<Namespace>,
    quotas: Vec<ResourceQuota>,
    logs: HashMap<String, String>,
    failure: Option<(u16, String)>,
    calls: AtomicUsize,
}

fn meta(name: &str, namespace: Option<&str>) -> ObjectMeta {
    ObjectMeta {
        name: name.to_string(),
        namespace: namespace.map(String::from),
        ..ObjectMeta::default()
    }
}

fn in_namespace(m: &ObjectMeta, namespace: &str) -> bool {
    m.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE) == namespace
}

impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small cluster: 3 nodes, 4 pods (3 Running), 2 deployments,
    /// 2 services, 3 namespaces, one compute quota.
    pub fn with_sample_data() -> Self {
        let mut m = Self::new();
        for node in ["node-a", "node-b", "node-c"] {
            m.add_node(node);
        }
        m.add_pod("web-1", "Running", &[("app", "web"), ("tier", "frontend")]);
        m.add_pod("web-2", "Running", &[("app", "web"), ("tier", "frontend")]);
        m.add_pod("api-1", "Running", &[("app", "api"), ("tier", "backend")]);
        m.add_pod("migrate-7f2c", "Succeeded", &[("job", "migrate")]);
        m.add_deployment("web", 2, "RollingUpdate");
        m.add_deployment("api", 1, "Recreate");
        m.add_service("web");
        m.add_service("kubernetes");
        for ns in ["default", "kube-system", "monitoring"] {
            m.add_namespace(ns);
        }
        m.add_quota("compute", &[("cpu", "8"), ("memory", "16Gi"), ("pods", "20")]);
        m.add_log(
            "web-1",
            "2024-03-01T10:00:00Z GET /healthz 200\n2024-03-01T10:00:05Z GET /api/items 200\n",
        );
        m
    }

    pub fn add_pod(&mut self, name: &str, phase: &str, labels: &[(&str, &str)]) {
        let mut metadata = meta(name, Some(DEFAULT_NAMESPACE));
        metadata.labels = labels
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.pods.push(Pod {
            metadata,
            status: Some(PodStatus {
                phase: Some(phase.to_string()),
            }),
        });
    }

    pub fn add_node(&mut self, name: &str) {
        self.nodes.push(Node {
            metadata: meta(name, None),
        });
    }

    pub fn add_deployment(&mut self, name: &str, replicas: i32, strategy: &str) {
        self.deployments.push(Deployment {
            metadata: meta(name, Some(DEFAULT_NAMESPACE)),
            spec: Some(DeploymentSpec {
                replicas: Some(replicas),
                strategy: Some(DeploymentStrategy {
                    type_: Some(strategy.to_string()),
                }),
            }),
        });
    }

    pub fn add_service(&mut self, name: &str) {
        self.services.push(Service {
            metadata: meta(name, Some(DEFAULT_NAMESPACE)),
        });
    }

    pub fn add_namespace(&mut self, name: &str) {
        self.namespaces.push(Namespace {
            metadata: meta(name, None),
        });
    }

    pub fn add_quota(&mut self, name: &str, hard: &[(&str, &str)]) {
        let hard: BTreeMap<String, String> = hard
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.quotas.push(ResourceQuota {
            metadata: meta(name, Some(DEFAULT_NAMESPACE)),
            spec: None,
            status: Some(ResourceQuotaStatus {
                hard,
                used: BTreeMap::new(),
            }),
        });
    }

    /// Set the log text served for a pod. The pod must also be added.
    pub fn add_log(&mut self, pod: &str, text: impl Into<String>) {
        self.logs.insert(pod.to_string(), text.into());
    }

    /// Make every subsequent call fail with an `Api` error.
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.fail_with_status(500, message);
    }

    /// Make every subsequent call fail as the API server would with `status`.
    pub fn fail_with_status(&mut self, status: u16, message: impl Into<String>) {
        self.failure = Some((status, message.into()));
    }

    /// Number of trait calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> ClusterResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some((404, message)) => Err(ClusterError::NotFound(message.clone())),
            Some((status, message)) => Err(ClusterError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClusterClient for MockCluster {
    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> ClusterResult<Vec<Pod>> {
        self.enter()?;
        let selector = match label_selector {
            Some(s) => LabelSelector::parse(s).map_err(|e| ClusterError::Api {
                status: 400,
                message: e.to_string(),
            })?,
            None => LabelSelector::default(),
        };
        Ok(self
            .pods
            .iter()
            .filter(|p| in_namespace(&p.metadata, namespace))
            .filter(|p| selector.matches(&p.metadata.labels))
            .cloned()
            .collect())
    }

    async fn list_nodes(&self) -> ClusterResult<Vec<Node>> {
        self.enter()?;
        Ok(self.nodes.clone())
    }

    async fn read_pod(&self, namespace: &str, name: &str) -> ClusterResult<Pod> {
        self.enter()?;
        self.pods
            .iter()
            .find(|p| p.metadata.name == name && in_namespace(&p.metadata, namespace))
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(name.to_string()))
    }

    async fn read_pod_log(&self, namespace: &str, name: &str) -> ClusterResult<String> {
        let pod = self.read_pod(namespace, name).await?;
        Ok(self
            .logs
            .get(&pod.metadata.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_deployments(&self, namespace: &str) -> ClusterResult<Vec<Deployment>> {
        self.enter()?;
        Ok(self
            .deployments
            .iter()
            .filter(|d| in_namespace(&d.metadata, namespace))
            .cloned()
            .collect())
    }

    async fn read_deployment(&self, namespace: &str, name: &str) -> ClusterResult<Deployment> {
        self.enter()?;
        self.deployments
            .iter()
            .find(|d| d.metadata.name == name && in_namespace(&d.metadata, namespace))
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(name.to_string()))
    }

    async fn list_services(&self, namespace: &str) -> ClusterResult<Vec<Service>> {
        self.enter()?;
        Ok(self
            .services
            .iter()
            .filter(|s| in_namespace(&s.metadata, namespace))
            .cloned()
            .collect())
    }

    async fn list_namespaces(&self) -> ClusterResult<Vec<Namespace>> {
        self.enter()?;
        Ok(self.namespaces.clone())
    }

    async fn list_resource_quotas(&self, namespace: &str) -> ClusterResult<Vec<ResourceQuota>> {
        self.enter()?;
        Ok(self
            .quotas
            .iter()
            .filter(|q| in_namespace(&q.metadata, namespace))
            .cloned()
            .collect())
    }
}
