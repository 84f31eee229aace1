//! Read-only Kubernetes control-plane access for kubeask.
//!
//! Provides the `ClusterClient` abstraction, a REST implementation talking
//! to the API server (`KubeApiClient`), and an in-memory `MockCluster`
//! for tests and local development.

pub mod client;
pub mod config;
pub mod error;
pub mod kube;
pub mod mock;
pub mod selector;
pub mod types;

// Re-export key types for convenience
pub use client::{ClusterClient, DEFAULT_NAMESPACE};
pub use config::ClusterConfig;
pub use error::{ClusterError, ClusterResult};
pub use kube::KubeApiClient;
pub use mock::MockCluster;
pub use selector::LabelSelector;
pub use types::{Deployment, Namespace, Node, ObjectMeta, Pod, ResourceQuota, Service};
