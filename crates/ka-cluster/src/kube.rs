//! REST client for the Kubernetes API server.
//!
//! Talks plain JSON over HTTPS with bearer-token auth. Only the handful of
//! read endpoints kubeask needs are covered; there are no watches, no
//! writes and no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::client::ClusterClient;
use crate::config::ClusterConfig;
use crate::error::{ClusterError, ClusterResult};
use crate::types::{Deployment, Namespace, Node, ObjectList, Pod, ResourceQuota, Service};

/// Upper bound on downloaded log bytes: four per character of the
/// 200-character excerpt.
const LOG_LIMIT_BYTES: &str = "800";

/// `ClusterClient` backed by the API server's REST interface.
pub struct KubeApiClient {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

/// The `Status` object the API server returns with error responses.
#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

impl KubeApiClient {
    /// Build a client from connection settings.
    ///
    /// Reads the token file and CA bundle eagerly; no request is sent.
    pub fn new(config: &ClusterConfig) -> ClusterResult<Self> {
        let api_url = config.api_url.as_deref().ok_or_else(|| {
            ClusterError::Config("no API server URL configured (set KUBE_API_URL)".into())
        })?;
        let base = Url::parse(api_url)
            .map_err(|e| ClusterError::Config(format!("invalid api_url '{api_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClusterError::Config(format!(
                "api_url '{api_url}' cannot be used as a base URL"
            )));
        }

        let token = match (&config.token, &config.token_file) {
            (Some(token), _) => Some(token.trim().to_string()),
            (None, Some(path)) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| ClusterError::Config(format!("token file {path}: {e}")))?;
                Some(contents.trim().to_string())
            }
            (None, None) => None,
        };

        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(path) = &config.ca_cert_path {
            let pem = std::fs::read(path)
                .map_err(|e| ClusterError::Config(format!("CA bundle {path}: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| ClusterError::Config(format!("CA bundle {path}: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }
        if config.accept_invalid_certs {
            tracing::warn!("TLS verification of the API server is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| ClusterError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base,
            token,
        })
    }

    /// Append path segments to the base URL, percent-encoding each one so
    /// user-supplied names cannot escape their segment.
    fn url(&self, segments: &[&str]) -> ClusterResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClusterError::Config("api_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, object: &str) -> ClusterResult<reqwest::Response> {
        tracing::debug!(url = %url, "api server request");
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClusterError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClusterError::NotFound(object.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClusterError::Api {
                status: status.as_u16(),
                message: status_message(&body),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, object: &str) -> ClusterResult<T> {
        self.get(url, object)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClusterError::Decode(e.to_string()))
    }

    async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> ClusterResult<Vec<T>> {
        let url = self.url(segments)?;
        let list: ObjectList<T> = self.get_json(url, &segments.join("/")).await?;
        Ok(list.items)
    }
}

/// Pull the human-readable message out of an API `Status` body.
fn status_message(body: &str) -> String {
    match serde_json::from_str::<ApiStatus>(body) {
        Ok(status) if !status.message.is_empty() => status.message,
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl ClusterClient for KubeApiClient {
    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> ClusterResult<Vec<Pod>> {
        let mut url = self.url(&["api", "v1", "namespaces", namespace, "pods"])?;
        if let Some(selector) = label_selector {
            url.query_pairs_mut().append_pair("labelSelector", selector);
        }
        let list: ObjectList<Pod> = self.get_json(url, namespace).await?;
        Ok(list.items)
    }

    async fn list_nodes(&self) -> ClusterResult<Vec<Node>> {
        self.list(&["api", "v1", "nodes"]).await
    }

    async fn read_pod(&self, namespace: &str, name: &str) -> ClusterResult<Pod> {
        let url = self.url(&["api", "v1", "namespaces", namespace, "pods", name])?;
        self.get_json(url, name).await
    }

    async fn read_pod_log(&self, namespace: &str, name: &str) -> ClusterResult<String> {
        let mut url = self.url(&["api", "v1", "namespaces", namespace, "pods", name, "log"])?;
        url.query_pairs_mut().append_pair("limitBytes", LOG_LIMIT_BYTES);
        self.get(url, name)
            .await?
            .text()
            .await
            .map_err(|e| ClusterError::Decode(e.to_string()))
    }

    async fn list_deployments(&self, namespace: &str) -> ClusterResult<Vec<Deployment>> {
        self.list(&["apis", "apps", "v1", "namespaces", namespace, "deployments"])
            .await
    }

    async fn read_deployment(&self, namespace: &str, name: &str) -> ClusterResult<Deployment> {
        let url = self.url(&[
            "apis",
            "apps",
            "v1",
            "namespaces",
            namespace,
            "deployments",
            name,
        ])?;
        self.get_json(url, name).await
    }

    async fn list_services(&self, namespace: &str) -> ClusterResult<Vec<Service>> {
        self.list(&["api", "v1", "namespaces", namespace, "services"])
            .await
    }

    async fn list_namespaces(&self) -> ClusterResult<Vec<Namespace>> {
        self.list(&["api", "v1", "namespaces"]).await
    }

    async fn list_resource_quotas(&self, namespace: &str) -> ClusterResult<Vec<ResourceQuota>> {
        self.list(&["api", "v1", "namespaces", namespace, "resourcequotas"])
            .await
    }
}
