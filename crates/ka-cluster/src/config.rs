//! Cluster connection settings, loadable from TOML or environment.

use serde::Deserialize;

/// Service-account mount used when running inside a pod.
pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// How to reach and authenticate against the Kubernetes API server.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// API server base URL (e.g., "https://10.96.0.1:443").
    #[serde(default)]
    pub api_url: Option<String>,
    /// Bearer token. Takes precedence over `token_file`.
    #[serde(default)]
    pub token: Option<String>,
    /// Path to a file holding the bearer token.
    #[serde(default)]
    pub token_file: Option<String>,
    /// PEM bundle used to verify the API server certificate.
    #[serde(default)]
    pub ca_cert_path: Option<String>,
    /// Skip TLS verification (local clusters only).
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            token_file: None,
            ca_cert_path: None,
            accept_invalid_certs: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClusterConfig {
    /// Build from process environment only.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay `KUBE_*` variables, then fill gaps from the in-cluster
    /// service account when `KUBERNETES_SERVICE_HOST` is present.
    pub fn with_env_overrides(self) -> Self {
        let in_cluster = std::path::Path::new(SERVICE_ACCOUNT_DIR).exists();
        self.apply_env(|key| std::env::var(key).ok(), in_cluster)
    }

    fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>, in_cluster: bool) -> Self {
        if let Some(url) = lookup("KUBE_API_URL") {
            self.api_url = Some(url);
        }
        if let Some(token) = lookup("KUBE_TOKEN") {
            self.token = Some(token);
        }
        if let Some(path) = lookup("KUBE_TOKEN_FILE") {
            self.token_file = Some(path);
        }
        if let Some(path) = lookup("KUBE_CA_CERT") {
            self.ca_cert_path = Some(path);
        }
        if let Some(secs) = lookup("KUBE_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = secs;
        }

        if self.api_url.is_none() {
            if let Some(host) = lookup("KUBERNETES_SERVICE_HOST") {
                let port = lookup("KUBERNETES_SERVICE_PORT").unwrap_or_else(|| "443".into());
                let host = if host.contains(':') {
                    format!("[{host}]")
                } else {
                    host
                };
                self.api_url = Some(format!("https://{host}:{port}"));
                if in_cluster {
                    if self.token.is_none() && self.token_file.is_none() {
                        self.token_file = Some(format!("{SERVICE_ACCOUNT_DIR}/token"));
                    }
                    if self.ca_cert_path.is_none() {
                        self.ca_cert_path = Some(format!("{SERVICE_ACCOUNT_DIR}/ca.crt"));
                    }
                }
            }
        }
        self
    }
}
