//! Server configuration, loadable from TOML with environment overrides.

use std::str::FromStr;

use ka_cluster::ClusterConfig;
use serde::Deserialize;

/// Which backend classifies question intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    /// OpenAI-compatible `/chat/completions` endpoint.
    #[default]
    OpenAi,
    /// AWS Bedrock Converse API.
    Bedrock,
    /// No model: the question is its own analysis.
    Echo,
}

impl FromStr for ClassifierProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "bedrock" => Ok(Self::Bedrock),
            "echo" => Ok(Self::Echo),
            other => anyhow::bail!("unknown classifier provider: {other}"),
        }
    }
}

/// Intent classifier settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub provider: ClassifierProvider,
    /// Model ID. Defaults per provider when unset.
    #[serde(default)]
    pub model: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bearer key for the OpenAI-compatible API (OPENAI_API_KEY).
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".into()
}
fn default_system_prompt() -> String {
    "You are a Kubernetes assistant.".into()
}
fn default_max_tokens() -> u32 {
    100
}
fn default_temperature() -> f32 {
    0.2
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::default(),
            model: None,
            api_base: default_api_base(),
            api_key: None,
            system_prompt: default_system_prompt(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClassifierConfig {
    /// Configured model, or the provider's default.
    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, ClassifierProvider::Bedrock) => "us.amazon.nova-lite-v1:0",
            (None, _) => "gpt-3.5-turbo",
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve an in-memory sample cluster instead of a real one.
    #[serde(default)]
    pub demo: bool,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            demo: false,
            classifier: ClassifierConfig::default(),
            cluster: ClusterConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// File (if given) overlaid with environment variables.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let mut config = base.apply_env(|key| std::env::var(key).ok())?;
        config.cluster = config.cluster.with_env_overrides();
        Ok(config)
    }

    fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        if let Some(host) = lookup("KUBEASK_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("KUBEASK_PORT") {
            self.port = port.parse()?;
        }
        if let Some(demo) = lookup("KUBEASK_DEMO") {
            self.demo = demo.eq_ignore_ascii_case("true") || demo == "1";
        }
        if let Some(provider) = lookup("CLASSIFIER_PROVIDER") {
            self.classifier.provider = provider.parse()?;
        }
        if let Some(model) = lookup("CLASSIFIER_MODEL") {
            self.classifier.model = Some(model);
        }
        if let Some(base) = lookup("CLASSIFIER_API_BASE") {
            self.classifier.api_base = base;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.classifier.api_key = Some(key);
        }
        if let Some(secs) = lookup("CLASSIFIER_TIMEOUT_SECS") {
            self.classifier.timeout_secs = secs.parse()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(!config.demo);
        assert_eq!(config.classifier.provider, ClassifierProvider::OpenAi);
        assert_eq!(config.classifier.model(), "gpt-3.5-turbo");
        assert_eq!(config.classifier.system_prompt, "You are a Kubernetes assistant.");
        assert_eq!(config.classifier.max_tokens, 100);
        assert!((config.classifier.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn bedrock_default_model() {
        let config = ClassifierConfig {
            provider: ClassifierProvider::Bedrock,
            ..ClassifierConfig::default()
        };
        assert_eq!(config.model(), "us.amazon.nova-lite-v1:0");
    }

    #[test]
    fn deserialize_minimal_toml() {
        let config: ApiConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.classifier.timeout_secs, 10);
        assert_eq!(config.cluster.timeout_secs, 10);
    }

    #[test]
    fn deserialize_full_toml() {
        let toml = r#"
host = "127.0.0.1"
port = 8080
demo = true

[classifier]
provider = "bedrock"
model = "anthropic.claude-3-haiku-20240307-v1:0"
timeout_secs = 4

[cluster]
api_url = "https://10.0.0.1:6443"
token_file = "/etc/kubeask/token"
"#;
        let config: ApiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.demo);
        assert_eq!(config.classifier.provider, ClassifierProvider::Bedrock);
        assert_eq!(config.classifier.model(), "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(config.classifier.timeout_secs, 4);
        assert_eq!(config.cluster.api_url.as_deref(), Some("https://10.0.0.1:6443"));
    }

    #[test]
    fn env_overrides() {
        let config = ApiConfig::default()
            .apply_env(env(&[
                ("KUBEASK_PORT", "9999"),
                ("CLASSIFIER_PROVIDER", "echo"),
                ("OPENAI_API_KEY", "sk-test"),
                ("KUBEASK_DEMO", "1"),
            ]))
            .unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.classifier.provider, ClassifierProvider::Echo);
        assert_eq!(config.classifier.api_key.as_deref(), Some("sk-test"));
        assert!(config.demo);
    }

    #[test]
    fn bad_env_values_rejected() {
        assert!(
            ApiConfig::default()
                .apply_env(env(&[("KUBEASK_PORT", "http")]))
                .is_err()
        );
        assert!(
            ApiConfig::default()
                .apply_env(env(&[("CLASSIFIER_PROVIDER", "gemini")]))
                .is_err()
        );
    }
}
