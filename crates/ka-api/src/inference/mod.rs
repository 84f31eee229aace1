//! Network-backed intent classifiers.
//!
//! Both backends send the configured system prompt plus the raw question
//! and hand back the model's reply text verbatim. Routing happens later,
//! on that text.

pub mod bedrock;
pub mod openai;

use std::sync::Arc;

use ka_dispatch::{EchoClassifier, IntentClassifier};

pub use bedrock::BedrockClassifier;
pub use openai::OpenAiClassifier;

use crate::config::{ClassifierConfig, ClassifierProvider};

/// Build the classifier selected by `config.provider`.
pub async fn build_classifier(
    config: &ClassifierConfig,
) -> anyhow::Result<Arc<dyn IntentClassifier>> {
    let classifier: Arc<dyn IntentClassifier> = match config.provider {
        ClassifierProvider::OpenAi => {
            if config.api_key.is_none() {
                tracing::warn!("OPENAI_API_KEY not set, sending unauthenticated requests");
            }
            Arc::new(OpenAiClassifier::new(config.clone())?)
        }
        ClassifierProvider::Bedrock => {
            let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_bedrockruntime::Client::new(&sdk_config);
            Arc::new(BedrockClassifier::new(client, config.clone()))
        }
        ClassifierProvider::Echo => Arc::new(EchoClassifier::new()),
    };
    tracing::info!(
        classifier = classifier.name(),
        model = config.model(),
        "intent classifier ready"
    );
    Ok(classifier)
}
