//! AWS Bedrock classifier using the model-agnostic Converse API
//! (Nova Lite, Claude, etc.).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput, InferenceConfiguration, Message,
    SystemContentBlock,
};
use ka_dispatch::{ClassifyError, IntentClassifier};
use tokio::time::timeout;

use crate::config::ClassifierConfig;

pub struct BedrockClassifier {
    client: BedrockClient,
    config: ClassifierConfig,
}

impl BedrockClassifier {
    /// Create a classifier with a pre-built Bedrock client.
    pub fn new(client: BedrockClient, config: ClassifierConfig) -> Self {
        Self { client, config }
    }

    async fn call_converse(&self, query: &str) -> Result<String, ClassifyError> {
        let user_message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(query.to_string()))
            .build()
            .map_err(|e| ClassifyError::Config(format!("failed to build message: {e}")))?;

        let inference = InferenceConfiguration::builder()
            .max_tokens(i32::try_from(self.config.max_tokens).unwrap_or(i32::MAX))
            .temperature(self.config.temperature)
            .build();

        let response = self
            .client
            .converse()
            .model_id(self.config.model())
            .system(SystemContentBlock::Text(self.config.system_prompt.clone()))
            .messages(user_message)
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| ClassifyError::Http(format!("bedrock converse error: {e}")))?;

        let blocks = match response.output() {
            Some(ConverseOutput::Message(msg)) => msg.content(),
            _ => return Err(ClassifyError::EmptyResponse),
        };

        first_text(blocks).ok_or(ClassifyError::EmptyResponse)
    }
}

/// First non-blank text block, trimmed. Blank text yields `""`; `None`
/// only when the reply carries no text block at all.
fn first_text(blocks: &[ContentBlock]) -> Option<String> {
    let mut texts = blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(t) => Some(t.trim()),
            _ => None,
        })
        .peekable();
    texts.peek()?;
    Some(texts.find(|t| !t.is_empty()).unwrap_or_default().to_string())
}

#[async_trait]
impl IntentClassifier for BedrockClassifier {
    async fn classify(&self, query: &str) -> Result<String, ClassifyError> {
        let limit = Duration::from_secs(self.config.timeout_secs);
        match timeout(limit, self.call_converse(query)).await {
            Ok(Ok(text)) => {
                tracing::debug!(
                    model = self.config.model(),
                    analysis = %text,
                    "bedrock classification"
                );
                Ok(text)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.timeout_secs,
                    "bedrock classification timed out"
                );
                Err(ClassifyError::Timeout(self.config.timeout_secs))
            }
        }
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}
