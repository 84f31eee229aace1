//! OpenAI-compatible chat completions classifier.
//!
//! Posts `{model, messages, max_tokens, temperature}` to
//! `{api_base}/chat/completions` and returns the first choice's content.
//! Works against any server speaking the same wire format.

use std::time::Duration;

use async_trait::async_trait;
use ka_dispatch::{ClassifyError, IntentClassifier};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct OpenAiClassifier {
    client: reqwest::Client,
    config: ClassifierConfig,
}

impl OpenAiClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl IntentClassifier for OpenAiClassifier {
    async fn classify(&self, query: &str) -> Result<String, ClassifyError> {
        let body = ChatRequest {
            model: self.config.model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifyError::Timeout(self.config.timeout_secs)
            } else {
                ClassifyError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|env| env.error.message)
                .unwrap_or(text);
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClassifyError::Timeout(self.config.timeout_secs)
            } else {
                ClassifyError::Decode(e.to_string())
            }
        })?;

        // Blank content is still an answer; it routes to Unrecognized.
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(ClassifyError::EmptyResponse)?;

        tracing::debug!(model = self.config.model(), analysis = %content, "openai classification");
        Ok(content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Helper: build a chat completions response body.
    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    fn classifier_for(server: &MockServer, timeout_secs: u64) -> OpenAiClassifier {
        OpenAiClassifier::new(ClassifierConfig {
            api_base: format!("{}/v1", server.uri()),
            api_key: Some("sk-test".into()),
            timeout_secs,
            ..ClassifierConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 100,
                "messages": [
                    {"role": "system", "content": "You are a Kubernetes assistant."},
                    {"role": "user", "content": "how many nodes?"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("  The user wants to count the nodes.\n")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let analysis = classifier_for(&server, 2)
            .classify("how many nodes?")
            .await
            .unwrap();
        assert_eq!(analysis, "The user wants to count the nodes.");
    }

    #[tokio::test]
    async fn error_status_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = classifier_for(&server, 2)
            .classify("how many nodes?")
            .await
            .unwrap_err();
        match err {
            ClassifyError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = classifier_for(&server, 2).classify("hi").await.unwrap_err();
        assert!(matches!(err, ClassifyError::EmptyResponse));
    }

    #[tokio::test]
    async fn blank_content_is_empty_analysis() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
            .mount(&server)
            .await;

        let analysis = classifier_for(&server, 2).classify("hi").await.unwrap();
        assert_eq!(analysis, "");
    }

    #[tokio::test]
    async fn null_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let err = classifier_for(&server, 2).classify("hi").await.unwrap_err();
        assert!(matches!(err, ClassifyError::EmptyResponse));
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = classifier_for(&server, 2).classify("hi").await.unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("nodes"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = classifier_for(&server, 1).classify("hi").await.unwrap_err();
        assert!(matches!(err, ClassifyError::Timeout(1)));
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let classifier = OpenAiClassifier::new(ClassifierConfig {
            api_base: "http://127.0.0.1:1/v1".into(),
            timeout_secs: 2,
            ..ClassifierConfig::default()
        })
        .unwrap();
        let err = classifier.classify("hi").await.unwrap_err();
        assert!(matches!(err, ClassifyError::Http(_)));
    }
}
