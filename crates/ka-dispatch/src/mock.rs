//! Mock classifier for testing: replies with canned analysis text.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classifier::{ClassifyError, IntentClassifier};

/// A classifier that always returns the same analysis, or always fails.
pub struct MockClassifier {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl MockClassifier {
    /// Always answer with `analysis`.
    pub fn replying(analysis: impl Into<String>) -> Self {
        Self {
            reply: Ok(analysis.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with an HTTP error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `classify` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(&self, _query: &str) -> Result<String, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(ClassifyError::Http)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
