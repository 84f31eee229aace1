//! Intent-to-action dispatcher for kubeask.
//!
//! Turns a classified question into exactly one read-only cluster query
//! and a templated answer:
//!
//! classifier → `router::route` → `extract` → `catalog::execute` → `format::answer`
//!
//! `QueryPipeline` sequences the steps and owns failure translation.

pub mod catalog;
pub mod classifier;
pub mod extract;
pub mod format;
pub mod mock;
pub mod pipeline;
pub mod router;

pub use catalog::QueryResult;
pub use classifier::{ClassifyError, EchoClassifier, IntentClassifier};
pub use extract::{MissingParameter, extract};
pub use mock::MockClassifier;
pub use pipeline::{PipelineError, QueryPipeline};
pub use router::route;
