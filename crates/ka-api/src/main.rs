//! kubeask: answers natural-language questions about a Kubernetes cluster.
//!
//! Usage: `kubeask [config.toml]` (or set `KUBEASK_CONFIG`).

use std::sync::Arc;

use ka_api::config::ApiConfig;
use ka_api::state::AppState;
use ka_api::{inference, routes};
use ka_cluster::{ClusterClient, KubeApiClient, MockCluster};
use ka_dispatch::QueryPipeline;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kubeask starting");

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("KUBEASK_CONFIG").ok());
    let config = ApiConfig::load(config_path.as_deref())?;

    // A missing cluster is not fatal: /query reports it per request.
    let cluster: Option<Arc<dyn ClusterClient>> = if config.demo {
        tracing::warn!("demo mode, serving an in-memory sample cluster");
        Some(Arc::new(MockCluster::with_sample_data()))
    } else {
        match KubeApiClient::new(&config.cluster) {
            Ok(client) => {
                tracing::info!("Kubernetes client initialized");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize Kubernetes client");
                None
            }
        }
    };

    let classifier = inference::build_classifier(&config.classifier).await?;
    let state = AppState::new(QueryPipeline::new(cluster, classifier));
    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("kubeask stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
