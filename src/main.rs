//! Trust & Veracity Pipeline — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the scoring pipeline, shared state,
//! and the Prometheus exporter.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use civic_trust_pipeline::api::{create_router, AppState};
use civic_trust_pipeline::config::{
    artifact_dir_from_env, lexicon_path_from_env, PipelineParams,
};
use civic_trust_pipeline::metrics::Metrics;
use civic_trust_pipeline::mismatch::CategoryLexicon;
use civic_trust_pipeline::pipeline::TrustPipeline;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("civic_trust_pipeline=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let params = PipelineParams::from_env();
    let mut pipeline = TrustPipeline::new(artifact_dir_from_env(), params);

    // Operator-supplied lexicon override; a bad file must not boot a
    // pipeline with a silently different table.
    if let Some(path) = lexicon_path_from_env() {
        let lexicon = CategoryLexicon::from_file(&path)
            .map_err(|e| anyhow::anyhow!("lexicon override {}: {e}", path.display()))?;
        pipeline = pipeline.with_lexicon(lexicon);
    }

    let metrics = Metrics::init();
    let router = create_router(AppState::new(pipeline)).merge(metrics.router());

    let addr: SocketAddr = std::env::var("TRUST_BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;

    tracing::info!(%addr, "trust pipeline listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
