use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cardex_ingest::{BatchLimits, BatchProcessor};
use cardex_ocr::{MockRecognizer, OcrBackend, OcrmypdfBackend, StatementPipeline};
use cardex_server::config::{OcrSelection, ServerConfig};
use cardex_server::{app, AppState};
use cardex_storage::create_db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cardex=info,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let pool = create_db(&config.db_path).await?;

    let backend: Arc<dyn OcrBackend> = match config.ocr {
        OcrSelection::Ocrmypdf => Arc::new(OcrmypdfBackend::new()),
        OcrSelection::Mock => Arc::new(MockRecognizer::new(Vec::new())),
    };
    let pipeline = StatementPipeline::new(backend).with_timeout(config.ocr_timeout);
    let processor = BatchProcessor::new(
        pipeline,
        pool.clone(),
        BatchLimits { max_file_bytes: config.max_file_bytes },
    );

    let state = AppState { pool, processor: Arc::new(processor) };
    let router = app(state);

    tracing::info!(bind = %config.bind, db = %config.db_path.display(), "starting cardex-server");
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
