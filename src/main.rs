/// Consultation video grant service
///
/// Serves `GET /api/v1/video/join`, returning a signed LiveKit grant for the
/// requested room and user.
use consult_video::{
    config::{LogFormat, ServerConfig},
    context::AppContext,
    error::VideoResult,
    server,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> VideoResult<()> {
    // Load configuration first; missing LiveKit credentials stop startup here
    let config = ServerConfig::from_env()?;

    init_logging(&config);

    tracing::info!("Starting consult-video v{}", env!("CARGO_PKG_VERSION"));

    let ctx = AppContext::new(config).await.map_err(|e| {
        tracing::error!("Startup failed: {}", e);
        e
    })?;

    server::serve(ctx).await?;

    Ok(())
}

fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| "info".into());

    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
