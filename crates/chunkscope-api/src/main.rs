use chunkscope_api::{create_router, AppState};
use chunkscope_common::{config::ServerConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        "Starting chunkscope API server"
    );

    let app = create_router(AppState::new(&config));

    let addr = config.bind_addr();
    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
