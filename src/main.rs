use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing::info;
use docket_intake::{create_router, utils::logger::init_logging, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::from_env()?;

    // Initialize tracing, stdout plus the optional log file
    let _guard = init_logging(&settings)?;
    info!(
        "Configuration loaded: app={} env={} debug={}",
        settings.app_name, settings.app_env, settings.debug
    );

    // Uploads land here, make sure it exists before accepting any
    settings.ensure_upload_dir()?;

    let host: IpAddr = settings
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid HOST {:?}: {}", settings.host, e))?;
    let addr = SocketAddr::new(host, settings.port);

    // Create shared state and router
    let state = AppState { settings };
    let app = create_router(state);

    // Start server
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
