use std::error::Error;
use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tram_server::catalog::Catalog;
use tram_server::planner::PlannerConfig;
use tram_server::poll::{PollConfig, Poller};
use tram_server::signal::{LiveSignalClient, MockSignalSource, SignalBackend, SignalClientConfig};
use tram_server::web::{AppState, create_router};

const DEFAULT_CATALOG: &str = "data/lines.json";
const DEFAULT_BIND: &str = "127.0.0.1:3001";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A bad catalog is fatal
    let catalog_path = std::env::var("TRAM_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG.into());
    let catalog = Catalog::load(&catalog_path)?;
    if catalog.is_empty() {
        warn!(path = %catalog_path, "catalog has no lines; every plan will be empty");
    }

    let backend = match std::env::var("TRAM_MOCK_DIR") {
        Ok(dir) => {
            let mock = MockSignalSource::load_dir(&dir)?;
            info!(dir = %dir, stops = mock.available_stops().await.len(), "using mock signal");
            SignalBackend::Mock(mock)
        }
        Err(_) => {
            let mut config = SignalClientConfig::default();
            if let Ok(url) = std::env::var("TRAM_SIGNAL_URL") {
                config = config.with_base_url(url);
            }
            info!(base_url = %config.base_url, "using live signal");
            SignalBackend::Live(LiveSignalClient::new(config)?)
        }
    };

    let poller = Poller::new(backend, &PollConfig::default());
    let state = AppState::new(catalog, poller, PlannerConfig::default());
    let app = create_router(state);

    let bind = std::env::var("TRAM_BIND").unwrap_or_else(|_| DEFAULT_BIND.into());
    let addr: SocketAddr = bind.parse()?;

    info!(%addr, "tram planner listening");
    info!("  GET  /health  - Health check");
    info!("  GET  /lines   - Line catalog");
    info!("  POST /plan    - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
