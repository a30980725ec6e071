//! HTTP server startup

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::config::Config;
use crate::dashboard::{create_router, AppState};
use crate::launcher::{Launcher, TokioSpawner};
use crate::storage::HubDb;

/// Open the configured database, or `None` when no path is set.
pub fn open_storage(config: &Config) -> anyhow::Result<Option<Arc<HubDb>>> {
    match &config.storage.database {
        Some(path) => {
            let db = HubDb::open(path)?;
            info!(path = %path.display(), "Storage ready");
            Ok(Some(Arc::new(db)))
        }
        None => {
            warn!("No database configured; pages will show setup instructions");
            Ok(None)
        }
    }
}

/// Build the full application. Must run inside a tokio runtime.
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let db = open_storage(config)?;
    let launcher = Launcher::start(config.launcher.clone(), Arc::new(TokioSpawner));
    let state = Arc::new(AppState::new(db, config.device.device_type, launcher));
    Ok(create_router(state, &config.server.static_dir))
}

/// Serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let app = build_app(&config)?;

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Hub listening on http://{}", listener.local_addr()?);
    info!("Device type: {}", config.device.device_type.as_str());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
