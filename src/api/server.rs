//! HTTP Server
//!
//! Binds the management API router to a TCP listener and runs it until the
//! process is stopped.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::settings::Settings;
use crate::store::ConfigStore;
use crate::types::Result;

/// Run the management API server until shutdown
pub async fn serve(settings: &Settings, store: Arc<ConfigStore>) -> Result<()> {
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        reference_policy = ?settings.reference_policy,
        "management API listening"
    );

    let app = super::router(store);
    axum::serve(listener, app).await?;

    Ok(())
}
