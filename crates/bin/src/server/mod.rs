//! HTTP dashboard server.

mod handlers;
mod router;
mod state;

pub(crate) use router::create_router;
pub(crate) use state::AppState;

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Bind `addr` and serve the dashboard until Ctrl-C.
pub(crate) async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("eurenew dashboard running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
