use axum::{Extension, Router, routing::get};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{Mutex, oneshot},
    task::JoinHandle,
};

use crate::{Res, api, config::Config, error, types::PendingAuth, warning};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub async fn start_api_server(
    config: Config,
    state: Arc<Mutex<PendingAuth>>,
    shutdown: oneshot::Receiver<()>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .fallback(api::not_found)
        .layer(Extension(config.clone()))
        .layer(Extension(state));

    let listener = match tokio::net::TcpListener::bind(config.server_address.as_str()).await {
        Ok(listener) => listener,
        Err(e) => error!(
            "Failed to bind callback server on {}: {}",
            config.server_address, e
        ),
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.await;
        })
        .await?;

    Ok(())
}

pub async fn stop_api_server(server: &mut JoinHandle<Res<()>>, shutdown: oneshot::Sender<()>) {
    // A server that already exited has dropped its receiver; that is fine.
    let _ = shutdown.send(());

    match tokio::time::timeout(SHUTDOWN_GRACE, &mut *server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warning!("Callback server error: {}", e),
        Ok(Err(e)) => {
            if !e.is_cancelled() {
                warning!("Callback server task failed: {}", e);
            }
        }
        Err(_) => {
            server.abort();
            warning!(
                "Callback server did not stop within {:?}; aborted.",
                SHUTDOWN_GRACE
            );
        }
    }
}
