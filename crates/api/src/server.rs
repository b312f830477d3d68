//! Listener setup and graceful shutdown.

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

/// Bind address for the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 3001)
    }
}

/// Serves `router` on `config` until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error when the address cannot be bound or serving fails.
pub async fn serve(router: Router, config: &ServerConfig) -> anyhow::Result<()> {
    let address = config.socket_addr();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Stopped");
    Ok(())
}

/// Resolves on the first termination signal. A signal source that cannot be
/// installed never resolves.
async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(error) => {
                tracing::warn!("Ctrl-C handler unavailable: {}", error);
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(error) => {
                tracing::warn!("SIGTERM handler unavailable: {}", error);
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    tracing::info!(signal = received, "Shutting down");
}
