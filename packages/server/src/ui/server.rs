//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc};

use tokio::{
    net::{TcpListener, TcpSocket},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use crate::{config::ServerConfig, usecase::ChatService};

use super::{connection::handle_connection, error::ServerError, http};

/// Line-oriented TCP chat server
///
/// Owns the shared chat state and accepts connections until the shutdown
/// future resolves.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run(shutdown_signal()).await?;
/// ```
pub struct Server {
    config: ServerConfig,
    service: Arc<ChatService>,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        let service = Arc::new(ChatService::new(config.history_size));
        Self { config, service }
    }

    /// Shared chat state, for inspection while the server runs
    pub fn service(&self) -> Arc<ChatService> {
        self.service.clone()
    }

    /// Bind the configured addresses and serve until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if an address cannot be resolved or bound. Errors on
    /// individual connections are logged and never end the server.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let addr = resolve(&self.config.host, self.config.port).await?;
        let listener = bind_listener(addr, self.config.backlog)?;

        let http_listener = match self.config.http_port {
            Some(port) => {
                let addr = resolve(&self.config.host, port).await?;
                let listener = TcpListener::bind(addr)
                    .await
                    .map_err(|source| ServerError::Bind { addr, source })?;
                Some(listener)
            }
            None => None,
        };

        self.serve(listener, http_listener, shutdown).await
    }

    /// Serve on already bound listeners. Used by `run` and by tests binding
    /// port 0.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        http_listener: Option<TcpListener>,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let token = CancellationToken::new();
        let settings = self.config.connection_settings();

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        let http_task = match http_listener {
            Some(http_listener) => {
                tracing::info!(
                    "Admin API listening on http://{}/api",
                    http_listener.local_addr()?
                );
                Some(tokio::spawn(http::serve(
                    http_listener,
                    self.service.clone(),
                    token.clone(),
                )))
            }
            None => None,
        };
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        connections.spawn(handle_connection(
                            stream,
                            peer,
                            self.service.clone(),
                            settings,
                            token.clone(),
                        ));
                    }
                    Err(e) => tracing::error!("Failed to accept connection: {}", e),
                },
                Some(finished) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = finished {
                        tracing::error!("Connection task failed: {}", e);
                    }
                }
            }
        }

        tracing::info!("Shutting down, closing {} connection(s)", connections.len());
        drop(listener);
        token.cancel();
        while let Some(finished) = connections.join_next().await {
            if let Err(e) = finished {
                tracing::error!("Connection task failed: {}", e);
            }
        }
        if let Some(task) = http_task {
            task.await?.map_err(ServerError::Http)?;
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Bind a listening socket with an explicit backlog
pub fn bind_listener(addr: SocketAddr, backlog: u32) -> Result<TcpListener, ServerError> {
    let bind = || -> std::io::Result<TcpListener> {
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        socket.listen(backlog)
    };
    bind().map_err(|source| ServerError::Bind { addr, source })
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    tokio::net::lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| ServerError::Resolve {
            host: host.to_string(),
            port,
        })
}
