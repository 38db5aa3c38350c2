//! `CrossCluesServer` builder and server loop.
//!
//! This is the entry point for running a CrossClues game server. It ties
//! together the layers: transport → protocol → room registry.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossclues_protocol::{Codec, JsonCodec};
use crossclues_room::{RoomRegistry, WordCatalog};
use crossclues_transport::{
    Connection, DEFAULT_HANDSHAKE_TIMEOUT, Transport, WebSocketTransport,
};

use crate::handler::handle_connection;
use crate::{CrossCluesError, ServerConfig};

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// registry does its own locking, so nothing here needs a mutex.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) registry: Arc<RoomRegistry>,
    pub(crate) codec: C,
    pub(crate) idle_timeout: Duration,
    started: Instant,
}

impl<C: Codec> ServerState<C> {
    pub(crate) fn new(
        registry: Arc<RoomRegistry>,
        codec: C,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            codec,
            idle_timeout,
            started: Instant::now(),
        }
    }

    /// Milliseconds since the server started; stamped on every reply.
    pub(crate) fn uptime_millis(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Builder for configuring and starting a CrossClues server.
///
/// # Example
///
/// ```rust,no_run
/// use crossclues::prelude::*;
///
/// # async fn run() -> Result<(), CrossCluesError> {
/// let server = CrossCluesServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct CrossCluesServerBuilder {
    config: ServerConfig,
    catalog: Option<WordCatalog>,
    registry: Option<Arc<RoomRegistry>>,
    handshake_timeout: Duration,
}

impl CrossCluesServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            catalog: None,
            registry: None,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets how long a silent connection is kept open.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Sets how long a new socket may take to finish the WebSocket upgrade.
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Uses `catalog` instead of the built-in word list.
    ///
    /// Ignored when [`registry`](Self::registry) is also set; the
    /// registry brings its own catalog.
    pub fn word_catalog(mut self, catalog: WordCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Serves an existing registry, e.g. one a test also inspects.
    pub fn registry(mut self, registry: Arc<RoomRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Binds the listener and builds the server.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<CrossCluesServer, CrossCluesError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr)
            .await?
            .with_handshake_timeout(self.handshake_timeout);

        let registry = match (self.registry, self.catalog) {
            (Some(registry), _) => registry,
            (None, Some(catalog)) => {
                Arc::new(RoomRegistry::with_catalog(catalog))
            }
            (None, None) => Arc::new(RoomRegistry::new()),
        };

        let state = Arc::new(ServerState::new(
            registry,
            JsonCodec,
            self.config.idle_timeout,
        ));

        Ok(CrossCluesServer { transport, state })
    }
}

impl Default for CrossCluesServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A CrossClues game server bound to its listening address.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct CrossCluesServer<C: Codec = JsonCodec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl CrossCluesServer {
    /// Creates a new builder.
    pub fn builder() -> CrossCluesServerBuilder {
        CrossCluesServerBuilder::new()
    }
}

impl<C: Codec> CrossCluesServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// The registry every connection operates on.
    pub fn registry(&self) -> Arc<RoomRegistry> {
        Arc::clone(&self.state.registry)
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), CrossCluesError> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Runs the accept loop until `shutdown` completes.
    ///
    /// Each accepted connection gets its own task; WebSocket upgrades run
    /// concurrently inside the transport, so a socket that never finishes
    /// its handshake does not hold up the loop. Connections already
    /// being served are not interrupted by shutdown.
    pub async fn run_until(
        mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), CrossCluesError> {
        tracing::info!(addr = ?self.local_addr().ok(), "CrossClues server running");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    let rooms = self.state.registry.room_count().await;
                    tracing::info!(rooms, "CrossClues server shutting down");
                    return Ok(());
                }
                accepted = self.transport.accept() => match accepted {
                    Ok(conn) => {
                        let state = Arc::clone(&self.state);
                        tokio::spawn(async move {
                            let conn_id = conn.id();
                            if let Err(e) = handle_connection(conn, state).await {
                                tracing::debug!(
                                    %conn_id,
                                    error = %e,
                                    "connection ended with error"
                                );
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
            }
        }
    }
}
