//! WebSocket transport implementation using `tokio-tungstenite`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// How long a new TCP connection has to complete the WebSocket upgrade.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

type WsStream = WebSocketStream<TcpStream>;

/// A WebSocket-based [`Transport`] that listens for incoming connections.
///
/// Upgrades run in their own tasks, so a client that opens a socket and
/// never finishes the handshake cannot hold up anyone else's accept.
pub struct WebSocketTransport {
    listener: TcpListener,
    handshakes: JoinSet<Result<WebSocketConnection, TransportError>>,
    handshake_timeout: Duration,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    ///
    /// Use port 0 to let the OS pick one; [`local_addr`](Transport::local_addr)
    /// reports what was chosen.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        Ok(Self {
            listener,
            handshakes: JoinSet::new(),
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        })
    }

    /// Sets how long a new connection may take to upgrade before it is
    /// dropped. Default: [`DEFAULT_HANDSHAKE_TIMEOUT`].
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Number of upgrades currently in flight.
    pub fn pending_handshakes(&self) -> usize {
        self.handshakes.len()
    }
}

/// Performs the WebSocket upgrade on a freshly accepted TCP stream.
async fn upgrade(
    stream: TcpStream,
    addr: SocketAddr,
    timeout: Duration,
) -> Result<WebSocketConnection, TransportError> {
    let ws = match tokio::time::timeout(
        timeout,
        tokio_tungstenite::accept_async(stream),
    )
    .await
    {
        Ok(Ok(ws)) => ws,
        Ok(Err(e)) => {
            return Err(TransportError::AcceptFailed(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                e,
            )));
        }
        Err(_) => {
            return Err(TransportError::AcceptFailed(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("handshake from {addr} timed out"),
            )));
        }
    };

    let id = ConnectionId::new(
        NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
    );
    tracing::debug!(%id, %addr, "accepted WebSocket connection");

    let (sink, stream) = ws.split();
    Ok(WebSocketConnection {
        id,
        peer: addr,
        sink: Mutex::new(sink),
        stream: Mutex::new(stream),
    })
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;
    type Error = TransportError;

    /// Returns the next connection that completed its upgrade.
    ///
    /// Failed or timed-out upgrades are logged and skipped. Cancel-safe:
    /// dropping the future loses neither accepted sockets nor finished
    /// upgrades.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (stream, addr) =
                        accepted.map_err(TransportError::AcceptFailed)?;
                    self.handshakes.spawn(upgrade(
                        stream,
                        addr,
                        self.handshake_timeout,
                    ));
                }
                Some(done) = self.handshakes.join_next() => match done {
                    Ok(Ok(conn)) => return Ok(conn),
                    Ok(Err(e)) => {
                        tracing::debug!(error = %e, "WebSocket handshake failed");
                    }
                    Err(e) => {
                        return Err(TransportError::AcceptFailed(
                            std::io::Error::other(e),
                        ));
                    }
                },
            }
        }
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// A single WebSocket connection.
///
/// The socket is split so that the read half and the write half are
/// locked independently.
pub struct WebSocketConnection {
    id: ConnectionId,
    peer: SocketAddr,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    /// UTF-8 payloads (our JSON) go out as text frames; anything else
    /// as binary.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let msg = match std::str::from_utf8(data) {
            Ok(text) => Message::Text(text.to_owned().into()),
            Err(_) => Message::Binary(data.to_vec().into()),
        };
        self.sink.lock().await.send(msg).await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.sink.lock().await.close().await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    fn id(&self) -> ConnectionId {
        self.id
    }

    fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}
