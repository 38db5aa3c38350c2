//! Per-connection handler: decode requests, run them, send replies.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Receive an Envelope → decode (bad frames get a 400, not a hangup)
//!   2. Validate the request's inputs at the boundary
//!   3. Run it against the room registry
//!   4. Reply with one Envelope echoing the request's `seq`
//!
//! No game rules live here. The registry decides; this module only
//! translates between the wire and the registry's calls.

use std::sync::Arc;

use crossclues_protocol::{
    Codec, Envelope, Payload, PlayerName, ProtocolError, Request, Response,
    RoomCode,
};
use crossclues_room::{GridSize, MAX_GRID_SIZE, RoomError, RoomRegistry};
use crossclues_transport::{Connection, WebSocketConnection};

use crate::CrossCluesError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), CrossCluesError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, peer = %conn.peer_addr(), "handling new connection");

    loop {
        let data = match tokio::time::timeout(state.idle_timeout, conn.recv())
            .await
        {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Ok(Err(e)) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
            Err(_) => {
                tracing::debug!(%conn_id, "connection idle, closing");
                let _ = conn.close().await;
                break;
            }
        };

        let (seq, response) = match state.codec.decode::<Envelope>(&data) {
            Ok(Envelope {
                seq,
                payload: Payload::Request(request),
                ..
            }) => (seq, dispatch(&state.registry, request).await),
            Ok(Envelope { seq, .. }) => {
                let err = ProtocolError::InvalidMessage(
                    "expected a request".into(),
                );
                (seq, Rejection::from(err).into_response())
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode envelope");
                // Without a decodable envelope there is no seq to echo.
                (0, Rejection::from(e).into_response())
            }
        };

        let reply = Envelope {
            seq,
            timestamp: state.uptime_millis(),
            payload: Payload::Response(response),
        };
        let bytes = state.codec.encode(&reply)?;
        conn.send(&bytes).await?;
    }

    Ok(())
}

/// Runs one request against the registry. Always produces a response;
/// failures become [`Response::Error`].
pub(crate) async fn dispatch(
    registry: &RoomRegistry,
    request: Request,
) -> Response {
    match execute(registry, request).await {
        Ok(response) => response,
        Err(rejection) => {
            tracing::debug!(
                code = rejection.status(),
                reason = %rejection,
                "request rejected"
            );
            rejection.into_response()
        }
    }
}

async fn execute(
    registry: &RoomRegistry,
    request: Request,
) -> Result<Response, Rejection> {
    match request {
        Request::CreateRoom {
            room_code,
            grid_size,
            player_name,
        } => {
            require_code(&room_code)?;
            require_name(&player_name)?;
            let grid_size = GridSize::or_default(grid_size)?;
            let room = registry
                .create_room(room_code.clone(), grid_size, player_name.clone())
                .await?;
            Ok(Response::RoomCreated {
                room_code,
                player_name,
                room,
            })
        }

        Request::JoinRoom {
            room_code,
            player_name,
        } => {
            require_code(&room_code)?;
            require_name(&player_name)?;
            let cards_dealt =
                registry.join_room(&room_code, player_name.clone()).await?;
            Ok(Response::RoomJoined {
                room_code,
                player_name,
                cards_dealt,
            })
        }

        Request::LeaveRoom {
            room_code,
            player_name,
        } => {
            require_code(&room_code)?;
            require_name(&player_name)?;
            registry.leave_room(&room_code, &player_name).await?;
            Ok(Response::RoomLeft { room_code })
        }

        Request::StartGame { room_code } => {
            require_code(&room_code)?;
            registry.start_game(&room_code).await?;
            Ok(Response::GameStarted { room_code })
        }

        Request::Guess {
            room_code,
            player_name,
            row,
            column,
            correct,
        } => {
            require_code(&room_code)?;
            require_name(&player_name)?;
            require_cell(row, column)?;
            let game_over = registry
                .submit_guess(&room_code, &player_name, row, column, correct)
                .await?;
            Ok(Response::GuessRecorded {
                room_code,
                game_over,
            })
        }

        Request::GetState {
            room_code,
            player_name,
        } => {
            require_code(&room_code)?;
            require_name(&player_name)?;
            let view = registry.get_state(&room_code, &player_name).await?;
            Ok(Response::State(view))
        }
    }
}

fn require_code(code: &RoomCode) -> Result<(), Rejection> {
    if code.is_blank() {
        return Err(Rejection::BadRequest("room code is required".into()));
    }
    Ok(())
}

fn require_name(name: &PlayerName) -> Result<(), Rejection> {
    if name.is_blank() {
        return Err(Rejection::BadRequest("player name is required".into()));
    }
    Ok(())
}

/// Coordinates must fit the largest board any room can have. The room
/// checks its own size again.
fn require_cell(row: usize, column: usize) -> Result<(), Rejection> {
    if row >= MAX_GRID_SIZE || column >= MAX_GRID_SIZE {
        return Err(Rejection::BadRequest(format!(
            "row and column must be below {MAX_GRID_SIZE}, got ({row}, {column})"
        )));
    }
    Ok(())
}

/// Why a request produced an error response.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    /// Malformed input, caught before the registry was called.
    #[error("{0}")]
    BadRequest(String),

    /// The frame was not a request envelope.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Room(#[from] RoomError),
}

impl Rejection {
    fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) | Self::Protocol(_) => 400,
            Self::Room(err) => status_for(err),
        }
    }

    fn into_response(self) -> Response {
        Response::Error {
            code: self.status(),
            message: self.to_string(),
        }
    }
}

/// HTTP-style status for a game rule rejection.
pub(crate) fn status_for(err: &RoomError) -> u16 {
    match err {
        RoomError::NotFound(_) | RoomError::PlayerNotInRoom(..) => 404,
        RoomError::AlreadyExists(_) | RoomError::AlreadyInRoom(..) => 409,
        RoomError::NotEnoughPlayers { .. }
        | RoomError::GameNotStarted(_)
        | RoomError::GameOver(_)
        | RoomError::NoCardForCell { .. }
        | RoomError::InvalidGridSize(_)
        | RoomError::CellOutOfBounds { .. }
        | RoomError::CatalogTooSmall { .. } => 400,
    }
}
