//! # CrossClues
//!
//! Server for CrossClues, a cooperative word-grid guessing game.
//!
//! A room deals each player cards naming cells of a square grid whose
//! rows and columns are labelled with clue words. Players give one-word
//! clues for their cards and record whether the table guessed the cell.
//! The game is over once every cell is settled.
//!
//! The game itself lives in [`crossclues_room`]; this crate serves a
//! [`RoomRegistry`] over WebSocket, one JSON
//! [`Envelope`](crossclues_protocol::Envelope) per request and per reply.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crossclues::prelude::*;
//!
//! # async fn run() -> Result<(), CrossCluesError> {
//! let server = CrossCluesServer::builder()
//!     .config(ServerConfig::from_env()?)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{BIND_ENV, IDLE_TIMEOUT_ENV, ServerConfig};
pub use error::CrossCluesError;
pub use server::{CrossCluesServer, CrossCluesServerBuilder};

pub use crossclues_protocol as protocol;
pub use crossclues_room as room;
pub use crossclues_room::RoomRegistry;
pub use crossclues_transport as transport;

/// Everything needed to run a server or talk to one.
pub mod prelude {
    pub use crate::{
        CrossCluesError, CrossCluesServer, CrossCluesServerBuilder,
        ServerConfig,
    };
    pub use crossclues_protocol::{
        Card, CellView, Codec, Envelope, GameStateView, JsonCodec, Payload,
        PlayerName, Request, Response, RoomCode, RoomInfo,
    };
    pub use crossclues_room::{GridSize, RoomError, RoomRegistry, WordCatalog};
}
