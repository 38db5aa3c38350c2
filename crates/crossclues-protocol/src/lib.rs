//! Wire protocol for CrossClues.
//!
//! This crate defines the "language" that clients and the server
//! speak:
//!
//! - **Identity types** ([`RoomCode`], [`PlayerName`]): the two string
//!   keys every operation is addressed by.
//! - **Game views** ([`Card`], [`CellView`], [`GameStateView`],
//!   [`RoomInfo`]): what a player is allowed to see of a room.
//! - **Messages** ([`Envelope`], [`Payload`], [`Request`], [`Response`]):
//!   the request/response structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the room
//! core (game rules). It doesn't know about connections or locks; it
//! only knows how to serialize and deserialize messages.
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope) → Room core (RoomRegistry)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Card, CellView, Envelope, GameStateView, Payload, PlayerName, Request,
    Response, RoomCode, RoomInfo,
};
