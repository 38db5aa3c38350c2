//! Unified error type for the CrossClues server.

use crossclues_protocol::ProtocolError;
use crossclues_room::RoomError;
use crossclues_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CrossCluesError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A game rule rejected the operation.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {key}={value}")]
    Config { key: &'static str, value: String },
}
