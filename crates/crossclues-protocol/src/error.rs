//! Error types for the protocol layer.
//!
//! Each crate in CrossClues defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in serialization or
//! deserialization, not in networking or game rules.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields,
    /// wrong data types, or an unknown request `type`.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded fine but is not valid at the protocol level,
    /// e.g. a client sending a `Response` payload.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
