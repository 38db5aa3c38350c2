//! Core protocol types for CrossClues' wire format.
//!
//! This module defines every type that travels "on the wire": the
//! structures that get serialized to JSON and sent over the WebSocket.
//!
//! Field names are camelCase (`roomCode`, `gameOver`, `discardedByMe`, ...),
//! the same names the game's state objects have always used.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The code a room is created under and addressed by.
///
/// Room codes are chosen by the client that creates the room, so this is
/// a newtype around `String` rather than a generated number. Wrapping it
/// means a `RoomCode` can never be passed where a [`PlayerName`] is
/// expected, even though both are strings underneath.
///
/// `#[serde(transparent)]` serializes it as the bare string: `"R1"`, not
/// `{ "0": "R1" }`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Creates a room code from anything string-like.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the code is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for RoomCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for RoomCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A player's display name, which is also their identity inside a room.
///
/// There is no authentication: whoever sends a name acts as that player.
/// Names are unique per room, not globally.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Creates a player name from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PlayerName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for PlayerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Game views
// ---------------------------------------------------------------------------

/// A card: the coordinate of one grid cell, held privately by a player.
///
/// The holder's job is to give a clue that links the row word and the
/// column word of this cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub row: usize,
    pub column: usize,
}

impl Card {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// One grid cell as seen by a particular player.
///
/// Who discarded a cell is private: a player only ever learns that *they*
/// discarded it. `discarded_by_me == false` therefore covers both "still
/// open" and "discarded by someone else"; `guessed_correctly` is the only
/// public resolution signal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub guessed_correctly: bool,
    pub discarded_by_me: bool,
}

/// A room's full state from one player's perspective.
///
/// Returned by [`Request::GetState`]. Contains the shared board (words and
/// projected grid), the phase flags, the player list, and the querying
/// player's own hand. Other players' hands are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub room_code: RoomCode,
    pub grid_size: usize,
    pub game_started: bool,
    pub game_over: bool,
    /// Cells resolved with a correct guess.
    pub correct_guesses: usize,
    /// `grid_size * grid_size`.
    pub total_cells: usize,
    pub row_words: Vec<String>,
    pub column_words: Vec<String>,
    pub player_cards: Vec<Card>,
    /// Row-major: `grid[row][column]`.
    pub grid: Vec<Vec<CellView>>,
    pub players: Vec<PlayerName>,
}

/// Public room metadata (no hands, no grid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_code: RoomCode,
    pub grid_size: usize,
    pub players: Vec<PlayerName>,
    pub game_started: bool,
    pub game_over: bool,
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// Client → Server operations.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
///   `{ "type": "JoinRoom", "roomCode": "R1", "playerName": "Ana" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Request {
    /// Create a room and join it as its first player. `grid_size` falls
    /// back to the server default when missing or 0.
    CreateRoom {
        room_code: RoomCode,
        #[serde(default)]
        grid_size: Option<usize>,
        player_name: PlayerName,
    },

    JoinRoom {
        room_code: RoomCode,
        player_name: PlayerName,
    },

    LeaveRoom {
        room_code: RoomCode,
        player_name: PlayerName,
    },

    /// Start, or restart, the game in a room.
    StartGame { room_code: RoomCode },

    /// Play the card for `(row, column)`. `correct` is the player's own
    /// report of whether the table guessed the cell; the server trusts it.
    Guess {
        room_code: RoomCode,
        player_name: PlayerName,
        row: usize,
        column: usize,
        correct: bool,
    },

    GetState {
        room_code: RoomCode,
        player_name: PlayerName,
    },
}

/// Server → Client replies. Every [`Request`] gets exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Response {
    RoomCreated {
        room_code: RoomCode,
        player_name: PlayerName,
        room: RoomInfo,
    },

    RoomJoined {
        room_code: RoomCode,
        player_name: PlayerName,
        cards_dealt: usize,
    },

    RoomLeft { room_code: RoomCode },

    GameStarted { room_code: RoomCode },

    GuessRecorded { room_code: RoomCode, game_over: bool },

    State(GameStateView),

    /// The request was rejected. `code` follows HTTP conventions
    /// (400 = bad request, 404 = not found, 409 = conflict).
    Error { code: u16, message: String },
}

// ---------------------------------------------------------------------------
// Payload / Envelope
// ---------------------------------------------------------------------------

/// The content of an envelope: a request going in or a response coming out.
///
/// `#[serde(tag = "type", content = "data")]` produces "adjacently tagged"
/// JSON:
///   `{ "type": "Request", "data": { "type": "StartGame", "roomCode": "R1" } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Payload {
    Request(Request),
    Response(Response),
}

/// The top-level message wrapper. Every frame on the wire is an Envelope.
///
/// ```text
/// ┌─────────────────────────────────┐
/// │ seq: 42                         │  ← echoed back in the reply
/// │ timestamp: 15000                │  ← ms since server start (replies)
/// │ ┌─────────────────────────────┐ │
/// │ │ payload: Request(...)       │ │
/// │ └─────────────────────────────┘ │
/// └─────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Chosen by the client. The server's reply carries the same value
    /// so the client can match responses to requests.
    pub seq: u64,

    /// Milliseconds since the server started. Clients may send 0.
    #[serde(default)]
    pub timestamp: u64,

    pub payload: Payload,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The JSON shapes are the wire contract, so the serde attributes
    //! are tested field by field.

    use super::*;

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomCode::new("R1")).unwrap();
        assert_eq!(json, "\"R1\"");
    }

    #[test]
    fn test_player_name_deserializes_from_plain_string() {
        let name: PlayerName = serde_json::from_str("\"Ana\"").unwrap();
        assert_eq!(name.as_str(), "Ana");
        assert_eq!(name.to_string(), "Ana");
    }

    #[test]
    fn test_blank_names_are_detected() {
        assert!(PlayerName::new("   ").is_blank());
        assert!(RoomCode::new("").is_blank());
        assert!(!PlayerName::new(" Bo ").is_blank());
    }

    #[test]
    fn test_card_json_uses_row_and_column() {
        let json = serde_json::to_value(Card::new(1, 2)).unwrap();
        assert_eq!(json["row"], 1);
        assert_eq!(json["column"], 2);
    }

    #[test]
    fn test_cell_view_json_is_camel_case() {
        let cell = CellView {
            guessed_correctly: true,
            discarded_by_me: false,
        };
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(json["guessedCorrectly"], true);
        assert_eq!(json["discardedByMe"], false);
    }

    #[test]
    fn test_game_state_view_json_shape() {
        let view = GameStateView {
            room_code: "R1".into(),
            grid_size: 3,
            game_started: true,
            game_over: false,
            correct_guesses: 1,
            total_cells: 9,
            row_words: vec!["SNAIL".into(), "OLD".into(), "AIR".into()],
            column_words: vec!["BUS".into(), "PEN".into(), "RAT".into()],
            player_cards: vec![Card::new(0, 1)],
            grid: vec![vec![CellView::default(); 3]; 3],
            players: vec!["Ana".into(), "Bo".into()],
        };
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["roomCode"], "R1");
        assert_eq!(json["gridSize"], 3);
        assert_eq!(json["gameStarted"], true);
        assert_eq!(json["gameOver"], false);
        assert_eq!(json["correctGuesses"], 1);
        assert_eq!(json["totalCells"], 9);
        assert_eq!(json["rowWords"][0], "SNAIL");
        assert_eq!(json["columnWords"][2], "RAT");
        assert_eq!(json["playerCards"][0]["column"], 1);
        assert_eq!(json["grid"][2][2]["discardedByMe"], false);
        assert_eq!(json["players"][1], "Bo");
    }

    #[test]
    fn test_request_create_room_json_format() {
        let req: Request = serde_json::from_str(
            r#"{"type":"CreateRoom","roomCode":"R1","gridSize":4,"playerName":"Ana"}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::CreateRoom {
                room_code: "R1".into(),
                grid_size: Some(4),
                player_name: "Ana".into(),
            }
        );
    }

    #[test]
    fn test_request_create_room_grid_size_is_optional() {
        let req: Request = serde_json::from_str(
            r#"{"type":"CreateRoom","roomCode":"R1","playerName":"Ana"}"#,
        )
        .unwrap();
        assert!(matches!(
            req,
            Request::CreateRoom { grid_size: None, .. }
        ));
    }

    #[test]
    fn test_request_guess_json_format() {
        let req = Request::Guess {
            room_code: "R1".into(),
            player_name: "Ana".into(),
            row: 2,
            column: 0,
            correct: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "Guess");
        assert_eq!(json["roomCode"], "R1");
        assert_eq!(json["playerName"], "Ana");
        assert_eq!(json["row"], 2);
        assert_eq!(json["column"], 0);
        assert_eq!(json["correct"], true);
    }

    #[test]
    fn test_request_rejects_negative_row() {
        let result: Result<Request, _> = serde_json::from_str(
            r#"{"type":"Guess","roomCode":"R1","playerName":"Ana","row":-1,"column":0,"correct":true}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_response_state_flattens_view_next_to_tag() {
        let view = GameStateView {
            room_code: "R1".into(),
            grid_size: 3,
            game_started: false,
            game_over: false,
            correct_guesses: 0,
            total_cells: 9,
            row_words: vec![],
            column_words: vec![],
            player_cards: vec![],
            grid: vec![],
            players: vec![],
        };
        let json = serde_json::to_value(Response::State(view)).unwrap();
        assert_eq!(json["type"], "State");
        assert_eq!(json["roomCode"], "R1");
        assert_eq!(json["totalCells"], 9);
    }

    #[test]
    fn test_response_error_json_format() {
        let json = serde_json::to_value(Response::Error {
            code: 404,
            message: "room R9 not found".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "room R9 not found");
    }

    #[test]
    fn test_response_joined_uses_cards_dealt() {
        let json = serde_json::to_value(Response::RoomJoined {
            room_code: "R1".into(),
            player_name: "Bo".into(),
            cards_dealt: 2,
        })
        .unwrap();
        assert_eq!(json["cardsDealt"], 2);
    }

    #[test]
    fn test_envelope_payload_is_adjacently_tagged() {
        let envelope = Envelope {
            seq: 7,
            timestamp: 0,
            payload: Payload::Request(Request::StartGame {
                room_code: "R1".into(),
            }),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["seq"], 7);
        assert_eq!(json["payload"]["type"], "Request");
        assert_eq!(json["payload"]["data"]["type"], "StartGame");
        assert_eq!(json["payload"]["data"]["roomCode"], "R1");
    }

    #[test]
    fn test_envelope_timestamp_defaults_when_missing() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"seq":1,"payload":{"type":"Request","data":{"type":"StartGame","roomCode":"R1"}}}"#,
        )
        .unwrap();
        assert_eq!(envelope.timestamp, 0);
    }
}
