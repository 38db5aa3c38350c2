//! Error types for the room layer.

use crossclues_protocol::{PlayerName, RoomCode};

/// Errors that can occur during room operations.
///
/// Every variant is a deterministic rejection: the operation was invalid
/// for the room's current state and nothing was changed. None of them
/// are worth retrying unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// A room with this code already exists.
    #[error("room {0} already exists")]
    AlreadyExists(RoomCode),

    /// The player name is already taken in this room.
    #[error("player {0} already in room {1}")]
    AlreadyInRoom(PlayerName, RoomCode),

    /// The player is not in this room.
    #[error("player {0} not in room {1}")]
    PlayerNotInRoom(PlayerName, RoomCode),

    /// Starting needs at least two players.
    #[error("room {room} needs at least {needed} players to start, has {players}")]
    NotEnoughPlayers {
        room: RoomCode,
        players: usize,
        needed: usize,
    },

    /// Guesses are only accepted once the game has started.
    #[error("game in room {0} has not started")]
    GameNotStarted(RoomCode),

    /// Every cell is resolved; the room must be restarted.
    #[error("game in room {0} is already over")]
    GameOver(RoomCode),

    /// The player holds no card for the guessed cell.
    #[error("player {player} has no card for cell ({row}, {column})")]
    NoCardForCell {
        player: PlayerName,
        row: usize,
        column: usize,
    },

    /// Board size outside the playable range.
    #[error("grid size {0} must be between 3 and 7")]
    InvalidGridSize(usize),

    /// The coordinate is not on this room's board.
    #[error("cell ({row}, {column}) is outside the {grid_size}x{grid_size} grid")]
    CellOutOfBounds {
        row: usize,
        column: usize,
        grid_size: usize,
    },

    /// The word catalog can't fill the requested rows and columns
    /// without repeating a word.
    #[error("word catalog has {available} words, {needed} needed")]
    CatalogTooSmall { needed: usize, available: usize },
}
