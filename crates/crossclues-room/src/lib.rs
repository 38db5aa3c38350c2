//! Room registry and game state machine for CrossClues.
//!
//! Each room is guarded by its own `RwLock`; the registry holding the
//! rooms has a separate lock that is only taken to insert, look up, or
//! clear. Operations on different rooms never contend.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: owns every room, entry point for all operations
//! - [`Room`]: one game: players, hands, deck, grid, phase flags
//! - [`Deck`] / [`Hand`]: card circulation and the per-player cap policy
//! - [`Grid`]: shared truth of resolved cells and per-player projection
//! - [`WordCatalog`]: clue words rooms draw their rows and columns from
//! - [`GridSize`]: validated board dimension

mod config;
mod deck;
mod error;
mod grid;
mod registry;
mod room;
mod words;

pub use config::{
    DEFAULT_GRID_SIZE, GridSize, MAX_GRID_SIZE, MIN_GRID_SIZE,
    MIN_PLAYERS_TO_START,
};
pub use deck::{Deck, Hand, cards_per_player};
pub use error::RoomError;
pub use grid::{Cell, Grid};
pub use registry::{RoomRegistry, SharedRoom};
pub use room::Room;
pub use words::{ClueWords, WordCatalog};
