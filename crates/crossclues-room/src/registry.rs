//! Room registry: creates, tracks, and routes operations to rooms.

use std::collections::HashMap;
use std::sync::Arc;

use crossclues_protocol::{GameStateView, PlayerName, RoomCode, RoomInfo};
use tokio::sync::RwLock;

use crate::{GridSize, Room, RoomError, WordCatalog};

/// A room behind its own lock, shared between the registry and whichever
/// request is currently operating on it.
pub type SharedRoom = Arc<RwLock<Room>>;

/// Owns every active room.
///
/// Locking is two-level. The map lock is held only long enough to insert,
/// look up, or clear; room work happens under that room's own lock after
/// the map lock is released. No operation holds two room locks, and none
/// takes the map lock while holding a room lock, so there is no ordering
/// hazard. Mutations take the room's write lock; [`get_state`] and
/// [`room_info`] take the read lock.
///
/// There is no global instance: the server constructs one and shares it
/// through an `Arc`, and tests build as many independent ones as they like.
///
/// [`get_state`]: Self::get_state
/// [`room_info`]: Self::room_info
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomCode, SharedRoom>>,
    catalog: Arc<WordCatalog>,
}

impl RoomRegistry {
    /// Creates an empty registry using the built-in word catalog.
    pub fn new() -> Self {
        Self::with_catalog(WordCatalog::builtin())
    }

    /// Creates an empty registry drawing clue words from `catalog`.
    pub fn with_catalog(catalog: WordCatalog) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Creates a room with `first_player` seated and dealt in.
    ///
    /// The existence check and the insert happen under one write lock,
    /// so two racing creates for the same code can't both succeed.
    pub async fn create_room(
        &self,
        code: RoomCode,
        grid_size: GridSize,
        first_player: PlayerName,
    ) -> Result<RoomInfo, RoomError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&code) {
            return Err(RoomError::AlreadyExists(code));
        }

        let room = Room::new(
            code.clone(),
            grid_size,
            first_player,
            &self.catalog,
            &mut rand::rng(),
        )?;
        let info = room.info();
        rooms.insert(code, Arc::new(RwLock::new(room)));

        tracing::info!(
            room_code = %info.room_code,
            grid_size = %grid_size,
            rooms = rooms.len(),
            "room created"
        );
        Ok(info)
    }

    /// Looks a room up. The map lock is released before this returns.
    pub async fn find(&self, code: &RoomCode) -> Result<SharedRoom, RoomError> {
        self.rooms
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    /// Seats `player` in the room; returns how many cards they were dealt.
    pub async fn join_room(
        &self,
        code: &RoomCode,
        player: PlayerName,
    ) -> Result<usize, RoomError> {
        let shared = self.find(code).await?;
        let mut room = shared.write().await;
        room.join(player)
    }

    /// Removes `player` from the room, returning their cards to the deck.
    pub async fn leave_room(
        &self,
        code: &RoomCode,
        player: &PlayerName,
    ) -> Result<(), RoomError> {
        let shared = self.find(code).await?;
        let mut room = shared.write().await;
        room.leave(player)
    }

    /// Starts or restarts the game in a room.
    pub async fn start_game(&self, code: &RoomCode) -> Result<(), RoomError> {
        let shared = self.find(code).await?;
        let mut room = shared.write().await;
        room.start(&self.catalog, &mut rand::rng())
    }

    /// Plays `player`'s card for `(row, column)`. Returns whether the game
    /// is now over.
    pub async fn submit_guess(
        &self,
        code: &RoomCode,
        player: &PlayerName,
        row: usize,
        column: usize,
        correct: bool,
    ) -> Result<bool, RoomError> {
        let shared = self.find(code).await?;
        let mut room = shared.write().await;
        room.submit_guess(player, row, column, correct)
    }

    /// The room as `player` sees it.
    pub async fn get_state(
        &self,
        code: &RoomCode,
        player: &PlayerName,
    ) -> Result<GameStateView, RoomError> {
        let shared = self.find(code).await?;
        let room = shared.read().await;
        room.snapshot(player)
    }

    /// Public metadata for one room.
    pub async fn room_info(&self, code: &RoomCode) -> Result<RoomInfo, RoomError> {
        let shared = self.find(code).await?;
        let room = shared.read().await;
        Ok(room.info())
    }

    /// Drops every room. Meant for tests and maintenance.
    pub async fn clear_all(&self) {
        let mut rooms = self.rooms.write().await;
        let dropped = rooms.len();
        rooms.clear();
        tracing::info!(rooms = dropped, "all rooms cleared");
    }

    /// Returns the number of active rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Lists all active room codes, sorted.
    pub async fn room_codes(&self) -> Vec<RoomCode> {
        let mut codes: Vec<RoomCode> =
            self.rooms.read().await.keys().cloned().collect();
        codes.sort();
        codes
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
