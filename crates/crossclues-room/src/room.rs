//! A single room's game state and the operations that change it.
//!
//! `Room` itself is plain data with `&mut self` methods; it has no lock
//! of its own. [`RoomRegistry`](crate::RoomRegistry) wraps each room in a
//! `RwLock` and holds it for the whole operation, so every method here
//! either applies completely or returns an error having changed nothing.
//! All validation happens before the first mutation.

use std::collections::HashMap;

use crossclues_protocol::{GameStateView, PlayerName, RoomCode, RoomInfo};
use rand::Rng;

use crate::{
    ClueWords, Deck, Grid, GridSize, Hand, MIN_PLAYERS_TO_START, RoomError,
    WordCatalog, cards_per_player,
};

/// One game session.
///
/// `started` and `over` are independent flags rather than a single phase:
/// a room can be restarted from any point and goes back to
/// `started && !over`.
#[derive(Debug, Clone)]
pub struct Room {
    code: RoomCode,
    grid_size: GridSize,
    /// Join order. Carries no turn semantics.
    players: Vec<PlayerName>,
    started: bool,
    over: bool,
    words: ClueWords,
    grid: Grid,
    deck: Deck,
    /// Exactly one entry per member of `players`.
    hands: HashMap<PlayerName, Hand>,
}

impl Room {
    /// Builds a fresh, unstarted room with `first_player` already seated
    /// and dealt their cards.
    ///
    /// # Errors
    /// [`RoomError::CatalogTooSmall`] if `catalog` can't fill the board.
    pub fn new<R: Rng + ?Sized>(
        code: RoomCode,
        grid_size: GridSize,
        first_player: PlayerName,
        catalog: &WordCatalog,
        rng: &mut R,
    ) -> Result<Self, RoomError> {
        let words = catalog.clue_words(rng, grid_size)?;

        let mut room = Self {
            code,
            grid_size,
            players: vec![first_player.clone()],
            started: false,
            over: false,
            words,
            grid: Grid::new(grid_size),
            deck: Deck::shuffled(rng, grid_size),
            hands: HashMap::from([(first_player.clone(), Hand::new())]),
        };
        room.deal(&first_player);
        Ok(room)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn players(&self) -> &[PlayerName] {
        &self.players
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn words(&self) -> &ClueWords {
        &self.words
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self, player: &str) -> Option<&Hand> {
        self.hands.get(player)
    }

    pub fn has_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p.as_str() == player)
    }

    /// The dealing cap for the room as it is populated right now.
    pub fn cards_per_player(&self) -> usize {
        cards_per_player(self.players.len())
    }

    // -----------------------------------------------------------------------
    // Dealing
    // -----------------------------------------------------------------------

    /// Moves the top card of the deck into `player`'s hand if the deck
    /// isn't empty and the hand is below the current cap.
    ///
    /// Never fails; returns whether a card moved.
    pub fn draw_card(&mut self, player: &PlayerName) -> bool {
        let cap = self.cards_per_player();
        let Some(hand) = self.hands.get_mut(player) else {
            return false;
        };
        if hand.len() >= cap {
            return false;
        }
        match self.deck.draw() {
            Some(card) => {
                hand.push(card);
                true
            }
            None => false,
        }
    }

    /// Draws up to the cap for `player`, returning how many cards moved.
    fn deal(&mut self, player: &PlayerName) -> usize {
        (0..self.cards_per_player())
            .filter(|_| self.draw_card(player))
            .count()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Seats a new player and deals them up to the cap for the new table
    /// size. Hands already dealt are left alone even if the cap dropped.
    ///
    /// Returns the number of cards actually dealt, which is smaller than
    /// the cap when the deck runs dry.
    pub fn join(&mut self, player: PlayerName) -> Result<usize, RoomError> {
        if self.has_player(player.as_str()) {
            return Err(RoomError::AlreadyInRoom(player, self.code.clone()));
        }

        self.players.push(player.clone());
        self.hands.insert(player.clone(), Hand::new());
        let dealt = self.deal(&player);

        tracing::info!(
            room_code = %self.code,
            player = %player,
            players = self.players.len(),
            cards_dealt = dealt,
            "player joined"
        );
        Ok(dealt)
    }

    /// Removes a player and returns their hand to the bottom of the deck.
    ///
    /// A running game keeps running; nobody else's hand changes.
    pub fn leave(&mut self, player: &PlayerName) -> Result<(), RoomError> {
        let Some(idx) = self.players.iter().position(|p| p == player) else {
            return Err(RoomError::PlayerNotInRoom(
                player.clone(),
                self.code.clone(),
            ));
        };

        self.players.remove(idx);
        if let Some(mut hand) = self.hands.remove(player) {
            self.deck.put_back(hand.take_all());
        }

        tracing::info!(
            room_code = %self.code,
            player = %player,
            players = self.players.len(),
            "player left"
        );
        Ok(())
    }

    /// Starts a new game: fresh words, fresh board, fresh shuffled deck,
    /// every hand redealt under the current cap.
    ///
    /// Works from any state, so it doubles as "restart".
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        catalog: &WordCatalog,
        rng: &mut R,
    ) -> Result<(), RoomError> {
        if self.players.len() < MIN_PLAYERS_TO_START {
            return Err(RoomError::NotEnoughPlayers {
                room: self.code.clone(),
                players: self.players.len(),
                needed: MIN_PLAYERS_TO_START,
            });
        }
        let words = catalog.clue_words(rng, self.grid_size)?;

        self.words = words;
        self.grid = Grid::new(self.grid_size);
        self.deck = Deck::shuffled(rng, self.grid_size);
        for hand in self.hands.values_mut() {
            *hand = Hand::new();
        }
        let players = self.players.clone();
        for player in &players {
            self.deal(player);
        }
        self.started = true;
        self.over = false;

        tracing::info!(
            room_code = %self.code,
            players = self.players.len(),
            grid_size = %self.grid_size,
            "game started"
        );
        Ok(())
    }

    /// Plays `player`'s card for `(row, column)`.
    ///
    /// The card leaves circulation, the cell settles as guessed (when
    /// `correct`) or discarded by `player`, and the player draws a
    /// replacement. Returns whether that settled the last open cell.
    pub fn submit_guess(
        &mut self,
        player: &PlayerName,
        row: usize,
        column: usize,
        correct: bool,
    ) -> Result<bool, RoomError> {
        if !self.started {
            return Err(RoomError::GameNotStarted(self.code.clone()));
        }
        if self.over {
            return Err(RoomError::GameOver(self.code.clone()));
        }
        if !self.has_player(player.as_str()) {
            return Err(RoomError::PlayerNotInRoom(
                player.clone(),
                self.code.clone(),
            ));
        }
        if !self.grid_size.contains(row, column) {
            return Err(RoomError::CellOutOfBounds {
                row,
                column,
                grid_size: self.grid_size.get(),
            });
        }
        let removed = self
            .hands
            .get_mut(player)
            .is_some_and(|hand| hand.remove(row, column));
        if !removed {
            return Err(RoomError::NoCardForCell {
                player: player.clone(),
                row,
                column,
            });
        }

        self.grid.resolve(row, column, player, correct);
        self.draw_card(player);
        self.over = self.grid.is_complete();

        tracing::debug!(
            room_code = %self.code,
            player = %player,
            row,
            column,
            correct,
            "guess recorded"
        );
        if self.over {
            tracing::info!(
                room_code = %self.code,
                correct = self.grid.correct_count(),
                total = self.grid_size.cell_count(),
                "game over"
            );
        }
        Ok(self.over)
    }

    /// The room as `player` may see it: shared board, phase flags, the
    /// player list, and only their own hand.
    pub fn snapshot(
        &self,
        player: &PlayerName,
    ) -> Result<GameStateView, RoomError> {
        if !self.has_player(player.as_str()) {
            return Err(RoomError::PlayerNotInRoom(
                player.clone(),
                self.code.clone(),
            ));
        }

        let player_cards = self
            .hands
            .get(player)
            .map(|hand| hand.cards().to_vec())
            .unwrap_or_default();

        Ok(GameStateView {
            room_code: self.code.clone(),
            grid_size: self.grid_size.get(),
            game_started: self.started,
            game_over: self.over,
            correct_guesses: self.grid.correct_count(),
            total_cells: self.grid_size.cell_count(),
            row_words: self.words.rows.clone(),
            column_words: self.words.columns.clone(),
            player_cards,
            grid: self.grid.project(player),
            players: self.players.clone(),
        })
    }

    /// Public metadata, safe to show anyone.
    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            room_code: self.code.clone(),
            grid_size: self.grid_size.get(),
            players: self.players.clone(),
            game_started: self.started,
            game_over: self.over,
        }
    }
}
