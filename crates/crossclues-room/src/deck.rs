//! Card circulation: the undealt deck, player hands, and the dealing cap.
//!
//! Every coordinate of the board starts in the deck. Cards move deck →
//! hand when dealt, hand → nowhere when played, and hand → back of the
//! deck when their holder leaves. Together the deck and all hands hold
//! every unplayed coordinate exactly once.

use std::collections::VecDeque;

use crossclues_protocol::Card;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::GridSize;

/// How many cards each player holds at most, given the table size.
///
/// Small tables (up to three players) hold two cards each so there is
/// always something to clue; larger tables hold one.
pub fn cards_per_player(player_count: usize) -> usize {
    if player_count <= 3 { 2 } else { 1 }
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// The undealt cards of a room, drawn from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Every coordinate of a `size × size` board, uniformly shuffled.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R, size: GridSize) -> Self {
        let n = size.get();
        let mut cards: Vec<Card> = (0..n)
            .flat_map(|row| (0..n).map(move |column| Card::new(row, column)))
            .collect();
        cards.shuffle(rng);
        Self {
            cards: cards.into(),
        }
    }

    /// Takes the next card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Puts cards back at the bottom of the deck, in order, unshuffled.
    pub fn put_back(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates from the next card to be drawn to the last.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

// ---------------------------------------------------------------------------
// Hand
// ---------------------------------------------------------------------------

/// The cards one player currently holds, in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns `true` if the hand holds a card for `(row, column)`.
    pub fn holds(&self, row: usize, column: usize) -> bool {
        self.cards.contains(&Card::new(row, column))
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the first card matching `(row, column)`, keeping the
    /// order of the rest. Returns whether a card was removed.
    pub fn remove(&mut self, row: usize, column: usize) -> bool {
        let target = Card::new(row, column);
        match self.cards.iter().position(|c| *c == target) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empties the hand, returning its cards in dealt order.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_cards_per_player_policy() {
        assert_eq!(cards_per_player(1), 2);
        assert_eq!(cards_per_player(2), 2);
        assert_eq!(cards_per_player(3), 2);
        assert_eq!(cards_per_player(4), 1);
        assert_eq!(cards_per_player(10), 1);
    }

    #[test]
    fn test_shuffled_deck_holds_every_coordinate_once() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 3..=7 {
            let deck = Deck::shuffled(&mut rng, GridSize::new(n).unwrap());
            assert_eq!(deck.len(), n * n);
            let unique: HashSet<_> = deck.iter().copied().collect();
            assert_eq!(unique.len(), n * n);
            assert!(deck.iter().all(|c| c.row < n && c.column < n));
        }
    }

    #[test]
    fn test_shuffled_deck_is_not_in_board_order() {
        // With 49 cards the identity permutation is astronomically unlikely
        // for a fixed seed; this guards against forgetting the shuffle.
        let mut rng = StdRng::seed_from_u64(3);
        let deck = Deck::shuffled(&mut rng, GridSize::new(7).unwrap());
        let in_order: Vec<Card> = (0..7)
            .flat_map(|r| (0..7).map(move |c| Card::new(r, c)))
            .collect();
        let drawn: Vec<Card> = deck.iter().copied().collect();
        assert_ne!(drawn, in_order);
    }

    #[test]
    fn test_draw_takes_from_front_and_put_back_appends() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut deck = Deck::shuffled(&mut rng, GridSize::new(3).unwrap());
        let first = *deck.iter().next().unwrap();

        assert_eq!(deck.draw(), Some(first));
        assert_eq!(deck.len(), 8);

        deck.put_back([first]);
        assert_eq!(deck.len(), 9);
        assert_eq!(deck.iter().last(), Some(&first));
    }

    #[test]
    fn test_draw_from_empty_deck_is_none() {
        let mut deck = Deck::default();
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_hand_remove_keeps_order_of_remaining_cards() {
        let mut hand = Hand::new();
        hand.push(Card::new(0, 0));
        hand.push(Card::new(1, 1));
        hand.push(Card::new(2, 2));

        assert!(hand.remove(1, 1));
        assert_eq!(hand.cards(), &[Card::new(0, 0), Card::new(2, 2)]);
        assert!(!hand.remove(1, 1));
        assert!(!hand.holds(1, 1));
        assert!(hand.holds(2, 2));
    }

    #[test]
    fn test_hand_take_all_empties_hand() {
        let mut hand = Hand::new();
        hand.push(Card::new(0, 2));
        hand.push(Card::new(2, 0));

        let cards = hand.take_all();
        assert_eq!(cards, vec![Card::new(0, 2), Card::new(2, 0)]);
        assert!(hand.is_empty());
    }
}
