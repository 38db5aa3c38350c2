//! The clue-word catalog rows and columns are drawn from.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{GridSize, RoomError};

/// The words a room uses when no custom catalog is configured.
const BUILTIN_WORDS: &[&str] = &[
    "AIR", "AIRPLANE", "AIRPORT", "ANGER", "ANKLE", "ARM", "ARROW",
    "AUTUMN", "AVOCADO", "BABY BOTTLE", "BAG", "BALL", "BANANA", "BEACH",
    "BEAR", "BICYCLE", "BLACK", "BLUE", "BOAT", "BOOK", "BOX", "BROWN",
    "BUS", "BUTTER", "CAKE", "CAMEL", "CAMERA", "CANE", "CAPE", "CASTLE",
    "CAT", "CAULIFLOWER", "CHEESE", "CHEST", "CHICKEN", "CHILD",
    "CHOCOLATE", "CIRCUS", "COLD", "COOK", "COSTUME", "COUCH", "COW",
    "DAY", "DESERT", "DESSERT", "DETECTIVE", "DIAMOND", "DINOSAUR",
    "DISEASE", "DISGUST", "DOCTOR", "DOG", "DRAGON", "DUCK", "EAR",
    "EARTH", "ENEMY", "EYE", "FAST", "FEAR", "FIRE", "FIREFIGHTER", "FISH",
    "FOOT", "FOUNTAIN", "FRENCH FRIES", "FRIENDS", "GLASSES", "GOAT",
    "GREEN", "GREY", "GROUP", "GUITAR", "HAPPINESS", "HAT", "HEAD",
    "HEAVY", "HELICOPTER", "HELMET", "HERO", "HISTORY", "HOLE", "HONEY",
    "HORSE", "HOT", "HOUSE", "ICE", "JAIL", "JOY", "JUNGLE", "KING",
    "KNIGHT", "LAPTOP", "LEG", "LENTILS", "LETTER", "LIGHT BULB", "LIGHT",
    "MAN", "MAP", "MARS", "MEAL", "MEAN", "MONKEY", "MOON", "MOTORCYCLE",
    "MOUNTAIN", "MOUTH", "MUSHROOM", "MUSTACHE", "NATION", "NICE", "NIGHT",
    "NURSE", "OCEAN", "OCTOPUS", "OLD", "ORANGE", "PAINTING", "PALM TREE",
    "PAPER", "PARACHUTE", "PEAK", "PEAR", "PEN", "PIANO", "PIG", "PIGEON",
    "PINK", "PIRATE", "PLANET", "PLATE", "PRESIDENT", "PRETTY", "QUEEN",
    "RADISH", "RAT", "RED", "RING", "ROAD", "ROBOT", "RUBBER BAND",
    "SADNESS", "SALAD", "SANDWICH", "SCHOOL", "SECURITY", "SHARK", "SHIRT",
    "SHOVEL", "SLOW", "SMALL", "SMART", "SNAIL", "SNAKE", "SNOW", "SOAP",
    "SOLDIER", "SPACESHIP", "SPIDER", "SPRING", "STONE", "STRAWBERRY",
    "SUGAR", "SUITCASE", "SUMMER", "SURPRISE", "TALL", "TEACHER", "TIME",
    "TOMATO", "TOY", "TRAILER", "TRAIN", "TRAVEL", "TREASURE", "UGLY",
    "UNICORN", "VACATION", "VASE", "VETERINARIAN", "WAR", "WARDROBE",
    "WATER", "WEIRD", "WHEAT", "WHITE", "WIND", "WINTER", "WOLF", "WOMAN",
    "WOOD", "YELLOW", "YOUNG", "ZOO",
];

/// Row and column words for one board.
///
/// Both sides come from a single shuffle, so no word appears twice on the
/// same board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueWords {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
}

/// A fixed set of distinct clue words.
#[derive(Debug, Clone)]
pub struct WordCatalog {
    words: Vec<String>,
}

impl WordCatalog {
    /// The built-in English catalog (~200 words).
    pub fn builtin() -> Self {
        Self::new(BUILTIN_WORDS.iter().copied())
    }

    /// Builds a catalog from arbitrary words.
    ///
    /// Words are trimmed; blanks and repeats are dropped (first occurrence
    /// wins) so sampling can never hand out the same word twice.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| {
                let w: String = w.into();
                w.trim().to_string()
            })
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns `n` distinct words in random order.
    ///
    /// # Errors
    /// [`RoomError::CatalogTooSmall`] if the catalog has fewer than `n` words.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<String>, RoomError> {
        if n > self.words.len() {
            return Err(RoomError::CatalogTooSmall {
                needed: n,
                available: self.words.len(),
            });
        }
        let mut shuffled = self.words.clone();
        shuffled.shuffle(rng);
        shuffled.truncate(n);
        Ok(shuffled)
    }

    /// Draws `2 × size` words and splits them into rows and columns.
    pub fn clue_words<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: GridSize,
    ) -> Result<ClueWords, RoomError> {
        let mut rows = self.sample(rng, size.get() * 2)?;
        let columns = rows.split_off(size.get());
        Ok(ClueWords { rows, columns })
    }
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
