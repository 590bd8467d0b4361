//! Study ordering strategies and the session cursor.

use crate::types::Card;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Strategy that decides the order cards are shown in a study session.
pub trait StudyOrder: Send {
    /// Strategy identifier.
    fn name(&self) -> &'static str;

    /// Reorder the cards of one collection for study.
    fn arrange(&mut self, cards: Vec<Card>) -> Vec<Card>;
}

fn split_by_mastery(cards: Vec<Card>) -> (Vec<Card>, Vec<Card>) {
    cards.into_iter().partition(|card| !card.mastered)
}

/// Not-mastered cards first, each group in its incoming order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasteryFirst;

impl StudyOrder for MasteryFirst {
    fn name(&self) -> &'static str {
        "mastery_first"
    }

    fn arrange(&mut self, cards: Vec<Card>) -> Vec<Card> {
        let (mut pending, mastered) = split_by_mastery(cards);
        pending.extend(mastered);
        pending
    }
}

/// Not-mastered cards first, both groups shuffled.
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: StdRng,
}

impl SeededShuffle {
    /// Reproducible order for a given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl StudyOrder for SeededShuffle {
    fn name(&self) -> &'static str {
        "seeded_shuffle"
    }

    fn arrange(&mut self, cards: Vec<Card>) -> Vec<Card> {
        let (mut pending, mut mastered) = split_by_mastery(cards);
        pending.shuffle(&mut self.rng);
        mastered.shuffle(&mut self.rng);
        pending.extend(mastered);
        pending
    }
}

/// Cursor over an ordered study deck. Advancing past the end wraps around.
#[derive(Debug, Clone, Default)]
pub struct StudySession {
    cards: Vec<Card>,
    position: usize,
}

impl StudySession {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    /// Build a session by running `order` over the cards.
    pub fn arranged(cards: Vec<Card>, order: &mut dyn StudyOrder) -> Self {
        Self::new(order.arrange(cards))
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.position)
    }

    pub fn advance(&mut self) -> Option<&Card> {
        if self.cards.is_empty() {
            return None;
        }
        self.position = (self.position + 1) % self.cards.len();
        self.current()
    }

    /// Mark the current card hit (mastered) or missed, then move on.
    pub fn answer(&mut self, hit: bool) -> Option<&Card> {
        let card = self.cards.get_mut(self.position)?;
        card.mastered = hit;
        self.advance()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
