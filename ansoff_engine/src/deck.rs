/// Ansoff Engine — Shock Deck
///
/// Sampling without replacement. Each pass is a fresh uniform permutation
/// of the full card set; no card repeats until every other card in the
/// pass has been drawn.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::ShockCard;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct ShockDeck {
    cards: Vec<ShockCard>,
    queue: VecDeque<ShockCard>,
    passes: u64,
}

impl ShockDeck {
    /// Build a deck over `cards`. The queue starts empty, so the first
    /// draw shuffles.
    pub fn new(cards: Vec<ShockCard>) -> Result<Self, EngineError> {
        if cards.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        Ok(Self {
            cards,
            queue: VecDeque::new(),
            passes: 0,
        })
    }

    /// Take the next card, starting a new pass first if this one is spent.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ShockCard {
        if self.queue.is_empty() {
            self.refill(rng);
        }
        match self.queue.pop_front() {
            Some(card) => card,
            // refill always pushes the full non-empty set
            None => self.cards[0].clone(),
        }
    }

    /// Discard any partial pass and shuffle a fresh one.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.queue.clear();
        self.refill(rng);
    }

    /// Number of distinct cards in a full pass.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards left in the current pass.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Passes shuffled so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn cards(&self) -> &[ShockCard] {
        &self.cards
    }

    fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut pass = self.cards.clone();
        pass.shuffle(rng);
        self.queue = pass.into();
        self.passes += 1;
        debug!(pass = self.passes, cards = self.queue.len(), "shuffled shock deck");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shocks::standard_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn titles(cards: &[ShockCard]) -> Vec<String> {
        cards.iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        assert!(matches!(ShockDeck::new(Vec::new()), Err(EngineError::EmptyDeck)));
    }

    #[test]
    fn test_one_pass_yields_each_card_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut deck = ShockDeck::new(standard_cards()).unwrap();
        let drawn: Vec<ShockCard> = (0..deck.len()).map(|_| deck.draw(&mut rng)).collect();
        let unique: BTreeSet<String> = titles(&drawn).into_iter().collect();
        assert_eq!(unique.len(), deck.len());
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.passes(), 1);
    }

    #[test]
    fn test_next_draw_starts_new_pass() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut deck = ShockDeck::new(standard_cards()).unwrap();
        for _ in 0..deck.len() {
            deck.draw(&mut rng);
        }
        deck.draw(&mut rng);
        assert_eq!(deck.passes(), 2);
        assert_eq!(deck.remaining(), deck.len() - 1);
    }

    #[test]
    fn test_reset_discards_partial_pass() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut deck = ShockDeck::new(standard_cards()).unwrap();
        deck.draw(&mut rng);
        deck.draw(&mut rng);
        deck.reset(&mut rng);
        assert_eq!(deck.remaining(), deck.len());
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut deck_a = ShockDeck::new(standard_cards()).unwrap();
        let mut deck_b = ShockDeck::new(standard_cards()).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..12 {
            assert_eq!(deck_a.draw(&mut rng_a).title, deck_b.draw(&mut rng_b).title);
        }
    }
}
