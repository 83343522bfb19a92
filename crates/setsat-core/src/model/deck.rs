use crate::model::attribute::{Colour, Fill, Number, Shape};
use crate::model::card::CardDescriptor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 81;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<CardDescriptor>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for shape in Shape::ALL {
            for fill in Fill::ALL {
                for colour in Colour::ALL {
                    for number in Number::ALL {
                        cards.push(CardDescriptor::new(shape, fill, colour, number));
                    }
                }
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// The first `count` cards, or the whole deck when fewer remain.
    pub fn deal(&self, count: usize) -> Vec<CardDescriptor> {
        self.cards[..count.min(self.cards.len())].to_vec()
    }

    pub fn cards(&self) -> &[CardDescriptor] {
        &self.cards
    }
}
