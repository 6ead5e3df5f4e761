use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Колода карт. Верх колоды = конец вектора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard_52()
    }
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Вернуть колоду в исходные 52 карты.
    pub fn initialize(&mut self) {
        *self = Self::standard_52();
    }

    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.cards.pop();
        if card.is_none() {
            warn!("колода пуста, карту выдать нельзя");
        }
        card
    }

    /// Взять n карт сверху. Если карт не хватает, вернёт сколько есть.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.deal_card()).collect()
    }
}
