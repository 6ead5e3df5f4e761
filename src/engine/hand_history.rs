use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{GameStage, HandId, SeatIndex};
use crate::engine::actions::PlayerAction;
use crate::eval::HandResult;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        hand_id: HandId,
        dealer: SeatIndex,
        small_blind_seat: SeatIndex,
        big_blind_seat: SeatIndex,
    },

    BlindPosted {
        seat: SeatIndex,
        amount: Chips,
        is_big_blind: bool,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Открыты общие карты на борде.
    BoardDealt {
        stage: GameStage,
        cards: Vec<Card>,
    },

    /// Действие игрока. `total_bet` – его ставка в раунде после действия.
    PlayerActed {
        seat: SeatIndex,
        action: PlayerAction,
        total_bet: Chips,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Переход на новую стадию.
    StageChanged {
        stage: GameStage,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: Vec<Card>,
        result: HandResult,
    },

    /// Выплата банка(ов).
    PotAwarded {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все выплаты из банка за раздачу.
    pub fn pot_awards(&self) -> impl Iterator<Item = (SeatIndex, Chips)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            HandEventKind::PotAwarded { seat, amount } => Some((seat, amount)),
            _ => None,
        })
    }
}
