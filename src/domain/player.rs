use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatIndex};

/// Статус игрока в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Сидит за столом, ждёт следующей раздачи.
    Waiting,
    /// Не участвует в раздачах (нет фишек или ушёл).
    SittingOut,
    MustPostSmallBlind,
    MustPostBigBlind,
    /// В раздаче, ещё не действовал в этом раунде.
    Playing,
    Checked,
    Called,
    Bet,
    Raised,
    /// Сфолдил и больше не претендует на банк.
    Folded,
    /// Поставил весь стек.
    AllIn,
}

impl PlayerStatus {
    /// Претендует ли игрок на банк текущей раздачи.
    pub fn is_in_hand(self) -> bool {
        matches!(
            self,
            PlayerStatus::Playing
                | PlayerStatus::Checked
                | PlayerStatus::Called
                | PlayerStatus::Bet
                | PlayerStatus::Raised
                | PlayerStatus::AllIn
        )
    }
}

/// Место за офлайн-столом вместе с игроком (или ботом).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSeat {
    pub seat_index: SeatIndex,
    pub player_name: String,
    /// Id аккаунта на сервере; у ботов и гостей его нет.
    pub player_id: Option<PlayerId>,
    pub stack: Chips,
    pub hole_cards: Vec<Card>,
    pub status: PlayerStatus,
    pub is_bot: bool,
    pub is_turn: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    /// Ставка в текущем раунде торгов.
    pub current_bet: Chips,
    /// Сколько всего вложено в банк за раздачу (для сайд-потов).
    pub total_contribution: Chips,
    pub is_sitting_in: bool,
    pub has_acted_this_round: bool,
}

impl Default for PlayerSeat {
    fn default() -> Self {
        Self {
            seat_index: 0,
            player_name: "Empty".to_string(),
            player_id: None,
            stack: Chips::ZERO,
            hole_cards: Vec::new(),
            status: PlayerStatus::Waiting,
            is_bot: false,
            is_turn: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            current_bet: Chips::ZERO,
            total_contribution: Chips::ZERO,
            is_sitting_in: true,
            has_acted_this_round: false,
        }
    }
}

impl PlayerSeat {
    pub fn new(seat_index: SeatIndex, name: impl Into<String>, stack: Chips, is_bot: bool) -> Self {
        Self {
            seat_index,
            player_name: name.into(),
            stack,
            is_bot,
            ..Self::default()
        }
    }

    pub fn is_in_hand(&self) -> bool {
        self.status.is_in_hand()
    }

    /// Может ли ещё делать ставки (в раздаче, не олл-ин).
    pub fn can_act(&self) -> bool {
        self.is_in_hand() && self.status != PlayerStatus::AllIn && !self.stack.is_zero()
    }

    /// Есть ли смысл сажать его в следующую раздачу.
    pub fn is_active_for_new_hand(&self) -> bool {
        self.is_sitting_in && !self.stack.is_zero()
    }

    /// Сбросить всё, что относится к прошлой раздаче.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.total_contribution = Chips::ZERO;
        self.is_turn = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.has_acted_this_round = false;
    }

    /// Перенести фишки из стека в ставку. Возвращает реально внесённую сумму.
    pub fn commit_chips(&mut self, amount: Chips) -> Chips {
        let paid = if amount > self.stack { self.stack } else { amount };
        self.stack -= paid;
        self.current_bet += paid;
        self.total_contribution += paid;
        if self.stack.is_zero() && self.is_in_hand() {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }
}
