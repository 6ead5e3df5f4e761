use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub bet_to_call: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Размер последнего полного бета/рейза в этом раунде.
    pub last_raise_amount: Chips,
    /// Seat последнего агрессора (bet/raise/all-in сверху).
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих: кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<SeatIndex>,
    /// Кто уже ходил после последнего полного бета/рейза. Короткий олл-ин
    /// не открывает им рейз: только фолд или колл.
    pub acted_since_full_raise: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(bet_to_call: Chips, min_raise: Chips) -> Self {
        Self {
            bet_to_call,
            min_raise,
            last_raise_amount: Chips::ZERO,
            last_aggressor: None,
            to_act: Vec::new(),
            acted_since_full_raise: Vec::new(),
        }
    }

    /// Новый раунд: ставок нет, минимальный бет = BB.
    pub fn reset_for_street(&mut self, big_blind: Chips, to_act: Vec<SeatIndex>) {
        *self = Self::new(Chips::ZERO, big_blind);
        self.to_act = to_act;
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        if !self.acted_since_full_raise.contains(&seat) {
            self.acted_since_full_raise.push(seat);
        }
    }

    /// Может ли место повышать: после его последнего хода был полный рейз.
    pub fn can_reraise(&self, seat: SeatIndex) -> bool {
        !self.acted_since_full_raise.contains(&seat)
    }

    /// Полный бет/рейз: новый уровень, новый минимум рейза, очередь заново.
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips, raise_size: Chips, new_to_act: Vec<SeatIndex>) {
        self.bet_to_call = new_bet;
        if raise_size > self.min_raise {
            self.min_raise = raise_size;
        }
        self.last_raise_amount = raise_size;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
        self.acted_since_full_raise.clear();
    }

    /// Олл-ин меньше минимального рейза: уровень растёт, минимум рейза прежний.
    pub fn on_short_all_in(&mut self, seat: SeatIndex, new_bet: Chips, new_to_act: Vec<SeatIndex>) {
        self.bet_to_call = new_bet;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
    }

    pub fn next_to_act(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Раунд завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
