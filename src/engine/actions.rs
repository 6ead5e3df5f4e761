use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};

/// Тип действия игрока.
///
/// Суммы для Bet/Raise передаются отдельно и означают итоговую ставку
/// игрока в текущем раунде (а не добавку к ней).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    /// Поставить весь стек.
    AllIn,
    /// Внести малый или большой блайнд.
    PostBlind,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerAction::Fold => "Fold",
            PlayerAction::Check => "Check",
            PlayerAction::Call => "Call",
            PlayerAction::Bet => "Bet",
            PlayerAction::Raise => "Raise",
            PlayerAction::AllIn => "All-in",
            PlayerAction::PostBlind => "Post blind",
        };
        f.write_str(s)
    }
}

/// Запрос действия у места: что можно сделать и в каких рамках.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest {
    pub seat: SeatIndex,
    /// Пусто, если место сейчас ничего сделать не может.
    pub allowed_actions: Vec<PlayerAction>,
    pub bet_to_call: Chips,
    /// Минимальная "чистая" часть рейза (сверх bet_to_call).
    pub min_raise: Chips,
    pub stack: Chips,
}

impl ActionRequest {
    pub fn empty(seat: SeatIndex, bet_to_call: Chips, stack: Chips) -> Self {
        Self {
            seat,
            allowed_actions: Vec::new(),
            bet_to_call,
            min_raise: Chips::ZERO,
            stack,
        }
    }

    pub fn allows(&self, action: PlayerAction) -> bool {
        self.allowed_actions.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_actions.is_empty()
    }
}
