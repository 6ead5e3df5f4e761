use crate::domain::{GameStage, SeatIndex};
use crate::engine::actions::PlayerAction;

use thiserror::Error;

/// Ошибки офлайн-движка покера.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход места {0}")]
    NotPlayersTurn(SeatIndex),

    #[error("Действие {0:?} недоступно в текущем состоянии раздачи")]
    ActionNotAllowed(PlayerAction),

    #[error("Действие {action:?} невозможно на стадии {stage:?}")]
    WrongStage { action: PlayerAction, stage: GameStage },

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error("Размер бета меньше минимального")]
    BetTooSmall,

    #[error("Размер рейза слишком мал")]
    RaiseTooSmall,

    #[error("Невозможно выполнить check: нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call: нет ставки для уравнивания")]
    CannotCall,

    #[error("В колоде закончились карты")]
    DeckExhausted,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
