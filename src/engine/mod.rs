//! Офлайн-движок покера: блайнды, раунды ставок, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `OfflineGameManager`
//! Основные операции:
//!   - `initialize_game` - рассадить игрока и ботов
//!   - `start_new_hand` - кнопка, блайнды, колода
//!   - `request_player_action` - какие действия доступны месту
//!   - `process_player_action` - применить действие и продвинуть раздачу

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_manager;
pub mod hand_history;
pub mod positions;
pub mod side_pots;
pub mod validation;

pub use actions::{ActionRequest, PlayerAction};
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_manager::{GameSettings, HandStatus, OfflineGameManager};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use side_pots::{compute_side_pots, SidePot};
pub use validation::{allowed_actions, validate_action};

/// Источник случайности для движка и ботов.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайный индекс в диапазоне 0..upper. Для upper == 0 возвращает 0.
    fn gen_index(&mut self, upper: usize) -> usize;

    /// Случайное число в [0, 1).
    fn next_unit(&mut self) -> f32;

    /// Случайное число в [low, high).
    fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_unit()
    }
}
