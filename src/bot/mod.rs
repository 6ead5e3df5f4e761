//! Боты офлайн-стола.
//!
//! `BotAi::best_action` смотрит на стол и запрос действия и выбирает ход:
//! блайнды ставит всегда, на префлопе играет по силе стартовой руки,
//! на постфлопе – по готовой комбинации и дро, иногда блефует.

pub mod ai;
pub mod personality;
pub mod position;
pub mod sizing;
pub mod strength;

pub use ai::BotAi;
pub use personality::BotPersonality;
pub use position::{count_active_opponents, player_position, PokerPosition};
pub use sizing::{bet_size, raise_size};
pub use strength::{draw_strength, is_scary_board, pot_odds, preflop_hand_strength, score_for_made_hand};
