//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_poker_hand(hole, community) -> HandResult`
//!   `compare_hand_results(a, b) -> Ordering`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_five, evaluate_poker_hand};
pub use hand_rank::{compare_hand_results, describe_hand, HandResult, PokerHandRank};
