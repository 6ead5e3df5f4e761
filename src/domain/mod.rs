//! Доменная модель офлайн-покера: карты, колода, фишки, места, стадии, стол.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

/// Id аккаунта на сервере.
pub type PlayerId = i64;
pub type HandId = u64;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
