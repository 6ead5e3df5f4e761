use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::PlayerStatus;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::eval::HandResult;

/// Стадия офлайн-игры. Порядок вариантов совпадает с ходом раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameStage {
    WaitingForPlayers,
    Dealing,
    WaitingForSmallBlind,
    WaitingForBigBlind,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl GameStage {
    /// Preflop..=River.
    pub fn is_betting_round(self) -> bool {
        self >= GameStage::Preflop && self <= GameStage::River
    }

    pub fn is_blind_stage(self) -> bool {
        matches!(self, GameStage::WaitingForSmallBlind | GameStage::WaitingForBigBlind)
    }

    /// Следующая улица торгов. После River идёт Showdown.
    pub fn next_street(self) -> Option<GameStage> {
        match self {
            GameStage::Preflop => Some(GameStage::Flop),
            GameStage::Flop => Some(GameStage::Turn),
            GameStage::Turn => Some(GameStage::River),
            GameStage::River => Some(GameStage::Showdown),
            _ => None,
        }
    }

    /// Сколько карт борда открывается при переходе на эту стадию.
    pub fn board_cards_to_deal(self) -> usize {
        match self {
            GameStage::Flop => 3,
            GameStage::Turn | GameStage::River => 1,
            _ => 0,
        }
    }
}

/// Информация по игроку на вскрытии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownPlayerInfo {
    pub seat_index: SeatIndex,
    pub player_name: String,
    pub hole_cards: Vec<Card>,
    /// None, если игрок выиграл без вскрытия.
    pub hand_result: Option<HandResult>,
    pub is_winner: bool,
    pub amount_won: Chips,
    pub status: PlayerStatus,
    /// Выигрыш минус вложенное в банк за раздачу.
    pub net_result: i64,
}

/// Итог завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub stage_reached: GameStage,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    /// Дошло ли до вскрытия карт.
    pub went_to_showdown: bool,
    pub players: Vec<ShowdownPlayerInfo>,
}

impl HandSummary {
    pub fn winners(&self) -> impl Iterator<Item = &ShowdownPlayerInfo> {
        self.players.iter().filter(|p| p.is_winner)
    }
}

/// Кто сидит за столом: имя и id аккаунта (если вошёл или офлайн-профиль).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub username: Option<String>,
    pub user_id: Option<PlayerId>,
}
