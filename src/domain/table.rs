use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::GameStage;
use crate::domain::player::{PlayerSeat, PlayerStatus};
use crate::domain::HandId;
use crate::engine::betting::BettingState;

/// Индекс места за столом (0..seats.len()-1).
pub type SeatIndex = u8;

/// Минимум и максимум игроков за офлайн-столом.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

/// Малый блайнд по умолчанию, если передан некорректный.
pub const DEFAULT_SMALL_BLIND: Chips = Chips(5);

/// Полное состояние офлайн-стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    /// Места: индекс вектора = SeatIndex. Пустых мест нет, стол собирается под игроков.
    pub seats: Vec<PlayerSeat>,

    /// Общие карты борда (0–5 карт).
    pub community_cards: Vec<Card>,

    /// Общий банк текущей раздачи.
    pub pot: Chips,

    pub dealer_seat: Option<SeatIndex>,
    pub current_turn_seat: Option<SeatIndex>,
    /// Кто первым ходит в текущем раунде ставок.
    pub opener_seat: Option<SeatIndex>,
    pub stage: GameStage,

    pub small_blind: Chips,
    pub big_blind: Chips,
    pub pending_small_blind_seat: Option<SeatIndex>,
    pub pending_big_blind_seat: Option<SeatIndex>,

    /// Состояние текущего раунда ставок.
    pub betting: BettingState,

    /// Номер раздачи (0 – ещё ни одной не было).
    pub hand_number: HandId,
}

impl Table {
    pub fn new(seats: Vec<PlayerSeat>, small_blind: Chips) -> Self {
        let big_blind = Chips(small_blind.0.saturating_mul(2));
        Self {
            seats,
            community_cards: Vec::new(),
            pot: Chips::ZERO,
            dealer_seat: None,
            current_turn_seat: None,
            opener_seat: None,
            stage: GameStage::WaitingForPlayers,
            small_blind,
            big_blind,
            pending_small_blind_seat: None,
            pending_big_blind_seat: None,
            betting: BettingState::new(Chips::ZERO, big_blind),
            hand_number: 0,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seat(&self, seat: SeatIndex) -> Option<&PlayerSeat> {
        self.seats.get(seat as usize)
    }

    pub fn seat_mut(&mut self, seat: SeatIndex) -> Option<&mut PlayerSeat> {
        self.seats.get_mut(seat as usize)
    }

    /// Текущая ставка, которую нужно уравнять.
    pub fn bet_to_call(&self) -> Chips {
        self.betting.bet_to_call
    }

    /// Сколько мест ещё претендуют на банк.
    pub fn players_in_hand(&self) -> usize {
        self.seats.iter().filter(|s| s.is_in_hand()).count()
    }

    /// Сколько мест ещё могут делать ставки.
    pub fn players_able_to_act(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }

    /// Сидит и не выбыл: не Folded и не SittingOut.
    pub fn active_player_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| {
                s.is_sitting_in
                    && !matches!(s.status, PlayerStatus::Folded | PlayerStatus::SittingOut)
            })
            .count()
    }

    /// Сумма фишек за столом: стеки + банк. Должна сохраняться между действиями.
    pub fn total_chips(&self) -> Chips {
        self.pot + self.seats.iter().map(|s| s.stack).sum::<Chips>()
    }
}
