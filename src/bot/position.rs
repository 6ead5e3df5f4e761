use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerSeat, PlayerStatus, SeatIndex, Table};

/// Позиция места относительно кнопки в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PokerPosition {
    Btn,
    Sb,
    Bb,
    Utg,
    Utg1,
    Mp1,
    Mp2,
    Hj,
    Co,
    Unknown,
}

impl fmt::Display for PokerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PokerPosition::Btn => "BTN",
            PokerPosition::Sb => "SB",
            PokerPosition::Bb => "BB",
            PokerPosition::Utg => "UTG",
            PokerPosition::Utg1 => "UTG+1",
            PokerPosition::Mp1 => "MP1",
            PokerPosition::Mp2 => "MP2",
            PokerPosition::Hj => "HJ",
            PokerPosition::Co => "CO",
            PokerPosition::Unknown => "?",
        };
        f.write_str(s)
    }
}

/// Сидит и ещё не выбыл из раздачи.
fn counts_for_position(seat: &PlayerSeat) -> bool {
    seat.is_sitting_in && !matches!(seat.status, PlayerStatus::Folded | PlayerStatus::SittingOut)
}

/// Позиция места при `active` активных игроках.
///
/// Порядок строится от места слева от дилера: SB, BB, UTG, ... , BTN.
/// В хедз-апе дилер – SB, второй – BB.
pub fn player_position(table: &Table, seat: SeatIndex, active: usize) -> PokerPosition {
    let Some(dealer) = table.dealer_seat else {
        return PokerPosition::Unknown;
    };
    let n = table.seat_count();
    if active < 2 || (seat as usize) >= n {
        return PokerPosition::Unknown;
    }

    let order: Vec<SeatIndex> = (1..=n)
        .map(|i| ((dealer as usize + i) % n) as SeatIndex)
        .filter(|s| counts_for_position(&table.seats[*s as usize]))
        .take(active)
        .collect();

    let Some(pos) = order.iter().position(|s| *s == seat) else {
        return PokerPosition::Unknown;
    };
    if order.len() != active {
        return PokerPosition::Unknown;
    }

    if active == 2 {
        return if seat == dealer {
            PokerPosition::Sb
        } else {
            PokerPosition::Bb
        };
    }

    if pos == 0 {
        return PokerPosition::Sb;
    }
    if pos == 1 {
        return PokerPosition::Bb;
    }
    if pos == active - 1 {
        return PokerPosition::Btn;
    }

    let seats_before_button = active - 1 - pos;

    if active <= 6 {
        if pos == 2 {
            PokerPosition::Utg
        } else if seats_before_button <= 1 {
            PokerPosition::Co
        } else {
            PokerPosition::Mp1
        }
    } else {
        match (pos, seats_before_button) {
            (2, _) => PokerPosition::Utg,
            (3, _) => PokerPosition::Utg1,
            (_, 1) => PokerPosition::Co,
            (_, 2) => PokerPosition::Hj,
            (5, _) if active >= 9 => PokerPosition::Mp2,
            _ => PokerPosition::Mp1,
        }
    }
}

/// Сколько соперников ещё претендуют на банк (или должны ставить блайнд).
pub fn count_active_opponents(table: &Table, seat: SeatIndex) -> usize {
    table
        .seats
        .iter()
        .filter(|s| s.seat_index != seat && s.is_sitting_in)
        .filter(|s| {
            s.is_in_hand()
                || matches!(
                    s.status,
                    PlayerStatus::MustPostSmallBlind | PlayerStatus::MustPostBigBlind
                )
        })
        .count()
}
