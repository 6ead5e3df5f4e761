use crate::domain::{GameStage, PlayerSeat, PlayerStatus, SeatIndex, Table};

/// Найти следующее место по кругу, удовлетворяющее условию (включая/исключая start).
pub fn next_seat_where<F>(table: &Table, start: SeatIndex, include_start: bool, pred: F) -> Option<SeatIndex>
where
    F: Fn(&PlayerSeat) -> bool,
{
    let max = table.seat_count();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if pred(&table.seats[idx]) {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Может ли место участвовать в том, что сейчас происходит за столом.
///
/// Критерий зависит от стадии:
///   - Dealing / WaitingForPlayers: сидит, есть фишки, статус Waiting;
///   - ожидание блайндов: только место, которое должно ставить этот блайнд;
///   - раунды ставок: в раздаче и может ещё ставить.
pub fn is_eligible_for_stage(seat: &PlayerSeat, stage: GameStage) -> bool {
    if !seat.is_sitting_in || seat.stack.is_zero() {
        return false;
    }
    match stage {
        GameStage::Dealing | GameStage::WaitingForPlayers => seat.status == PlayerStatus::Waiting,
        GameStage::WaitingForSmallBlind => seat.status == PlayerStatus::MustPostSmallBlind,
        GameStage::WaitingForBigBlind => seat.status == PlayerStatus::MustPostBigBlind,
        s if s.is_betting_round() => seat.can_act(),
        _ => false,
    }
}

/// Следующее активное место для текущей стадии стола.
pub fn next_active_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    let stage = table.stage;
    next_seat_where(table, start, include_start, |s| is_eligible_for_stage(s, stage))
}

/// Все места по кругу, начиная со следующего после start; start идёт последним.
pub fn seats_in_order_after(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seat_count();
    (1..=max)
        .map(|i| ((start as usize + i) % max) as SeatIndex)
        .collect()
}

/// Места, которые могут ставить, по порядку начиная с `first` (включительно).
pub fn acting_order_from(table: &Table, first: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seat_count();
    (0..max)
        .map(|i| ((first as usize + i) % max) as SeatIndex)
        .filter(|s| table.seats[*s as usize].can_act())
        .collect()
}

/// Места в раздаче по кругу после дилера (для раздачи карт и нечётных фишек).
pub fn in_hand_order_after_dealer(table: &Table) -> Vec<SeatIndex> {
    let dealer = table.dealer_seat.unwrap_or(0);
    seats_in_order_after(table, dealer)
        .into_iter()
        .filter(|s| table.seats[*s as usize].is_in_hand())
        .collect()
}
