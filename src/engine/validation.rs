use crate::domain::chips::Chips;
use crate::domain::player::{PlayerSeat, PlayerStatus};
use crate::domain::{GameStage, SeatIndex, Table};
use crate::engine::actions::{ActionRequest, PlayerAction};
use crate::engine::errors::EngineError;

/// Какие действия доступны месту при текущем состоянии стола.
///
/// Функция чистая: отметку хода ставит `OfflineGameManager::request_player_action`.
pub fn allowed_actions(table: &Table, seat: SeatIndex) -> ActionRequest {
    let bet_to_call = table.bet_to_call();
    let Some(player) = table.seat(seat) else {
        return ActionRequest::empty(seat, Chips::ZERO, Chips::ZERO);
    };
    let stack = player.stack;

    let all_in_and_matched = player.stack.is_zero() && player.current_bet >= bet_to_call;
    if player.status == PlayerStatus::Folded || (all_in_and_matched && table.stage.is_betting_round()) {
        return ActionRequest::empty(seat, bet_to_call, stack);
    }

    match table.stage {
        GameStage::WaitingForSmallBlind if table.pending_small_blind_seat == Some(seat) => {
            blind_request(seat, Chips::ZERO, stack)
        }
        GameStage::WaitingForBigBlind if table.pending_big_blind_seat == Some(seat) => {
            blind_request(seat, table.small_blind, stack)
        }
        stage if stage.is_betting_round() => {
            if !player.can_act() {
                return ActionRequest::empty(seat, bet_to_call, stack);
            }
            betting_request(table, player)
        }
        _ => ActionRequest::empty(seat, bet_to_call, stack),
    }
}

fn blind_request(seat: SeatIndex, bet_to_call: Chips, stack: Chips) -> ActionRequest {
    let mut allowed = Vec::new();
    if !stack.is_zero() {
        allowed.push(PlayerAction::PostBlind);
    }
    ActionRequest {
        seat,
        allowed_actions: allowed,
        bet_to_call,
        min_raise: Chips::ZERO,
        stack,
    }
}

fn betting_request(table: &Table, player: &PlayerSeat) -> ActionRequest {
    let bet_to_call = table.bet_to_call();
    let min_raise = table.betting.min_raise;
    let stack = player.stack;
    let my_bet = player.current_bet;
    let to_call = diff_to_call(player, bet_to_call);

    let mut allowed = vec![PlayerAction::Fold];

    if my_bet == bet_to_call {
        allowed.push(PlayerAction::Check);
    }
    if bet_to_call > my_bet && !stack.is_zero() {
        allowed.push(PlayerAction::Call);
    }
    let can_bet = allowed.contains(&PlayerAction::Check) && stack >= min_raise;
    if can_bet {
        allowed.push(PlayerAction::Bet);
    }
    // После короткого олл-ина уже ходившим рейз закрыт, олл-ин разрешён только как колл.
    let reopened = table.betting.can_reraise(player.seat_index);
    if reopened && stack > to_call && stack >= to_call + min_raise && (bet_to_call > my_bet || can_bet) {
        allowed.push(PlayerAction::Raise);
    }
    if !stack.is_zero() && (reopened || stack <= to_call) {
        allowed.push(PlayerAction::AllIn);
    }

    ActionRequest {
        seat: player.seat_index,
        allowed_actions: allowed,
        bet_to_call,
        min_raise,
        stack,
    }
}

/// Проверка, может ли место выполнить действие с указанной итоговой ставкой.
///
/// `amount` важен только для Bet/Raise: это итоговая ставка игрока в раунде.
pub fn validate_action(
    table: &Table,
    request: &ActionRequest,
    action: PlayerAction,
    amount: Chips,
) -> Result<(), EngineError> {
    if !request.allows(action) {
        return Err(match action {
            PlayerAction::Check if table.stage.is_betting_round() => EngineError::CannotCheck,
            PlayerAction::Call if table.stage.is_betting_round() => EngineError::CannotCall,
            PlayerAction::PostBlind if !table.stage.is_blind_stage() => EngineError::WrongStage {
                action,
                stage: table.stage,
            },
            _ => EngineError::ActionNotAllowed(action),
        });
    }

    let player = table
        .seat(request.seat)
        .ok_or(EngineError::InvalidSeat(request.seat))?;

    match action {
        PlayerAction::Bet | PlayerAction::Raise => {
            let max_total = player.current_bet + player.stack;
            if amount > max_total {
                return Err(EngineError::NotEnoughChips);
            }
            if amount <= request.bet_to_call {
                return Err(if action == PlayerAction::Bet {
                    EngineError::BetTooSmall
                } else {
                    EngineError::RaiseTooSmall
                });
            }
            let is_all_in = amount == max_total;
            let raise_size = amount - request.bet_to_call;
            if !is_all_in && raise_size < request.min_raise {
                return Err(if action == PlayerAction::Bet {
                    EngineError::BetTooSmall
                } else {
                    EngineError::RaiseTooSmall
                });
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &PlayerSeat, bet_to_call: Chips) -> Chips {
    bet_to_call.saturating_sub(player.current_bet)
}
