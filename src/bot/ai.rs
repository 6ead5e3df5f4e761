use tracing::{debug, info, warn};

use crate::bot::personality::BotPersonality;
use crate::bot::position::{count_active_opponents, player_position, PokerPosition};
use crate::bot::sizing::{bet_size, raise_size};
use crate::bot::strength::{draw_strength, is_scary_board, pot_odds, preflop_hand_strength, score_for_made_hand};
use crate::domain::{Card, Chips, GameStage, PlayerSeat, PlayerStatus, SeatIndex, Table};
use crate::engine::{ActionRequest, PlayerAction, RandomSource};
use crate::eval::{evaluate_poker_hand, HandResult, PokerHandRank};

const POSTFLOP_CALL_THRESHOLD: f32 = 0.30;

/// Всё, что бот знает о своём ходе.
struct Spot<'a> {
    table: &'a Table,
    bot: &'a PlayerSeat,
    request: &'a ActionRequest,
    position: PokerPosition,
    active_players: usize,
    opponents: usize,
    facing_bet: bool,
    to_call: Chips,
}

impl Spot<'_> {
    fn allows(&self, action: PlayerAction) -> bool {
        self.request.allows(action)
    }

    fn first_allowed(&self) -> PlayerAction {
        self.request
            .allowed_actions
            .first()
            .copied()
            .unwrap_or(PlayerAction::Fold)
    }

    fn pot_odds(&self) -> f32 {
        pot_odds(self.table.pot, self.to_call)
    }
}

/// Бот офлайн-стола.
///
/// В тестовом режиме (`testing = Some(x)`) все броски возвращают `x`,
/// а доли банка берутся с нижней границы или из середины диапазона.
#[derive(Clone, Debug, Default)]
pub struct BotAi {
    pub personality: BotPersonality,
    pub testing: Option<f32>,
}

impl BotAi {
    pub fn new(personality: BotPersonality) -> Self {
        Self {
            personality,
            testing: None,
        }
    }

    /// Детерминированный бот: броски всегда дают `fixed_roll`.
    pub fn testing(personality: BotPersonality, fixed_roll: f32) -> Self {
        Self {
            personality,
            testing: Some(fixed_roll),
        }
    }

    pub fn set_personality(&mut self, personality: BotPersonality) {
        self.personality = BotPersonality::new(
            personality.aggressiveness,
            personality.bluff_frequency,
            personality.tightness,
        );
        debug!(
            aggr = self.personality.aggressiveness,
            bluff = self.personality.bluff_frequency,
            tight = self.personality.tightness,
            "характер бота обновлён"
        );
    }

    fn roll<R: RandomSource>(&self, rng: &mut R) -> f32 {
        match self.testing {
            Some(v) => v,
            None => rng.next_unit(),
        }
    }

    fn pot_fraction<R: RandomSource>(&self, rng: &mut R, low: f32, high: f32, test_value: f32) -> f32 {
        if self.testing.is_some() {
            test_value
        } else {
            rng.gen_range_f32(low, high)
        }
    }

    pub fn player_position(&self, table: &Table, seat: SeatIndex, active: usize) -> PokerPosition {
        player_position(table, seat, active)
    }

    pub fn preflop_hand_strength(&self, c1: Card, c2: Card, position: PokerPosition, active: usize) -> f32 {
        preflop_hand_strength(c1, c2, position, active, self.personality.tightness)
    }

    pub fn score_for_made_hand(&self, rank: PokerHandRank) -> f32 {
        score_for_made_hand(rank)
    }

    pub fn count_active_opponents(&self, table: &Table, seat: SeatIndex) -> usize {
        count_active_opponents(table, seat)
    }

    /// Итоговая ставка для бета. `fraction` – доля банка, иначе по силе руки.
    pub fn bet_size(&self, table: &Table, bot: &PlayerSeat, strength: f32, fraction: Option<f32>) -> Chips {
        bet_size(table.pot, table.big_blind, bot, strength, fraction)
    }

    /// Итоговая ставка для рейза.
    pub fn raise_size(
        &self,
        table: &Table,
        bot: &PlayerSeat,
        request: &ActionRequest,
        strength: f32,
        fraction: Option<f32>,
    ) -> Chips {
        raise_size(
            table.pot,
            bot,
            request.bet_to_call,
            request.min_raise,
            strength,
            self.personality.aggressiveness,
            fraction,
        )
    }

    /// Стоит ли блефовать: 1–2 соперника, поздняя позиция, сухой борд и признаки слабости.
    pub fn should_attempt_bluff<R: RandomSource>(
        &self,
        table: &Table,
        bot: &PlayerSeat,
        position: PokerPosition,
        opponents: usize,
        rng: &mut R,
    ) -> bool {
        if opponents == 0 || opponents > 2 {
            return false;
        }

        let good_position = matches!(position, PokerPosition::Btn | PokerPosition::Co)
            || (table.stage == GameStage::River && position == PokerPosition::Hj && opponents == 1);
        if !good_position {
            return false;
        }

        if is_scary_board(&table.community_cards) {
            return false;
        }

        let aggressor = table.betting.last_aggressor;
        let checked_to = table.bet_to_call() == bot.current_bet && aggressor != Some(bot.seat_index);
        let opened_unopposed = table.opener_seat == Some(bot.seat_index)
            && aggressor.is_none()
            && table.bet_to_call().is_zero();
        if !(checked_to || opened_unopposed) {
            return false;
        }

        let p = &self.personality;
        let threshold = p.bluff_frequency * (0.4 + p.aggressiveness * 0.6);
        let roll = self.roll(rng);
        debug!(roll, threshold, "проверка блефа");
        roll < threshold
    }

    /// Выбрать действие и итоговую ставку (для Bet/Raise) для места `seat`.
    pub fn best_action<R: RandomSource>(
        &self,
        table: &Table,
        seat: SeatIndex,
        request: &ActionRequest,
        rng: &mut R,
    ) -> (PlayerAction, Chips) {
        let Some(bot) = table.seat(seat) else {
            warn!(seat, "бот: место не найдено, фолд");
            return (PlayerAction::Fold, Chips::ZERO);
        };
        if request.is_empty() {
            warn!(seat, "бот: нет доступных действий, фолд");
            return (PlayerAction::Fold, Chips::ZERO);
        }

        let blind_turn = (table.stage == GameStage::WaitingForSmallBlind
            && bot.status == PlayerStatus::MustPostSmallBlind)
            || (table.stage == GameStage::WaitingForBigBlind && bot.status == PlayerStatus::MustPostBigBlind);
        if blind_turn {
            if request.allows(PlayerAction::PostBlind) {
                return (PlayerAction::PostBlind, Chips::ZERO);
            }
            warn!(seat, allowed = ?request.allowed_actions, "бот: ожидается блайнд, но PostBlind недоступен");
            return (request.allowed_actions[0], Chips::ZERO);
        }

        let mut active_players = table.active_player_count();
        if active_players == 0 {
            active_players = table.seat_count();
        }

        let facing_bet = request.bet_to_call > bot.current_bet;
        let spot = Spot {
            table,
            bot,
            request,
            position: player_position(table, seat, active_players),
            active_players,
            opponents: count_active_opponents(table, seat),
            facing_bet,
            to_call: request.bet_to_call.saturating_sub(bot.current_bet),
        };

        let (action, amount, strength) = match table.stage {
            GameStage::Preflop => self.preflop_decision(&spot, rng),
            GameStage::Flop | GameStage::Turn | GameStage::River => self.postflop_decision(&spot, rng),
            _ => (spot.first_allowed(), Chips::ZERO, 0.0),
        };

        let (action, amount) = self.finalize(&spot, action, amount);
        info!(
            bot = %bot.player_name,
            seat,
            position = %spot.position,
            strength,
            %action,
            amount = amount.0,
            "решение бота"
        );
        (action, amount)
    }

    fn is_open_raiser_situation(&self, spot: &Spot<'_>) -> bool {
        let t = spot.table;
        if t.stage != GameStage::Preflop {
            return false;
        }
        let no_real_aggression = match t.betting.last_aggressor {
            None => true,
            Some(s) => Some(s) == t.pending_small_blind_seat || Some(s) == t.pending_big_blind_seat,
        };
        no_real_aggression && spot.bot.current_bet <= t.big_blind
    }

    fn preflop_decision<R: RandomSource>(&self, spot: &Spot<'_>, rng: &mut R) -> (PlayerAction, Chips, f32) {
        use PlayerAction::*;

        let bot = spot.bot;
        let t = spot.table;
        if bot.hole_cards.len() != 2 {
            warn!(seat = bot.seat_index, cards = bot.hole_cards.len(), "бот: на префлопе нет двух карт");
            return (Fold, Chips::ZERO, 0.0);
        }

        let strength = self.preflop_hand_strength(bot.hole_cards[0], bot.hole_cards[1], spot.position, spot.active_players);

        let p = &self.personality;
        let open_bonus = if self.is_open_raiser_situation(spot) { 0.05 } else { 0.0 };
        let mut raise_threshold = 0.70 - p.tightness * 0.20 - p.aggressiveness * 0.10 - open_bonus;
        let mut call_threshold = 0.40 - p.tightness * 0.15 - p.aggressiveness * 0.05 - open_bonus;

        let btc = spot.request.bet_to_call;
        let completing_blind = (spot.position == PokerPosition::Sb && btc == t.big_blind && bot.current_bet == t.small_blind)
            || (spot.position == PokerPosition::Bb && btc == t.big_blind && bot.current_bet == t.big_blind);
        if completing_blind {
            call_threshold -= 0.15;
            raise_threshold -= 0.10;
        }
        debug!(strength, raise_threshold, call_threshold, "пороги префлопа");

        if strength >= raise_threshold {
            if spot.allows(Raise) {
                return (Raise, self.raise_size(t, bot, spot.request, strength, None), strength);
            }
            if !spot.facing_bet && spot.allows(Bet) {
                return (Bet, self.bet_size(t, bot, strength, None), strength);
            }
            if spot.allows(Call) {
                return (Call, Chips::ZERO, strength);
            }
            return (Fold, Chips::ZERO, strength);
        }

        if strength >= call_threshold {
            if !spot.facing_bet {
                let roll = self.roll(rng);
                if spot.allows(Bet) && roll < 0.05 + p.aggressiveness * 0.25 {
                    return (Bet, self.bet_size(t, bot, strength, Some(0.5)), strength);
                }
                if spot.allows(Check) {
                    return (Check, Chips::ZERO, strength);
                }
                if spot.allows(Call) {
                    return (Call, Chips::ZERO, strength);
                }
                return (Fold, Chips::ZERO, strength);
            }
            if spot.allows(Call) {
                let price_ok = !spot.to_call.is_zero()
                    && !t.pot.is_zero()
                    && spot.pot_odds() < 0.4 + p.tightness * 0.1;
                if price_ok || !spot.allows(Fold) {
                    return (Call, Chips::ZERO, strength);
                }
                return (Fold, Chips::ZERO, strength);
            }
            if spot.allows(Fold) {
                return (Fold, Chips::ZERO, strength);
            }
            return (spot.first_allowed(), Chips::ZERO, strength);
        }

        // Слабая рука.
        if !spot.facing_bet && spot.allows(Check) {
            return (Check, Chips::ZERO, strength);
        }
        if spot.allows(Fold) {
            let roll = self.roll(rng);
            let defend_bb = spot.position == PokerPosition::Bb
                && spot.allows(Call)
                && spot.to_call <= t.big_blind
                && roll < 0.4 - p.tightness * 0.3;
            return if defend_bb {
                (Call, Chips::ZERO, strength)
            } else {
                (Fold, Chips::ZERO, strength)
            };
        }
        if spot.allows(Call) {
            return (Call, Chips::ZERO, strength);
        }
        (spot.first_allowed(), Chips::ZERO, strength)
    }

    fn postflop_decision<R: RandomSource>(&self, spot: &Spot<'_>, rng: &mut R) -> (PlayerAction, Chips, f32) {
        use PlayerAction::*;

        let bot = spot.bot;
        let t = spot.table;
        if bot.hole_cards.len() != 2 {
            warn!(seat = bot.seat_index, cards = bot.hole_cards.len(), "бот: на постфлопе нет двух карт");
            return (Fold, Chips::ZERO, 0.0);
        }

        let made: HandResult = evaluate_poker_hand(&bot.hole_cards, &t.community_cards);
        let made_score = score_for_made_hand(made.rank);
        let draw = draw_strength(&bot.hole_cards, &t.community_cards, t.pot, spot.to_call);

        let strength = if draw > 0.65 && made_score < 0.4 {
            draw
        } else if made_score >= 0.05 {
            made_score + draw * (0.5 + (0.1 - 0.5) * made_score)
        } else {
            draw
        }
        .clamp(0.0, 1.0);

        debug!(hand = ?made.rank, made_score, draw, strength, "сила руки на постфлопе");

        let p = &self.personality;
        let passive = 0.1 * (1.0 - p.aggressiveness);
        let monster_threshold = 0.80 - passive;
        let strong_threshold = 0.65 - passive;
        let value_threshold = 0.50 - passive;

        let bluffing = strength < 0.30
            && !spot.facing_bet
            && spot.allows(Bet)
            && self.should_attempt_bluff(t, bot, spot.position, spot.opponents, rng);

        if bluffing {
            let fraction = self.pot_fraction(rng, 0.4, 0.6, 0.5);
            info!(seat = bot.seat_index, "бот блефует");
            return (Bet, self.bet_size(t, bot, 0.55, Some(fraction)), strength);
        }

        if strength >= monster_threshold {
            if spot.allows(Raise) {
                let fraction = self.pot_fraction(rng, 0.75, 1.2, 0.75);
                return (Raise, self.raise_size(t, bot, spot.request, strength, Some(fraction)), strength);
            }
            if !spot.facing_bet && spot.allows(Bet) {
                let fraction = self.pot_fraction(rng, 0.66, 1.0, 0.66);
                return (Bet, self.bet_size(t, bot, strength, Some(fraction)), strength);
            }
            return (passive_continue(spot), Chips::ZERO, strength);
        }

        if strength >= strong_threshold {
            let roll = self.roll(rng);
            if spot.allows(Raise) && roll < 0.3 + p.aggressiveness * 0.5 {
                let fraction = self.pot_fraction(rng, 0.5, 0.75, 0.5);
                return (Raise, self.raise_size(t, bot, spot.request, strength, Some(fraction)), strength);
            }
            if !spot.facing_bet && spot.allows(Bet) {
                let fraction = self.pot_fraction(rng, 0.5, 0.75, 0.5);
                return (Bet, self.bet_size(t, bot, strength, Some(fraction)), strength);
            }
            return (passive_continue(spot), Chips::ZERO, strength);
        }

        if strength >= value_threshold {
            if !spot.facing_bet {
                let roll = self.roll(rng);
                if spot.allows(Bet) && roll < 0.5 + p.aggressiveness * 0.4 {
                    let fraction = if draw > 0.5 {
                        self.pot_fraction(rng, 0.5, 0.75, 0.625)
                    } else {
                        self.pot_fraction(rng, 0.33, 0.6, 0.465)
                    };
                    return (Bet, self.bet_size(t, bot, strength, Some(fraction)), strength);
                }
                if spot.allows(Check) {
                    return (Check, Chips::ZERO, strength);
                }
                if spot.allows(Call) {
                    return (Call, Chips::ZERO, strength);
                }
                return (Fold, Chips::ZERO, strength);
            }
            if spot.allows(Call) {
                let good_price = !spot.to_call.is_zero()
                    && !t.pot.is_zero()
                    && strength * (1.5 - p.tightness) > spot.pot_odds();
                if good_price || !spot.allows(Fold) {
                    return (Call, Chips::ZERO, strength);
                }
            }
            return (Fold, Chips::ZERO, strength);
        }

        if strength >= POSTFLOP_CALL_THRESHOLD {
            if !spot.facing_bet {
                if spot.allows(Check) {
                    return (Check, Chips::ZERO, strength);
                }
                if spot.allows(Call) {
                    return (Call, Chips::ZERO, strength);
                }
                return (Fold, Chips::ZERO, strength);
            }
            if spot.allows(Call) {
                let draw_priced_in = draw > 0.1
                    && !spot.to_call.is_zero()
                    && !t.pot.is_zero()
                    && draw > spot.pot_odds() * 0.8;
                if draw_priced_in || made_score >= POSTFLOP_CALL_THRESHOLD * 0.9 || !spot.allows(Fold) {
                    return (Call, Chips::ZERO, strength);
                }
            }
            return (Fold, Chips::ZERO, strength);
        }

        // Слабая рука.
        if !spot.facing_bet && spot.allows(Check) {
            return (Check, Chips::ZERO, strength);
        }
        if spot.allows(Fold) {
            return (Fold, Chips::ZERO, strength);
        }
        // Фолд недоступен: колл вынужденный.
        if spot.allows(Call) {
            return (Call, Chips::ZERO, strength);
        }
        (spot.first_allowed(), Chips::ZERO, strength)
    }

    /// Последняя проверка: действие должно быть разрешено, сумма – корректна.
    fn finalize(&self, spot: &Spot<'_>, action: PlayerAction, amount: Chips) -> (PlayerAction, Chips) {
        use PlayerAction::*;

        let bot = spot.bot;
        let mut action = action;
        let mut amount = amount;

        if !spot.allows(action) {
            let fallback = if spot.allows(Check) && !spot.facing_bet {
                Check
            } else if spot.allows(Call) && spot.facing_bet {
                Call
            } else if spot.allows(Fold) {
                Fold
            } else {
                spot.first_allowed()
            };
            warn!(seat = bot.seat_index, chosen = %action, fallback = %fallback, "бот выбрал недоступное действие");
            action = fallback;
            amount = Chips::ZERO;
        }

        if !matches!(action, Bet | Raise) {
            return (action, Chips::ZERO);
        }

        let max_total = bot.current_bet + bot.stack;
        if amount <= bot.current_bet && amount < max_total {
            let fallback = if !spot.facing_bet && spot.allows(Check) {
                Check
            } else if spot.facing_bet && spot.allows(Call) {
                Call
            } else if spot.allows(Fold) {
                Fold
            } else {
                spot.first_allowed()
            };
            warn!(seat = bot.seat_index, amount = amount.0, fallback = %fallback, "бот: ставка не больше текущей");
            return (fallback, Chips::ZERO);
        }
        if amount > max_total {
            amount = max_total;
        }

        let btc = spot.request.bet_to_call;
        if action == Bet {
            let added = amount.saturating_sub(bot.current_bet);
            let too_small = (added < spot.table.big_blind && added < bot.stack) || added.is_zero();
            if too_small && amount < max_total {
                let fallback = if !spot.facing_bet && spot.allows(Check) {
                    Check
                } else if spot.allows(Fold) {
                    Fold
                } else if spot.facing_bet && spot.allows(Call) {
                    Call
                } else {
                    spot.first_allowed()
                };
                warn!(seat = bot.seat_index, amount = amount.0, fallback = %fallback, "бот: бет слишком мал");
                return (fallback, Chips::ZERO);
            }
        } else {
            let pure_raise = amount.saturating_sub(btc);
            let invalid = (amount <= btc || pure_raise < spot.request.min_raise) && amount < max_total;
            if invalid && max_total > btc {
                let fallback = if spot.allows(Call) {
                    Call
                } else if spot.allows(Fold) {
                    Fold
                } else {
                    spot.first_allowed()
                };
                warn!(seat = bot.seat_index, amount = amount.0, fallback = %fallback, "бот: рейз слишком мал");
                return (fallback, Chips::ZERO);
            }
        }

        (action, amount)
    }
}

/// Сильная рука, но ставить нельзя: колл, чек или фолд.
fn passive_continue(spot: &Spot<'_>) -> PlayerAction {
    if spot.allows(PlayerAction::Call) {
        PlayerAction::Call
    } else if spot.allows(PlayerAction::Check) {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    }
}
