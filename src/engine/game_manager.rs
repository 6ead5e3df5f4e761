use std::collections::HashMap;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{
    Chips, Deck, GameStage, HandSummary, PlayerIdentity, PlayerSeat, PlayerStatus, SeatIndex,
    ShowdownPlayerInfo, Table, DEFAULT_SMALL_BLIND, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::engine::actions::{ActionRequest, PlayerAction};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{
    acting_order_from, in_hand_order_after_dealer, next_active_seat, seats_in_order_after,
};
use crate::engine::side_pots::compute_side_pots;
use crate::engine::validation::{allowed_actions, diff_to_call, validate_action};
use crate::engine::RandomSource;
use crate::eval::{compare_hand_results, evaluate_poker_hand, HandResult};

/// Параметры офлайн-игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub real_players: usize,
    pub bots: usize,
    pub initial_stack: Chips,
    pub small_blind: Chips,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            real_players: 1,
            bots: 5,
            initial_stack: Chips(1_000),
            small_blind: DEFAULT_SMALL_BLIND,
        }
    }
}

/// Статус раздачи после действия.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Раздача идёт, следующий запрос действия.
    Ongoing(ActionRequest),
    /// Раздача завершена.
    Finished(HandSummary, HandHistory),
}

/// Привести число игроков к допустимому диапазону 2..=9.
///
/// Не хватает игроков – добавляем ботов. Перебор – сокращаем ботов,
/// а если и реальных больше девяти, оставляем девять реальных.
pub fn clamp_player_counts(real: usize, bots: usize) -> (usize, usize) {
    let mut real = real;
    let mut bots = bots;
    let total = real + bots;

    if total < MIN_PLAYERS {
        warn!(total, "слишком мало игроков, добавляем ботов до {MIN_PLAYERS}");
        if real < MIN_PLAYERS {
            bots = MIN_PLAYERS - real;
        } else {
            bots = 0;
            real = MIN_PLAYERS;
        }
    } else if total > MAX_PLAYERS {
        warn!(total, "слишком много игроков, ограничиваем до {MAX_PLAYERS}");
        bots = MAX_PLAYERS.saturating_sub(real);
        real = real.min(MAX_PLAYERS);
    }

    (real, bots)
}

/// Менеджер офлайн-игры: один стол, один живой игрок (или несколько) и боты.
#[derive(Clone, Debug)]
pub struct OfflineGameManager {
    table: Table,
    deck: Deck,
    history: HandHistory,
}

impl OfflineGameManager {
    /// Рассадить игроков и ботов. Раздача не начинается.
    pub fn initialize_game(settings: &GameSettings, identity: &PlayerIdentity) -> Self {
        let small_blind = if settings.small_blind.is_zero() {
            warn!("некорректный малый блайнд {}, используем {}", settings.small_blind, DEFAULT_SMALL_BLIND);
            DEFAULT_SMALL_BLIND
        } else {
            settings.small_blind
        };

        let (real, bots) = clamp_player_counts(settings.real_players, settings.bots);

        let player_name = identity
            .username
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Player")
            .to_string();

        let mut seats = Vec::with_capacity(real + bots);
        for i in 0..(real + bots) {
            let seat_index = i as SeatIndex;
            let seat = if i < real {
                let mut s = PlayerSeat::new(seat_index, player_name.clone(), settings.initial_stack, false);
                s.player_id = identity.user_id;
                s
            } else {
                PlayerSeat::new(seat_index, format!("Bot {}", i - real + 1), settings.initial_stack, true)
            };
            seats.push(seat);
        }

        let table = Table::new(seats, small_blind);
        info!(
            sb = table.small_blind.0,
            bb = table.big_blind.0,
            seats = table.seat_count(),
            "офлайн-игра инициализирована"
        );

        Self {
            table,
            deck: Deck::standard_52(),
            history: HandHistory::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// История текущей (или последней завершённой) раздачи.
    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    /// Подготовить новую раздачу: кнопка, блайнды, колода.
    /// Возвращает запрос на постановку малого блайнда.
    pub fn start_new_hand<R: RandomSource>(&mut self, rng: &mut R) -> Result<ActionRequest, EngineError> {
        self.history = HandHistory::new();

        let t = &mut self.table;
        t.community_cards.clear();
        t.pot = Chips::ZERO;
        t.betting = BettingState::new(Chips::ZERO, t.big_blind);
        t.opener_seat = None;
        t.current_turn_seat = None;
        t.pending_small_blind_seat = None;
        t.pending_big_blind_seat = None;

        let mut active: Vec<SeatIndex> = Vec::new();
        for seat in t.seats.iter_mut() {
            seat.reset_for_new_hand();
            if seat.is_active_for_new_hand() {
                seat.status = PlayerStatus::Waiting;
                active.push(seat.seat_index);
            } else {
                seat.status = PlayerStatus::SittingOut;
            }
        }

        if active.len() < MIN_PLAYERS {
            warn!(active = active.len(), "недостаточно активных игроков для новой раздачи");
            t.stage = GameStage::WaitingForPlayers;
            return Err(EngineError::NotEnoughPlayers);
        }

        t.stage = GameStage::Dealing;

        let dealer = match t.dealer_seat {
            None => active[rng.gen_index(active.len())],
            Some(prev) => next_active_seat(t, prev, false)
                .ok_or(EngineError::Internal("не удалось выбрать дилера"))?,
        };
        t.dealer_seat = Some(dealer);
        t.seats[dealer as usize].is_dealer = true;

        self.deck.initialize();
        self.deck.shuffle(rng);

        let (sb, bb) = if active.len() == 2 {
            let bb = next_active_seat(t, dealer, false).ok_or(EngineError::Internal("нет места для BB"))?;
            (dealer, bb)
        } else {
            let sb = next_active_seat(t, dealer, false).ok_or(EngineError::Internal("нет места для SB"))?;
            let bb = next_active_seat(t, sb, false).ok_or(EngineError::Internal("нет места для BB"))?;
            (sb, bb)
        };

        t.hand_number += 1;
        t.pending_small_blind_seat = Some(sb);
        t.pending_big_blind_seat = Some(bb);
        t.stage = GameStage::WaitingForSmallBlind;
        t.seats[sb as usize].status = PlayerStatus::MustPostSmallBlind;

        self.history.push(HandEventKind::HandStarted {
            hand_id: t.hand_number,
            dealer,
            small_blind_seat: sb,
            big_blind_seat: bb,
        });
        info!(hand = t.hand_number, dealer, sb, bb, "раздача подготовлена, ждём малый блайнд");

        Ok(self.request_player_action(sb))
    }

    /// Передать ход месту и вернуть доступные ему действия.
    pub fn request_player_action(&mut self, seat: SeatIndex) -> ActionRequest {
        let t = &mut self.table;
        if t.seat(seat).is_none() {
            warn!(seat, "запрос действия для несуществующего места");
            return ActionRequest::empty(seat, Chips::ZERO, Chips::ZERO);
        }

        if let Some(prev) = t.current_turn_seat {
            if prev != seat {
                if let Some(p) = t.seat_mut(prev) {
                    p.is_turn = false;
                }
            }
        }
        t.current_turn_seat = Some(seat);
        t.seats[seat as usize].is_turn = true;

        let request = allowed_actions(t, seat);
        debug!(
            seat,
            stage = ?t.stage,
            allowed = ?request.allowed_actions,
            bet_to_call = request.bet_to_call.0,
            min_raise = request.min_raise.0,
            stack = request.stack.0,
            "запрос действия"
        );
        request
    }

    /// Применить действие места, чей сейчас ход.
    ///
    /// `amount` – итоговая ставка игрока в раунде для Bet/Raise, иначе игнорируется.
    pub fn process_player_action(&mut self, action: PlayerAction, amount: Chips) -> Result<HandStatus, EngineError> {
        let seat = self.table.current_turn_seat.ok_or(EngineError::NoActiveHand)?;
        if self.table.seat(seat).is_none() {
            return Err(EngineError::InvalidSeat(seat));
        }

        debug!(seat, %action, amount = amount.0, stage = ?self.table.stage, "действие игрока");

        match self.table.stage {
            GameStage::WaitingForSmallBlind => self.post_small_blind(seat, action),
            GameStage::WaitingForBigBlind => self.post_big_blind(seat, action),
            stage if stage.is_betting_round() => self.apply_betting_action(seat, action, amount),
            _ => Err(EngineError::NoActiveHand),
        }
    }

    /// То же, что `process_player_action`, но с проверкой, что ходит именно `seat`.
    pub fn process_seat_action(
        &mut self,
        seat: SeatIndex,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<HandStatus, EngineError> {
        if self.table.seat(seat).is_none() {
            return Err(EngineError::InvalidSeat(seat));
        }
        if self.table.current_turn_seat != Some(seat) {
            return Err(EngineError::NotPlayersTurn(seat));
        }
        self.process_player_action(action, amount)
    }

    fn post_small_blind(&mut self, seat: SeatIndex, action: PlayerAction) -> Result<HandStatus, EngineError> {
        let request = allowed_actions(&self.table, seat);
        validate_action(&self.table, &request, action, Chips::ZERO)?;

        self.post_blind(seat, self.table.small_blind, false);

        let bb = self
            .table
            .pending_big_blind_seat
            .ok_or(EngineError::Internal("не назначен большой блайнд"))?;
        self.table.stage = GameStage::WaitingForBigBlind;
        self.table.seats[bb as usize].status = PlayerStatus::MustPostBigBlind;

        Ok(HandStatus::Ongoing(self.request_player_action(bb)))
    }

    fn post_big_blind(&mut self, seat: SeatIndex, action: PlayerAction) -> Result<HandStatus, EngineError> {
        let request = allowed_actions(&self.table, seat);
        validate_action(&self.table, &request, action, Chips::ZERO)?;

        self.post_blind(seat, self.table.big_blind, true);
        self.table.betting = BettingState::new(self.table.big_blind, self.table.big_blind);

        self.deal_hole_cards_and_start_preflop()
    }

    fn post_blind(&mut self, seat: SeatIndex, amount: Chips, is_big_blind: bool) {
        let t = &mut self.table;
        let p = &mut t.seats[seat as usize];
        p.status = PlayerStatus::Playing;
        if is_big_blind {
            p.is_big_blind = true;
        } else {
            p.is_small_blind = true;
        }
        p.is_turn = false;
        let paid = p.commit_chips(amount);
        let stack_after = p.stack;
        t.pot += paid;

        self.history.push(HandEventKind::BlindPosted {
            seat,
            amount: paid,
            is_big_blind,
        });
        info!(seat, paid = paid.0, stack = stack_after.0, pot = t.pot.0, is_big_blind, "блайнд поставлен");
    }

    fn deal_hole_cards_and_start_preflop(&mut self) -> Result<HandStatus, EngineError> {
        for seat in self.table.seats.iter_mut() {
            if seat.status == PlayerStatus::Waiting && seat.is_active_for_new_hand() {
                seat.status = PlayerStatus::Playing;
            }
        }

        let mut order = in_hand_order_after_dealer(&self.table);
        if order.len() < MIN_PLAYERS {
            warn!(players = order.len(), "после блайндов недостаточно игроков для раздачи карт");
            self.table.stage = GameStage::WaitingForPlayers;
            return Err(EngineError::NotEnoughPlayers);
        }

        // В хедз-апе первую карту получает SB (он же дилер).
        let heads_up = order.len() == 2;
        if heads_up {
            if let Some(sb) = self.table.pending_small_blind_seat {
                if let Some(pos) = order.iter().position(|s| *s == sb) {
                    order.rotate_left(pos);
                }
            }
        }

        for _ in 0..2 {
            for &seat in &order {
                let card = self.deck.deal_card().ok_or(EngineError::DeckExhausted)?;
                self.table.seats[seat as usize].hole_cards.push(card);
            }
        }
        for &seat in &order {
            let cards = self.table.seats[seat as usize].hole_cards.clone();
            debug!(seat, cards = ?cards, "карманные карты");
            self.history.push(HandEventKind::HoleCardsDealt { seat, cards });
        }

        self.table.stage = GameStage::Preflop;
        self.history.push(HandEventKind::StageChanged {
            stage: GameStage::Preflop,
        });

        let bb = self
            .table
            .pending_big_blind_seat
            .ok_or(EngineError::Internal("не назначен большой блайнд"))?;
        let first = if heads_up {
            self.table
                .pending_small_blind_seat
                .ok_or(EngineError::Internal("не назначен малый блайнд"))?
        } else {
            ((bb as usize + 1) % self.table.seat_count()) as SeatIndex
        };

        self.open_betting_round(first)
    }

    /// Собрать очередь ходящих начиная с `first` и передать ход первому.
    /// Если ходить некому – сразу к следующей улице.
    fn open_betting_round(&mut self, first: SeatIndex) -> Result<HandStatus, EngineError> {
        let t = &mut self.table;
        let mut order = acting_order_from(t, first);

        // Один способный ставить игрок против олл-инов действует, только если ему есть что уравнивать.
        if t.players_able_to_act() <= 1 {
            let bet_to_call = t.bet_to_call();
            order.retain(|s| t.seats[*s as usize].current_bet < bet_to_call);
        }

        t.opener_seat = order.first().copied();
        t.betting.to_act = order;

        match t.betting.next_to_act() {
            Some(seat) => Ok(HandStatus::Ongoing(self.request_player_action(seat))),
            None => self.advance_street(),
        }
    }

    fn apply_betting_action(
        &mut self,
        seat: SeatIndex,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<HandStatus, EngineError> {
        let request = allowed_actions(&self.table, seat);
        validate_action(&self.table, &request, action, amount)?;

        let bet_to_call = self.table.bet_to_call();

        match action {
            PlayerAction::Fold => {
                self.table.seats[seat as usize].status = PlayerStatus::Folded;
            }
            PlayerAction::Check => {
                self.table.seats[seat as usize].status = PlayerStatus::Checked;
            }
            PlayerAction::Call => {
                let to_call = diff_to_call(&self.table.seats[seat as usize], bet_to_call);
                self.put_chips(seat, to_call);
                let p = &mut self.table.seats[seat as usize];
                if p.status != PlayerStatus::AllIn {
                    p.status = PlayerStatus::Called;
                }
            }
            PlayerAction::Bet | PlayerAction::Raise | PlayerAction::AllIn => {
                let p = &self.table.seats[seat as usize];
                let target = if action == PlayerAction::AllIn {
                    p.current_bet + p.stack
                } else {
                    amount
                };
                let add = target.saturating_sub(p.current_bet);
                self.put_chips(seat, add);

                if target > bet_to_call {
                    let raise_size = target - bet_to_call;
                    let t = &mut self.table;
                    let others: Vec<SeatIndex> = seats_in_order_after(t, seat)
                        .into_iter()
                        .filter(|s| *s != seat && t.seats[*s as usize].can_act())
                        .collect();

                    if raise_size >= t.betting.min_raise {
                        t.betting.on_raise(seat, target, raise_size, others);
                    } else {
                        let need_to_respond: Vec<SeatIndex> = others
                            .into_iter()
                            .filter(|s| t.seats[*s as usize].current_bet < target)
                            .collect();
                        t.betting.on_short_all_in(seat, target, need_to_respond);
                    }

                    let p = &mut t.seats[seat as usize];
                    if p.status != PlayerStatus::AllIn {
                        p.status = if bet_to_call.is_zero() {
                            PlayerStatus::Bet
                        } else {
                            PlayerStatus::Raised
                        };
                    }
                }
            }
            PlayerAction::PostBlind => {
                return Err(EngineError::WrongStage {
                    action,
                    stage: self.table.stage,
                });
            }
        }

        let t = &mut self.table;
        {
            let p = &mut t.seats[seat as usize];
            p.has_acted_this_round = true;
            p.is_turn = false;
        }
        t.betting.mark_acted(seat);

        let p = &t.seats[seat as usize];
        self.history.push(HandEventKind::PlayerActed {
            seat,
            action,
            total_bet: p.current_bet,
            new_stack: p.stack,
            pot_after: t.pot,
        });
        info!(seat, %action, bet = p.current_bet.0, stack = p.stack.0, pot = t.pot.0, "действие применено");

        if t.players_in_hand() == 1 {
            return Ok(self.finish_hand_without_showdown());
        }

        match t.betting.next_to_act() {
            Some(next) => Ok(HandStatus::Ongoing(self.request_player_action(next))),
            None => self.advance_street(),
        }
    }

    /// Перенести фишки места в банк.
    fn put_chips(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let paid = self.table.seats[seat as usize].commit_chips(amount);
        self.table.pot += paid;
        paid
    }

    /// Закрыть раунд ставок: открыть следующую улицу или перейти к вскрытию.
    fn advance_street(&mut self) -> Result<HandStatus, EngineError> {
        let next = self
            .table
            .stage
            .next_street()
            .ok_or(EngineError::Internal("переход улицы вне раунда ставок"))?;

        if next == GameStage::Showdown {
            return Ok(self.finish_hand_with_showdown());
        }

        for seat in self.table.seats.iter_mut() {
            seat.current_bet = Chips::ZERO;
            seat.has_acted_this_round = false;
            if matches!(
                seat.status,
                PlayerStatus::Checked | PlayerStatus::Called | PlayerStatus::Bet | PlayerStatus::Raised
            ) {
                seat.status = PlayerStatus::Playing;
            }
        }

        let n = next.board_cards_to_deal();
        let cards = self.deck.deal_n(n);
        if cards.len() < n {
            return Err(EngineError::DeckExhausted);
        }
        self.table.community_cards.extend_from_slice(&cards);
        self.table.stage = next;
        self.history.push(HandEventKind::StageChanged { stage: next });
        self.history.push(HandEventKind::BoardDealt {
            stage: next,
            cards: cards.clone(),
        });
        info!(stage = ?next, board = ?self.table.community_cards, "новая улица");

        let big_blind = self.table.big_blind;
        self.table.betting.reset_for_street(big_blind, Vec::new());

        let dealer = self
            .table
            .dealer_seat
            .ok_or(EngineError::Internal("дилер не назначен"))?;
        let first = ((dealer as usize + 1) % self.table.seat_count()) as SeatIndex;
        self.open_betting_round(first)
    }

    fn finish_hand_without_showdown(&mut self) -> HandStatus {
        let stage_reached = self.table.stage;
        let pot = self.table.pot;

        let mut won: HashMap<SeatIndex, Chips> = HashMap::new();
        if let Some(winner) = self.table.seats.iter().find(|s| s.is_in_hand()).map(|s| s.seat_index) {
            self.table.seats[winner as usize].stack += pot;
            self.history.push(HandEventKind::PotAwarded { seat: winner, amount: pot });
            info!(seat = winner, amount = pot.0, "банк забран без вскрытия");
            won.insert(winner, pot);
        }

        self.finalize_hand(stage_reached, false, &HashMap::new(), &won)
    }

    fn finish_hand_with_showdown(&mut self) -> HandStatus {
        let stage_reached = self.table.stage;
        self.table.stage = GameStage::Showdown;
        self.history.push(HandEventKind::StageChanged {
            stage: GameStage::Showdown,
        });

        let contenders = in_hand_order_after_dealer(&self.table);

        let mut results: HashMap<SeatIndex, HandResult> = HashMap::new();
        for &seat in &contenders {
            let p = &self.table.seats[seat as usize];
            let result = evaluate_poker_hand(&p.hole_cards, &self.table.community_cards);
            self.history.push(HandEventKind::ShowdownReveal {
                seat,
                hole_cards: p.hole_cards.clone(),
                result: result.clone(),
            });
            info!(seat, hand = result.rank.russian_name(), "вскрытие");
            results.insert(seat, result);
        }

        let contributions: HashMap<SeatIndex, Chips> = self
            .table
            .seats
            .iter()
            .map(|s| (s.seat_index, s.total_contribution))
            .collect();
        let pots = compute_side_pots(&contributions);

        let mut won: HashMap<SeatIndex, Chips> = HashMap::new();
        for pot in &pots {
            if pot.amount.is_zero() {
                continue;
            }

            // Претенденты в порядке от дилера – так же раздаются нечётные фишки.
            let mut eligible: Vec<SeatIndex> = contenders
                .iter()
                .copied()
                .filter(|s| pot.contributors.contains(s))
                .collect();
            if eligible.is_empty() {
                warn!(amount = pot.amount.0, "в сайд-поте не осталось претендентов, делим между всеми");
                eligible = contenders.clone();
            }

            let winners = best_hands(&eligible, &results);
            if winners.is_empty() {
                continue;
            }

            let (share, odd_chips) = pot.amount.split(winners.len());
            for (i, &seat) in winners.iter().enumerate() {
                let prize = if (i as u64) < odd_chips { share + Chips(1) } else { share };
                *won.entry(seat).or_insert(Chips::ZERO) += prize;
            }
        }

        for &seat in &contenders {
            if let Some(&amount) = won.get(&seat) {
                self.table.seats[seat as usize].stack += amount;
                self.history.push(HandEventKind::PotAwarded { seat, amount });
                info!(seat, amount = amount.0, "выигрыш");
            }
        }

        self.finalize_hand(stage_reached, true, &results, &won)
    }

    fn finalize_hand(
        &mut self,
        stage_reached: GameStage,
        went_to_showdown: bool,
        results: &HashMap<SeatIndex, HandResult>,
        won: &HashMap<SeatIndex, Chips>,
    ) -> HandStatus {
        let t = &mut self.table;
        let total_pot = t.pot;
        t.pot = Chips::ZERO;
        t.stage = GameStage::Showdown;
        t.current_turn_seat = None;
        t.betting.to_act.clear();

        let mut players = Vec::new();
        for seat in t.seats.iter_mut() {
            seat.is_turn = false;
            if seat.hole_cards.is_empty() && seat.total_contribution.is_zero() {
                continue;
            }
            let amount_won = won.get(&seat.seat_index).copied().unwrap_or(Chips::ZERO);
            players.push(ShowdownPlayerInfo {
                seat_index: seat.seat_index,
                player_name: seat.player_name.clone(),
                hole_cards: seat.hole_cards.clone(),
                hand_result: results.get(&seat.seat_index).cloned(),
                is_winner: !amount_won.is_zero(),
                amount_won,
                status: seat.status,
                net_result: amount_won.0 as i64 - seat.total_contribution.0 as i64,
            });
        }

        let summary = HandSummary {
            hand_id: t.hand_number,
            stage_reached,
            board: t.community_cards.clone(),
            total_pot,
            went_to_showdown,
            players,
        };

        self.history.push(HandEventKind::HandFinished {
            hand_id: t.hand_number,
        });
        info!(hand = t.hand_number, pot = total_pot.0, went_to_showdown, "раздача завершена");

        HandStatus::Finished(summary, self.history.clone())
    }
}

/// Места с лучшей рукой среди `eligible` (порядок сохраняется).
fn best_hands(eligible: &[SeatIndex], results: &HashMap<SeatIndex, HandResult>) -> Vec<SeatIndex> {
    let mut best: Option<&HandResult> = None;
    let mut winners: Vec<SeatIndex> = Vec::new();

    for seat in eligible {
        let Some(result) = results.get(seat) else {
            continue;
        };
        match best.map(|b| compare_hand_results(result, b)) {
            None | Some(Ordering::Greater) => {
                best = Some(result);
                winners.clear();
                winners.push(*seat);
            }
            Some(Ordering::Equal) => winners.push(*seat),
            Some(Ordering::Less) => {}
        }
    }

    winners
}
