//! Боты: позиции, сила рук, размер ставок и решения на реальном столе.

use poker_client::bot::{
    bet_size, count_active_opponents, draw_strength, is_scary_board, player_position, pot_odds,
    preflop_hand_strength, raise_size, score_for_made_hand, BotAi, BotPersonality, PokerPosition,
};
use poker_client::domain::{parse_cards, Card, Chips, GameStage, PlayerIdentity, PlayerSeat, PlayerStatus, Table};
use poker_client::engine::{ActionRequest, GameSettings, HandStatus, OfflineGameManager, PlayerAction};
use poker_client::eval::PokerHandRank;
use poker_client::infra::FixedRng;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

fn table_of(n: usize, dealer: u8) -> Table {
    let seats = (0..n)
        .map(|i| PlayerSeat::new(i as u8, format!("Bot {}", i + 1), Chips(1_000), true))
        .collect();
    let mut table = Table::new(seats, Chips(5));
    table.dealer_seat = Some(dealer);
    table
}

/// Трое за столом, блайнды поставлены: дилер 0, SB 1, BB 2. Ходит место 0.
fn preflop_table() -> OfflineGameManager {
    let settings = GameSettings {
        real_players: 0,
        bots: 3,
        initial_stack: Chips(1_000),
        small_blind: Chips(5),
    };
    let mut m = OfflineGameManager::initialize_game(&settings, &PlayerIdentity::default());
    m.start_new_hand(&mut FixedRng::default()).unwrap();
    m.process_player_action(PlayerAction::PostBlind, Chips::ZERO).unwrap();
    m.process_player_action(PlayerAction::PostBlind, Chips::ZERO).unwrap();
    m
}

/// Префлоп прочекан, флоп открыт, ходит место 1.
fn flop_table() -> (OfflineGameManager, ActionRequest) {
    let mut m = preflop_table();
    m.process_player_action(PlayerAction::Call, Chips::ZERO).unwrap();
    m.process_player_action(PlayerAction::Call, Chips::ZERO).unwrap();
    match m.process_player_action(PlayerAction::Check, Chips::ZERO).unwrap() {
        HandStatus::Ongoing(req) => (m, req),
        HandStatus::Finished(..) => panic!("раздача не должна закончиться на префлопе"),
    }
}

//
// ====================== ХАРАКТЕР ======================
//

#[test]
fn personality_is_clamped_to_unit_range() {
    let p = BotPersonality::new(1.5, -0.2, f32::NAN);
    assert_eq!(p.aggressiveness, 1.0);
    assert_eq!(p.bluff_frequency, 0.0);
    assert_eq!(p.tightness, 0.0);
    assert!(p.is_within_bounds());

    let raw = BotPersonality {
        aggressiveness: 2.0,
        ..BotPersonality::default()
    };
    assert!(!raw.is_within_bounds());

    let mut bot = BotAi::default();
    assert_eq!(bot.personality, BotPersonality::default());
    bot.set_personality(raw);
    assert_eq!(bot.personality.aggressiveness, 1.0);

    let mut p = BotPersonality::default();
    p.set_aggressiveness(0.8);
    p.set_bluff_frequency(3.0);
    p.set_tightness(-1.0);
    assert_eq!(p, BotPersonality::new(0.8, 1.0, 0.0));
}

//
// ====================== ПОЗИЦИИ ======================
//

#[test]
fn six_handed_positions() {
    let t = table_of(6, 0);
    let positions: Vec<PokerPosition> = (0..6).map(|s| player_position(&t, s, 6)).collect();
    assert_eq!(
        positions,
        vec![
            PokerPosition::Btn,
            PokerPosition::Sb,
            PokerPosition::Bb,
            PokerPosition::Utg,
            PokerPosition::Mp1,
            PokerPosition::Co,
        ]
    );
}

#[test]
fn nine_handed_positions() {
    let t = table_of(9, 0);
    let positions: Vec<PokerPosition> = (0..9).map(|s| player_position(&t, s, 9)).collect();
    assert_eq!(
        positions,
        vec![
            PokerPosition::Btn,
            PokerPosition::Sb,
            PokerPosition::Bb,
            PokerPosition::Utg,
            PokerPosition::Utg1,
            PokerPosition::Mp1,
            PokerPosition::Mp2,
            PokerPosition::Hj,
            PokerPosition::Co,
        ]
    );
}

#[test]
fn heads_up_and_edge_positions() {
    let t = table_of(2, 1);
    assert_eq!(player_position(&t, 1, 2), PokerPosition::Sb);
    assert_eq!(player_position(&t, 0, 2), PokerPosition::Bb);

    let mut t = table_of(6, 0);
    t.seats[3].status = PlayerStatus::Folded;
    assert_eq!(player_position(&t, 4, 5), PokerPosition::Utg);
    assert_eq!(player_position(&t, 3, 5), PokerPosition::Unknown);

    t.dealer_seat = None;
    assert_eq!(player_position(&t, 0, 5), PokerPosition::Unknown);
    assert_eq!(PokerPosition::Utg1.to_string(), "UTG+1");
}

#[test]
fn active_opponents_include_blinds_to_post() {
    let mut t = table_of(6, 0);
    let statuses = [
        PlayerStatus::Playing,
        PlayerStatus::Playing,
        PlayerStatus::Folded,
        PlayerStatus::MustPostBigBlind,
        PlayerStatus::Waiting,
        PlayerStatus::AllIn,
    ];
    for (seat, status) in t.seats.iter_mut().zip(statuses) {
        seat.status = status;
    }
    assert_eq!(count_active_opponents(&t, 0), 3);
}

//
// ====================== СИЛА РУК ======================
//

#[test]
fn preflop_strength_orders_hands() {
    let aces = preflop_hand_strength(card("As"), card("Ad"), PokerPosition::Bb, 6, 0.5);
    assert_eq!(aces, 1.0);

    let trash = preflop_hand_strength(card("7c"), card("2d"), PokerPosition::Utg, 6, 0.5);
    assert_eq!(trash, 0.0);

    // 12 очков / 20 + кнопка + короткий стол.
    let aks = preflop_hand_strength(card("Ah"), card("Kh"), PokerPosition::Btn, 3, 0.0);
    assert!(approx(aks, 0.8), "{aks}");

    let connectors = preflop_hand_strength(card("9h"), card("8h"), PokerPosition::Mp1, 5, 0.0);
    let gapped = preflop_hand_strength(card("9h"), card("5h"), PokerPosition::Mp1, 5, 0.0);
    assert!(connectors > gapped);
}

#[test]
fn made_hand_scores_and_pot_odds() {
    assert_eq!(score_for_made_hand(PokerHandRank::RoyalFlush), 1.0);
    assert_eq!(score_for_made_hand(PokerHandRank::Flush), 0.78);
    assert_eq!(score_for_made_hand(PokerHandRank::HighCard), 0.10);

    assert!(approx(pot_odds(Chips(100), Chips(50)), 1.0 / 3.0));
    assert_eq!(pot_odds(Chips(100), Chips::ZERO), 0.0);
    assert_eq!(pot_odds(Chips::ZERO, Chips(50)), 0.0);
}

#[test]
fn draws_on_flop() {
    let hole = parse_cards("Ah Kh").unwrap();
    let flush_draw = draw_strength(&hole, &parse_cards("2h 7h Qc").unwrap(), Chips::ZERO, Chips::ZERO);
    assert!(approx(flush_draw, 0.65), "{flush_draw}");

    let hole = parse_cards("8c 9d").unwrap();
    let open_ender = draw_strength(&hole, &parse_cards("Tc Jh 2s").unwrap(), Chips(100), Chips(100));
    assert!(approx(open_ender, 0.40), "{open_ender}");

    let river = draw_strength(&hole, &parse_cards("Tc Jh 2s 3d 4h").unwrap(), Chips(100), Chips::ZERO);
    assert_eq!(river, 0.0);

    let nothing = draw_strength(&parse_cards("2c 7d").unwrap(), &parse_cards("Ks Qh 4c").unwrap(), Chips(10), Chips(10));
    assert_eq!(nothing, 0.0);
}

#[test]
fn scary_boards() {
    assert!(is_scary_board(&parse_cards("2h 7h Qh").unwrap()));
    assert!(is_scary_board(&parse_cards("8c 9d Th").unwrap()));
    assert!(!is_scary_board(&parse_cards("2c 7d Kh").unwrap()));
    assert!(!is_scary_board(&parse_cards("2c 7d").unwrap()));
}

//
// ====================== РАЗМЕР СТАВОК ======================
//

#[test]
fn bet_sizing_respects_big_blind_and_stack() {
    let bot = PlayerSeat::new(0, "Bot 1", Chips(1_000), true);
    assert_eq!(bet_size(Chips(100), Chips(10), &bot, 0.5, Some(0.5)), Chips(50));
    assert_eq!(bet_size(Chips(100), Chips(10), &bot, 0.2, None), Chips(33));
    assert_eq!(bet_size(Chips::ZERO, Chips(10), &bot, 0.9, None), Chips(10));

    let short = PlayerSeat::new(1, "Bot 2", Chips(20), true);
    assert_eq!(bet_size(Chips(100), Chips(10), &short, 0.9, Some(1.0)), Chips(20));
}

#[test]
fn raise_sizing_counts_call_first() {
    let bot = PlayerSeat::new(0, "Bot 1", Chips(1_000), true);
    // Колл 20, банк после колла 120, половина банка сверху.
    assert_eq!(raise_size(Chips(100), &bot, Chips(20), Chips(20), 0.8, 0.5, Some(0.5)), Chips(80));
    // Минимальный рейз важнее маленькой доли.
    assert_eq!(raise_size(Chips(10), &bot, Chips(20), Chips(40), 0.8, 0.5, Some(0.5)), Chips(60));

    let short = PlayerSeat::new(1, "Bot 2", Chips(15), true);
    assert_eq!(raise_size(Chips(100), &short, Chips(20), Chips(20), 0.8, 0.5, None), Chips(15));
}

//
// ====================== РЕШЕНИЯ ======================
//

#[test]
fn bot_posts_blinds() {
    let settings = GameSettings {
        real_players: 0,
        bots: 3,
        initial_stack: Chips(1_000),
        small_blind: Chips(5),
    };
    let mut m = OfflineGameManager::initialize_game(&settings, &PlayerIdentity::default());
    let mut rng = FixedRng::default();
    let req = m.start_new_hand(&mut rng).unwrap();

    let bot = BotAi::default();
    assert_eq!(
        bot.best_action(m.table(), req.seat, &req, &mut rng),
        (PlayerAction::PostBlind, Chips::ZERO)
    );
}

#[test]
fn empty_request_means_fold() {
    let m = preflop_table();
    let bot = BotAi::default();
    let req = ActionRequest::empty(0, Chips(10), Chips(1_000));
    assert_eq!(
        bot.best_action(m.table(), 0, &req, &mut FixedRng::default()),
        (PlayerAction::Fold, Chips::ZERO)
    );
}

#[test]
fn premium_pair_raises_preflop() {
    let mut m = preflop_table();
    m.table_mut().seats[0].hole_cards = parse_cards("As Ad").unwrap();
    let req = m.request_player_action(0);

    let bot = BotAi::testing(BotPersonality::default(), 0.5);
    let (action, amount) = bot.best_action(m.table(), 0, &req, &mut FixedRng::default());
    // Банк 15 + колл 10 = 25, рейз на весь банк.
    assert_eq!((action, amount), (PlayerAction::Raise, Chips(35)));

    let status = m.process_seat_action(0, action, amount).unwrap();
    assert!(matches!(status, HandStatus::Ongoing(_)));
    assert_eq!(m.table().bet_to_call(), Chips(35));
}

#[test]
fn trash_folds_to_big_blind_but_big_blind_checks() {
    let mut m = preflop_table();
    m.table_mut().seats[0].hole_cards = parse_cards("7c 2d").unwrap();
    let req = m.request_player_action(0);
    let bot = BotAi::testing(BotPersonality::default(), 0.99);
    assert_eq!(
        bot.best_action(m.table(), 0, &req, &mut FixedRng::default()),
        (PlayerAction::Fold, Chips::ZERO)
    );

    m.process_player_action(PlayerAction::Call, Chips::ZERO).unwrap();
    m.table_mut().seats[2].hole_cards = parse_cards("7c 2d").unwrap();
    let HandStatus::Ongoing(req) = m.process_player_action(PlayerAction::Call, Chips::ZERO).unwrap() else {
        panic!("ход должен перейти к большому блайнду");
    };
    assert_eq!(req.seat, 2);
    assert_eq!(
        bot.best_action(m.table(), 2, &req, &mut FixedRng::default()),
        (PlayerAction::Check, Chips::ZERO)
    );
}

#[test]
fn made_flush_on_flop_builds_the_pot() {
    let (m, req) = flop_table();
    assert_eq!(m.table().stage, GameStage::Flop);
    assert_eq!(req.seat, 1);

    // As Js на 8s 7s 6s – готовый флеш.
    let bot = BotAi::testing(BotPersonality::default(), 0.99);
    let (action, amount) = bot.best_action(m.table(), 1, &req, &mut FixedRng::default());
    assert_eq!(action, PlayerAction::Raise);
    assert_eq!(amount, Chips(23));
}

#[test]
fn button_bluffs_dry_board_when_checked_to() {
    let (mut m, _) = flop_table();
    m.process_player_action(PlayerAction::Check, Chips::ZERO).unwrap();
    let HandStatus::Ongoing(req) = m.process_player_action(PlayerAction::Check, Chips::ZERO).unwrap() else {
        panic!("флоп ещё не доигран");
    };
    assert_eq!(req.seat, 0);

    m.table_mut().community_cards = parse_cards("2c 9d Kh").unwrap();
    m.table_mut().seats[0].hole_cards = parse_cards("3c 4d").unwrap();

    let bluffer = BotAi::testing(BotPersonality::default(), 0.01);
    let t = m.table();
    assert!(bluffer.should_attempt_bluff(t, &t.seats[0], PokerPosition::Btn, 2, &mut FixedRng::default()));
    assert!(!bluffer.should_attempt_bluff(t, &t.seats[0], PokerPosition::Btn, 3, &mut FixedRng::default()));
    assert!(!bluffer.should_attempt_bluff(t, &t.seats[0], PokerPosition::Utg, 2, &mut FixedRng::default()));

    // Полбанка от 30.
    assert_eq!(
        bluffer.best_action(t, 0, &req, &mut FixedRng::default()),
        (PlayerAction::Bet, Chips(15))
    );

    let honest = BotAi::testing(BotPersonality::default(), 0.5);
    assert_eq!(
        honest.best_action(t, 0, &req, &mut FixedRng::default()),
        (PlayerAction::Check, Chips::ZERO)
    );
}
