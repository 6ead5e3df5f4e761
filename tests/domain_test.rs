//! Интеграционные тесты для доменной модели (crate::domain).

use std::collections::HashSet;

use poker_client::domain::*;
use poker_client::infra::DeterministicRng;

#[test]
fn card_parse_and_display() {
    let c: Card = "Ah".parse().unwrap();
    assert_eq!(c, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(c.to_string(), "Ah");

    let t: Card = "td".parse().unwrap();
    assert_eq!(t.to_string(), "Td");

    assert!("A".parse::<Card>().is_err());
    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
}

#[test]
fn card_russian_notation() {
    let cards = parse_cards("Th Qs Ac 2d").unwrap();
    let ru: Vec<String> = cards.iter().map(|c| c.to_russian_string()).collect();
    assert_eq!(ru, vec!["10ч", "Дп", "Тт", "2б"]);
}

#[test]
fn rank_value_and_index() {
    assert_eq!(Rank::Two.value(), 2);
    assert_eq!(Rank::Ace.value(), 14);
    assert_eq!(Rank::Two.index(), 0);
    assert_eq!(Rank::Ace.index(), 12);
    assert_eq!(Rank::from_value(11), Some(Rank::Jack));
    assert_eq!(Rank::from_value(1), None);
    assert_eq!(Rank::from_value(15), None);
}

#[test]
fn chips_arithmetic_saturates() {
    let a = Chips(100);
    let b = Chips(30);
    assert_eq!(a + b, Chips(130));
    assert_eq!(b - a, Chips::ZERO);
    assert_eq!(a.saturating_sub(b), Chips(70));

    let mut c = Chips(10);
    c -= Chips(25);
    assert!(c.is_zero());

    assert_eq!(Chips(100).scaled(0.5), Chips(50));
    assert_eq!(Chips(100).scaled(0.333), Chips(33));
    assert_eq!(Chips(100).scaled(-1.0), Chips::ZERO);
}

#[test]
fn standard_deck_is_complete_and_ordered() {
    let deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let unique: HashSet<Card> = deck.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);

    // Clubs 2..A, ..., Spades 2..A. Верх колоды – конец вектора.
    assert_eq!(deck.cards[0], Card::new(Rank::Two, Suit::Clubs));
    assert_eq!(deck.cards[51], Card::new(Rank::Ace, Suit::Spades));
}

#[test]
fn deck_deals_from_top_and_reports_exhaustion() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.deal_card(), Some(Card::new(Rank::Ace, Suit::Spades)));
    assert_eq!(deck.deal_card(), Some(Card::new(Rank::King, Suit::Spades)));

    let rest = deck.deal_n(60);
    assert_eq!(rest.len(), 50);
    assert!(deck.is_empty());
    assert_eq!(deck.deal_card(), None);

    deck.initialize();
    assert_eq!(deck.len(), 52);
}

#[test]
fn deck_shuffle_is_reproducible_with_seed() {
    let mut a = Deck::standard_52();
    let mut b = Deck::standard_52();
    a.shuffle(&mut DeterministicRng::from_seed(42));
    b.shuffle(&mut DeterministicRng::from_seed(42));
    assert_eq!(a, b);
    assert_ne!(a, Deck::standard_52());
}

#[test]
fn game_stage_street_order() {
    assert_eq!(GameStage::Preflop.next_street(), Some(GameStage::Flop));
    assert_eq!(GameStage::Flop.next_street(), Some(GameStage::Turn));
    assert_eq!(GameStage::River.next_street(), Some(GameStage::Showdown));
    assert_eq!(GameStage::WaitingForBigBlind.next_street(), None);

    assert_eq!(GameStage::Flop.board_cards_to_deal(), 3);
    assert_eq!(GameStage::Turn.board_cards_to_deal(), 1);
    assert!(GameStage::River.is_betting_round());
    assert!(!GameStage::Showdown.is_betting_round());
    assert!(GameStage::WaitingForSmallBlind.is_blind_stage());
}

#[test]
fn player_commit_chips_goes_all_in_when_stack_runs_out() {
    let mut p = PlayerSeat::new(0, "Alice", Chips(50), false);
    p.status = PlayerStatus::Playing;

    let paid = p.commit_chips(Chips(20));
    assert_eq!(paid, Chips(20));
    assert_eq!(p.stack, Chips(30));
    assert_eq!(p.current_bet, Chips(20));
    assert_eq!(p.status, PlayerStatus::Playing);

    let paid = p.commit_chips(Chips(100));
    assert_eq!(paid, Chips(30));
    assert!(p.stack.is_zero());
    assert_eq!(p.total_contribution, Chips(50));
    assert_eq!(p.status, PlayerStatus::AllIn);
    assert!(p.is_in_hand());
    assert!(!p.can_act());
}

#[test]
fn player_reset_keeps_stack_and_status() {
    let mut p = PlayerSeat::new(3, "Bot 1", Chips(100), true);
    p.status = PlayerStatus::Called;
    p.hole_cards = parse_cards("Ah Kd").unwrap();
    p.is_dealer = true;
    p.commit_chips(Chips(10));

    p.reset_for_new_hand();
    assert!(p.hole_cards.is_empty());
    assert!(p.current_bet.is_zero());
    assert!(p.total_contribution.is_zero());
    assert!(!p.is_dealer);
    assert_eq!(p.stack, Chips(90));
    assert_eq!(p.status, PlayerStatus::Called);
}

#[test]
fn table_new_derives_big_blind_and_counts() {
    let seats = vec![
        PlayerSeat::new(0, "A", Chips(100), false),
        PlayerSeat::new(1, "B", Chips(100), true),
        PlayerSeat::new(2, "C", Chips::ZERO, true),
    ];
    let mut table = Table::new(seats, Chips(5));

    assert_eq!(table.big_blind, Chips(10));
    assert_eq!(table.stage, GameStage::WaitingForPlayers);
    assert_eq!(table.hand_number, 0);
    assert_eq!(table.total_chips(), Chips(200));

    table.seats[1].status = PlayerStatus::Folded;
    assert_eq!(table.active_player_count(), 2);
    assert_eq!(table.players_in_hand(), 0);
    assert!(table.seat(7).is_none());
}
