//! Оценка и сравнение покерных рук.

use std::cmp::Ordering;

use poker_client::domain::{parse_cards, Card, Rank};
use poker_client::eval::{compare_hand_results, describe_hand, evaluate_five, evaluate_poker_hand, PokerHandRank};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn eval(hole: &str, board: &str) -> poker_client::eval::HandResult {
    evaluate_poker_hand(&cards(hole), &cards(board))
}

#[test]
fn detects_every_category() {
    let cases = [
        ("Ah Kh", "Qh Jh Th 2c 3d", PokerHandRank::RoyalFlush),
        ("9s 8s", "7s 6s 5s Ad Ac", PokerHandRank::StraightFlush),
        ("Ac Ad", "As Ah 5s 6d 7c", PokerHandRank::FourOfAKind),
        ("Kc Kd", "Ks 5h 5s 2d 3c", PokerHandRank::FullHouse),
        ("2h 9h", "Qh 4h Kh 3c 3d", PokerHandRank::Flush),
        ("9c Td", "Js Qh Kd 2c 2d", PokerHandRank::Straight),
        ("7c 7d", "7s 2h Ks 4d 9c", PokerHandRank::ThreeOfAKind),
        ("Ac Kd", "As Kh 5s 6d 8c", PokerHandRank::TwoPair),
        ("Ac 3d", "As Jh 5s 6d 8c", PokerHandRank::OnePair),
        ("Ac 3d", "Ks Jh 5s 6d 8c", PokerHandRank::HighCard),
    ];

    for (hole, board, expected) in cases {
        let result = eval(hole, board);
        assert_eq!(result.rank, expected, "{hole} + {board}");
    }
}

#[test]
fn wheel_straight_is_five_high() {
    let result = eval("Ac 2d", "3s 4h 5c Kd Qs");
    assert_eq!(result.rank, PokerHandRank::Straight);
    assert_eq!(result.kickers, vec![Rank::Five]);

    let six_high = eval("6c 2d", "3s 4h 5c Kd Qs");
    assert_eq!(compare_hand_results(&six_high, &result), Ordering::Greater);
}

#[test]
fn kickers_break_ties_within_category() {
    let a = eval("Ac Kd", "As 7h 5s 3d 2c");
    let b = eval("Ah Qd", "As 7h 5s 3d 2c");
    assert_eq!(a.rank, PokerHandRank::OnePair);
    assert_eq!(compare_hand_results(&a, &b), Ordering::Greater);

    let full_a = eval("Kc Kd", "Ks 2h 2s 9d 8c");
    let full_b = eval("2c 2d", "Ks Kh 2s 9d 8c");
    // KKK22 против 222KK.
    assert_eq!(compare_hand_results(&full_a, &full_b), Ordering::Greater);
}

#[test]
fn board_plays_for_both_players() {
    let board = "Ts Js Qs Ks As";
    let a = eval("2c 3d", board);
    let b = eval("4h 5h", board);
    assert_eq!(a.rank, PokerHandRank::RoyalFlush);
    assert_eq!(compare_hand_results(&a, &b), Ordering::Equal);
}

#[test]
fn fewer_than_five_cards_is_high_card() {
    let result = eval("Ac 7d", "2s");
    assert_eq!(result.rank, PokerHandRank::HighCard);
    assert_eq!(result.kickers, vec![Rank::Ace]);

    let empty = evaluate_poker_hand(&[], &[]);
    assert_eq!(empty.rank, PokerHandRank::HighCard);
    assert!(empty.kickers.is_empty());
}

#[test]
fn evaluate_five_on_exact_hand() {
    let five: [Card; 5] = cards("2c 2d 9h 9s Kc").try_into().unwrap();
    let result = evaluate_five(&five);
    assert_eq!(result.rank, PokerHandRank::TwoPair);
    assert_eq!(result.kickers, vec![Rank::Nine, Rank::Two, Rank::King]);
}

#[test]
fn describe_and_russian_names() {
    let result = eval("Ac Ad", "As 2h 5s 6d 8c");
    assert_eq!(describe_hand(&result), "Three of a kind (A)");
    assert_eq!(PokerHandRank::FullHouse.russian_name(), "Фулл-Хаус");
    assert_eq!(PokerHandRank::HighCard.russian_name(), "Старшая Карта");
}
