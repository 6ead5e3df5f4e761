use std::cmp::Ordering;

use crate::domain::card::{Card, Rank};

use super::hand_rank::{compare_hand_results, HandResult, PokerHandRank};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Максимум карт, который учитывается при оценке (2 карманные + 5 борда).
const MAX_CARDS: usize = 7;

/// Вычислить лучшую 5-карточную руку из hole + community.
///
/// Меньше пяти карт: старшая карта с единственным кикером (или пустыми кикерами).
/// Больше семи: берутся только первые семь.
pub fn evaluate_poker_hand(hole: &[Card], community: &[Card]) -> HandResult {
    let mut all_cards = Vec::with_capacity(hole.len() + community.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(community);
    all_cards.truncate(MAX_CARDS);

    if all_cards.len() < 5 {
        let kickers = all_cards.iter().map(|c| c.rank).max().into_iter().collect();
        return HandResult::new(PokerHandRank::HighCard, kickers);
    }

    best_of_all_5card_combinations(&all_cards)
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandResult {
    let n = cards.len();
    let mut best: Option<HandResult> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_five(&five);
                        let better = match &best {
                            None => true,
                            Some(cur) => compare_hand_results(&r, cur) == Ordering::Greater,
                        };
                        if better {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }

    best.unwrap_or_else(|| HandResult::new(PokerHandRank::HighCard, Vec::new()))
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_five(cards: &[Card; 5]) -> HandResult {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // (rank, count), сначала по количеству, потом по рангу, оба по убыванию.
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| rank_counts[r.value() as usize] > 0)
        .map(|r| (*r, rank_counts[r.value() as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ranks: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    if is_flush {
        if let Some(high) = straight_high {
            let category = if high == Rank::Ace {
                PokerHandRank::RoyalFlush
            } else {
                PokerHandRank::StraightFlush
            };
            return HandResult::new(category, vec![high]);
        }
    }

    match pattern.as_slice() {
        [4, 1] => return HandResult::new(PokerHandRank::FourOfAKind, ranks),
        [3, 2] => return HandResult::new(PokerHandRank::FullHouse, ranks),
        _ => {}
    }

    if is_flush {
        // все 5 карт разного ранга, groups уже по убыванию
        return HandResult::new(PokerHandRank::Flush, ranks);
    }

    if let Some(high) = straight_high {
        return HandResult::new(PokerHandRank::Straight, vec![high]);
    }

    let category = match pattern.as_slice() {
        [3, 1, 1] => PokerHandRank::ThreeOfAKind,
        [2, 2, 1] => PokerHandRank::TwoPair,
        [2, 1, 1, 1] => PokerHandRank::OnePair,
        _ => PokerHandRank::HighCard,
    };
    HandResult::new(category, ranks)
}
