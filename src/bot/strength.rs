//! Оценка силы руки для ботов: префлоп по мотивам формулы Чена,
//! готовые руки на постфлопе и дро.

use std::collections::{BTreeSet, HashMap};

use crate::bot::position::PokerPosition;
use crate::domain::{Card, Chips, Rank, Suit};
use crate::eval::PokerHandRank;

/// Сила стартовой руки в [0, 1] с поправкой на позицию и размер стола.
pub fn preflop_hand_strength(
    c1: Card,
    c2: Card,
    position: PokerPosition,
    active_players: usize,
    tightness: f32,
) -> f32 {
    let r1 = c1.rank.index() as i32;
    let r2 = c2.rank.index() as i32;
    let high = r1.max(r2);
    let low = r1.min(r2);
    let is_pair = r1 == r2;

    let mut score = match Rank::ALL[high as usize] {
        Rank::Ace => 10.0,
        Rank::King => 8.0,
        Rank::Queen => 7.0,
        Rank::Jack => 6.0,
        _ => (high + 2) as f32 / 2.0,
    };

    if is_pair {
        score = (score * 2.0_f32).max(5.0);
    }
    if c1.suit == c2.suit {
        score += 2.0;
    }

    let gap = high - low;
    if !is_pair {
        score -= match gap {
            1 => 0.0,
            2 => 1.0,
            3 => 2.0,
            4 => 4.0,
            _ => 5.0,
        };
        if gap <= 1 && high < Rank::Queen.index() as i32 {
            score += 1.0;
        }
    }

    let mut strength = score / 20.0;

    strength += match position {
        PokerPosition::Utg | PokerPosition::Utg1 => -0.15 * tightness,
        PokerPosition::Mp1 | PokerPosition::Mp2 => -0.05 * tightness,
        PokerPosition::Co | PokerPosition::Hj => 0.05 * (1.0 - tightness),
        PokerPosition::Btn => 0.1 * (1.0 - tightness),
        PokerPosition::Sb => -0.05,
        PokerPosition::Bb | PokerPosition::Unknown => 0.0,
    };

    if active_players >= 7 {
        strength -= 0.1;
    } else if active_players <= 3 {
        strength += 0.1;
    }

    strength.clamp(0.0, 1.0)
}

/// Оценка готовой комбинации.
pub fn score_for_made_hand(rank: PokerHandRank) -> f32 {
    match rank {
        PokerHandRank::RoyalFlush => 1.0,
        PokerHandRank::StraightFlush => 0.98,
        PokerHandRank::FourOfAKind => 0.90,
        PokerHandRank::FullHouse => 0.85,
        PokerHandRank::Flush => 0.78,
        PokerHandRank::Straight => 0.72,
        PokerHandRank::ThreeOfAKind => 0.60,
        PokerHandRank::TwoPair => 0.45,
        PokerHandRank::OnePair => 0.30,
        PokerHandRank::HighCard => 0.10,
    }
}

/// Доля банка, которую нужно доставить: to_call / (pot + to_call).
/// 0, если платить нечего.
pub fn pot_odds(pot: Chips, to_call: Chips) -> f32 {
    if to_call.is_zero() || pot.is_zero() {
        return 0.0;
    }
    to_call.0 as f32 / (pot.0 + to_call.0) as f32
}

/// Сколько аутов даёт стрит-дро: 8 для двустороннего, 4 для гатшота, 0 – нет дро.
fn straight_draw_outs(known: &BTreeSet<i32>) -> u32 {
    let mut outs = 0;
    for low in 1..=10 {
        let missing: Vec<i32> = (low..low + 5).filter(|r| !known.contains(r)).collect();
        if missing.len() != 1 {
            continue;
        }
        let gap = missing[0];
        if gap == low && low > 1 {
            outs = outs.max(4);
            if !known.contains(&(low + 5)) {
                outs = outs.max(8);
            }
        } else if gap == low + 4 && low + 4 < 14 {
            outs = outs.max(4);
            if !known.contains(&(low - 1)) {
                outs = outs.max(8);
            }
        } else {
            outs = outs.max(4);
        }
    }
    outs
}

/// Сила дро на флопе и терне в [0, 0.85].
///
/// Флеш-дро 0.45, двусторонний стрит 0.40, гатшот 0.25,
/// +0.2 если шансы собрать руку выше шансов банка.
pub fn draw_strength(hole: &[Card], board: &[Card], pot: Chips, to_call: Chips) -> f32 {
    if hole.len() < 2 || board.len() < 3 || board.len() >= 5 {
        return 0.0;
    }

    let known: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    let mut score: f32 = 0.0;

    let mut suit_counts: HashMap<Suit, u32> = HashMap::new();
    for card in &known {
        *suit_counts.entry(card.suit).or_insert(0) += 1;
    }
    let flush_outs = if suit_counts.values().any(|c| *c == 4) {
        score = score.max(0.45);
        9
    } else {
        0
    };

    let mut ranks: BTreeSet<i32> = BTreeSet::new();
    for card in &known {
        ranks.insert(card.rank.value() as i32);
        if card.rank == Rank::Ace {
            ranks.insert(1);
        }
    }
    let straight_outs = straight_draw_outs(&ranks);
    if straight_outs > 0 {
        score = score.max(if straight_outs >= 8 { 0.40 } else { 0.25 });
    }

    let outs = flush_outs + straight_outs;
    if outs == 0 {
        return 0.0;
    }

    let unknown = 52 - known.len() as i32;
    if unknown <= 0 {
        return 0.0;
    }
    let outs = outs as f32;
    let unknown_f = unknown as f32;

    let hand_odds = if board.len() == 3 && unknown > 1 {
        let miss_turn = (unknown_f - outs) / unknown_f;
        let miss_river = (unknown_f - 1.0 - outs) / (unknown_f - 1.0);
        1.0 - miss_turn * miss_river
    } else {
        outs / unknown_f
    };

    if hand_odds > pot_odds(pot, to_call) {
        score += 0.20;
    }

    score.clamp(0.0, 0.85)
}

/// Опасный борд: три карты одной масти или связанные ранги.
pub fn is_scary_board(board: &[Card]) -> bool {
    if board.len() < 3 {
        return false;
    }

    let mut suit_counts: HashMap<Suit, u32> = HashMap::new();
    for card in board {
        *suit_counts.entry(card.suit).or_insert(0) += 1;
    }
    if suit_counts.values().any(|c| *c >= 3) {
        return true;
    }

    let mut ranks: Vec<i32> = board.iter().map(|c| c.rank.index() as i32).collect();
    ranks.sort_unstable();
    let connected = ranks.windows(2).filter(|w| (w[0] - w[1]).abs() <= 2).count();

    let n = board.len();
    connected + 1 >= n || (n == 3 && connected >= 1) || (n == 4 && connected >= 2)
}
