use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PokerHandRank {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl PokerHandRank {
    /// Название комбинации для русского интерфейса.
    pub fn russian_name(self) -> &'static str {
        match self {
            PokerHandRank::HighCard => "Старшая Карта",
            PokerHandRank::OnePair => "Одна Пара",
            PokerHandRank::TwoPair => "Две Пары",
            PokerHandRank::ThreeOfAKind => "Сет",
            PokerHandRank::Straight => "Стрит",
            PokerHandRank::Flush => "Флеш",
            PokerHandRank::FullHouse => "Фулл-Хаус",
            PokerHandRank::FourOfAKind => "Каре",
            PokerHandRank::StraightFlush => "Стрит-Флеш",
            PokerHandRank::RoyalFlush => "Роял-Флеш",
        }
    }
}

/// Результат оценки руки: категория + ранги для сравнения внутри категории.
///
/// Набор kickers зависит от категории:
///   - стрит / стрит-флеш: старшая карта стрита;
///   - каре: ранг каре, кикер;
///   - фулл-хаус: ранг сета, ранг пары;
///   - флеш, старшая карта: 5 рангов по убыванию;
///   - сет: ранг сета, 2 кикера;
///   - две пары: старшая пара, младшая пара, кикер;
///   - пара: ранг пары, 3 кикера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HandResult {
    pub rank: PokerHandRank,
    pub kickers: Vec<Rank>,
}

impl HandResult {
    pub fn new(rank: PokerHandRank, kickers: Vec<Rank>) -> Self {
        Self { rank, kickers }
    }
}

/// Сравнить две руки: сначала категория, затем кикеры по общей длине.
pub fn compare_hand_results(a: &HandResult, b: &HandResult) -> Ordering {
    a.rank.cmp(&b.rank).then_with(|| {
        a.kickers
            .iter()
            .zip(b.kickers.iter())
            .map(|(x, y)| x.cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Человеческое описание руки по категории.
pub fn describe_hand(result: &HandResult) -> String {
    let name = match result.rank {
        PokerHandRank::HighCard => "High card",
        PokerHandRank::OnePair => "One pair",
        PokerHandRank::TwoPair => "Two pair",
        PokerHandRank::ThreeOfAKind => "Three of a kind",
        PokerHandRank::Straight => "Straight",
        PokerHandRank::Flush => "Flush",
        PokerHandRank::FullHouse => "Full house",
        PokerHandRank::FourOfAKind => "Four of a kind",
        PokerHandRank::StraightFlush => "Straight flush",
        PokerHandRank::RoyalFlush => "Royal flush",
    };
    match result.kickers.first() {
        Some(top) => format!("{name} ({top})"),
        None => name.to_string(),
    }
}
