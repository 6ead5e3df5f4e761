use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Слой банка: его могут выиграть только те, кто внёс до этого уровня.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Внёсшие в слой, по возрастанию места. Сфолдившие тоже здесь: их фишки остаются в банке.
    pub contributors: Vec<SeatIndex>,
}

/// Разложить вклады игроков за раздачу на основной банк и сайд-поты.
///
/// Слои идут от основного банка к старшим. Нулевые вклады слоёв не дают,
/// сумма всех `amount` равна сумме вкладов.
pub fn compute_side_pots(contributions: &HashMap<SeatIndex, Chips>) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions.values().copied().filter(|c| !c.is_zero()).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::with_capacity(levels.len());
    let mut floor = Chips::ZERO;

    for level in levels {
        let mut contributors: Vec<SeatIndex> = contributions
            .iter()
            .filter(|(_, contrib)| **contrib >= level)
            .map(|(seat, _)| *seat)
            .collect();
        contributors.sort_unstable();

        pots.push(SidePot {
            amount: (level - floor).times(contributors.len()),
            contributors,
        });
        floor = level;
    }

    pots
}
