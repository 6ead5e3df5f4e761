use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Фишки. Арифметика насыщающая: стек и банк не уходят в минус.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// `self * count`, например уровень сайд-пота на число участников.
    pub fn times(self, count: usize) -> Chips {
        Chips(self.0.saturating_mul(count as u64))
    }

    /// Поделить банк на `ways` равных частей.
    /// Возвращает долю и число лишних фишек (меньше `ways`).
    pub fn split(self, ways: usize) -> (Chips, u64) {
        if ways == 0 {
            return (Chips::ZERO, self.0);
        }
        let ways = ways as u64;
        (Chips(self.0 / ways), self.0 % ways)
    }

    /// Доля банка, округлённая до целых фишек.
    pub fn scaled(self, fraction: f32) -> Chips {
        let v = (self.0 as f64 * fraction.max(0.0) as f64).round();
        Chips(v as u64)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Chips {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        *self = *self + rhs;
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Chips {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        *self = *self - rhs;
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Chips {
        iter.fold(Chips::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Chips> for Chips {
    fn sum<I: Iterator<Item = &'a Chips>>(iter: I) -> Chips {
        iter.copied().sum()
    }
}
