use crate::domain::{Chips, PlayerSeat};

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Итоговая ставка бота при бете (current_bet + добавка).
///
/// `fraction` – доля банка; без неё доля растёт с силой руки от 0.33 до 0.75.
/// Добавка не меньше большого блайнда и не больше стека.
pub fn bet_size(pot: Chips, big_blind: Chips, bot: &PlayerSeat, strength: f32, fraction: Option<f32>) -> Chips {
    if bot.stack.is_zero() {
        return bot.current_bet;
    }

    let fraction = match fraction {
        Some(f) if f > 0.0 && f <= 2.0 => f,
        _ => lerp(0.33, 0.75, ((strength - 0.2) / 0.6).clamp(0.0, 1.0)).max(0.33),
    };

    let mut add = pot.scaled(fraction).max(big_blind).min(bot.stack);
    if add.is_zero() {
        add = big_blind.min(bot.stack);
    }
    bot.current_bet + add
}

/// Итоговая ставка бота при рейзе.
///
/// Чистая часть рейза считается от банка после нашего колла и не бывает меньше `min_raise`.
/// Если на колл не хватает стека – олл-ин.
pub fn raise_size(
    pot: Chips,
    bot: &PlayerSeat,
    bet_to_call: Chips,
    min_raise: Chips,
    strength: f32,
    aggressiveness: f32,
    fraction: Option<f32>,
) -> Chips {
    let to_call = bet_to_call.saturating_sub(bot.current_bet);
    if bot.stack <= to_call {
        return bot.current_bet + bot.stack;
    }

    let pot_after_call = pot + to_call;
    let fraction = match fraction {
        Some(f) if f > 0.0 && f <= 2.0 => f,
        _ => {
            let aggro = lerp(0.8, 1.2, aggressiveness);
            (lerp(0.4, 1.0, strength.clamp(0.0, 1.0)) * aggro).clamp(0.33, 1.5)
        }
    };

    let pure_raise = pot_after_call.scaled(fraction).max(min_raise);
    let add = (to_call + pure_raise).min(bot.stack);
    bot.current_bet + add
}
