use serde::{Deserialize, Serialize};

/// "Характер" бота. Все коэффициенты в диапазоне [0, 1].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BotPersonality {
    /// Насколько охотно бот ставит и рейзит.
    pub aggressiveness: f32,
    /// Базовая частота блефа.
    pub bluff_frequency: f32,
    /// Насколько узкий диапазон рук он играет.
    pub tightness: f32,
}

impl Default for BotPersonality {
    fn default() -> Self {
        Self {
            aggressiveness: 0.5,
            bluff_frequency: 0.1,
            tightness: 0.5,
        }
    }
}

impl BotPersonality {
    pub fn new(aggressiveness: f32, bluff_frequency: f32, tightness: f32) -> Self {
        Self {
            aggressiveness: clamp_unit(aggressiveness),
            bluff_frequency: clamp_unit(bluff_frequency),
            tightness: clamp_unit(tightness),
        }
    }

    pub fn set_aggressiveness(&mut self, value: f32) {
        self.aggressiveness = clamp_unit(value);
    }

    pub fn set_bluff_frequency(&mut self, value: f32) {
        self.bluff_frequency = clamp_unit(value);
    }

    pub fn set_tightness(&mut self, value: f32) {
        self.tightness = clamp_unit(value);
    }

    /// Все ли коэффициенты лежат в [0, 1] (для проверки конфига до клампа).
    pub fn is_within_bounds(&self) -> bool {
        [self.aggressiveness, self.bluff_frequency, self.tightness]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
