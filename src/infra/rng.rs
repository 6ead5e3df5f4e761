use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// Боевой RNG: `thread_rng` из `rand`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }

    fn gen_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        thread_rng().gen_range(0..upper)
    }

    fn next_unit(&mut self) -> f32 {
        thread_rng().gen::<f32>()
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn gen_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }

    fn next_unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }
}

/// RNG без случайности: колода не мешается, индекс всегда 0,
/// `next_unit` отдаёт одно и то же значение.
///
/// Нужен, чтобы в тестах раскладывать колоду вручную и проверять решения ботов.
#[derive(Clone, Debug)]
pub struct FixedRng {
    pub unit: f32,
}

impl FixedRng {
    pub fn new(unit: f32) -> Self {
        Self {
            unit: unit.clamp(0.0, 0.999_999),
        }
    }
}

impl Default for FixedRng {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl RandomSource for FixedRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn gen_index(&mut self, _upper: usize) -> usize {
        0
    }

    fn next_unit(&mut self) -> f32 {
        self.unit
    }
}
