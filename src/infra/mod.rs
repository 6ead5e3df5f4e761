//! Окружение клиента: RNG для движка и ботов, конфиг, логирование.

pub mod config;
pub mod logging;
pub mod rng;

pub use config::{ClientConfig, ConfigError, GameConfig, LoggingConfig, ServerConfig};
pub use logging::init_cli_logger;
pub use rng::{DeterministicRng, FixedRng, SystemRng};
