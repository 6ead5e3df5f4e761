use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::api::DEFAULT_BASE_URL;
use crate::bot::BotPersonality;
use crate::domain::{Chips, DEFAULT_SMALL_BLIND};
use crate::engine::GameSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("ошибка разбора TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("некорректное значение {field}: {message}")]
    Invalid { field: String, message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub real_players: usize,
    pub bots: usize,
    pub initial_stack: u64,
    pub small_blind: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            real_players: 1,
            bots: 5,
            initial_stack: 1_000,
            small_blind: DEFAULT_SMALL_BLIND.0,
        }
    }
}

impl GameConfig {
    pub fn to_settings(&self) -> GameSettings {
        GameSettings {
            real_players: self.real_players,
            bots: self.bots,
            initial_stack: Chips(self.initial_stack),
            small_blind: Chips(self.small_blind),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Фильтр для `EnvFilter`, если не задан RUST_LOG.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Конфиг клиента (`poker_client.toml`). Любая секция может отсутствовать.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub bot: BotPersonality,
    pub logging: LoggingConfig,
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.server.base_url).map_err(|e| invalid("server.base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("server.base_url", format!("ожидается http или https, получено {}", url.scheme())));
        }
        if self.server.timeout_seconds == 0 {
            return Err(invalid("server.timeout_seconds", "должен быть больше нуля"));
        }
        if self.game.initial_stack == 0 {
            return Err(invalid("game.initial_stack", "должен быть больше нуля"));
        }

        let factors = [
            ("bot.aggressiveness", self.bot.aggressiveness),
            ("bot.bluff_frequency", self.bot.bluff_frequency),
            ("bot.tightness", self.bot.tightness),
        ];
        for (field, value) in factors {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} вне диапазона [0, 1]")));
            }
        }

        Ok(())
    }
}
