//! Клиент покера: офлайн-движок Texas Hold'em с ботами, клиент сервера
//! аккаунтов и проверка манифеста сборки.
//!
//! Слои:
//!   - `domain` - карты, фишки, места, стол
//!   - `eval` - оценка рук
//!   - `engine` - правила раздачи (`OfflineGameManager`)
//!   - `bot` - решения ботов
//!   - `api` - логин, регистрация, друзья
//!   - `manifest` - модули и цели сборки
//!   - `infra` - RNG, конфиг, логирование

pub mod api;
pub mod bot;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod manifest;
