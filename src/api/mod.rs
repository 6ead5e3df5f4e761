//! Клиент сервера авторизации: вход, регистрация, друзья.
//!
//! - `client.rs` - HTTP-запросы (`reqwest`) и разбор ответов;
//! - `session.rs` - кто вошёл, офлайн-режим;
//! - `messages.rs` - тексты ошибок из тел ответов;
//! - `dto.rs` - JSON-тела;
//! - `errors.rs` - ошибки клиента.

pub mod client;
pub mod dto;
pub mod errors;
pub mod messages;
pub mod session;

pub use client::{SessionClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use dto::*;
pub use errors::{ApiError, Result};
pub use session::Session;
