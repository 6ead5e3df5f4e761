use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::dto::{AddFriendRequest, LoginRequest, RegisterRequest, UserProfile};
use crate::api::errors::{ApiError, Result};
use crate::api::messages::{
    add_friend_failure_message, add_friend_success_message, login_failure_message, register_failure_message,
    REGISTER_SUCCESS_MESSAGE,
};
use crate::api::session::Session;
use crate::domain::PlayerIdentity;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ответ сервера: код и сырое тело.
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// HTTP-клиент сервера авторизации вместе с состоянием сессии.
#[derive(Debug)]
pub struct SessionClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl SessionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        debug!(base_url = %base_url, ?timeout, "клиент сессии создан");
        Ok(Self {
            http,
            base_url,
            session: Session::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn set_offline_mode(&mut self, offline: bool) {
        self.session.set_offline_mode(offline);
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn player_identity(&self) -> PlayerIdentity {
        self.session.player_identity()
    }

    /// `{base}/{path}` без двойных слэшей.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn post_json<T: Serialize>(&self, path: &str, payload: &T) -> Result<RawResponse> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");

        let response = self
            .http
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "запрос не выполнен");
                ApiError::ServerUnavailable(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::ServerUnavailable)?;
        debug!(%url, status = status.as_u16(), body_len = body.len(), "ответ сервера");

        Ok(RawResponse { status, body })
    }

    /// Вход. При успехе сессия переходит в состояние "вошёл".
    pub async fn login(&mut self, username: &str, password: &str) -> Result<UserProfile> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.post_json("auth/login", &payload).await?;

        match resp.status {
            StatusCode::OK => {
                let json: Value = serde_json::from_str(&resp.body)
                    .map_err(|_| ApiError::MalformedResponse("Не удалось обработать ответ JSON.".to_string()))?;
                let profile: UserProfile = serde_json::from_value(json).map_err(|_| {
                    ApiError::MalformedResponse(
                        "Неверный формат ответа (отсутствуют userId, username или friendCode).".to_string(),
                    )
                })?;
                self.session.set_logged_in(profile.clone());
                Ok(profile)
            }
            StatusCode::UNAUTHORIZED => {
                info!(username, "неверные учётные данные");
                Err(ApiError::InvalidCredentials)
            }
            status => {
                let message = login_failure_message(status.as_u16(), &resp.body);
                warn!(status = status.as_u16(), %message, "вход не удался");
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Регистрация. Возвращает сообщение для пользователя.
    pub async fn register(&self, username: &str, password: &str, email: &str) -> Result<String> {
        let payload = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        };
        let resp = self.post_json("auth/register", &payload).await?;
        let code = resp.status.as_u16();

        if resp.status == StatusCode::OK || resp.status == StatusCode::CREATED {
            info!(username, "регистрация прошла успешно");
            return Ok(REGISTER_SUCCESS_MESSAGE.to_string());
        }

        let message = register_failure_message(code, &resp.body);
        warn!(status = code, %message, "регистрация не удалась");
        Err(match resp.status {
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::BAD_REQUEST => ApiError::InvalidData(message),
            _ => ApiError::Server { status: code, message },
        })
    }

    /// Добавить друга по коду. Нужен вход в аккаунт.
    pub async fn add_friend(&self, friend_code: &str) -> Result<String> {
        if friend_code.is_empty() {
            return Err(ApiError::EmptyFriendCode);
        }
        if !self.session.is_logged_in() {
            return Err(ApiError::NotLoggedIn);
        }

        let payload = AddFriendRequest {
            friend_code: friend_code.to_string(),
        };
        let resp = self.post_json("friends/add", &payload).await?;
        let code = resp.status.as_u16();

        if resp.status == StatusCode::OK || resp.status == StatusCode::CREATED {
            let message = add_friend_success_message(&resp.body);
            info!(friend_code, %message, "друг добавлен");
            return Ok(message);
        }

        let message = add_friend_failure_message(code, &resp.body);
        warn!(status = code, %message, "не удалось добавить друга");
        Err(ApiError::Server { status: code, message })
    }
}
