//! JSON-тела запросов и ответов сервера авторизации.

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendRequest {
    pub friend_code: String,
}

/// Профиль вошедшего пользователя (ответ на успешный логин).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: PlayerId,
    pub username: String,
    pub friend_code: String,
}
