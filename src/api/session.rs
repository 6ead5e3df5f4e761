use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::dto::UserProfile;
use crate::domain::PlayerIdentity;

/// Состояние сессии клиента: вошёл ли пользователь, или играет офлайн.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    profile: Option<UserProfile>,
    offline: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Вход выключает офлайн-режим.
    pub fn set_logged_in(&mut self, profile: UserProfile) {
        info!(user_id = profile.user_id, username = %profile.username, "вход выполнен");
        self.profile = Some(profile);
        self.offline = false;
    }

    /// Офлайн-режим выходит из аккаунта.
    pub fn set_offline_mode(&mut self, offline: bool) {
        self.offline = offline;
        if offline {
            self.profile = None;
        }
    }

    pub fn logout(&mut self) {
        if let Some(p) = self.profile.take() {
            info!(username = %p.username, "выход из аккаунта");
        }
        self.offline = false;
    }

    /// Кто сядет за офлайн-стол. Без входа имя и id пустые.
    pub fn player_identity(&self) -> PlayerIdentity {
        match &self.profile {
            Some(p) => PlayerIdentity {
                username: Some(p.username.clone()),
                user_id: Some(p.user_id),
            },
            None => PlayerIdentity::default(),
        }
    }
}
