use thiserror::Error;

/// Ошибки клиента сессии. Текст ошибки показывается пользователю как есть.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Некорректный адрес API: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Внутренняя ошибка: не удалось создать HTTP-клиент: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Сервер не доступен или проблемы с сетью.")]
    ServerUnavailable(#[source] reqwest::Error),

    #[error("Неверное имя пользователя или пароль.")]
    InvalidCredentials,

    #[error("Ошибка сервера: {0}")]
    MalformedResponse(String),

    /// Регистрация: имя или email заняты (409).
    #[error("{0}")]
    Conflict(String),

    /// Регистрация: сервер отверг данные (400).
    #[error("{0}")]
    InvalidData(String),

    /// Любой другой ответ с ошибкой; сообщение уже собрано из тела ответа.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Код друга не может быть пустым.")]
    EmptyFriendCode,

    #[error("Для добавления друга необходимо войти в аккаунт.")]
    NotLoggedIn,
}

impl ApiError {
    /// HTTP-код ответа, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidCredentials => Some(401),
            ApiError::Conflict(_) => Some(409),
            ApiError::InvalidData(_) => Some(400),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
