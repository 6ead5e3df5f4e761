//! Разбор тел ошибок сервера.
//!
//! Сервер отдаёт ошибки в духе Spring: `{"message": ...}`, `{"error": ...}`
//! и для валидации `{"errors": [{"defaultMessage": ...}, "строка", ...]}`.

use serde_json::Value;

pub const UNKNOWN_FRIEND_ERROR: &str = "Неизвестная ошибка при добавлении друга.";
pub const CONFLICT_MESSAGE: &str = "Имя пользователя или Email уже существует.";
pub const INVALID_DATA_MESSAGE: &str = "Предоставлены неверные данные.";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Регистрация прошла успешно! Теперь вы можете войти.";
pub const FRIEND_ADDED_MESSAGE: &str = "Друг успешно добавлен!";

pub fn server_error_default(status: u16) -> String {
    format!("Ошибка сервера (Код: {status})")
}

fn parse_object(body: &str) -> Option<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Непустое строковое поле `message`, иначе `error`.
fn message_field(obj: &serde_json::Map<String, Value>) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Ошибки валидации из массива `errors`, склеенные через `sep`.
fn validation_errors(obj: &serde_json::Map<String, Value>, sep: &str) -> Option<String> {
    let items = obj.get("errors")?.as_array()?;
    let parts: Vec<&str> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(o) => o.get("defaultMessage").and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(sep))
    }
}

/// Сообщение для неудачного логина (кроме 401).
pub fn login_failure_message(status: u16, body: &str) -> String {
    let Some(obj) = parse_object(body) else {
        return server_error_default(status);
    };
    validation_errors(&obj, "; ")
        .or_else(|| message_field(&obj))
        .unwrap_or_else(|| server_error_default(status))
}

/// Сообщение для неудачной регистрации: база по коду, поверх – ответ сервера.
pub fn register_failure_message(status: u16, body: &str) -> String {
    let base = match status {
        409 => CONFLICT_MESSAGE.to_string(),
        400 => INVALID_DATA_MESSAGE.to_string(),
        _ => server_error_default(status),
    };
    let Some(obj) = parse_object(body) else {
        return base;
    };
    validation_errors(&obj, "\n")
        .or_else(|| message_field(&obj))
        .unwrap_or(base)
}

/// Сообщение для неудачного добавления друга.
pub fn add_friend_failure_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(obj)) => message_field(&obj).unwrap_or_else(|| UNKNOWN_FRIEND_ERROR.to_string()),
        // Не объект (массив, строка) или не JSON: показываем тело как есть.
        _ if !body.is_empty() => format!("Ошибка сервера (Код: {status}): {body}"),
        _ => server_error_default(status),
    }
}

/// Сообщение об успешном добавлении друга: `message` сервера или стандартный текст.
pub fn add_friend_success_message(body: &str) -> String {
    parse_object(body)
        .and_then(|obj| obj.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| FRIEND_ADDED_MESSAGE.to_string())
}
