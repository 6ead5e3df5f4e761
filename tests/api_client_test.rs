use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use poker_client::api::messages::{
    add_friend_failure_message, login_failure_message, register_failure_message, CONFLICT_MESSAGE,
    FRIEND_ADDED_MESSAGE, INVALID_DATA_MESSAGE, REGISTER_SUCCESS_MESSAGE, UNKNOWN_FRIEND_ERROR,
};
use poker_client::api::{ApiError, Session, SessionClient, UserProfile};

const TIMEOUT: Duration = Duration::from_secs(5);

fn client_for(server: &MockServer) -> SessionClient {
    SessionClient::new(&server.url("/api"), TIMEOUT).unwrap()
}

async fn logged_in_client(server: &MockServer) -> SessionClient {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .json_body(json!({"userId": 7, "username": "alice", "friendCode": "ALICE-7"}));
        })
        .await;
    let mut client = client_for(server);
    client.login("alice", "secret").await.unwrap();
    client
}

//
// ====================== ЛОГИН ======================
//

#[tokio::test]
async fn login_success_stores_profile() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({"username": "alice", "password": "secret"}));
            then.status(200)
                .json_body(json!({"userId": 7, "username": "alice", "friendCode": "ALICE-7", "extra": true}));
        })
        .await;

    let mut client = client_for(&server);
    assert!(!client.is_logged_in());

    let profile = client.login("alice", "secret").await.unwrap();
    mock.assert_async().await;

    assert_eq!(
        profile,
        UserProfile {
            user_id: 7,
            username: "alice".to_string(),
            friend_code: "ALICE-7".to_string(),
        }
    );
    assert!(client.is_logged_in());
    assert_eq!(client.session().profile(), Some(&profile));

    let identity = client.player_identity();
    assert_eq!(identity.username.as_deref(), Some("alice"));
    assert_eq!(identity.user_id, Some(7));

    client.logout();
    assert!(!client.is_logged_in());
    assert_eq!(client.player_identity().username, None);
}

#[tokio::test]
async fn login_unauthorized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401).body("Unauthorized");
        })
        .await;

    let mut client = client_for(&server);
    let err = client.login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
    assert_eq!(err.to_string(), "Неверное имя пользователя или пароль.");
    assert_eq!(err.status(), Some(401));
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn login_with_incomplete_profile_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(json!({"userId": 7, "username": "alice"}));
        })
        .await;

    let mut client = client_for(&server);
    let err = client.login("alice", "secret").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Ошибка сервера: Неверный формат ответа (отсутствуют userId, username или friendCode)."
    );
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn login_with_broken_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let mut client = client_for(&server);
    let err = client.login("alice", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Ошибка сервера: Не удалось обработать ответ JSON.");
}

#[tokio::test]
async fn login_server_error_collects_validation_messages() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(400).json_body(json!({
                "message": "ignored",
                "errors": [{"defaultMessage": "username пустой"}, "password пустой"]
            }));
        })
        .await;

    let mut client = client_for(&server);
    let err = client.login("", "").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "username пустой; password пустой");
}

#[tokio::test]
async fn unreachable_server() {
    let mut client = SessionClient::new("http://127.0.0.1:1/api", Duration::from_secs(2)).unwrap();
    let err = client.login("alice", "secret").await.unwrap_err();
    assert!(matches!(err, ApiError::ServerUnavailable(_)));
    assert_eq!(err.to_string(), "Сервер не доступен или проблемы с сетью.");
    assert_eq!(err.status(), None);
}

#[test]
fn invalid_base_url() {
    let err = SessionClient::new("not a url", TIMEOUT).unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
}

//
// ====================== РЕГИСТРАЦИЯ ======================
//

#[tokio::test]
async fn register_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/register")
                .json_body(json!({"username": "bob", "password": "pw", "email": "bob@example.com"}));
            then.status(201);
        })
        .await;

    let client = client_for(&server);
    let message = client.register("bob", "pw", "bob@example.com").await.unwrap();
    mock.assert_async().await;
    assert_eq!(message, REGISTER_SUCCESS_MESSAGE);
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn register_conflict_uses_default_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(409);
        })
        .await;

    let client = client_for(&server);
    let err = client.register("bob", "pw", "bob@example.com").await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(err.to_string(), CONFLICT_MESSAGE);
}

#[tokio::test]
async fn register_bad_request_lists_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(400)
                .json_body(json!({"errors": [{"defaultMessage": "email некорректен"}, {"defaultMessage": "пароль короткий"}]}));
        })
        .await;

    let client = client_for(&server);
    let err = client.register("bob", "pw", "bob").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidData(_)));
    assert_eq!(err.to_string(), "email некорректен\nпароль короткий");
}

#[tokio::test]
async fn register_other_error_uses_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(500).json_body(json!({"error": "Internal Server Error"}));
        })
        .await;

    let client = client_for(&server);
    let err = client.register("bob", "pw", "bob@example.com").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Internal Server Error");
}

//
// ====================== ДРУЗЬЯ ======================
//

#[tokio::test]
async fn add_friend_requires_code_and_login() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/friends/add");
            then.status(200);
        })
        .await;

    let client = client_for(&server);
    let err = client.add_friend("").await.unwrap_err();
    assert_eq!(err.to_string(), "Код друга не может быть пустым.");

    let err = client.add_friend("BOB-1").await.unwrap_err();
    assert!(matches!(err, ApiError::NotLoggedIn));
    assert_eq!(err.to_string(), "Для добавления друга необходимо войти в аккаунт.");

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn add_friend_success_messages() {
    let server = MockServer::start_async().await;
    let client = logged_in_client(&server).await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/friends/add")
                .json_body(json!({"friendCode": "BOB-1"}));
            then.status(200).json_body(json!({"message": "Боб теперь ваш друг"}));
        })
        .await;
    let message = client.add_friend("BOB-1").await.unwrap();
    mock.assert_async().await;
    assert_eq!(message, "Боб теперь ваш друг");

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/friends/add").json_body(json!({"friendCode": "EVE-2"}));
            then.status(201);
        })
        .await;
    assert_eq!(client.add_friend("EVE-2").await.unwrap(), FRIEND_ADDED_MESSAGE);
}

#[tokio::test]
async fn add_friend_failures() {
    let server = MockServer::start_async().await;
    let client = logged_in_client(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/friends/add").json_body(json!({"friendCode": "NOPE"}));
            then.status(404).body("not found");
        })
        .await;
    let err = client.add_friend("NOPE").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Ошибка сервера (Код: 404): not found");

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/friends/add").json_body(json!({"friendCode": "SELF"}));
            then.status(400).json_body(json!({"message": "Нельзя добавить себя"}));
        })
        .await;
    let err = client.add_friend("SELF").await.unwrap_err();
    assert_eq!(err.to_string(), "Нельзя добавить себя");

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/friends/add").json_body(json!({"friendCode": "LIST"}));
            then.status(422).json_body(json!(["bad code"]));
        })
        .await;
    let err = client.add_friend("LIST").await.unwrap_err();
    assert_eq!(err.to_string(), r#"Ошибка сервера (Код: 422): ["bad code"]"#);
}

//
// ====================== СЕССИЯ И СООБЩЕНИЯ ======================
//

#[test]
fn offline_mode_logs_out() {
    let mut session = Session::new();
    session.set_logged_in(UserProfile {
        user_id: 1,
        username: "alice".to_string(),
        friend_code: "A-1".to_string(),
    });
    assert!(session.is_logged_in());
    assert!(!session.is_offline());

    session.set_offline_mode(true);
    assert!(session.is_offline());
    assert!(!session.is_logged_in());

    session.set_logged_in(UserProfile {
        user_id: 1,
        username: "alice".to_string(),
        friend_code: "A-1".to_string(),
    });
    assert!(!session.is_offline());
}

#[test]
fn failure_messages_fall_back_to_defaults() {
    assert_eq!(login_failure_message(503, ""), "Ошибка сервера (Код: 503)");
    assert_eq!(login_failure_message(500, r#"{"message": ""}"#), "Ошибка сервера (Код: 500)");
    assert_eq!(login_failure_message(500, r#"{"error": "boom"}"#), "boom");

    assert_eq!(register_failure_message(400, "garbage"), INVALID_DATA_MESSAGE);
    assert_eq!(register_failure_message(502, "[]"), "Ошибка сервера (Код: 502)");

    assert_eq!(add_friend_failure_message(409, r#"{"status": 409}"#), UNKNOWN_FRIEND_ERROR);
    assert_eq!(add_friend_failure_message(500, ""), "Ошибка сервера (Код: 500)");
    assert_eq!(add_friend_failure_message(400, "[]"), "Ошибка сервера (Код: 400): []");
    assert_eq!(add_friend_failure_message(400, r#""x""#), r#"Ошибка сервера (Код: 400): "x""#);
}
