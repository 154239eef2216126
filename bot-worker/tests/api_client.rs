//! Bot API client and bot handler tests against a local fake Telegram server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use tgbot::web::{router, AppState, SECRET_TOKEN_HEADER};
use tgbot::{ApiError, BotHandler, Config, Message, TelegramApi, UpdateHandler};

const TOKEN: &str = "testtoken";

type Requests = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

async fn fake_method(
    State(requests): State<Requests>,
    Path(method): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    requests
        .lock()
        .unwrap()
        .push((method.clone(), params.clone()));

    match method.as_str() {
        "getMe" => Json(json!({
            "ok": true,
            "result": {"id": 1, "is_bot": true, "first_name": "Echo", "username": "echo_bot"}
        }))
        .into_response(),
        "sendMessage" if params.get("chat_id").map(String::as_str) == Some("-1") => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })),
        )
            .into_response(),
        "sendMessage" => {
            let chat_id: i64 = params["chat_id"].parse().unwrap();
            Json(json!({
                "ok": true,
                "result": {
                    "message_id": 100,
                    "date": 1707900001,
                    "chat": {"id": chat_id, "type": "private"},
                    "text": params.get("text")
                }
            }))
            .into_response()
        }
        "answerCallbackQuery" | "setWebhook" | "deleteWebhook" => {
            Json(json!({"ok": true, "result": true})).into_response()
        }
        "getWebhookInfo" => Json(json!({
            "ok": true,
            "result": {
                "url": "https://bot.example.com/webhook",
                "has_custom_certificate": false,
                "pending_update_count": 3,
                "max_connections": 40
            }
        }))
        .into_response(),
        "brokenMethod" => (StatusCode::BAD_GATEWAY, "upstream down").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "error_code": 404, "description": "Not Found"})),
        )
            .into_response(),
    }
}

/// Start the fake server and return a config pointing at it.
async fn fake_telegram() -> (Config, Requests) {
    let requests: Requests = Arc::default();
    let app = Router::new()
        .route(&format!("/bot{}/:method", TOKEN), get(fake_method))
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = Config::new(TOKEN, "webhook-secret");
    config.api_base = format!("http://{}", addr);
    (config, requests)
}

fn api(config: &Config) -> TelegramApi {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    TelegramApi::with_client(client, config)
}

fn recorded(requests: &Requests) -> Vec<(String, HashMap<String, String>)> {
    requests.lock().unwrap().clone()
}

fn incoming_message(text: Option<&str>) -> Message {
    let mut raw = json!({
        "message_id": 5,
        "date": 1707900000,
        "chat": {"id": 42, "type": "private"},
        "from": {"id": 42, "is_bot": false, "first_name": "Ada"}
    });
    if let Some(text) = text {
        raw["text"] = json!(text);
    }
    serde_json::from_value(raw).unwrap()
}

#[tokio::test]
async fn get_me_decodes_result() {
    let (config, requests) = fake_telegram().await;

    let me = api(&config).get_me().await.unwrap();

    assert_eq!(me.extra.get("is_bot"), Some(&json!(true)));
    assert_eq!(me.extra.get("username"), Some(&json!("echo_bot")));
    let calls = recorded(&requests);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "getMe");
    assert!(calls[0].1.is_empty());
}

#[tokio::test]
async fn send_message_strips_null_params() {
    let (config, requests) = fake_telegram().await;

    let sent = api(&config)
        .send_message(42, "hello world", None)
        .await
        .unwrap();

    assert_eq!(sent.chat.id, 42);
    assert_eq!(sent.text_or_caption(), Some("hello world"));

    let (method, params) = recorded(&requests).remove(0);
    assert_eq!(method, "sendMessage");
    assert_eq!(params.get("chat_id").map(String::as_str), Some("42"));
    assert_eq!(params.get("text").map(String::as_str), Some("hello world"));
    assert!(!params.contains_key("reply_parameters"));
}

#[tokio::test]
async fn send_message_reply_is_json_encoded() {
    let (config, requests) = fake_telegram().await;

    api(&config).send_message(42, "re", Some(5)).await.unwrap();

    let (_, params) = recorded(&requests).remove(0);
    let reply: Value = serde_json::from_str(&params["reply_parameters"]).unwrap();
    assert_eq!(reply, json!({"message_id": 5}));
}

#[tokio::test]
async fn not_ok_envelope_is_telegram_error() {
    let (config, _) = fake_telegram().await;

    let err = api(&config)
        .send_message(-1, "nobody home", None)
        .await
        .unwrap_err();

    let envelope = err.envelope().expect("telegram envelope");
    assert!(!envelope.ok);
    assert_eq!(envelope.error_code, Some(400));
    assert_eq!(
        envelope.description.as_deref(),
        Some("Bad Request: chat not found")
    );
    assert!(err.to_string().contains("chat not found"));
}

#[tokio::test]
async fn unknown_method_is_telegram_error() {
    let (config, _) = fake_telegram().await;

    let err = api(&config)
        .call::<_, Value>("noSuchMethod", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Telegram(ref e) if e.error_code == Some(404)));
}

#[tokio::test]
async fn non_json_response_is_http_error() {
    let (config, _) = fake_telegram().await;

    let err = api(&config)
        .call::<_, Value>("brokenMethod", &Value::Null)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http(_)));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn webhook_management_calls() {
    let (config, requests) = fake_telegram().await;
    let api = api(&config);

    assert!(api
        .set_webhook("https://bot.example.com/webhook", "webhook-secret", false)
        .await
        .unwrap());
    let info = api.get_webhook_info().await.unwrap();
    assert!(api.delete_webhook(true).await.unwrap());

    assert_eq!(info.pending_update_count, 3);
    assert_eq!(info.extra.get("max_connections"), Some(&json!(40)));

    let calls = recorded(&requests);
    let (_, set_params) = &calls[0];
    assert_eq!(set_params["secret_token"], "webhook-secret");
    assert!(!set_params.contains_key("drop_pending_updates"));
    let (_, delete_params) = &calls[2];
    assert_eq!(delete_params["drop_pending_updates"], "true");
}

#[tokio::test]
async fn bot_handler_replies_to_text() {
    let (config, requests) = fake_telegram().await;
    let handler = BotHandler::new(api(&config));

    handler
        .handle_message(&incoming_message(Some("ping")))
        .await
        .unwrap();

    let (method, params) = recorded(&requests).remove(0);
    assert_eq!(method, "sendMessage");
    assert_eq!(params["chat_id"], "42");
    assert_eq!(params["text"], "ping");
}

#[tokio::test]
async fn bot_handler_replies_to_caption() {
    let (config, requests) = fake_telegram().await;
    let handler = BotHandler::new(api(&config));
    let photo: Message = serde_json::from_value(json!({
        "message_id": 6,
        "date": 1707900000,
        "chat": {"id": 42, "type": "private"},
        "photo": [{"file_id": "f", "file_unique_id": "u", "width": 1, "height": 1}],
        "caption": "look"
    }))
    .unwrap();

    handler.handle_message(&photo).await.unwrap();

    let (method, params) = recorded(&requests).remove(0);
    assert_eq!(method, "sendMessage");
    assert_eq!(params["text"], "look");
}

#[tokio::test]
async fn bot_handler_skips_messages_without_text() {
    let (config, requests) = fake_telegram().await;
    let handler = BotHandler::new(api(&config));

    handler.handle_message(&incoming_message(None)).await.unwrap();

    assert!(recorded(&requests).is_empty());
}

#[tokio::test]
async fn bot_handler_answers_callback_queries() {
    let (config, requests) = fake_telegram().await;
    let handler = BotHandler::new(api(&config));
    let query = serde_json::from_value(json!({
        "id": "cbq-9",
        "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
        "chat_instance": "ci",
        "data": "go"
    }))
    .unwrap();

    handler.handle_callback_query(&query).await.unwrap();

    let (method, params) = recorded(&requests).remove(0);
    assert_eq!(method, "answerCallbackQuery");
    assert_eq!(params["callback_query_id"], "cbq-9");
    assert!(!params.contains_key("text"));
}

#[tokio::test]
async fn webhook_with_bot_handler_replies_through_api() {
    let (config, requests) = fake_telegram().await;
    let handler = Arc::new(BotHandler::new(api(&config)));
    let app = router(AppState::new(config, handler));

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header(SECRET_TOKEN_HEADER, "webhook-secret")
        .body(Body::from(
            json!({
                "update_id": 10,
                "message": {
                    "message_id": 5,
                    "date": 1707900000,
                    "chat": {"id": 42, "type": "private"},
                    "text": "echo me"
                }
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let calls = recorded(&requests);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1["text"], "echo me");
}

#[tokio::test]
async fn webhook_reply_failure_still_ok() {
    let (config, requests) = fake_telegram().await;
    let handler = Arc::new(BotHandler::new(api(&config)));
    let app = router(AppState::new(config, handler));

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header(SECRET_TOKEN_HEADER, "webhook-secret")
        .body(Body::from(
            json!({
                "update_id": 11,
                "message": {
                    "message_id": 6,
                    "date": 1707900000,
                    "chat": {"id": -1, "type": "group", "title": "gone"},
                    "text": "anyone?"
                }
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(recorded(&requests).len(), 1);
}
