use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use go_bot::adapter::{ExternalEngine, HttpEngine, NoEngine, SuggestRequest};
use go_bot::session::{GameSession, GameVariant};
use go_bot::{Bot, BotConfig, BotError, SessionDelta};
use go_engine::Stone;
use serde_json::{Value, json};

use crate::common::{at, rng, session, spawn_engine};

fn fixed(x: i32, y: i32) -> Router {
    Router::new().route("/suggest", post(move || async move { Json(json!({ "x": x, "y": y })) }))
}

fn bot_with_timeout(ms: u64) -> Bot {
    Bot::new(BotConfig {
        engine_timeout_ms: ms,
        ..BotConfig::strict()
    })
}

fn played(delta: SessionDelta) -> (u8, u8) {
    match delta {
        SessionDelta::Play(d) => d.point,
        other => panic!("expected a play, got {other:?}"),
    }
}

#[tokio::test]
async fn uses_a_legal_suggestion() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::default();
    let recorder = seen.clone();
    let app = Router::new().route(
        "/suggest",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some(body);
                Json(json!({ "x": 2, "y": 3 }))
            }
        }),
    );
    let url = spawn_engine(app).await;
    let engine = HttpEngine::new(url, Duration::from_secs(2)).unwrap();

    let session = GameSession::new(9, GameVariant::Standard);
    let delta = bot_with_timeout(2000)
        .play_turn(&engine, &session, 4, &mut rng(0), at(0))
        .await;
    assert_eq!(played(delta), (2, 3));

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["boardSize"], 9);
    assert_eq!(body["player"], 1);
    assert_eq!(body["level"], 4);
}

#[tokio::test]
async fn illegal_suggestion_falls_back() {
    let url = spawn_engine(fixed(4, 4)).await;
    let engine = HttpEngine::new(url, Duration::from_secs(2)).unwrap();
    let layout = ["+++++", "+++++", "+++++", "+++++", "++++W"];
    let s = session(&layout, Stone::Black);

    let delta = bot_with_timeout(2000)
        .play_turn(&engine, &s, 5, &mut rng(0), at(0))
        .await;
    assert_ne!(played(delta), (4, 4));
}

#[tokio::test]
async fn off_board_suggestion_is_rejected() {
    let url = spawn_engine(fixed(12, 0)).await;
    let engine = HttpEngine::new(url, Duration::from_secs(2)).unwrap();
    let session = GameSession::new(9, GameVariant::Standard);
    let request = SuggestRequest::from_session(&session, None);
    assert!(matches!(engine.suggest(&request).await, Err(BotError::Engine(_))));
}

#[tokio::test]
async fn slow_engine_times_out_and_falls_back() {
    let app = Router::new().route(
        "/suggest",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({ "x": 0, "y": 0 }))
        }),
    );
    let url = spawn_engine(app).await;
    let engine = HttpEngine::new(url, Duration::from_secs(5)).unwrap();
    let session = GameSession::new(9, GameVariant::Standard);

    let delta = bot_with_timeout(50)
        .play_turn(&engine, &session, 6, &mut rng(0), at(0))
        .await;
    let heuristic = bot_with_timeout(50).take_turn(&session, 6, &mut rng(0), at(0));
    assert_eq!(delta, heuristic);
}

#[tokio::test]
async fn server_error_falls_back() {
    let app = Router::new().route("/suggest", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let url = spawn_engine(app).await;
    let engine = HttpEngine::new(url, Duration::from_secs(2)).unwrap();
    let session = GameSession::new(9, GameVariant::Standard);

    let delta = bot_with_timeout(2000)
        .play_turn(&engine, &session, 3, &mut rng(0), at(0))
        .await;
    assert!(matches!(delta, SessionDelta::Play(_)));
}

#[tokio::test]
async fn unreachable_engine_falls_back() {
    let engine = HttpEngine::new("http://127.0.0.1:9/suggest", Duration::from_millis(200)).unwrap();
    let session = GameSession::new(9, GameVariant::Standard);
    let delta = bot_with_timeout(1000)
        .play_turn(&engine, &session, 2, &mut rng(0), at(0))
        .await;
    assert!(matches!(delta, SessionDelta::Play(_)));
}

#[tokio::test]
async fn no_engine_is_never_consulted() {
    let session = GameSession::new(9, GameVariant::Standard);
    let bot = bot_with_timeout(1000);
    let delta = bot.play_turn(&NoEngine, &session, 7, &mut rng(0), at(0)).await;
    assert_eq!(delta, bot.take_turn(&session, 7, &mut rng(0), at(0)));
}
