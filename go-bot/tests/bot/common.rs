#![allow(dead_code)]

use axum::Router;
use chrono::{DateTime, Utc};
use go_bot::session::{GameSession, GameVariant};
use go_bot::{Bot, BotConfig};
use go_engine::{Goban, Stone};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// No mistakes, no jitter.
pub fn strict_bot() -> Bot {
    Bot::new(BotConfig::strict())
}

pub fn session(layout: &[&str], turn: Stone) -> GameSession {
    GameSession::from_goban(Goban::from_layout(layout), turn, GameVariant::Standard)
}

/// A 9×9 layout with the given rows on top and empty rows below.
pub fn nine(rows: &[&'static str]) -> Vec<&'static str> {
    let mut layout = rows.to_vec();
    layout.resize(9, "+++++++++");
    layout
}

/// Serve `app` on an ephemeral port and return the suggestion endpoint URL.
pub async fn spawn_engine(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/suggest")
}
