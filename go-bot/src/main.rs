use std::time::Duration;

use go_bot::adapter::HttpEngine;
use go_bot::arena::{Arena, SeriesSummary};
use go_bot::{Bot, BotConfig, BotError};
use rand::{RngExt, SeedableRng};
use rand::rngs::StdRng;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_bot=info".into()),
        )
        .init();

    let config = BotConfig::from_env().expect("Failed to load configuration");
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::rng().random()),
    };
    let (first, second) = config.levels;
    let (games, size) = (config.games, config.board_size);
    tracing::info!("Playing {games} games on {size}x{size}: level {first} vs level {second}");

    let bot = Bot::new(config.clone());
    let summary = match &config.engine_url {
        Some(url) => {
            let engine = HttpEngine::new(url, Duration::from_millis(config.engine_timeout_ms))
                .expect("Failed to build engine client");
            tracing::info!("Consulting external engine at {url}");
            Arena::with_engine(bot, engine)
                .run_series(first, second, games, size, &mut rng)
                .await
        }
        None => {
            Arena::new(bot)
                .run_series(first, second, games, size, &mut rng)
                .await
        }
    };

    report(first, second, summary);
}

fn report(first: u8, second: u8, summary: Result<SeriesSummary, BotError>) {
    match summary {
        Ok(s) => tracing::info!(
            "Level {first}: {} wins, level {second}: {} wins, {} draws ({:.0}% for level {first})",
            s.first_wins,
            s.second_wins,
            s.draws,
            s.first_win_rate() * 100.0
        ),
        Err(e) => {
            tracing::error!("Series aborted: {e}");
            std::process::exit(1);
        }
    }
}
