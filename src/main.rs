//! Bubble Pop headless runner
//!
//! Plays one autopilot game with the simulation engine and records the
//! result on the local leaderboard.
//!
//! Usage: `bubble-pop [easy|medium|hard]`. A difficulty given on the command
//! line is remembered in the settings file. Set `RUST_LOG=info` to follow
//! events as they happen.

use std::time::{SystemTime, UNIX_EPOCH};

use bubble_pop::sim::{GameEvent, GameState, TickInput, tick};
use bubble_pop::{HighScores, Settings};

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Bubble Pop (headless) starting...");

    let mut settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let mut state = GameState::new(seed);
    state.select(settings.difficulty);
    if let Some(name) = std::env::args().nth(1) {
        if state.select_difficulty(&name) && state.selected_difficulty() != settings.difficulty {
            settings.difficulty = state.selected_difficulty();
            settings.save();
        }
    }
    let viewport = settings.viewport();
    state.resize(viewport.width, viewport.height);
    state.start();
    log::info!(
        "Game initialized with seed: {} ({})",
        seed,
        state.difficulty().as_str()
    );

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut shots = 0u32;
    while state.time_ticks < settings.demo_max_ticks && !state.is_game_over() {
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::Shoot => shots += 1,
                GameEvent::Pop { count } => log::info!("Popped {} bubbles", count),
                GameEvent::RowAdded { dropped } => {
                    log::info!("New row pushed from the top, {} bubbles lost", dropped)
                }
                GameEvent::LevelCleared { level } => log::info!("Board cleared, level {}", level),
                GameEvent::GameOver { final_score } => {
                    log::info!("Game over with score {}", final_score)
                }
            }
        }
    }

    if !state.is_game_over() {
        log::info!("Tick limit reached, ending run");
        state.end_game();
    }

    match serde_json::to_string(&state.snapshot()) {
        Ok(json) => log::debug!("Final snapshot: {}", json),
        Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
    }

    let mut scores = HighScores::load();
    let best = scores.top_score();
    let rank = scores.record(&state, unix_now());
    if let Some(rank) = rank {
        log::info!("New high score, rank #{}", rank);
        scores.save();
    }

    println!(
        "seed {} | {} | level {} | score {} | {} shots | {} ticks{}{}",
        seed,
        state.difficulty().as_str(),
        state.level,
        state.score,
        shots,
        state.time_ticks,
        rank.map(|r| format!(" | rank #{}", r)).unwrap_or_default(),
        best.map(|b| format!(" | previous best {}", b))
            .unwrap_or_default()
    );
}
