mod script;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use stomp_core::game_trait::{GameConfig, SimGame};
use stomp_core::input::InputState;
use stomp_platformer::StompGame;
use stomp_platformer::config::StompConfig;

/// Ticks played when neither `--ticks=` nor a script is given.
const DEFAULT_TICKS: usize = 600;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let script_src = arg_value(&args, "--script=").unwrap_or(script::DEMO_SCRIPT);
    let frames = match script::parse(script_src) {
        Ok(steps) => script::frames(&steps),
        Err(e) => {
            tracing::error!("Invalid script: {e}");
            return ExitCode::FAILURE;
        },
    };

    let ticks = arg_value(&args, "--ticks=")
        .and_then(|t| t.parse::<usize>().ok())
        .unwrap_or(frames.len().max(DEFAULT_TICKS));

    let config = StompConfig::load();
    let seed = arg_value(&args, "--seed=")
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(config.seed);

    let mut game = StompGame::with_config(config);
    game.init(&GameConfig::with_seed(seed));
    tracing::info!("{} starting (seed {seed}, {ticks} ticks)", game.metadata().name);

    let played = run(&mut game, &frames, ticks);
    let view = game.render_view();
    tracing::info!(
        played,
        score = view.score,
        lives = view.lives,
        status = ?view.status,
        "Session finished"
    );

    match serde_json::to_string_pretty(&view) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Failed to encode render view: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Value of the first `prefix`-style argument, e.g. `--seed=7`.
fn arg_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter().find_map(|a| a.strip_prefix(prefix))
}

/// Drive `game` with the scripted frames (idle once they run out) until
/// `ticks` frames have played or quit is pressed. A finished session keeps
/// running so a scripted reset can start the next one. Returns the number
/// of frames played.
fn run(game: &mut StompGame, frames: &[InputState], ticks: usize) -> usize {
    let dt = 1.0 / game.tick_rate();
    let mut status = game.status();
    for tick in 0..ticks {
        let input = frames.get(tick).copied().unwrap_or_default();
        if input.quit {
            tracing::info!("Quit requested at tick {tick}");
            return tick;
        }

        for event in game.update(dt, &input) {
            tracing::debug!(tick, ?event, "Game event");
            if let Some(cue) = event.audio_cue() {
                tracing::info!(tick, ?cue, "Play sound");
            }
        }

        let now = game.status();
        if now != status {
            tracing::info!(tick, from = ?status, to = ?now, "Session status changed");
            status = now;
        }
    }
    ticks
}
