mod bot;

use std::process::ExitCode;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use zzocker_core::{MatchConfig, Score};
use zzocker_sim::{MatchEvent, RunStatus, Simulation};

use bot::ChaseBall;

/// Set to `json` for machine-readable log lines.
const LOG_FORMAT_ENV_VAR: &str = "ZZOCKER_LOG_FORMAT";
const DEFAULT_SEED: u64 = 1;
const BOT_JITTER: f64 = 0.2;

#[derive(Debug, Serialize)]
struct MatchSummary {
    status: RunStatus,
    score: Score,
    elapsed_time: f64,
    ticks: u64,
    goals: Vec<MatchEvent>,
}

fn init_tracing() {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if std::env::var(LOG_FORMAT_ENV_VAR).is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let config_path = std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix("--config=").map(String::from));
    let seed = std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix("--seed=").and_then(|s| s.parse::<u64>().ok()))
        .unwrap_or(DEFAULT_SEED);

    let config = match config_path {
        Some(path) => match MatchConfig::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!("Invalid config {path}: {e}");
                return ExitCode::FAILURE;
            },
        },
        None => MatchConfig::load(),
    };

    let mut sim = match Simulation::from_config(&config, ChaseBall::new(seed, BOT_JITTER)) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!("Invalid match setup: {e}");
            return ExitCode::FAILURE;
        },
    };

    let mut goals = Vec::new();
    let result = sim.run_with(|_, outcome| {
        goals.extend(
            outcome
                .events
                .iter()
                .filter(|e| matches!(e, MatchEvent::Goal { .. }))
                .cloned(),
        );
    });

    let status = match result {
        Ok(status) => status,
        Err(e) => {
            tracing::error!("Match aborted: {e}");
            return ExitCode::FAILURE;
        },
    };

    let world = sim.world();
    let summary = MatchSummary {
        status,
        score: world.score,
        elapsed_time: world.elapsed_time,
        ticks: world.tick,
        goals,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Failed to serialize match summary: {e}");
            ExitCode::FAILURE
        },
    }
}
