//! Headless runner (default binary).
//!
//! Plays games on a simulated millisecond clock and prints the final score of
//! each. With `AUTOTRIS_MANUAL=1` the auto player is off and key commands are
//! read from stdin, one line per gravity step.

use std::io::{self, BufRead};

use anyhow::Result;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

use autotris::config::RunnerConfig;
use autotris::core::{EngineObserver, SimpleRng};
use autotris::input::{command_for_key, should_quit};
use autotris::scores::HighScores;
use autotris::session::Session;
use autotris::types::{AUTOPLAY_MOVE_INTERVAL_MS, MOVE_INTERVAL_MS};

/// Prints `log` records to stderr with the runner tag
struct RunnerLogger;

impl Log for RunnerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[Runner] {} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: RunnerLogger = RunnerLogger;

/// Tracks what the runner prints per game
#[derive(Default)]
struct Progress {
    score: u32,
    game_overs: u32,
}

impl EngineObserver for Progress {
    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn game_over(&mut self) {
        self.game_overs += 1;
    }
}

fn main() -> Result<()> {
    let config = RunnerConfig::from_env();
    init_logging(config.log_level);

    println!(
        "[Runner] seed={} games={} max_pieces={} manual={}",
        config.seed, config.games, config.max_pieces, config.manual
    );

    let high_scores = match &config.scores_path {
        Some(path) => HighScores::load(path, Local::now().naive_local()),
        None => HighScores::default(),
    };

    let mut session = Session::new(SimpleRng::new(config.seed), Progress::default())
        .with_high_scores(high_scores);
    session.set_autoplay(!config.manual);

    if config.manual {
        run_manual(&mut session)?;
    } else {
        run_auto(&mut session, &config);
    }

    if let Some(best) = session.high_scores().best() {
        println!("[Runner] best score: {}", best);
    }
    if let Some(path) = &config.scores_path {
        session.high_scores().save(path)?;
        println!("[Runner] high scores saved to {}", path.display());
    }
    Ok(())
}

fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn run_auto(session: &mut Session<Progress, SimpleRng>, config: &RunnerConfig) {
    let step = AUTOPLAY_MOVE_INTERVAL_MS as u64 + 1;
    let mut now_ms = 0u64;

    for game in 1..=config.games {
        let played = session.games_played();
        loop {
            now_ms += step;
            session.tick(now_ms);

            if session.games_played() > played {
                let score = session.last_final_score().unwrap_or(0);
                println!("[Runner] game {}: game over, score {}", game, score);
                break;
            }
            if session.pieces() >= config.max_pieces {
                let score = session.engine().score();
                println!(
                    "[Runner] game {}: stopped after {} pieces, score {}",
                    game, config.max_pieces, score
                );
                session.restart();
                break;
            }
        }
    }
}

fn run_manual(session: &mut Session<Progress, SimpleRng>) -> Result<()> {
    // One gravity step per input line.
    let step = MOVE_INTERVAL_MS as u64 + 1;
    let mut now_ms = 0u64;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.chars().any(should_quit) {
            break;
        }
        for command in line.chars().filter_map(command_for_key) {
            session.apply(command);
        }
        now_ms += step;
        session.tick(now_ms);
        println!(
            "[Runner] score {} pieces {}",
            session.observer().score,
            session.pieces()
        );
    }

    println!(
        "[Runner] {} game(s) over, last score {}",
        session.observer().game_overs,
        session.last_final_score().unwrap_or(0)
    );
    Ok(())
}
