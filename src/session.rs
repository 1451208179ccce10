//! Session - the loop body that ties the engine, auto player, observer and
//! high scores together
//!
//! A host calls [`Session::tick`] once per frame with a monotonic millisecond
//! clock and [`Session::apply`] for every input command. Finished games are
//! recorded in the high scores and restarted immediately.

use chrono::Local;

use crate::core::{Engine, EngineObserver, NullObserver, RandomSource, SimpleRng, TickOutcome};
use crate::engine::AutoPlayer;
use crate::scores::HighScores;
use crate::types::{Command, Direction};

pub struct Session<O = NullObserver, R = SimpleRng> {
    engine: Engine<R>,
    autoplayer: AutoPlayer,
    observer: O,
    high_scores: HighScores,
    autoplay: bool,
    /// Whether the previous tick applied gravity
    dropped: bool,
    /// Pieces landed in the current game
    pieces: u32,
    games_played: u32,
    last_final_score: Option<u32>,
}

impl<O: EngineObserver, R: RandomSource + Clone> Session<O, R> {
    /// Start a session with autoplay on
    pub fn new(rng: R, observer: O) -> Self {
        let mut session = Self {
            engine: Engine::new(rng),
            autoplayer: AutoPlayer::default(),
            observer,
            high_scores: HighScores::default(),
            autoplay: true,
            dropped: false,
            pieces: 0,
            games_played: 0,
            last_final_score: None,
        };
        session.engine.enable_autoplay(true);
        session.flush();
        session
    }

    pub fn with_autoplayer(mut self, autoplayer: AutoPlayer) -> Self {
        self.autoplayer = autoplayer;
        self
    }

    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Score of the most recently finished game
    pub fn last_final_score(&self) -> Option<u32> {
        self.last_final_score
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.autoplay = on;
        self.engine.enable_autoplay(on);
        if on {
            self.autoplayer.reset();
        }
    }

    /// One frame
    ///
    /// After a tick that dropped, the auto player (if on) gets one steering
    /// step before gravity is applied again.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.dropped && self.autoplay {
            self.engine.reset_counts();
            self.autoplayer.next_move(&mut self.engine);
        }

        let outcome = self.engine.update(now_ms);
        self.dropped = outcome.dropped;
        if outcome.landing.as_ref().is_some_and(|l| !l.game_over) {
            self.pieces += 1;
        }

        self.after_step();
        outcome
    }

    /// Apply one input command; returns whether it had an effect
    pub fn apply(&mut self, command: Command) -> bool {
        let applied = match command {
            Command::MoveLeft => self.engine.try_move(Direction::Left),
            Command::MoveRight => self.engine.try_move(Direction::Right),
            Command::RotateLeft => self.engine.rotate(Direction::Left),
            Command::RotateRight => self.engine.rotate(Direction::Right),
            Command::HardDrop => match self.engine.drop_hard() {
                Some(landing) => {
                    if !landing.game_over {
                        self.pieces += 1;
                    }
                    true
                }
                None => false,
            },
            Command::ToggleAutoplay => {
                self.set_autoplay(!self.autoplay);
                true
            }
            Command::Restart => {
                self.restart();
                true
            }
        };
        self.after_step();
        applied
    }

    /// Discard the current game without recording it
    pub fn restart(&mut self) {
        self.engine.restart();
        self.engine.enable_autoplay(self.autoplay);
        self.autoplayer.reset();
        self.dropped = false;
        self.pieces = 0;
        self.flush();
    }

    fn after_step(&mut self) {
        self.flush();
        if self.engine.is_game_over() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        if let Some(score) = self.engine.claim_score() {
            log::info!("game {} finished: score {}, {} pieces", self.games_played + 1, score, self.pieces);
            self.high_scores.record(score, Local::now().naive_local());
            self.last_final_score = Some(score);
            self.games_played += 1;
        }
        self.restart();
    }

    fn flush(&mut self) {
        self.engine.dispatch_events(&mut self.observer);
    }
}
