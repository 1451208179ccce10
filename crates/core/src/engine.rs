//! Engine module - spawn, fall, land, clear, respawn
//!
//! The engine owns one board, the falling piece and the queued next piece. Each
//! call to [`Engine::update`] is one tick: counters reset, and if the tick mode
//! says a drop is due the falling piece falls one row (earning [`TICK_SCORE`]) or
//! lands. A landing with the anchor on row 0 ends the game; any other landing
//! credits the line-clear points and promotes the next piece.
//!
//! Lifecycle: Spawned -> Falling -> (Landed -> Spawned | GameOver)
//!
//! Timing is a strategy chosen at construction ([`TickMode`]): live engines
//! drop when more than `interval_ms` passed since the last drop, simulation
//! engines drop on every step and never look at the clock.

use crate::board::{Board, ClearedRows, LineClear};
use crate::events::{deliver, EngineEvent, EngineObserver};
use crate::piece::Piece;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::drop_score;
use crate::types::*;

/// When gravity applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// Drop when `now - last_drop > interval_ms`
    RealTime { interval_ms: u32 },
    /// Drop on every update regardless of time
    EveryStep,
}

impl Default for TickMode {
    fn default() -> Self {
        TickMode::RealTime {
            interval_ms: MOVE_INTERVAL_MS,
        }
    }
}

/// A piece came to rest this tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Landing {
    /// Line-clear points (not credited when `game_over` is set)
    pub score: u32,
    pub cleared_rows: ClearedRows,
    pub game_over: bool,
}

impl Landing {
    pub fn lines(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// What one [`Engine::update`] did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Gravity applied this tick
    pub dropped: bool,
    pub landing: Option<Landing>,
}

impl TickOutcome {
    pub fn landed(&self) -> bool {
        self.landing.is_some()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine<R = SimpleRng> {
    board: Board,
    falling: Option<Piece>,
    next: Option<Piece>,
    rng: R,
    mode: TickMode,
    score: u32,
    /// Rows cleared since restart
    lines: u32,
    last_drop_ms: u64,
    /// Moves attempted this tick
    moves: u8,
    /// Rotations attempted this tick
    rotates: u8,
    autoplay: bool,
    game_over: bool,
    score_claimed: bool,
    /// Simulation instances never record events
    silent: bool,
    events: Vec<EngineEvent>,
}

impl<R: RandomSource + Clone> Engine<R> {
    /// Create a live, real-time engine and start the first game
    pub fn new(rng: R) -> Self {
        Self::with_mode(rng, TickMode::default())
    }

    /// Create an engine with an explicit tick strategy and start the first game
    pub fn with_mode(rng: R, mode: TickMode) -> Self {
        let mut engine = Self {
            board: Board::new(),
            falling: None,
            next: None,
            rng,
            mode,
            score: 0,
            lines: 0,
            last_drop_ms: 0,
            moves: 0,
            rotates: 0,
            autoplay: false,
            game_over: false,
            score_claimed: false,
            silent: false,
            events: Vec::new(),
        };
        engine.restart();
        engine
    }

    /// Deep copy into a silent, clock-free instance for look-ahead
    ///
    /// The copy owns its board, pieces and random source; nothing it does is
    /// visible to `self` or to any observer.
    pub(crate) fn detached(&self) -> Self {
        Self {
            board: self.board,
            falling: self.falling,
            next: self.next,
            rng: self.rng.clone(),
            mode: TickMode::EveryStep,
            score: self.score,
            lines: self.lines,
            last_drop_ms: self.last_drop_ms,
            moves: self.moves,
            rotates: self.rotates,
            autoplay: self.autoplay,
            game_over: self.game_over,
            score_claimed: true,
            silent: true,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn mode(&self) -> TickMode {
        self.mode
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_simulation(&self) -> bool {
        self.silent
    }

    /// Replace the board contents (puzzle setups, replays, tests)
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
        self.record(EngineEvent::BoardChanged);
    }

    /// Switch autoplay; a real-time engine also switches its gravity interval
    pub fn enable_autoplay(&mut self, on: bool) {
        self.autoplay = on;
        if let TickMode::RealTime { interval_ms } = &mut self.mode {
            *interval_ms = if on {
                AUTOPLAY_MOVE_INTERVAL_MS
            } else {
                MOVE_INTERVAL_MS
            };
        }
    }

    /// Discard the current game and start a new one
    ///
    /// Autoplay is switched off; the caller re-enables it if wanted.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
        self.score_claimed = false;
        self.record(EngineEvent::ScoreChanged(0));

        if let Some(piece) = self.falling.take() {
            self.record(EngineEvent::BlockUnregistered(piece));
        }
        if let Some(piece) = self.next.take() {
            self.record(EngineEvent::BlockUnregistered(piece));
        }

        let next = self.create_block(false);
        let falling = self.create_block(true);
        self.next = Some(next);
        self.falling = Some(falling);
        self.record(EngineEvent::BlockRegistered(falling));
        self.record(EngineEvent::BlockRegistered(next));

        self.last_drop_ms = 0;
        self.board = Board::new();
        self.record(EngineEvent::BoardChanged);
        self.enable_autoplay(false);
        self.reset_counts();
    }

    /// One tick of the game loop
    ///
    /// `now_ms` is any monotonic millisecond clock; simulation engines ignore it.
    pub fn update(&mut self, now_ms: u64) -> TickOutcome {
        self.reset_counts();
        self.record(EngineEvent::ScoreChanged(self.score));
        self.check_falling_block(now_ms)
    }

    fn drop_due(&self, now_ms: u64) -> bool {
        match self.mode {
            TickMode::RealTime { interval_ms } => {
                now_ms.saturating_sub(self.last_drop_ms) > interval_ms as u64
            }
            TickMode::EveryStep => true,
        }
    }

    fn check_falling_block(&mut self, now_ms: u64) -> TickOutcome {
        if self.game_over || !self.drop_due(now_ms) {
            return TickOutcome::default();
        }
        let Some(piece) = self.falling.as_mut() else {
            return TickOutcome::default();
        };

        self.score += drop_score(1);
        let clear = piece.drop(&mut self.board);
        self.last_drop_ms = now_ms;

        TickOutcome {
            dropped: true,
            landing: clear.map(|clear| self.finish_landing(clear)),
        }
    }

    /// Move the falling piece one column
    ///
    /// While autoplay is on, only the first move of a tick is honoured.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if self.game_over || self.falling.is_none() {
            return false;
        }
        self.moves = self.moves.saturating_add(1);
        if self.moves > 1 && self.autoplay {
            log::warn!("rejected move: only one move per tick while autoplay is on");
            return false;
        }
        match self.falling.as_mut() {
            Some(piece) => piece.try_move(&self.board, direction),
            None => false,
        }
    }

    /// Rotate the falling piece a quarter turn
    ///
    /// While autoplay is on, only the first rotation of a tick is honoured.
    pub fn rotate(&mut self, direction: Direction) -> bool {
        if self.game_over || self.falling.is_none() {
            return false;
        }
        self.rotates = self.rotates.saturating_add(1);
        if self.rotates > 1 && self.autoplay {
            log::warn!("rejected rotate: only one rotation per tick while autoplay is on");
            return false;
        }
        match self.falling.as_mut() {
            Some(piece) => piece.rotate(&self.board, direction),
            None => false,
        }
    }

    pub fn reset_counts(&mut self) {
        self.moves = 0;
        self.rotates = 0;
    }

    /// Drop the falling piece until it lands, then run the landing transition
    ///
    /// Hard drops earn no per-row points.
    pub fn drop_hard(&mut self) -> Option<Landing> {
        if self.game_over {
            return None;
        }
        let piece = self.falling.as_mut()?;
        let clear = loop {
            if let Some(clear) = piece.drop(&mut self.board) {
                break clear;
            }
        };
        Some(self.finish_landing(clear))
    }

    fn finish_landing(&mut self, clear: LineClear) -> Landing {
        let landed_on_top = self.falling.map_or(false, |p| p.position().1 == 0);
        if landed_on_top {
            self.game_over = true;
            log::info!("game over with score {}", self.score);
            self.record(EngineEvent::GameOver);
            return Landing {
                score: clear.score,
                cleared_rows: clear.cleared_rows,
                game_over: true,
            };
        }

        self.score += clear.score;
        self.lines += clear.lines() as u32;
        if !clear.cleared_rows.is_empty() {
            self.record(EngineEvent::BoardChanged);
        }
        self.record(EngineEvent::ScoreChanged(self.score));
        self.start_next_block();

        Landing {
            score: clear.score,
            cleared_rows: clear.cleared_rows,
            game_over: false,
        }
    }

    fn start_next_block(&mut self) {
        if let Some(old) = self.falling.take() {
            self.record(EngineEvent::BlockUnregistered(old));
        }
        self.falling = self.next.take().map(|mut piece| {
            piece.fall();
            piece
        });
        let next = self.create_block(false);
        self.next = Some(next);
        self.record(EngineEvent::BlockRegistered(next));
        self.record(EngineEvent::BoardChanged);
        self.record(EngineEvent::ScoreChanged(self.score));
    }

    fn create_block(&mut self, falling: bool) -> Piece {
        let kind = self.rng.next_kind();
        Piece::new(kind, SPAWN_X, SPAWN_Y, falling)
    }

    /// Final score of a finished game, handed out once
    ///
    /// Returns `None` before game over and after the score was claimed.
    pub fn claim_score(&mut self) -> Option<u32> {
        if !self.game_over || self.score_claimed {
            return None;
        }
        self.score_claimed = true;
        Some(self.score)
    }

    /// Queue an event, coalescing it with what is still undelivered
    ///
    /// Only the latest score, one board refresh and one game over are kept.
    /// Unregistering a piece whose registration is still queued drops both, so
    /// the queue stays a handful of entries long even if nobody drains it.
    fn record(&mut self, event: EngineEvent) {
        if self.silent {
            return;
        }
        match event {
            EngineEvent::ScoreChanged(_) => self
                .events
                .retain(|queued| !matches!(queued, EngineEvent::ScoreChanged(_))),
            EngineEvent::BoardChanged | EngineEvent::GameOver => {
                self.events.retain(|queued| *queued != event)
            }
            EngineEvent::BlockUnregistered(_) => {
                // The piece is the oldest alive one and is already taken out
                // of its slot. Registrations queue in spawn order, so its own
                // is still queued only when every alive piece's is.
                let alive = 1 + self.falling.is_some() as usize + self.next.is_some() as usize;
                let queued = self
                    .events
                    .iter()
                    .filter(|queued| matches!(queued, EngineEvent::BlockRegistered(_)))
                    .count();
                let first = self
                    .events
                    .iter()
                    .position(|queued| matches!(queued, EngineEvent::BlockRegistered(_)));
                if let (true, Some(index)) = (queued == alive, first) {
                    self.events.remove(index);
                    return;
                }
            }
            EngineEvent::BlockRegistered(_) => {}
        }
        self.events.push(event);
    }

    /// Take the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forward recorded events to an observer
    pub fn dispatch_events(&mut self, observer: &mut impl EngineObserver) {
        let events = self.take_events();
        for event in &events {
            deliver(event, &self.board, observer);
        }
    }
}

impl Default for Engine<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSequence;

    fn engine_with(kind: PieceKind) -> Engine<FixedSequence> {
        Engine::new(FixedSequence::repeat(kind))
    }

    #[test]
    fn test_new_engine_spawns_two_pieces() {
        let engine = Engine::new(FixedSequence::new([PieceKind::J, PieceKind::S]));

        // The next piece is drawn first.
        assert_eq!(engine.next().unwrap().kind(), PieceKind::J);
        assert_eq!(engine.falling().unwrap().kind(), PieceKind::S);
        assert!(engine.falling().unwrap().is_falling());
        assert!(!engine.next().unwrap().is_falling());
        assert_eq!(engine.falling().unwrap().position(), (SPAWN_X, SPAWN_Y));
        assert_eq!(engine.score(), 0);
        assert!(!engine.autoplay());
    }

    #[test]
    fn test_real_time_gating() {
        let mut engine = engine_with(PieceKind::T);

        let out = engine.update(MOVE_INTERVAL_MS as u64);
        assert!(!out.dropped, "drop requires strictly more than the interval");
        assert_eq!(engine.falling().unwrap().position().1, 0);

        let out = engine.update(MOVE_INTERVAL_MS as u64 + 1);
        assert!(out.dropped);
        assert_eq!(engine.falling().unwrap().position().1, 1);
        assert_eq!(engine.score(), 1);

        // Timer was reset by the drop.
        assert!(!engine.update(MOVE_INTERVAL_MS as u64 + 2).dropped);
    }

    #[test]
    fn test_autoplay_shortens_interval() {
        let mut engine = engine_with(PieceKind::T);
        engine.enable_autoplay(true);
        assert_eq!(
            engine.mode(),
            TickMode::RealTime {
                interval_ms: AUTOPLAY_MOVE_INTERVAL_MS
            }
        );
        assert!(engine.update(AUTOPLAY_MOVE_INTERVAL_MS as u64 + 1).dropped);
    }

    #[test]
    fn test_every_step_ignores_clock() {
        let mut engine = Engine::with_mode(FixedSequence::repeat(PieceKind::O), TickMode::EveryStep);
        assert!(engine.update(0).dropped);
        assert!(engine.update(0).dropped);
        assert_eq!(engine.falling().unwrap().position().1, 2);
    }

    #[test]
    fn test_second_move_in_tick_rejected_under_autoplay() {
        let mut engine = engine_with(PieceKind::T);
        engine.enable_autoplay(true);

        assert!(engine.try_move(Direction::Left));
        let x = engine.falling().unwrap().position().0;
        assert!(!engine.try_move(Direction::Left));
        assert_eq!(engine.falling().unwrap().position().0, x);

        assert!(engine.rotate(Direction::Right));
        let angle = engine.falling().unwrap().angle();
        assert!(!engine.rotate(Direction::Right));
        assert_eq!(engine.falling().unwrap().angle(), angle);

        engine.reset_counts();
        assert!(engine.try_move(Direction::Left));
    }

    #[test]
    fn test_manual_play_allows_repeated_moves() {
        let mut engine = engine_with(PieceKind::T);
        assert!(engine.try_move(Direction::Left));
        assert!(engine.try_move(Direction::Left));
        assert!(engine.try_move(Direction::Left));
        assert_eq!(engine.falling().unwrap().position().0, 0);
    }

    #[test]
    fn test_hard_drop_promotes_next_piece() {
        let mut engine = Engine::new(FixedSequence::new([
            PieceKind::L,
            PieceKind::O,
            PieceKind::Z,
        ]));
        assert_eq!(engine.falling().unwrap().kind(), PieceKind::O);

        let landing = engine.drop_hard().unwrap();
        assert!(!landing.game_over);
        assert_eq!(landing.score, 0);
        assert_eq!(engine.score(), 0, "hard drops earn no per-row points");
        assert_eq!(engine.falling().unwrap().kind(), PieceKind::L);
        assert!(engine.falling().unwrap().is_falling());
        assert_eq!(engine.next().unwrap().kind(), PieceKind::Z);
        assert_eq!(engine.board().filled_count(), 4);
    }

    #[test]
    fn test_landing_on_row_zero_is_game_over() {
        let mut engine = engine_with(PieceKind::O);
        let mut board = Board::new();
        // Block directly under the O's cells at rows 1-2.
        board.set(4, 3, Some(PieceKind::I));
        engine.load_board(board);

        let landing = engine.drop_hard().unwrap();
        assert!(landing.game_over);
        assert!(engine.is_game_over());
        assert!(!engine.update(u64::MAX).dropped);
        assert!(!engine.try_move(Direction::Left));
        assert!(engine.drop_hard().is_none());
        assert!(engine.take_events().contains(&EngineEvent::GameOver));
    }

    #[test]
    fn test_claim_score_is_one_shot() {
        let mut engine = engine_with(PieceKind::O);
        assert_eq!(engine.claim_score(), None);

        let mut board = Board::new();
        board.set(4, 3, Some(PieceKind::I));
        engine.load_board(board);
        engine.update(MOVE_INTERVAL_MS as u64 + 1);
        engine.drop_hard();

        assert_eq!(engine.claim_score(), Some(1));
        assert_eq!(engine.claim_score(), None);

        engine.restart();
        assert_eq!(engine.claim_score(), None);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_restart_resets_state_and_events() {
        let mut engine = engine_with(PieceKind::I);
        engine.enable_autoplay(true);
        engine.drop_hard();
        let _ = engine.take_events();

        engine.restart();
        assert!(!engine.autoplay());
        assert_eq!(engine.board().filled_count(), 0);
        assert_eq!(engine.lines(), 0);

        let events = engine.take_events();
        let unregistered = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::BlockUnregistered(_)))
            .count();
        let registered = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::BlockRegistered(_)))
            .count();
        assert_eq!((unregistered, registered), (2, 2));
    }

    #[test]
    fn test_undrained_queue_stays_bounded() {
        let mut engine = Engine::with_mode(SimpleRng::new(1), TickMode::RealTime { interval_ms: 500 });
        let mut longest = 0;
        for now in 0..100_000 {
            engine.update(now);
            if engine.is_game_over() {
                engine.restart();
            }
            longest = longest.max(engine.events.len());
        }
        assert!(longest <= 8, "queue grew to {} events", longest);
    }

    #[test]
    fn test_undrained_hard_drops_stay_bounded() {
        let mut engine = Engine::new(SimpleRng::new(7));
        for _ in 0..2_000 {
            if engine.drop_hard().is_none() {
                engine.restart();
            }
        }
        assert!(engine.events.len() <= 8, "{:?}", engine.events);
    }

    #[test]
    fn test_coalesced_events_keep_latest_state() {
        let mut engine = Engine::new(FixedSequence::new([
            PieceKind::O,
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::O,
            PieceKind::L,
        ]));
        // Falling I and next O are delivered.
        let _ = engine.take_events();
        engine.drop_hard();
        engine.drop_hard();
        engine.drop_hard();
        for now in 1..5 {
            engine.update(now * (MOVE_INTERVAL_MS as u64 + 1));
        }

        let events = engine.take_events();
        let scores: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::ScoreChanged(score) => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(scores, vec![engine.score()]);
        assert_eq!(events.iter().filter(|e| **e == EngineEvent::BoardChanged).count(), 1);

        // I and the first O were delivered, then landed. The second O landed
        // before anyone saw it.
        let unregistered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::BlockUnregistered(p) => Some(p.kind()),
                _ => None,
            })
            .collect();
        let registered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::BlockRegistered(p) => Some(p.kind()),
                _ => None,
            })
            .collect();
        assert_eq!(unregistered, vec![PieceKind::I, PieceKind::O]);
        assert_eq!(registered, vec![PieceKind::T, PieceKind::O]);
        assert_eq!(engine.falling().unwrap().kind(), PieceKind::T);
        assert_eq!(engine.next().unwrap().kind(), PieceKind::O);
    }

    #[test]
    fn test_no_falling_piece_is_noop() {
        let mut engine = engine_with(PieceKind::T);
        engine.falling = None;
        assert_eq!(engine.update(u64::MAX), TickOutcome::default());
        assert!(!engine.try_move(Direction::Right));
        assert!(!engine.rotate(Direction::Right));
        assert!(engine.drop_hard().is_none());
    }
}
