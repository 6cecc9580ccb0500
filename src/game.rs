//! Frame loop driver
//!
//! `Game` owns the live session, the configuration it was started from, the
//! high-score store and the input queued between frames. Hosts call
//! `frame(dt, renderer)` once per display refresh.

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::highscore::HighScoreStore;
use crate::renderer::{Frame, GameOverSummary, Renderer};
use crate::sim::{Arena, GameEvent, GamePhase, GameState, PowerupKind, TickInput, tick};

/// A playable game: session lifecycle plus persistence
pub struct Game<S: HighScoreStore> {
    config: GameConfig,
    arena: Arena,
    store: S,
    session: GameState,
    input: TickInput,
    seed: u64,
    generation: u32,
}

impl<S: HighScoreStore> Game<S> {
    /// Validate `config` and build an idle game
    pub fn new(config: GameConfig, arena: Arena, store: S, seed: u64) -> Result<Self, ConfigError> {
        let tuning = config.resolve()?;
        let mut session = GameState::new(tuning, arena, seed, 0);
        session.high_score = store.high_score();

        Ok(Self {
            config,
            arena,
            store,
            session,
            input: TickInput::default(),
            seed,
            generation: 0,
        })
    }

    /// Start a fresh session; ignored while one is running
    pub fn start(&mut self) -> Result<(), ConfigError> {
        if self.session.is_running() {
            return Ok(());
        }

        let tuning = self.config.resolve()?;
        self.generation = self.generation.wrapping_add(1);
        let seed = self.seed.wrapping_add(self.generation as u64);

        let mut session = GameState::new(tuning, self.arena, seed, self.generation);
        session.high_score = self.store.high_score();
        session.phase = GamePhase::Running;
        self.session = session;
        self.input = TickInput::default();

        log::info!(
            "Session {} started ({} difficulty, seed {})",
            self.generation,
            self.session.tuning.difficulty,
            seed
        );
        Ok(())
    }

    /// Abandon the current session and return to idle; the high score stays
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let tuning = self.session.tuning.clone();
        let mut session = GameState::new(tuning, self.arena, self.seed, self.generation);
        session.high_score = self.store.high_score();
        self.session = session;
        self.input = TickInput::default();
        log::info!("Session reset");
    }

    /// Queue the latest pointer position (arena coordinates)
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.input.pointer = Some(pos);
    }

    /// Queue a fire press; ignored unless running
    pub fn fire(&mut self) {
        if self.session.is_running() {
            self.input.fire += 1;
        }
    }

    /// End a timed powerup from a host-scheduled callback
    pub fn expire_powerup(&mut self, kind: PowerupKind, generation: u32) -> bool {
        self.session.expire_powerup(kind, generation)
    }

    /// Advance one tick (when running) and render the result
    ///
    /// Returns the events the tick produced.
    pub fn frame(&mut self, dt: f32, renderer: &mut impl Renderer) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.session.is_running() {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.session, &input, dt);
            events = self.session.take_events();

            if let Some(score) = events.iter().find_map(|e| match e {
                GameEvent::GameOver { score } => Some(*score),
                _ => None,
            }) {
                let new_record = self.store.record(score);
                let high_score = self.store.high_score();
                self.session.high_score = high_score;
                renderer.game_over(&GameOverSummary {
                    score,
                    high_score,
                    new_record,
                });
            }
        }

        renderer.render(&Frame::new(&self.session));
        events
    }

    /// Resize the arena; takes effect at the next start or reset
    pub fn resize(&mut self, arena: Arena) {
        self.arena = arena;
    }

    /// Swap the configuration; takes effect at the next start
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameState {
        &self.session
    }

    /// Direct access for hosts that script scenarios (tutorials, tests)
    pub fn session_mut(&mut self) -> &mut GameState {
        &mut self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u64 {
        self.store.high_score()
    }

    /// Generation of the live session, for scheduling expiry callbacks
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }
}
