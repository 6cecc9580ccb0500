//! Browser host
//!
//! JS owns the canvas and the animation frame loop; it forwards pointer and
//! click events, calls `frame(dt)` every refresh, and uploads `vertices()`
//! plus `labels_json()` to whatever 2D/GL context it draws with.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::highscore::LocalStorageStore;
use crate::renderer::{DrawList, Frame};
use crate::sim::Arena;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the first logger
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
    draw: DrawList,
}

#[wasm_bindgen]
impl WebGame {
    /// Create an idle game for a `width` x `height` canvas
    ///
    /// `config_json` overrides the default configuration; invalid config is
    /// reported as a thrown string.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: Option<String>) -> Result<WebGame, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(js_error)?,
            None => GameConfig::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let arena = Arena::new(width, height);
        let game = Game::new(config, arena, LocalStorageStore::load(), seed).map_err(js_error)?;

        log::info!("Arena shooter ready ({}x{}, seed {})", width, height, seed);

        let mut web = Self {
            game,
            draw: DrawList::new(),
        };
        web.game.frame(0.0, &mut web.draw);
        Ok(web)
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.game.start().map_err(js_error)
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.game.frame(0.0, &mut self.draw);
    }

    /// Takes effect at the next start or reset
    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(Arena::new(width, height));
    }

    /// Pointer position in canvas coordinates
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.game.pointer_moved(Vec2::new(x, y));
    }

    pub fn fire(&mut self) {
        self.game.fire();
    }

    /// Tick and tessellate; `dt` in seconds. Returns whether the session is
    /// still running.
    pub fn frame(&mut self, dt: f32) -> bool {
        for event in self.game.frame(dt, &mut self.draw) {
            log::debug!("{:?}", event);
        }
        self.game.is_running()
    }

    /// Triangle list as `[x, y, r, g, b, a, ...]`
    pub fn vertices(&self) -> Vec<f32> {
        self.draw.vertex_floats().to_vec()
    }

    pub fn labels_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.draw.labels).map_err(js_error)
    }

    /// Raw snapshot for hosts that draw the entities themselves
    pub fn frame_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Frame::new(self.game.session())).map_err(js_error)
    }

    pub fn score(&self) -> f64 {
        self.game.session().score as f64
    }

    pub fn level(&self) -> u32 {
        self.game.session().level
    }

    pub fn lives(&self) -> u32 {
        self.game.session().lives
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    pub fn generation(&self) -> u32 {
        self.game.generation()
    }
}
