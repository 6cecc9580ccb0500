//! Arena Shooter entry point
//!
//! The browser build is driven from JS through `platform::web::WebGame`.
//! Natively this runs a headless autopilot session and keeps the best score
//! in a JSON file next to the working directory.
//!
//! Usage: `arena-shooter [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    env_logger::init();

    match native::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm_init` in the library
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use arena_shooter::highscore::JsonFileStore;
    use arena_shooter::platform::Autopilot;
    use arena_shooter::renderer::DrawList;
    use arena_shooter::sim::{Arena, GameEvent};
    use arena_shooter::{ConfigError, Game, GameConfig};

    const HIGH_SCORE_FILE: &str = "arena_shooter_highscore.json";
    /// Ten minutes at 60 Hz
    const MAX_TICKS: u64 = 60 * 60 * 10;
    const DT: f32 = 1.0 / 60.0;

    pub fn run() -> Result<(), ConfigError> {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            });
        let config = match args.next() {
            Some(path) => {
                log::info!("Loading config from {}", path);
                GameConfig::from_path(&path)?
            }
            None => GameConfig::default(),
        };

        log::info!("Arena Shooter (native) starting with seed {}", seed);

        let store = JsonFileStore::open(HIGH_SCORE_FILE);
        let mut game = Game::new(config, Arena::default(), store, seed)?;
        let mut draw = DrawList::new();
        let pilot = Autopilot::default();

        game.start()?;
        let mut kills = 0u32;
        while game.is_running() && game.session().time_ticks < MAX_TICKS {
            let input = pilot.steer(game.session());
            if let Some(pos) = input.pointer {
                game.pointer_moved(pos);
            }
            for _ in 0..input.fire {
                game.fire();
            }

            for event in game.frame(DT, &mut draw) {
                match event {
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    GameEvent::PlayerHit { lives } => log::info!("Hit! {} lives left", lives),
                    GameEvent::PowerupCollected(kind) => log::info!("Picked up {}", kind.label()),
                    _ => {}
                }
            }
        }

        let session = game.session();
        log::info!(
            "Finished after {} ticks: score {}, level {}, {} kills, best {}",
            session.time_ticks,
            session.score,
            session.level,
            kills,
            game.high_score()
        );
        log::debug!(
            "Last frame: {} vertices, {} labels",
            draw.vertices.len(),
            draw.labels.len()
        );
        Ok(())
    }
}
