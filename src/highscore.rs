//! Best-score persistence
//!
//! The game keeps a single number across sessions. Stores decide where it
//! lives: memory (tests, embedding), a JSON file (native), or LocalStorage
//! (browser). The simulation never parses or serializes it itself.

/// Read/write access to the persisted best score
pub trait HighScoreStore {
    fn high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64);

    /// Persist `score` only if it beats the stored best
    fn record(&mut self, score: u64) -> bool {
        if score > self.high_score() {
            self.set_high_score(score);
            true
        } else {
            false
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    writes: u32,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best, writes: 0 }
    }

    /// Number of `set_high_score` calls so far
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u64 {
        self.best
    }

    fn set_high_score(&mut self, score: u64) {
        self.best = score;
        self.writes += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};

    use super::HighScoreStore;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Record {
        high_score: u64,
    }

    /// Best score kept in a small JSON file
    #[derive(Debug)]
    pub struct JsonFileStore {
        path: PathBuf,
        best: u64,
    }

    impl JsonFileStore {
        /// Open the store, starting from zero if the file is missing or unreadable
        pub fn open(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            let best = match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<Record>(&json) {
                    Ok(record) => {
                        log::info!("Loaded high score {} from {}", record.high_score, path.display());
                        record.high_score
                    }
                    Err(e) => {
                        log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                        0
                    }
                },
                Err(_) => {
                    log::info!("No high score at {}, starting fresh", path.display());
                    0
                }
            };
            Self { path, best }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl HighScoreStore for JsonFileStore {
        fn high_score(&self) -> u64 {
            self.best
        }

        fn set_high_score(&mut self, score: u64) {
            self.best = score;
            let record = Record { high_score: score };
            let written = serde_json::to_string(&record)
                .map_err(|e| e.to_string())
                .and_then(|json| fs::write(&self.path, json).map_err(|e| e.to_string()));
            match written {
                Ok(()) => log::info!("High score {} saved", score),
                Err(e) => log::warn!("Failed to save high score to {}: {}", self.path.display(), e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::HighScoreStore;

    /// Best score in the browser's LocalStorage, as a plain integer string
    #[derive(Debug, Default)]
    pub struct LocalStorageStore {
        best: u64,
    }

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "highScore";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }

        /// Load the stored best (zero when absent or unreadable)
        pub fn load() -> Self {
            let best = Self::storage()
                .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
                .and_then(|raw| serde_json::from_str::<u64>(raw.trim()).ok());

            match best {
                Some(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                None => {
                    log::info!("No high score found, starting fresh");
                    Self::default()
                }
            }
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn high_score(&self) -> u64 {
            self.best
        }

        fn set_high_score(&mut self, score: u64) {
            self.best = score;
            match Self::storage() {
                Some(storage) => {
                    if storage
                        .set_item(Self::STORAGE_KEY, &score.to_string())
                        .is_err()
                    {
                        log::warn!("LocalStorage rejected high score {}", score);
                    }
                }
                None => log::warn!("LocalStorage unavailable, high score not saved"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_on_improvement() {
        let mut store = MemoryStore::new(100);
        assert!(!store.record(50));
        assert!(!store.record(100));
        assert_eq!(store.writes(), 0);

        assert!(store.record(101));
        assert_eq!(store.high_score(), 101);
        assert_eq!(store.writes(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "arena_shooter_highscore_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.high_score(), 0);
        store.set_high_score(1234);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.high_score(), 1234);
        assert_eq!(reopened.path(), path.as_path());

        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!(
            "arena_shooter_corrupt_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(JsonFileStore::open(&path).high_score(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
