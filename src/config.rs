//! Game configuration
//!
//! Difficulty tiers, entity sizing, colours and powerup types. Loaded from JSON
//! (or taken from `Default`) and validated into an immutable [`Tuning`] when a
//! session starts, so a bad config fails there instead of producing NaN speeds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse_hex_color;
use crate::sim::PowerupKind;

/// Difficulty used when a config does not name one
pub const DEFAULT_DIFFICULTY: &str = "medium";

/// Configuration problems detected at load or session start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    #[error("`{field}` must be finite and non-negative, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("`{field}` must be a probability in [0, 1], got {value}")]
    InvalidChance { field: &'static str, value: f64 },
    #[error("`enemy_sizes` must not be empty")]
    NoEnemySizes,
    #[error("enemy sizes must be positive")]
    ZeroEnemySize,
    #[error("`powerup_types` must not be empty")]
    NoPowerupTypes,
    #[error("colour `{name}` is not #rrggbb: {value:?}")]
    InvalidColor { name: &'static str, value: String },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-tier base values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    /// Base enemy speed, px/tick
    pub speed: f32,
    /// Base spawn rate, percent chance per tick
    pub spawn_rate: f32,
}

/// Colours as `#rrggbb` strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub player: String,
    pub enemy: String,
    pub projectile: String,
    pub powerup: String,
    pub level_up: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            player: "#5865F2".to_string(),
            enemy: "#ed4245".to_string(),
            projectile: "#faa81a".to_string(),
            powerup: "#3ba55c".to_string(),
            level_up: "#ffd700".to_string(),
        }
    }
}

/// Resolved colours (`0xRRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Colors {
    pub player: u32,
    pub enemy: u32,
    pub projectile: u32,
    pub powerup: u32,
    pub level_up: u32,
}

/// Game configuration as supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Difficulty tiers by name
    pub difficulty: BTreeMap<String, DifficultyTuning>,
    /// Tier used for new sessions
    pub default_difficulty: String,
    pub colors: Palette,
    /// Player radius, px
    pub player_size: f32,
    /// Enemy size tiers (radius, px)
    pub enemy_sizes: Vec<u32>,
    /// Powerup kinds that may spawn
    pub powerup_types: Vec<PowerupKind>,
    /// Lives at session start
    pub lives: u32,
    /// Chance per tick of a powerup appearing at a random point
    pub powerup_spawn_chance: f64,
    /// Chance of a powerup dropping where an enemy dies
    pub powerup_drop_chance: f64,
    /// Spawn rate never drops below this (percent per tick)
    pub min_spawn_rate: f32,
    /// Max player movement per tick; `None` snaps to the pointer
    pub player_follow_speed: Option<f32>,
    /// Oldest particles are dropped beyond this count
    pub max_particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut difficulty = BTreeMap::new();
        difficulty.insert(
            "easy".to_string(),
            DifficultyTuning {
                speed: 3.0,
                spawn_rate: 60.0,
            },
        );
        difficulty.insert(
            "medium".to_string(),
            DifficultyTuning {
                speed: 5.0,
                spawn_rate: 40.0,
            },
        );
        difficulty.insert(
            "hard".to_string(),
            DifficultyTuning {
                speed: 7.0,
                spawn_rate: 20.0,
            },
        );

        Self {
            difficulty,
            default_difficulty: DEFAULT_DIFFICULTY.to_string(),
            colors: Palette::default(),
            player_size: 30.0,
            enemy_sizes: vec![20, 30, 40],
            powerup_types: PowerupKind::ALL.to_vec(),
            lives: 3,
            powerup_spawn_chance: 0.002,
            powerup_drop_chance: 0.1,
            min_spawn_rate: 5.0,
            player_follow_speed: None,
            max_particles: 2000,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Same config with another default difficulty
    pub fn with_difficulty(mut self, name: &str) -> Self {
        self.default_difficulty = name.to_string();
        self
    }

    /// Validate and resolve into session tuning
    pub fn resolve(&self) -> Result<Tuning, ConfigError> {
        let tier = self
            .difficulty
            .get(&self.default_difficulty)
            .ok_or_else(|| ConfigError::UnknownDifficulty(self.default_difficulty.clone()))?;

        check_value("difficulty.speed", tier.speed)?;
        check_value("difficulty.spawn_rate", tier.spawn_rate)?;
        check_value("min_spawn_rate", self.min_spawn_rate)?;
        check_value("player_size", self.player_size)?;
        if let Some(speed) = self.player_follow_speed {
            check_value("player_follow_speed", speed)?;
        }
        check_chance("powerup_spawn_chance", self.powerup_spawn_chance)?;
        check_chance("powerup_drop_chance", self.powerup_drop_chance)?;

        if self.enemy_sizes.is_empty() {
            return Err(ConfigError::NoEnemySizes);
        }
        if self.enemy_sizes.contains(&0) {
            return Err(ConfigError::ZeroEnemySize);
        }
        if self.powerup_types.is_empty() {
            return Err(ConfigError::NoPowerupTypes);
        }

        let colors = Colors {
            player: color("player", &self.colors.player)?,
            enemy: color("enemy", &self.colors.enemy)?,
            projectile: color("projectile", &self.colors.projectile)?,
            powerup: color("powerup", &self.colors.powerup)?,
            level_up: color("level_up", &self.colors.level_up)?,
        };

        Ok(Tuning {
            difficulty: self.default_difficulty.clone(),
            base_speed: tier.speed,
            base_spawn_rate: tier.spawn_rate,
            min_spawn_rate: self.min_spawn_rate,
            player_radius: self.player_size,
            enemy_sizes: self.enemy_sizes.clone(),
            powerup_kinds: self.powerup_types.clone(),
            lives: self.lives,
            powerup_spawn_chance: self.powerup_spawn_chance,
            powerup_drop_chance: self.powerup_drop_chance,
            player_follow_speed: self.player_follow_speed,
            max_particles: self.max_particles,
            colors,
        })
    }
}

fn check_value(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value: value as f64,
        })
    }
}

fn check_chance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidChance { field, value })
    }
}

fn color(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
        name,
        value: value.to_string(),
    })
}

/// Validated, immutable tuning captured by a session at start
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub difficulty: String,
    pub base_speed: f32,
    pub base_spawn_rate: f32,
    pub min_spawn_rate: f32,
    pub player_radius: f32,
    pub enemy_sizes: Vec<u32>,
    pub powerup_kinds: Vec<PowerupKind>,
    pub lives: u32,
    pub powerup_spawn_chance: f64,
    pub powerup_drop_chance: f64,
    pub player_follow_speed: Option<f32>,
    pub max_particles: usize,
    pub colors: Colors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves() {
        let tuning = GameConfig::default().resolve().unwrap();
        assert_eq!(tuning.difficulty, "medium");
        assert_eq!(tuning.base_speed, 5.0);
        assert_eq!(tuning.base_spawn_rate, 40.0);
        assert_eq!(tuning.enemy_sizes, vec![20, 30, 40]);
        assert_eq!(tuning.lives, 3);
        assert_eq!(tuning.colors.player, 0x5865f2);
    }

    #[test]
    fn test_unknown_difficulty_fails_fast() {
        let err = GameConfig::default()
            .with_difficulty("nightmare")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDifficulty(ref d) if d == "nightmare"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "default_difficulty": "hard", "lives": 5 }"#).unwrap();
        let tuning = config.resolve().unwrap();
        assert_eq!(tuning.base_speed, 7.0);
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.player_radius, 30.0);
    }

    #[test]
    fn test_unknown_powerup_type_is_parse_error() {
        let err = GameConfig::from_json(r#"{ "powerup_types": ["shield", "laser"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_powerup_types_from_json() {
        let config = GameConfig::from_json(r#"{ "powerup_types": ["multishot"] }"#).unwrap();
        assert_eq!(config.powerup_types, vec![PowerupKind::Multishot]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = GameConfig::default();
        config
            .difficulty
            .get_mut("medium")
            .unwrap()
            .speed = f32::NAN;
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidValue { field: "difficulty.speed", .. })
        ));

        let mut config = GameConfig::default();
        config.min_spawn_rate = -1.0;
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidValue { field: "min_spawn_rate", .. })
        ));

        let mut config = GameConfig::default();
        config.powerup_drop_chance = 1.5;
        assert!(matches!(config.resolve(), Err(ConfigError::InvalidChance { .. })));
    }

    #[test]
    fn test_empty_lists_rejected() {
        let mut config = GameConfig::default();
        config.enemy_sizes.clear();
        assert!(matches!(config.resolve(), Err(ConfigError::NoEnemySizes)));

        let mut config = GameConfig::default();
        config.enemy_sizes = vec![20, 0];
        assert!(matches!(config.resolve(), Err(ConfigError::ZeroEnemySize)));

        let mut config = GameConfig::default();
        config.powerup_types.clear();
        assert!(matches!(config.resolve(), Err(ConfigError::NoPowerupTypes)));
    }

    #[test]
    fn test_bad_color_rejected() {
        let mut config = GameConfig::default();
        config.colors.enemy = "red".to_string();
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { name: "enemy", .. }));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::from_path("/nonexistent/arena_shooter.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
