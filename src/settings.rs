//! Game settings
//!
//! Loaded from a JSON file, `settings.json` in the working directory unless
//! the demo is given another path; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FRICTION, TICK_MILLIS};
use crate::error::PoolError;

/// Which rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Two shooters, American eight-ball rules
    #[default]
    EightBall,
    /// One shooter, no rules
    Practice,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::EightBall => "Eight-Ball",
            GameMode::Practice => "Practice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "eight-ball" | "eightball" | "8-ball" | "8ball" => Some(GameMode::EightBall),
            "practice" => Some(GameMode::Practice),
            _ => None,
        }
    }
}

/// Cue stick colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CueColor {
    Yellow,
    Blue,
    Red,
    Purple,
    Orange,
    Green,
    #[default]
    Brown,
}

impl CueColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            CueColor::Yellow => "Yellow",
            CueColor::Blue => "Blue",
            CueColor::Red => "Red",
            CueColor::Purple => "Purple",
            CueColor::Orange => "Orange",
            CueColor::Green => "Green",
            CueColor::Brown => "Brown",
        }
    }
}

/// Who takes the break shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Breaker {
    #[default]
    PlayerOne,
    PlayerTwo,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,

    // === Shooters ===
    pub player_one: String,
    pub player_two: String,
    pub cue_one: CueColor,
    pub cue_two: CueColor,
    pub breaker: Breaker,

    // === Table ===
    /// Felt friction, applied to every ball every tick
    pub friction: f64,
    /// Real-time delay between ticks when animating (does not affect physics)
    pub tick_millis: u64,

    // === Demo ===
    /// Seed for the self-play driver
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::EightBall,

            player_one: "Player 1".to_string(),
            player_two: "Player 2".to_string(),
            cue_one: CueColor::Red,
            cue_two: CueColor::Blue,
            breaker: Breaker::PlayerOne,

            friction: FRICTION,
            tick_millis: TICK_MILLIS,

            seed: 8,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| PoolError::invalid_argument(format!("malformed settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, PoolError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PoolError::invalid_argument(format!("cannot encode settings: {e}")))
    }

    /// Load settings from a file, falling back to defaults when the file is
    /// missing or unusable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if !self.friction.is_finite() || self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(PoolError::invalid_argument(format!(
                "friction must lie in (0, 1), got {}",
                self.friction
            )));
        }
        if self.player_one.trim().is_empty() || self.player_two.trim().is_empty() {
            return Err(PoolError::invalid_argument("player names must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.friction, 0.007);
        assert_eq!(settings.tick_millis, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "mode": "Practice", "player_one": "anna" }"#).unwrap();
        assert_eq!(settings.mode, GameMode::Practice);
        assert_eq!(settings.player_one, "anna");
        assert_eq!(settings.player_two, "Player 2");
        assert_eq!(settings.breaker, Breaker::PlayerOne);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.cue_two = CueColor::Orange;
        settings.breaker = Breaker::PlayerTwo;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(PoolError::InvalidArgument(_))
        ));
        assert!(Settings::from_json(r#"{ "friction": 2.0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "player_two": "  " }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/eight-ball/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_mode_names_parse() {
        assert_eq!(GameMode::from_str("8-Ball"), Some(GameMode::EightBall));
        assert_eq!(GameMode::from_str("practice"), Some(GameMode::Practice));
        assert_eq!(GameMode::from_str("snooker"), None);
        for mode in [GameMode::EightBall, GameMode::Practice] {
            assert_eq!(GameMode::from_str(mode.as_str()), Some(mode));
        }
    }
}
