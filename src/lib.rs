//! Eight Ball - a billiards table simulation with an American eight-ball referee
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, ball motion, cushions, shot loop)
//! - `rules`: Eight-ball turn state machine
//! - `game`: Match flow tying the table to the rules
//! - `settings`: Player and table configuration

pub mod error;
pub mod game;
pub mod rules;
pub mod settings;
pub mod sim;

pub use error::PoolError;
pub use game::{Match, MatchPhase, ShotSummary};
pub use rules::{BallType, EightBallRules, Shooter, TurnResult};
pub use settings::{Breaker, CueColor, GameMode, Settings};

/// Table configuration constants
pub mod consts {
    /// Ball diameter shared by every ball on the table
    pub const BALL_SIZE: f64 = 30.0;
    pub const BALL_RADIUS: f64 = BALL_SIZE / 2.0;

    /// Felt friction: fraction of each speed component lost per tick
    pub const FRICTION: f64 = 0.007;
    /// Resting threshold factor (a ball stops below `friction * REST_FACTOR`)
    pub const REST_FACTOR: f64 = 10.0;

    /// Step used by the push-apart primitives
    pub const SEPARATION_STEP: f64 = 0.001;

    /// Playing surface (including the rails)
    pub const TABLE_WIDTH: f64 = 800.0;
    pub const TABLE_HEIGHT: f64 = 440.0;

    /// Presentation cadence of one tick, in milliseconds
    pub const TICK_MILLIS: u64 = 10;

    /// Number of balls, cue ball included
    pub const BALL_COUNT: usize = 16;
    pub const CUE_BALL: u8 = 0;
    pub const EIGHT_BALL: u8 = 8;

    /// Cue stick pull-back limits
    pub const CUE_REST_DISTANCE: u32 = 30;
    pub const CUE_MAX_DISTANCE: u32 = 180;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
