//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by ball number)
//! - No rendering, rule or platform dependencies

pub mod ball;
pub mod collision;
pub mod cue;
pub mod geometry;
pub mod layout;
pub mod state;
pub mod tick;
pub mod wall;

pub use ball::{BallStatus, PoolBall, Sphere};
pub use collision::{collide_balls, pick_cushion, resolve_cushions};
pub use cue::Cue;
pub use geometry::{AxisSystem, Point, Polar, from_polar};
pub use layout::{CUE_SPOT, Pocket, cushions, rack_positions};
pub use state::{PocketEvent, Table, TablePhase};
pub use tick::{ShotReport, TableEvents, launch, strike, tick};
pub use wall::Wall;
