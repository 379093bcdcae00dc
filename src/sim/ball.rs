//! Rigid-body motion for the balls
//!
//! A `Sphere` is pure motion state. `PoolBall` adds the identity and table
//! status the shot loop needs.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{AxisSystem, Point, Polar, from_polar};
use crate::consts::*;
use crate::error::PoolError;

/// Position and velocity of a ball. Velocity is in the y-up frame; the
/// location is in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub location: Point,
    pub speed: DVec2,
}

impl Sphere {
    /// A sphere at rest at `location`
    pub fn new(location: Point) -> Self {
        Self {
            location,
            speed: DVec2::ZERO,
        }
    }

    #[inline]
    pub fn has_speed(&self) -> bool {
        self.speed.length() > 0.0
    }

    pub fn stop(&mut self) {
        self.speed = DVec2::ZERO;
    }

    /// Set the velocity from its polar form
    pub fn set_polar_speed(&mut self, magnitude: f64, angle: f64) {
        self.speed = from_polar(magnitude, angle);
    }

    /// Advance one tick under `friction`
    pub fn advance(&mut self, friction: f64) {
        if !self.has_speed() {
            return;
        }
        if self.speed.length() < friction * REST_FACTOR {
            self.stop();
            return;
        }
        self.location.x += self.speed.x;
        self.location.y -= self.speed.y;
        self.speed -= self.speed * friction;
    }

    #[inline]
    pub fn distance_from(&self, other: &Sphere) -> f64 {
        self.location.distance(other.location)
    }

    /// Strict overlap test
    #[inline]
    pub fn is_touching(&self, other: &Sphere) -> bool {
        self.distance_from(other) < BALL_SIZE
    }

    /// Equal-mass elastic collision: exchange the velocity components along
    /// the line of centres, then separate the two spheres to one diameter.
    pub fn collide_with(&mut self, other: &mut Sphere) -> Result<(), PoolError> {
        let alpha = std::f64::consts::FRAC_PI_2 - self.location.angular_coord_from(other.location)?;

        self.speed.turn(alpha);
        other.speed.turn(alpha);

        std::mem::swap(&mut self.speed.y, &mut other.speed.y);

        self.speed.turn(-alpha);
        other.speed.turn(-alpha);

        let middle = (self.location + other.location) / 2.0;
        self.location.set_distance_from(middle, BALL_RADIUS);
        other.location.set_distance_from(middle, BALL_RADIUS);
        Ok(())
    }

    /// Specular reflection about a line at `wall_angle`
    pub fn reflect(&mut self, wall_angle: f64) {
        let incident = self.speed.angular_coord();
        self.speed.set_angle(2.0 * wall_angle - incident);
    }
}

/// Where a ball currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallStatus {
    OnTable,
    /// Dropped into the pocket with the given id
    Pocketed { pocket: usize },
}

/// A numbered ball (0 is the cue ball)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolBall {
    pub number: u8,
    pub body: Sphere,
    pub status: BallStatus,
}

impl PoolBall {
    pub fn new(number: u8, location: Point) -> Self {
        Self {
            number,
            body: Sphere::new(location),
            status: BallStatus::OnTable,
        }
    }

    #[inline]
    pub fn is_cue_ball(&self) -> bool {
        self.number == CUE_BALL
    }

    #[inline]
    pub fn is_pocketed(&self) -> bool {
        matches!(self.status, BallStatus::Pocketed { .. })
    }

    #[inline]
    pub fn location(&self) -> Point {
        self.body.location
    }

    #[inline]
    pub fn speed(&self) -> DVec2 {
        self.body.speed
    }

    /// Move the ball by hand (rack, cue-ball placement); it comes to rest
    pub fn set_location(&mut self, location: Point) {
        self.body.location = location;
        self.body.stop();
    }
}
