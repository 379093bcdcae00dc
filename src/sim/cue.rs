//! Cue stick
//!
//! The cue is pulled back from the cue ball one unit at a time while the
//! shot is charged; how far it was drawn decides the strike power.

use serde::{Deserialize, Serialize};

use crate::consts::{CUE_MAX_DISTANCE, CUE_REST_DISTANCE};
use crate::error::PoolError;
use crate::normalize_angle;
use crate::settings::CueColor;

/// Cue stick state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Distance between the cue tip and the centre of the cue ball
    distance_from_ball: u32,
    /// Strike direction in the velocity (y-up) frame, radians
    angle: f64,
    pub color: CueColor,
}

impl Default for Cue {
    fn default() -> Self {
        Self::new(CueColor::Brown)
    }
}

impl Cue {
    /// A cue at rest beside the ball, pointing left
    pub fn new(color: CueColor) -> Self {
        Self {
            distance_from_ball: CUE_REST_DISTANCE,
            angle: std::f64::consts::PI,
            color,
        }
    }

    #[inline]
    pub fn distance_from_ball(&self) -> u32 {
        self.distance_from_ball
    }

    pub fn set_distance_from_ball(&mut self, distance: u32) -> Result<(), PoolError> {
        if distance > CUE_MAX_DISTANCE {
            return Err(PoolError::invalid_argument(format!(
                "requested value {distance} exceeds allowable maximum value {CUE_MAX_DISTANCE}"
            )));
        }
        self.distance_from_ball = distance;
        Ok(())
    }

    /// Draw the cue back by one unit. Returns false once fully drawn.
    pub fn charge(&mut self) -> bool {
        if self.distance_from_ball >= CUE_MAX_DISTANCE {
            return false;
        }
        self.distance_from_ball += 1;
        true
    }

    /// Strike power for the current draw: `distance / 10 - 2` in whole
    /// tens, never negative
    pub fn power(&self) -> f64 {
        (f64::from(self.distance_from_ball / 10) - 2.0).max(0.0)
    }

    /// Bring the cue back beside the ball for the next shot
    pub fn reset(&mut self) {
        self.distance_from_ball = CUE_REST_DISTANCE;
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Point the cue; the angle is wrapped into [-PI, PI)
    pub fn aim(&mut self, angle: f64) -> Result<(), PoolError> {
        if !angle.is_finite() {
            return Err(PoolError::invalid_argument(format!(
                "cue angle {angle} is not finite"
            )));
        }
        self.angle = normalize_angle(angle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_cue_rests_beside_ball() {
        let cue = Cue::new(CueColor::Blue);
        assert_eq!(cue.distance_from_ball(), 30);
        assert_eq!(cue.power(), 1.0);
        assert_eq!(cue.color, CueColor::Blue);
    }

    #[test]
    fn test_charge_stops_at_maximum() {
        let mut cue = Cue::default();
        let mut pulls = 0;
        while cue.charge() {
            pulls += 1;
        }
        assert_eq!(pulls, 150);
        assert_eq!(cue.distance_from_ball(), CUE_MAX_DISTANCE);
        assert_eq!(cue.power(), 16.0);

        cue.reset();
        assert_eq!(cue.distance_from_ball(), CUE_REST_DISTANCE);
    }

    #[test]
    fn test_power_uses_whole_tens() {
        let mut cue = Cue::default();
        cue.set_distance_from_ball(79).unwrap();
        assert_eq!(cue.power(), 5.0);
        cue.set_distance_from_ball(80).unwrap();
        assert_eq!(cue.power(), 6.0);
        cue.set_distance_from_ball(5).unwrap();
        assert_eq!(cue.power(), 0.0);
    }

    #[test]
    fn test_distance_above_maximum_rejected() {
        let mut cue = Cue::default();
        let err = cue.set_distance_from_ball(181).unwrap_err();
        assert!(matches!(err, PoolError::InvalidArgument(_)));
        assert_eq!(cue.distance_from_ball(), CUE_REST_DISTANCE);
        assert!(cue.set_distance_from_ball(180).is_ok());
    }

    #[test]
    fn test_aim_wraps_angle() {
        let mut cue = Cue::default();
        cue.aim(3.0 * PI / 2.0).unwrap();
        assert!((cue.angle() + PI / 2.0).abs() < 1e-12);
        assert!(cue.aim(f64::NAN).is_err());
    }
}
