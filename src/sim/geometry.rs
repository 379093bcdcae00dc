//! Planar geometry on top of `glam::DVec2`
//!
//! Locations live in screen space (y grows downward) while velocities are
//! kept in a y-up frame. The bearing helpers below bridge the two: a bearing
//! measured with `angular_coord_from` is directly comparable with the polar
//! angle of a velocity.

use glam::DVec2;

use crate::consts::SEPARATION_STEP;
use crate::error::PoolError;

/// A location on the table
pub type Point = DVec2;

/// Build a vector from its polar form
#[inline]
pub fn from_polar(magnitude: f64, angle: f64) -> DVec2 {
    DVec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Change-of-frame operations on a point. Every method replaces the
/// point's own coordinates.
pub trait AxisSystem {
    /// Rotate the coordinate axes by `angle` radians
    fn rotate_axes(&mut self, angle: f64);

    /// Move the origin to `origin`
    fn translate_origin(&mut self, origin: DVec2);

    /// Translate, then rotate
    fn change_axes(&mut self, origin: DVec2, angle: f64);

    /// Polar angle about the origin
    fn angular_coord(&self) -> f64;

    /// Bearing of `center` as seen from this point, with y inverted
    fn angular_coord_from(&self, center: DVec2) -> Result<f64, PoolError>;

    /// Walk away from `other` along the ray through this point until the
    /// distance reaches `distance`. Never moves a point that is already far
    /// enough.
    fn set_distance_from(&mut self, other: DVec2, distance: f64);
}

impl AxisSystem for DVec2 {
    fn rotate_axes(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        let x = self.x;
        self.x = x * cos - self.y * sin;
        self.y = x * sin + self.y * cos;
    }

    fn translate_origin(&mut self, origin: DVec2) {
        *self -= origin;
    }

    fn change_axes(&mut self, origin: DVec2, angle: f64) {
        self.translate_origin(origin);
        self.rotate_axes(angle);
    }

    #[inline]
    fn angular_coord(&self) -> f64 {
        self.y.atan2(self.x)
    }

    fn angular_coord_from(&self, center: DVec2) -> Result<f64, PoolError> {
        if *self == center {
            return Err(PoolError::invalid_argument(format!(
                "bearing requested between coincident points {self}"
            )));
        }
        Ok((self.y - center.y).atan2(center.x - self.x))
    }

    fn set_distance_from(&mut self, other: DVec2, distance: f64) {
        if !distance.is_finite() {
            return;
        }
        let alpha = (self.y - other.y).atan2(self.x - other.x);
        let mut reach = distance;
        while self.distance(other) < distance {
            *self = other + from_polar(reach, alpha);
            reach += SEPARATION_STEP;
        }
    }
}

/// Polar manipulation of a velocity
pub trait Polar {
    /// Rescale to `magnitude`, keeping the direction
    fn set_magnitude(&mut self, magnitude: f64);

    /// Point the vector along `angle`, keeping the magnitude
    fn set_angle(&mut self, angle: f64);

    /// Rotate the vector about its application point
    fn turn(&mut self, angle: f64);
}

impl Polar for DVec2 {
    fn set_magnitude(&mut self, magnitude: f64) {
        *self = from_polar(magnitude, self.angular_coord());
    }

    fn set_angle(&mut self, angle: f64) {
        let current = self.angular_coord();
        self.turn(angle - current);
    }

    #[inline]
    fn turn(&mut self, angle: f64) {
        self.rotate_axes(angle);
    }
}
