//! Cushion segments
//!
//! A wall is an oriented segment A→B. Its solid side is the one swept by
//! rotating B about A counterclockwise, which for the table's winding is
//! always the rail side. Penetration is measured in a frame rotated so that
//! A→B runs along +x; in that frame the playing surface lies at smaller y.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Sphere;
use super::geometry::{AxisSystem, Point};
use crate::consts::{BALL_RADIUS, SEPARATION_STEP};
use crate::error::PoolError;

/// An immutable cushion segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    a: Point,
    b: Point,
    /// Orientation of A→B in the y-up frame
    angle: f64,
}

impl Wall {
    pub fn new(a: Point, b: Point) -> Result<Self, PoolError> {
        let angle = a.angular_coord_from(b)?;
        Ok(Self { a, b, angle })
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Shortest distance from `point` to the segment
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let seg = self.b - self.a;
        let len_sq = seg.length_squared();
        if len_sq == 0.0 {
            return point.distance(self.a);
        }
        let t = ((point - self.a).dot(seg) / len_sq).clamp(0.0, 1.0);
        point.distance(self.a + seg * t)
    }

    pub fn distance_from(&self, ball: &Sphere) -> f64 {
        self.distance_to_point(ball.location)
    }

    /// The endpoints and `point` expressed in the wall-aligned frame
    fn aligned(&self, point: Point) -> (DVec2, DVec2, DVec2) {
        let (mut a, mut b, mut c) = (self.a, self.b, point);
        a.rotate_axes(self.angle);
        b.rotate_axes(self.angle);
        c.rotate_axes(self.angle);
        (a, b, c)
    }

    /// How far the ball has crossed the line one radius in front of the
    /// cushion, or 0 when its centre is outside the segment's span or in front
    /// of that line
    pub fn penetration(&self, ball: &Sphere) -> f64 {
        let (a, b, c) = self.aligned(ball.location);
        let limit = a.y - BALL_RADIUS;
        if c.x > a.x && c.x < b.x && c.y >= limit {
            (c.y - limit).abs()
        } else {
            0.0
        }
    }

    pub fn is_touching(&self, ball: &Sphere) -> bool {
        self.distance_from(ball) < BALL_RADIUS || self.penetration(ball) > 0.0
    }

    /// Push the ball back in front of the cushion, in small steps along the
    /// cushion normal, until it no longer touches.
    pub fn move_away(&self, ball: &mut Sphere) {
        let (a, _, mut c) = self.aligned(ball.location);
        let mut clearance = BALL_RADIUS;
        while self.is_touching(ball) {
            c.y = a.y - clearance;
            let mut corrected = c;
            corrected.rotate_axes(-self.angle);
            ball.location = corrected;
            clearance += SEPARATION_STEP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    /// The north cushion between the corner and side pockets
    fn north() -> Wall {
        Wall::new(DVec2::new(369.0, 40.0), DVec2::new(71.0, 40.0)).unwrap()
    }

    /// The west cushion
    fn west() -> Wall {
        Wall::new(DVec2::new(40.0, 71.0), DVec2::new(40.0, 369.0)).unwrap()
    }

    #[test]
    fn test_angles() {
        assert!((north().angle() - PI).abs() < EPS);
        assert!((west().angle() + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_degenerate_wall_rejected() {
        let p = DVec2::new(5.0, 5.0);
        assert!(Wall::new(p, p).is_err());
    }

    #[test]
    fn test_distance_to_point() {
        let wall = north();
        assert!((wall.distance_to_point(DVec2::new(200.0, 100.0)) - 60.0).abs() < EPS);
        // Past the A end: distance to the endpoint
        assert!((wall.distance_to_point(DVec2::new(372.0, 44.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_penetration_on_table_side() {
        let wall = north();
        let clear = Sphere::new(DVec2::new(200.0, 60.0));
        assert_eq!(wall.penetration(&clear), 0.0);
        assert!(!wall.is_touching(&clear));

        let embedded = Sphere::new(DVec2::new(200.0, 50.0));
        assert!((wall.penetration(&embedded) - 5.0).abs() < EPS);
        assert!(wall.is_touching(&embedded));

        let west = west();
        let embedded = Sphere::new(DVec2::new(48.0, 200.0));
        assert!((west.penetration(&embedded) - 7.0).abs() < EPS);
    }

    #[test]
    fn test_penetration_outside_span() {
        let wall = north();
        let ball = Sphere::new(DVec2::new(400.0, 50.0));
        assert_eq!(wall.penetration(&ball), 0.0);
    }

    #[test]
    fn test_move_away_clears_the_cushion() {
        let wall = west();
        let mut ball = Sphere::new(DVec2::new(46.0, 180.0));
        wall.move_away(&mut ball);
        assert!(!wall.is_touching(&ball));
        assert!(ball.location.x >= 55.0 - EPS);
        assert!(ball.location.x <= 55.0 + 2.0 * SEPARATION_STEP);
        assert!((ball.location.y - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_away_leaves_clear_ball() {
        let wall = west();
        let mut ball = Sphere::new(DVec2::new(120.0, 180.0));
        wall.move_away(&mut ball);
        assert_eq!(ball.location, DVec2::new(120.0, 180.0));
    }
}
