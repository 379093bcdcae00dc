//! Collision response between balls and against the cushions
//!
//! The tricky part at the pocket mouths: a ball can overlap two short jaw
//! segments at once. Only one of them reflects the ball, but the ball is
//! then pushed clear of every segment.

use super::ball::{PoolBall, Sphere};
use super::wall::Wall;
use crate::error::PoolError;

/// Borrow two distinct balls mutably
pub fn pair_mut(balls: &mut [PoolBall], i: usize, j: usize) -> (&mut PoolBall, &mut PoolBall) {
    debug_assert_ne!(i, j, "a ball cannot collide with itself");
    if i < j {
        let (head, tail) = balls.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = balls.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Resolve a contact between balls `i` and `j` (the mover first)
pub fn collide_balls(balls: &mut [PoolBall], i: usize, j: usize) -> Result<(), PoolError> {
    let (mover, other) = pair_mut(balls, i, j);
    log::debug!(
        "Ball {} hits ball {} at {:.2}",
        mover.number,
        other.number,
        mover.body.speed.length()
    );
    mover.body.collide_with(&mut other.body)
}

/// Pick the cushion that should reflect the ball.
///
/// Cushions are scanned in order; the first touching one is the candidate
/// and only a strictly deeper penetration further along the list replaces
/// it.
pub fn pick_cushion(ball: &Sphere, cushions: &[Wall]) -> Option<usize> {
    let first = cushions.iter().position(|w| w.is_touching(ball))?;
    let mut best = first;
    let mut best_depth = cushions[first].penetration(ball);
    for (k, wall) in cushions.iter().enumerate().skip(first + 1) {
        let depth = wall.penetration(ball);
        if depth > best_depth {
            best = k;
            best_depth = depth;
        }
    }
    Some(best)
}

/// Reflect the ball off the chosen cushion and push it clear of all of them.
/// Returns the index of the cushion that reflected the ball.
pub fn resolve_cushions(ball: &mut Sphere, cushions: &[Wall]) -> Option<usize> {
    let chosen = pick_cushion(ball, cushions)?;
    ball.reflect(cushions[chosen].angle());
    for wall in cushions {
        wall.move_away(ball);
    }
    Some(chosen)
}
