//! Table state
//!
//! The table owns every ball for the whole game. Balls are never removed:
//! pocketing only changes their status, and the index of a ball in `balls`
//! is always its number.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::{BallStatus, PoolBall};
use super::geometry::Point;
use super::layout::{self, Pocket};
use super::wall::Wall;
use crate::consts::*;
use crate::error::PoolError;

/// Whether anything on the table is still rolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePhase {
    Running,
    Settled,
}

/// A ball dropping into a pocket, as reported to the referee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocketEvent {
    /// Number of the pocketed ball
    pub ball: u8,
    /// First ball the cue ball touched this shot (0 if none yet)
    pub first_touched: u8,
    /// Pocket id
    pub pocket: usize,
}

/// Complete table state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Felt friction used for every tick
    pub(crate) friction: f64,
    /// All balls, indexed by number
    pub(crate) balls: [PoolBall; BALL_COUNT],
    #[serde(skip, default = "default_cushions")]
    pub(crate) cushions: Vec<Wall>,
    /// Numbered balls in the order they were pocketed
    pub(crate) chamber: Vec<u8>,
    pub(crate) phase: TablePhase,
    /// First ball touched by the cue ball during the current shot
    pub(crate) first_touched: u8,
    /// Ticks elapsed in the current shot
    pub(crate) shot_ticks: u64,
    /// Pocket events of the current shot, in order
    pub(crate) shot_events: Vec<PocketEvent>,
}

fn default_cushions() -> Vec<Wall> {
    match layout::cushions() {
        Ok(cushions) => cushions,
        Err(e) => {
            log::error!("Cannot build the cushions: {e}");
            Vec::new()
        }
    }
}

/// Friction must lie in (0, 1) for a shot to come to rest
fn check_friction(friction: f64) -> Result<(), PoolError> {
    if !friction.is_finite() || friction <= 0.0 || friction >= 1.0 {
        return Err(PoolError::invalid_argument(format!(
            "friction must lie in (0, 1), got {friction}"
        )));
    }
    Ok(())
}

impl Table {
    /// A freshly racked table
    pub fn new(friction: f64) -> Result<Self, PoolError> {
        check_friction(friction)?;
        let rack = layout::rack_positions();
        Ok(Self {
            friction,
            balls: std::array::from_fn(|i| PoolBall::new(i as u8, rack[i])),
            cushions: layout::cushions()?,
            chamber: Vec::new(),
            phase: TablePhase::Settled,
            first_touched: CUE_BALL,
            shot_ticks: 0,
            shot_events: Vec::new(),
        })
    }

    /// Put every ball back on its starting spot
    pub fn rerack(&mut self) {
        let rack = layout::rack_positions();
        for ball in &mut self.balls {
            ball.set_location(rack[ball.number as usize]);
            ball.status = BallStatus::OnTable;
        }
        self.chamber.clear();
        self.phase = TablePhase::Settled;
        self.first_touched = CUE_BALL;
        self.shot_ticks = 0;
        self.shot_events.clear();
    }

    /// Check a table that did not come from [`Table::new`], such as a
    /// restored snapshot
    pub fn validate(&self) -> Result<(), PoolError> {
        if check_friction(self.friction).is_err() {
            return Err(PoolError::invalid_state(format!(
                "table friction {} would never let a shot settle",
                self.friction
            )));
        }
        if self.cushions.len() != layout::CUSHIONS.len() {
            return Err(PoolError::invalid_state(format!(
                "table has {} cushions, expected {}",
                self.cushions.len(),
                layout::CUSHIONS.len()
            )));
        }
        Ok(())
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn balls(&self) -> &[PoolBall] {
        &self.balls
    }

    pub fn ball(&self, number: u8) -> Option<&PoolBall> {
        self.balls.get(number as usize)
    }

    pub fn cue_ball(&self) -> &PoolBall {
        &self.balls[CUE_BALL as usize]
    }

    pub fn cushions(&self) -> &[Wall] {
        &self.cushions
    }

    /// Numbered balls pocketed so far, in pocketing order
    pub fn chamber(&self) -> &[u8] {
        &self.chamber
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    pub fn first_touched(&self) -> u8 {
        self.first_touched
    }

    /// Balls still in play
    pub fn balls_on_table(&self) -> impl Iterator<Item = &PoolBall> {
        self.balls.iter().filter(|b| !b.is_pocketed())
    }

    /// True when no ball has any speed
    pub fn is_at_rest(&self) -> bool {
        self.balls.iter().all(|b| !b.body.has_speed())
    }

    /// Prepare for a new shot
    pub(crate) fn begin_shot(&mut self) {
        self.first_touched = CUE_BALL;
        self.shot_ticks = 0;
        self.shot_events.clear();
        self.phase = TablePhase::Running;
    }

    /// Drop a ball into `pocket`: it stops and leaves play for the rest of
    /// the game (the cue ball until it is placed again)
    pub(crate) fn drop_into(&mut self, index: usize, pocket: Pocket) -> PocketEvent {
        let ball = &mut self.balls[index];
        ball.body.stop();
        ball.status = BallStatus::Pocketed { pocket: pocket.id() };
        if !ball.is_cue_ball() {
            self.chamber.push(ball.number);
        }
        let event = PocketEvent {
            ball: ball.number,
            first_touched: self.first_touched,
            pocket: pocket.id(),
        };
        self.shot_events.push(event);
        event
    }

    /// Hand-place the cue ball. The spot is clamped onto the cloth and must
    /// not touch any ball still in play.
    pub fn place_cue_ball(&mut self, target: Point) -> Result<(), PoolError> {
        if !target.is_finite() {
            return Err(PoolError::invalid_argument(format!(
                "cue ball spot {target} is not finite"
            )));
        }
        if self.phase == TablePhase::Running {
            return Err(PoolError::invalid_state(
                "cannot place the cue ball while balls are rolling",
            ));
        }
        let spot = DVec2::new(
            target
                .x
                .clamp(layout::RAIL_WEST_X + BALL_RADIUS, layout::RAIL_EAST_X - BALL_RADIUS),
            target
                .y
                .clamp(layout::RAIL_NORTH_Y + BALL_RADIUS, layout::RAIL_SOUTH_Y - BALL_RADIUS),
        );

        if let Some(blocker) = self
            .balls_on_table()
            .filter(|b| !b.is_cue_ball())
            .find(|b| b.location().distance(spot) < BALL_SIZE)
        {
            return Err(PoolError::invalid_argument(format!(
                "cue ball at {spot} would touch ball {}",
                blocker.number
            )));
        }

        let cue = &mut self.balls[CUE_BALL as usize];
        cue.set_location(spot);
        cue.status = BallStatus::OnTable;
        log::debug!("Cue ball placed at {spot}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_racked_and_at_rest() {
        let table = Table::new(FRICTION).unwrap();
        assert_eq!(table.balls().len(), BALL_COUNT);
        assert!(table.is_at_rest());
        assert_eq!(table.phase(), TablePhase::Settled);
        for (i, ball) in table.balls().iter().enumerate() {
            assert_eq!(ball.number as usize, i);
            assert!(!ball.is_pocketed());
        }
        assert_eq!(table.cue_ball().location(), DVec2::new(220.0, 220.0));
    }

    #[test]
    fn test_bad_friction_rejected() {
        assert!(Table::new(0.0).is_err());
        assert!(Table::new(1.5).is_err());
        assert!(Table::new(f64::NAN).is_err());
    }

    #[test]
    fn test_restored_snapshot_is_validated() {
        let table = Table::new(FRICTION).unwrap();
        let mut snapshot = serde_json::to_value(&table).unwrap();
        let restored: Table = serde_json::from_value(snapshot.clone()).unwrap();
        assert_eq!(restored.cushions().len(), layout::CUSHIONS.len());
        assert_eq!(restored.friction(), FRICTION);
        assert!(restored.validate().is_ok());

        snapshot["friction"] = serde_json::json!(-0.5);
        let restored: Table = serde_json::from_value(snapshot).unwrap();
        assert!(matches!(restored.validate(), Err(PoolError::InvalidState(_))));
    }

    #[test]
    fn test_drop_into_fills_chamber_but_not_with_cue_ball() {
        let mut table = Table::new(FRICTION).unwrap();
        table.begin_shot();
        let event = table.drop_into(3, Pocket::South);
        assert_eq!(
            event,
            PocketEvent {
                ball: 3,
                first_touched: 0,
                pocket: 4
            }
        );
        table.drop_into(0, Pocket::NorthWest);
        assert_eq!(table.chamber(), &[3]);
        assert!(table.cue_ball().is_pocketed());
        assert_eq!(table.balls_on_table().count(), BALL_COUNT - 2);
    }

    #[test]
    fn test_place_cue_ball_clamps_to_cloth() {
        let mut table = Table::new(FRICTION).unwrap();
        table.place_cue_ball(DVec2::new(0.0, 1000.0)).unwrap();
        assert_eq!(table.cue_ball().location(), DVec2::new(55.0, 385.0));
    }

    #[test]
    fn test_place_cue_ball_rejects_overlap() {
        let mut table = Table::new(FRICTION).unwrap();
        let err = table.place_cue_ball(DVec2::new(590.0, 220.0)).unwrap_err();
        assert!(matches!(err, PoolError::InvalidArgument(_)));
        // Previous spot is kept
        assert_eq!(table.cue_ball().location(), DVec2::new(220.0, 220.0));
    }

    #[test]
    fn test_place_cue_ball_returns_it_to_play() {
        let mut table = Table::new(FRICTION).unwrap();
        table.drop_into(0, Pocket::North);
        table.phase = TablePhase::Settled;
        table.place_cue_ball(DVec2::new(150.0, 150.0)).unwrap();
        assert!(!table.cue_ball().is_pocketed());
        assert!(!table.cue_ball().body.has_speed());
    }

    #[test]
    fn test_rerack_restores_everything() {
        let mut table = Table::new(FRICTION).unwrap();
        table.drop_into(5, Pocket::North);
        table.balls[2].body.speed = DVec2::new(1.0, 1.0);
        table.rerack();
        assert!(table.chamber().is_empty());
        assert!(table.is_at_rest());
        assert!(table.balls_on_table().count() == BALL_COUNT);
    }
}
