//! Fixed timestep simulation tick
//!
//! Core shot loop that advances the table deterministically. One call to
//! [`tick`] is one physics step; pacing ticks in real time is left to the
//! caller.

use serde::{Deserialize, Serialize};

use super::collision::{collide_balls, resolve_cushions};
use super::layout::Pocket;
use super::state::{PocketEvent, Table, TablePhase};
use crate::consts::*;
use crate::error::PoolError;

/// Receiver of what happens on the table during a shot
pub trait TableEvents {
    /// A ball dropped; called once per ball, in the order they fall
    fn on_pocket(&mut self, event: &PocketEvent) -> Result<(), PoolError>;

    /// Every ball has come to rest
    fn on_shot_complete(&mut self) -> Result<(), PoolError> {
        Ok(())
    }
}

/// Ignore all events
impl TableEvents for () {
    fn on_pocket(&mut self, _event: &PocketEvent) -> Result<(), PoolError> {
        Ok(())
    }
}

/// Record pocket events
impl TableEvents for Vec<PocketEvent> {
    fn on_pocket(&mut self, event: &PocketEvent) -> Result<(), PoolError> {
        self.push(*event);
        Ok(())
    }
}

/// Summary of a completed shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotReport {
    /// Ticks until the table settled
    pub ticks: u64,
    /// Pocket events in chronological order
    pub events: Vec<PocketEvent>,
    /// First ball hit by the cue ball (0 if it hit nothing)
    pub first_touched: u8,
}

/// Hit the cue ball without running the shot. Drive the shot with [`tick`]
/// until it reports [`TablePhase::Settled`].
pub fn launch(table: &mut Table, power: f64, angle: f64) -> Result<(), PoolError> {
    if !power.is_finite() || power < 0.0 {
        return Err(PoolError::invalid_argument(format!(
            "strike power must be finite and non-negative, got {power}"
        )));
    }
    if !angle.is_finite() {
        return Err(PoolError::invalid_argument(format!(
            "strike angle {angle} is not finite"
        )));
    }
    if table.phase == TablePhase::Running {
        return Err(PoolError::invalid_state("balls are still rolling"));
    }
    table.validate()?;
    if table.cue_ball().is_pocketed() {
        return Err(PoolError::invalid_state(
            "the cue ball must be placed before striking",
        ));
    }

    table.begin_shot();
    table.balls[CUE_BALL as usize]
        .body
        .set_polar_speed(power, angle);
    log::info!("Strike: power {power:.1}, angle {angle:.3} rad");
    Ok(())
}

/// Advance the table by one fixed timestep
///
/// A ball is off the table before `events` hears about it. If the sink
/// fails, the rest of that tick is skipped and the table stays
/// [`TablePhase::Running`]; calling `tick` again carries on with the shot.
pub fn tick(table: &mut Table, events: &mut impl TableEvents) -> Result<TablePhase, PoolError> {
    if table.phase == TablePhase::Settled {
        return Ok(TablePhase::Settled);
    }
    table.shot_ticks += 1;

    // Stable order by ball number
    for i in 0..BALL_COUNT {
        {
            let ball = &mut table.balls[i];
            if ball.is_pocketed() || !ball.body.has_speed() {
                continue;
            }
            ball.body.advance(table.friction);
        }

        let location = table.balls[i].location();
        if let Some(pocket) = Pocket::ALL.into_iter().find(|p| p.captures(location)) {
            let event = table.drop_into(i, pocket);
            log::info!(
                "Ball {} pocketed in the {} pocket (first touched: {})",
                event.ball,
                pocket.as_str(),
                event.first_touched
            );
            events.on_pocket(&event)?;
            continue;
        }

        for j in 0..BALL_COUNT {
            if j == i || table.balls[j].is_pocketed() {
                continue;
            }
            if table.balls[i].body.is_touching(&table.balls[j].body) {
                if i == CUE_BALL as usize && table.first_touched == CUE_BALL {
                    table.first_touched = j as u8;
                    log::debug!("Cue ball first touched ball {j}");
                }
                collide_balls(&mut table.balls, i, j)?;
            }
        }

        if let Some(k) = resolve_cushions(&mut table.balls[i].body, &table.cushions) {
            log::debug!("Ball {i} bounced off cushion {k}");
        }
    }

    if table.is_at_rest() {
        table.phase = TablePhase::Settled;
        log::info!(
            "Shot settled after {} ticks, {} ball(s) pocketed",
            table.shot_ticks,
            table.shot_events.len()
        );
        events.on_shot_complete()?;
    }
    Ok(table.phase)
}

/// Strike the cue ball with `power` at `angle` and run the shot until every
/// ball is at rest
pub fn strike(
    table: &mut Table,
    power: f64,
    angle: f64,
    events: &mut impl TableEvents,
) -> Result<ShotReport, PoolError> {
    launch(table, power, angle)?;
    while tick(table, events)? == TablePhase::Running {}
    Ok(ShotReport {
        ticks: table.shot_ticks,
        events: table.shot_events.clone(),
        first_touched: table.first_touched,
    })
}
