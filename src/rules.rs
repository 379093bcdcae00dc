//! American eight-ball rules
//!
//! Balls 1 to 7 are solids, 9 to 15 stripes. The first shooter to pocket a
//! numbered ball gets that group; the opponent gets the other. A shooter
//! keeps the table while they legally pocket their own balls. The turn passes
//! on a foul:
//! - the cue ball touches nothing, or first touches a ball of the wrong group
//! - the cue ball is pocketed (the opponent then places it by hand)
//! - a ball of the opponent's group is pocketed
//!
//! The 8-ball ends the game. The breaker wins by sinking it on the break;
//! otherwise it wins only for a shooter on seven points, after a legal first
//! contact, in the pocket they called. Any other 8-ball loses.

use serde::{Deserialize, Serialize};

use crate::consts::{CUE_BALL, EIGHT_BALL};
use crate::error::PoolError;
use crate::settings::{Breaker, CueColor, Settings};
use crate::sim::layout::Pocket;
use crate::sim::state::PocketEvent;
use crate::sim::tick::TableEvents;

/// Points a shooter needs before going for the 8-ball
pub const POINTS_TO_CALL: u32 = 7;

/// Ball group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BallType {
    /// Cue ball, 8-ball, or a shooter with no group yet
    #[default]
    None,
    Solid,
    Striped,
}

impl BallType {
    /// Group of the ball with the given number
    pub fn of(ball: u8) -> Self {
        match ball {
            1..=7 => BallType::Solid,
            9..=15 => BallType::Striped,
            _ => BallType::None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            BallType::Solid => BallType::Striped,
            BallType::Striped => BallType::Solid,
            BallType::None => BallType::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BallType::None => "none",
            BallType::Solid => "solids",
            BallType::Striped => "stripes",
        }
    }
}

/// One of the two players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shooter {
    name: String,
    points: u32,
    ball_type: BallType,
    cue_color: CueColor,
}

impl Shooter {
    /// A shooter with no points and no group. The name is stored with its
    /// first letter upper-cased.
    pub fn new(name: &str, cue_color: CueColor) -> Self {
        let mut chars = name.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self {
            name,
            points: 0,
            ball_type: BallType::None,
            cue_color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn ball_type(&self) -> BallType {
        self.ball_type
    }

    pub fn cue_color(&self) -> CueColor {
        self.cue_color
    }

    /// Whether `ball` is in this shooter's group. A shooter with no group
    /// "owns" the cue ball and the 8-ball.
    pub fn owns(&self, ball: u8) -> bool {
        self.ball_type == BallType::of(ball)
    }
}

/// Outcome of a turn, updated as balls drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnResult {
    /// Legal shot: the shooter plays again
    NewStrike,
    /// Foul or miss: the opponent plays
    TurnOver,
    /// Scratch: the opponent places the cue ball and plays
    WhiteInPocket,
    Won,
    Lost,
}

impl TurnResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnResult::NewStrike => "new strike",
            TurnResult::TurnOver => "turn over",
            TurnResult::WhiteInPocket => "white in pocket",
            TurnResult::Won => "won",
            TurnResult::Lost => "lost",
        }
    }

    /// Combine the running verdict of a turn with the outcome of the latest
    /// ball to drop
    pub fn fold(self, latest: TurnResult) -> TurnResult {
        use TurnResult::*;
        match (self, latest) {
            (Lost, _) => Lost,
            (TurnOver, NewStrike) => TurnOver,
            (TurnOver | WhiteInPocket, Won) => Lost,
            (TurnOver, latest) => latest,
            (WhiteInPocket, NewStrike | TurnOver) => WhiteInPocket,
            (WhiteInPocket, latest) => latest,
            (Won, WhiteInPocket) => Lost,
            (Won, _) => Won,
            (NewStrike, latest) => latest,
        }
    }
}

/// Eight-ball referee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EightBallRules {
    shooters: [Shooter; 2],
    /// Index of the shooter at the table
    current: usize,
    in_turn: bool,
    break_shot: bool,
    verdict: TurnResult,
    /// Balls of any kind pocketed this turn
    pockets_this_turn: u32,
    designated_pocket: Option<usize>,
}

impl EightBallRules {
    pub fn new(player_one: Shooter, player_two: Shooter, breaker: Breaker) -> Self {
        Self {
            shooters: [player_one, player_two],
            current: match breaker {
                Breaker::PlayerOne => 0,
                Breaker::PlayerTwo => 1,
            },
            in_turn: false,
            break_shot: true,
            verdict: TurnResult::NewStrike,
            pockets_this_turn: 0,
            designated_pocket: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Shooter::new(&settings.player_one, settings.cue_one),
            Shooter::new(&settings.player_two, settings.cue_two),
            settings.breaker,
        )
    }

    pub fn shooters(&self) -> &[Shooter; 2] {
        &self.shooters
    }

    pub fn current_shooter(&self) -> &Shooter {
        &self.shooters[self.current]
    }

    pub fn waiting_shooter(&self) -> &Shooter {
        &self.shooters[1 - self.current]
    }

    /// Index into [`Self::shooters`] of the shooter at the table
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_break_shot(&self) -> bool {
        self.break_shot
    }

    pub fn in_turn(&self) -> bool {
        self.in_turn
    }

    pub fn designated_pocket(&self) -> Option<usize> {
        self.designated_pocket
    }

    pub fn current_verdict(&self) -> TurnResult {
        self.verdict
    }

    /// Open a turn for the current shooter
    pub fn start_turn(&mut self) -> Result<(), PoolError> {
        if self.in_turn {
            return Err(PoolError::invalid_state("last turn did not end"));
        }
        self.in_turn = true;
        self.verdict = TurnResult::NewStrike;
        self.pockets_this_turn = 0;
        log::debug!("{} to shoot", self.current_shooter().name);
        Ok(())
    }

    /// Report a pocketed ball. Returns the running verdict of the turn.
    pub fn pocket(&mut self, ball: u8, first_touched: u8, pocket: usize) -> Result<TurnResult, PoolError> {
        if !self.in_turn {
            return Err(PoolError::invalid_state("turn did not start"));
        }
        let latest = self.classify(ball, first_touched, pocket);
        self.pockets_this_turn += 1;
        self.verdict = self.verdict.fold(latest);
        log::debug!(
            "Ball {ball} ({}), verdict now {}",
            latest.as_str(),
            self.verdict.as_str()
        );
        Ok(self.verdict)
    }

    /// Judge a single pocketed ball. Points and group assignment happen here
    /// even if the turn's verdict ignores the result.
    fn classify(&mut self, ball: u8, first_touched: u8, pocket: usize) -> TurnResult {
        let waiting = 1 - self.current;

        if ball == CUE_BALL {
            return TurnResult::WhiteInPocket;
        }

        if ball == EIGHT_BALL {
            let shooter = &self.shooters[self.current];
            if self.break_shot && shooter.owns(first_touched) {
                return TurnResult::Won;
            }
            if shooter.points == POINTS_TO_CALL
                && (shooter.owns(first_touched) || first_touched == EIGHT_BALL)
                && self.designated_pocket == Some(pocket)
            {
                return TurnResult::Won;
            }
            return TurnResult::Lost;
        }

        if self.shooters[self.current].ball_type == BallType::None {
            let group = BallType::of(ball);
            self.shooters[self.current].ball_type = group;
            self.shooters[waiting].ball_type = group.opposite();
            self.shooters[self.current].points += 1;
            log::info!(
                "{} takes the {}",
                self.shooters[self.current].name,
                group.as_str()
            );
            return TurnResult::NewStrike;
        }

        if self.shooters[self.current].owns(ball) {
            self.shooters[self.current].points += 1;
            if self.shooters[self.current].owns(first_touched)
                || (self.verdict == TurnResult::NewStrike && self.pockets_this_turn >= 1)
            {
                TurnResult::NewStrike
            } else {
                TurnResult::TurnOver
            }
        } else {
            self.shooters[waiting].points += 1;
            TurnResult::TurnOver
        }
    }

    /// The cue ball is back on the table after a scratch
    pub fn cue_ball_repositioned(&mut self) {
        if self.verdict == TurnResult::WhiteInPocket {
            self.verdict = TurnResult::TurnOver;
        }
    }

    /// Call the pocket for the 8-ball
    pub fn set_designated_pocket(&mut self, pocket: usize) -> Result<(), PoolError> {
        let called = Pocket::from_id(pocket)
            .ok_or_else(|| PoolError::invalid_argument(format!("no pocket with id {pocket}")))?;
        log::info!(
            "{} calls the {} pocket",
            self.current_shooter().name,
            called.as_str()
        );
        self.designated_pocket = Some(pocket);
        Ok(())
    }

    /// True when the shooter is on seven points and has not called a pocket
    pub fn must_choose_pocket(&self) -> bool {
        self.current_shooter().points == POINTS_TO_CALL && self.designated_pocket.is_none()
    }

    /// Close the turn and decide who shoots next
    pub fn end_turn(&mut self) -> Result<(), PoolError> {
        if !self.in_turn {
            return Err(PoolError::invalid_state("turn did not start"));
        }
        self.break_shot = false;
        self.in_turn = false;
        self.designated_pocket = None;
        if self.pockets_this_turn == 0 {
            self.verdict = TurnResult::TurnOver;
        }
        if matches!(self.verdict, TurnResult::TurnOver | TurnResult::WhiteInPocket) {
            self.current = 1 - self.current;
            log::info!("Turn passes to {}", self.current_shooter().name);
        }
        Ok(())
    }
}

impl TableEvents for EightBallRules {
    fn on_pocket(&mut self, event: &PocketEvent) -> Result<(), PoolError> {
        self.pocket(event.ball, event.first_touched, event.pocket)
            .map(|_| ())
    }
}
