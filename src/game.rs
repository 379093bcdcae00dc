//! Match flow
//!
//! Ties the table, the cue and the referee together and decides what the
//! players may do next: aim and shoot, put the cue ball back after a scratch,
//! or call the pocket for the 8-ball.

use serde::{Deserialize, Serialize};

use crate::error::PoolError;
use crate::rules::{EightBallRules, Shooter, TurnResult};
use crate::settings::{GameMode, Settings};
use crate::sim::cue::Cue;
use crate::sim::geometry::Point;
use crate::sim::state::{Table, TablePhase};
use crate::sim::tick::{ShotReport, strike, tick};

/// What the match is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// The shooter at the table may strike
    Aiming,
    /// The cue ball was pocketed and must be placed by hand
    PlaceCueBall,
    /// The shooter is on seven points and must call a pocket
    ChoosePocket,
    /// Game finished; `winner` indexes the shooters
    GameOver { winner: usize },
}

/// Result of one shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotSummary {
    pub report: ShotReport,
    /// The turn's verdict (eight-ball only)
    pub verdict: Option<TurnResult>,
    /// Phase the match moved to
    pub phase: MatchPhase,
}

/// A game in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    mode: GameMode,
    table: Table,
    cue: Cue,
    rules: Option<EightBallRules>,
    phase: MatchPhase,
    shots: u32,
}

impl Match {
    /// Rack the balls and open the break
    pub fn new(settings: &Settings) -> Result<Self, PoolError> {
        settings.validate()?;
        let table = Table::new(settings.friction)?;
        let mut rules = match settings.mode {
            GameMode::EightBall => Some(EightBallRules::from_settings(settings)),
            GameMode::Practice => None,
        };
        let cue = match &mut rules {
            Some(rules) => {
                rules.start_turn()?;
                log::info!(
                    "{} vs {}, {} breaks",
                    rules.shooters()[0].name(),
                    rules.shooters()[1].name(),
                    rules.current_shooter().name()
                );
                Cue::new(rules.current_shooter().cue_color())
            }
            None => {
                log::info!("Practice table ready");
                Cue::new(settings.cue_one)
            }
        };

        Ok(Self {
            mode: settings.mode,
            table,
            cue,
            rules,
            phase: MatchPhase::Aiming,
            shots: 0,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn cue(&self) -> &Cue {
        &self.cue
    }

    /// The cue, for charging and aiming
    pub fn cue_mut(&mut self) -> &mut Cue {
        &mut self.cue
    }

    /// The referee, if eight-ball rules apply
    pub fn rules(&self) -> Option<&EightBallRules> {
        self.rules.as_ref()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Shots played so far
    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<&Shooter> {
        match (self.phase, &self.rules) {
            (MatchPhase::GameOver { winner }, Some(rules)) => rules.shooters().get(winner),
            _ => None,
        }
    }

    fn expect_phase(&self, wanted: MatchPhase, action: &str) -> Result<(), PoolError> {
        if self.phase != wanted {
            return Err(PoolError::invalid_state(format!(
                "cannot {action} while in {:?}",
                self.phase
            )));
        }
        Ok(())
    }

    /// Strike the cue ball and play the shot out
    pub fn shoot(&mut self, power: f64, angle: f64) -> Result<ShotSummary, PoolError> {
        self.expect_phase(MatchPhase::Aiming, "shoot")?;
        let played = match &mut self.rules {
            Some(rules) => strike(&mut self.table, power, angle, rules),
            None => strike(&mut self.table, power, angle, &mut ()),
        };
        let report = match played {
            Ok(report) => report,
            Err(e) => {
                self.run_out()?;
                return Err(e);
            }
        };
        self.shots += 1;
        self.cue.reset();

        let verdict = self.after_shot()?;
        Ok(ShotSummary {
            report,
            verdict,
            phase: self.phase,
        })
    }

    /// Strike with the cue's current draw and aim
    pub fn shoot_cue(&mut self) -> Result<ShotSummary, PoolError> {
        self.shoot(self.cue.power(), self.cue.angle())
    }

    /// Let an interrupted shot roll to rest without the referee so the
    /// table can be played again
    fn run_out(&mut self) -> Result<(), PoolError> {
        if self.table.phase() == TablePhase::Running {
            log::warn!("Shot interrupted; letting the balls come to rest");
            while tick(&mut self.table, &mut ())? == TablePhase::Running {}
        }
        Ok(())
    }

    fn after_shot(&mut self) -> Result<Option<TurnResult>, PoolError> {
        let Some(rules) = self.rules.as_mut() else {
            self.phase = if self.table.cue_ball().is_pocketed() {
                MatchPhase::PlaceCueBall
            } else {
                MatchPhase::Aiming
            };
            return Ok(None);
        };

        let verdict = rules.current_verdict();
        match verdict {
            TurnResult::Won => {
                self.phase = MatchPhase::GameOver {
                    winner: rules.current_index(),
                };
            }
            TurnResult::Lost => {
                self.phase = MatchPhase::GameOver {
                    winner: 1 - rules.current_index(),
                };
            }
            TurnResult::WhiteInPocket => {
                rules.cue_ball_repositioned();
                self.phase = MatchPhase::PlaceCueBall;
                return Ok(Some(verdict));
            }
            TurnResult::NewStrike | TurnResult::TurnOver => {
                rules.end_turn()?;
                let verdict = rules.current_verdict();
                self.begin_turn()?;
                return Ok(Some(verdict));
            }
        }

        if let Some(winner) = self.winner() {
            log::info!("{} wins after {} shots", winner.name(), self.shots);
        }
        Ok(Some(verdict))
    }

    /// Start the next turn, or ask for a called pocket first
    fn begin_turn(&mut self) -> Result<(), PoolError> {
        let Some(rules) = self.rules.as_mut() else {
            self.phase = MatchPhase::Aiming;
            return Ok(());
        };
        if rules.must_choose_pocket() {
            log::info!("{} must call a pocket", rules.current_shooter().name());
            self.phase = MatchPhase::ChoosePocket;
            return Ok(());
        }
        rules.start_turn()?;
        self.cue.color = rules.current_shooter().cue_color();
        self.phase = MatchPhase::Aiming;
        Ok(())
    }

    /// Put the cue ball back after a scratch; the incoming shooter then aims
    pub fn place_cue_ball(&mut self, spot: Point) -> Result<(), PoolError> {
        self.expect_phase(MatchPhase::PlaceCueBall, "place the cue ball")?;
        self.table.place_cue_ball(spot)?;
        if let Some(rules) = self.rules.as_mut() {
            rules.end_turn()?;
        }
        self.begin_turn()
    }

    /// Call the pocket for the 8-ball
    pub fn choose_pocket(&mut self, pocket: usize) -> Result<(), PoolError> {
        self.expect_phase(MatchPhase::ChoosePocket, "choose a pocket")?;
        if let Some(rules) = self.rules.as_mut() {
            rules.set_designated_pocket(pocket)?;
        }
        self.begin_turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::BallType;
    use crate::settings::CueColor;
    use glam::DVec2;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn eight_ball() -> Match {
        let settings = Settings {
            player_one: "anna".to_string(),
            player_two: "bruno".to_string(),
            ..Settings::default()
        };
        Match::new(&settings).unwrap()
    }

    /// Line ball `number` up in front of the north-west pocket with the cue
    /// ball behind it on the diagonal
    fn set_up_corner_pot(game: &mut Match, number: u8) {
        game.table.balls[number as usize].set_location(DVec2::new(70.0, 70.0));
        game.table.place_cue_ball(DVec2::new(120.0, 120.0)).unwrap();
    }

    const TO_NORTH_WEST: f64 = 3.0 * PI / 4.0;

    #[test]
    fn test_new_match_opens_the_break() {
        let game = eight_ball();
        assert_eq!(game.phase(), MatchPhase::Aiming);
        let rules = game.rules().unwrap();
        assert!(rules.in_turn());
        assert!(rules.is_break_shot());
        assert_eq!(rules.current_shooter().name(), "Anna");
        assert_eq!(game.cue().color, CueColor::Red);
        assert_eq!(game.shots(), 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            friction: 0.0,
            ..Settings::default()
        };
        assert!(Match::new(&settings).is_err());
    }

    #[test]
    fn test_miss_passes_the_table() {
        let mut game = eight_ball();
        let summary = game.shoot(1.0, FRAC_PI_2).unwrap();
        assert!(summary.report.events.is_empty());
        assert_eq!(summary.verdict, Some(TurnResult::TurnOver));
        assert_eq!(summary.phase, MatchPhase::Aiming);

        let rules = game.rules().unwrap();
        assert_eq!(rules.current_shooter().name(), "Bruno");
        assert!(rules.in_turn());
        assert_eq!(game.cue().color, CueColor::Blue);
    }

    #[test]
    fn test_legal_pot_keeps_the_table() {
        let mut game = eight_ball();
        set_up_corner_pot(&mut game, 3);
        let summary = game.shoot(3.0, TO_NORTH_WEST).unwrap();
        assert_eq!(summary.report.first_touched, 3);
        assert_eq!(summary.verdict, Some(TurnResult::NewStrike));

        let rules = game.rules().unwrap();
        assert_eq!(rules.current_shooter().name(), "Anna");
        assert_eq!(rules.current_shooter().ball_type(), BallType::Solid);
        assert_eq!(game.table().chamber(), &[3]);
    }

    #[test]
    fn test_rejected_shot_leaves_a_playable_table() {
        let mut game = eight_ball();
        set_up_corner_pot(&mut game, 3);
        // Referee out of turn: the first pocket event is refused
        game.rules.as_mut().unwrap().end_turn().unwrap();

        let err = game.shoot(3.0, TO_NORTH_WEST).unwrap_err();
        assert!(matches!(err, PoolError::InvalidState(_)));
        assert_eq!(game.table().phase(), TablePhase::Settled);
        assert!(game.table().is_at_rest());
        assert_eq!(game.table().chamber(), &[3]);
        assert_eq!(game.shots(), 0);
        assert_eq!(game.phase(), MatchPhase::Aiming);
    }

    #[test]
    fn test_eight_on_the_break_wins() {
        let mut game = eight_ball();
        set_up_corner_pot(&mut game, 8);
        let summary = game.shoot(3.0, TO_NORTH_WEST).unwrap();
        assert_eq!(summary.verdict, Some(TurnResult::Won));
        assert_eq!(summary.phase, MatchPhase::GameOver { winner: 0 });
        assert!(game.is_over());
        assert_eq!(game.winner().map(|s| s.name()), Some("Anna"));

        let err = game.shoot(3.0, 0.0).unwrap_err();
        assert!(matches!(err, PoolError::InvalidState(_)));
    }

    #[test]
    fn test_scratch_hands_the_cue_ball_over() {
        let mut game = eight_ball();
        game.table.place_cue_ball(DVec2::new(100.0, 100.0)).unwrap();
        let summary = game.shoot(5.0, TO_NORTH_WEST).unwrap();
        assert_eq!(summary.verdict, Some(TurnResult::WhiteInPocket));
        assert_eq!(game.phase(), MatchPhase::PlaceCueBall);

        assert!(matches!(game.shoot(1.0, 0.0), Err(PoolError::InvalidState(_))));
        assert!(matches!(game.choose_pocket(0), Err(PoolError::InvalidState(_))));
        // Overlapping the rack is refused and nothing changes
        assert!(game.place_cue_ball(DVec2::new(580.0, 220.0)).is_err());
        assert_eq!(game.phase(), MatchPhase::PlaceCueBall);

        game.place_cue_ball(DVec2::new(220.0, 220.0)).unwrap();
        assert_eq!(game.phase(), MatchPhase::Aiming);
        let rules = game.rules().unwrap();
        assert_eq!(rules.current_shooter().name(), "Bruno");
        assert!(rules.in_turn());
        assert!(!game.table().cue_ball().is_pocketed());
    }

    #[test]
    fn test_seven_points_means_calling_a_pocket() {
        let mut game = eight_ball();
        let mut rules = EightBallRules::from_settings(&Settings::default());
        rules.start_turn().unwrap();
        for ball in 1..=7 {
            rules.pocket(ball, 1, 0).unwrap();
        }
        rules.end_turn().unwrap();
        game.rules = Some(rules);

        game.begin_turn().unwrap();
        assert_eq!(game.phase(), MatchPhase::ChoosePocket);
        assert!(matches!(game.shoot(1.0, 0.0), Err(PoolError::InvalidState(_))));
        assert!(matches!(game.choose_pocket(9), Err(PoolError::InvalidArgument(_))));
        assert_eq!(game.phase(), MatchPhase::ChoosePocket);

        game.choose_pocket(2).unwrap();
        assert_eq!(game.phase(), MatchPhase::Aiming);
        let rules = game.rules().unwrap();
        assert_eq!(rules.designated_pocket(), Some(2));
        assert!(rules.in_turn());
    }

    #[test]
    fn test_practice_has_no_referee() {
        let settings = Settings {
            mode: GameMode::Practice,
            ..Settings::default()
        };
        let mut game = Match::new(&settings).unwrap();
        assert!(game.rules().is_none());

        game.table.place_cue_ball(DVec2::new(100.0, 100.0)).unwrap();
        let summary = game.shoot(5.0, TO_NORTH_WEST).unwrap();
        assert_eq!(summary.verdict, None);
        assert_eq!(game.phase(), MatchPhase::PlaceCueBall);
        game.place_cue_ball(DVec2::new(220.0, 220.0)).unwrap();
        assert_eq!(game.phase(), MatchPhase::Aiming);

        game.shoot(1.0, FRAC_PI_2).unwrap();
        assert_eq!(game.phase(), MatchPhase::Aiming);
        assert!(game.winner().is_none());
        assert!(matches!(game.choose_pocket(1), Err(PoolError::InvalidState(_))));
    }

    #[test]
    fn test_shoot_with_the_cue() {
        let mut game = eight_ball();
        for _ in 0..10 {
            game.cue_mut().charge();
        }
        game.cue_mut().aim(FRAC_PI_2).unwrap();
        assert_eq!(game.cue().power(), 2.0);
        let summary = game.shoot_cue().unwrap();
        assert!(summary.report.ticks > 0);
        assert_eq!(game.cue().distance_from_ball(), 30);
        assert_eq!(game.shots(), 1);
    }
}
