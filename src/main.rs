//! Eight Ball entry point
//!
//! Plays a seeded self-play match headless and logs every shot.
//!
//! Usage: `eight-ball [seed] [settings.json] [eight-ball|practice]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::f64::consts::PI;

    use eight_ball::consts::*;
    use eight_ball::rules::BallType;
    use eight_ball::sim::geometry::{AxisSystem, Point};
    use eight_ball::sim::layout::{CUE_SPOT, RAIL_NORTH_Y, RAIL_SOUTH_Y};
    use eight_ball::{GameMode, Match, MatchPhase, PoolError, Settings};
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Give up on a match that runs this long
    const MAX_SHOTS: u32 = 500;

    /// Aim error added to every shot, radians
    const AIM_JITTER: f64 = 0.08;

    /// First spot on the head string where the cue ball touches nothing,
    /// searching outward from the cue spot
    fn free_spot(game: &Match) -> Option<Point> {
        let (x, y) = CUE_SPOT;
        let reach = (RAIL_SOUTH_Y - RAIL_NORTH_Y) / 2.0 - BALL_RADIUS;
        let mut offset = 0.0;
        while offset <= reach {
            for candidate in [DVec2::new(x, y - offset), DVec2::new(x, y + offset)] {
                let clear = game
                    .table()
                    .balls_on_table()
                    .filter(|b| !b.is_cue_ball())
                    .all(|b| b.location().distance(candidate) >= BALL_SIZE);
                if clear {
                    return Some(candidate);
                }
            }
            offset += 1.0;
        }
        None
    }

    /// Pick a target for the shooter at the table and aim at it, a little off
    fn pick_shot(game: &Match, rng: &mut Pcg32) -> Result<(f64, f64), PoolError> {
        let group = game
            .rules()
            .map(|r| r.current_shooter().ball_type())
            .unwrap_or_default();
        let cue = game.table().cue_ball().location();

        let targets: Vec<Point> = game
            .table()
            .balls_on_table()
            .filter(|b| !b.is_cue_ball())
            .filter(|b| group == BallType::None || BallType::of(b.number) == group)
            .map(|b| b.location())
            .collect();
        // Only the 8-ball left for this shooter
        let targets = if targets.is_empty() {
            game.table()
                .ball(EIGHT_BALL)
                .filter(|b| !b.is_pocketed())
                .map(|b| vec![b.location()])
                .unwrap_or_default()
        } else {
            targets
        };

        let power = rng.random_range(4.0..16.0);
        let angle = match targets.len() {
            0 => rng.random_range(-PI..PI),
            n => {
                let target = targets[rng.random_range(0..n)];
                cue.angular_coord_from(target)? + rng.random_range(-AIM_JITTER..AIM_JITTER)
            }
        };
        Ok((power, angle))
    }

    pub fn play(settings: &Settings) -> Result<(), PoolError> {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut game = Match::new(settings)?;
        log::info!("{} match, seed {}", settings.mode.as_str(), settings.seed);

        while game.shots() < MAX_SHOTS {
            match game.phase() {
                MatchPhase::Aiming => {
                    if game.mode() == GameMode::Practice && game.table().chamber().len() == BALL_COUNT - 1 {
                        log::info!("Table cleared in {} shots", game.shots());
                        return Ok(());
                    }
                    let shooter = game
                        .rules()
                        .map(|r| r.current_shooter().name().to_string())
                        .unwrap_or_else(|| "Practice".to_string());
                    let (power, angle) = pick_shot(&game, &mut rng)?;
                    let summary = game.shoot(power, angle)?;
                    let pocketed: Vec<u8> = summary.report.events.iter().map(|e| e.ball).collect();
                    log::info!(
                        "Shot {} by {shooter}: first touched {}, pocketed {:?}, {:.2} s on the table{}",
                        game.shots(),
                        summary.report.first_touched,
                        pocketed,
                        (summary.report.ticks * settings.tick_millis) as f64 / 1000.0,
                        summary
                            .verdict
                            .map(|v| format!(" ({})", v.as_str()))
                            .unwrap_or_default()
                    );
                }
                MatchPhase::PlaceCueBall => {
                    let spot = free_spot(&game)
                        .ok_or_else(|| PoolError::invalid_state("no free spot on the head string"))?;
                    game.place_cue_ball(spot)?;
                }
                MatchPhase::ChoosePocket => {
                    game.choose_pocket(rng.random_range(0..6))?;
                }
                MatchPhase::GameOver { .. } => break,
            }
        }

        match game.winner() {
            Some(winner) => println!("{} wins after {} shots", winner.name(), game.shots()),
            None => println!("No winner after {} shots", game.shots()),
        }
        if let Some(rules) = game.rules() {
            for shooter in rules.shooters() {
                println!(
                    "  {:<12} {:>2} points ({})",
                    shooter.name(),
                    shooter.points(),
                    shooter.ball_type().as_str()
                );
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use eight_ball::{GameMode, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Eight Ball (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next();
    let settings_path = args.next().unwrap_or_else(|| "settings.json".to_string());
    let mode = args.next();

    let mut settings = Settings::load(&settings_path);
    if let Some(seed) = seed {
        match seed.parse() {
            Ok(seed) => settings.seed = seed,
            Err(e) => {
                log::error!("Invalid seed {seed:?}: {e}");
                return std::process::ExitCode::FAILURE;
            }
        }
    }
    if let Some(mode) = mode {
        match GameMode::from_str(&mode) {
            Some(mode) => settings.mode = mode,
            None => {
                log::error!("Unknown game mode {mode:?}");
                return std::process::ExitCode::FAILURE;
            }
        }
    }

    match demo::play(&settings) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Match aborted: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web; a front end drives `Match` directly
}
