//! Fixed table geometry: cushion segments, pocket centres and the rack

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::wall::Wall;
use crate::consts::*;
use crate::error::PoolError;

/// Cushion segments as (x1, y1, x2, y2), scanned in this order.
///
/// The six long rails come first, then the two jaws of each pocket.
pub const CUSHIONS: [(f64, f64, f64, f64); 18] = [
    (369.0, 40.0, 71.0, 40.0),   // N_A
    (729.0, 40.0, 431.0, 40.0),  // N_B
    (760.0, 369.0, 760.0, 71.0), // E
    (431.0, 400.0, 729.0, 400.0), // S_A
    (71.0, 400.0, 369.0, 400.0), // S_B
    (40.0, 71.0, 40.0, 369.0),   // W
    (20.0, 50.0, 40.0, 70.0),    // NW_1
    (70.0, 40.0, 50.0, 20.0),    // NW_2
    (380.0, 20.0, 370.0, 40.0),  // N_1
    (430.0, 40.0, 420.0, 20.0),  // N_2
    (750.0, 20.0, 730.0, 40.0),  // NE_1
    (760.0, 70.0, 780.0, 50.0),  // NE_2
    (780.0, 390.0, 760.0, 370.0), // SE_1
    (730.0, 400.0, 750.0, 420.0), // SE_2
    (420.0, 420.0, 430.0, 400.0), // S_1
    (370.0, 400.0, 380.0, 420.0), // S_2
    (50.0, 420.0, 70.0, 400.0),  // SW_1
    (40.0, 370.0, 20.0, 390.0),  // SW_2
];

/// Inner faces of the long rails, used to keep a hand-placed cue ball on the cloth
pub const RAIL_WEST_X: f64 = 40.0;
pub const RAIL_EAST_X: f64 = 760.0;
pub const RAIL_NORTH_Y: f64 = 40.0;
pub const RAIL_SOUTH_Y: f64 = 400.0;

/// Build the cushion set
pub fn cushions() -> Result<Vec<Wall>, PoolError> {
    CUSHIONS
        .iter()
        .map(|&(x1, y1, x2, y2)| Wall::new(DVec2::new(x1, y1), DVec2::new(x2, y2)))
        .collect()
}

/// The six pockets; the discriminant is the pocket id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pocket {
    NorthWest,
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
}

impl Pocket {
    pub const ALL: [Pocket; 6] = [
        Pocket::NorthWest,
        Pocket::North,
        Pocket::NorthEast,
        Pocket::SouthEast,
        Pocket::South,
        Pocket::SouthWest,
    ];

    #[inline]
    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    pub fn center(self) -> Point {
        match self {
            Pocket::NorthWest => DVec2::new(35.0, 35.0),
            Pocket::North => DVec2::new(400.0, 25.0),
            Pocket::NorthEast => DVec2::new(765.0, 35.0),
            Pocket::SouthEast => DVec2::new(765.0, 405.0),
            Pocket::South => DVec2::new(400.0, 415.0),
            Pocket::SouthWest => DVec2::new(35.0, 405.0),
        }
    }

    /// Whether a ball centred at `location` drops into this pocket
    pub fn captures(self, location: Point) -> bool {
        location.distance(self.center()) <= BALL_RADIUS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pocket::NorthWest => "north-west",
            Pocket::North => "north",
            Pocket::NorthEast => "north-east",
            Pocket::SouthEast => "south-east",
            Pocket::South => "south",
            Pocket::SouthWest => "south-west",
        }
    }
}

/// Cue ball spot on the head string
pub const CUE_SPOT: (f64, f64) = (TABLE_HEIGHT / 2.0, TABLE_HEIGHT / 2.0);

/// Apex of the rack on the foot spot
pub const RACK_APEX: (f64, f64) = (TABLE_WIDTH - TABLE_HEIGHT / 2.0, TABLE_HEIGHT / 2.0);

/// Horizontal spacing between rack columns (slightly tighter than a diameter)
const RACK_COLUMN_STEP: f64 = BALL_SIZE - 4.0;

/// (column, row) of balls 1..=15 in the rack, both 1-based
const RACK_SLOTS: [(u8, u8); 15] = [
    (1, 1),
    (3, 1),
    (3, 3),
    (5, 1),
    (5, 5),
    (4, 2),
    (4, 3),
    (3, 2),
    (5, 3),
    (2, 2),
    (4, 1),
    (4, 4),
    (5, 2),
    (5, 4),
    (2, 1),
];

/// Starting location of every ball, indexed by ball number
pub fn rack_positions() -> [Point; BALL_COUNT] {
    let mut positions = [DVec2::ZERO; BALL_COUNT];
    positions[0] = DVec2::new(CUE_SPOT.0, CUE_SPOT.1);
    for (i, &(column, row)) in RACK_SLOTS.iter().enumerate() {
        let column = f64::from(column - 1);
        let row = f64::from(row - 1);
        positions[i + 1] = DVec2::new(
            RACK_APEX.0 + column * RACK_COLUMN_STEP,
            RACK_APEX.1 - column * BALL_RADIUS + row * BALL_SIZE,
        );
    }
    positions
}
