#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Crossing engine.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and pure systems. Adapters and systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Drawing goes through the injected [`Canvas`] capability
//! so the world never reaches for an ambient rendering context.

use std::{cmp::Ordering, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Crossing.";

/// Number of enemy lanes laid across the board.
pub const LANE_COUNT: u32 = 3;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player attempt a single gated move.
    MovePlayer {
        /// Requested direction; `None` represents an unrecognized input.
        direction: Option<Direction>,
    },
    /// Recreates the player and the enemy roster for a fresh session.
    RestartSession,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that an enemy left the right bound and re-entered from the left.
    EnemyRecycled {
        /// Identifier of the recycled enemy.
        enemy: EnemyId,
        /// Speed drawn for the enemy's next crossing.
        speed: f32,
    },
    /// Confirms that the player moved a whole cell.
    PlayerMoved {
        /// Direction of travel.
        direction: Direction,
        /// Position occupied before the move.
        from: Position,
        /// Position occupied after the move.
        to: Position,
    },
    /// Reports that a move request left the player in place.
    PlayerMoveRejected {
        /// Direction carried by the request, if it was recognized.
        direction: Option<Direction>,
        /// Specific reason the move was discarded.
        reason: MoveRejection,
    },
    /// Announces that the player and enemies were recreated.
    SessionRestarted,
}

/// Reasons a player move request may be discarded by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The request carried no recognizable direction.
    UnrecognizedDirection,
    /// The player already sits past the gate threshold for that direction.
    OutOfBounds,
}

/// Abstract movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing y.
    Up,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// Every direction in declaration order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Parses the lowercase textual name of a direction.
    ///
    /// Unknown names yield `None`, which the world treats as a no-op request.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Lowercase textual name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Real-valued world position measured in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the position displaced by the provided offsets.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Lane identifier used when spawning enemies.
///
/// Lanes are numbered from one. Any value other than one or two resolves to
/// the third lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane(u32);

impl Lane {
    /// The three lanes in top-to-bottom order.
    pub const ALL: [Lane; LANE_COUNT as usize] = [Self(1), Self(2), Self(3)];

    /// Wraps the provided lane number without validation.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw lane number as supplied by the caller.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Zero-based slot in [`GridGeometry::lane_ys`] this lane resolves to.
    #[must_use]
    pub const fn slot(&self) -> usize {
        match self.0 {
            1 => 0,
            2 => 1,
            _ => 2,
        }
    }
}

/// Raw platform key code delivered by the host on key release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(u32);

impl KeyCode {
    /// Left arrow.
    pub const ARROW_LEFT: KeyCode = KeyCode(37);
    /// Up arrow.
    pub const ARROW_UP: KeyCode = KeyCode(38);
    /// Right arrow.
    pub const ARROW_RIGHT: KeyCode = KeyCode(39);
    /// Down arrow.
    pub const ARROW_DOWN: KeyCode = KeyCode(40);

    /// Wraps a raw key code.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw numeric key code.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Sprite identifiers resolved to drawable images by presentation adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// Enemy bug crawling along a lane.
    EnemyBug,
    /// Player character.
    CharBoy,
    /// Water tile used for the top board row.
    WaterBlock,
    /// Stone tile used for the lane rows.
    StoneBlock,
    /// Grass tile used for the bottom board rows.
    GrassBlock,
}

impl SpriteKey {
    /// Every sprite key in canonical load order.
    pub const ALL: [SpriteKey; 5] = [
        Self::EnemyBug,
        Self::CharBoy,
        Self::WaterBlock,
        Self::StoneBlock,
        Self::GrassBlock,
    ];

    /// Asset key the host resolves to an image.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::EnemyBug => "images/enemy-bug.png",
            Self::CharBoy => "images/char-boy.png",
            Self::WaterBlock => "images/water-block.png",
            Self::StoneBlock => "images/stone-block.png",
            Self::GrassBlock => "images/grass-block.png",
        }
    }

    /// Name used for the sprite in manifests.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnemyBug => "EnemyBug",
            Self::CharBoy => "CharBoy",
            Self::WaterBlock => "WaterBlock",
            Self::StoneBlock => "StoneBlock",
            Self::GrassBlock => "GrassBlock",
        }
    }

    /// Parses a manifest name back into a sprite key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Drawing capability injected into render passes.
///
/// Implementations resolve the sprite key to an image and draw it with its
/// top-left corner at the provided position.
pub trait Canvas {
    /// Draws the sprite at the provided position.
    fn draw_sprite(&mut self, sprite: SpriteKey, position: Position);
}

/// Per-direction thresholds past which the player may not move further.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBounds {
    /// Moving left is refused while `x` is below this value.
    pub min_x: f32,
    /// Moving right is refused while `x` is above this value.
    pub max_x: f32,
    /// Moving up is refused while `y` is below this value.
    pub min_y: f32,
    /// Moving down is refused while `y` is above this value.
    pub max_y: f32,
}

impl PlayerBounds {
    /// Reports whether a move in `direction` from `position` stays on the board.
    #[must_use]
    pub fn permits(&self, position: Position, direction: Direction) -> bool {
        match direction {
            Direction::Up => position.y >= self.min_y,
            Direction::Down => position.y <= self.max_y,
            Direction::Left => position.x >= self.min_x,
            Direction::Right => position.x <= self.max_x,
        }
    }
}

/// Half-open range `[min, max)` that enemy speeds are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    /// Inclusive lower bound in units per second.
    pub min: f32,
    /// Exclusive upper bound in units per second.
    pub max: f32,
}

impl SpeedRange {
    /// Reports whether the speed lies inside the range.
    #[must_use]
    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed < self.max
    }

    /// Reports whether the range admits at least one value.
    ///
    /// A NaN bound makes the range empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.partial_cmp(&self.max) != Some(Ordering::Less)
    }
}

/// Fixed board geometry shared by entities, the factory and presentation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridGeometry {
    /// Horizontal distance covered by a single player step.
    pub cell_width: f32,
    /// Vertical distance covered by a single player step.
    pub cell_height: f32,
    /// Cell the player occupies when a session starts.
    pub player_start: Position,
    /// Gate thresholds applied to player input.
    pub player_bounds: PlayerBounds,
    /// Off-screen-left x used when enemies spawn or recycle.
    pub enemy_spawn_x: f32,
    /// Enemies whose x exceeds this value recycle on their next update.
    pub enemy_recycle_x: f32,
    /// Range enemy speeds are drawn from.
    pub enemy_speed: SpeedRange,
    /// Vertical coordinate of lanes one, two and three.
    pub lane_ys: [f32; LANE_COUNT as usize],
    /// Width of the visible board.
    pub canvas_width: f32,
    /// Height of the visible board.
    pub canvas_height: f32,
}

impl GridGeometry {
    /// Geometry of the classic five-column, six-row board.
    pub const CLASSIC: GridGeometry = GridGeometry {
        cell_width: 101.0,
        cell_height: 82.0,
        player_start: Position::new(200.0, 400.0),
        player_bounds: PlayerBounds {
            min_x: 80.0,
            max_x: 400.0,
            min_y: 40.0,
            max_y: 320.0,
        },
        enemy_spawn_x: -100.0,
        enemy_recycle_x: 500.0,
        enemy_speed: SpeedRange {
            min: 200.0,
            max: 500.0,
        },
        lane_ys: [60.0, 145.0, 230.0],
        canvas_width: 505.0,
        canvas_height: 606.0,
    };

    /// Vertical coordinate assigned to enemies spawned on `lane`.
    #[must_use]
    pub const fn lane_y(&self, lane: Lane) -> f32 {
        self.lane_ys[lane.slot()]
    }

    /// Displacement applied by a single move in `direction`.
    #[must_use]
    pub fn step(&self, direction: Direction) -> (f32, f32) {
        match direction {
            Direction::Up => (0.0, -self.cell_height),
            Direction::Down => (0.0, self.cell_height),
            Direction::Left => (-self.cell_width, 0.0),
            Direction::Right => (self.cell_width, 0.0),
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current position of the enemy's sprite.
    pub position: Position,
    /// Current speed in units per second.
    pub speed: f32,
}

/// Read-only snapshot describing all enemies on the board.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}
