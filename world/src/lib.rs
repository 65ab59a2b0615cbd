#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Crossing.
//!
//! The [`World`] owns the enemy roster, the single player and the random
//! number generator used for speed draws. It is mutated exclusively through
//! [`apply`], read through the [`query`] module and drawn through [`render`].

mod enemy;
mod player;
mod spawning;

use crossing_core::{Canvas, Command, Event, GridGeometry, WELCOME_BANNER};
use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use enemy::Enemy;
pub use player::{MoveOutcome, Player};
pub use spawning::{make_enemy, make_roster};

/// Seed used when a session does not request a specific one.
pub const DEFAULT_SEED: u64 = 0x2f6b_91c4_0d3e_a517;

/// Parameters required to start a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Board geometry shared by every entity.
    pub geometry: GridGeometry,
    /// Seed for the speed generator.
    pub seed: u64,
}

impl WorldConfig {
    /// Creates a configuration from explicit geometry and seed.
    #[must_use]
    pub const fn new(geometry: GridGeometry, seed: u64) -> Self {
        Self { geometry, seed }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(GridGeometry::CLASSIC, DEFAULT_SEED)
    }
}

/// Represents the authoritative Crossing world state for one session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    geometry: GridGeometry,
    seed: u64,
    rng: ChaCha8Rng,
    enemies: Vec<Enemy>,
    player: Player,
    tick_index: u64,
}

impl World {
    /// Creates a world on the classic board using the default seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a world from the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let WorldConfig { geometry, seed } = config;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let enemies = make_roster(&geometry, &mut rng);
        info!(
            "session started with {} enemies (seed {seed:#x})",
            enemies.len()
        );

        Self {
            banner: WELCOME_BANNER,
            player: Player::at_start(&geometry),
            geometry,
            seed,
            rng,
            enemies,
            tick_index: 0,
        }
    }

    fn restart(&mut self) {
        self.enemies = make_roster(&self.geometry, &mut self.rng);
        self.player = Player::at_start(&self.geometry);
        self.tick_index = 0;
        info!("session restarted");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            trace!("tick {} advancing {dt:?}", world.tick_index);
            out_events.push(Event::TimeAdvanced { dt });

            let World {
                geometry,
                rng,
                enemies,
                player,
                ..
            } = world;
            for enemy in enemies.iter_mut() {
                if enemy.update(dt, geometry, rng) {
                    debug!(
                        "enemy {} recycled with speed {:.1}",
                        enemy.id().get(),
                        enemy.speed()
                    );
                    out_events.push(Event::EnemyRecycled {
                        enemy: enemy.id(),
                        speed: enemy.speed(),
                    });
                }
            }
            player.update(dt);
        }
        Command::MovePlayer { direction } => {
            match world.player.handle_input(direction, &world.geometry) {
                MoveOutcome::Moved {
                    direction,
                    from,
                    to,
                } => {
                    debug!(
                        "player moved {} from ({}, {}) to ({}, {})",
                        direction.name(),
                        from.x,
                        from.y,
                        to.x,
                        to.y
                    );
                    out_events.push(Event::PlayerMoved {
                        direction,
                        from,
                        to,
                    });
                }
                MoveOutcome::Rejected(reason) => {
                    debug!("player move {direction:?} discarded: {reason:?}");
                    out_events.push(Event::PlayerMoveRejected { direction, reason });
                }
            }
        }
        Command::RestartSession => {
            world.restart();
            out_events.push(Event::SessionRestarted);
        }
    }
}

/// Draws every enemy in identifier order, then the player.
pub fn render(world: &World, canvas: &mut dyn Canvas) {
    for enemy in &world.enemies {
        enemy.render(canvas);
    }
    world.player.render(canvas);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use crossing_core::{EnemyView, GridGeometry, Position};

    use super::{Enemy, Player, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the board geometry.
    #[must_use]
    pub fn geometry(world: &World) -> &GridGeometry {
        &world.geometry
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Current position of the player.
    #[must_use]
    pub fn player_position(world: &World) -> Position {
        world.player.position()
    }

    /// Provides read-only access to the enemies in identifier order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Captures a read-only view of every enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(Enemy::snapshot).collect())
    }

    /// Number of ticks processed since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Seed the session's speed generator was created from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }
}
