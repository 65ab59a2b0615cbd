//! Enemy state and the per-tick motion rule.

use std::time::Duration;

use crossing_core::{Canvas, EnemyId, EnemySnapshot, GridGeometry, Position, SpeedRange, SpriteKey};
use rand::Rng;

/// Enemy crawling left to right along a single lane.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    position: Position,
    speed: f32,
    sprite: SpriteKey,
}

impl Enemy {
    /// Creates an enemy at the provided position travelling at `speed` units per second.
    #[must_use]
    pub const fn new(id: EnemyId, position: Position, speed: f32) -> Self {
        Self {
            id,
            position,
            speed,
            sprite: SpriteKey::EnemyBug,
        }
    }

    /// Identifier assigned to the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Current position of the enemy's sprite.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current speed in units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Sprite drawn for the enemy.
    #[must_use]
    pub const fn sprite(&self) -> SpriteKey {
        self.sprite
    }

    /// Advances the enemy by `dt`, recycling it first when it left the board.
    ///
    /// An enemy whose x exceeds the recycle threshold is moved back to the
    /// off-screen spawn column and given a fresh speed before integrating, so
    /// the first frame after a recycle already uses the new speed. Returns
    /// `true` when a recycle happened.
    pub fn update<R>(&mut self, dt: Duration, geometry: &GridGeometry, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let recycled = self.position.x > geometry.enemy_recycle_x;
        if recycled {
            self.position.x = geometry.enemy_spawn_x;
            self.speed = draw_speed(geometry.enemy_speed, rng);
        }

        self.position.x += self.speed * dt.as_secs_f32();
        recycled
    }

    /// Draws the enemy through the provided canvas.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(self.sprite, self.position);
    }

    /// Captures an immutable snapshot of the enemy.
    #[must_use]
    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.position,
            speed: self.speed,
        }
    }
}

/// Draws a speed uniformly from the half-open range.
///
/// A degenerate range collapses to its lower bound instead of panicking.
pub(crate) fn draw_speed<R>(range: SpeedRange, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    if range.is_empty() {
        return range.min;
    }
    rng.gen_range(range.min..range.max)
}
