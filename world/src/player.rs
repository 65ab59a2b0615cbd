//! Player state, discrete moves and the input gate.

use std::time::Duration;

use crossing_core::{Canvas, Direction, GridGeometry, MoveRejection, Position, SpriteKey};

/// Result of routing a single move request through [`Player::handle_input`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The player snapped one whole cell.
    Moved {
        /// Direction of travel.
        direction: Direction,
        /// Position before the move.
        from: Position,
        /// Position after the move.
        to: Position,
    },
    /// The request was discarded and the position left untouched.
    Rejected(MoveRejection),
}

/// The single player-controlled character.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Position,
    sprite: SpriteKey,
}

impl Player {
    /// Creates a player at the provided position.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            sprite: SpriteKey::CharBoy,
        }
    }

    /// Creates a player on the geometry's start cell.
    #[must_use]
    pub const fn at_start(geometry: &GridGeometry) -> Self {
        Self::new(geometry.player_start)
    }

    /// Current position of the player's sprite.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Sprite drawn for the player.
    #[must_use]
    pub const fn sprite(&self) -> SpriteKey {
        self.sprite
    }

    /// Per-tick hook. The player only moves in whole cells on input, so time
    /// passing leaves it where it is.
    pub fn update(&mut self, _dt: Duration) {}

    /// Gated entry point for movement requests.
    ///
    /// Unrecognized requests and moves attempted while the player already
    /// sits past the direction's threshold are discarded without touching the
    /// position.
    pub fn handle_input(
        &mut self,
        direction: Option<Direction>,
        geometry: &GridGeometry,
    ) -> MoveOutcome {
        let Some(direction) = direction else {
            return MoveOutcome::Rejected(MoveRejection::UnrecognizedDirection);
        };

        if !geometry.player_bounds.permits(self.position, direction) {
            return MoveOutcome::Rejected(MoveRejection::OutOfBounds);
        }

        let from = self.position;
        self.move_in(direction, geometry);
        MoveOutcome::Moved {
            direction,
            from,
            to: self.position,
        }
    }

    /// Snaps the player one whole cell in `direction`. Performs no clamping.
    pub(crate) fn move_in(&mut self, direction: Direction, geometry: &GridGeometry) {
        let (dx, dy) = geometry.step(direction);
        self.position = self.position.offset(dx, dy);
    }

    /// Draws the player through the provided canvas.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(self.sprite, self.position);
    }
}
