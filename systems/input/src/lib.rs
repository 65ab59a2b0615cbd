#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input routing system translating released keys into player move commands.

use crossing_core::{Command, Direction, KeyCode};
use log::trace;

const KEY_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::ARROW_LEFT, Direction::Left),
    (KeyCode::ARROW_UP, Direction::Up),
    (KeyCode::ARROW_RIGHT, Direction::Right),
    (KeyCode::ARROW_DOWN, Direction::Down),
];

/// Pure system that maps raw key releases onto [`Command::MovePlayer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct InputRouter;

impl InputRouter {
    /// Resolves a raw key code to a direction, or `None` when unmapped.
    #[must_use]
    pub fn route(&self, key: KeyCode) -> Option<Direction> {
        KEY_BINDINGS
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, direction)| *direction)
    }

    /// Emits one move command per released key, preserving release order.
    ///
    /// Unmapped keys are forwarded as unrecognized requests so the world can
    /// discard them.
    pub fn handle(&self, released: &[KeyCode], out: &mut Vec<Command>) {
        for &key in released {
            let direction = self.route(key);
            trace!("key {} routed to {direction:?}", key.get());
            out.push(Command::MovePlayer { direction });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_directions() {
        let router = InputRouter;
        assert_eq!(router.route(KeyCode::new(37)), Some(Direction::Left));
        assert_eq!(router.route(KeyCode::new(38)), Some(Direction::Up));
        assert_eq!(router.route(KeyCode::new(39)), Some(Direction::Right));
        assert_eq!(router.route(KeyCode::new(40)), Some(Direction::Down));
    }

    #[test]
    fn other_keys_are_unmapped() {
        let router = InputRouter;
        for code in [0, 13, 32, 36, 41, 65, 87] {
            assert_eq!(router.route(KeyCode::new(code)), None, "key {code}");
        }
    }
}
