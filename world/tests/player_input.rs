use crossing_core::{Command, Direction, Event, GridGeometry, MoveRejection, Position};
use crossing_world::{self as world, query, MoveOutcome, Player, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LATTICE_XS: [f32; 5] = [-2.0, 99.0, 200.0, 301.0, 402.0];
const LATTICE_YS: [f32; 6] = [-10.0, 72.0, 154.0, 236.0, 318.0, 400.0];

fn move_player(world: &mut World, direction: Option<Direction>) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::MovePlayer { direction }, &mut events);
    events
}

#[test]
fn scripted_walk_matches_expected_positions() {
    let mut world = World::new();
    let script = [
        (Direction::Up, Position::new(200.0, 318.0)),
        (Direction::Up, Position::new(200.0, 236.0)),
        (Direction::Left, Position::new(99.0, 236.0)),
        (Direction::Right, Position::new(200.0, 236.0)),
        (Direction::Down, Position::new(200.0, 318.0)),
        (Direction::Down, Position::new(200.0, 400.0)),
        (Direction::Down, Position::new(200.0, 400.0)),
    ];

    for (step, (direction, expected)) in script.into_iter().enumerate() {
        let _ = move_player(&mut world, Some(direction));
        assert_eq!(
            query::player_position(&world),
            expected,
            "step {step} ({direction:?})"
        );
    }
}

#[test]
fn blocked_directions_are_idempotent() {
    let geometry = GridGeometry::CLASSIC;
    let corners = [
        (Position::new(-2.0, -10.0), [Direction::Up, Direction::Left]),
        (Position::new(402.0, -10.0), [Direction::Up, Direction::Right]),
        (Position::new(-2.0, 400.0), [Direction::Down, Direction::Left]),
        (Position::new(402.0, 400.0), [Direction::Down, Direction::Right]),
    ];

    for (corner, blocked) in corners {
        let mut player = Player::new(corner);
        for direction in blocked {
            for _ in 0..25 {
                let outcome = player.handle_input(Some(direction), &geometry);
                assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::OutOfBounds));
                assert_eq!(player.position(), corner);
            }
        }
    }
}

#[test]
fn thresholds_follow_the_current_position() {
    let geometry = GridGeometry::CLASSIC;
    let cases = [
        (Position::new(200.0, 39.0), Direction::Up, None),
        (Position::new(200.0, 40.0), Direction::Up, Some(Position::new(200.0, -42.0))),
        (Position::new(200.0, 122.0), Direction::Up, Some(Position::new(200.0, 40.0))),
        (Position::new(200.0, 321.0), Direction::Down, None),
        (Position::new(200.0, 320.0), Direction::Down, Some(Position::new(200.0, 402.0))),
        (Position::new(200.0, 236.0), Direction::Down, Some(Position::new(200.0, 318.0))),
        (Position::new(79.0, 236.0), Direction::Left, None),
        (Position::new(80.0, 236.0), Direction::Left, Some(Position::new(-21.0, 236.0))),
        (Position::new(401.0, 236.0), Direction::Right, None),
        (Position::new(400.0, 236.0), Direction::Right, Some(Position::new(501.0, 236.0))),
    ];

    for (start, direction, expected) in cases {
        let mut player = Player::new(start);
        let outcome = player.handle_input(Some(direction), &geometry);
        match expected {
            Some(to) => {
                assert_eq!(
                    outcome,
                    MoveOutcome::Moved {
                        direction,
                        from: start,
                        to,
                    },
                    "{direction:?} from {start:?}"
                );
                assert_eq!(player.position(), to);
            }
            None => {
                assert_eq!(
                    outcome,
                    MoveOutcome::Rejected(MoveRejection::OutOfBounds),
                    "{direction:?} from {start:?}"
                );
                assert_eq!(player.position(), start);
            }
        }
    }
}

#[test]
fn random_walks_stay_on_the_board_lattice() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x0bad_cafe);

    for _ in 0..64 {
        let mut world = World::new();
        for _ in 0..200 {
            let direction = match rng.gen_range(0..5) {
                0 => Some(Direction::Up),
                1 => Some(Direction::Down),
                2 => Some(Direction::Left),
                3 => Some(Direction::Right),
                _ => None,
            };
            let _ = move_player(&mut world, direction);

            let position = query::player_position(&world);
            assert!(LATTICE_XS.contains(&position.x), "x left the lattice: {position:?}");
            assert!(LATTICE_YS.contains(&position.y), "y left the lattice: {position:?}");
        }
    }
}

#[test]
fn every_lattice_cell_is_reachable_from_the_start() {
    let mut world = World::new();
    let mut visited = Vec::new();

    for _ in 0..5 {
        let _ = move_player(&mut world, Some(Direction::Up));
    }
    for _ in 0..2 {
        let _ = move_player(&mut world, Some(Direction::Left));
    }

    for (row, _) in LATTICE_YS.iter().enumerate() {
        let sweep = if row % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        visited.push(query::player_position(&world));
        for _ in 0..LATTICE_XS.len() - 1 {
            let _ = move_player(&mut world, Some(sweep));
            visited.push(query::player_position(&world));
        }
        let _ = move_player(&mut world, Some(Direction::Down));
    }

    for y in LATTICE_YS {
        for x in LATTICE_XS {
            assert!(
                visited.contains(&Position::new(x, y)),
                "cell ({x}, {y}) never visited"
            );
        }
    }
}

#[test]
fn unrecognized_requests_leave_the_player_in_place() {
    let mut world = World::new();
    let before = query::player_position(&world);

    let events = move_player(&mut world, None);

    assert_eq!(query::player_position(&world), before);
    assert_eq!(
        events,
        vec![Event::PlayerMoveRejected {
            direction: None,
            reason: MoveRejection::UnrecognizedDirection,
        }]
    );
}
