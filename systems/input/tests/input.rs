use crossing_core::{Command, Direction, Event, KeyCode, MoveRejection, Position};
use crossing_system_input::InputRouter;
use crossing_world::{self as world, query, World};

fn press(world: &mut World, router: &InputRouter, keys: &[KeyCode]) -> Vec<Event> {
    let mut commands = Vec::new();
    router.handle(keys, &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn emits_one_command_per_released_key_in_order() {
    let router = InputRouter;
    let mut commands = Vec::new();

    router.handle(
        &[KeyCode::ARROW_UP, KeyCode::new(32), KeyCode::ARROW_LEFT],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::MovePlayer {
                direction: Some(Direction::Up),
            },
            Command::MovePlayer { direction: None },
            Command::MovePlayer {
                direction: Some(Direction::Left),
            },
        ]
    );
}

#[test]
fn arrow_keys_walk_the_player_across_the_board() {
    let router = InputRouter;
    let mut world = World::new();

    let _ = press(
        &mut world,
        &router,
        &[
            KeyCode::ARROW_UP,
            KeyCode::ARROW_UP,
            KeyCode::ARROW_LEFT,
            KeyCode::ARROW_RIGHT,
        ],
    );
    assert_eq!(query::player_position(&world), Position::new(200.0, 236.0));

    let _ = press(&mut world, &router, &[KeyCode::ARROW_DOWN]);
    assert_eq!(query::player_position(&world), Position::new(200.0, 318.0));
}

#[test]
fn unmapped_keys_leave_the_player_in_place() {
    let router = InputRouter;
    let mut world = World::new();
    let before = query::player_position(&world);

    let events = press(&mut world, &router, &[KeyCode::new(65), KeyCode::new(13)]);

    assert_eq!(query::player_position(&world), before);
    assert!(events.iter().all(|event| matches!(
        event,
        Event::PlayerMoveRejected {
            direction: None,
            reason: MoveRejection::UnrecognizedDirection,
        }
    )));
    assert_eq!(events.len(), 2);
}
