use std::time::Duration;

use crossing_core::{EnemyId, GridGeometry, Lane, Position};
use crossing_world::{make_enemy, make_roster, Enemy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DELTAS_MS: [u64; 6] = [0, 1, 16, 17, 33, 250];

#[test]
fn update_advances_by_speed_times_delta() {
    let geometry = GridGeometry::CLASSIC;
    let mut rng = ChaCha8Rng::seed_from_u64(0x1234);

    for start_x in [-100.0_f32, 0.0, 137.5, 499.0, 500.0] {
        for millis in DELTAS_MS {
            let dt = Duration::from_millis(millis);
            let mut enemy = Enemy::new(EnemyId::new(0), Position::new(start_x, 145.0), 321.0);

            let recycled = enemy.update(dt, &geometry, &mut rng);

            assert!(!recycled, "x = {start_x} must not recycle");
            assert_eq!(enemy.position().x, start_x + 321.0 * dt.as_secs_f32());
            assert_eq!(enemy.position().y, 145.0);
            assert_eq!(enemy.speed(), 321.0);
        }
    }
}

#[test]
fn enemies_past_the_right_bound_recycle_before_integrating() {
    let geometry = GridGeometry::CLASSIC;
    let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);

    for start_x in [500.01_f32, 501.0, 750.0, 10_000.0] {
        for millis in DELTAS_MS {
            let dt = Duration::from_millis(millis);
            let mut enemy = Enemy::new(EnemyId::new(1), Position::new(start_x, 60.0), 999.0);

            let recycled = enemy.update(dt, &geometry, &mut rng);

            assert!(recycled, "x = {start_x} must recycle");
            let speed = enemy.speed();
            assert!(
                (200.0..500.0).contains(&speed),
                "redrawn speed {speed} outside [200, 500)"
            );
            assert_eq!(enemy.position().x, -100.0 + speed * dt.as_secs_f32());
            assert_eq!(enemy.position().y, 60.0);
        }
    }
}

#[test]
fn factory_assigns_lane_rows_and_off_screen_column() {
    let geometry = GridGeometry::CLASSIC;
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let cases = [(1, 60.0), (2, 145.0), (3, 230.0), (0, 230.0), (4, 230.0), (u32::MAX, 230.0)];

    for (lane, expected_y) in cases {
        let enemy = make_enemy(EnemyId::new(lane), Lane::new(lane), &geometry, &mut rng);
        assert_eq!(enemy.position(), Position::new(-100.0, expected_y), "lane {lane}");
        assert!(
            (200.0..500.0).contains(&enemy.speed()),
            "lane {lane} speed {} outside [200, 500)",
            enemy.speed()
        );
        assert_eq!(enemy.id(), EnemyId::new(lane));
    }
}

#[test]
fn speeds_cover_the_configured_range_over_many_draws() {
    let geometry = GridGeometry::CLASSIC;
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut slowest = f32::MAX;
    let mut fastest = f32::MIN;

    for index in 0..2_000 {
        let enemy = make_enemy(EnemyId::new(index), Lane::new(2), &geometry, &mut rng);
        slowest = slowest.min(enemy.speed());
        fastest = fastest.max(enemy.speed());
    }

    assert!(slowest >= 200.0 && slowest < 250.0, "slowest draw {slowest}");
    assert!(fastest < 500.0 && fastest > 450.0, "fastest draw {fastest}");
}

#[test]
fn recycled_enemies_keep_crossing_forever() {
    let geometry = GridGeometry::CLASSIC;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut roster = make_roster(&geometry, &mut rng);
    let dt = Duration::from_millis(16);
    let mut recycles = 0;

    for _ in 0..5_000 {
        for enemy in &mut roster {
            if enemy.update(dt, &geometry, &mut rng) {
                recycles += 1;
            }
            let x = enemy.position().x;
            assert!(x >= -100.0, "enemy drifted left of the spawn column: {x}");
            assert!(x <= 500.0 + 500.0 * dt.as_secs_f32(), "enemy overshot: {x}");
            assert!((200.0..500.0).contains(&enemy.speed()));
        }
    }

    assert!(recycles > 0, "80 seconds of play must recycle enemies");
}
