//! Enemy factory assigning lanes and randomized speeds.

use crossing_core::{EnemyId, GridGeometry, Lane, Position};
use rand::Rng;

use crate::enemy::{draw_speed, Enemy};

/// Builds an enemy parked off-screen to the left of `lane`.
///
/// Lane numbers other than one or two fall back to the third lane's row.
pub fn make_enemy<R>(id: EnemyId, lane: Lane, geometry: &GridGeometry, rng: &mut R) -> Enemy
where
    R: Rng + ?Sized,
{
    let position = Position::new(geometry.enemy_spawn_x, geometry.lane_y(lane));
    let speed = draw_speed(geometry.enemy_speed, rng);
    Enemy::new(id, position, speed)
}

/// Builds one enemy per lane, top lane first, with sequential identifiers.
pub fn make_roster<R>(geometry: &GridGeometry, rng: &mut R) -> Vec<Enemy>
where
    R: Rng + ?Sized,
{
    Lane::ALL
        .into_iter()
        .zip(0..)
        .map(|(lane, index)| make_enemy(EnemyId::new(index), lane, geometry, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn roster_covers_every_lane_in_order() {
        let geometry = GridGeometry::CLASSIC;
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let roster = make_roster(&geometry, &mut rng);

        let rows: Vec<f32> = roster.iter().map(|enemy| enemy.position().y).collect();
        let ids: Vec<u32> = roster.iter().map(|enemy| enemy.id().get()).collect();
        assert_eq!(rows, vec![60.0, 145.0, 230.0]);
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
