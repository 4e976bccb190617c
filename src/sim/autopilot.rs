//! Idle/demo autopilot
//!
//! Chooses a steering direction from the current world: dodge the closest
//! obstacle ahead in the player's lane, otherwise chase the closest coin
//! ahead, otherwise drift back toward the corridor center. It only produces
//! input; the rules of the simulation are untouched.

use super::state::{Obstacle, Steer, WorldState};

/// How far ahead (along -Z) obstacles are considered threats
const OBSTACLE_LOOKAHEAD: f32 = 40.0;
/// How far ahead coins are worth chasing
const COIN_LOOKAHEAD: f32 = 80.0;
/// Extra lateral room kept around obstacles and walls
const CLEARANCE: f32 = 0.5;
/// No steering when this close to the target lane (prevents jitter)
const DEAD_ZONE: f32 = 0.2;

pub fn steer(world: &WorldState) -> Steer {
    let player = &world.player;
    let x = player.position.x;
    let reach = player.radius + CLEARANCE;

    let min_x = world.arena.left.bounds().max.x + reach;
    let max_x = world.arena.right.bounds().min.x - reach;

    let threats: Vec<&Obstacle> = world
        .obstacles
        .iter_active()
        .map(|(_, o)| o)
        .filter(|o| {
            let b = o.bounds();
            b.min.z <= player.position.z + player.radius
                && b.max.z >= player.position.z - OBSTACLE_LOOKAHEAD
        })
        .collect();

    let blocked = |lane: f32| threats.iter().any(|o| blocked_by(o, lane, reach));

    // Closest threat in our lane (largest z is nearest to the player)
    let danger = threats
        .iter()
        .filter(|o| blocked_by(o, x, reach))
        .max_by(|a, b| a.position.z.total_cmp(&b.position.z));

    if let Some(obstacle) = danger {
        let b = obstacle.bounds();
        let mut escapes = [b.min.x - reach - DEAD_ZONE, b.max.x + reach + DEAD_ZONE];
        escapes.sort_by(|l, r| (l - x).abs().total_cmp(&(r - x).abs()));

        let target = escapes
            .iter()
            .copied()
            .find(|&lane| lane >= min_x && lane <= max_x && !blocked(lane))
            .or_else(|| escapes.iter().copied().find(|&lane| lane >= min_x && lane <= max_x))
            .unwrap_or(0.0);
        return toward(x, target);
    }

    let coin = world
        .coins
        .iter_active()
        .map(|(_, c)| c)
        .filter(|c| {
            let ahead = player.position.z - c.position.z;
            (0.0..=COIN_LOOKAHEAD).contains(&ahead)
                && c.position.x >= min_x
                && c.position.x <= max_x
                && !blocked(c.position.x)
        })
        .max_by(|a, b| a.position.z.total_cmp(&b.position.z));

    match coin {
        Some(coin) => toward(x, coin.position.x),
        None => toward(x, 0.0),
    }
}

fn blocked_by(obstacle: &Obstacle, lane: f32, reach: f32) -> bool {
    let b = obstacle.bounds();
    lane >= b.min.x - reach && lane <= b.max.x + reach
}

fn toward(current: f32, target: f32) -> Steer {
    let delta = target - current;
    if delta.abs() <= DEAD_ZONE {
        Steer::None
    } else if delta > 0.0 {
        Steer::Right
    } else {
        Steer::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OBSTACLE_SIZES;
    use crate::sim::state::{Coin, ObstacleVariant};
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn world() -> WorldState {
        WorldState::new(5, Tuning::default())
    }

    #[test]
    fn test_centered_player_idles() {
        assert_eq!(steer(&world()), Steer::None);
    }

    #[test]
    fn test_drifts_back_to_center() {
        let mut w = world();
        w.player.position.x = 4.0;
        assert_eq!(steer(&w), Steer::Left);
        w.player.position.x = -4.0;
        assert_eq!(steer(&w), Steer::Right);
    }

    #[test]
    fn test_dodges_obstacle_in_lane() {
        let mut w = world();
        w.player.position.x = 1.0;
        let ahead = w.player.position - Vec3::Z * 20.0;
        w.obstacles
            .try_activate(Obstacle {
                position: Vec3::new(0.0, 1.0, ahead.z),
                size: OBSTACLE_SIZES[0],
                variant: ObstacleVariant::Blue,
            })
            .unwrap();

        // Right edge (3.25 with clearance) is nearer than the left one
        assert_eq!(steer(&w), Steer::Right);
    }

    #[test]
    fn test_ignores_obstacle_behind() {
        let mut w = world();
        let behind = w.player.position + Vec3::Z * 5.0;
        w.obstacles
            .try_activate(Obstacle {
                position: behind,
                size: OBSTACLE_SIZES[0],
                variant: ObstacleVariant::Blue,
            })
            .unwrap();
        assert_eq!(steer(&w), Steer::None);
    }

    #[test]
    fn test_chases_coin() {
        let mut w = world();
        let z = w.player.position.z - 30.0;
        w.coins
            .try_activate(Coin {
                position: Vec3::new(-6.0, 1.0, z),
                radius: 0.5,
            })
            .unwrap();
        assert_eq!(steer(&w), Steer::Left);
    }
}
