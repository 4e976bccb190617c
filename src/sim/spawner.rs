//! Timed, randomized spawning of obstacles and coins
//!
//! Each kind has its own timer. When a timer reaches its threshold it resets
//! to zero, draws the next threshold, and asks the pool for one slot. A long
//! frame that crosses several thresholds still spawns a single entity.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::{SlotHandle, SlotPool};
use super::state::{Arena, Coin, Obstacle, ObstacleVariant, Player};
use crate::consts::{OBSTACLE_SIZES, SPAWN_HEIGHT};
use crate::tuning::{SpawnInterval, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Obstacle,
    Coin,
}

/// Accumulating countdown with a randomized threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds accumulated since the last expiry
    pub elapsed: f32,
    /// Seconds required for the next expiry
    pub threshold: f32,
    interval: SpawnInterval,
}

impl SpawnTimer {
    pub fn new(interval: SpawnInterval) -> Self {
        Self {
            elapsed: 0.0,
            threshold: interval.first_secs,
            interval,
        }
    }

    /// Accumulate `dt`; returns true once when the threshold is reached
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.elapsed += dt;
        if self.elapsed < self.threshold {
            return false;
        }
        self.elapsed = 0.0;
        self.threshold = self.interval.sample(rng);
        true
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.threshold = self.interval.first_secs;
    }
}

/// What a spawner tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub obstacle: Option<SlotHandle>,
    pub coin: Option<SlotHandle>,
    /// Kinds whose timer fired while their pool was full
    pub obstacle_dropped: bool,
    pub coin_dropped: bool,
}

/// Obstacle and coin timers plus spawn placement rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacles: SpawnTimer,
    pub coins: SpawnTimer,
    spawn_distance: f32,
    coin_radius: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: SpawnTimer::new(tuning.obstacle_interval),
            coins: SpawnTimer::new(tuning.coin_interval),
            spawn_distance: tuning.spawn_distance,
            coin_radius: tuning.coin_radius,
        }
    }

    pub fn reset(&mut self) {
        self.obstacles.reset();
        self.coins.reset();
    }

    /// Advance both timers and activate at most one entity of each kind
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        player: &Player,
        arena: &Arena,
        obstacles: &mut SlotPool<Obstacle>,
        coins: &mut SlotPool<Coin>,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        if self.obstacles.tick(dt, rng) {
            let position = self.spawn_point(rng, player, arena);
            let variant = ObstacleVariant::ALL[rng.random_range(0..ObstacleVariant::ALL.len())];
            let size = OBSTACLE_SIZES[rng.random_range(0..OBSTACLE_SIZES.len())];
            report.obstacle = obstacles.try_activate(Obstacle {
                position,
                size,
                variant,
            });
            report.obstacle_dropped = report.obstacle.is_none();
            if report.obstacle_dropped {
                log::trace!("Obstacle pool full, spawn dropped");
            }
        }

        if self.coins.tick(dt, rng) {
            let position = self.spawn_point(rng, player, arena);
            report.coin = coins.try_activate(Coin {
                position,
                radius: self.coin_radius,
            });
            report.coin_dropped = report.coin.is_none();
            if report.coin_dropped {
                log::trace!("Coin pool full, spawn dropped");
            }
        }

        report
    }

    /// Random lane inside the corridor, a fixed distance ahead of the player
    fn spawn_point<R: Rng + ?Sized>(&self, rng: &mut R, player: &Player, arena: &Arena) -> Vec3 {
        let (lo, hi) = arena.corridor();
        let x = if hi > lo { rng.random_range(lo..hi) } else { lo };
        Vec3::new(x, SPAWN_HEIGHT, player.position.z - self.spawn_distance)
    }
}
