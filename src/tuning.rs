//! Data-driven game balance
//!
//! Defaults mirror `consts`; a config file may override any field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Uniform range a spawn timer draws its next threshold from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnInterval {
    /// Threshold used before the first spawn of a run
    pub first_secs: f32,
    pub min_secs: f32,
    pub max_secs: f32,
}

impl SpawnInterval {
    pub const fn new(first_secs: f32, min_secs: f32, max_secs: f32) -> Self {
        Self {
            first_secs,
            min_secs,
            max_secs,
        }
    }

    /// Draw the next threshold uniformly from `[min_secs, max_secs]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max_secs <= self.min_secs {
            self.min_secs
        } else {
            rng.random_range(self.min_secs..=self.max_secs)
        }
    }

    fn validated(mut self, label: &str) -> Self {
        if !(self.min_secs > 0.0) {
            log::warn!("{label}: min interval {} is not positive, using 0.1", self.min_secs);
            self.min_secs = 0.1;
        }
        if self.max_secs < self.min_secs {
            log::warn!(
                "{label}: max interval {} below min {}, swapping",
                self.max_secs,
                self.min_secs
            );
            std::mem::swap(&mut self.min_secs, &mut self.max_secs);
            self.min_secs = self.min_secs.max(0.1);
        }
        if !(self.first_secs >= 0.0) {
            self.first_secs = self.min_secs;
        }
        self
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_speed: f32,
    pub player_radius: f32,

    // === Pools ===
    pub obstacle_capacity: usize,
    pub coin_capacity: usize,

    // === Spawning ===
    pub obstacle_interval: SpawnInterval,
    pub coin_interval: SpawnInterval,
    /// How far ahead of the player new entities appear
    pub spawn_distance: f32,
    pub recycle_margin: f32,

    // === Scoring ===
    pub coin_radius: f32,
    pub coin_score: u32,
    pub distance_per_point: f32,
    pub distance_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,

            obstacle_capacity: OBSTACLE_POOL_CAPACITY,
            coin_capacity: COIN_POOL_CAPACITY,

            obstacle_interval: SpawnInterval::new(
                FIRST_SPAWN_SECS,
                OBSTACLE_SPAWN_MIN_SECS,
                OBSTACLE_SPAWN_MAX_SECS,
            ),
            coin_interval: SpawnInterval::new(
                FIRST_SPAWN_SECS,
                COIN_SPAWN_MIN_SECS,
                COIN_SPAWN_MAX_SECS,
            ),
            spawn_distance: SPAWN_DISTANCE,
            recycle_margin: RECYCLE_MARGIN,

            coin_radius: COIN_RADIUS,
            coin_score: COIN_SCORE,
            distance_per_point: DISTANCE_PER_POINT,
            distance_score: DISTANCE_SCORE,
        }
    }
}

impl Tuning {
    /// Repair values the simulation cannot run with, logging each fix
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.obstacle_capacity == 0 {
            log::warn!("obstacle_capacity must be at least 1, using {}", defaults.obstacle_capacity);
            self.obstacle_capacity = defaults.obstacle_capacity;
        }
        if self.coin_capacity == 0 {
            log::warn!("coin_capacity must be at least 1, using {}", defaults.coin_capacity);
            self.coin_capacity = defaults.coin_capacity;
        }
        if !(self.player_speed >= 0.0) {
            log::warn!("player_speed {} is invalid, using {}", self.player_speed, defaults.player_speed);
            self.player_speed = defaults.player_speed;
        }
        if !(self.player_radius > 0.0) {
            self.player_radius = defaults.player_radius;
        }
        if !(self.coin_radius > 0.0) {
            self.coin_radius = defaults.coin_radius;
        }
        if !(self.spawn_distance > 0.0) {
            log::warn!("spawn_distance {} is invalid, using {}", self.spawn_distance, defaults.spawn_distance);
            self.spawn_distance = defaults.spawn_distance;
        }
        if !(self.recycle_margin >= 0.0) {
            self.recycle_margin = defaults.recycle_margin;
        }
        if !(self.distance_per_point > 0.0) {
            log::warn!(
                "distance_per_point {} is invalid, using {}",
                self.distance_per_point,
                defaults.distance_per_point
            );
            self.distance_per_point = defaults.distance_per_point;
        }

        self.obstacle_interval = self.obstacle_interval.validated("obstacle_interval");
        self.coin_interval = self.coin_interval.validated("coin_interval");
        self
    }
}
