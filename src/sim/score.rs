//! In-run score: distance travelled plus coin bonuses
//!
//! Distance points come from a marker on the Z axis, not from elapsed time,
//! so a paused clock cannot earn or lose points.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    /// Z coordinate of the last distance award
    marker: f32,
    distance_per_point: f32,
    distance_score: u32,
    coin_score: u32,
}

impl ScoreTracker {
    pub fn new(tuning: &Tuning, origin_z: f32) -> Self {
        Self {
            score: 0,
            marker: origin_z,
            distance_per_point: tuning.distance_per_point,
            distance_score: tuning.distance_score,
            coin_score: tuning.coin_score,
        }
    }

    pub fn reset(&mut self, origin_z: f32) {
        self.score = 0;
        self.marker = origin_z;
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn marker(&self) -> f32 {
        self.marker
    }

    /// Credit one coin; returns the new score
    pub fn add_coin(&mut self) -> u32 {
        self.score = self.score.saturating_add(self.coin_score);
        self.score
    }

    /// Award a point for every full `distance_per_point` the player has moved
    /// forward (toward -Z) past the marker. Returns the points awarded.
    pub fn update_distance(&mut self, player_z: f32) -> u32 {
        if !(self.distance_per_point > 0.0) {
            return 0;
        }
        let mut awarded = 0u32;
        while player_z <= self.marker - self.distance_per_point {
            self.marker -= self.distance_per_point;
            awarded = awarded.saturating_add(self.distance_score);
        }
        self.score = self.score.saturating_add(awarded);
        awarded
    }
}
