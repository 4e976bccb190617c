//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`WorldState`].

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::pool::{Pooled, SlotHandle, SlotPool};
use super::score::ScoreTracker;
use super::spawner::{SpawnKind, Spawner};
use crate::consts::*;
use crate::highscores::BestScore;
use crate::tuning::Tuning;

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, waiting for play/scores
    #[default]
    Menu,
    /// A run in progress
    Playing,
    /// Run finished, outcome shown
    Ended,
    /// Best score screen
    ScoreView,
}

/// Discrete UI intents, each true for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuIntent {
    Play,
    Replay,
    Menu,
    Scores,
}

impl SessionPhase {
    /// Phase reached by applying `intent`, or `None` when the intent does
    /// nothing in this phase. Leaving `Playing` only happens through an outcome.
    pub fn after_intent(self, intent: MenuIntent) -> Option<SessionPhase> {
        use MenuIntent as I;
        use SessionPhase as P;
        match (self, intent) {
            (P::Menu, I::Play) | (P::Ended, I::Replay) => Some(P::Playing),
            (P::Ended, I::Menu) | (P::ScoreView, I::Menu) => Some(P::Menu),
            (P::Menu, I::Scores) => Some(P::ScoreView),
            _ => None,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn text(&self) -> &'static str {
        match self {
            Outcome::Win => "You win.",
            Outcome::Lose => "You lose.",
        }
    }
}

/// Lateral steering for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// The player's sphere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Units per second, forward and sideways
    pub speed: f32,
    pub radius: f32,
}

impl Player {
    pub fn new(speed: f32, radius: f32) -> Self {
        Self {
            position: PLAYER_ORIGIN,
            speed,
            radius,
        }
    }

    pub fn reset(&mut self) {
        self.position = PLAYER_ORIGIN;
    }

    /// Run forward (toward -Z) and apply steering
    pub fn advance(&mut self, steer: Steer, dt: f32) {
        let step = self.speed * dt;
        self.position.z -= step;
        match steer {
            Steer::Right => self.position.x += step,
            Steer::Left => self.position.x -= step,
            Steer::None => {}
        }
    }

    /// Where recycled entities wait, well behind the player
    pub fn parking_spot(&self) -> Vec3 {
        self.position + Vec3::Z * PARK_DISTANCE
    }
}

/// Obstacle look, picked at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleVariant {
    #[default]
    Blue,
    DarkBlue,
}

impl ObstacleVariant {
    pub const ALL: [ObstacleVariant; 2] = [ObstacleVariant::Blue, ObstacleVariant::DarkBlue];
}

/// A box the player must dodge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    /// Full extents along each axis
    pub size: Vec3,
    pub variant: ObstacleVariant,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }
}

impl Pooled for Obstacle {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

/// A collectible sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub position: Vec3,
    pub radius: f32,
}

impl Pooled for Coin {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

/// Static box geometry. Bounds are computed on construction and there is no
/// way to move or resize a wall afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    position: Vec3,
    size: Vec3,
    bounds: Aabb,
}

impl Wall {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            size,
            bounds: Aabb::from_center_size(position, size),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// The corridor: two side walls and the goal wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub left: Wall,
    pub right: Wall,
    pub win: Wall,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            left: Wall::new(WALL_LEFT_POSITION, WALL_LIMIT_SIZE),
            right: Wall::new(WALL_RIGHT_POSITION, WALL_LIMIT_SIZE),
            win: Wall::new(WALL_WIN_POSITION, WALL_WIN_SIZE),
        }
    }
}

impl Arena {
    /// Lateral range new entities are spawned in (wall center to wall center)
    pub fn corridor(&self) -> (f32, f32) {
        let a = self.left.position().x;
        let b = self.right.position().x;
        (a.min(b), a.max(b))
    }
}

/// Chase camera, derived from the player every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
}

impl CameraRig {
    pub fn following(player: &Player) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: CAMERA_FOV_Y,
        };
        camera.follow(player);
        camera
    }

    /// Sit behind and above the player, looking at it. The camera stays on the
    /// corridor's center line so steering doesn't swing the view.
    pub fn follow(&mut self, player: &Player) {
        let z = player.position.z;
        self.position = Vec3::new(0.0, CAMERA_HEIGHT, z + CAMERA_BACK_OFFSET);
        self.target = Vec3::new(0.0, CAMERA_TARGET_HEIGHT, z);
    }
}

/// Session bookkeeping: phase, score, best score, last outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: SessionPhase,
    pub tracker: ScoreTracker,
    pub best: BestScore,
    pub outcome: Option<Outcome>,
    /// Completed runs this process
    pub runs: u32,
}

impl GameSession {
    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    pub fn outcome_text(&self) -> &'static str {
        self.outcome.map(|o| o.text()).unwrap_or("")
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    RunStarted,
    Spawned {
        kind: SpawnKind,
        slot: SlotHandle,
    },
    /// Timer fired but the pool was full
    SpawnDropped {
        kind: SpawnKind,
    },
    CoinCollected {
        slot: SlotHandle,
        score: u32,
    },
    DistanceScored {
        score: u32,
    },
    RunEnded {
        outcome: Outcome,
        score: u32,
        new_best: bool,
    },
}

/// Complete simulation state, owned by the session controller
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub session: GameSession,
    pub player: Player,
    pub camera: CameraRig,
    pub arena: Arena,
    pub obstacles: SlotPool<Obstacle>,
    pub coins: SlotPool<Coin>,
    pub spawner: Spawner,
    /// Simulation ticks spent in `Playing`
    pub time_ticks: u64,
}

impl WorldState {
    /// Create a world in the menu with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let player = Player::new(tuning.player_speed, tuning.player_radius);
        let park = player.parking_spot();

        let obstacles = SlotPool::new(
            tuning.obstacle_capacity,
            Obstacle {
                position: park,
                size: OBSTACLE_SIZES[0],
                variant: ObstacleVariant::default(),
            },
        );
        let coins = SlotPool::new(
            tuning.coin_capacity,
            Coin {
                position: park,
                radius: tuning.coin_radius,
            },
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: GameSession {
                phase: SessionPhase::Menu,
                tracker: ScoreTracker::new(&tuning, player.position.z),
                best: BestScore::default(),
                outcome: None,
                runs: 0,
            },
            camera: CameraRig::following(&player),
            arena: Arena::default(),
            spawner: Spawner::new(&tuning),
            player,
            obstacles,
            coins,
            tuning,
            time_ticks: 0,
        }
    }

    /// Put everything back to the start of a run. Best score is kept.
    pub fn reset_run(&mut self) {
        self.player.reset();
        self.camera.follow(&self.player);

        let park = self.player.parking_spot();
        self.obstacles.deactivate_all(park);
        self.coins.deactivate_all(park);

        self.spawner.reset();
        self.session.tracker.reset(self.player.position.z);
        self.session.outcome = None;
        self.time_ticks = 0;
    }
}
