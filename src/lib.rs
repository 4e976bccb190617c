//! Endless Runner - a lane-dodging 3D runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, pools, spawning, collisions, score)
//! - `renderer`: Read-only scene snapshots for whatever draws the frame
//! - `platform`: Clock and input sources
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance
//! - `app`: Frame loop tying the above together

pub mod app;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use highscores::BestScore;
pub use settings::Settings;
pub use tuning::{SpawnInterval, Tuning};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Target frame rate of the simulation loop
    pub const TARGET_FPS: u32 = 60;
    /// Longest frame delta accepted from a wall clock
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults - the run starts here and moves toward -Z
    pub const PLAYER_ORIGIN: Vec3 = Vec3::new(0.0, 1.0, 16.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_RADIUS: f32 = 0.25;

    /// Camera rig (behind and above the player)
    pub const CAMERA_BACK_OFFSET: f32 = 5.0;
    pub const CAMERA_HEIGHT: f32 = 2.0;
    pub const CAMERA_TARGET_HEIGHT: f32 = 1.0;
    pub const CAMERA_FOV_Y: f32 = 60.0;

    /// Entity pools
    pub const OBSTACLE_POOL_CAPACITY: usize = 10;
    pub const COIN_POOL_CAPACITY: usize = 10;

    /// Spawning
    pub const SPAWN_DISTANCE: f32 = 100.0;
    pub const SPAWN_HEIGHT: f32 = 1.0;
    pub const FIRST_SPAWN_SECS: f32 = 2.0;
    pub const OBSTACLE_SPAWN_MIN_SECS: f32 = 2.0;
    pub const OBSTACLE_SPAWN_MAX_SECS: f32 = 4.0;
    pub const COIN_SPAWN_MIN_SECS: f32 = 2.0;
    pub const COIN_SPAWN_MAX_SECS: f32 = 4.0;

    /// Recycling: entities are retired once this far past the player...
    pub const RECYCLE_MARGIN: f32 = 0.0;
    /// ...and parked this far behind the player until reused
    pub const PARK_DISTANCE: f32 = 100.0;

    /// Obstacle box sizes (full extents), picked per spawn
    pub const OBSTACLE_SIZES: [Vec3; 2] = [Vec3::new(5.0, 2.5, 2.0), Vec3::new(5.0, 2.5, 2.0)];

    /// Coins
    pub const COIN_RADIUS: f32 = 0.5;
    pub const COIN_SCORE: u32 = 10;

    /// Distance scoring: one point every 10 units travelled
    pub const DISTANCE_PER_POINT: f32 = 10.0;
    pub const DISTANCE_SCORE: u32 = 1;

    /// Corridor walls
    pub const WALL_LIMIT_SIZE: Vec3 = Vec3::new(1.0, 5.0, 700.0);
    pub const WALL_LEFT_POSITION: Vec3 = Vec3::new(-10.0, 2.5, 0.0);
    pub const WALL_RIGHT_POSITION: Vec3 = Vec3::new(10.0, 2.5, 0.0);
    pub const WALL_WIN_SIZE: Vec3 = Vec3::new(20.0, 5.0, 1.0);
    pub const WALL_WIN_POSITION: Vec3 = Vec3::new(0.0, 2.5, -200.0);
}
