//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod pool;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use bounds::{Aabb, spheres_overlap};
pub use collision::{CollisionReport, Contact, resolve_collisions};
pub use pool::{Pooled, Slot, SlotHandle, SlotPool};
pub use score::ScoreTracker;
pub use spawner::{SpawnKind, SpawnReport, SpawnTimer, Spawner};
pub use state::{
    Arena, CameraRig, Coin, GameEvent, GameSession, MenuIntent, Obstacle, ObstacleVariant,
    Outcome, Player, SessionPhase, Steer, Wall, WorldState,
};
pub use tick::{TickInput, apply_intent, tick};
