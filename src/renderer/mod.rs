//! Presentation boundary
//!
//! The simulation never draws. Each frame it is projected into a
//! [`SceneSnapshot`]: the camera, every drawable with its position, shape,
//! color and active flag, and the HUD values. A [`Renderer`] consumes that.

use glam::Vec3;
use serde::Serialize;

use crate::sim::{CameraRig, ObstacleVariant, SessionPhase, Wall, WorldState};

/// RGBA, 8 bits per channel
pub type Rgba = [u8; 4];

/// Scene colors
pub mod palette {
    use super::Rgba;

    pub const PLAYER: Rgba = [200, 122, 255, 255];
    pub const COIN: Rgba = [253, 249, 0, 255];
    pub const WALL: Rgba = [230, 41, 55, 255];
    pub const WIN_WALL: Rgba = [0, 228, 48, 255];
    pub const OBSTACLE_BLUE: Rgba = [0, 121, 241, 255];
    pub const OBSTACLE_DARK_BLUE: Rgba = [0, 82, 172, 255];
}

pub fn obstacle_color(variant: ObstacleVariant) -> Rgba {
    match variant {
        ObstacleVariant::Blue => palette::OBSTACLE_BLUE,
        ObstacleVariant::DarkBlue => palette::OBSTACLE_DARK_BLUE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawableKind {
    Player,
    Obstacle,
    Coin,
    Wall,
    WinWall,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Full extents
    Cuboid { size: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub position: Vec3,
    pub shape: Shape,
    pub color: Rgba,
    pub active: bool,
}

/// Values shown over the 3D scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: SessionPhase,
    pub score: u32,
    pub best_score: u32,
    pub outcome_text: &'static str,
}

/// Read-only projection of the world for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub camera: CameraRig,
    pub drawables: Vec<Drawable>,
    pub hud: Hud,
}

impl SceneSnapshot {
    /// Capture the current world. Pool slots are included whether active or not.
    pub fn capture(world: &WorldState) -> Self {
        let mut drawables =
            Vec::with_capacity(4 + world.obstacles.capacity() + world.coins.capacity());

        drawables.push(Drawable {
            kind: DrawableKind::Player,
            position: world.player.position,
            shape: Shape::Sphere {
                radius: world.player.radius,
            },
            color: palette::PLAYER,
            active: true,
        });

        let arena = &world.arena;
        drawables.push(wall(&arena.left, DrawableKind::Wall, palette::WALL));
        drawables.push(wall(&arena.right, DrawableKind::Wall, palette::WALL));
        drawables.push(wall(&arena.win, DrawableKind::WinWall, palette::WIN_WALL));

        drawables.extend(world.obstacles.slots().iter().map(|slot| Drawable {
            kind: DrawableKind::Obstacle,
            position: slot.entity.position,
            shape: Shape::Cuboid {
                size: slot.entity.size,
            },
            color: obstacle_color(slot.entity.variant),
            active: slot.active,
        }));

        drawables.extend(world.coins.slots().iter().map(|slot| Drawable {
            kind: DrawableKind::Coin,
            position: slot.entity.position,
            shape: Shape::Sphere {
                radius: slot.entity.radius,
            },
            color: palette::COIN,
            active: slot.active,
        }));

        Self {
            camera: world.camera,
            drawables,
            hud: Hud {
                phase: world.session.phase,
                score: world.session.score(),
                best_score: world.session.best_score(),
                outcome_text: world.session.outcome_text(),
            },
        }
    }

    /// Drawables that should actually be drawn this frame
    pub fn visible(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter().filter(|d| d.active)
    }
}

fn wall(wall: &Wall, kind: DrawableKind, color: Rgba) -> Drawable {
    Drawable {
        kind,
        position: wall.position(),
        shape: Shape::Cuboid { size: wall.size() },
        color,
        active: true,
    }
}

/// Draws a snapshot. Implemented outside the core (GPU, terminal, log...).
pub trait Renderer {
    fn render(&mut self, scene: &SceneSnapshot);
}

/// Headless renderer: logs the HUD every `every` frames and on phase changes
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_phase: Option<SessionPhase>,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_phase: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, scene: &SceneSnapshot) {
        self.frames += 1;
        let hud = &scene.hud;
        let phase_changed = self.last_phase != Some(hud.phase);
        self.last_phase = Some(hud.phase);

        if phase_changed {
            log::info!("Screen: {:?} {}", hud.phase, hud.outcome_text);
        }
        if phase_changed || self.frames % self.every == 0 {
            log::debug!(
                "frame {} {:?} score={} best={} visible={} camera_z={:.1}",
                self.frames,
                hud.phase,
                hud.score,
                hud.best_score,
                scene.visible().count(),
                scene.camera.position.z
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Coin, MenuIntent, TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_lists_every_slot() {
        let world = WorldState::new(3, Tuning::default());
        let scene = SceneSnapshot::capture(&world);

        assert_eq!(
            scene.drawables.len(),
            4 + OBSTACLE_POOL_CAPACITY + COIN_POOL_CAPACITY
        );
        // Player and three walls only
        assert_eq!(scene.visible().count(), 4);
        assert_eq!(scene.hud.phase, SessionPhase::Menu);
        assert_eq!(scene.hud.outcome_text, "");
    }

    #[test]
    fn test_snapshot_reflects_active_coin() {
        let mut world = WorldState::new(3, Tuning::default());
        tick(&mut world, &TickInput::intent(MenuIntent::Play), 0.0);
        let position = world.player.position - Vec3::Z * 30.0;
        world
            .coins
            .try_activate(Coin {
                position,
                radius: COIN_RADIUS,
            })
            .unwrap();

        let scene = SceneSnapshot::capture(&world);
        let coin = scene
            .visible()
            .find(|d| d.kind == DrawableKind::Coin)
            .unwrap();
        assert_eq!(coin.position, position);
        assert_eq!(coin.color, palette::COIN);
        assert_eq!(scene.camera, world.camera);
    }

    #[test]
    fn test_walls_are_drawn_with_their_geometry() {
        let world = WorldState::new(3, Tuning::default());
        let scene = SceneSnapshot::capture(&world);
        let win = scene
            .drawables
            .iter()
            .find(|d| d.kind == DrawableKind::WinWall)
            .unwrap();
        assert_eq!(win.position, WALL_WIN_POSITION);
        assert_eq!(win.shape, Shape::Cuboid { size: WALL_WIN_SIZE });
        assert_eq!(win.color, palette::WIN_WALL);
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let world = WorldState::new(3, Tuning::default());
        let scene = SceneSnapshot::capture(&world);
        let mut renderer = LogRenderer::new(10);
        for _ in 0..25 {
            renderer.render(&scene);
        }
        assert_eq!(renderer.frames(), 25);
    }
}
