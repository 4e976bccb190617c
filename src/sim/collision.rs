//! Collision resolution for a single tick
//!
//! Test order is fixed: side walls, goal wall, obstacles. The first wall or
//! obstacle hit decides the outcome, so win and lose can never both be
//! reported for one tick. Coin overlaps are collected regardless.

use super::bounds::spheres_overlap;
use super::pool::{SlotHandle, SlotPool};
use super::state::{Arena, Coin, Obstacle, Outcome, Player};

/// What the player touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    LeftWall,
    RightWall,
    WinWall,
    Obstacle(SlotHandle),
}

impl Contact {
    pub fn outcome(&self) -> Outcome {
        match self {
            Contact::WinWall => Outcome::Win,
            Contact::LeftWall | Contact::RightWall | Contact::Obstacle(_) => Outcome::Lose,
        }
    }
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Run-ending contact, if any
    pub contact: Option<Contact>,
    /// Coins the player overlaps
    pub coins: Vec<SlotHandle>,
}

impl CollisionReport {
    pub fn outcome(&self) -> Option<Outcome> {
        self.contact.map(|c| c.outcome())
    }
}

/// Test the player against everything it can touch. Pure: applying the
/// result (score, deactivation, phase change) is the caller's job.
pub fn resolve_collisions(
    player: &Player,
    arena: &Arena,
    obstacles: &SlotPool<Obstacle>,
    coins: &SlotPool<Coin>,
) -> CollisionReport {
    let contact = first_contact(player, arena, obstacles);
    let coins = coins
        .iter_active()
        .filter(|(_, coin)| spheres_overlap(player.position, player.radius, coin.position, coin.radius))
        .map(|(handle, _)| handle)
        .collect();

    CollisionReport { contact, coins }
}

fn first_contact(player: &Player, arena: &Arena, obstacles: &SlotPool<Obstacle>) -> Option<Contact> {
    let (center, radius) = (player.position, player.radius);

    if arena.left.bounds().intersects_sphere(center, radius) {
        return Some(Contact::LeftWall);
    }
    if arena.right.bounds().intersects_sphere(center, radius) {
        return Some(Contact::RightWall);
    }
    if arena.win.bounds().intersects_sphere(center, radius) {
        return Some(Contact::WinWall);
    }

    obstacles
        .iter_active()
        .find(|(_, obstacle)| obstacle.bounds().intersects_sphere(center, radius))
        .map(|(handle, _)| Contact::Obstacle(handle))
}
