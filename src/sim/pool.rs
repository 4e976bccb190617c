//! Fixed-capacity entity pools
//!
//! Slots are allocated once and recycled forever. Activation takes the first
//! free slot in index order; when every slot is busy the request is dropped.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a slot inside a [`SlotPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotHandle(usize);

impl SlotHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Anything that lives in a pool has a position the pool can move and park
pub trait Pooled {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
}

/// One pool slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot<T> {
    pub entity: T,
    pub active: bool,
}

/// Fixed-length array of entity slots with per-slot active flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPool<T> {
    slots: Box<[Slot<T>]>,
}

impl<T: Pooled + Clone> SlotPool<T> {
    /// Create `capacity` inactive slots, each holding a copy of `template`
    pub fn new(capacity: usize, template: T) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                entity: template.clone(),
                active: false,
            })
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.active)
    }

    /// Place `entity` in the first free slot.
    ///
    /// Returns `None` (and changes nothing) when every slot is active.
    pub fn try_activate(&mut self, entity: T) -> Option<SlotHandle> {
        let index = self.slots.iter().position(|s| !s.active)?;
        let slot = &mut self.slots[index];
        slot.entity = entity;
        slot.active = true;
        Some(SlotHandle(index))
    }

    /// Free a slot and park its entity at `park_at`
    pub fn deactivate(&mut self, handle: SlotHandle, park_at: Vec3) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.active = false;
            slot.entity.set_position(park_at);
        }
    }

    /// Free every slot
    pub fn deactivate_all(&mut self, park_at: Vec3) {
        for slot in self.slots.iter_mut() {
            slot.active = false;
            slot.entity.set_position(park_at);
        }
    }

    pub fn is_active(&self, handle: SlotHandle) -> bool {
        self.slots.get(handle.0).is_some_and(|s| s.active)
    }

    /// Entity in an active slot
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.slots
            .get(handle.0)
            .filter(|s| s.active)
            .map(|s| &s.entity)
    }

    /// Active entities in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (SlotHandle(i), &s.entity))
    }

    /// Every slot, active or not (for drawing)
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Move every active entity along +Z by `dz`
    pub fn advance(&mut self, dz: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            let mut position = slot.entity.position();
            position.z += dz;
            slot.entity.set_position(position);
        }
    }

    /// Deactivate entities that have reached `player_z + margin` or beyond.
    ///
    /// Returns how many were recycled.
    pub fn recycle_passed(&mut self, player_z: f32, margin: f32, park_at: Vec3) -> usize {
        let mut recycled = 0;
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            if slot.entity.position().z >= player_z + margin {
                slot.active = false;
                slot.entity.set_position(park_at);
                recycled += 1;
            }
        }
        recycled
    }
}
