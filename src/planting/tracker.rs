//! Client-side tracking of dropped plantable items
//!
//! Each watched item is an ECS entity carrying a [`TrackedItem`] and, while
//! something is scheduled for it, a [`PlantTimer`]. Items start on a slow
//! fallback timer that polls whether they have come to rest; an on-ground
//! event from the host swaps that for a short randomized delay before the
//! server is asked to plant.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;

use super::catalog::is_plantable;
use crate::config::ClientMasterSetting;
use crate::core::{EntityId, ItemKey};

/// Dropped item watched for planting
#[derive(Clone, Debug)]
pub struct TrackedItem {
    pub host_id: EntityId,
    pub item: ItemKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Poll whether the item has landed
    CheckGround,
    /// Ask the server to plant
    Notify,
}

/// Seconds until the next scheduled action for an item
#[derive(Clone, Copy, Debug)]
pub struct PlantTimer {
    pub remaining: f32,
    pub kind: TimerKind,
}

/// A tracked item is resting on the ground and ready to plant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaplingLanded {
    pub entity: EntityId,
    pub item: ItemKey,
}

/// Watches dropped plantable items until they land
#[derive(Default)]
pub struct SaplingTracker {
    world: World,
    by_host: HashMap<EntityId, Entity>,
}

impl SaplingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching a newly spawned item entity if it is plantable.
    /// Returns whether the item is now tracked.
    pub fn track<R: Rng>(
        &mut self,
        host_id: &str,
        item: ItemKey,
        settings: &ClientMasterSetting,
        rng: &mut R,
    ) -> bool {
        if !is_plantable(&settings.saplings, &item) {
            return false;
        }
        let timer = PlantTimer { remaining: settings.check_wait_time(rng), kind: TimerKind::CheckGround };
        let entity = self.world.spawn((TrackedItem { host_id: host_id.to_owned(), item }, timer));
        if let Some(previous) = self.by_host.insert(host_id.to_owned(), entity) {
            let _ = self.world.despawn(previous);
        }
        true
    }

    /// Stop watching an item (picked up, despawned, planted)
    pub fn untrack(&mut self, host_id: &str) -> bool {
        match self.by_host.remove(host_id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// The host reports a tracked item touched the ground
    pub fn landed<R: Rng>(&mut self, host_id: &str, settings: &ClientMasterSetting, rng: &mut R) -> bool {
        let Some(&entity) = self.by_host.get(host_id) else {
            return false;
        };
        let timer = PlantTimer { remaining: settings.wait_time(rng), kind: TimerKind::Notify };
        self.world.insert_one(entity, timer).is_ok()
    }

    pub fn is_tracked(&self, host_id: &str) -> bool {
        self.by_host.contains_key(host_id)
    }

    /// Scheduled action for a tracked item
    pub fn timer(&self, host_id: &str) -> Option<PlantTimer> {
        let entity = *self.by_host.get(host_id)?;
        self.world.get::<&PlantTimer>(entity).ok().map(|timer| *timer)
    }

    pub fn len(&self) -> usize {
        self.by_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_host.is_empty()
    }

    /// Advance timers by `dt` seconds, returning items that should be planted.
    ///
    /// `on_ground` reports whether the host currently sees an item at rest.
    pub fn tick<R, F>(
        &mut self,
        dt: f32,
        settings: &ClientMasterSetting,
        rng: &mut R,
        mut on_ground: F,
    ) -> Vec<SaplingLanded>
    where
        R: Rng,
        F: FnMut(&str) -> bool,
    {
        let mut expired = Vec::new();
        for (entity, (tracked, timer)) in self.world.query_mut::<(&TrackedItem, &mut PlantTimer)>() {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                expired.push((entity, timer.kind, tracked.clone()));
            }
        }

        let mut landed = Vec::new();
        for (entity, kind, tracked) in expired {
            let ready = match kind {
                TimerKind::Notify => true,
                TimerKind::CheckGround => on_ground(&tracked.host_id),
            };
            if ready {
                let _ = self.world.remove_one::<PlantTimer>(entity);
                landed.push(SaplingLanded { entity: tracked.host_id, item: tracked.item });
            } else {
                let timer = PlantTimer { remaining: settings.check_wait_time(rng), kind: TimerKind::CheckGround };
                let _ = self.world.insert_one(entity, timer);
            }
        }
        landed
    }
}
