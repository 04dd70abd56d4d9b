//! Suppression of break events caused by a chain-fell itself
//!
//! Destroying the planned blocks makes the host fire the same break event the
//! chain-fell started from. Positions are registered here before destruction;
//! the break handler drains a matching position and ignores that event once.
//! The set is cleared after every batch.

use std::collections::{HashMap, HashSet};

use glam::IVec3;

use crate::core::PlayerId;

/// Per-player sets of positions currently being destroyed by a chain-fell
#[derive(Debug, Default)]
pub struct DestructionGuard {
    pending: HashMap<PlayerId, HashSet<IVec3>>,
}

impl DestructionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a player
    pub fn join(&mut self, player: &str) {
        self.pending.entry(player.to_owned()).or_default();
    }

    /// Stop tracking a player, dropping anything pending
    pub fn leave(&mut self, player: &str) {
        self.pending.remove(player);
    }

    pub fn is_tracked(&self, player: &str) -> bool {
        self.pending.contains_key(player)
    }

    /// Mark positions as about to be destroyed by `player`'s chain-fell
    pub fn register(&mut self, player: &str, positions: &[IVec3]) {
        self.pending
            .entry(player.to_owned())
            .or_default()
            .extend(positions.iter().copied());
    }

    /// Remove `pos` from the player's pending set, reporting whether it was there.
    /// A `true` result means the break event should be ignored.
    pub fn take_pending(&mut self, player: &str, pos: IVec3) -> bool {
        self.pending
            .get_mut(player)
            .is_some_and(|pending| pending.remove(&pos))
    }

    /// Forget everything pending for a player after a batch completes
    pub fn clear(&mut self, player: &str) {
        if let Some(pending) = self.pending.get_mut(player) {
            pending.clear();
        }
    }

    pub fn pending_count(&self, player: &str) -> usize {
        self.pending.get(player).map_or(0, HashSet::len)
    }
}
