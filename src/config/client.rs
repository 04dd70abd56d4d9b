//! Client-side settings

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::master::MasterSyncData;
use super::store::ConfigStore;
use crate::core::{ItemKey, Result};
use crate::planting::catalog::default_saplings;

/// Storage key of the per-client settings
pub const CLIENT_SETTING_KEY: &str = "HeyPixelSaplantingClientSetting";

/// Random spread added to the landing wait, in seconds
pub const WAIT_TIME_RANGE: f32 = 5.0;
/// Random spread added to the airborne re-check interval, in seconds
pub const CHECK_TIME_RANGE: f32 = 15.0;
/// Fixed part of the airborne re-check interval on top of the minimum wait
const CHECK_BASE_TIME: u32 = 15;

/// Player-local preferences
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSetting {
    /// Whether this player's axe breaks trip chain-felling
    pub tree_felling: bool,
}

impl Default for ClientSetting {
    fn default() -> Self {
        Self { tree_felling: true }
    }
}

impl ClientSetting {
    pub fn load(store: &ConfigStore) -> Result<Self> {
        Ok(store.load(CLIENT_SETTING_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, store: &ConfigStore) -> Result<()> {
        store.save(CLIENT_SETTING_KEY, self)
    }
}

/// Client copy of the master settings it needs for planting
#[derive(Clone, Debug)]
pub struct ClientMasterSetting {
    pub saplings: BTreeSet<ItemKey>,
    pub min_wait_time: u32,
}

impl Default for ClientMasterSetting {
    fn default() -> Self {
        Self { saplings: default_saplings(), min_wait_time: 3 }
    }
}

impl ClientMasterSetting {
    /// Apply a sync payload from the server. Absent fields are left alone.
    pub fn apply_sync(&mut self, data: &MasterSyncData) {
        if let Some(saplings) = &data.saplings {
            self.saplings = saplings.iter().cloned().collect();
        }
        if let Some(min_wait_time) = data.min_wait_time {
            self.min_wait_time = min_wait_time;
        }
    }

    /// Delay between an item landing and asking the server to plant it
    pub fn wait_time<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.gen_range(0.0..WAIT_TIME_RANGE) + self.min_wait_time as f32
    }

    /// Interval between fallback checks of whether a tracked item has landed
    pub fn check_wait_time<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.gen_range(0.0..CHECK_TIME_RANGE) + CHECK_BASE_TIME.saturating_add(self.min_wait_time) as f32
    }
}
