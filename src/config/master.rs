//! Host-controlled server settings
//!
//! The master settings are edited by the session's master player and shape
//! behaviour for everyone: the planting whitelist, the planting delay and the
//! chain-felling switches. Clients receive the planting subset through
//! [`MasterSyncData`].

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use super::store::ConfigStore;
use crate::core::{ItemKey, Result};
use crate::felling::species::{DEFAULT_LOG_BLOCKS, LEAF_BLOCKS};
use crate::felling::FellingConfig;
use crate::planting::catalog::default_saplings;

/// Storage key of the master settings
pub const MASTER_SETTING_KEY: &str = "HeyPixelSaplantingMasterSetting";

/// Read an integer setting, clamping negative values to zero
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(value.clamp(0, u32::MAX as i64) as u32)
}

/// Server-wide settings, persisted as JSON
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterSetting {
    /// Items that plant themselves when dropped
    pub saplings: BTreeSet<ItemKey>,
    /// Minimum seconds a landed item waits before planting
    #[serde(deserialize_with = "non_negative")]
    pub min_wait_time: u32,
    /// Chain-felling master switch
    pub tree_felling: bool,
    /// Require a natural leaf before felling
    pub check_leave_persistent_bit: bool,
    /// Most blocks a single chain-fell may destroy
    #[serde(deserialize_with = "non_negative")]
    pub tree_felling_limit_count: u32,
    /// Blocks treated as logs
    pub log_blocks: BTreeSet<String>,
}

impl Default for MasterSetting {
    fn default() -> Self {
        Self {
            saplings: default_saplings(),
            min_wait_time: 3,
            tree_felling: true,
            check_leave_persistent_bit: true,
            tree_felling_limit_count: 255,
            log_blocks: DEFAULT_LOG_BLOCKS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// Subset of the master settings pushed to clients
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterSyncData {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_non_negative")]
    pub min_wait_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saplings: Option<Vec<ItemKey>>,
}

fn optional_non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    non_negative(deserializer).map(Some)
}

impl MasterSetting {
    /// Load from `store`, keeping defaults when nothing was saved yet
    pub fn load(store: &ConfigStore) -> Result<Self> {
        Ok(store.load(MASTER_SETTING_KEY)?.unwrap_or_default())
    }

    /// Reload in place. A corrupt document leaves the current values untouched.
    pub fn reload(&mut self, store: &ConfigStore) -> Result<()> {
        if let Some(loaded) = store.load(MASTER_SETTING_KEY)? {
            *self = loaded;
        }
        Ok(())
    }

    pub fn save(&self, store: &ConfigStore) -> Result<()> {
        store.save(MASTER_SETTING_KEY, self)
    }

    /// Whether chain-felling can run at all
    pub fn felling_enabled(&self) -> bool {
        self.tree_felling && self.tree_felling_limit_count > 0
    }

    /// Add `item` to the planting whitelist, or remove it if present.
    /// Returns `true` when the item was added.
    pub fn toggle_sapling(&mut self, item: ItemKey) -> bool {
        if self.saplings.remove(&item) {
            false
        } else {
            self.saplings.insert(item);
            true
        }
    }

    /// Add `block` to the log set, or remove it if present.
    /// Returns `true` when the block was added.
    pub fn toggle_log_block(&mut self, block: &str) -> bool {
        if self.log_blocks.remove(block) {
            false
        } else {
            self.log_blocks.insert(block.to_owned());
            true
        }
    }

    /// Build the client sync payload
    pub fn client_data(&self, add_min_wait_time: bool, add_saplings: bool) -> MasterSyncData {
        MasterSyncData {
            min_wait_time: add_min_wait_time.then_some(self.min_wait_time),
            saplings: add_saplings.then(|| self.saplings.iter().cloned().collect()),
        }
    }

    /// Search parameters for the chain-fell engine
    pub fn felling_config(&self) -> FellingConfig {
        FellingConfig {
            limit: self.tree_felling_limit_count,
            require_natural_proof: self.check_leave_persistent_bit,
            log_blocks: self.log_blocks.iter().cloned().collect(),
            leaf_blocks: LEAF_BLOCKS.iter().map(|name| name.to_string()).collect::<HashSet<_>>(),
        }
    }
}
