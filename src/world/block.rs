//! Block samples and block state payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known block identifiers
pub mod names {
    pub const AIR: &str = "minecraft:air";
    pub const WATER: &str = "minecraft:water";
    pub const FLOWING_WATER: &str = "minecraft:flowing_water";
    pub const FARMLAND: &str = "minecraft:farmland";
    pub const DIRT: &str = "minecraft:dirt";
    pub const GRASS: &str = "minecraft:grass";
    pub const LOG: &str = "minecraft:log";
    pub const LOG2: &str = "minecraft:log2";
    pub const LEAVES: &str = "minecraft:leaves";
    pub const LEAVES2: &str = "minecraft:leaves2";
}

/// Well-known block state keys
pub mod keys {
    pub const OLD_LOG_TYPE: &str = "old_log_type";
    pub const NEW_LOG_TYPE: &str = "new_log_type";
    pub const PERSISTENT_BIT: &str = "persistent_bit";
}

/// A single value inside a block state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Str(value.to_owned())
    }
}

/// Structured state of a block (log sub-type, leaf persistence, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockState(BTreeMap<String, StateValue>);

impl BlockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<StateValue>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<StateValue>) {
        self.0.insert(key.to_owned(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.0.get(key)
    }

    /// String value of `key`, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(StateValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    /// Boolean value of `key`; hosts encode some flags as 0/1 integers
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(StateValue::Bool(value)) => Some(*value),
            Some(StateValue::Int(value)) => Some(*value != 0),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of sampling the world at a position
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockSample {
    /// Block type identifier (e.g. "minecraft:oak_log")
    pub name: String,
    /// Legacy auxiliary value
    #[serde(default)]
    pub aux: u16,
}

impl BlockSample {
    pub fn new(name: impl Into<String>, aux: u16) -> Self {
        Self { name: name.into(), aux }
    }

    /// Air or water, which a planted item may replace
    pub fn is_replaceable(&self) -> bool {
        matches!(self.name.as_str(), names::AIR | names::WATER | names::FLOWING_WATER)
    }
}
