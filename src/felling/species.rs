//! Tree species identity
//!
//! `minecraft:log` and `minecraft:log2` multiplex several species through a
//! state field; every other log block is its own species.

use crate::world::block::{keys, names, BlockState};

/// Log blocks recognised by default
pub const DEFAULT_LOG_BLOCKS: [&str; 10] = [
    "minecraft:log",
    "minecraft:log2",
    "minecraft:oak_log",
    "minecraft:spruce_log",
    "minecraft:birch_log",
    "minecraft:jungle_log",
    "minecraft:acacia_log",
    "minecraft:dark_oak_log",
    "minecraft:cherry_log",
    "minecraft:mangrove_log",
];

/// Leaf blocks whose persistence bit counts as proof of a natural tree
pub const LEAF_BLOCKS: [&str; 6] = [
    "minecraft:leaves",
    "minecraft:leaves2",
    "minecraft:mangrove_leaves",
    "minecraft:cherry_leaves",
    "minecraft:azalea_leaves",
    "minecraft:azalea_leaves_flowered",
];

const OLD_LOG_TYPES: [&str; 4] = ["oak", "spruce", "birch", "jungle"];
const NEW_LOG_TYPES: [&str; 2] = ["acacia", "dark_oak"];

/// State key carrying the sub-species for multiplexed log blocks
fn variant_key(block: &str) -> Option<&'static str> {
    match block {
        names::LOG => Some(keys::OLD_LOG_TYPE),
        names::LOG2 => Some(keys::NEW_LOG_TYPE),
        _ => None,
    }
}

/// Decode the state of a multiplexed log from its legacy aux value
pub fn log_state_from_aux(block: &str, aux: u16) -> Option<BlockState> {
    let (key, variant) = match block {
        names::LOG => (keys::OLD_LOG_TYPE, OLD_LOG_TYPES[(aux & 3) as usize]),
        names::LOG2 => (keys::NEW_LOG_TYPE, NEW_LOG_TYPES[(aux & 1) as usize]),
        _ => return None,
    };
    Some(BlockState::new().with(key, variant))
}

/// Effective tree identity of a log block
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpeciesKey {
    /// Block type identifier
    pub block: String,
    /// Sub-species for multiplexed blocks, when known
    pub variant: Option<String>,
}

impl SpeciesKey {
    /// Derive the species of a block from its name and (optional) state
    pub fn from_block(block: &str, state: Option<&BlockState>) -> Self {
        let variant = variant_key(block)
            .and_then(|key| state.and_then(|state| state.get_str(key)))
            .map(str::to_owned);
        Self { block: block.to_owned(), variant }
    }

    /// Whether a sampled block belongs to this species
    ///
    /// A neighbour whose state is unavailable matches on name alone, as does
    /// every neighbour when the origin's variant could not be determined.
    pub fn matches(&self, block: &str, state: Option<&BlockState>) -> bool {
        if block != self.block {
            return false;
        }
        let (Some(variant), Some(state)) = (self.variant.as_deref(), state) else {
            return true;
        };
        match variant_key(block) {
            Some(key) => state.get_str(key) == Some(variant),
            None => true,
        }
    }
}
