//! Connected log cluster search
//!
//! Walks from a broken log through same-species logs laterally and upward,
//! collecting the positions that a chain-fell should destroy. The search only
//! plans; it never mutates the world.
//!
//! Player-built log structures are told apart from natural trees by the
//! leaves around them: naturally grown leaves carry `persistent_bit = false`.
//! When the configuration asks for that proof, a cluster without such a leaf
//! is declined.

use std::collections::HashSet;

use glam::IVec3;

use super::neighbors::felling_neighbors;
use super::species::{SpeciesKey, DEFAULT_LOG_BLOCKS, LEAF_BLOCKS};
use crate::world::block::keys;
use crate::world::WorldQuery;

/// Parameters of a chain-fell search
#[derive(Clone, Debug)]
pub struct FellingConfig {
    /// Maximum number of blocks destroyed by one chain-fell. 0 disables felling.
    pub limit: u32,
    /// Require a non-persistent leaf near the cluster before felling
    pub require_natural_proof: bool,
    /// Blocks treated as logs
    pub log_blocks: HashSet<String>,
    /// Blocks inspected for the persistence bit
    pub leaf_blocks: HashSet<String>,
}

impl FellingConfig {
    pub fn is_log(&self, block: &str) -> bool {
        self.log_blocks.contains(block)
    }

    pub fn is_leaf(&self, block: &str) -> bool {
        self.leaf_blocks.contains(block)
    }
}

impl Default for FellingConfig {
    fn default() -> Self {
        Self {
            limit: 255,
            require_natural_proof: true,
            log_blocks: DEFAULT_LOG_BLOCKS.iter().map(|name| name.to_string()).collect(),
            leaf_blocks: LEAF_BLOCKS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// The search declined to act: the cluster does not look like a natural tree
/// (or felling is disabled). This is a normal outcome, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aborted;

/// Per-invocation search bookkeeping
struct SearchState {
    visited: HashSet<IVec3>,
    /// Positions awaiting expansion, popped most-recent first
    frontier: Vec<IVec3>,
    /// Matching logs in discovery order
    affected: Vec<IVec3>,
    found_natural: bool,
}

impl SearchState {
    fn new(origin: IVec3, require_natural_proof: bool) -> Self {
        // Origin is already being destroyed by the triggering break
        let mut visited = HashSet::new();
        visited.insert(origin);
        Self {
            visited,
            frontier: vec![origin],
            affected: Vec::new(),
            found_natural: !require_natural_proof,
        }
    }
}

/// Find the logs connected to `origin` that a chain-fell should destroy.
///
/// Returns the positions in discovery order, excluding `origin`. The result
/// never exceeds `config.limit`: reaching the cap with naturalness proven
/// returns the truncated cluster, reaching it without proof returns
/// [`Aborted`]. An exhausted search returns the cluster only if proof was
/// found (or not required).
pub fn find_connected_log_cluster<W: WorldQuery + ?Sized>(
    origin: IVec3,
    species: &SpeciesKey,
    config: &FellingConfig,
    world: &W,
) -> Result<Vec<IVec3>, Aborted> {
    if config.limit == 0 {
        return Err(Aborted);
    }
    let limit = config.limit as usize;
    let mut state = SearchState::new(origin, config.require_natural_proof);

    while let Some(current) = state.frontier.pop() {
        for pos in felling_neighbors(current) {
            if !state.visited.insert(pos) {
                continue;
            }
            let Some(block) = world.sample_block(pos) else {
                continue;
            };

            if block.name == species.block {
                // Same block name but another species is neither a log nor a leaf here
                let block_state = world.sample_block_state(pos);
                if !species.matches(&block.name, block_state.as_ref()) {
                    continue;
                }
                state.affected.push(pos);
                state.frontier.push(pos);

                if state.affected.len() >= limit {
                    if !state.found_natural {
                        log::debug!(
                            "Chain-fell at {} hit the {} block cap without natural leaves, declining",
                            origin, limit
                        );
                        return Err(Aborted);
                    }
                    log::debug!("Chain-fell at {} truncated at {} blocks", origin, limit);
                    return Ok(state.affected);
                }
            } else if !state.found_natural && config.is_leaf(&block.name) {
                let natural = world
                    .sample_block_state(pos)
                    .and_then(|leaf| leaf.get_bool(keys::PERSISTENT_BIT))
                    == Some(false);
                if natural {
                    state.found_natural = true;
                }
            }
        }
    }

    log::trace!(
        "Chain-fell search at {} visited {} cells, found {} logs",
        origin,
        state.visited.len(),
        state.affected.len()
    );

    if state.found_natural {
        Ok(state.affected)
    } else {
        log::debug!("No natural leaves around log cluster at {}, declining", origin);
        Err(Aborted)
    }
}
