//! In-memory block grid

use std::collections::HashMap;

use glam::IVec3;

use super::block::{names, BlockSample, BlockState};
use super::query::WorldQuery;

#[derive(Clone, Debug)]
struct Cell {
    sample: BlockSample,
    state: BlockState,
}

/// Sparse block storage keyed by position. Missing cells are air.
#[derive(Clone, Debug, Default)]
pub struct BlockGrid {
    cells: HashMap<IVec3, Cell>,
    /// Blocks destroyed with loot, in destruction order
    drops: Vec<(IVec3, BlockSample)>,
}

impl BlockGrid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block with an empty state. Setting air clears the cell.
    pub fn set_block(&mut self, pos: IVec3, name: &str, aux: u16) {
        self.set_block_with_state(pos, name, aux, BlockState::new());
    }

    /// Place a block with an explicit state
    pub fn set_block_with_state(&mut self, pos: IVec3, name: &str, aux: u16, state: BlockState) {
        if name == names::AIR {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, Cell { sample: BlockSample::new(name, aux), state });
        }
    }

    /// Remove a block, returning what was there
    pub fn remove_block(&mut self, pos: IVec3) -> Option<BlockSample> {
        self.cells.remove(&pos).map(|cell| cell.sample)
    }

    /// Remove a block and record it as dropped loot
    pub fn break_block(&mut self, pos: IVec3, drop_loot: bool) {
        if let Some(sample) = self.remove_block(pos) {
            if drop_loot {
                self.drops.push((pos, sample));
            }
        }
    }

    pub fn contains(&self, pos: IVec3) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Number of non-air blocks
    pub fn block_count(&self) -> usize {
        self.cells.len()
    }

    /// Loot-producing destructions so far
    pub fn drops(&self) -> &[(IVec3, BlockSample)] {
        &self.drops
    }
}

impl WorldQuery for BlockGrid {
    fn sample_block(&self, pos: IVec3) -> Option<BlockSample> {
        self.cells.get(&pos).map(|cell| cell.sample.clone())
    }

    fn sample_block_state(&self, pos: IVec3) -> Option<BlockState> {
        self.cells.get(&pos).map(|cell| cell.state.clone())
    }
}
