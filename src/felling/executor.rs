//! Carrying out a planned chain-fell

use glam::IVec3;

use crate::world::BlockGrid;

/// Removes blocks from the world on behalf of a chain-fell
pub trait DestructionExecutor {
    /// Destroy the block at `pos`, producing its normal drops when `drop_loot` is set
    fn destroy(&mut self, pos: IVec3, drop_loot: bool);
}

impl DestructionExecutor for BlockGrid {
    fn destroy(&mut self, pos: IVec3, drop_loot: bool) {
        self.break_block(pos, drop_loot);
    }
}

/// Destroy every planned position. Only the last one drops loot, so the
/// felled tree's items land in one place.
///
/// Returns the number of blocks handed to the executor.
pub fn execute_fell<E: DestructionExecutor + ?Sized>(executor: &mut E, affected: &[IVec3]) -> usize {
    let Some((last, rest)) = affected.split_last() else {
        return 0;
    };
    for &pos in rest {
        executor.destroy(pos, false);
    }
    executor.destroy(*last, true);
    affected.len()
}
