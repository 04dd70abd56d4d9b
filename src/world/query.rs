//! Read-only world query capability

use glam::IVec3;

use super::block::{BlockSample, BlockState};

/// Read-only block lookup supplied by the host
///
/// Unloaded, out-of-range and air positions yield `None`; queries never fail.
pub trait WorldQuery {
    /// Block type at `pos`
    fn sample_block(&self, pos: IVec3) -> Option<BlockSample>;

    /// Structured state of the block at `pos`
    fn sample_block_state(&self, pos: IVec3) -> Option<BlockState>;
}

impl<T: WorldQuery + ?Sized> WorldQuery for &T {
    fn sample_block(&self, pos: IVec3) -> Option<BlockSample> {
        (**self).sample_block(pos)
    }

    fn sample_block_state(&self, pos: IVec3) -> Option<BlockState> {
        (**self).sample_block_state(pos)
    }
}
