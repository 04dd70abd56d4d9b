//! Where a landed item gets planted

use glam::IVec3;

use crate::core::ItemStack;
use crate::world::block::names;
use crate::world::WorldQuery;

/// Resolve the block an item resting at `landing` would be planted into.
///
/// Items on farmland are planted one block above it. The chosen cell must be
/// empty, air or water.
pub fn resolve_plant_site<W: WorldQuery + ?Sized>(world: &W, landing: IVec3) -> Option<IVec3> {
    let mut site = landing;
    let mut block = world.sample_block(site);

    if block.as_ref().is_some_and(|block| block.name == names::FARMLAND) {
        site += IVec3::Y;
        block = world.sample_block(site);
    }

    match block {
        Some(block) if !block.is_replaceable() => None,
        _ => Some(site),
    }
}

/// What is left of a dropped stack after one item is planted
pub fn remainder_after_planting(stack: &ItemStack) -> Option<ItemStack> {
    (stack.count > 1).then(|| ItemStack { count: stack.count - 1, ..stack.clone() })
}
