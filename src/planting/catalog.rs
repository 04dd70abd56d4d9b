//! Plantable items and the blocks they become

use std::collections::BTreeSet;

use crate::core::ItemKey;

/// Items planted out of the box
const DEFAULT_SAPLINGS: [(&str, u16); 21] = [
    ("minecraft:warped_fungus", 0),
    ("minecraft:crimson_fungus", 0),
    ("minecraft:sapling", 0),
    ("minecraft:sapling", 1),
    ("minecraft:sapling", 2),
    ("minecraft:sapling", 3),
    ("minecraft:sapling", 4),
    ("minecraft:sapling", 5),
    ("minecraft:azalea", 0),
    ("minecraft:flowering_azalea", 0),
    ("minecraft:bamboo", 0),
    ("minecraft:wheat_seeds", 0),
    ("minecraft:pumpkin_seeds", 0),
    ("minecraft:melon_seeds", 0),
    ("minecraft:beetroot_seeds", 0),
    ("minecraft:potato", 0),
    ("minecraft:carrot", 0),
    ("minecraft:sweet_berries", 0),
    ("minecraft:sugar_cane", 0),
    ("minecraft:torchflower_seeds", 0),
    ("minecraft:pitcher_pod", 0),
];

/// Items whose placed block has a different identifier
const PLANTED_AS: [((&str, u16), (&str, u16)); 12] = [
    (("minecraft:wheat_seeds", 0), ("minecraft:wheat", 0)),
    (("minecraft:pumpkin_seeds", 0), ("minecraft:pumpkin_stem", 0)),
    (("minecraft:melon_seeds", 0), ("minecraft:melon_stem", 0)),
    (("minecraft:beetroot_seeds", 0), ("minecraft:beetroot", 0)),
    (("minecraft:potato", 0), ("minecraft:potatoes", 0)),
    (("minecraft:carrot", 0), ("minecraft:carrots", 0)),
    (("minecraft:sweet_berries", 0), ("minecraft:sweet_berry_bush", 0)),
    (("minecraft:glow_berries", 0), ("minecraft:cave_vines", 0)),
    (("minecraft:sugar_cane", 0), ("minecraft:reeds", 0)),
    (("minecraft:bamboo", 0), ("minecraft:bamboo_sapling", 0)),
    (("minecraft:torchflower_seeds", 0), ("minecraft:torchflower_crop", 0)),
    (("minecraft:pitcher_pod", 0), ("minecraft:pitcher_crop", 0)),
];

/// The default auto-planting whitelist
pub fn default_saplings() -> BTreeSet<ItemKey> {
    DEFAULT_SAPLINGS
        .iter()
        .map(|&(name, aux)| ItemKey::new(name, aux))
        .collect()
}

/// Block placed when `item` is planted
pub fn planted_block(item: &ItemKey) -> ItemKey {
    PLANTED_AS
        .iter()
        .find(|((name, aux), _)| *name == item.name() && *aux == item.aux())
        .map(|(_, (name, aux))| ItemKey::new(*name, *aux))
        .unwrap_or_else(|| item.clone())
}

/// Whether a dropped item should be watched for planting
pub fn is_plantable(whitelist: &BTreeSet<ItemKey>, item: &ItemKey) -> bool {
    whitelist.contains(item) || item.name().contains("sapling")
}
