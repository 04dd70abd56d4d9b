//! In-memory engine binding
//!
//! Backs the server system with a [`BlockGrid`], a small item registry and a
//! table of dropped item entities. Everything the server sends to players is
//! queued in an outbox for inspection.

use std::collections::{HashMap, HashSet};

use glam::{IVec3, Vec3};
use serde_json::Value;

use super::host::Host;
use super::items::AXE_ITEM_TYPE;
use crate::core::{EntityId, ItemInfo, ItemStack, PlayerId};
use crate::felling::species::log_state_from_aux;
use crate::felling::DestructionExecutor;
use crate::world::block::names;
use crate::world::{BlockGrid, BlockSample, BlockState, WorldQuery};

const AXES: [&str; 6] = [
    "minecraft:wooden_axe",
    "minecraft:stone_axe",
    "minecraft:iron_axe",
    "minecraft:golden_axe",
    "minecraft:diamond_axe",
    "minecraft:netherite_axe",
];

const TOOLS: [&str; 3] = ["minecraft:iron_sword", "minecraft:iron_pickaxe", "minecraft:shears"];

/// Blocks plants may be placed on
const SOILS: [&str; 9] = [
    names::DIRT,
    names::GRASS,
    names::FARMLAND,
    "minecraft:podzol",
    "minecraft:dirt_with_roots",
    "minecraft:moss_block",
    "minecraft:mycelium",
    "minecraft:crimson_nylium",
    "minecraft:warped_nylium",
];

/// Something the server sent out
#[derive(Clone, Debug, PartialEq)]
pub enum Outgoing {
    Client { player: PlayerId, event: String, payload: Value },
    Broadcast { event: String, payload: Value },
    Tip { player: PlayerId, message: String },
    Message { player: PlayerId, message: String },
}

/// A dropped item lying in the world
#[derive(Clone, Debug, PartialEq)]
pub struct DroppedEntity {
    pub item: ItemStack,
    pub pos: Vec3,
}

/// Headless [`Host`] implementation
pub struct SandboxHost {
    pub grid: BlockGrid,
    carried: HashMap<PlayerId, ItemStack>,
    items: HashMap<String, ItemInfo>,
    entities: HashMap<EntityId, DroppedEntity>,
    next_entity: i64,
    soils: HashSet<&'static str>,
    /// Breaks caused by `destroy`, awaiting the server
    break_events: Vec<IVec3>,
    outbox: Vec<Outgoing>,
}

impl SandboxHost {
    /// Create a host with an empty world and the vanilla axes registered
    pub fn new() -> Self {
        let mut items = HashMap::new();
        for axe in AXES {
            items.insert(axe.to_owned(), ItemInfo { item_type: AXE_ITEM_TYPE.to_owned(), max_stack_size: 1 });
        }
        for tool in TOOLS {
            items.insert(tool.to_owned(), ItemInfo { item_type: "tool".to_owned(), max_stack_size: 1 });
        }
        Self {
            grid: BlockGrid::new(),
            carried: HashMap::new(),
            items,
            entities: HashMap::new(),
            next_entity: -1,
            soils: SOILS.into_iter().collect(),
            break_events: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Put a stack in the player's hand (`None` empties it)
    pub fn set_carried(&mut self, player: &str, item: Option<ItemStack>) {
        match item {
            Some(item) => self.carried.insert(player.to_owned(), item),
            None => self.carried.remove(player),
        };
    }

    /// Drop a stack into the world, returning its entity id
    pub fn drop_item(&mut self, item: ItemStack, pos: Vec3) -> EntityId {
        let id = self.next_entity.to_string();
        self.next_entity -= 1;
        self.entities.insert(id.clone(), DroppedEntity { item, pos });
        id
    }

    /// All dropped items currently in the world
    pub fn entities(&self) -> impl Iterator<Item = (&EntityId, &DroppedEntity)> {
        self.entities.iter()
    }

    pub fn outbox(&self) -> &[Outgoing] {
        &self.outbox
    }

    /// Take everything sent so far
    pub fn take_outbox(&mut self) -> Vec<Outgoing> {
        std::mem::take(&mut self.outbox)
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldQuery for SandboxHost {
    fn sample_block(&self, pos: IVec3) -> Option<BlockSample> {
        self.grid.sample_block(pos)
    }

    fn sample_block_state(&self, pos: IVec3) -> Option<BlockState> {
        self.grid.sample_block_state(pos)
    }
}

impl DestructionExecutor for SandboxHost {
    fn destroy(&mut self, pos: IVec3, drop_loot: bool) {
        if self.grid.contains(pos) {
            self.break_events.push(pos);
        }
        self.grid.break_block(pos, drop_loot);
    }
}

impl Host for SandboxHost {
    fn block_states_from_aux(&self, block: &str, aux: u16) -> Option<BlockState> {
        log_state_from_aux(block, aux).or_else(|| Some(BlockState::new()))
    }

    fn carried_item(&self, player: &str) -> Option<ItemStack> {
        self.carried.get(player).cloned()
    }

    fn item_info(&self, item: &str, _aux: u16) -> Option<ItemInfo> {
        self.items.get(item).cloned()
    }

    fn is_entity_alive(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    fn entity_foot_pos(&self, entity: &str) -> Option<Vec3> {
        self.entities.get(entity).map(|dropped| dropped.pos)
    }

    fn dropped_item(&self, entity: &str) -> Option<ItemStack> {
        self.entities.get(entity).map(|dropped| dropped.item.clone())
    }

    fn destroy_entity(&mut self, entity: &str) {
        self.entities.remove(entity);
    }

    fn spawn_item(&mut self, item: ItemStack, pos: Vec3) {
        self.drop_item(item, pos);
    }

    fn may_place(&self, _block: &str, _aux: u16, pos: IVec3) -> bool {
        let free = self.grid.sample_block(pos).is_none_or(|block| block.is_replaceable());
        let supported = self
            .grid
            .sample_block(pos - IVec3::Y)
            .is_some_and(|below| self.soils.contains(below.name.as_str()));
        free && supported
    }

    fn set_block(&mut self, pos: IVec3, block: &str, aux: u16) {
        self.grid.set_block(pos, block, aux);
    }

    fn take_break_events(&mut self) -> Vec<IVec3> {
        std::mem::take(&mut self.break_events)
    }

    fn notify_client(&mut self, player: &str, event: &str, payload: Value) {
        self.outbox.push(Outgoing::Client { player: player.to_owned(), event: event.to_owned(), payload });
    }

    fn broadcast(&mut self, event: &str, payload: Value) {
        self.outbox.push(Outgoing::Broadcast { event: event.to_owned(), payload });
    }

    fn tip(&mut self, player: &str, message: &str) {
        self.outbox.push(Outgoing::Tip { player: player.to_owned(), message: message.to_owned() });
    }

    fn message(&mut self, player: &str, message: &str) {
        self.outbox.push(Outgoing::Message { player: player.to_owned(), message: message.to_owned() });
    }
}
