//! Capabilities the systems need from the game engine

use glam::{IVec3, Vec3};
use serde_json::Value;

use crate::core::{ItemInfo, ItemStack};
use crate::felling::DestructionExecutor;
use crate::world::{BlockState, WorldQuery};

/// Server-side engine binding
pub trait Host: WorldQuery + DestructionExecutor {
    /// Decode a block's state from its legacy aux value
    fn block_states_from_aux(&self, block: &str, aux: u16) -> Option<BlockState>;

    /// Item in the player's main hand
    fn carried_item(&self, player: &str) -> Option<ItemStack>;

    /// Static properties of an item type
    fn item_info(&self, item: &str, aux: u16) -> Option<ItemInfo>;

    fn is_entity_alive(&self, entity: &str) -> bool;

    /// Position of an entity's feet
    fn entity_foot_pos(&self, entity: &str) -> Option<Vec3>;

    /// Stack carried by a dropped item entity
    fn dropped_item(&self, entity: &str) -> Option<ItemStack>;

    fn destroy_entity(&mut self, entity: &str);

    /// Drop a stack into the world at `pos`
    fn spawn_item(&mut self, item: ItemStack, pos: Vec3);

    /// Whether `block` could be placed at `pos` on top of what is below it
    fn may_place(&self, block: &str, aux: u16, pos: IVec3) -> bool;

    fn set_block(&mut self, pos: IVec3, block: &str, aux: u16);

    /// Break events raised by [`DestructionExecutor::destroy`] since the last call.
    /// The server consumes these itself; a host must not also dispatch them as
    /// `DestroyBlockEvent`.
    fn take_break_events(&mut self) -> Vec<IVec3>;

    /// Send a named event to one client
    fn notify_client(&mut self, player: &str, event: &str, payload: Value);

    /// Send a named event to every client
    fn broadcast(&mut self, event: &str, payload: Value);

    /// Short on-screen tip
    fn tip(&mut self, player: &str, message: &str);

    /// Chat message to one player
    fn message(&mut self, player: &str, message: &str);
}

/// Client-side engine binding
pub trait ClientLink {
    /// The local player
    fn player_id(&self) -> &str;

    /// Send a named event to the server
    fn notify_server(&mut self, event: &str, payload: Value);

    /// Whether an entity is currently resting on the ground
    fn is_on_ground(&self, entity: &str) -> bool;
}
