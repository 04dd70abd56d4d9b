//! Server system: chain-felling, auto-planting and master settings

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use glam::IVec3;
use serde::Deserialize;
use serde_json::Value;

use super::events::EventTable;
use super::host::Host;
use super::items::AxeCache;
use crate::config::{ConfigStore, MasterSetting};
use crate::core::{block_pos, EntityId, Error, ItemKey, ItemStack, PlayerId, Result};
use crate::felling::{execute_fell, find_connected_log_cluster, DestructionGuard, SpeciesKey};
use crate::planting::{planted_block, remainder_after_planting, resolve_plant_site};

/// Event names handled or sent by the server
pub mod events {
    pub const PLAYER_JOINED: &str = "ClientLoadAddonsFinishServerEvent";
    pub const PLAYER_LEFT: &str = "DelServerPlayerEvent";
    pub const CARRIED_ITEM_CHANGED: &str = "OnCarriedNewItemChangedServerEvent";
    pub const CHAT: &str = "ServerChatEvent";
    pub const DESTROY_BLOCK: &str = "DestroyBlockEvent";
    pub const SYNC_TREE_FELLING_STATE: &str = "SyncPlayerTreeFallingState";
    pub const RELOAD_MASTER_SETTING: &str = "ReloadMasterSetting";
    pub const SAPLING_ON_GROUND: &str = "onSaplingOnGround";
    pub const SYNC_MASTER_SETTING: &str = "SyncMasterSetting";
}

/// Chat command toggling the carried item in the planting whitelist
pub const SAPLING_COMMAND: &str = "#hpldsg";
/// Chat command toggling the carried block as a log
pub const LOG_COMMAND: &str = "#hpldsgmt";

const CHAT_PREFIX: &str = "§a[Saplanting]";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerJoined {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct PlayerLeft {
    id: PlayerId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeFellingState {
    #[serde(alias = "__id__")]
    player_id: PlayerId,
    state: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarriedItemChanged {
    player_id: PlayerId,
    #[serde(default)]
    new_item_dict: Option<ItemStack>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Chat {
    player_id: PlayerId,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaplingOnGround {
    #[serde(alias = "__id__")]
    player_id: PlayerId,
    entity_id: EntityId,
    item_name: String,
    #[serde(default)]
    aux_value: u16,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DestroyBlock {
    x: i32,
    y: i32,
    z: i32,
    full_name: String,
    #[serde(default)]
    aux_data: u16,
    player_id: PlayerId,
    #[serde(default)]
    dimension_id: i32,
}

/// Server-side system
pub struct SaplantingServer<H: Host> {
    host: H,
    store: ConfigStore,
    master_setting: MasterSetting,
    /// First player to join; the only one allowed to run chat commands
    master_id: Option<PlayerId>,
    /// Players currently in the session
    players: HashSet<PlayerId>,
    /// Per-player chain-felling toggles pushed by clients
    tree_felling_state: HashMap<PlayerId, bool>,
    guard: DestructionGuard,
    axes: AxeCache,
    events: Rc<EventTable<Self>>,
}

impl<H: Host> SaplantingServer<H> {
    /// Create the server system, loading master settings from `store`.
    /// A corrupt settings document falls back to defaults.
    pub fn new(host: H, store: ConfigStore) -> Self {
        let master_setting = MasterSetting::load(&store).unwrap_or_else(|e| {
            log::warn!("Failed to load master settings, using defaults: {}", e);
            MasterSetting::default()
        });
        Self {
            host,
            store,
            master_setting,
            master_id: None,
            players: HashSet::new(),
            tree_felling_state: HashMap::new(),
            guard: DestructionGuard::new(),
            axes: AxeCache::new(),
            events: Rc::new(Self::event_table()),
        }
    }

    fn event_table() -> EventTable<Self> {
        let mut table = EventTable::new();
        table
            .on(events::PLAYER_JOINED, Self::on_player_joined)
            .on(events::PLAYER_LEFT, Self::on_player_left)
            .on(events::CARRIED_ITEM_CHANGED, Self::on_carried_item_changed)
            .on(events::CHAT, Self::on_chat)
            .on(events::DESTROY_BLOCK, Self::on_destroy_block)
            .on(events::SYNC_TREE_FELLING_STATE, Self::on_sync_tree_felling_state)
            .on(events::RELOAD_MASTER_SETTING, Self::on_reload_master_setting)
            .on(events::SAPLING_ON_GROUND, Self::on_sapling_on_ground);
        table
    }

    /// Route a host or client event. Returns `false` for events the server ignores.
    pub fn dispatch(&mut self, event: &str, payload: &mut Value) -> Result<bool> {
        let events = Rc::clone(&self.events);
        events.dispatch(self, event, payload)
    }

    pub fn handled_events(&self) -> Vec<&'static str> {
        self.events.events()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn master_setting(&self) -> &MasterSetting {
        &self.master_setting
    }

    pub fn master_setting_mut(&mut self) -> &mut MasterSetting {
        &mut self.master_setting
    }

    pub fn master_id(&self) -> Option<&str> {
        self.master_id.as_deref()
    }

    pub fn is_joined(&self, player: &str) -> bool {
        self.players.contains(player)
    }

    pub fn guard(&self) -> &DestructionGuard {
        &self.guard
    }

    pub fn guard_mut(&mut self) -> &mut DestructionGuard {
        &mut self.guard
    }

    /// Whether the player has chain-felling switched on (off until their client reports)
    pub fn tree_felling_enabled(&self, player: &str) -> bool {
        self.tree_felling_state.get(player).copied().unwrap_or(false)
    }

    fn sync_payload(&self, add_min_wait_time: bool, add_saplings: bool) -> Result<Value> {
        Ok(serde_json::to_value(self.master_setting.client_data(add_min_wait_time, add_saplings))?)
    }

    fn on_player_joined(&mut self, payload: &mut Value) -> Result<()> {
        let event = PlayerJoined::deserialize(&*payload)?;
        if self.master_id.is_none() {
            log::info!("Player {} is the session master", event.player_id);
            self.master_id = Some(event.player_id.clone());
        }
        self.players.insert(event.player_id.clone());
        self.guard.join(&event.player_id);
        let data = self.sync_payload(true, true)?;
        self.host.notify_client(&event.player_id, events::SYNC_MASTER_SETTING, data);
        Ok(())
    }

    fn on_player_left(&mut self, payload: &mut Value) -> Result<()> {
        let event = PlayerLeft::deserialize(&*payload)?;
        self.players.remove(&event.id);
        self.guard.leave(&event.id);
        Ok(())
    }

    fn on_sync_tree_felling_state(&mut self, payload: &mut Value) -> Result<()> {
        let event = TreeFellingState::deserialize(&*payload)?;
        log::debug!("Player {} chain-felling: {}", event.player_id, event.state);
        self.tree_felling_state.insert(event.player_id, event.state);
        Ok(())
    }

    fn on_carried_item_changed(&mut self, payload: &mut Value) -> Result<()> {
        if !self.master_setting.tree_felling {
            return Ok(());
        }
        let event = CarriedItemChanged::deserialize(&*payload)?;
        let Some(item) = event.new_item_dict else {
            return Ok(());
        };
        if self.axes.is_axe(&self.host, &item.name, item.aux) {
            let state = if self.tree_felling_enabled(&event.player_id) { "§aon" } else { "§coff" };
            self.host.tip(&event.player_id, &format!("Chain felling: {}", state));
        }
        Ok(())
    }

    fn on_chat(&mut self, payload: &mut Value) -> Result<()> {
        let event = Chat::deserialize(&*payload)?;
        if self.master_id.as_deref() != Some(event.player_id.as_str()) {
            return Ok(());
        }
        let command = event.message.to_lowercase();
        if command != SAPLING_COMMAND && command != LOG_COMMAND {
            return Ok(());
        }
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("cancel".to_owned(), Value::Bool(true));
        }

        let player = event.player_id;
        let Some(item) = self.host.carried_item(&player) else {
            self.host.message(&player, &format!("{}§c Nothing in hand, command ignored", CHAT_PREFIX));
            return Ok(());
        };

        if command == SAPLING_COMMAND {
            let key = item.key();
            let added = self.master_setting.toggle_sapling(key.clone());
            self.master_setting.save(&self.store)?;
            let data = self.sync_payload(false, true)?;
            self.host.broadcast(events::SYNC_MASTER_SETTING, data);
            let message = if added {
                format!("{}§a Added {} to the planting whitelist", CHAT_PREFIX, key)
            } else {
                format!("{}§a Removed {} from the planting whitelist", CHAT_PREFIX, key)
            };
            self.host.message(&player, &message);
        } else {
            let added = self.master_setting.toggle_log_block(&item.name);
            self.master_setting.save(&self.store)?;
            let message = if added {
                format!("{}§a {} is now felled as a log, ignoring aux values", CHAT_PREFIX, item.name)
            } else {
                format!("{}§a {} is no longer treated as a log", CHAT_PREFIX, item.name)
            };
            self.host.message(&player, &message);
        }
        Ok(())
    }

    fn on_reload_master_setting(&mut self, _payload: &mut Value) -> Result<()> {
        self.master_setting.reload(&self.store)?;
        let data = self.sync_payload(true, false)?;
        self.host.broadcast(events::SYNC_MASTER_SETTING, data);
        Ok(())
    }

    fn on_sapling_on_ground(&mut self, payload: &mut Value) -> Result<()> {
        let event = SaplingOnGround::deserialize(&*payload)?;
        if !self.is_joined(&event.player_id) {
            return Err(Error::UnknownPlayer(event.player_id));
        }
        log::trace!("Player {} reports {} landed", event.player_id, event.entity_id);
        self.plant_dropped_item(&event.entity_id, ItemKey::new(event.item_name, event.aux_value));
        Ok(())
    }

    /// Plant one item from a landed dropped stack. Returns whether a block was placed.
    pub fn plant_dropped_item(&mut self, entity: &str, item: ItemKey) -> bool {
        if !self.host.is_entity_alive(entity) {
            // Picked up or despawned while the client waited
            return false;
        }
        let Some(foot) = self.host.entity_foot_pos(entity) else {
            return false;
        };
        let Some(site) = resolve_plant_site(&self.host, block_pos(foot)) else {
            log::trace!("No plant site under {}", entity);
            return false;
        };

        let block = planted_block(&item);
        if !self.host.may_place(block.name(), block.aux(), site) {
            return false;
        }
        let Some(stack) = self.host.dropped_item(entity) else {
            return false;
        };

        self.host.destroy_entity(entity);
        self.host.set_block(site, block.name(), block.aux());
        if let Some(remainder) = remainder_after_planting(&stack) {
            self.host.spawn_item(remainder, foot);
        }
        log::debug!("Planted {} at {}", block, site);
        true
    }

    fn on_destroy_block(&mut self, payload: &mut Value) -> Result<()> {
        if !self.master_setting.felling_enabled() {
            return Ok(());
        }
        let event = DestroyBlock::deserialize(&*payload)?;
        let config = self.master_setting.felling_config();
        if !config.is_log(&event.full_name) {
            return Ok(());
        }

        let pos = IVec3::new(event.x, event.y, event.z);
        let player = event.player_id.as_str();
        if self.guard.take_pending(player, pos) {
            // Fired by our own chain-fell
            return Ok(());
        }
        if !self.tree_felling_enabled(player) {
            return Ok(());
        }
        let Some(hand) = self.host.carried_item(player) else {
            return Ok(());
        };
        if !self.axes.is_axe(&self.host, &hand.name, hand.aux) {
            return Ok(());
        }

        let origin_state = self.host.block_states_from_aux(&event.full_name, event.aux_data);
        let species = SpeciesKey::from_block(&event.full_name, origin_state.as_ref());

        match find_connected_log_cluster(pos, &species, &config, &self.host) {
            Ok(affected) => {
                let player = event.player_id.clone();
                self.fell(&player, &affected);
                log::info!(
                    "Player {} felled {} extra logs at {} in dimension {}",
                    player,
                    affected.len(),
                    pos,
                    event.dimension_id
                );
            }
            Err(_) => {
                log::debug!("Chain-fell declined for {} at {}", event.player_id, pos);
            }
        }
        Ok(())
    }

    /// Destroy a planned cluster on behalf of `player`, suppressing the break
    /// events the destruction triggers
    pub fn fell(&mut self, player: &str, affected: &[IVec3]) {
        if affected.is_empty() {
            return;
        }
        self.guard.register(player, affected);
        execute_fell(&mut self.host, affected);
        for pos in self.host.take_break_events() {
            if !self.guard.take_pending(player, pos) {
                log::warn!("Unplanned break at {} during chain-fell by {}", pos, player);
            }
        }
        self.guard.clear(player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sandbox::{Outgoing, SandboxHost};
    use crate::world::block::{keys, names};
    use crate::world::{BlockState, WorldQuery};
    use glam::Vec3;
    use serde_json::json;
    use tempfile::TempDir;

    const OAK: &str = "minecraft:oak_log";

    fn server(temp_dir: &TempDir) -> SaplantingServer<SandboxHost> {
        SaplantingServer::new(SandboxHost::new(), ConfigStore::new(temp_dir.path()))
    }

    /// Join `player`, enable felling and hand them an axe
    fn ready_lumberjack(server: &mut SaplantingServer<SandboxHost>, player: &str) {
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": player})).unwrap();
        server
            .dispatch(events::SYNC_TREE_FELLING_STATE, &mut json!({"playerId": player, "state": true}))
            .unwrap();
        server
            .host_mut()
            .set_carried(player, Some(ItemStack::new("minecraft:iron_axe", 0, 1)));
    }

    /// Oak trunk from y=1 to y=5 with natural leaves on top; the base at y=0 is already broken
    fn plant_tree(host: &mut SandboxHost) {
        for y in 1..=5 {
            host.grid.set_block(IVec3::new(0, y, 0), OAK, 0);
        }
        host.grid.set_block_with_state(
            IVec3::new(0, 6, 0),
            names::LEAVES,
            0,
            BlockState::new().with(keys::PERSISTENT_BIT, false),
        );
    }

    fn break_base(server: &mut SaplantingServer<SandboxHost>, player: &str) {
        let mut payload = json!({
            "x": 0, "y": 0, "z": 0,
            "fullName": OAK, "auxData": 0,
            "playerId": player, "dimensionId": 0
        });
        server.dispatch(events::DESTROY_BLOCK, &mut payload).unwrap();
    }

    #[test]
    fn test_handled_events() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let server = server(&temp_dir);
        assert_eq!(server.handled_events().len(), 8);
        assert!(server.handled_events().contains(&events::DESTROY_BLOCK));
    }

    #[test]
    fn test_first_player_is_master_and_gets_sync() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);

        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "alex"})).unwrap();
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "steve"})).unwrap();

        assert_eq!(server.master_id(), Some("alex"));
        assert!(server.guard().is_tracked("steve"));
        let outbox = server.host_mut().take_outbox();
        assert_eq!(outbox.len(), 2);
        match &outbox[0] {
            Outgoing::Client { player, event, payload } => {
                assert_eq!(player, "alex");
                assert_eq!(event, events::SYNC_MASTER_SETTING);
                assert_eq!(payload["min_wait_time"], 3);
                assert!(payload["saplings"].is_array());
            }
            other => panic!("unexpected outgoing {:?}", other),
        }

        assert!(server.is_joined("alex") && server.is_joined("steve"));

        server.dispatch(events::PLAYER_LEFT, &mut json!({"id": "steve"})).unwrap();
        assert!(!server.guard().is_tracked("steve"));
        assert!(!server.is_joined("steve"));
    }

    #[test]
    fn test_chain_fell_natural_tree() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        plant_tree(server.host_mut());

        break_base(&mut server, "steve");

        let host = server.host();
        for y in 1..=5 {
            assert!(host.sample_block(IVec3::new(0, y, 0)).is_none(), "log at y={} survived", y);
        }
        assert!(host.sample_block(IVec3::new(0, 6, 0)).is_some());
        assert_eq!(host.grid.drops().len(), 1);
        assert_eq!(host.grid.drops()[0].0, IVec3::new(0, 5, 0));
        assert_eq!(server.guard().pending_count("steve"), 0);
    }

    #[test]
    fn test_built_structure_not_felled() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        for y in 1..=3 {
            server.host_mut().grid.set_block(IVec3::new(0, y, 0), OAK, 0);
        }

        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 3);
    }

    #[test]
    fn test_no_fell_without_axe_or_toggle() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        plant_tree(server.host_mut());

        server
            .host_mut()
            .set_carried("steve", Some(ItemStack::new("minecraft:iron_sword", 0, 1)));
        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 6);

        server
            .host_mut()
            .set_carried("steve", Some(ItemStack::new("minecraft:diamond_axe", 0, 1)));
        server
            .dispatch(events::SYNC_TREE_FELLING_STATE, &mut json!({"__id__": "steve", "state": false}))
            .unwrap();
        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 6);
    }

    #[test]
    fn test_disabled_or_zero_limit_does_nothing() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        plant_tree(server.host_mut());

        server.master_setting_mut().tree_felling_limit_count = 0;
        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 6);

        server.master_setting_mut().tree_felling_limit_count = 255;
        server.master_setting_mut().tree_felling = false;
        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 6);
    }

    #[test]
    fn test_non_log_block_ignored() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        plant_tree(server.host_mut());

        let mut payload = json!({"x": 0, "y": 0, "z": 0, "fullName": "minecraft:stone", "playerId": "steve"});
        server.dispatch(events::DESTROY_BLOCK, &mut payload).unwrap();
        assert_eq!(server.host().grid.block_count(), 6);
    }

    #[test]
    fn test_own_destruction_suppressed_once() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        plant_tree(server.host_mut());

        server.guard_mut().register("steve", &[IVec3::ZERO]);
        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 6);
        assert_eq!(server.guard().pending_count("steve"), 0);

        break_base(&mut server, "steve");
        assert_eq!(server.host().grid.block_count(), 1);
    }

    #[test]
    fn test_capped_fell_consumes_its_own_break_events() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        server.master_setting_mut().tree_felling_limit_count = 4;

        let grid = &mut server.host_mut().grid;
        for y in 1..=12 {
            grid.set_block(IVec3::new(0, y, 0), OAK, 0);
        }
        grid.set_block_with_state(
            IVec3::new(1, 1, 0),
            names::LEAVES,
            0,
            BlockState::new().with(keys::PERSISTENT_BIT, false),
        );

        break_base(&mut server, "steve");

        let logs_left = |server: &SaplantingServer<SandboxHost>| {
            (1..=12)
                .filter(|&y| server.host().sample_block(IVec3::new(0, y, 0)).is_some())
                .count()
        };
        assert_eq!(logs_left(&server), 8);
        assert!(server.host_mut().take_break_events().is_empty());
        assert_eq!(server.guard().pending_count("steve"), 0);

        // The next player break starts a fresh, equally capped batch
        let mut payload = json!({
            "x": 0, "y": 4, "z": 0,
            "fullName": OAK, "auxData": 0, "playerId": "steve"
        });
        server.host_mut().grid.set_block_with_state(
            IVec3::new(1, 5, 0),
            names::LEAVES,
            0,
            BlockState::new().with(keys::PERSISTENT_BIT, false),
        );
        server.dispatch(events::DESTROY_BLOCK, &mut payload).unwrap();
        assert_eq!(logs_left(&server), 4);
    }

    #[test]
    fn test_multiplexed_log_species_from_aux() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        ready_lumberjack(&mut server, "steve");
        server.master_setting_mut().check_leave_persistent_bit = false;

        let birch = BlockState::new().with(keys::OLD_LOG_TYPE, "birch");
        let oak = BlockState::new().with(keys::OLD_LOG_TYPE, "oak");
        let grid = &mut server.host_mut().grid;
        grid.set_block_with_state(IVec3::new(0, 1, 0), names::LOG, 2, birch.clone());
        grid.set_block_with_state(IVec3::new(0, 2, 0), names::LOG, 2, birch);
        grid.set_block_with_state(IVec3::new(1, 1, 0), names::LOG, 0, oak);

        let mut payload = json!({"x": 0, "y": 0, "z": 0, "fullName": names::LOG, "auxData": 2, "playerId": "steve"});
        server.dispatch(events::DESTROY_BLOCK, &mut payload).unwrap();

        let host = server.host();
        assert!(host.sample_block(IVec3::new(0, 1, 0)).is_none());
        assert!(host.sample_block(IVec3::new(0, 2, 0)).is_none());
        assert!(host.sample_block(IVec3::new(1, 1, 0)).is_some());
    }

    #[test]
    fn test_axe_tip_shows_toggle() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "steve"})).unwrap();
        server.host_mut().take_outbox();

        let mut payload = json!({
            "playerId": "steve",
            "newItemDict": {"newItemName": "minecraft:stone_axe", "newAuxValue": 0, "count": 1}
        });
        server.dispatch(events::CARRIED_ITEM_CHANGED, &mut payload).unwrap();

        let mut empty_hand = json!({"playerId": "steve", "newItemDict": null});
        server.dispatch(events::CARRIED_ITEM_CHANGED, &mut empty_hand).unwrap();

        assert_eq!(
            server.host().outbox(),
            &[Outgoing::Tip { player: "steve".into(), message: "Chain felling: §coff".into() }]
        );
    }

    #[test]
    fn test_sapling_command_toggles_whitelist() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "alex"})).unwrap();
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "steve"})).unwrap();
        server.host_mut().take_outbox();

        let cocoa = ItemStack::new("minecraft:cocoa_beans", 0, 4);
        server.host_mut().set_carried("alex", Some(cocoa.clone()));
        server.host_mut().set_carried("steve", Some(cocoa.clone()));

        // Only the master may run commands
        let mut payload = json!({"playerId": "steve", "message": "#HPLDSG"});
        server.dispatch(events::CHAT, &mut payload).unwrap();
        assert!(payload.get("cancel").is_none());
        assert!(!server.master_setting().saplings.contains(&cocoa.key()));

        let mut payload = json!({"playerId": "alex", "message": "#HPLDSG"});
        server.dispatch(events::CHAT, &mut payload).unwrap();
        assert_eq!(payload["cancel"], json!(true));
        assert!(server.master_setting().saplings.contains(&cocoa.key()));
        assert!(server
            .host()
            .outbox()
            .iter()
            .any(|out| matches!(out, Outgoing::Broadcast { event, .. } if event == events::SYNC_MASTER_SETTING)));

        // Persisted
        let reloaded = MasterSetting::load(&ConfigStore::new(temp_dir.path())).unwrap();
        assert!(reloaded.saplings.contains(&cocoa.key()));

        server.dispatch(events::CHAT, &mut json!({"playerId": "alex", "message": "#hpldsg"})).unwrap();
        assert!(!server.master_setting().saplings.contains(&cocoa.key()));
    }

    #[test]
    fn test_log_command_and_empty_hand() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "alex"})).unwrap();
        server.host_mut().take_outbox();

        server.dispatch(events::CHAT, &mut json!({"playerId": "alex", "message": "#hpldsgmt"})).unwrap();
        assert!(matches!(server.host().outbox(), [Outgoing::Message { .. }]));

        server
            .host_mut()
            .set_carried("alex", Some(ItemStack::new("custom:palm_log", 3, 1)));
        server.dispatch(events::CHAT, &mut json!({"playerId": "alex", "message": "#hpldsgmt"})).unwrap();
        assert!(server.master_setting().log_blocks.contains("custom:palm_log"));

        let mut chatter = json!({"playerId": "alex", "message": "hello"});
        server.dispatch(events::CHAT, &mut chatter).unwrap();
        assert!(chatter.get("cancel").is_none());
    }

    #[test]
    fn test_reload_broadcasts_wait_time_only() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = ConfigStore::new(temp_dir.path());
        let mut server = server(&temp_dir);

        let mut edited = MasterSetting::default();
        edited.min_wait_time = 9;
        edited.save(&store).unwrap();

        server.dispatch(events::RELOAD_MASTER_SETTING, &mut json!({})).unwrap();
        assert_eq!(server.master_setting().min_wait_time, 9);
        match server.host().outbox() {
            [Outgoing::Broadcast { payload, .. }] => {
                assert_eq!(payload["min_wait_time"], 9);
                assert!(payload.get("saplings").is_none());
            }
            other => panic!("unexpected outbox {:?}", other),
        }
    }

    #[test]
    fn test_plant_single_sapling() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "steve"})).unwrap();
        server.host_mut().grid.set_block(IVec3::new(0, 63, 0), names::GRASS, 0);
        let entity = server
            .host_mut()
            .drop_item(ItemStack::new("minecraft:sapling", 2, 1), Vec3::new(0.4, 64.0, 0.6));

        let mut payload = json!({
            "playerId": "steve", "entityId": entity,
            "itemName": "minecraft:sapling", "auxValue": 2
        });
        server.dispatch(events::SAPLING_ON_GROUND, &mut payload).unwrap();

        let host = server.host();
        assert!(!host.is_entity_alive(&entity));
        let planted = host.sample_block(IVec3::new(0, 64, 0)).unwrap();
        assert_eq!(planted.name, "minecraft:sapling");
        assert_eq!(planted.aux, 2);
        assert_eq!(host.entities().count(), 0);
    }

    #[test]
    fn test_planting_request_from_unknown_player() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        let mut payload = json!({"playerId": "ghost", "entityId": "-1", "itemName": "minecraft:sapling"});
        let result = server.dispatch(events::SAPLING_ON_GROUND, &mut payload);
        assert!(matches!(result, Err(Error::UnknownPlayer(player)) if player == "ghost"));

        server.dispatch(events::PLAYER_JOINED, &mut json!({"playerId": "ghost"})).unwrap();
        server.dispatch(events::PLAYER_LEFT, &mut json!({"id": "ghost"})).unwrap();
        let result = server.dispatch(events::SAPLING_ON_GROUND, &mut payload);
        assert!(matches!(result, Err(Error::UnknownPlayer(_))));
    }

    #[test]
    fn test_plant_from_stack_respawns_rest() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        server.host_mut().grid.set_block(IVec3::new(3, 63, 3), names::FARMLAND, 0);
        let entity = server
            .host_mut()
            .drop_item(ItemStack::new("minecraft:potato", 0, 3), Vec3::new(3.5, 63.9, 3.5));

        assert!(server.plant_dropped_item(&entity, ItemKey::new("minecraft:potato", 0)));

        let host = server.host();
        assert_eq!(host.sample_block(IVec3::new(3, 64, 3)).unwrap().name, "minecraft:potatoes");
        let rest: Vec<_> = host.entities().map(|(_, dropped)| dropped.item.count).collect();
        assert_eq!(rest, vec![2]);
    }

    #[test]
    fn test_plant_rejected_on_stone_or_missing_entity() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        server.host_mut().grid.set_block(IVec3::new(0, 63, 0), "minecraft:stone", 0);
        let entity = server
            .host_mut()
            .drop_item(ItemStack::new("minecraft:sapling", 0, 1), Vec3::new(0.5, 64.0, 0.5));

        assert!(!server.plant_dropped_item(&entity, ItemKey::new("minecraft:sapling", 0)));
        assert!(server.host().is_entity_alive(&entity));
        assert!(!server.plant_dropped_item("-999", ItemKey::new("minecraft:sapling", 0)));
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut server = server(&temp_dir);
        let result = server.dispatch(events::PLAYER_JOINED, &mut json!({"player": 1}));
        assert!(matches!(result, Err(crate::core::Error::Json(_))));
    }
}
