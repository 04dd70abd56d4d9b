//! Client system: watches dropped plantables and owns the felling toggle

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};

use super::events::EventTable;
use super::host::ClientLink;
use super::server::events as server_events;
use crate::config::{ClientMasterSetting, ClientSetting, ConfigStore, MasterSyncData};
use crate::core::{EntityId, ItemKey, Result};
use crate::planting::SaplingTracker;

/// Event names handled by the client
pub mod events {
    pub const ADD_ENTITY: &str = "AddEntityClientEvent";
    pub const REMOVE_ENTITY: &str = "RemoveEntityClientEvent";
    pub const ON_GROUND: &str = "OnGroundClientEvent";
    pub const UI_INIT_FINISHED: &str = "UiInitFinished";
    pub use crate::system::server::events::SYNC_MASTER_SETTING;
}

/// Engine type of dropped item entities
const ITEM_ENTITY_TYPE: &str = "minecraft:item";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityAdded {
    id: EntityId,
    engine_type_str: String,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    aux_value: u16,
}

#[derive(Deserialize)]
struct EntityRef {
    id: EntityId,
}

/// Client-side system
pub struct SaplantingClient<L: ClientLink> {
    link: L,
    store: ConfigStore,
    client_setting: ClientSetting,
    master_setting: ClientMasterSetting,
    tracker: SaplingTracker,
    rng: StdRng,
    events: Rc<EventTable<Self>>,
}

impl<L: ClientLink> SaplantingClient<L> {
    pub fn new(link: L, store: ConfigStore) -> Self {
        Self::with_rng(link, store, StdRng::from_entropy())
    }

    /// Create a client with a fixed timer seed
    pub fn with_seed(link: L, store: ConfigStore, seed: u64) -> Self {
        Self::with_rng(link, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(link: L, store: ConfigStore, rng: StdRng) -> Self {
        let client_setting = ClientSetting::load(&store).unwrap_or_else(|e| {
            log::warn!("Failed to load client settings, using defaults: {}", e);
            ClientSetting::default()
        });
        Self {
            link,
            store,
            client_setting,
            master_setting: ClientMasterSetting::default(),
            tracker: SaplingTracker::new(),
            rng,
            events: Rc::new(Self::event_table()),
        }
    }

    fn event_table() -> EventTable<Self> {
        let mut table = EventTable::new();
        table
            .on(events::ADD_ENTITY, Self::on_add_entity)
            .on(events::REMOVE_ENTITY, Self::on_remove_entity)
            .on(events::ON_GROUND, Self::on_ground)
            .on(events::UI_INIT_FINISHED, Self::on_ui_init_finished)
            .on(events::SYNC_MASTER_SETTING, Self::on_sync_master_setting);
        table
    }

    /// Route an engine or server event. Returns `false` for events the client ignores.
    pub fn dispatch(&mut self, event: &str, payload: &mut Value) -> Result<bool> {
        let events = Rc::clone(&self.events);
        events.dispatch(self, event, payload)
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn tracker(&self) -> &SaplingTracker {
        &self.tracker
    }

    pub fn master_setting(&self) -> &ClientMasterSetting {
        &self.master_setting
    }

    pub fn tree_felling(&self) -> bool {
        self.client_setting.tree_felling
    }

    /// Switch chain-felling for the local player, persist it and tell the server
    pub fn set_tree_felling(&mut self, enabled: bool) -> Result<()> {
        self.client_setting.tree_felling = enabled;
        self.client_setting.save(&self.store)?;
        self.push_tree_felling_state();
        Ok(())
    }

    /// Ask the server to re-read its settings file
    pub fn reload_master_setting(&mut self) {
        self.link.notify_server(server_events::RELOAD_MASTER_SETTING, json!({}));
    }

    fn push_tree_felling_state(&mut self) {
        let payload = json!({
            "playerId": self.link.player_id(),
            "state": self.client_setting.tree_felling,
        });
        self.link.notify_server(server_events::SYNC_TREE_FELLING_STATE, payload);
    }

    /// Advance planting timers by `dt` seconds, asking the server to plant
    /// every item whose wait ran out
    pub fn tick(&mut self, dt: f32) {
        let link = &self.link;
        let landed = self
            .tracker
            .tick(dt, &self.master_setting, &mut self.rng, |entity| link.is_on_ground(entity));

        for sapling in landed {
            let payload = json!({
                "playerId": self.link.player_id(),
                "entityId": sapling.entity,
                "itemName": sapling.item.name(),
                "auxValue": sapling.item.aux(),
            });
            self.link.notify_server(server_events::SAPLING_ON_GROUND, payload);
        }
    }

    fn on_add_entity(&mut self, payload: &mut Value) -> Result<()> {
        let event = EntityAdded::deserialize(&*payload)?;
        if event.engine_type_str != ITEM_ENTITY_TYPE {
            return Ok(());
        }
        let Some(item_name) = event.item_name else {
            return Ok(());
        };
        let item = ItemKey::new(item_name, event.aux_value);
        if self.tracker.track(&event.id, item, &self.master_setting, &mut self.rng) {
            log::trace!("Tracking dropped item {}", event.id);
        }
        Ok(())
    }

    fn on_remove_entity(&mut self, payload: &mut Value) -> Result<()> {
        let event = EntityRef::deserialize(&*payload)?;
        self.tracker.untrack(&event.id);
        Ok(())
    }

    fn on_ground(&mut self, payload: &mut Value) -> Result<()> {
        let event = EntityRef::deserialize(&*payload)?;
        self.tracker.landed(&event.id, &self.master_setting, &mut self.rng);
        Ok(())
    }

    fn on_ui_init_finished(&mut self, _payload: &mut Value) -> Result<()> {
        self.push_tree_felling_state();
        Ok(())
    }

    fn on_sync_master_setting(&mut self, payload: &mut Value) -> Result<()> {
        let data = MasterSyncData::deserialize(&*payload)?;
        self.master_setting.apply_sync(&data);
        log::debug!(
            "Master settings synced: {} plantables, {}s minimum wait",
            self.master_setting.saplings.len(),
            self.master_setting.min_wait_time
        );
        Ok(())
    }
}
