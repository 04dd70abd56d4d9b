//! Scripted session against the in-memory host: grow a tree, fell it, then
//! drop a sapling and let the client/server pair plant it.
//!
//! Usage:
//!   cargo run --bin fell_demo -- --height 12 --limit 255 --dir /tmp/saplanting

use std::path::PathBuf;

use glam::{IVec3, Vec3};
use serde_json::{json, Value};

use saplanting::config::ConfigStore;
use saplanting::core::{ItemStack, Result};
use saplanting::system::client::events as client_events;
use saplanting::system::server::events;
use saplanting::system::{ClientLink, Outgoing, SandboxHost, SaplantingClient, SaplantingServer};
use saplanting::world::block::{keys, names};
use saplanting::world::{BlockState, WorldQuery};

const PLAYER: &str = "steve";

/// Client link that queues messages for the server and asks nobody about ground contact
#[derive(Default)]
struct QueuedLink {
    outbox: Vec<(String, Value)>,
}

impl ClientLink for QueuedLink {
    fn player_id(&self) -> &str {
        PLAYER
    }

    fn notify_server(&mut self, event: &str, payload: Value) {
        self.outbox.push((event.to_owned(), payload));
    }

    fn is_on_ground(&self, _entity: &str) -> bool {
        true
    }
}

fn arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Oak trunk with a natural canopy
fn grow_tree(host: &mut SandboxHost, base: IVec3, height: i32) {
    host.grid.set_block(base - IVec3::Y, names::GRASS, 0);
    for y in 0..height {
        host.grid.set_block(base + IVec3::new(0, y, 0), "minecraft:oak_log", 0);
    }
    let natural = BlockState::new().with(keys::PERSISTENT_BIT, false);
    for dx in -2..=2 {
        for dz in -2..=2 {
            for dy in height - 2..=height {
                let pos = base + IVec3::new(dx, dy, dz);
                if host.grid.contains(pos) {
                    continue;
                }
                host.grid.set_block_with_state(pos, names::LEAVES, 0, natural.clone());
            }
        }
    }
}

/// Deliver everything the client queued to the server
fn pump(client: &mut SaplantingClient<QueuedLink>, server: &mut SaplantingServer<SandboxHost>) -> Result<()> {
    let queued = std::mem::take(&mut client.link_mut().outbox);
    for (event, mut payload) in queued {
        server.dispatch(&event, &mut payload)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    saplanting::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let height: i32 = arg(&args, "--height", 12);
    let limit: u32 = arg(&args, "--limit", 255);
    let dir: PathBuf = arg(&args, "--dir", std::env::temp_dir().join("saplanting_demo"));

    log::info!("Settings directory: {}", dir.display());
    let mut server = SaplantingServer::new(SandboxHost::new(), ConfigStore::new(&dir));
    let mut client = SaplantingClient::new(QueuedLink::default(), ConfigStore::new(&dir));
    server.master_setting_mut().tree_felling_limit_count = limit;

    server.dispatch(events::PLAYER_JOINED, &mut json!({ "playerId": PLAYER }))?;
    for outgoing in server.host_mut().take_outbox() {
        if let Outgoing::Client { event, mut payload, .. } = outgoing {
            client.dispatch(&event, &mut payload)?;
        }
    }
    client.dispatch(client_events::UI_INIT_FINISHED, &mut json!({}))?;
    pump(&mut client, &mut server)?;

    let base = IVec3::new(0, 64, 0);
    grow_tree(server.host_mut(), base, height);
    log::info!("Grew a {}-block oak: {} blocks in the world", height, server.host().grid.block_count());

    // The player breaks the bottom log with an axe
    server
        .host_mut()
        .set_carried(PLAYER, Some(ItemStack::new("minecraft:diamond_axe", 0, 1)));
    server.host_mut().grid.remove_block(base);
    let before = server.host().grid.block_count();
    let mut destroy = json!({
        "x": base.x, "y": base.y, "z": base.z,
        "fullName": "minecraft:oak_log", "auxData": 0,
        "playerId": PLAYER, "dimensionId": 0
    });
    server.dispatch(events::DESTROY_BLOCK, &mut destroy)?;

    let after = server.host().grid.block_count();
    let drops = server.host().grid.drops().len();
    log::info!("Chain-fell removed {} logs, {} loot drop(s)", before - after, drops);

    // Drop a sapling where the trunk stood
    let sapling = ItemStack::new("minecraft:sapling", 0, 2);
    let entity = server.host_mut().drop_item(sapling.clone(), Vec3::new(0.5, 64.0, 0.5));
    let mut added = json!({
        "id": entity,
        "engineTypeStr": "minecraft:item",
        "itemName": sapling.name,
        "auxValue": sapling.aux
    });
    client.dispatch(client_events::ADD_ENTITY, &mut added)?;
    client.dispatch(client_events::ON_GROUND, &mut json!({ "id": entity }))?;

    for _ in 0..40 {
        client.tick(0.25);
    }
    pump(&mut client, &mut server)?;

    match server.host().sample_block(base) {
        Some(block) => log::info!("Planted {} at {}", block.name, base),
        None => log::warn!("Nothing was planted at {}", base),
    }
    let left: u32 = server.host().entities().map(|(_, dropped)| dropped.item.count).sum();
    log::info!("{} sapling(s) left on the ground", left);

    Ok(())
}
