//! Event-driven systems binding the engines to a game host

pub mod client;
pub mod events;
pub mod host;
pub mod items;
pub mod sandbox;
pub mod server;

pub use client::SaplantingClient;
pub use events::{EventTable, Handler};
pub use host::{ClientLink, Host};
pub use items::AxeCache;
pub use sandbox::{Outgoing, SandboxHost};
pub use server::SaplantingServer;
