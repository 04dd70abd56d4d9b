//! Persisted settings

pub mod store;
pub mod master;
pub mod client;

pub use store::ConfigStore;
pub use master::{MasterSetting, MasterSyncData, MASTER_SETTING_KEY};
pub use client::{ClientMasterSetting, ClientSetting, CLIENT_SETTING_KEY};
