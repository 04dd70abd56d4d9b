//! Saplanting - chain-felling and sapling auto-planting for block-based sandbox worlds

pub mod core;
pub mod world;
pub mod felling;
pub mod planting;
pub mod config;
pub mod system;
