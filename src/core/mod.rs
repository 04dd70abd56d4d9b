//! Core types and utilities

pub mod types;
pub mod error;
pub mod item;
pub mod logging;

pub use types::*;
pub use error::Error;
pub use item::{ItemInfo, ItemKey, ItemStack};
