//! Core type aliases and re-exports

pub use glam::{IVec3, Vec3};

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Host-assigned identifier of a connected player
pub type PlayerId = String;

/// Host-assigned identifier of a world entity (dropped items, players)
pub type EntityId = String;

/// Convert an entity's floating point position to the block it occupies
pub fn block_pos(pos: Vec3) -> IVec3 {
    pos.floor().as_ivec3()
}
