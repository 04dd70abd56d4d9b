//! Auto-planting of dropped saplings and seeds

pub mod catalog;
pub mod site;
pub mod tracker;

pub use catalog::{default_saplings, is_plantable, planted_block};
pub use site::{remainder_after_planting, resolve_plant_site};
pub use tracker::{SaplingLanded, SaplingTracker};
