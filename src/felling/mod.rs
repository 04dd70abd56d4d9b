//! Chain-felling of connected log blocks

pub mod species;
pub mod neighbors;
pub mod search;
pub mod executor;
pub mod guard;

pub use species::SpeciesKey;
pub use neighbors::FELLING_NEIGHBORS;
pub use search::{find_connected_log_cluster, Aborted, FellingConfig};
pub use executor::{execute_fell, DestructionExecutor};
pub use guard::DestructionGuard;
