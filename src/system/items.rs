//! Item classification with per-name caching

use std::collections::HashMap;

use super::host::Host;

/// Item type reported for axes
pub const AXE_ITEM_TYPE: &str = "axe";

/// Remembers which item names are axes. Keyed by name only; the aux value
/// of the first lookup decides.
#[derive(Debug, Default)]
pub struct AxeCache {
    known: HashMap<String, bool>,
}

impl AxeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_axe<H: Host + ?Sized>(&mut self, host: &H, item: &str, aux: u16) -> bool {
        if let Some(&known) = self.known.get(item) {
            return known;
        }
        let axe = host
            .item_info(item, aux)
            .is_some_and(|info| info.item_type == AXE_ITEM_TYPE);
        self.known.insert(item.to_owned(), axe);
        axe
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
