//! Item identities and stacks as reported by the host

use serde::{Deserialize, Serialize};

/// Item identifier plus legacy aux value. Serialized as `[name, aux]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey(pub String, pub u16);

impl ItemKey {
    pub fn new(name: impl Into<String>, aux: u16) -> Self {
        Self(name.into(), aux)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn aux(&self) -> u16 {
        self.1
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

/// A stack of items (carried, in an inventory slot, or dropped in the world)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStack {
    #[serde(rename = "newItemName")]
    pub name: String,
    #[serde(rename = "newAuxValue", default)]
    pub aux: u16,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Value>,
}

fn default_count() -> u32 {
    1
}

impl ItemStack {
    pub fn new(name: impl Into<String>, aux: u16, count: u32) -> Self {
        Self { name: name.into(), aux, count, user_data: None }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.name.clone(), self.aux)
    }
}

/// Static item properties looked up from the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInfo {
    /// Item category, e.g. "axe", "sword", "block"
    pub item_type: String,
    pub max_stack_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_serializes_as_pair() {
        let key = ItemKey::new("minecraft:sapling", 3);
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"["minecraft:sapling",3]"#);
        let parsed: ItemKey = serde_json::from_str(r#"["minecraft:bamboo",0]"#).unwrap();
        assert_eq!(parsed, ItemKey::new("minecraft:bamboo", 0));
    }

    #[test]
    fn test_item_stack_host_keys() {
        let stack: ItemStack =
            serde_json::from_str(r#"{"newItemName": "minecraft:iron_axe", "newAuxValue": 0, "count": 1}"#)
                .unwrap();
        assert_eq!(stack.name, "minecraft:iron_axe");
        assert_eq!(stack.key(), ItemKey::new("minecraft:iron_axe", 0));
        assert!(stack.user_data.is_none());
    }
}
