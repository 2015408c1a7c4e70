use std::collections::BTreeMap;

use serde::Serialize;

/// A language file: a flat map from translation key to display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Lang {
    entries: BTreeMap<String, String>,
}

impl Lang {
    /// An empty language file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a translation. Returns `false` without overwriting if the key is
    /// already present.
    pub fn entry(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value.into());
        true
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up a translation.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the file has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another file into this one; existing keys win.
    pub fn merge(&mut self, other: Lang) {
        for (key, value) in other.entries {
            self.entries.entry(key).or_insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_wins() {
        let mut lang = Lang::new();
        assert!(lang.entry("block.mymod.lamp", "Lamp"));
        assert!(!lang.entry("block.mymod.lamp", "Other Lamp"));
        assert_eq!(lang.get("block.mymod.lamp"), Some("Lamp"));
    }

    #[test]
    fn serializes_flat() {
        let mut lang = Lang::new();
        lang.entry("item.mymod.rod", "Rod");
        let json = serde_json::to_value(&lang).unwrap();
        assert_eq!(json, serde_json::json!({ "item.mymod.rod": "Rod" }));
    }
}
