//! Loot table fragments.
//!
//! Covers the shapes the block builders emit: the self-drop table every
//! block gets by default, the slab double-drop table, and the
//! silk-touch-gated table. Arbitrary tables can be assembled from the raw
//! pieces.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// A loot condition (predicate), e.g. `minecraft:survives_explosion`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    condition: String,
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl Condition {
    /// A condition with no parameters.
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            params: Map::new(),
        }
    }

    /// Attach a parameter to the condition body.
    pub fn param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}

/// A loot function applied to an entry, e.g. `minecraft:set_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootFunction {
    function: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<Condition>,
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl LootFunction {
    /// A function with no parameters or conditions.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            conditions: Vec::new(),
            params: Map::new(),
        }
    }

    /// Attach a parameter to the function body.
    pub fn param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Gate the function behind a condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// One entry within a pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    functions: Vec<LootFunction>,
}

impl PoolEntry {
    /// An item entry dropping the named object.
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            kind: String::from("minecraft:item"),
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// Apply a function to this entry.
    pub fn function(mut self, function: LootFunction) -> Self {
        self.functions.push(function);
        self
    }
}

/// A pool of weighted entries rolled together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pool {
    rolls: u32,
    entries: Vec<PoolEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<Condition>,
}

impl Pool {
    /// A pool rolled once.
    pub fn new() -> Self {
        Self {
            rolls: 1,
            entries: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Set the roll count.
    pub fn rolls(mut self, rolls: u32) -> Self {
        self.rolls = rolls;
        self
    }

    /// Add an entry.
    pub fn entry(mut self, entry: PoolEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Gate the pool behind a condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete loot table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootTable {
    #[serde(rename = "type")]
    kind: String,
    pools: Vec<Pool>,
}

impl LootTable {
    /// An empty table of the given kind, e.g. `minecraft:block`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            pools: Vec::new(),
        }
    }

    /// Add a pool.
    pub fn pool(mut self, pool: Pool) -> Self {
        self.pools.push(pool);
        self
    }

    /// The standard block table: the block drops itself if the explosion
    /// that broke it allows drops.
    pub fn self_drop(id: impl Into<String>) -> Self {
        Self::new("minecraft:block").pool(
            Pool::new()
                .entry(PoolEntry::item(id))
                .condition(Condition::new("minecraft:survives_explosion")),
        )
    }

    /// Slab table: drops two when the broken state was a double slab.
    pub fn slab_double(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new("minecraft:block").pool(
            Pool::new()
                .entry(
                    PoolEntry::item(id.clone())
                        .function(
                            LootFunction::new("minecraft:set_count")
                                .param("count", json!(2))
                                .condition(
                                    Condition::new("minecraft:block_state_property")
                                        .param("block", json!(id))
                                        .param("properties", json!({ "type": "double" })),
                                ),
                        )
                        .function(LootFunction::new("minecraft:explosion_decay")),
                )
                .condition(Condition::new("minecraft:survives_explosion")),
        )
    }

    /// Table gated behind a silk-touch tool.
    pub fn silk_touch_only(id: impl Into<String>) -> Self {
        Self::new("minecraft:block").pool(
            Pool::new().entry(PoolEntry::item(id)).condition(
                Condition::new("minecraft:match_tool").param(
                    "predicate",
                    json!({
                        "enchantments": [
                            { "enchantment": "minecraft:silk_touch", "levels": { "min": 1 } }
                        ]
                    }),
                ),
            ),
        )
    }
}
