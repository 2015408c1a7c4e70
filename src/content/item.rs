use std::rc::Rc;

use super::block::Block;

/// A named creative-inventory group items can be sorted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup {
    name: String,
}

impl ItemGroup {
    /// Create a group with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Properties of an item, assembled before construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSettings {
    pub max_count: u32,
    pub group: Option<ItemGroup>,
}

impl ItemSettings {
    /// Default settings: stack of 64, no group.
    pub fn new() -> Self {
        Self {
            max_count: 64,
            group: None,
        }
    }

    /// Set the maximum stack size.
    pub fn max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    /// Set the item group.
    pub fn group(mut self, group: ItemGroup) -> Self {
        self.group = Some(group);
        self
    }
}

impl Default for ItemSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered item, optionally placing a block.
#[derive(Debug)]
pub struct Item {
    settings: ItemSettings,
    block: Option<Rc<Block>>,
}

impl Item {
    /// Create a plain item.
    pub fn new(settings: ItemSettings) -> Self {
        Self {
            settings,
            block: None,
        }
    }

    /// Create an item that places the given block.
    pub fn block_item(block: Rc<Block>, settings: ItemSettings) -> Self {
        Self {
            settings,
            block: Some(block),
        }
    }

    /// The item's settings.
    pub fn settings(&self) -> &ItemSettings {
        &self.settings
    }

    /// The block this item places, if it is a block item.
    pub fn block(&self) -> Option<&Rc<Block>> {
        self.block.as_ref()
    }
}
