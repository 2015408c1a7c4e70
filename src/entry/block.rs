use std::ops::Deref;

use modkit_core::{RegistryEntry, RegistryResult};

use crate::content::{Block, BlockEntityType, Item};

use super::block_entity::BlockEntityEntry;
use super::item::ItemEntry;

/// Entry for a registered [`Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    entry: RegistryEntry<Block>,
}

impl BlockEntry {
    pub(crate) fn new(entry: RegistryEntry<Block>) -> Self {
        Self { entry }
    }

    /// The item registered under the same name, if any.
    pub fn item(&self) -> RegistryResult<ItemEntry> {
        Ok(ItemEntry::new(self.entry.sibling::<Item>()?))
    }

    /// The block-entity type registered under the same name, if any.
    pub fn block_entity(&self) -> RegistryResult<BlockEntityEntry> {
        Ok(BlockEntityEntry::new(
            self.entry.sibling::<BlockEntityType>()?,
        ))
    }
}

impl Deref for BlockEntry {
    type Target = RegistryEntry<Block>;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
