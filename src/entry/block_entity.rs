use std::ops::Deref;

use modkit_core::{RegistryEntry, RegistryResult};

use crate::content::{Block, BlockEntityType};

/// Entry for a registered [`BlockEntityType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntityEntry {
    entry: RegistryEntry<BlockEntityType>,
}

impl BlockEntityEntry {
    pub(crate) fn new(entry: RegistryEntry<BlockEntityType>) -> Self {
        Self { entry }
    }

    /// Whether the resolved type may attach to the given block.
    pub fn supports(&self, block: &Block) -> RegistryResult<bool> {
        Ok(self.entry.get()?.supports(block))
    }
}

impl Deref for BlockEntityEntry {
    type Target = RegistryEntry<BlockEntityType>;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
