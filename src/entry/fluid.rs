use std::ops::Deref;

use modkit_core::{RegistryEntry, RegistryResult};

use crate::content::{Block, Fluid, Item};

use super::block::BlockEntry;
use super::item::ItemEntry;

/// Entry for a registered [`Fluid`], with navigation to the companion
/// registrations the fluid builder files alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluidEntry {
    entry: RegistryEntry<Fluid>,
}

impl FluidEntry {
    pub(crate) fn new(entry: RegistryEntry<Fluid>) -> Self {
        Self { entry }
    }

    /// The still source variant of this fluid.
    pub fn source(&self) -> RegistryResult<RegistryEntry<Fluid>> {
        let name = self.entry.get()?.source_name().to_string();
        self.entry.sibling_named::<Fluid>(&name)
    }

    /// The flowing variant of this fluid.
    pub fn flowing(&self) -> RegistryResult<RegistryEntry<Fluid>> {
        let name = self.entry.get()?.flowing_name().to_string();
        self.entry.sibling_named::<Fluid>(&name)
    }

    /// The derived fluid block, if the builder generated one.
    pub fn block(&self) -> RegistryResult<Option<BlockEntry>> {
        match self.entry.get()?.block_name() {
            Some(name) => {
                let name = name.to_string();
                Ok(Some(BlockEntry::new(
                    self.entry.sibling_named::<Block>(&name)?,
                )))
            }
            None => Ok(None),
        }
    }

    /// The derived bucket item, if the builder generated one.
    pub fn bucket(&self) -> RegistryResult<Option<ItemEntry>> {
        match self.entry.get()?.bucket_name() {
            Some(name) => {
                let name = name.to_string();
                Ok(Some(ItemEntry::new(
                    self.entry.sibling_named::<Item>(&name)?,
                )))
            }
            None => Ok(None),
        }
    }
}

impl Deref for FluidEntry {
    type Target = RegistryEntry<Fluid>;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
