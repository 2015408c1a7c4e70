use std::ops::Deref;

use modkit_core::RegistryEntry;

use crate::content::Item;

/// Entry for a registered [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    entry: RegistryEntry<Item>,
}

impl ItemEntry {
    pub(crate) fn new(entry: RegistryEntry<Item>) -> Self {
        Self { entry }
    }
}

impl Deref for ItemEntry {
    type Target = RegistryEntry<Item>;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
