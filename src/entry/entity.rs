use std::ops::Deref;

use modkit_core::{RegistryEntry, RegistryResult};

use crate::content::{EntityType, SpawnGroup};

/// Entry for a registered [`EntityType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityEntry {
    entry: RegistryEntry<EntityType>,
}

impl EntityEntry {
    pub(crate) fn new(entry: RegistryEntry<EntityType>) -> Self {
        Self { entry }
    }

    /// The spawn classification of the resolved type.
    pub fn spawn_group(&self) -> RegistryResult<SpawnGroup> {
        Ok(self.entry.get()?.spawn_group())
    }
}

impl Deref for EntityEntry {
    type Target = RegistryEntry<EntityType>;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
