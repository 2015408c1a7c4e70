use modkit_core::RegistryResult;
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{EntitySettings, EntityType, Item, ItemSettings, SpawnGroup};
use crate::entry::EntityEntry;

use super::{BuilderBase, ItemBuilder, impl_builder_common};

/// A builder for entity types: settings customization, an optional spawn
/// egg item, and the type's translation.
pub struct EntityBuilder<P> {
    base: BuilderBase<P>,
    spawn_group: SpawnGroup,
    transforms: Vec<Box<dyn FnOnce(EntitySettings) -> EntitySettings>>,
}

impl_builder_common!(EntityBuilder, "entity");

impl<P> EntityBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        spawn_group: SpawnGroup,
    ) -> Self {
        let builder = Self {
            base: BuilderBase::new(owner, parent, name, callback),
            spawn_group,
            transforms: Vec::new(),
        };
        builder.default_lang()
    }

    /// Modify the entity settings. Modifications run lazily at registration
    /// time and compose with earlier calls.
    pub fn properties(
        mut self,
        transform: impl FnOnce(EntitySettings) -> EntitySettings + 'static,
    ) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// File a `<name>_spawn_egg` item alongside this entity, with its own
    /// default model and translation.
    pub fn spawn_egg(self) -> RegistryResult<Self> {
        let owner = self.base.owner.clone();
        let egg_name = format!("{}_spawn_egg", self.base.name);
        owner
            .entry_named(egg_name, |name, callback| {
                ItemBuilder::create(
                    owner.clone(),
                    (),
                    name,
                    callback,
                    Box::new(|settings: ItemSettings| Ok(Item::new(settings))),
                )
            })
            .register()?;
        Ok(self)
    }

    /// File the registration and return the entity entry.
    pub fn register(self) -> RegistryResult<EntityEntry> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }

    fn file(self) -> RegistryResult<(EntityEntry, P)> {
        let Self {
            base,
            spawn_group,
            transforms,
        } = self;
        let BuilderBase {
            parent,
            name,
            callback,
            ..
        } = base;

        let creator = move || {
            let mut settings = EntitySettings::new();
            for transform in transforms {
                settings = transform(settings);
            }
            Ok(EntityType::new(spawn_group, settings))
        };
        let entry = callback.accept::<EntityType>(&name, creator)?;
        Ok((EntityEntry::new(entry), parent))
    }
}
