use std::rc::Rc;

use indexmap::IndexMap;

use modkit_core::{EntrySupplier, Ident, LazyValue, RegistryResult};
use modkit_datagen::Model;
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{Block, Item, ItemGroup, ItemSettings};
use crate::entry::ItemEntry;

use super::{BuilderBase, impl_builder_common};

type ItemFactory = Box<dyn FnOnce(ItemSettings) -> RegistryResult<Item>>;

/// A builder for items: settings customization, grouping, and the item's
/// generated model and translation.
///
/// On creation an item is assigned a simple generated model and the default
/// translation. Items created while a default group is active on the
/// registrar inherit that group unless the settings already carry one.
pub struct ItemBuilder<P> {
    base: BuilderBase<P>,
    factory: ItemFactory,
    initial: Box<dyn FnOnce() -> ItemSettings>,
    transforms: Vec<Box<dyn FnOnce(ItemSettings) -> ItemSettings>>,
    group: Option<Rc<LazyValue<ItemGroup>>>,
    models: IndexMap<Ident, Model>,
}

impl_builder_common!(ItemBuilder, "item");

impl<P> ItemBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        factory: ItemFactory,
    ) -> Self {
        let builder = Self::bare(owner, parent, name, callback, factory);
        builder.default_model().default_lang()
    }

    /// A builder for the item derived from a block: the factory resolves
    /// the block at construction time, the model parents the block's, and
    /// no language entry is added (the block's covers it).
    pub(crate) fn block_item(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
    ) -> Self {
        let block = {
            let owner = owner.clone();
            let name = name.clone();
            EntrySupplier::new(move || owner.get_named::<Block>(&name))
        };
        let factory: ItemFactory =
            Box::new(move |settings| Ok(Item::block_item(block.get()?, settings)));
        let builder = Self::bare(owner, parent, name, callback, factory);
        let model = Model::new().parent(format!(
            "{}:block/{}",
            builder.base.owner.mod_id(),
            builder.base.name
        ));
        let model_id = builder.item_model_id();
        builder.model_raw(model_id, model)
    }

    fn bare(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        factory: ItemFactory,
    ) -> Self {
        let group = owner.current_group::<ItemGroup>();
        Self {
            base: BuilderBase::new(owner, parent, name, callback),
            factory,
            initial: Box::new(ItemSettings::new),
            transforms: Vec::new(),
            group,
            models: IndexMap::new(),
        }
    }

    /// Modify the item settings. Modifications run lazily at registration
    /// time and compose with earlier calls.
    pub fn properties(
        mut self,
        transform: impl FnOnce(ItemSettings) -> ItemSettings + 'static,
    ) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Replace the initial settings without touching modifications made via
    /// [`properties`](Self::properties).
    pub fn initial_properties(mut self, initial: impl FnOnce() -> ItemSettings + 'static) -> Self {
        self.initial = Box::new(initial);
        self
    }

    /// Put the item in a group, overriding the registrar's default group.
    pub fn group(self, group: ItemGroup) -> Self {
        self.properties(move |settings| settings.group(group))
    }

    /// Assign the default model: a flat generated model textured
    /// `<mod>:item/<name>`.
    pub fn default_model(self) -> Self {
        let texture = self.item_model_id();
        self.model(texture)
    }

    /// A flat generated model with the given texture.
    pub fn model(self, texture: Ident) -> Self {
        let id = self.item_model_id();
        self.model_raw(id, Model::generated_item(texture.to_string()))
    }

    /// Set a model directly under an explicit model id.
    pub fn model_raw(mut self, id: Ident, model: Model) -> Self {
        self.models.clear();
        self.models.insert(id, model);
        self
    }

    fn item_model_id(&self) -> Ident {
        self.base.owner.ident(&format!("item/{}", self.base.name))
    }

    fn file(self) -> RegistryResult<(ItemEntry, P)> {
        let Self {
            base,
            factory,
            initial,
            transforms,
            group,
            models,
        } = self;
        let BuilderBase {
            owner,
            parent,
            name,
            callback,
        } = base;

        for (id, model) in models {
            owner.add_model(id, model);
        }

        let creator = move || {
            let mut settings = initial();
            for transform in transforms {
                settings = transform(settings);
            }
            if settings.group.is_none() {
                if let Some(group) = &group {
                    settings.group = Some(group.get().clone());
                }
            }
            factory(settings)
        };
        let entry = callback.accept::<Item>(&name, creator)?;
        Ok((ItemEntry::new(entry), parent))
    }

    /// File the registration and return the item entry.
    pub fn register(self) -> RegistryResult<ItemEntry> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }
}
