//! Fluent builders, one per content kind.
//!
//! A builder chain starts on the registrar (via [`RegistrarExt`]), collects
//! configuration and generated data, and terminates in `register()` — which
//! files the deferred registration and returns a typed entry — or `build()`,
//! which files and hands back the parent for nested chains:
//!
//! ```ignore
//! let lamp = registrar
//!     .object("copper_lamp")
//!     .block(Block::new)?
//!     .lang("Copper Lamp")
//!     .item()
//!     .build()?
//!     .register()?;
//! ```
//!
//! Construction stays deferred throughout: factories and settings
//! transformations run during the registration sweep, never while the chain
//! executes.

mod block;
mod block_entity;
mod enchantment;
mod entity;
mod fluid;
mod item;
mod menu;
mod no_config;

pub use block::{BlockBuilder, CommonLoot, CookingKind};
pub use block_entity::BlockEntityBuilder;
pub use enchantment::EnchantmentBuilder;
pub use entity::EntityBuilder;
pub use fluid::FluidBuilder;
pub use item::ItemBuilder;
pub use menu::MenuBuilder;
pub use no_config::NoConfigBuilder;

use std::any::Any;
use std::rc::Rc;

use modkit_core::{Ident, RegistryResult};
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{
    Block, BlockEntityType, BlockSettings, EnchantmentTarget, Item, ItemSettings, Material, Menu,
    MenuType, SpawnGroup,
};

/// State every builder carries: the owning registrar, the parent returned by
/// `build()`, the entry name, and the filing callback.
pub(crate) struct BuilderBase<P> {
    pub(crate) owner: Registrar,
    pub(crate) parent: P,
    pub(crate) name: String,
    pub(crate) callback: BuilderCallback,
}

impl<P> BuilderBase<P> {
    pub(crate) fn new(owner: Registrar, parent: P, name: String, callback: BuilderCallback) -> Self {
        Self {
            owner,
            parent,
            name,
            callback,
        }
    }

    pub(crate) fn ident(&self) -> Ident {
        self.owner.ident(&self.name)
    }
}

/// Implements the lang and tag surface shared by the content builders.
macro_rules! impl_builder_common {
    ($builder:ident, $kind:literal) => {
        impl<P> $builder<P> {
            /// Set the language entry to the default English name derived
            /// from the entry name.
            pub fn default_lang(self) -> Self {
                let value = modkit_core::to_english_name(&self.base.name);
                self.lang(&value)
            }

            /// Set the English language entry.
            pub fn lang(self, value: &str) -> Self {
                self.lang_in("en_us", value)
            }

            /// Set the language entry in a specific language file, e.g.
            /// `de_de`.
            pub fn lang_in(self, lang: &str, value: &str) -> Self {
                let key = format!(
                    "{}.{}.{}",
                    $kind,
                    self.base.owner.mod_id(),
                    self.base.name
                );
                let context = format!("{} {}", $kind, self.base.ident());
                self.base.owner.add_lang_entry(&context, lang, &key, value);
                self
            }

            /// Add this entry to a tag. Multiple calls add additional tags.
            pub fn tag(self, tag: modkit_core::Ident) -> Self {
                self.base.owner.add_to_tag(tag, self.base.ident());
                self
            }
        }
    };
}
pub(crate) use impl_builder_common;

/// Builder factory methods on [`Registrar`].
///
/// Each uses the current name set by `object()`; the `_named` variants take
/// an explicit name and leave the current-name state untouched.
pub trait RegistrarExt {
    /// Begin a stone-material block.
    fn block(
        &self,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
    ) -> RegistryResult<BlockBuilder<Registrar>>;

    /// Begin a block with the given material.
    fn block_of(
        &self,
        material: Material,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
    ) -> RegistryResult<BlockBuilder<Registrar>>;

    /// Begin a block under an explicit name.
    fn block_named(
        &self,
        name: &str,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
    ) -> BlockBuilder<Registrar>;

    /// Begin an item.
    fn item(
        &self,
        factory: impl FnOnce(ItemSettings) -> Item + 'static,
    ) -> RegistryResult<ItemBuilder<Registrar>>;

    /// Begin an item under an explicit name.
    fn item_named(
        &self,
        name: &str,
        factory: impl FnOnce(ItemSettings) -> Item + 'static,
    ) -> ItemBuilder<Registrar>;

    /// Begin an entity type.
    fn entity(&self, spawn_group: SpawnGroup) -> RegistryResult<EntityBuilder<Registrar>>;

    /// Begin an entity type under an explicit name.
    fn entity_named(&self, name: &str, spawn_group: SpawnGroup) -> EntityBuilder<Registrar>;

    /// Begin a fluid with default texture locations derived from the name.
    fn fluid(&self) -> RegistryResult<FluidBuilder<Registrar>>;

    /// Begin a fluid with explicit still/flowing textures.
    fn fluid_textured(
        &self,
        still_texture: Ident,
        flowing_texture: Ident,
    ) -> RegistryResult<FluidBuilder<Registrar>>;

    /// Begin a block-entity type. The factory receives the registered type
    /// itself and produces one block-entity instance.
    fn block_entity(
        &self,
        factory: impl Fn(Rc<BlockEntityType>) -> Box<dyn Any> + 'static,
    ) -> RegistryResult<BlockEntityBuilder<Registrar>>;

    /// Begin a menu type. The factory receives the registered type and the
    /// synchronization id of the opened menu.
    fn menu(
        &self,
        factory: impl Fn(Rc<MenuType>, u32) -> Box<dyn Menu> + 'static,
    ) -> RegistryResult<MenuBuilder<Registrar>>;

    /// Begin an enchantment for the given target.
    fn enchantment(
        &self,
        target: EnchantmentTarget,
    ) -> RegistryResult<EnchantmentBuilder<Registrar>>;

    /// Begin an entry of an arbitrary registry type with no configuration
    /// beyond its factory.
    fn no_config<T: Any>(
        &self,
        factory: impl FnOnce() -> T + 'static,
    ) -> RegistryResult<NoConfigBuilder<T, Registrar>>;
}

impl RegistrarExt for Registrar {
    fn block(
        &self,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
    ) -> RegistryResult<BlockBuilder<Registrar>> {
        self.block_of(Material::Stone, factory)
    }

    fn block_of(
        &self,
        material: Material,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
    ) -> RegistryResult<BlockBuilder<Registrar>> {
        self.entry(|name, callback| {
            BlockBuilder::create(self.clone(), self.clone(), name, callback, factory, material)
        })
    }

    fn block_named(
        &self,
        name: &str,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
    ) -> BlockBuilder<Registrar> {
        self.entry_named(name, |name, callback| {
            BlockBuilder::create(
                self.clone(),
                self.clone(),
                name,
                callback,
                factory,
                Material::Stone,
            )
        })
    }

    fn item(
        &self,
        factory: impl FnOnce(ItemSettings) -> Item + 'static,
    ) -> RegistryResult<ItemBuilder<Registrar>> {
        self.entry(|name, callback| {
            ItemBuilder::create(
                self.clone(),
                self.clone(),
                name,
                callback,
                Box::new(move |settings| Ok(factory(settings))),
            )
        })
    }

    fn item_named(
        &self,
        name: &str,
        factory: impl FnOnce(ItemSettings) -> Item + 'static,
    ) -> ItemBuilder<Registrar> {
        self.entry_named(name, |name, callback| {
            ItemBuilder::create(
                self.clone(),
                self.clone(),
                name,
                callback,
                Box::new(move |settings| Ok(factory(settings))),
            )
        })
    }

    fn entity(&self, spawn_group: SpawnGroup) -> RegistryResult<EntityBuilder<Registrar>> {
        self.entry(|name, callback| {
            EntityBuilder::create(self.clone(), self.clone(), name, callback, spawn_group)
        })
    }

    fn entity_named(&self, name: &str, spawn_group: SpawnGroup) -> EntityBuilder<Registrar> {
        self.entry_named(name, |name, callback| {
            EntityBuilder::create(self.clone(), self.clone(), name, callback, spawn_group)
        })
    }

    fn fluid(&self) -> RegistryResult<FluidBuilder<Registrar>> {
        let name = self.current_name()?;
        let still = self.ident(&format!("block/{name}_still"));
        let flowing = self.ident(&format!("block/{name}_flow"));
        self.fluid_textured(still, flowing)
    }

    fn fluid_textured(
        &self,
        still_texture: Ident,
        flowing_texture: Ident,
    ) -> RegistryResult<FluidBuilder<Registrar>> {
        self.entry(|name, callback| {
            FluidBuilder::create(
                self.clone(),
                self.clone(),
                name,
                callback,
                still_texture,
                flowing_texture,
            )
        })
    }

    fn block_entity(
        &self,
        factory: impl Fn(Rc<BlockEntityType>) -> Box<dyn Any> + 'static,
    ) -> RegistryResult<BlockEntityBuilder<Registrar>> {
        self.entry(|name, callback| {
            BlockEntityBuilder::create(self.clone(), self.clone(), name, callback, factory)
        })
    }

    fn menu(
        &self,
        factory: impl Fn(Rc<MenuType>, u32) -> Box<dyn Menu> + 'static,
    ) -> RegistryResult<MenuBuilder<Registrar>> {
        self.entry(|name, callback| {
            MenuBuilder::create(self.clone(), self.clone(), name, callback, factory)
        })
    }

    fn enchantment(
        &self,
        target: EnchantmentTarget,
    ) -> RegistryResult<EnchantmentBuilder<Registrar>> {
        self.entry(|name, callback| {
            EnchantmentBuilder::create(self.clone(), self.clone(), name, callback, target)
        })
    }

    fn no_config<T: Any>(
        &self,
        factory: impl FnOnce() -> T + 'static,
    ) -> RegistryResult<NoConfigBuilder<T, Registrar>> {
        self.entry(|name, callback| {
            NoConfigBuilder::create(self.clone(), self.clone(), name, callback, factory)
        })
    }
}
