//! # modkit
//!
//! A fluent, deferred registration kit for game-engine mod content.
//!
//! Client code describes blocks, items, entities, fluids, enchantments,
//! menus, and block entities through builder chains on a [`Registrar`].
//! Nothing is constructed while the chains run: each chain files a pending
//! registration and hands back a typed entry that resolves once the
//! host-driven registration sweep has run. Alongside the objects
//! themselves, builders accumulate declarative resources — language files,
//! models, block states, loot tables, recipes, tags — into a
//! [`ResourcePack`].
//!
//! ```ignore
//! use modkit::prelude::*;
//!
//! let registrar = Registrar::new("mymod");
//!
//! let lamp = registrar
//!     .object("copper_lamp")
//!     .block(Block::new)?
//!     .properties(|settings| settings.luminance(15))
//!     .lang("Copper Lamp")
//!     .simple_item()?
//!     .register()?;
//!
//! let mut host = standard_host();
//! registrar.register(&mut host)?;
//!
//! let block = lamp.get()?;
//! let item = lamp.item()?.get()?;
//! ```
//!
//! The registrar is explicitly constructed and explicitly terminated:
//! `Open` while chains file, `Registering` during the sweep, `Closed`
//! after. Entries accessed too early fail with an error naming the missing
//! identifier rather than returning half-built objects.
//!
//! [`Registrar`]: modkit_registry::Registrar
//! [`ResourcePack`]: modkit_datagen::ResourcePack

pub mod builders;
pub mod content;
pub mod entry;

pub use modkit_core as core;
pub use modkit_datagen as datagen;

pub use modkit_core::{
    EntryHost, EntrySupplier, Ident, LazyValue, RawHandle, RegistryEntry, RegistryError,
    RegistryResult, TypeToken, to_english_name,
};
pub use modkit_registry::{BuilderCallback, EngineRegistry, Registrar, RegistryHost, StaticRegistry};

/// Common imports for content modules.
pub mod prelude {
    pub use crate::builders::{
        BlockBuilder, BlockEntityBuilder, CommonLoot, CookingKind, EnchantmentBuilder,
        EntityBuilder, FluidBuilder, ItemBuilder, MenuBuilder, NoConfigBuilder, RegistrarExt,
    };
    pub use crate::content::{
        Block, BlockEntityType, BlockSettings, Enchantment, EnchantmentTarget, EntitySettings,
        EntityType, EquipmentSlots, Fluid, FluidSettings, Item, ItemGroup, ItemSettings, Material,
        Menu, MenuType, Rarity, SpawnGroup, standard_host,
    };
    pub use crate::entry::{BlockEntityEntry, BlockEntry, EntityEntry, FluidEntry, ItemEntry};
    pub use modkit_core::{
        EntrySupplier, Ident, LazyValue, RegistryEntry, RegistryError, RegistryResult,
    };
    pub use modkit_datagen::{
        BlockState, Ingredient, Lang, LootTable, Model, ModelRef, Recipe, RecipeResult,
        ResourcePack, Tag,
    };
    pub use modkit_registry::{EngineRegistry, Registrar, RegistryHost, StaticRegistry};
}
