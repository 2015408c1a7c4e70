//! The content types builders construct and registries hold.
//!
//! These are the narrow equivalents of what a host game engine would
//! provide: plain data plus the few behavior hooks deferred construction
//! needs. A real host supplies its own [`EngineRegistry`] implementations;
//! [`standard_host`] wires the built-in kinds into `StaticRegistry`-backed
//! registries in the canonical sweep order.

mod block;
mod block_entity;
mod enchantment;
mod entity;
mod fluid;
mod item;
mod menu;

pub use block::{Block, BlockSettings, Material};
pub use block_entity::{BlockEntityFactory, BlockEntityType};
pub use enchantment::{Enchantment, EnchantmentTarget, EquipmentSlots, Rarity};
pub use entity::{EntitySettings, EntityType, SpawnGroup};
pub use fluid::{Fluid, FluidSettings};
pub use item::{Item, ItemGroup, ItemSettings};
pub use menu::{Menu, MenuFactory, MenuType};

use modkit_core::Ident;
use modkit_registry::{EngineRegistry, RegistryHost, StaticRegistry};

/// A host with one registry per built-in content kind.
///
/// Sweep order is blocks, fluids, items, entity types, block-entity types,
/// menus, enchantments — blocks first so derived content (block items,
/// block-entity valid blocks) can resolve what it references.
pub fn standard_host() -> RegistryHost {
    let mut host = RegistryHost::new();
    host.add(StaticRegistry::<Block>::new(Ident::new("modkit", "block")));
    host.add(StaticRegistry::<Fluid>::new(Ident::new("modkit", "fluid")));
    host.add(StaticRegistry::<Item>::new(Ident::new("modkit", "item")));
    host.add(StaticRegistry::<EntityType>::new(Ident::new(
        "modkit",
        "entity_type",
    )));
    host.add(StaticRegistry::<BlockEntityType>::new(Ident::new(
        "modkit",
        "block_entity_type",
    )));
    host.add(StaticRegistry::<MenuType>::new(Ident::new("modkit", "menu")));
    host.add(StaticRegistry::<Enchantment>::new(Ident::new(
        "modkit",
        "enchantment",
    )));
    host
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_host_order() {
        let host = standard_host();
        assert_eq!(host.len(), 7);
        assert!(host.registry::<Block>().is_some());
        assert!(host.registry::<Enchantment>().is_some());
    }
}
