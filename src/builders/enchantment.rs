use modkit_core::{RegistryEntry, RegistryResult};
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{Enchantment, EnchantmentTarget, EquipmentSlots, Rarity};

use super::{BuilderBase, impl_builder_common};

/// A builder for enchantments: rarity, target, and applicable equipment
/// slots.
///
/// Defaults to common rarity and no slots; subsequent
/// [`add_slots`](Self::add_slots) calls are additive.
pub struct EnchantmentBuilder<P> {
    base: BuilderBase<P>,
    target: EnchantmentTarget,
    rarity: Rarity,
    slots: EquipmentSlots,
}

impl_builder_common!(EnchantmentBuilder, "enchantment");

impl<P> EnchantmentBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        target: EnchantmentTarget,
    ) -> Self {
        let builder = Self {
            base: BuilderBase::new(owner, parent, name, callback),
            target,
            rarity: Rarity::Common,
            slots: EquipmentSlots::empty(),
        };
        builder.default_lang()
    }

    /// Set the rarity.
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Add valid equipment slots.
    pub fn add_slots(mut self, slots: EquipmentSlots) -> Self {
        self.slots |= slots;
        self
    }

    /// Add the four armor slots.
    pub fn armor_slots(self) -> Self {
        self.add_slots(EquipmentSlots::ARMOR)
    }

    /// File the registration and return the enchantment entry.
    pub fn register(self) -> RegistryResult<RegistryEntry<Enchantment>> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }

    fn file(self) -> RegistryResult<(RegistryEntry<Enchantment>, P)> {
        let Self {
            base,
            target,
            rarity,
            slots,
        } = self;
        let BuilderBase {
            parent,
            name,
            callback,
            ..
        } = base;

        let creator = move || Ok(Enchantment::new(rarity, target, slots));
        let entry = callback.accept::<Enchantment>(&name, creator)?;
        Ok((entry, parent))
    }
}
