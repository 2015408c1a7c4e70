use bitflags::bitflags;

bitflags! {
    /// The equipment slots an enchantment applies in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EquipmentSlots: u8 {
        const MAINHAND = 1 << 0;
        const OFFHAND = 1 << 1;
        const HEAD = 1 << 2;
        const CHEST = 1 << 3;
        const LEGS = 1 << 4;
        const FEET = 1 << 5;

        const HANDS = Self::MAINHAND.bits() | Self::OFFHAND.bits();
        const ARMOR = Self::HEAD.bits()
            | Self::CHEST.bits()
            | Self::LEGS.bits()
            | Self::FEET.bits();
    }
}

/// How often an enchantment appears at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
}

/// The item category an enchantment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnchantmentTarget {
    Armor,
    Weapon,
    Tool,
    Bow,
    Breakable,
}

/// A registered enchantment.
#[derive(Debug, PartialEq)]
pub struct Enchantment {
    rarity: Rarity,
    target: EnchantmentTarget,
    slots: EquipmentSlots,
}

impl Enchantment {
    /// Create an enchantment.
    pub fn new(rarity: Rarity, target: EnchantmentTarget, slots: EquipmentSlots) -> Self {
        Self {
            rarity,
            target,
            slots,
        }
    }

    /// The enchantment's rarity.
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// The targeted item category.
    pub fn target(&self) -> EnchantmentTarget {
        self.target
    }

    /// The slots this enchantment applies in.
    pub fn slots(&self) -> EquipmentSlots {
        self.slots
    }
}
