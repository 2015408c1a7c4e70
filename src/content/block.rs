/// Coarse material class for a block, controlling settings defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Stone,
    Wood,
    Metal,
    Earth,
    Glass,
    Liquid,
}

/// Physical properties of a block, assembled before construction.
///
/// Builders compose transformations over a settings value and apply them
/// lazily, at registration time; see `BlockBuilder::properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSettings {
    pub material: Material,
    pub hardness: f32,
    pub resistance: f32,
    pub luminance: u8,
    pub opaque: bool,
    pub drops: bool,
}

impl BlockSettings {
    /// Default settings for a material.
    pub fn of(material: Material) -> Self {
        Self {
            material,
            hardness: 1.5,
            resistance: 6.0,
            luminance: 0,
            opaque: !matches!(material, Material::Glass | Material::Liquid),
            drops: true,
        }
    }

    /// Copy the settings of an existing block.
    pub fn copy_of(block: &Block) -> Self {
        block.settings.clone()
    }

    /// Set the break hardness.
    pub fn hardness(mut self, hardness: f32) -> Self {
        self.hardness = hardness;
        self
    }

    /// Set the blast resistance.
    pub fn resistance(mut self, resistance: f32) -> Self {
        self.resistance = resistance;
        self
    }

    /// Set the emitted light level (0-15).
    pub fn luminance(mut self, luminance: u8) -> Self {
        self.luminance = luminance;
        self
    }

    /// Mark the block as not blocking light.
    pub fn non_opaque(mut self) -> Self {
        self.opaque = false;
        self
    }

    /// The block drops nothing when broken; suppresses loot-table
    /// generation.
    pub fn drops_nothing(mut self) -> Self {
        self.drops = false;
        self
    }
}

/// A registered block.
#[derive(Debug, PartialEq)]
pub struct Block {
    settings: BlockSettings,
}

impl Block {
    /// Create a block from settings.
    pub fn new(settings: BlockSettings) -> Self {
        Self { settings }
    }

    /// The block's settings.
    pub fn settings(&self) -> &BlockSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_defaults() {
        assert!(BlockSettings::of(Material::Stone).opaque);
        assert!(!BlockSettings::of(Material::Glass).opaque);
    }

    #[test]
    fn copy_of_preserves_settings() {
        let block = Block::new(BlockSettings::of(Material::Wood).hardness(0.5).luminance(7));
        let copied = BlockSettings::copy_of(&block);
        assert_eq!(&copied, block.settings());
    }
}
