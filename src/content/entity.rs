/// Spawn classification for an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnGroup {
    Creature,
    Monster,
    Ambient,
    WaterCreature,
    Misc,
}

/// Physical properties of an entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySettings {
    pub width: f32,
    pub height: f32,
    pub fire_immune: bool,
    pub tracking_range: u32,
}

impl EntitySettings {
    /// Default humanoid-sized settings.
    pub fn new() -> Self {
        Self {
            width: 0.6,
            height: 1.8,
            fire_immune: false,
            tracking_range: 5,
        }
    }

    /// Set the bounding-box dimensions.
    pub fn dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Make instances immune to fire damage.
    pub fn fire_immune(mut self) -> Self {
        self.fire_immune = true;
        self
    }

    /// Set the chunk tracking range.
    pub fn tracking_range(mut self, range: u32) -> Self {
        self.tracking_range = range;
        self
    }
}

impl Default for EntitySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered entity type.
#[derive(Debug, PartialEq)]
pub struct EntityType {
    spawn_group: SpawnGroup,
    settings: EntitySettings,
}

impl EntityType {
    /// Create an entity type.
    pub fn new(spawn_group: SpawnGroup, settings: EntitySettings) -> Self {
        Self {
            spawn_group,
            settings,
        }
    }

    /// The spawn classification.
    pub fn spawn_group(&self) -> SpawnGroup {
        self.spawn_group
    }

    /// The entity type's settings.
    pub fn settings(&self) -> &EntitySettings {
        &self.settings
    }
}
