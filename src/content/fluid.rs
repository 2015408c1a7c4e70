use modkit_core::Ident;

/// Flow behavior of a fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidSettings {
    /// Ticks between flow updates.
    pub tick_rate: u32,
    /// Whether sources replicate like water.
    pub infinite: bool,
}

impl FluidSettings {
    /// Water-like defaults.
    pub fn new() -> Self {
        Self {
            tick_rate: 5,
            infinite: false,
        }
    }

    /// Set the flow tick rate.
    pub fn tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Make sources replicate.
    pub fn infinite(mut self) -> Self {
        self.infinite = true;
        self
    }
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered fluid variant.
///
/// Fluids register in pairs: a still source under the base name and a
/// flowing variant under `flowing_<name>`. The variant records the names of
/// its companions (and of the derived block and bucket, when generated) so
/// entries can navigate between them via sibling lookups, plus the texture
/// pair a host render layer needs.
#[derive(Debug, PartialEq)]
pub struct Fluid {
    source: bool,
    settings: FluidSettings,
    source_name: String,
    flowing_name: String,
    block_name: Option<String>,
    bucket_name: Option<String>,
    textures: Option<(Ident, Ident)>,
}

impl Fluid {
    /// Create one variant of a fluid pair.
    pub fn new(
        source: bool,
        settings: FluidSettings,
        source_name: impl Into<String>,
        flowing_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            settings,
            source_name: source_name.into(),
            flowing_name: flowing_name.into(),
            block_name: None,
            bucket_name: None,
            textures: None,
        }
    }

    /// Record the still and flowing texture locations.
    pub fn with_textures(mut self, still: Ident, flowing: Ident) -> Self {
        self.textures = Some((still, flowing));
        self
    }

    /// Record the name of the derived fluid block.
    pub fn with_block(mut self, name: impl Into<String>) -> Self {
        self.block_name = Some(name.into());
        self
    }

    /// Record the name of the derived bucket item.
    pub fn with_bucket(mut self, name: impl Into<String>) -> Self {
        self.bucket_name = Some(name.into());
        self
    }

    /// Whether this is the still source variant.
    pub fn is_source(&self) -> bool {
        self.source
    }

    /// The fluid's settings.
    pub fn settings(&self) -> &FluidSettings {
        &self.settings
    }

    /// Name of the still source variant.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Name of the flowing variant.
    pub fn flowing_name(&self) -> &str {
        &self.flowing_name
    }

    /// Name of the derived fluid block, if one was generated.
    pub fn block_name(&self) -> Option<&str> {
        self.block_name.as_deref()
    }

    /// Name of the derived bucket item, if one was generated.
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    /// The `(still, flowing)` texture locations, if recorded.
    pub fn textures(&self) -> Option<&(Ident, Ident)> {
        self.textures.as_ref()
    }
}
