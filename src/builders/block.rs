use std::any::Any;
use std::rc::Rc;

use indexmap::IndexMap;

use modkit_core::{EntrySupplier, Ident, RegistryResult};
use modkit_datagen::{
    BlockState, Ingredient, LootTable, Model, ModelRef, MultipartCase, Recipe, RecipeResult,
};
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{Block, BlockEntityType, BlockSettings, Item, Material};
use crate::entry::BlockEntry;

use super::{BlockEntityBuilder, BuilderBase, ItemBuilder, impl_builder_common};

/// Frequently used loot-table shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonLoot {
    /// No loot table; the block drops nothing.
    Never,
    /// Slab behavior: drops two when a double slab breaks.
    Slab,
    /// Drops only when broken with a silk-touch tool.
    SilkTouchRequired,
}

/// Cooking recipe families sharing the ingredient-to-result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookingKind {
    Smelting,
    Blasting,
    Smoking,
    Campfire,
}

/// A builder for blocks: settings customization, derived block items and
/// block entities, and the block's generated data (block state, models,
/// loot table, recipes).
///
/// On creation a block is assigned a default single-variant block state with
/// a cube-all model, a self-drop loot table, and the default translation —
/// each replaceable by the corresponding methods.
pub struct BlockBuilder<P> {
    base: BuilderBase<P>,
    factory: Box<dyn FnOnce(BlockSettings) -> Block>,
    initial: Box<dyn FnOnce() -> BlockSettings>,
    transforms: Vec<Box<dyn FnOnce(BlockSettings) -> BlockSettings>>,
    loot: Option<LootTable>,
    no_loot: bool,
    state: Option<(Ident, BlockState)>,
    models: IndexMap<Ident, Model>,
}

impl_builder_common!(BlockBuilder, "block");

impl<P> BlockBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        factory: impl FnOnce(BlockSettings) -> Block + 'static,
        material: Material,
    ) -> Self {
        let builder = Self {
            base: BuilderBase::new(owner, parent, name, callback),
            factory: Box::new(factory),
            initial: Box::new(move || BlockSettings::of(material)),
            transforms: Vec::new(),
            loot: None,
            no_loot: false,
            state: None,
            models: IndexMap::new(),
        };
        builder.default_blockstate().default_loot().default_lang()
    }

    // ==================================================================
    // Settings
    // ==================================================================

    /// Modify the block settings. Modifications run lazily at registration
    /// time and compose with earlier calls.
    pub fn properties(
        mut self,
        transform: impl FnOnce(BlockSettings) -> BlockSettings + 'static,
    ) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Replace the initial settings without touching modifications made via
    /// [`properties`](Self::properties).
    pub fn initial_properties(mut self, material: Material) -> Self {
        self.initial = Box::new(move || BlockSettings::of(material));
        self
    }

    /// Replace the initial settings with an arbitrary supplier, e.g. a copy
    /// of another block's settings.
    pub fn initial_from(mut self, initial: impl FnOnce() -> BlockSettings + 'static) -> Self {
        self.initial = Box::new(initial);
        self
    }

    // ==================================================================
    // Block state and models
    // ==================================================================

    /// Assign the default block state: every state mapped to one cube-all
    /// model textured `<mod>:block/<name>`.
    pub fn default_blockstate(self) -> Self {
        let texture = self.block_model_id();
        self.cube_model(texture)
    }

    /// A single cube model with one texture on all faces.
    pub fn cube_model(mut self, texture: Ident) -> Self {
        let model_id = self.block_model_id();
        self.models.clear();
        self.models
            .insert(model_id.clone(), Model::cube_all(texture.to_string()));
        let state_id = self.base.ident();
        self.blockstate(state_id, BlockState::single(model_id.to_string()))
    }

    /// A pillar model with side and end textures, rotated per axis.
    pub fn pillar_model(mut self, side_texture: Ident, ends_texture: Ident) -> Self {
        let base_id = self.block_model_id();
        let horizontal_id = self.base.owner.ident(&format!("block/{}_horizontal", self.base.name));
        let model = Model::new()
            .parent("minecraft:block/cube_column")
            .texture("end", ends_texture.to_string())
            .texture("side", side_texture.to_string());
        self.models.clear();
        self.models.insert(base_id.clone(), model.clone());
        self.models.insert(horizontal_id.clone(), model);
        let state = BlockState::new()
            .variant(
                "axis=x",
                ModelRef::new(horizontal_id.to_string()).x(90).y(90),
            )
            .variant("axis=y", ModelRef::new(base_id.to_string()))
            .variant("axis=z", ModelRef::new(horizontal_id.to_string()).x(90));
        let state_id = self.base.ident();
        self.blockstate(state_id, state)
    }

    /// A stairs model with one texture.
    pub fn stairs_model(self, texture: Ident) -> Self {
        self.stairs_model_textured(texture.clone(), texture.clone(), texture)
    }

    /// A stairs model with top, bottom, and side textures. Generates the
    /// full facing/half/shape variant table.
    pub fn stairs_model_textured(
        mut self,
        top_texture: Ident,
        bottom_texture: Ident,
        side_texture: Ident,
    ) -> Self {
        let textures = Model::new()
            .texture("top", top_texture.to_string())
            .texture("bottom", bottom_texture.to_string())
            .texture("side", side_texture.to_string());
        let straight_id = self.block_model_id();
        let inner_id = self.base.owner.ident(&format!("block/{}_inner", self.base.name));
        let outer_id = self.base.owner.ident(&format!("block/{}_outer", self.base.name));
        self.models.clear();
        self.models.insert(
            straight_id.clone(),
            textures.clone().parent("minecraft:block/stairs"),
        );
        self.models.insert(
            inner_id.clone(),
            textures.clone().parent("minecraft:block/inner_stairs"),
        );
        self.models.insert(
            outer_id.clone(),
            textures.parent("minecraft:block/outer_stairs"),
        );

        let mut state = BlockState::new();
        for (facing, base_y) in [("east", 0), ("north", 270), ("south", 90), ("west", 180)] {
            for (half, x) in [("bottom", 0), ("top", 180)] {
                for shape in [
                    "inner_left",
                    "inner_right",
                    "outer_left",
                    "outer_right",
                    "straight",
                ] {
                    let model = if shape.starts_with("inner") {
                        &inner_id
                    } else if shape.starts_with("outer") {
                        &outer_id
                    } else {
                        &straight_id
                    };
                    // Left shapes borrow the next facing's bottom rotation;
                    // right shapes shift forward on the top half.
                    let mut y = base_y;
                    if x == 0 && shape.ends_with("_left") {
                        y = (base_y + 270) % 360;
                    }
                    if x == 180 && shape.ends_with("_right") {
                        y = (base_y + 90) % 360;
                    }
                    let mut model_ref = ModelRef::new(model.to_string());
                    if x != 0 {
                        model_ref = model_ref.x(x);
                    }
                    if y != 0 {
                        model_ref = model_ref.y(y);
                    }
                    if x != 0 || y != 0 {
                        model_ref = model_ref.uvlock();
                    }
                    state = state.variant(
                        format!("facing={facing},half={half},shape={shape}"),
                        model_ref,
                    );
                }
            }
        }
        let state_id = self.base.ident();
        self.blockstate(state_id, state)
    }

    /// A wall model with one texture: post, low and tall sides as
    /// multipart cases, plus an inventory model.
    pub fn wall_model(mut self, texture: Ident) -> Self {
        let textures = Model::new().texture("wall", texture.to_string());
        let post_id = self.base.owner.ident(&format!("block/{}_post", self.base.name));
        let side_id = self.base.owner.ident(&format!("block/{}_side", self.base.name));
        let tall_id = self.base.owner.ident(&format!("block/{}_side_tall", self.base.name));
        let inventory_id = self.base.owner.ident(&format!("item/{}", self.base.name));
        self.models.clear();
        self.models.insert(
            post_id.clone(),
            textures.clone().parent("minecraft:block/template_wall_post"),
        );
        self.models.insert(
            side_id.clone(),
            textures.clone().parent("minecraft:block/template_wall_side"),
        );
        self.models.insert(
            tall_id.clone(),
            textures
                .clone()
                .parent("minecraft:block/template_wall_side_tall"),
        );
        self.models.insert(
            inventory_id,
            textures.parent("minecraft:block/wall_inventory"),
        );

        let mut state = BlockState::new().part(
            MultipartCase::new(ModelRef::new(post_id.to_string())).when("up", "true"),
        );
        for (height, model) in [("low", &side_id), ("tall", &tall_id)] {
            for (direction, y) in [("north", 0), ("east", 90), ("south", 180), ("west", 270)] {
                let mut model_ref = ModelRef::new(model.to_string()).uvlock();
                if y != 0 {
                    model_ref = model_ref.y(y);
                }
                state = state.part(MultipartCase::new(model_ref).when(direction, height));
            }
        }
        let state_id = self.base.ident();
        self.blockstate(state_id, state)
    }

    /// A fence model with one texture: post plus rotated sides as multipart
    /// cases, plus an inventory model.
    pub fn fence_model(mut self, texture: Ident) -> Self {
        let textures = Model::new().texture("texture", texture.to_string());
        let post_id = self.base.owner.ident(&format!("block/{}_post", self.base.name));
        let side_id = self.base.owner.ident(&format!("block/{}_side", self.base.name));
        let inventory_id = self.base.owner.ident(&format!("item/{}", self.base.name));
        self.models.clear();
        self.models.insert(
            post_id.clone(),
            textures.clone().parent("minecraft:block/fence_post"),
        );
        self.models.insert(
            side_id.clone(),
            textures.clone().parent("minecraft:block/fence_side"),
        );
        self.models.insert(
            inventory_id,
            textures.parent("minecraft:block/fence_inventory"),
        );

        let mut state =
            BlockState::new().part(MultipartCase::new(ModelRef::new(post_id.to_string())));
        for (direction, y) in [("north", 0), ("east", 90), ("south", 180), ("west", 270)] {
            let mut model_ref = ModelRef::new(side_id.to_string()).uvlock();
            if y != 0 {
                model_ref = model_ref.y(y);
            }
            state = state.part(MultipartCase::new(model_ref).when(direction, "true"));
        }
        let state_id = self.base.ident();
        self.blockstate(state_id, state)
    }

    /// Set the block state directly, replacing whatever a model helper
    /// assigned.
    pub fn blockstate(mut self, state_id: Ident, state: BlockState) -> Self {
        self.state = Some((state_id, state));
        self
    }

    fn block_model_id(&self) -> Ident {
        self.base.owner.ident(&format!("block/{}", self.base.name))
    }

    // ==================================================================
    // Loot
    // ==================================================================

    /// Assign the default loot table: the block drops itself.
    pub fn default_loot(self) -> Self {
        let id = self.base.ident().to_string();
        self.loot(LootTable::self_drop(id))
    }

    /// Assign one of the common loot-table shapes.
    pub fn simple_loot(mut self, common: CommonLoot) -> Self {
        let id = self.base.ident().to_string();
        match common {
            CommonLoot::Never => {
                self.no_loot = true;
                self.loot = None;
                self.properties(BlockSettings::drops_nothing)
            }
            CommonLoot::Slab => self.loot(LootTable::slab_double(id)),
            CommonLoot::SilkTouchRequired => self.loot(LootTable::silk_touch_only(id)),
        }
    }

    /// Set the loot table directly.
    pub fn loot(mut self, table: LootTable) -> Self {
        self.no_loot = false;
        self.loot = Some(table);
        self
    }

    // ==================================================================
    // Recipes
    // ==================================================================

    /// Add a smithing recipe producing this block.
    pub fn smithing_recipe(self, base: Ident, addition: Ident, count: u32) -> Self {
        let result = RecipeResult::stacked(self.base.ident().to_string(), count);
        self.recipe(
            "smithing",
            Recipe::smithing(
                Ingredient::item(base.to_string()),
                Ingredient::item(addition.to_string()),
                result,
            ),
        )
    }

    /// Add a cooking-family recipe producing this block.
    pub fn cooking_recipe(self, input: Ident, kind: CookingKind) -> Self {
        let ingredient = Ingredient::item(input.to_string());
        let result = self.base.ident().to_string();
        let (name, recipe) = match kind {
            CookingKind::Smelting => ("smelting", Recipe::smelting(ingredient, result)),
            CookingKind::Blasting => ("blasting", Recipe::blasting(ingredient, result)),
            CookingKind::Smoking => ("smoking", Recipe::smoking(ingredient, result)),
            CookingKind::Campfire => ("campfire", Recipe::campfire(ingredient, result)),
        };
        self.recipe(name, recipe)
    }

    /// Add a stonecutting recipe producing `count` of this block.
    pub fn stonecutting_recipe(self, input: Ident, count: u32) -> Self {
        let recipe = Recipe::stonecutting(
            Ingredient::item(input.to_string()),
            self.base.ident().to_string(),
            count,
        );
        self.recipe("stonecutting", recipe)
    }

    /// Add a shapeless recipe from `(ingredient, occurrences)` pairs.
    pub fn shapeless_recipe(self, count: u32, ingredients: &[(Ident, u32)]) -> Self {
        let mut list = Vec::new();
        for (id, occurrences) in ingredients {
            for _ in 0..*occurrences {
                list.push(Ingredient::item(id.to_string()));
            }
        }
        let result = RecipeResult::stacked(self.base.ident().to_string(), count);
        self.recipe("shapeless", Recipe::shapeless(list, result))
    }

    /// Add a shaped recipe from three pattern rows and a key map.
    ///
    /// ```ignore
    /// .shaped_recipe(1, ["XXX", "XYX", "XXX"], &[
    ///     ('X', Ident::new("minecraft", "netherite_scrap")),
    ///     ('Y', Ident::new("minecraft", "mossy_cobblestone")),
    /// ])
    /// ```
    pub fn shaped_recipe(self, count: u32, rows: [&str; 3], keys: &[(char, Ident)]) -> Self {
        let pattern = rows.iter().map(|row| row.to_string()).collect();
        let key = keys
            .iter()
            .map(|(symbol, id)| (symbol.to_string(), Ingredient::item(id.to_string())));
        let result = RecipeResult::stacked(self.base.ident().to_string(), count);
        self.recipe("shaped", Recipe::shaped(pattern, key, result))
    }

    /// Add an arbitrary recipe producing this block, named after the recipe
    /// kind.
    pub fn recipe(self, kind: &str, recipe: Recipe) -> Self {
        self.base
            .owner
            .add_recipe(Some(&format!("{}_{kind}", self.base.name)), recipe);
        self
    }

    // ==================================================================
    // Derived content
    // ==================================================================

    /// Create a block item for this block and return its builder for
    /// further configuration. The item resolves the block at construction
    /// time and inherits a block-parented model; it carries no language
    /// entry of its own since the block's covers it.
    pub fn item(self) -> ItemBuilder<BlockBuilder<P>> {
        let owner = self.base.owner.clone();
        let name = self.base.name.clone();
        owner.entry_named(name, |name, callback| {
            ItemBuilder::block_item(owner.clone(), self, name, callback)
        })
    }

    /// Create a standard block item immediately, without further
    /// configuration.
    pub fn simple_item(self) -> RegistryResult<BlockBuilder<P>> {
        self.item().build()
    }

    /// Create a block-entity type for this block, pre-validated against it,
    /// and return its builder for further configuration.
    pub fn block_entity(
        self,
        factory: impl Fn(Rc<BlockEntityType>) -> Box<dyn Any> + 'static,
    ) -> BlockEntityBuilder<BlockBuilder<P>> {
        let owner = self.base.owner.clone();
        let name = self.base.name.clone();
        let block_lookup = {
            let owner = owner.clone();
            let name = name.clone();
            move || owner.get_named::<Block>(&name)?.get()
        };
        owner.entry_named(name, |name, callback| {
            BlockEntityBuilder::create(owner.clone(), self, name, callback, factory)
                .valid_block(block_lookup)
        })
    }

    /// The item supplier for this block, safe to capture before
    /// registration: the lookup defers until first use.
    pub fn item_supplier(&self) -> EntrySupplier<Item> {
        let owner = self.base.owner.clone();
        let name = self.base.name.clone();
        EntrySupplier::new(move || owner.get_named::<Item>(&name))
    }

    // ==================================================================
    // Terminals
    // ==================================================================

    fn file(self) -> RegistryResult<(BlockEntry, P)> {
        let Self {
            base,
            factory,
            initial,
            transforms,
            loot,
            no_loot,
            state,
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
        if let Some((id, state)) = state {
            owner.add_blockstate(id, state);
        }
        if !no_loot {
            if let Some(loot) = loot {
                let id = Ident::new(owner.mod_id(), format!("blocks/{name}"));
                owner.add_loot_table(id, loot);
            }
        }

        let creator = move || {
            let mut settings = initial();
            for transform in transforms {
                settings = transform(settings);
            }
            Ok(factory(settings))
        };
        let entry = callback.accept::<Block>(&name, creator)?;
        Ok((BlockEntry::new(entry), parent))
    }

    /// File the registration and return the block entry.
    pub fn register(self) -> RegistryResult<BlockEntry> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }
}
