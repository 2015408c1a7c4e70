//! The resource-pack accumulator.
//!
//! Builders and the registrar funnel generated resources here during the
//! registration phase; [`ResourcePack::write_to`] lays the accumulated data
//! out on disk in the `assets/` + `data/` tree the engine loads.

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use modkit_core::Ident;

use crate::blockstate::BlockState;
use crate::lang::Lang;
use crate::loot::LootTable;
use crate::model::Model;
use crate::recipe::Recipe;
use crate::tag::Tag;

/// Errors while serializing or writing a resource pack.
#[derive(Debug, Error)]
pub enum PackError {
    /// Filesystem failure while creating directories or writing a file.
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization failure for one resource.
    #[error("failed to serialize {id}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An in-memory resource pack, keyed by resource identifier.
///
/// Insertion order is preserved so repeated runs produce identical output
/// trees. Adding a resource under an existing id replaces it, except for
/// tags and language files which merge.
#[derive(Default)]
pub struct ResourcePack {
    name: String,
    models: IndexMap<Ident, Model>,
    blockstates: IndexMap<Ident, BlockState>,
    loot_tables: IndexMap<Ident, LootTable>,
    recipes: IndexMap<Ident, Recipe>,
    tags: IndexMap<Ident, Tag>,
    langs: IndexMap<Ident, Lang>,
}

impl ResourcePack {
    /// Create an empty pack with a diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add (or replace) a model.
    pub fn add_model(&mut self, id: Ident, model: Model) {
        self.models.insert(id, model);
    }

    /// Add (or replace) a block state definition.
    pub fn add_blockstate(&mut self, id: Ident, state: BlockState) {
        self.blockstates.insert(id, state);
    }

    /// Add (or replace) a loot table.
    pub fn add_loot_table(&mut self, id: Ident, table: LootTable) {
        self.loot_tables.insert(id, table);
    }

    /// Add (or replace) a recipe.
    pub fn add_recipe(&mut self, id: Ident, recipe: Recipe) {
        self.recipes.insert(id, recipe);
    }

    /// Merge entries into the tag with the given id.
    pub fn add_tag(&mut self, id: Ident, tag: Tag) {
        let slot = self.tags.entry(id).or_default();
        for value in tag.values() {
            slot.add(value.clone());
        }
    }

    /// Merge a language file keyed by `namespace:lang_code`; existing keys
    /// win.
    pub fn add_lang(&mut self, id: Ident, lang: Lang) {
        self.langs.entry(id).or_default().merge(lang);
    }

    /// Look up an accumulated model.
    pub fn model(&self, id: &Ident) -> Option<&Model> {
        self.models.get(id)
    }

    /// Look up an accumulated block state.
    pub fn blockstate(&self, id: &Ident) -> Option<&BlockState> {
        self.blockstates.get(id)
    }

    /// Look up an accumulated loot table.
    pub fn loot_table(&self, id: &Ident) -> Option<&LootTable> {
        self.loot_tables.get(id)
    }

    /// Look up an accumulated recipe.
    pub fn recipe(&self, id: &Ident) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Look up an accumulated tag.
    pub fn tag(&self, id: &Ident) -> Option<&Tag> {
        self.tags.get(id)
    }

    /// Look up an accumulated language file.
    pub fn lang(&self, id: &Ident) -> Option<&Lang> {
        self.langs.get(id)
    }

    /// Iterate all recipe ids, in insertion order.
    pub fn recipe_ids(&self) -> impl Iterator<Item = &Ident> {
        self.recipes.keys()
    }

    /// Total number of accumulated resources.
    pub fn len(&self) -> usize {
        self.models.len()
            + self.blockstates.len()
            + self.loot_tables.len()
            + self.recipes.len()
            + self.tags.len()
            + self.langs.len()
    }

    /// Whether the pack holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the pack under `root` as an `assets/` + `data/` tree.
    pub fn write_to(&self, root: &Path) -> Result<(), PackError> {
        write_all(root, "assets", "models", &self.models)?;
        write_all(root, "assets", "blockstates", &self.blockstates)?;
        write_all(root, "assets", "lang", &self.langs)?;
        write_all(root, "data", "loot_tables", &self.loot_tables)?;
        write_all(root, "data", "recipes", &self.recipes)?;
        write_all(root, "data", "tags", &self.tags)?;
        Ok(())
    }
}

fn write_all<T: Serialize>(
    root: &Path,
    side: &str,
    category: &str,
    resources: &IndexMap<Ident, T>,
) -> Result<(), PackError> {
    for (id, resource) in resources {
        let path = root
            .join(side)
            .join(id.namespace())
            .join(category)
            .join(format!("{}.json", id.path()));
        let body = serde_json::to_vec_pretty(resource).map_err(|source| PackError::Serialize {
            id: id.to_string(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PackError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, body).map_err(|source| PackError::Io { path, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_merge() {
        let mut pack = ResourcePack::new("test");
        let id = Ident::new("minecraft", "blocks/walls");
        let mut first = Tag::new();
        first.add("mymod:wall_a");
        let mut second = Tag::new();
        second.add("mymod:wall_b");
        pack.add_tag(id.clone(), first);
        pack.add_tag(id.clone(), second);
        assert_eq!(
            pack.tag(&id).unwrap().values(),
            ["mymod:wall_a", "mymod:wall_b"]
        );
    }

    #[test]
    fn write_layout() {
        let mut pack = ResourcePack::new("test");
        pack.add_model(
            Ident::new("mymod", "block/lamp"),
            Model::cube_all("mymod:block/lamp"),
        );
        pack.add_blockstate(Ident::new("mymod", "lamp"), BlockState::single("mymod:block/lamp"));
        pack.add_loot_table(
            Ident::new("mymod", "blocks/lamp"),
            LootTable::self_drop("mymod:lamp"),
        );
        let mut lang = Lang::new();
        lang.entry("block.mymod.lamp", "Lamp");
        pack.add_lang(Ident::new("mymod", "en_us"), lang);

        let dir = tempfile::tempdir().unwrap();
        pack.write_to(dir.path()).unwrap();

        assert!(dir.path().join("assets/mymod/models/block/lamp.json").is_file());
        assert!(dir.path().join("assets/mymod/blockstates/lamp.json").is_file());
        assert!(dir.path().join("assets/mymod/lang/en_us.json").is_file());
        assert!(dir.path().join("data/mymod/loot_tables/blocks/lamp.json").is_file());

        let body =
            std::fs::read_to_string(dir.path().join("assets/mymod/lang/en_us.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["block.mymod.lamp"], "Lamp");
    }
}
