//! Declarative resource generation.
//!
//! The registrar and the content builders accumulate models, block states,
//! loot tables, recipes, tags, and language entries here instead of shipping
//! hand-written JSON. Everything is plain serde data: build the fragments
//! with the fluent constructors, collect them in a [`ResourcePack`], and
//! either hand the pack to the host or [`ResourcePack::write_to`] a
//! directory for inspection.

mod blockstate;
mod lang;
mod loot;
mod model;
mod pack;
mod recipe;
mod tag;

pub use blockstate::{BlockState, ModelRef, MultipartCase};
pub use lang::Lang;
pub use loot::{Condition, LootFunction, LootTable, Pool, PoolEntry};
pub use model::Model;
pub use pack::{PackError, ResourcePack};
pub use recipe::{Ingredient, Recipe, RecipeResult};
pub use tag::Tag;
