use std::collections::BTreeMap;

use serde::Serialize;

/// A recipe ingredient: either a concrete item or a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl Ingredient {
    /// Match one specific item.
    pub fn item(id: impl Into<String>) -> Self {
        Self {
            item: Some(id.into()),
            tag: None,
        }
    }

    /// Match any item carrying a tag.
    pub fn tag(id: impl Into<String>) -> Self {
        Self {
            item: None,
            tag: Some(id.into()),
        }
    }
}

/// A stacked recipe result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeResult {
    item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
}

impl RecipeResult {
    /// A single-item result.
    pub fn of(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            count: None,
        }
    }

    /// A stacked result.
    pub fn stacked(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count: Some(count),
        }
    }
}

/// A declarative recipe, tagged with the engine recipe type.
///
/// # Examples
///
/// ```
/// use modkit_datagen::{Ingredient, Recipe, RecipeResult};
///
/// let recipe = Recipe::stonecutting(
///     Ingredient::item("minecraft:stone"),
///     "mymod:stone_pillar",
///     4,
/// );
/// let json = serde_json::to_value(&recipe).unwrap();
/// assert_eq!(json["type"], "minecraft:stonecutting");
/// assert_eq!(json["count"], 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Recipe {
    #[serde(rename = "minecraft:crafting_shaped")]
    Shaped {
        pattern: Vec<String>,
        key: BTreeMap<String, Ingredient>,
        result: RecipeResult,
    },
    #[serde(rename = "minecraft:crafting_shapeless")]
    Shapeless {
        ingredients: Vec<Ingredient>,
        result: RecipeResult,
    },
    #[serde(rename = "minecraft:smelting")]
    Smelting { ingredient: Ingredient, result: String },
    #[serde(rename = "minecraft:blasting")]
    Blasting { ingredient: Ingredient, result: String },
    #[serde(rename = "minecraft:smoking")]
    Smoking { ingredient: Ingredient, result: String },
    #[serde(rename = "minecraft:campfire_cooking")]
    Campfire { ingredient: Ingredient, result: String },
    #[serde(rename = "minecraft:stonecutting")]
    Stonecutting {
        ingredient: Ingredient,
        result: String,
        count: u32,
    },
    #[serde(rename = "minecraft:smithing")]
    Smithing {
        base: Ingredient,
        addition: Ingredient,
        result: RecipeResult,
    },
}

impl Recipe {
    /// A shaped crafting recipe from up to three pattern rows and a key map.
    pub fn shaped<K, I>(pattern: Vec<String>, key: K, result: RecipeResult) -> Self
    where
        K: IntoIterator<Item = (I, Ingredient)>,
        I: Into<String>,
    {
        Self::Shaped {
            pattern,
            key: key.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            result,
        }
    }

    /// A shapeless crafting recipe.
    pub fn shapeless(ingredients: Vec<Ingredient>, result: RecipeResult) -> Self {
        Self::Shapeless {
            ingredients,
            result,
        }
    }

    /// A furnace smelting recipe.
    pub fn smelting(ingredient: Ingredient, result: impl Into<String>) -> Self {
        Self::Smelting {
            ingredient,
            result: result.into(),
        }
    }

    /// A blast furnace recipe.
    pub fn blasting(ingredient: Ingredient, result: impl Into<String>) -> Self {
        Self::Blasting {
            ingredient,
            result: result.into(),
        }
    }

    /// A smoker recipe.
    pub fn smoking(ingredient: Ingredient, result: impl Into<String>) -> Self {
        Self::Smoking {
            ingredient,
            result: result.into(),
        }
    }

    /// A campfire cooking recipe.
    pub fn campfire(ingredient: Ingredient, result: impl Into<String>) -> Self {
        Self::Campfire {
            ingredient,
            result: result.into(),
        }
    }

    /// A stonecutter recipe with an output count.
    pub fn stonecutting(ingredient: Ingredient, result: impl Into<String>, count: u32) -> Self {
        Self::Stonecutting {
            ingredient,
            result: result.into(),
            count,
        }
    }

    /// A smithing table upgrade recipe.
    pub fn smithing(base: Ingredient, addition: Ingredient, result: RecipeResult) -> Self {
        Self::Smithing {
            base,
            addition,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaped_shape() {
        let recipe = Recipe::shaped(
            vec!["XXX".into(), "XYX".into(), "XXX".into()],
            [
                ("X", Ingredient::item("minecraft:netherite_scrap")),
                ("Y", Ingredient::item("minecraft:mossy_cobblestone")),
            ],
            RecipeResult::stacked("mymod:lamp", 1),
        );
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["type"], "minecraft:crafting_shaped");
        assert_eq!(json["pattern"][1], "XYX");
        assert_eq!(json["key"]["X"]["item"], "minecraft:netherite_scrap");
        assert_eq!(json["result"]["item"], "mymod:lamp");
    }

    #[test]
    fn smelting_shape() {
        let json = serde_json::to_value(Recipe::smelting(
            Ingredient::item("mymod:raw_ore"),
            "mymod:ingot",
        ))
        .unwrap();
        assert_eq!(json["type"], "minecraft:smelting");
        assert_eq!(json["ingredient"]["item"], "mymod:raw_ore");
        assert_eq!(json["result"], "mymod:ingot");
    }

    #[test]
    fn result_count_omitted_when_single() {
        let json = serde_json::to_value(RecipeResult::of("mymod:lamp")).unwrap();
        assert!(json.get("count").is_none());
    }
}
