use std::collections::BTreeMap;

use serde::Serialize;

/// A declarative item or block model: a parent reference plus texture
/// variables.
///
/// # Examples
///
/// ```
/// use modkit_datagen::Model;
///
/// let model = Model::new()
///     .parent("minecraft:block/cube_all")
///     .texture("all", "mymod:block/copper_lamp");
/// let json = serde_json::to_value(&model).unwrap();
/// assert_eq!(json["parent"], "minecraft:block/cube_all");
/// assert_eq!(json["textures"]["all"], "mymod:block/copper_lamp");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    textures: BTreeMap<String, String>,
}

impl Model {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parent model.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set a texture variable.
    pub fn texture(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.textures.insert(var.into(), value.into());
        self
    }

    /// A flat generated item model with a single `layer0` texture.
    pub fn generated_item(texture: impl Into<String>) -> Self {
        Self::new()
            .parent("minecraft:item/generated")
            .texture("layer0", texture)
    }

    /// A full cube with one texture on every face.
    pub fn cube_all(texture: impl Into<String>) -> Self {
        Self::new()
            .parent("minecraft:block/cube_all")
            .texture("all", texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(Model::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn cube_all_shape() {
        let json = serde_json::to_value(Model::cube_all("mymod:block/lamp")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "parent": "minecraft:block/cube_all",
                "textures": { "all": "mymod:block/lamp" }
            })
        );
    }
}
