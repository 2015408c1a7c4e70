use std::collections::BTreeMap;

use serde::Serialize;

/// A model reference within a block state, with optional rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRef {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<i32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    uvlock: bool,
}

impl ModelRef {
    /// Reference the given model with no rotation.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            x: None,
            y: None,
            uvlock: false,
        }
    }

    /// Rotate around the x axis, in degrees.
    pub fn x(mut self, degrees: i32) -> Self {
        self.x = Some(degrees);
        self
    }

    /// Rotate around the y axis, in degrees.
    pub fn y(mut self, degrees: i32) -> Self {
        self.y = Some(degrees);
        self
    }

    /// Lock texture orientation under rotation.
    pub fn uvlock(mut self) -> Self {
        self.uvlock = true;
        self
    }
}

/// One multipart case: a model applied when the listed properties match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultipartCase {
    apply: ModelRef,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    when: BTreeMap<String, String>,
}

impl MultipartCase {
    /// Apply the given model unconditionally.
    pub fn new(apply: ModelRef) -> Self {
        Self {
            apply,
            when: BTreeMap::new(),
        }
    }

    /// Require a block property to hold a value for this case to apply.
    pub fn when(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.when.insert(property.into(), value.into());
        self
    }
}

/// A block state definition: either property-keyed variants or a multipart
/// list, matching the layout the engine consumes.
///
/// # Examples
///
/// ```
/// use modkit_datagen::{BlockState, ModelRef};
///
/// let state = BlockState::single("mymod:block/copper_lamp");
/// let json = serde_json::to_value(&state).unwrap();
/// assert_eq!(json["variants"][""]["model"], "mymod:block/copper_lamp");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockState {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    variants: BTreeMap<String, ModelRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    multipart: Vec<MultipartCase>,
}

impl BlockState {
    /// An empty block state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every state to a single model.
    pub fn single(model: impl Into<String>) -> Self {
        Self::new().variant("", ModelRef::new(model))
    }

    /// Add a property-keyed variant, e.g. `"axis=y"`.
    pub fn variant(mut self, state: impl Into<String>, model: ModelRef) -> Self {
        self.variants.insert(state.into(), model);
        self
    }

    /// Add a multipart case.
    pub fn part(mut self, case: MultipartCase) -> Self {
        self.multipart.push(case);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_with_rotation() {
        let state = BlockState::new()
            .variant("axis=x", ModelRef::new("mymod:block/log_horizontal").x(90).y(90))
            .variant("axis=y", ModelRef::new("mymod:block/log"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["variants"]["axis=x"]["x"], 90);
        assert!(json["variants"]["axis=y"].get("x").is_none());
    }

    #[test]
    fn multipart_when() {
        let state = BlockState::new().part(
            MultipartCase::new(ModelRef::new("mymod:block/wall_post")).when("up", "true"),
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["multipart"][0]["when"]["up"], "true");
        assert!(json.get("variants").is_none());
    }

    #[test]
    fn uvlock_omitted_when_false() {
        let json = serde_json::to_value(ModelRef::new("m")).unwrap();
        assert!(json.get("uvlock").is_none());
        let json = serde_json::to_value(ModelRef::new("m").uvlock()).unwrap();
        assert_eq!(json["uvlock"], true);
    }
}
