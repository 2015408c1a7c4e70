use serde::Serialize;

/// A data-pack tag: a named list of entry identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tag {
    replace: bool,
    values: Vec<String>,
}

impl Tag {
    /// An empty, non-replacing tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this tag replaces lower-priority definitions instead of
    /// extending them.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Append an entry, skipping exact duplicates.
    pub fn add(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if !self.values.contains(&id) {
            self.values.push(id);
        }
        self
    }

    /// The entries in insertion order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_skipped() {
        let mut tag = Tag::new();
        tag.add("mymod:lamp").add("mymod:lamp").add("mymod:door");
        assert_eq!(tag.values(), ["mymod:lamp", "mymod:door"]);
    }

    #[test]
    fn json_shape() {
        let mut tag = Tag::new();
        tag.add("mymod:lamp");
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json, serde_json::json!({ "replace": false, "values": ["mymod:lamp"] }));
    }
}
