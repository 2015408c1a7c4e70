use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Namespaced identifier for registered content and generated resources.
///
/// Rendered as `namespace:path`, e.g. `mymod:copper_lamp`. Both segments are
/// restricted to lowercase ASCII, digits, and `_ - . /` (the path may contain
/// `/` for nested resource locations such as `block/copper_lamp`).
///
/// # Examples
///
/// ```
/// use modkit_core::Ident;
///
/// let id = Ident::new("mymod", "copper_lamp");
/// assert_eq!(id.to_string(), "mymod:copper_lamp");
///
/// let parsed: Ident = "mymod:block/copper_lamp".parse().unwrap();
/// assert_eq!(parsed.namespace(), "mymod");
/// assert_eq!(parsed.path(), "block/copper_lamp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident {
    namespace: String,
    path: String,
}

impl Ident {
    /// Create a new identifier from a namespace and path.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Create an identifier, validating both segments.
    pub fn try_new(
        namespace: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let id = Self::new(namespace, path);
        if !is_valid_segment(&id.namespace, false) || !is_valid_segment(&id.path, true) {
            return Err(RegistryError::InvalidIdent {
                ident: id.to_string(),
            });
        }
        Ok(id)
    }

    /// The namespace segment.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path segment.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The final path component, with any `dir/` prefixes stripped.
    ///
    /// `mymod:block/copper_lamp` -> `copper_lamp`.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Create a sibling identifier in the same namespace.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self::new(self.namespace.clone(), path)
    }

    /// Prefix the path with a directory, e.g. `block/`.
    pub fn prefixed(&self, dir: &str) -> Self {
        Self::new(self.namespace.clone(), format!("{}/{}", dir, self.path))
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Ident {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((ns, path)) if !ns.is_empty() && !path.is_empty() => Self::try_new(ns, path),
            _ => Err(RegistryError::InvalidIdent {
                ident: s.to_string(),
            }),
        }
    }
}

fn is_valid_segment(s: &str, allow_slash: bool) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || c == '_'
                || c == '-'
                || c == '.'
                || (allow_slash && c == '/')
        })
}

/// Derive a default English display name from an identifier path.
///
/// `copper_lamp` -> `Copper Lamp`. Used for default language entries.
pub fn to_english_name(path: &str) -> String {
    path.rsplit('/')
        .next()
        .unwrap_or(path)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_roundtrip() {
        let id = Ident::new("mymod", "copper_lamp");
        let parsed: Ident = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_malformed() {
        assert!("no_namespace".parse::<Ident>().is_err());
        assert!("Upper:case".parse::<Ident>().is_err());
        assert!("mymod:".parse::<Ident>().is_err());
        assert!(":lamp".parse::<Ident>().is_err());
    }

    #[test]
    fn namespace_rejects_slash() {
        assert!("my/mod:lamp".parse::<Ident>().is_err());
        assert!("mymod:block/lamp".parse::<Ident>().is_ok());
    }

    #[test]
    fn name_strips_directories() {
        let id = Ident::new("mymod", "block/copper_lamp");
        assert_eq!(id.name(), "copper_lamp");
        assert_eq!(Ident::new("mymod", "lamp").name(), "lamp");
    }

    #[test]
    fn english_name() {
        assert_eq!(to_english_name("copper_lamp"), "Copper Lamp");
        assert_eq!(to_english_name("lamp"), "Lamp");
        assert_eq!(to_english_name("block/oak_door"), "Oak Door");
    }
}
