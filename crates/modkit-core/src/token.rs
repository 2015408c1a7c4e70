use std::any::TypeId;
use std::fmt;

/// Discriminator for a registry type.
///
/// Plays the role a `Class<?>` token plays in reflective registries: the
/// composite key for a pending registration is `(name, TypeToken)`, and each
/// engine registry declares the one token it accepts.
///
/// Tokens are `Copy` and compare by `TypeId`, so two tokens for the same Rust
/// type are always equal regardless of where they were created.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// The token for registry type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The short type name, with module path stripped. Used in error
    /// messages and logs.
    pub fn name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// The full type name including the module path.
    pub fn full_name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeToken").field(&self.name()).finish()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block;
    struct Item;

    #[test]
    fn same_type_same_token() {
        assert_eq!(TypeToken::of::<Block>(), TypeToken::of::<Block>());
        assert_ne!(TypeToken::of::<Block>(), TypeToken::of::<Item>());
    }

    #[test]
    fn short_name() {
        assert_eq!(TypeToken::of::<Block>().name(), "Block");
        assert!(TypeToken::of::<Block>().full_name().contains("tests::Block"));
    }
}
