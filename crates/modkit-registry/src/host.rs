//! The engine-registry boundary.
//!
//! The registrar does not own any registries; the host runtime supplies an
//! ordered set of them and the sweep visits each in turn. A registry is
//! anything implementing [`EngineRegistry`]: it declares the one content
//! type it accepts and performs the actual registration call.
//!
//! [`StaticRegistry`] is the plain in-process implementation used by tests
//! and by hosts without their own registry machinery.

use std::any::Any;
use std::rc::Rc;

use indexmap::IndexMap;

use modkit_core::{Ident, RegistryError, RegistryResult, TypeToken};

/// One engine registry: accepts objects of a single content type.
pub trait EngineRegistry {
    /// The identifier of this registry, used in error messages and logs.
    fn id(&self) -> &Ident;

    /// The content type this registry accepts.
    fn token(&self) -> TypeToken;

    /// Perform the registration call for an already-constructed object.
    fn register_raw(&mut self, id: &Ident, object: Rc<dyn Any>) -> RegistryResult<()>;

    /// Downcast support for host-side inspection.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The ordered collection of known registries, supplied by the host.
///
/// Iteration order is registration order; the sweep visits registries in
/// exactly this order, so hosts control inter-type dependencies (e.g.
/// blocks before the items that reference them).
#[derive(Default)]
pub struct RegistryHost {
    registries: Vec<Box<dyn EngineRegistry>>,
}

impl RegistryHost {
    /// An empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registry. Later additions are swept later.
    pub fn add(&mut self, registry: impl EngineRegistry + 'static) -> &mut Self {
        self.registries.push(Box::new(registry));
        self
    }

    /// Number of known registries.
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Whether no registries are known.
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Iterate registries in sweep order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn EngineRegistry>> {
        self.registries.iter_mut()
    }

    /// The [`StaticRegistry`] for content type `T`, if one was added.
    pub fn registry<T: 'static>(&self) -> Option<&StaticRegistry<T>> {
        let token = TypeToken::of::<T>();
        self.registries
            .iter()
            .find(|r| r.token() == token)
            .and_then(|r| r.as_any().downcast_ref())
    }
}

/// An in-process registry backed by an insertion-ordered map.
pub struct StaticRegistry<T: 'static> {
    id: Ident,
    entries: IndexMap<Ident, Rc<T>>,
}

impl<T: 'static> StaticRegistry<T> {
    /// An empty registry with the given identifier.
    pub fn new(id: Ident) -> Self {
        Self {
            id,
            entries: IndexMap::new(),
        }
    }

    /// Look up a registered object.
    pub fn get(&self, id: &Ident) -> Option<Rc<T>> {
        self.entries.get(id).cloned()
    }

    /// Whether an id is taken.
    pub fn contains(&self, id: &Ident) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, object)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &Rc<T>)> {
        self.entries.iter()
    }
}

impl<T: 'static> EngineRegistry for StaticRegistry<T> {
    fn id(&self) -> &Ident {
        &self.id
    }

    fn token(&self) -> TypeToken {
        TypeToken::of::<T>()
    }

    fn register_raw(&mut self, id: &Ident, object: Rc<dyn Any>) -> RegistryResult<()> {
        let object = object
            .downcast::<T>()
            .map_err(|_| RegistryError::KindMismatch {
                id: id.clone(),
                expected: TypeToken::of::<T>().name(),
            })?;
        if self.entries.contains_key(id) {
            return Err(RegistryError::DuplicateId {
                id: id.clone(),
                registry: self.id.clone(),
            });
        }
        self.entries.insert(id.clone(), object);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let mut registry = StaticRegistry::<u32>::new(Ident::new("test", "number"));
        let id = Ident::new("mymod", "one");
        registry.register_raw(&id, Rc::new(1u32)).unwrap();
        assert!(matches!(
            registry.register_raw(&id, Rc::new(2u32)),
            Err(RegistryError::DuplicateId { .. })
        ));
        assert_eq!(*registry.get(&id).unwrap(), 1);
    }

    #[test]
    fn rejects_wrong_type() {
        let mut registry = StaticRegistry::<u32>::new(Ident::new("test", "number"));
        let id = Ident::new("mymod", "one");
        assert!(matches!(
            registry.register_raw(&id, Rc::new(String::from("not a number"))),
            Err(RegistryError::KindMismatch { .. })
        ));
    }

    #[test]
    fn host_lookup_by_type() {
        let mut host = RegistryHost::new();
        host.add(StaticRegistry::<u32>::new(Ident::new("test", "number")));
        host.add(StaticRegistry::<String>::new(Ident::new("test", "text")));
        assert!(host.registry::<u32>().is_some());
        assert!(host.registry::<f64>().is_none());
        assert_eq!(host.len(), 2);
    }
}
