use std::any::Any;

use modkit_core::{RegistryEntry, RegistryResult};
use modkit_registry::{BuilderCallback, Registrar};

use super::BuilderBase;

/// A builder for entries of any registry type that need no configuration
/// beyond their factory. This is the plain path through the filing
/// machinery, and the shape a custom content kind starts from.
pub struct NoConfigBuilder<T: Any, P> {
    base: BuilderBase<P>,
    factory: Box<dyn FnOnce() -> T>,
}

impl<T: Any, P> NoConfigBuilder<T, P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        factory: impl FnOnce() -> T + 'static,
    ) -> Self {
        Self {
            base: BuilderBase::new(owner, parent, name, callback),
            factory: Box::new(factory),
        }
    }

    /// File the registration and return the entry.
    pub fn register(self) -> RegistryResult<RegistryEntry<T>> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }

    fn file(self) -> RegistryResult<(RegistryEntry<T>, P)> {
        let Self { base, factory } = self;
        let BuilderBase {
            parent,
            name,
            callback,
            ..
        } = base;
        let entry = callback.accept::<T>(&name, move || Ok(factory()))?;
        Ok((entry, parent))
    }
}
