use std::any::Any;

use modkit_core::{RegistryEntry, RegistryResult};

use crate::registrar::Registrar;

/// The hand-off a builder receives from the owning [`Registrar`].
///
/// Calling [`accept`](Self::accept) files a pending registration for the
/// built entry — name, registry type, and a deferred creator — and returns a
/// [`RegistryEntry`] that resolves once the registration sweep reaches it.
/// This is the only contract a builder needs, so third-party content kinds
/// are filed identically to the built-in ones.
pub struct BuilderCallback {
    owner: Registrar,
}

impl BuilderCallback {
    pub(crate) fn new(owner: Registrar) -> Self {
        Self { owner }
    }

    /// The registrar this callback files into.
    pub fn owner(&self) -> &Registrar {
        &self.owner
    }

    /// Accept a built entry, to later be constructed and registered.
    ///
    /// The creator runs exactly once, during the sweep, never before.
    /// Fails if a registration for `(name, T)` already exists.
    pub fn accept<T: Any>(
        &self,
        name: &str,
        creator: impl FnOnce() -> RegistryResult<T> + 'static,
    ) -> RegistryResult<RegistryEntry<T>> {
        self.owner.accept(name, creator)
    }
}
