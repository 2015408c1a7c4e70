//! Deferred registration against host-supplied registries.
//!
//! The [`Registrar`] files pending registrations while builder chains run,
//! then registers everything in one two-phase sweep over the
//! [`RegistryHost`]'s registries. See the `modkit` façade crate for the
//! content builders that sit on top.

mod callback;
mod host;
mod registrar;

pub use callback::BuilderCallback;
pub use host::{EngineRegistry, RegistryHost, StaticRegistry};
pub use registrar::Registrar;
