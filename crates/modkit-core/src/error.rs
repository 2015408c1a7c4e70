//! Unified error types for registration.
//!
//! All failures surfaced by the registrar, the entry handles, and the engine
//! registries flow through [`RegistryError`]. The taxonomy:
//!
//! ```text
//! RegistryError
//! ├── lookup errors      - UnknownRegistration, NotPresent, EmptyEntry, OwnerDropped
//! ├── filing errors      - Duplicate, NoCurrentName, InvalidIdent, InvalidPhase
//! ├── sweep errors       - Register (with the offending id + registry), LeakedCallbacks
//! └── host errors        - DuplicateId, KindMismatch
//! ```
//!
//! Every error names the offending identifier or type where one is known, so
//! a failed `register()` points at the entry that caused it.

use thiserror::Error;

use crate::Ident;

/// Convenience alias used throughout the workspace.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced while filing, registering, or dereferencing content.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A lookup requested a `(name, type)` pair that was never filed.
    #[error("unknown registration {name} for type {kind}")]
    UnknownRegistration {
        name: String,
        kind: &'static str,
    },

    /// A strict entry access happened before the backing object was
    /// registered.
    #[error("registry entry not present: {id}")]
    NotPresent { id: Ident },

    /// A strict access went through the empty entry.
    #[error("registry entry is empty")]
    EmptyEntry,

    /// An entry outlived the registrar it was created by.
    #[error("owning registrar is gone")]
    OwnerDropped,

    /// A second registration was filed for an already-taken `(name, type)`
    /// pair. The first registration is left intact.
    #[error("duplicate registration {name} for type {kind}")]
    Duplicate {
        name: String,
        kind: &'static str,
    },

    /// A builder factory ran without a current name set via `object()`.
    #[error("current name not set; call object() before creating a builder")]
    NoCurrentName,

    /// An identifier segment failed validation.
    #[error("invalid identifier: {ident}")]
    InvalidIdent { ident: String },

    /// An operation was attempted in the wrong registrar phase, e.g. calling
    /// `register()` twice.
    #[error("registrar is {phase}; no further registration is possible")]
    InvalidPhase { phase: &'static str },

    /// Constructing or registering one entry failed during the sweep.
    #[error("error while registering {id} to registry {registry}")]
    Register {
        id: Ident,
        registry: Ident,
        #[source]
        source: Box<RegistryError>,
    },

    /// Register callbacks were attached to `(name, type)` pairs that were
    /// never filed. Raised only in a development environment; production
    /// builds log and continue.
    #[error("found {count} unused register callback(s), see logs")]
    LeakedCallbacks { count: usize },

    /// The host registry already contains the given id.
    #[error("id {id} is already registered in registry {registry}")]
    DuplicateId { id: Ident, registry: Ident },

    /// An object of the wrong type reached a registry, or an entry was
    /// dereferenced at the wrong type.
    #[error("{id} does not hold an object of type {expected}")]
    KindMismatch {
        id: Ident,
        expected: &'static str,
    },
}
