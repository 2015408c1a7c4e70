//! Core types for deferred content registration.
//!
//! This crate holds the pieces everything else builds on: namespaced
//! [`Ident`]ifiers, the [`TypeToken`] registry-type discriminator, the
//! [`LazyValue`] memoizing thunk, the deferred [`RegistryEntry`] handle, and
//! the shared [`RegistryError`] taxonomy. The registrar itself lives in
//! `modkit-registry`; the content builders in the `modkit` façade crate.

mod entry;
mod error;
mod ident;
mod lazy;
mod token;

pub use entry::{EntryHost, EntrySupplier, RawHandle, RegistryEntry};
pub use error::{RegistryError, RegistryResult};
pub use ident::{Ident, to_english_name};
pub use lazy::LazyValue;
pub use token::TypeToken;
