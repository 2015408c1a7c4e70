//! Typed entry wrappers.
//!
//! Each content kind gets a thin wrapper around [`RegistryEntry`] with
//! accessors for its derived registrations (a block's item, a fluid's
//! bucket). Wrappers deref to the underlying entry, so all the
//! optional-style combinators remain available.
//!
//! [`RegistryEntry`]: modkit_core::RegistryEntry

mod block;
mod block_entity;
mod entity;
mod fluid;
mod item;

pub use block::BlockEntry;
pub use block_entity::BlockEntityEntry;
pub use entity::EntityEntry;
pub use fluid::FluidEntry;
pub use item::ItemEntry;
