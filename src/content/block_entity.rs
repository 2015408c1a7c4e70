use std::any::Any;
use std::fmt;
use std::rc::Rc;

use modkit_core::RegistryResult;

use super::block::Block;

/// Deferred instance constructor stored on a [`BlockEntityType`].
pub type BlockEntityFactory = Box<dyn Fn() -> RegistryResult<Box<dyn Any>>>;

/// A registered block-entity type: an instance factory plus the set of
/// blocks it may attach to.
///
/// The factory typically closes over the type's own registry entry (through
/// an `EntrySupplier`), so instances can reference the type that created
/// them. That lookup resolves on first instantiation, after registration.
pub struct BlockEntityType {
    factory: BlockEntityFactory,
    valid_blocks: Vec<Rc<Block>>,
}

impl BlockEntityType {
    /// Create a block-entity type.
    pub fn new(factory: BlockEntityFactory, valid_blocks: Vec<Rc<Block>>) -> Self {
        Self {
            factory,
            valid_blocks,
        }
    }

    /// Construct a new block-entity instance.
    pub fn instantiate(&self) -> RegistryResult<Box<dyn Any>> {
        (self.factory)()
    }

    /// Whether this type may attach to the given block. Compares by
    /// identity, not value.
    pub fn supports(&self, block: &Block) -> bool {
        self.valid_blocks
            .iter()
            .any(|valid| std::ptr::eq(Rc::as_ptr(valid), block))
    }

    /// The blocks this type may attach to.
    pub fn valid_blocks(&self) -> &[Rc<Block>] {
        &self.valid_blocks
    }
}

impl fmt::Debug for BlockEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockEntityType")
            .field("valid_blocks", &self.valid_blocks.len())
            .finish()
    }
}
