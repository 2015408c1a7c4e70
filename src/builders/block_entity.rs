use std::any::Any;
use std::rc::Rc;

use modkit_core::{EntrySupplier, RegistryResult};
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{Block, BlockEntityType};
use crate::entry::BlockEntityEntry;

use super::{BuilderBase, impl_builder_common};

type InstanceFactory = Rc<dyn Fn(Rc<BlockEntityType>) -> Box<dyn Any>>;

/// A builder for block-entity types: the instance factory plus the set of
/// valid blocks.
///
/// The factory is handed the registered type itself, resolved through a
/// deferred supplier, so constructing the type does not require the type to
/// exist yet.
pub struct BlockEntityBuilder<P> {
    base: BuilderBase<P>,
    factory: InstanceFactory,
    valid_blocks: Vec<Box<dyn Fn() -> RegistryResult<Rc<Block>>>>,
}

impl_builder_common!(BlockEntityBuilder, "block_entity");

impl<P> BlockEntityBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        factory: impl Fn(Rc<BlockEntityType>) -> Box<dyn Any> + 'static,
    ) -> Self {
        Self {
            base: BuilderBase::new(owner, parent, name, callback),
            factory: Rc::new(factory),
            valid_blocks: Vec::new(),
        }
    }

    /// Add a valid block, supplied lazily at construction time.
    pub fn valid_block(
        mut self,
        block: impl Fn() -> RegistryResult<Rc<Block>> + 'static,
    ) -> Self {
        self.valid_blocks.push(Box::new(block));
        self
    }

    /// Add a valid block by its registered name in the owning registrar.
    pub fn valid_block_named(self, name: &str) -> Self {
        let owner = self.base.owner.clone();
        let name = name.to_string();
        self.valid_block(move || owner.get_named::<Block>(&name)?.get())
    }

    /// File the registration and return the block-entity entry.
    pub fn register(self) -> RegistryResult<BlockEntityEntry> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }

    fn file(self) -> RegistryResult<(BlockEntityEntry, P)> {
        let Self {
            base,
            factory,
            valid_blocks,
        } = self;
        let BuilderBase {
            owner,
            parent,
            name,
            callback,
        } = base;

        let own_type = {
            let owner = owner.clone();
            let name = name.clone();
            Rc::new(EntrySupplier::new(move || {
                owner.get_named::<BlockEntityType>(&name)
            }))
        };
        let creator = move || {
            let mut blocks = Vec::with_capacity(valid_blocks.len());
            for supplier in &valid_blocks {
                blocks.push(supplier()?);
            }
            let instance = {
                let factory = Rc::clone(&factory);
                let own_type = Rc::clone(&own_type);
                Box::new(move || Ok(factory(own_type.get()?)))
            };
            Ok(BlockEntityType::new(instance, blocks))
        };
        let entry = callback.accept::<BlockEntityType>(&name, creator)?;
        Ok((BlockEntityEntry::new(entry), parent))
    }
}
