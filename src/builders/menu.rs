use std::rc::Rc;

use modkit_core::{EntrySupplier, RegistryEntry, RegistryResult};
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{Menu, MenuType};

use super::{BuilderBase, impl_builder_common};

type OpenFactory = Rc<dyn Fn(Rc<MenuType>, u32) -> Box<dyn Menu>>;

/// A builder for menu types.
///
/// The open factory receives the registered type itself, resolved through a
/// deferred supplier on first open.
pub struct MenuBuilder<P> {
    base: BuilderBase<P>,
    factory: OpenFactory,
}

impl_builder_common!(MenuBuilder, "container");

impl<P> MenuBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        factory: impl Fn(Rc<MenuType>, u32) -> Box<dyn Menu> + 'static,
    ) -> Self {
        Self {
            base: BuilderBase::new(owner, parent, name, callback),
            factory: Rc::new(factory),
        }
    }

    /// File the registration and return the menu-type entry.
    pub fn register(self) -> RegistryResult<RegistryEntry<MenuType>> {
        Ok(self.file()?.0)
    }

    /// File the registration and return the parent for further chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }

    fn file(self) -> RegistryResult<(RegistryEntry<MenuType>, P)> {
        let Self { base, factory } = self;
        let BuilderBase {
            owner,
            parent,
            name,
            callback,
        } = base;

        let own_type = {
            let owner = owner.clone();
            let name = name.clone();
            Rc::new(EntrySupplier::new(move || owner.get_named::<MenuType>(&name)))
        };
        let creator = move || {
            let open = {
                let factory = Rc::clone(&factory);
                let own_type = Rc::clone(&own_type);
                Box::new(move |sync_id| Ok(factory(own_type.get()?, sync_id)))
            };
            Ok(MenuType::new(open))
        };
        let entry = callback.accept::<MenuType>(&name, creator)?;
        Ok((entry, parent))
    }
}
