use std::any::Any;
use std::fmt;

use modkit_core::RegistryResult;

/// A menu (screen-handler) instance opened for one interaction.
pub trait Menu: Any {
    /// The synchronization id this menu was opened with.
    fn sync_id(&self) -> u32;
}

/// Deferred menu constructor stored on a [`MenuType`].
pub type MenuFactory = Box<dyn Fn(u32) -> RegistryResult<Box<dyn Menu>>>;

/// A registered menu type.
///
/// The factory closes over the type's own registry entry, so opened menus
/// know which type produced them; the lookup resolves on first open.
pub struct MenuType {
    factory: MenuFactory,
}

impl MenuType {
    /// Create a menu type.
    pub fn new(factory: MenuFactory) -> Self {
        Self { factory }
    }

    /// Open a new menu instance under the given synchronization id.
    pub fn open(&self, sync_id: u32) -> RegistryResult<Box<dyn Menu>> {
        (self.factory)(sync_id)
    }
}

impl fmt::Debug for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MenuType")
    }
}
