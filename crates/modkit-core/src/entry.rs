//! Deferred entry handles.
//!
//! A builder files a registration long before the object exists; what it gets
//! back immediately is a [`RegistryEntry`] — a typed, read-through handle over
//! a [`RawHandle`] cell that the registrar fills exactly once during the
//! registration sweep. Strict access before that point fails with a
//! descriptive error naming the missing identifier; optional access returns
//! absent instead.
//!
//! Entries keep a weak reference back to their owning registrar (through the
//! [`EntryHost`] seam) so sibling registrations sharing the same name can be
//! looked up, e.g. the item derived from a block.

use std::any::Any;
use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::error::{RegistryError, RegistryResult};
use crate::ident::Ident;
use crate::token::TypeToken;

/// The erased cell behind every entry: identifier, registry-type token, and a
/// one-shot slot for the registered object.
pub struct RawHandle {
    id: Ident,
    token: TypeToken,
    slot: OnceCell<Rc<dyn Any>>,
}

impl RawHandle {
    /// Create an unresolved handle.
    pub fn new(id: Ident, token: TypeToken) -> Self {
        Self {
            id,
            token,
            slot: OnceCell::new(),
        }
    }

    /// The identifier this handle resolves to.
    pub fn id(&self) -> &Ident {
        &self.id
    }

    /// The registry type this handle belongs to.
    pub fn token(&self) -> TypeToken {
        self.token
    }

    /// Fill the slot with the registered object. Invoked exactly once by the
    /// registrar at the moment the object is registered to the engine.
    /// Returns `false` if the slot was already filled.
    pub fn fill(&self, value: Rc<dyn Any>) -> bool {
        self.slot.set(value).is_ok()
    }

    /// The registered object, if the sweep has reached this handle.
    pub fn value(&self) -> Option<Rc<dyn Any>> {
        self.slot.get().cloned()
    }

    /// Whether the slot has been filled.
    pub fn is_filled(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawHandle")
            .field("id", &self.id)
            .field("token", &self.token)
            .field("filled", &self.is_filled())
            .finish()
    }
}

/// Lookup seam implemented by the owning registrar.
///
/// Entries hold a `Weak<dyn EntryHost>` rather than a concrete registrar so
/// the handle types can live below the registrar crate.
pub trait EntryHost {
    /// The raw handle filed under `(name, token)`, if any.
    fn raw_handle(&self, name: &str, token: TypeToken) -> Option<Rc<RawHandle>>;
}

/// A typed, read-through handle to a registered object.
///
/// Cheap to clone; equality is identity of the underlying cell, not value
/// equality. The distinguished [`empty`](Self::empty) entry represents "no
/// such entry" and is returned by optional lookups instead of an error.
pub struct RegistryEntry<T: 'static> {
    owner: Option<Weak<dyn EntryHost>>,
    raw: Option<Rc<RawHandle>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> RegistryEntry<T> {
    /// Create an entry over a raw handle, owned by the given host.
    pub fn new(owner: Weak<dyn EntryHost>, raw: Rc<RawHandle>) -> Self {
        Self {
            owner: Some(owner),
            raw: Some(raw),
            _marker: PhantomData,
        }
    }

    /// The empty entry. Never resolves; strict access fails with
    /// [`RegistryError::EmptyEntry`].
    pub fn empty() -> Self {
        Self {
            owner: None,
            raw: None,
            _marker: PhantomData,
        }
    }

    /// The identifier of this entry, if it is not empty.
    pub fn id(&self) -> Option<&Ident> {
        self.raw.as_deref().map(RawHandle::id)
    }

    /// Get the registered object, failing if this entry is empty or not yet
    /// registered.
    pub fn get(&self) -> RegistryResult<Rc<T>> {
        let raw = self.raw.as_ref().ok_or(RegistryError::EmptyEntry)?;
        let value = raw.value().ok_or_else(|| RegistryError::NotPresent {
            id: raw.id().clone(),
        })?;
        value.downcast::<T>().map_err(|_| RegistryError::KindMismatch {
            id: raw.id().clone(),
            expected: TypeToken::of::<T>().name(),
        })
    }

    /// Get the registered object without failing; absent if the entry is
    /// empty, unregistered, or of another type.
    pub fn get_opt(&self) -> Option<Rc<T>> {
        self.raw
            .as_ref()
            .and_then(|raw| raw.value())
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Whether the backing object has been registered.
    pub fn is_present(&self) -> bool {
        self.get_opt().is_some()
    }

    /// Run `f` with the object if it is present.
    pub fn if_present(&self, f: impl FnOnce(&T)) {
        if let Some(value) = self.get_opt() {
            f(&value);
        }
    }

    /// Map over the resolved object, absent if not present.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Option<U> {
        self.get_opt().map(|value| f(&value))
    }

    /// Flat-map over the resolved object, absent if not present.
    pub fn and_then<U>(&self, f: impl FnOnce(&T) -> Option<U>) -> Option<U> {
        self.get_opt().and_then(|value| f(&value))
    }

    /// The resolved object, or the given default.
    pub fn or_else(&self, default: Rc<T>) -> Rc<T> {
        self.get_opt().unwrap_or(default)
    }

    /// The resolved object, or one produced by `f`.
    pub fn or_else_get(&self, f: impl FnOnce() -> Rc<T>) -> Rc<T> {
        self.get_opt().unwrap_or_else(f)
    }

    /// Keep this entry if it is absent or matches the predicate; otherwise
    /// the empty entry.
    pub fn filter(&self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self.get_opt() {
            Some(value) if !predicate(&value) => Self::empty(),
            _ => self.clone(),
        }
    }

    /// Reference-identity comparison against the resolved object. `false` if
    /// the entry is not present.
    pub fn is(&self, other: &T) -> bool {
        self.get_opt()
            .is_some_and(|value| std::ptr::eq(Rc::as_ptr(&value), other))
    }

    /// Look up another registration filed under the same name but a
    /// different registry type, e.g. the item derived from a block.
    pub fn sibling<U: 'static>(&self) -> RegistryResult<RegistryEntry<U>> {
        let raw = self.raw.as_ref().ok_or(RegistryError::EmptyEntry)?;
        self.sibling_named(raw.id().path())
    }

    /// Look up a registration of type `U` filed under an arbitrary name in
    /// the owning registrar.
    pub fn sibling_named<U: 'static>(&self, name: &str) -> RegistryResult<RegistryEntry<U>> {
        let owner = self.owner.as_ref().ok_or(RegistryError::EmptyEntry)?;
        let host = owner.upgrade().ok_or(RegistryError::OwnerDropped)?;
        let token = TypeToken::of::<U>();
        let raw = host
            .raw_handle(name, token)
            .ok_or_else(|| RegistryError::UnknownRegistration {
                name: name.to_string(),
                kind: token.name(),
            })?;
        Ok(RegistryEntry::new(Weak::clone(owner), raw))
    }
}

impl<T: 'static> Clone for RegistryEntry<T> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> PartialEq for RegistryEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.raw, &other.raw) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: 'static> Eq for RegistryEntry<T> {}

impl<T: 'static> fmt::Debug for RegistryEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f
                .debug_struct("RegistryEntry")
                .field("id", raw.id())
                .field("present", &raw.is_filled())
                .finish(),
            None => f.write_str("RegistryEntry(<empty>)"),
        }
    }
}

enum SupplierState<T: 'static> {
    Pending(Box<dyn FnOnce() -> RegistryResult<RegistryEntry<T>>>),
    Resolved(RegistryEntry<T>),
    Poisoned,
}

/// A supplier for an entry that resolves its lookup once, on first use.
///
/// Builders hand this out *before* their entry exists, so constructed objects
/// can safely close over a reference to themselves — a block-entity type
/// whose instances need the type itself, a menu type passed to its own menu
/// factory. The wrapped lookup runs at most once; the resolved entry is
/// cached and the closure (and whatever builder state it captured) dropped.
pub struct EntrySupplier<T: 'static> {
    state: RefCell<SupplierState<T>>,
}

impl<T: 'static> EntrySupplier<T> {
    /// Create a supplier over a deferred entry lookup.
    pub fn new(resolve: impl FnOnce() -> RegistryResult<RegistryEntry<T>> + 'static) -> Self {
        Self {
            state: RefCell::new(SupplierState::Pending(Box::new(resolve))),
        }
    }

    /// The resolved entry, running the lookup on first call.
    pub fn entry(&self) -> RegistryResult<RegistryEntry<T>> {
        let mut state = self.state.borrow_mut();
        match &*state {
            SupplierState::Resolved(entry) => Ok(entry.clone()),
            SupplierState::Poisoned => Err(RegistryError::EmptyEntry),
            SupplierState::Pending(_) => {
                let SupplierState::Pending(resolve) =
                    std::mem::replace(&mut *state, SupplierState::Poisoned)
                else {
                    unreachable!()
                };
                let entry = resolve()?;
                *state = SupplierState::Resolved(entry.clone());
                Ok(entry)
            }
        }
    }

    /// The registered object behind the resolved entry.
    pub fn get(&self) -> RegistryResult<Rc<T>> {
        self.entry()?.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    impl EntryHost for () {
        fn raw_handle(&self, _name: &str, _token: TypeToken) -> Option<Rc<RawHandle>> {
            None
        }
    }

    fn dead_host() -> Weak<dyn EntryHost> {
        Weak::<()>::new()
    }

    #[test]
    fn empty_entry_behaviour() {
        let entry = RegistryEntry::<u32>::empty();
        assert!(matches!(entry.get(), Err(RegistryError::EmptyEntry)));
        assert!(entry.get_opt().is_none());
        assert!(!entry.is_present());
        assert_eq!(entry.id(), None);
        assert_eq!(entry, RegistryEntry::<u32>::empty());
    }

    #[test]
    fn unresolved_then_filled() {
        let raw = Rc::new(RawHandle::new(
            Ident::new("mymod", "lamp"),
            TypeToken::of::<u32>(),
        ));
        let entry: RegistryEntry<u32> = RegistryEntry::new(dead_host(), Rc::clone(&raw));

        match entry.get() {
            Err(RegistryError::NotPresent { id }) => assert_eq!(id.to_string(), "mymod:lamp"),
            other => panic!("expected NotPresent, got {other:?}"),
        }

        assert!(raw.fill(Rc::new(5u32)));
        assert!(!raw.fill(Rc::new(6u32)));
        assert_eq!(*entry.get().unwrap(), 5);
    }

    #[test]
    fn identity_equality_and_is() {
        let raw = Rc::new(RawHandle::new(
            Ident::new("mymod", "lamp"),
            TypeToken::of::<String>(),
        ));
        let a: RegistryEntry<String> = RegistryEntry::new(dead_host(), Rc::clone(&raw));
        let b = a.clone();
        assert_eq!(a, b);

        raw.fill(Rc::new(String::from("x")));
        let value = a.get().unwrap();
        assert!(a.is(&value));
        assert!(!a.is(&String::from("x")));
    }

    #[test]
    fn filter_keeps_absent() {
        let absent = RegistryEntry::<u32>::empty();
        // Absent entries pass through untouched, matching optional-filter
        // semantics on empty values.
        assert_eq!(absent.filter(|_| false), RegistryEntry::empty());

        let raw = Rc::new(RawHandle::new(
            Ident::new("mymod", "n"),
            TypeToken::of::<u32>(),
        ));
        let entry: RegistryEntry<u32> = RegistryEntry::new(dead_host(), Rc::clone(&raw));
        raw.fill(Rc::new(10u32));
        assert!(entry.filter(|v| *v == 10).is_present());
        assert!(!entry.filter(|v| *v == 11).is_present());
    }

    #[test]
    fn supplier_resolves_once() {
        let raw = Rc::new(RawHandle::new(
            Ident::new("mymod", "lamp"),
            TypeToken::of::<u32>(),
        ));
        raw.fill(Rc::new(9u32));
        let entry: RegistryEntry<u32> = RegistryEntry::new(dead_host(), raw);

        let lookups = Rc::new(Cell::new(0u32));
        let supplier = {
            let entry = entry.clone();
            let lookups = Rc::clone(&lookups);
            EntrySupplier::new(move || {
                lookups.set(lookups.get() + 1);
                Ok(entry)
            })
        };
        assert_eq!(*supplier.get().unwrap(), 9);
        assert_eq!(*supplier.get().unwrap(), 9);
        assert_eq!(lookups.get(), 1);
    }

    #[test]
    fn poisoned_supplier_reports_empty() {
        let supplier: EntrySupplier<u32> = EntrySupplier::new(|| {
            Err(RegistryError::UnknownRegistration {
                name: String::from("lamp"),
                kind: "u32",
            })
        });
        assert!(matches!(
            supplier.get(),
            Err(RegistryError::UnknownRegistration { .. })
        ));
        assert!(matches!(supplier.get(), Err(RegistryError::EmptyEntry)));
    }
}
