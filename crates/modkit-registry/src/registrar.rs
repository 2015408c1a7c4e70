//! The registrar: deferred-registration bookkeeping and the two-phase sweep.
//!
//! A [`Registrar`] collects pending registrations keyed by `(name, type)`
//! while client code runs builder chains, then [`register`](Registrar::register)s
//! everything against the host's registries in one sweep. Construction is
//! deferred: no content object exists until the sweep forces its creator.
//!
//! # Phases
//!
//! A registrar moves through `Open -> Registering -> Closed`. Builders can
//! only file while Open; `register()` performs the transition and a Closed
//! registrar rejects further registration with a phase error.
//!
//! # Thread safety
//!
//! Deliberately none. The registrar holds fluent state (the current name set
//! by [`object`](Registrar::object)) and non-concurrent tables; it is meant
//! to be driven from a single initialization thread, after which entries are
//! read-only handles.
//!
//! # Example
//!
//! ```ignore
//! let reg = Registrar::new("mymod");
//! let lamp = reg.object("lamp").entry(|name, callback| {
//!     NoConfigBuilder::new(name, callback, || Block::new(BlockSettings::default()))
//! })?.register()?;
//!
//! let mut host = RegistryHost::new();
//! host.add(StaticRegistry::<Block>::new(Ident::new("modkit", "block")));
//! reg.register(&mut host)?;
//! assert!(lamp.is_present());
//! ```

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, warn};

use modkit_core::{
    EntryHost, Ident, LazyValue, RawHandle, RegistryEntry, RegistryError, RegistryResult,
    TypeToken,
};
use modkit_datagen::{BlockState, Lang, LootTable, Model, PackError, Recipe, ResourcePack, Tag};

use crate::callback::BuilderCallback;
use crate::host::{EngineRegistry, RegistryHost};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Open,
    Registering,
    Closed,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Open => "open",
            Phase::Registering => "registering",
            Phase::Closed => "closed",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct RegKey {
    name: String,
    token: TypeToken,
}

impl RegKey {
    fn new(name: &str, token: TypeToken) -> Self {
        Self {
            name: name.to_string(),
            token,
        }
    }
}

type ErasedCreator = Box<dyn FnOnce() -> RegistryResult<Rc<dyn Any>>>;
type ErasedConsumer = Box<dyn FnOnce(&Rc<dyn Any>)>;

/// One pending content object: its identity, its deferred creator, the
/// handle cell entries read through, and the callbacks to fire once it
/// registers.
struct Registration {
    id: Ident,
    creator: Option<ErasedCreator>,
    handle: Rc<RawHandle>,
    callbacks: Vec<ErasedConsumer>,
}

pub(crate) struct RegistrarInner {
    mod_id: String,
    dev_mode: bool,
    skip_errors: bool,
    datagen: bool,
    phase: Phase,
    current_name: Option<String>,
    current_group: Option<Rc<dyn Any>>,
    registrations: IndexMap<RegKey, Registration>,
    /// Callbacks filed before their registration exists. Expected to be
    /// drained by `accept` before the matching type's sweep begins.
    pending_callbacks: FxHashMap<RegKey, Vec<ErasedConsumer>>,
    /// Entry-less callbacks fired once a registry type has completely
    /// finished both passes.
    type_callbacks: FxHashMap<TypeToken, Vec<Box<dyn FnOnce()>>>,
    completed: FxHashSet<TypeToken>,
    langs: IndexMap<String, Lang>,
    tags: IndexMap<Ident, Tag>,
    pack: ResourcePack,
    recipe_counter: u64,
}

/// The shared cell behind a [`Registrar`] and the weak owner reference
/// inside every entry it hands out.
struct InnerCell(RefCell<RegistrarInner>);

impl InnerCell {
    fn borrow(&self) -> Ref<'_, RegistrarInner> {
        self.0.borrow()
    }

    fn borrow_mut(&self) -> RefMut<'_, RegistrarInner> {
        self.0.borrow_mut()
    }
}

impl EntryHost for InnerCell {
    fn raw_handle(&self, name: &str, token: TypeToken) -> Option<Rc<RawHandle>> {
        let inner = self.borrow();
        inner
            .registrations
            .get(&RegKey::new(name, token))
            .map(|reg| Rc::clone(&reg.handle))
    }
}

/// Manages all registrations and data generation for one mod.
///
/// Cheap to clone; clones share state. Begin a new object via
/// [`object`](Self::object) — that name is used by every builder created
/// until the next `object` call, which makes same-name sibling entries
/// (block + item, block + block entity) the default. Terminate with
/// [`register`](Self::register), after which the registrar must not be
/// reused.
#[derive(Clone)]
pub struct Registrar {
    inner: Rc<InnerCell>,
}

impl Registrar {
    /// Create a registrar for the given mod id.
    ///
    /// Development mode defaults to `cfg!(debug_assertions)`; override it
    /// with [`dev_mode`](Self::dev_mode).
    pub fn new(mod_id: impl Into<String>) -> Self {
        let mod_id = mod_id.into();
        let pack = ResourcePack::new(format!("{mod_id}:generated_resources"));
        Self {
            inner: Rc::new(InnerCell(RefCell::new(RegistrarInner {
                mod_id,
                dev_mode: cfg!(debug_assertions),
                skip_errors: false,
                datagen: true,
                phase: Phase::Open,
                current_name: None,
                current_group: None,
                registrations: IndexMap::new(),
                pending_callbacks: FxHashMap::default(),
                type_callbacks: FxHashMap::default(),
                completed: FxHashSet::default(),
                langs: IndexMap::new(),
                tags: IndexMap::new(),
                pack,
                recipe_counter: 0,
            }))),
        }
    }

    /// The mod id this registrar creates objects for.
    pub fn mod_id(&self) -> String {
        self.inner.borrow().mod_id.clone()
    }

    /// An identifier in this registrar's namespace.
    pub fn ident(&self, path: &str) -> Ident {
        Ident::new(self.mod_id(), path)
    }

    /// Override development mode. Controls whether leaked callbacks abort
    /// and whether [`skip_errors`](Self::skip_errors) is honored.
    pub fn dev_mode(&self, dev: bool) -> &Self {
        self.inner.borrow_mut().dev_mode = dev;
        self
    }

    /// Whether this registrar considers itself in a development environment.
    pub fn is_dev(&self) -> bool {
        self.inner.borrow().dev_mode
    }

    /// Enable skipping of entries that error during registration.
    ///
    /// Debugging aid only: ignored (with an error log) outside development
    /// mode, so a deployed build never silently drops content.
    pub fn skip_errors(&self, skip: bool) -> &Self {
        let mut inner = self.inner.borrow_mut();
        if skip && !inner.dev_mode {
            error!("ignoring skip_errors(true) as this is not a development environment");
        } else {
            inner.skip_errors = skip;
        }
        self
    }

    /// Toggle data generation. When disabled, builders file registrations
    /// but no resources accumulate.
    pub fn datagen(&self, enabled: bool) -> &Self {
        self.inner.borrow_mut().datagen = enabled;
        self
    }

    /// Whether data generation is enabled.
    pub fn datagen_enabled(&self) -> bool {
        self.inner.borrow().datagen
    }

    // ======================================================================
    // Fluent state
    // ======================================================================

    /// Begin a new object. The name is used by every subsequent builder
    /// until the next `object` call.
    pub fn object(&self, name: impl Into<String>) -> &Self {
        self.inner.borrow_mut().current_name = Some(name.into());
        self
    }

    /// The current name, failing if [`object`](Self::object) has not been
    /// called.
    pub fn current_name(&self) -> RegistryResult<String> {
        self.inner
            .borrow()
            .current_name
            .clone()
            .ok_or(RegistryError::NoCurrentName)
    }

    /// Set the default group for future grouped content. The supplier runs
    /// once, lazily; the value is reused for every entry filed while the
    /// group is active.
    pub fn default_group<G: 'static>(&self, supplier: impl FnOnce() -> G + 'static) -> &Self {
        self.inner.borrow_mut().current_group =
            Some(Rc::new(Rc::new(LazyValue::new(supplier))) as Rc<dyn Any>);
        self
    }

    /// Clear the default group.
    pub fn clear_default_group(&self) -> &Self {
        self.inner.borrow_mut().current_group = None;
        self
    }

    /// The active default group, if one of type `G` is set.
    pub fn current_group<G: 'static>(&self) -> Option<Rc<LazyValue<G>>> {
        self.inner
            .borrow()
            .current_group
            .as_ref()
            .and_then(|group| group.downcast_ref::<Rc<LazyValue<G>>>().cloned())
    }

    // ======================================================================
    // Filing
    // ======================================================================

    /// Create a builder for a new entry under the current name. The factory
    /// receives the name and a [`BuilderCallback`] to file through; this is
    /// the extension point for custom content kinds.
    pub fn entry<B>(
        &self,
        factory: impl FnOnce(String, BuilderCallback) -> B,
    ) -> RegistryResult<B> {
        let name = self.current_name()?;
        Ok(self.entry_named(name, factory))
    }

    /// Create a builder for a new entry under an explicit name, leaving the
    /// current-name state untouched.
    pub fn entry_named<B>(
        &self,
        name: impl Into<String>,
        factory: impl FnOnce(String, BuilderCallback) -> B,
    ) -> B {
        factory(name.into(), BuilderCallback::new(self.clone()))
    }

    /// Register a simple entry with no configuration: the supplier is
    /// deferred until the sweep.
    pub fn simple<T: Any>(
        &self,
        name: &str,
        supplier: impl FnOnce() -> T + 'static,
    ) -> RegistryResult<RegistryEntry<T>> {
        self.accept(name, move || Ok(supplier()))
    }

    pub(crate) fn accept<T: Any>(
        &self,
        name: &str,
        creator: impl FnOnce() -> RegistryResult<T> + 'static,
    ) -> RegistryResult<RegistryEntry<T>> {
        let token = TypeToken::of::<T>();
        let mut inner = self.inner.borrow_mut();
        if inner.phase != Phase::Open {
            return Err(RegistryError::InvalidPhase {
                phase: inner.phase.name(),
            });
        }
        let key = RegKey::new(name, token);
        if inner.registrations.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
                kind: token.name(),
            });
        }
        let id = Ident::try_new(inner.mod_id.clone(), name)?;
        let handle = Rc::new(RawHandle::new(id.clone(), token));
        let creator: ErasedCreator =
            Box::new(move || creator().map(|value| Rc::new(value) as Rc<dyn Any>));
        // Adopt callbacks that were attached before this registration existed.
        let callbacks = inner.pending_callbacks.remove(&key).unwrap_or_default();
        debug!("captured registration for entry {name} of type {token}");
        inner.registrations.insert(
            key,
            Registration {
                id,
                creator: Some(creator),
                handle: Rc::clone(&handle),
                callbacks,
            },
        );
        drop(inner);
        Ok(RegistryEntry::new(self.entry_host(), handle))
    }

    fn entry_host(&self) -> std::rc::Weak<dyn EntryHost> {
        let host: Rc<dyn EntryHost> = self.inner.clone();
        Rc::downgrade(&host)
    }

    // ======================================================================
    // Lookup
    // ======================================================================

    /// Retrieve a previously filed entry of type `T` under the current
    /// name. Useful to retrieve a different entry than the one a chain
    /// terminates on, e.g. the item derived from a block.
    pub fn get<T: 'static>(&self) -> RegistryResult<RegistryEntry<T>> {
        let name = self.current_name()?;
        self.get_named(&name)
    }

    /// Retrieve a previously filed entry of type `T` under the given name.
    pub fn get_named<T: 'static>(&self, name: &str) -> RegistryResult<RegistryEntry<T>> {
        let token = TypeToken::of::<T>();
        let handle = {
            let inner = self.inner.borrow();
            inner
                .registrations
                .get(&RegKey::new(name, token))
                .map(|reg| Rc::clone(&reg.handle))
        };
        match handle {
            Some(handle) => Ok(RegistryEntry::new(self.entry_host(), handle)),
            None => Err(RegistryError::UnknownRegistration {
                name: name.to_string(),
                kind: token.name(),
            }),
        }
    }

    /// Like [`get_named`](Self::get_named), but returns the empty entry
    /// instead of failing.
    pub fn get_optional<T: 'static>(&self, name: &str) -> RegistryEntry<T> {
        self.get_named(name).unwrap_or_else(|_| RegistryEntry::empty())
    }

    /// Every filed entry of type `T`, in filing order. Used for bulk
    /// post-processing of registered entries.
    pub fn get_all<T: 'static>(&self) -> Vec<RegistryEntry<T>> {
        let token = TypeToken::of::<T>();
        let handles: Vec<Rc<RawHandle>> = {
            let inner = self.inner.borrow();
            inner
                .registrations
                .iter()
                .filter(|(key, _)| key.token == token)
                .map(|(_, reg)| Rc::clone(&reg.handle))
                .collect()
        };
        handles
            .into_iter()
            .map(|handle| RegistryEntry::new(self.entry_host(), handle))
            .collect()
    }

    // ======================================================================
    // Callbacks
    // ======================================================================

    /// Attach a callback fired with the constructed object right after the
    /// entry `(name, T)` registers. Works both before and after the
    /// corresponding builder chain runs; either way the callback fires
    /// exactly once.
    pub fn add_register_callback<T: 'static>(
        &self,
        name: &str,
        callback: impl FnOnce(&T) + 'static,
    ) -> &Self {
        let token = TypeToken::of::<T>();
        let erased: ErasedConsumer = Box::new(move |object| {
            if let Some(value) = object.downcast_ref::<T>() {
                callback(value);
            }
        });
        let key = RegKey::new(name, token);
        let mut inner = self.inner.borrow_mut();
        match inner.registrations.get_mut(&key) {
            Some(reg) => reg.callbacks.push(erased),
            None => inner.pending_callbacks.entry(key).or_default().push(erased),
        }
        self
    }

    /// Attach a callback fired once, after all objects of registry type `T`
    /// have completed both registration passes.
    pub fn add_type_callback<T: 'static>(&self, callback: impl FnOnce() + 'static) -> &Self {
        let token = TypeToken::of::<T>();
        self.inner
            .borrow_mut()
            .type_callbacks
            .entry(token)
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// Whether registry type `T` has completed its late pass.
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.inner
            .borrow()
            .completed
            .contains(&TypeToken::of::<T>())
    }

    // ======================================================================
    // Data generation
    // ======================================================================

    /// Add a language entry. The first value filed for a key wins; later
    /// duplicates are logged and dropped.
    pub fn add_lang_entry(&self, context: &str, lang: &str, key: &str, value: &str) {
        if !self.datagen_enabled() {
            return;
        }
        let mut inner = self.inner.borrow_mut();
        let file = inner.langs.entry(lang.to_string()).or_default();
        if !file.entry(key, value) {
            warn!("lang for {context} already registered: [{lang}], [{key}], [{value}]");
        }
    }

    /// Add a recipe under an auto-numbered id derived from `name`.
    pub fn add_recipe(&self, name: Option<&str>, recipe: Recipe) {
        if !self.datagen_enabled() {
            return;
        }
        let mut inner = self.inner.borrow_mut();
        let n = inner.recipe_counter;
        inner.recipe_counter += 1;
        let path = match name {
            Some(name) => format!("{name}_{n}"),
            None => format!("unknown_recipe_{n}"),
        };
        let id = Ident::new(inner.mod_id.clone(), path);
        inner.pack.add_recipe(id, recipe);
    }

    /// Add an entry to a tag, creating the tag if needed. Tags accumulate
    /// until the end of `register()` and flush into the resource pack.
    pub fn add_to_tag(&self, tag: Ident, entry: Ident) {
        if !self.datagen_enabled() {
            return;
        }
        let mut inner = self.inner.borrow_mut();
        inner
            .tags
            .entry(tag)
            .or_default()
            .add(entry.to_string());
    }

    /// Add a model to the resource pack.
    pub fn add_model(&self, id: Ident, model: Model) {
        if !self.datagen_enabled() {
            return;
        }
        self.inner.borrow_mut().pack.add_model(id, model);
    }

    /// Add a block state definition to the resource pack.
    pub fn add_blockstate(&self, id: Ident, state: BlockState) {
        if !self.datagen_enabled() {
            return;
        }
        self.inner.borrow_mut().pack.add_blockstate(id, state);
    }

    /// Add a loot table to the resource pack.
    pub fn add_loot_table(&self, id: Ident, table: LootTable) {
        if !self.datagen_enabled() {
            return;
        }
        self.inner.borrow_mut().pack.add_loot_table(id, table);
    }

    /// Read access to the accumulated resource pack.
    pub fn pack(&self) -> Ref<'_, ResourcePack> {
        Ref::map(self.inner.borrow(), |inner| &inner.pack)
    }

    /// Write the accumulated resource pack under `root`.
    pub fn write_pack(&self, root: &Path) -> Result<(), PackError> {
        self.inner.borrow().pack.write_to(root)
    }

    // ======================================================================
    // The sweep
    // ======================================================================

    /// Register everything. For every known registry, in host order: run
    /// the main pass (construct, register, resolve entries, fire per-object
    /// callbacks), then the late pass (fire type-level callbacks). The
    /// registrar is Closed afterwards and must not be reused, whether the
    /// sweep succeeded or not.
    pub fn register(&self, host: &mut RegistryHost) -> RegistryResult<()> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != Phase::Open {
                return Err(RegistryError::InvalidPhase {
                    phase: inner.phase.name(),
                });
            }
            inner.phase = Phase::Registering;
        }
        let result = self.run_sweep(host);
        self.inner.borrow_mut().phase = Phase::Closed;
        if result.is_ok() && self.datagen_enabled() {
            self.flush_datagen();
        }
        result
    }

    fn run_sweep(&self, host: &mut RegistryHost) -> RegistryResult<()> {
        for registry in host.iter_mut() {
            let token = registry.token();
            self.check_leaked(Some(token))?;
            self.run_main_pass(token, registry.as_mut())?;
            self.run_late_pass(token);
        }
        self.check_leaked(None)
    }

    /// Warn about callbacks attached to `(name, type)` pairs that were never
    /// filed. With `Some(token)`, checks the pairs of that type as its main
    /// pass begins; with `None`, checks everything left after the sweep. A
    /// leak is a caller bug: fatal in dev mode, logged otherwise.
    fn check_leaked(&self, token: Option<TypeToken>) -> RegistryResult<()> {
        let (leaked, dev) = {
            let mut inner = self.inner.borrow_mut();
            let keys: Vec<RegKey> = inner
                .pending_callbacks
                .keys()
                .filter(|key| token.is_none_or(|t| key.token == t))
                .cloned()
                .collect();
            let mut leaked = 0;
            for key in keys {
                if let Some(callbacks) = inner.pending_callbacks.remove(&key) {
                    warn!(
                        "found {} unused register callback(s) for entry {} [{}]; was the entry ever registered?",
                        callbacks.len(),
                        key.name,
                        key.token
                    );
                    leaked += callbacks.len();
                }
            }
            (leaked, inner.dev_mode)
        };
        if leaked > 0 && dev {
            return Err(RegistryError::LeakedCallbacks { count: leaked });
        }
        Ok(())
    }

    fn run_main_pass(
        &self,
        token: TypeToken,
        registry: &mut dyn EngineRegistry,
    ) -> RegistryResult<()> {
        let keys: Vec<RegKey> = {
            let inner = self.inner.borrow();
            inner
                .registrations
                .keys()
                .filter(|key| key.token == token)
                .cloned()
                .collect()
        };
        if keys.is_empty() {
            return Ok(());
        }
        debug!(
            "registering {} known objects of type {token}",
            keys.len()
        );
        for key in keys {
            let (id, creator) = {
                let mut inner = self.inner.borrow_mut();
                let Some(reg) = inner.registrations.get_mut(&key) else {
                    continue;
                };
                (reg.id.clone(), reg.creator.take())
            };
            let Some(creator) = creator else { continue };
            match self.register_one(registry, &id, creator, &key) {
                Ok(()) => debug!("registered {id} to registry {}", registry.id()),
                Err(err) => {
                    if self.inner.borrow().skip_errors {
                        error!(
                            "unexpected error while registering entry {id} to registry {}: {err}",
                            registry.id()
                        );
                    } else {
                        return Err(RegistryError::Register {
                            id,
                            registry: registry.id().clone(),
                            source: Box::new(err),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn register_one(
        &self,
        registry: &mut dyn EngineRegistry,
        id: &Ident,
        creator: ErasedCreator,
        key: &RegKey,
    ) -> RegistryResult<()> {
        // No borrow is held across the creator or the callbacks: both may
        // re-enter the registrar for sibling lookups.
        let object = creator()?;
        registry.register_raw(id, Rc::clone(&object))?;
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            let Some(reg) = inner.registrations.get_mut(key) else {
                return Ok(());
            };
            reg.handle.fill(Rc::clone(&object));
            std::mem::take(&mut reg.callbacks)
        };
        for callback in callbacks {
            callback(&object);
        }
        Ok(())
    }

    fn run_late_pass(&self, token: TypeToken) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            inner.type_callbacks.remove(&token).unwrap_or_default()
        };
        for callback in callbacks {
            callback();
        }
        self.inner.borrow_mut().completed.insert(token);
    }

    fn flush_datagen(&self) {
        let mut borrow = self.inner.borrow_mut();
        let inner = &mut *borrow;
        let mod_id = inner.mod_id.clone();
        for (code, lang) in std::mem::take(&mut inner.langs) {
            inner.pack.add_lang(Ident::new(mod_id.clone(), code), lang);
        }
        for (id, tag) in std::mem::take(&mut inner.tags) {
            inner.pack.add_tag(id, tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Block(u32);
    struct Item(#[allow(dead_code)] u32);

    fn block_host() -> RegistryHost {
        let mut host = RegistryHost::new();
        host.add(crate::host::StaticRegistry::<Block>::new(Ident::new(
            "modkit", "block",
        )));
        host.add(crate::host::StaticRegistry::<Item>::new(Ident::new(
            "modkit", "item",
        )));
        host
    }

    fn quiet_registrar() -> Registrar {
        let reg = Registrar::new("test");
        reg.dev_mode(false);
        reg
    }

    #[test]
    fn identity_preserving_round_trip() {
        let reg = quiet_registrar();
        let entry = reg.simple("lamp", || Block(7)).unwrap();
        assert!(!entry.is_present());

        reg.register(&mut block_host()).unwrap();
        let via_entry = entry.get().unwrap();
        let via_lookup = reg.get_named::<Block>("lamp").unwrap().get().unwrap();
        assert!(Rc::ptr_eq(&via_entry, &via_lookup));
        assert_eq!(via_entry.0, 7);
    }

    #[test]
    fn duplicate_filing_is_rejected() {
        let reg = quiet_registrar();
        reg.simple("lamp", || Block(1)).unwrap();
        let err = reg.simple("lamp", || Block(2)).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
        // Same name under a different type is a sibling, not a duplicate.
        reg.simple("lamp", || Item(1)).unwrap();

        reg.register(&mut block_host()).unwrap();
        assert_eq!(reg.get_named::<Block>("lamp").unwrap().get().unwrap().0, 1);
    }

    #[test]
    fn creator_runs_exactly_once_and_never_early() {
        let calls = Rc::new(Cell::new(0u32));
        let reg = quiet_registrar();
        let counted = Rc::clone(&calls);
        let entry = reg
            .simple("lamp", move || {
                counted.set(counted.get() + 1);
                Block(0)
            })
            .unwrap();
        assert_eq!(calls.get(), 0);

        reg.register(&mut block_host()).unwrap();
        entry.get().unwrap();
        entry.get().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn callback_before_and_after_filing() {
        let reg = quiet_registrar();
        let seen = Rc::new(RefCell::new(Vec::new()));

        // Before the builder chain runs.
        let log = Rc::clone(&seen);
        reg.add_register_callback::<Block>("lamp", move |block| {
            log.borrow_mut().push(("early", block.0));
        });

        reg.simple("lamp", || Block(3)).unwrap();

        // After the builder chain ran.
        let log = Rc::clone(&seen);
        reg.add_register_callback::<Block>("lamp", move |block| {
            log.borrow_mut().push(("late", block.0));
        });

        reg.register(&mut block_host()).unwrap();
        assert_eq!(*seen.borrow(), vec![("early", 3), ("late", 3)]);
    }

    #[test]
    fn type_callback_fires_once_after_main_pass() {
        let reg = quiet_registrar();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b"] {
            reg.simple(name, || Block(0)).unwrap();
            let log = Rc::clone(&order);
            reg.add_register_callback::<Block>(name, move |_| {
                log.borrow_mut().push(format!("object:{name}"));
            });
        }
        let log = Rc::clone(&order);
        let probe = reg.clone();
        reg.add_type_callback::<Block>(move || {
            // Individual callbacks have all fired by the time the late pass
            // runs.
            assert!(probe.get_named::<Block>("b").unwrap().is_present());
            log.borrow_mut().push(String::from("type"));
        });

        assert!(!reg.is_registered::<Block>());
        reg.register(&mut block_host()).unwrap();
        assert!(reg.is_registered::<Block>());
        assert_eq!(*order.borrow(), ["object:a", "object:b", "type"]);
    }

    #[test]
    fn optional_lookup_never_fails() {
        let reg = quiet_registrar();
        assert!(!reg.get_optional::<Block>("missing").is_present());
        assert!(matches!(
            reg.get_named::<Block>("missing"),
            Err(RegistryError::UnknownRegistration { .. })
        ));
    }

    #[test]
    fn leaked_callbacks_abort_in_dev() {
        let reg = Registrar::new("test");
        reg.dev_mode(true);
        reg.add_register_callback::<Block>("never_filed", |_| {});
        let err = reg.register(&mut block_host()).unwrap_err();
        assert!(matches!(err, RegistryError::LeakedCallbacks { count: 1 }));
    }

    #[test]
    fn leaked_callbacks_only_warn_in_production() {
        let reg = quiet_registrar();
        reg.simple("lamp", || Block(1)).unwrap();
        reg.add_register_callback::<Block>("never_filed", |_| {});
        reg.register(&mut block_host()).unwrap();
        assert!(reg.get_named::<Block>("lamp").unwrap().is_present());
    }

    #[test]
    fn construction_error_aborts_by_default() {
        let reg = quiet_registrar();
        reg.accept::<Block>("bad", || {
            Err(RegistryError::InvalidIdent {
                ident: String::from("boom"),
            })
        })
        .unwrap();
        reg.simple("good", || Block(1)).unwrap();

        let err = reg.register(&mut block_host()).unwrap_err();
        match err {
            RegistryError::Register { id, .. } => assert_eq!(id.to_string(), "test:bad"),
            other => panic!("expected Register, got {other:?}"),
        }
    }

    #[test]
    fn skip_errors_continues_in_dev() {
        let reg = Registrar::new("test");
        reg.dev_mode(true).skip_errors(true);
        reg.accept::<Block>("bad", || {
            Err(RegistryError::InvalidIdent {
                ident: String::from("boom"),
            })
        })
        .unwrap();
        let good = reg.simple("good", || Block(9)).unwrap();

        reg.register(&mut block_host()).unwrap();
        assert_eq!(good.get().unwrap().0, 9);
        assert!(!reg.get_named::<Block>("bad").unwrap().is_present());
    }

    #[test]
    fn skip_errors_refused_in_production() {
        let reg = quiet_registrar();
        reg.skip_errors(true);
        reg.accept::<Block>("bad", || {
            Err(RegistryError::InvalidIdent {
                ident: String::from("boom"),
            })
        })
        .unwrap();
        assert!(reg.register(&mut block_host()).is_err());
    }

    #[test]
    fn closed_registrar_rejects_everything() {
        let reg = quiet_registrar();
        reg.register(&mut block_host()).unwrap();
        assert!(matches!(
            reg.simple("late", || Block(0)),
            Err(RegistryError::InvalidPhase { phase: "closed" })
        ));
        assert!(matches!(
            reg.register(&mut block_host()),
            Err(RegistryError::InvalidPhase { phase: "closed" })
        ));
    }

    #[test]
    fn siblings_resolve_across_types() {
        let reg = quiet_registrar();
        reg.simple("lamp", || Block(5)).unwrap();
        let item = reg.simple("lamp", || Item(6)).unwrap();

        reg.register(&mut block_host()).unwrap();
        let block = item.sibling::<Block>().unwrap();
        assert_eq!(block.get().unwrap().0, 5);
        assert!(matches!(
            item.sibling::<String>(),
            Err(RegistryError::UnknownRegistration { .. })
        ));
    }

    #[test]
    fn get_all_preserves_filing_order() {
        let reg = quiet_registrar();
        for name in ["c", "a", "b"] {
            reg.simple(name, || Block(0)).unwrap();
        }
        reg.simple("x", || Item(0)).unwrap();
        let all = reg.get_all::<Block>();
        let names: Vec<_> = all
            .iter()
            .map(|entry| entry.id().unwrap().path().to_string())
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn default_group_memoized_once() {
        let calls = Rc::new(Cell::new(0u32));
        let reg = quiet_registrar();
        let counted = Rc::clone(&calls);
        reg.default_group::<String>(move || {
            counted.set(counted.get() + 1);
            String::from("tools")
        });
        let group = reg.current_group::<String>().unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(group.get(), "tools");
        let again = reg.current_group::<String>().unwrap();
        assert_eq!(again.get(), "tools");
        assert_eq!(calls.get(), 1);

        reg.clear_default_group();
        assert!(reg.current_group::<String>().is_none());
    }
}
