//! Integration tests driving the full registration pipeline: builder
//! chains, the deferred sweep, entry resolution, and generated resources.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use modkit::prelude::*;

/// A registrar with deterministic behavior for tests: production mode
/// unless a test opts into dev.
fn registrar() -> Registrar {
    let reg = Registrar::new("testmod");
    reg.dev_mode(false);
    reg
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn register_callback_receives_the_created_object() {
    let reg = registrar();
    let seen: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));

    // Callback attached before the builder chain runs.
    {
        let seen = Rc::clone(&seen);
        reg.add_register_callback::<Block>("lamp", move |block| {
            seen.borrow_mut().push(block.settings().luminance);
        });
    }

    let lamp = reg
        .object("lamp")
        .block(Block::new)
        .unwrap()
        .properties(|settings| settings.luminance(15))
        .register()
        .unwrap();

    let mut host = standard_host();
    reg.register(&mut host).unwrap();

    assert_eq!(*seen.borrow(), [15]);
    let via_entry = lamp.get().unwrap();
    let via_lookup = reg.get_named::<Block>("lamp").unwrap().get().unwrap();
    assert!(Rc::ptr_eq(&via_entry, &via_lookup));
    let via_host = host
        .registry::<Block>()
        .unwrap()
        .get(&Ident::new("testmod", "lamp"))
        .unwrap();
    assert!(Rc::ptr_eq(&via_entry, &via_host));
}

#[test]
fn strict_and_optional_access_before_registration() {
    let reg = registrar();
    let lamp = reg
        .object("lamp")
        .block(Block::new)
        .unwrap()
        .register()
        .unwrap();

    match lamp.get() {
        Err(RegistryError::NotPresent { id }) => assert_eq!(id.to_string(), "testmod:lamp"),
        other => panic!("expected NotPresent, got {other:?}"),
    }
    assert!(lamp.get_opt().is_none());
    assert!(!reg.get_optional::<Block>("never_filed").is_present());
    assert!(matches!(
        reg.get_named::<Block>("never_filed"),
        Err(RegistryError::UnknownRegistration { .. })
    ));
}

#[test]
fn duplicate_name_and_type_is_rejected() {
    let reg = registrar();
    reg.object("lamp").block(Block::new).unwrap().register().unwrap();
    let err = reg
        .object("lamp")
        .block(Block::new)
        .unwrap()
        .register()
        .unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { .. }));
}

// =============================================================================
// Derived content and siblings
// =============================================================================

#[test]
fn block_item_resolves_its_block() {
    let reg = registrar();
    let lamp = reg
        .object("copper_lamp")
        .block(Block::new)
        .unwrap()
        .simple_item()
        .unwrap()
        .register()
        .unwrap();

    reg.register(&mut standard_host()).unwrap();

    let block = lamp.get().unwrap();
    let item = lamp.item().unwrap().get().unwrap();
    let attached = item.block().expect("block item should carry its block");
    assert!(Rc::ptr_eq(&block, attached));

    // Sibling lookup from the item back to the block.
    let item_entry = reg.get_named::<Item>("copper_lamp").unwrap();
    let sibling = item_entry.sibling::<Block>().unwrap();
    assert!(Rc::ptr_eq(&sibling.get().unwrap(), &block));
}

#[test]
fn block_entity_factory_sees_its_own_type() {
    struct LampEntity {
        kind: Rc<BlockEntityType>,
    }

    let reg = registrar();
    let lamp = reg
        .object("lamp")
        .block(Block::new)
        .unwrap()
        .block_entity(|kind| Box::new(LampEntity { kind }) as Box<dyn Any>)
        .build()
        .unwrap()
        .register()
        .unwrap();

    reg.register(&mut standard_host()).unwrap();

    let block = lamp.get().unwrap();
    let be_entry = lamp.block_entity().unwrap();
    assert!(be_entry.supports(&block).unwrap());

    let be_type = be_entry.get().unwrap();
    let instance = be_type.instantiate().unwrap();
    let entity = instance.downcast_ref::<LampEntity>().unwrap();
    assert!(Rc::ptr_eq(&entity.kind, &be_type));
}

#[test]
fn fluid_family_registers_together() {
    let reg = registrar();
    let oil = reg.object("oil").fluid().unwrap().register().unwrap();

    let mut host = standard_host();
    reg.register(&mut host).unwrap();

    let flowing = oil.get().unwrap();
    assert!(!flowing.is_source());
    assert_eq!(flowing.source_name(), "oil");

    let source = oil.source().unwrap().get().unwrap();
    assert!(source.is_source());

    let block = oil.block().unwrap().expect("default fluid block");
    assert!(!block.get().unwrap().settings().drops);

    let bucket = oil.bucket().unwrap().expect("default bucket item");
    assert_eq!(bucket.get().unwrap().settings().max_count, 1);

    // The default water tag covers the flowing variant and flushes into the
    // pack on register().
    let pack = reg.pack();
    let tag = pack
        .tag(&Ident::new("minecraft", "fluids/water"))
        .expect("water tag");
    assert!(tag.values().contains(&String::from("testmod:flowing_oil")));
}

#[test]
fn menu_factory_sees_its_own_type() {
    struct ChestMenu {
        kind: Rc<MenuType>,
        sync_id: u32,
    }
    impl Menu for ChestMenu {
        fn sync_id(&self) -> u32 {
            self.sync_id
        }
    }

    let reg = registrar();
    let menu = reg
        .object("chest")
        .menu(|kind, sync_id| Box::new(ChestMenu { kind, sync_id }) as Box<dyn Menu>)
        .unwrap()
        .register()
        .unwrap();

    reg.register(&mut standard_host()).unwrap();

    let kind = menu.get().unwrap();
    let opened = kind.open(7).unwrap();
    assert_eq!(opened.sync_id(), 7);
    let any: Box<dyn Any> = opened;
    let chest = any.downcast::<ChestMenu>().unwrap();
    assert!(Rc::ptr_eq(&chest.kind, &kind));
}

#[test]
fn entity_with_spawn_egg() {
    let reg = registrar();
    let ghost = reg
        .object("ghost")
        .entity(SpawnGroup::Monster)
        .unwrap()
        .properties(|settings| settings.dimensions(0.9, 2.4).fire_immune())
        .spawn_egg()
        .unwrap()
        .register()
        .unwrap();

    reg.register(&mut standard_host()).unwrap();

    assert_eq!(ghost.spawn_group().unwrap(), SpawnGroup::Monster);
    assert!(ghost.get().unwrap().settings().fire_immune);
    let egg = reg.get_named::<Item>("ghost_spawn_egg").unwrap();
    assert!(egg.is_present());
}

#[test]
fn enchantment_slots_accumulate() {
    let reg = registrar();
    let sharpness = reg
        .object("sharpness")
        .enchantment(EnchantmentTarget::Weapon)
        .unwrap()
        .rarity(Rarity::Rare)
        .add_slots(EquipmentSlots::MAINHAND)
        .add_slots(EquipmentSlots::OFFHAND)
        .register()
        .unwrap();

    reg.register(&mut standard_host()).unwrap();

    let enchantment = sharpness.get().unwrap();
    assert_eq!(enchantment.rarity(), Rarity::Rare);
    assert_eq!(enchantment.slots(), EquipmentSlots::HANDS);
}

// =============================================================================
// Groups and fluent state
// =============================================================================

#[test]
fn default_group_applies_to_items_and_memoizes() {
    let calls = Rc::new(RefCell::new(0u32));
    let reg = registrar();
    {
        let calls = Rc::clone(&calls);
        reg.default_group(move || {
            *calls.borrow_mut() += 1;
            ItemGroup::new("testmod_tools")
        });
    }

    let pick = reg
        .object("pick")
        .item(Item::new)
        .unwrap()
        .register()
        .unwrap();
    let axe = reg
        .object("axe")
        .item(Item::new)
        .unwrap()
        .register()
        .unwrap();
    assert_eq!(*calls.borrow(), 0);

    reg.register(&mut standard_host()).unwrap();

    for entry in [&pick, &axe] {
        let item = entry.get().unwrap();
        assert_eq!(item.settings().group.as_ref().unwrap().name(), "testmod_tools");
    }
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn explicit_group_wins_over_default() {
    let reg = registrar();
    reg.default_group(|| ItemGroup::new("default"));
    let rod = reg
        .object("rod")
        .item(Item::new)
        .unwrap()
        .group(ItemGroup::new("special"))
        .register()
        .unwrap();

    reg.register(&mut standard_host()).unwrap();
    assert_eq!(
        rod.get().unwrap().settings().group.as_ref().unwrap().name(),
        "special"
    );
}

// =============================================================================
// Generated resources
// =============================================================================

#[test]
fn block_defaults_generate_state_model_loot_and_lang() {
    let reg = registrar();
    reg.object("copper_lamp")
        .block(Block::new)
        .unwrap()
        .register()
        .unwrap();
    reg.register(&mut standard_host()).unwrap();

    let pack = reg.pack();
    let model = pack
        .model(&Ident::new("testmod", "block/copper_lamp"))
        .expect("default model");
    assert_eq!(
        serde_json::to_value(model).unwrap()["textures"]["all"],
        "testmod:block/copper_lamp"
    );

    let state = pack
        .blockstate(&Ident::new("testmod", "copper_lamp"))
        .expect("default blockstate");
    assert_eq!(
        serde_json::to_value(state).unwrap()["variants"][""]["model"],
        "testmod:block/copper_lamp"
    );

    let loot = pack
        .loot_table(&Ident::new("testmod", "blocks/copper_lamp"))
        .expect("default loot table");
    assert_eq!(
        serde_json::to_value(loot).unwrap()["pools"][0]["entries"][0]["name"],
        "testmod:copper_lamp"
    );

    let lang = pack.lang(&Ident::new("testmod", "en_us")).expect("lang file");
    assert_eq!(lang.get("block.testmod.copper_lamp"), Some("Copper Lamp"));
}

#[test]
fn drops_nothing_suppresses_loot() {
    let reg = registrar();
    reg.object("barrier")
        .block(Block::new)
        .unwrap()
        .simple_loot(CommonLoot::Never)
        .register()
        .unwrap();
    reg.register(&mut standard_host()).unwrap();

    assert!(
        reg.pack()
            .loot_table(&Ident::new("testmod", "blocks/barrier"))
            .is_none()
    );
    let block = reg.get_named::<Block>("barrier").unwrap().get().unwrap();
    assert!(!block.settings().drops);
}

#[test]
fn recipes_get_distinct_auto_ids() {
    let reg = registrar();
    reg.object("polished_stone")
        .block(Block::new)
        .unwrap()
        .stonecutting_recipe(Ident::new("minecraft", "stone"), 1)
        .cooking_recipe(Ident::new("minecraft", "cobblestone"), CookingKind::Smelting)
        .register()
        .unwrap();
    reg.register(&mut standard_host()).unwrap();

    let pack = reg.pack();
    let ids: Vec<String> = pack.recipe_ids().map(|id| id.to_string()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids[0].starts_with("testmod:polished_stone_stonecutting"));
    assert!(ids[1].starts_with("testmod:polished_stone_smelting"));
}

#[test]
fn datagen_can_be_disabled() {
    let reg = registrar();
    reg.datagen(false);
    reg.object("lamp")
        .block(Block::new)
        .unwrap()
        .register()
        .unwrap();
    reg.register(&mut standard_host()).unwrap();
    assert!(reg.pack().is_empty());
}

#[test]
fn pack_writes_expected_layout() {
    let reg = registrar();
    reg.object("copper_lamp")
        .block(Block::new)
        .unwrap()
        .simple_item()
        .unwrap()
        .register()
        .unwrap();
    reg.register(&mut standard_host()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    reg.write_pack(dir.path()).unwrap();

    for path in [
        "assets/testmod/models/block/copper_lamp.json",
        "assets/testmod/models/item/copper_lamp.json",
        "assets/testmod/blockstates/copper_lamp.json",
        "assets/testmod/lang/en_us.json",
        "data/testmod/loot_tables/blocks/copper_lamp.json",
    ] {
        assert!(dir.path().join(path).is_file(), "missing {path}");
    }
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn closed_registrar_rejects_new_chains() {
    let reg = registrar();
    reg.register(&mut standard_host()).unwrap();
    let err = reg
        .object("late")
        .block(Block::new)
        .unwrap()
        .register()
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPhase { .. }));
}

#[test]
fn leaked_callbacks_abort_only_in_dev() {
    let dev = Registrar::new("testmod");
    dev.dev_mode(true);
    dev.add_register_callback::<Block>("ghost", |_| {});
    assert!(matches!(
        dev.register(&mut standard_host()),
        Err(RegistryError::LeakedCallbacks { .. })
    ));

    let prod = registrar();
    prod.add_register_callback::<Block>("ghost", |_| {});
    prod.object("real").block(Block::new).unwrap().register().unwrap();
    prod.register(&mut standard_host()).unwrap();
    assert!(prod.get_named::<Block>("real").unwrap().is_present());
}

#[test]
fn missing_current_name_is_an_error() {
    let reg = registrar();
    assert!(matches!(
        reg.block(Block::new).map(|_| ()),
        Err(RegistryError::NoCurrentName)
    ));
}

#[test]
fn invalid_names_are_rejected_at_filing() {
    let reg = registrar();
    let err = reg
        .object("Bad Name")
        .block(Block::new)
        .unwrap()
        .register()
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidIdent { .. }));
}

// =============================================================================
// Custom content kinds
// =============================================================================

#[test]
fn no_config_builder_files_arbitrary_types() {
    struct Jingle {
        notes: u32,
    }

    let reg = registrar();
    let entry = reg
        .object("chime")
        .no_config(|| Jingle { notes: 5 })
        .unwrap()
        .register()
        .unwrap();

    let mut host = RegistryHost::new();
    host.add(StaticRegistry::<Jingle>::new(Ident::new("testmod", "jingle")));
    reg.register(&mut host).unwrap();

    assert_eq!(entry.get().unwrap().notes, 5);
}
