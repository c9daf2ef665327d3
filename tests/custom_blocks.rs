/*
 * Copyright (c) 2024 Andrew Brower.
 * This file is part of Blockbridge.
 *
 * Blockbridge is free software: you can redistribute it and/or
 * modify it under the terms of the GNU Affero General Public
 * License as published by the Free Software Foundation, either
 * version 3 of the License, or (at your option) any later version.
 *
 * Blockbridge is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public
 * License along with Blockbridge. If not, see
 * <https://www.gnu.org/licenses/>.
 */

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use blockbridge::{
    bedrock::{descriptor::StateValue, palette::fnv1_64},
    custom::{
        BoxComponent, CustomBlockComponents, CustomBlockDefinition, CustomBlockProperty,
        CustomBlockProvider, CustomBlockRegistrar, CustomBlockState,
    },
    BlockRegistries, LoadError, LoadOptions, RegistrationError,
};
use common::Fixture;

fn widget() -> CustomBlockDefinition {
    CustomBlockDefinition::builder("widget")
        .property(CustomBlockProperty::boolean("on"))
        .components(CustomBlockComponents {
            collision_box: Some(BoxComponent::FULL),
            destroy_time: Some(2.0),
            ..Default::default()
        })
        .build()
        .unwrap()
}

fn load_with(providers: &[&dyn CustomBlockProvider]) -> Result<BlockRegistries, LoadError> {
    BlockRegistries::load(
        &Fixture::vanilla().resources(),
        &LoadOptions::default(),
        providers,
    )
}

#[test]
fn widget_states_are_merged_in_order() {
    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        r.register_custom_block(widget())?;
        Ok::<_, RegistrationError>(())
    };
    let registries = load_with(&[&provider]).unwrap();

    let block = &registries.custom_blocks()[0];
    let off = CustomBlockState::builder(block).with("on", false).build().unwrap();
    let on = CustomBlockState::builder(block).with("on", true).build().unwrap();

    for mapping in registries.mappings() {
        assert_eq!(mapping.custom_block_state_ids().len(), 2);
        let off_id = mapping.custom_block_state_id(&off).unwrap();
        let on_id = mapping.custom_block_state_id(&on).unwrap();

        // equal names keep expansion order
        assert_eq!(on_id, off_id + 1);
        assert_eq!(
            mapping.palette()[off_id as usize].states()["on"],
            StateValue::Bool(false)
        );

        for pair in mapping.palette().windows(2) {
            assert!(fnv1_64(pair[0].name()) <= fnv1_64(pair[1].name()));
        }

        assert_eq!(mapping.block_properties().len(), 1);
        assert_eq!(mapping.block_properties()[0].name, "blockbridge_custom:widget");
    }
}

#[test]
fn vanilla_ids_are_remapped_after_merge() {
    let fixture = Fixture::vanilla();
    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        r.register_custom_block(widget())?;
        Ok::<_, RegistrationError>(())
    };
    let registries = load_with(&[&provider]).unwrap();

    for mapping in registries.mappings() {
        let tag = if mapping.protocol() == 544 { "1_19_20" } else { "1_19_0" };
        let vanilla = fixture.palette(tag);

        assert_eq!(mapping.remapped_vanilla_ids().len(), vanilla.len());
        assert_eq!(mapping.palette().len(), vanilla.len() + 2);
        for (old, descriptor) in vanilla.iter().enumerate() {
            let new = mapping.remap_vanilla_id(old as u32);
            assert_eq!(&mapping.palette()[new as usize], descriptor);
        }
    }
}

#[test]
fn collision_component_name_follows_protocol() {
    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        r.register_custom_block(widget())?;
        Ok::<_, RegistrationError>(())
    };
    let registries = load_with(&[&provider]).unwrap();

    let components = |protocol| {
        registries.mapping(protocol).unwrap().block_properties()[0]
            .properties
            .get_compound("components")
            .unwrap()
            .clone()
    };

    assert!(components(527).contains_key("minecraft:block_collision"));
    assert!(components(534).contains_key("minecraft:collision_box"));
    assert!(components(544).contains_key("minecraft:collision_box"));
}

#[test]
fn duplicate_override_last_wins() {
    let displaced = std::sync::Mutex::new(None);
    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        let block = r.register_custom_block(widget())?;
        let off = CustomBlockState::builder(&block).with("on", false).build()?;
        let on = CustomBlockState::builder(&block).with("on", true).build()?;

        r.register_block_state_override("minecraft:stone", off)?;
        *displaced.lock().unwrap() = r.register_block_state_override("minecraft:stone", on)?;
        Ok::<_, RegistrationError>(())
    };
    let registries = load_with(&[&provider]).unwrap();

    let displaced = displaced.into_inner().unwrap().unwrap();
    assert_eq!(displaced.get("on"), Some(&StateValue::Bool(false)));

    let stone = registries.java().runtime_id("minecraft:stone").unwrap();
    let on = &registries.custom_block_state_overrides()[&stone];
    assert_eq!(on.get("on"), Some(&StateValue::Bool(true)));

    for mapping in registries.mappings() {
        assert_eq!(
            mapping.bedrock_runtime_id(stone),
            mapping.custom_block_state_id(on)
        );
    }
}

#[test]
fn registration_errors_abort_load() {
    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        r.register_custom_block(widget())?;
        r.register_custom_block(widget())?;
        Ok::<_, RegistrationError>(())
    };

    assert!(matches!(
        load_with(&[&provider]),
        Err(LoadError::Registration(RegistrationError::DuplicateCustomBlock(name))) if name == "widget"
    ));

    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        let block = std::sync::Arc::new(widget());
        let state = CustomBlockState::builder(&block).build()?;
        r.register_block_state_override("minecraft:stone", state)?;
        Ok::<_, RegistrationError>(())
    };

    assert!(matches!(
        load_with(&[&provider]),
        Err(LoadError::Registration(RegistrationError::UnregisteredCustomBlock(_)))
    ));
}

#[test]
fn providers_run_in_order_and_keep_registration_order() {
    let first = |r: &mut CustomBlockRegistrar<'_>| {
        r.register_custom_block(CustomBlockDefinition::builder("zeta").build()?)?;
        Ok::<_, RegistrationError>(())
    };
    let second = |r: &mut CustomBlockRegistrar<'_>| {
        r.register_custom_block(CustomBlockDefinition::builder("alpha").build()?)?;
        Ok::<_, RegistrationError>(())
    };
    let registries = load_with(&[&first, &second]).unwrap();

    let names = registries
        .custom_blocks()
        .iter()
        .map(|b| b.name())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["zeta", "alpha"]);

    let properties = registries.mapping(544).unwrap().block_properties();
    assert_eq!(properties[0].name, "blockbridge_custom:zeta");
    assert_eq!(properties[1].name, "blockbridge_custom:alpha");
}

#[test]
fn disabled_custom_blocks_skip_providers() {
    let calls = AtomicUsize::new(0);
    let provider = |r: &mut CustomBlockRegistrar<'_>| {
        calls.fetch_add(1, Ordering::Relaxed);
        r.register_custom_block(widget())?;
        Ok::<_, RegistrationError>(())
    };
    let options = LoadOptions {
        add_custom_blocks: false,
        ..Default::default()
    };

    let registries =
        BlockRegistries::load(&Fixture::vanilla().resources(), &options, &[&provider]).unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert!(registries.custom_blocks().is_empty());
    for mapping in registries.mappings() {
        assert!(mapping.custom_block_state_ids().is_empty());
        assert!(mapping.remapped_vanilla_ids().is_empty());
    }
}
