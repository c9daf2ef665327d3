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

#![allow(dead_code)]

use std::{collections::HashSet, io::Write, path::Path};

use blockbridge::{
    bedrock::{
        descriptor::{BlockStateDescriptor, States},
        palette::{fnv1_64, sort_by_name_hash},
    },
    resources::{bedrock_palette, JAVA_BLOCKS, JAVA_INTERACTIONS},
    MemoryResources,
};
use blockbridge_nbt::{
    datatypes::{Compound, List},
    LittleEndian,
};
use flate2::{write::GzEncoder, Compression};
use indexmap::IndexMap;
use serde_json::{json, Value};

pub const STATE_VERSION: i32 = 17959425;

pub const AIR: &str = "minecraft:air";
pub const WATER: &str = "minecraft:water[level=0]";
pub const COMMAND_BLOCK: &str = "minecraft:command_block[conditional=false,facing=north]";
pub const MOVING_PISTON: &str = "minecraft:moving_piston[facing=north,type=normal]";
pub const LEVER: &str = "minecraft:lever[face=floor,facing=north,powered=false]";
pub const MUDDY_ROOTS: &str = "minecraft:muddy_mangrove_roots[axis=y]";

/// A small but complete resource set: every sentinel, a few ordinary blocks,
/// and palettes for each supported palette tag.
pub struct Fixture {
    blocks: IndexMap<String, Value>,
    interactions: Value,
}

impl Fixture {
    pub fn vanilla() -> Self {
        let blocks = [
            (AIR, json!({"bedrock_identifier": "minecraft:air", "block_hardness": 0.0, "collision_index": 0})),
            (
                "minecraft:stone",
                json!({
                    "bedrock_identifier": "minecraft:stone",
                    "bedrock_states": {"stone_type": "stone"},
                    "block_hardness": 1.5,
                    "collision_index": 1,
                    "pick_item": "minecraft:stone"
                }),
            ),
            (WATER, json!({"bedrock_identifier": "minecraft:water", "bedrock_states": {"liquid_depth": 0}})),
            (
                "minecraft:water[level=1]",
                json!({"bedrock_identifier": "minecraft:flowing_water", "bedrock_states": {"liquid_depth": 1}}),
            ),
            (
                COMMAND_BLOCK,
                json!({
                    "bedrock_identifier": "minecraft:command_block",
                    "bedrock_states": {"conditional_bit": false, "facing_direction": 2},
                    "has_block_entity": true,
                    "piston_behavior": "block"
                }),
            ),
            (MOVING_PISTON, json!({"bedrock_identifier": "minecraft:moving_block", "piston_behavior": "block"})),
            (
                "minecraft:bell[attachment=floor,facing=north,powered=false]",
                json!({
                    "bedrock_identifier": "minecraft:bell",
                    "bedrock_states": {"attachment": "standing", "direction": 2, "toggle_bit": false}
                }),
            ),
            (
                "minecraft:bell[attachment=floor,facing=north,powered=true]",
                json!({
                    "bedrock_identifier": "minecraft:bell",
                    "bedrock_states": {"attachment": "standing", "direction": 2, "toggle_bit": true}
                }),
            ),
            ("minecraft:cobweb", json!({"bedrock_identifier": "minecraft:web", "piston_behavior": "destroy"})),
            (
                "minecraft:furnace[facing=north,lit=true]",
                json!({"bedrock_identifier": "minecraft:lit_furnace", "bedrock_states": {"facing_direction": 2}}),
            ),
            (
                "minecraft:furnace[facing=north,lit=false]",
                json!({"bedrock_identifier": "minecraft:furnace", "bedrock_states": {"facing_direction": 2}}),
            ),
            ("minecraft:spawner", json!({"bedrock_identifier": "minecraft:mob_spawner"})),
            ("minecraft:honey_block", json!({"bedrock_identifier": "minecraft:honey_block"})),
            ("minecraft:slime_block", json!({"bedrock_identifier": "minecraft:slime"})),
            (
                "minecraft:jigsaw[orientation=north_up]",
                json!({
                    "bedrock_identifier": "minecraft:jigsaw",
                    "bedrock_states": {"facing_direction": 2, "rotation": 0}
                }),
            ),
            (
                "minecraft:poppy",
                json!({
                    "bedrock_identifier": "minecraft:red_flower",
                    "bedrock_states": {"flower_type": "poppy"},
                    "pottable": true
                }),
            ),
            (
                "minecraft:oak_stairs[waterlogged=true]",
                json!({
                    "bedrock_identifier": "minecraft:oak_stairs",
                    "bedrock_states": {"upside_down_bit": false, "weirdo_direction": 0}
                }),
            ),
            (
                "minecraft:oak_stairs[waterlogged=false]",
                json!({
                    "bedrock_identifier": "minecraft:oak_stairs",
                    "bedrock_states": {"upside_down_bit": false, "weirdo_direction": 0}
                }),
            ),
            (
                MUDDY_ROOTS,
                json!({
                    "bedrock_identifier": "minecraft:muddy_mangrove_roots",
                    "bedrock_states": {"pillar_axis": "y"}
                }),
            ),
            (
                LEVER,
                json!({
                    "bedrock_identifier": "minecraft:lever",
                    "bedrock_states": {"lever_direction": "up_north_south", "open_bit": false}
                }),
            ),
        ];

        Self {
            blocks: blocks
                .into_iter()
                .map(|(id, record)| (id.to_owned(), record))
                .collect(),
            interactions: json!({
                "always_consumes": [LEVER],
                "requires_may_build": [LEVER, COMMAND_BLOCK]
            }),
        }
    }

    /// Drops a Java state from `blocks.json`. Palettes are unaffected.
    #[must_use]
    pub fn without(mut self, java_identifier: &str) -> Self {
        self.blocks.shift_remove(java_identifier);
        self
    }

    #[must_use]
    pub fn with_interactions(mut self, interactions: Value) -> Self {
        self.interactions = interactions;
        self
    }

    pub fn java_identifiers(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Vanilla palette entries in file order, built from the full block list.
    pub fn palette(&self, palette: &str) -> Vec<BlockStateDescriptor> {
        let mut seen = HashSet::new();
        let mut descriptors = Fixture::vanilla()
            .blocks
            .values()
            .map(|record| {
                let states: States = serde_json::from_value(
                    record.get("bedrock_states").cloned().unwrap_or(json!({})),
                )
                .unwrap();
                let name = record["bedrock_identifier"].as_str().unwrap();
                BlockStateDescriptor::new(name, STATE_VERSION, states)
            })
            .chain(
                ["minecraft:frame", "minecraft:glow_frame"]
                    .into_iter()
                    .map(|name| BlockStateDescriptor::new(name, STATE_VERSION, States::new())),
            )
            .filter(|descriptor| seen.insert(descriptor.clone()))
            .collect::<Vec<_>>();

        // 1.19.0 clients at protocol 527 know muddy roots without an axis
        if palette == "1_19_0" {
            descriptors.push(BlockStateDescriptor::new(
                "minecraft:muddy_mangrove_roots",
                STATE_VERSION,
                States::new(),
            ));
        }

        sort_by_name_hash(&mut descriptors, |d| d.name());
        descriptors
    }

    fn palette_bytes(&self, palette: &str) -> Vec<u8> {
        let entries = self
            .palette(palette)
            .iter()
            .map(|descriptor| {
                let entry = descriptor.to_compound();
                if palette == "1_19_20" {
                    entry.with("name_hash", fnv1_64(descriptor.name()) as i64)
                } else {
                    entry
                }
            })
            .collect::<Vec<_>>();

        gzip(&Compound::new().with("blocks", List::Compound(entries)))
    }

    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        vec![
            (
                JAVA_BLOCKS.to_owned(),
                serde_json::to_vec(&self.blocks).unwrap(),
            ),
            (
                JAVA_INTERACTIONS.to_owned(),
                serde_json::to_vec(&self.interactions).unwrap(),
            ),
            (bedrock_palette("1_19_0"), self.palette_bytes("1_19_0")),
            (bedrock_palette("1_19_20"), self.palette_bytes("1_19_20")),
        ]
    }

    pub fn resources(&self) -> MemoryResources {
        let mut resources = MemoryResources::new();
        for (path, bytes) in self.files() {
            resources.insert(path, bytes);
        }
        resources
    }

    pub fn write_to(&self, root: &Path) {
        for (path, bytes) in self.files() {
            let path = root.join(path);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, bytes).unwrap();
        }
    }
}

pub fn gzip(root: &Compound) -> Vec<u8> {
    let bytes = blockbridge_nbt::to_bytes::<LittleEndian>("", root).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&bytes).unwrap();
    encoder.finish().unwrap()
}
