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

//! The Java block state catalog loaded from `mappings/blocks.json`.
//!
//! Entry order in the file defines the Java runtime ID space, so the table is
//! parsed into an [`IndexMap`] and walked exactly once in that order.

pub mod interactions;

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    bedrock::{
        descriptor::{BlockStateDescriptor, States},
        version::BedrockVersion,
    },
    error::LoadError,
    resources::{ResourceProvider, JAVA_BLOCKS},
};

pub use interactions::InteractionSets;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PistonBehavior {
    #[default]
    Normal,
    Block,
    PushOnly,
    Destroy,
}

/// One entry of `blocks.json`, as written.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct JavaBlockRecord {
    pub bedrock_identifier: String,
    #[serde(default)]
    pub bedrock_states: States,
    pub block_hardness: Option<f64>,
    #[serde(default)]
    pub can_break_with_hand: bool,
    pub collision_index: Option<i32>,
    pub pick_item: Option<String>,
    pub piston_behavior: Option<PistonBehavior>,
    #[serde(default)]
    pub has_block_entity: bool,
    /// Set whenever the key is present, whatever its value.
    #[serde(default, deserialize_with = "key_present")]
    pub pottable: bool,
}

fn key_present<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| true)
}

impl JavaBlockRecord {
    /// The Bedrock palette entry this Java state should map onto.
    pub fn bedrock_descriptor(
        &self,
        version: &BedrockVersion,
        state_version: i32,
    ) -> BlockStateDescriptor {
        version.quirk.descriptor(
            &self.bedrock_identifier,
            state_version,
            self.bedrock_states.clone(),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JavaBlockState {
    pub runtime_id: u32,
    pub identifier: String,
    /// Index into [`JavaCatalog::clean_identifiers`].
    pub base_block_id: u32,
    pub hardness: Option<f64>,
    pub can_break_with_hand: bool,
    pub collision_index: Option<i32>,
    pub piston_behavior: PistonBehavior,
    pub is_block_entity: bool,
    pub pick_item: Option<String>,
}

impl JavaBlockState {
    pub fn clean_identifier(&self) -> &str {
        clean_identifier(&self.identifier)
    }
}

/// `minecraft:oak_door[facing=east,half=lower]` -> `minecraft:oak_door`
pub fn clean_identifier(identifier: &str) -> &str {
    identifier
        .split_once('[')
        .map_or(identifier, |(clean, _)| clean)
}

fn piston_behavior(identifier: &str, declared: Option<PistonBehavior>) -> PistonBehavior {
    if identifier == "minecraft:obsidian"
        || identifier == "minecraft:crying_obsidian"
        || identifier.starts_with("minecraft:respawn_anchor")
        || identifier.starts_with("minecraft:reinforced_deepslate")
    {
        PistonBehavior::Block
    } else {
        declared.unwrap_or_default()
    }
}

fn is_waterlogged(identifier: &str) -> bool {
    identifier.contains("waterlogged=true")
        || identifier.contains("minecraft:bubble_column")
        || identifier.contains("minecraft:kelp")
        || identifier.contains("seagrass")
}

/// Java states other code refers to directly. Bell and cobweb are base-block
/// IDs, everything else is a runtime ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JavaSentinels {
    pub air: u32,
    pub water: u32,
    pub command_block: u32,
    pub moving_piston: u32,
    pub bell_block: u32,
    pub cobweb_block: u32,
    pub furnace: u32,
    pub furnace_lit: u32,
    pub spawner: u32,
    pub honey_block: u32,
    pub slime_block: u32,
    pub jigsaw: u32,
}

pub const AIR: &str = "minecraft:air";
pub const WATER: &str = "minecraft:water[level=0]";
pub const COMMAND_BLOCK: &str = "minecraft:command_block[conditional=false,facing=north]";
pub const MOVING_PISTON: &str = "minecraft:moving_piston[facing=north,type=normal]";

#[derive(Default)]
struct SentinelScan {
    air: Option<u32>,
    water: Option<u32>,
    command_block: Option<u32>,
    moving_piston: Option<u32>,
    bell_block: Option<u32>,
    cobweb_block: Option<u32>,
    furnace: Option<u32>,
    furnace_lit: Option<u32>,
    spawner: Option<u32>,
    honey_block: Option<u32>,
    slime_block: Option<u32>,
    jigsaw: Option<u32>,
}

impl SentinelScan {
    fn observe(&mut self, identifier: &str, runtime_id: u32, base_block_id: u32) {
        match identifier {
            AIR => self.air = Some(runtime_id),
            WATER => self.water = Some(runtime_id),
            COMMAND_BLOCK => self.command_block = Some(runtime_id),
            MOVING_PISTON => self.moving_piston = Some(runtime_id),
            "minecraft:honey_block" => self.honey_block = Some(runtime_id),
            "minecraft:slime_block" => self.slime_block = Some(runtime_id),
            _ => {}
        }

        if identifier.starts_with("minecraft:bell[") {
            self.bell_block.get_or_insert(base_block_id);
        } else if identifier.contains("cobweb") {
            self.cobweb_block.get_or_insert(base_block_id);
        } else if identifier.starts_with("minecraft:furnace[facing=north") {
            if identifier.contains("lit=true") {
                self.furnace_lit.get_or_insert(runtime_id);
            } else {
                self.furnace.get_or_insert(runtime_id);
            }
        } else if identifier.starts_with("minecraft:spawner") {
            self.spawner.get_or_insert(runtime_id);
        }

        if identifier.contains("jigsaw") {
            self.jigsaw.get_or_insert(runtime_id);
        }
    }

    fn finish(self) -> Result<JavaSentinels, LoadError> {
        fn required(id: Option<u32>, identifier: &str) -> Result<u32, LoadError> {
            id.ok_or_else(|| LoadError::MissingSentinelBlock {
                identifier: identifier.to_owned(),
            })
        }

        Ok(JavaSentinels {
            air: required(self.air, AIR)?,
            water: required(self.water, WATER)?,
            command_block: required(self.command_block, COMMAND_BLOCK)?,
            moving_piston: required(self.moving_piston, MOVING_PISTON)?,
            bell_block: required(self.bell_block, "minecraft:bell[")?,
            cobweb_block: required(self.cobweb_block, "minecraft:cobweb")?,
            furnace: required(self.furnace, "minecraft:furnace[facing=north,lit=false]")?,
            furnace_lit: required(self.furnace_lit, "minecraft:furnace[facing=north,lit=true]")?,
            spawner: required(self.spawner, "minecraft:spawner")?,
            honey_block: required(self.honey_block, "minecraft:honey_block")?,
            slime_block: required(self.slime_block, "minecraft:slime_block")?,
            jigsaw: required(self.jigsaw, "minecraft:jigsaw")?,
        })
    }
}

/// Raw records kept only while the per-version mappings are built.
#[derive(Debug)]
pub struct JavaBlockTable {
    records: Vec<JavaBlockRecord>,
}

impl JavaBlockTable {
    pub fn get(&self, runtime_id: u32) -> Option<&JavaBlockRecord> {
        self.records.get(runtime_id as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JavaBlockRecord> {
        self.records.iter()
    }
}

#[derive(Debug)]
pub struct JavaCatalog {
    states: Vec<JavaBlockState>,
    identifiers: HashMap<String, u32>,
    clean_identifiers: Vec<String>,
    java_to_bedrock_identifiers: HashMap<String, String>,
    waterlogged: Arc<HashSet<u32>>,
    sentinels: JavaSentinels,
}

impl JavaCatalog {
    pub fn load(resources: &dyn ResourceProvider) -> Result<(Self, JavaBlockTable), LoadError> {
        let bytes = resources.read_to_vec(JAVA_BLOCKS)?;
        let records: IndexMap<String, JavaBlockRecord> =
            serde_json::from_slice(&bytes).map_err(|e| LoadError::corrupt(JAVA_BLOCKS, e))?;

        Self::from_records(records)
    }

    pub fn from_records(
        records: IndexMap<String, JavaBlockRecord>,
    ) -> Result<(Self, JavaBlockTable), LoadError> {
        let mut states = Vec::with_capacity(records.len());
        let mut identifiers = HashMap::with_capacity(records.len());
        let mut clean_identifiers: Vec<String> = Vec::new();
        let mut java_to_bedrock_identifiers = HashMap::new();
        let mut waterlogged = HashSet::new();
        let mut sentinels = SentinelScan::default();
        let mut table = Vec::with_capacity(records.len());

        for (runtime_id, (identifier, record)) in records.into_iter().enumerate() {
            let runtime_id = u32::try_from(runtime_id)
                .map_err(|_| LoadError::corrupt(JAVA_BLOCKS, "too many block states"))?;
            let clean = clean_identifier(&identifier);

            if clean_identifiers.last().map(String::as_str) != Some(clean) {
                clean_identifiers.push(clean.to_owned());
            }
            // at least one entry was pushed above
            let base_block_id = (clean_identifiers.len() - 1) as u32;

            java_to_bedrock_identifiers
                .insert(clean.to_owned(), record.bedrock_identifier.clone());
            sentinels.observe(&identifier, runtime_id, base_block_id);
            if is_waterlogged(&identifier) {
                waterlogged.insert(runtime_id);
            }

            let state = JavaBlockState {
                runtime_id,
                base_block_id,
                hardness: record.block_hardness,
                can_break_with_hand: record.can_break_with_hand,
                // only trusted alongside a hardness value
                collision_index: record.block_hardness.and(record.collision_index),
                piston_behavior: piston_behavior(&identifier, record.piston_behavior),
                is_block_entity: record.has_block_entity,
                pick_item: record.pick_item.clone(),
                identifier: identifier.clone(),
            };

            trace!("Java block state {runtime_id}: {identifier}");
            identifiers.insert(identifier, runtime_id);
            states.push(state);
            table.push(record);
        }

        let catalog = Self {
            states,
            identifiers,
            clean_identifiers,
            java_to_bedrock_identifiers,
            waterlogged: Arc::new(waterlogged),
            sentinels: sentinels.finish()?,
        };

        debug!(
            "Loaded {} Java block states ({} blocks)",
            catalog.states.len(),
            catalog.clean_identifiers.len()
        );

        Ok((catalog, JavaBlockTable { records: table }))
    }

    pub fn runtime_id(&self, identifier: &str) -> Option<u32> {
        self.identifiers.get(identifier).copied()
    }

    pub fn state(&self, runtime_id: u32) -> Option<&JavaBlockState> {
        self.states.get(runtime_id as usize)
    }

    pub fn states(&self) -> &[JavaBlockState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Indexed by base-block ID.
    pub fn clean_identifiers(&self) -> &[String] {
        &self.clean_identifiers
    }

    pub fn clean_identifier(&self, base_block_id: u32) -> Option<&str> {
        self.clean_identifiers
            .get(base_block_id as usize)
            .map(String::as_str)
    }

    pub fn bedrock_identifier(&self, clean_identifier: &str) -> Option<&str> {
        self.java_to_bedrock_identifiers
            .get(clean_identifier)
            .map(String::as_str)
    }

    pub fn is_waterlogged(&self, runtime_id: u32) -> bool {
        self.waterlogged.contains(&runtime_id)
    }

    pub fn waterlogged(&self) -> &Arc<HashSet<u32>> {
        &self.waterlogged
    }

    pub fn sentinels(&self) -> &JavaSentinels {
        &self.sentinels
    }
}
