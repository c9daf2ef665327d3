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

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    bedrock::{
        descriptor::BlockStateDescriptor,
        palette::BedrockPalette,
        version::BedrockVersion,
    },
    custom::{expander::BlockPropertyData, CustomBlockState},
    error::LoadError,
    java::{
        clean_identifier, InteractionSets, JavaBlockTable, JavaCatalog, AIR, COMMAND_BLOCK,
        MOVING_PISTON, WATER,
    },
};

const ITEM_FRAMES: [&str; 2] = ["minecraft:frame", "minecraft:glow_frame"];

/// Bedrock runtime IDs of the states other code refers to directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BedrockSentinels {
    pub air: u32,
    pub water: u32,
    pub command_block: u32,
    pub moving_block: u32,
}

/// Everything needed to translate Java block states for one Bedrock protocol.
/// Immutable once built.
#[derive(Debug)]
pub struct VersionedMapping {
    protocol: i32,
    block_state_version: i32,
    sentinels: BedrockSentinels,
    java_to_bedrock: Vec<u32>,
    palette: Vec<BlockStateDescriptor>,
    block_properties: Vec<BlockPropertyData>,
    custom_block_state_ids: HashMap<CustomBlockState, u32>,
    remapped_vanilla_ids: Vec<u32>,
    item_frames: HashMap<BlockStateDescriptor, u32>,
    flower_pot_blocks: HashMap<String, BlockStateDescriptor>,
    jigsaw_state_ids: HashSet<u32>,
    waterlogged: Arc<HashSet<u32>>,
    interactions: Arc<InteractionSets>,
}

impl VersionedMapping {
    /// Maps every Java state in `java` onto `palette`.
    pub fn resolve(
        version: &BedrockVersion,
        palette: BedrockPalette,
        java: &JavaCatalog,
        table: &JavaBlockTable,
        overrides: &HashMap<u32, CustomBlockState>,
        interactions: Arc<InteractionSets>,
    ) -> Result<Self, LoadError> {
        let mut java_to_bedrock = Vec::with_capacity(java.len());
        let mut flower_pot_blocks = HashMap::new();
        let mut jigsaw_state_ids = HashSet::new();

        for state in java.states() {
            let unresolved = |detail: String| LoadError::UnresolvedBlockMapping {
                java_identifier: state.identifier.clone(),
                protocol: version.protocol,
                detail,
            };

            let Some(record) = table.get(state.runtime_id) else {
                return Err(unresolved("no Java block record".to_owned()));
            };

            let bedrock_id = match overrides.get(&state.runtime_id) {
                Some(custom) => palette
                    .custom_block_state_ids
                    .get(custom)
                    .copied()
                    .ok_or_else(|| unresolved(format!("custom block override {}", custom.name())))?,
                None => {
                    let descriptor = record.bedrock_descriptor(version, palette.state_version);
                    palette
                        .runtime_id(&descriptor)
                        .ok_or_else(|| unresolved(format!("built descriptor {descriptor}")))?
                }
            };

            if state.identifier.contains("jigsaw") {
                jigsaw_state_ids.insert(bedrock_id);
            }

            if record.pottable {
                if let Some(descriptor) = palette.states.get(bedrock_id as usize) {
                    flower_pot_blocks.insert(
                        clean_identifier(&state.identifier).to_owned(),
                        descriptor.clone(),
                    );
                }
            }

            java_to_bedrock.push(bedrock_id);
        }

        let sentinel = |runtime_id: u32, identifier: &str| {
            java_to_bedrock
                .get(runtime_id as usize)
                .copied()
                .ok_or_else(|| LoadError::MissingSentinelBlock {
                    identifier: identifier.to_owned(),
                })
        };
        let java_sentinels = java.sentinels();
        let sentinels = BedrockSentinels {
            air: sentinel(java_sentinels.air, AIR)?,
            water: sentinel(java_sentinels.water, WATER)?,
            command_block: sentinel(java_sentinels.command_block, COMMAND_BLOCK)?,
            moving_block: sentinel(java_sentinels.moving_piston, MOVING_PISTON)?,
        };

        let item_frames = palette
            .index
            .iter()
            .filter(|(descriptor, _)| ITEM_FRAMES.contains(&descriptor.name()))
            .map(|(descriptor, id)| (descriptor.clone(), *id))
            .collect();

        let BedrockPalette {
            state_version,
            states,
            block_properties,
            custom_block_state_ids,
            remapped_vanilla_ids,
            ..
        } = palette;

        info!(
            "Mapped {} Java block states onto {} Bedrock block states for protocol {}",
            java_to_bedrock.len(),
            states.len(),
            version.protocol
        );

        Ok(Self {
            protocol: version.protocol,
            block_state_version: state_version,
            sentinels,
            java_to_bedrock,
            palette: states,
            block_properties,
            custom_block_state_ids,
            remapped_vanilla_ids,
            item_frames,
            flower_pot_blocks,
            jigsaw_state_ids,
            waterlogged: java.waterlogged().clone(),
            interactions,
        })
    }

    pub fn protocol(&self) -> i32 {
        self.protocol
    }

    pub fn block_state_version(&self) -> i32 {
        self.block_state_version
    }

    pub fn sentinels(&self) -> &BedrockSentinels {
        &self.sentinels
    }

    pub fn bedrock_runtime_id(&self, java_runtime_id: u32) -> Option<u32> {
        self.java_to_bedrock.get(java_runtime_id as usize).copied()
    }

    /// Indexed by Java runtime ID.
    pub fn java_to_bedrock(&self) -> &[u32] {
        &self.java_to_bedrock
    }

    /// Indexed by Bedrock runtime ID.
    pub fn palette(&self) -> &[BlockStateDescriptor] {
        &self.palette
    }

    pub fn block_properties(&self) -> &[BlockPropertyData] {
        &self.block_properties
    }

    pub fn custom_block_state_id(&self, state: &CustomBlockState) -> Option<u32> {
        self.custom_block_state_ids.get(state).copied()
    }

    pub fn custom_block_state_ids(&self) -> &HashMap<CustomBlockState, u32> {
        &self.custom_block_state_ids
    }

    /// Position in the vanilla palette file to runtime ID. Empty when no custom
    /// blocks were merged, in which case the two are the same.
    pub fn remapped_vanilla_ids(&self) -> &[u32] {
        &self.remapped_vanilla_ids
    }

    pub fn remap_vanilla_id(&self, vanilla_id: u32) -> u32 {
        self.remapped_vanilla_ids
            .get(vanilla_id as usize)
            .copied()
            .unwrap_or(vanilla_id)
    }

    pub fn item_frames(&self) -> &HashMap<BlockStateDescriptor, u32> {
        &self.item_frames
    }

    pub fn is_item_frame(&self, bedrock_runtime_id: u32) -> bool {
        self.palette
            .get(bedrock_runtime_id as usize)
            .is_some_and(|d| self.item_frames.contains_key(d))
    }

    /// Keyed by clean Java identifier.
    pub fn flower_pot_block(&self, clean_identifier: &str) -> Option<&BlockStateDescriptor> {
        self.flower_pot_blocks.get(clean_identifier)
    }

    pub fn flower_pot_blocks(&self) -> &HashMap<String, BlockStateDescriptor> {
        &self.flower_pot_blocks
    }

    pub fn is_jigsaw(&self, bedrock_runtime_id: u32) -> bool {
        self.jigsaw_state_ids.contains(&bedrock_runtime_id)
    }

    pub fn jigsaw_state_ids(&self) -> &HashSet<u32> {
        &self.jigsaw_state_ids
    }

    pub fn is_waterlogged(&self, java_runtime_id: u32) -> bool {
        self.waterlogged.contains(&java_runtime_id)
    }

    pub fn interactions(&self) -> &InteractionSets {
        &self.interactions
    }
}
