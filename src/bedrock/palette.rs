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

use std::{collections::HashMap, sync::Arc};

use blockbridge_nbt::{ErrorKind, LittleEndian};
use flate2::read::GzDecoder;

use crate::{
    custom::{
        expander::{self, BlockPropertyData},
        CustomBlockDefinition, CustomBlockState,
    },
    error::LoadError,
    resources::{self, ResourceProvider},
};

use super::{descriptor::BlockStateDescriptor, version::BedrockVersion};

const FNV1_64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV1_64_PRIME: u64 = 1099511628211;

/// 64-bit FNV-1 over the UTF-8 bytes of `name`, the key Bedrock orders its
/// palette by. Bytes are sign-extended before the xor, as the client does.
pub fn fnv1_64(name: &str) -> u64 {
    let mut hash = FNV1_64_OFFSET_BASIS;
    for &byte in name.as_bytes() {
        hash = hash.wrapping_mul(FNV1_64_PRIME);
        hash ^= byte as i8 as i64 as u64;
    }
    hash
}

/// Stable sort by the unsigned name hash.
pub fn sort_by_name_hash<T>(entries: &mut [T], name: impl Fn(&T) -> &str) {
    entries.sort_by_cached_key(|entry| fnv1_64(name(entry)));
}

/// One protocol's palette, with any custom block states merged in.
#[derive(Debug)]
pub struct BedrockPalette {
    pub state_version: i32,
    /// Indexed by Bedrock runtime ID.
    pub states: Vec<BlockStateDescriptor>,
    pub index: HashMap<BlockStateDescriptor, u32>,
    pub block_properties: Vec<BlockPropertyData>,
    pub custom_block_state_ids: HashMap<CustomBlockState, u32>,
    /// Pre-merge vanilla position to final runtime ID. Empty without custom blocks.
    pub remapped_vanilla_ids: Vec<u32>,
}

enum Origin {
    Vanilla(usize),
    Custom(CustomBlockState),
}

impl BedrockPalette {
    pub fn load(
        resources: &dyn ResourceProvider,
        version: &BedrockVersion,
        custom_blocks: &[Arc<CustomBlockDefinition>],
    ) -> Result<Self, LoadError> {
        let vanilla = read_vanilla_palette(resources, version)?;
        Self::build(version, vanilla, custom_blocks)
    }

    /// `vanilla` must be non-empty; its first entry supplies the state version.
    pub fn build(
        version: &BedrockVersion,
        vanilla: Vec<BlockStateDescriptor>,
        custom_blocks: &[Arc<CustomBlockDefinition>],
    ) -> Result<Self, LoadError> {
        let Some(state_version) = vanilla.first().map(BlockStateDescriptor::version) else {
            return Err(LoadError::corrupt(
                &resources::bedrock_palette(version.palette),
                "palette has no blocks",
            ));
        };

        let has_custom = !custom_blocks.is_empty();
        let vanilla_len = vanilla.len();

        let mut block_properties = Vec::with_capacity(custom_blocks.len());
        let mut merged = vanilla
            .into_iter()
            .enumerate()
            .map(|(i, descriptor)| (descriptor, Origin::Vanilla(i)))
            .collect::<Vec<_>>();

        if has_custom {
            for block in custom_blocks {
                block_properties.push(expander::block_property_data(block, version));
                merged.extend(
                    expander::expand_states(block, state_version)
                        .into_iter()
                        .map(|(descriptor, state)| (descriptor, Origin::Custom(state))),
                );
            }

            debug!(
                "Added {} custom block states to v{} palette.",
                merged.len() - vanilla_len,
                version.protocol
            );
            sort_by_name_hash(&mut merged, |(descriptor, _)| descriptor.name());
        }

        let mut states = Vec::with_capacity(merged.len());
        let mut index = HashMap::with_capacity(merged.len());
        let mut custom_block_state_ids = HashMap::new();
        let mut remapped_vanilla_ids = if has_custom {
            vec![0; vanilla_len]
        } else {
            Vec::new()
        };

        for (position, (descriptor, origin)) in merged.into_iter().enumerate() {
            let position = position as u32;

            if index.insert(descriptor.clone(), position).is_some() {
                return Err(LoadError::DuplicatePaletteEntry {
                    protocol: version.protocol,
                    descriptor: descriptor.to_string(),
                });
            }

            match origin {
                Origin::Vanilla(i) if has_custom => remapped_vanilla_ids[i] = position,
                Origin::Vanilla(_) => {}
                Origin::Custom(state) => {
                    custom_block_state_ids.insert(state, position);
                }
            }
            states.push(descriptor);
        }

        Ok(Self {
            state_version,
            states,
            index,
            block_properties,
            custom_block_state_ids,
            remapped_vanilla_ids,
        })
    }

    pub fn runtime_id(&self, descriptor: &BlockStateDescriptor) -> Option<u32> {
        self.index.get(descriptor).copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn describe(error: ErrorKind) -> String {
    match error {
        ErrorKind::Io(e) => e.to_string(),
        ErrorKind::InvalidData(reason) => reason,
    }
}

fn read_vanilla_palette(
    resources: &dyn ResourceProvider,
    version: &BedrockVersion,
) -> Result<Vec<BlockStateDescriptor>, LoadError> {
    let path = resources::bedrock_palette(version.palette);
    let mut stream = GzDecoder::new(resources.open(&path)?);

    let (_, root) = blockbridge_nbt::read_named::<LittleEndian>(&mut stream)
        .map_err(|e| LoadError::corrupt(&path, describe(e)))?;

    let blocks = root
        .get_list("blocks")
        .and_then(|list| list.as_compounds())
        .ok_or_else(|| LoadError::corrupt(&path, "missing `blocks` compound list"))?;

    let descriptors = blocks
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            BlockStateDescriptor::from_compound(entry, version.transient_fields)
                .map_err(|e| LoadError::corrupt(&path, format!("block {i}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    trace!("Read {} block states from {path}", descriptors.len());
    Ok(descriptors)
}
