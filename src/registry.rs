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
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    bedrock::{
        palette::BedrockPalette,
        version::{BedrockVersion, SUPPORTED_VERSIONS},
    },
    custom::{
        CustomBlockDefinition, CustomBlockProvider, CustomBlockRegistrar, CustomBlockState,
        CustomBlocks,
    },
    error::LoadError,
    java::{InteractionSets, JavaCatalog},
    mapping::VersionedMapping,
    resources::ResourceProvider,
};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// When false, custom block providers are never invoked.
    pub add_custom_blocks: bool,
    /// Protocols to build mappings for. All supported protocols if unset; an
    /// empty selection is rejected.
    pub protocols: Option<Vec<i32>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            add_custom_blocks: true,
            protocols: None,
        }
    }
}

impl LoadOptions {
    fn versions(&self) -> Result<Vec<&'static BedrockVersion>, LoadError> {
        let Some(protocols) = &self.protocols else {
            return Ok(SUPPORTED_VERSIONS.iter().collect());
        };
        if protocols.is_empty() {
            return Err(LoadError::NoProtocolsSelected);
        }

        let mut versions = Vec::with_capacity(protocols.len());
        for &protocol in protocols {
            let version =
                BedrockVersion::find(protocol).ok_or(LoadError::UnsupportedProtocol(protocol))?;
            if !versions.contains(&version) {
                versions.push(version);
            }
        }
        Ok(versions)
    }
}

/// Block registries for the lifetime of the proxy. Built once by [`load`],
/// read concurrently afterwards, torn down by dropping.
///
/// [`load`]: BlockRegistries::load
#[derive(Debug)]
pub struct BlockRegistries {
    java: JavaCatalog,
    interactions: Arc<InteractionSets>,
    custom_blocks: CustomBlocks,
    mappings: BTreeMap<i32, VersionedMapping>,
}

impl BlockRegistries {
    pub fn load(
        resources: &dyn ResourceProvider,
        options: &LoadOptions,
        providers: &[&dyn CustomBlockProvider],
    ) -> Result<Self, LoadError> {
        let versions = options.versions()?;

        let (java, table) = JavaCatalog::load(resources)?;
        let interactions = Arc::new(InteractionSets::load(resources, &java)?);

        let custom_blocks = if options.add_custom_blocks {
            let mut registrar = CustomBlockRegistrar::new(&java);
            for provider in providers {
                provider.define_custom_blocks(&mut registrar)?;
            }
            registrar.finish()
        } else {
            CustomBlocks::default()
        };
        debug!("Registered {} custom blocks.", custom_blocks.definitions.len());
        debug!(
            "Registered {} custom block overrides.",
            custom_blocks.overrides.len()
        );

        let built = versions
            .par_iter()
            .map(|version| {
                let palette = BedrockPalette::load(resources, version, &custom_blocks.definitions)?;
                VersionedMapping::resolve(
                    version,
                    palette,
                    &java,
                    &table,
                    &custom_blocks.overrides,
                    interactions.clone(),
                )
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        drop(table);

        let mappings = built
            .into_iter()
            .map(|mapping| (mapping.protocol(), mapping))
            .collect();

        Ok(Self {
            java,
            interactions,
            custom_blocks,
            mappings,
        })
    }

    pub fn java(&self) -> &JavaCatalog {
        &self.java
    }

    pub fn mapping(&self, protocol: i32) -> Result<&VersionedMapping, LoadError> {
        self.mappings
            .get(&protocol)
            .ok_or(LoadError::UnsupportedProtocol(protocol))
    }

    /// Ordered by protocol.
    pub fn mappings(&self) -> impl Iterator<Item = &VersionedMapping> {
        self.mappings.values()
    }

    pub fn protocols(&self) -> impl Iterator<Item = i32> + '_ {
        self.mappings.keys().copied()
    }

    pub fn custom_blocks(&self) -> &[Arc<CustomBlockDefinition>] {
        &self.custom_blocks.definitions
    }

    /// Keyed by Java runtime ID.
    pub fn custom_block_state_overrides(&self) -> &HashMap<u32, CustomBlockState> {
        &self.custom_blocks.overrides
    }

    pub fn interactions(&self) -> &InteractionSets {
        &self.interactions
    }
}
