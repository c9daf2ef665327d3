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

use crate::{error::RegistrationError, java::JavaCatalog};

use super::{CustomBlockDefinition, CustomBlockState};

/// Something that contributes custom blocks while the registries are built.
///
/// Providers run once per load, in the order they are handed to
/// [`BlockRegistries::load`](crate::registry::BlockRegistries::load).
pub trait CustomBlockProvider {
    fn define_custom_blocks(
        &self,
        registrar: &mut CustomBlockRegistrar<'_>,
    ) -> Result<(), RegistrationError>;
}

impl<F> CustomBlockProvider for F
where
    F: Fn(&mut CustomBlockRegistrar<'_>) -> Result<(), RegistrationError>,
{
    fn define_custom_blocks(
        &self,
        registrar: &mut CustomBlockRegistrar<'_>,
    ) -> Result<(), RegistrationError> {
        self(registrar)
    }
}

/// Collects custom blocks and overrides, validating each on insertion.
#[derive(Debug)]
pub struct CustomBlockRegistrar<'a> {
    java: &'a JavaCatalog,
    names: HashSet<String>,
    definitions: Vec<Arc<CustomBlockDefinition>>,
    overrides: HashMap<u32, CustomBlockState>,
}

impl<'a> CustomBlockRegistrar<'a> {
    #[must_use]
    pub fn new(java: &'a JavaCatalog) -> Self {
        Self {
            java,
            names: HashSet::new(),
            definitions: Vec::new(),
            overrides: HashMap::new(),
        }
    }

    /// Returns the shared handle states of this block should be built from.
    pub fn register_custom_block(
        &mut self,
        definition: CustomBlockDefinition,
    ) -> Result<Arc<CustomBlockDefinition>, RegistrationError> {
        if !self.names.insert(definition.name().to_owned()) {
            return Err(RegistrationError::DuplicateCustomBlock(
                definition.name().to_owned(),
            ));
        }

        trace!("Registered custom block {}", definition.identifier());
        let definition = Arc::new(definition);
        self.definitions.push(definition.clone());
        Ok(definition)
    }

    /// Maps a Java block state onto a custom block state. A second override for
    /// the same Java state replaces the first, which is returned.
    pub fn register_block_state_override(
        &mut self,
        java_identifier: &str,
        state: CustomBlockState,
    ) -> Result<Option<CustomBlockState>, RegistrationError> {
        let Some(runtime_id) = self.java.runtime_id(java_identifier) else {
            return Err(RegistrationError::UnknownJavaIdentifier(
                java_identifier.to_owned(),
            ));
        };

        let registered = self
            .definitions
            .iter()
            .any(|d| Arc::ptr_eq(d, state.block()));
        if !registered {
            return Err(RegistrationError::UnregisteredCustomBlock(
                state.name().to_owned(),
            ));
        }

        let previous = self.overrides.insert(runtime_id, state);
        if let Some(previous) = &previous {
            warn!(
                "Duplicate block state override for Java Identifier {java_identifier}: {} replaced",
                previous.name()
            );
        }

        Ok(previous)
    }

    pub fn definitions(&self) -> &[Arc<CustomBlockDefinition>] {
        &self.definitions
    }

    #[must_use]
    pub fn finish(self) -> CustomBlocks {
        CustomBlocks {
            definitions: self.definitions,
            overrides: self.overrides,
        }
    }
}

/// Result of the registration phase.
#[derive(Debug, Default, Clone)]
pub struct CustomBlocks {
    /// In registration order.
    pub definitions: Vec<Arc<CustomBlockDefinition>>,
    /// Keyed by Java runtime ID.
    pub overrides: HashMap<u32, CustomBlockState>,
}

impl CustomBlocks {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
