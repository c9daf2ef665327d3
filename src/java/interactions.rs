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

use std::collections::HashSet;

use serde::Deserialize;

use crate::{
    error::LoadError,
    resources::{ResourceProvider, JAVA_INTERACTIONS},
};

use super::JavaCatalog;

#[derive(Deserialize)]
struct InteractionsFile {
    #[serde(default)]
    always_consumes: Vec<String>,
    #[serde(default)]
    requires_may_build: Vec<String>,
}

/// Java runtime IDs with special interaction handling.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InteractionSets {
    /// Interacting with these always consumes the action.
    pub always_consumes: HashSet<u32>,
    /// Interacting with these needs permission to build.
    pub requires_may_build: HashSet<u32>,
}

impl InteractionSets {
    pub fn load(
        resources: &dyn ResourceProvider,
        catalog: &JavaCatalog,
    ) -> Result<Self, LoadError> {
        let bytes = resources.read_to_vec(JAVA_INTERACTIONS)?;
        let file: InteractionsFile = serde_json::from_slice(&bytes)
            .map_err(|e| LoadError::corrupt(JAVA_INTERACTIONS, e))?;

        let sets = Self {
            always_consumes: runtime_ids(catalog, &file.always_consumes)?,
            requires_may_build: runtime_ids(catalog, &file.requires_may_build)?,
        };

        debug!(
            "Loaded {} interactive and {} may-build block states",
            sets.always_consumes.len(),
            sets.requires_may_build.len()
        );
        Ok(sets)
    }

    pub fn always_consumes(&self, runtime_id: u32) -> bool {
        self.always_consumes.contains(&runtime_id)
    }

    pub fn requires_may_build(&self, runtime_id: u32) -> bool {
        self.requires_may_build.contains(&runtime_id)
    }
}

fn runtime_ids(catalog: &JavaCatalog, identifiers: &[String]) -> Result<HashSet<u32>, LoadError> {
    identifiers
        .iter()
        .map(|identifier| {
            catalog
                .runtime_id(identifier)
                .ok_or_else(|| LoadError::UnknownJavaIdentifier {
                    path: JAVA_INTERACTIONS.to_owned(),
                    identifier: identifier.clone(),
                })
        })
        .collect()
}
