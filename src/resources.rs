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
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};

use crate::error::LoadError;

pub const JAVA_BLOCKS: &str = "mappings/blocks.json";
pub const JAVA_INTERACTIONS: &str = "mappings/interactions.json";

/// Path of the gzip-compressed palette for one palette tag, e.g. `1_19_20`.
pub fn bedrock_palette(palette: &str) -> String {
    format!("bedrock/block_palette.{palette}.nbt")
}

/// Byte streams keyed by resource path, supplied by whatever hosts the proxy.
pub trait ResourceProvider: Sync {
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, LoadError>;

    fn read_to_vec(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let mut buf = Vec::new();
        self.open(path)?
            .read_to_end(&mut buf)
            .map_err(|source| LoadError::Io {
                path: path.to_owned(),
                source,
            })?;
        Ok(buf)
    }
}

/// Resources laid out on disk below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceProvider for DirectoryResources {
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, LoadError> {
        let full = self.root.join(path);

        match File::open(&full) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::ResourceNotFound {
                    path: path.to_owned(),
                })
            }
            Err(source) => Err(LoadError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }
}

/// Resources held in memory, for embedding hosts that bundle their data.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources(HashMap<String, Vec<u8>>);

impl MemoryResources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.0.insert(path.into(), bytes.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.0.remove(path)
    }
}

impl ResourceProvider for MemoryResources {
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, LoadError> {
        self.0
            .get(path)
            .map(|bytes| Box::new(bytes.as_slice()) as Box<dyn Read + '_>)
            .ok_or_else(|| LoadError::ResourceNotFound {
                path: path.to_owned(),
            })
    }
}
