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

use thiserror::Error;

/// Everything that can abort building the block registries. None of these are
/// recoverable: a partially built mapping is never published.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to find resource {path}")]
    ResourceNotFound { path: String },
    #[error("Failed to read resource {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt resource {path}: {reason}")]
    CorruptResource { path: String, reason: String },
    #[error("Unable to find {identifier} in palette")]
    MissingSentinelBlock { identifier: String },
    #[error("Unable to find {java_identifier} Bedrock runtime ID for protocol {protocol}: {detail}")]
    UnresolvedBlockMapping {
        java_identifier: String,
        protocol: i32,
        detail: String,
    },
    #[error("Duplicate block state in protocol {protocol} Bedrock palette: {descriptor}")]
    DuplicatePaletteEntry { protocol: i32, descriptor: String },
    #[error("Protocol version {0} is not supported")]
    UnsupportedProtocol(i32),
    #[error("No protocol versions selected")]
    NoProtocolsSelected,
    #[error("Unknown Java block state in {path}: {identifier}")]
    UnknownJavaIdentifier { path: String, identifier: String },
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl LoadError {
    pub(crate) fn corrupt(path: &str, reason: impl ToString) -> Self {
        LoadError::CorruptResource {
            path: path.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Rejections raised synchronously while collaborators register custom blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Another custom block was already registered under the name: {0}")]
    DuplicateCustomBlock(String),
    #[error("Unknown Java block state. Identifier: {0}")]
    UnknownJavaIdentifier(String),
    #[error("Custom block is unregistered. Name: {0}")]
    UnregisteredCustomBlock(String),
    #[error("Custom block {block} has no property named {property}")]
    UnknownProperty { block: String, property: String },
    #[error("Value {value} is not allowed for property {property} of custom block {block}")]
    InvalidPropertyValue {
        block: String,
        property: String,
        value: String,
    },
    #[error("Property {property} of custom block {block} declares no values")]
    EmptyProperty { block: String, property: String },
    #[error("Property {property} is declared twice on custom block {block}")]
    DuplicateProperty { block: String, property: String },
    #[error("Custom block {block} declares more states than a palette can hold")]
    TooManyPermutations { block: String },
}
