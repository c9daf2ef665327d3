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

//! Java to Bedrock block state registries.
//!
//! [`BlockRegistries::load`] reads the Java block catalog and one Bedrock
//! palette per supported protocol from a [`ResourceProvider`], merges in any
//! custom blocks, and resolves every Java state to a Bedrock runtime ID.

#[macro_use]
extern crate tracing;

pub mod bedrock;
pub mod custom;
pub mod error;
pub mod java;
pub mod mapping;
pub mod registry;
pub mod resources;

pub use error::{LoadError, RegistrationError};
pub use registry::{BlockRegistries, LoadOptions};
pub use resources::{DirectoryResources, MemoryResources, ResourceProvider};
