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

use clap::Parser;

use blockbridge::LoadOptions;

#[derive(Debug, Parser)]
pub struct Args {
    /// The directory holding the `bedrock/` palettes and `mappings/` tables.
    pub resource_dir: String,
    /// Bedrock protocol to build mappings for. May be repeated. Defaults to
    /// every supported protocol.
    #[arg(short, long = "protocol", env = "BLOCKBRIDGE_PROTOCOLS", value_delimiter = ',')]
    protocols: Vec<i32>,
    /// Build the registries without custom blocks.
    #[arg(long, env = "BLOCKBRIDGE_NO_CUSTOM_BLOCKS")]
    no_custom_blocks: bool,
}

impl Args {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            add_custom_blocks: !self.no_custom_blocks,
            protocols: (!self.protocols.is_empty()).then(|| self.protocols.clone()),
        }
    }
}
